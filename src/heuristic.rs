//! Heuristic selection for the packing algorithms.
//!
//! A [`Heuristic`] is a 16-bit composite selector: the low nibble picks the
//! algorithm, the second nibble the bin-selection method, and the third
//! nibble the split method (Guillotine only). Values are combined with `|`;
//! the named presets cover every valid combination. Invalid fields silently
//! fall back to the algorithm's default; use [`Heuristic::validate`] to
//! surface the issue instead.

use crate::error::{RectPackError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// Top-level algorithm families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Free-rectangle list of maximal rectangles. Generally the most
    /// efficient results when packing to a static size.
    MaxRects,
    /// Horizontal-profile model. A good balance between speed and
    /// efficiency, well suited to dynamic data.
    Skyline,
    /// Guillotine splitting. Typically faster, but sensitive to choosing
    /// the right bin/split methods for specific inputs.
    Guillotine,
}

impl FromStr for Algorithm {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "maxrects" => Ok(Self::MaxRects),
            "skyline" => Ok(Self::Skyline),
            "guillotine" => Ok(Self::Guillotine),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MaxRects => "MaxRects",
            Self::Skyline => "Skyline",
            Self::Guillotine => "Guillotine",
        })
    }
}

/// Bin-selection methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinFit {
    /// Positions the rectangle against the short side of the free rectangle
    /// into which it fits best. Valid with MaxRects and Guillotine.
    BestShortSideFit,
    /// Positions the rectangle against the long side of the free rectangle
    /// into which it fits best. Valid with MaxRects and Guillotine.
    BestLongSideFit,
    /// Positions the rectangle into the smallest free rectangle it fits.
    /// Valid with MaxRects and Guillotine.
    BestAreaFit,
    /// The Tetris placement. Valid with MaxRects, Skyline and Guillotine.
    BottomLeft,
    /// Chooses the placement where the rectangle touches other rectangles
    /// and the bin walls as much as possible. Valid with MaxRects and
    /// Guillotine.
    ContactPoint,
    /// Opposite of BestAreaFit. Contrary to its name, not always worse for
    /// specific inputs. Valid with Guillotine.
    WorstAreaFit,
    /// Opposite of BestShortSideFit. Valid with Guillotine.
    WorstShortSideFit,
    /// Opposite of BestLongSideFit. Valid with Guillotine.
    WorstLongSideFit,
    /// Uses a waste map to track abandoned space and choose the placement
    /// wasting the least area. Valid with Skyline.
    MinWaste,
}

impl FromStr for BinFit {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bssf" | "bestshortsidefit" => Ok(Self::BestShortSideFit),
            "blsf" | "bestlongsidefit" => Ok(Self::BestLongSideFit),
            "baf" | "bestareafit" => Ok(Self::BestAreaFit),
            "bl" | "bottomleft" => Ok(Self::BottomLeft),
            "cp" | "contactpoint" => Ok(Self::ContactPoint),
            "waf" | "worstareafit" => Ok(Self::WorstAreaFit),
            "wssf" | "worstshortsidefit" => Ok(Self::WorstShortSideFit),
            "wlsf" | "worstlongsidefit" => Ok(Self::WorstLongSideFit),
            "mw" | "minwaste" => Ok(Self::MinWaste),
            _ => Err(()),
        }
    }
}

impl fmt::Display for BinFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BestShortSideFit => "BSSF",
            Self::BestLongSideFit => "BLSF",
            Self::BestAreaFit => "BAF",
            Self::BottomLeft => "BL",
            Self::ContactPoint => "CP",
            Self::WorstAreaFit => "WAF",
            Self::WorstShortSideFit => "WSSF",
            Self::WorstLongSideFit => "WLSF",
            Self::MinWaste => "MW",
        })
    }
}

/// Split methods, governing how the Guillotine algorithm cuts the L-shaped
/// leftover of a placement into two rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMethod {
    ShorterLeftoverAxis,
    LongerLeftoverAxis,
    /// Tries to keep a single big rectangle at the expense of making the
    /// other small.
    MinimizeArea,
    /// Tries to make both remaining rectangles as even-sized as possible.
    MaximizeArea,
    ShorterAxis,
    LongerAxis,
}

impl FromStr for SplitMethod {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slas" | "shorterleftoveraxis" => Ok(Self::ShorterLeftoverAxis),
            "llas" | "longerleftoveraxis" => Ok(Self::LongerLeftoverAxis),
            "minas" | "minimizearea" => Ok(Self::MinimizeArea),
            "maxas" | "maximizearea" => Ok(Self::MaximizeArea),
            "sas" | "shorteraxis" => Ok(Self::ShorterAxis),
            "las" | "longeraxis" => Ok(Self::LongerAxis),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SplitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ShorterLeftoverAxis => "SLAS",
            Self::LongerLeftoverAxis => "LLAS",
            Self::MinimizeArea => "MINAS",
            Self::MaximizeArea => "MAXAS",
            Self::ShorterAxis => "SAS",
            Self::LongerAxis => "LAS",
        })
    }
}

/// Bit-packed selector for algorithm, bin-selection and split method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Heuristic(u16);

impl Heuristic {
    const ALGORITHM_MASK: u16 = 0x000F;
    const BIN_FIT_MASK: u16 = 0x00F0;
    const SPLIT_MASK: u16 = 0x0F00;

    pub const MAX_RECTS: Heuristic = Heuristic(0x0000);
    pub const SKYLINE: Heuristic = Heuristic(0x0001);
    pub const GUILLOTINE: Heuristic = Heuristic(0x0002);

    pub const BEST_SHORT_SIDE_FIT: Heuristic = Heuristic(0x0000);
    pub const BEST_LONG_SIDE_FIT: Heuristic = Heuristic(0x0010);
    pub const BEST_AREA_FIT: Heuristic = Heuristic(0x0020);
    pub const BOTTOM_LEFT: Heuristic = Heuristic(0x0030);
    pub const CONTACT_POINT: Heuristic = Heuristic(0x0040);
    pub const WORST_AREA_FIT: Heuristic = Heuristic(0x0050);
    pub const WORST_SHORT_SIDE_FIT: Heuristic = Heuristic(0x0060);
    pub const WORST_LONG_SIDE_FIT: Heuristic = Heuristic(0x0070);
    pub const MIN_WASTE: Heuristic = Heuristic(0x0080);

    pub const SPLIT_SHORTER_LEFTOVER_AXIS: Heuristic = Heuristic(0x0000);
    pub const SPLIT_LONGER_LEFTOVER_AXIS: Heuristic = Heuristic(0x0100);
    pub const SPLIT_MINIMIZE_AREA: Heuristic = Heuristic(0x0200);
    pub const SPLIT_MAXIMIZE_AREA: Heuristic = Heuristic(0x0300);
    pub const SPLIT_SHORTER_AXIS: Heuristic = Heuristic(0x0400);
    pub const SPLIT_LONGER_AXIS: Heuristic = Heuristic(0x0500);

    // Presets covering the valid combinations.
    pub const MAX_RECTS_BSSF: Heuristic =
        Heuristic(Self::MAX_RECTS.0 | Self::BEST_SHORT_SIDE_FIT.0);
    pub const MAX_RECTS_BLSF: Heuristic = Heuristic(Self::MAX_RECTS.0 | Self::BEST_LONG_SIDE_FIT.0);
    pub const MAX_RECTS_BAF: Heuristic = Heuristic(Self::MAX_RECTS.0 | Self::BEST_AREA_FIT.0);
    pub const MAX_RECTS_BL: Heuristic = Heuristic(Self::MAX_RECTS.0 | Self::BOTTOM_LEFT.0);
    pub const MAX_RECTS_CP: Heuristic = Heuristic(Self::MAX_RECTS.0 | Self::CONTACT_POINT.0);

    pub const SKYLINE_BL: Heuristic = Heuristic(Self::SKYLINE.0 | Self::BOTTOM_LEFT.0);
    pub const SKYLINE_MIN_WASTE: Heuristic = Heuristic(Self::SKYLINE.0 | Self::MIN_WASTE.0);

    pub const GUILLOTINE_BSSF: Heuristic =
        Heuristic(Self::GUILLOTINE.0 | Self::BEST_SHORT_SIDE_FIT.0);
    pub const GUILLOTINE_BLSF: Heuristic =
        Heuristic(Self::GUILLOTINE.0 | Self::BEST_LONG_SIDE_FIT.0);
    pub const GUILLOTINE_BAF: Heuristic = Heuristic(Self::GUILLOTINE.0 | Self::BEST_AREA_FIT.0);
    pub const GUILLOTINE_WAF: Heuristic = Heuristic(Self::GUILLOTINE.0 | Self::WORST_AREA_FIT.0);
    pub const GUILLOTINE_WSSF: Heuristic =
        Heuristic(Self::GUILLOTINE.0 | Self::WORST_SHORT_SIDE_FIT.0);
    pub const GUILLOTINE_WLSF: Heuristic =
        Heuristic(Self::GUILLOTINE.0 | Self::WORST_LONG_SIDE_FIT.0);

    /// The algorithm portion of the selector, or `None` when the low nibble
    /// does not name a known algorithm.
    pub fn algorithm(self) -> Option<Algorithm> {
        match self.0 & Self::ALGORITHM_MASK {
            0x0 => Some(Algorithm::MaxRects),
            0x1 => Some(Algorithm::Skyline),
            0x2 => Some(Algorithm::Guillotine),
            _ => None,
        }
    }

    /// The bin-selection portion of the selector, or `None` for an unknown
    /// value.
    pub fn bin_fit(self) -> Option<BinFit> {
        match self.0 & Self::BIN_FIT_MASK {
            0x00 => Some(BinFit::BestShortSideFit),
            0x10 => Some(BinFit::BestLongSideFit),
            0x20 => Some(BinFit::BestAreaFit),
            0x30 => Some(BinFit::BottomLeft),
            0x40 => Some(BinFit::ContactPoint),
            0x50 => Some(BinFit::WorstAreaFit),
            0x60 => Some(BinFit::WorstShortSideFit),
            0x70 => Some(BinFit::WorstLongSideFit),
            0x80 => Some(BinFit::MinWaste),
            _ => None,
        }
    }

    /// The split-method portion of the selector, or `None` for an unknown
    /// value.
    pub fn split_method(self) -> Option<SplitMethod> {
        match self.0 & Self::SPLIT_MASK {
            0x000 => Some(SplitMethod::ShorterLeftoverAxis),
            0x100 => Some(SplitMethod::LongerLeftoverAxis),
            0x200 => Some(SplitMethod::MinimizeArea),
            0x300 => Some(SplitMethod::MaximizeArea),
            0x400 => Some(SplitMethod::ShorterAxis),
            0x500 => Some(SplitMethod::LongerAxis),
            _ => None,
        }
    }

    /// Tests whether the combination of heuristics is in good form.
    ///
    /// Note that an invalid bin-selection or split method does not prevent
    /// packing; the algorithm silently reverts to its default for that
    /// setting. An invalid algorithm aborts packer construction.
    pub fn validate(self) -> Result<()> {
        let algorithm = self.algorithm().ok_or(RectPackError::InvalidAlgorithm)?;
        let split_bits = self.0 & Self::SPLIT_MASK;

        match algorithm {
            Algorithm::MaxRects => {
                if split_bits != 0 {
                    return Err(RectPackError::InvalidSplitMethod { algorithm });
                }
                match self.bin_fit() {
                    Some(
                        BinFit::BestShortSideFit
                        | BinFit::BestLongSideFit
                        | BinFit::BestAreaFit
                        | BinFit::BottomLeft
                        | BinFit::ContactPoint,
                    ) => Ok(()),
                    _ => Err(RectPackError::InvalidBinFit { algorithm }),
                }
            }
            Algorithm::Skyline => {
                if split_bits != 0 {
                    return Err(RectPackError::InvalidSplitMethod { algorithm });
                }
                match self.bin_fit() {
                    Some(BinFit::BottomLeft | BinFit::MinWaste) => Ok(()),
                    _ => Err(RectPackError::InvalidBinFit { algorithm }),
                }
            }
            Algorithm::Guillotine => {
                if self.split_method().is_none() {
                    return Err(RectPackError::InvalidSplitMethod { algorithm });
                }
                match self.bin_fit() {
                    Some(
                        BinFit::BestShortSideFit
                        | BinFit::BestLongSideFit
                        | BinFit::BestAreaFit
                        | BinFit::WorstAreaFit
                        | BinFit::WorstShortSideFit
                        | BinFit::WorstLongSideFit
                        | BinFit::BottomLeft
                        | BinFit::ContactPoint,
                    ) => Ok(()),
                    _ => Err(RectPackError::InvalidBinFit { algorithm }),
                }
            }
        }
    }
}

impl BitOr for Heuristic {
    type Output = Heuristic;
    fn bitor(self, rhs: Heuristic) -> Heuristic {
        Heuristic(self.0 | rhs.0)
    }
}

impl From<Algorithm> for Heuristic {
    fn from(algorithm: Algorithm) -> Heuristic {
        match algorithm {
            Algorithm::MaxRects => Heuristic::MAX_RECTS,
            Algorithm::Skyline => Heuristic::SKYLINE,
            Algorithm::Guillotine => Heuristic::GUILLOTINE,
        }
    }
}

impl From<BinFit> for Heuristic {
    fn from(fit: BinFit) -> Heuristic {
        match fit {
            BinFit::BestShortSideFit => Heuristic::BEST_SHORT_SIDE_FIT,
            BinFit::BestLongSideFit => Heuristic::BEST_LONG_SIDE_FIT,
            BinFit::BestAreaFit => Heuristic::BEST_AREA_FIT,
            BinFit::BottomLeft => Heuristic::BOTTOM_LEFT,
            BinFit::ContactPoint => Heuristic::CONTACT_POINT,
            BinFit::WorstAreaFit => Heuristic::WORST_AREA_FIT,
            BinFit::WorstShortSideFit => Heuristic::WORST_SHORT_SIDE_FIT,
            BinFit::WorstLongSideFit => Heuristic::WORST_LONG_SIDE_FIT,
            BinFit::MinWaste => Heuristic::MIN_WASTE,
        }
    }
}

impl From<SplitMethod> for Heuristic {
    fn from(split: SplitMethod) -> Heuristic {
        match split {
            SplitMethod::ShorterLeftoverAxis => Heuristic::SPLIT_SHORTER_LEFTOVER_AXIS,
            SplitMethod::LongerLeftoverAxis => Heuristic::SPLIT_LONGER_LEFTOVER_AXIS,
            SplitMethod::MinimizeArea => Heuristic::SPLIT_MINIMIZE_AREA,
            SplitMethod::MaximizeArea => Heuristic::SPLIT_MAXIMIZE_AREA,
            SplitMethod::ShorterAxis => Heuristic::SPLIT_SHORTER_AXIS,
            SplitMethod::LongerAxis => Heuristic::SPLIT_LONGER_AXIS,
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.algorithm() {
            Some(algorithm) => write!(f, "{algorithm}")?,
            None => f.write_str("Unknown")?,
        }
        if let Some(fit) = self.bin_fit() {
            write!(f, "-{fit}")?;
        }
        if self.algorithm() == Some(Algorithm::Guillotine) {
            if let Some(split) = self.split_method() {
                write!(f, "-{split}")?;
            }
        }
        Ok(())
    }
}

/// Parses names like `maxrects-bssf`, `skyline-mw` or `guillotine-baf-slas`.
impl FromStr for Heuristic {
    type Err = ();
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '-');
        let algorithm: Algorithm = parts.next().ok_or(())?.parse()?;
        let mut heuristic = Heuristic::from(algorithm);
        if let Some(fit) = parts.next() {
            heuristic = heuristic | Heuristic::from(fit.parse::<BinFit>()?);
        }
        if let Some(split) = parts.next() {
            heuristic = heuristic | Heuristic::from(split.parse::<SplitMethod>()?);
        }
        Ok(heuristic)
    }
}
