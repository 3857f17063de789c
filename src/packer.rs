use crate::algorithm::{GuillotinePacker, MaxRectsPacker, PackAlgorithm, SkylinePacker};
use crate::error::{RectPackError, Result};
use crate::geom::{Rect, Size};
use crate::heuristic::{Algorithm, Heuristic};
use crate::sort::{self, SortFn};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Default width/height used as the maximum extent for packing rectangles.
///
/// The value is based off the maximum texture size of many modern GPUs. If
/// this library is not being used for creating a texture atlas, there is no
/// significance to this number other than providing a sane starting point.
pub const DEFAULT_SIZE: i32 = 4096;

/// The state of a 2D rectangle packer.
///
/// A packer is configured with maximum extents and a [`Heuristic`] selecting
/// the algorithm and its scoring. Rectangles enter through
/// [`insert`](Packer::insert); in online mode each insertion is placed
/// immediately, in offline mode (the default) insertions are staged until
/// [`pack`](Packer::pack) sorts and commits them in one batch.
pub struct Packer {
    /// Algorithm implementation performing the actual computation.
    algo: Box<dyn PackAlgorithm>,
    /// Sizes that have not yet been packed or were unable to be packed.
    unpacked: Vec<Size>,
    /// Comparer used for pre-sorting sizes when packing.
    sort_func: Option<SortFn>,
    sort_rev: bool,
    /// Extents given at construction, restored by [`clear`](Packer::clear).
    max_extents: Size,
    /// Amount of empty space to place around rectangles. Values of 0 or less
    /// pack rectangles tightly.
    ///
    /// Default: 0
    pub padding: i32,
    /// Whether rectangles are packed as they are inserted (online), or
    /// collected until [`pack`](Packer::pack) is called.
    ///
    /// There is a trade-off: online packing is faster for each call since
    /// nothing is sorted or compared against the rest of the batch, but
    /// offline packing lets the algorithm reach its potential by knowing all
    /// sizes ahead of time. Unless results are consumed in real-time, the
    /// offline default is recommended.
    ///
    /// Default: false
    pub online: bool,
}

impl Packer {
    /// Initializes a new packer using the specified maximum extents and
    /// heuristics for packing rectangles.
    ///
    /// # Panics
    ///
    /// Panics when the heuristic does not specify a valid algorithm, or when
    /// `max_width` or `max_height` is less than 1.
    pub fn new(max_width: i32, max_height: i32, heuristic: Heuristic) -> Self {
        match Self::try_new(max_width, max_height, heuristic) {
            Ok(packer) => packer,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible form of [`Packer::new`].
    pub fn try_new(max_width: i32, max_height: i32, heuristic: Heuristic) -> Result<Self> {
        let algo: Box<dyn PackAlgorithm> = match heuristic.algorithm() {
            Some(Algorithm::MaxRects) => {
                Box::new(MaxRectsPacker::new(max_width, max_height, heuristic))
            }
            Some(Algorithm::Skyline) => {
                Box::new(SkylinePacker::new(max_width, max_height, heuristic))
            }
            Some(Algorithm::Guillotine) => {
                Box::new(GuillotinePacker::new(max_width, max_height, heuristic))
            }
            None => return Err(RectPackError::InvalidAlgorithm),
        };

        Ok(Self {
            algo,
            unpacked: Vec::new(),
            sort_func: Some(sort::by_area),
            sort_rev: false,
            max_extents: Size::new(max_width, max_height),
            padding: 0,
            online: false,
        })
    }

    /// Adds rectangles to the packer.
    ///
    /// When online mode is enabled, the rectangles are immediately packed
    /// and the return value contains any sizes that could not be placed due
    /// to size limitations.
    ///
    /// When online mode is disabled, the rectangles are staged to be packed
    /// with the next call to [`pack`](Packer::pack) and the return value is
    /// a snapshot of all currently staged sizes.
    pub fn insert(&mut self, sizes: impl IntoIterator<Item = Size>) -> Vec<Size> {
        if self.online {
            self.algo.set_padding(self.padding);
            return self.algo.insert(sizes.into_iter().collect());
        }

        self.unpacked.extend(sizes);
        self.unpacked.clone()
    }

    /// Convenience form of [`insert`](Packer::insert) for a single
    /// rectangle. Returns false only when online mode is active and the
    /// rectangle failed to place.
    pub fn insert_size(&mut self, id: i32, width: i32, height: i32) -> bool {
        let result = self.insert([Size::with_id(id, width, height)]);
        !(self.online && !result.is_empty())
    }

    /// Sorts and packs all rectangles that are currently staged.
    ///
    /// The return value indicates whether all staged rectangles were
    /// successfully packed. When false, [`unpacked`](Packer::unpacked)
    /// retrieves the sizes that failed.
    #[instrument(skip_all)]
    pub fn pack(&mut self) -> bool {
        if self.unpacked.is_empty() {
            return true;
        }

        if let Some(compare) = self.sort_func {
            if self.sort_rev {
                self.unpacked.sort_by(move |a, b| compare(b, a));
            } else {
                self.unpacked.sort_by(compare);
            }
        } else if self.sort_rev {
            self.unpacked.reverse();
        }

        self.algo.set_padding(self.padding);
        let staged = std::mem::take(&mut self.unpacked);
        let failed = self.algo.insert(staged);
        if failed.is_empty() {
            return true;
        }

        debug!(unpacked = failed.len(), "bin capacity exhausted");
        self.unpacked = failed;
        false
    }

    /// Clears the packed rectangles and repacks them all in one operation.
    ///
    /// This can optimize the packing when it was previously performed across
    /// multiple pack operations, or reflect packer settings that have been
    /// modified since. The algorithm is restarted at the current bounding
    /// [`size`](Packer::size); if that tighter bin rejects the reordering,
    /// the repack falls back to the configured maximum extents so that it
    /// never ends with fewer rectangles packed than before.
    #[instrument(skip_all)]
    pub fn repack_all(&mut self) -> bool {
        self.unpacked
            .extend(self.algo.rects().iter().map(|rect| rect.size));
        if self.unpacked.is_empty() {
            return true;
        }

        let size = self.size();
        if size.width > 0 && size.height > 0 {
            self.algo.reset(size.width, size.height);
            if self.pack() {
                return true;
            }
            self.unpacked
                .extend(self.algo.rects().iter().map(|rect| rect.size));
        }

        self.algo.reset(self.max_extents.width, self.max_extents.height);
        self.pack()
    }

    /// Resets the internal state of the packer without changing its
    /// configuration. All currently packed and pending rectangles are
    /// removed, and the algorithm returns to the extents given at
    /// construction.
    pub fn clear(&mut self) {
        self.algo.reset(self.max_extents.width, self.max_extents.height);
        self.unpacked.clear();
    }

    /// The minimum size required to contain all packed rectangles, with
    /// padding applied to the right/bottom edge.
    pub fn size(&self) -> Size {
        let mut size = Size::default();
        for rect in self.algo.rects() {
            size.width = size.width.max(rect.right() + self.padding);
            size.height = size.height.max(rect.bottom() + self.padding);
        }
        size
    }

    /// Ratio of used surface area to the available area, in the range of
    /// 0.0 to 1.0.
    ///
    /// When `current` is true, the ratio is relative to the current
    /// [`size`](Packer::size) required by the packer, otherwise it is
    /// relative to the maximum possible area.
    pub fn used(&self, current: bool) -> f64 {
        if current {
            let size = self.size();
            if size.area() == 0 {
                return 0.0;
            }
            return self.algo.used_area() as f64 / size.area() as f64;
        }
        self.algo.used()
    }

    /// The rectangles that are currently packed.
    ///
    /// The backing memory is owned by the packer; the view is invalidated by
    /// any mutating call.
    pub fn rects(&self) -> &[Rect] {
        self.algo.rects()
    }

    /// The sizes that are currently staged to be packed, or that failed the
    /// last [`pack`](Packer::pack).
    pub fn unpacked(&self) -> &[Size] {
        &self.unpacked
    }

    /// Builds a map from caller-supplied identifier to packed rectangle.
    pub fn map(&self) -> HashMap<i32, Rect> {
        let rects = self.algo.rects();
        let mut mapping = HashMap::with_capacity(rects.len());
        for rect in rects {
            mapping.insert(rect.id(), *rect);
        }
        mapping
    }

    /// Whether rectangles can be flipped 90° to provide better placement.
    ///
    /// Default: false
    pub fn allow_flip(&mut self, enabled: bool) {
        self.algo.allow_flip(enabled);
    }

    /// Sets the comparer function used for pre-sorting sizes before packing.
    /// Depending on the algorithm and input data, this can significantly
    /// improve efficiency. With `reverse` set, the comparator's sense is
    /// flipped; with no comparator at all, `reverse` plainly reverses the
    /// staged order.
    ///
    /// Default: [`sort::by_area`]
    pub fn sorter(&mut self, compare: Option<SortFn>, reverse: bool) {
        self.sort_func = compare;
        self.sort_rev = reverse;
    }
}

impl Default for Packer {
    /// A packer with sensible defaults for general-purpose rectangle
    /// packing: [`DEFAULT_SIZE`] extents and MaxRects best-short-side-fit.
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_SIZE, Heuristic::MAX_RECTS_BSSF)
    }
}
