//! 2D rectangle packing into a single bounded bin.
//!
//! - Algorithms: MaxRects (BSSF/BLSF/BAF/BL/CP), Skyline (BL/MW with waste
//!   map), Guillotine (six choice scores, six split methods, optional merge)
//! - Online packing places rectangles as they arrive; offline packing stages
//!   them, sorts, and commits in one batch with [`Packer::pack`].
//! - Coordinates are integers with the origin at the top-left. Caller
//!   identifiers survive packing untouched and are excluded from
//!   serialization.
//!
//! Quick example:
//! ```
//! use rectpack::{Heuristic, Packer, Size};
//!
//! let mut packer = Packer::new(256, 256, Heuristic::MAX_RECTS_BSSF);
//! packer.insert([Size::with_id(0, 64, 32), Size::with_id(1, 48, 48)]);
//! assert!(packer.pack());
//! for rect in packer.rects() {
//!     println!("{}: {}", rect.id(), rect);
//! }
//! ```

pub mod algorithm;
pub mod error;
pub mod geom;
pub mod heuristic;
pub mod packer;
pub mod sort;

pub use error::{RectPackError, Result};
pub use geom::{Point, Rect, Size};
pub use heuristic::{Algorithm, BinFit, Heuristic, SplitMethod};
pub use packer::{Packer, DEFAULT_SIZE};
pub use sort::SortFn;

/// Convenience prelude bringing the primary APIs into scope.
pub mod prelude {
    pub use crate::algorithm::{GuillotinePacker, MaxRectsPacker, PackAlgorithm, SkylinePacker};
    pub use crate::geom::{Point, Rect, Size};
    pub use crate::heuristic::{Algorithm, BinFit, Heuristic, SplitMethod};
    pub use crate::packer::{Packer, DEFAULT_SIZE};
    pub use crate::sort;
}
