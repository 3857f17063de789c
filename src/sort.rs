//! Pre-sort comparators over [`Size`].
//!
//! All comparators order in *descending* fashion (greatest first): packing
//! big rectangles first is empirically more efficient. The packer's reverse
//! flag flips the sense.

use crate::geom::Size;
use std::cmp::Ordering;

/// Comparison function used to pre-sort sizes before packing.
pub type SortFn = fn(&Size, &Size) -> Ordering;

/// Sorts in descending order by total area.
pub fn by_area(a: &Size, b: &Size) -> Ordering {
    b.area().cmp(&a.area())
}

/// Sorts in descending order by perimeter.
pub fn by_perimeter(a: &Size, b: &Size) -> Ordering {
    b.perimeter().cmp(&a.perimeter())
}

/// Sorts in descending order by the difference between width and height.
pub fn by_side_diff(a: &Size, b: &Size) -> Ordering {
    (b.width - b.height).abs().cmp(&(a.width - a.height).abs())
}

/// Sorts in descending order by the shortest side.
pub fn by_min_side(a: &Size, b: &Size) -> Ordering {
    b.min_side().cmp(&a.min_side())
}

/// Sorts in descending order by the longest side.
pub fn by_max_side(a: &Size, b: &Size) -> Ordering {
    b.max_side().cmp(&a.max_side())
}

/// Sorts in descending order by the width-to-height ratio.
pub fn by_ratio(a: &Size, b: &Size) -> Ordering {
    b.ratio().total_cmp(&a.ratio())
}
