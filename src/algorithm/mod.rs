//! Algorithm implementations behind the [`Packer`](crate::Packer)
//! orchestrator.
//!
//! Each implementation owns its free-space bookkeeping and the list of
//! packed rectangles; the shared pieces (maximum extents, packed list, used
//! area, flip flag, padding) live in [`AlgorithmBase`], held by composition.

pub mod guillotine;
pub mod maxrects;
pub mod skyline;

pub use guillotine::GuillotinePacker;
pub use maxrects::MaxRectsPacker;
pub use skyline::SkylinePacker;

use crate::geom::{Rect, Size};

/// Capability set shared by the packing algorithms.
pub trait PackAlgorithm {
    /// Shared algorithm state.
    fn base(&self) -> &AlgorithmBase;
    fn base_mut(&mut self) -> &mut AlgorithmBase;

    /// Returns the packer to its initial configured state with the specified
    /// maximum extents.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is less than 1.
    fn reset(&mut self, width: i32, height: i32);

    /// Pushes new rectangles into the packer, finding the best placement for
    /// them based on its configuration and current state.
    ///
    /// Returns the sizes that could not be packed.
    fn insert(&mut self, sizes: Vec<Size>) -> Vec<Size>;

    /// The rectangles that have been packed.
    fn rects(&self) -> &[Rect] {
        &self.base().packed
    }

    /// Ratio of used surface area to the maximum possible area, in the range
    /// of 0.0 (empty) to 1.0 (perfectly packed with no waste).
    fn used(&self) -> f64 {
        self.base().used()
    }

    /// Total area that is occupied, including any configured padding.
    fn used_area(&self) -> i64 {
        self.base().used_area
    }

    /// Maximum extents the algorithm can pack into.
    fn max_size(&self) -> Size {
        Size::new(self.base().max_width, self.base().max_height)
    }

    /// Whether rectangles may be flipped to provide better placement.
    fn allow_flip(&mut self, enabled: bool) {
        self.base_mut().allow_flip = enabled;
    }

    /// Amount of empty space to place around rectangles.
    fn set_padding(&mut self, padding: i32) {
        self.base_mut().padding = padding;
    }
}

/// State common to all algorithm implementations.
#[derive(Debug, Default)]
pub struct AlgorithmBase {
    pub packed: Vec<Rect>,
    pub max_width: i32,
    pub max_height: i32,
    pub used_area: i64,
    pub allow_flip: bool,
    pub padding: i32,
}

impl AlgorithmBase {
    pub(crate) fn reset(&mut self, width: i32, height: i32) {
        assert!(
            width > 0 && height > 0,
            "width and height must be greater than 0"
        );
        self.max_width = width;
        self.max_height = height;
        self.used_area = 0;
        self.packed.clear();
    }

    pub(crate) fn used(&self) -> f64 {
        self.used_area as f64 / (self.max_width as f64 * self.max_height as f64)
    }
}

/// Grows a size by the configured padding ahead of placement scoring.
pub(crate) fn pad_size(size: &mut Size, padding: i32) {
    if padding <= 0 {
        return;
    }
    size.width += padding;
    size.height += padding;
}

/// Shrinks a placed rectangle back to the caller-facing size, centering it
/// within the reserved slot so neighbouring rectangles end up `padding`
/// apart.
pub(crate) fn unpad_rect(rect: &mut Rect, padding: i32) {
    if padding <= 0 {
        return;
    }
    rect.point.x += padding / 2;
    rect.point.y += padding / 2;
    rect.size.width -= padding;
    rect.size.height -= padding;
}
