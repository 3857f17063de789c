use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in 2D space. The origin is the top-left corner of the bin,
/// with the y-axis growing downward.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Location on the horizontal x-axis.
    pub x: i32,
    /// Location on the vertical y-axis.
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Moves the point by the specified relative amount.
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.x, self.y)
    }
}

/// Dimensions of an entity in 2D space, plus a caller-supplied identifier.
///
/// The identifier is opaque to the engine: it is carried through placement
/// untouched and takes no part in equality or serialization.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct Size {
    /// Dimension on the horizontal x-axis.
    pub width: i32,
    /// Dimension on the vertical y-axis.
    pub height: i32,
    /// User-defined identifier used to correlate packed rectangles with
    /// their inputs.
    #[serde(skip)]
    pub id: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            id: 0,
        }
    }

    pub fn with_id(id: i32, width: i32, height: i32) -> Self {
        Self { width, height, id }
    }

    /// Total area (width times height).
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// Sum length of all four sides.
    pub fn perimeter(&self) -> i64 {
        2 * (self.width as i64 + self.height as i64)
    }

    /// Value of the greater side.
    pub fn max_side(&self) -> i32 {
        self.width.max(self.height)
    }

    /// Value of the lesser side.
    pub fn min_side(&self) -> i32 {
        self.width.min(self.height)
    }

    /// Ratio of width to height.
    pub fn ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// The same size with width and height swapped. The identifier is kept.
    pub fn flipped(&self) -> Size {
        Size {
            width: self.height,
            height: self.width,
            id: self.id,
        }
    }
}

impl PartialEq for Size {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl Eq for Size {}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.width, self.height)
    }
}

/// A placed rectangle: location, dimensions, and whether the dimensions were
/// swapped to achieve the placement.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Location of the top-left corner.
    #[serde(flatten)]
    pub point: Point,
    /// Dimensions of the rectangle.
    #[serde(flatten)]
    pub size: Size,
    /// True when the original size's width and height were swapped prior to
    /// placement. Only set when the packer has flipping enabled.
    #[serde(default)]
    pub flipped: bool,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            point: Point::new(x, y),
            size: Size::new(width, height),
            flipped: false,
        }
    }

    /// The caller-supplied identifier of the packed size.
    pub fn id(&self) -> i32 {
        self.size.id
    }

    /// Coordinate of the left edge on the x-axis.
    pub fn left(&self) -> i32 {
        self.point.x
    }

    /// Coordinate of the top edge on the y-axis.
    pub fn top(&self) -> i32 {
        self.point.y
    }

    /// Coordinate of the right edge on the x-axis (exclusive).
    pub fn right(&self) -> i32 {
        self.point.x + self.size.width
    }

    /// Coordinate of the bottom edge on the y-axis (exclusive).
    pub fn bottom(&self) -> i32 {
        self.point.y + self.size.height
    }

    /// Total area (width times height).
    pub fn area(&self) -> i64 {
        self.size.area()
    }

    /// True when the width or height is less than 1.
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0 || self.size.height <= 0
    }

    /// Tests whether the specified coordinates lie within the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.point.x <= x && x < self.right() && self.point.y <= y && y < self.bottom()
    }

    /// Tests whether `rect` lies entirely within this rectangle.
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        self.point.x <= rect.point.x
            && rect.right() <= self.right()
            && self.point.y <= rect.point.y
            && rect.bottom() <= self.bottom()
    }

    /// Tests whether this rectangle has any overlap with `rect`.
    pub fn intersects(&self, rect: &Rect) -> bool {
        rect.point.x < self.right()
            && self.point.x < rect.right()
            && rect.point.y < self.bottom()
            && self.point.y < rect.bottom()
    }

    /// The overlapping area of this rectangle and `rect`, or an empty
    /// rectangle when no overlap is present.
    pub fn intersect(&self, rect: &Rect) -> Rect {
        let x1 = self.point.x.max(rect.point.x);
        let x2 = self.right().min(rect.right());
        let y1 = self.point.y.max(rect.point.y);
        let y2 = self.bottom().min(rect.bottom());

        if x2 >= x1 && y2 >= y1 {
            Rect::new(x1, y1, x2 - x1, y2 - y1)
        } else {
            Rect::default()
        }
    }

    /// The minimum rectangle containing both this rectangle and `rect`.
    pub fn union(&self, rect: &Rect) -> Rect {
        let x1 = self.point.x.min(rect.point.x);
        let x2 = self.right().max(rect.right());
        let y1 = self.point.y.min(rect.point.y);
        let y2 = self.bottom().max(rect.bottom());
        Rect::new(x1, y1, x2 - x1, y2 - y1)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}, {}, {}, {}>",
            self.point.x, self.point.y, self.size.width, self.size.height
        )
    }
}
