//! Points, dimensions and bounds
//!
//! Coordinates are signed so geometry math may step transiently outside a
//! bitmap; anything reaching a cursor must already be in bounds.

use std::ops::{Add, Sub};

/// Signed pixel coordinate type.
pub type Coord = i16;

/// Unsigned pixel size type.
pub type Size = u16;

/// 2D point (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    pub const fn origin() -> Self {
        Self { x: 0, y: 0 }
    }

    pub fn offset(&self, dx: Coord, dy: Coord) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn shift_x(&mut self, dx: Coord) {
        self.x += dx;
    }

    pub fn shift_y(&mut self, dy: Coord) {
        self.y += dy;
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// 2D size (width, height)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dim {
    pub width: Size,
    pub height: Size,
}

impl Dim {
    pub const fn new(width: Size, height: Size) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u32 {
        u32::from(self.width) * u32::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Bounding box given by its top-left and bottom-right corners.
///
/// Width, height and center are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bounds {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Bounds {
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Bounds covering `dim` pixels starting at `corner`.
    pub fn from_corner(corner: Point, dim: Dim) -> Self {
        Self {
            top_left: corner,
            bottom_right: Point::new(
                corner.x + dim.width as Coord,
                corner.y + dim.height as Coord,
            ),
        }
    }

    pub fn dim(&self) -> Dim {
        Dim::new(
            (self.bottom_right.x - self.top_left.x) as Size,
            (self.bottom_right.y - self.top_left.y) as Size,
        )
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.bottom_right.x + self.top_left.x) / 2,
            (self.bottom_right.y + self.top_left.y) / 2,
        )
    }

    /// Bottom-right is exclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.top_left.x
            && p.y >= self.top_left.y
            && p.x < self.bottom_right.x
            && p.y < self.bottom_right.y
    }
}
