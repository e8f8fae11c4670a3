//! Logical-space geometry.

use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct Rectangle {
    pub loc: Point,
    pub size: Size,
}

impl Point {
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Size {
    fn from((w, h): (f64, f64)) -> Self {
        Self { w, h }
    }
}

impl Rectangle {
    pub fn new(loc: Point, size: Size) -> Self {
        Self { loc, size }
    }

    /// Rectangle of the given size at the origin.
    pub fn from_size(size: Size) -> Self {
        Self {
            loc: Point::default(),
            size,
        }
    }
}
