//! # Strokekit Geom
//!
//! Geometry primitives for the Strokekit shape engine.
//!
//! ## Design Goals
//!
//! 1. **Points**: User-space coordinates in double precision
//! 2. **Rects**: Axis-aligned boxes for path bounds
//! 3. **No rendering**: Pure value types, no rasterization or transforms

use std::ops::{Add, Sub};

/// A point in user-space coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reflect this point through `pivot`, i.e. `2 * pivot - self`.
    ///
    /// Smooth curve commands use this to synthesize their first control
    /// point from the previous curve's control point and the pen position.
    pub fn reflected_through(self, pivot: Point) -> Point {
        Point {
            x: 2.0 * pivot.x - self.x,
            y: 2.0 * pivot.y - self.y,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The smallest rect containing both points.
    pub fn from_points(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self {
            x,
            y,
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    /// The smallest rect containing both `self` and `other`.
    pub fn union(self, other: Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect {
            x,
            y,
            width: right - x,
            height: bottom - y,
        }
    }
}
