//! 2D vector and axis-aligned bounds used by the simulation.

use crate::float::Float;
use core::ops::{Add, Neg, Sub};

/// 2D vector for planar physics. Screen convention: +y points down.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2<F: Float> {
    pub x: F,
    pub y: F,
}

impl<F: Float> Vec2<F> {
    /// Create a new 2D vector.
    pub fn new(x: F, y: F) -> Self { Vec2 { x, y } }

    /// Zero vector.
    pub fn zero() -> Self { Vec2 { x: F::zero(), y: F::zero() } }

    /// Dot product.
    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y
    }

    /// Squared length (avoids sqrt).
    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    /// Length (magnitude).
    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Scale both components by a scalar.
    pub fn scale(self, s: F) -> Self {
        Vec2 { x: self.x * s, y: self.y * s }
    }

    /// Distance between two points.
    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    /// Squared distance between two points.
    pub fn distance_sq(self, other: Self) -> F {
        (self - other).length_sq()
    }

    /// Point halfway between self and other.
    pub fn midpoint(self, other: Self) -> Self {
        (self + other).scale(F::half())
    }

    /// Linear interpolation between self and other.
    pub fn lerp(self, other: Self, t: F) -> Self {
        self + (other - self).scale(t)
    }

    pub fn is_finite(self) -> bool {
        // NaN compares unequal to itself; infinities survive subtraction as NaN.
        let dx = self.x - self.x;
        let dy = self.y - self.y;
        dx == F::zero() && dy == F::zero()
    }
}

impl<F: Float> Add for Vec2<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self { Vec2 { x: self.x + rhs.x, y: self.y + rhs.y } }
}

impl<F: Float> Sub for Vec2<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self { Vec2 { x: self.x - rhs.x, y: self.y - rhs.y } }
}

impl<F: Float> Neg for Vec2<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec2 { x: -self.x, y: -self.y } }
}

/// Axis-aligned rectangle that nodes bounce inside of.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds<F: Float> {
    pub min: Vec2<F>,
    pub max: Vec2<F>,
}

impl<F: Float> Bounds<F> {
    pub fn new(min: Vec2<F>, max: Vec2<F>) -> Self {
        Bounds { min, max }
    }

    /// Bounds spanning `(0, 0)` to `(width, height)`, the usual screen rectangle.
    pub fn from_size(width: F, height: F) -> Self {
        Bounds { min: Vec2::zero(), max: Vec2::new(width, height) }
    }

    pub fn width(&self) -> F {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> F {
        self.max.y - self.min.y
    }

    /// Whether `point` lies inside the rectangle shrunk by `padding` on every side.
    pub fn contains_padded(&self, point: Vec2<F>, padding: F) -> bool {
        point.x >= self.min.x + padding
            && point.x <= self.max.x - padding
            && point.y >= self.min.y + padding
            && point.y <= self.max.y - padding
    }
}
