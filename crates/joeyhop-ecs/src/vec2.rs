//! Plain 2D vector math.
//!
//! Every operation is a pure function of its inputs; nothing here holds state.
//! The y axis points down the screen, so "up" is `(0, -1)`.

use serde::{Deserialize, Serialize};

/// A 2D vector of `f64` components.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component (positive is down).
    pub y: f64,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    /// Unit vector pointing up the screen.
    pub const UP: Vec2 = Vec2 { x: 0.0, y: -1.0 };
    /// Unit vector pointing down the screen.
    pub const DOWN: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    /// Construct a vector from its components.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    #[inline]
    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }

    /// Component-wise difference `self - other`.
    #[inline]
    pub fn subtract(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }

    /// Multiply both components by `factor`.
    #[inline]
    pub fn scale(self, factor: f64) -> Vec2 {
        Vec2::new(self.x * factor, self.y * factor)
    }

    /// Rotate counter-clockwise (in a y-up frame) by `angle` radians.
    pub fn rotate(self, angle: f64) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Rotate around `pivot` by `angle` radians.
    pub fn rotate_about(self, pivot: Vec2, angle: f64) -> Vec2 {
        self.subtract(pivot).rotate(angle).add(pivot)
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        self.subtract(other).length()
    }

    /// Angle of the vector measured from the +x axis, in `(-π, π]`.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Round both components toward negative infinity.
    #[inline]
    pub fn floor(self) -> Vec2 {
        Vec2::new(self.x.floor(), self.y.floor())
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::add(self, rhs)
    }
}

impl std::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        *self = Vec2::add(*self, rhs);
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        self.subtract(rhs)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        self.scale(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn add_subtract_scale() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(3.0, -4.0);
        assert_eq!(a.add(b), Vec2::new(4.0, -2.0));
        assert_eq!(a.subtract(b), Vec2::new(-2.0, 6.0));
        assert_eq!(a.scale(2.5), Vec2::new(2.5, 5.0));
        assert_eq!(a + b, a.add(b));
        assert_eq!(a - b, a.subtract(b));
        assert_eq!(a * 2.0, a.scale(2.0));
    }

    #[test]
    fn rotate_quarter_turn() {
        let v = Vec2::new(1.0, 0.0).rotate(FRAC_PI_2);
        assert!(approx(v, Vec2::new(0.0, 1.0)));
        let up = Vec2::UP.rotate(PI);
        assert!(approx(up, Vec2::DOWN));
    }

    #[test]
    fn rotate_about_pivot_keeps_radius() {
        let pivot = Vec2::new(2.0, 2.0);
        let p = Vec2::new(3.0, 2.0);
        let r = p.rotate_about(pivot, 1.234);
        assert!((r.distance(pivot) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn distance_length_angle() {
        assert_eq!(Vec2::new(3.0, 4.0).length(), 5.0);
        assert_eq!(Vec2::new(1.0, 1.0).distance(Vec2::new(4.0, 5.0)), 5.0);
        assert!((Vec2::new(0.0, 1.0).angle() - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn floor_rounds_down() {
        assert_eq!(Vec2::new(1.7, -0.2).floor(), Vec2::new(1.0, -1.0));
    }
}
