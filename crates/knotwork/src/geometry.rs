use core::cmp::Ordering;
use core::ops::{Add, Mul, Sub};

use knotwork_engine::coords::Vec2;

/// 2D vector in canvas pixels, double precision.
///
/// Ordering is componentwise: `a < b` only when both coordinates of `a` are
/// strictly smaller. Pairs that differ in direction per axis are unordered,
/// so this is for approximate point matching, never for sorting.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vec2d {
    pub x: f64,
    pub y: f64,
}

impl Vec2d {
    pub const ZERO: Vec2d = Vec2d::new(0.0, 0.0);

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean norm, truncated to a whole number of pixels.
    #[inline]
    pub fn length(self) -> i64 {
        (self.x * self.x + self.y * self.y).sqrt().floor() as i64
    }

    #[inline]
    pub fn midpoint(a: Vec2d, b: Vec2d) -> Vec2d {
        (a + b) * 0.5
    }

    /// `self` at `t = 0`, `to` at `t = 1`.
    #[inline]
    pub fn lerp(self, to: Vec2d, t: f64) -> Vec2d {
        to * t + self * (1.0 - t)
    }

    /// Converts to the engine's single-precision draw coordinates.
    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl From<(f64, f64)> for Vec2d {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Vec2d::new(x, y)
    }
}

impl From<(f32, f32)> for Vec2d {
    #[inline]
    fn from((x, y): (f32, f32)) -> Self {
        Vec2d::new(x as f64, y as f64)
    }
}

impl Add for Vec2d {
    type Output = Vec2d;
    #[inline]
    fn add(self, rhs: Vec2d) -> Vec2d {
        Vec2d::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2d {
    type Output = Vec2d;
    #[inline]
    fn sub(self, rhs: Vec2d) -> Vec2d {
        Vec2d::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2d {
    type Output = Vec2d;
    #[inline]
    fn mul(self, k: f64) -> Vec2d {
        Vec2d::new(self.x * k, self.y * k)
    }
}

impl PartialOrd for Vec2d {
    fn partial_cmp(&self, other: &Vec2d) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else if self.x < other.x && self.y < other.y {
            Some(Ordering::Less)
        } else if self.x > other.x && self.y > other.y {
            Some(Ordering::Greater)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vec2d {
        Vec2d::new(x, y)
    }

    #[test]
    fn arithmetic() {
        assert_eq!(v(1.0, 2.0) + v(3.0, 4.0), v(4.0, 6.0));
        assert_eq!(v(1.0, 2.0) - v(3.0, 5.0), v(-2.0, -3.0));
        assert_eq!(v(1.5, -2.0) * 2.0, v(3.0, -4.0));
    }

    #[test]
    fn length_truncates() {
        assert_eq!(v(3.0, 4.0).length(), 5);
        assert_eq!(v(1.0, 1.0).length(), 1);
        assert_eq!(v(0.0, 0.0).length(), 0);
        assert_eq!(v(-6.0, 8.5).length(), 10);
    }

    #[test]
    fn ordering_is_componentwise() {
        assert!(v(1.0, 1.0) < v(2.0, 2.0));
        assert!(v(2.0, 2.0) > v(1.0, 1.0));
        assert_eq!(v(1.0, 1.0).partial_cmp(&v(1.0, 1.0)), Some(Ordering::Equal));
    }

    #[test]
    fn mixed_axes_are_unordered() {
        let a = v(0.0, 10.0);
        let b = v(10.0, 0.0);
        assert_eq!(a.partial_cmp(&b), None);
        assert!(!(a < b));
        assert!(!(a > b));
        // One equal axis is not enough for strict ordering either.
        assert!(!(v(1.0, 1.0) < v(1.0, 2.0)));
    }

    #[test]
    fn midpoint_and_lerp() {
        assert_eq!(Vec2d::midpoint(v(0.0, 0.0), v(10.0, 4.0)), v(5.0, 2.0));
        assert_eq!(v(0.0, 0.0).lerp(v(8.0, 8.0), 0.25), v(2.0, 2.0));
        assert_eq!(v(3.0, 3.0).lerp(v(8.0, 8.0), 0.0), v(3.0, 3.0));
    }

    #[test]
    fn converts_to_draw_coordinates() {
        let p = v(799.5, 300.25).to_vec2();
        assert_eq!((p.x, p.y), (799.5, 300.25));
    }
}
