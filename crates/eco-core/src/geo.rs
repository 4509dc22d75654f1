//! Planar geometry: positions, movement vectors and axis-aligned rectangles.
//!
//! The world is a flat 2-D plane measured in abstract distance units.  All
//! coordinates are `f64`; the scent gradient raises distances to the fourth
//! power and single precision loses the ordering between nearby markers.

use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub};

/// A 2-D point or displacement.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `degrees` (counter-clockwise from +x).
    #[inline]
    pub fn from_angle(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self::new(cos, sin)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Unit vector in the same direction, or `None` for the zero vector.
    #[inline]
    pub fn try_normalize(self) -> Option<Vec2> {
        let len = self.length();
        (len > 0.0).then(|| Vec2::new(self.x / len, self.y / len))
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    #[inline]
    pub fn normalize_or_zero(self) -> Vec2 {
        self.try_normalize().unwrap_or(Vec2::ZERO)
    }

    /// Rotate counter-clockwise by `degrees`.
    pub fn rotate(self, degrees: f64) -> Vec2 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    #[inline]
    pub fn distance_squared(self, other: Vec2) -> f64 {
        (other - self).length_squared()
    }

    /// Heading in degrees from `self` towards `other`.
    #[inline]
    pub fn angle_to(self, other: Vec2) -> f64 {
        let d = other - self;
        d.y.atan2(d.x).to_degrees()
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

impl MulAssign<f64> for Vec2 {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle, `min` inclusive and `max` exclusive.
///
/// Used for the world bounds, the grass placement area and obstacles.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    #[inline]
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle anchored at the origin.
    #[inline]
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(Vec2::ZERO, Vec2::new(width, height))
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// `true` if both extents are finite and strictly positive.
    pub fn is_proper(&self) -> bool {
        self.width().is_finite() && self.height().is_finite()
            && self.width() > 0.0 && self.height() > 0.0
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Shrink every side by `margin`.
    pub fn inset(&self, margin: f64) -> Rect {
        Rect::new(
            Vec2::new(self.min.x + margin, self.min.y + margin),
            Vec2::new(self.max.x - margin, self.max.y - margin),
        )
    }
}
