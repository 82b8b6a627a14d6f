//! Planar vector algebra and axis-aligned rectangles in a Y-up world space.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Returns `-1`, `0` or `1` depending on the sign of `value`.
///
/// Unlike [`f32::signum`], zero maps to zero. NaN is returned unchanged.
#[must_use]
pub fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        value
    }
}

/// Two-dimensional vector expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component, growing to the right.
    pub x: f32,
    /// Vertical component, growing upward.
    pub y: f32,
}

impl Vector2 {
    /// Vector with both components set to zero.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Overwrites the provided components, leaving `None` components untouched.
    pub fn set(&mut self, x: Option<f32>, y: Option<f32>) {
        if let Some(x) = x {
            self.x = x;
        }
        if let Some(y) = y {
            self.y = y;
        }
    }

    /// Reports whether both components are exactly zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Mirrors the vector across the vertical axis in place.
    pub fn reflect_x(&mut self) {
        self.x = -self.x;
    }

    /// Mirrors the vector across the horizontal axis in place.
    pub fn reflect_y(&mut self) {
        self.y = -self.y;
    }

    /// Returns a copy mirrored across the vertical axis.
    #[must_use]
    pub fn reflected_x(self) -> Self {
        Self::new(-self.x, self.y)
    }

    /// Returns a copy mirrored across the horizontal axis.
    #[must_use]
    pub fn reflected_y(self) -> Self {
        Self::new(self.x, -self.y)
    }

    /// Dot product of two vectors.
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length of the vector.
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit vector pointing in the same direction.
    ///
    /// The zero vector has no direction and is returned unchanged.
    #[must_use]
    pub fn unit(self) -> Self {
        let length = self.length();
        if length == 0.0 {
            return Self::ZERO;
        }
        self / length
    }

    /// Component-wise minimum.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// Component-wise absolute value.
    #[must_use]
    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// Component-wise [`sign`].
    #[must_use]
    pub fn signs(self) -> Self {
        Self::new(sign(self.x), sign(self.y))
    }

    /// Component-wise rounding to the nearest integer.
    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Component-wise floor.
    #[must_use]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }

    /// Angle of the vector in radians measured from the positive x axis.
    #[must_use]
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Linear interpolation toward `other` by factor `t`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Signed area of the parallelogram spanned by the edge `from -> to` and
    /// the point. Non-negative when the point lies on the inner side of a
    /// clockwise edge.
    #[must_use]
    pub fn relative(self, from: Self, to: Self) -> f32 {
        (to.x - from.x) * (self.y - from.y) - (to.y - from.y) * (self.x - from.x)
    }

    /// Clamps both components into the provided ranges in place.
    pub fn limit(&mut self, min_x: f32, max_x: f32, min_y: f32, max_y: f32) {
        *self = self.limited(min_x, max_x, min_y, max_y);
    }

    /// Returns a copy clamped into the provided ranges.
    #[must_use]
    pub fn limited(self, min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self::new(self.x.max(min_x).min(max_x), self.y.max(min_y).min(max_y))
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Add<f32> for Vector2 {
    type Output = Self;

    fn add(self, rhs: f32) -> Self {
        Self::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Sub<f32> for Vector2 {
    type Output = Self;

    fn sub(self, rhs: f32) -> Self {
        Self::new(self.x - rhs, self.y - rhs)
    }
}

impl Mul for Vector2 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div for Vector2 {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Div<f32> for Vector2 {
    type Output = Self;

    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vector2 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign<f32> for Vector2 {
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl DivAssign<f32> for Vector2 {
    fn div_assign(&mut self, rhs: f32) {
        *self = *self / rhs;
    }
}

/// Corner points of a [`Rectangle`], walked clockwise from the upper-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Corners {
    /// Upper-left corner.
    pub a: Vector2,
    /// Lower-left corner.
    pub b: Vector2,
    /// Lower-right corner.
    pub c: Vector2,
    /// Upper-right corner.
    pub d: Vector2,
}

/// Axis-aligned rectangle anchored at its upper-left corner.
///
/// World space grows upward, so the rectangle extends `dimensions.y` below
/// its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Upper-left corner of the rectangle.
    pub position: Vector2,
    /// Width and height of the rectangle.
    pub dimensions: Vector2,
}

impl Rectangle {
    /// Creates a rectangle from its upper-left corner and dimensions.
    #[must_use]
    pub const fn new(position: Vector2, dimensions: Vector2) -> Self {
        Self {
            position,
            dimensions,
        }
    }

    /// Center point of the rectangle.
    #[must_use]
    pub fn midpoint(&self) -> Vector2 {
        Vector2::new(
            self.position.x + self.dimensions.x / 2.0,
            self.position.y - self.dimensions.y / 2.0,
        )
    }

    /// Corner points of the rectangle.
    #[must_use]
    pub fn corners(&self) -> Corners {
        let Vector2 { x, y } = self.position;
        let Vector2 { x: w, y: h } = self.dimensions;
        Corners {
            a: Vector2::new(x, y),
            b: Vector2::new(x, y - h),
            c: Vector2::new(x + w, y - h),
            d: Vector2::new(x + w, y),
        }
    }

    /// Reports whether the rectangles overlap. Touching edges count as overlap.
    #[must_use]
    pub fn collides(&self, other: &Self) -> bool {
        !(self.position.x > other.position.x + other.dimensions.x
            || self.position.x + self.dimensions.x < other.position.x
            || self.position.y < other.position.y - other.dimensions.y
            || self.position.y - self.dimensions.y > other.position.y)
    }

    /// Offset of this rectangle's midpoint from the midpoint of `other`.
    #[must_use]
    pub fn relative(&self, other: &Self) -> Vector2 {
        self.midpoint() - other.midpoint()
    }

    /// Per-axis overlap depth between the rectangles. Positive components
    /// indicate penetration along that axis.
    #[must_use]
    pub fn depth(&self, other: &Self) -> Vector2 {
        let half = (self.dimensions + other.dimensions) / 2.0;
        half - self.relative(other).abs()
    }

    /// Reports whether `other` lies entirely within this rectangle, edges included.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.contained(self)
    }

    /// Reports whether the point lies within this rectangle, edges included.
    #[must_use]
    pub fn contains_point(&self, point: Vector2) -> bool {
        let Corners { a, b, c, d } = self.corners();
        point.relative(a, b) >= 0.0
            && point.relative(b, c) >= 0.0
            && point.relative(c, d) >= 0.0
            && point.relative(d, a) >= 0.0
    }

    /// Reports whether this rectangle lies entirely within `other`, edges included.
    #[must_use]
    pub fn contained(&self, other: &Self) -> bool {
        self.position.x >= other.position.x
            && self.position.x + self.dimensions.x <= other.position.x + other.dimensions.x
            && self.position.y <= other.position.y
            && self.position.y - self.dimensions.y >= other.position.y - other.dimensions.y
    }

    /// Translation that moves this rectangle back inside `other`.
    ///
    /// Returns the zero vector when the rectangle is already contained. The
    /// offending corners select which edge of `other` to align against.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Vector2 {
        if self.contained(other) {
            return Vector2::ZERO;
        }

        let own = self.corners();
        let bounds = other.corners();
        let outside = (
            !other.contains_point(own.a),
            !other.contains_point(own.b),
            !other.contains_point(own.c),
            !other.contains_point(own.d),
        );

        match outside {
            (true, true, false, false) => Vector2::new(bounds.a.x - own.a.x, 0.0),
            (false, true, true, false) => Vector2::new(0.0, bounds.b.y - own.b.y),
            (false, false, true, true) => Vector2::new(bounds.c.x - own.c.x, 0.0),
            (true, false, false, true) => Vector2::new(0.0, bounds.d.y - own.d.y),
            (true, true, true, false) => bounds.b - own.b,
            (false, true, true, true) => bounds.c - own.c,
            (true, false, true, true) => bounds.d - own.d,
            (true, true, false, true) => bounds.a - own.a,
            _ => {
                let mut delta = Vector2::ZERO;
                if own.b.x < bounds.b.x {
                    delta.x = bounds.b.x - own.b.x;
                } else if own.d.x > bounds.d.x {
                    delta.x = bounds.d.x - own.d.x;
                }
                if own.a.y > bounds.a.y {
                    delta.y = bounds.a.y - own.a.y;
                } else if own.c.y < bounds.c.y {
                    delta.y = bounds.c.y - own.c.y;
                }
                delta
            }
        }
    }

    /// Returns a copy of the rectangle moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vector2) -> Self {
        Self::new(self.position + offset, self.dimensions)
    }
}
