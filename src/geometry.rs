//! Angle and coordinate helpers shared by every gauge.

use std::f64::consts::PI;
use std::ops::{Add, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
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

/// Affine transform `[a c e; b d f; 0 0 1]`, column-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// `self` followed by a translation in the local (already transformed) frame.
    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self {
            e: self.a * dx + self.c * dy + self.e,
            f: self.b * dx + self.d * dy + self.f,
            ..self
        }
    }

    pub fn rotate(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: self.a * cos + self.c * sin,
            b: self.b * cos + self.d * sin,
            c: self.c * cos - self.a * sin,
            d: self.d * cos - self.b * sin,
            ..self
        }
    }

    pub fn scale(self, sx: f64, sy: f64) -> Self {
        Self {
            a: self.a * sx,
            b: self.b * sx,
            c: self.c * sy,
            d: self.d * sy,
            ..self
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Linear part only, for direction vectors.
    pub fn apply_vector(&self, v: Point) -> Point {
        Point::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    /// Geometric mean of the axis scales; exact for uniform scaling.
    pub fn scale_factor(&self) -> f64 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Normalises into `[0, 360)`.
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    // -1e-15 % 360 + 360 rounds to exactly 360.0
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Normalises into `[-180, 180)`.
pub fn wrap_signed_degrees(degrees: f64) -> f64 {
    let wrapped = wrap_degrees(degrees);
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Canvas-convention polar point: angle 0 points right, positive is clockwise.
pub fn polar(radius: f64, radians: f64) -> Point {
    Point::new(radians.cos() * radius, radians.sin() * radius)
}

/// Compass-convention polar point: angle 0 points up, positive is clockwise.
pub fn bearing_point(radius: f64, radians: f64) -> Point {
    Point::new(radians.sin() * radius, -radians.cos() * radius)
}

/// Linear value-to-angle mapping of a dial.
///
/// `start_deg` is the angle of `min` and `sweep_deg` the arc covered up to
/// `max`, both in canvas convention (0° = 3 o'clock, clockwise positive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcScale {
    pub min: f64,
    pub max: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
}

impl ArcScale {
    pub const fn new(min: f64, max: f64, start_deg: f64, sweep_deg: f64) -> Self {
        Self {
            min,
            max,
            start_deg,
            sweep_deg,
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Angle in radians for `value`, clamped to the scale.
    pub fn angle_of(&self, value: f64) -> f64 {
        let t = (self.clamp(value) - self.min) / (self.max - self.min);
        deg_to_rad(self.start_deg + t * self.sweep_deg)
    }
}
