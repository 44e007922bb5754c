use std::ops::{Add, Mul, Sub};

use smallvec::SmallVec;

use crate::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Direction of the given angle in degrees (0 = +x, clockwise in screen space).
    pub fn from_degrees(degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Vec2::new(rad.cos(), rad.sin())
    }

    /// Angle of this vector in degrees, `[0, 360)`.
    pub fn angle_degrees(self) -> f64 {
        let degrees = self.y.atan2(self.x) * 180.0 / std::f64::consts::PI;
        if degrees < 0.0 { degrees + 360.0 } else { degrees }
    }

    pub fn rotate_about(self, center: Vec2, radians: f64) -> Vec2 {
        let (sin, cos) = radians.sin_cos();
        let v = self - center;
        Vec2 {
            x: center.x + (v.x * cos - v.y * sin),
            y: center.y + (v.x * sin + v.y * cos),
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

/// Barycentric weights of a point relative to a [`Triangle`], summing to 1.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Barycentric {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Barycentric {
    pub fn is_inside(&self) -> bool {
        self.a >= 0.0 && self.b >= 0.0 && self.c >= 0.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    pub a: Vec2,
    pub b: Vec2,
    pub c: Vec2,
}

impl Triangle {
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    pub fn rotated_about(&self, center: Vec2, radians: f64) -> Triangle {
        Triangle {
            a: self.a.rotate_about(center, radians),
            b: self.b.rotate_about(center, radians),
            c: self.c.rotate_about(center, radians),
        }
    }

    fn det(&self) -> f64 {
        let (a, b, c) = (self.a, self.b, self.c);
        (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y)
    }

    /// Weights of `p`. A zero-area triangle yields non-finite weights; use
    /// [`Triangle::try_barycentric`] when that matters.
    pub fn barycentric(&self, p: Vec2) -> Barycentric {
        let (a, b, c) = (self.a, self.b, self.c);
        let det = self.det();
        let wa = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / det;
        let wb = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / det;
        Barycentric {
            a: wa,
            b: wb,
            c: 1.0 - wa - wb,
        }
    }

    pub fn try_barycentric(&self, p: Vec2) -> Result<Barycentric, Error> {
        if self.det() == 0.0 {
            return Err(Error::DegenerateTriangle);
        }
        Ok(self.barycentric(p))
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.barycentric(p).is_inside()
    }

    /// Point at the given weights.
    pub fn point_at(&self, w: Barycentric) -> Vec2 {
        Vec2 {
            x: w.a * self.a.x + w.b * self.b.x + w.c * self.c.x,
            y: w.a * self.a.y + w.b * self.b.y + w.c * self.c.y,
        }
    }

    /// `p` itself when inside, otherwise the nearest point on the boundary.
    /// Edges are tried AB, BC, CA; a later edge wins only when strictly closer.
    pub fn clamp(&self, p: Vec2) -> Vec2 {
        if self.contains(p) {
            return p;
        }
        let candidates: SmallVec<[Vec2; 3]> = [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
            .into_iter()
            .map(|(s, e)| closest_point_on_segment(s, e, p))
            .collect();

        let mut closest = candidates[0];
        let mut d_min = (p - closest).length();
        for &candidate in &candidates[1..] {
            let d = (p - candidate).length();
            if d < d_min {
                d_min = d;
                closest = candidate;
            }
        }
        closest
    }

    /// Axis-aligned bounds.
    pub fn bounds(&self) -> Rect {
        let min_x = self.a.x.min(self.b.x.min(self.c.x));
        let min_y = self.a.y.min(self.b.y.min(self.c.y));
        let max_x = self.a.x.max(self.b.x.max(self.c.x));
        let max_y = self.a.y.max(self.b.y.max(self.c.y));
        Rect {
            x: min_x,
            y: min_y,
            w: max_x - min_x,
            h: max_y - min_y,
        }
    }
}

pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}
