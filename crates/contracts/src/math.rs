//! Small math value types shared across the ICD.
//!
//! The estimator exposes quaternions in (x, y, z, w) component order while
//! every downstream consumer expects (w, x, y, z). Both orders get their own
//! type so the reorder is a compile-checked permutation instead of an index
//! convention buried in call sites.

use serde::{Deserialize, Serialize};

/// 3D vector, double precision
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Construct from components
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True iff every component is a finite number
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Narrow to single precision
    #[inline]
    pub fn to_f32(self) -> Vec3f {
        Vec3f {
            x: self.x as f32,
            y: self.y as f32,
            z: self.z as f32,
        }
    }
}

/// 3D vector, single precision (pose message wire format)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3f {
    /// True iff every component is a finite number
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Quaternion in estimator component order (x, y, z, w)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuatXyzw {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl QuatXyzw {
    /// Construct from components in (x, y, z, w) order
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Identity rotation
    #[inline]
    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Reorder components to (w, x, y, z). Pure permutation, no rotation change.
    #[inline]
    pub fn reorder(self) -> QuatWxyz {
        QuatWxyz {
            w: self.w,
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    /// True iff every component is a finite number
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Default for QuatXyzw {
    fn default() -> Self {
        Self::identity()
    }
}

/// Quaternion in consumer component order (w, x, y, z), double precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuatWxyz {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl QuatWxyz {
    /// Reorder components back to (x, y, z, w). Inverse of [`QuatXyzw::reorder`].
    #[inline]
    pub fn reorder(self) -> QuatXyzw {
        QuatXyzw {
            x: self.x,
            y: self.y,
            z: self.z,
            w: self.w,
        }
    }

    /// True iff every component is a finite number
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Narrow to single precision
    #[inline]
    pub fn to_f32(self) -> QuatWxyzF {
        QuatWxyzF {
            w: self.w as f32,
            x: self.x as f32,
            y: self.y as f32,
            z: self.z as f32,
        }
    }
}

impl Default for QuatWxyz {
    fn default() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}

/// Quaternion in consumer component order (w, x, y, z), single precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuatWxyzF {
    pub w: f32,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl QuatWxyzF {
    /// True iff every component is a finite number
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Default for QuatWxyzF {
    fn default() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }
}
