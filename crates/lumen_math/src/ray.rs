use crate::Vec3;

/// A ray `origin + t * direction`.
///
/// The direction is not required to be unit length. `time` lies in `[0, 1]`
/// and is only read by moving primitives (motion blur).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    pub time: f32,
}

impl Ray {
    /// Create a ray at time 0.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::at_time(origin, direction, 0.0)
    }

    /// Create a ray carrying a shutter time.
    #[inline]
    pub fn at_time(origin: Vec3, direction: Vec3, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Point along the ray at parameter t.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::NEG_Z)
    }
}
