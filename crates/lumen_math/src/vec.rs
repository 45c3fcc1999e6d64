//! Vector helpers glam does not provide.

use crate::Vec3;

/// RGB colour, linear, nominally in `[0, 1]` per channel.
pub type Color = Vec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Per-component magnitude under which a vector counts as zero.
pub const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// True when every component is below [`NEAR_ZERO_EPSILON`] in magnitude.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO_EPSILON
}

/// Mirror `v` about the surface normal `n` (`v - 2(v·n)n`).
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// `eta_ratio` is the incident index over the transmitted index.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, eta_ratio: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = eta_ratio * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
