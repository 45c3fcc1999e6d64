//! Geometry primitives shared by the lumen renderer.
//!
//! Vectors come straight from `glam`; this crate adds the ray, the numeric
//! interval and the axis-aligned box the tracer is built on.

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod interval;
mod ray;
mod vec;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vec::{near_zero, reflect, refract, Color, Point3, NEAR_ZERO_EPSILON};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_vec3() {
        let c: Color = Color::new(0.25, 0.5, 1.0);
        let p: Point3 = Point3::new(0.25, 0.5, 1.0);
        assert_eq!(c, p);
    }

    #[test]
    fn test_hadamard_product() {
        let a = Color::new(0.5, 1.0, 0.25);
        let b = Color::new(0.5, 0.5, 4.0);
        assert_eq!(a * b, Color::new(0.25, 0.5, 1.0));
    }
}
