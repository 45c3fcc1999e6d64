//! lumen renderer - CPU path tracing
//!
//! A Monte Carlo ray tracer over sphere primitives. The camera casts jittered
//! rays per pixel, a BVH answers the nearest hit, and materials decide
//! stochastically how each ray continues. Samples are averaged and
//! gamma-corrected into 8-bit RGB.

mod bvh;
mod camera;
mod hittable;
mod material;
mod renderer;
pub mod sampling;
mod sphere;
mod texture;

pub use bvh::BvhNode;
pub use camera::{Camera, CameraConfig, RenderMode};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    color_to_rgb8, linear_to_gamma, ray_color, render, render_pixel, render_with, sky_gradient,
    ImageBuffer, RenderError, RenderOptions, SHADOW_ACNE_EPSILON,
};
pub use sampling::gen_f32;
pub use sphere::Sphere;
pub use texture::{CheckerTexture, ImageTexture, SolidColor, Texture, TextureError};

/// Re-export the math types the public API is written in
pub use lumen_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
