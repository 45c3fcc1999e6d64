//! Camera configuration and ray generation.

use crate::sampling::{gen_f32, random_in_unit_disk, sample_square};
use lumen_math::{Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// What the integrator computes for each camera ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Shade the first hit's surface normal, no bounces
    Normals,
    /// Full material scattering
    #[default]
    Material,
}

/// User-tunable camera parameters.
///
/// Loadable from JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Ratio of image width over height
    pub aspect_ratio: f32,
    /// Random samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,

    /// Vertical field of view in degrees
    pub vfov: f32,
    pub look_from: Point3,
    pub look_at: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,

    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f32,
    /// Distance from camera to plane of perfect focus
    pub focus_dist: f32,

    pub render_mode: RenderMode,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            aspect_ratio: 16.0 / 9.0,
            samples_per_pixel: 100,
            max_depth: 50,
            vfov: 90.0,
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            render_mode: RenderMode::Material,
        }
    }
}

impl CameraConfig {
    /// Set image width and aspect ratio.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f32) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }

    /// Image height: `floor(width / aspect_ratio)`, at least 1.
    ///
    /// A non-positive or non-finite aspect ratio falls back to square.
    pub fn image_height(&self) -> u32 {
        image_height_for(self.image_width, self.aspect_ratio)
    }
}

fn image_height_for(image_width: u32, aspect_ratio: f32) -> u32 {
    let aspect = if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        1.0
    };
    ((image_width as f32 / aspect) as u32).max(1)
}

/// Camera with all derived viewport state computed.
///
/// Built once per render from a [`CameraConfig`]; immutable afterwards.
#[derive(Debug, Clone)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    samples_per_pixel: u32,
    max_depth: u32,
    render_mode: RenderMode,
    defocus_angle: f32,

    pixel_samples_scale: f32,
    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    /// Camera frame basis: right, up, backward
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        let image_width = config.image_width.max(1);
        let image_height = image_height_for(image_width, config.aspect_ratio);
        let samples_per_pixel = config.samples_per_pixel.max(1);
        let center = config.look_from;

        // Viewport dimensions
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        // Use the realized pixel ratio, not the requested aspect
        let viewport_width = viewport_height * (image_width as f32 / image_height as f32);

        // Camera basis vectors
        let w = (config.look_from - config.look_at).normalize();
        let u = config.vup.cross(w).normalize();
        let v = w.cross(u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left =
            center - config.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();

        log::debug!(
            "Camera {}x{} @ {} spp, depth {}, vfov {:.1}, from {} to {}",
            image_width,
            image_height,
            samples_per_pixel,
            config.max_depth,
            config.vfov,
            config.look_from,
            config.look_at
        );

        Self {
            image_width,
            image_height,
            samples_per_pixel,
            max_depth: config.max_depth,
            render_mode: config.render_mode,
            defocus_angle: config.defocus_angle,
            pixel_samples_scale: 1.0 / samples_per_pixel as f32,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u: u * defocus_radius,
            defocus_disk_v: v * defocus_radius,
        }
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Scale factor applied to a sum of pixel samples (1 / spp).
    pub fn pixel_samples_scale(&self) -> f32 {
        self.pixel_samples_scale
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Orthonormal camera frame `(u, v, w)`: right, up, and backward.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Jittered ray through pixel `(i, j)`, `j` counting rows from the top.
    ///
    /// Originates on the defocus disk when the lens has an aperture, and
    /// carries a random shutter time in `[0, 1)`.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        let ray_direction = pixel_sample - ray_origin;
        let ray_time = gen_f32(rng);

        Ray::at_time(ray_origin, ray_direction, ray_time)
    }

    /// Centre of pixel `(i, j)` on the focus plane.
    pub fn pixel_center(&self, i: u32, j: u32) -> Point3 {
        self.pixel00_loc + (i as f32) * self.pixel_delta_u + (j as f32) * self.pixel_delta_v
    }

    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(&CameraConfig::default())
    }
}
