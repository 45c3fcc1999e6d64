//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Bounded bounce depth, iterated rather than recursed
//! - Box-filter anti-aliasing via multi-sampling
//! - Gamma correction and 8-bit quantization
//! - Row-parallel rendering with one generator per row

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

use crate::{Camera, Hittable, RenderMode};
use lumen_math::{Color, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;

/// Lower bound on ray `t` for scattered rays, avoiding self-intersection.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// Errors that stop a render before every row is done.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Render cancelled after {rows_done} rows")]
    Cancelled { rows_done: usize },
}

/// Knobs for [`render_with`] that do not belong to the camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions<'a> {
    /// Base seed for the per-row generators; random when `None`
    pub seed: Option<u64>,
    /// Checked before each row; setting it stops the render
    pub cancel: Option<&'a AtomicBool>,
}

/// Background radiance: white at the bottom blending to sky blue at the top.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Compute the radiance carried back along a ray.
///
/// Follows at most `depth` surface interactions, multiplying attenuations
/// along the way. Paths that run out of depth or get absorbed are black;
/// paths that escape pick up the sky gradient.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    mode: RenderMode,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    if mode == RenderMode::Normals {
        return match world.hit(ray, Interval::new(0.0, f32::INFINITY)) {
            Some(rec) => 0.5 * (rec.normal + Color::ONE),
            None => sky_gradient(ray),
        };
    }

    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return Color::ZERO,
        }
    }

    // Bounce limit reached, no more light is gathered
    Color::ZERO
}

/// Average `samples_per_pixel` jittered samples for pixel `(i, j)`.
///
/// Returns linear colour, before gamma.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        let ray = camera.get_ray(i, j, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth(), camera.render_mode(), rng);
    }

    camera.pixel_samples_scale() * pixel_color
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Gamma-correct and quantize a linear colour to 8-bit RGB.
///
/// Channels are clamped to `[0, 0.999]` and scaled by 255.999, so 1.0
/// maps to 255 and no value reaches 256.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let quantize = |c: f32| (255.999 * intensity.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Linear-colour framebuffer, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Gamma-corrected byte triples in the same order as `pixels`.
    pub fn to_rgb8(&self) -> Vec<[u8; 3]> {
        self.pixels.iter().map(|&c| color_to_rgb8(c)).collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Render the whole image with a random seed.
pub fn render(camera: &Camera, world: &dyn Hittable) -> ImageBuffer {
    let (image, _) = render_rows(camera, world, rand::random(), None);
    image
}

/// Render the whole image, honouring a fixed seed and cancellation.
pub fn render_with(
    camera: &Camera,
    world: &dyn Hittable,
    options: &RenderOptions<'_>,
) -> Result<ImageBuffer, RenderError> {
    let seed = options.seed.unwrap_or_else(rand::random);
    let (image, rows_done) = render_rows(camera, world, seed, options.cancel);

    if rows_done < camera.image_height() as usize {
        log::warn!("Render cancelled with {} rows done", rows_done);
        return Err(RenderError::Cancelled { rows_done });
    }
    Ok(image)
}

/// Seed of the generator that renders row `j`.
fn row_seed(seed: u64, j: u32) -> u64 {
    seed ^ (j as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn render_rows(
    camera: &Camera,
    world: &dyn Hittable,
    seed: u64,
    cancel: Option<&AtomicBool>,
) -> (ImageBuffer, usize) {
    let width = camera.image_width();
    let height = camera.image_height();
    let mut image = ImageBuffer::new(width, height);
    let rows_done = AtomicUsize::new(0);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth()
    );
    let start = Instant::now();

    image
        .pixels
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(j, row)| {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return;
            }

            let j = j as u32;
            let mut rng = StdRng::seed_from_u64(row_seed(seed, j));
            for (i, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(camera, world, i as u32, j, &mut rng);
            }

            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            log::trace!("Scanlines remaining: {}", height as usize - done);
        });

    let rows_done = rows_done.into_inner();
    log::info!("Rendered {} rows in {:.2?}", rows_done, start.elapsed());

    (image, rows_done)
}
