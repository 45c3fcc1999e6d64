//! Random sampling helpers.
//!
//! Every function draws from a caller-supplied generator so that render
//! workers never share a stream.

use lumen_math::{Color, Vec3};
use rand::{Rng, RngCore};

/// Upper bound on rejection-sampling attempts.
///
/// Each attempt is accepted with probability >= 0.52, so hitting the cap
/// is practically impossible; it only guarantees termination.
pub const MAX_REJECTION_ATTEMPTS: usize = 64;

/// Smallest squared length accepted before normalizing a sample.
const MIN_SAMPLE_LENGTH_SQUARED: f32 = 1e-12;

/// Uniform f32 in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform f32 in `[min, max)`.
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f32, max: f32) -> f32 {
    min + (max - min) * gen_f32(rng)
}

/// Uniformly distributed direction on the unit sphere.
///
/// Rejection-samples the unit ball, then normalizes. Samples too close to
/// the origin are discarded since normalizing them would blow up.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let p = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        let len_sq = p.length_squared();
        if MIN_SAMPLE_LENGTH_SQUARED < len_sq && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
    Vec3::Y
}

/// Uniform point inside the unit disk in the XY plane.
///
/// No near-zero filter here: the sample is used as an offset, never
/// normalized, so the centre is a valid result.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let p = Vec3::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
    Vec3::ZERO
}

/// Random offset in the square `[-0.5, 0.5]²` (z = 0).
#[inline]
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}

/// Colour with each channel uniform in `[0, 1)`.
pub fn random_color(rng: &mut dyn RngCore) -> Color {
    Color::new(gen_f32(rng), gen_f32(rng), gen_f32(rng))
}

/// Colour with each channel uniform in `[min, max)`.
pub fn random_color_range(rng: &mut dyn RngCore, min: f32, max: f32) -> Color {
    Color::new(
        gen_range(rng, min, max),
        gen_range(rng, min, max),
        gen_range(rng, min, max),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_unit_vector_is_unit() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-4, "length {}", v.length());
        }
    }

    #[test]
    fn test_random_unit_vector_covers_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut up = 0;
        let n = 2000;
        for _ in 0..n {
            if random_unit_vector(&mut rng).y > 0.0 {
                up += 1;
            }
        }
        // Roughly half should point up
        assert!(up > n / 3 && up < 2 * n / 3, "up = {up}");
    }

    #[test]
    fn test_random_in_unit_disk() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_sample_square_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..1000 {
            let s = sample_square(&mut rng);
            assert!((-0.5..0.5).contains(&s.x));
            assert!((-0.5..0.5).contains(&s.y));
        }
    }

    #[test]
    fn test_random_color_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let c = random_color_range(&mut rng, 0.5, 1.0);
            assert!(c.min_element() >= 0.5 && c.max_element() < 1.0);
        }
    }
}
