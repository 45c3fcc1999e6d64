//! Sphere primitive, optionally moving linearly over the shutter interval.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::hittable::{HitRecord, Hittable};
use crate::Material;
use lumen_math::{Aabb, Interval, Point3, Ray, Vec3};

/// A sphere whose centre is a linear function of ray time.
pub struct Sphere {
    /// Centre at time 0 plus displacement over the shutter
    center: Ray,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Stationary sphere. Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self::moving(center, center, radius, material)
    }

    /// Sphere travelling from `center0` at time 0 to `center1` at time 1.
    pub fn moving(
        center0: Point3,
        center1: Point3,
        radius: f32,
        material: Arc<dyn Material>,
    ) -> Self {
        let radius = radius.max(0.0);
        let center = Ray::new(center0, center1 - center0);

        let rvec = Vec3::splat(radius);
        let box0 = Aabb::from_points(center.at(0.0) - rvec, center.at(0.0) + rvec);
        let box1 = Aabb::from_points(center.at(1.0) - rvec, center.at(1.0) + rvec);

        Self {
            center,
            radius,
            material,
            bbox: Aabb::surrounding(&box0, &box1),
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Centre of the sphere at the given shutter time.
    pub fn center_at(&self, time: f32) -> Point3 {
        self.center.at(time)
    }

    /// UV coordinates of a point on the unit sphere.
    ///
    /// `u` is the angle around Y starting from X = -1, `v` the angle from
    /// Y = -1 up to Y = +1, both mapped to `[0, 1]`.
    fn sphere_uv(p: Vec3) -> (f32, f32) {
        let theta = (-p.y).clamp(-1.0, 1.0).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let current_center = self.center.at(ray.time());
        let oc = current_center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 || a == 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Nearest root in the admissible range
        let mut root = (h - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (h + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let outward_normal = if self.radius > 0.0 {
            (ray.at(root) - current_center) / self.radius
        } else {
            -ray.direction().normalize()
        };

        Some(HitRecord::new(
            ray,
            root,
            outward_normal,
            Self::sphere_uv(outward_normal),
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::from_color(Vec3::splat(0.5)))
    }

    fn forward() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = sphere.hit(&ray, forward()).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-6);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-6);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, grey());
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);

        assert!(sphere.hit(&ray, forward()).is_none());
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(Vec3::ZERO, -2.0, grey());
        assert_eq!(sphere.radius(), 0.0);
    }

    #[test]
    fn test_ray_from_center_hits_at_radius() {
        // From the centre the roots are -r/|D| and +r/|D|; only the
        // positive one is admissible.
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..1000 {
            let center = Vec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            let radius: f32 = rng.gen_range(0.1..5.0);
            let direction = Vec3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-3.0..3.0),
            );
            if direction.length() < 0.1 {
                continue;
            }

            let sphere = Sphere::new(center, radius, grey());
            let ray = Ray::new(center, direction);

            let rec = sphere.hit(&ray, forward()).unwrap();
            let expected = radius / direction.length();
            assert!((rec.t - expected).abs() < 1e-3 * expected.max(1.0));
            assert!(!rec.front_face);
            assert!(((rec.p - center).length() - radius).abs() < 1e-3 * radius.max(1.0));

            let both = sphere.hit(&ray, Interval::UNIVERSE).unwrap();
            assert!((both.t + expected).abs() < 1e-3 * expected.max(1.0));
        }
    }

    #[test]
    fn test_matches_direct_quadratic_solution() {
        let mut rng = StdRng::seed_from_u64(23);

        for _ in 0..1000 {
            let center = Vec3::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            );
            let radius: f32 = rng.gen_range(0.5..3.0);
            let origin = Vec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            let direction = (center - origin)
                + Vec3::new(
                    rng.gen_range(-2.0..2.0),
                    rng.gen_range(-2.0..2.0),
                    rng.gen_range(-2.0..2.0),
                );
            if direction.length() < 0.1 {
                continue;
            }

            // |O + tD - C|^2 = r^2 in the full (non half-angle) form
            let d = direction.as_dvec3();
            let oc = (origin - center).as_dvec3();
            let a = d.dot(d);
            let b = 2.0 * d.dot(oc);
            let c = oc.dot(oc) - (radius as f64).powi(2);
            let disc = b * b - 4.0 * a * c;

            let sphere = Sphere::new(center, radius, grey());
            let hit = sphere.hit(&Ray::new(origin, direction), forward());

            let expected = if disc < 0.0 {
                None
            } else {
                let t0 = (-b - disc.sqrt()) / (2.0 * a);
                let t1 = (-b + disc.sqrt()) / (2.0 * a);
                [t0, t1].into_iter().find(|&t| t >= 0.001)
            };

            match (hit, expected) {
                (Some(rec), Some(t)) => {
                    assert!((rec.t as f64 - t).abs() < 1e-3 * t.max(1.0), "{} vs {}", rec.t, t)
                }
                (None, None) => {}
                // Grazing rays may flip between hit and miss in f32
                (_, _) => assert!(disc.abs() < 1e-3 * (b * b).max(1e-9), "disc {disc}"),
            }
        }
    }

    #[test]
    fn test_sphere_uv() {
        let cases = [
            (Vec3::X, (0.5, 0.5)),
            (Vec3::Y, (0.5, 1.0)),
            (Vec3::Z, (0.25, 0.5)),
            (Vec3::NEG_X, (0.0, 0.5)),
            (Vec3::NEG_Y, (0.5, 0.0)),
            (Vec3::NEG_Z, (0.75, 0.5)),
        ];
        for (p, (u, v)) in cases {
            let (got_u, got_v) = Sphere::sphere_uv(p);
            assert!((got_u - u).abs() < 1e-5, "u for {p:?}: {got_u}");
            assert!((got_v - v).abs() < 1e-5, "v for {p:?}: {got_v}");
        }
    }

    #[test]
    fn test_moving_sphere_follows_time() {
        let sphere = Sphere::moving(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::new(0.0, 2.0, -5.0),
            0.5,
            grey(),
        );
        let origin = Vec3::new(0.0, 2.0, 0.0);

        let early = Ray::at_time(origin, Vec3::NEG_Z, 0.0);
        let late = Ray::at_time(origin, Vec3::NEG_Z, 1.0);

        assert!(sphere.hit(&early, forward()).is_none());
        assert!(sphere.hit(&late, forward()).is_some());
        assert_eq!(sphere.center_at(0.5), Vec3::new(0.0, 1.0, -5.0));
    }

    #[test]
    fn test_moving_sphere_bbox_covers_path() {
        let sphere = Sphere::moving(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), 1.0, grey());
        let bbox = sphere.bounding_box();

        assert_eq!(bbox.x, Interval::new(-1.0, 5.0));
        assert_eq!(bbox.y, Interval::new(-1.0, 1.0));
    }
}
