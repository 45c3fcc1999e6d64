use crate::{Interval, Ray, Vec3};

/// Minimum thickness of any box axis.
const MIN_AXIS_SIZE: f32 = 0.0001;

/// Axis-aligned bounding box: one interval per axis.
///
/// Boxes built through [`Aabb::new`] or [`Aabb::from_points`] never have an
/// axis thinner than `MIN_AXIS_SIZE`, which keeps the slab test stable for
/// flat geometry.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Box bounding nothing. Identity element of [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Box spanning two corner points, given in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(
            Interval::new(min.x, max.x),
            Interval::new(min.y, max.y),
            Interval::new(min.z, max.z),
        )
    }

    /// Union of two boxes.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Interval for axis `n` (0=X, 1=Y, 2=Z).
    #[inline]
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Slab test: does the ray cross the box for some `t` in `ray_t`?
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        let origin = r.origin.to_array();
        let direction = r.direction.to_array();

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / direction[axis];

            let t0 = (slab.min - origin[axis]) * adinv;
            let t1 = (slab.max - origin[axis]) * adinv;
            let (t0, t1) = if adinv < 0.0 { (t1, t0) } else { (t0, t1) };

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    /// Index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let x_size = self.x.size();
        let y_size = self.y.size();
        let z_size = self.z.size();

        if x_size > y_size && x_size > z_size {
            0
        } else if y_size > z_size {
            1
        } else {
            2
        }
    }

    /// Centre point of the box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// True when `other` lies entirely inside this box.
    pub fn encloses(&self, other: &Aabb) -> bool {
        (0..3).all(|axis| {
            let outer = self.axis_interval(axis);
            let inner = other.axis_interval(axis);
            outer.min <= inner.min && inner.max <= outer.max
        })
    }

    fn pad_to_minimums(&mut self) {
        if self.x.size() < MIN_AXIS_SIZE {
            self.x = self.x.expand(MIN_AXIS_SIZE);
        }
        if self.y.size() < MIN_AXIS_SIZE {
            self.y = self.y.expand(MIN_AXIS_SIZE);
        }
        if self.z.size() < MIN_AXIS_SIZE {
            self.z = self.z.expand(MIN_AXIS_SIZE);
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points_any_order() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.x, Interval::new(0.0, 10.0));
        assert_eq!(aabb.y, Interval::new(0.0, 10.0));
        assert_eq!(aabb.z, Interval::new(0.0, 10.0));
    }

    #[test]
    fn test_aabb_pads_flat_axis() {
        let flat = Aabb::from_points(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0));

        assert!(flat.z.size() >= MIN_AXIS_SIZE);
        assert!(flat.z.min < 0.0 && flat.z.max > 0.0);
        assert_eq!(flat.x.size(), 1.0);
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::splat(5.0));
        let box2 = Aabb::from_points(Vec3::splat(3.0), Vec3::splat(10.0));
        let both = Aabb::surrounding(&box1, &box2);

        assert_eq!(both.x, Interval::new(0.0, 10.0));
        assert!(both.encloses(&box1));
        assert!(both.encloses(&box2));
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &box1), box1);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray_t = Interval::new(0.0, 100.0);

        let toward = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.hit(&toward, ray_t));

        let away = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        assert!(!aabb.hit(&away, ray_t));

        let beside = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::Z);
        assert!(!aabb.hit(&beside, ray_t));

        // Box lies beyond the admissible range
        assert!(!aabb.hit(&toward, Interval::new(0.0, 3.0)));
    }

    #[test]
    fn test_aabb_hit_diagonal() {
        let aabb = Aabb::from_points(Vec3::new(2.0, 2.0, 2.0), Vec3::new(3.0, 3.0, 3.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.hit(&ray, Interval::new(0.001, f32::INFINITY)));
        assert!(!aabb.hit(&Ray::new(Vec3::ZERO, -Vec3::ONE), Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_aabb_centroid_and_longest_axis() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 10.0, 4.0));

        assert_eq!(aabb.centroid(), Vec3::new(1.0, 5.0, 2.0));
        assert_eq!(aabb.longest_axis(), 1);
        assert_eq!(Aabb::from_points(Vec3::ZERO, Vec3::new(10.0, 1.0, 1.0)).longest_axis(), 0);
        assert_eq!(Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 1.0, 10.0)).longest_axis(), 2);
    }
}
