//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree of axis-aligned boxes over an immutable set of primitives.
//! Traversal skips every subtree whose box the ray misses, which makes
//! nearest-hit queries sub-linear in scene size.

use crate::{HitRecord, Hittable};
use lumen_math::{Aabb, Interval, Ray};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 2;

/// BVH node - either a branch with two children or a leaf with primitives.
///
/// Every node's box encloses the boxes of everything below it.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf holding one or two primitives directly.
    Leaf {
        objects: Vec<Box<dyn Hittable>>,
        bbox: Aabb,
    },
    /// Tree over no primitives; never hit.
    Empty,
}

impl BvhNode {
    /// Build a BVH over `objects`.
    pub fn new(objects: Vec<Box<dyn Hittable>>) -> Self {
        if objects.is_empty() {
            log::debug!("Built empty BVH");
            return BvhNode::Empty;
        }

        let count = objects.len();
        let root = Self::build(objects);
        log::info!("Built BVH over {} primitives (depth {})", count, root.depth());
        root
    }

    /// Recursive median split along the axis of greatest centroid spread.
    fn build(mut objects: Vec<Box<dyn Hittable>>) -> Self {
        if objects.len() <= LEAF_MAX_SIZE {
            let bbox = objects.iter().fold(Aabb::EMPTY, |acc, obj| {
                Aabb::surrounding(&acc, &obj.bounding_box())
            });
            return BvhNode::Leaf { objects, bbox };
        }

        let centroid_bounds = objects.iter().fold(Aabb::EMPTY, |acc, obj| {
            let c = obj.bounding_box().centroid();
            Aabb::surrounding(&acc, &Aabb::from_points(c, c))
        });
        let axis = centroid_bounds.longest_axis();

        objects.sort_unstable_by(|a, b| {
            let a_val = a.bounding_box().centroid()[axis];
            let b_val = b.bounding_box().centroid()[axis];
            a_val.total_cmp(&b_val)
        });

        let mid = objects.len() / 2;
        let right_objects = objects.split_off(mid);

        let left = Self::build(objects);
        let right = Self::build(right_objects);
        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());

        BvhNode::Branch {
            left: Box::new(left),
            right: Box::new(right),
            bbox,
        }
    }

    /// Number of levels in the tree; 0 for an empty tree.
    pub fn depth(&self) -> usize {
        match self {
            BvhNode::Empty => 0,
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { objects, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let mut closest: Option<HitRecord<'_>> = None;
                for obj in objects {
                    let max = closest.map_or(ray_t.max, |rec| rec.t);
                    if let Some(rec) = obj.hit(ray, ray_t.with_max(max)) {
                        closest = Some(rec);
                    }
                }
                closest
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return None;
                }

                let hit_left = left.hit(ray, ray_t);

                // Only check right up to closest hit
                let right_max = hit_left.map_or(ray_t.max, |rec| rec.t);
                let hit_right = right.hit(ray, ray_t.with_max(right_max));

                hit_right.or(hit_left)
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Leaf { bbox, .. } => *bbox,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}
