// Axis-aligned bounding box collision

use glam::Vec2;

/// Axis-aligned bounding box in world space (y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Create a box from its two corners (order does not matter)
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a box from its bottom-left corner and size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin, origin + size)
    }

    /// Create a box centred on `center`
    pub fn from_center(center: Vec2, half_size: Vec2) -> Self {
        Self::new(center - half_size, center + half_size)
    }

    /// Overlap test. Edges are inclusive: boxes that only touch collide.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_corners() {
        let aabb = Aabb::new(Vec2::new(5.0, 8.0), Vec2::new(1.0, 2.0));
        assert_eq!(aabb.min, Vec2::new(1.0, 2.0));
        assert_eq!(aabb.max, Vec2::new(5.0, 8.0));
    }

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Aabb::from_origin_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::from_origin_size(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = Aabb::from_origin_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::from_origin_size(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_separated_boxes_do_not_intersect() {
        let a = Aabb::from_origin_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let right = Aabb::from_origin_size(Vec2::new(10.5, 0.0), Vec2::new(10.0, 10.0));
        let above = Aabb::from_origin_size(Vec2::new(0.0, 11.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&right));
        assert!(!a.intersects(&above));
    }

    #[test]
    fn test_from_center() {
        let aabb = Aabb::from_center(Vec2::new(35.0, 300.0), Vec2::new(25.0, 21.5));
        assert_eq!(aabb.min, Vec2::new(10.0, 278.5));
        assert_eq!(aabb.max, Vec2::new(60.0, 321.5));
    }
}
