//! Axis-aligned rectangular bounds

use serde::{Serialize, Deserialize};

use crate::Vec2;

/// A 2D axis-aligned bounding rectangle
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds2 {
    /// Minimum corner (bottom-left)
    pub min: Vec2,
    /// Maximum corner (top-right)
    pub max: Vec2,
}

impl Bounds2 {
    /// Create new bounds from min and max corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create bounds centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty slice
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min_components(*p), max.max_components(*p)));
        Some(Self { min, max })
    }

    /// Get the center of the bounds
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get the full size in each dimension
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// True when min <= max on both axes
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.x <= self.max.x && self.min.y <= self.max.y
    }

    /// Check if a point is inside or on the bounds
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if another bounds lies entirely inside (or on) this one
    pub fn contains_bounds(&self, other: &Bounds2) -> bool {
        self.contains(other.min) && self.contains(other.max)
    }

    /// Get the closest point inside or on the bounds to a given point
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp_components(self.min, self.max)
    }

    /// Translate the bounds by a delta
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let b = Bounds2::from_center_half_extents(Vec2::ZERO, Vec2::new(2.0, 1.5));
        assert!(b.contains(Vec2::new(2.0, -1.5)));
        assert!(b.contains(Vec2::ZERO));
        assert!(!b.contains(Vec2::new(2.01, 0.0)));
        assert!(!b.contains(Vec2::new(0.0, -1.6)));
    }

    #[test]
    fn test_from_points() {
        let pts = [Vec2::new(1.0, -1.0), Vec2::new(-0.5, 2.0), Vec2::new(0.0, 0.0)];
        let b = Bounds2::from_points(&pts).unwrap();
        assert_eq!(b.min, Vec2::new(-0.5, -1.0));
        assert_eq!(b.max, Vec2::new(1.0, 2.0));
        assert!(Bounds2::from_points(&[]).is_none());
    }

    #[test]
    fn test_contains_bounds() {
        let outer = Bounds2::new(Vec2::new(-2.0, -2.0), Vec2::new(2.0, 2.0));
        let inner = Bounds2::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        assert!(outer.contains_bounds(&inner));
        assert!(!inner.contains_bounds(&outer));
        assert!(!outer.contains_bounds(&inner.translated(Vec2::new(1.5, 0.0))));
    }

    #[test]
    fn test_closest_point() {
        let b = Bounds2::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        assert_eq!(b.closest_point(Vec2::new(3.0, 0.5)), Vec2::new(1.0, 0.5));
    }

    #[test]
    fn test_size_and_center() {
        let b = Bounds2::new(Vec2::new(-1.0, 0.0), Vec2::new(3.0, 2.0));
        assert_eq!(b.size(), Vec2::new(4.0, 2.0));
        assert_eq!(b.center(), Vec2::new(1.0, 1.0));
        assert_eq!(b.width(), 4.0);
        assert_eq!(b.height(), 2.0);
        assert!(b.is_valid());
        assert!(!Bounds2::new(Vec2::new(1.0, 0.0), Vec2::ZERO).is_valid());
    }
}
