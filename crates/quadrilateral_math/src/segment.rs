//! Line segments and segment/segment intersection

use crate::Vec2;

/// Orientation values closer to zero than this count as collinear
const COLLINEAR_EPSILON: f64 = 1e-12;

/// A 2D line segment between two points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment2 {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment2 {
    #[inline]
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Vector from start to end
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.direction().length()
    }

    /// Midpoint of the segment
    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        self.start.lerp(self.end, 0.5)
    }

    /// Closest point on the segment to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let d = self.direction();
        let len_sq = d.length_squared();
        if len_sq == 0.0 {
            return self.start;
        }
        let t = ((point - self.start).dot(d) / len_sq).clamp(0.0, 1.0);
        self.start + d * t
    }

    /// Shortest distance from `point` to the segment
    pub fn distance_to_point(&self, point: Vec2) -> f64 {
        self.closest_point(point).distance(point)
    }

    /// Whether two segments share at least one point
    ///
    /// Touching (an endpoint on the other segment) and collinear overlap
    /// both count as intersecting.
    pub fn intersects(&self, other: &Segment2) -> bool {
        let o1 = orientation(self.start, self.end, other.start);
        let o2 = orientation(self.start, self.end, other.end);
        let o3 = orientation(other.start, other.end, self.start);
        let o4 = orientation(other.start, other.end, self.end);

        if o1 * o2 < 0.0 && o3 * o4 < 0.0 {
            return true;
        }

        (o1 == 0.0 && within_box(self.start, self.end, other.start))
            || (o2 == 0.0 && within_box(self.start, self.end, other.end))
            || (o3 == 0.0 && within_box(other.start, other.end, self.start))
            || (o4 == 0.0 && within_box(other.start, other.end, self.end))
    }
}

/// Sign of the turn a -> b -> c: positive for counter-clockwise, negative
/// for clockwise, exactly zero when collinear within tolerance
fn orientation(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    let value = (b - a).cross(c - a);
    if value.abs() <= COLLINEAR_EPSILON {
        0.0
    } else {
        value.signum()
    }
}

/// `p` lies in the bounding box of segment a-b (used for collinear cases)
fn within_box(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) - COLLINEAR_EPSILON
        && p.x <= a.x.max(b.x) + COLLINEAR_EPSILON
        && p.y >= a.y.min(b.y) - COLLINEAR_EPSILON
        && p.y <= a.y.max(b.y) + COLLINEAR_EPSILON
}
