//! Angle helpers: normalization, tolerance comparison, polygon winding
//! and interior angles

use std::f64::consts::{PI, TAU};

use serde::{Serialize, Deserialize};

use crate::Vec2;

/// Wrap an angle into `[0, 2π)`
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// `|a - b| <= epsilon`
#[inline]
pub fn equals_epsilon(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() <= epsilon
}

/// Smallest difference between two line directions, ignoring orientation
///
/// Directions `t` and `t + π` describe the same line, so the result is in
/// `[0, π/2]`.
#[inline]
pub fn line_direction_difference(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(PI);
    d.min(PI - d)
}

/// Rotational direction of a closed polygon
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Shoelace signed area; positive for counter-clockwise polygons
pub fn signed_area(points: &[Vec2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| points[i].cross(points[(i + 1) % n]))
        .sum();
    twice * 0.5
}

/// Unsigned polygon area
#[inline]
pub fn polygon_area(points: &[Vec2]) -> f64 {
    signed_area(points).abs()
}

/// Winding of a polygon; degenerate (zero area) polygons report counter-clockwise
pub fn winding(points: &[Vec2]) -> Winding {
    if signed_area(points) < 0.0 {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    }
}

/// Interior angle at `vertex` of a simple polygon, in `[0, 2π)`
///
/// `previous` and `next` are the neighbouring vertices in polygon order and
/// `winding` is the winding of the whole polygon. Angles above π are reflex.
pub fn interior_angle(previous: Vec2, vertex: Vec2, next: Vec2, winding: Winding) -> f64 {
    let to_previous = (previous - vertex).angle();
    let to_next = (next - vertex).angle();
    match winding {
        Winding::CounterClockwise => normalize_angle(to_previous - to_next),
        Winding::Clockwise => normalize_angle(to_next - to_previous),
    }
}
