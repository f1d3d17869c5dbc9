//! Validity constraints for proposed vertex positions
//!
//! A shape is allowed when every vertex is inside the model bounds, sides
//! meet the minimum length, opposite sides neither cross nor touch, no
//! vertex crowds a side it doesn't belong to, and every interior angle is
//! at least `min_angle` away from 0 and 2π. A flat angle (π) is allowed;
//! the detector reports it as a triangle.

use std::f64::consts::TAU;
use std::fmt;

use quadrilateral_math::{Bounds2, Vec2};
use serde::{Serialize, Deserialize};

use crate::labels::{SideLabel, VertexLabel, OPPOSITE_SIDE_PAIRS};
use crate::scratch::ScratchShape;

/// Why a proposed shape was rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Blocked {
    /// A vertex would leave the model bounds
    Bounds,
    /// The shape itself would become invalid
    Shape,
}

impl fmt::Display for Blocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blocked::Bounds => write!(f, "vertex would leave the model bounds"),
            Blocked::Shape => write!(f, "shape would become invalid"),
        }
    }
}

impl std::error::Error for Blocked {}

/// Geometric limits every accepted shape satisfies
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeConstraints {
    /// Region every vertex stays inside
    pub bounds: Bounds2,
    /// Shortest allowed side (model units)
    pub min_side_length: f64,
    /// Smallest allowed interior angle (radians); 2π minus this is the largest
    pub min_angle: f64,
    /// Closest a vertex may come to a side it isn't part of (model units)
    pub vertex_clearance: f64,
}

impl Default for ShapeConstraints {
    fn default() -> Self {
        Self {
            bounds: Bounds2::from_center_half_extents(Vec2::ZERO, Vec2::new(2.0, 1.5)),
            min_side_length: 0.1,
            min_angle: 5f64.to_radians(),
            vertex_clearance: 0.05,
        }
    }
}

impl ShapeConstraints {
    /// Run every check against a scratch shape
    ///
    /// Bounds are checked first so a vertex dragged off the edge reports
    /// `Blocked::Bounds` even if the shape would also be invalid.
    pub fn check(&self, shape: &ScratchShape) -> Result<(), Blocked> {
        if !shape.positions().iter().all(|p| self.bounds.contains(*p)) {
            return Err(Blocked::Bounds);
        }
        if self.has_short_side(shape)
            || self.has_crossing_sides(shape)
            || self.has_crowded_vertex(shape)
            || self.has_extreme_angle(shape)
        {
            return Err(Blocked::Shape);
        }
        Ok(())
    }

    fn has_short_side(&self, shape: &ScratchShape) -> bool {
        SideLabel::ALL
            .iter()
            .any(|side| shape.length(*side) < self.min_side_length)
    }

    fn has_crossing_sides(&self, shape: &ScratchShape) -> bool {
        OPPOSITE_SIDE_PAIRS
            .iter()
            .any(|pair| shape.segment(pair.0).intersects(&shape.segment(pair.1)))
    }

    fn has_crowded_vertex(&self, shape: &ScratchShape) -> bool {
        VertexLabel::ALL.iter().any(|vertex| {
            let position = shape.position(*vertex);
            SideLabel::ALL
                .iter()
                .filter(|side| !side.touches(*vertex))
                .any(|side| shape.segment(*side).distance_to_point(position) < self.vertex_clearance)
        })
    }

    fn has_extreme_angle(&self, shape: &ScratchShape) -> bool {
        let max_angle = TAU - self.min_angle;
        shape
            .angles()
            .iter()
            .any(|angle| *angle < self.min_angle || *angle > max_angle)
    }
}
