//! Scratch shape used to test proposed positions before committing them
//!
//! Testing a move never touches the real model. A `ScratchShape` is built
//! from the four positions under test, derives the same lengths, tilts and
//! angles the model would, and is handed to the validity checks.

use quadrilateral_math::{interior_angle, polygon_area, winding, Segment2, Vec2, Winding};

use crate::labels::{SideLabel, VertexLabel};

/// Positions under test plus the geometry derived from them
#[derive(Clone, Debug, PartialEq)]
pub struct ScratchShape {
    positions: [Vec2; 4],
    lengths: [f64; 4],
    tilts: [f64; 4],
    angles: [f64; 4],
    winding: Winding,
}

impl ScratchShape {
    /// Derive all geometry for the given A, B, C, D positions
    pub fn from_positions(positions: [Vec2; 4]) -> Self {
        let winding = winding(&positions);
        let mut lengths = [0.0; 4];
        let mut tilts = [0.0; 4];
        for side in SideLabel::ALL {
            let segment = side_segment(&positions, side);
            lengths[side.index()] = segment.length();
            tilts[side.index()] = segment.direction().angle();
        }
        let angles = VertexLabel::ALL.map(|v| vertex_angle(&positions, winding, v));
        Self {
            positions,
            lengths,
            tilts,
            angles,
            winding,
        }
    }

    /// Start from `positions` and apply every `(vertex, position)` move
    pub fn with_moves(mut positions: [Vec2; 4], moves: &[(VertexLabel, Vec2)]) -> Self {
        for (label, position) in moves {
            positions[label.index()] = *position;
        }
        Self::from_positions(positions)
    }

    pub fn positions(&self) -> &[Vec2; 4] {
        &self.positions
    }

    pub fn position(&self, vertex: VertexLabel) -> Vec2 {
        self.positions[vertex.index()]
    }

    pub fn length(&self, side: SideLabel) -> f64 {
        self.lengths[side.index()]
    }

    pub fn tilt(&self, side: SideLabel) -> f64 {
        self.tilts[side.index()]
    }

    pub fn angle(&self, vertex: VertexLabel) -> f64 {
        self.angles[vertex.index()]
    }

    pub fn angles(&self) -> &[f64; 4] {
        &self.angles
    }

    pub fn lengths(&self) -> &[f64; 4] {
        &self.lengths
    }

    pub fn winding(&self) -> Winding {
        self.winding
    }

    pub fn segment(&self, side: SideLabel) -> Segment2 {
        side_segment(&self.positions, side)
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.positions)
    }
}

/// Segment for `side` given A, B, C, D positions
pub(crate) fn side_segment(positions: &[Vec2; 4], side: SideLabel) -> Segment2 {
    let (start, end) = side.vertices();
    Segment2::new(positions[start.index()], positions[end.index()])
}

/// Interior angle at `vertex` given A, B, C, D positions
pub(crate) fn vertex_angle(positions: &[Vec2; 4], winding: Winding, vertex: VertexLabel) -> f64 {
    interior_angle(
        positions[vertex.previous().index()],
        positions[vertex.index()],
        positions[vertex.next().index()],
        winding,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    fn square() -> [Vec2; 4] {
        [
            Vec2::new(-0.25, 0.25),
            Vec2::new(0.25, 0.25),
            Vec2::new(0.25, -0.25),
            Vec2::new(-0.25, -0.25),
        ]
    }

    #[test]
    fn test_square_geometry() {
        let shape = ScratchShape::from_positions(square());
        assert_eq!(shape.winding(), Winding::Clockwise);
        for v in VertexLabel::ALL {
            assert!((shape.angle(v) - FRAC_PI_2).abs() < 1e-12);
        }
        for s in SideLabel::ALL {
            assert!((shape.length(s) - 0.5).abs() < 1e-12);
        }
        assert!((shape.area() - 0.25).abs() < 1e-12);
        assert_eq!(shape.tilt(SideLabel::AB), 0.0);
        assert!((shape.tilt(SideLabel::CD) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_with_moves_leaves_input_untouched() {
        let original = square();
        let shape = ScratchShape::with_moves(original, &[(VertexLabel::D, Vec2::ZERO)]);
        assert_eq!(shape.position(VertexLabel::D), Vec2::ZERO);
        assert_eq!(original[3], Vec2::new(-0.25, -0.25));
        assert!((shape.angle(VertexLabel::D) - PI).abs() < 1e-9);
    }

    #[test]
    fn test_angles_sum_to_two_pi() {
        let shape = ScratchShape::from_positions([
            Vec2::new(0.0, 1.0),
            Vec2::new(1.5, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(0.5, 0.5),
        ]);
        let total: f64 = shape.angles().iter().sum();
        assert!((total - TAU).abs() < 1e-9);
        assert!(shape.angle(VertexLabel::D) > PI);
    }
}
