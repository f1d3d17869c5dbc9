//! Side entity

use quadrilateral_math::{Segment2, Vec2};

use crate::labels::{SideLabel, VertexLabel};

/// One edge of the quadrilateral
///
/// A side refers to its two vertices by label; positions live on the
/// vertices and the model refreshes `length` and `tilt` whenever either
/// endpoint moves.
#[derive(Clone, Debug, PartialEq)]
pub struct Side {
    label: SideLabel,
    length: f64,
    /// Direction of end - start relative to +x, in (-π, π]
    tilt: f64,
}

impl Side {
    pub(crate) fn new(label: SideLabel) -> Self {
        Self {
            label,
            length: 0.0,
            tilt: 0.0,
        }
    }

    #[inline]
    pub fn label(&self) -> SideLabel {
        self.label
    }

    /// (start, end) vertices
    #[inline]
    pub fn vertices(&self) -> (VertexLabel, VertexLabel) {
        self.label.vertices()
    }

    #[inline]
    pub fn opposite(&self) -> SideLabel {
        self.label.opposite()
    }

    #[inline]
    pub fn adjacent(&self) -> [SideLabel; 2] {
        self.label.adjacent()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    #[inline]
    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    /// Recompute length and tilt from the endpoint positions
    pub(crate) fn update(&mut self, start: Vec2, end: Vec2) {
        let segment = Segment2::new(start, end);
        self.length = segment.length();
        self.tilt = segment.direction().angle();
    }
}
