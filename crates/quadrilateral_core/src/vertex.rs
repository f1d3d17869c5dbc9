//! Vertex entity
//!
//! A vertex is one movable corner of the quadrilateral. Its position is
//! written only through the owning [`ShapeModel`](crate::ShapeModel), which
//! also keeps the cached interior angle current.

use bitflags::bitflags;
use quadrilateral_math::Vec2;
use serde::{Serialize, Deserialize};

use crate::labels::{SideLabel, VertexLabel};

bitflags! {
    /// Interaction state a view layer reads to give feedback
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct VertexInteraction: u8 {
        /// Being dragged or otherwise held by the user
        const PRESSED = 1 << 0;
        /// Last proposed move was rejected by the shape constraints
        const BLOCKED_BY_SHAPE = 1 << 1;
        /// Last proposed move was rejected by the model bounds
        const BLOCKED_BY_BOUNDS = 1 << 2;
        const BLOCKED = Self::BLOCKED_BY_SHAPE.bits() | Self::BLOCKED_BY_BOUNDS.bits();
    }
}

/// One labeled corner of the quadrilateral
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    label: VertexLabel,
    position: Vec2,
    /// Interior angle in radians, in (0, 2π)
    angle: f64,
    interaction: VertexInteraction,
}

impl Vertex {
    pub(crate) fn new(label: VertexLabel, position: Vec2) -> Self {
        Self {
            label,
            position,
            angle: 0.0,
            interaction: VertexInteraction::empty(),
        }
    }

    #[inline]
    pub fn label(&self) -> VertexLabel {
        self.label
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Interior angle in radians; above π means the shape is concave here
    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// The two sides meeting at this vertex
    #[inline]
    pub fn sides(&self) -> [SideLabel; 2] {
        self.label.sides()
    }

    #[inline]
    pub fn interaction(&self) -> VertexInteraction {
        self.interaction
    }

    pub fn is_pressed(&self) -> bool {
        self.interaction.contains(VertexInteraction::PRESSED)
    }

    pub fn is_blocked_by_shape(&self) -> bool {
        self.interaction.contains(VertexInteraction::BLOCKED_BY_SHAPE)
    }

    pub fn is_blocked_by_bounds(&self) -> bool {
        self.interaction.contains(VertexInteraction::BLOCKED_BY_BOUNDS)
    }

    pub(crate) fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub(crate) fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    pub(crate) fn set_interaction(&mut self, flag: VertexInteraction, value: bool) {
        self.interaction.set(flag, value);
    }

    pub(crate) fn clear_interaction(&mut self) {
        self.interaction = VertexInteraction::empty();
    }
}
