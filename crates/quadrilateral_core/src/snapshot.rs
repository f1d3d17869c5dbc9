//! Immutable captures of the shape state and comparisons between them

use quadrilateral_math::Vec2;
use serde::{Serialize, Deserialize};

use crate::detector::{QuadrilateralProperties, ShapeConditions};
use crate::labels::{SideLabel, SidePair, VertexLabel, VertexPair};
use crate::named::NamedQuadrilateral;
use crate::tolerance::Tolerances;

/// Every derived value of a shape model at one instant
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub positions: [Vec2; 4],
    pub angles: [f64; 4],
    pub lengths: [f64; 4],
    pub tilts: [f64; 4],
    pub parallel_side_pairs: Vec<SidePair>,
    pub equal_adjacent_side_pairs: Vec<SidePair>,
    pub equal_opposite_side_pairs: Vec<SidePair>,
    pub equal_adjacent_angle_pairs: Vec<VertexPair>,
    pub equal_opposite_angle_pairs: Vec<VertexPair>,
    pub has_flat_angle: bool,
    pub is_concave: bool,
    pub is_parallelogram: bool,
    pub all_angles_right: bool,
    pub all_lengths_equal: bool,
    pub area: f64,
    pub conditions: ShapeConditions,
    pub shape_name: NamedQuadrilateral,
}

impl ShapeSnapshot {
    pub fn position(&self, vertex: VertexLabel) -> Vec2 {
        self.positions[vertex.index()]
    }

    pub fn angle(&self, vertex: VertexLabel) -> f64 {
        self.angles[vertex.index()]
    }

    pub fn length(&self, side: SideLabel) -> f64 {
        self.lengths[side.index()]
    }

    pub fn tilt(&self, side: SideLabel) -> f64 {
        self.tilts[side.index()]
    }

    /// What changed going from `previous` to `self`
    ///
    /// Positions must match exactly to count as unmoved; lengths and angles
    /// are compared with `tolerances`.
    pub fn delta(&self, previous: &ShapeSnapshot, tolerances: &Tolerances) -> SnapshotDelta {
        let moved_vertices = VertexLabel::ALL
            .into_iter()
            .filter(|v| self.position(*v) != previous.position(*v))
            .collect();
        let changed_lengths = SideLabel::ALL
            .into_iter()
            .filter(|s| !tolerances.lengths_equal(self.length(*s), previous.length(*s)))
            .collect();
        let changed_angles = VertexLabel::ALL
            .into_iter()
            .filter(|v| !tolerances.angles_equal(self.angle(*v), previous.angle(*v)))
            .collect();

        SnapshotDelta {
            moved_vertices,
            changed_lengths,
            changed_angles,
            parallel_pairs_changed: self.parallel_side_pairs != previous.parallel_side_pairs,
            equalities_changed: self.equal_adjacent_side_pairs != previous.equal_adjacent_side_pairs
                || self.equal_opposite_side_pairs != previous.equal_opposite_side_pairs
                || self.equal_adjacent_angle_pairs != previous.equal_adjacent_angle_pairs
                || self.equal_opposite_angle_pairs != previous.equal_opposite_angle_pairs,
            conditions_changed: self.conditions != previous.conditions,
            previous_name: previous.shape_name,
            shape_name: self.shape_name,
            was_parallelogram: previous.is_parallelogram,
            is_parallelogram: self.is_parallelogram,
        }
    }
}

impl QuadrilateralProperties for ShapeSnapshot {
    fn has_flat_angle(&self) -> bool {
        self.has_flat_angle
    }

    fn is_concave(&self) -> bool {
        self.is_concave
    }

    fn parallel_side_pairs(&self) -> &[SidePair] {
        &self.parallel_side_pairs
    }

    fn equal_adjacent_angle_pairs(&self) -> &[VertexPair] {
        &self.equal_adjacent_angle_pairs
    }

    fn equal_opposite_angle_pairs(&self) -> &[VertexPair] {
        &self.equal_opposite_angle_pairs
    }

    fn equal_adjacent_side_pairs(&self) -> &[SidePair] {
        &self.equal_adjacent_side_pairs
    }

    fn equal_opposite_side_pairs(&self) -> &[SidePair] {
        &self.equal_opposite_side_pairs
    }

    fn all_angles_right(&self) -> bool {
        self.all_angles_right
    }

    fn all_lengths_equal(&self) -> bool {
        self.all_lengths_equal
    }
}

/// Differences between two snapshots
#[derive(Clone, Debug, PartialEq)]
pub struct SnapshotDelta {
    pub moved_vertices: Vec<VertexLabel>,
    pub changed_lengths: Vec<SideLabel>,
    pub changed_angles: Vec<VertexLabel>,
    pub parallel_pairs_changed: bool,
    /// Any equal-length or equal-angle pair list differs
    pub equalities_changed: bool,
    pub conditions_changed: bool,
    pub previous_name: NamedQuadrilateral,
    pub shape_name: NamedQuadrilateral,
    pub was_parallelogram: bool,
    pub is_parallelogram: bool,
}

impl SnapshotDelta {
    /// Nothing moved and no derived property differs
    pub fn is_empty(&self) -> bool {
        self.moved_vertices.is_empty()
            && self.changed_lengths.is_empty()
            && self.changed_angles.is_empty()
            && !self.parallel_pairs_changed
            && !self.equalities_changed
            && !self.conditions_changed
            && !self.name_changed()
    }

    pub fn name_changed(&self) -> bool {
        self.previous_name != self.shape_name
    }

    pub fn lengths_changed(&self) -> bool {
        !self.changed_lengths.is_empty()
    }

    pub fn angles_changed(&self) -> bool {
        !self.changed_angles.is_empty()
    }

    /// The shape moved but stayed a parallelogram with the same side lengths
    ///
    /// This is the "shear" a learner produces by pushing a parallelogram over.
    pub fn is_parallelogram_shear(&self) -> bool {
        self.was_parallelogram
            && self.is_parallelogram
            && !self.lengths_changed()
            && self.angles_changed()
    }
}
