//! Change notification for shape models
//!
//! Listeners are called once per completed update batch, never per
//! individual vertex write, so observers don't see transient shapes.

use bitflags::bitflags;

use crate::named::NamedQuadrilateral;
use crate::snapshot::{ShapeSnapshot, SnapshotDelta};

bitflags! {
    /// Which parts of the shape changed in an update batch
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ShapeChanges: u8 {
        /// At least one vertex moved
        const POSITIONS = 1 << 0;
        /// At least one side length changed beyond tolerance
        const LENGTHS = 1 << 1;
        /// At least one vertex angle changed beyond tolerance
        const ANGLES = 1 << 2;
        /// The set of parallel side pairs changed
        const PARALLELISM = 1 << 3;
        /// The detected shape name changed
        const SHAPE_NAME = 1 << 4;
        /// An equal-length or equal-angle pair appeared or went away
        const EQUALITIES = 1 << 5;
        /// The condition mask changed
        const CONDITIONS = 1 << 6;
        const ALL = Self::POSITIONS.bits()
            | Self::LENGTHS.bits()
            | Self::ANGLES.bits()
            | Self::PARALLELISM.bits()
            | Self::SHAPE_NAME.bits()
            | Self::EQUALITIES.bits()
            | Self::CONDITIONS.bits();
    }
}

impl From<&SnapshotDelta> for ShapeChanges {
    fn from(delta: &SnapshotDelta) -> Self {
        let mut changes = ShapeChanges::empty();
        changes.set(ShapeChanges::POSITIONS, !delta.moved_vertices.is_empty());
        changes.set(ShapeChanges::LENGTHS, delta.lengths_changed());
        changes.set(ShapeChanges::ANGLES, delta.angles_changed());
        changes.set(ShapeChanges::PARALLELISM, delta.parallel_pairs_changed);
        changes.set(ShapeChanges::SHAPE_NAME, delta.name_changed());
        changes.set(ShapeChanges::EQUALITIES, delta.equalities_changed);
        changes.set(ShapeChanges::CONDITIONS, delta.conditions_changed);
        changes
    }
}

/// Payload handed to change listeners
#[derive(Debug)]
pub struct ShapeChangeEvent<'a> {
    pub changes: ShapeChanges,
    pub previous_name: NamedQuadrilateral,
    pub snapshot: &'a ShapeSnapshot,
    pub delta: &'a SnapshotDelta,
}

impl ShapeChangeEvent<'_> {
    pub fn shape_name(&self) -> NamedQuadrilateral {
        self.snapshot.shape_name
    }
}

/// Boxed change listener
pub type ChangeListener = Box<dyn FnMut(&ShapeChangeEvent<'_>)>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::{SideLabel, VertexLabel};

    fn delta() -> SnapshotDelta {
        SnapshotDelta {
            moved_vertices: Vec::new(),
            changed_lengths: Vec::new(),
            changed_angles: Vec::new(),
            parallel_pairs_changed: false,
            equalities_changed: false,
            conditions_changed: false,
            previous_name: NamedQuadrilateral::Square,
            shape_name: NamedQuadrilateral::Square,
            was_parallelogram: true,
            is_parallelogram: true,
        }
    }

    #[test]
    fn test_empty_delta_no_changes() {
        assert_eq!(ShapeChanges::from(&delta()), ShapeChanges::empty());
    }

    #[test]
    fn test_changes_from_delta() {
        let mut d = delta();
        d.moved_vertices.push(VertexLabel::B);
        d.changed_lengths.push(SideLabel::AB);
        d.shape_name = NamedQuadrilateral::Kite;
        let changes = ShapeChanges::from(&d);
        assert!(changes.contains(ShapeChanges::POSITIONS | ShapeChanges::LENGTHS));
        assert!(changes.contains(ShapeChanges::SHAPE_NAME));
        assert!(!changes.contains(ShapeChanges::ANGLES));
    }

    #[test]
    fn test_equalities_and_conditions_flagged() {
        let mut d = delta();
        d.equalities_changed = true;
        d.conditions_changed = true;
        assert_eq!(
            ShapeChanges::from(&d),
            ShapeChanges::EQUALITIES | ShapeChanges::CONDITIONS
        );
    }
}
