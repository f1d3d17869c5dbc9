//! Shape detection by condition bitmask
//!
//! Each geometric condition is one bit. The detector ORs together every
//! condition a shape satisfies, then walks a fixed list of named shapes
//! from least to most specific and keeps the last one whose requirement
//! mask is a subset of the current conditions. The masks nest (square ⊇
//! rhombus ⊇ parallelogram ⊇ trapezoid), so the last match is the most
//! specific name.

use bitflags::bitflags;
use serde::{Serialize, Deserialize};

use crate::labels::{SidePair, VertexPair};
use crate::named::NamedQuadrilateral;

bitflags! {
    /// Atomic geometric conditions a quadrilateral can satisfy
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ShapeConditions: u16 {
        const CONCAVE = 1 << 0;
        const ONE_PARALLEL_PAIR = 1 << 1;
        const TWO_PARALLEL_PAIRS = 1 << 2;
        const TWO_EQUAL_ADJACENT_ANGLE_PAIRS = 1 << 3;
        const ONE_EQUAL_OPPOSITE_ANGLE_PAIR = 1 << 4;
        const TWO_EQUAL_OPPOSITE_ANGLE_PAIRS = 1 << 5;
        /// Every angle is a right angle
        const ALL_EQUAL_ANGLES = 1 << 6;
        const TWO_EQUAL_ADJACENT_SIDE_PAIRS = 1 << 7;
        const ONE_EQUAL_OPPOSITE_SIDE_PAIR = 1 << 8;
        const TWO_EQUAL_OPPOSITE_SIDE_PAIRS = 1 << 9;
        const ALL_EQUAL_SIDES = 1 << 10;
        /// One angle is π; the shape has collapsed to a triangle
        const FLAT_ANGLE = 1 << 11;
    }
}

impl ShapeConditions {
    pub const CONCAVE_MASK: Self = Self::CONCAVE;

    pub const DART_MASK: Self = Self::from_bits_retain(
        Self::CONCAVE.bits()
            | Self::TWO_EQUAL_ADJACENT_SIDE_PAIRS.bits()
            | Self::ONE_EQUAL_OPPOSITE_ANGLE_PAIR.bits(),
    );

    pub const TRAPEZOID_MASK: Self = Self::ONE_PARALLEL_PAIR;

    pub const ISOSCELES_TRAPEZOID_MASK: Self = Self::from_bits_retain(
        Self::TRAPEZOID_MASK.bits()
            | Self::ONE_EQUAL_OPPOSITE_SIDE_PAIR.bits()
            | Self::TWO_EQUAL_ADJACENT_ANGLE_PAIRS.bits(),
    );

    pub const KITE_MASK: Self = Self::from_bits_retain(
        Self::TWO_EQUAL_ADJACENT_SIDE_PAIRS.bits() | Self::ONE_EQUAL_OPPOSITE_ANGLE_PAIR.bits(),
    );

    pub const PARALLELOGRAM_MASK: Self = Self::from_bits_retain(
        Self::ONE_PARALLEL_PAIR.bits()
            | Self::TWO_PARALLEL_PAIRS.bits()
            | Self::ONE_EQUAL_OPPOSITE_ANGLE_PAIR.bits()
            | Self::TWO_EQUAL_OPPOSITE_ANGLE_PAIRS.bits()
            | Self::ONE_EQUAL_OPPOSITE_SIDE_PAIR.bits()
            | Self::TWO_EQUAL_OPPOSITE_SIDE_PAIRS.bits(),
    );

    pub const RECTANGLE_MASK: Self = Self::from_bits_retain(
        Self::PARALLELOGRAM_MASK.bits()
            | Self::TWO_EQUAL_ADJACENT_ANGLE_PAIRS.bits()
            | Self::ALL_EQUAL_ANGLES.bits(),
    );

    pub const RHOMBUS_MASK: Self = Self::from_bits_retain(
        Self::PARALLELOGRAM_MASK.bits() | Self::KITE_MASK.bits() | Self::ALL_EQUAL_SIDES.bits(),
    );

    pub const SQUARE_MASK: Self =
        Self::from_bits_retain(Self::RECTANGLE_MASK.bits() | Self::RHOMBUS_MASK.bits());
}

/// Names checked for concave shapes, least to most specific
const CONCAVE_SEQUENCE: [NamedQuadrilateral; 2] = [
    NamedQuadrilateral::ConcaveQuadrilateral,
    NamedQuadrilateral::Dart,
];

/// Names checked for convex shapes, least to most specific
const CONVEX_SEQUENCE: [NamedQuadrilateral; 8] = [
    NamedQuadrilateral::ConvexQuadrilateral,
    NamedQuadrilateral::Trapezoid,
    NamedQuadrilateral::IsoscelesTrapezoid,
    NamedQuadrilateral::Kite,
    NamedQuadrilateral::Parallelogram,
    NamedQuadrilateral::Rectangle,
    NamedQuadrilateral::Rhombus,
    NamedQuadrilateral::Square,
];

/// Derived relationships a detector needs from a quadrilateral
///
/// Implemented by the live [`ShapeModel`](crate::ShapeModel) and by
/// [`ShapeSnapshot`](crate::ShapeSnapshot), so captured states can be
/// reclassified without a model.
pub trait QuadrilateralProperties {
    /// Some vertex angle equals π within the static tolerance
    fn has_flat_angle(&self) -> bool;
    /// Some vertex angle is reflex (and not flat)
    fn is_concave(&self) -> bool;
    fn parallel_side_pairs(&self) -> &[SidePair];
    fn equal_adjacent_angle_pairs(&self) -> &[VertexPair];
    fn equal_opposite_angle_pairs(&self) -> &[VertexPair];
    fn equal_adjacent_side_pairs(&self) -> &[SidePair];
    fn equal_opposite_side_pairs(&self) -> &[SidePair];
    fn all_angles_right(&self) -> bool;
    fn all_lengths_equal(&self) -> bool;
}

/// Stateless classifier
pub struct ShapeDetector;

impl ShapeDetector {
    /// Condition mask for a quadrilateral's current derived properties
    pub fn conditions<P: QuadrilateralProperties + ?Sized>(shape: &P) -> ShapeConditions {
        let mut conditions = ShapeConditions::empty();

        conditions.set(ShapeConditions::FLAT_ANGLE, shape.has_flat_angle());
        conditions.set(ShapeConditions::CONCAVE, shape.is_concave());

        let parallel = shape.parallel_side_pairs().len();
        conditions.set(ShapeConditions::ONE_PARALLEL_PAIR, parallel >= 1);
        conditions.set(ShapeConditions::TWO_PARALLEL_PAIRS, parallel >= 2);

        conditions.set(
            ShapeConditions::TWO_EQUAL_ADJACENT_ANGLE_PAIRS,
            shape.equal_adjacent_angle_pairs().len() >= 2,
        );
        let opposite_angles = shape.equal_opposite_angle_pairs().len();
        conditions.set(ShapeConditions::ONE_EQUAL_OPPOSITE_ANGLE_PAIR, opposite_angles >= 1);
        conditions.set(ShapeConditions::TWO_EQUAL_OPPOSITE_ANGLE_PAIRS, opposite_angles >= 2);
        conditions.set(ShapeConditions::ALL_EQUAL_ANGLES, shape.all_angles_right());

        conditions.set(
            ShapeConditions::TWO_EQUAL_ADJACENT_SIDE_PAIRS,
            shape.equal_adjacent_side_pairs().len() >= 2,
        );
        let opposite_sides = shape.equal_opposite_side_pairs().len();
        conditions.set(ShapeConditions::ONE_EQUAL_OPPOSITE_SIDE_PAIR, opposite_sides >= 1);
        conditions.set(ShapeConditions::TWO_EQUAL_OPPOSITE_SIDE_PAIRS, opposite_sides >= 2);
        conditions.set(ShapeConditions::ALL_EQUAL_SIDES, shape.all_lengths_equal());

        conditions
    }

    /// Most specific name for a quadrilateral's current derived properties
    pub fn detect<P: QuadrilateralProperties + ?Sized>(shape: &P) -> NamedQuadrilateral {
        Self::classify(Self::conditions(shape))
    }

    /// Most specific name for a condition mask
    pub fn classify(conditions: ShapeConditions) -> NamedQuadrilateral {
        match Self::try_classify(conditions) {
            Some(shape) => shape,
            None => {
                debug_assert!(false, "no named shape matched conditions {:?}", conditions);
                log::error!("No named shape matched conditions {:?}, falling back", conditions);
                NamedQuadrilateral::ConvexQuadrilateral
            }
        }
    }

    /// Most specific name for a condition mask, or None if no mask matches
    pub fn try_classify(conditions: ShapeConditions) -> Option<NamedQuadrilateral> {
        // A flat angle overrides everything else
        if conditions.contains(ShapeConditions::FLAT_ANGLE) {
            return Some(NamedQuadrilateral::Triangle);
        }

        let sequence: &[NamedQuadrilateral] = if conditions.contains(ShapeConditions::CONCAVE) {
            &CONCAVE_SEQUENCE
        } else {
            &CONVEX_SEQUENCE
        };

        sequence
            .iter()
            .filter(|shape| conditions.contains(shape.requirement_mask()))
            .last()
            .copied()
    }
}
