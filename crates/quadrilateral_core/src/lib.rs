//! Core quadrilateral model
//!
//! This crate provides the learner-manipulated quadrilateral:
//! - [`ShapeModel`]: four vertices, four sides, validated moves and derived relationships
//! - [`ShapeConstraints`]: bounds and validity rules checked against a [`ScratchShape`]
//! - [`ShapeDetector`]: condition-bitmask classification into a [`NamedQuadrilateral`]
//! - [`ShapeSnapshot`]: serializable captures for comparison and reporting

pub mod constraints;
pub mod detector;
pub mod events;
pub mod labels;
pub mod named;
pub mod scratch;
pub mod shape_model;
pub mod side;
pub mod snapshot;
pub mod tolerance;
pub mod vertex;

pub use constraints::{Blocked, ShapeConstraints};
pub use detector::{QuadrilateralProperties, ShapeConditions, ShapeDetector};
pub use events::{ChangeListener, ShapeChangeEvent, ShapeChanges};
pub use labels::{
    SideLabel, SidePair, VertexLabel, VertexPair, ADJACENT_SIDE_PAIRS, ADJACENT_VERTEX_PAIRS,
    OPPOSITE_SIDE_PAIRS, OPPOSITE_VERTEX_PAIRS,
};
pub use named::NamedQuadrilateral;
pub use scratch::ScratchShape;
pub use shape_model::{ShapeModel, ShapeModelConfig, ShapeModelError, DEFAULT_POSITIONS};
pub use side::Side;
pub use snapshot::{ShapeSnapshot, SnapshotDelta};
pub use tolerance::{InputMode, ToleranceError, ToleranceIntervals, Tolerances};
pub use vertex::{Vertex, VertexInteraction};

pub use quadrilateral_math::{Bounds2, Vec2};
