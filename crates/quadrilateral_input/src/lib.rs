//! Quadrilateral input handling
//!
//! This crate turns raw input into proposed vertex positions:
//! - [`VertexController`]: keyboard steps and drags on a snapping grid
//! - [`TangibleAdapter`]: side/angle measurements from a physical device

mod tangible;
mod vertex_controller;

pub use tangible::{positions_from_measurements, PositionSmoother, TangibleAdapter, TangibleMeasurements};
pub use vertex_controller::{snap_to_grid, StepDirection, VertexController};
