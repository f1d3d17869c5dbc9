//! 2D Mathematics Library
//!
//! This crate provides the planar vector, bounds, segment and angle types
//! used by the quadrilateral shape model.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components
//! - [`Bounds2`] - Axis-aligned rectangle
//! - [`Segment2`] - Line segment with intersection and distance queries
//!
//! ## Angle Helpers
//!
//! - [`interior_angle`] - Interior angle at a polygon vertex
//! - [`line_direction_difference`] - Direction difference ignoring orientation
//! - [`Winding`] - Polygon orientation

mod vec2;
pub mod angle;
pub mod bounds;
pub mod segment;

pub use vec2::Vec2;
pub use angle::{
    equals_epsilon, interior_angle, line_direction_difference, normalize_angle, polygon_area,
    signed_area, winding, Winding,
};
pub use bounds::Bounds2;
pub use segment::Segment2;
