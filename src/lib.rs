//! Quadrilateral explorer application
//!
//! Layered configuration, command mapping and the systems that drive a
//! [`quadrilateral_core::ShapeModel`] from text input.

pub mod config;
pub mod input;
pub mod systems;
