//! Application systems
//!
//! Modular systems extracted from main.rs for better organization and testability.

pub mod report;
mod simulation;

pub use simulation::{SimulationResult, SimulationSystem};
