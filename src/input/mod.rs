//! Input handling module
//!
//! Provides input mapping from command lines to semantic actions.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction, ParseError, HELP};
