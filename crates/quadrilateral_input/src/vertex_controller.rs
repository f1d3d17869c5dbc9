//! Keyboard and drag input for a single vertex
//!
//! Controls:
//! - Arrow keys: step the selected vertex one grid cell
//! - Shift held: reduced-step mode, a finer grid
//! - Drag: pointer position snapped to the active grid
//!
//! The controller only proposes positions. The shape model decides whether
//! they are accepted.

use quadrilateral_math::Vec2;

/// Direction of a single keyboard step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepDirection {
    Up,
    Down,
    Left,
    Right,
}

impl StepDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Some(StepDirection::Up),
            "down" | "d" => Some(StepDirection::Down),
            "left" | "l" => Some(StepDirection::Left),
            "right" | "r" => Some(StepDirection::Right),
            _ => None,
        }
    }

    /// Unit vector in model space (+y is up)
    pub fn unit(self) -> Vec2 {
        match self {
            StepDirection::Up => Vec2::Y,
            StepDirection::Down => -Vec2::Y,
            StepDirection::Left => -Vec2::X,
            StepDirection::Right => Vec2::X,
        }
    }
}

/// Vertex controller for keyboard steps and pointer drags
#[derive(Clone, Debug, PartialEq)]
pub struct VertexController {
    reduced_step: bool,

    // Configuration
    pub grid_spacing: f64,
    pub reduced_step_spacing: f64,
    pub snap_to_grid: bool,
}

impl Default for VertexController {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexController {
    pub fn new() -> Self {
        Self {
            reduced_step: false,
            grid_spacing: 0.25,
            reduced_step_spacing: 0.0625,
            snap_to_grid: true,
        }
    }

    /// Process the reduced-step modifier (shift)
    pub fn set_reduced_step(&mut self, held: bool) {
        self.reduced_step = held;
    }

    pub fn is_reduced_step(&self) -> bool {
        self.reduced_step
    }

    /// Grid spacing currently in effect
    pub fn active_spacing(&self) -> f64 {
        if self.reduced_step {
            self.reduced_step_spacing
        } else {
            self.grid_spacing
        }
    }

    /// Proposed position one step from `current`
    pub fn step_position(&self, current: Vec2, direction: StepDirection) -> Vec2 {
        let proposed = current + direction.unit() * self.active_spacing();
        self.constrain(proposed)
    }

    /// Proposed position for a pointer at `pointer`
    pub fn drag_position(&self, pointer: Vec2) -> Vec2 {
        self.constrain(pointer)
    }

    fn constrain(&self, position: Vec2) -> Vec2 {
        if self.snap_to_grid {
            snap_to_grid(position, self.active_spacing())
        } else {
            position
        }
    }

    /// Builder: set grid spacing
    pub fn with_grid_spacing(mut self, spacing: f64) -> Self {
        self.grid_spacing = spacing;
        self
    }

    /// Builder: set reduced-step grid spacing
    pub fn with_reduced_step_spacing(mut self, spacing: f64) -> Self {
        self.reduced_step_spacing = spacing;
        self
    }

    /// Builder: enable or disable grid snapping
    pub fn with_snapping(mut self, enabled: bool) -> Self {
        self.snap_to_grid = enabled;
        self
    }
}

/// Round each component to the nearest multiple of `spacing`
///
/// A non-positive or non-finite spacing leaves the position unchanged.
pub fn snap_to_grid(position: Vec2, spacing: f64) -> Vec2 {
    if !(spacing.is_finite() && spacing > 0.0) {
        return position;
    }
    Vec2::new(
        (position.x / spacing).round() * spacing,
        (position.y / spacing).round() * spacing,
    )
}
