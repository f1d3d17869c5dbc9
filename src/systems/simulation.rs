//! Simulation system
//!
//! Applies input actions to the shape model:
//! - Vertex drags and keyboard steps → grid-snapped proposals
//! - Side drags → atomic two-vertex moves
//! - Tangible readings → smoothed four-vertex moves
//! - Mode switches → tolerance scaling and reduced-step grid

use quadrilateral_core::{Blocked, InputMode, ShapeModel, VertexLabel};
use quadrilateral_input::{TangibleAdapter, VertexController};

use crate::input::InputAction;

/// Result of applying one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationResult {
    /// The action was applied
    Applied,
    /// The model refused a proposed move
    Rejected { vertex: VertexLabel, blocked: Blocked },
    /// The action carried nothing usable
    Ignored,
    Show,
    Dump,
    Help,
    Exit,
}

/// Routes input actions through the controllers into the model
pub struct SimulationSystem {
    controller: VertexController,
    tangible: TangibleAdapter,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new(controller: VertexController, tangible: TangibleAdapter) -> Self {
        Self { controller, tangible }
    }

    pub fn controller(&self) -> &VertexController {
        &self.controller
    }

    pub fn tangible(&self) -> &TangibleAdapter {
        &self.tangible
    }

    /// Switch input mode on the model and the controllers together
    pub fn set_mode(&mut self, model: &mut ShapeModel, mode: InputMode) {
        model.set_input_mode(mode);
        self.controller.set_reduced_step(mode == InputMode::ReducedStep);
        if mode != InputMode::Device {
            self.tangible.reset();
        }
    }

    /// Apply one action
    pub fn apply(&mut self, model: &mut ShapeModel, action: &InputAction) -> SimulationResult {
        match *action {
            InputAction::MoveVertex { vertex, position } => {
                let proposed = self.controller.drag_position(position);
                let accepted = model.set_vertex_position_if_valid(vertex, proposed);
                Self::outcome(model, vertex, accepted)
            }
            InputAction::StepVertex { vertex, direction } => {
                let current = model.vertex(vertex).position();
                let proposed = self.controller.step_position(current, direction);
                let accepted = model.set_vertex_position_if_valid(vertex, proposed);
                Self::outcome(model, vertex, accepted)
            }
            InputAction::MoveSide { side, delta } => {
                let delta = self.controller.drag_position(delta);
                let accepted = model.move_side_if_valid(side, delta);
                Self::outcome(model, side.vertices().0, accepted)
            }
            InputAction::Press(vertex) => {
                model.set_vertex_pressed(vertex, true);
                SimulationResult::Applied
            }
            InputAction::Release(vertex) => {
                model.set_vertex_pressed(vertex, false);
                SimulationResult::Applied
            }
            InputAction::SetMode(mode) => {
                self.set_mode(model, mode);
                SimulationResult::Applied
            }
            InputAction::Measure(measurements) => {
                if model.input_mode() != InputMode::Device {
                    log::info!("Tangible reading received, switching to device mode");
                    self.set_mode(model, InputMode::Device);
                }
                match self.tangible.process(&measurements) {
                    Some(positions) => {
                        let accepted = model.set_all_vertex_positions_if_valid(positions);
                        Self::outcome(model, VertexLabel::A, accepted)
                    }
                    None => SimulationResult::Ignored,
                }
            }
            InputAction::Reset => {
                model.reset();
                self.controller.set_reduced_step(false);
                self.tangible.reset();
                SimulationResult::Applied
            }
            InputAction::Show => SimulationResult::Show,
            InputAction::Dump => SimulationResult::Dump,
            InputAction::Help => SimulationResult::Help,
            InputAction::Exit => SimulationResult::Exit,
        }
    }

    fn outcome(model: &ShapeModel, vertex: VertexLabel, accepted: bool) -> SimulationResult {
        if accepted {
            return SimulationResult::Applied;
        }
        let blocked = if model.vertex(vertex).is_blocked_by_bounds() {
            Blocked::Bounds
        } else {
            Blocked::Shape
        };
        SimulationResult::Rejected { vertex, blocked }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(VertexController::new(), TangibleAdapter::new(0.05, 5))
    }
}
