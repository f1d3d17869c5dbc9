//! Shape model: the single source of truth for one quadrilateral
//!
//! The model owns four [`Vertex`] and four [`Side`] entities, validates
//! every proposed move against a [`ScratchShape`] before committing it,
//! and recomputes derived relationships in dependency order:
//!
//! 1. side lengths and tilts
//! 2. vertex angles
//! 3. parallel side pairs
//! 4. equal-length side pairs
//! 5. equal-angle vertex pairs
//! 6. aggregates (flat, concave, right angles, equal lengths, parallelogram, area)
//! 7. condition mask and shape name
//!
//! Change listeners fire once at the end of each batch.

use std::fmt;

use quadrilateral_math::{polygon_area, winding, Vec2};

use crate::constraints::{Blocked, ShapeConstraints};
use crate::detector::{QuadrilateralProperties, ShapeConditions, ShapeDetector};
use crate::events::{ChangeListener, ShapeChangeEvent, ShapeChanges};
use crate::labels::{
    SideLabel, SidePair, VertexLabel, VertexPair, ADJACENT_SIDE_PAIRS, ADJACENT_VERTEX_PAIRS,
    OPPOSITE_SIDE_PAIRS, OPPOSITE_VERTEX_PAIRS,
};
use crate::named::NamedQuadrilateral;
use crate::scratch::{vertex_angle, ScratchShape};
use crate::side::Side;
use crate::snapshot::ShapeSnapshot;
use crate::tolerance::{InputMode, ToleranceError, ToleranceIntervals, Tolerances};
use crate::vertex::{Vertex, VertexInteraction};

/// Square with side 0.5 centred on the origin; A top-left, clockwise
pub const DEFAULT_POSITIONS: [Vec2; 4] = [
    Vec2::new(-0.25, 0.25),
    Vec2::new(0.25, 0.25),
    Vec2::new(0.25, -0.25),
    Vec2::new(-0.25, -0.25),
];

/// Everything needed to build a [`ShapeModel`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeModelConfig {
    pub constraints: ShapeConstraints,
    pub tolerances: ToleranceIntervals,
    /// Positions of A, B, C, D at construction and after reset
    pub default_positions: [Vec2; 4],
}

impl Default for ShapeModelConfig {
    fn default() -> Self {
        Self {
            constraints: ShapeConstraints::default(),
            tolerances: ToleranceIntervals::default(),
            default_positions: DEFAULT_POSITIONS,
        }
    }
}

/// Error building a shape model
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeModelError {
    /// Tolerance intervals out of range
    Tolerance(ToleranceError),
    /// The default positions violate the constraints
    DefaultShape(Blocked),
}

impl fmt::Display for ShapeModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeModelError::Tolerance(e) => write!(f, "Invalid tolerance: {}", e),
            ShapeModelError::DefaultShape(b) => write!(f, "Invalid default shape: {}", b),
        }
    }
}

impl std::error::Error for ShapeModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShapeModelError::Tolerance(e) => Some(e),
            ShapeModelError::DefaultShape(b) => Some(b),
        }
    }
}

impl From<ToleranceError> for ShapeModelError {
    fn from(e: ToleranceError) -> Self {
        ShapeModelError::Tolerance(e)
    }
}

/// A learner-manipulated quadrilateral
pub struct ShapeModel {
    vertices: [Vertex; 4],
    sides: [Side; 4],

    constraints: ShapeConstraints,
    intervals: ToleranceIntervals,
    input_mode: InputMode,
    /// `intervals` scaled for `input_mode`
    tolerances: Tolerances,
    default_positions: [Vec2; 4],

    parallel_side_pairs: Vec<SidePair>,
    equal_adjacent_side_pairs: Vec<SidePair>,
    equal_opposite_side_pairs: Vec<SidePair>,
    equal_adjacent_angle_pairs: Vec<VertexPair>,
    equal_opposite_angle_pairs: Vec<VertexPair>,
    has_flat_angle: bool,
    is_concave: bool,
    all_angles_right: bool,
    all_lengths_equal: bool,
    is_parallelogram: bool,
    area: f64,
    conditions: ShapeConditions,
    shape_name: NamedQuadrilateral,

    /// State as of the last completed update batch
    published: ShapeSnapshot,
    listeners: Vec<ChangeListener>,
}

impl ShapeModel {
    /// Build a model at its default positions
    pub fn new(config: ShapeModelConfig) -> Result<Self, ShapeModelError> {
        config.tolerances.validate()?;
        config
            .constraints
            .check(&ScratchShape::from_positions(config.default_positions))
            .map_err(ShapeModelError::DefaultShape)?;

        let vertices = VertexLabel::ALL.map(|label| Vertex::new(label, config.default_positions[label.index()]));
        let input_mode = InputMode::Standard;

        let mut model = Self {
            vertices,
            sides: SideLabel::ALL.map(Side::new),
            constraints: config.constraints,
            intervals: config.tolerances,
            input_mode,
            tolerances: config.tolerances.effective(input_mode),
            default_positions: config.default_positions,
            parallel_side_pairs: Vec::with_capacity(2),
            equal_adjacent_side_pairs: Vec::with_capacity(4),
            equal_opposite_side_pairs: Vec::with_capacity(2),
            equal_adjacent_angle_pairs: Vec::with_capacity(4),
            equal_opposite_angle_pairs: Vec::with_capacity(2),
            has_flat_angle: false,
            is_concave: false,
            all_angles_right: false,
            all_lengths_equal: false,
            is_parallelogram: false,
            area: 0.0,
            conditions: ShapeConditions::empty(),
            shape_name: NamedQuadrilateral::ConvexQuadrilateral,
            published: ShapeSnapshot::default(),
            listeners: Vec::new(),
        };
        model.recompute();
        model.published = model.build_snapshot();
        Ok(model)
    }

    // ---- Reads ----

    pub fn vertex(&self, label: VertexLabel) -> &Vertex {
        &self.vertices[label.index()]
    }

    pub fn vertices(&self) -> &[Vertex; 4] {
        &self.vertices
    }

    pub fn side(&self, label: SideLabel) -> &Side {
        &self.sides[label.index()]
    }

    pub fn sides(&self) -> &[Side; 4] {
        &self.sides
    }

    /// Current A, B, C, D positions
    pub fn vertex_positions(&self) -> [Vec2; 4] {
        self.vertices.each_ref().map(|v| v.position())
    }

    pub fn default_positions(&self) -> [Vec2; 4] {
        self.default_positions
    }

    pub fn constraints(&self) -> &ShapeConstraints {
        &self.constraints
    }

    pub fn tolerance_intervals(&self) -> &ToleranceIntervals {
        &self.intervals
    }

    /// Tolerances in effect for the current input mode
    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn parallel_side_pairs(&self) -> &[SidePair] {
        &self.parallel_side_pairs
    }

    pub fn equal_adjacent_side_pairs(&self) -> &[SidePair] {
        &self.equal_adjacent_side_pairs
    }

    pub fn equal_opposite_side_pairs(&self) -> &[SidePair] {
        &self.equal_opposite_side_pairs
    }

    pub fn equal_adjacent_angle_pairs(&self) -> &[VertexPair] {
        &self.equal_adjacent_angle_pairs
    }

    pub fn equal_opposite_angle_pairs(&self) -> &[VertexPair] {
        &self.equal_opposite_angle_pairs
    }

    /// True if `a` and `b` are currently a parallel pair
    pub fn are_sides_parallel(&self, a: SideLabel, b: SideLabel) -> bool {
        self.parallel_side_pairs
            .iter()
            .any(|pair| (pair.0 == a && pair.1 == b) || (pair.0 == b && pair.1 == a))
    }

    pub fn has_flat_angle(&self) -> bool {
        self.has_flat_angle
    }

    pub fn is_concave(&self) -> bool {
        self.is_concave
    }

    pub fn is_convex(&self) -> bool {
        !self.is_concave
    }

    pub fn all_angles_right(&self) -> bool {
        self.all_angles_right
    }

    pub fn all_lengths_equal(&self) -> bool {
        self.all_lengths_equal
    }

    pub fn is_parallelogram(&self) -> bool {
        self.is_parallelogram
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn conditions(&self) -> ShapeConditions {
        self.conditions
    }

    pub fn shape_name(&self) -> NamedQuadrilateral {
        self.shape_name
    }

    /// State as of the last completed update batch
    pub fn snapshot(&self) -> &ShapeSnapshot {
        &self.published
    }

    // ---- Validation ----

    /// Test a set of moves against the constraints without mutating anything
    pub fn check_vertex_positions(&self, moves: &[(VertexLabel, Vec2)]) -> Result<(), Blocked> {
        let scratch = ScratchShape::with_moves(self.vertex_positions(), moves);
        self.constraints.check(&scratch)
    }

    /// Would moving `label` to `position` keep the shape valid
    ///
    /// Only answers the question; commit with
    /// [`set_vertex_position_if_valid`](Self::set_vertex_position_if_valid).
    pub fn try_set_vertex_position(&self, label: VertexLabel, position: Vec2) -> bool {
        self.check_vertex_positions(&[(label, position)]).is_ok()
    }

    /// Would moving both vertices together keep the shape valid
    pub fn try_set_vertex_positions(
        &self,
        first: VertexLabel,
        first_position: Vec2,
        second: VertexLabel,
        second_position: Vec2,
    ) -> bool {
        self.check_vertex_positions(&[(first, first_position), (second, second_position)])
            .is_ok()
    }

    // ---- Validated writes ----

    /// Move one vertex if the result is valid
    ///
    /// Returns false and leaves every position unchanged otherwise; the
    /// vertex is then flagged as blocked by bounds or by shape.
    pub fn set_vertex_position_if_valid(&mut self, label: VertexLabel, position: Vec2) -> bool {
        self.apply_if_valid(&[(label, position)])
    }

    /// Move two vertices together; both moves commit or neither does
    pub fn set_vertex_positions_if_valid(
        &mut self,
        first: VertexLabel,
        first_position: Vec2,
        second: VertexLabel,
        second_position: Vec2,
    ) -> bool {
        self.apply_if_valid(&[(first, first_position), (second, second_position)])
    }

    /// Replace all four positions at once (tangible input)
    pub fn set_all_vertex_positions_if_valid(&mut self, positions: [Vec2; 4]) -> bool {
        let moves = VertexLabel::ALL.map(|label| (label, positions[label.index()]));
        self.apply_if_valid(&moves)
    }

    /// Translate a side, moving both of its vertices by `delta`
    pub fn move_side_if_valid(&mut self, side: SideLabel, delta: Vec2) -> bool {
        let (start, end) = side.vertices();
        let start_position = self.vertex(start).position() + delta;
        let end_position = self.vertex(end).position() + delta;
        self.set_vertex_positions_if_valid(start, start_position, end, end_position)
    }

    fn apply_if_valid(&mut self, moves: &[(VertexLabel, Vec2)]) -> bool {
        match self.check_vertex_positions(moves) {
            Ok(()) => {
                for (label, position) in moves {
                    let vertex = &mut self.vertices[label.index()];
                    vertex.set_position(*position);
                    vertex.set_interaction(VertexInteraction::BLOCKED, false);
                }
                self.update_order_dependent_properties();
                true
            }
            Err(blocked) => {
                let flag = match blocked {
                    Blocked::Bounds => VertexInteraction::BLOCKED_BY_BOUNDS,
                    Blocked::Shape => VertexInteraction::BLOCKED_BY_SHAPE,
                };
                for (label, _) in moves {
                    let vertex = &mut self.vertices[label.index()];
                    vertex.set_interaction(VertexInteraction::BLOCKED, false);
                    vertex.set_interaction(flag, true);
                }
                log::debug!("Rejected move of {:?}: {}", moves, blocked);
                false
            }
        }
    }

    // ---- Unchecked writes ----

    /// Write a position without validation
    ///
    /// Refreshes the two touching sides and the angles at this vertex and
    /// its neighbours. Aggregates and the shape name stay stale until
    /// [`update_order_dependent_properties`](Self::update_order_dependent_properties)
    /// runs, so batch several writes and update once.
    pub fn set_vertex_position(&mut self, label: VertexLabel, position: Vec2) {
        self.vertices[label.index()].set_position(position);
        for side in label.sides() {
            self.update_side(side);
        }
        let positions = self.vertex_positions();
        let winding = winding(&positions);
        for vertex in [label.previous(), label, label.next()] {
            let angle = vertex_angle(&positions, winding, vertex);
            self.vertices[vertex.index()].set_angle(angle);
        }
    }

    pub fn set_vertex_pressed(&mut self, label: VertexLabel, pressed: bool) {
        self.vertices[label.index()].set_interaction(VertexInteraction::PRESSED, pressed);
    }

    /// Switch input mode, rescaling tolerances and reclassifying
    pub fn set_input_mode(&mut self, mode: InputMode) {
        if mode == self.input_mode {
            return;
        }
        log::info!("Input mode {} -> {}", self.input_mode, mode);
        self.input_mode = mode;
        self.tolerances = self.intervals.effective(mode);
        self.update_order_dependent_properties();
    }

    /// Replace the base tolerance intervals
    pub fn set_tolerance_intervals(&mut self, intervals: ToleranceIntervals) -> Result<(), ToleranceError> {
        intervals.validate()?;
        self.intervals = intervals;
        self.tolerances = intervals.effective(self.input_mode);
        self.update_order_dependent_properties();
        Ok(())
    }

    /// Restore default positions, clear interaction flags and return to
    /// standard input mode
    pub fn reset(&mut self) {
        for vertex in &mut self.vertices {
            vertex.clear_interaction();
        }
        self.input_mode = InputMode::Standard;
        self.tolerances = self.intervals.effective(InputMode::Standard);
        self.isolated_reset();
    }

    /// Restore default positions only
    pub fn isolated_reset(&mut self) {
        for label in VertexLabel::ALL {
            self.vertices[label.index()].set_position(self.default_positions[label.index()]);
        }
        self.update_order_dependent_properties();
        log::info!("Shape reset to {}", self.shape_name);
    }

    // ---- Listeners ----

    /// Register a closure called once per completed update batch that changed something
    pub fn add_change_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&ShapeChangeEvent<'_>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn clear_change_listeners(&mut self) {
        self.listeners.clear();
    }

    // ---- Derived state ----

    /// Recompute every derived value in dependency order, then notify
    /// listeners if anything differs from the previous batch
    pub fn update_order_dependent_properties(&mut self) {
        self.recompute();

        let snapshot = self.build_snapshot();
        let delta = snapshot.delta(&self.published, &self.tolerances);
        let changes = ShapeChanges::from(&delta);
        let previous_name = self.published.shape_name;
        self.published = snapshot;

        if changes.is_empty() {
            return;
        }
        log::trace!("Shape updated ({:?}): {} -> {}", changes, previous_name, self.shape_name);

        let event = ShapeChangeEvent {
            changes,
            previous_name,
            snapshot: &self.published,
            delta: &delta,
        };
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    fn recompute(&mut self) {
        self.update_sides();
        self.update_angles();
        self.update_parallel_sides();
        self.update_equal_lengths();
        self.update_equal_angles();
        self.update_aggregates();
        self.update_shape_name();
    }

    fn update_side(&mut self, side: SideLabel) {
        let (start, end) = side.vertices();
        let start = self.vertices[start.index()].position();
        let end = self.vertices[end.index()].position();
        self.sides[side.index()].update(start, end);
    }

    fn update_sides(&mut self) {
        for side in SideLabel::ALL {
            self.update_side(side);
        }
    }

    fn update_angles(&mut self) {
        let positions = self.vertex_positions();
        let winding = winding(&positions);
        for label in VertexLabel::ALL {
            let angle = vertex_angle(&positions, winding, label);
            self.vertices[label.index()].set_angle(angle);
        }
    }

    fn update_parallel_sides(&mut self) {
        let tolerances = self.tolerances;
        let sides = &self.sides;
        self.parallel_side_pairs.clear();
        self.parallel_side_pairs.extend(OPPOSITE_SIDE_PAIRS.iter().copied().filter(|pair| {
            tolerances.tilts_parallel(sides[pair.0.index()].tilt(), sides[pair.1.index()].tilt())
        }));
    }

    fn update_equal_lengths(&mut self) {
        let tolerances = self.tolerances;
        let sides = &self.sides;
        let equal = |pair: &SidePair| {
            tolerances.lengths_equal(sides[pair.0.index()].length(), sides[pair.1.index()].length())
        };
        self.equal_adjacent_side_pairs.clear();
        self.equal_adjacent_side_pairs
            .extend(ADJACENT_SIDE_PAIRS.iter().copied().filter(equal));
        self.equal_opposite_side_pairs.clear();
        self.equal_opposite_side_pairs
            .extend(OPPOSITE_SIDE_PAIRS.iter().copied().filter(equal));
    }

    fn update_equal_angles(&mut self) {
        let tolerances = self.tolerances;
        let vertices = &self.vertices;
        let equal = |pair: &VertexPair| {
            tolerances.angles_equal(vertices[pair.0.index()].angle(), vertices[pair.1.index()].angle())
        };
        self.equal_adjacent_angle_pairs.clear();
        self.equal_adjacent_angle_pairs
            .extend(ADJACENT_VERTEX_PAIRS.iter().copied().filter(equal));
        self.equal_opposite_angle_pairs.clear();
        self.equal_opposite_angle_pairs
            .extend(OPPOSITE_VERTEX_PAIRS.iter().copied().filter(equal));
    }

    fn update_aggregates(&mut self) {
        let tolerances = self.tolerances;
        self.has_flat_angle = self.vertices.iter().any(|v| tolerances.is_flat_angle(v.angle()));
        self.is_concave = self.vertices.iter().any(|v| tolerances.is_reflex_angle(v.angle()));
        self.all_angles_right = self.vertices.iter().all(|v| tolerances.is_right_angle(v.angle()));
        // Every one of the six side pairings is equal
        self.all_lengths_equal = self.equal_adjacent_side_pairs.len() == ADJACENT_SIDE_PAIRS.len()
            && self.equal_opposite_side_pairs.len() == OPPOSITE_SIDE_PAIRS.len();
        self.is_parallelogram = self.parallel_side_pairs.len() == OPPOSITE_SIDE_PAIRS.len();
        self.area = polygon_area(&self.vertex_positions());
    }

    fn update_shape_name(&mut self) {
        self.conditions = ShapeDetector::conditions(&*self);
        self.shape_name = ShapeDetector::classify(self.conditions);
    }

    fn build_snapshot(&self) -> ShapeSnapshot {
        ShapeSnapshot {
            positions: self.vertex_positions(),
            angles: self.vertices.each_ref().map(|v| v.angle()),
            lengths: self.sides.each_ref().map(|s| s.length()),
            tilts: self.sides.each_ref().map(|s| s.tilt()),
            parallel_side_pairs: self.parallel_side_pairs.clone(),
            equal_adjacent_side_pairs: self.equal_adjacent_side_pairs.clone(),
            equal_opposite_side_pairs: self.equal_opposite_side_pairs.clone(),
            equal_adjacent_angle_pairs: self.equal_adjacent_angle_pairs.clone(),
            equal_opposite_angle_pairs: self.equal_opposite_angle_pairs.clone(),
            has_flat_angle: self.has_flat_angle,
            is_concave: self.is_concave,
            is_parallelogram: self.is_parallelogram,
            all_angles_right: self.all_angles_right,
            all_lengths_equal: self.all_lengths_equal,
            area: self.area,
            conditions: self.conditions,
            shape_name: self.shape_name,
        }
    }
}

impl QuadrilateralProperties for ShapeModel {
    fn has_flat_angle(&self) -> bool {
        self.has_flat_angle
    }

    fn is_concave(&self) -> bool {
        self.is_concave
    }

    fn parallel_side_pairs(&self) -> &[SidePair] {
        &self.parallel_side_pairs
    }

    fn equal_adjacent_angle_pairs(&self) -> &[VertexPair] {
        &self.equal_adjacent_angle_pairs
    }

    fn equal_opposite_angle_pairs(&self) -> &[VertexPair] {
        &self.equal_opposite_angle_pairs
    }

    fn equal_adjacent_side_pairs(&self) -> &[SidePair] {
        &self.equal_adjacent_side_pairs
    }

    fn equal_opposite_side_pairs(&self) -> &[SidePair] {
        &self.equal_opposite_side_pairs
    }

    fn all_angles_right(&self) -> bool {
        self.all_angles_right
    }

    fn all_lengths_equal(&self) -> bool {
        self.all_lengths_equal
    }
}

impl fmt::Debug for ShapeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeModel")
            .field("positions", &self.vertex_positions())
            .field("shape_name", &self.shape_name)
            .field("input_mode", &self.input_mode)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::f64::consts::PI;
    use std::rc::Rc;

    fn model() -> ShapeModel {
        ShapeModel::new(ShapeModelConfig::default()).unwrap()
    }

    #[test]
    fn test_default_is_square() {
        let m = model();
        assert_eq!(m.shape_name(), NamedQuadrilateral::Square);
        assert!(m.is_parallelogram());
        assert!(m.all_angles_right());
        assert!(m.all_lengths_equal());
        assert!((m.area() - 0.25).abs() < 1e-12);
        assert_eq!(m.snapshot().shape_name, NamedQuadrilateral::Square);
    }

    #[test]
    fn test_invalid_tolerance_rejected() {
        let config = ShapeModelConfig {
            tolerances: ToleranceIntervals {
                reduced_step_scale: 2.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(ShapeModel::new(config), Err(ShapeModelError::Tolerance(_))));
    }

    #[test]
    fn test_invalid_default_shape_rejected() {
        let mut positions = DEFAULT_POSITIONS;
        positions.swap(2, 3);
        let config = ShapeModelConfig {
            default_positions: positions,
            ..Default::default()
        };
        assert_eq!(
            ShapeModel::new(config).unwrap_err(),
            ShapeModelError::DefaultShape(Blocked::Shape)
        );
    }

    #[test]
    fn test_accepted_move_updates_derived_state() {
        let mut m = model();
        assert!(m.set_vertex_position_if_valid(VertexLabel::B, Vec2::new(0.5, 0.25)));
        assert_eq!(m.vertex(VertexLabel::B).position(), Vec2::new(0.5, 0.25));
        assert!((m.side(SideLabel::AB).length() - 0.75).abs() < 1e-12);
        // AB still parallel to CD
        assert!(m.are_sides_parallel(SideLabel::CD, SideLabel::AB));
        assert_eq!(m.shape_name(), NamedQuadrilateral::Trapezoid);
    }

    #[test]
    fn test_rejected_move_sets_blocked_flag() {
        let mut m = model();
        assert!(!m.set_vertex_position_if_valid(VertexLabel::C, Vec2::new(3.0, 0.0)));
        assert!(m.vertex(VertexLabel::C).is_blocked_by_bounds());
        assert_eq!(m.vertex(VertexLabel::C).position(), DEFAULT_POSITIONS[2]);

        // Crossing move flags shape instead
        assert!(!m.set_vertex_position_if_valid(VertexLabel::C, Vec2::new(-0.5, 0.0)));
        assert!(m.vertex(VertexLabel::C).is_blocked_by_shape());
        assert!(!m.vertex(VertexLabel::C).is_blocked_by_bounds());

        // A successful move clears it
        assert!(m.set_vertex_position_if_valid(VertexLabel::C, Vec2::new(0.3, -0.3)));
        assert!(!m.vertex(VertexLabel::C).is_blocked_by_shape());
    }

    #[test]
    fn test_preview_does_not_mutate() {
        let m = model();
        assert!(m.try_set_vertex_position(VertexLabel::A, Vec2::new(-0.5, 0.5)));
        // Concave with the reflex angle at C, still valid
        assert!(m.try_set_vertex_position(VertexLabel::A, Vec2::new(0.5, -0.5)));
        // DA now crosses BC
        assert!(!m.try_set_vertex_position(VertexLabel::A, Vec2::new(0.5, 0.0)));
        assert_eq!(
            m.check_vertex_positions(&[(VertexLabel::A, Vec2::new(0.5, 0.0))]),
            Err(Blocked::Shape)
        );
        assert_eq!(
            m.check_vertex_positions(&[(VertexLabel::A, Vec2::new(-9.0, 0.0))]),
            Err(Blocked::Bounds)
        );
        assert_eq!(m.vertex_positions(), DEFAULT_POSITIONS);
        assert!(!m.vertex(VertexLabel::A).is_blocked_by_shape());
    }

    #[test]
    fn test_unchecked_write_updates_local_geometry_only() {
        let mut m = model();
        m.set_vertex_position(VertexLabel::D, Vec2::ZERO);
        assert!((m.vertex(VertexLabel::D).angle() - PI).abs() < 1e-9);
        assert!((m.side(SideLabel::CD).length() - 0.5f64.sqrt() * 0.5).abs() < 1e-12);
        // Name is stale until the batch is closed
        assert_eq!(m.shape_name(), NamedQuadrilateral::Square);
        m.update_order_dependent_properties();
        assert_eq!(m.shape_name(), NamedQuadrilateral::Triangle);
    }

    #[test]
    fn test_move_side() {
        let mut m = model();
        assert!(m.move_side_if_valid(SideLabel::AB, Vec2::new(0.25, 0.0)));
        assert_eq!(m.vertex(VertexLabel::A).position(), Vec2::new(0.0, 0.25));
        assert_eq!(m.vertex(VertexLabel::B).position(), Vec2::new(0.5, 0.25));
        assert_eq!(m.shape_name(), NamedQuadrilateral::Parallelogram);
    }

    #[test]
    fn test_listener_fires_once_per_batch() {
        let mut m = model();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        m.add_change_listener(move |event| {
            sink.borrow_mut().push((event.changes, event.previous_name, event.shape_name()));
        });

        assert!(m.set_vertex_positions_if_valid(
            VertexLabel::A,
            Vec2::new(-0.5, 0.25),
            VertexLabel::D,
            Vec2::new(-0.5, -0.25),
        ));
        // Nothing moved: no event
        m.update_order_dependent_properties();
        // Rejected: no event
        assert!(!m.set_vertex_position_if_valid(VertexLabel::A, Vec2::new(5.0, 5.0)));

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        let (changes, previous, current) = events[0];
        assert!(changes.contains(ShapeChanges::POSITIONS | ShapeChanges::SHAPE_NAME));
        assert_eq!(previous, NamedQuadrilateral::Square);
        assert_eq!(current, NamedQuadrilateral::Rectangle);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut m = model();
        m.set_input_mode(InputMode::Device);
        m.set_vertex_pressed(VertexLabel::A, true);
        assert!(m.set_vertex_position_if_valid(VertexLabel::A, Vec2::new(-0.6, 0.6)));

        m.isolated_reset();
        assert_eq!(m.vertex_positions(), DEFAULT_POSITIONS);
        assert_eq!(m.input_mode(), InputMode::Device);
        assert!(m.vertex(VertexLabel::A).is_pressed());

        m.reset();
        assert_eq!(m.input_mode(), InputMode::Standard);
        assert!(!m.vertex(VertexLabel::A).is_pressed());
        assert_eq!(m.shape_name(), NamedQuadrilateral::Square);
    }

    #[test]
    fn test_device_mode_loosens_classification() {
        let mut m = model();
        // 0.02 longer AB: outside standard length tolerance, inside device tolerance
        assert!(m.set_vertex_position_if_valid(VertexLabel::B, Vec2::new(0.27, 0.25)));
        assert!(m.set_vertex_position_if_valid(VertexLabel::C, Vec2::new(0.27, -0.25)));
        assert_eq!(m.shape_name(), NamedQuadrilateral::Rectangle);
        m.set_input_mode(InputMode::Device);
        assert_eq!(m.shape_name(), NamedQuadrilateral::Square);
    }

    #[test]
    fn test_mode_switch_notifies_new_equalities() {
        let mut m = model();
        assert!(m.set_all_vertex_positions_if_valid([
            Vec2::new(-0.25, 0.25),
            Vec2::new(0.25, 0.25),
            Vec2::new(0.45, -0.25),
            Vec2::new(-0.3, -0.25),
        ]));
        assert!(m.equal_opposite_side_pairs().is_empty());

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        m.add_change_listener(move |event| sink.borrow_mut().push(event.changes));

        // BC and DA differ by 0.036: equal only under the device tolerance
        m.set_input_mode(InputMode::Device);
        assert_eq!(
            m.equal_opposite_side_pairs(),
            &[SidePair(SideLabel::BC, SideLabel::DA)]
        );

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert!(events[0].contains(ShapeChanges::EQUALITIES | ShapeChanges::CONDITIONS));
        assert!(!events[0].contains(ShapeChanges::POSITIONS));
    }

    #[test]
    fn test_set_tolerance_intervals_validates() {
        let mut m = model();
        let bad = ToleranceIntervals {
            inter_length: -1.0,
            ..Default::default()
        };
        assert!(m.set_tolerance_intervals(bad).is_err());
        assert_eq!(m.tolerance_intervals(), &ToleranceIntervals::default());
    }
}
