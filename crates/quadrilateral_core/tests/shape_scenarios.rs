//! Integration tests for the shape model
//!
//! These tests drive a full model through validated moves and verify:
//! 1. Known vertex layouts classify as the expected named shape
//! 2. Rejected moves leave every position and the shape name untouched
//! 3. Derived properties are stable and comparisons are symmetric
//! 4. The classification masks nest from least to most specific

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use quadrilateral_core::{
    NamedQuadrilateral, ShapeChanges, ShapeConditions, ShapeDetector, ShapeModel,
    ShapeModelConfig, SideLabel, Tolerances, Vec2, VertexLabel, DEFAULT_POSITIONS,
};

fn model() -> ShapeModel {
    ShapeModel::new(ShapeModelConfig::default()).expect("default config should be valid")
}

fn positions(points: [(f64, f64); 4]) -> [Vec2; 4] {
    points.map(|(x, y)| Vec2::new(x, y))
}

// ==================== Classification Scenarios ====================

/// The default layout is a square
#[test]
fn test_scenario_square() {
    let mut m = model();
    assert!(m.set_all_vertex_positions_if_valid(positions([
        (-0.25, 0.25),
        (0.25, 0.25),
        (0.25, -0.25),
        (-0.25, -0.25),
    ])));
    assert_eq!(m.shape_name(), NamedQuadrilateral::Square);
}

/// Moving D onto the AC diagonal flattens its angle
#[test]
fn test_scenario_triangle() {
    let mut m = model();
    assert!(m.set_vertex_position_if_valid(VertexLabel::D, Vec2::new(0.0, 0.0)));
    assert!(
        (m.vertex(VertexLabel::D).angle() - PI).abs() < 1e-9,
        "D should be flat, got {}",
        m.vertex(VertexLabel::D).angle()
    );
    assert!(m.has_flat_angle());
    assert_eq!(m.shape_name(), NamedQuadrilateral::Triangle);
}

#[test]
fn test_scenario_concave_quadrilateral() {
    let mut m = model();
    assert!(m.set_all_vertex_positions_if_valid(positions([
        (0.0, 1.0),
        (1.5, 0.0),
        (0.0, -1.0),
        (0.5, 0.5),
    ])));
    assert!(m.is_concave());
    assert!(m.vertex(VertexLabel::D).angle() > PI);
    assert_eq!(m.shape_name(), NamedQuadrilateral::ConcaveQuadrilateral);
}

#[test]
fn test_scenario_dart() {
    let mut m = model();
    assert!(m.set_all_vertex_positions_if_valid(positions([
        (-0.75, 0.75),
        (1.0, 0.75),
        (1.0, -1.0),
        (0.5, 0.25),
    ])));
    assert!(m.is_concave());
    assert_eq!(m.equal_adjacent_side_pairs().len(), 2);
    assert_eq!(m.shape_name(), NamedQuadrilateral::Dart);
}

/// A move that crosses another side is rejected and nothing changes
#[test]
fn test_scenario_crossing_move_rejected() {
    let mut m = model();
    let before = m.vertex_positions();

    assert!(!m.try_set_vertex_position(VertexLabel::C, Vec2::new(-0.5, 0.0)));
    assert!(!m.set_vertex_position_if_valid(VertexLabel::C, Vec2::new(-0.5, 0.0)));

    assert_eq!(m.vertex_positions(), before);
    assert_eq!(m.shape_name(), NamedQuadrilateral::Square);
    assert!(m.vertex(VertexLabel::C).is_blocked_by_shape());
}

#[test]
fn test_convex_shapes() {
    let cases = [
        ([(0.0, 0.5), (0.3, 0.0), (0.0, -1.0), (-0.3, 0.0)], NamedQuadrilateral::Kite),
        ([(0.0, 0.5), (0.8, 0.0), (0.0, -0.5), (-0.8, 0.0)], NamedQuadrilateral::Rhombus),
        (
            [(-0.25, 0.25), (0.25, 0.25), (0.5, -0.25), (-0.5, -0.25)],
            NamedQuadrilateral::IsoscelesTrapezoid,
        ),
        (
            [(-0.25, 0.25), (0.5, 0.25), (0.25, -0.25), (-0.25, -0.25)],
            NamedQuadrilateral::Trapezoid,
        ),
        (
            [(-0.5, 0.25), (0.5, 0.25), (0.5, -0.25), (-0.5, -0.25)],
            NamedQuadrilateral::Rectangle,
        ),
        (
            [(0.0, 0.25), (0.5, 0.25), (0.25, -0.25), (-0.25, -0.25)],
            NamedQuadrilateral::Parallelogram,
        ),
        (
            [(-0.3, 0.4), (0.5, 0.2), (0.3, -0.6), (-0.4, -0.2)],
            NamedQuadrilateral::ConvexQuadrilateral,
        ),
    ];

    for (points, expected) in cases {
        let mut m = model();
        assert!(m.set_all_vertex_positions_if_valid(positions(points)), "{} rejected", expected);
        assert_eq!(m.shape_name(), expected);
        assert!(m.is_convex());
    }
}

// ==================== Validation Tests ====================

#[test]
fn test_out_of_bounds_rejected() {
    let mut m = model();
    assert!(!m.set_vertex_position_if_valid(VertexLabel::A, Vec2::new(-2.5, 0.25)));
    assert!(m.vertex(VertexLabel::A).is_blocked_by_bounds());
    assert_eq!(m.vertex_positions(), DEFAULT_POSITIONS);
}

/// `try_*` answers whether a move would be valid; committing is up to the caller
#[test]
fn test_try_set_only_previews() {
    let mut m = model();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    m.add_change_listener(move |_| *sink.borrow_mut() += 1);

    assert!(m.try_set_vertex_position(VertexLabel::B, Vec2::new(0.5, 0.25)));
    assert!(m.try_set_vertex_positions(
        VertexLabel::A,
        Vec2::new(-0.5, 0.25),
        VertexLabel::D,
        Vec2::new(-0.5, -0.25),
    ));
    assert_eq!(m.vertex_positions(), DEFAULT_POSITIONS);
    assert_eq!(m.shape_name(), NamedQuadrilateral::Square);
    assert_eq!(*count.borrow(), 0);

    // A rejected preview does not flag the vertex either
    assert!(!m.try_set_vertex_position(VertexLabel::C, Vec2::new(3.0, 0.0)));
    assert!(!m.vertex(VertexLabel::C).is_blocked_by_bounds());

    // The caller commits once it has the answer
    assert!(m.set_vertex_position_if_valid(VertexLabel::B, Vec2::new(0.5, 0.25)));
    assert_eq!(m.vertex(VertexLabel::B).position(), Vec2::new(0.5, 0.25));
    assert_eq!(*count.borrow(), 1);
}

/// Each move alone is valid but together they twist the shape
#[test]
fn test_dual_move_is_atomic() {
    let mut m = model();
    let a = Vec2::new(0.1, 0.25);
    let b = Vec2::new(-0.1, 0.25);

    assert!(m.try_set_vertex_position(VertexLabel::A, a));
    assert!(m.try_set_vertex_position(VertexLabel::B, b));
    assert!(!m.try_set_vertex_positions(VertexLabel::A, a, VertexLabel::B, b));
    assert_eq!(m.vertex_positions(), DEFAULT_POSITIONS);

    assert!(!m.set_vertex_positions_if_valid(VertexLabel::A, a, VertexLabel::B, b));
    assert_eq!(m.vertex_positions(), DEFAULT_POSITIONS);
    assert!(m.vertex(VertexLabel::A).is_blocked_by_shape());
    assert!(m.vertex(VertexLabel::B).is_blocked_by_shape());
}

#[test]
fn test_side_drag_keeps_lengths() {
    let mut m = model();
    assert!(m.move_side_if_valid(SideLabel::CD, Vec2::new(0.2, 0.0)));
    assert!((m.side(SideLabel::CD).length() - 0.5).abs() < 1e-12);
    assert!((m.side(SideLabel::AB).length() - 0.5).abs() < 1e-12);
    assert!(m.is_parallelogram());
    assert_eq!(m.shape_name(), NamedQuadrilateral::Parallelogram);
}

#[test]
fn test_rejected_side_drag_leaves_shape() {
    let mut m = model();
    // Drags AB onto CD
    assert!(!m.move_side_if_valid(SideLabel::AB, Vec2::new(0.0, -0.5)));
    assert_eq!(m.vertex_positions(), DEFAULT_POSITIONS);
}

// ==================== Property Tests ====================

#[test]
fn test_update_is_idempotent() {
    let mut m = model();
    assert!(m.set_vertex_position_if_valid(VertexLabel::B, Vec2::new(0.4, 0.3)));
    let first = m.snapshot().clone();
    m.update_order_dependent_properties();
    let second = m.snapshot().clone();
    m.update_order_dependent_properties();
    assert_eq!(first, second);
    assert_eq!(second, m.snapshot().clone());
}

#[test]
fn test_equality_predicates_symmetric() {
    let tolerances = Tolerances::default();
    let values = [0.0, 0.0005, 0.001, 0.0015, 0.5, 0.505, 0.51, PI / 2.0, PI];
    for a in values {
        for b in values {
            assert_eq!(tolerances.angles_equal(a, b), tolerances.angles_equal(b, a));
            assert_eq!(tolerances.lengths_equal(a, b), tolerances.lengths_equal(b, a));
            assert_eq!(tolerances.tilts_parallel(a, b), tolerances.tilts_parallel(b, a));
        }
    }
}

#[test]
fn test_masks_nest_toward_square() {
    for shape in NamedQuadrilateral::ALL {
        if shape.is_concave() || shape == NamedQuadrilateral::Triangle {
            continue;
        }
        assert!(
            ShapeConditions::SQUARE_MASK.contains(shape.requirement_mask()),
            "square should satisfy {}",
            shape
        );
    }
    assert!(ShapeConditions::RHOMBUS_MASK.contains(ShapeConditions::PARALLELOGRAM_MASK));
    assert!(ShapeConditions::PARALLELOGRAM_MASK.contains(ShapeConditions::TRAPEZOID_MASK));
}

/// Any condition set with a flat angle is a triangle
#[test]
fn test_flat_angle_always_triangle() {
    for bits in 0u16..(1 << 11) {
        let conditions = ShapeConditions::from_bits_truncate(bits) | ShapeConditions::FLAT_ANGLE;
        assert_eq!(ShapeDetector::classify(conditions), NamedQuadrilateral::Triangle);
    }
}

#[test]
fn test_snapshot_matches_live_classification() {
    let mut m = model();
    assert!(m.set_all_vertex_positions_if_valid(positions([
        (0.0, 0.5),
        (0.3, 0.0),
        (0.0, -1.0),
        (-0.3, 0.0),
    ])));
    assert_eq!(ShapeDetector::detect(m.snapshot()), m.shape_name());
    assert_eq!(ShapeDetector::detect(&m), NamedQuadrilateral::Kite);
}

// ==================== Notification Tests ====================

/// Listeners see one event per accepted batch, carrying the final shape
#[test]
fn test_one_notification_per_batch() {
    let mut m = model();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    m.add_change_listener(move |event| {
        sink.borrow_mut().push((event.changes, event.shape_name()));
    });

    // Side drag moves two vertices but notifies once
    assert!(m.move_side_if_valid(SideLabel::BC, Vec2::new(0.25, 0.0)));
    // Rejected moves are silent
    assert!(!m.set_vertex_position_if_valid(VertexLabel::A, Vec2::new(5.0, 0.0)));

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].0.contains(ShapeChanges::POSITIONS | ShapeChanges::LENGTHS));
    assert_eq!(seen[0].1, NamedQuadrilateral::Rectangle);
}

#[test]
fn test_reset_notifies_and_restores_square() {
    let mut m = model();
    assert!(m.set_vertex_position_if_valid(VertexLabel::A, Vec2::new(-0.5, 0.5)));

    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    m.add_change_listener(move |_| *sink.borrow_mut() += 1);

    m.reset();
    assert_eq!(*count.borrow(), 1);
    assert_eq!(m.vertex_positions(), DEFAULT_POSITIONS);
    assert_eq!(m.shape_name(), NamedQuadrilateral::Square);
}
