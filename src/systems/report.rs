//! Plain-text descriptions of the shape state
//!
//! These stand in for the visual and spoken feedback a learner would get.

use quadrilateral_core::{
    Blocked, ShapeChangeEvent, ShapeChanges, ShapeSnapshot, SideLabel, VertexLabel,
};

/// Multi-line description of a snapshot
pub fn describe(snapshot: &ShapeSnapshot, show_conditions: bool) -> String {
    let mut lines = vec![format!("Shape: {}", snapshot.shape_name)];

    lines.extend(VertexLabel::ALL.into_iter().map(|vertex| {
        let p = snapshot.position(vertex);
        format!(
            "  {} ({:>6.3}, {:>6.3})  angle {:>6.1}°",
            vertex,
            p.x,
            p.y,
            snapshot.angle(vertex).to_degrees()
        )
    }));
    lines.extend(
        SideLabel::ALL
            .into_iter()
            .map(|side| format!("  {:<2} length {:.3}", side, snapshot.length(side))),
    );

    let parallel: Vec<String> = snapshot
        .parallel_side_pairs
        .iter()
        .map(|pair| format!("{}∥{}", pair.0, pair.1))
        .collect();
    if !parallel.is_empty() {
        lines.push(format!("  Parallel: {}", parallel.join(", ")));
    }

    let equal_sides: Vec<String> = snapshot
        .equal_adjacent_side_pairs
        .iter()
        .chain(&snapshot.equal_opposite_side_pairs)
        .map(|pair| format!("{}={}", pair.0, pair.1))
        .collect();
    if !equal_sides.is_empty() {
        lines.push(format!("  Equal sides: {}", equal_sides.join(", ")));
    }

    let equal_angles: Vec<String> = snapshot
        .equal_adjacent_angle_pairs
        .iter()
        .chain(&snapshot.equal_opposite_angle_pairs)
        .map(|pair| format!("∠{}=∠{}", pair.0, pair.1))
        .collect();
    if !equal_angles.is_empty() {
        lines.push(format!("  Equal angles: {}", equal_angles.join(", ")));
    }

    lines.push(format!("  Area {:.4}", snapshot.area));
    if show_conditions {
        lines.push(format!("  Conditions {:?}", snapshot.conditions));
    }
    lines.join("\n")
}

/// One-line summary of a change event
pub fn describe_change(event: &ShapeChangeEvent<'_>) -> String {
    if event.changes.contains(ShapeChanges::SHAPE_NAME) {
        return format!("Now a {} (was a {})", event.shape_name(), event.previous_name);
    }
    if event.delta.is_parallelogram_shear() {
        return format!("Still a {}, side lengths unchanged, angles changed", event.shape_name());
    }

    let mut parts = Vec::new();
    if event.changes.contains(ShapeChanges::LENGTHS) {
        parts.push("side lengths");
    }
    if event.changes.contains(ShapeChanges::ANGLES) {
        parts.push("angles");
    }
    if event.changes.contains(ShapeChanges::PARALLELISM) {
        parts.push("parallel sides");
    }
    if event.changes.contains(ShapeChanges::EQUALITIES) {
        parts.push("equal sides or angles");
    }
    if parts.is_empty() {
        format!("Still a {}", event.shape_name())
    } else {
        format!("Still a {}, {} changed", event.shape_name(), parts.join(", "))
    }
}

/// Feedback for a rejected move
pub fn describe_blocked(vertex: VertexLabel, blocked: Blocked) -> String {
    match blocked {
        Blocked::Bounds => format!("Corner {} can't leave the play area", vertex),
        Blocked::Shape => format!("Corner {} is blocked by the shape", vertex),
    }
}
