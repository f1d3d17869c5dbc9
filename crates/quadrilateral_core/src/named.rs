//! Named quadrilateral classifications

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::detector::ShapeConditions;

/// The most specific name the detector can give a shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedQuadrilateral {
    Square,
    Rectangle,
    Rhombus,
    Kite,
    Trapezoid,
    IsoscelesTrapezoid,
    Parallelogram,
    Dart,
    Triangle,
    ConcaveQuadrilateral,
    #[default]
    ConvexQuadrilateral,
}

impl NamedQuadrilateral {
    pub const ALL: [NamedQuadrilateral; 11] = [
        NamedQuadrilateral::Square,
        NamedQuadrilateral::Rectangle,
        NamedQuadrilateral::Rhombus,
        NamedQuadrilateral::Kite,
        NamedQuadrilateral::Trapezoid,
        NamedQuadrilateral::IsoscelesTrapezoid,
        NamedQuadrilateral::Parallelogram,
        NamedQuadrilateral::Dart,
        NamedQuadrilateral::Triangle,
        NamedQuadrilateral::ConcaveQuadrilateral,
        NamedQuadrilateral::ConvexQuadrilateral,
    ];

    /// Conditions a shape must satisfy (at least) to earn this name
    ///
    /// Triangle's mask is just `FLAT_ANGLE`. It is never matched against the
    /// sequences; the flat-angle check decides it before any mask matching.
    pub const fn requirement_mask(self) -> ShapeConditions {
        match self {
            NamedQuadrilateral::ConvexQuadrilateral => ShapeConditions::empty(),
            NamedQuadrilateral::ConcaveQuadrilateral => ShapeConditions::CONCAVE_MASK,
            NamedQuadrilateral::Dart => ShapeConditions::DART_MASK,
            NamedQuadrilateral::Trapezoid => ShapeConditions::TRAPEZOID_MASK,
            NamedQuadrilateral::IsoscelesTrapezoid => ShapeConditions::ISOSCELES_TRAPEZOID_MASK,
            NamedQuadrilateral::Kite => ShapeConditions::KITE_MASK,
            NamedQuadrilateral::Parallelogram => ShapeConditions::PARALLELOGRAM_MASK,
            NamedQuadrilateral::Rectangle => ShapeConditions::RECTANGLE_MASK,
            NamedQuadrilateral::Rhombus => ShapeConditions::RHOMBUS_MASK,
            NamedQuadrilateral::Square => ShapeConditions::SQUARE_MASK,
            NamedQuadrilateral::Triangle => ShapeConditions::FLAT_ANGLE,
        }
    }

    pub fn is_concave(self) -> bool {
        matches!(self, NamedQuadrilateral::Dart | NamedQuadrilateral::ConcaveQuadrilateral)
    }

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            NamedQuadrilateral::Square => "square",
            NamedQuadrilateral::Rectangle => "rectangle",
            NamedQuadrilateral::Rhombus => "rhombus",
            NamedQuadrilateral::Kite => "kite",
            NamedQuadrilateral::Trapezoid => "trapezoid",
            NamedQuadrilateral::IsoscelesTrapezoid => "isosceles trapezoid",
            NamedQuadrilateral::Parallelogram => "parallelogram",
            NamedQuadrilateral::Dart => "dart",
            NamedQuadrilateral::Triangle => "triangle",
            NamedQuadrilateral::ConcaveQuadrilateral => "concave quadrilateral",
            NamedQuadrilateral::ConvexQuadrilateral => "convex quadrilateral",
        }
    }
}

impl fmt::Display for NamedQuadrilateral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
