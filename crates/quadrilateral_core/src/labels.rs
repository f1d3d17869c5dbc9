//! Vertex and side labels and the fixed quadrilateral topology
//!
//! Vertices run A -> B -> C -> D around the shape and side `XY` joins
//! vertex X to vertex Y. The topology never changes at runtime, only
//! positions do, so sides refer to their vertices by label.

use std::fmt;

use serde::{Serialize, Deserialize};

/// One of the four corners of the quadrilateral
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VertexLabel {
    A,
    B,
    C,
    D,
}

impl VertexLabel {
    /// All labels in polygon order
    pub const ALL: [VertexLabel; 4] = [VertexLabel::A, VertexLabel::B, VertexLabel::C, VertexLabel::D];

    /// Index into per-vertex arrays
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Label for an array index (wraps modulo 4)
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// Next vertex in polygon order
    #[inline]
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous vertex in polygon order
    #[inline]
    pub const fn previous(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// The vertex not connected to this one by a side
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The two sides that meet at this vertex, (incoming, outgoing)
    pub const fn sides(self) -> [SideLabel; 2] {
        [SideLabel::from_index(self.index() + 3), SideLabel::from_index(self.index())]
    }

    /// Parse a single letter label (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Some(VertexLabel::A),
            "B" => Some(VertexLabel::B),
            "C" => Some(VertexLabel::C),
            "D" => Some(VertexLabel::D),
            _ => None,
        }
    }
}

impl fmt::Display for VertexLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VertexLabel::A => "A",
            VertexLabel::B => "B",
            VertexLabel::C => "C",
            VertexLabel::D => "D",
        };
        f.write_str(name)
    }
}

/// One of the four sides of the quadrilateral
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SideLabel {
    AB,
    BC,
    CD,
    DA,
}

impl SideLabel {
    /// All sides in polygon order
    pub const ALL: [SideLabel; 4] = [SideLabel::AB, SideLabel::BC, SideLabel::CD, SideLabel::DA];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// (start, end) vertices of this side
    #[inline]
    pub const fn vertices(self) -> (VertexLabel, VertexLabel) {
        let start = VertexLabel::from_index(self.index());
        (start, start.next())
    }

    /// The side that shares no vertex with this one
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The two sides sharing a vertex with this one, (previous, next)
    pub const fn adjacent(self) -> [SideLabel; 2] {
        [Self::from_index(self.index() + 3), Self::from_index(self.index() + 1)]
    }

    /// True if `vertex` is one of this side's endpoints
    pub fn touches(self, vertex: VertexLabel) -> bool {
        let (start, end) = self.vertices();
        start == vertex || end == vertex
    }

    /// Parse a two letter side label in either direction ("AB" or "BA")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AB" | "BA" => Some(SideLabel::AB),
            "BC" | "CB" => Some(SideLabel::BC),
            "CD" | "DC" => Some(SideLabel::CD),
            "DA" | "AD" => Some(SideLabel::DA),
            _ => None,
        }
    }
}

impl fmt::Display for SideLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.vertices();
        write!(f, "{}{}", start, end)
    }
}

/// An ordered pair of sides
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SidePair(pub SideLabel, pub SideLabel);

/// An ordered pair of vertices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexPair(pub VertexLabel, pub VertexLabel);

/// Sides sharing a vertex, in polygon order
pub const ADJACENT_SIDE_PAIRS: [SidePair; 4] = [
    SidePair(SideLabel::AB, SideLabel::BC),
    SidePair(SideLabel::BC, SideLabel::CD),
    SidePair(SideLabel::CD, SideLabel::DA),
    SidePair(SideLabel::DA, SideLabel::AB),
];

/// Sides sharing no vertex
pub const OPPOSITE_SIDE_PAIRS: [SidePair; 2] = [
    SidePair(SideLabel::AB, SideLabel::CD),
    SidePair(SideLabel::BC, SideLabel::DA),
];

/// Vertices joined by a side, in polygon order
pub const ADJACENT_VERTEX_PAIRS: [VertexPair; 4] = [
    VertexPair(VertexLabel::A, VertexLabel::B),
    VertexPair(VertexLabel::B, VertexLabel::C),
    VertexPair(VertexLabel::C, VertexLabel::D),
    VertexPair(VertexLabel::D, VertexLabel::A),
];

/// Vertices on a diagonal
pub const OPPOSITE_VERTEX_PAIRS: [VertexPair; 2] = [
    VertexPair(VertexLabel::A, VertexLabel::C),
    VertexPair(VertexLabel::B, VertexLabel::D),
];
