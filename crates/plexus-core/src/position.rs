//! Tagged positions for the three space kinds.

use smallvec::SmallVec;
use std::fmt;

/// An integer lattice coordinate.
///
/// Uses `SmallVec<[i32; 4]>` to avoid heap allocation for grids up to
/// 4 dimensions. Coordinates are 0-based along every axis.
pub type Cell = SmallVec<[i32; 4]>;

/// A real-valued coordinate in continuous space.
pub type Point = SmallVec<[f64; 4]>;

/// Where an agent is, in the vocabulary of one space kind.
///
/// Positions compare by value. A position of the wrong kind passed to a
/// space is rejected with a descriptive error rather than coerced.
#[derive(Clone, Debug, PartialEq)]
pub enum Position {
    /// A node of a graph space (0-based node index).
    Node(usize),
    /// A cell of a grid space.
    Cell(Cell),
    /// A point of a continuous space.
    Point(Point),
}

/// The variant of a [`Position`], used in error reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PositionKind {
    /// Graph node id.
    Node,
    /// Integer grid tuple.
    Cell,
    /// Real-valued tuple.
    Point,
}

impl fmt::Display for PositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => write!(f, "graph node"),
            Self::Cell => write!(f, "grid cell"),
            Self::Point => write!(f, "continuous point"),
        }
    }
}

impl Position {
    /// The kind of this position.
    pub fn kind(&self) -> PositionKind {
        match self {
            Self::Node(_) => PositionKind::Node,
            Self::Cell(_) => PositionKind::Cell,
            Self::Point(_) => PositionKind::Point,
        }
    }

    /// The node index, if this is a graph position.
    pub fn as_node(&self) -> Option<usize> {
        match self {
            Self::Node(n) => Some(*n),
            _ => None,
        }
    }

    /// The cell coordinate, if this is a grid position.
    pub fn as_cell(&self) -> Option<&Cell> {
        match self {
            Self::Cell(c) => Some(c),
            _ => None,
        }
    }

    /// The point coordinate, if this is a continuous position.
    pub fn as_point(&self) -> Option<&Point> {
        match self {
            Self::Point(p) => Some(p),
            _ => None,
        }
    }

    /// Number of coordinates; `1` for graph nodes.
    pub fn ndim(&self) -> usize {
        match self {
            Self::Node(_) => 1,
            Self::Cell(c) => c.len(),
            Self::Point(p) => p.len(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(n) => write!(f, "node {n}"),
            Self::Cell(c) => write!(f, "cell {:?}", c.as_slice()),
            Self::Point(p) => write!(f, "point {:?}", p.as_slice()),
        }
    }
}

impl From<usize> for Position {
    fn from(node: usize) -> Self {
        Self::Node(node)
    }
}

impl<const N: usize> From<[i32; N]> for Position {
    fn from(c: [i32; N]) -> Self {
        Self::Cell(SmallVec::from_slice(&c))
    }
}

impl<const N: usize> From<[f64; N]> for Position {
    fn from(p: [f64; N]) -> Self {
        Self::Point(SmallVec::from_slice(&p))
    }
}

impl From<Cell> for Position {
    fn from(c: Cell) -> Self {
        Self::Cell(c)
    }
}

impl From<Point> for Position {
    fn from(p: Point) -> Self {
        Self::Point(p)
    }
}
