//! Error types for space operations.

use plexus_core::{AgentId, Position, PositionKind};
use std::fmt;

/// Errors arising from space construction, mutation or spatial queries.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// A position of the wrong kind was given to a space.
    KindMismatch {
        /// The kind this space stores.
        expected: PositionKind,
        /// The kind that was supplied.
        given: PositionKind,
    },
    /// A position has the wrong number of coordinates.
    DimensionMismatch {
        /// Dimensionality of the space.
        expected: usize,
        /// Dimensionality of the supplied position.
        given: usize,
    },
    /// A position is outside the bounds of the space.
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// A node index is outside the adjacency graph.
    NodeOutOfRange {
        /// The offending node.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// A query radius is negative or NaN.
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },
    /// The agent is already registered in this space.
    AlreadyPlaced {
        /// The agent id.
        id: AgentId,
    },
    /// The agent is not registered in this space.
    NotPlaced {
        /// The agent id.
        id: AgentId,
    },
    /// Attempted to construct a space with zero positions.
    EmptySpace,
    /// The requested number of dimensions is not supported by this backend.
    UnsupportedDimension {
        /// The requested dimensionality.
        ndim: usize,
        /// Human-readable description of what is supported.
        supported: &'static str,
    },
    /// A construction parameter is invalid.
    InvalidConfig {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KindMismatch { expected, given } => {
                write!(f, "position kind mismatch: expected {expected}, got {given}")
            }
            Self::DimensionMismatch { expected, given } => {
                write!(
                    f,
                    "position has {given} coordinates, space has {expected} dimensions"
                )
            }
            Self::OutOfBounds { position, bounds } => {
                write!(f, "{position} out of bounds: {bounds}")
            }
            Self::NodeOutOfRange { node, node_count } => {
                write!(f, "node {node} out of range for graph with {node_count} nodes")
            }
            Self::InvalidRadius { radius } => {
                write!(f, "radius must be a non-negative number, got {radius}")
            }
            Self::AlreadyPlaced { id } => write!(f, "agent {id} is already in the space"),
            Self::NotPlaced { id } => write!(f, "agent {id} is not in the space"),
            Self::EmptySpace => write!(f, "space must have at least one position"),
            Self::UnsupportedDimension { ndim, supported } => {
                write!(f, "{ndim}-dimensional space not supported ({supported})")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid space configuration: {reason}"),
        }
    }
}

impl std::error::Error for SpaceError {}
