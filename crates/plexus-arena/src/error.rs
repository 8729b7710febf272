//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use plexus_core::AgentId;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// An agent with this id is already stored.
    DuplicateId {
        /// The id that is already present.
        id: AgentId,
    },
    /// The id is below the arena's high-water mark. Ids strictly increase
    /// and are never reused, even after removal.
    StaleId {
        /// The rejected id.
        id: AgentId,
        /// The smallest id the arena would accept.
        next: AgentId,
    },
    /// An append-only arena received an id other than its current length.
    OutOfSequence {
        /// The only id the arena would accept.
        expected: AgentId,
        /// The id that was supplied.
        given: AgentId,
    },
    /// The arena does not support removal.
    RemovalUnsupported,
    /// No agent with this id is stored.
    UnknownAgent {
        /// The id that was looked up.
        id: AgentId,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "agent id {id} is already in use"),
            Self::StaleId { id, next } => {
                write!(f, "agent id {id} is below the next free id {next}")
            }
            Self::OutOfSequence { expected, given } => {
                write!(
                    f,
                    "append-only arena expected agent id {expected}, got {given}"
                )
            }
            Self::RemovalUnsupported => write!(f, "arena does not support removal"),
            Self::UnknownAgent { id } => write!(f, "no agent with id {id}"),
        }
    }
}

impl Error for ArenaError {}
