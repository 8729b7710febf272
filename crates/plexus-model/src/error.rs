//! Model-level error type wrapping the space and arena errors.

use std::error::Error;
use std::fmt;

use plexus_arena::ArenaError;
use plexus_core::AgentId;
use plexus_space::SpaceError;

/// Errors from model operations that touch both the arena and the space.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// The space rejected a position, radius or registration.
    Space(SpaceError),
    /// The arena rejected an id or a removal.
    Arena(ArenaError),
    /// No agent with this id lives in the model.
    UnknownAgent {
        /// The missing id.
        id: AgentId,
    },
    /// Every position of a discrete space is occupied.
    NoEmptyPosition,
    /// The arena and the space index disagree.
    Inconsistent {
        /// Description of the first disagreement found.
        reason: String,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::Arena(e) => write!(f, "arena: {e}"),
            Self::UnknownAgent { id } => write!(f, "no agent with id {id}"),
            Self::NoEmptyPosition => write!(f, "no empty position left in the space"),
            Self::Inconsistent { reason } => write!(f, "arena and space disagree: {reason}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            Self::Arena(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ModelError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

impl From<ArenaError> for ModelError {
    fn from(e: ArenaError) -> Self {
        Self::Arena(e)
    }
}
