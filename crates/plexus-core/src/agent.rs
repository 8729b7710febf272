//! Spatial fields shared by every agent type.

use crate::id::{AgentId, KindTag};
use crate::position::Position;

/// The spatial fields every agent carries, embedded by value.
///
/// Concrete agent types hold an `AgentBase` next to their own fields and
/// expose it through [`Agent::base`]. The id is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentBase {
    id: AgentId,
    pos: Position,
}

impl AgentBase {
    /// Create the spatial fields for agent `id` at `pos`.
    pub fn new(id: AgentId, pos: impl Into<Position>) -> Self {
        Self {
            id,
            pos: pos.into(),
        }
    }

    /// The agent's id.
    pub fn id(&self) -> AgentId {
        self.id
    }

    /// The agent's recorded position.
    pub fn pos(&self) -> &Position {
        &self.pos
    }

    /// Overwrite the recorded position.
    ///
    /// This does not touch any space index. Model code calls it after the
    /// space has accepted the move; calling it directly on an agent that
    /// lives in a model desynchronizes the two.
    pub fn set_pos(&mut self, pos: Position) {
        self.pos = pos;
    }
}

/// An agent that can live in a space.
///
/// # Examples
///
/// ```
/// use plexus_core::{Agent, AgentBase, AgentId, KindTag};
///
/// struct Sheep {
///     base: AgentBase,
///     energy: f64,
/// }
///
/// impl Agent for Sheep {
///     fn base(&self) -> &AgentBase { &self.base }
///     fn base_mut(&mut self) -> &mut AgentBase { &mut self.base }
/// }
///
/// let s = Sheep { base: AgentBase::new(AgentId(0), [2, 3]), energy: 1.0 };
/// assert_eq!(s.id(), AgentId(0));
/// assert_eq!(s.kind(), KindTag::DEFAULT);
/// assert!(s.energy > 0.0);
/// ```
pub trait Agent {
    /// Shared spatial fields.
    fn base(&self) -> &AgentBase;

    /// Mutable shared spatial fields.
    fn base_mut(&mut self) -> &mut AgentBase;

    /// Variant tag for heterogeneous populations.
    fn kind(&self) -> KindTag {
        KindTag::DEFAULT
    }

    /// The agent's id.
    fn id(&self) -> AgentId {
        self.base().id()
    }

    /// The agent's recorded position.
    fn pos(&self) -> &Position {
        self.base().pos()
    }
}

impl Agent for AgentBase {
    fn base(&self) -> &AgentBase {
        self
    }

    fn base_mut(&mut self) -> &mut AgentBase {
        self
    }
}
