//! The storage contract shared by all arenas.

use crate::error::ArenaError;
use plexus_core::{Agent, AgentId};

/// Owns agent records keyed by id.
///
/// Iteration order is implementation defined but deterministic: the same
/// sequence of operations always yields the same order.
pub trait AgentArena<A: Agent> {
    /// Store a new agent under its own id.
    fn add(&mut self, agent: A) -> Result<(), ArenaError>;

    /// Remove and return the agent with `id`.
    fn remove(&mut self, id: AgentId) -> Result<A, ArenaError>;

    /// Look up an agent.
    fn get(&self, id: AgentId) -> Option<&A>;

    /// Look up an agent mutably.
    fn get_mut(&mut self, id: AgentId) -> Option<&mut A>;

    /// The id the next added agent should carry.
    fn next_id(&self) -> AgentId;

    /// Number of stored agents.
    fn len(&self) -> usize;

    /// Whether removal is supported at all. Callers that must keep another
    /// structure in sync check this before mutating anything.
    fn supports_removal(&self) -> bool;

    /// Ids of all stored agents.
    fn ids(&self) -> Box<dyn Iterator<Item = AgentId> + '_>;

    /// All stored agents.
    fn iter(&self) -> Box<dyn Iterator<Item = &A> + '_>;

    /// Whether no agents are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an agent with `id` is stored.
    fn contains(&self, id: AgentId) -> bool {
        self.get(id).is_some()
    }
}
