//! Removable arena keyed by agent id.

use crate::arena::AgentArena;
use crate::error::ArenaError;
use indexmap::IndexMap;
use plexus_core::{Agent, AgentId};

/// Arena backed by an id-keyed map.
///
/// Lookup and removal are O(1) on average. Ids must be added in strictly
/// increasing order; once an id is passed (added, or skipped over) it can
/// never be used again. Removal swaps the last entry into the vacated
/// slot, so iteration order is insertion order only until the first
/// removal.
#[derive(Debug, Clone)]
pub struct MapArena<A> {
    agents: IndexMap<AgentId, A>,
    next: AgentId,
}

impl<A> MapArena<A> {
    /// Create an empty arena whose first id is `AgentId(0)`.
    pub fn new() -> Self {
        Self {
            agents: IndexMap::new(),
            next: AgentId(0),
        }
    }

    /// Create an empty arena with room for `capacity` agents.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            agents: IndexMap::with_capacity(capacity),
            next: AgentId(0),
        }
    }
}

impl<A> Default for MapArena<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Agent> AgentArena<A> for MapArena<A> {
    fn add(&mut self, agent: A) -> Result<(), ArenaError> {
        let id = agent.id();
        if self.agents.contains_key(&id) {
            return Err(ArenaError::DuplicateId { id });
        }
        if id < self.next {
            return Err(ArenaError::StaleId {
                id,
                next: self.next,
            });
        }
        self.next = id.next();
        self.agents.insert(id, agent);
        Ok(())
    }

    fn remove(&mut self, id: AgentId) -> Result<A, ArenaError> {
        self.agents
            .swap_remove(&id)
            .ok_or(ArenaError::UnknownAgent { id })
    }

    fn get(&self, id: AgentId) -> Option<&A> {
        self.agents.get(&id)
    }

    fn get_mut(&mut self, id: AgentId) -> Option<&mut A> {
        self.agents.get_mut(&id)
    }

    fn next_id(&self) -> AgentId {
        self.next
    }

    fn len(&self) -> usize {
        self.agents.len()
    }

    fn supports_removal(&self) -> bool {
        true
    }

    fn ids(&self) -> Box<dyn Iterator<Item = AgentId> + '_> {
        Box::new(self.agents.keys().copied())
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &A> + '_> {
        Box::new(self.agents.values())
    }
}
