//! Append-only arena indexed by position.

use crate::arena::AgentArena;
use crate::error::ArenaError;
use plexus_core::{Agent, AgentId};

/// Arena backed by a plain vector.
///
/// Agent `n` lives at index `n`, so lookup is a bounds check. Every new
/// agent must carry id `len()`; anything else is a caller bug and is
/// rejected with [`ArenaError::OutOfSequence`]. Removal is unsupported.
#[derive(Debug, Clone)]
pub struct SeqArena<A> {
    agents: Vec<A>,
}

impl<A> SeqArena<A> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { agents: Vec::new() }
    }

    /// Create an empty arena with room for `capacity` agents.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            agents: Vec::with_capacity(capacity),
        }
    }

    /// All agents as a slice, in id order.
    pub fn as_slice(&self) -> &[A] {
        &self.agents
    }

    fn index(id: AgentId) -> Option<usize> {
        usize::try_from(id.0).ok()
    }
}

impl<A> Default for SeqArena<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Agent> AgentArena<A> for SeqArena<A> {
    fn add(&mut self, agent: A) -> Result<(), ArenaError> {
        let expected = self.next_id();
        let given = agent.id();
        if given != expected {
            return Err(ArenaError::OutOfSequence { expected, given });
        }
        self.agents.push(agent);
        Ok(())
    }

    fn remove(&mut self, _id: AgentId) -> Result<A, ArenaError> {
        Err(ArenaError::RemovalUnsupported)
    }

    fn get(&self, id: AgentId) -> Option<&A> {
        Self::index(id).and_then(|i| self.agents.get(i))
    }

    fn get_mut(&mut self, id: AgentId) -> Option<&mut A> {
        Self::index(id).and_then(|i| self.agents.get_mut(i))
    }

    fn next_id(&self) -> AgentId {
        AgentId(self.agents.len() as u64)
    }

    fn len(&self) -> usize {
        self.agents.len()
    }

    fn supports_removal(&self) -> bool {
        false
    }

    fn ids(&self) -> Box<dyn Iterator<Item = AgentId> + '_> {
        Box::new((0..self.agents.len() as u64).map(AgentId))
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &A> + '_> {
        Box::new(self.agents.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plexus_core::AgentBase;

    fn agent(id: u64) -> AgentBase {
        AgentBase::new(AgentId(id), [0.0, 0.0])
    }

    #[test]
    fn append_in_sequence() {
        let mut arena = SeqArena::new();
        for i in 0..5 {
            assert_eq!(arena.next_id(), AgentId(i));
            arena.add(agent(i)).unwrap();
        }
        assert_eq!(arena.len(), 5);
        assert_eq!(arena.get(AgentId(3)).map(|a| a.id()), Some(AgentId(3)));
        assert_eq!(arena.ids().collect::<Vec<_>>().len(), 5);
    }

    #[test]
    fn out_of_sequence_is_hard_error() {
        let mut arena = SeqArena::new();
        arena.add(agent(0)).unwrap();
        assert_eq!(
            arena.add(agent(2)),
            Err(ArenaError::OutOfSequence {
                expected: AgentId(1),
                given: AgentId(2),
            })
        );
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn removal_is_rejected() {
        let mut arena = SeqArena::new();
        arena.add(agent(0)).unwrap();
        assert!(!arena.supports_removal());
        assert_eq!(
            arena.remove(AgentId(0)).unwrap_err(),
            ArenaError::RemovalUnsupported
        );
        assert!(arena.contains(AgentId(0)));
    }

    #[test]
    fn lookup_past_end_is_none() {
        let arena: SeqArena<AgentBase> = SeqArena::new();
        assert!(arena.get(AgentId(0)).is_none());
        assert!(arena.is_empty());
    }
}
