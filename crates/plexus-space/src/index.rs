//! Bucket index from discrete positions to resident agents.

use crate::error::SpaceError;
use indexmap::{IndexMap, IndexSet};
use plexus_core::AgentId;

/// One bucket of agent ids per graph node or grid cell.
///
/// Alongside the buckets, a reverse map records the slot of every
/// resident id, so removal needs only the id. Invariant: every resident id
/// is in exactly one bucket, and that bucket is the one the reverse map
/// names. All mutators validate their arguments before touching either
/// structure, so a failed call leaves the index unchanged.
#[derive(Clone, Debug)]
pub struct DiscreteIndex {
    buckets: Vec<IndexSet<AgentId>>,
    slot_of: IndexMap<AgentId, usize>,
}

impl DiscreteIndex {
    /// Create an index with `slots` empty buckets.
    pub fn new(slots: usize) -> Self {
        Self {
            buckets: vec![IndexSet::new(); slots],
            slot_of: IndexMap::new(),
        }
    }

    /// Number of buckets.
    pub fn slot_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of resident agents.
    pub fn len(&self) -> usize {
        self.slot_of.len()
    }

    /// Whether no agents are resident.
    pub fn is_empty(&self) -> bool {
        self.slot_of.is_empty()
    }

    /// Register `id` in `slot`.
    pub fn insert(&mut self, id: AgentId, slot: usize) -> Result<(), SpaceError> {
        self.check_slot(slot)?;
        if self.slot_of.contains_key(&id) {
            return Err(SpaceError::AlreadyPlaced { id });
        }
        self.buckets[slot].insert(id);
        self.slot_of.insert(id, slot);
        Ok(())
    }

    /// Unregister `id`, returning the slot it occupied.
    pub fn remove(&mut self, id: AgentId) -> Result<usize, SpaceError> {
        let slot = self
            .slot_of
            .swap_remove(&id)
            .ok_or(SpaceError::NotPlaced { id })?;
        self.buckets[slot].swap_remove(&id);
        Ok(slot)
    }

    /// Move `id` to `slot`, returning the slot it left.
    pub fn relocate(&mut self, id: AgentId, slot: usize) -> Result<usize, SpaceError> {
        self.check_slot(slot)?;
        let entry = self
            .slot_of
            .get_mut(&id)
            .ok_or(SpaceError::NotPlaced { id })?;
        let old = std::mem::replace(entry, slot);
        if old != slot {
            self.buckets[old].swap_remove(&id);
            self.buckets[slot].insert(id);
        }
        Ok(old)
    }

    /// The slot `id` occupies.
    pub fn slot_of(&self, id: AgentId) -> Option<usize> {
        self.slot_of.get(&id).copied()
    }

    /// Ids resident in `slot`; empty for out-of-range slots.
    pub fn ids_at(&self, slot: usize) -> impl Iterator<Item = AgentId> + '_ {
        self.buckets.get(slot).into_iter().flatten().copied()
    }

    /// Number of ids resident in `slot`.
    pub fn count_at(&self, slot: usize) -> usize {
        self.buckets.get(slot).map_or(0, |b| b.len())
    }

    /// All resident ids.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.slot_of.keys().copied()
    }

    /// Check the bucket/reverse-map invariant. Used by tests.
    pub fn is_consistent(&self) -> bool {
        let bucketed: usize = self.buckets.iter().map(|b| b.len()).sum();
        bucketed == self.slot_of.len()
            && self
                .slot_of
                .iter()
                .all(|(id, &slot)| self.buckets.get(slot).is_some_and(|b| b.contains(id)))
    }

    fn check_slot(&self, slot: usize) -> Result<(), SpaceError> {
        if slot < self.buckets.len() {
            Ok(())
        } else {
            Err(SpaceError::NodeOutOfRange {
                node: slot,
                node_count: self.buckets.len(),
            })
        }
    }
}
