//! The `Space` capability contract shared by every backend.

use crate::error::SpaceError;
use crate::index::DiscreteIndex;
use crate::sampling::sample_one;
use plexus_core::{AgentId, Position, PositionKind};
use rand::RngCore;

/// Boxed iterator over agent ids, borrowed from a space.
pub type IdIter<'a> = Box<dyn Iterator<Item = AgentId> + 'a>;

/// Central spatial abstraction for Plexus models.
///
/// A space owns the position index of the agents placed in it and answers
/// neighbour queries against that index. Concrete backends
/// ([`GraphSpace`](crate::GraphSpace), [`GridSpace`](crate::GridSpace),
/// [`ContinuousSpace`](crate::ContinuousSpace)) differ in position kind,
/// radius semantics and distance.
///
/// # Object Safety
///
/// The trait is usable as `dyn Space`; randomised operations take
/// `&mut dyn RngCore` so that the caller owns the generator.
///
/// # Atomicity
///
/// Every mutator validates its arguments before touching the index. A call
/// that returns `Err` leaves the space unchanged.
pub trait Space: Send + Sync {
    /// The position kind this space stores.
    fn kind(&self) -> PositionKind;

    /// Number of coordinates of a position in this space.
    fn ndim(&self) -> usize;

    /// Check that `pos` is of the right kind, shape and range.
    fn validate(&self, pos: &Position) -> Result<(), SpaceError>;

    /// A uniformly random valid position.
    fn random_position(&self, rng: &mut dyn RngCore) -> Position;

    /// Register `id` at `pos`.
    fn add_to_space(&mut self, id: AgentId, pos: &Position) -> Result<(), SpaceError>;

    /// Unregister `id`, returning the position it occupied.
    fn remove_from_space(&mut self, id: AgentId) -> Result<Position, SpaceError>;

    /// Move `id` to `pos`, returning the position it left.
    fn move_agent(&mut self, id: AgentId, pos: &Position) -> Result<Position, SpaceError>;

    /// The position `id` is registered at, if any.
    fn position_of(&self, id: AgentId) -> Option<Position>;

    /// Number of registered agents.
    fn resident_count(&self) -> usize;

    /// All registered ids.
    fn resident_ids(&self) -> IdIter<'_>;

    /// Ids within radius `r` of `pos`, including ids exactly at `pos`.
    ///
    /// Discrete backends read `r` as a hop count (`floor(r)`); the
    /// continuous backend reads it as a metric distance. Each id is
    /// yielded once. A negative or NaN radius is rejected with
    /// [`SpaceError::InvalidRadius`].
    fn nearby_ids<'a>(&'a self, pos: &Position, r: f64) -> Result<IdIter<'a>, SpaceError>;

    /// Distance between two positions under this space's metric.
    fn distance(&self, a: &Position, b: &Position) -> Result<f64, SpaceError>;
}

/// Capabilities of spaces with a finite, enumerable position set.
///
/// Positions are numbered `0..position_count()` ("slots"); the mapping is
/// a bijection between valid positions and slots.
pub trait DiscreteSpace: Space {
    /// Number of distinct positions.
    fn position_count(&self) -> usize;

    /// Slot of a valid position.
    fn slot_of(&self, pos: &Position) -> Result<usize, SpaceError>;

    /// Position of `slot`, or `None` if out of range.
    fn position_at(&self, slot: usize) -> Option<Position>;

    /// The bucket index backing this space.
    fn index(&self) -> &DiscreteIndex;

    /// Slots within `hops` of `slot`, `slot` first, each once.
    fn slots_within(&self, slot: usize, hops: usize) -> Result<Vec<usize>, SpaceError>;

    /// Ids resident exactly at `pos`.
    fn ids_in_position(&self, pos: &Position) -> Result<Vec<AgentId>, SpaceError> {
        let slot = self.slot_of(pos)?;
        Ok(self.index().ids_at(slot).collect())
    }

    /// Whether no agent is resident at `pos`.
    fn is_empty_position(&self, pos: &Position) -> Result<bool, SpaceError> {
        let slot = self.slot_of(pos)?;
        Ok(self.index().count_at(slot) == 0)
    }

    /// Positions within `hops` of `pos`, excluding `pos` itself.
    fn nearby_positions(&self, pos: &Position, hops: usize) -> Result<Vec<Position>, SpaceError> {
        let slot = self.slot_of(pos)?;
        Ok(self
            .slots_within(slot, hops)?
            .into_iter()
            .filter(|&s| s != slot)
            .filter_map(|s| self.position_at(s))
            .collect())
    }

    /// A uniformly random unoccupied position, or `None` when all are full.
    ///
    /// Single pass over the slots; nothing is allocated.
    fn random_empty(&self, rng: &mut dyn RngCore) -> Option<Position> {
        let index = self.index();
        let empty = (0..self.position_count()).filter(|&s| index.count_at(s) == 0);
        sample_one(empty, rng).and_then(|s| self.position_at(s))
    }
}

/// Convert a query radius to a hop count for discrete spaces.
///
/// `floor(r)` for finite non-negative `r`; `usize::MAX` for `+inf`.
pub fn hop_radius(r: f64) -> Result<usize, SpaceError> {
    if r.is_nan() || r < 0.0 {
        return Err(SpaceError::InvalidRadius { radius: r });
    }
    // `as` saturates, so +inf maps to usize::MAX.
    Ok(r.floor() as usize)
}

/// Check a metric radius for continuous spaces.
pub(crate) fn check_radius(r: f64) -> Result<(), SpaceError> {
    if r.is_nan() || r < 0.0 {
        Err(SpaceError::InvalidRadius { radius: r })
    } else {
        Ok(())
    }
}

/// Snapshot of the ids resident in `slots`, in slot order.
pub(crate) fn ids_in_slots(index: &DiscreteIndex, slots: &[usize]) -> Vec<AgentId> {
    let total = slots.iter().map(|&s| index.count_at(s)).sum();
    let mut ids = Vec::with_capacity(total);
    for &s in slots {
        ids.extend(index.ids_at(s));
    }
    ids
}

/// The error for a position of the wrong kind.
pub(crate) fn kind_mismatch(expected: PositionKind, pos: &Position) -> SpaceError {
    SpaceError::KindMismatch {
        expected,
        given: pos.kind(),
    }
}
