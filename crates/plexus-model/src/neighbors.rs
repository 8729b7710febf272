//! Nearest-neighbour lookup and random neighbour draws.

use crate::error::ModelError;
use crate::model::Model;
use plexus_arena::AgentArena;
use plexus_core::{Agent, AgentId};
use plexus_space::sampling::{sample_one, sample_where};
use plexus_space::Space;

impl<S: Space, A: Agent, Ar: AgentArena<A>> Model<S, A, Ar> {
    /// The closest other agent within `r` of agent `id`.
    ///
    /// Ties keep the first candidate the space yields. Returns `Ok(None)`
    /// when no other agent is in range.
    pub fn nearest_neighbor(&self, id: AgentId, r: f64) -> Result<Option<AgentId>, ModelError> {
        Ok(self.nearest_with_distance(id, r)?.map(|(nb, _)| nb))
    }

    pub(crate) fn nearest_with_distance(
        &self,
        id: AgentId,
        r: f64,
    ) -> Result<Option<(AgentId, f64)>, ModelError> {
        let pos = self
            .arena
            .get(id)
            .ok_or(ModelError::UnknownAgent { id })?
            .pos();
        let mut best: Option<(AgentId, f64)> = None;
        for other in self.space.nearby_ids(pos, r)? {
            if other == id {
                continue;
            }
            let Some(agent) = self.arena.get(other) else {
                continue;
            };
            let d = self.space.distance(pos, agent.pos())?;
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((other, d));
            }
        }
        Ok(best)
    }

    /// A uniformly random agent id within `r` of agent `id`, excluding `id`.
    pub fn random_nearby_id(&mut self, id: AgentId, r: f64) -> Result<Option<AgentId>, ModelError> {
        let pos = self
            .arena
            .get(id)
            .ok_or(ModelError::UnknownAgent { id })?
            .pos();
        let candidates = self.space.nearby_ids(pos, r)?.filter(|&o| o != id);
        Ok(sample_one(candidates, &mut self.rng))
    }

    /// Like [`random_nearby_id`](Self::random_nearby_id), restricted to ids
    /// satisfying `pred`. Draws with the configured
    /// [`SamplingStrategy`](plexus_space::SamplingStrategy).
    pub fn random_nearby_id_where(
        &mut self,
        id: AgentId,
        r: f64,
        mut pred: impl FnMut(AgentId) -> bool,
    ) -> Result<Option<AgentId>, ModelError> {
        let strategy = self.config.sampling;
        let pos = self
            .arena
            .get(id)
            .ok_or(ModelError::UnknownAgent { id })?
            .pos();
        let candidates = self.space.nearby_ids(pos, r)?.filter(|&o| o != id);
        Ok(sample_where(
            candidates,
            |&o| pred(o),
            strategy,
            &mut self.rng,
        ))
    }

    /// A uniformly random agent within `r` of agent `id`, excluding `id`.
    pub fn random_nearby_agent(&mut self, id: AgentId, r: f64) -> Result<Option<&A>, ModelError> {
        let pos = self
            .arena
            .get(id)
            .ok_or(ModelError::UnknownAgent { id })?
            .pos();
        let arena = &self.arena;
        let candidates = self
            .space
            .nearby_ids(pos, r)?
            .filter(|&o| o != id)
            .filter_map(|o| arena.get(o));
        Ok(sample_one(candidates, &mut self.rng))
    }

    /// A uniformly random agent within `r` of agent `id` satisfying `pred`.
    pub fn random_nearby_agent_where(
        &mut self,
        id: AgentId,
        r: f64,
        mut pred: impl FnMut(&A) -> bool,
    ) -> Result<Option<&A>, ModelError> {
        let strategy = self.config.sampling;
        let pos = self
            .arena
            .get(id)
            .ok_or(ModelError::UnknownAgent { id })?
            .pos();
        let arena = &self.arena;
        let candidates = self
            .space
            .nearby_ids(pos, r)?
            .filter(|&o| o != id)
            .filter_map(|o| arena.get(o));
        Ok(sample_where(
            candidates,
            |a: &&A| pred(*a),
            strategy,
            &mut self.rng,
        ))
    }
}
