//! The model: an agent arena and a space kept in agreement.

use crate::config::ModelConfig;
use crate::error::ModelError;
use indexmap::IndexMap;
use plexus_arena::{AgentArena, ArenaError, MapArena};
use plexus_core::{Agent, AgentBase, AgentId, KindTag, Position};
use plexus_space::sampling::{sample_one, sample_where};
use plexus_space::{DiscreteSpace, IdIter, Space, SpaceError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::marker::PhantomData;
use tracing::{debug, trace};

/// A population of agents of type `A` stored in arena `Ar` and placed in
/// space `S`.
///
/// Every agent in the arena is registered in the space at exactly the
/// position its [`AgentBase`] records. All mutation goes through the
/// model ([`add_agent`](Self::add_agent), [`move_agent`](Self::move_agent),
/// [`kill_agent`](Self::kill_agent)), each of which validates first and
/// mutates second, so a failed call leaves both structures untouched.
///
/// The model owns a seeded [`ChaCha8Rng`]; every randomized operation
/// draws from it, so a run is reproducible from
/// [`ModelConfig::seed`].
pub struct Model<S, A, Ar = MapArena<A>> {
    pub(crate) space: S,
    pub(crate) arena: Ar,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) config: ModelConfig,
    _agent: PhantomData<fn() -> A>,
}

impl<S: Space, A: Agent> Model<S, A> {
    /// A model over `space` storing agents in a [`MapArena`].
    pub fn with_space(space: S, config: ModelConfig) -> Self {
        Self::new(space, MapArena::new(), config)
    }
}

impl<S: Space, A: Agent, Ar: AgentArena<A>> Model<S, A, Ar> {
    /// A model over `space` storing agents in `arena`.
    ///
    /// Agents already in `arena` are not placed in `space`; start from an
    /// empty arena and add agents through the model.
    pub fn new(space: S, arena: Ar, config: ModelConfig) -> Self {
        debug!(seed = config.seed, kind = %space.kind(), "model created");
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            space,
            arena,
            config,
            _agent: PhantomData,
        }
    }

    /// The space.
    pub fn space(&self) -> &S {
        &self.space
    }

    /// The agent arena.
    pub fn arena(&self) -> &Ar {
        &self.arena
    }

    /// The configuration the model was built with.
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// The model's random generator, for agent stepping code.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Look up an agent.
    pub fn agent(&self, id: AgentId) -> Option<&A> {
        self.arena.get(id)
    }

    /// Look up an agent mutably.
    ///
    /// Use [`move_agent`](Self::move_agent) to change its position;
    /// writing the position through this reference leaves the space index
    /// pointing at the old one.
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut A> {
        self.arena.get_mut(id)
    }

    /// Number of agents.
    pub fn agent_count(&self) -> usize {
        self.arena.len()
    }

    /// Ids of all agents in arena order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.arena.ids()
    }

    /// All agents in arena order.
    pub fn agents(&self) -> impl Iterator<Item = &A> + '_ {
        self.arena.iter()
    }

    /// The id the next agent built by the model will carry.
    pub fn next_id(&self) -> AgentId {
        self.arena.next_id()
    }

    /// Add `agent` at the position it records.
    pub fn add_agent(&mut self, agent: A) -> Result<AgentId, ModelError> {
        let id = agent.id();
        let pos = agent.pos().clone();
        self.space.validate(&pos)?;
        if self.space.position_of(id).is_some() {
            return Err(SpaceError::AlreadyPlaced { id }.into());
        }
        self.arena.add(agent)?;
        self.space.add_to_space(id, &pos)?;
        trace!(%id, %pos, "agent added");
        Ok(id)
    }

    /// Build an agent with the next free id at `pos` and add it.
    pub fn add_agent_at(
        &mut self,
        pos: impl Into<Position>,
        build: impl FnOnce(AgentBase) -> A,
    ) -> Result<AgentId, ModelError> {
        let base = AgentBase::new(self.next_id(), pos);
        self.add_agent(build(base))
    }

    /// Build an agent with the next free id at a random position and add it.
    pub fn add_agent_random(
        &mut self,
        build: impl FnOnce(AgentBase) -> A,
    ) -> Result<AgentId, ModelError> {
        let pos = self.space.random_position(&mut self.rng);
        self.add_agent_at(pos, build)
    }

    /// Move agent `id` to `pos`, returning the position it left.
    pub fn move_agent(
        &mut self,
        id: AgentId,
        pos: impl Into<Position>,
    ) -> Result<Position, ModelError> {
        let pos = pos.into();
        let agent = self
            .arena
            .get_mut(id)
            .ok_or(ModelError::UnknownAgent { id })?;
        let old = self.space.move_agent(id, &pos)?;
        trace!(%id, from = %old, to = %pos, "agent moved");
        agent.base_mut().set_pos(pos);
        Ok(old)
    }

    /// Remove agent `id` from the space and the arena, returning it.
    ///
    /// Fails without touching anything when the arena is append-only.
    pub fn kill_agent(&mut self, id: AgentId) -> Result<A, ModelError> {
        if !self.arena.supports_removal() {
            return Err(ArenaError::RemovalUnsupported.into());
        }
        if !self.arena.contains(id) {
            return Err(ModelError::UnknownAgent { id });
        }
        self.space.remove_from_space(id)?;
        let agent = self.arena.remove(id)?;
        trace!(%id, "agent killed");
        Ok(agent)
    }

    /// Ids within `r` of `pos`, including any agent exactly at `pos`.
    pub fn nearby_ids(&self, pos: &Position, r: f64) -> Result<IdIter<'_>, ModelError> {
        Ok(self.space.nearby_ids(pos, r)?)
    }

    /// Ids within `r` of agent `id`, excluding `id` itself.
    pub fn nearby_ids_of(
        &self,
        id: AgentId,
        r: f64,
    ) -> Result<impl Iterator<Item = AgentId> + '_, ModelError> {
        let pos = self
            .arena
            .get(id)
            .ok_or(ModelError::UnknownAgent { id })?
            .pos();
        Ok(self
            .space
            .nearby_ids(pos, r)?
            .filter(move |&other| other != id))
    }

    /// Agents within `r` of agent `id`, excluding `id` itself.
    pub fn nearby_agents(
        &self,
        id: AgentId,
        r: f64,
    ) -> Result<impl Iterator<Item = &A> + '_, ModelError> {
        Ok(self
            .nearby_ids_of(id, r)?
            .filter_map(move |other| self.arena.get(other)))
    }

    /// A uniformly random agent, or `None` when the model is empty.
    pub fn random_agent(&mut self) -> Option<&A> {
        let id = sample_one(self.arena.ids(), &mut self.rng)?;
        self.arena.get(id)
    }

    /// A uniformly random agent satisfying `pred`.
    pub fn random_agent_where(&mut self, mut pred: impl FnMut(&A) -> bool) -> Option<&A> {
        let strategy = self.config.sampling;
        sample_where(self.arena.iter(), |a: &&A| pred(*a), strategy, &mut self.rng)
    }

    /// Partition agent ids by [`Agent::kind`], kinds in first-seen order.
    pub fn ids_by_kind(&self) -> IndexMap<KindTag, Vec<AgentId>> {
        let mut groups: IndexMap<KindTag, Vec<AgentId>> = IndexMap::new();
        for agent in self.arena.iter() {
            groups.entry(agent.kind()).or_default().push(agent.id());
        }
        groups
    }

    /// Verify that the arena and the space index agree.
    ///
    /// Every agent must be registered at the position it records, and the
    /// space must hold no other ids.
    pub fn check_consistency(&self) -> Result<(), ModelError> {
        if self.arena.len() != self.space.resident_count() {
            return Err(ModelError::Inconsistent {
                reason: format!(
                    "arena holds {} agents, space holds {}",
                    self.arena.len(),
                    self.space.resident_count()
                ),
            });
        }
        for agent in self.arena.iter() {
            let id = agent.id();
            match self.space.position_of(id) {
                Some(p) if &p == agent.pos() => {}
                Some(p) => {
                    return Err(ModelError::Inconsistent {
                        reason: format!("agent {id} records {} but space has {p}", agent.pos()),
                    })
                }
                None => {
                    return Err(ModelError::Inconsistent {
                        reason: format!("agent {id} is not in the space"),
                    })
                }
            }
        }
        Ok(())
    }
}

impl<S: DiscreteSpace, A: Agent, Ar: AgentArena<A>> Model<S, A, Ar> {
    /// A uniformly random unoccupied position.
    pub fn random_empty(&mut self) -> Option<Position> {
        self.space.random_empty(&mut self.rng)
    }

    /// Build an agent with the next free id at a random empty position.
    pub fn add_agent_to_empty(
        &mut self,
        build: impl FnOnce(AgentBase) -> A,
    ) -> Result<AgentId, ModelError> {
        let pos = self
            .space
            .random_empty(&mut self.rng)
            .ok_or(ModelError::NoEmptyPosition)?;
        self.add_agent_at(pos, build)
    }

    /// Ids resident exactly at `pos`.
    pub fn ids_in_position(&self, pos: &Position) -> Result<Vec<AgentId>, ModelError> {
        Ok(self.space.ids_in_position(pos)?)
    }

    /// Positions within `hops` of `pos`, excluding `pos`.
    pub fn nearby_positions(
        &self,
        pos: &Position,
        hops: usize,
    ) -> Result<Vec<Position>, ModelError> {
        Ok(self.space.nearby_positions(pos, hops)?)
    }

    /// A uniformly random position within `hops` of `pos`, excluding `pos`.
    pub fn random_nearby_position(
        &mut self,
        pos: &Position,
        hops: usize,
    ) -> Result<Option<Position>, ModelError> {
        let candidates = self.space.nearby_positions(pos, hops)?;
        Ok(sample_one(candidates, &mut self.rng))
    }

    /// Like [`random_nearby_position`](Self::random_nearby_position),
    /// restricted to positions satisfying `pred`.
    pub fn random_nearby_position_where(
        &mut self,
        pos: &Position,
        hops: usize,
        pred: impl FnMut(&Position) -> bool,
    ) -> Result<Option<Position>, ModelError> {
        let candidates = self.space.nearby_positions(pos, hops)?;
        let strategy = self.config.sampling;
        Ok(sample_where(candidates, pred, strategy, &mut self.rng))
    }

    /// Move agent `id` to a random position within `hops` of where it is.
    ///
    /// Stays put, returning the current position, when there is none.
    pub fn random_walk(&mut self, id: AgentId, hops: usize) -> Result<Position, ModelError> {
        let from = self
            .arena
            .get(id)
            .ok_or(ModelError::UnknownAgent { id })?
            .pos()
            .clone();
        match self.random_nearby_position(&from, hops)? {
            Some(to) => {
                self.move_agent(id, to.clone())?;
                Ok(to)
            }
            None => Ok(from),
        }
    }
}
