//! Relative movement on grids and in continuous space.

use crate::error::ModelError;
use crate::model::Model;
use plexus_arena::AgentArena;
use plexus_core::{Agent, AgentId, Position};
use plexus_space::{ContinuousSpace, GridSpace, SpaceError};

impl<A: Agent, Ar: AgentArena<A>> Model<GridSpace, A, Ar> {
    /// Move agent `id` by `delta` cells, returning where it landed.
    ///
    /// On a wrapping grid the move wraps; otherwise each axis stops at
    /// the border.
    pub fn walk(&mut self, id: AgentId, delta: &[i32]) -> Result<Position, ModelError> {
        let from = self
            .arena
            .get(id)
            .ok_or(ModelError::UnknownAgent { id })?
            .pos();
        let target = self.space.walk_target(from, delta)?;
        self.move_agent(id, target.clone())?;
        Ok(target)
    }
}

impl<A: Agent, Ar: AgentArena<A>> Model<ContinuousSpace, A, Ar> {
    /// Move agent `id` by `delta`, returning where it landed.
    ///
    /// A periodic space wraps the result; a bounded one clamps it to the
    /// box.
    pub fn walk(&mut self, id: AgentId, delta: &[f64]) -> Result<Position, ModelError> {
        let from = self
            .arena
            .get(id)
            .ok_or(ModelError::UnknownAgent { id })?
            .pos();
        let target = self.space.walk_target(from, delta)?;
        self.move_agent(id, target.clone())?;
        Ok(target)
    }

    /// Advance agent `id` along `vel` for a time step `dt`.
    pub fn move_by_velocity(
        &mut self,
        id: AgentId,
        vel: &[f64],
        dt: f64,
    ) -> Result<Position, ModelError> {
        if !dt.is_finite() {
            return Err(SpaceError::InvalidConfig {
                reason: format!("time step must be finite, got {dt}"),
            }
            .into());
        }
        let delta: Vec<f64> = vel.iter().map(|v| v * dt).collect();
        self.walk(id, &delta)
    }
}
