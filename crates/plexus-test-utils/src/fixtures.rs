//! Reusable agent fixtures.
//!
//! - [`Walker`]: a homogeneous agent that counts its moves.
//! - [`Critter`]: an enum population with three kinds, for type-aware
//!   pair extraction.

use plexus_core::{Agent, AgentBase, KindTag};

/// A plain agent with a step counter.
#[derive(Clone, Debug, PartialEq)]
pub struct Walker {
    pub base: AgentBase,
    pub steps: u32,
}

impl Walker {
    /// Usable directly as a `build` callback: `model.add_agent_at(pos, Walker::new)`.
    pub fn new(base: AgentBase) -> Self {
        Self { base, steps: 0 }
    }
}

impl Agent for Walker {
    fn base(&self) -> &AgentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AgentBase {
        &mut self.base
    }
}

/// A predator-prey population in one enum.
#[derive(Clone, Debug, PartialEq)]
pub enum Critter {
    Sheep { base: AgentBase, energy: f64 },
    Wolf { base: AgentBase, energy: f64 },
    Grass { base: AgentBase, grown: bool },
}

impl Critter {
    pub const SHEEP: KindTag = KindTag(1);
    pub const WOLF: KindTag = KindTag(2);
    pub const GRASS: KindTag = KindTag(3);

    pub fn sheep(base: AgentBase) -> Self {
        Self::Sheep { base, energy: 4.0 }
    }

    pub fn wolf(base: AgentBase) -> Self {
        Self::Wolf { base, energy: 10.0 }
    }

    pub fn grass(base: AgentBase) -> Self {
        Self::Grass { base, grown: true }
    }
}

impl Agent for Critter {
    fn base(&self) -> &AgentBase {
        match self {
            Self::Sheep { base, .. } | Self::Wolf { base, .. } | Self::Grass { base, .. } => base,
        }
    }

    fn base_mut(&mut self) -> &mut AgentBase {
        match self {
            Self::Sheep { base, .. } | Self::Wolf { base, .. } | Self::Grass { base, .. } => base,
        }
    }

    fn kind(&self) -> KindTag {
        match self {
            Self::Sheep { .. } => Self::SHEEP,
            Self::Wolf { .. } => Self::WOLF,
            Self::Grass { .. } => Self::GRASS,
        }
    }
}
