//! Plexus: the spatial substrate of agent-based models.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Plexus sub-crates. For most users, adding `plexus` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use plexus::prelude::*;
//!
//! struct Sheep {
//!     base: AgentBase,
//!     energy: f64,
//! }
//!
//! impl Agent for Sheep {
//!     fn base(&self) -> &AgentBase { &self.base }
//!     fn base_mut(&mut self) -> &mut AgentBase { &mut self.base }
//! }
//!
//! // A 20x20 wrapping grid where each cell touches its 8 neighbours.
//! let space = GridSpace::new(&[20, 20], EdgeBehavior::Wrap, Connectivity::Moore).unwrap();
//! let mut model: Model<_, Sheep> = Model::with_space(space, ModelConfig::seeded(42));
//!
//! for _ in 0..50 {
//!     model
//!         .add_agent_to_empty(|base| Sheep { base, energy: 5.0 })
//!         .unwrap();
//! }
//!
//! let first = AgentId(0);
//! let crowd = model.nearby_ids_of(first, 2.0).unwrap().count();
//! assert!(crowd <= 24);
//!
//! let pairs = model.interacting_pairs(1.0, PairPolicy::Nearest).unwrap();
//! assert!(pairs.len() <= 25);
//! model.check_consistency().unwrap();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `plexus-core` | Ids, positions, the `Agent` trait |
//! | [`arena`] | `plexus-arena` | Agent storage |
//! | [`space`] | `plexus-space` | Spatial backends, indices, sampling, collisions |
//! | [`model`] | `plexus-model` | Arena/space consistency, neighbours, pairs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Ids, positions and the agent trait (`plexus-core`).
pub use plexus_core as types;

/// Agent storage (`plexus-arena`).
///
/// [`arena::MapArena`] supports removal; [`arena::SeqArena`] is
/// append-only and indexes by id directly.
pub use plexus_arena as arena;

/// Spatial backends (`plexus-space`).
///
/// Provides the [`space::Space`] trait and the backends
/// [`space::GraphSpace`], [`space::GridSpace`] and
/// [`space::ContinuousSpace`].
pub use plexus_space as space;

/// Models that keep agents and a space in agreement (`plexus-model`).
pub use plexus_model as model;

/// Common imports for typical Plexus usage.
///
/// ```rust
/// use plexus::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use plexus_core::{Agent, AgentBase, AgentId, KindTag, Pair, Position, PositionKind};

    // Storage
    pub use plexus_arena::{AgentArena, MapArena, SeqArena};

    // Space
    pub use plexus_space::{
        AdjacencyGraph, Connectivity, ContinuousConfig, ContinuousSpace, DiscreteSpace,
        EdgeBehavior, GraphSpace, GridSpace, Metric, SamplingStrategy, Space,
    };

    // Errors
    pub use plexus_arena::ArenaError;
    pub use plexus_model::ModelError;
    pub use plexus_space::SpaceError;

    // Model
    pub use plexus_model::{Model, ModelConfig, PairPolicy};
}
