//! Benchmark profiles for Plexus.
//!
//! Pre-populated models used by the criterion benches:
//!
//! - [`grid_profile`]: a square wrapping Moore grid
//! - [`continuous_profile`]: a square periodic Euclidean box
//! - [`graph_profile`]: a ring graph

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use plexus_model::{Model, ModelConfig};
use plexus_space::{
    AdjacencyGraph, Connectivity, ContinuousConfig, ContinuousSpace, EdgeBehavior, GraphSpace,
    GridSpace, Metric,
};
use plexus_test_utils::Walker;

/// A `side` x `side` wrapping Moore grid holding `agents` randomly placed
/// walkers.
pub fn grid_profile(side: usize, agents: usize, seed: u64) -> Model<GridSpace, Walker> {
    let space = GridSpace::new(&[side, side], EdgeBehavior::Wrap, Connectivity::Moore)
        .unwrap_or_else(|e| panic!("grid profile {side}x{side}: {e}"));
    populate(Model::with_space(space, ModelConfig::seeded(seed)), agents)
}

/// A periodic Euclidean box of side `extent` holding `agents` randomly
/// placed walkers, indexed with cells of side `spacing`.
pub fn continuous_profile(
    extent: f64,
    spacing: f64,
    agents: usize,
    seed: u64,
) -> Model<ContinuousSpace, Walker> {
    let config = ContinuousConfig::new(&[extent, extent])
        .with_spacing(spacing)
        .with_metric(Metric::Euclidean)
        .periodic(true);
    let space = ContinuousSpace::new(config)
        .unwrap_or_else(|e| panic!("continuous profile {extent}/{spacing}: {e}"));
    populate(Model::with_space(space, ModelConfig::seeded(seed)), agents)
}

/// A ring of `nodes` nodes holding `agents` randomly placed walkers.
pub fn graph_profile(nodes: usize, agents: usize, seed: u64) -> Model<GraphSpace, Walker> {
    let space = GraphSpace::new(AdjacencyGraph::cycle(nodes))
        .unwrap_or_else(|e| panic!("graph profile {nodes}: {e}"));
    populate(Model::with_space(space, ModelConfig::seeded(seed)), agents)
}

fn populate<S: plexus_space::Space>(mut model: Model<S, Walker>, agents: usize) -> Model<S, Walker> {
    for _ in 0..agents {
        model
            .add_agent_random(Walker::new)
            .unwrap_or_else(|e| panic!("profile placement: {e}"));
    }
    model
}
