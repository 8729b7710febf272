//! Spatial substrate for Plexus agent-based models.
//!
//! This crate defines the [`Space`] trait, the capability contract through
//! which a model places, moves and finds agents, along with three backends
//! and the indices behind them.
//!
//! # Backends
//!
//! - [`GraphSpace`]: agents on the nodes of an [`AdjacencyGraph`]; radii
//!   are hop counts, with [`NeighborMode`] for directed graphs.
//! - [`GridSpace`]: agents on a 1-, 2- or 3-D lattice with
//!   [`EdgeBehavior`] and [`Connectivity`]; radii are hop counts.
//! - [`ContinuousSpace`]: agents at real-valued points; radii are
//!   distances under a [`Metric`], periodic or bounded.
//!
//! Discrete backends additionally implement [`DiscreteSpace`].
//!
//! # Sampling
//!
//! [`sampling`] draws uniformly or by weight from lazy neighbour
//! sequences in a single pass.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod collision;
pub mod continuous;
pub mod coord_index;
pub mod edge;
pub mod error;
pub mod graph;
pub mod graph_space;
pub mod grid;
pub mod index;
pub mod linear;
pub mod metric;
pub mod sampling;
pub mod space;

#[cfg(test)]
pub(crate) mod compliance;

pub use collision::{elastic_collision, Body};
pub use continuous::{ContinuousConfig, ContinuousSpace};
pub use coord_index::{BoxScan, CoordIndex};
pub use edge::{Connectivity, EdgeBehavior};
pub use error::SpaceError;
pub use graph::{AdjacencyGraph, GraphBuilder, NeighborMode};
pub use graph_space::GraphSpace;
pub use grid::GridSpace;
pub use index::DiscreteIndex;
pub use linear::LinearIndexer;
pub use metric::Metric;
pub use sampling::SamplingStrategy;
pub use space::{hop_radius, DiscreteSpace, IdIter, Space};
