//! Agent populations placed in a space.
//!
//! [`Model`] owns an agent arena, a [`Space`](plexus_space::Space) and a
//! seeded random generator, and keeps the first two in agreement: every
//! stored agent is registered in the space at the position it records.
//!
//! On top of that invariant the model offers:
//!
//! - lifecycle: [`Model::add_agent`], [`Model::move_agent`],
//!   [`Model::kill_agent`] and random placement helpers;
//! - neighbour queries: [`Model::nearby_ids_of`],
//!   [`Model::nearest_neighbor`] and single-pass random draws;
//! - pair extraction: [`Model::interacting_pairs`] with a [`PairPolicy`];
//! - relative motion on grids and in continuous space (`walk`,
//!   `move_by_velocity`).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod model;
pub mod motion;
pub mod neighbors;
pub mod pairs;

pub use config::ModelConfig;
pub use error::ModelError;
pub use model::Model;
pub use pairs::PairPolicy;
