//! Agent storage for Plexus models.
//!
//! Two storage disciplines implement [`AgentArena`]:
//!
//! - [`MapArena`]: keyed by id, supports removal, ids strictly increase.
//! - [`SeqArena`]: append-only, the id of every new agent must equal the
//!   current length, removal is rejected.
//!
//! Arenas know nothing about space. The code performing add/remove/move
//! keeps an arena and a space index mutually consistent.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod error;
pub mod map;
pub mod sequence;

pub use arena::AgentArena;
pub use error::ArenaError;
pub use map::MapArena;
pub use sequence::SeqArena;
