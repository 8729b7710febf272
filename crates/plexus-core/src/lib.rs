//! Core types for the Plexus agent-based simulation substrate.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared by every other Plexus crate:
//! agent identifiers, tagged positions, normalized interaction pairs and
//! the [`Agent`] trait with its embedded [`AgentBase`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod id;
pub mod position;

pub use agent::{Agent, AgentBase};
pub use id::{AgentId, KindTag, Pair};
pub use position::{Cell, Point, Position, PositionKind};
