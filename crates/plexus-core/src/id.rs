//! Strongly-typed identifiers and the normalized [`Pair`] key.

use std::fmt;

/// Identifies an agent within a model.
///
/// Ids are allocated from a monotonically increasing counter and are never
/// reused within a model run. `AgentId(n)` carries no positional meaning
/// except in an append-only arena, where it equals the insertion index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(pub u64);

impl AgentId {
    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AgentId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Variant tag of an agent in a heterogeneous population.
///
/// A model whose agents are an enum returns one tag per variant from
/// [`Agent::kind`](crate::Agent::kind). Homogeneous populations use
/// [`KindTag::DEFAULT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindTag(pub u16);

impl KindTag {
    /// Tag reported by agents that do not override `kind()`.
    pub const DEFAULT: KindTag = KindTag(0);
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for KindTag {
    fn from(v: u16) -> Self {
        Self(v)
    }
}

/// An unordered pair of interacting agents, stored as `(min, max)`.
///
/// The only constructor normalizes its arguments, so `Pair::new(a, b)`
/// and `Pair::new(b, a)` are equal and hash identically. Used as the
/// deduplication key during pair extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pair(AgentId, AgentId);

impl Pair {
    /// Build the normalized pair of `a` and `b`.
    pub fn new(a: AgentId, b: AgentId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The smaller id.
    pub fn first(&self) -> AgentId {
        self.0
    }

    /// The larger id.
    pub fn second(&self) -> AgentId {
        self.1
    }

    /// Whether `id` is one of the two members.
    pub fn contains(&self, id: AgentId) -> bool {
        self.0 == id || self.1 == id
    }

    /// The member that is not `id`, if `id` is a member.
    pub fn partner_of(&self, id: AgentId) -> Option<AgentId> {
        if self.0 == id {
            Some(self.1)
        } else if self.1 == id {
            Some(self.0)
        } else {
            None
        }
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl From<(AgentId, AgentId)> for Pair {
    fn from((a, b): (AgentId, AgentId)) -> Self {
        Self::new(a, b)
    }
}
