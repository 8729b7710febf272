//! Boundary and connectivity options for lattice backends.

/// How a grid handles neighbours at its edges.
///
/// # Examples
///
/// ```
/// use plexus_core::Position;
/// use plexus_space::{Connectivity, DiscreteSpace, EdgeBehavior, GridSpace};
///
/// // Absorb: a corner of a 4x4 Moore grid has 3 neighbours.
/// let absorb = GridSpace::new(&[4, 4], EdgeBehavior::Absorb, Connectivity::Moore).unwrap();
/// assert_eq!(absorb.nearby_positions(&Position::from([0i32, 0]), 1).unwrap().len(), 3);
///
/// // Wrap: every cell has 8 neighbours (torus).
/// let wrap = GridSpace::new(&[4, 4], EdgeBehavior::Wrap, Connectivity::Moore).unwrap();
/// assert_eq!(wrap.nearby_positions(&Position::from([0i32, 0]), 1).unwrap().len(), 8);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EdgeBehavior {
    /// Out-of-bounds neighbours are omitted (fewer neighbours at edges).
    Absorb,
    /// Out-of-bounds neighbours wrap to the opposite side (periodic).
    Wrap,
}

impl EdgeBehavior {
    /// Whether this is the periodic behavior.
    pub fn is_periodic(self) -> bool {
        matches!(self, Self::Wrap)
    }
}

/// Which cells of a 2-D layer count as adjacent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Connectivity {
    /// 4 neighbours: the axis-aligned cells.
    VonNeumann,
    /// 8 neighbours: axis-aligned plus diagonal cells.
    Moore,
}
