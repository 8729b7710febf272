//! Grid space: agents live on the cells of a 1-, 2- or 3-D lattice.

use crate::edge::{Connectivity, EdgeBehavior};
use crate::error::SpaceError;
use crate::graph::{AdjacencyGraph, GraphBuilder, NeighborMode};
use crate::index::DiscreteIndex;
use crate::linear::LinearIndexer;
use crate::space::{hop_radius, ids_in_slots, kind_mismatch, DiscreteSpace, IdIter, Space};
use plexus_core::{AgentId, Cell, Position, PositionKind};
use rand::{Rng, RngCore};
use smallvec::SmallVec;
use tracing::debug;

/// Cardinal offsets of a 2-D layer.
const OFFSETS_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Cardinal plus diagonal offsets of a 2-D layer.
const OFFSETS_8: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// A lattice of cells with synthesized adjacency.
///
/// Cells are 0-based coordinate tuples `[x]`, `[x, y]` or `[x, y, z]`.
/// Adjacency is built once at construction:
///
/// - **1-D**: a path, closed into a cycle under [`EdgeBehavior::Wrap`].
/// - **2-D**: the 4 ([`Connectivity::VonNeumann`]) or 8
///   ([`Connectivity::Moore`]) surrounding cells; under `Wrap` offsets are
///   taken modulo the extent on each axis, so corners wrap diagonally.
/// - **3-D**: each `z` layer is connected as in 2-D and every cell is
///   linked to the same `(x, y)` in the layers above and below.
///
/// On extents below 3 a wrapped offset can land on the cell itself or on
/// a cell already linked; such links are dropped.
///
/// Radii are hop counts in this graph. [`distance`](Space::distance)
/// returns the same hop count computed per axis: Chebyshev over the layer
/// axes for Moore, Manhattan for von Neumann, plus the layer offset in 3-D.
///
/// # Examples
///
/// ```
/// use plexus_core::Position;
/// use plexus_space::{Connectivity, EdgeBehavior, GridSpace, Space};
///
/// let g = GridSpace::new(&[10, 10], EdgeBehavior::Wrap, Connectivity::Moore).unwrap();
/// let d = g.distance(&Position::from([0i32, 0]), &Position::from([9i32, 8])).unwrap();
/// assert_eq!(d, 2.0);
/// ```
#[derive(Clone, Debug)]
pub struct GridSpace {
    cells: LinearIndexer,
    edge: EdgeBehavior,
    connectivity: Connectivity,
    graph: AdjacencyGraph,
    index: DiscreteIndex,
}

impl GridSpace {
    /// Build a grid with the given per-axis extents.
    ///
    /// Returns `Err(SpaceError::UnsupportedDimension)` unless
    /// `1 <= dims.len() <= 3`, and `Err(SpaceError::EmptySpace)` if any
    /// extent is 0.
    pub fn new(
        dims: &[usize],
        edge: EdgeBehavior,
        connectivity: Connectivity,
    ) -> Result<Self, SpaceError> {
        if !(1..=3).contains(&dims.len()) {
            return Err(SpaceError::UnsupportedDimension {
                ndim: dims.len(),
                supported: "grids have 1, 2 or 3 axes",
            });
        }
        let cells = LinearIndexer::new(dims)?;
        let graph = synthesize(&cells, edge, connectivity)?;
        debug!(
            dims = ?dims,
            ?edge,
            ?connectivity,
            cells = cells.len(),
            edges = graph.edge_count(),
            "grid space built"
        );
        Ok(Self {
            index: DiscreteIndex::new(cells.len()),
            cells,
            edge,
            connectivity,
            graph,
        })
    }

    /// Per-axis extents.
    pub fn dims(&self) -> &[usize] {
        self.cells.dims()
    }

    /// Edge behavior.
    pub fn edge_behavior(&self) -> EdgeBehavior {
        self.edge
    }

    /// Layer connectivity.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Whether the grid wraps around.
    pub fn is_periodic(&self) -> bool {
        self.edge.is_periodic()
    }

    /// The synthesized adjacency graph (slots are linear cell indices).
    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    /// The cell reached from `from` by adding `delta`.
    ///
    /// Wraps when periodic; otherwise each axis is clamped to the grid.
    pub fn walk_target(&self, from: &Position, delta: &[i32]) -> Result<Position, SpaceError> {
        let slot = self.slot(from)?;
        if delta.len() != self.cells.ndim() {
            return Err(SpaceError::DimensionMismatch {
                expected: self.cells.ndim(),
                given: delta.len(),
            });
        }
        let start = self.cell_at(slot);
        let target: Cell = start
            .iter()
            .zip(delta)
            .zip(self.cells.dims())
            .map(|((&c, &d), &n)| {
                let n = n as i64;
                let moved = c as i64 + d as i64;
                let v = if self.edge.is_periodic() {
                    moved.rem_euclid(n)
                } else {
                    moved.clamp(0, n - 1)
                };
                v as i32
            })
            .collect();
        Ok(Position::Cell(target))
    }

    fn slot(&self, pos: &Position) -> Result<usize, SpaceError> {
        let Position::Cell(cell) = pos else {
            return Err(kind_mismatch(PositionKind::Cell, pos));
        };
        if cell.len() != self.cells.ndim() {
            return Err(SpaceError::DimensionMismatch {
                expected: self.cells.ndim(),
                given: cell.len(),
            });
        }
        self.cells
            .to_index(cell)
            .ok_or_else(|| SpaceError::OutOfBounds {
                position: pos.clone(),
                bounds: format!("0 <= cell < {:?}", self.cells.dims()),
            })
    }

    fn cell_at(&self, slot: usize) -> Cell {
        self.cells.to_cell(slot).unwrap_or_default()
    }

    fn axis_delta(&self, axis: usize, a: i32, b: i32) -> usize {
        let d = (a as i64 - b as i64).unsigned_abs() as usize;
        if self.edge.is_periodic() {
            d.min(self.cells.dims()[axis] - d)
        } else {
            d
        }
    }
}

/// Build the adjacency graph of a lattice.
fn synthesize(
    cells: &LinearIndexer,
    edge: EdgeBehavior,
    connectivity: Connectivity,
) -> Result<AdjacencyGraph, SpaceError> {
    let layer: &[(i32, i32)] = match connectivity {
        Connectivity::VonNeumann => &OFFSETS_4,
        Connectivity::Moore => &OFFSETS_8,
    };
    let offsets: SmallVec<[[i32; 3]; 10]> = match cells.ndim() {
        1 => SmallVec::from_slice(&[[-1, 0, 0], [1, 0, 0]]),
        2 => layer.iter().map(|&(dx, dy)| [dx, dy, 0]).collect(),
        _ => layer
            .iter()
            .map(|&(dx, dy)| [dx, dy, 0])
            .chain([[0, 0, -1], [0, 0, 1]])
            .collect(),
    };

    let mut builder = GraphBuilder::undirected(cells.len());
    let dims = cells.dims();
    for slot in 0..cells.len() {
        let Some(cell) = cells.to_cell(slot) else {
            continue;
        };
        for off in &offsets {
            let mut target = Cell::with_capacity(dims.len());
            for (axis, &c) in cell.iter().enumerate() {
                match resolve_axis(c + off[axis], dims[axis], edge) {
                    Some(v) => target.push(v),
                    None => break,
                }
            }
            if target.len() != dims.len() {
                continue;
            }
            if let Some(nb) = cells.to_index(&target) {
                if nb != slot {
                    builder.add_edge(slot, nb)?;
                }
            }
        }
    }
    Ok(builder.build())
}

/// Resolve a coordinate that may have stepped off an axis of extent `len`.
fn resolve_axis(val: i32, len: usize, edge: EdgeBehavior) -> Option<i32> {
    let len = len as i64;
    let val = val as i64;
    if (0..len).contains(&val) {
        return Some(val as i32);
    }
    match edge {
        EdgeBehavior::Absorb => None,
        EdgeBehavior::Wrap => Some(val.rem_euclid(len) as i32),
    }
}

impl Space for GridSpace {
    fn kind(&self) -> PositionKind {
        PositionKind::Cell
    }

    fn ndim(&self) -> usize {
        self.cells.ndim()
    }

    fn validate(&self, pos: &Position) -> Result<(), SpaceError> {
        self.slot(pos).map(drop)
    }

    fn random_position(&self, rng: &mut dyn RngCore) -> Position {
        let cell: Cell = self
            .cells
            .dims()
            .iter()
            .map(|&n| rng.random_range(0..n) as i32)
            .collect();
        Position::Cell(cell)
    }

    fn add_to_space(&mut self, id: AgentId, pos: &Position) -> Result<(), SpaceError> {
        let slot = self.slot(pos)?;
        self.index.insert(id, slot)
    }

    fn remove_from_space(&mut self, id: AgentId) -> Result<Position, SpaceError> {
        let slot = self.index.remove(id)?;
        Ok(Position::Cell(self.cell_at(slot)))
    }

    fn move_agent(&mut self, id: AgentId, pos: &Position) -> Result<Position, SpaceError> {
        let slot = self.slot(pos)?;
        let old = self.index.relocate(id, slot)?;
        Ok(Position::Cell(self.cell_at(old)))
    }

    fn position_of(&self, id: AgentId) -> Option<Position> {
        self.index.slot_of(id).map(|s| Position::Cell(self.cell_at(s)))
    }

    fn resident_count(&self) -> usize {
        self.index.len()
    }

    fn resident_ids(&self) -> IdIter<'_> {
        Box::new(self.index.ids())
    }

    fn nearby_ids<'a>(&'a self, pos: &Position, r: f64) -> Result<IdIter<'a>, SpaceError> {
        let slot = self.slot(pos)?;
        let hops = hop_radius(r)?;
        let slots = self.graph.bfs_within(slot, hops, NeighborMode::Default)?;
        Ok(Box::new(ids_in_slots(&self.index, &slots).into_iter()))
    }

    fn distance(&self, a: &Position, b: &Position) -> Result<f64, SpaceError> {
        let (a, b) = (self.cell_at(self.slot(a)?), self.cell_at(self.slot(b)?));
        let deltas: SmallVec<[usize; 4]> = (0..a.len())
            .map(|axis| self.axis_delta(axis, a[axis], b[axis]))
            .collect();
        let layer = &deltas[..deltas.len().min(2)];
        let planar = match self.connectivity {
            Connectivity::Moore => layer.iter().copied().max().unwrap_or(0),
            Connectivity::VonNeumann => layer.iter().sum(),
        };
        let vertical = deltas.get(2).copied().unwrap_or(0);
        Ok((planar + vertical) as f64)
    }
}

impl DiscreteSpace for GridSpace {
    fn position_count(&self) -> usize {
        self.cells.len()
    }

    fn slot_of(&self, pos: &Position) -> Result<usize, SpaceError> {
        self.slot(pos)
    }

    fn position_at(&self, slot: usize) -> Option<Position> {
        self.cells.to_cell(slot).map(Position::Cell)
    }

    fn index(&self) -> &DiscreteIndex {
        &self.index
    }

    fn slots_within(&self, slot: usize, hops: usize) -> Result<Vec<usize>, SpaceError> {
        self.graph.bfs_within(slot, hops, NeighborMode::Default)
    }
}
