//! Graph space: agents live on the nodes of a user-supplied graph.

use crate::error::SpaceError;
use crate::graph::{AdjacencyGraph, NeighborMode};
use crate::index::DiscreteIndex;
use crate::space::{hop_radius, ids_in_slots, kind_mismatch, DiscreteSpace, IdIter, Space};
use plexus_core::{AgentId, Position, PositionKind};
use rand::{Rng, RngCore};
use tracing::debug;

/// A space whose positions are the nodes of an [`AdjacencyGraph`].
///
/// The radius of a neighbour query is a hop count. Directed graphs follow
/// out-edges by default; [`nearby_ids_with`](Self::nearby_ids_with)
/// selects another [`NeighborMode`].
///
/// # Examples
///
/// ```
/// use plexus_core::{AgentId, Position};
/// use plexus_space::{AdjacencyGraph, GraphSpace, Space};
///
/// let mut space = GraphSpace::new(AdjacencyGraph::path(4)).unwrap();
/// space.add_to_space(AgentId(0), &Position::Node(0)).unwrap();
/// space.add_to_space(AgentId(1), &Position::Node(2)).unwrap();
///
/// let near: Vec<_> = space.nearby_ids(&Position::Node(1), 1.0).unwrap().collect();
/// assert_eq!(near, vec![AgentId(0), AgentId(1)]);
/// ```
#[derive(Clone, Debug)]
pub struct GraphSpace {
    graph: AdjacencyGraph,
    index: DiscreteIndex,
}

impl GraphSpace {
    /// Wrap `graph`. Fails with [`SpaceError::EmptySpace`] if it has no nodes.
    pub fn new(graph: AdjacencyGraph) -> Result<Self, SpaceError> {
        if graph.node_count() == 0 {
            return Err(SpaceError::EmptySpace);
        }
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            directed = graph.is_directed(),
            "graph space built"
        );
        Ok(Self {
            index: DiscreteIndex::new(graph.node_count()),
            graph,
        })
    }

    /// The underlying graph.
    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    fn node(&self, pos: &Position) -> Result<usize, SpaceError> {
        let Position::Node(node) = *pos else {
            return Err(kind_mismatch(PositionKind::Node, pos));
        };
        self.graph.check_node(node)?;
        Ok(node)
    }

    /// Ids within `r` hops of `pos` following `mode`.
    pub fn nearby_ids_with(
        &self,
        pos: &Position,
        r: f64,
        mode: NeighborMode,
    ) -> Result<Vec<AgentId>, SpaceError> {
        let node = self.node(pos)?;
        let hops = hop_radius(r)?;
        let nodes = self.graph.bfs_within(node, hops, mode)?;
        Ok(ids_in_slots(&self.index, &nodes))
    }

    /// Nodes within `hops` of `pos` following `mode`, excluding `pos`.
    pub fn nearby_positions_with(
        &self,
        pos: &Position,
        hops: usize,
        mode: NeighborMode,
    ) -> Result<Vec<Position>, SpaceError> {
        let node = self.node(pos)?;
        Ok(self
            .graph
            .bfs_within(node, hops, mode)?
            .into_iter()
            .skip(1)
            .map(Position::Node)
            .collect())
    }
}

impl Space for GraphSpace {
    fn kind(&self) -> PositionKind {
        PositionKind::Node
    }

    fn ndim(&self) -> usize {
        1
    }

    fn validate(&self, pos: &Position) -> Result<(), SpaceError> {
        self.node(pos).map(drop)
    }

    fn random_position(&self, rng: &mut dyn RngCore) -> Position {
        Position::Node(rng.random_range(0..self.graph.node_count()))
    }

    fn add_to_space(&mut self, id: AgentId, pos: &Position) -> Result<(), SpaceError> {
        let node = self.node(pos)?;
        self.index.insert(id, node)
    }

    fn remove_from_space(&mut self, id: AgentId) -> Result<Position, SpaceError> {
        self.index.remove(id).map(Position::Node)
    }

    fn move_agent(&mut self, id: AgentId, pos: &Position) -> Result<Position, SpaceError> {
        let node = self.node(pos)?;
        self.index.relocate(id, node).map(Position::Node)
    }

    fn position_of(&self, id: AgentId) -> Option<Position> {
        self.index.slot_of(id).map(Position::Node)
    }

    fn resident_count(&self) -> usize {
        self.index.len()
    }

    fn resident_ids(&self) -> IdIter<'_> {
        Box::new(self.index.ids())
    }

    fn nearby_ids<'a>(&'a self, pos: &Position, r: f64) -> Result<IdIter<'a>, SpaceError> {
        let ids = self.nearby_ids_with(pos, r, NeighborMode::Default)?;
        Ok(Box::new(ids.into_iter()))
    }

    /// Hop distance along default-mode edges; `f64::INFINITY` if unreachable.
    fn distance(&self, a: &Position, b: &Position) -> Result<f64, SpaceError> {
        let (a, b) = (self.node(a)?, self.node(b)?);
        Ok(self
            .graph
            .hop_distance(a, b, NeighborMode::Default)?
            .map_or(f64::INFINITY, |d| d as f64))
    }
}

impl DiscreteSpace for GraphSpace {
    fn position_count(&self) -> usize {
        self.graph.node_count()
    }

    fn slot_of(&self, pos: &Position) -> Result<usize, SpaceError> {
        self.node(pos)
    }

    fn position_at(&self, slot: usize) -> Option<Position> {
        self.graph.contains(slot).then_some(Position::Node(slot))
    }

    fn index(&self) -> &DiscreteIndex {
        &self.index
    }

    fn slots_within(&self, slot: usize, hops: usize) -> Result<Vec<usize>, SpaceError> {
        self.graph.bfs_within(slot, hops, NeighborMode::Default)
    }
}
