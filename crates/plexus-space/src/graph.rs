//! Immutable adjacency graphs and breadth-first neighbourhood expansion.

use crate::error::SpaceError;
use indexmap::IndexSet;
use smallvec::SmallVec;
use std::collections::VecDeque;

type Adjacency = Vec<SmallVec<[usize; 8]>>;

/// Which edges a neighbourhood query follows in a directed graph.
///
/// Undirected graphs ignore the mode: every mode yields all neighbours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NeighborMode {
    /// Out-neighbours (all neighbours when undirected).
    #[default]
    Default,
    /// Follow outgoing edges.
    Out,
    /// Follow incoming edges.
    In,
    /// Follow edges in both directions.
    All,
}

/// A graph over nodes `0..node_count`, frozen after construction.
///
/// Built through [`GraphBuilder`] or one of the shape constructors.
/// Neighbour lists are sorted ascending and contain no duplicates, so
/// breadth-first expansion visits nodes in a deterministic order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyGraph {
    directed: bool,
    out_adj: Adjacency,
    /// Incoming edges; empty when undirected.
    in_adj: Adjacency,
    edge_count: usize,
}

/// Accumulates edges for an [`AdjacencyGraph`].
///
/// # Examples
///
/// ```
/// use plexus_space::GraphBuilder;
///
/// let mut b = GraphBuilder::undirected(3);
/// b.add_edge(0, 1).unwrap();
/// b.add_edge(1, 2).unwrap();
/// let g = b.build();
/// assert_eq!(g.edge_count(), 2);
/// assert_eq!(g.out_neighbors(1), &[0, 2]);
/// ```
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    directed: bool,
    out_adj: Adjacency,
    in_adj: Adjacency,
}

impl GraphBuilder {
    /// Start an undirected graph with `node_count` isolated nodes.
    pub fn undirected(node_count: usize) -> Self {
        Self {
            directed: false,
            out_adj: vec![SmallVec::new(); node_count],
            in_adj: Vec::new(),
        }
    }

    /// Start a directed graph with `node_count` isolated nodes.
    pub fn directed(node_count: usize) -> Self {
        Self {
            directed: true,
            out_adj: vec![SmallVec::new(); node_count],
            in_adj: vec![SmallVec::new(); node_count],
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.out_adj.len()
    }

    /// Add the edge `a -> b` (or `a -- b` when undirected).
    ///
    /// Duplicate edges are ignored. Self-loops are kept.
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<&mut Self, SpaceError> {
        let node_count = self.node_count();
        for node in [a, b] {
            if node >= node_count {
                return Err(SpaceError::NodeOutOfRange { node, node_count });
            }
        }
        push_unique(&mut self.out_adj[a], b);
        if self.directed {
            push_unique(&mut self.in_adj[b], a);
        } else {
            push_unique(&mut self.out_adj[b], a);
        }
        Ok(self)
    }

    /// Freeze into an immutable graph.
    pub fn build(mut self) -> AdjacencyGraph {
        for list in self.out_adj.iter_mut().chain(self.in_adj.iter_mut()) {
            list.sort_unstable();
        }
        let stored: usize = self.out_adj.iter().map(|l| l.len()).sum();
        let edge_count = if self.directed {
            stored
        } else {
            let loops = self
                .out_adj
                .iter()
                .enumerate()
                .filter(|(v, l)| l.contains(v))
                .count();
            (stored - loops) / 2 + loops
        };
        AdjacencyGraph {
            directed: self.directed,
            out_adj: self.out_adj,
            in_adj: self.in_adj,
            edge_count,
        }
    }
}

fn push_unique(list: &mut SmallVec<[usize; 8]>, v: usize) {
    if !list.contains(&v) {
        list.push(v);
    }
}

impl AdjacencyGraph {
    /// Build a graph from an edge list.
    pub fn from_edges(
        node_count: usize,
        directed: bool,
        edges: &[(usize, usize)],
    ) -> Result<Self, SpaceError> {
        let mut b = if directed {
            GraphBuilder::directed(node_count)
        } else {
            GraphBuilder::undirected(node_count)
        };
        for &(a, c) in edges {
            b.add_edge(a, c)?;
        }
        Ok(b.build())
    }

    /// Undirected path `0 - 1 - ... - (n-1)`.
    pub fn path(node_count: usize) -> Self {
        let mut b = GraphBuilder::undirected(node_count);
        for v in 1..node_count {
            push_unique(&mut b.out_adj[v - 1], v);
            push_unique(&mut b.out_adj[v], v - 1);
        }
        b.build()
    }

    /// Undirected cycle: a path plus the edge closing its two ends.
    ///
    /// Cycles on fewer than three nodes degenerate to a path.
    pub fn cycle(node_count: usize) -> Self {
        let mut b = GraphBuilder::undirected(node_count);
        for v in 1..node_count {
            push_unique(&mut b.out_adj[v - 1], v);
            push_unique(&mut b.out_adj[v], v - 1);
        }
        if node_count > 2 {
            push_unique(&mut b.out_adj[0], node_count - 1);
            push_unique(&mut b.out_adj[node_count - 1], 0);
        }
        b.build()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.out_adj.len()
    }

    /// Number of edges (undirected edges count once).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether edges are directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Whether `node` is a valid node index.
    pub fn contains(&self, node: usize) -> bool {
        node < self.node_count()
    }

    /// Successors of `node` (all neighbours when undirected).
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn out_neighbors(&self, node: usize) -> &[usize] {
        &self.out_adj[node]
    }

    /// Predecessors of `node` (all neighbours when undirected).
    ///
    /// # Panics
    ///
    /// Panics if `node` is out of range.
    pub fn in_neighbors(&self, node: usize) -> &[usize] {
        if self.directed {
            &self.in_adj[node]
        } else {
            &self.out_adj[node]
        }
    }

    /// Neighbours of `node` under `mode`, sorted and deduplicated.
    pub fn neighbors(&self, node: usize, mode: NeighborMode) -> SmallVec<[usize; 8]> {
        match (self.directed, mode) {
            (false, _) | (true, NeighborMode::Default | NeighborMode::Out) => {
                SmallVec::from_slice(self.out_neighbors(node))
            }
            (true, NeighborMode::In) => SmallVec::from_slice(self.in_neighbors(node)),
            (true, NeighborMode::All) => {
                let mut all: SmallVec<[usize; 8]> = SmallVec::from_slice(&self.out_adj[node]);
                all.extend_from_slice(&self.in_adj[node]);
                all.sort_unstable();
                all.dedup();
                all
            }
        }
    }

    /// Nodes within `hops` edges of `source`, in BFS order, `source` first.
    ///
    /// Each node appears once. `hops == 0` yields only `source`. Work is
    /// proportional to the neighbourhood reached, not to the graph size.
    pub fn bfs_within(
        &self,
        source: usize,
        hops: usize,
        mode: NeighborMode,
    ) -> Result<Vec<usize>, SpaceError> {
        self.check_node(source)?;
        let mut seen: IndexSet<usize> = IndexSet::new();
        let mut queue = VecDeque::new();
        seen.insert(source);
        queue.push_back((source, 0usize));

        while let Some((v, dist)) = queue.pop_front() {
            if dist >= hops {
                continue;
            }
            for nb in self.neighbors(v, mode) {
                if seen.insert(nb) {
                    queue.push_back((nb, dist + 1));
                }
            }
        }
        Ok(seen.into_iter().collect())
    }

    /// Fewest edges from `a` to `b` under `mode`, or `None` if unreachable.
    pub fn hop_distance(
        &self,
        a: usize,
        b: usize,
        mode: NeighborMode,
    ) -> Result<Option<usize>, SpaceError> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Ok(Some(0));
        }
        let mut seen: IndexSet<usize> = IndexSet::new();
        let mut queue = VecDeque::new();
        seen.insert(a);
        queue.push_back((a, 0usize));
        while let Some((v, dist)) = queue.pop_front() {
            for nb in self.neighbors(v, mode) {
                if nb == b {
                    return Ok(Some(dist + 1));
                }
                if seen.insert(nb) {
                    queue.push_back((nb, dist + 1));
                }
            }
        }
        Ok(None)
    }

    pub(crate) fn check_node(&self, node: usize) -> Result<(), SpaceError> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(SpaceError::NodeOutOfRange {
                node,
                node_count: self.node_count(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn path_degrees() {
        let g = AdjacencyGraph::path(4);
        assert_eq!(g.out_neighbors(0), &[1]);
        assert_eq!(g.out_neighbors(1), &[0, 2]);
        assert_eq!(g.out_neighbors(3), &[2]);
        assert_eq!(g.edge_count(), 3);
    }

    #[test]
    fn cycle_closes_ends() {
        let g = AdjacencyGraph::cycle(5);
        assert_eq!(g.out_neighbors(0), &[1, 4]);
        assert_eq!(g.edge_count(), 5);
        assert_eq!(AdjacencyGraph::cycle(2).edge_count(), 1);
        assert_eq!(AdjacencyGraph::cycle(1).edge_count(), 0);
    }

    #[test]
    fn duplicate_edges_ignored() {
        let g = AdjacencyGraph::from_edges(3, false, &[(0, 1), (1, 0), (0, 1)]).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.out_neighbors(1), &[0]);
    }

    #[test]
    fn self_loop_counts_once() {
        let g = AdjacencyGraph::from_edges(2, false, &[(0, 0), (0, 1)]).unwrap();
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn out_of_range_edge_rejected() {
        assert_eq!(
            AdjacencyGraph::from_edges(2, true, &[(0, 2)]),
            Err(SpaceError::NodeOutOfRange {
                node: 2,
                node_count: 2
            })
        );
    }

    #[test]
    fn directed_modes() {
        // 0 -> 1 -> 2, 3 -> 1
        let g = AdjacencyGraph::from_edges(4, true, &[(0, 1), (1, 2), (3, 1)]).unwrap();
        assert_eq!(g.neighbors(1, NeighborMode::Out).as_slice(), &[2]);
        assert_eq!(g.neighbors(1, NeighborMode::Default).as_slice(), &[2]);
        assert_eq!(g.neighbors(1, NeighborMode::In).as_slice(), &[0, 3]);
        assert_eq!(g.neighbors(1, NeighborMode::All).as_slice(), &[0, 2, 3]);
    }

    #[test]
    fn bfs_respects_hops_and_direction() {
        let g = AdjacencyGraph::from_edges(4, true, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(g.bfs_within(0, 0, NeighborMode::Out).unwrap(), vec![0]);
        assert_eq!(g.bfs_within(0, 2, NeighborMode::Out).unwrap(), vec![0, 1, 2]);
        assert_eq!(g.bfs_within(0, 5, NeighborMode::In).unwrap(), vec![0]);
        assert_eq!(g.bfs_within(3, 2, NeighborMode::In).unwrap(), vec![3, 2, 1]);
        assert_eq!(
            g.bfs_within(2, 1, NeighborMode::All).unwrap(),
            vec![2, 1, 3]
        );
    }

    #[test]
    fn bfs_on_large_ring_stays_local() {
        let n = 100_000;
        let g = AdjacencyGraph::cycle(n);
        let mut got = g.bfs_within(0, 2, NeighborMode::Default).unwrap();
        got.sort_unstable();
        assert_eq!(got, vec![0, 1, 2, n - 2, n - 1]);
        assert_eq!(g.hop_distance(0, n - 3, NeighborMode::Default).unwrap(), Some(3));
    }

    #[test]
    fn hop_distance_on_path() {
        let g = AdjacencyGraph::path(6);
        assert_eq!(g.hop_distance(0, 5, NeighborMode::Default).unwrap(), Some(5));
        assert_eq!(g.hop_distance(3, 3, NeighborMode::Default).unwrap(), Some(0));
        let split = AdjacencyGraph::from_edges(3, false, &[(0, 1)]).unwrap();
        assert_eq!(split.hop_distance(0, 2, NeighborMode::Default).unwrap(), None);
    }

    proptest! {
        #[test]
        fn bfs_contains_exactly_nodes_within_hops(
            n in 1usize..20,
            edges in proptest::collection::vec((0usize..20, 0usize..20), 0..40),
            src in 0usize..20,
            hops in 0usize..6,
        ) {
            let edges: Vec<(usize, usize)> =
                edges.into_iter().map(|(a, b)| (a % n, b % n)).collect();
            let g = AdjacencyGraph::from_edges(n, false, &edges).unwrap();
            let src = src % n;
            let reached = g.bfs_within(src, hops, NeighborMode::Default).unwrap();
            let mut sorted = reached.clone();
            sorted.sort_unstable();
            sorted.dedup();
            prop_assert_eq!(sorted.len(), reached.len());
            for v in 0..n {
                let d = g.hop_distance(src, v, NeighborMode::Default).unwrap();
                let within = matches!(d, Some(d) if d <= hops);
                prop_assert_eq!(within, reached.contains(&v));
            }
        }
    }
}
