//! Extraction of interacting agent pairs.
//!
//! A pair is an unordered [`Pair`] of two distinct agents within the
//! interaction radius of each other. [`PairPolicy`] decides which of the
//! candidate pairs are reported:
//!
//! | Policy | Pairs reported |
//! |---|---|
//! | [`All`](PairPolicy::All) | every unordered pair within `r`, once |
//! | [`Nearest`](PairPolicy::Nearest) | one-to-one pairs of mutual best matches |
//! | [`Scheduler`](PairPolicy::Scheduler) | first come, first served in a given order |
//! | [`Types`](PairPolicy::Types) | pairs of agents of different kinds |
//!
//! Pairs are returned in discovery order, which follows arena order and
//! the order the space yields neighbours, so results are reproducible.

use crate::error::ModelError;
use crate::model::Model;
use indexmap::{IndexMap, IndexSet};
use plexus_arena::AgentArena;
use plexus_core::{Agent, AgentId, KindTag, Pair};
use plexus_space::Space;
use smallvec::SmallVec;
use tracing::debug;

/// Which pairs [`Model::interacting_pairs`] reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairPolicy<'a> {
    /// Every unordered pair of distinct agents within `r`.
    All,
    /// Each agent pairs with its nearest neighbour within `r`; every agent
    /// ends up in at most one pair.
    ///
    /// Agents are visited in arena order. A candidate pair replaces any
    /// existing pairs touching either member only when it is strictly
    /// closer than all of them; the replaced pairs are dropped.
    Nearest,
    /// Visit these ids in order; each unclaimed agent claims its nearest
    /// neighbour within `r` if that neighbour is still unclaimed.
    Scheduler(&'a [AgentId]),
    /// Like [`All`](Self::All), but only pairs whose members differ in
    /// [`Agent::kind`]. A non-empty slice further restricts both members
    /// to the listed kinds.
    Types(&'a [KindTag]),
}

impl PairPolicy<'_> {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Nearest => "nearest",
            Self::Scheduler(_) => "scheduler",
            Self::Types(_) => "types",
        }
    }
}

impl<S: Space, A: Agent, Ar: AgentArena<A>> Model<S, A, Ar> {
    /// Pairs of agents within `r` of each other, selected by `policy`.
    ///
    /// # Errors
    ///
    /// Propagates invalid radii from the space, and reports
    /// [`ModelError::UnknownAgent`] for a scheduler id not in the model.
    pub fn interacting_pairs(
        &self,
        r: f64,
        policy: PairPolicy<'_>,
    ) -> Result<Vec<Pair>, ModelError> {
        let pairs = match policy {
            PairPolicy::All => self.pairs_within(r, |_, _| true)?,
            PairPolicy::Nearest => self.nearest_pairs(r)?,
            PairPolicy::Scheduler(order) => self.scheduled_pairs(r, order)?,
            PairPolicy::Types(kinds) => self.pairs_within(r, |a, b| {
                a.kind() != b.kind()
                    && (kinds.is_empty()
                        || (kinds.contains(&a.kind()) && kinds.contains(&b.kind())))
            })?,
        };
        debug!(
            policy = policy.name(),
            r,
            agents = self.arena.len(),
            pairs = pairs.len(),
            "interacting pairs extracted"
        );
        Ok(pairs)
    }

    fn pairs_within(
        &self,
        r: f64,
        mut keep: impl FnMut(&A, &A) -> bool,
    ) -> Result<Vec<Pair>, ModelError> {
        let mut seen: IndexSet<Pair> = IndexSet::new();
        for agent in self.arena.iter() {
            let id = agent.id();
            for other in self.space.nearby_ids(agent.pos(), r)? {
                if other == id {
                    continue;
                }
                let pair = Pair::new(id, other);
                if seen.contains(&pair) {
                    continue;
                }
                let Some(b) = self.arena.get(other) else {
                    continue;
                };
                if keep(agent, b) {
                    seen.insert(pair);
                }
            }
        }
        Ok(seen.into_iter().collect())
    }

    fn nearest_pairs(&self, r: f64) -> Result<Vec<Pair>, ModelError> {
        let mut kept: IndexMap<Pair, f64> = IndexMap::new();
        let mut partner: IndexMap<AgentId, Pair> = IndexMap::new();
        for id in self.arena.ids() {
            let Some((nb, d)) = self.nearest_with_distance(id, r)? else {
                continue;
            };
            let pair = Pair::new(id, nb);
            if kept.contains_key(&pair) {
                continue;
            }
            let rivals: SmallVec<[Pair; 2]> = [id, nb]
                .iter()
                .filter_map(|m| partner.get(m).copied())
                .collect();
            if rivals
                .iter()
                .any(|p| kept.get(p).is_some_and(|&kd| kd <= d))
            {
                continue;
            }
            for p in rivals {
                kept.shift_remove(&p);
                partner.swap_remove(&p.first());
                partner.swap_remove(&p.second());
            }
            kept.insert(pair, d);
            partner.insert(pair.first(), pair);
            partner.insert(pair.second(), pair);
        }
        Ok(kept.into_keys().collect())
    }

    fn scheduled_pairs(&self, r: f64, order: &[AgentId]) -> Result<Vec<Pair>, ModelError> {
        let mut claimed: IndexSet<AgentId> = IndexSet::new();
        let mut pairs = Vec::new();
        for &id in order {
            if !self.arena.contains(id) {
                return Err(ModelError::UnknownAgent { id });
            }
            if claimed.contains(&id) {
                continue;
            }
            let Some(nb) = self.nearest_neighbor(id, r)? else {
                continue;
            };
            if claimed.contains(&nb) {
                continue;
            }
            claimed.insert(id);
            claimed.insert(nb);
            pairs.push(Pair::new(id, nb));
        }
        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelConfig;
    use plexus_space::{
        AdjacencyGraph, Connectivity, ContinuousConfig, ContinuousSpace, EdgeBehavior, GraphSpace,
        GridSpace, Metric,
    };
    use plexus_test_utils::{Critter, Walker};
    use proptest::prelude::*;

    fn path_model(nodes: &[usize]) -> Model<GraphSpace, Walker> {
        let space = GraphSpace::new(AdjacencyGraph::path(8)).unwrap();
        let mut m = Model::with_space(space, ModelConfig::default());
        for &n in nodes {
            m.add_agent_at(n, Walker::new).unwrap();
        }
        m
    }

    fn line_model(xs: &[f64]) -> Model<ContinuousSpace, Walker> {
        let space = ContinuousSpace::new(
            ContinuousConfig::new(&[100.0]).with_metric(Metric::Chebyshev),
        )
        .unwrap();
        let mut m = Model::with_space(space, ModelConfig::default());
        for &x in xs {
            m.add_agent_at([x], Walker::new).unwrap();
        }
        m
    }

    fn pair(a: u64, b: u64) -> Pair {
        Pair::new(AgentId(a), AgentId(b))
    }

    // ── All ─────────────────────────────────────────────────────

    #[test]
    fn all_reports_each_pair_once() {
        let m = path_model(&[0, 1, 2, 5]);
        let pairs = m.interacting_pairs(1.0, PairPolicy::All).unwrap();
        assert_eq!(pairs, vec![pair(0, 1), pair(1, 2)]);
        let wide = m.interacting_pairs(2.0, PairPolicy::All).unwrap();
        assert_eq!(wide.len(), 3);
    }

    #[test]
    fn all_includes_colocated_agents() {
        let m = path_model(&[3, 3, 3]);
        let pairs = m.interacting_pairs(0.0, PairPolicy::All).unwrap();
        assert_eq!(pairs, vec![pair(0, 1), pair(0, 2), pair(1, 2)]);
    }

    #[test]
    fn negative_radius_rejected() {
        let m = path_model(&[0, 1]);
        assert!(m.interacting_pairs(-1.0, PairPolicy::All).is_err());
        assert!(m.interacting_pairs(-1.0, PairPolicy::Nearest).is_err());
    }

    // ── Nearest ─────────────────────────────────────────────────

    #[test]
    fn nearest_on_a_path_pairs_one_side() {
        let m = path_model(&[0, 1, 2]);
        let pairs = m.interacting_pairs(1.0, PairPolicy::Nearest).unwrap();
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0] == pair(0, 1) || pairs[0] == pair(1, 2));
    }

    #[test]
    fn nearest_evicts_farther_pair() {
        // 0 at 0.0, 1 at 3.0, 2 at 4.0: agent 0 first pairs with 1 at
        // distance 3, then agent 1 finds 2 at distance 1 and takes over.
        let m = line_model(&[0.0, 3.0, 4.0]);
        let pairs = m.interacting_pairs(5.0, PairPolicy::Nearest).unwrap();
        assert_eq!(pairs, vec![pair(1, 2)]);
    }

    #[test]
    fn nearest_keeps_independent_pairs() {
        let m = line_model(&[0.0, 1.0, 10.0, 11.5, 50.0]);
        let pairs = m.interacting_pairs(3.0, PairPolicy::Nearest).unwrap();
        assert_eq!(pairs, vec![pair(0, 1), pair(2, 3)]);
    }

    // ── Scheduler ───────────────────────────────────────────────

    #[test]
    fn scheduler_is_first_come_first_served() {
        let m = line_model(&[0.0, 3.0, 4.0]);
        let order = [AgentId(0), AgentId(1), AgentId(2)];
        let pairs = m
            .interacting_pairs(5.0, PairPolicy::Scheduler(&order))
            .unwrap();
        assert_eq!(pairs, vec![pair(0, 1)]);

        let order = [AgentId(2), AgentId(0), AgentId(1)];
        let pairs = m
            .interacting_pairs(5.0, PairPolicy::Scheduler(&order))
            .unwrap();
        assert_eq!(pairs, vec![pair(1, 2)]);
    }

    #[test]
    fn scheduler_rejects_unknown_ids() {
        let m = line_model(&[0.0, 1.0]);
        let order = [AgentId(0), AgentId(9)];
        assert_eq!(
            m.interacting_pairs(5.0, PairPolicy::Scheduler(&order))
                .unwrap_err(),
            ModelError::UnknownAgent { id: AgentId(9) }
        );
    }

    // ── Types ───────────────────────────────────────────────────

    #[test]
    fn types_pairs_only_different_kinds() {
        let space = GridSpace::new(&[4, 4], EdgeBehavior::Absorb, Connectivity::Moore).unwrap();
        let mut m: Model<_, Critter> = Model::with_space(space, ModelConfig::default());
        let s0 = m.add_agent_at([0, 0], Critter::sheep).unwrap();
        let s1 = m.add_agent_at([0, 1], Critter::sheep).unwrap();
        let w = m.add_agent_at([1, 0], Critter::wolf).unwrap();
        let g = m.add_agent_at([1, 1], Critter::grass).unwrap();

        let any = m.interacting_pairs(1.0, PairPolicy::Types(&[])).unwrap();
        assert!(!any.contains(&Pair::new(s0, s1)));
        assert_eq!(any.len(), 5);

        let kinds = [Critter::SHEEP, Critter::WOLF];
        let some = m.interacting_pairs(1.0, PairPolicy::Types(&kinds)).unwrap();
        assert_eq!(some, vec![Pair::new(s0, w), Pair::new(s1, w)]);
        assert!(some.iter().all(|p| !p.contains(g)));
    }

    // ── Properties ──────────────────────────────────────────────

    proptest! {
        #[test]
        fn nearest_pairs_are_disjoint_and_within_radius(
            xs in prop::collection::vec(0.0f64..50.0, 0..30),
            r in 0.0f64..10.0,
        ) {
            let m = line_model(&xs);
            let pairs = m.interacting_pairs(r, PairPolicy::Nearest).unwrap();
            let mut members = IndexSet::new();
            for p in &pairs {
                prop_assert!(members.insert(p.first()));
                prop_assert!(members.insert(p.second()));
                let a = m.agent(p.first()).unwrap().pos();
                let b = m.agent(p.second()).unwrap().pos();
                prop_assert!(m.space().distance(a, b).unwrap() <= r);
            }
        }

        #[test]
        fn all_pairs_match_brute_force(
            xs in prop::collection::vec(0.0f64..50.0, 0..25),
            r in 0.0f64..10.0,
        ) {
            let m = line_model(&xs);
            let mut got = m.interacting_pairs(r, PairPolicy::All).unwrap();
            got.sort();
            let mut expected = Vec::new();
            for i in 0..xs.len() {
                for j in (i + 1)..xs.len() {
                    if (xs[i] - xs[j]).abs() <= r {
                        expected.push(pair(i as u64, j as u64));
                    }
                }
            }
            expected.sort();
            prop_assert_eq!(got, expected);
        }
    }
}
