//! End-to-end scenarios mixing lifecycle calls with queries.

use plexus_arena::SeqArena;
use plexus_core::{Agent, AgentId, Pair, Position};
use plexus_model::{Model, ModelConfig, ModelError, PairPolicy};
use plexus_space::{
    AdjacencyGraph, Connectivity, ContinuousConfig, ContinuousSpace, EdgeBehavior, GraphBuilder,
    GraphSpace, GridSpace, Metric, Space,
};
use plexus_test_utils::{
    assert_nearby_matches_brute_force, scatter, seeded_rng, Critter, Walker,
};
use proptest::prelude::*;

// ── Predator and prey on a torus ────────────────────────────────

#[test]
fn wolves_eat_adjacent_sheep() {
    let space = GridSpace::new(&[10, 10], EdgeBehavior::Wrap, Connectivity::Moore).unwrap();
    let mut m: Model<_, Critter> = Model::with_space(space, ModelConfig::seeded(7));
    for _ in 0..30 {
        m.add_agent_to_empty(Critter::sheep).unwrap();
    }
    for _ in 0..5 {
        m.add_agent_to_empty(Critter::wolf).unwrap();
    }
    m.check_consistency().unwrap();

    let wolves = m.ids_by_kind()[&Critter::WOLF].clone();
    let mut eaten = 0;
    for wolf in wolves {
        let prey = m
            .random_nearby_agent_where(wolf, 1.0, |a| a.kind() == Critter::SHEEP)
            .unwrap()
            .map(|a| a.id());
        if let Some(prey) = prey {
            m.kill_agent(prey).unwrap();
            eaten += 1;
        }
    }
    assert_eq!(m.agent_count(), 35 - eaten);
    m.check_consistency().unwrap();
}

#[test]
fn same_seed_same_history() {
    let run = || {
        let space = GridSpace::new(&[8, 8], EdgeBehavior::Absorb, Connectivity::VonNeumann).unwrap();
        let mut m: Model<_, Walker> = Model::with_space(space, ModelConfig::seeded(99));
        for _ in 0..20 {
            m.add_agent_random(Walker::new).unwrap();
        }
        for _ in 0..10 {
            let ids: Vec<AgentId> = m.ids().collect();
            for id in ids {
                m.random_walk(id, 1).unwrap();
            }
        }
        m.agents()
            .map(|a| (a.id(), a.pos().clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

// ── Pairs on a path graph ───────────────────────────────────────

#[test]
fn path_graph_nearest_pairs_one_edge() {
    let space = GraphSpace::new(AdjacencyGraph::path(3)).unwrap();
    let mut m: Model<_, Walker, _> = Model::new(space, SeqArena::new(), ModelConfig::default());
    for node in 0..3usize {
        m.add_agent_at(node, Walker::new).unwrap();
    }
    let pairs = m.interacting_pairs(1.0, PairPolicy::Nearest).unwrap();
    assert_eq!(pairs.len(), 1);
    let p = pairs[0];
    assert!(p == Pair::new(AgentId(0), AgentId(1)) || p == Pair::new(AgentId(1), AgentId(2)));

    let all = m.interacting_pairs(1.0, PairPolicy::All).unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn directed_graph_queries_follow_out_edges() {
    let mut b = GraphBuilder::directed(3);
    b.add_edge(0, 1).unwrap().add_edge(1, 2).unwrap();
    let space = GraphSpace::new(b.build()).unwrap();
    let mut m: Model<_, Walker> = Model::with_space(space, ModelConfig::default());
    let a = m.add_agent_at(0usize, Walker::new).unwrap();
    let b = m.add_agent_at(1usize, Walker::new).unwrap();
    let c = m.add_agent_at(2usize, Walker::new).unwrap();
    let from_a: Vec<AgentId> = m.nearby_ids_of(a, 2.0).unwrap().collect();
    assert_eq!(from_a.len(), 2);
    let from_c: Vec<AgentId> = m.nearby_ids_of(c, 2.0).unwrap().collect();
    assert!(from_c.is_empty());
    assert_eq!(m.nearest_neighbor(a, 5.0).unwrap(), Some(b));
}

// ── Continuous flocking step ────────────────────────────────────

#[test]
fn periodic_neighbours_span_the_seam() {
    let space = ContinuousSpace::new(
        ContinuousConfig::new(&[20.0, 20.0])
            .with_spacing(2.0)
            .with_metric(Metric::Euclidean)
            .periodic(true),
    )
    .unwrap();
    let mut m: Model<_, Walker> = Model::with_space(space, ModelConfig::seeded(5));
    let left = m.add_agent_at([0.5, 10.0], Walker::new).unwrap();
    let right = m.add_agent_at([19.5, 10.0], Walker::new).unwrap();
    let middle = m.add_agent_at([10.0, 10.0], Walker::new).unwrap();

    let near: Vec<AgentId> = m.nearby_ids_of(left, 1.5).unwrap().collect();
    assert_eq!(near, vec![right]);
    assert_eq!(m.nearest_neighbor(left, 15.0).unwrap(), Some(right));
    assert_eq!(
        m.interacting_pairs(1.5, PairPolicy::All).unwrap(),
        vec![Pair::new(left, right)]
    );

    m.move_by_velocity(right, &[2.0, 0.0], 0.5).unwrap();
    assert_eq!(m.agent(right).unwrap().pos(), &Position::from([0.5, 10.0]));
    let colocated: Vec<AgentId> = m
        .nearby_ids(&Position::from([0.5, 10.0]), 0.0)
        .unwrap()
        .collect();
    assert_eq!(colocated.len(), 2);
    assert!(!colocated.contains(&middle));
    m.check_consistency().unwrap();
}

#[test]
fn failed_operations_do_not_desynchronize() {
    let space = ContinuousSpace::new(ContinuousConfig::new(&[5.0, 5.0])).unwrap();
    let mut m: Model<_, Walker> = Model::with_space(space, ModelConfig::default());
    let a = m.add_agent_at([1.0, 1.0], Walker::new).unwrap();
    assert!(m.add_agent_at([6.0, 1.0], Walker::new).is_err());
    assert!(m.add_agent_at([1.0, 1.0, 1.0], Walker::new).is_err());
    assert!(m.move_agent(a, [-1.0, 0.0]).is_err());
    assert!(m.move_agent(a, 2usize).is_err());
    assert!(matches!(
        m.nearby_ids_of(a, f64::NAN),
        Err(ModelError::Space(_))
    ));
    assert_eq!(m.agent_count(), 1);
    assert_eq!(m.agent(a).unwrap().pos(), &Position::from([1.0, 1.0]));
    m.check_consistency().unwrap();
}

// ── Queries against brute force ─────────────────────────────────

fn model_queries_match_brute_force<S: Space>(space: S, seed: u64, radii: &[f64]) {
    let mut m: Model<S, Walker> = Model::with_space(space, ModelConfig::seeded(seed));
    for _ in 0..50 {
        m.add_agent_random(Walker::new).unwrap();
    }
    m.check_consistency().unwrap();
    let placed: Vec<(AgentId, Position)> =
        m.agents().map(|a| (a.id(), a.pos().clone())).collect();
    let mut rng = seeded_rng(seed + 1);
    for _ in 0..20 {
        let at = m.space().random_position(&mut rng);
        for &r in radii {
            assert_nearby_matches_brute_force(m.space(), &placed, &at, r);
        }
    }
}

#[test]
fn populated_models_answer_nearby_like_brute_force() {
    model_queries_match_brute_force(
        GraphSpace::new(AdjacencyGraph::cycle(40)).unwrap(),
        31,
        &[0.0, 1.0, 3.0],
    );
    model_queries_match_brute_force(
        GridSpace::new(&[12, 9], EdgeBehavior::Wrap, Connectivity::Moore).unwrap(),
        32,
        &[0.0, 1.0, 2.5],
    );
    model_queries_match_brute_force(
        GridSpace::new(&[12, 9], EdgeBehavior::Absorb, Connectivity::VonNeumann).unwrap(),
        33,
        &[0.0, 1.0, 2.5],
    );
    model_queries_match_brute_force(
        ContinuousSpace::new(
            ContinuousConfig::new(&[20.0, 10.0])
                .with_metric(Metric::Euclidean)
                .periodic(true),
        )
        .unwrap(),
        34,
        &[0.0, 0.7, 3.3],
    );
}

#[test]
fn scattered_points_match_brute_force_for_every_metric() {
    for metric in [Metric::Euclidean, Metric::Cityblock, Metric::Chebyshev] {
        for periodic in [false, true] {
            let mut space = ContinuousSpace::new(
                ContinuousConfig::new(&[10.0, 10.0])
                    .with_metric(metric)
                    .periodic(periodic),
            )
            .unwrap();
            let mut rng = seeded_rng(41);
            let placed = scatter(&mut space, 80, &mut rng);
            // Radii equal to a reported distance sit exactly on the boundary.
            for (_, target) in placed.iter().take(20) {
                let at = space.random_position(&mut rng);
                let r = space.distance(&at, target).unwrap();
                assert_nearby_matches_brute_force(&space, &placed, &at, r);
            }
        }
    }
}

// ── Random operation sequences ──────────────────────────────────

#[derive(Clone, Debug)]
enum Op {
    Add(i32, i32),
    Move(usize, i32, i32),
    Kill(usize),
    Walk(usize, i32, i32),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..6i32, 0..6i32).prop_map(|(x, y)| Op::Add(x, y)),
        (any::<usize>(), -1..7i32, -1..7i32).prop_map(|(i, x, y)| Op::Move(i, x, y)),
        any::<usize>().prop_map(Op::Kill),
        (any::<usize>(), -3..4i32, -3..4i32).prop_map(|(i, x, y)| Op::Walk(i, x, y)),
    ]
}

proptest! {
    #[test]
    fn random_op_sequences_stay_consistent(ops in prop::collection::vec(op(), 1..60)) {
        let space = GridSpace::new(&[6, 6], EdgeBehavior::Wrap, Connectivity::Moore).unwrap();
        let mut m: Model<_, Walker> = Model::with_space(space, ModelConfig::default());
        for op in ops {
            let ids: Vec<AgentId> = m.ids().collect();
            let pick = |i: usize| (!ids.is_empty()).then(|| ids[i % ids.len()]);
            match op {
                Op::Add(x, y) => {
                    m.add_agent_at([x, y], Walker::new).unwrap();
                }
                Op::Move(i, x, y) => {
                    if let Some(id) = pick(i) {
                        let inside = (0..6).contains(&x) && (0..6).contains(&y);
                        prop_assert_eq!(m.move_agent(id, [x, y]).is_ok(), inside);
                    }
                }
                Op::Kill(i) => {
                    if let Some(id) = pick(i) {
                        m.kill_agent(id).unwrap();
                        prop_assert!(m.agent(id).is_none());
                    }
                }
                Op::Walk(i, dx, dy) => {
                    if let Some(id) = pick(i) {
                        m.walk(id, &[dx, dy]).unwrap();
                    }
                }
            }
            prop_assert!(m.check_consistency().is_ok());
            prop_assert_eq!(m.space().resident_count(), m.agent_count());
        }
    }
}
