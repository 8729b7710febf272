//! Space trait compliance test helpers.
//!
//! These functions verify that a backend satisfies the invariants of the
//! [`Space`] and [`DiscreteSpace`] contracts. Reused across the backend
//! test modules.

use crate::space::{DiscreteSpace, Space};
use indexmap::IndexSet;
use plexus_core::{AgentId, Position};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Assert the generic mutation contract over the given positions.
///
/// Places one agent per position, checks each is found by a radius-0
/// query at its own position, moves each to the next position, then
/// removes everything. The space must start empty.
pub fn assert_space_contract(space: &mut dyn Space, positions: &[Position]) {
    assert_eq!(space.resident_count(), 0, "space must start empty");
    for (i, pos) in positions.iter().enumerate() {
        space.validate(pos).unwrap();
        space.add_to_space(AgentId(i as u64), pos).unwrap();
    }
    assert_eq!(space.resident_count(), positions.len());
    assert!(
        space
            .add_to_space(AgentId(0), &positions[0])
            .is_err(),
        "double add must fail"
    );

    for (i, pos) in positions.iter().enumerate() {
        let id = AgentId(i as u64);
        assert_eq!(space.position_of(id).as_ref(), Some(pos));
        let here: IndexSet<AgentId> = space.nearby_ids(pos, 0.0).unwrap().collect();
        assert!(here.contains(&id), "{id} not found at {pos} with r = 0");
        let d = space.distance(pos, pos).unwrap();
        assert_eq!(d, 0.0, "distance({pos}, {pos}) = {d}");
    }

    let n = positions.len();
    for i in 0..n {
        let id = AgentId(i as u64);
        let old = space.move_agent(id, &positions[(i + 1) % n]).unwrap();
        assert_eq!(old, positions[i]);
        assert_eq!(space.position_of(id).as_ref(), Some(&positions[(i + 1) % n]));
    }

    let resident: IndexSet<AgentId> = space.resident_ids().collect();
    assert_eq!(resident.len(), n, "resident ids must be unique");

    for i in 0..n {
        let id = AgentId(i as u64);
        assert_eq!(space.remove_from_space(id).unwrap(), positions[(i + 1) % n]);
        assert_eq!(space.position_of(id), None);
    }
    assert_eq!(space.resident_count(), 0);
    assert!(space.remove_from_space(AgentId(0)).is_err());
}

/// Assert the discrete contract: slot bijection, bucket bookkeeping,
/// neighbour symmetry for undirected adjacency and distance symmetry.
pub fn assert_discrete_contract<S: DiscreteSpace>(space: &mut S) {
    let count = space.position_count();
    assert!(count > 0);
    let positions: Vec<Position> = (0..count)
        .map(|s| space.position_at(s).unwrap())
        .collect();
    for (s, pos) in positions.iter().enumerate() {
        assert_eq!(space.slot_of(pos).unwrap(), s, "slot bijection at {pos}");
    }
    assert_eq!(space.position_at(count), None);

    for a in &positions {
        let d = space.distance(a, a).unwrap();
        assert_eq!(d, 0.0);
        for nb in space.nearby_positions(a, 1).unwrap() {
            assert_ne!(&nb, a, "nearby_positions must exclude the origin");
            assert_eq!(space.distance(a, &nb).unwrap(), 1.0);
            assert!(
                space.nearby_positions(&nb, 1).unwrap().contains(a),
                "neighbour symmetry violated: {nb} near {a} but not the reverse"
            );
        }
        for b in &positions {
            assert_eq!(space.distance(a, b).unwrap(), space.distance(b, a).unwrap());
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert!(space.random_empty(&mut rng).is_some());
    assert_space_contract(space, &positions);

    for (s, pos) in positions.iter().enumerate() {
        space.add_to_space(AgentId(s as u64), pos).unwrap();
    }
    assert!(space.index().is_consistent());
    assert_eq!(space.random_empty(&mut rng), None, "all positions are full");
    for (s, pos) in positions.iter().enumerate() {
        assert_eq!(space.ids_in_position(pos).unwrap(), vec![AgentId(s as u64)]);
        assert!(!space.is_empty_position(pos).unwrap());
        space.remove_from_space(AgentId(s as u64)).unwrap();
        assert!(space.is_empty_position(pos).unwrap());
    }
}

/// Assert that `distance` equals the smallest hop count reaching each slot.
pub fn assert_distance_matches_hops<S: DiscreteSpace>(space: &S) {
    let count = space.position_count();
    for a in 0..count {
        let mut hops = vec![usize::MAX; count];
        for h in 0..=count {
            for s in space.slots_within(a, h).unwrap() {
                hops[s] = hops[s].min(h);
            }
        }
        let pa = space.position_at(a).unwrap();
        for (b, &h) in hops.iter().enumerate() {
            let pb = space.position_at(b).unwrap();
            let d = space.distance(&pa, &pb).unwrap();
            let expected = if h == usize::MAX { f64::INFINITY } else { h as f64 };
            assert_eq!(d, expected, "distance({pa}, {pb})");
        }
    }
}
