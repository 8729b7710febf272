//! Test fixtures and helpers for Plexus development.
//!
//! Provides ready-made agent types ([`Walker`], [`Critter`]), a seeded
//! generator and helpers that populate a bare [`Space`] and check its
//! queries against brute force.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{Critter, Walker};

use plexus_core::{AgentId, Position};
use plexus_space::{Space, SpaceError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The generator every test uses, seeded explicitly.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Place agents `0..n` at random positions of `space`.
///
/// Returns each id with the position it was given, in id order.
pub fn scatter(space: &mut dyn Space, n: u64, rng: &mut ChaCha8Rng) -> Vec<(AgentId, Position)> {
    (0..n)
        .map(|i| {
            let id = AgentId(i);
            let pos = space.random_position(rng);
            space
                .add_to_space(id, &pos)
                .unwrap_or_else(|e| panic!("scatter: placing {id} at {pos}: {e}"));
            (id, pos)
        })
        .collect()
}

/// Ids from `placed` within `r` of `pos` by exhaustive distance checks,
/// sorted.
pub fn brute_force_nearby(
    space: &dyn Space,
    placed: &[(AgentId, Position)],
    pos: &Position,
    r: f64,
) -> Result<Vec<AgentId>, SpaceError> {
    let mut ids = Vec::new();
    for (id, p) in placed {
        if space.distance(pos, p)? <= r {
            ids.push(*id);
        }
    }
    ids.sort();
    Ok(ids)
}

/// Assert that `space.nearby_ids(pos, r)` matches [`brute_force_nearby`].
pub fn assert_nearby_matches_brute_force(
    space: &dyn Space,
    placed: &[(AgentId, Position)],
    pos: &Position,
    r: f64,
) {
    let mut got: Vec<AgentId> = space
        .nearby_ids(pos, r)
        .unwrap_or_else(|e| panic!("nearby_ids({pos}, {r}): {e}"))
        .collect();
    got.sort();
    let expected = brute_force_nearby(space, placed, pos, r)
        .unwrap_or_else(|e| panic!("distance from {pos}: {e}"));
    assert_eq!(got, expected, "nearby_ids({pos}, {r}) disagrees with brute force");
}
