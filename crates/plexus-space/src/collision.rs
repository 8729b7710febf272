//! Elastic collisions between point bodies in continuous space.

/// A body taking part in a collision.
///
/// `mass` may be `f64::INFINITY` for an immovable obstacle, whose velocity
/// is never changed.
#[derive(Debug)]
pub struct Body<'a> {
    /// Position of the body's centre.
    pub pos: &'a [f64],
    /// Velocity, updated in place.
    pub vel: &'a mut [f64],
    /// Mass; equal finite masses give the textbook velocity exchange.
    pub mass: f64,
}

/// Resolve a perfectly elastic collision between `a` and `b`.
///
/// Velocities change only along the line joining the centres, conserving
/// momentum and kinetic energy. Returns `false` and leaves both bodies
/// untouched when:
///
/// - the bodies are at the same position,
/// - both masses are infinite,
/// - the bodies are not approaching each other (so a pair that overlaps
///   for several steps is not bounced back and forth),
/// - positions and velocities do not all have the same dimensionality.
///
/// # Examples
///
/// ```
/// use plexus_space::collision::{elastic_collision, Body};
///
/// let (mut va, mut vb) = ([1.0, 0.0], [-1.0, 0.0]);
/// let hit = elastic_collision(
///     Body { pos: &[0.0, 0.0], vel: &mut va, mass: 1.0 },
///     Body { pos: &[1.0, 0.0], vel: &mut vb, mass: 1.0 },
/// );
/// assert!(hit);
/// assert_eq!((va, vb), ([-1.0, 0.0], [1.0, 0.0]));
/// ```
pub fn elastic_collision(a: Body<'_>, b: Body<'_>) -> bool {
    let dim = a.pos.len();
    if a.vel.len() != dim || b.pos.len() != dim || b.vel.len() != dim {
        return false;
    }
    if a.mass.is_infinite() && b.mass.is_infinite() {
        return false;
    }

    // Separation vector from a to b.
    let sep: Vec<f64> = b.pos.iter().zip(a.pos).map(|(&y, &x)| y - x).collect();
    let sep_sq: f64 = sep.iter().map(|s| s * s).sum();
    if sep_sq == 0.0 {
        return false;
    }

    // Immovable bodies act as if at rest.
    let va: Vec<f64> = if a.mass.is_infinite() {
        vec![0.0; dim]
    } else {
        a.vel.to_vec()
    };
    let vb: Vec<f64> = if b.mass.is_infinite() {
        vec![0.0; dim]
    } else {
        b.vel.to_vec()
    };

    // Closing speed along the separation; positive when approaching.
    let closing: f64 = va
        .iter()
        .zip(&vb)
        .zip(&sep)
        .map(|((&u, &v), &s)| (u - v) * s)
        .sum();
    if closing <= 0.0 {
        return false;
    }

    let (fa, fb) = match (a.mass.is_infinite(), b.mass.is_infinite()) {
        (true, _) => (0.0, 2.0),
        (_, true) => (2.0, 0.0),
        _ => {
            let total = a.mass + b.mass;
            (2.0 * b.mass / total, 2.0 * a.mass / total)
        }
    };

    let k = closing / sep_sq;
    for (i, &s) in sep.iter().enumerate() {
        if fa != 0.0 {
            a.vel[i] = va[i] - fa * k * s;
        }
        if fb != 0.0 {
            b.vel[i] = vb[i] + fb * k * s;
        }
    }
    true
}
