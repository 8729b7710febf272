//! Single-pass random selection from lazy sequences.
//!
//! Neighbour queries produce iterators whose length is not known up
//! front. The functions here pick an element uniformly (or by weight)
//! while consuming the iterator once, so a query never has to be
//! materialized just to draw from it. All of them are deterministic for a
//! fixed generator state and iteration order.

use rand::Rng;

/// How a predicate-constrained draw is performed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SamplingStrategy {
    /// Stream the candidates through the predicate into a reservoir.
    /// Allocates nothing; evaluates the predicate on every candidate.
    #[default]
    Filtered,
    /// Collect the candidates, then draw and discard until one satisfies
    /// the predicate. Evaluates the predicate at most once per candidate
    /// and often far fewer times when most candidates qualify.
    Rejection,
}

/// Draw a uniform value in `(0, 1]`, so its logarithm is finite.
fn unit_open<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    1.0 - rng.random::<f64>()
}

/// Pick one element uniformly at random, consuming `iter` once.
///
/// Returns `None` for an empty sequence. Uses reservoir sampling with
/// geometric skips (Algorithm L with a reservoir of one), so the number
/// of random draws grows with the logarithm of the sequence length.
///
/// # Examples
///
/// ```
/// use plexus_space::sampling::sample_one;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(3);
/// let x = sample_one(0..100, &mut rng).unwrap();
/// assert!(x < 100);
/// assert_eq!(sample_one(std::iter::empty::<u8>(), &mut rng), None);
/// ```
pub fn sample_one<I, R>(iter: I, rng: &mut R) -> Option<I::Item>
where
    I: IntoIterator,
    R: Rng + ?Sized,
{
    let mut iter = iter.into_iter();
    let mut chosen = iter.next()?;
    let mut w = unit_open(rng);
    loop {
        let skip = (unit_open(rng).ln() / (-w).ln_1p()).floor();
        // Saturating cast: an infinite skip runs the iterator dry.
        match iter.nth(skip as usize) {
            Some(item) => chosen = item,
            None => return Some(chosen),
        }
        w *= unit_open(rng);
    }
}

/// Pick one element with probability proportional to its weight.
///
/// Elements whose weight is not a positive finite number are never
/// chosen. Returns `None` when no element has a usable weight.
pub fn sample_weighted<T, I, R>(iter: I, rng: &mut R) -> Option<T>
where
    I: IntoIterator<Item = (T, f64)>,
    R: Rng + ?Sized,
{
    let mut total = 0.0;
    let mut chosen = None;
    for (item, weight) in iter {
        if !(weight.is_finite() && weight > 0.0) {
            continue;
        }
        total += weight;
        if rng.random::<f64>() * total < weight {
            chosen = Some(item);
        }
    }
    chosen
}

/// Pick one element uniformly among those satisfying `pred`.
///
/// Single pass, no allocation.
pub fn sample_filtered<I, P, R>(iter: I, pred: P, rng: &mut R) -> Option<I::Item>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
    R: Rng + ?Sized,
{
    sample_one(iter.into_iter().filter(pred), rng)
}

/// Pick one element uniformly among those satisfying `pred` by rejection.
///
/// Draws a random candidate, returns it if it qualifies, otherwise
/// removes it and draws again. Each candidate is tested at most once.
pub fn sample_rejecting<T, P, R>(mut candidates: Vec<T>, mut pred: P, rng: &mut R) -> Option<T>
where
    P: FnMut(&T) -> bool,
    R: Rng + ?Sized,
{
    while !candidates.is_empty() {
        let i = rng.random_range(0..candidates.len());
        let candidate = candidates.swap_remove(i);
        if pred(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Pick one element satisfying `pred` using `strategy`.
pub fn sample_where<I, P, R>(
    iter: I,
    pred: P,
    strategy: SamplingStrategy,
    rng: &mut R,
) -> Option<I::Item>
where
    I: IntoIterator,
    P: FnMut(&I::Item) -> bool,
    R: Rng + ?Sized,
{
    match strategy {
        SamplingStrategy::Filtered => sample_filtered(iter, pred, rng),
        SamplingStrategy::Rejection => sample_rejecting(iter.into_iter().collect(), pred, rng),
    }
}
