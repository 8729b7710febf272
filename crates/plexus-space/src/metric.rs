//! Distance metrics for continuous space.

/// Distance function of a continuous space.
///
/// The bounding-box pre-filter of a range query is exact for
/// [`Chebyshev`](Metric::Chebyshev) only; the other metrics are
/// post-filtered by exact distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    /// `sqrt(sum(d^2))`.
    #[default]
    Euclidean,
    /// `sum(|d|)`.
    Cityblock,
    /// `max(|d|)`.
    Chebyshev,
}

impl Metric {
    /// Combine per-axis displacements into a distance.
    pub fn combine(self, deltas: impl IntoIterator<Item = f64>) -> f64 {
        match self {
            Self::Euclidean => deltas.into_iter().map(|d| d * d).sum::<f64>().sqrt(),
            Self::Cityblock => deltas.into_iter().map(f64::abs).sum(),
            Self::Chebyshev => deltas.into_iter().map(f64::abs).fold(0.0, f64::max),
        }
    }

    /// Whether the distance given by `deltas` is at most `r`.
    ///
    /// Compares the same value [`combine`](Self::combine) returns, so a
    /// radius equal to a reported distance always includes that point.
    pub fn within(self, deltas: impl IntoIterator<Item = f64>, r: f64) -> bool {
        self.combine(deltas) <= r
    }

    /// Whether axis-aligned box containment already implies `within`.
    pub fn box_is_exact(self) -> bool {
        matches!(self, Self::Chebyshev)
    }
}

/// Displacement between two coordinates on one axis.
///
/// With `period = Some(p)` the shortest displacement on a circle of
/// circumference `p` is returned.
pub(crate) fn axis_delta(a: f64, b: f64, period: Option<f64>) -> f64 {
    let d = (a - b).abs();
    match period {
        Some(p) => d.min(p - d),
        None => d,
    }
}
