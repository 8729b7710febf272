//! Continuous space: agents live at real-valued points of a box.

use crate::coord_index::CoordIndex;
use crate::error::SpaceError;
use crate::metric::{axis_delta, Metric};
use crate::space::{check_radius, kind_mismatch, IdIter, Space};
use plexus_core::{AgentId, Point, Position, PositionKind};
use rand::{Rng, RngCore};
use smallvec::SmallVec;
use tracing::debug;

/// Construction parameters for a [`ContinuousSpace`].
///
/// # Examples
///
/// ```
/// use plexus_space::{ContinuousConfig, ContinuousSpace, Metric};
///
/// let config = ContinuousConfig::new(&[100.0, 50.0])
///     .with_spacing(5.0)
///     .with_metric(Metric::Cityblock)
///     .periodic(true);
/// let space = ContinuousSpace::new(config).unwrap();
/// assert_eq!(space.extent(), &[100.0, 50.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ContinuousConfig {
    /// Side lengths of the box `[0, extent)`. Must be finite and positive.
    pub extent: Point,
    /// Side length of the cell-list buckets. `None` = a tenth of the
    /// smallest extent.
    pub spacing: Option<f64>,
    /// Wrap positions and distances around the box. Default: `false`.
    pub periodic: bool,
    /// Distance function. Default: [`Metric::Euclidean`].
    pub metric: Metric,
}

impl ContinuousConfig {
    /// Bounded Euclidean space of the given extent with default spacing.
    pub fn new(extent: &[f64]) -> Self {
        Self {
            extent: SmallVec::from_slice(extent),
            spacing: None,
            periodic: false,
            metric: Metric::default(),
        }
    }

    /// Set the bucket side length.
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = Some(spacing);
        self
    }

    /// Set the distance function.
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    /// Set whether the box wraps around.
    pub fn periodic(mut self, periodic: bool) -> Self {
        self.periodic = periodic;
        self
    }

    /// The bucket side length after applying the default.
    pub fn resolved_spacing(&self) -> f64 {
        self.spacing
            .unwrap_or_else(|| self.extent.iter().copied().fold(f64::INFINITY, f64::min) / 10.0)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), SpaceError> {
        if self.extent.is_empty() {
            return Err(SpaceError::InvalidConfig {
                reason: "continuous space needs at least one axis".into(),
            });
        }
        for (axis, &e) in self.extent.iter().enumerate() {
            if !(e.is_finite() && e > 0.0) {
                return Err(SpaceError::InvalidConfig {
                    reason: format!("extent on axis {axis} must be finite and positive, got {e}"),
                });
            }
        }
        let spacing = self.resolved_spacing();
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(SpaceError::InvalidConfig {
                reason: format!("spacing must be finite and positive, got {spacing}"),
            });
        }
        Ok(())
    }
}

/// A box of real-valued points with an exact range query.
///
/// Bounded spaces accept points in `[0, extent]`, periodic ones in
/// `[0, extent)`. Neighbour queries prune through a uniform cell list,
/// keep the candidates inside the axis-aligned box of half-width `r`, and
/// then keep those within `r` under the configured [`Metric`] (inclusive).
#[derive(Clone, Debug)]
pub struct ContinuousSpace {
    extent: Point,
    periodic: bool,
    metric: Metric,
    index: CoordIndex,
}

impl ContinuousSpace {
    /// Build a space from a validated `config`.
    pub fn new(config: ContinuousConfig) -> Result<Self, SpaceError> {
        config.validate()?;
        let spacing = config.resolved_spacing();
        let index = CoordIndex::new(&config.extent, spacing, config.periodic)?;
        debug!(
            extent = ?config.extent.as_slice(),
            spacing,
            periodic = config.periodic,
            metric = ?config.metric,
            cells = index.cell_count(),
            "continuous space built"
        );
        Ok(Self {
            extent: config.extent,
            periodic: config.periodic,
            metric: config.metric,
            index,
        })
    }

    /// Side lengths of the box.
    pub fn extent(&self) -> &[f64] {
        &self.extent
    }

    /// Whether the box wraps around.
    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// Distance function.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// The coordinate index backing this space.
    pub fn index(&self) -> &CoordIndex {
        &self.index
    }

    /// The point reached from `from` by adding `delta`.
    ///
    /// Wraps into `[0, extent)` when periodic; otherwise each axis is
    /// clamped to `[0, extent]`.
    pub fn walk_target(&self, from: &Position, delta: &[f64]) -> Result<Position, SpaceError> {
        let start = self.point(from)?;
        if delta.len() != self.extent.len() {
            return Err(SpaceError::DimensionMismatch {
                expected: self.extent.len(),
                given: delta.len(),
            });
        }
        let target: Point = start
            .iter()
            .zip(delta)
            .zip(&self.extent)
            .map(|((&x, &d), &e)| {
                let moved = x + d;
                if self.periodic {
                    let w = moved.rem_euclid(e);
                    // rem_euclid can round up to e for tiny negative inputs.
                    if w >= e {
                        0.0
                    } else {
                        w
                    }
                } else {
                    moved.clamp(0.0, e)
                }
            })
            .collect();
        Ok(Position::Point(target))
    }

    /// Ids within `r` of `pos` together with their exact distance.
    pub fn nearby_with_distance<'a>(
        &'a self,
        pos: &Position,
        r: f64,
    ) -> Result<impl Iterator<Item = (AgentId, f64)> + 'a, SpaceError> {
        let center = self.point(pos)?.clone();
        check_radius(r)?;
        let metric = self.metric;
        Ok(self.index.box_scan(&center, r).filter_map(move |(id, p)| {
            let d = metric.combine(self.deltas(p, &center));
            (d <= r).then_some((id, d))
        }))
    }

    fn point<'p>(&self, pos: &'p Position) -> Result<&'p Point, SpaceError> {
        let Position::Point(point) = pos else {
            return Err(kind_mismatch(PositionKind::Point, pos));
        };
        if point.len() != self.extent.len() {
            return Err(SpaceError::DimensionMismatch {
                expected: self.extent.len(),
                given: point.len(),
            });
        }
        let inside = point.iter().zip(&self.extent).all(|(&x, &e)| {
            if self.periodic {
                (0.0..e).contains(&x)
            } else {
                (0.0..=e).contains(&x)
            }
        });
        if !inside {
            let bounds = if self.periodic {
                format!("0 <= x < {:?}", self.extent.as_slice())
            } else {
                format!("0 <= x <= {:?}", self.extent.as_slice())
            };
            return Err(SpaceError::OutOfBounds {
                position: pos.clone(),
                bounds,
            });
        }
        Ok(point)
    }

    fn deltas<'s>(&'s self, a: &'s [f64], b: &'s [f64]) -> impl Iterator<Item = f64> + 's {
        a.iter()
            .zip(b)
            .zip(&self.extent)
            .map(move |((&x, &y), &e)| axis_delta(x, y, self.periodic.then_some(e)))
    }
}

impl Space for ContinuousSpace {
    fn kind(&self) -> PositionKind {
        PositionKind::Point
    }

    fn ndim(&self) -> usize {
        self.extent.len()
    }

    fn validate(&self, pos: &Position) -> Result<(), SpaceError> {
        self.point(pos).map(drop)
    }

    fn random_position(&self, rng: &mut dyn RngCore) -> Position {
        let point: Point = self
            .extent
            .iter()
            .map(|&e| rng.random_range(0.0..e))
            .collect();
        Position::Point(point)
    }

    fn add_to_space(&mut self, id: AgentId, pos: &Position) -> Result<(), SpaceError> {
        let point = self.point(pos)?.clone();
        self.index.insert(id, point)
    }

    fn remove_from_space(&mut self, id: AgentId) -> Result<Position, SpaceError> {
        self.index.remove(id).map(Position::Point)
    }

    fn move_agent(&mut self, id: AgentId, pos: &Position) -> Result<Position, SpaceError> {
        let point = self.point(pos)?.clone();
        self.index.update(id, point).map(Position::Point)
    }

    fn position_of(&self, id: AgentId) -> Option<Position> {
        self.index.get(id).cloned().map(Position::Point)
    }

    fn resident_count(&self) -> usize {
        self.index.len()
    }

    fn resident_ids(&self) -> IdIter<'_> {
        Box::new(self.index.ids())
    }

    fn nearby_ids<'a>(&'a self, pos: &Position, r: f64) -> Result<IdIter<'a>, SpaceError> {
        let center = self.point(pos)?.clone();
        check_radius(r)?;
        let scan = self.index.box_scan(&center, r);
        if self.metric.box_is_exact() {
            return Ok(Box::new(scan.map(|(id, _)| id)));
        }
        let metric = self.metric;
        Ok(Box::new(scan.filter_map(move |(id, p)| {
            metric.within(self.deltas(p, &center), r).then_some(id)
        })))
    }

    fn distance(&self, a: &Position, b: &Position) -> Result<f64, SpaceError> {
        let (a, b) = (self.point(a)?, self.point(b)?);
        Ok(self.metric.combine(self.deltas(a, b)))
    }
}
