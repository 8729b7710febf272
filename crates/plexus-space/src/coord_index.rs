//! Coordinate table with a uniform cell list for range queries.

use crate::error::SpaceError;
use crate::linear::LinearIndexer;
use crate::metric::axis_delta;
use indexmap::{IndexMap, IndexSet};
use plexus_core::{AgentId, Point};
use smallvec::SmallVec;

/// Position index for continuous space.
///
/// Holds the coordinates of every resident agent, keyed by id, and a
/// uniform grid of buckets of side `spacing` covering the extent. A box
/// query visits only the buckets overlapping the box, then checks each
/// candidate's coordinates axis by axis. Callers filter by their metric
/// afterwards when the box is not exact for it.
#[derive(Clone, Debug)]
pub struct CoordIndex {
    extent: Point,
    spacing: f64,
    periodic: bool,
    cells: LinearIndexer,
    buckets: Vec<IndexSet<AgentId>>,
    coords: IndexMap<AgentId, (Point, usize)>,
}

impl CoordIndex {
    /// Upper bound on the number of buckets.
    pub const MAX_CELLS: usize = 1 << 20;

    /// Create an empty index over `[0, extent)`.
    ///
    /// `extent` and `spacing` must be finite and positive; the space
    /// configuration validates them before calling this.
    pub fn new(extent: &[f64], spacing: f64, periodic: bool) -> Result<Self, SpaceError> {
        let counts: SmallVec<[usize; 4]> = extent
            .iter()
            .map(|&e| ((e / spacing).ceil() as usize).max(1))
            .collect();
        let cells = LinearIndexer::new(&counts)?;
        if cells.len() > Self::MAX_CELLS {
            return Err(SpaceError::InvalidConfig {
                reason: format!(
                    "spacing {spacing} yields {} cells, limit is {}",
                    cells.len(),
                    Self::MAX_CELLS
                ),
            });
        }
        Ok(Self {
            extent: SmallVec::from_slice(extent),
            spacing,
            periodic,
            buckets: vec![IndexSet::new(); cells.len()],
            cells,
            coords: IndexMap::new(),
        })
    }

    /// Number of indexed agents.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Whether no agents are indexed.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of buckets in the cell list.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Side length of a bucket.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Stored coordinates of `id`.
    pub fn get(&self, id: AgentId) -> Option<&Point> {
        self.coords.get(&id).map(|(p, _)| p)
    }

    /// All indexed ids.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.coords.keys().copied()
    }

    /// Index `id` at `point`.
    pub fn insert(&mut self, id: AgentId, point: Point) -> Result<(), SpaceError> {
        if self.coords.contains_key(&id) {
            return Err(SpaceError::AlreadyPlaced { id });
        }
        let slot = self.cell_of(&point);
        self.buckets[slot].insert(id);
        self.coords.insert(id, (point, slot));
        Ok(())
    }

    /// Drop `id`, returning its last coordinates.
    pub fn remove(&mut self, id: AgentId) -> Result<Point, SpaceError> {
        let (point, slot) = self
            .coords
            .swap_remove(&id)
            .ok_or(SpaceError::NotPlaced { id })?;
        self.buckets[slot].swap_remove(&id);
        Ok(point)
    }

    /// Replace the coordinates of `id`, returning the old ones.
    pub fn update(&mut self, id: AgentId, point: Point) -> Result<Point, SpaceError> {
        let new_slot = self.cell_of(&point);
        let entry = self
            .coords
            .get_mut(&id)
            .ok_or(SpaceError::NotPlaced { id })?;
        let (old_point, old_slot) = std::mem::replace(entry, (point, new_slot));
        if old_slot != new_slot {
            self.buckets[old_slot].swap_remove(&id);
            self.buckets[new_slot].insert(id);
        }
        Ok(old_point)
    }

    /// Lazily scan the ids whose coordinates lie in the axis-aligned box
    /// of half-width `half_width` around `center`.
    ///
    /// The scan borrows the index; it sees the state at the time of each
    /// `next()` call and cannot outlive a mutation.
    pub fn box_scan(&self, center: &[f64], half_width: f64) -> BoxScan<'_> {
        let mut ranges: SmallVec<[(usize, usize); 4]> = SmallVec::new();
        for (axis, &c) in center.iter().enumerate() {
            ranges.push(self.axis_range(axis, c, half_width));
        }
        let done = ranges.iter().any(|&(_, len)| len == 0);
        BoxScan {
            index: self,
            center: SmallVec::from_slice(center),
            half_width,
            odometer: SmallVec::from_elem(0, ranges.len()),
            ranges,
            done,
            current: None,
        }
    }

    /// Check that every id sits in the bucket its coordinates map to.
    pub fn is_consistent(&self) -> bool {
        let bucketed: usize = self.buckets.iter().map(|b| b.len()).sum();
        bucketed == self.coords.len()
            && self.coords.iter().all(|(id, (p, slot))| {
                *slot == self.cell_of(p) && self.buckets[*slot].contains(id)
            })
    }

    fn axis_cell(&self, axis: usize, x: f64) -> usize {
        let n = self.cells.dims()[axis];
        let c = (x / self.spacing).floor();
        if c <= 0.0 {
            0
        } else {
            (c as usize).min(n - 1)
        }
    }

    fn cell_of(&self, point: &[f64]) -> usize {
        let axes: SmallVec<[usize; 4]> = point
            .iter()
            .enumerate()
            .map(|(axis, &x)| self.axis_cell(axis, x))
            .collect();
        self.cells.offset(&axes)
    }

    /// First bucket and bucket count covering `[c - r, c + r]` on `axis`.
    fn axis_range(&self, axis: usize, c: f64, r: f64) -> (usize, usize) {
        let n = self.cells.dims()[axis];
        let extent = self.extent[axis];
        if !self.periodic {
            let lo = self.axis_cell(axis, (c - r).max(0.0));
            let hi = self.axis_cell(axis, (c + r).min(extent));
            return (lo, (hi + 1).saturating_sub(lo));
        }
        if 2.0 * r >= extent {
            return (0, n);
        }
        let lo = self.axis_cell(axis, (c - r).rem_euclid(extent));
        let hi = self.axis_cell(axis, (c + r).rem_euclid(extent));
        let wraps = c - r < 0.0 || c + r >= extent;
        let len = if wraps {
            n - lo + hi + 1
        } else {
            hi + 1 - lo
        };
        (lo, len.min(n))
    }

    fn in_box(&self, point: &[f64], center: &[f64], half_width: f64) -> bool {
        point.iter().zip(center).enumerate().all(|(axis, (&p, &c))| {
            let period = self.periodic.then(|| self.extent[axis]);
            axis_delta(p, c, period) <= half_width
        })
    }
}

/// Lazy box query over a [`CoordIndex`], yielding ids with coordinates.
///
/// Buckets are visited in odometer order over the covered cell ranges,
/// ids within a bucket in insertion order.
pub struct BoxScan<'a> {
    index: &'a CoordIndex,
    center: SmallVec<[f64; 4]>,
    half_width: f64,
    ranges: SmallVec<[(usize, usize); 4]>,
    odometer: SmallVec<[usize; 4]>,
    done: bool,
    current: Option<indexmap::set::Iter<'a, AgentId>>,
}

impl<'a> BoxScan<'a> {
    fn current_slot(&self) -> usize {
        let dims = self.index.cells.dims();
        let axes: SmallVec<[usize; 4]> = self
            .ranges
            .iter()
            .zip(&self.odometer)
            .zip(dims)
            .map(|((&(start, _), &step), &n)| (start + step) % n)
            .collect();
        self.index.cells.offset(&axes)
    }

    fn advance(&mut self) {
        for (step, &(_, len)) in self.odometer.iter_mut().zip(&self.ranges) {
            *step += 1;
            if *step < len {
                return;
            }
            *step = 0;
        }
        self.done = true;
    }
}

impl<'a> Iterator for BoxScan<'a> {
    type Item = (AgentId, &'a Point);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index;
        loop {
            if let Some(bucket) = self.current.as_mut() {
                for id in bucket.by_ref() {
                    if let Some((point, _)) = index.coords.get(id) {
                        if index.in_box(point, &self.center, self.half_width) {
                            return Some((*id, point));
                        }
                    }
                }
                self.current = None;
            }
            if self.done {
                return None;
            }
            let slot = self.current_slot();
            self.current = Some(index.buckets[slot].iter());
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use smallvec::smallvec;

    fn pt(x: f64, y: f64) -> Point {
        smallvec![x, y]
    }

    fn scan_ids(ix: &CoordIndex, c: &[f64], r: f64) -> Vec<u64> {
        let mut ids: Vec<u64> = ix.box_scan(c, r).map(|(id, _)| id.0).collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn bucket_count_rounds_up() {
        let ix = CoordIndex::new(&[10.0, 5.0], 3.0, false).unwrap();
        assert_eq!(ix.cell_count(), 4 * 2);
    }

    #[test]
    fn insert_update_remove() {
        let mut ix = CoordIndex::new(&[10.0, 10.0], 1.0, false).unwrap();
        ix.insert(AgentId(0), pt(0.5, 0.5)).unwrap();
        ix.insert(AgentId(1), pt(9.5, 9.5)).unwrap();
        assert_eq!(
            ix.insert(AgentId(1), pt(1.0, 1.0)),
            Err(SpaceError::AlreadyPlaced { id: AgentId(1) })
        );
        let old = ix.update(AgentId(0), pt(5.0, 5.0)).unwrap();
        assert_eq!(old, pt(0.5, 0.5));
        assert_eq!(ix.get(AgentId(0)), Some(&pt(5.0, 5.0)));
        assert!(ix.is_consistent());
        assert_eq!(ix.remove(AgentId(1)).unwrap(), pt(9.5, 9.5));
        assert_eq!(ix.len(), 1);
        assert!(ix.is_consistent());
    }

    #[test]
    fn box_scan_bounded() {
        let mut ix = CoordIndex::new(&[10.0, 10.0], 2.0, false).unwrap();
        ix.insert(AgentId(0), pt(1.0, 1.0)).unwrap();
        ix.insert(AgentId(1), pt(2.0, 2.0)).unwrap();
        ix.insert(AgentId(2), pt(9.0, 9.0)).unwrap();
        assert_eq!(scan_ids(&ix, &[1.0, 1.0], 1.0), vec![0, 1]);
        assert_eq!(scan_ids(&ix, &[1.0, 1.0], 0.5), vec![0]);
        assert_eq!(scan_ids(&ix, &[5.0, 5.0], 100.0), vec![0, 1, 2]);
    }

    #[test]
    fn box_scan_wraps_when_periodic() {
        let mut ix = CoordIndex::new(&[10.0, 10.0], 2.0, true).unwrap();
        ix.insert(AgentId(0), pt(0.5, 0.5)).unwrap();
        ix.insert(AgentId(1), pt(9.5, 9.5)).unwrap();
        ix.insert(AgentId(2), pt(5.0, 5.0)).unwrap();
        assert_eq!(scan_ids(&ix, &[0.5, 0.5], 1.0), vec![0, 1]);
        let bounded = {
            let mut b = CoordIndex::new(&[10.0, 10.0], 2.0, false).unwrap();
            b.insert(AgentId(0), pt(0.5, 0.5)).unwrap();
            b.insert(AgentId(1), pt(9.5, 9.5)).unwrap();
            b
        };
        assert_eq!(scan_ids(&bounded, &[0.5, 0.5], 1.0), vec![0]);
    }

    #[test]
    fn periodic_scan_with_partial_last_cell() {
        // 10 / 4 leaves a last bucket of width 2; a wrapped box must still
        // reach the full-width bucket before it.
        let mut ix = CoordIndex::new(&[10.0], 4.0, true).unwrap();
        ix.insert(AgentId(0), smallvec![7.6]).unwrap();
        assert_eq!(scan_ids(&ix, &[0.5], 3.0), vec![0]);
    }

    #[test]
    fn scan_yields_each_id_once_with_huge_radius() {
        let mut ix = CoordIndex::new(&[3.0, 3.0], 1.0, true).unwrap();
        for i in 0..9u64 {
            ix.insert(AgentId(i), pt((i % 3) as f64 + 0.5, (i / 3) as f64 + 0.5))
                .unwrap();
        }
        assert_eq!(scan_ids(&ix, &[1.5, 1.5], 1e9), (0..9).collect::<Vec<_>>());
    }

    #[test]
    fn too_many_cells_rejected() {
        assert!(matches!(
            CoordIndex::new(&[1e6, 1e6], 1.0, false),
            Err(SpaceError::InvalidConfig { .. })
        ));
    }

    proptest! {
        #[test]
        fn scan_matches_brute_force(
            periodic in any::<bool>(),
            spacing in 0.3f64..4.0,
            pts in proptest::collection::vec((0.0f64..10.0, 0.0f64..7.0), 0..40),
            cx in 0.0f64..10.0, cy in 0.0f64..7.0,
            r in 0.0f64..6.0,
        ) {
            let extent = [10.0, 7.0];
            let mut ix = CoordIndex::new(&extent, spacing, periodic).unwrap();
            for (i, &(x, y)) in pts.iter().enumerate() {
                ix.insert(AgentId(i as u64), pt(x, y)).unwrap();
            }
            let got = scan_ids(&ix, &[cx, cy], r);
            let expected: Vec<u64> = pts
                .iter()
                .enumerate()
                .filter(|(_, p)| {
                    let (x, y) = **p;
                    let period = |e: f64| periodic.then_some(e);
                    axis_delta(x, cx, period(extent[0])) <= r
                        && axis_delta(y, cy, period(extent[1])) <= r
                })
                .map(|(i, _)| i as u64)
                .collect();
            prop_assert_eq!(got, expected);
        }
    }
}
