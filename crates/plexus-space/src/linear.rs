//! Coordinate to linear-index bijection for lattices.

use crate::error::SpaceError;
use plexus_core::Cell;
use smallvec::SmallVec;

/// Maps lattice coordinates to dense indices and back.
///
/// The first axis varies fastest: in 2-D, `index = x + width * y`; in 3-D,
/// `index = x + width * (y + height * z)`. Coordinates are 0-based. The
/// mapping is exact and invertible for every extent `>= 1` on every axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearIndexer {
    dims: SmallVec<[usize; 4]>,
    strides: SmallVec<[usize; 4]>,
    len: usize,
}

impl LinearIndexer {
    /// Largest supported extent along one axis. Coordinates are `i32`.
    pub const MAX_EXTENT: usize = i32::MAX as usize;

    /// Build an indexer for a lattice with the given per-axis extents.
    ///
    /// Returns `Err(SpaceError::EmptySpace)` if any extent is 0, and
    /// `Err(SpaceError::InvalidConfig)` if there are no axes, an extent
    /// exceeds [`MAX_EXTENT`](Self::MAX_EXTENT), or the cell count
    /// overflows `usize`.
    pub fn new(dims: &[usize]) -> Result<Self, SpaceError> {
        if dims.is_empty() {
            return Err(SpaceError::InvalidConfig {
                reason: "a lattice needs at least one axis".into(),
            });
        }
        if dims.contains(&0) {
            return Err(SpaceError::EmptySpace);
        }
        let mut strides = SmallVec::with_capacity(dims.len());
        let mut len = 1usize;
        for (axis, &d) in dims.iter().enumerate() {
            if d > Self::MAX_EXTENT {
                return Err(SpaceError::InvalidConfig {
                    reason: format!("axis {axis} extent {d} exceeds {}", Self::MAX_EXTENT),
                });
            }
            strides.push(len);
            len = len.checked_mul(d).ok_or_else(|| SpaceError::InvalidConfig {
                reason: format!("cell count overflows usize for extents {dims:?}"),
            })?;
        }
        Ok(Self {
            dims: SmallVec::from_slice(dims),
            strides,
            len,
        })
    }

    /// Per-axis extents.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always `false`; construction rejects empty lattices.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether `cell` has the right dimensionality and lies in bounds.
    pub fn contains(&self, cell: &[i32]) -> bool {
        cell.len() == self.dims.len()
            && cell
                .iter()
                .zip(&self.dims)
                .all(|(&c, &d)| c >= 0 && (c as usize) < d)
    }

    /// Linear index of `cell`, or `None` if it is not a valid cell.
    pub fn to_index(&self, cell: &[i32]) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some(
            cell.iter()
                .zip(&self.strides)
                .map(|(&c, &s)| c as usize * s)
                .sum(),
        )
    }

    /// Cell at linear index `index`, or `None` if `index >= len()`.
    pub fn to_cell(&self, index: usize) -> Option<Cell> {
        if index >= self.len {
            return None;
        }
        let mut rem = index;
        let mut cell = Cell::with_capacity(self.dims.len());
        for &d in &self.dims {
            cell.push((rem % d) as i32);
            rem /= d;
        }
        Some(cell)
    }

    /// Linear index from per-axis offsets already known to be in range.
    pub(crate) fn offset(&self, axes: &[usize]) -> usize {
        axes.iter().zip(&self.strides).map(|(&a, &s)| a * s).sum()
    }

    /// All cells in index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len).filter_map(move |i| self.to_cell(i))
    }
}
