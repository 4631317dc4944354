//! Spatial grid indexer.
//!
//! Covers a point set with an axis-aligned grid of cubic cells sized so that a
//! cell holds about `points_per_cell` points on average, then maps every point
//! to an integer cell triple and a single scalar key.
//!
//! Degenerate inputs (coincident, collinear or coplanar points) never produce a
//! zero-size cell: the cell size is clamped to a positive floor and every axis
//! has at least one cell.

use crate::data::points::{Point3, PointSet};

/// Upper bound on the number of cells, as a multiple of the target cell count.
/// Keeps keys small for very elongated point clouds.
const MAX_CELL_FACTOR: f64 = 64.0;

/// Inputs of [`Grid::for_points`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParams {
    /// Target average number of points per cell (>= 1).
    pub points_per_cell: usize,
    /// Fraction of a cell by which the origin sits below the bounding box
    /// minimum, in `[0, 1)`.
    pub shift: f64,
    /// Absolute lower bound on the cell size.
    pub min_cell_size: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            points_per_cell: 1,
            shift: 0.5,
            min_cell_size: 1e-12,
        }
    }
}

/// Axis-aligned grid with mixed-radix cell keys.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    origin: Point3,
    cell_size: Point3,
    counts: [u64; 3],
    strides: [u64; 3],
}

impl Grid {
    /// Size a grid for `points`. Returns `None` for an empty point set.
    pub fn for_points(points: &PointSet, params: &GridParams) -> Option<Grid> {
        let bb = points.bbox()?;
        let extent = bb.extent();
        let target = points.len().div_ceil(params.points_per_cell.max(1)).max(1) as f64;

        let magnitude = bb
            .min
            .iter()
            .chain(bb.max.iter())
            .fold(1.0f64, |m, c| m.max(c.abs()));
        let floor = params.min_cell_size.max(f64::EPSILON * magnitude);

        let active: Vec<f64> = extent.iter().copied().filter(|&e| e > floor).collect();
        let mut esz = if active.is_empty() {
            floor
        } else {
            let volume: f64 = active.iter().product();
            (volume / target).powf(1.0 / active.len() as f64)
        };
        if !esz.is_finite() || esz < floor {
            esz = floor;
        }

        let shift = params.shift.clamp(0.0, 1.0 - f64::EPSILON);
        let mut counts = cell_counts(&extent, esz, shift);
        while total_cells(&counts) > MAX_CELL_FACTOR * (target + 1.0) {
            esz *= 2.0;
            counts = cell_counts(&extent, esz, shift);
        }

        let origin = [
            bb.min[0] - shift * esz,
            bb.min[1] - shift * esz,
            bb.min[2] - shift * esz,
        ];

        // smallest-extent axis varies slowest
        let mut order = [0usize, 1, 2];
        order.sort_by_key(|&k| (counts[k], k));
        let mut strides = [0u64; 3];
        strides[order[2]] = 1;
        strides[order[1]] = counts[order[2]];
        strides[order[0]] = counts[order[2]] * counts[order[1]];

        log::debug!(
            "grid: {} points, cell size {esz:e}, counts {:?}",
            points.len(),
            counts
        );

        Some(Grid {
            origin,
            cell_size: [esz; 3],
            counts,
            strides,
        })
    }

    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    #[inline]
    pub fn cell_size(&self) -> Point3 {
        self.cell_size
    }

    #[inline]
    pub fn counts(&self) -> [u64; 3] {
        self.counts
    }

    /// Total number of cells.
    pub fn ncells(&self) -> u64 {
        self.counts.iter().product()
    }

    /// Integer cell triple containing `p`. Points outside the grid are
    /// clamped to the nearest border cell.
    pub fn cell_of(&self, p: &Point3) -> [u64; 3] {
        let mut cell = [0u64; 3];
        for k in 0..3 {
            let t = ((p[k] - self.origin[k]) / self.cell_size[k]).floor();
            let hi = (self.counts[k] - 1) as f64;
            cell[k] = t.clamp(0.0, hi) as u64;
        }
        cell
    }

    /// Mixed-radix scalar key of a cell triple.
    #[inline]
    pub fn encode(&self, cell: [u64; 3]) -> u64 {
        cell[0] * self.strides[0] + cell[1] * self.strides[1] + cell[2] * self.strides[2]
    }

    #[inline]
    pub fn key_of(&self, p: &Point3) -> u64 {
        self.encode(self.cell_of(p))
    }

    /// Cell key of every point.
    pub fn keys(&self, points: &PointSet) -> Vec<u64> {
        points.iter().map(|p| self.key_of(p)).collect()
    }
}

fn cell_counts(extent: &Point3, esz: f64, shift: f64) -> [u64; 3] {
    let mut counts = [1u64; 3];
    for k in 0..3 {
        let n = ((extent[k] + shift * esz) / esz).floor();
        counts[k] = if n.is_finite() && n > 0.0 { n as u64 + 1 } else { 1 };
    }
    counts
}

fn total_cells(counts: &[u64; 3]) -> f64 {
    counts.iter().map(|&c| c as f64).product()
}
