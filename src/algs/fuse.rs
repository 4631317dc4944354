//! Point fusion: collapse near-duplicate coordinates.
//!
//! # Algorithm
//! 1. Index every point into a grid cell ([`Grid`]).
//! 2. Stably sort points by cell key.
//! 3. Inside each cell run, compare every point with the representatives
//!    already found in that run; a point within tolerance of one joins it,
//!    otherwise it becomes a new representative.
//! 4. Representatives keep the coordinates of the first point of their group
//!    (lowest input index); no averaging.
//! 5. Canonical points are emitted in order of first appearance in the input.
//!
//! # Known limitation
//! Points are compared only inside a cell. Two points closer than the
//! tolerance but lying on opposite sides of a cell boundary are *not* fused.
//! [`FuseConfig::repeat`] runs a second pass on a differently shifted grid and
//! composes the index maps, which makes such misses rarer but does not rule
//! them out.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use hashbrown::HashMap;

use crate::algs::grid::{Grid, GridParams};
use crate::algs::sort_runs::sort_runs_by_key;
use crate::config::FuseConfig;
use crate::data::points::{PointSet, distance_sq};
use crate::mesh_error::MeshWeldError;

/// Output of [`fuse_points`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fused {
    /// Canonical (deduplicated) points.
    pub points: PointSet,
    /// For every input point, the index of its representative in `points`.
    pub index: Vec<usize>,
}

impl Fused {
    /// Number of input points merged away.
    pub fn nremoved(&self) -> usize {
        self.index.len() - self.points.len()
    }
}

/// Fuse near-duplicate points.
///
/// Two points are equal when their distance is at most
/// `max(tol_abs, tol_rel * diag)`, with `diag` the bounding-box diagonal of
/// `points`. See the module docs for the cell-boundary limitation.
pub fn fuse_points(points: &PointSet, cfg: &FuseConfig) -> Result<Fused, MeshWeldError> {
    cfg.validate()?;
    points.validate_finite()?;
    if points.is_empty() {
        return Ok(Fused::default());
    }
    let tol = cfg.tolerance(points.diagonal());

    let first = fuse_pass(points, tol, cfg.shift, cfg)?;
    if !cfg.repeat {
        return Ok(first);
    }

    let second = fuse_pass(&first.points, tol, cfg.repeat_shift, cfg)?;
    log::debug!("fuse repeat pass removed {} further points", second.nremoved());
    let index = first.index.iter().map(|&i| second.index[i]).collect();
    Ok(Fused {
        points: second.points,
        index,
    })
}

/// One grid pass with a fixed tolerance and shift.
fn fuse_pass(
    points: &PointSet,
    tol: f64,
    shift: f64,
    cfg: &FuseConfig,
) -> Result<Fused, MeshWeldError> {
    let params = GridParams {
        points_per_cell: cfg.points_per_cell,
        shift,
        min_cell_size: cfg.min_cell_size.max(tol),
    };
    let Some(grid) = Grid::for_points(points, &params) else {
        return Ok(Fused::default());
    };
    let keys = grid.keys(points);
    let runs = sort_runs_by_key(&keys);
    let tol_sq = tol * tol;
    let coords = points.as_slice();

    // owner[i] = input index of the representative of point i
    let merge_run = |run: &[usize]| -> Vec<(usize, usize)> {
        let mut reps: Vec<usize> = Vec::new();
        let mut out = Vec::with_capacity(run.len());
        for &i in run {
            match reps
                .iter()
                .copied()
                .find(|&r| distance_sq(&coords[r], &coords[i]) <= tol_sq)
            {
                Some(r) => out.push((i, r)),
                None => {
                    reps.push(i);
                    out.push((i, i));
                }
            }
        }
        out
    };

    #[cfg(feature = "rayon")]
    let pairs: Vec<Vec<(usize, usize)>> = runs
        .offsets
        .par_windows(2)
        .map(|w| merge_run(&runs.perm[w[0]..w[1]]))
        .collect();
    #[cfg(not(feature = "rayon"))]
    let pairs: Vec<Vec<(usize, usize)>> = runs.iter().map(merge_run).collect();

    let mut owner = vec![0usize; points.len()];
    for (i, r) in pairs.into_iter().flatten() {
        owner[i] = r;
    }

    let mut new_id = vec![usize::MAX; points.len()];
    let mut canonical = Vec::new();
    for i in 0..points.len() {
        if owner[i] == i {
            new_id[i] = canonical.len();
            canonical.push(coords[i]);
        }
    }
    let index: Vec<usize> = owner.iter().map(|&r| new_id[r]).collect();

    log::debug!(
        "fuse pass: {} points -> {} in {} cell runs (tol {tol:e})",
        points.len(),
        canonical.len(),
        runs.nruns()
    );

    Ok(Fused {
        points: PointSet::new(canonical),
        index,
    })
}

/// Match `query` points against `reference` points.
///
/// Returns, per query point, the index of a reference point within tolerance,
/// or `None`. When several reference points fuse together the lowest index is
/// reported. The tolerance is taken from the combined bounding box.
pub fn match_points(
    reference: &PointSet,
    query: &PointSet,
    cfg: &FuseConfig,
) -> Result<Vec<Option<usize>>, MeshWeldError> {
    let all = reference.concat(query);
    let fused = fuse_points(&all, cfg)?;
    let nref = reference.len();

    let mut first_ref: HashMap<usize, usize> = HashMap::with_capacity(nref);
    for (r, &id) in fused.index[..nref].iter().enumerate() {
        first_ref.entry(id).or_insert(r);
    }
    Ok(fused.index[nref..]
        .iter()
        .map(|id| first_ref.get(id).copied())
        .collect())
}
