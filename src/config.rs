//! Tunables for point fusion and frontal walks.
//!
//! All defaults live here and are applied once at the API boundary; the
//! algorithms receive a validated config by reference and never consult
//! globals.

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshWeldError;

/// Parameters of [`fuse_points`](crate::algs::fuse::fuse_points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuseConfig {
    /// Absolute distance below which two points are considered equal.
    pub tol_abs: f64,
    /// Distance tolerance relative to the bounding-box diagonal.
    pub tol_rel: f64,
    /// Target average number of points per grid cell.
    pub points_per_cell: usize,
    /// Fraction of a cell by which the grid origin is moved below the
    /// bounding-box minimum. Must lie in `[0, 1)`.
    pub shift: f64,
    /// Re-fuse the result on a grid shifted by `repeat_shift` to catch pairs
    /// split by a cell boundary on the first pass.
    pub repeat: bool,
    /// Grid shift used by the repeat pass. Must lie in `[0, 1)`.
    pub repeat_shift: f64,
    /// Absolute floor on the grid cell size.
    pub min_cell_size: f64,
}

impl Default for FuseConfig {
    fn default() -> Self {
        Self {
            tol_abs: 1e-5,
            tol_rel: 1e-5,
            points_per_cell: 1,
            shift: 0.5,
            repeat: false,
            repeat_shift: 0.75,
            min_cell_size: 1e-12,
        }
    }
}

impl FuseConfig {
    /// Builder-style setter for the absolute tolerance.
    pub fn with_tol_abs(mut self, tol: f64) -> Self {
        self.tol_abs = tol;
        self
    }

    /// Builder-style setter for the relative tolerance.
    pub fn with_tol_rel(mut self, tol: f64) -> Self {
        self.tol_rel = tol;
        self
    }

    /// Builder-style setter for the repeat pass.
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Builder-style setter for the grid shift.
    pub fn with_shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }

    /// Builder-style setter for the points-per-cell target.
    pub fn with_points_per_cell(mut self, ppc: usize) -> Self {
        self.points_per_cell = ppc;
        self
    }

    /// Effective fusion tolerance for a point set with bounding-box diagonal `diag`.
    #[inline]
    pub fn tolerance(&self, diag: f64) -> f64 {
        self.tol_abs.max(self.tol_rel * diag)
    }

    /// Checks every field, returning [`MeshWeldError::InvalidConfig`] on the first bad one.
    pub fn validate(&self) -> Result<(), MeshWeldError> {
        check_non_negative("tol_abs", self.tol_abs)?;
        check_non_negative("tol_rel", self.tol_rel)?;
        check_non_negative("min_cell_size", self.min_cell_size)?;
        check_shift("shift", self.shift)?;
        check_shift("repeat_shift", self.repeat_shift)?;
        if self.points_per_cell == 0 {
            return Err(MeshWeldError::InvalidConfig(
                "points_per_cell must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Parameters of [`frontal_walk`](crate::algs::frontal::frontal_walk).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Label given to the seeds.
    pub start_label: i64,
    /// Label increment per front layer. `0` labels components only.
    pub front_inc: i64,
    /// Label jump when a new disconnected part is seeded. `0` disables
    /// multi-part walking: the walk stops once the seeded parts are exhausted.
    pub part_inc: i64,
    /// Largest label that may be assigned. `None` is unbounded.
    pub max_val: Option<i64>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            start_label: 0,
            front_inc: 1,
            part_inc: 1,
            max_val: None,
        }
    }
}

impl WalkConfig {
    /// Component labelling: every element of a part gets the same label.
    pub fn components() -> Self {
        Self {
            front_inc: 0,
            ..Self::default()
        }
    }

    /// Distance-bounded growth from the seeds, without starting new parts.
    pub fn bounded(nsteps: i64) -> Self {
        Self {
            part_inc: 0,
            max_val: Some(nsteps),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), MeshWeldError> {
        if self.start_label < 0 {
            return Err(MeshWeldError::InvalidConfig(format!(
                "start_label must be non-negative, got {}",
                self.start_label
            )));
        }
        if self.front_inc < 0 {
            return Err(MeshWeldError::InvalidConfig(format!(
                "front_inc must be non-negative, got {}",
                self.front_inc
            )));
        }
        if self.part_inc < 0 {
            return Err(MeshWeldError::InvalidConfig(format!(
                "part_inc must be non-negative, got {}",
                self.part_inc
            )));
        }
        if let Some(m) = self.max_val {
            if m < 0 {
                return Err(MeshWeldError::InvalidConfig(format!(
                    "max_val must be non-negative, got {m}"
                )));
            }
        }
        Ok(())
    }
}

/// Aggregate configuration, convenient for loading from a file.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub fuse: FuseConfig,
    pub walk: WalkConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), MeshWeldError> {
        self.fuse.validate()?;
        self.walk.validate()
    }
}

fn check_non_negative(name: &str, v: f64) -> Result<(), MeshWeldError> {
    if !v.is_finite() || v < 0.0 {
        return Err(MeshWeldError::InvalidConfig(format!(
            "{name} must be finite and non-negative, got {v}"
        )));
    }
    Ok(())
}

fn check_shift(name: &str, v: f64) -> Result<(), MeshWeldError> {
    if !(0.0..1.0).contains(&v) {
        return Err(MeshWeldError::InvalidConfig(format!(
            "{name} must lie in [0, 1), got {v}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn rejects_bad_fuse_fields() {
        let cfg = FuseConfig::default().with_tol_abs(-1.0);
        assert!(matches!(cfg.validate(), Err(MeshWeldError::InvalidConfig(_))));
        let cfg = FuseConfig::default().with_shift(1.0);
        assert!(matches!(cfg.validate(), Err(MeshWeldError::InvalidConfig(_))));
        let cfg = FuseConfig::default().with_points_per_cell(0);
        assert!(cfg.validate().is_err());
        let cfg = FuseConfig::default().with_tol_rel(f64::NAN);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_negative_walk_increments() {
        let cfg = WalkConfig {
            front_inc: -1,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = WalkConfig {
            max_val: Some(-3),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn tolerance_takes_larger_bound() {
        let cfg = FuseConfig {
            tol_abs: 1e-3,
            tol_rel: 1e-2,
            ..Default::default()
        };
        assert_eq!(cfg.tolerance(0.01), 1e-3);
        assert!((cfg.tolerance(10.0) - 0.1).abs() < 1e-15);
    }
}
