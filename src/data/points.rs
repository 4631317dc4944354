//! Geometric coordinate buffer.
//!
//! Points are always stored as 3D `f64` triples; 1D and 2D inputs are padded
//! with zeros by [`PointSet::from_flat`]. Duplicates are expected and are not
//! an error.

use crate::mesh_error::MeshWeldError;

/// A single 3D coordinate.
pub type Point3 = [f64; 3];

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    /// Box around a single point.
    pub fn from_point(p: Point3) -> Self {
        Self { min: p, max: p }
    }

    /// Grow the box to contain `p`.
    pub fn include(&mut self, p: Point3) {
        for k in 0..3 {
            self.min[k] = self.min[k].min(p[k]);
            self.max[k] = self.max[k].max(p[k]);
        }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut out = *self;
        out.include(other.min);
        out.include(other.max);
        out
    }

    /// Per-axis side lengths.
    pub fn extent(&self) -> Point3 {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    /// Length of the box diagonal.
    pub fn diagonal(&self) -> f64 {
        let e = self.extent();
        (e[0] * e[0] + e[1] * e[1] + e[2] * e[2]).sqrt()
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    distance_sq(a, b).sqrt()
}

#[inline]
pub(crate) fn distance_sq(a: &Point3, b: &Point3) -> f64 {
    let dx = a[0] - b[0];
    let dy = a[1] - b[1];
    let dz = a[2] - b[2];
    dx * dx + dy * dy + dz * dz
}

/// Ordered sequence of 3D points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    coords: Vec<Point3>,
}

impl PointSet {
    pub fn new(coords: Vec<Point3>) -> Self {
        Self { coords }
    }

    /// Build from a flat buffer of `dim`-component points (`dim` in 1..=3).
    pub fn from_flat(dim: usize, flat: &[f64]) -> Result<Self, MeshWeldError> {
        if !(1..=3).contains(&dim) {
            return Err(MeshWeldError::InvalidConfig(format!(
                "point dimension must be 1, 2 or 3, got {dim}"
            )));
        }
        if flat.len() % dim != 0 {
            return Err(MeshWeldError::CoordinateLengthMismatch {
                expected: dim,
                found: flat.len(),
            });
        }
        let coords = flat
            .chunks_exact(dim)
            .map(|c| {
                let mut p = [0.0; 3];
                p[..dim].copy_from_slice(c);
                p
            })
            .collect();
        Ok(Self { coords })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<&Point3> {
        self.coords.get(i)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point3] {
        &self.coords
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3> + '_ {
        self.coords.iter()
    }

    pub fn into_inner(self) -> Vec<Point3> {
        self.coords
    }

    /// Bounding box of all points, `None` when empty.
    pub fn bbox(&self) -> Option<BoundingBox> {
        let mut it = self.coords.iter();
        let first = it.next()?;
        let mut bb = BoundingBox::from_point(*first);
        for p in it {
            bb.include(*p);
        }
        Some(bb)
    }

    /// Diagonal of the bounding box, `0.0` when empty.
    pub fn diagonal(&self) -> f64 {
        self.bbox().map_or(0.0, |bb| bb.diagonal())
    }

    /// Error on the first NaN or infinite coordinate.
    pub fn validate_finite(&self) -> Result<(), MeshWeldError> {
        match self
            .coords
            .iter()
            .position(|p| p.iter().any(|c| !c.is_finite()))
        {
            Some(point) => Err(MeshWeldError::NonFiniteCoordinate { point }),
            None => Ok(()),
        }
    }

    /// New point set holding the points at `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Result<PointSet, MeshWeldError> {
        let mut coords = Vec::with_capacity(indices.len());
        for (row, &i) in indices.iter().enumerate() {
            let p = self.coords.get(i).ok_or(MeshWeldError::TargetOutOfRange {
                row,
                value: i,
                ntargets: self.coords.len(),
            })?;
            coords.push(*p);
        }
        Ok(PointSet { coords })
    }

    /// Concatenate two point sets; indices of `other` are offset by `self.len()`.
    pub fn concat(&self, other: &PointSet) -> PointSet {
        let mut coords = Vec::with_capacity(self.len() + other.len());
        coords.extend_from_slice(&self.coords);
        coords.extend_from_slice(&other.coords);
        PointSet { coords }
    }
}

impl From<Vec<Point3>> for PointSet {
    fn from(coords: Vec<Point3>) -> Self {
        Self::new(coords)
    }
}

impl std::ops::Index<usize> for PointSet {
    type Output = Point3;

    fn index(&self, i: usize) -> &Point3 {
        &self.coords[i]
    }
}
