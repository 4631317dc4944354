//! Ragged tables in CSR (compressed sparse row) form.
//!
//! Row `i` occupies `values[offsets[i]..offsets[i + 1]]`. Used for entity
//! ownership lists and adjacency, where the row length varies: border entities
//! have one owner, interior ones two, non-manifold ones more.

use crate::mesh_error::MeshWeldError;

/// Padding value in fixed-width renderings of a ragged table.
pub const PAD: i64 = -1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Csr {
    offsets: Vec<usize>,
    values: Vec<usize>,
}

impl Default for Csr {
    fn default() -> Self {
        Self {
            offsets: vec![0],
            values: Vec::new(),
        }
    }
}

impl Csr {
    /// Build from nested rows.
    pub fn from_rows<R: AsRef<[usize]>>(rows: &[R]) -> Self {
        Self::from_row_iter(rows.iter().map(|r| r.as_ref().iter().copied()))
    }

    /// Build row by row, appending each row straight into the value buffer.
    pub fn from_row_iter<I, R>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = usize>,
    {
        let rows = rows.into_iter();
        let mut offsets = Vec::with_capacity(rows.size_hint().0 + 1);
        let mut values = Vec::new();
        offsets.push(0);
        for r in rows {
            values.extend(r);
            offsets.push(values.len());
        }
        Self { offsets, values }
    }

    /// Build from raw arrays, validating the offsets.
    pub fn from_parts(offsets: Vec<usize>, values: Vec<usize>) -> Result<Self, MeshWeldError> {
        if offsets.first() != Some(&0) {
            return Err(MeshWeldError::InvalidOffsets(
                "offsets must start at 0".into(),
            ));
        }
        if let Some(w) = offsets.windows(2).position(|w| w[0] > w[1]) {
            return Err(MeshWeldError::InvalidOffsets(format!(
                "offsets decrease at row {w}"
            )));
        }
        let last = offsets.last().copied().unwrap_or(0);
        if last != values.len() {
            return Err(MeshWeldError::InvalidOffsets(format!(
                "last offset {last} does not match {} values",
                values.len()
            )));
        }
        Ok(Self { offsets, values })
    }

    /// Build from per-row degrees and a fill callback; used by the transpose,
    /// which scatters values into rows out of order.
    pub(crate) fn from_degrees(
        degrees: &[usize],
        mut fill: impl FnMut(&mut [usize], &mut [usize]),
    ) -> Self {
        let mut offsets = Vec::with_capacity(degrees.len() + 1);
        offsets.push(0);
        let mut acc = 0;
        for &d in degrees {
            acc += d;
            offsets.push(acc);
        }
        let mut values = vec![0usize; acc];
        let mut cursor: Vec<usize> = offsets[..degrees.len()].to_vec();
        fill(&mut cursor, &mut values);
        Self { offsets, values }
    }

    #[inline]
    pub fn nrows(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Total number of stored values.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[usize] {
        &self.values[self.offsets[i]..self.offsets[i + 1]]
    }

    #[inline]
    pub fn degree(&self, i: usize) -> usize {
        self.offsets[i + 1] - self.offsets[i]
    }

    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.offsets.windows(2).map(|w| &self.values[w[0]..w[1]])
    }

    #[inline]
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    #[inline]
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<usize>) {
        (self.offsets, self.values)
    }

    /// Largest row length.
    pub fn max_degree(&self) -> usize {
        self.offsets
            .windows(2)
            .map(|w| w[1] - w[0])
            .max()
            .unwrap_or(0)
    }

    /// Fixed-width rendering padded with [`PAD`].
    ///
    /// `width` defaults to [`max_degree`](Self::max_degree); rows longer than
    /// an explicit width are rejected rather than truncated.
    pub fn to_padded(&self, width: Option<usize>) -> Result<Vec<Vec<i64>>, MeshWeldError> {
        let max = self.max_degree();
        let width = width.unwrap_or(max);
        if max > width {
            return Err(MeshWeldError::PaddedWidthTooSmall {
                width,
                max_degree: max,
            });
        }
        Ok(self
            .rows()
            .map(|r| {
                let mut out: Vec<i64> = r.iter().map(|&v| v as i64).collect();
                out.resize(width, PAD);
                out
            })
            .collect())
    }

    /// Transpose: row `j` of the result lists every row `i` holding value `j`,
    /// in increasing `i`. Repeated values within a row are kept once.
    pub fn transpose(&self, ncols: usize) -> Result<Csr, MeshWeldError> {
        let mut degrees = vec![0usize; ncols];
        for (i, r) in self.rows().enumerate() {
            for (k, &v) in r.iter().enumerate() {
                if v >= ncols {
                    return Err(MeshWeldError::TargetOutOfRange {
                        row: i,
                        value: v,
                        ntargets: ncols,
                    });
                }
                if !r[..k].contains(&v) {
                    degrees[v] += 1;
                }
            }
        }
        Ok(Csr::from_degrees(&degrees, |cursor, values| {
            for (i, r) in self.rows().enumerate() {
                for (k, &v) in r.iter().enumerate() {
                    if !r[..k].contains(&v) {
                        values[cursor[v]] = i;
                        cursor[v] += 1;
                    }
                }
            }
        }))
    }
}
