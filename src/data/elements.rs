//! Fixed-plexitude integer topology buffer.
//!
//! An [`ElementTable`] is a dense `nelems × nplex` table of node indices stored
//! row-major in a single `Vec<usize>`. The same container holds element
//! connectivity (rows of node ids) and higher→lower incidence tables (rows of
//! entity ids).

use crate::mesh_error::MeshWeldError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementTable {
    nplex: usize,
    data: Vec<usize>,
}

impl ElementTable {
    /// Wrap a flat row-major buffer.
    pub fn new(nplex: usize, data: Vec<usize>) -> Result<Self, MeshWeldError> {
        if nplex == 0 {
            return Err(MeshWeldError::EmptyPlexitude);
        }
        if data.len() % nplex != 0 {
            return Err(MeshWeldError::PlexitudeMismatch {
                expected: nplex,
                found: data.len() % nplex,
            });
        }
        Ok(Self { nplex, data })
    }

    /// Empty table with the given plexitude.
    pub fn empty(nplex: usize) -> Result<Self, MeshWeldError> {
        Self::new(nplex, Vec::new())
    }

    /// Build from fixed-size rows.
    pub fn from_rows<const N: usize>(rows: &[[usize; N]]) -> Result<Self, MeshWeldError> {
        Self::new(N, rows.iter().flatten().copied().collect())
    }

    /// Build from slices, checking that every row has the same length.
    pub fn from_slices<R: AsRef<[usize]>>(rows: &[R]) -> Result<Self, MeshWeldError> {
        let nplex = match rows.first() {
            Some(r) => r.as_ref().len(),
            None => return Err(MeshWeldError::EmptyPlexitude),
        };
        let mut data = Vec::with_capacity(nplex * rows.len());
        for r in rows {
            let r = r.as_ref();
            if r.len() != nplex {
                return Err(MeshWeldError::PlexitudeMismatch {
                    expected: nplex,
                    found: r.len(),
                });
            }
            data.extend_from_slice(r);
        }
        Self::new(nplex, data)
    }

    #[inline]
    pub fn nplex(&self) -> usize {
        self.nplex
    }

    #[inline]
    pub fn nelems(&self) -> usize {
        self.data.len() / self.nplex
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[usize] {
        &self.data[i * self.nplex..(i + 1) * self.nplex]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, usize> {
        self.data.chunks_exact(self.nplex)
    }

    #[inline]
    pub fn as_flat(&self) -> &[usize] {
        &self.data
    }

    pub fn into_flat(self) -> Vec<usize> {
        self.data
    }

    /// Largest referenced value, `None` for an empty table.
    pub fn max_node(&self) -> Option<usize> {
        self.data.iter().copied().max()
    }

    /// Check that every entry is below `npoints`.
    pub fn validate(&self, npoints: usize) -> Result<(), MeshWeldError> {
        for (e, row) in self.rows().enumerate() {
            for (slot, &node) in row.iter().enumerate() {
                if node >= npoints {
                    return Err(MeshWeldError::NodeIndexOutOfRange {
                        element: e,
                        slot,
                        node,
                        npoints,
                    });
                }
            }
        }
        Ok(())
    }

    /// Replace every node `n` by `map[n]`.
    pub fn remap_nodes(&self, map: &[usize]) -> Result<ElementTable, MeshWeldError> {
        self.validate(map.len())?;
        Ok(ElementTable {
            nplex: self.nplex,
            data: self.data.iter().map(|&n| map[n]).collect(),
        })
    }

    /// New table holding the rows at `elems`, in that order.
    pub fn select(&self, elems: &[usize]) -> Result<ElementTable, MeshWeldError> {
        let n = self.nelems();
        let mut data = Vec::with_capacity(elems.len() * self.nplex);
        for (row, &e) in elems.iter().enumerate() {
            if e >= n {
                return Err(MeshWeldError::TargetOutOfRange {
                    row,
                    value: e,
                    ntargets: n,
                });
            }
            data.extend_from_slice(self.row(e));
        }
        Ok(ElementTable {
            nplex: self.nplex,
            data,
        })
    }

    /// Sorted, deduplicated list of nodes referenced by the table.
    pub fn used_nodes(&self) -> Vec<usize> {
        let mut nodes = self.data.clone();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }
}
