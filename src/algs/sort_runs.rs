//! Stable sort + run detection: the shared primitive behind point fusion,
//! entity deduplication and duplicate-element removal.
//!
//! Items are ordered by key with a *stable* sort, so items with equal keys keep
//! their input order inside a run. Determinism of every dedup in this crate
//! follows from that: identical input content always yields identical runs.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Result of sorting items by key and grouping equal neighbours.
///
/// `perm` lists item indices in sorted order; run `r` covers
/// `perm[offsets[r]..offsets[r + 1]]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Runs {
    pub perm: Vec<usize>,
    pub offsets: Vec<usize>,
}

impl Runs {
    #[inline]
    pub fn nruns(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Item indices of run `r`, in increasing input order.
    #[inline]
    pub fn run(&self, r: usize) -> &[usize] {
        &self.perm[self.offsets[r]..self.offsets[r + 1]]
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &[usize]> + '_ {
        self.offsets.windows(2).map(|w| &self.perm[w[0]..w[1]])
    }

    /// Run id of every item, indexed by item.
    pub fn run_of(&self) -> Vec<usize> {
        let mut out = vec![0usize; self.perm.len()];
        for (r, run) in self.iter().enumerate() {
            for &i in run {
                out[i] = r;
            }
        }
        out
    }

    /// First (lowest-index) item of every run.
    pub fn leaders(&self) -> Vec<usize> {
        self.iter().map(|run| run[0]).collect()
    }
}

/// Indices `0..keys.len()` stably sorted by `keys`.
pub fn stable_argsort<K>(keys: &[K]) -> Vec<usize>
where
    K: Ord + Sync,
{
    let mut perm: Vec<usize> = (0..keys.len()).collect();
    #[cfg(feature = "rayon")]
    perm.par_sort_by(|&a, &b| keys[a].cmp(&keys[b]));
    #[cfg(not(feature = "rayon"))]
    perm.sort_by(|&a, &b| keys[a].cmp(&keys[b]));
    perm
}

/// Offsets of maximal runs of consecutive `perm` entries for which `same`
/// holds pairwise between neighbours.
pub fn run_offsets(perm: &[usize], mut same: impl FnMut(usize, usize) -> bool) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(perm.len() / 2 + 2);
    offsets.push(0);
    for i in 1..perm.len() {
        if !same(perm[i - 1], perm[i]) {
            offsets.push(i);
        }
    }
    if !perm.is_empty() {
        offsets.push(perm.len());
    }
    offsets
}

/// Stable sort by exact key, then group equal keys into runs.
pub fn sort_runs_by_key<K>(keys: &[K]) -> Runs
where
    K: Ord + Sync,
{
    let perm = stable_argsort(keys);
    let offsets = run_offsets(&perm, |a, b| keys[a] == keys[b]);
    Runs { perm, offsets }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_are_stable() {
        let keys = [3, 1, 3, 2, 1];
        let runs = sort_runs_by_key(&keys);
        assert_eq!(runs.perm, vec![1, 4, 3, 0, 2]);
        assert_eq!(runs.offsets, vec![0, 2, 3, 5]);
        assert_eq!(runs.run(2), &[0, 2]);
        assert_eq!(runs.leaders(), vec![1, 3, 0]);
        assert_eq!(runs.run_of(), vec![2, 0, 2, 1, 0]);
    }

    #[test]
    fn empty_input_has_no_runs() {
        let runs = sort_runs_by_key::<u64>(&[]);
        assert_eq!(runs.nruns(), 0);
        assert_eq!(runs.iter().count(), 0);
    }

    #[test]
    fn slice_keys_compare_lexicographically() {
        let rows: Vec<&[usize]> = vec![&[1, 2], &[0, 5], &[1, 2]];
        let runs = sort_runs_by_key(&rows);
        assert_eq!(runs.leaders(), vec![1, 0]);
        assert_eq!(runs.run_of(), vec![1, 0, 1]);
    }
}
