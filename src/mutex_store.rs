use crate::error::{CsError, CsResult};

/// Sparse symmetric adjacency of mutex pairs, indexed by value id.
///
/// `mutex[i]` lists every value id `j` such that the pair `(i, j)` is
/// jointly forbidden by some posted constraint. Symmetry — `j` in
/// `mutex[i]` iff `i` in `mutex[j]` — is established by [`Manager`] at
/// construction time, not by queries here: [`MutexStore::set`] appends to
/// exactly one row and performs no deduplication or mirroring itself.
///
/// [`Manager`]: crate::manager::Manager
#[derive(Debug, Clone, PartialEq)]
pub struct MutexStore {
    rows: Vec<Vec<usize>>,
}

impl MutexStore {
    /// Builds a store with `len` empty rows, one per value id registered
    /// in the value table at the moment the store is created.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            rows: vec![Vec::new(); len],
        }
    }

    /// The number of rows in this store (equal to the value table's size
    /// when the store was created).
    #[must_use]
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, i: usize) -> CsResult<&Vec<usize>> {
        self.rows.get(i).ok_or(CsError::OutOfRange {
            index: i,
            len: self.rows.len(),
        })
    }

    /// Appends `j` to `mutex[i]`. Does not deduplicate and does not touch
    /// `mutex[j]` — callers establish symmetry explicitly by calling `set`
    /// on both rows.
    pub fn set(&mut self, i: usize, j: usize) -> CsResult<()> {
        let len = self.rows.len();
        let row = self.rows.get_mut(i).ok_or(CsError::OutOfRange { index: i, len })?;
        row.push(j);
        Ok(())
    }

    /// A read-only view of the mutex partners of value `i`.
    pub fn get(&self, i: usize) -> CsResult<&[usize]> {
        self.row(i).map(Vec::as_slice)
    }

    /// Whether `j` appears in `mutex[i]` — a linear scan, used for testing
    /// and for symmetric queries.
    pub fn find(&self, i: usize, j: usize) -> CsResult<bool> {
        Ok(self.row(i)?.contains(&j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_rows_are_empty() {
        let s = MutexStore::new(3);
        assert_eq!(s.size(), 3);
        assert!(s.get(0).unwrap().is_empty());
    }

    #[test]
    fn set_appends_without_dedup() {
        let mut s = MutexStore::new(2);
        s.set(0, 1).unwrap();
        s.set(0, 1).unwrap();
        assert_eq!(s.get(0).unwrap(), &[1, 1]);
    }

    #[test]
    fn set_does_not_mirror() {
        let mut s = MutexStore::new(2);
        s.set(0, 1).unwrap();
        assert!(s.get(1).unwrap().is_empty());
    }

    #[test]
    fn find_scans_linearly() {
        let mut s = MutexStore::new(2);
        s.set(0, 1).unwrap();
        assert!(s.find(0, 1).unwrap());
        assert!(!s.find(0, 0).unwrap());
    }

    #[test]
    fn out_of_range_access_fails() {
        let s = MutexStore::new(1);
        assert_eq!(
            s.get(5).unwrap_err(),
            CsError::OutOfRange { index: 5, len: 1 }
        );
    }
}
