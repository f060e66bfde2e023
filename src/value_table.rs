use crate::error::{CsError, CsResult};
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
struct Entry<T> {
    value: Value<T>,
    enabled: bool,
    active_mutexes: usize,
}

/// A dense, index-addressed table of every value over every variable.
///
/// Each entry carries the value itself, whether it is currently enabled,
/// and how many of its mutex partners are currently enabled. Indices are
/// assigned by insertion order and are stable for the table's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable<T> {
    table: Vec<Entry<T>>,
}

impl<T> Default for ValueTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValueTable<T> {
    /// Builds an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self { table: Vec::new() }
    }

    /// Appends `value` with `enabled = true` and `active_mutexes = 0`,
    /// returning its index.
    pub fn insert(&mut self, value: Value<T>) -> usize {
        self.table.push(Entry {
            value,
            enabled: true,
            active_mutexes: 0,
        });
        self.table.len() - 1
    }

    /// The number of values registered in this table.
    #[must_use]
    pub fn size(&self) -> usize {
        self.table.len()
    }

    fn entry(&self, i: usize) -> CsResult<&Entry<T>> {
        self.table.get(i).ok_or(CsError::OutOfRange {
            index: i,
            len: self.table.len(),
        })
    }

    fn entry_mut(&mut self, i: usize) -> CsResult<&mut Entry<T>> {
        let len = self.table.len();
        self.table
            .get_mut(i)
            .ok_or(CsError::OutOfRange { index: i, len })
    }

    /// Returns the value stored at index `i`.
    pub fn get_value(&self, i: usize) -> CsResult<&Value<T>> {
        self.entry(i).map(|e| &e.value)
    }

    /// Returns whether the value at index `i` is currently enabled.
    pub fn get_status(&self, i: usize) -> CsResult<bool> {
        self.entry(i).map(|e| e.enabled)
    }

    /// Sets whether the value at index `i` is currently enabled.
    pub fn set_status(&mut self, i: usize, enabled: bool) -> CsResult<()> {
        self.entry_mut(i)?.enabled = enabled;
        Ok(())
    }

    /// Returns the active-mutex count of the value at index `i`.
    pub fn get_nbmutexes(&self, i: usize) -> CsResult<usize> {
        self.entry(i).map(|e| e.active_mutexes)
    }

    /// Sets the active-mutex count of the value at index `i`.
    pub fn set_nbmutexes(&mut self, i: usize, n: usize) -> CsResult<()> {
        self.entry_mut(i)?.active_mutexes = n;
        Ok(())
    }

    /// Increments the active-mutex count of the value at index `i` by `delta`.
    pub fn increment_nbmutexes_by(&mut self, i: usize, delta: usize) -> CsResult<usize> {
        let entry = self.entry_mut(i)?;
        entry.active_mutexes += delta;
        Ok(entry.active_mutexes)
    }

    /// Increments the active-mutex count of the value at index `i` by one.
    pub fn increment_nbmutexes(&mut self, i: usize) -> CsResult<usize> {
        self.increment_nbmutexes_by(i, 1)
    }

    /// Decrements the active-mutex count of the value at index `i` by
    /// `delta`. Fails with [`CsError::OutOfRange`] if `delta` exceeds the
    /// current count (an underflow guard — `active_mutexes` is unsigned
    /// and must never wrap).
    pub fn decrement_nbmutexes_by(&mut self, i: usize, delta: usize) -> CsResult<usize> {
        let entry = self.entry_mut(i)?;
        let current = entry.active_mutexes;
        if delta > current {
            return Err(CsError::OutOfRange {
                index: i,
                len: current,
            });
        }
        entry.active_mutexes = current - delta;
        Ok(entry.active_mutexes)
    }

    /// Decrements the active-mutex count of the value at index `i` by one.
    pub fn decrement_nbmutexes(&mut self, i: usize) -> CsResult<usize> {
        self.decrement_nbmutexes_by(i, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(values: &[i32]) -> ValueTable<i32> {
        let mut t = ValueTable::new();
        for &v in values {
            t.insert(Value::new(v));
        }
        t
    }

    #[test]
    fn insert_returns_sequential_indices() {
        let mut t = ValueTable::new();
        assert_eq!(t.insert(Value::new(10)), 0);
        assert_eq!(t.insert(Value::new(20)), 1);
        assert_eq!(t.size(), 2);
    }

    #[test]
    fn fresh_entries_are_enabled_with_zero_mutexes() {
        let t = table_with(&[1]);
        assert!(t.get_status(0).unwrap());
        assert_eq!(t.get_nbmutexes(0).unwrap(), 0);
    }

    #[test]
    fn out_of_range_reads_fail() {
        let t = table_with(&[1]);
        assert_eq!(
            t.get_value(5).unwrap_err(),
            CsError::OutOfRange { index: 5, len: 1 }
        );
    }

    #[test]
    fn out_of_range_writes_fail() {
        let mut t = table_with(&[1]);
        assert!(t.set_status(5, false).is_err());
        assert!(t.set_nbmutexes(5, 3).is_err());
    }

    #[test]
    fn decrement_guards_against_underflow() {
        let mut t = table_with(&[1]);
        t.set_nbmutexes(0, 2).unwrap();
        assert_eq!(t.decrement_nbmutexes(0).unwrap(), 1);
        assert_eq!(t.decrement_nbmutexes(0).unwrap(), 0);
        assert!(t.decrement_nbmutexes(0).is_err());
        assert_eq!(t.get_nbmutexes(0).unwrap(), 0);
    }

    #[test]
    fn increment_has_no_upper_bound() {
        let mut t = table_with(&[1]);
        assert_eq!(t.increment_nbmutexes_by(0, 1000).unwrap(), 1000);
    }

    #[test]
    fn equality_is_elementwise() {
        let a = table_with(&[1, 2, 3]);
        let mut b = table_with(&[1, 2, 3]);
        assert_eq!(a, b);
        b.set_status(1, false).unwrap();
        assert_ne!(a, b);
    }
}
