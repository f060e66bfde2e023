use std::collections::HashMap;

use crate::error::{CsError, CsResult};
use crate::variable::Variable;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    variable: Variable,
    first: usize,
    last: usize,
    nb_plausible: usize,
    assigned: Option<usize>,
}

/// A dense, index-addressed table of CSP variables.
///
/// Each entry records the variable's identity, the inclusive `[first,
/// last]` range of value indices that make up its domain, the number of
/// values in that domain still considered plausible, and the index
/// tentatively assigned to it (if any). A name→slot map gives O(1) lookup
/// by name; it is not part of the table's structural equality.
#[derive(Debug, Clone)]
pub struct VariableTable {
    table: Vec<Entry>,
    by_name: HashMap<String, usize>,
}

impl Default for VariableTable {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableTable {
    /// Builds an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Registers `variable` with domain bounds `[first, last]` (inclusive)
    /// and returns its slot.
    ///
    /// Fails with [`CsError::InvalidArgument`] if `last < first` (an empty
    /// domain), or [`CsError::DuplicateVariable`] if the name is already
    /// registered. On failure the table is left unchanged.
    pub fn insert(&mut self, variable: Variable, first: usize, last: usize) -> CsResult<usize> {
        if last < first {
            return Err(CsError::InvalidArgument("empty domain"));
        }
        if self.by_name.contains_key(variable.name()) {
            return Err(CsError::DuplicateVariable(variable.name().to_string()));
        }
        let name = variable.name().to_string();
        self.table.push(Entry {
            variable,
            first,
            last,
            nb_plausible: last - first + 1,
            assigned: None,
        });
        let index = self.table.len() - 1;
        self.by_name.insert(name, index);
        Ok(index)
    }

    /// The number of variables registered in this table.
    #[must_use]
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Resolves a variable name to its slot index.
    ///
    /// Fails with [`CsError::NameNotFound`] if no such variable is
    /// registered.
    pub fn index_of(&self, name: &str) -> CsResult<usize> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CsError::NameNotFound(name.to_string()))
    }

    fn entry(&self, i: usize) -> CsResult<&Entry> {
        self.table.get(i).ok_or(CsError::OutOfRange {
            index: i,
            len: self.table.len(),
        })
    }

    fn entry_mut(&mut self, i: usize) -> CsResult<&mut Entry> {
        let len = self.table.len();
        self.table
            .get_mut(i)
            .ok_or(CsError::OutOfRange { index: i, len })
    }

    /// Returns the variable at slot `i`.
    pub fn get_variable(&self, i: usize) -> CsResult<&Variable> {
        self.entry(i).map(|e| &e.variable)
    }

    /// Returns the index of the first value in the domain of the variable
    /// at slot `i`.
    pub fn get_first(&self, i: usize) -> CsResult<usize> {
        self.entry(i).map(|e| e.first)
    }

    /// Returns the index of the last value in the domain of the variable
    /// at slot `i`.
    pub fn get_last(&self, i: usize) -> CsResult<usize> {
        self.entry(i).map(|e| e.last)
    }

    /// Returns the number of values still considered plausible in the
    /// domain of the variable at slot `i`.
    pub fn get_nbvalues(&self, i: usize) -> CsResult<usize> {
        self.entry(i).map(|e| e.nb_plausible)
    }

    /// Returns the value index currently assigned to the variable at slot
    /// `i`, or `None` if it is unassigned.
    pub fn get_value(&self, i: usize) -> CsResult<Option<usize>> {
        self.entry(i).map(|e| e.assigned)
    }

    /// Assigns `value_index` to the variable at slot `i`. No membership
    /// check against `[first, last]` is performed — the search is
    /// responsible for assigning only values within the variable's domain.
    pub fn assign(&mut self, i: usize, value_index: Option<usize>) -> CsResult<()> {
        self.entry_mut(i)?.assigned = value_index;
        Ok(())
    }

    /// Sets the plausible-value count of the variable at slot `i`.
    pub fn set_nbvalues(&mut self, i: usize, n: usize) -> CsResult<()> {
        self.entry_mut(i)?.nb_plausible = n;
        Ok(())
    }

    /// Increments the plausible-value count of the variable at slot `i` by
    /// `delta`.
    pub fn increment_nbvalues_by(&mut self, i: usize, delta: usize) -> CsResult<usize> {
        let entry = self.entry_mut(i)?;
        entry.nb_plausible += delta;
        Ok(entry.nb_plausible)
    }

    /// Increments the plausible-value count of the variable at slot `i` by
    /// one.
    pub fn increment_nbvalues(&mut self, i: usize) -> CsResult<usize> {
        self.increment_nbvalues_by(i, 1)
    }

    /// Decrements the plausible-value count of the variable at slot `i` by
    /// `delta`. Fails with [`CsError::OutOfRange`] if `delta` exceeds the
    /// current count.
    pub fn decrement_nbvalues_by(&mut self, i: usize, delta: usize) -> CsResult<usize> {
        let entry = self.entry_mut(i)?;
        let current = entry.nb_plausible;
        if delta > current {
            return Err(CsError::OutOfRange {
                index: i,
                len: current,
            });
        }
        entry.nb_plausible = current - delta;
        Ok(entry.nb_plausible)
    }

    /// Decrements the plausible-value count of the variable at slot `i` by
    /// one.
    pub fn decrement_nbvalues(&mut self, i: usize) -> CsResult<usize> {
        self.decrement_nbvalues_by(i, 1)
    }
}

impl PartialEq for VariableTable {
    fn eq(&self, other: &Self) -> bool {
        // The name->slot map is not part of structural equality: only the
        // entries themselves are compared (spec: naming schemes may differ).
        self.table == other.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_computes_initial_plausible_count() {
        let mut t = VariableTable::new();
        let i = t.insert(Variable::new("x").unwrap(), 0, 3).unwrap();
        assert_eq!(t.get_nbvalues(i).unwrap(), 4);
        assert_eq!(t.get_value(i).unwrap(), None);
    }

    #[test]
    fn empty_domain_is_rejected() {
        let mut t = VariableTable::new();
        assert_eq!(
            t.insert(Variable::new("x").unwrap(), 3, 2).unwrap_err(),
            CsError::InvalidArgument("empty domain")
        );
        assert_eq!(t.size(), 0);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut t = VariableTable::new();
        t.insert(Variable::new("x").unwrap(), 0, 0).unwrap();
        assert_eq!(
            t.insert(Variable::new("x").unwrap(), 1, 1).unwrap_err(),
            CsError::DuplicateVariable("x".to_string())
        );
        assert_eq!(t.size(), 1);
    }

    #[test]
    fn name_lookup() {
        let mut t = VariableTable::new();
        t.insert(Variable::new("alpha").unwrap(), 0, 0).unwrap();
        t.insert(Variable::new("beta").unwrap(), 1, 1).unwrap();
        t.insert(Variable::new("gamma").unwrap(), 2, 2).unwrap();
        assert_eq!(t.index_of("beta").unwrap(), 1);
        assert_eq!(t.get_variable(2).unwrap().name(), "gamma");
        assert_eq!(
            t.index_of("delta").unwrap_err(),
            CsError::NameNotFound("delta".to_string())
        );
    }

    #[test]
    fn equality_ignores_name_map() {
        let mut a = VariableTable::new();
        a.insert(Variable::new("x").unwrap(), 0, 1).unwrap();
        let mut b = VariableTable::new();
        b.insert(Variable::new("x").unwrap(), 0, 1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn decrement_guards_against_underflow() {
        let mut t = VariableTable::new();
        let i = t.insert(Variable::new("x").unwrap(), 0, 0).unwrap();
        assert_eq!(t.decrement_nbvalues(i).unwrap(), 0);
        assert!(t.decrement_nbvalues(i).is_err());
    }
}
