use crate::error::{CsError, CsResult};
use crate::mutex_store::MutexStore;
use crate::value::Value;
use crate::value_table::ValueTable;
use crate::variable::Variable;
use crate::variable_table::VariableTable;

/// The orchestrator: owns the value table, the variable table, and the
/// (lazily created) mutex store, and hosts the four restoration handlers
/// an external search composes into undo [`Frame`](crate::frame::Frame)s.
///
/// A `Manager` has two phases. During *registration* the caller calls
/// [`Manager::add_variable`] for each CSP variable and
/// [`Manager::add_constraint`] for each binary predicate. The moment the
/// first constraint is posted, the manager enters its *solve* phase:
/// `add_variable` is permanently forbidden from then on (the mutex
/// store's presence, not a separate boolean, is the phase flag — see the
/// module docs on [`MutexStore`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Manager<T> {
    value_table: ValueTable<T>,
    variable_table: VariableTable,
    mutex_store: Option<MutexStore>,
}

impl<T> Default for Manager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Manager<T> {
    /// Builds an empty manager with no variables and no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value_table: ValueTable::new(),
            variable_table: VariableTable::new(),
            mutex_store: None,
        }
    }

    /// A read-only view of the value table, for search algorithms to
    /// inspect without mutating.
    #[must_use]
    pub fn get_value_table(&self) -> &ValueTable<T> {
        &self.value_table
    }

    /// A read-only view of the variable table.
    #[must_use]
    pub fn get_variable_table(&self) -> &VariableTable {
        &self.variable_table
    }

    /// A read-only view of the mutex store, or `None` if no constraint has
    /// been posted yet.
    #[must_use]
    pub fn get_mutex_store(&self) -> Option<&MutexStore> {
        self.mutex_store.as_ref()
    }

    /// Returns the unique variable slot whose domain contains
    /// `value_index`, found by binary search over the variable table's
    /// `[first, last]` bounds (domains are contiguous and sorted by
    /// `first`, so the bounds partition the value index space).
    pub fn val_to_var(&self, value_index: usize) -> CsResult<usize> {
        let size = self.value_table.size();
        if value_index >= size {
            return Err(CsError::OutOfRange {
                index: value_index,
                len: size,
            });
        }

        let mut lo = 0usize;
        let mut hi = self.variable_table.size();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let first = self.variable_table.get_first(mid)?;
            let last = self.variable_table.get_last(mid)?;
            if value_index < first {
                hi = mid;
            } else if value_index > last {
                lo = mid + 1;
            } else {
                return Ok(mid);
            }
        }

        // Unreachable as long as domains are contiguous; guarded rather
        // than panicking since it would otherwise surface as a confusing
        // index panic.
        Err(CsError::OutOfRange {
            index: value_index,
            len: size,
        })
    }

    /// Restores `VariableTable[index].nb_plausible`.
    ///
    /// Fails with [`CsError::InconsistentRestore`] if the field's current
    /// value is not `expected`.
    pub fn set_var_nbvalues(&mut self, index: usize, new_value: usize, expected: usize) -> CsResult<()> {
        let found = self.variable_table.get_nbvalues(index)?;
        if found != expected {
            log::warn!(
                "set_var_nbvalues[{index}]: expected {expected}, found {found}"
            );
            return Err(CsError::InconsistentRestore {
                index,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        log::trace!("set_var_nbvalues[{index}]: {found} -> {new_value}");
        self.variable_table.set_nbvalues(index, new_value)
    }

    /// Restores `VariableTable[index].assigned`.
    pub fn set_var_value(
        &mut self,
        index: usize,
        new_value: Option<usize>,
        expected: Option<usize>,
    ) -> CsResult<()> {
        let found = self.variable_table.get_value(index)?;
        if found != expected {
            log::warn!("set_var_value[{index}]: expected {expected:?}, found {found:?}");
            return Err(CsError::InconsistentRestore {
                index,
                expected: format!("{expected:?}"),
                found: format!("{found:?}"),
            });
        }
        log::trace!("set_var_value[{index}]: {found:?} -> {new_value:?}");
        self.variable_table.assign(index, new_value)
    }

    /// Restores `ValueTable[index].enabled`.
    pub fn set_val_status(&mut self, index: usize, new_value: bool, expected: bool) -> CsResult<()> {
        let found = self.value_table.get_status(index)?;
        if found != expected {
            log::warn!("set_val_status[{index}]: expected {expected}, found {found}");
            return Err(CsError::InconsistentRestore {
                index,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        log::trace!("set_val_status[{index}]: {found} -> {new_value}");
        self.value_table.set_status(index, new_value)
    }

    /// Restores `ValueTable[index].active_mutexes`.
    pub fn set_val_nbmutexes(
        &mut self,
        index: usize,
        new_value: usize,
        expected: usize,
    ) -> CsResult<()> {
        let found = self.value_table.get_nbmutexes(index)?;
        if found != expected {
            log::warn!("set_val_nbmutexes[{index}]: expected {expected}, found {found}");
            return Err(CsError::InconsistentRestore {
                index,
                expected: expected.to_string(),
                found: found.to_string(),
            });
        }
        log::trace!("set_val_nbmutexes[{index}]: {found} -> {new_value}");
        self.value_table.set_nbmutexes(index, new_value)
    }
}

impl<T: PartialEq> Manager<T> {
    /// Registers `variable` with the given `domain`.
    ///
    /// Fails with [`CsError::AlreadyConstrained`] if any constraint has
    /// already been posted, or [`CsError::DuplicateValue`] if `domain`
    /// contains two values that compare equal — both checks run before any
    /// table is mutated, so a failed call leaves the manager unchanged.
    pub fn add_variable(&mut self, variable: Variable, domain: Vec<Value<T>>) -> CsResult<usize> {
        if self.mutex_store.is_some() {
            return Err(CsError::AlreadyConstrained);
        }
        for i in 0..domain.len() {
            for j in (i + 1)..domain.len() {
                if domain[i] == domain[j] {
                    return Err(CsError::DuplicateValue);
                }
            }
        }

        let mut first = None;
        let mut last = 0usize;
        for value in domain {
            last = self.value_table.insert(value);
            first.get_or_insert(last);
        }
        let first = first.ok_or(CsError::InvalidArgument("empty domain"))?;

        log::debug!(
            "add_variable({:?}): domain [{first}, {last}]",
            variable.name()
        );
        self.variable_table.insert(variable, first, last)
    }
}

impl<T> Manager<T> {
    /// Posts a binary constraint between `var1` and `var2`.
    ///
    /// `predicate` is invoked exactly once per ordered pair `(a, b)` with
    /// `a` in the domain of `var1` and `b` in the domain of `var2`;
    /// returning `false` records a mutex. Returns the number of mutex
    /// pairs discovered by this call.
    ///
    /// Fails with [`CsError::UnregisteredVariable`] if either name is
    /// unknown, or [`CsError::ReflexiveMutex`] if `var1 == var2` — mutexes
    /// are only meaningful between distinct variables. Posting the same
    /// constraint twice on the same pair is a caller error this engine
    /// does not detect: `active_mutexes` and each `mutex[i]` would then
    /// double-count.
    pub fn add_constraint<F>(&mut self, predicate: F, var1: &str, var2: &str) -> CsResult<usize>
    where
        F: Fn(&T, &T) -> bool,
    {
        if var1 == var2 {
            return Err(CsError::ReflexiveMutex(var1.to_string()));
        }

        let index1 = self.resolve(var1)?;
        let index2 = self.resolve(var2)?;

        if self.mutex_store.is_none() {
            self.mutex_store = Some(MutexStore::new(self.value_table.size()));
        }

        let first1 = self.variable_table.get_first(index1)?;
        let last1 = self.variable_table.get_last(index1)?;
        let first2 = self.variable_table.get_first(index2)?;
        let last2 = self.variable_table.get_last(index2)?;

        let mut discovered = 0usize;
        for i in first1..=last1 {
            for j in first2..=last2 {
                let a = self.value_table.get_value(i)?.get();
                let b = self.value_table.get_value(j)?.get();
                if !predicate(a, b) {
                    let store = self.mutex_store.as_mut().expect("store just created");
                    store.set(i, j)?;
                    store.set(j, i)?;
                    self.value_table.increment_nbmutexes(i)?;
                    self.value_table.increment_nbmutexes(j)?;
                    discovered += 1;
                }
            }
        }

        log::debug!("add_constraint({var1:?}, {var2:?}): {discovered} mutex pair(s)");
        Ok(discovered)
    }

    fn resolve(&self, name: &str) -> CsResult<usize> {
        self.variable_table.index_of(name).map_err(|err| match err {
            CsError::NameNotFound(name) => CsError::UnregisteredVariable(name),
            other => other,
        })
    }
}
