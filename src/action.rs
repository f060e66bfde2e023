use crate::error::CsResult;
use crate::manager::Manager;

/// A single compensating state mutation, bundled into a [`Frame`] by an
/// external search algorithm and executed by [`Frame::exec`] on backtrack.
///
/// This is the tagged-variant reimplementation of the source engine's
/// function-pointer action: rather than carrying a raw handler pointer
/// plus three integers, each variant names the field it restores and
/// carries `(index, prev, next)` directly, so actions are plain data —
/// copyable and inspectable in tests without any global manager reference.
///
/// By convention (mirrored from the forward mutation that produced it): if
/// a forward mutation changed the named field at `index` from `prev` to
/// `next`, the compensating action is built as `Action::SetX { index,
/// prev, next }`. Executing it asks the manager to write `prev`, using
/// `next` only to verify the field's current value — a misused undo stack
/// (wrong pair pushed, or a double-unwind) is caught as
/// [`CsError::InconsistentRestore`](crate::error::CsError::InconsistentRestore)
/// rather than silently corrupting state.
///
/// [`Frame`]: crate::frame::Frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Restores `VariableTable[index].nb_plausible`.
    SetVarNbvalues {
        index: usize,
        prev: usize,
        next: usize,
    },
    /// Restores `VariableTable[index].assigned`.
    SetVarValue {
        index: usize,
        prev: Option<usize>,
        next: Option<usize>,
    },
    /// Restores `ValueTable[index].enabled`.
    SetValStatus {
        index: usize,
        prev: bool,
        next: bool,
    },
    /// Restores `ValueTable[index].active_mutexes`.
    SetValNbmutexes {
        index: usize,
        prev: usize,
        next: usize,
    },
}

impl Action {
    /// Dispatches this action to the matching restoration handler on
    /// `manager`.
    pub fn exec<T>(&self, manager: &mut Manager<T>) -> CsResult<()> {
        match *self {
            Action::SetVarNbvalues { index, prev, next } => {
                manager.set_var_nbvalues(index, prev, next)
            }
            Action::SetVarValue { index, prev, next } => {
                manager.set_var_value(index, prev, next)
            }
            Action::SetValStatus { index, prev, next } => {
                manager.set_val_status(index, prev, next)
            }
            Action::SetValNbmutexes { index, prev, next } => {
                manager.set_val_nbmutexes(index, prev, next)
            }
        }
    }
}
