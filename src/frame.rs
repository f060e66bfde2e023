use crate::action::Action;
use crate::error::CsResult;
use crate::manager::Manager;

/// An ordered bundle of compensating [`Action`]s, together undoing exactly
/// one search step.
///
/// Actions are pushed in the order the forward mutations were performed;
/// [`Frame::exec`] replays them in reverse so that nested mutations unwind
/// in the opposite order they were applied — the only order that restores
/// state correctly when a later mutation depended on the result of an
/// earlier one within the same step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    actions: Vec<Action>,
}

impl Frame {
    /// Builds an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `action` to the end of this frame.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// The number of actions in this frame.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether this frame holds no actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Executes every action in reverse insertion order.
    ///
    /// Execution does not remove any action from the frame. If an action
    /// fails, execution stops immediately — the frame is left as-is
    /// (actions already executed have already mutated the manager; this
    /// mirrors [`UndoStack::unwind`](crate::undo_stack::UndoStack::unwind)'s
    /// "no silent success, frame stays for inspection" contract).
    pub fn exec<T>(&self, manager: &mut Manager<T>) -> CsResult<()> {
        for action in self.actions.iter().rev() {
            action.exec(manager)?;
        }
        Ok(())
    }
}

impl std::ops::AddAssign<Action> for Frame {
    fn add_assign(&mut self, action: Action) {
        self.push(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use crate::variable::Variable;

    /// A manager with one variable whose domain has 3 values, so
    /// `nb_plausible` starts at 3 and can be driven down twice.
    fn manager_with_three_plausible() -> Manager<i32> {
        let mut m = Manager::new();
        m.add_variable(
            Variable::new("x").unwrap(),
            vec![Value::new(1), Value::new(2), Value::new(3)],
        )
        .unwrap();
        m
    }

    #[test]
    fn push_and_len() {
        let mut f = Frame::new();
        assert!(f.is_empty());
        f.push(Action::SetValStatus {
            index: 0,
            prev: true,
            next: false,
        });
        assert_eq!(f.len(), 1);
    }

    #[test]
    fn add_assign_pushes() {
        let mut f = Frame::new();
        f += Action::SetValStatus {
            index: 0,
            prev: true,
            next: false,
        };
        assert_eq!(f.len(), 1);
    }

    /// Two forward mutations on the *same* field/index in sequence —
    /// `nb_plausible` 3 -> 2 -> 1 — push compensating actions whose
    /// `expected` values chain off one another. Only undoing them in
    /// reverse insertion order satisfies each consistency check; a frame
    /// that (incorrectly) executed in push order would find the wrong
    /// `expected` value on its second action and fail. This is the case
    /// P7 calls out: distinct-index actions can't distinguish LIFO from
    /// FIFO, because each check only ever sees its own field.
    #[test]
    fn exec_undoes_chained_same_index_mutations_in_lifo_order() {
        let mut m = manager_with_three_plausible();
        m.set_var_nbvalues(0, 2, 3).unwrap(); // forward: 3 -> 2
        m.set_var_nbvalues(0, 1, 2).unwrap(); // forward: 2 -> 1
        assert_eq!(m.get_variable_table().get_nbvalues(0).unwrap(), 1);

        let mut frame = Frame::new();
        frame.push(Action::SetVarNbvalues {
            index: 0,
            prev: 3,
            next: 2,
        });
        frame.push(Action::SetVarNbvalues {
            index: 0,
            prev: 2,
            next: 1,
        });

        frame.exec(&mut m).unwrap();
        assert_eq!(m.get_variable_table().get_nbvalues(0).unwrap(), 3);
    }

    #[test]
    fn executing_chained_same_index_actions_in_push_order_is_inconsistent() {
        let mut m = manager_with_three_plausible();
        m.set_var_nbvalues(0, 2, 3).unwrap(); // forward: 3 -> 2
        m.set_var_nbvalues(0, 1, 2).unwrap(); // forward: 2 -> 1

        let actions = [
            Action::SetVarNbvalues {
                index: 0,
                prev: 3,
                next: 2,
            },
            Action::SetVarNbvalues {
                index: 0,
                prev: 2,
                next: 1,
            },
        ];

        // Running these in push (FIFO) order instead of `Frame::exec`'s
        // LIFO order: the first action expects the field to hold 2, but
        // it currently holds 1, so it must fail.
        assert!(actions[0].exec(&mut m).is_err());
    }
}
