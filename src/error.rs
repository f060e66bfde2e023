use std::{error, fmt};

/// Errors surfaced at the public boundary of this crate.
///
/// Every accessor bounds-checks; every mutator consistency-checks. Nothing
/// here retries automatically — a failed call leaves the manager in the
/// state it was in before the call (see the module docs on each mutator for
/// the exact guarantee).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsError {
    /// An index was outside the bounds of the table it was used to index.
    OutOfRange { index: usize, len: usize },
    /// No variable is registered under this name.
    NameNotFound(String),
    /// A variable with this name is already registered.
    DuplicateVariable(String),
    /// Two values in the same domain compared equal.
    DuplicateValue,
    /// A registration argument was structurally invalid (e.g. an empty domain).
    InvalidArgument(&'static str),
    /// A constraint named a variable that has not been registered.
    UnregisteredVariable(String),
    /// `add_constraint` was posted between a variable and itself.
    ReflexiveMutex(String),
    /// `add_variable` was called after the first `add_constraint`.
    AlreadyConstrained,
    /// A restoration handler's `expected` argument did not match the
    /// field's current value.
    InconsistentRestore {
        index: usize,
        expected: String,
        found: String,
    },
    /// `unwind` was called on an empty undo stack.
    EmptyStack,
}

impl fmt::Display for CsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {index} out of range (len {len})")
            }
            Self::NameNotFound(name) => write!(f, "no variable named `{name}`"),
            Self::DuplicateVariable(name) => {
                write!(f, "a variable named `{name}` is already registered")
            }
            Self::DuplicateValue => write!(f, "duplicate value in domain"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::UnregisteredVariable(name) => {
                write!(f, "unregistered variable `{name}`")
            }
            Self::ReflexiveMutex(name) => {
                write!(f, "reflexive mutex: `{name}` constrained against itself")
            }
            Self::AlreadyConstrained => {
                write!(f, "add_variable is forbidden after add_constraint")
            }
            Self::InconsistentRestore {
                index,
                expected,
                found,
            } => write!(
                f,
                "inconsistent restore at index {index}: expected {expected}, found {found}"
            ),
            Self::EmptyStack => write!(f, "unwind on an empty undo stack"),
        }
    }
}

impl error::Error for CsError {}

/// Convenience alias for the crate-wide `Result` type.
pub type CsResult<T> = Result<T, CsError>;
