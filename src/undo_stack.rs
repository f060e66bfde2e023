use crate::error::{CsError, CsResult};
use crate::frame::Frame;
use crate::manager::Manager;

/// A stack of [`Frame`]s, each undoing one search step.
///
/// `UndoStack` represents a unique history and is therefore neither
/// `Clone` nor `Copy`: a search owns exactly one stack for the path it is
/// currently exploring.
#[derive(Debug, Default)]
pub struct UndoStack {
    frames: Vec<Frame>,
}

impl UndoStack {
    /// Builds an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `frame` onto the top of the stack.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// The number of frames currently on the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the stack holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Executes the top frame and pops it.
    ///
    /// Fails with [`CsError::EmptyStack`] if the stack is empty. Execution
    /// is unconditional: if any action in the frame fails, the frame is
    /// left on top of the stack (not popped) so that a caller can inspect
    /// or retry it.
    pub fn unwind<T>(&mut self, manager: &mut Manager<T>) -> CsResult<()> {
        let top = self.frames.last().ok_or(CsError::EmptyStack)?;
        top.exec(manager)?;
        self.frames.pop();
        Ok(())
    }
}

impl std::ops::AddAssign<Frame> for UndoStack {
    fn add_assign(&mut self, frame: Frame) {
        self.push(frame);
    }
}
