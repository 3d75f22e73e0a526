use std::collections::VecDeque;

use input_tree::editing::invertible::Invertible;

/// Undo and redo history. The inversion is handed in when constructing the manager.
pub struct UndoRedoManager<T> {
    /// Undo-stack, with *normal* actions.
    /// Have to be inverted before they can be applied.
    /// The oldest action is at the front, so that it can be dropped when the history is full.
    undo_stack: VecDeque<T>,

    /// Redo-stack, with *normal* actions.
    /// Can simply be applied.
    redo_stack: Vec<T>,

    invert: fn(&T) -> T,

    max_steps: Option<usize>,
}

impl<T> UndoRedoManager<T> {
    pub fn new(invert: fn(&T) -> T) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: vec![],
            invert,
            max_steps: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self.enforce_max_steps();
        self
    }

    /// Push a redo-action to the undo-stack and clear the redo-stack.
    pub fn push(&mut self, action: T) {
        self.undo_stack.push_back(action);
        self.redo_stack = Vec::new();
        self.enforce_max_steps();
    }

    /// Take an undo-action
    pub fn undo(&mut self) -> Option<T> {
        let action = self.undo_stack.pop_back()?;
        let inverse_action = (self.invert)(&action);
        self.redo_stack.push(action);
        log::debug!(
            "Undo, {} steps left to undo, {} to redo",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Some(inverse_action)
    }

    /// Take a redo-action
    pub fn redo(&mut self) -> Option<T>
    where
        T: Clone,
    {
        let action = self.redo_stack.pop()?;
        self.undo_stack.push_back(action.clone());
        log::debug!(
            "Redo, {} steps left to undo, {} to redo",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Some(action)
    }

    /// Puts an action that was taken with [`Self::undo`] back, for when applying it failed.
    pub fn revert_undo(&mut self) {
        if let Some(action) = self.redo_stack.pop() {
            self.undo_stack.push_back(action);
        }
    }

    /// Puts an action that was taken with [`Self::redo`] back, for when applying it failed.
    pub fn revert_redo(&mut self) {
        if let Some(action) = self.undo_stack.pop_back() {
            self.redo_stack.push(action);
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn enforce_max_steps(&mut self) {
        if let Some(max_steps) = self.max_steps {
            while self.undo_stack.len() > max_steps {
                self.undo_stack.pop_front();
            }
        }
    }
}

impl<T: Invertible<Inverse = T>> UndoRedoManager<T> {
    pub fn invertible() -> Self {
        Self::new(T::inverse)
    }
}
