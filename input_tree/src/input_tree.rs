use crate::{
    editing::BasicEdit,
    error::InputTreeError,
    focus::{
        InputRowPosition, InputRowRange, InputRowZipper, MinimalInputRowPosition,
        MinimalInputRowRange,
    },
    row::{InputRow, Offset},
};

/// The document. Holds the current snapshot of the tree.
/// Every edit swaps in a new root, old roots are never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTree {
    pub root: InputRow,
}

impl InputTree {
    pub fn new(root: InputRow) -> Self {
        InputTree { root }
    }

    pub fn root_zipper(&self) -> InputRowZipper {
        InputRowZipper::from_root(self.root.clone())
    }

    pub fn offset_count(&self) -> usize {
        self.root.offset_count()
    }

    pub fn position(&self, minimal: &MinimalInputRowPosition) -> Result<InputRowPosition, InputTreeError> {
        InputRowPosition::from_minimal(&self.root, minimal)
    }

    pub fn range(&self, minimal: &MinimalInputRowRange) -> Result<InputRowRange, InputTreeError> {
        InputRowRange::from_minimal(&self.root, minimal)
    }

    /// Creates a range that contains the positions. The positions do not have to be on the same row.
    pub fn range_from_positions(
        &self,
        start: &InputRowPosition,
        end: &InputRowPosition,
    ) -> InputRowRange {
        let start_indices = start.row_indices();
        let end_indices = end.row_indices();
        let shared = start_indices.get_shared(&end_indices);

        // We need to know the direction of the selection to know whether the caret should be at the start or end of the row
        // We also have to handle edge cases like first caret is at top of fraction and second caret is at bottom of fraction
        let is_forwards = start <= end;

        let start_offset = start_indices
            .at(shared.len())
            .map(|index| if is_forwards { index.0 } else { index.0 + 1 })
            .unwrap_or(start.offset.0);
        let end_offset = end_indices
            .at(shared.len())
            .map(|index| if is_forwards { index.0 + 1 } else { index.0 })
            .unwrap_or(end.offset.0);
        let row_zipper = InputRowZipper::from_row_indices(&self.root, &shared)
            .expect("Shared row indices point at an ancestor row");
        InputRowRange::new(row_zipper, Offset(start_offset), Offset(end_offset))
    }

    /// Applies an edit. If the edit does not fit the tree, nothing changes.
    pub fn apply_edit(&mut self, edit: &BasicEdit) -> Result<(), InputTreeError> {
        self.apply_edits(std::slice::from_ref(edit))
    }

    /// Applies the edits in order. Either all of them get applied, or none of them.
    pub fn apply_edits(&mut self, edits: &[BasicEdit]) -> Result<(), InputTreeError> {
        let mut root = self.root.clone();
        for edit in edits {
            root = apply_to_root(&root, edit).map_err(|error| {
                log::warn!("Refused edit {:?}: {}", edit, error);
                error
            })?;
        }
        log::debug!("Applied {} edits", edits.len());
        self.root = root;
        Ok(())
    }
}

fn apply_to_root(root: &InputRow, edit: &BasicEdit) -> Result<InputRow, InputTreeError> {
    let position = edit.position();
    let zipper = InputRowZipper::from_row_indices(root, &position.row_indices)?;
    let zipper = match edit {
        BasicEdit::Insert { values, .. } => zipper.insert(position.offset, values.clone())?,
        BasicEdit::Delete { values, .. } => {
            let (zipper, removed) = zipper.remove(position.offset.0, values.len())?;
            if removed != *values {
                return Err(InputTreeError::ValueMismatch {
                    row_indices: position.row_indices.clone(),
                });
            }
            zipper
        }
    };
    Ok(zipper.root_row().clone())
}

impl Default for InputTree {
    fn default() -> Self {
        Self::new(InputRow::default())
    }
}
