use serde::{Deserialize, Serialize};

use crate::{
    editing::{editable::Editable, BasicEdit},
    error::InputTreeError,
    focus::{InputRowPosition, InputRowZipper},
    node::InputNode,
    row::{InputRow, Offset, RowIndices},
};

use super::MinimalInputRowPosition;

/// A range in a row, only stores the minimal amount of data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
#[serde(rename_all = "camelCase")]
pub struct MinimalInputRowRange {
    pub row_indices: RowIndices,
    pub start: Offset,
    pub end: Offset,
}

impl MinimalInputRowRange {
    pub fn new(row_indices: RowIndices, start: Offset, end: Offset) -> Self {
        Self {
            row_indices,
            start,
            end,
        }
    }

    pub fn left_offset(&self) -> Offset {
        self.start.min(self.end)
    }

    pub fn right_offset(&self) -> Offset {
        self.start.max(self.end)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn is_forwards(&self) -> bool {
        self.start <= self.end
    }

    pub fn start_position(&self) -> MinimalInputRowPosition {
        MinimalInputRowPosition::new(self.row_indices.clone(), self.start)
    }

    pub fn end_position(&self) -> MinimalInputRowPosition {
        MinimalInputRowPosition::new(self.row_indices.clone(), self.end)
    }

    /// Whether the position lies inside of the range, including the edges and nested rows.
    pub fn contains_position(&self, position: &MinimalInputRowPosition) -> bool {
        let left = MinimalInputRowPosition::new(self.row_indices.clone(), self.left_offset());
        let right = MinimalInputRowPosition::new(self.row_indices.clone(), self.right_offset());
        &left <= position && position <= &right
    }
}

impl From<MinimalInputRowPosition> for MinimalInputRowRange {
    fn from(position: MinimalInputRowPosition) -> Self {
        Self::new(position.row_indices, position.offset, position.offset)
    }
}

/// An inclusive range of positions in a row
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputRowRange {
    pub row_zipper: InputRowZipper,
    pub start: Offset,
    pub end: Offset,
}

impl InputRowRange {
    pub fn new(row_zipper: InputRowZipper, start: Offset, end: Offset) -> Self {
        assert!(start.0 <= row_zipper.len(), "Start out of range");
        assert!(end.0 <= row_zipper.len(), "End out of range");
        Self {
            row_zipper,
            start,
            end,
        }
    }

    pub fn left_offset(&self) -> Offset {
        self.start.min(self.end)
    }

    pub fn right_offset(&self) -> Offset {
        self.start.max(self.end)
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn is_forwards(&self) -> bool {
        self.start <= self.end
    }

    pub fn start_position(&self) -> InputRowPosition {
        InputRowPosition::new(self.row_zipper.clone(), self.start)
    }

    pub fn end_position(&self) -> InputRowPosition {
        InputRowPosition::new(self.row_zipper.clone(), self.end)
    }

    pub fn left_position(&self) -> InputRowPosition {
        InputRowPosition::new(self.row_zipper.clone(), self.left_offset())
    }

    pub fn right_position(&self) -> InputRowPosition {
        InputRowPosition::new(self.row_zipper.clone(), self.right_offset())
    }

    pub fn row_indices(&self) -> RowIndices {
        self.row_zipper.row_indices()
    }

    /// The selected nodes, from left to right.
    pub fn values(&self) -> &[InputNode] {
        &self.row_zipper.value().values()[self.left_offset().0..self.right_offset().0]
    }

    pub fn contains(&self, position: &InputRowPosition) -> bool {
        self.left_position() <= *position && *position <= self.right_position()
    }

    pub fn to_minimal(&self) -> MinimalInputRowRange {
        MinimalInputRowRange {
            row_indices: self.row_indices(),
            start: self.start,
            end: self.end,
        }
    }

    pub fn from_minimal(
        root: &InputRow,
        minimal: &MinimalInputRowRange,
    ) -> Result<Self, InputTreeError> {
        let row_zipper = InputRowZipper::from_row_indices(root, &minimal.row_indices)?;
        let len = row_zipper.len();
        if let Some(offset) = [minimal.start, minimal.end]
            .into_iter()
            .find(|offset| offset.0 > len)
        {
            return Err(InputTreeError::InvalidOffset {
                row_indices: minimal.row_indices.clone(),
                offset,
                len,
            });
        }
        Ok(Self::new(row_zipper, minimal.start, minimal.end))
    }
}

impl Editable for MinimalInputRowRange {
    fn apply_edit(&mut self, edit: &BasicEdit) {
        let edit_position = edit.position();
        // Edits only affect positions that are on the same row, or below.
        if !self.row_indices.starts_with(&edit_position.row_indices) {
            return;
        }
        let edit_offset = edit_position.offset.0;
        let count = edit.values().len();

        if self.row_indices == edit_position.row_indices {
            for offset in [&mut self.start, &mut self.end] {
                match edit {
                    BasicEdit::Insert { .. } => {
                        if offset.0 >= edit_offset {
                            offset.0 += count;
                        }
                    }
                    BasicEdit::Delete { .. } => {
                        if offset.0 > edit_offset {
                            offset.0 = offset.0.saturating_sub(count).max(edit_offset);
                        }
                    }
                }
            }
            return;
        }

        // The range is in a row below the edited row, so the edit can only move the container it is in
        let row_index = self
            .row_indices
            .at_mut(edit_position.row_indices.len())
            .expect("Row indices of a nested row are longer");
        match edit {
            BasicEdit::Insert { .. } => {
                if edit_offset <= row_index.0 {
                    row_index.0 += count;
                }
            }
            BasicEdit::Delete { .. } => {
                if row_index.0 >= edit_offset + count {
                    row_index.0 -= count;
                } else if row_index.0 >= edit_offset {
                    // The container got deleted, so the range gets evicted to where the edit happened
                    self.row_indices = edit_position.row_indices.clone();
                    self.start = edit_position.offset;
                    self.end = edit_position.offset;
                }
            }
        }
        log::trace!("Moved range to {:?} after edit", self);
    }
}
