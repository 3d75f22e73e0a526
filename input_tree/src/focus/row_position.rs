use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
    editing::{editable::Editable, BasicEdit},
    error::InputTreeError,
    focus::{InputRowRange, InputRowZipper},
    row::{InputRow, Offset, RowIndices},
};

use super::MinimalInputRowRange;

/// A offset in a row, only stores the minimal amount of data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
#[serde(rename_all = "camelCase")]
pub struct MinimalInputRowPosition {
    pub row_indices: RowIndices,
    pub offset: Offset,
}

impl MinimalInputRowPosition {
    pub fn new(row_indices: RowIndices, offset: Offset) -> Self {
        Self {
            row_indices,
            offset,
        }
    }

    /// A position in the root row
    pub fn root(offset: Offset) -> Self {
        Self::new(RowIndices::default(), offset)
    }
}

impl PartialOrd for MinimalInputRowPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinimalInputRowPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        RowIndices::cmp_indices_and_offset(
            &self.row_indices,
            &self.offset,
            &other.row_indices,
            &other.offset,
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputRowPosition {
    pub row_zipper: InputRowZipper,
    pub offset: Offset,
}

impl InputRowPosition {
    pub fn new(row_zipper: InputRowZipper, offset: Offset) -> Self {
        assert!(offset.0 <= row_zipper.len(), "Offset out of range");
        Self { row_zipper, offset }
    }

    pub fn row_indices(&self) -> RowIndices {
        self.row_zipper.row_indices()
    }

    pub fn to_minimal(&self) -> MinimalInputRowPosition {
        MinimalInputRowPosition {
            row_indices: self.row_indices(),
            offset: self.offset,
        }
    }

    pub fn from_minimal(
        root: &InputRow,
        minimal: &MinimalInputRowPosition,
    ) -> Result<Self, InputTreeError> {
        let row_zipper = InputRowZipper::from_row_indices(root, &minimal.row_indices)?;
        if minimal.offset.0 > row_zipper.len() {
            return Err(InputTreeError::InvalidOffset {
                row_indices: minimal.row_indices.clone(),
                offset: minimal.offset,
                len: row_zipper.len(),
            });
        }
        Ok(Self::new(row_zipper, minimal.offset))
    }

    pub fn to_absolute_offset(&self) -> usize {
        self.row_zipper.absolute_offset(self.offset)
    }

    pub fn from_absolute_offset(root: &InputRow, absolute_offset: usize) -> Result<Self, InputTreeError> {
        let row_zipper = InputRowZipper::from_root(root.clone()).at_absolute_offset(absolute_offset)?;
        // The deepest row that contains an absolute offset always has a slot there
        let offset = row_zipper
            .offset_at_absolute(absolute_offset)
            .expect("Absolute offset must be a slot of the deepest row");
        Ok(Self::new(row_zipper, offset))
    }

    pub fn in_range(&self, range: &InputRowRange) -> bool {
        range.contains(self)
    }
}

impl From<&InputRowPosition> for InputRowRange {
    fn from(position: &InputRowPosition) -> Self {
        InputRowRange::new(position.row_zipper.clone(), position.offset, position.offset)
    }
}

impl PartialOrd for InputRowPosition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for InputRowPosition {
    fn cmp(&self, other: &Self) -> Ordering {
        RowIndices::cmp_indices_and_offset(
            &self.row_indices(),
            &self.offset,
            &other.row_indices(),
            &other.offset,
        )
    }
}

impl Editable for MinimalInputRowPosition {
    fn apply_edit(&mut self, edit: &BasicEdit) {
        let mut range = MinimalInputRowRange {
            row_indices: self.row_indices.clone(),
            start: self.offset,
            end: self.offset,
        };
        range.apply_edit(edit);
        self.row_indices = range.row_indices;
        self.offset = range.start;
    }
}
