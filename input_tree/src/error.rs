use thiserror::Error;

use crate::row::{Offset, RowIndices};

/// Something referred to a part of the tree that does not exist.
/// Usually means that stale indices were used after an edit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputTreeError {
    #[error("row indices {indices} do not exist, failed at hop {hop}")]
    InvalidPath { indices: RowIndices, hop: usize },
    #[error("absolute offset {offset} is outside of the tree, which has {offset_count} offsets")]
    OffsetOutOfRange { offset: usize, offset_count: usize },
    #[error("offset {offset:?} is outside of the row {row_indices}, which has {len} nodes")]
    InvalidOffset {
        row_indices: RowIndices,
        offset: Offset,
        len: usize,
    },
    #[error("cannot remove {count} nodes at index {index} from the row {row_indices}, which has {len} nodes")]
    InvalidIndex {
        row_indices: RowIndices,
        index: usize,
        count: usize,
        len: usize,
    },
    #[error("grid offsets do not fit the {width}x{height} table at index {index} of the row {row_indices}")]
    InvalidGridOffset {
        row_indices: RowIndices,
        index: usize,
        width: usize,
        height: usize,
    },
    #[error("the nodes to remove at {row_indices} do not match the nodes in the tree")]
    ValueMismatch { row_indices: RowIndices },
}
