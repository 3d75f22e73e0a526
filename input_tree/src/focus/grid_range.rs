use serde::{Deserialize, Serialize};

use super::{InputContainerZipper, InputRowZipper};
use crate::{
    error::InputTreeError,
    grid::{Grid, Index2D, Offset2D},
    node::InputNodeVariant,
    row::{ElementIndices, InputRow, RowIndices},
};

/// A range in a grid, only stores the minimal amount of data
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
#[serde(rename_all = "camelCase")]
pub struct MinimalInputGridRange {
    pub row_indices: RowIndices,
    pub index: usize,
    pub start: Offset2D,
    pub end: Offset2D,
}

/// A range of positions in a grid. Imagine a box.
/// The offsets point in between cells, so `(0, 0)` to `(1, 1)` selects exactly the first cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputGridRange {
    pub grid_zipper: InputContainerZipper,
    pub start: Offset2D,
    pub end: Offset2D,
}

impl InputGridRange {
    pub fn new(grid_zipper: InputContainerZipper, start: Offset2D, end: Offset2D) -> Self {
        let grid = grid_zipper.grid();
        assert!(start.x.0 <= grid.width());
        assert!(start.y.0 <= grid.height());
        assert!(end.x.0 <= grid.width());
        assert!(end.y.0 <= grid.height());
        Self {
            grid_zipper,
            start,
            end,
        }
    }

    pub fn top_left_index(&self) -> Offset2D {
        Offset2D {
            x: self.start.x.min(self.end.x),
            y: self.start.y.min(self.end.y),
        }
    }

    pub fn bottom_right_index(&self) -> Offset2D {
        Offset2D {
            x: self.start.x.max(self.end.x),
            y: self.start.y.max(self.end.y),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    pub fn grid(&self) -> &Grid<InputRow> {
        self.grid_zipper.grid()
    }

    pub fn get_row(&self, index: usize) -> Option<&InputRow> {
        self.grid().get_by_index(index)
    }

    /// Indices of all the selected cells, in row-major order.
    pub fn cell_indices(&self) -> Vec<usize> {
        let top_left = self.top_left_index();
        let bottom_right = self.bottom_right_index();
        let grid = self.grid();
        (top_left.y.0..bottom_right.y.0)
            .flat_map(|y| (top_left.x.0..bottom_right.x.0).map(move |x| Index2D { x, y }))
            .map(|xy| grid.xy_to_index(xy))
            .collect()
    }

    pub fn element_indices(&self) -> ElementIndices {
        self.grid_zipper.element_indices()
    }

    pub fn to_minimal(&self) -> MinimalInputGridRange {
        let ElementIndices { row_indices, index } = self.element_indices();
        MinimalInputGridRange {
            row_indices,
            index,
            start: self.start,
            end: self.end,
        }
    }

    pub fn from_minimal(
        root: &InputRow,
        minimal: &MinimalInputGridRange,
    ) -> Result<Self, InputTreeError> {
        let row_zipper = InputRowZipper::from_row_indices(root, &minimal.row_indices)?;
        let len = row_zipper.len();
        let invalid_index = || InputTreeError::InvalidIndex {
            row_indices: minimal.row_indices.clone(),
            index: minimal.index,
            count: 1,
            len,
        };
        let grid_zipper = row_zipper
            .container_at(minimal.index)
            .ok_or_else(invalid_index)?;
        if grid_zipper.variant() != InputNodeVariant::Table {
            return Err(invalid_index());
        }
        let grid = grid_zipper.grid();
        let fits = |offset: &Offset2D| offset.x.0 <= grid.width() && offset.y.0 <= grid.height();
        if !fits(&minimal.start) || !fits(&minimal.end) {
            return Err(InputTreeError::InvalidGridOffset {
                row_indices: minimal.row_indices.clone(),
                index: minimal.index,
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(Self::new(grid_zipper, minimal.start, minimal.end))
    }
}
