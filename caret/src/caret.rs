use input_tree::{
    error::InputTreeError,
    focus::{
        InputGridRange, InputRowPosition, InputRowRange, MinimalInputGridRange,
        MinimalInputRowPosition, MinimalInputRowRange,
    },
    grid::Offset2D,
    input_tree::InputTree,
    row::Offset,
};
use serde::{Deserialize, Serialize};

/// A caret with a start and an end, only stores the minimal amount of data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalCaret {
    pub start_position: MinimalInputRowPosition,
    pub end_position: MinimalInputRowPosition,
}

impl MinimalCaret {
    pub fn collapsed(position: MinimalInputRowPosition) -> Self {
        Self {
            start_position: position.clone(),
            end_position: position,
        }
    }
}

/// A caret in a tree. The start and end can be in different rows,
/// the selection is what actually gets highlighted.
#[derive(Debug, Clone)]
pub struct Caret {
    start_position: InputRowPosition,
    end_position: InputRowPosition,
    selection: CaretSelection,
}

impl Caret {
    pub fn new(tree: &InputTree, start: InputRowPosition, end: InputRowPosition) -> Self {
        let selection = CaretSelection::from_positions(tree, &start, &end);
        Caret {
            start_position: start,
            end_position: end,
            selection,
        }
    }

    pub fn from_minimal(tree: &InputTree, minimal: &MinimalCaret) -> Result<Self, InputTreeError> {
        let start = tree.position(&minimal.start_position)?;
        let end = tree.position(&minimal.end_position)?;
        Ok(Self::new(tree, start, end))
    }

    pub fn to_minimal(&self) -> MinimalCaret {
        MinimalCaret {
            start_position: self.start_position.to_minimal(),
            end_position: self.end_position.to_minimal(),
        }
    }

    pub fn start_position(&self) -> &InputRowPosition {
        &self.start_position
    }

    pub fn end_position(&self) -> &InputRowPosition {
        &self.end_position
    }

    pub fn selection(&self) -> &CaretSelection {
        &self.selection
    }

    pub fn into_selection(self) -> CaretSelection {
        self.selection
    }

    pub fn is_collapsed(&self) -> bool {
        self.start_position == self.end_position
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaretSelection {
    Row(InputRowRange),
    Grid(InputGridRange),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub enum MinimalCaretSelection {
    Row(MinimalInputRowRange),
    Grid(MinimalInputGridRange),
}

impl CaretSelection {
    /// Figures out what is selected. Usually a range in the shared row of both positions.
    /// When both positions are in cells of the same table, the cells get selected instead.
    pub fn from_positions(
        tree: &InputTree,
        start: &InputRowPosition,
        end: &InputRowPosition,
    ) -> Self {
        let shared_range = tree.range_from_positions(start, end);
        let is_single_element = shared_range.left_offset().0 + 1 == shared_range.right_offset().0;
        if !is_single_element {
            return CaretSelection::Row(shared_range);
        }

        // Test for grid selection
        let selected_element = shared_range
            .row_zipper
            .node_at(shared_range.left_offset().0);

        let is_grid_selected = selected_element.map(|node| node.has_resizable_grid()) == Some(true);
        if !is_grid_selected {
            return CaretSelection::Row(shared_range);
        }

        // It's possible that the grid was selected normally
        let depth = shared_range.row_zipper.depth();
        let start_indices = start.row_indices();
        let end_indices = end.row_indices();

        match (start_indices.at(depth), end_indices.at(depth)) {
            (Some(start_row_index), Some(end_row_index)) => {
                assert!(start_row_index.0 == shared_range.left_offset().0);
                assert!(end_row_index.0 == shared_range.left_offset().0);

                let selected_node = shared_range
                    .row_zipper
                    .container_at(start_row_index.0)
                    .expect("Selected element is a grid");

                let selected_grid = selected_node.grid();

                let start_index = selected_grid.index_to_xy(start_row_index.1);
                let end_index = selected_grid.index_to_xy(end_row_index.1);

                // Slightly expand the selection so that it includes the end indices
                let (start_x, end_x) = expand_to_cells(start_index.x, end_index.x);
                let (start_y, end_y) = expand_to_cells(start_index.y, end_index.y);
                CaretSelection::Grid(InputGridRange::new(
                    selected_node,
                    Offset2D {
                        x: Offset(start_x),
                        y: Offset(start_y),
                    },
                    Offset2D {
                        x: Offset(end_x),
                        y: Offset(end_y),
                    },
                ))
            }
            (_, _) => CaretSelection::Row(shared_range),
        }
    }

    pub fn to_minimal(&self) -> MinimalCaretSelection {
        match self {
            CaretSelection::Row(range) => MinimalCaretSelection::Row(range.to_minimal()),
            CaretSelection::Grid(range) => MinimalCaretSelection::Grid(range.to_minimal()),
        }
    }

    /// The selection as a range of nodes. A grid selection becomes the entire table.
    pub fn to_row_range(&self) -> InputRowRange {
        match self {
            CaretSelection::Row(range) => range.clone(),
            CaretSelection::Grid(range) => {
                let index = range.grid_zipper.index_in_parent();
                InputRowRange::new(
                    range.grid_zipper.parent().clone(),
                    Offset(index),
                    Offset(index + 1),
                )
            }
        }
    }
}

/// Turns two cell indices into offsets that surround both cells
fn expand_to_cells(start: usize, end: usize) -> (usize, usize) {
    if start < end {
        (start, end + 1)
    } else {
        (start + 1, end)
    }
}
