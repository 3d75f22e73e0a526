use super::NavigationSettings;
use crate::render::NoViewport;
use input_tree::{
    direction::HorizontalDirection,
    editing::BasicEdit,
    focus::{InputContainerZipper, InputRowPosition, InputRowRange, MinimalInputRowPosition},
    node::{InputNode, InputNodeVariant},
    row::Offset,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub enum CaretRemoveMode {
    Left,
    Right,
    /// The selected range is deleted, even if it's empty.
    Range,
}

// The functions here return edit commands that needs to be applied to the tree.
pub fn insert_at_range(
    caret: &InputRowRange,
    values: Vec<InputNode>,
) -> (Vec<BasicEdit>, MinimalInputRowPosition) {
    let (edit, range) = BasicEdit::replace_range(caret, values);
    let offset = range.right_offset();
    (edit, MinimalInputRowPosition::new(range.row_indices, offset))
}

pub fn remove_at_caret(
    caret_mover: &NavigationSettings,
    caret: &InputRowRange,
    mode: CaretRemoveMode,
) -> Option<(Vec<BasicEdit>, MinimalInputRowPosition)> {
    if !caret.is_collapsed() {
        return Some(BasicEdit::remove_range(caret));
    }
    match mode {
        CaretRemoveMode::Left => remove_at_caret_position(
            caret_mover,
            caret.start_position(),
            HorizontalDirection::Left,
        ),
        CaretRemoveMode::Right => remove_at_caret_position(
            caret_mover,
            caret.start_position(),
            HorizontalDirection::Right,
        ),
        CaretRemoveMode::Range => Some(BasicEdit::remove_range(caret)),
    }
}

fn remove_at_caret_position(
    caret_mover: &NavigationSettings,
    caret: InputRowPosition,
    direction: HorizontalDirection,
) -> Option<(Vec<BasicEdit>, MinimalInputRowPosition)> {
    /// Nothing to delete, just move the caret
    fn move_caret(
        caret_mover: &NavigationSettings,
        caret: InputRowPosition,
        direction: HorizontalDirection,
    ) -> Option<(Vec<BasicEdit>, MinimalInputRowPosition)> {
        // Horizontal movement never asks where things are on screen
        let position = caret_mover.move_position(&caret, direction.into(), &NoViewport)?;
        Some((vec![], position.to_minimal()))
    }

    /// Copy all children of the node, remove node, and insert the children at the caret position
    fn flatten_node(
        node_zipper: &InputContainerZipper,
        offset_in_node: Offset,
    ) -> Option<(Vec<BasicEdit>, MinimalInputRowPosition)> {
        let values = node_zipper
            .grid()
            .values()
            .iter()
            .flat_map(|row| row.values().iter().cloned())
            .collect();
        let node_index = node_zipper.index_in_parent();
        let row = node_zipper.parent().clone();
        let range = InputRowRange::new(row, Offset(node_index), Offset(node_index + 1));
        let (mut edits, mut position) = BasicEdit::remove_range(&range);
        let (mut insert_edits, _) = BasicEdit::insert_at_position(&range.left_position(), values);
        edits.append(&mut insert_edits);
        position.offset = Offset(position.offset.0 + offset_in_node.0);
        log::debug!("Flattening {} at {:?}", node_zipper.variant(), position);
        Some((edits, position))
    }

    let adjacent_index = caret.row_zipper.offset_to_index(caret.offset, direction);
    let adjacent_node =
        adjacent_index.and_then(|index| caret.row_zipper.node_at(index).map(|node| (index, node)));

    // Delete symbol
    if let Some((index, InputNode::Symbol(_) | InputNode::Error(_))) = adjacent_node {
        return Some(BasicEdit::remove_range(&InputRowRange::new(
            caret.row_zipper.clone(),
            Offset(index),
            Offset(index + 1),
        )));
    }

    // Delete the superscript/subscript but keep its contents
    // cat|^3 becomes cat|3
    if let Some((index, InputNode::Container(InputNodeVariant::Sub | InputNodeVariant::Sup, _))) =
        adjacent_node
    {
        if direction == HorizontalDirection::Right {
            return flatten_node(&caret.row_zipper.container_at(index)?, Offset(0));
        }
    }

    // Move into next/previous node
    if adjacent_node.is_some() {
        return move_caret(caret_mover, caret, direction);
    }

    // At the start or end of a row, so we might delete an entire node
    let parent = caret.row_zipper.parent()?.clone();
    let index_in_parent = caret.row_zipper.index_in_parent()?;

    // Special cases
    match parent.variant() {
        InputNodeVariant::Sub | InputNodeVariant::Sup => {
            // Flatten superscript/subscript that we are at the start of
            if direction == HorizontalDirection::Left {
                return flatten_node(&parent, Offset(0));
            }
        }
        InputNodeVariant::Fraction | InputNodeVariant::Root => {
            // Flatten fraction/root that we are in the middle of
            if (direction == HorizontalDirection::Left && index_in_parent == 1)
                || (direction == HorizontalDirection::Right && index_in_parent == 0)
            {
                let first_row_len = parent.grid().get_by_index(0).map_or(0, |row| row.len());
                return flatten_node(&parent, Offset(first_row_len));
            }
        }
        _ => {}
    };

    // General grid movement
    let grid = parent.grid();
    let at_edge = match direction {
        HorizontalDirection::Left => index_in_parent == 0,
        HorizontalDirection::Right => index_in_parent + 1 >= grid.len(),
    };
    if at_edge && grid.values().iter().all(|v| v.is_empty()) {
        // Delete the entire node if we are at the start/end *and* the grid is empty
        flatten_node(&parent, Offset(0))
    } else {
        // Move into next/previous node if we aren't at the start/end
        move_caret(caret_mover, caret, direction)
    }
}
