mod grid_range;
mod row_position;
mod row_range;

use std::sync::Arc;

use crate::{
    direction::HorizontalDirection,
    error::InputTreeError,
    grid::Grid,
    node::{InputNode, InputNodeVariant},
    row::{ElementIndices, InputRow, Offset, RowIndex, RowIndices},
};

pub use grid_range::*;
pub use row_position::*;
pub use row_range::*;

/// A zipper is a pointer to a row in a tree, with a reference to the parent.
/// Inspired by red-green trees ( https://blog.yaakov.online/red-green-trees/ ) and zippers ( http://learnyouahaskell.com/zippers )
///
/// Zippers own an immutable snapshot of their part of the tree. Editing through a zipper
/// never changes it, instead it rebuilds the path up to the root and returns a new zipper.
/// Untouched rows are shared between the old and the new tree.
///
/// Every caret slot in the whole tree has an absolute offset, counted in document order.
/// A row covers the absolute offsets `start_absolute_offset..start_absolute_offset + offset_count`.
#[derive(Clone, Debug)]
pub struct InputRowZipper {
    value: InputRow,
    parent: Option<Arc<InputContainerZipper>>,
    /// Index of this row in the grid of the parent. 0 for the root.
    index_in_parent: usize,
    start_absolute_offset: usize,
}

impl InputRowZipper {
    pub fn from_root(row: InputRow) -> Self {
        Self {
            value: row,
            parent: None,
            index_in_parent: 0,
            start_absolute_offset: 0,
        }
    }

    /// Walks down from the root, one row index at a time.
    pub fn from_row_indices(root: &InputRow, indices: &RowIndices) -> Result<Self, InputTreeError> {
        let mut current = Self::from_root(root.clone());
        for (hop, index) in indices.iter().enumerate() {
            current = current
                .row_at(*index)
                .ok_or_else(|| InputTreeError::InvalidPath {
                    indices: indices.clone(),
                    hop,
                })?;
        }
        Ok(current)
    }

    pub fn value(&self) -> &InputRow {
        &self.value
    }

    pub fn parent(&self) -> Option<&InputContainerZipper> {
        self.parent.as_deref()
    }

    /// The index in the parent grid, or `None` for the root.
    pub fn index_in_parent(&self) -> Option<usize> {
        self.parent.as_ref().map(|_| self.index_in_parent)
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn start_absolute_offset(&self) -> usize {
        self.start_absolute_offset
    }

    /// Exclusive end of the absolute offsets of this row.
    pub fn end_absolute_offset(&self) -> usize {
        self.start_absolute_offset + self.value.offset_count()
    }

    pub fn contains_absolute_offset(&self, absolute_offset: usize) -> bool {
        self.start_absolute_offset <= absolute_offset && absolute_offset < self.end_absolute_offset()
    }

    /// Converts an offset in this row to an absolute offset.
    pub fn absolute_offset(&self, offset: Offset) -> usize {
        assert!(offset.0 <= self.len(), "Offset out of range");
        self.start_absolute_offset
            + offset.0
            + self.value.values()[..offset.0]
                .iter()
                .map(InputNode::offset_count)
                .sum::<usize>()
    }

    /// Converts an absolute offset to an offset in this row,
    /// if the absolute offset is one of the caret slots of this row.
    pub fn offset_at_absolute(&self, absolute_offset: usize) -> Option<Offset> {
        let mut slot = self.start_absolute_offset;
        for (index, value) in self.value.values().iter().enumerate() {
            if slot == absolute_offset {
                return Some(Offset(index));
            }
            slot += 1 + value.offset_count();
        }
        (slot == absolute_offset).then_some(Offset(self.len()))
    }

    /// Finds the deepest row that contains the absolute offset. Starts searching at the root.
    pub fn at_absolute_offset(&self, absolute_offset: usize) -> Result<InputRowZipper, InputTreeError> {
        let mut current = self.root();
        if !current.contains_absolute_offset(absolute_offset) {
            return Err(InputTreeError::OffsetOutOfRange {
                offset: absolute_offset,
                offset_count: current.value.offset_count(),
            });
        }
        loop {
            let next = current.children().find_map(|child| match child {
                InputChildZipper::Container(container)
                    if container.contains_absolute_offset(absolute_offset) =>
                {
                    let row = container
                        .rows()
                        .find(|row| row.contains_absolute_offset(absolute_offset));
                    row
                }
                _ => None,
            });
            match next {
                Some(row) => current = row,
                None => return Ok(current),
            }
        }
    }

    /// Lazily creates a zipper for every node in the row.
    pub fn children(&self) -> impl Iterator<Item = InputChildZipper> + '_ {
        let mut slot = self.start_absolute_offset;
        self.value
            .values()
            .iter()
            .enumerate()
            .map(move |(index, node)| {
                let child = self.make_child(node, index, slot + 1);
                slot += 1 + node.offset_count();
                child
            })
    }

    pub fn child_at(&self, index: usize) -> Option<InputChildZipper> {
        let node = self.value.values().get(index)?;
        let start_absolute_offset = self.absolute_offset(Offset(index)) + 1;
        Some(self.make_child(node, index, start_absolute_offset))
    }

    fn make_child(
        &self,
        node: &InputNode,
        index: usize,
        start_absolute_offset: usize,
    ) -> InputChildZipper {
        match node {
            InputNode::Container(variant, grid) => {
                InputChildZipper::Container(InputContainerZipper {
                    variant: *variant,
                    grid: grid.clone(),
                    parent: self.clone(),
                    index_in_parent: index,
                    start_absolute_offset,
                })
            }
            InputNode::Symbol(_) | InputNode::Error(_) => {
                InputChildZipper::Symbol(InputSymbolZipper {
                    value: node.clone(),
                    parent: self.clone(),
                    index_in_parent: index,
                })
            }
        }
    }

    pub fn container_at(&self, index: usize) -> Option<InputContainerZipper> {
        match self.child_at(index)? {
            InputChildZipper::Container(container) => Some(container),
            InputChildZipper::Symbol(_) => None,
        }
    }

    pub fn row_at(&self, row_index: impl Into<RowIndex>) -> Option<InputRowZipper> {
        let row_index = row_index.into();
        self.container_at(row_index.0)?.row_at(row_index.1)
    }

    pub fn node_at(&self, index: usize) -> Option<&InputNode> {
        self.value.values().get(index)
    }

    pub fn offset_to_index(&self, offset: Offset, direction: HorizontalDirection) -> Option<usize> {
        self.value.offset_to_index(offset, direction)
    }

    /// Collects the indices by walking up to the root.
    pub fn row_indices(&self) -> RowIndices {
        let mut indices = vec![];
        let mut current = self;
        while let Some(parent) = current.parent() {
            indices.push(RowIndex(parent.index_in_parent, current.index_in_parent));
            current = &parent.parent;
        }
        indices.reverse();
        RowIndices::new(indices)
    }

    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(parent) = current.parent() {
            depth += 1;
            current = &parent.parent;
        }
        depth
    }

    pub fn root(&self) -> InputRowZipper {
        let mut current = self;
        while let Some(parent) = current.parent() {
            current = &parent.parent;
        }
        current.clone()
    }

    pub fn root_row(&self) -> &InputRow {
        let mut current = self;
        while let Some(parent) = current.parent() {
            current = &parent.parent;
        }
        &current.value
    }

    /// Inserts values into this row. Returns the zipper of the edited row, in the new tree.
    pub fn insert(&self, offset: Offset, values: Vec<InputNode>) -> Result<InputRowZipper, InputTreeError> {
        if offset.0 > self.len() {
            return Err(InputTreeError::InvalidOffset {
                row_indices: self.row_indices(),
                offset,
                len: self.len(),
            });
        }
        log::trace!(
            "Inserting {} nodes at {:?} in row {}",
            values.len(),
            offset,
            self.row_indices()
        );
        let mut new_values = self.value.values().to_vec();
        new_values.splice(offset.0..offset.0, values);
        Ok(self.replace_self(InputRow::new(new_values)))
    }

    /// Removes `count` nodes, starting at `index`.
    /// Returns the zipper of the edited row in the new tree, and the removed nodes.
    pub fn remove(
        &self,
        index: usize,
        count: usize,
    ) -> Result<(InputRowZipper, Vec<InputNode>), InputTreeError> {
        if index + count > self.len() {
            return Err(InputTreeError::InvalidIndex {
                row_indices: self.row_indices(),
                index,
                count,
                len: self.len(),
            });
        }
        log::trace!(
            "Removing {} nodes at {} in row {}",
            count,
            index,
            self.row_indices()
        );
        let mut new_values = self.value.values().to_vec();
        let removed = new_values.drain(index..(index + count)).collect();
        Ok((self.replace_self(InputRow::new(new_values)), removed))
    }

    /// Replaces this row, and rebuilds every ancestor up to the root.
    pub fn replace_self(&self, value: InputRow) -> InputRowZipper {
        match &self.parent {
            None => InputRowZipper::from_root(value),
            Some(parent) => parent
                .replace_row(self.index_in_parent, value)
                .row_at(self.index_in_parent)
                .expect("Replaced row must exist"),
        }
    }

    fn replace_node(&self, index: usize, node: InputNode) -> InputRowZipper {
        let mut values = self.value.values().to_vec();
        values[index] = node;
        self.replace_self(InputRow::new(values))
    }
}

/// Zippers of the same tree are equal if they cover the same absolute offsets.
/// Every row has a unique span.
impl PartialEq for InputRowZipper {
    fn eq(&self, other: &Self) -> bool {
        self.start_absolute_offset == other.start_absolute_offset
            && self.value.offset_count() == other.value.offset_count()
    }
}

impl Eq for InputRowZipper {}

/// A zipper that points at a container node, like a fraction or a table.
#[derive(Clone, Debug)]
pub struct InputContainerZipper {
    variant: InputNodeVariant,
    grid: Grid<InputRow>,
    parent: InputRowZipper,
    index_in_parent: usize,
    start_absolute_offset: usize,
}

impl InputContainerZipper {
    pub fn variant(&self) -> InputNodeVariant {
        self.variant
    }

    pub fn grid(&self) -> &Grid<InputRow> {
        &self.grid
    }

    pub fn node(&self) -> InputNode {
        InputNode::Container(self.variant, self.grid.clone())
    }

    pub fn parent(&self) -> &InputRowZipper {
        &self.parent
    }

    pub fn into_parent(self) -> InputRowZipper {
        self.parent
    }

    pub fn index_in_parent(&self) -> usize {
        self.index_in_parent
    }

    pub fn start_absolute_offset(&self) -> usize {
        self.start_absolute_offset
    }

    pub fn offset_count(&self) -> usize {
        self.grid.values().iter().map(InputRow::offset_count).sum()
    }

    pub fn contains_absolute_offset(&self, absolute_offset: usize) -> bool {
        self.start_absolute_offset <= absolute_offset
            && absolute_offset < self.start_absolute_offset + self.offset_count()
    }

    pub fn row_count(&self) -> usize {
        self.grid.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = InputRowZipper> + '_ {
        (0..self.row_count()).filter_map(move |index| self.row_at(index))
    }

    pub fn row_at(&self, index: usize) -> Option<InputRowZipper> {
        let row = self.grid.get_by_index(index)?;
        let start_absolute_offset = self.start_absolute_offset
            + self.grid.values()[..index]
                .iter()
                .map(InputRow::offset_count)
                .sum::<usize>();
        Some(InputRowZipper {
            value: row.clone(),
            parent: Some(Arc::new(self.clone())),
            index_in_parent: index,
            start_absolute_offset,
        })
    }

    pub fn element_indices(&self) -> ElementIndices {
        ElementIndices {
            row_indices: self.parent.row_indices(),
            index: self.index_in_parent,
        }
    }

    fn replace_row(&self, index: usize, row: InputRow) -> InputContainerZipper {
        let node = InputNode::Container(self.variant, self.grid.with_replaced(index, row));
        self.parent
            .replace_node(self.index_in_parent, node)
            .container_at(self.index_in_parent)
            .expect("Replaced container must exist")
    }
}

impl PartialEq for InputContainerZipper {
    fn eq(&self, other: &Self) -> bool {
        self.parent == other.parent && self.index_in_parent == other.index_in_parent
    }
}

impl Eq for InputContainerZipper {}

/// A zipper that points at an atomic leaf. Leaves do not have any caret slots of their own.
#[derive(Clone, Debug)]
pub struct InputSymbolZipper {
    value: InputNode,
    parent: InputRowZipper,
    index_in_parent: usize,
}

impl InputSymbolZipper {
    pub fn value(&self) -> &InputNode {
        &self.value
    }

    pub fn parent(&self) -> &InputRowZipper {
        &self.parent
    }

    pub fn index_in_parent(&self) -> usize {
        self.index_in_parent
    }
}

#[derive(Clone, Debug)]
pub enum InputChildZipper {
    Container(InputContainerZipper),
    Symbol(InputSymbolZipper),
}

impl InputChildZipper {
    pub fn index_in_parent(&self) -> usize {
        match self {
            InputChildZipper::Container(container) => container.index_in_parent(),
            InputChildZipper::Symbol(symbol) => symbol.index_in_parent(),
        }
    }

    pub fn parent(&self) -> &InputRowZipper {
        match self {
            InputChildZipper::Container(container) => container.parent(),
            InputChildZipper::Symbol(symbol) => symbol.parent(),
        }
    }

    pub fn offset_count(&self) -> usize {
        match self {
            InputChildZipper::Container(container) => container.offset_count(),
            InputChildZipper::Symbol(_) => 0,
        }
    }
}
