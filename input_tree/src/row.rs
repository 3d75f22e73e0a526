use std::{cmp::Ordering, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    direction::HorizontalDirection, node::InputNode, print_helpers::write_with_separator,
};

/// A simple representation of what a math formula looks like.
/// Optimized for editing, purposefully does not assign meaning to most characters.
/// For instance, if the formula contains "0xe", we just say it has the characters 0, x, e. And the user can move the caret between those elements.
/// We store the characters (graphemes) individually, because moving the caret and deleting characters is easier to implement that way.
/// Parsing is done later.
/// A row contains an arbitrary number of nodes.
///
/// Invariants:
/// - The parent-child order is always Row -> Node -> Row -> Node -> ....
/// - `offset_count == values.len() + 1 + sum(child.offset_count())`, computed once on construction.
///
/// Rows are immutable. Cloning one is cheap, the nodes are shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "InputRowData")]
pub struct InputRow {
    values: Arc<[InputNode]>,
    #[serde(skip)]
    offset_count: usize,
}

#[derive(Deserialize)]
struct InputRowData {
    values: Vec<InputNode>,
}

impl From<InputRowData> for InputRow {
    fn from(data: InputRowData) -> Self {
        InputRow::new(data.values)
    }
}

impl InputRow {
    pub fn new(values: Vec<InputNode>) -> Self {
        let offset_count = values.len()
            + 1
            + values
                .iter()
                .map(|value| value.offset_count())
                .sum::<usize>();
        InputRow {
            values: values.into(),
            offset_count,
        }
    }

    pub fn values(&self) -> &[InputNode] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// How many caret positions exist in this row, including the ones in nested rows.
    pub fn offset_count(&self) -> usize {
        self.offset_count
    }

    /// Gets the index of the node that is next to the offset, in the given direction.
    pub fn offset_to_index(&self, offset: Offset, direction: HorizontalDirection) -> Option<usize> {
        match direction {
            HorizontalDirection::Left if offset.0 > 0 && offset.0 <= self.len() => {
                Some(offset.0 - 1)
            }
            HorizontalDirection::Right if offset.0 < self.len() => Some(offset.0),
            _ => None,
        }
    }

    /// Returns whether two rows share their storage, which is the case for untouched parts of an edited tree.
    pub fn ptr_eq(&self, other: &InputRow) -> bool {
        Arc::ptr_eq(&self.values, &other.values)
    }
}

impl Default for InputRow {
    fn default() -> Self {
        InputRow::new(vec![])
    }
}

impl fmt::Display for InputRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row")?;
        for value in self.values.iter() {
            write!(f, " {}", value)?;
        }
        write!(f, ")")
    }
}

/// A caret position in a row, `0..=row.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct Offset(pub usize);

/// We have a repeating row > node > ... hierarchy.
/// So to get from one row to the next, we need two indices.
/// One to tell us how to get to the node, and another to tell us how to get to the child row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct RowIndex(pub usize, pub usize);

impl From<(usize, usize)> for RowIndex {
    fn from((node_index, row_index): (usize, usize)) -> Self {
        RowIndex(node_index, row_index)
    }
}

/// Points at a given row, starting from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
#[serde(transparent)]
pub struct RowIndices(Vec<RowIndex>);

impl RowIndices {
    pub fn new(indices: Vec<RowIndex>) -> Self {
        RowIndices(indices)
    }

    pub fn push(&mut self, index: RowIndex) {
        self.0.push(index);
    }

    pub fn pop(&mut self) -> Option<RowIndex> {
        self.0.pop()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&RowIndex> {
        self.0.get(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut RowIndex> {
        self.0.get_mut(index)
    }

    pub fn last(&self) -> Option<&RowIndex> {
        self.0.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RowIndex> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[RowIndex] {
        &self.0
    }

    pub fn starts_with(&self, other: &RowIndices) -> bool {
        self.0.starts_with(&other.0)
    }

    /// The longest common prefix, which points at the nearest shared ancestor row.
    pub fn get_shared(&self, other: &RowIndices) -> RowIndices {
        RowIndices(
            self.0
                .iter()
                .zip(other.0.iter())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| *a)
                .collect(),
        )
    }

    /// Compares two positions in document order, even if they are in different rows.
    ///
    /// An offset sits in between nodes, so it is treated as `node index - 0.5`.
    /// Everything is doubled to stay in integers.
    pub fn cmp_indices_and_offset(
        indices: &RowIndices,
        offset: &Offset,
        other_indices: &RowIndices,
        other_offset: &Offset,
    ) -> Ordering {
        let shared_len = indices.len().min(other_indices.len());
        let row_ordering = indices.0[..shared_len].cmp(&other_indices.0[..shared_len]);
        if row_ordering != Ordering::Equal {
            return row_ordering;
        }

        let offset_or_index = |indices: &RowIndices, offset: &Offset| match indices.at(shared_len) {
            Some(row_index) => row_index.0 * 2 + 1,
            None => offset.0 * 2,
        };

        offset_or_index(indices, offset).cmp(&offset_or_index(other_indices, other_offset))
    }
}

impl From<Vec<RowIndex>> for RowIndices {
    fn from(indices: Vec<RowIndex>) -> Self {
        RowIndices(indices)
    }
}

impl fmt::Display for RowIndices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        write_with_separator(
            self.0.iter().map(|RowIndex(a, b)| format!("({a}, {b})")),
            ", ",
            f,
        )?;
        write!(f, "]")
    }
}

/// Points at a node in a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementIndices {
    pub row_indices: RowIndices,
    pub index: usize,
}
