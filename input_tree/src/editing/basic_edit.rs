use serde::{Deserialize, Serialize};

use crate::{
    focus::{InputRowPosition, InputRowRange, MinimalInputRowPosition, MinimalInputRowRange},
    node::InputNode,
    row::Offset,
};

use super::invertible::Invertible;

///
/// Useless note: A Vec<BasicEdit> together with the .concat() method forms an algebraic group.
/// It is associative, has an identity element ([]) and can be inverted.
///
/// When creating multiple disjoint edits, I recommend creating them bottom to top, right to left.
/// That way, one edit doesn't afftect the indices of the other edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasicEdit {
    Insert {
        position: MinimalInputRowPosition,
        values: Vec<InputNode>,
    },
    Delete {
        /// Deletes to the right of the position
        position: MinimalInputRowPosition,
        /// The values that were removed, used for undo.
        values: Vec<InputNode>,
    },
}

impl BasicEdit {
    pub fn position(&self) -> &MinimalInputRowPosition {
        match self {
            BasicEdit::Insert { position, .. } => position,
            BasicEdit::Delete { position, .. } => position,
        }
    }

    pub fn values(&self) -> &[InputNode] {
        match self {
            BasicEdit::Insert { values, .. } => values,
            BasicEdit::Delete { values, .. } => values,
        }
    }

    /// Inserts the values at the position.
    /// Returns the edits and the position right after the inserted values.
    pub fn insert_at_position(
        position: &InputRowPosition,
        values: Vec<InputNode>,
    ) -> (Vec<BasicEdit>, MinimalInputRowPosition) {
        let mut caret = position.to_minimal();
        if values.is_empty() {
            return (vec![], caret);
        }
        caret.offset = Offset(caret.offset.0 + values.len());
        let edit = BasicEdit::Insert {
            position: position.to_minimal(),
            values,
        };
        (vec![edit], caret)
    }

    /// Removes everything inside of the range.
    /// Returns the edits and the position where the range used to be.
    pub fn remove_range(range: &InputRowRange) -> (Vec<BasicEdit>, MinimalInputRowPosition) {
        let position = range.left_position().to_minimal();
        if range.is_collapsed() {
            return (vec![], position);
        }
        let edit = BasicEdit::Delete {
            position: position.clone(),
            values: range.values().to_vec(),
        };
        (vec![edit], position)
    }

    /// Replaces the contents of the range with the values.
    /// Returns the edits and a range that spans the new values.
    pub fn replace_range(
        range: &InputRowRange,
        values: Vec<InputNode>,
    ) -> (Vec<BasicEdit>, MinimalInputRowRange) {
        let (mut edits, position) = Self::remove_range(range);
        let inserted_count = values.len();
        if !values.is_empty() {
            edits.push(BasicEdit::Insert {
                position: position.clone(),
                values,
            });
        }
        let end = Offset(position.offset.0 + inserted_count);
        let range = MinimalInputRowRange::new(position.row_indices, position.offset, end);
        (edits, range)
    }
}

impl Invertible for BasicEdit {
    type Inverse = BasicEdit;

    fn inverse(&self) -> Self::Inverse {
        match self {
            BasicEdit::Insert { position, values } => BasicEdit::Delete {
                position: position.clone(),
                values: values.clone(),
            },
            BasicEdit::Delete { position, values } => BasicEdit::Insert {
                position: position.clone(),
                values: values.clone(),
            },
        }
    }
}
