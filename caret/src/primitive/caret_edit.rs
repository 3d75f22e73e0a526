use input_tree::{
    editing::{invertible::Invertible, BasicEdit},
    input_tree::InputTree,
};
use serde::{Deserialize, Serialize};

use crate::{
    editing_caret::{EditingCaret, SerializedCaret},
    error::EditorError,
};

/// One undo step. Every caret of a keystroke ends up in the same multi edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiEdit {
    pub carets_before: Vec<SerializedCaret>,
    pub carets_after: Vec<SerializedCaret>,
    /// Applied in order
    pub edits: Vec<BasicEdit>,
}

impl MultiEdit {
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

impl Invertible for MultiEdit {
    type Inverse = Self;

    fn inverse(&self) -> Self::Inverse {
        MultiEdit {
            carets_before: self.carets_after.clone(),
            carets_after: self.carets_before.clone(),
            edits: self.edits.inverse(),
        }
    }
}

/// Applies the edits and restores the carets that belong to the new tree.
/// If anything does not fit, the tree stays as it was.
pub fn apply_multi_edit(
    tree: &mut InputTree,
    edit: &MultiEdit,
) -> Result<Vec<EditingCaret>, EditorError> {
    let mut new_tree = tree.clone();
    new_tree.apply_edits(&edit.edits)?;
    let carets = edit
        .carets_after
        .iter()
        .map(|caret| EditingCaret::deserialize(caret, &new_tree))
        .collect::<Result<Vec<_>, _>>()?;
    *tree = new_tree;
    Ok(carets)
}
