use input_tree::{
    editing::{editable::Editable, BasicEdit},
    focus::{InputRowPosition, MinimalInputRowPosition, MinimalInputRowRange},
    input_tree::InputTree,
};
use serde::{Deserialize, Serialize};

use crate::{
    caret::{Caret, MinimalCaret},
    error::EditorError,
    syntax::SyntaxLookup,
};

/// A caret that the user is typing with.
///
/// `current_tokens` is the token that the caret is editing, and `has_edited` records whether
/// this caret already changed the tree. Autocomplete only looks at carets that are still in their token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditingCaret {
    pub start_position: MinimalInputRowPosition,
    pub end_position: MinimalInputRowPosition,
    pub current_tokens: Option<MinimalInputRowRange>,
    pub has_edited: bool,
}

/// The wire format of an [`EditingCaret`]. Plain data, survives edits and can be stored in the undo history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
#[serde(rename_all = "camelCase")]
pub struct SerializedCaret {
    pub start_position: MinimalInputRowRange,
    pub end_position: MinimalInputRowRange,
    pub current_tokens: Option<MinimalInputRowRange>,
    pub has_edited: bool,
}

impl EditingCaret {
    pub fn new(start_position: MinimalInputRowPosition, end_position: MinimalInputRowPosition) -> Self {
        Self {
            start_position,
            end_position,
            current_tokens: None,
            has_edited: false,
        }
    }

    pub fn collapsed(position: MinimalInputRowPosition) -> Self {
        Self::new(position.clone(), position)
    }

    pub fn from_minimal(caret: MinimalCaret) -> Self {
        Self::new(caret.start_position, caret.end_position)
    }

    pub fn to_minimal(&self) -> MinimalCaret {
        MinimalCaret {
            start_position: self.start_position.clone(),
            end_position: self.end_position.clone(),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.start_position == self.end_position
    }

    /// Resolves the caret in the tree
    pub fn to_caret(&self, tree: &InputTree) -> Result<Caret, EditorError> {
        Ok(Caret::from_minimal(tree, &self.to_minimal())?)
    }

    /// Places the caret somewhere else. Leaving the current token ends the editing of it.
    pub fn move_to(&mut self, start_position: MinimalInputRowPosition, end_position: MinimalInputRowPosition) {
        self.start_position = start_position;
        self.end_position = end_position;
        let still_in_token = self.current_tokens.as_ref().is_some_and(|token| {
            token.contains_position(&self.start_position) && token.contains_position(&self.end_position)
        });
        if !still_in_token {
            self.current_tokens = None;
            self.has_edited = false;
        }
    }

    /// Called after this caret produced an edit
    pub fn finish_edit(&mut self, position: MinimalInputRowPosition) {
        self.start_position = position.clone();
        self.end_position = position;
        self.has_edited = true;
    }

    /// Looks up the token that the caret is in, if it does not know it yet.
    pub fn update_current_tokens(&mut self, tree: &InputTree, syntax: &dyn SyntaxLookup) {
        if self.current_tokens.is_some() || !self.is_collapsed() {
            return;
        }
        let Ok(position) = InputRowPosition::from_minimal(&tree.root, &self.end_position) else {
            return;
        };
        self.current_tokens = syntax.current_token(position.row_zipper.value(), &self.end_position);
    }

    pub fn serialize(&self) -> SerializedCaret {
        SerializedCaret {
            start_position: self.start_position.clone().into(),
            end_position: self.end_position.clone().into(),
            current_tokens: self.current_tokens.clone(),
            has_edited: self.has_edited,
        }
    }

    /// Restores a caret, and checks that it fits the tree.
    pub fn deserialize(serialized: &SerializedCaret, tree: &InputTree) -> Result<Self, EditorError> {
        let start_position = serialized.start_position.start_position();
        let end_position = serialized.end_position.start_position();
        tree.position(&start_position)?;
        tree.position(&end_position)?;
        let current_tokens = match &serialized.current_tokens {
            Some(tokens) => {
                tree.range(tokens)?;
                Some(tokens.clone())
            }
            None => None,
        };
        Ok(Self {
            start_position,
            end_position,
            current_tokens,
            has_edited: serialized.has_edited,
        })
    }
}

impl Editable for EditingCaret {
    fn apply_edit(&mut self, edit: &BasicEdit) {
        self.start_position.apply_edit(edit);
        self.end_position.apply_edit(edit);
        if let Some(tokens) = &mut self.current_tokens {
            tokens.apply_edit(edit);
        }
    }
}
