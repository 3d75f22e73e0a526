use input_tree::{
    direction::Direction,
    editing::{editable::Editable, BasicEdit},
    focus::MinimalInputRowPosition,
    input_tree::InputTree,
    node::InputNode,
    row::Offset,
};

use crate::{
    caret::Caret,
    editing_caret::{EditingCaret, SerializedCaret},
    error::EditorError,
    primitive::{
        primitive_edit::{insert_at_range, remove_at_caret, CaretRemoveMode},
        MultiEdit, NavigationSettings,
    },
    render::CaretPositionOracle,
    syntax::SyntaxLookup,
};

/// All carets of an editor.
///
/// Edits are done one caret at a time. After a caret's edit has been applied, every other caret gets
/// moved along with the edit, so that the next caret still points at the right place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaretManager {
    carets: Vec<EditingCaret>,
    /// The selection that is being dragged with the mouse. Only becomes a real caret when the pointer is released.
    pointer_selection: Option<EditingCaret>,
}

impl Default for CaretManager {
    fn default() -> Self {
        Self::new()
    }
}

impl CaretManager {
    pub fn new() -> Self {
        Self {
            carets: vec![EditingCaret::collapsed(MinimalInputRowPosition::root(Offset(0)))],
            pointer_selection: None,
        }
    }

    pub fn carets(&self) -> &[EditingCaret] {
        &self.carets
    }

    /// The most recently added caret
    pub fn main_caret(&self) -> Option<&EditingCaret> {
        self.carets.last()
    }

    pub fn pointer_selection(&self) -> Option<&EditingCaret> {
        self.pointer_selection.as_ref()
    }

    pub fn set_carets(&mut self, carets: Vec<EditingCaret>) {
        self.carets = carets;
        self.merge_carets();
    }

    pub fn add_caret(&mut self, caret: EditingCaret) {
        self.carets.push(caret);
        self.merge_carets();
    }

    /// Inserts the values at every caret. A selection gets replaced.
    pub fn insert_at_carets(
        &mut self,
        values: Vec<InputNode>,
        tree: &mut InputTree,
        syntax: &dyn SyntaxLookup,
    ) -> Result<MultiEdit, EditorError> {
        self.edit_at_carets(tree, syntax, |caret| {
            let range = caret.selection().to_row_range();
            Some(insert_at_range(&range, values.clone()))
        })
    }

    /// Deletes at every caret. Carets that cannot delete anything stay where they are.
    pub fn remove_at_carets(
        &mut self,
        mode: CaretRemoveMode,
        tree: &mut InputTree,
        syntax: &dyn SyntaxLookup,
        navigation: &NavigationSettings,
    ) -> Result<MultiEdit, EditorError> {
        self.edit_at_carets(tree, syntax, |caret| {
            let range = caret.selection().to_row_range();
            remove_at_caret(navigation, &range, mode)
        })
    }

    fn edit_at_carets(
        &mut self,
        tree: &mut InputTree,
        syntax: &dyn SyntaxLookup,
        mut edit_caret: impl FnMut(&Caret) -> Option<(Vec<BasicEdit>, MinimalInputRowPosition)>,
    ) -> Result<MultiEdit, EditorError> {
        let carets_before = self.serialize();
        let mut carets = self.carets.clone();
        for caret in carets.iter_mut() {
            caret.update_current_tokens(tree, syntax);
        }

        let mut new_tree = tree.clone();
        let mut edits = Vec::new();
        for index in 0..carets.len() {
            // An earlier edit pushed this caret onto a caret that already did its edit
            let (done, rest) = carets.split_at(index);
            if done.iter().any(|other| is_same_place(other, &rest[0])) {
                continue;
            }

            let caret = carets[index].to_caret(&new_tree)?;
            let Some((caret_edits, position)) = edit_caret(&caret) else {
                continue;
            };
            if caret_edits.is_empty() {
                carets[index].move_to(position.clone(), position);
                continue;
            }

            new_tree.apply_edits(&caret_edits)?;
            // Includes the editing caret, its token has to move along as well
            for caret in carets.iter_mut() {
                caret.apply_edits(&caret_edits);
            }
            carets[index].finish_edit(position);
            edits.extend(caret_edits);
        }

        *tree = new_tree;
        self.carets = carets;
        self.merge_carets();
        Ok(MultiEdit {
            carets_before,
            carets_after: self.serialize(),
            edits,
        })
    }

    /// Moves every caret. Does not change the tree.
    pub fn move_carets(
        &mut self,
        direction: Direction,
        tree: &InputTree,
        navigation: &NavigationSettings,
        oracle: &dyn CaretPositionOracle,
    ) -> Result<(), EditorError> {
        let mut carets = self.carets.clone();
        for caret in carets.iter_mut() {
            let range = caret.to_caret(tree)?.selection().to_row_range();
            if let Some(position) = navigation.move_caret_range(&range, direction, oracle) {
                let position = position.to_minimal();
                caret.move_to(position.clone(), position);
            }
        }
        self.carets = carets;
        self.merge_carets();
        Ok(())
    }

    /// Moves the end of every caret, the start stays.
    pub fn select_with_carets(
        &mut self,
        direction: Direction,
        tree: &InputTree,
        navigation: &NavigationSettings,
        oracle: &dyn CaretPositionOracle,
    ) -> Result<(), EditorError> {
        let mut carets = self.carets.clone();
        for caret in carets.iter_mut() {
            let end_position = tree.position(&caret.end_position)?;
            if let Some(new_end) = navigation.move_position(&end_position, direction, oracle) {
                caret.move_to(caret.start_position.clone(), new_end.to_minimal());
            }
        }
        self.carets = carets;
        self.merge_carets();
        Ok(())
    }

    pub fn select_all(&mut self, tree: &InputTree) {
        self.carets = vec![EditingCaret::new(
            MinimalInputRowPosition::root(Offset(0)),
            MinimalInputRowPosition::root(Offset(tree.root.len())),
        )];
    }

    pub fn start_selection(&mut self, position: MinimalInputRowPosition) {
        self.pointer_selection = Some(EditingCaret::collapsed(position));
    }

    pub fn extend_selection(&mut self, position: MinimalInputRowPosition) {
        if let Some(selection) = &mut self.pointer_selection {
            selection.move_to(selection.start_position.clone(), position);
        }
    }

    /// Turns the pointer selection into a caret. Either replaces all carets, or adds a new one.
    pub fn finish_selection(&mut self, add_caret: bool) {
        let Some(selection) = self.pointer_selection.take() else {
            return;
        };
        if add_caret {
            self.add_caret(selection);
        } else {
            self.carets = vec![selection];
        }
    }

    pub fn cancel_selection(&mut self) {
        self.pointer_selection = None;
    }

    pub fn serialize(&self) -> Vec<SerializedCaret> {
        self.carets.iter().map(|caret| caret.serialize()).collect()
    }

    /// Restores the carets. Carets that do not fit the tree are dropped.
    pub fn deserialize(serialized: &[SerializedCaret], tree: &InputTree) -> Self {
        let carets: Vec<_> = serialized
            .iter()
            .filter_map(|caret| match EditingCaret::deserialize(caret, tree) {
                Ok(caret) => Some(caret),
                Err(error) => {
                    log::warn!("Dropping caret {:?}: {}", caret, error);
                    None
                }
            })
            .collect();
        if carets.is_empty() {
            return Self::new();
        }
        let mut manager = Self {
            carets,
            pointer_selection: None,
        };
        manager.merge_carets();
        manager
    }

    /// Carets that ended up at the same place become one caret
    fn merge_carets(&mut self) {
        let count = self.carets.len();
        let mut merged: Vec<EditingCaret> = Vec::with_capacity(count);
        for caret in self.carets.drain(..) {
            if !merged.iter().any(|other| is_same_place(other, &caret)) {
                merged.push(caret);
            }
        }
        if merged.len() != count {
            log::debug!("Merged {} carets into {}", count, merged.len());
        }
        self.carets = merged;
    }
}

fn is_same_place(a: &EditingCaret, b: &EditingCaret) -> bool {
    a.start_position == b.start_position && a.end_position == b.end_position
}
