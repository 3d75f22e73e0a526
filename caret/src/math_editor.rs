use input_tree::{
    direction::Direction,
    editing::{editable::Editable, invertible::Invertible, BasicEdit},
    focus::{InputRowRange, MinimalInputRowPosition, MinimalInputRowRange},
    grid::Grid,
    input_tree::InputTree,
    node::{InputNode, InputNodeVariant},
    row::InputRow,
};
use serialization::{deserialize_input_nodes, serialize_input_nodes};

pub use serialization::SerializedDataType;

use crate::{
    caret::{CaretSelection, MinimalCaretSelection},
    caret_manager::CaretManager,
    error::EditorError,
    primitive::{apply_multi_edit, primitive_edit::CaretRemoveMode, MultiEdit},
    render::CaretPositionOracle,
    settings::EditorSettings,
    syntax::SyntaxLookup,
    undo_redo_manager::UndoRedoManager,
};

pub struct MathEditor {
    /// User input
    tree: InputTree,
    carets: CaretManager,
    /// Undo-redo stack, will record actual edits
    undo_stack: UndoRedoManager<MultiEdit>,
    settings: EditorSettings,
    /// The parser, if there is one
    syntax: Box<dyn SyntaxLookup>,
}

impl MathEditor {
    pub fn new(settings: EditorSettings) -> Self {
        Self::with_root(settings, InputRow::default())
    }

    pub fn with_root(settings: EditorSettings, root: InputRow) -> Self {
        Self {
            tree: InputTree::new(root),
            carets: CaretManager::new(),
            undo_stack: UndoRedoManager::new(MultiEdit::inverse)
                .with_max_steps(settings.max_undo_steps),
            settings,
            syntax: Box::new(()),
        }
    }

    pub fn set_syntax_lookup(&mut self, syntax: Box<dyn SyntaxLookup>) {
        self.syntax = syntax;
    }

    pub fn tree(&self) -> &InputTree {
        &self.tree
    }

    pub fn carets(&self) -> &CaretManager {
        &self.carets
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo_stack.can_redo()
    }
}

impl MathEditor {
    /// Can also accept a \n and other special characters
    pub fn insert_at_caret(&mut self, values: Vec<String>) -> Result<(), EditorError> {
        self.insert_nodes(values.into_iter().map(InputNode::Symbol).collect())
    }

    pub fn insert_nodes(&mut self, values: Vec<InputNode>) -> Result<(), EditorError> {
        let edit = self
            .carets
            .insert_at_carets(values, &mut self.tree, self.syntax.as_ref())?;
        self.record(edit);
        Ok(())
    }

    pub fn remove_at_caret(&mut self, mode: CaretRemoveMode) -> Result<(), EditorError> {
        let navigation = self.settings.navigation_settings();
        let edit = self.carets.remove_at_carets(
            mode,
            &mut self.tree,
            self.syntax.as_ref(),
            &navigation,
        )?;
        self.record(edit);
        Ok(())
    }

    pub fn move_caret(
        &mut self,
        direction: Direction,
        oracle: &dyn CaretPositionOracle,
    ) -> Result<(), EditorError> {
        let navigation = self.settings.navigation_settings();
        self.carets
            .move_carets(direction, &self.tree, &navigation, oracle)
    }

    pub fn select_with_caret(
        &mut self,
        direction: Direction,
        oracle: &dyn CaretPositionOracle,
    ) -> Result<(), EditorError> {
        let navigation = self.settings.navigation_settings();
        self.carets
            .select_with_carets(direction, &self.tree, &navigation, oracle)
    }

    pub fn select_all(&mut self) {
        self.carets.select_all(&self.tree);
    }

    /// Returns whether there was something to undo
    pub fn undo(&mut self) -> Result<bool, EditorError> {
        let Some(action) = self.undo_stack.undo() else {
            return Ok(false);
        };
        match self.apply_action(&action) {
            Ok(()) => Ok(true),
            Err(error) => {
                self.undo_stack.revert_undo();
                Err(error)
            }
        }
    }

    /// Returns whether there was something to redo
    pub fn redo(&mut self) -> Result<bool, EditorError> {
        let Some(action) = self.undo_stack.redo() else {
            return Ok(false);
        };
        match self.apply_action(&action) {
            Ok(()) => Ok(true),
            Err(error) => {
                self.undo_stack.revert_redo();
                Err(error)
            }
        }
    }

    fn apply_action(&mut self, action: &MultiEdit) -> Result<(), EditorError> {
        let carets = apply_multi_edit(&mut self.tree, action)?;
        self.carets.set_carets(carets);
        Ok(())
    }

    fn record(&mut self, edit: MultiEdit) {
        if !edit.is_empty() {
            self.undo_stack.push(edit);
        }
    }

    pub fn start_selection(&mut self, position: MinimalInputRowPosition) {
        self.carets.start_selection(position);
    }

    pub fn extend_selection(&mut self, position: MinimalInputRowPosition) {
        self.carets.extend_selection(position);
    }

    pub fn finish_selection(&mut self, add_caret: bool) {
        self.carets.finish_selection(add_caret);
    }

    pub fn cancel_selection(&mut self) {
        self.carets.cancel_selection();
    }

    /// Copies what the main caret selected. A grid selection becomes a smaller table.
    pub fn copy(&self, data_type: SerializedDataType) -> Result<String, EditorError> {
        let Some(caret) = self.carets.main_caret() else {
            return Ok(serialize_input_nodes(&[], data_type)?);
        };
        let selection = caret.to_caret(&self.tree)?.into_selection();
        let selected_nodes = match &selection {
            CaretSelection::Row(range) => range.values().to_vec(),
            CaretSelection::Grid(range) => {
                let top_left = range.top_left_index();
                let bottom_right = range.bottom_right_index();
                let width = bottom_right.x.0 - top_left.x.0;
                let cells = range
                    .cell_indices()
                    .into_iter()
                    .filter_map(|index| range.get_row(index).cloned())
                    .collect();
                vec![InputNode::container(
                    InputNodeVariant::Table,
                    Grid::try_from_one_dimensional(cells, width)?,
                )?]
            }
        };
        Ok(serialize_input_nodes(&selected_nodes, data_type)?)
    }

    /// Inserts at every caret. Malformed nodes are kept as error nodes.
    pub fn paste(
        &mut self,
        data: &str,
        data_type: Option<SerializedDataType>,
    ) -> Result<(), EditorError> {
        let nodes = serialization::deserialize_input_nodes_lenient(data, data_type)?;
        self.insert_nodes(nodes)
    }

    /// Like [`Self::paste`], but refuses malformed data.
    pub fn paste_strict(
        &mut self,
        data: &str,
        data_type: Option<SerializedDataType>,
    ) -> Result<(), EditorError> {
        let nodes = deserialize_input_nodes(data, data_type)?;
        self.insert_nodes(nodes)
    }

    pub fn get_carets(&self) -> Vec<MinimalCaretSelection> {
        self.caret_selections()
            .iter()
            .map(|selection| selection.to_minimal())
            .collect()
    }

    pub fn caret_selections(&self) -> Vec<CaretSelection> {
        self.carets
            .carets()
            .iter()
            .filter_map(|caret| caret.to_caret(&self.tree).ok())
            .map(|caret| caret.into_selection())
            .collect()
    }

    /// For setting some parsed content, or for inserting a result.
    /// The carets stay where they are, and get moved along with the edit.
    pub fn splice_at_range(
        &mut self,
        range: MinimalInputRowRange,
        values: Vec<InputNode>,
    ) -> Result<(), EditorError> {
        let carets_before = self.carets.serialize();
        let range = InputRowRange::from_minimal(&self.tree.root, &range)?;
        let (edits, _) = BasicEdit::replace_range(&range, values);
        self.tree.apply_edits(&edits)?;

        let mut carets = self.carets.carets().to_vec();
        for caret in carets.iter_mut() {
            caret.apply_edits(&edits);
        }
        self.carets.set_carets(carets);
        self.record(MultiEdit {
            carets_before,
            carets_after: self.carets.serialize(),
            edits,
        });
        Ok(())
    }
}
