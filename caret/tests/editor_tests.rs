use caret::{
    caret::MinimalCaretSelection,
    editing_caret::EditingCaret,
    math_editor::{MathEditor, SerializedDataType},
    primitive::{apply_multi_edit, primitive_edit::CaretRemoveMode, MultiEdit},
    render::NoViewport,
    settings::EditorSettings,
    syntax::{SyntaxLookup, SyntaxNode},
    undo_redo_manager::UndoRedoManager,
};
use input_tree::{
    direction::Direction,
    editing::invertible::Invertible,
    focus::{MinimalInputRowPosition, MinimalInputRowRange},
    input_node, input_row,
    input_tree::InputTree,
    node::InputNode,
    row::{InputRow, Offset, RowIndex, RowIndices},
};
use serialization::deserialize_input_nodes;

fn at(indices: Vec<(usize, usize)>, offset: usize) -> MinimalInputRowPosition {
    MinimalInputRowPosition::new(
        RowIndices::new(indices.into_iter().map(RowIndex::from).collect()),
        Offset(offset),
    )
}

fn type_text(editor: &mut MathEditor, text: &str) {
    for c in text.chars() {
        editor.insert_at_caret(vec![c.to_string()]).unwrap();
    }
}

fn caret_positions(editor: &MathEditor) -> Vec<MinimalInputRowPosition> {
    editor
        .carets()
        .carets()
        .iter()
        .map(|caret| caret.end_position.clone())
        .collect()
}

/// The whole row is one token
struct WholeRow;

impl SyntaxLookup for WholeRow {
    fn syntax_node(&self, row: &InputRow, _row_indices: &RowIndices) -> Option<SyntaxNode> {
        Some(SyntaxNode::leaf(0..row.len()))
    }
}

#[test]
fn type_and_undo() {
    let mut editor = MathEditor::new(EditorSettings::default());
    type_text(&mut editor, "ab");
    assert_eq!(editor.tree().root, input_row!((row "a", "b")));
    assert_eq!(caret_positions(&editor), vec![at(vec![], 2)]);

    assert!(editor.undo().unwrap());
    assert_eq!(editor.tree().root, input_row!((row "a")));
    assert_eq!(caret_positions(&editor), vec![at(vec![], 1)]);
    assert!(editor.undo().unwrap());
    assert_eq!(editor.tree().root, input_row!((row)));
    assert!(!editor.undo().unwrap());

    assert!(editor.redo().unwrap());
    assert!(editor.redo().unwrap());
    assert!(!editor.redo().unwrap());
    assert_eq!(editor.tree().root, input_row!((row "a", "b")));
    assert_eq!(caret_positions(&editor), vec![at(vec![], 2)]);
}

#[test]
fn moving_is_not_undoable() {
    let mut editor = MathEditor::new(EditorSettings::default());
    type_text(&mut editor, "a");
    editor.move_caret(Direction::Left, &NoViewport).unwrap();
    editor.remove_at_caret(CaretRemoveMode::Left).unwrap();
    assert!(editor.can_undo());
    assert!(editor.undo().unwrap());
    assert!(!editor.can_undo());
    assert!(editor.can_redo());

    // A new edit clears the redo history
    type_text(&mut editor, "b");
    assert!(!editor.can_redo());
}

#[test]
fn undo_restores_every_caret() {
    let mut editor = MathEditor::with_root(
        EditorSettings::default(),
        input_row!((row "a", (frac (row "b"), (row "c")))),
    );
    editor.start_selection(at(vec![], 0));
    editor.finish_selection(false);
    editor.start_selection(at(vec![(1, 1)], 1));
    editor.finish_selection(true);

    type_text(&mut editor, "x");
    assert_eq!(
        editor.tree().root,
        input_row!((row "x", "a", (frac (row "b"), (row "c", "x"))))
    );
    assert_eq!(
        caret_positions(&editor),
        vec![at(vec![], 1), at(vec![(2, 1)], 2)]
    );

    // One keystroke is one undo step
    assert!(editor.undo().unwrap());
    assert_eq!(
        editor.tree().root,
        input_row!((row "a", (frac (row "b"), (row "c"))))
    );
    assert_eq!(
        caret_positions(&editor),
        vec![at(vec![], 0), at(vec![(1, 1)], 1)]
    );
    assert!(!editor.can_undo());
}

#[test]
fn undo_history_is_capped() {
    let settings = EditorSettings {
        max_undo_steps: Some(2),
        ..Default::default()
    };
    let mut editor = MathEditor::new(settings);
    type_text(&mut editor, "abc");
    assert!(editor.undo().unwrap());
    assert!(editor.undo().unwrap());
    assert!(!editor.undo().unwrap());
    assert_eq!(editor.tree().root, input_row!((row "a")));
}

#[test]
fn undo_redo_manager() {
    let mut manager = UndoRedoManager::new(|v: &i32| -v).with_max_steps(Some(3));
    for i in 1..=4 {
        manager.push(i);
    }
    assert_eq!(manager.undo_len(), 3);
    assert_eq!(manager.undo(), Some(-4));
    assert_eq!(manager.redo(), Some(4));
    assert_eq!(manager.redo(), None);
    assert_eq!(manager.undo(), Some(-4));
    assert_eq!(manager.undo(), Some(-3));
    assert_eq!(manager.undo(), Some(-2));
    assert_eq!(manager.undo(), None);

    manager.revert_undo();
    assert_eq!(manager.undo(), Some(-2));
    manager.clear();
    assert!(!manager.can_redo());
}

#[test]
fn multi_edit_inverse() {
    let mut tree = InputTree::new(input_row!((row "a")));
    let caret_before = EditingCaret::collapsed(at(vec![], 1));
    let caret_after = EditingCaret::collapsed(at(vec![], 2));
    let edit = MultiEdit {
        carets_before: vec![caret_before.serialize()],
        carets_after: vec![caret_after.serialize()],
        edits: vec![input_tree::editing::BasicEdit::Insert {
            position: at(vec![], 1),
            values: vec![InputNode::symbol("b")],
        }],
    };
    assert_eq!(edit.inverse().inverse(), edit);

    let carets = apply_multi_edit(&mut tree, &edit).unwrap();
    assert_eq!(tree.root, input_row!((row "a", "b")));
    assert_eq!(carets, vec![caret_after]);

    let carets = apply_multi_edit(&mut tree, &edit.inverse()).unwrap();
    assert_eq!(tree.root, input_row!((row "a")));
    assert_eq!(carets, vec![caret_before]);

    // The caret does not fit, so nothing happens
    let broken = MultiEdit {
        carets_after: vec![EditingCaret::collapsed(at(vec![], 9)).serialize()],
        ..edit
    };
    assert!(apply_multi_edit(&mut tree, &broken).is_err());
    assert_eq!(tree.root, input_row!((row "a")));
}

#[test]
fn copy_and_paste() {
    let mut editor = MathEditor::with_root(
        EditorSettings::default(),
        input_row!((row "a", (sup (row "2")))),
    );
    editor.select_all();
    let copied = editor.copy(SerializedDataType::JsonInputTree).unwrap();
    assert_eq!(
        deserialize_input_nodes(&copied, None).unwrap(),
        vec![input_node!("a"), input_node!((sup (row "2")))]
    );

    // Pasting replaces the selection
    editor.paste(r#"[{"Symbol":"x"},{"Nonsense":1}]"#, None).unwrap();
    assert_eq!(
        editor.tree().root,
        input_row!((row "x", (error r#"{"Nonsense":1}"#)))
    );
    assert_eq!(caret_positions(&editor), vec![at(vec![], 2)]);

    assert!(editor.paste_strict(r#"[{"Nonsense":1}]"#, None).is_err());
    assert!(editor.undo().unwrap());
    assert_eq!(editor.tree().root, input_row!((row "a", (sup (row "2")))));
}

#[test]
fn copy_part_of_a_table() {
    let mut editor = MathEditor::with_root(
        EditorSettings::default(),
        input_row!((row (table 2 x 2 (row "a"), (row "b"), (row "c"), (row "d")))),
    );
    editor.start_selection(at(vec![(0, 1)], 0));
    editor.extend_selection(at(vec![(0, 3)], 1));
    editor.finish_selection(false);
    assert!(matches!(
        editor.get_carets().as_slice(),
        [MinimalCaretSelection::Grid(_)]
    ));

    let copied = editor.copy(SerializedDataType::JsonInputTree).unwrap();
    assert_eq!(
        deserialize_input_nodes(&copied, None).unwrap(),
        vec![input_node!((table 1 x 2 (row "b"), (row "d")))]
    );
}

#[test]
fn splice_moves_carets_along() {
    let mut editor = MathEditor::with_root(EditorSettings::default(), input_row!((row "a", "b")));
    editor.start_selection(at(vec![], 2));
    editor.finish_selection(false);
    editor
        .splice_at_range(
            MinimalInputRowRange::new(RowIndices::default(), Offset(0), Offset(1)),
            InputNode::symbols(vec!["x", "y", "z"]),
        )
        .unwrap();
    assert_eq!(editor.tree().root, input_row!((row "x", "y", "z", "b")));
    assert_eq!(caret_positions(&editor), vec![at(vec![], 4)]);

    assert!(editor.undo().unwrap());
    assert_eq!(editor.tree().root, input_row!((row "a", "b")));
    assert_eq!(caret_positions(&editor), vec![at(vec![], 2)]);
}

#[test]
fn settings_from_json() {
    let settings = EditorSettings::from_json(r#"{"keepXPosition":true}"#).unwrap();
    assert!(settings.keep_x_position);
    assert_eq!(settings.max_undo_steps, Some(1000));
    assert!(settings.navigation_settings().keep_x_position);

    let settings = EditorSettings::from_json(r#"{"maxUndoSteps":null}"#).unwrap();
    assert!(!settings.keep_x_position);
    assert_eq!(settings.max_undo_steps, None);

    assert!(EditorSettings::from_json("42").is_err());
}

#[test]
fn redo_with_tracked_token() {
    let mut editor = MathEditor::with_root(EditorSettings::default(), input_row!((row "a", "b")));
    editor.set_syntax_lookup(Box::new(WholeRow));
    editor.move_caret(Direction::Right, &NoViewport).unwrap();
    editor.move_caret(Direction::Right, &NoViewport).unwrap();

    editor.remove_at_caret(CaretRemoveMode::Left).unwrap();
    assert_eq!(editor.tree().root, input_row!((row "a")));
    let caret = &editor.carets().carets()[0];
    assert_eq!(
        caret.current_tokens,
        Some(MinimalInputRowRange::new(
            RowIndices::default(),
            Offset(0),
            Offset(1)
        ))
    );

    assert!(editor.undo().unwrap());
    assert_eq!(editor.tree().root, input_row!((row "a", "b")));
    assert!(editor.redo().unwrap());
    assert_eq!(editor.tree().root, input_row!((row "a")));
    assert_eq!(caret_positions(&editor), vec![at(vec![], 1)]);
    assert_eq!(editor.carets().carets()[0].current_tokens, caret_tokens(&editor));

    type_text(&mut editor, "cd");
    assert_eq!(
        editor.carets().carets()[0].current_tokens,
        Some(MinimalInputRowRange::new(
            RowIndices::default(),
            Offset(0),
            Offset(3)
        ))
    );
    assert!(editor.undo().unwrap());
    assert!(editor.undo().unwrap());
    assert!(editor.redo().unwrap());
    assert!(editor.redo().unwrap());
    assert_eq!(editor.tree().root, input_row!((row "a", "c", "d")));
    assert_eq!(caret_positions(&editor), vec![at(vec![], 3)]);
}

fn caret_tokens(editor: &MathEditor) -> Option<MinimalInputRowRange> {
    Some(MinimalInputRowRange::new(
        RowIndices::default(),
        Offset(0),
        Offset(editor.tree().root.len()),
    ))
}
