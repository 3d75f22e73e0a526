use input_tree::editing::editable::Editable;
use input_tree::editing::invertible::Invertible;
use input_tree::editing::*;
use input_tree::error::InputTreeError;
use input_tree::focus::*;
use input_tree::input_node;
use input_tree::input_row;
use input_tree::input_tree::InputTree;
use input_tree::node::*;
use input_tree::row::*;

fn root_position(offset: usize) -> MinimalInputRowPosition {
    MinimalInputRowPosition::root(Offset(offset))
}

#[test]
fn insert_into_empty() {
    let mut input = InputTree::new(InputRow::new(vec![]));
    let insert_edit = BasicEdit::Insert {
        position: root_position(0),
        values: vec![InputNode::symbol("b")],
    };
    input.apply_edit(&insert_edit).unwrap();
    assert_eq!(input.root, input_row!((row "b")));
}

#[test]
fn insert_into_non_empty() {
    let mut input = InputTree::new(input_row!((row "a", (sub (row "1")))));
    let insert_edit = BasicEdit::Insert {
        position: root_position(1),
        values: vec![InputNode::symbol("x")],
    };
    input.apply_edit(&insert_edit).unwrap();
    assert_eq!(input.root, input_row!((row "a", "x", (sub (row "1")))));
}

#[test]
fn delete_nested() {
    let mut input = InputTree::new(input_row!((row "a", (sub (row "-", "-", "1")))));
    let delete_edit = BasicEdit::Delete {
        position: MinimalInputRowPosition::new(RowIndices::new(vec![RowIndex(1, 0)]), Offset(0)),
        values: InputNode::symbols(vec!["-", "-"]),
    };
    input.apply_edit(&delete_edit).unwrap();
    assert_eq!(input.root, input_row!((row "a", (sub (row "1")))));
    assert_eq!(input.offset_count(), 5);
}

#[test]
fn invert_edit() {
    let original = input_row!((row "a"));
    let mut input = InputTree::new(original.clone());
    let insert_edit = BasicEdit::Insert {
        position: root_position(1),
        values: vec![input_node!((frac (row "b"), (row "c")))],
    };
    input.apply_edit(&insert_edit).unwrap();
    assert_eq!(input.root, input_row!((row "a", (frac (row "b"), (row "c")))));

    input.apply_edit(&insert_edit.inverse()).unwrap();
    assert_eq!(input.root, original);
    assert_eq!(insert_edit.inverse().inverse(), insert_edit);
}

#[test]
fn invert_edit_list() {
    let original = input_row!((row "a", "b", (sup (row "2"))));
    let mut input = InputTree::new(original.clone());
    let edits = vec![
        BasicEdit::Delete {
            position: root_position(0),
            values: InputNode::symbols(vec!["a", "b"]),
        },
        BasicEdit::Insert {
            position: MinimalInputRowPosition::new(
                RowIndices::new(vec![RowIndex(0, 0)]),
                Offset(1),
            ),
            values: InputNode::symbols(vec!["3"]),
        },
    ];
    input.apply_edits(&edits).unwrap();
    assert_eq!(input.root, input_row!((row (sup (row "2", "3")))));

    let inverse = edits.inverse();
    assert_eq!(inverse.len(), 2);
    assert!(matches!(inverse[0], BasicEdit::Delete { .. }));
    input.apply_edits(&inverse).unwrap();
    assert_eq!(input.root, original);
}

#[test]
fn failed_edits_are_not_committed() {
    let original = input_row!((row "a", "b"));
    let mut input = InputTree::new(original.clone());
    let edits = vec![
        BasicEdit::Insert {
            position: root_position(2),
            values: InputNode::symbols(vec!["c"]),
        },
        BasicEdit::Insert {
            position: MinimalInputRowPosition::new(
                RowIndices::new(vec![RowIndex(0, 0)]),
                Offset(0),
            ),
            values: InputNode::symbols(vec!["d"]),
        },
    ];
    assert!(matches!(
        input.apply_edits(&edits),
        Err(InputTreeError::InvalidPath { .. })
    ));
    assert_eq!(input.root, original);
}

#[test]
fn delete_checks_values() {
    let mut input = InputTree::new(input_row!((row "a", "b")));
    let edit = BasicEdit::Delete {
        position: root_position(0),
        values: InputNode::symbols(vec!["b"]),
    };
    assert_eq!(
        input.apply_edit(&edit),
        Err(InputTreeError::ValueMismatch {
            row_indices: RowIndices::default()
        })
    );
}

#[test]
fn edit_builders() {
    let tree = InputTree::new(input_row!((row "a", "b", "c")));
    let range = InputRowRange::new(tree.root_zipper(), Offset(3), Offset(1));

    let (edits, position) = BasicEdit::remove_range(&range);
    assert_eq!(position, root_position(1));
    assert_eq!(
        edits,
        vec![BasicEdit::Delete {
            position: root_position(1),
            values: InputNode::symbols(vec!["b", "c"]),
        }]
    );

    let (edits, range) = BasicEdit::replace_range(&range, InputNode::symbols(vec!["x"]));
    assert_eq!(edits.len(), 2);
    assert_eq!(range, MinimalInputRowRange::new(RowIndices::default(), Offset(1), Offset(2)));
    let mut edited = tree.clone();
    edited.apply_edits(&edits).unwrap();
    assert_eq!(edited.root, input_row!((row "a", "x")));

    let start = InputRowPosition::new(tree.root_zipper(), Offset(0));
    let (edits, position) = BasicEdit::insert_at_position(&start, vec![]);
    assert!(edits.is_empty());
    assert_eq!(position, root_position(0));
}

#[test]
fn insert_moves_caret_after_insertion_point() {
    // "a|b", insert "x" at the caret
    let mut input = InputTree::new(input_row!((row "a", "b")));
    let mut caret = root_position(1);
    let edit = BasicEdit::Insert {
        position: root_position(1),
        values: InputNode::symbols(vec!["x"]),
    };
    input.apply_edit(&edit).unwrap();
    caret.apply_edit(&edit);

    assert_eq!(input.root, input_row!((row "a", "x", "b")));
    assert_eq!(caret, root_position(2));
}

#[test]
fn insert_moves_other_carets() {
    let edit = BasicEdit::Insert {
        position: root_position(1),
        values: InputNode::symbols(vec!["x", "y"]),
    };
    let mut carets = vec![root_position(0), root_position(1), root_position(4)];
    carets.iter_mut().for_each(|caret| caret.apply_edit(&edit));
    assert_eq!(
        carets,
        vec![root_position(0), root_position(3), root_position(6)]
    );
}

#[test]
fn remove_shrinks_range() {
    let mut input = InputTree::new(input_row!((row "a", "-", "-", "1")));
    let remove_edit = BasicEdit::Delete {
        position: root_position(0),
        values: InputNode::symbols(vec!["a", "-", "-"]),
    };

    let mut range = InputRowRange::new(input.root_zipper(), Offset(1), Offset(4)).to_minimal();
    input.apply_edit(&remove_edit).unwrap();
    range.apply_edit(&remove_edit);

    let range = InputRowRange::from_minimal(&input.root, &range).unwrap();
    assert_eq!(range.start, Offset(0));
    assert_eq!(range.end, Offset(1));
    assert_eq!(range.row_indices(), RowIndices::default());
}

#[test]
fn nested_carets_follow_their_container() {
    let inside = MinimalInputRowPosition::new(RowIndices::new(vec![RowIndex(2, 1)]), Offset(1));

    let mut moved = inside.clone();
    moved.apply_edit(&BasicEdit::Insert {
        position: root_position(2),
        values: InputNode::symbols(vec!["x"]),
    });
    assert_eq!(moved.row_indices, RowIndices::new(vec![RowIndex(3, 1)]));

    let mut unchanged = inside.clone();
    unchanged.apply_edit(&BasicEdit::Insert {
        position: root_position(3),
        values: InputNode::symbols(vec!["x"]),
    });
    assert_eq!(unchanged, inside);

    let mut shifted_back = inside.clone();
    shifted_back.apply_edit(&BasicEdit::Delete {
        position: root_position(0),
        values: InputNode::symbols(vec!["a", "b"]),
    });
    assert_eq!(
        shifted_back,
        MinimalInputRowPosition::new(RowIndices::new(vec![RowIndex(0, 1)]), Offset(1))
    );
}

#[test]
fn carets_in_deleted_content_are_evicted() {
    let fraction = input_node!((frac (row "1"), (row "2", "3")));
    let inside = MinimalInputRowPosition::new(
        RowIndices::new(vec![RowIndex(1, 1), RowIndex(0, 0)]),
        Offset(2),
    );
    let mut caret = inside;
    caret.apply_edit(&BasicEdit::Delete {
        position: root_position(1),
        values: vec![fraction],
    });
    assert_eq!(caret, root_position(1));
}

#[test]
fn unrelated_rows_are_untouched() {
    let caret = MinimalInputRowPosition::new(RowIndices::new(vec![RowIndex(0, 0)]), Offset(1));
    let mut edited = caret.clone();
    edited.apply_edit(&BasicEdit::Insert {
        position: MinimalInputRowPosition::new(RowIndices::new(vec![RowIndex(0, 1)]), Offset(0)),
        values: InputNode::symbols(vec!["x"]),
    });
    assert_eq!(edited, caret);
}
