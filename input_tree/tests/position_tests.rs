use input_tree::focus::*;
use input_tree::error::InputTreeError;
use input_tree::grid::Offset2D;
use input_tree::input_row;
use input_tree::input_tree::InputTree;
use input_tree::row::*;

fn all_positions(root: &InputRow) -> Vec<InputRowPosition> {
    (0..root.offset_count())
        .map(|absolute| InputRowPosition::from_absolute_offset(root, absolute).unwrap())
        .collect()
}

#[test]
fn test_positions_ordered() {
    let input = input_row!((row "a", (sub (row "1"))));
    let zipper = InputRowZipper::from_root(input);

    let position_start = InputRowPosition::new(zipper.clone(), Offset(0));
    let position_middle = InputRowPosition::new(zipper.clone(), Offset(1));
    let position_end = InputRowPosition::new(zipper.clone(), Offset(2));
    let position_end_again = InputRowPosition::new(zipper, Offset(2));

    assert!(position_start < position_middle);
    assert!(position_middle < position_end);
    assert!(position_end == position_end_again);
}

#[test]
fn test_positions_nested_ordered() {
    let input = input_row!((row "a", (sub (row "1"))));
    let zipper = InputRowZipper::from_root(input);

    let position_middle = InputRowPosition::new(zipper.clone(), Offset(1));
    let position_inside = InputRowPosition::new(zipper.row_at((1, 0)).unwrap(), Offset(0));
    let position_inside_end = InputRowPosition::new(zipper.row_at((1, 0)).unwrap(), Offset(1));
    let position_end = InputRowPosition::new(zipper, Offset(2));

    assert!(position_middle < position_inside);
    assert!(position_inside < position_inside_end);
    assert!(position_inside_end < position_end);
}

#[test]
fn order_agrees_with_absolute_offsets() {
    let root = input_row! {
        (row "a", (frac (row (sup (row "2"))), (row)), "b", (table 2 x 2 (row), (row "x"), (row), (row)))
    };
    let positions = all_positions(&root);
    for (i, a) in positions.iter().enumerate() {
        assert_eq!(a.to_absolute_offset(), i);
        for (j, b) in positions.iter().enumerate() {
            assert_eq!(a.cmp(b), i.cmp(&j), "{:?} vs {:?}", a.to_minimal(), b.to_minimal());
            assert_eq!(a.to_minimal().cmp(&b.to_minimal()), i.cmp(&j));
        }
    }
}

#[test]
fn minimal_round_trip() {
    let root = input_row!((row "a", (frac (row "1"), (row "2", "3"))));
    for position in all_positions(&root) {
        let minimal = position.to_minimal();
        let restored = InputRowPosition::from_minimal(&root, &minimal).unwrap();
        assert_eq!(restored, position);
    }
    let too_far = MinimalInputRowPosition::new(RowIndices::new(vec![RowIndex(1, 0)]), Offset(2));
    assert!(InputRowPosition::from_minimal(&root, &too_far).is_err());
}

#[test]
fn range_values_and_contains() {
    let root = input_row!((row "a", "b", (sub (row "1")), "c"));
    let zipper = InputRowZipper::from_root(root.clone());
    let range = InputRowRange::new(zipper.clone(), Offset(3), Offset(1));

    assert!(!range.is_forwards());
    assert_eq!(range.left_offset(), Offset(1));
    assert_eq!(range.right_offset(), Offset(3));
    assert_eq!(range.values(), &root.values()[1..3]);

    let inside = InputRowPosition::new(zipper.row_at((2, 0)).unwrap(), Offset(1));
    assert!(range.contains(&inside));
    assert!(range.to_minimal().contains_position(&inside.to_minimal()));
    assert!(!range.contains(&InputRowPosition::new(zipper, Offset(4))));
}

#[test]
fn shared_range_across_rows() {
    let tree = InputTree::new(input_row!((row "a", (frac (row "1"), (row "2")), "b")));
    let root = tree.root_zipper();
    let numerator = InputRowPosition::new(root.row_at((1, 0)).unwrap(), Offset(1));
    let denominator = InputRowPosition::new(root.row_at((1, 1)).unwrap(), Offset(0));
    let after = InputRowPosition::new(root.clone(), Offset(3));

    let range = tree.range_from_positions(&numerator, &denominator);
    assert_eq!(range.row_indices(), RowIndices::default());
    assert_eq!((range.start, range.end), (Offset(1), Offset(2)));

    let range = tree.range_from_positions(&after, &numerator);
    assert_eq!((range.start, range.end), (Offset(3), Offset(1)));

    let range = tree.range_from_positions(&after, &after);
    assert!(range.is_collapsed());
}

#[test]
fn grid_range_cells() {
    let root = input_row!((row "a", (table 3 x 2 (row), (row), (row), (row), (row), (row))));
    let table = InputRowZipper::from_root(root.clone()).container_at(1).unwrap();
    let range = InputGridRange::new(table, Offset2D::from((2, 2)), Offset2D::from((1, 0)));

    assert_eq!(range.top_left_index(), Offset2D::from((1, 0)));
    assert_eq!(range.bottom_right_index(), Offset2D::from((2, 2)));
    assert_eq!(range.cell_indices(), vec![1, 4]);

    let minimal = range.to_minimal();
    assert_eq!(minimal.index, 1);
    assert_eq!(InputGridRange::from_minimal(&root, &minimal).unwrap(), range);
}

#[test]
fn stale_grid_range_is_refused() {
    let root = input_row!((row "a", (table 2 x 2 (row), (row), (row), (row)), (frac (row), (row))));
    let minimal = MinimalInputGridRange {
        row_indices: RowIndices::default(),
        index: 1,
        start: Offset2D::from((0, 0)),
        end: Offset2D::from((5, 5)),
    };
    assert!(matches!(
        InputGridRange::from_minimal(&root, &minimal),
        Err(InputTreeError::InvalidGridOffset {
            width: 2,
            height: 2,
            ..
        })
    ));

    // Only tables can have a grid selection
    let fraction = MinimalInputGridRange {
        index: 2,
        end: Offset2D::from((1, 1)),
        ..minimal.clone()
    };
    assert!(matches!(
        InputGridRange::from_minimal(&root, &fraction),
        Err(InputTreeError::InvalidIndex { index: 2, .. })
    ));

    // Not a container at all
    let symbol = MinimalInputGridRange {
        index: 0,
        ..fraction
    };
    assert!(InputGridRange::from_minimal(&root, &symbol).is_err());

    let fitting = MinimalInputGridRange {
        end: Offset2D::from((2, 2)),
        ..minimal
    };
    assert_eq!(
        InputGridRange::from_minimal(&root, &fitting).unwrap().cell_indices(),
        vec![0, 1, 2, 3]
    );
}
