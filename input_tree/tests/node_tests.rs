use input_tree::grid::*;
use input_tree::input_row;
use input_tree::node::*;
use input_tree::row::*;

fn check_offset_counts(row: &InputRow) {
    let expected = row.len() + 1 + row.values().iter().map(|v| v.offset_count()).sum::<usize>();
    assert_eq!(row.offset_count(), expected);
    for node in row.values() {
        let rows_sum: usize = node.rows().iter().map(|r| r.offset_count()).sum();
        assert_eq!(node.offset_count(), rows_sum);
        node.rows().iter().for_each(check_offset_counts);
    }
}

#[test]
fn offset_count_of_flat_row() {
    let row = input_row!((row "a", "b", "c"));
    assert_eq!(row.offset_count(), 4);
    assert_eq!(InputRow::default().offset_count(), 1);
}

#[test]
fn offset_count_of_nested_rows() {
    let row = input_row! {
        (row "a", (frac (row "1"), (row)), (table 2 x 1 (row "x", "y"), (row)))
    };
    // fraction: 2 + 1, table: 3 + 1, row: 3 nodes + 1
    assert_eq!(row.values()[1].offset_count(), 3);
    assert_eq!(row.values()[2].offset_count(), 4);
    assert_eq!(row.offset_count(), 4 + 3 + 4);
    check_offset_counts(&row);
}

#[test]
fn leaves_have_no_offsets() {
    assert_eq!(InputNode::symbol("a").offset_count(), 0);
    assert_eq!(InputNode::error("?").offset_count(), 0);
    assert!(InputNode::error("?").is_leaf());
}

#[test]
fn checked_container_shapes() {
    let two_rows = Grid::from_one_dimensional(vec![InputRow::default(), InputRow::default()], 1);
    assert!(InputNode::container(InputNodeVariant::Fraction, two_rows.clone()).is_ok());
    assert_eq!(
        InputNode::container(InputNodeVariant::Sup, two_rows.clone()),
        Err(InputNodeError::WrongShape {
            variant: InputNodeVariant::Sup,
            expected_width: 1,
            expected_height: 1,
            width: 1,
            height: 2,
        })
    );
    let wide = Grid::from_one_dimensional(vec![InputRow::default(), InputRow::default()], 2);
    assert!(InputNode::container(InputNodeVariant::Root, wide.clone()).is_err());
    assert!(InputNode::container(InputNodeVariant::Table, wide).is_ok());
    assert_eq!(
        InputNode::container(InputNodeVariant::Table, Grid::from_one_dimensional(vec![], 1)),
        Err(InputNodeError::EmptyTable)
    );
}

#[test]
fn grid_index_conversions() {
    let grid = Grid::from_one_dimensional((0..6).collect::<Vec<_>>(), 3);
    assert_eq!(grid.size(), (3, 2));
    assert_eq!(grid.index_to_xy(4), Index2D { x: 1, y: 1 });
    assert_eq!(grid.xy_to_index(Index2D { x: 2, y: 0 }), 2);
    assert_eq!(grid.get(Index2D { x: 3, y: 0 }), None);
    assert_eq!(grid.vertical_neighbour(4, false), Some(1));
    assert_eq!(grid.vertical_neighbour(4, true), None);
    assert_eq!(grid.vertical_neighbour(1, false), None);
    assert_eq!(
        Grid::try_from_one_dimensional(vec![1, 2, 3], 2),
        Err(GridError::NotRectangular { count: 3, width: 2 })
    );
    assert_eq!(
        Grid::<usize>::try_from_one_dimensional(vec![], 0),
        Err(GridError::ZeroWidth)
    );
}

#[test]
fn serde_keeps_offset_counts() {
    let row = input_row!((row "a", (sub (row "1", "2")), (error "x")));
    let json = serde_json::to_string(&row).unwrap();
    let decoded: InputRow = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, row);
    assert_eq!(decoded.offset_count(), row.offset_count());
}

#[test]
fn serde_rejects_malformed_containers() {
    let wrong_shape = r#"{"Container":["Fraction",{"values":[{"values":[]}],"width":1}]}"#;
    assert!(serde_json::from_str::<InputNode>(wrong_shape).is_err());

    let zero_width = r#"{"Container":["Table",{"values":[],"width":0}]}"#;
    assert!(serde_json::from_str::<InputNode>(zero_width).is_err());

    let ok = r#"{"Container":["Sup",{"values":[{"values":[{"Symbol":"2"}]}],"width":1}]}"#;
    assert_eq!(
        serde_json::from_str::<InputNode>(ok).unwrap(),
        InputNode::sup(input_row!((row "2")))
    );
}
