use std::ops::Range;

use input_tree::{
    focus::{MinimalInputRowPosition, MinimalInputRowRange},
    row::{InputRow, Offset, RowIndices},
};

/// The parts of a syntax tree that the editor cares about.
/// Ranges are offsets relative to the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub range: Range<usize>,
    pub children: SyntaxNodeChildren,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNodeChildren {
    /// Sorted, contiguous child nodes on the same row
    Containers(Vec<SyntaxNode>),
    /// A token
    Leaf,
    /// The node starts new rows, like a fraction does
    NewRows,
}

impl SyntaxNode {
    pub fn new(range: Range<usize>, children: SyntaxNodeChildren) -> Self {
        if let SyntaxNodeChildren::Containers(children) = &children {
            assert!(children
                .iter()
                .all(|child| range.start <= child.range.start && child.range.end <= range.end));
        }
        Self { range, children }
    }

    pub fn leaf(range: Range<usize>) -> Self {
        Self::new(range, SyntaxNodeChildren::Leaf)
    }

    /// Finds the token that touches the offset. Prefers the token to the left of the offset,
    /// since that is the one that is being typed.
    pub fn token_at(&self, offset: usize) -> Option<Range<usize>> {
        if offset < self.range.start || offset > self.range.end {
            return None;
        }
        match &self.children {
            SyntaxNodeChildren::Leaf => Some(self.range.clone()),
            SyntaxNodeChildren::NewRows => None,
            SyntaxNodeChildren::Containers(children) => {
                children.iter().find_map(|child| child.token_at(offset))
            }
        }
    }
}

/// Provided by the parser. Parses a row of the input tree.
pub trait SyntaxLookup {
    fn syntax_node(&self, row: &InputRow, row_indices: &RowIndices) -> Option<SyntaxNode>;

    /// The range of the token that a caret is at.
    fn current_token(
        &self,
        row: &InputRow,
        position: &MinimalInputRowPosition,
    ) -> Option<MinimalInputRowRange> {
        let token = self
            .syntax_node(row, &position.row_indices)?
            .token_at(position.offset.0)?;
        Some(MinimalInputRowRange::new(
            position.row_indices.clone(),
            Offset(token.start),
            Offset(token.end),
        ))
    }
}

/// No parser
impl SyntaxLookup for () {
    fn syntax_node(&self, _row: &InputRow, _row_indices: &RowIndices) -> Option<SyntaxNode> {
        None
    }
}
