use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{grid::Grid, print_helpers::write_with_escaped_double_quotes};

use super::row::InputRow;

/// A node in a row. Either a container with rows inside of it, or an atomic leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedInputNode")]
pub enum InputNode {
    /// A container with a type
    Container(InputNodeVariant, Grid<InputRow>),
    /// Leaf node
    /// Stores a NFD-normalized grapheme cluster.
    /// Basically a single character from the perspective of the user.
    Symbol(String),
    /// Leaf node for input that could not be understood.
    /// It stays in the tree, so that the user can still move around it and delete it.
    Error(String),
}

// Could be extended with constructs like <mmultiscripts>
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub enum InputNodeVariant {
    /// A fraction, like $\frac{1}{2}$
    Fraction,
    /// Root, like a square root. The first row is the index, the second row is the radicand.
    Root,
    /// Behaves like the underset LaTeX command
    Under,
    /// Overset
    Over,
    /// Superscript
    Sup,
    /// Subscript
    Sub,
    /// Every table cell is its own row, since they can contain arbitrary elements.
    /// When you select a part of table, you're actually selecting every single table cell.
    /// The selection joining part makes it behave as expected.
    /// And the rendering part makes it look like you're selecting the table.
    Table,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputNodeError {
    #[error("a {variant} needs a {expected_width}x{expected_height} grid, got {width}x{height}")]
    WrongShape {
        variant: InputNodeVariant,
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
    #[error("a table needs at least one cell")]
    EmptyTable,
}

#[derive(Deserialize)]
enum UncheckedInputNode {
    Container(InputNodeVariant, Grid<InputRow>),
    Symbol(String),
    Error(String),
}

impl TryFrom<UncheckedInputNode> for InputNode {
    type Error = InputNodeError;

    fn try_from(value: UncheckedInputNode) -> Result<Self, InputNodeError> {
        match value {
            UncheckedInputNode::Container(variant, grid) => InputNode::container(variant, grid),
            UncheckedInputNode::Symbol(value) => Ok(InputNode::Symbol(value)),
            UncheckedInputNode::Error(value) => Ok(InputNode::Error(value)),
        }
    }
}

impl InputNode {
    pub fn fraction(values: [InputRow; 2]) -> Self {
        // A fraction is a vertical stack of two rows
        InputNode::Container(
            InputNodeVariant::Fraction,
            Grid::from_one_dimensional(values.to_vec(), 1),
        )
    }

    pub fn root(values: [InputRow; 2]) -> Self {
        InputNode::Container(
            InputNodeVariant::Root,
            Grid::from_one_dimensional(values.to_vec(), 1),
        )
    }

    pub fn under(values: [InputRow; 2]) -> Self {
        InputNode::Container(
            InputNodeVariant::Under,
            Grid::from_one_dimensional(values.to_vec(), 1),
        )
    }

    pub fn over(values: [InputRow; 2]) -> Self {
        InputNode::Container(
            InputNodeVariant::Over,
            Grid::from_one_dimensional(values.to_vec(), 1),
        )
    }

    pub fn sup(value: InputRow) -> Self {
        InputNode::Container(
            InputNodeVariant::Sup,
            Grid::from_one_dimensional(vec![value], 1),
        )
    }

    pub fn sub(value: InputRow) -> Self {
        InputNode::Container(
            InputNodeVariant::Sub,
            Grid::from_one_dimensional(vec![value], 1),
        )
    }

    pub fn table(values: Vec<InputRow>, width: usize) -> Self {
        assert!(!values.is_empty(), "A table needs at least one cell");
        InputNode::Container(
            InputNodeVariant::Table,
            Grid::from_one_dimensional(values, width),
        )
    }

    /// Checked constructor, used when the shape of the grid is not known up front.
    pub fn container(
        variant: InputNodeVariant,
        grid: Grid<InputRow>,
    ) -> Result<Self, InputNodeError> {
        match variant.fixed_size() {
            Some((expected_width, expected_height))
                if grid.size() != (expected_width, expected_height) =>
            {
                Err(InputNodeError::WrongShape {
                    variant,
                    expected_width,
                    expected_height,
                    width: grid.width(),
                    height: grid.height(),
                })
            }
            None if grid.is_empty() => Err(InputNodeError::EmptyTable),
            _ => Ok(InputNode::Container(variant, grid)),
        }
    }

    pub fn symbol<T: Into<String>>(value: T) -> Self {
        Self::Symbol(value.into())
    }

    pub fn error<T: Into<String>>(value: T) -> Self {
        InputNode::Error(value.into())
    }

    pub fn symbols<T: Into<String>>(values: Vec<T>) -> Vec<Self> {
        values
            .into_iter()
            .map(|value| Self::Symbol(value.into()))
            .collect()
    }

    /// How many caret positions are inside of this node.
    /// Containers do not add any of their own, only their rows do.
    pub fn offset_count(&self) -> usize {
        match self {
            InputNode::Container(_, grid) => {
                grid.values().iter().map(InputRow::offset_count).sum()
            }
            InputNode::Symbol(_) | InputNode::Error(_) => 0,
        }
    }

    pub fn rows(&self) -> &[InputRow] {
        match self {
            InputNode::Container(_, grid) => grid.values(),
            InputNode::Symbol(_) | InputNode::Error(_) => &[],
        }
    }

    pub fn has_resizable_grid(&self) -> bool {
        match self {
            InputNode::Container(variant, _) => variant.has_resizable_grid(),
            InputNode::Symbol(_) | InputNode::Error(_) => false,
        }
    }

    pub fn grid(&self) -> Option<&Grid<InputRow>> {
        match self {
            InputNode::Container(_, grid) => Some(grid),
            InputNode::Symbol(_) | InputNode::Error(_) => None,
        }
    }

    pub fn variant(&self) -> Option<InputNodeVariant> {
        match self {
            InputNode::Container(variant, _) => Some(*variant),
            InputNode::Symbol(_) | InputNode::Error(_) => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.grid().is_none()
    }
}

impl fmt::Display for InputNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputNode::Container(container_type, rows) => {
                write!(f, "({} {})", container_type, rows)?;
            }
            InputNode::Symbol(value) => {
                write!(f, "\"")?;
                write_with_escaped_double_quotes(value, f)?;
                write!(f, "\"")?;
            }
            InputNode::Error(value) => {
                write!(f, "(error \"")?;
                write_with_escaped_double_quotes(value, f)?;
                write!(f, "\")")?;
            }
        }
        Ok(())
    }
}

impl InputNodeVariant {
    pub fn has_resizable_grid(&self) -> bool {
        self.fixed_size().is_none()
    }

    /// The `(width, height)` that a container of this type must have. Tables can have any size.
    pub fn fixed_size(&self) -> Option<(usize, usize)> {
        match self {
            InputNodeVariant::Fraction
            | InputNodeVariant::Root
            | InputNodeVariant::Under
            | InputNodeVariant::Over => Some((1, 2)),
            InputNodeVariant::Sup | InputNodeVariant::Sub => Some((1, 1)),
            InputNodeVariant::Table => None,
        }
    }
}

impl fmt::Display for InputNodeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputNodeVariant::Fraction => write!(f, "frac"),
            InputNodeVariant::Root => write!(f, "root"),
            InputNodeVariant::Under => write!(f, "under"),
            InputNodeVariant::Over => write!(f, "over"),
            InputNodeVariant::Sup => write!(f, "sup"),
            InputNodeVariant::Sub => write!(f, "sub"),
            InputNodeVariant::Table => write!(f, "table"),
        }
    }
}
