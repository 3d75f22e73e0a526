pub mod direction;
pub mod editing;
pub mod error;
pub mod focus;
pub mod grid;
pub mod input_tree;
pub mod node;
pub mod print_helpers;
pub mod row;
mod row_macros;
