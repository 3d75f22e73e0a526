mod caret_edit;
mod movement;
pub mod primitive_edit;

pub use caret_edit::*;
pub use movement::*;
