mod basic_edit;
pub mod editable;
pub mod invertible;

pub use basic_edit::*;
