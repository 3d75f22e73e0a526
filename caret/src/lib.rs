pub mod caret;
pub mod caret_manager;
pub mod editing_caret;
pub mod error;
pub mod math_editor;
pub mod primitive;
pub mod render;
pub mod settings;
pub mod syntax;
pub mod undo_redo_manager;
