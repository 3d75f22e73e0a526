use input_tree::{error::InputTreeError, grid::GridError, node::InputNodeError};
use serialization::SerializationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Tree(#[from] InputTreeError),
    #[error(transparent)]
    Node(#[from] InputNodeError),
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("could not read the editor settings")]
    Settings(#[from] serde_json::Error),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}
