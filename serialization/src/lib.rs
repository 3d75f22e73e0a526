use input_tree::node::InputNode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The format version that this crate writes.
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub enum SerializedDataType {
    JsonInputTree,
}

#[derive(Deserialize, Serialize)]
struct SerializedData<T> {
    version: u32,
    data: T,
}

#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("Could not (de)serialize as JSON")]
    JsonInputTree(#[from] serde_json::Error),
    #[error("Unsupported format version {0}")]
    UnsupportedVersion(u32),
}

// Later we could also serialize the parse tree, and do smort things like "warning: definition of e has changed"
pub fn serialize_input_nodes(
    nodes: &[InputNode],
    data_type: SerializedDataType,
) -> Result<String, SerializationError> {
    let data = &SerializedData {
        version: CURRENT_VERSION,
        data: nodes,
    };
    match data_type {
        SerializedDataType::JsonInputTree => Ok(serde_json::to_string(data)?),
    }
}

/// Strict decoding. Fails if any node is malformed.
pub fn deserialize_input_nodes(
    data: &str,
    data_type: Option<SerializedDataType>,
) -> Result<Vec<InputNode>, SerializationError> {
    match data_type {
        Some(SerializedDataType::JsonInputTree) => {
            let data: SerializedData<Vec<InputNode>> = serde_json::from_str(data)?;
            check_version(data.version)?;
            Ok(data.data)
        }
        None => {
            // Auto-detect the data type
            match deserialize_input_nodes(data, Some(SerializedDataType::JsonInputTree)) {
                Ok(nodes) => Ok(nodes),
                Err(error @ SerializationError::UnsupportedVersion(_)) => Err(error),
                Err(error) => {
                    log::debug!("Not an input tree envelope, trying a plain list of nodes");
                    serde_json::from_str::<Vec<InputNode>>(data).map_err(|_| error)
                }
            }
        }
    }
}

/// Lenient decoding. Every top level node that cannot be decoded becomes an [`InputNode::Error`] with the raw JSON text.
/// The envelope itself still has to be valid.
pub fn deserialize_input_nodes_lenient(
    data: &str,
    data_type: Option<SerializedDataType>,
) -> Result<Vec<InputNode>, SerializationError> {
    let values: Vec<serde_json::Value> = match data_type {
        Some(SerializedDataType::JsonInputTree) => {
            let data: SerializedData<Vec<serde_json::Value>> = serde_json::from_str(data)?;
            check_version(data.version)?;
            data.data
        }
        None => match deserialize_input_nodes_lenient(data, Some(SerializedDataType::JsonInputTree)) {
            Ok(nodes) => return Ok(nodes),
            Err(error @ SerializationError::UnsupportedVersion(_)) => return Err(error),
            Err(error) => serde_json::from_str(data).map_err(|_| error)?,
        },
    };
    Ok(values
        .into_iter()
        .map(|value| match serde_json::from_value::<InputNode>(value.clone()) {
            Ok(node) => node,
            Err(error) => {
                log::warn!("Keeping malformed node as an error node: {}", error);
                InputNode::error(value.to_string())
            }
        })
        .collect())
}

fn check_version(version: u32) -> Result<(), SerializationError> {
    if version == CURRENT_VERSION {
        Ok(())
    } else {
        Err(SerializationError::UnsupportedVersion(version))
    }
}
