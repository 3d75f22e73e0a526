use serde::{Deserialize, Serialize};

use crate::{error::EditorError, primitive::NavigationSettings};

/// User facing configuration of the editor.
/// Every field has a default, so a partial JSON object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorSettings {
    /// When moving up or down, try to stay at the same x position on screen.
    pub keep_x_position: bool,
    /// How many steps can be undone. `None` means that the history is unbounded.
    pub max_undo_steps: Option<usize>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            keep_x_position: false,
            max_undo_steps: Some(1000),
        }
    }
}

impl EditorSettings {
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn navigation_settings(&self) -> NavigationSettings {
        NavigationSettings {
            keep_x_position: self.keep_x_position,
        }
    }
}
