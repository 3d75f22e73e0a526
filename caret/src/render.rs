use input_tree::{
    focus::{MinimalInputRowPosition, MinimalInputRowRange},
    row::RowIndices,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct ViewportRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Where a selection is on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct ViewportSelection {
    pub rect: ViewportRect,
    pub baseline: f64,
}

/// Provided by the renderer. Knows where everything is on screen.
pub trait RenderResult {
    fn viewport_selection(&self, range: &MinimalInputRowRange) -> Option<ViewportSelection>;

    /// Height of a caret in the given row
    fn viewport_caret_size(&self, row_indices: &RowIndices) -> Option<f64>;
}

/// Answers "where on screen is this caret", as `(x, baseline)`.
/// Vertical movement uses it to stay in the same column.
pub trait CaretPositionOracle {
    fn caret_position(&self, position: &MinimalInputRowPosition) -> Option<(f64, f64)>;
}

impl<F> CaretPositionOracle for F
where
    F: Fn(&MinimalInputRowPosition) -> Option<(f64, f64)>,
{
    fn caret_position(&self, position: &MinimalInputRowPosition) -> Option<(f64, f64)> {
        self(position)
    }
}

/// Uses the collapsed viewport selection of a render result.
pub struct RenderOracle<'a, R: RenderResult + ?Sized>(pub &'a R);

impl<R: RenderResult + ?Sized> CaretPositionOracle for RenderOracle<'_, R> {
    fn caret_position(&self, position: &MinimalInputRowPosition) -> Option<(f64, f64)> {
        let range = MinimalInputRowRange::from(position.clone());
        self.0
            .viewport_selection(&range)
            .map(|selection| (selection.rect.x, selection.baseline))
    }
}

/// For when nothing has been rendered
pub struct NoViewport;

impl CaretPositionOracle for NoViewport {
    fn caret_position(&self, _position: &MinimalInputRowPosition) -> Option<(f64, f64)> {
        None
    }
}
