use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::row::Offset;

/// A proper grid of values, stored row-major.
/// Invariants:
/// - `width > 0`
/// - `values.len() % width == 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "UncheckedGrid<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Grid<T> {
    values: Vec<T>,
    width: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("a grid needs a width of at least 1")]
    ZeroWidth,
    #[error("{count} values do not fill a grid of width {width}")]
    NotRectangular { count: usize, width: usize },
}

#[derive(Deserialize)]
struct UncheckedGrid<T> {
    values: Vec<T>,
    width: usize,
}

impl<T> TryFrom<UncheckedGrid<T>> for Grid<T> {
    type Error = GridError;

    fn try_from(value: UncheckedGrid<T>) -> Result<Self, Self::Error> {
        Grid::try_from_one_dimensional(value.values, value.width)
    }
}

/// A 2D index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Index2D {
    pub x: usize,
    pub y: usize,
}

/// A 2D offset, which points in between cells. Used for rectangular selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "wasm",
    derive(tsify::Tsify),
    tsify(into_wasm_abi, from_wasm_abi)
)]
pub struct Offset2D {
    pub x: Offset,
    pub y: Offset,
}

impl From<(usize, usize)> for Offset2D {
    fn from((x, y): (usize, usize)) -> Self {
        Offset2D {
            x: Offset(x),
            y: Offset(y),
        }
    }
}

impl<T> Grid<T> {
    pub fn from_one_dimensional(values: Vec<T>, width: usize) -> Self {
        assert!(width > 0);
        assert_eq!(values.len() % width, 0);
        Grid { values, width }
    }

    pub fn try_from_one_dimensional(values: Vec<T>, width: usize) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::ZeroWidth);
        }
        if values.len() % width != 0 {
            return Err(GridError::NotRectangular {
                count: values.len(),
                width,
            });
        }
        Ok(Grid { values, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.values.len() / self.width
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, xy: Index2D) -> Option<&T> {
        let Index2D { x, y } = xy;
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.values.get(self.xy_to_index(xy))
    }

    pub fn get_by_index(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    pub fn index_to_xy(&self, index: usize) -> Index2D {
        Index2D {
            x: index % self.width,
            y: index / self.width,
        }
    }

    pub fn xy_to_index(&self, xy: Index2D) -> usize {
        let Index2D { x, y } = xy;
        y * self.width + x
    }

    /// Moves vertically by one cell, staying in the same column.
    pub fn vertical_neighbour(&self, index: usize, downwards: bool) -> Option<usize> {
        let Index2D { x, y } = self.index_to_xy(index);
        let y = if downwards { y + 1 } else { y.checked_sub(1)? };
        if y >= self.height() {
            return None;
        }
        Some(self.xy_to_index(Index2D { x, y }))
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

impl<T: Clone> Grid<T> {
    /// Returns a copy of the grid with one cell swapped out.
    pub fn with_replaced(&self, index: usize, value: T) -> Self {
        assert!(index < self.values.len(), "Grid index out of bounds");
        let mut values = self.values.clone();
        values[index] = value;
        Grid {
            values,
            width: self.width,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())?;
        for value in &self.values {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}
