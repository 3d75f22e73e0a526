use input_tree::{
    direction::{Direction, HorizontalDirection, VerticalDirection},
    focus::{InputChildZipper, InputRowPosition, InputRowRange, InputRowZipper, MinimalInputRowPosition},
    node::InputNodeVariant,
    row::Offset,
};

use crate::render::CaretPositionOracle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationSettings {
    /// Used for vertical movement to keep the caret in the same x position on screen.
    /// When disabled, or when the renderer cannot tell where a caret is,
    /// the caret will be placed at the start or end of the row.
    ///
    /// See also https://github.com/stefnotch/aftermath-editor/issues/13
    pub keep_x_position: bool,
}

impl NavigationSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new caret position, or None if the caret was not moved.
    pub fn move_caret_range(
        &self,
        caret: &InputRowRange,
        direction: Direction,
        oracle: &dyn CaretPositionOracle,
    ) -> Option<InputRowPosition> {
        let is_collapsed = caret.is_collapsed();
        let caret = match direction {
            Direction::Left | Direction::Up => caret.left_position(),
            Direction::Right | Direction::Down => caret.right_position(),
        };
        if !is_collapsed && direction.horizontal().is_some() {
            // Collapsing the caret counts as a movement
            return Some(caret);
        }
        match self.move_position(&caret, direction, oracle) {
            Some(new_caret) => Some(new_caret),
            None if !is_collapsed => Some(caret),
            None => None,
        }
    }

    /// Returns a new caret that has been moved in a given direction. Returns None if the caret cannot be moved in that direction.
    pub fn move_position(
        &self,
        caret: &InputRowPosition,
        direction: Direction,
        oracle: &dyn CaretPositionOracle,
    ) -> Option<InputRowPosition> {
        let new_caret = match (direction.horizontal(), direction.vertical()) {
            (Some(direction), _) => self
                .move_horizontal_into(caret, direction)
                .or_else(|| self.move_horizontal_beyond_edge(caret, direction)),
            (_, Some(direction)) => self.move_vertical(caret, direction, oracle),
            (None, None) => None,
        };
        log::trace!(
            "Moving {:?} from {:?} ends at {:?}",
            direction,
            caret.to_minimal(),
            new_caret.as_ref().map(|v| v.to_minimal())
        );
        new_caret
    }

    fn move_vertical(
        &self,
        caret: &InputRowPosition,
        direction: VerticalDirection,
        oracle: &dyn CaretPositionOracle,
    ) -> Option<InputRowPosition> {
        let target_x = if self.keep_x_position {
            oracle.caret_position(&caret.to_minimal()).map(|(x, _)| x)
        } else {
            None
        };
        self.move_vertical_from_row(&caret.row_zipper, direction, target_x, oracle)
    }

    fn move_vertical_from_row(
        &self,
        row: &InputRowZipper,
        direction: VerticalDirection,
        target_x: Option<f64>,
        oracle: &dyn CaretPositionOracle,
    ) -> Option<InputRowPosition> {
        let container = row.parent()?;

        // Leaving subscript or superscript special cases
        match (container.variant(), direction) {
            (InputNodeVariant::Sup, VerticalDirection::Down)
            | (InputNodeVariant::Sub, VerticalDirection::Up) => {
                let offset = Offset(container.index_in_parent());
                return Some(InputRowPosition::new(container.parent().clone(), offset));
            }
            _ => {}
        };

        // TODO: subsup supsub special cases
        // When I'm in the top sup of a \sum^_, then pressing down should move me to the bottom sup.

        // Grid movement
        let index = row.index_in_parent()?;
        let new_row = container
            .grid()
            .vertical_neighbour(index, direction.is_down())
            .and_then(|new_index| container.row_at(new_index));
        match new_row {
            Some(new_row) => Some(self.land_in_row(new_row, direction, target_x, oracle)),
            // Reached the top/bottom
            None => self.move_vertical_from_row(container.parent(), direction, target_x, oracle),
        }
    }

    /// Moved up or down into a row
    fn land_in_row(
        &self,
        row: InputRowZipper,
        direction: VerticalDirection,
        target_x: Option<f64>,
        oracle: &dyn CaretPositionOracle,
    ) -> InputRowPosition {
        let closest = target_x.and_then(|target_x| {
            self.move_vertical_closest_position(&row, direction, target_x, oracle)
        });
        match closest {
            Some((position, _)) => position,
            None => {
                let offset = match direction {
                    VerticalDirection::Up => Offset(row.len()),
                    VerticalDirection::Down => Offset(0),
                };
                InputRowPosition::new(row, offset)
            }
        }
    }

    /// Nudges the caret to the left or right until it is as close as possible to the target x position.
    /// Returns the position and its distance to the target.
    fn move_vertical_closest_position(
        &self,
        row: &InputRowZipper,
        direction: VerticalDirection,
        target_x: f64,
        oracle: &dyn CaretPositionOracle,
    ) -> Option<(InputRowPosition, f64)> {
        let row_indices = row.row_indices();
        let x_at = |offset: usize| {
            oracle
                .caret_position(&MinimalInputRowPosition::new(
                    row_indices.clone(),
                    Offset(offset),
                ))
                .map(|(x, _)| x)
        };

        let mut offset = match direction {
            VerticalDirection::Up => row.len(),
            VerticalDirection::Down => 0,
        };
        let mut x = x_at(offset)?;
        loop {
            let next = if x < target_x && offset < row.len() {
                offset + 1
            } else if x > target_x && offset > 0 {
                offset - 1
            } else {
                break;
            };
            let next_x = x_at(next)?;
            if (next_x - target_x).abs() >= (x - target_x).abs() {
                break;
            }
            offset = next;
            x = next_x;
        }
        let mut closest = (
            InputRowPosition::new(row.clone(), Offset(offset)),
            (x - target_x).abs(),
        );

        // The target might be inside of the neighbouring container
        let towards_target = if x < target_x {
            Some(offset)
        } else if x > target_x {
            offset.checked_sub(1)
        } else {
            None
        };
        if let Some(InputChildZipper::Container(container)) =
            towards_target.and_then(|index| row.child_at(index))
        {
            let nested_row = match direction {
                VerticalDirection::Up => container.row_at(container.row_count() - 1),
                VerticalDirection::Down => container.row_at(0),
            };
            let nested = nested_row.and_then(|nested_row| {
                self.move_vertical_closest_position(&nested_row, direction, target_x, oracle)
            });
            if let Some(nested) = nested {
                if nested.1 < closest.1 {
                    closest = nested;
                }
            }
        }
        Some(closest)
    }

    /// Move to the left or right, but always out of the current element, because we're at the very edge.
    fn move_horizontal_beyond_edge(
        &self,
        caret: &InputRowPosition,
        direction: HorizontalDirection,
    ) -> Option<InputRowPosition> {
        let container = caret.row_zipper.parent()?;
        let index = caret.row_zipper.index_in_parent()?;

        let adjacent_index = match direction {
            HorizontalDirection::Left => index.checked_sub(1),
            HorizontalDirection::Right => Some(index + 1),
        };
        let adjacent_row = adjacent_index.and_then(|adjacent_index| container.row_at(adjacent_index));
        if let Some(adjacent_row) = adjacent_row {
            // We're in the middle of the table or fraction
            let offset = match direction {
                HorizontalDirection::Left => Offset(adjacent_row.len()),
                HorizontalDirection::Right => Offset(0),
            };
            return Some(InputRowPosition::new(adjacent_row, offset));
        }

        // We're at the very edge of the element, so we'll try to move to the parent
        let offset = match direction {
            HorizontalDirection::Left => Offset(container.index_in_parent()),
            HorizontalDirection::Right => Offset(container.index_in_parent() + 1),
        };
        Some(InputRowPosition::new(container.parent().clone(), offset))
    }

    /// Move to the left or right, but always attempt to move into a nested element if there is one.
    fn move_horizontal_into(
        &self,
        caret: &InputRowPosition,
        direction: HorizontalDirection,
    ) -> Option<InputRowPosition> {
        let adjacent_index = caret.row_zipper.offset_to_index(caret.offset, direction)?;

        match caret.row_zipper.child_at(adjacent_index)? {
            InputChildZipper::Container(container) => {
                let adjacent_row = match direction {
                    HorizontalDirection::Left => container.row_at(container.row_count() - 1)?,
                    HorizontalDirection::Right => container.row_at(0)?,
                };
                let offset = match direction {
                    HorizontalDirection::Left => Offset(adjacent_row.len()),
                    HorizontalDirection::Right => Offset(0),
                };
                Some(InputRowPosition::new(adjacent_row, offset))
            }
            InputChildZipper::Symbol(_) => {
                let offset = match direction {
                    HorizontalDirection::Left => Offset(caret.offset.0 - 1),
                    HorizontalDirection::Right => Offset(caret.offset.0 + 1),
                };
                Some(InputRowPosition::new(caret.row_zipper.clone(), offset))
            }
        }
    }
}
