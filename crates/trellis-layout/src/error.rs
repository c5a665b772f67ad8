//! Layout errors.

use std::fmt;

use trellis_core::geometry::Size;

use crate::axis::Axis;

/// Errors reported by grid mutation and layout.
///
/// Every error is local to the call that produced it; the container is left
/// exactly as it was before the call.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Structural change attempted after the container was attached.
    InvalidMutation { operation: &'static str },
    /// The target cell already holds a component.
    CellOccupied { row: usize, col: usize },
    /// The minimum size of this component is derived and cannot be assigned.
    NotSettable,
    /// Available space is smaller than the aggregate minimum.
    InsufficientSpace { required: Size, available: Size },
    /// Explicit weight is negative or not finite.
    InvalidWeight {
        axis: Axis,
        index: usize,
        weight: f64,
    },
    /// Padding is negative or not finite.
    InvalidPadding { row: f64, col: f64 },
    /// Track index beyond the current grid dimensions.
    IndexOutOfRange {
        axis: Axis,
        index: usize,
        len: usize,
    },
    /// Authored minimum size is negative or not finite.
    InvalidSize { width: f64, height: f64 },
    /// A cell name is already registered on this grid.
    DuplicateName { name: String },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMutation { operation } => {
                write!(f, "cannot {operation}: container is already attached")
            }
            Self::CellOccupied { row, col } => {
                write!(f, "cell ({row}, {col}) is already occupied")
            }
            Self::NotSettable => write!(f, "minimum size is derived and cannot be set"),
            Self::InsufficientSpace {
                required,
                available,
            } => write!(
                f,
                "insufficient space: need {}x{}, got {}x{}",
                required.width, required.height, available.width, available.height
            ),
            Self::InvalidWeight {
                axis,
                index,
                weight,
            } => write!(f, "invalid {axis} weight {weight} at index {index}"),
            Self::InvalidPadding { row, col } => {
                write!(f, "invalid padding: row {row}, column {col}")
            }
            Self::IndexOutOfRange { axis, index, len } => {
                write!(f, "{axis} index {index} out of range (len {len})")
            }
            Self::InvalidSize { width, height } => {
                write!(f, "invalid minimum size {width}x{height}")
            }
            Self::DuplicateName { name } => write!(f, "cell name `{name}` is already taken"),
        }
    }
}

impl std::error::Error for LayoutError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            LayoutError::CellOccupied { row: 1, col: 2 }.to_string(),
            "cell (1, 2) is already occupied"
        );
        assert_eq!(
            LayoutError::InvalidMutation { operation: "place" }.to_string(),
            "cannot place: container is already attached"
        );
        assert_eq!(
            LayoutError::InsufficientSpace {
                required: Size::new(30.0, 40.0),
                available: Size::new(29.0, 40.0),
            }
            .to_string(),
            "insufficient space: need 30x40, got 29x40"
        );
        assert_eq!(
            LayoutError::IndexOutOfRange {
                axis: Axis::Columns,
                index: 4,
                len: 2,
            }
            .to_string(),
            "column index 4 out of range (len 2)"
        );
        assert_eq!(
            LayoutError::DuplicateName {
                name: "footer".to_string(),
            }
            .to_string(),
            "cell name `footer` is already taken"
        );
    }
}
