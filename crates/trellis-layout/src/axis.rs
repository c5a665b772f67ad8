//! Row/column axis selector.
//!
//! Rows and columns run the same aggregation code; `Axis` picks which extent
//! and which fixed flag of a component that code looks at.

use std::fmt;

use crate::component::Component;

/// Which family of tracks an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal tracks; sized by component heights.
    Rows,
    /// Vertical tracks; sized by component widths.
    Columns,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::Rows, Axis::Columns];

    /// Minimum extent of `component` along this axis.
    #[inline]
    pub fn min_extent(self, component: &dyn Component) -> f64 {
        match self {
            Self::Rows => component.min_height(),
            Self::Columns => component.min_width(),
        }
    }

    /// Whether `component` is fixed along this axis.
    #[inline]
    pub fn is_fixed(self, component: &dyn Component) -> bool {
        match self {
            Self::Rows => component.is_fixed_height(),
            Self::Columns => component.is_fixed_width(),
        }
    }

    /// Grid coordinates of the `position`-th cell of track `track`.
    #[inline]
    pub(crate) fn cell(self, track: usize, position: usize) -> (usize, usize) {
        match self {
            Self::Rows => (track, position),
            Self::Columns => (position, track),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rows => "row",
            Self::Columns => "column",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
