#![forbid(unsafe_code)]

//! Serializable grid settings.
//!
//! A [`GridConfig`] carries everything about a grid that is not a child:
//! padding and per-track weights. It round-trips through any serde format;
//! absent fields take their defaults.
//!
//! ```
//! use trellis_layout::{GridConfig, Weight};
//!
//! let config: GridConfig = serde_json::from_str(
//!     r#"{ "row_padding": 2.0, "col_weights": [null, 3.0] }"#,
//! ).unwrap();
//! assert_eq!(config.col_weights, vec![Weight::Auto, Weight::Explicit(3.0)]);
//! assert_eq!(config.col_padding, 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::LayoutError;
use crate::weight::Weight;

/// Padding and weights of a grid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Space between adjacent rows.
    pub row_padding: f64,
    /// Space between adjacent columns.
    pub col_padding: f64,
    /// Weights for the leading rows; rows past the end keep their weight.
    pub row_weights: Vec<Weight>,
    /// Weights for the leading columns; columns past the end keep their weight.
    pub col_weights: Vec<Weight>,
}

impl GridConfig {
    /// Weights configured for `axis`.
    pub fn weights(&self, axis: Axis) -> &[Weight] {
        match axis {
            Axis::Rows => &self.row_weights,
            Axis::Columns => &self.col_weights,
        }
    }

    /// Check padding and weights, independent of any grid's dimensions.
    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_padding(self.row_padding, self.col_padding)?;
        for axis in Axis::BOTH {
            for (index, weight) in self.weights(axis).iter().enumerate() {
                if let Weight::Explicit(value) = *weight {
                    Weight::explicit(value).map_err(|weight| LayoutError::InvalidWeight {
                        axis,
                        index,
                        weight,
                    })?;
                }
            }
        }
        Ok(())
    }
}

pub(crate) fn validate_padding(row: f64, col: f64) -> Result<(), LayoutError> {
    let ok = |p: f64| p.is_finite() && p >= 0.0;
    if ok(row) && ok(col) {
        Ok(())
    } else {
        Err(LayoutError::InvalidPadding { row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config: GridConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GridConfig::default());
    }

    #[test]
    fn round_trips_through_json() {
        let config = GridConfig {
            row_padding: 1.5,
            col_padding: 2.0,
            row_weights: vec![Weight::Explicit(0.0), Weight::Auto],
            col_weights: vec![Weight::Explicit(3.0)],
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: GridConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn validate_rejects_negative_weight() {
        let config = GridConfig {
            col_weights: vec![Weight::Auto, Weight::Explicit(-2.0)],
            ..GridConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(LayoutError::InvalidWeight {
                axis: Axis::Columns,
                index: 1,
                weight: -2.0,
            })
        );
    }

    #[test]
    fn validate_rejects_bad_padding() {
        let config = GridConfig {
            row_padding: -1.0,
            ..GridConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidPadding { .. })
        ));
        let config = GridConfig {
            col_padding: f64::INFINITY,
            ..GridConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
