#![forbid(unsafe_code)]

//! Track weights and proportional space distribution.
//!
//! # Invariants
//!
//! 1. An explicit weight is finite and non-negative ([`Weight::explicit`]
//!    refuses anything else).
//! 2. [`distribute`] hands out exactly `free` in total (up to float
//!    rounding) whenever there is at least one track: proportionally when
//!    the weights sum to something positive, evenly otherwise.
//! 3. [`positions`] places padding only between tracks.

use serde::{Deserialize, Serialize};

/// Share of surplus space requested by one row or column.
///
/// Serialises as `null` for [`Weight::Auto`] and as a bare number for
/// [`Weight::Explicit`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Weight {
    /// Inferred from the fixed flags of the track's cells.
    #[default]
    Auto,
    /// Used verbatim, zero included.
    Explicit(f64),
}

impl Weight {
    /// Validated explicit weight. Returns the rejected value on failure.
    pub fn explicit(value: f64) -> Result<Self, f64> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self::Explicit(value))
        } else {
            Err(value)
        }
    }

    #[inline]
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// Effective weight: the explicit value, or 0 for an all-fixed track
    /// and 1 otherwise.
    #[inline]
    pub fn resolve(self, track_is_fixed: impl FnOnce() -> bool) -> f64 {
        match self {
            Self::Explicit(value) => value,
            Self::Auto if track_is_fixed() => 0.0,
            Self::Auto => 1.0,
        }
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        Self::Explicit(value)
    }
}

impl From<Option<f64>> for Weight {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Auto, Self::Explicit)
    }
}

impl From<Weight> for Option<f64> {
    fn from(weight: Weight) -> Self {
        match weight {
            Weight::Auto => None,
            Weight::Explicit(value) => Some(value),
        }
    }
}

/// Split `free` across tracks by weight.
///
/// All-zero weights split evenly so surplus is never dropped. An empty
/// weight list gets nothing.
pub fn distribute(free: f64, weights: &[f64]) -> Vec<f64> {
    if weights.is_empty() {
        return Vec::new();
    }
    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        let share = free / weights.len() as f64;
        return vec![share; weights.len()];
    }
    weights.iter().map(|w| free * w / total).collect()
}

/// Sum of `sizes` plus `gap` between each adjacent pair.
pub fn total_extent(sizes: &[f64], gap: f64) -> f64 {
    let gaps = sizes.len().saturating_sub(1) as f64;
    sizes.iter().sum::<f64>() + gap * gaps
}

/// Cumulative start positions from `start`, with `gap` between tracks.
pub fn positions(sizes: &[f64], start: f64, gap: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(sizes.len());
    let mut pos = start;

    for (i, &size) in sizes.iter().enumerate() {
        out.push(pos);
        pos += size;
        if i + 1 < sizes.len() {
            pos += gap;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_weights_split_equally() {
        assert_eq!(distribute(10.0, &[1.0, 1.0]), vec![5.0, 5.0]);
    }

    #[test]
    fn zero_weights_split_evenly() {
        assert_eq!(distribute(10.0, &[0.0, 0.0]), vec![5.0, 5.0]);
    }

    #[test]
    fn weights_are_proportional() {
        assert_eq!(distribute(20.0, &[1.0, 3.0]), vec![5.0, 15.0]);
    }

    #[test]
    fn zero_weight_entry_gets_nothing_when_others_are_positive() {
        assert_eq!(distribute(12.0, &[0.0, 2.0, 1.0]), vec![0.0, 8.0, 4.0]);
    }

    #[test]
    fn no_tracks_no_allocation() {
        assert!(distribute(10.0, &[]).is_empty());
    }

    #[test]
    fn no_free_space_allocates_zero() {
        assert_eq!(distribute(0.0, &[1.0, 3.0]), vec![0.0, 0.0]);
        assert_eq!(distribute(0.0, &[0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn total_extent_counts_inner_gaps_only() {
        assert_eq!(total_extent(&[], 4.0), 0.0);
        assert_eq!(total_extent(&[10.0], 4.0), 10.0);
        assert_eq!(total_extent(&[10.0, 20.0, 5.0], 4.0), 43.0);
    }

    #[test]
    fn positions_skip_trailing_gap() {
        assert_eq!(positions(&[10.0, 20.0, 5.0], 3.0, 2.0), vec![3.0, 15.0, 37.0]);
        assert!(positions(&[], 3.0, 2.0).is_empty());
    }

    #[test]
    fn explicit_rejects_negative_and_non_finite() {
        assert_eq!(Weight::explicit(0.0), Ok(Weight::Explicit(0.0)));
        assert_eq!(Weight::explicit(-1.0), Err(-1.0));
        assert!(Weight::explicit(f64::NAN).is_err());
        assert!(Weight::explicit(f64::INFINITY).is_err());
    }

    #[test]
    fn resolve_uses_explicit_verbatim() {
        assert_eq!(Weight::Explicit(0.0).resolve(|| false), 0.0);
        assert_eq!(Weight::Explicit(2.5).resolve(|| true), 2.5);
    }

    #[test]
    fn resolve_infers_from_fixedness() {
        assert_eq!(Weight::Auto.resolve(|| true), 0.0);
        assert_eq!(Weight::Auto.resolve(|| false), 1.0);
    }

    #[test]
    fn serde_maps_auto_to_null() {
        let weights = vec![Weight::Auto, Weight::Explicit(2.0)];
        let json = serde_json::to_string(&weights).unwrap();
        assert_eq!(json, "[null,2.0]");
        let back: Vec<Weight> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, weights);
    }
}
