//! Rounding values onto a grid.

use crate::types::round_half_up;

/// How a value is moved onto the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// Nearest grid line, halves rounding up.
    #[default]
    Round,
    Ceil,
    Floor,
}

impl RoundingMode {
    fn apply(self, v: f64) -> f64 {
        match self {
            RoundingMode::Round => round_half_up(v),
            RoundingMode::Ceil => v.ceil(),
            RoundingMode::Floor => v.floor(),
        }
    }
}

/// Move `value` onto a multiple of `spacing`.
///
/// ```
/// use gridpath::snap::{quantize, RoundingMode};
///
/// assert_eq!(quantize(17.0, 10.0, RoundingMode::Round), 20.0);
/// assert_eq!(quantize(14.0, 10.0, RoundingMode::Round), 10.0);
/// assert_eq!(quantize(11.0, 10.0, RoundingMode::Ceil), 20.0);
/// ```
pub fn quantize(value: f64, spacing: f64, mode: RoundingMode) -> f64 {
    mode.apply(value / spacing) * spacing
}
