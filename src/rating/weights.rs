//! Flight weight lookup
//!
//! The top flight of each category carries the most competitive weight and
//! lower flights progressively less. Unrecognized flight labels are accepted
//! and weighted at the default.

use crate::types::MatchCategory;

/// Weight applied to any flight label outside the canonical table
pub const DEFAULT_FLIGHT_WEIGHT: f64 = 0.10;

/// Sum of the eight canonical weights; display-scale factor only, never a
/// ranking divisor
pub const CANONICAL_WEIGHT_SUM: f64 = 3.95;

/// Get the weight for a given category and flight label
pub fn flight_weight(category: MatchCategory, flight: &str) -> f64 {
    match (category, flight) {
        (MatchCategory::Singles, "1") => 1.00,
        (MatchCategory::Singles, "2") => 0.75,
        (MatchCategory::Singles, "3") => 0.25,
        (MatchCategory::Singles, "4") => 0.10,
        (MatchCategory::Doubles, "1") => 1.00,
        (MatchCategory::Doubles, "2") => 0.50,
        (MatchCategory::Doubles, "3") => 0.25,
        (MatchCategory::Doubles, "4") => 0.10,
        _ => DEFAULT_FLIGHT_WEIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MatchCategory::{Doubles, Singles};

    #[test]
    fn test_canonical_weights() {
        assert_eq!(flight_weight(Singles, "1"), 1.00);
        assert_eq!(flight_weight(Singles, "2"), 0.75);
        assert_eq!(flight_weight(Singles, "3"), 0.25);
        assert_eq!(flight_weight(Singles, "4"), 0.10);
        assert_eq!(flight_weight(Doubles, "1"), 1.00);
        assert_eq!(flight_weight(Doubles, "2"), 0.50);
        assert_eq!(flight_weight(Doubles, "3"), 0.25);
        assert_eq!(flight_weight(Doubles, "4"), 0.10);
    }

    #[test]
    fn test_unknown_labels_get_default() {
        assert_eq!(flight_weight(Singles, "5"), DEFAULT_FLIGHT_WEIGHT);
        assert_eq!(flight_weight(Doubles, "JV"), DEFAULT_FLIGHT_WEIGHT);
        assert_eq!(flight_weight(Singles, ""), DEFAULT_FLIGHT_WEIGHT);
    }

    #[test]
    fn test_canonical_sum_constant() {
        let sum: f64 = ["1", "2", "3", "4"]
            .iter()
            .map(|f| flight_weight(Singles, f) + flight_weight(Doubles, f))
            .sum();
        assert!((sum - CANONICAL_WEIGHT_SUM).abs() < 1e-12);
    }
}
