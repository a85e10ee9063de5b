//! Utility functions for the rankings engine

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Format a dual-meet record as "W-L" or "W-L-T" when ties occurred
pub fn format_record(wins: u32, losses: u32, ties: u32) -> String {
    if ties > 0 {
        format!("{}-{}-{}", wins, losses, ties)
    } else {
        format!("{}-{}", wins, losses)
    }
}

/// Calculate the absolute gap between two power indices
pub fn power_index_gap(a: f64, b: f64) -> f64 {
    (a - b).abs()
}

/// Check if two power indices are within the given proximity threshold
pub fn within_proximity(a: f64, b: f64, threshold: f64) -> bool {
    power_index_gap(a, b) < threshold
}
