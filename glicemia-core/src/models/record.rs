use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single glucose measurement.
///
/// `level` is in mg/dL. The store does not range-check it beyond what
/// [`parse_level`] accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlicemiaRecord {
    pub date: DateTime<Utc>,
    pub level: f64,
}

impl GlicemiaRecord {
    pub fn new(date: DateTime<Utc>, level: f64) -> Self {
        Self { date, level }
    }
}

impl fmt::Display for GlicemiaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = self.date.with_timezone(&Local);
        write!(
            f,
            "{} - {}  {} mg/dL",
            local.format("%d/%m/%Y"),
            local.format("%H:%M:%S"),
            self.level
        )
    }
}

/// Parses the text of the level input field.
///
/// Returns `None` for empty, non-numeric, non-finite or negative input.
pub fn parse_level(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.parse::<f64>() {
        Ok(level) if level.is_finite() && level >= 0.0 => Some(level),
        _ => None,
    }
}

/// Sorts records most recent first.
///
/// The sort is stable, so records sharing a date keep their insertion order.
pub fn sort_descending(records: &mut [GlicemiaRecord]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}
