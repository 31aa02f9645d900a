//! Date-ordered numeric series extracted from records

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::*;

/// A numeric field ordered by a date field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub timestamps: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    /// Build from records, sorted ascending by date
    ///
    /// Records with an unparseable date or a non-numeric value are skipped.
    /// Records sharing a timestamp keep their input order.
    pub(crate) fn from_records(records: &[Record], date_field: &str, value_field: &str) -> Self {
        let mut pairs: Vec<(NaiveDateTime, f64)> = records
            .iter()
            .filter_map(|r| {
                let ts = r.get(date_field).and_then(parse_timestamp)?;
                Some((ts, r.get_f64(value_field)?))
            })
            .collect();

        let skipped = records.len() - pairs.len();
        if skipped > 0 {
            log::debug!(
                "time series '{}' by '{}': skipped {} records",
                value_field,
                date_field,
                skipped
            );
        }

        pairs.sort_by_key(|(ts, _)| *ts);
        let (timestamps, values) = pairs.into_iter().unzip();

        Self { timestamps, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` and RFC 3339 timestamps
fn parse_timestamp(value: &Value) -> Option<NaiveDateTime> {
    let text = value.as_str()?.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
