//! JSON export of computed results
//!
//! Non-finite floats are written as `null`, so consumers must treat a null
//! statistic as "not computable" rather than zero.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Compact JSON document
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Indented JSON document, as offered for download
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write an indented JSON document to a file
pub fn write_json<T, P>(path: P, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    log::debug!("exported analysis to {}", path.as_ref().display());
    Ok(())
}

/// Download file name for an analysis, e.g. `cluster_analysis.json`
pub fn export_file_name(analysis: &str) -> String {
    format!("{}_analysis.json", analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FieldVector;

    #[derive(Serialize)]
    struct Summary {
        metric: &'static str,
        mean: f64,
        skewness: f64,
    }

    #[test]
    fn test_non_finite_values_become_null() {
        let summary = Summary {
            metric: "loans",
            mean: 2.5,
            skewness: f64::NAN,
        };

        let json = to_json_string(&summary).unwrap();
        assert_eq!(json, r#"{"metric":"loans","mean":2.5,"skewness":null}"#);
    }

    #[test]
    fn test_write_json_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(export_file_name("descriptive"));

        let values = FieldVector::from_values(vec![1.0, 2.0, 3.0]);
        write_json(&path, &values).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<f64> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed, vec![1.0, 2.0, 3.0]);
        assert!(path.ends_with("descriptive_analysis.json"));
    }
}
