//! Dataset implementation for tabular records
//!
//! A Dataset is an ordered sequence of records with potentially different
//! fields. Order is preserved for display and for order-dependent routines
//! such as contiguous cross-validation folds; no operation mutates the records.

use super::*;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::error::StacksError;

/// Main Dataset structure
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset from records
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of flat objects
    pub fn from_json_str(json: &str) -> std::result::Result<Self, StacksError> {
        let dataset: Dataset = serde_json::from_str(json)?;
        log::debug!("parsed dataset with {} records", dataset.len());
        Ok(dataset)
    }

    /// Read a JSON array of flat objects
    pub fn from_reader<R: std::io::Read>(reader: R) -> std::result::Result<Self, StacksError> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Union of field names across all records, in first-seen order
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: IndexSet<&str> = IndexSet::new();
        for record in &self.records {
            names.extend(record.field_names());
        }
        names.into_iter().collect()
    }

    /// Check if any record carries the field
    pub fn has_field(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.contains(name))
    }

    /// Fail fast on a field name that no record carries
    ///
    /// An empty dataset accepts every name, so that "no data" stays distinct
    /// from "wrong configuration".
    pub fn require_field(&self, name: &str) -> Result<()> {
        if self.is_empty() || self.has_field(name) {
            Ok(())
        } else {
            Err(DataError::field_not_found(name, &self.field_names()))
        }
    }

    /// Keep records matching a predicate
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Record) -> bool,
    {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| predicate(r))
                .cloned()
                .collect(),
        }
    }

    /// Keep records whose field equals `value`
    pub fn where_eq(&self, field: &str, value: &Value) -> Result<Self> {
        self.require_field(field)?;
        Ok(self.filter(|r| r.get(field) == Some(value)))
    }

    /// Project one numeric field, dropping NaN and non-numeric entries
    pub fn field_vector(&self, field: &str) -> Result<FieldVector> {
        self.require_field(field)?;

        let vector: FieldVector = self
            .records
            .iter()
            .filter_map(|r| r.get(field))
            .filter_map(Value::as_f64)
            .collect();

        let dropped = self.len() - vector.len();
        if dropped > 0 {
            log::debug!("field '{}': dropped {} non-numeric entries", field, dropped);
        }

        Ok(vector)
    }

    /// Split a numeric field into one vector per category value
    ///
    /// Groups appear in first-seen order; records without a category are skipped.
    pub fn group_by(&self, category: &str, metric: &str) -> Result<IndexMap<String, FieldVector>> {
        self.require_field(category)?;
        self.require_field(metric)?;

        let mut groups: IndexMap<String, Vec<f64>> = IndexMap::new();
        for record in &self.records {
            let Some(key) = record.get(category).and_then(Value::category_key) else {
                continue;
            };
            let entry = groups.entry(key).or_default();
            if let Some(v) = record.get_f64(metric) {
                entry.push(v);
            }
        }

        Ok(groups
            .into_iter()
            .map(|(key, values)| (key, FieldVector::from_values(values)))
            .collect())
    }

    /// Pair two numeric fields for regression
    ///
    /// Rows where either side is missing or non-numeric are dropped.
    pub fn observations(&self, x_field: &str, target_field: &str) -> Result<Vec<Observation>> {
        self.require_field(x_field)?;
        self.require_field(target_field)?;

        Ok(self
            .records
            .iter()
            .filter_map(|r| Some(Observation::new(r.get_f64(x_field)?, r.get_f64(target_field)?)))
            .collect())
    }

    /// Project records onto numeric coordinates
    ///
    /// Every record must yield a number for every field: one point per record,
    /// in record order.
    pub fn points<S: AsRef<str>>(&self, fields: &[S]) -> Result<Points> {
        if fields.is_empty() {
            return Err(DataError::InvalidParameter(
                "at least one field is required to build points".to_string(),
            ));
        }
        for field in fields {
            self.require_field(field.as_ref())?;
        }

        let mut coords = Matrix::zeros((self.len(), fields.len()));
        for (row, record) in self.records.iter().enumerate() {
            for (col, field) in fields.iter().enumerate() {
                let field = field.as_ref();
                coords[(row, col)] = match record.get(field) {
                    None | Some(Value::Null) => {
                        return Err(DataError::MissingData {
                            field: field.to_string(),
                            row,
                        })
                    }
                    Some(value) => value.as_f64().ok_or_else(|| DataError::NonNumericData {
                        field: field.to_string(),
                        row,
                        value: value.to_string(),
                    })?,
                };
            }
        }

        Points::new(fields.iter().map(|f| f.as_ref().to_string()).collect(), coords)
    }

    /// Extract a date-ordered series of one numeric field
    pub fn time_series(&self, date_field: &str, value_field: &str) -> Result<TimeSeries> {
        self.require_field(date_field)?;
        self.require_field(value_field)?;
        Ok(TimeSeries::from_records(&self.records, date_field, value_field))
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
