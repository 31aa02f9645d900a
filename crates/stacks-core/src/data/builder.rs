//! Builder pattern for constructing Datasets column by column

use indexmap::IndexMap;

use super::*;

/// Builder for creating Datasets from parallel columns
///
/// Fixtures and mock data are easier to write column-wise; the builder
/// transposes them into records.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    columns: IndexMap<String, Vec<Value>>,
    nrows: Option<usize>,
}

impl DatasetBuilder {
    /// Create a new DatasetBuilder
    pub fn new() -> Self {
        Self {
            columns: IndexMap::new(),
            nrows: None,
        }
    }

    /// Add a column to the Dataset
    pub fn with_column<S, I, V>(mut self, name: S, values: I) -> Result<Self>
    where
        S: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let name = name.into();

        if self.columns.contains_key(&name) {
            return Err(DataError::InvalidParameter(format!(
                "duplicate column name: {}",
                name
            )));
        }

        let values: Vec<Value> = values.into_iter().map(Into::into).collect();

        // Check dimension consistency
        match self.nrows {
            Some(n) if values.len() != n => {
                return Err(DataError::DimensionMismatch {
                    expected: format!("{} rows", n),
                    actual: format!("{} rows", values.len()),
                });
            }
            None => {
                self.nrows = Some(values.len());
            }
            _ => {}
        }

        self.columns.insert(name, values);
        Ok(self)
    }

    /// Build the Dataset
    pub fn build(self) -> Dataset {
        let nrows = self.nrows.unwrap_or(0);

        (0..nrows)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|(name, values)| (name.clone(), values[row].clone()))
                    .collect::<Record>()
            })
            .collect()
    }
}
