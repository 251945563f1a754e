//! Configured datasets
//!
//! The registry is built once at startup and resolves URL dataset ids to
//! tables.

use std::collections::HashSet;

use crate::data::error::DataError;
use crate::data::types::{Dataset, is_valid_table_name};

/// Lookup of configured datasets, in configuration order
#[derive(Debug, Clone)]
pub struct DatasetRegistry {
    datasets: Vec<Dataset>,
}

impl DatasetRegistry {
    pub fn new(datasets: Vec<Dataset>) -> Result<Self, DataError> {
        if datasets.is_empty() {
            return Err(DataError::Config("At least one dataset is required".into()));
        }

        let mut seen = HashSet::new();
        for dataset in &datasets {
            if !seen.insert(dataset.id.as_str()) {
                return Err(DataError::Config(format!(
                    "Duplicate dataset id: {}",
                    dataset.id
                )));
            }
            if !is_valid_table_name(&dataset.table) {
                return Err(DataError::Config(format!(
                    "Invalid table name for dataset {}: {:?}",
                    dataset.id, dataset.table
                )));
            }
        }

        Ok(Self { datasets })
    }

    /// Resolve a dataset id
    pub fn get(&self, id: &str) -> Result<&Dataset, DataError> {
        self.datasets
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| DataError::UnknownDataset(id.to_string()))
    }

    pub fn list(&self) -> &[Dataset] {
        &self.datasets
    }
}
