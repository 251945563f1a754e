//! Filter catalogs
//!
//! The selectable values of one categorical dimension, recomputed on every
//! render pass.

use crate::core::constants::FILTER_WILDCARD;
use crate::data::DataError;
use crate::data::traits::BusRepository;
use crate::data::types::{CategoryColumn, Dataset};

/// Distinct values of one dimension with the wildcard at index 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCatalog {
    column: CategoryColumn,
    values: Vec<String>,
}

impl FilterCatalog {
    /// Prepend the wildcard to the distinct values
    ///
    /// A stored value equal to the wildcard text is dropped; selecting it
    /// would mean "no filter" anyway.
    pub fn new(column: CategoryColumn, distinct: Vec<String>) -> Self {
        let mut values = Vec::with_capacity(distinct.len() + 1);
        values.push(FILTER_WILDCARD.to_string());
        values.extend(distinct.into_iter().filter(|v| v != FILTER_WILDCARD));
        Self { column, values }
    }

    /// Query the distinct values for `column` through an open session
    pub async fn load(
        repo: &mut dyn BusRepository,
        dataset: &Dataset,
        column: CategoryColumn,
    ) -> Result<Self, DataError> {
        let distinct = repo.distinct_values(dataset, column).await?;
        tracing::debug!(
            dataset = %dataset.id,
            %column,
            count = distinct.len(),
            "Loaded filter catalog"
        );
        Ok(Self::new(column, distinct))
    }

    pub fn column(&self) -> CategoryColumn {
        self.column
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_first() {
        let catalog = FilterCatalog::new(
            CategoryColumn::BusType,
            vec!["AC Sleeper".into(), "Non AC Seater".into()],
        );
        assert_eq!(catalog.values(), ["All", "AC Sleeper", "Non AC Seater"]);
        assert_eq!(catalog.column(), CategoryColumn::BusType);
    }

    #[test]
    fn test_empty_dataset_catalog() {
        let catalog = FilterCatalog::new(CategoryColumn::Route, Vec::new());
        assert_eq!(catalog.into_values(), vec!["All".to_string()]);
    }

    #[test]
    fn test_store_order_kept() {
        let catalog = FilterCatalog::new(
            CategoryColumn::Route,
            vec!["Zirakpur to Delhi".into(), "Amritsar to Delhi".into()],
        );
        assert_eq!(
            catalog.values(),
            ["All", "Zirakpur to Delhi", "Amritsar to Delhi"]
        );
    }

    #[test]
    fn test_literal_wildcard_value_not_duplicated() {
        let catalog = FilterCatalog::new(CategoryColumn::BusType, vec!["All".into(), "AC".into()]);
        assert_eq!(catalog.values(), ["All", "AC"]);
    }
}
