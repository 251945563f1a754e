//! Dataset API types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::config::FiltersConfig;
use crate::core::constants::RATING_MAX;
use crate::data::types::{BusRecord, Dataset};
use crate::domain::buses::{
    Category, DashboardView, FilterSelection, PriceRange, RatingRange, ValidationError,
};

/// Dataset DTO for the selector
#[derive(Debug, Serialize, ToSchema)]
pub struct DatasetDto {
    pub id: String,
    pub label: String,
    /// Whether rows carry a `route_link`
    pub route_link: bool,
}

impl From<&Dataset> for DatasetDto {
    fn from(dataset: &Dataset) -> Self {
        Self {
            id: dataset.id.clone(),
            label: dataset.label.clone(),
            route_link: dataset.route_link,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DatasetListResponse {
    pub data: Vec<DatasetDto>,
}

/// One bus listing
#[derive(Debug, Serialize, ToSchema)]
pub struct BusDto {
    /// Null when not recorded
    pub route_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_link: Option<String>,
    pub bus_name: Option<String>,
    pub bus_type: Option<String>,
    /// `HH:MM:SS`, null when not recorded
    pub departing_time: Option<String>,
    /// `HH:MM:SS`, hours may exceed 23
    pub duration: Option<String>,
    /// `HH:MM:SS`, null when not recorded
    pub reaching_time: Option<String>,
    pub star_rating: f64,
    pub price: f64,
    pub seats_available: Option<i64>,
}

impl From<BusRecord> for BusDto {
    fn from(record: BusRecord) -> Self {
        Self {
            route_name: record.route_name,
            route_link: record.route_link,
            bus_name: record.bus_name,
            bus_type: record.bus_type,
            departing_time: record.departing_time,
            duration: record.duration,
            reaching_time: record.reaching_time,
            star_rating: record.star_rating,
            price: record.price,
            seats_available: record.seats_available,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BusListResponse {
    pub dataset: String,
    pub count: usize,
    pub data: Vec<BusDto>,
}

/// Slider bounds for an integer range
#[derive(Debug, Serialize, ToSchema)]
pub struct PriceBounds {
    pub min: i64,
    pub max: i64,
    pub step: i64,
}

/// Slider bounds for the star rating range
#[derive(Debug, Serialize, ToSchema)]
pub struct RatingBounds {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FilterOptionsResponse {
    pub dataset: DatasetDto,
    pub title: String,
    /// Bus types, `"All"` first
    pub bus_types: Vec<String>,
    /// Routes, `"All"` first
    pub routes: Vec<String>,
    pub price: PriceBounds,
    pub rating: RatingBounds,
}

impl FilterOptionsResponse {
    pub fn new(dataset: &Dataset, view: DashboardView, filters: &FiltersConfig) -> Self {
        Self {
            dataset: dataset.into(),
            title: view.title,
            bus_types: view.bus_types.into_values(),
            routes: view.routes.into_values(),
            price: PriceBounds {
                min: 0,
                max: filters.price_max,
                step: 1,
            },
            rating: RatingBounds {
                min: 0.0,
                max: RATING_MAX,
                step: filters.rating_step,
            },
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ViewResponse {
    pub title: String,
    pub dataset: DatasetDto,
    pub bus_types: Vec<String>,
    pub routes: Vec<String>,
    /// Absent until the user submits
    pub rows: Option<Vec<BusDto>>,
}

impl ViewResponse {
    pub fn new(dataset: &Dataset, view: DashboardView) -> Self {
        Self {
            title: view.title,
            dataset: dataset.into(),
            bus_types: view.bus_types.into_values(),
            routes: view.routes.into_values(),
            rows: view
                .rows
                .map(|rows| rows.into_iter().map(BusDto::from).collect()),
        }
    }
}

/// Treat a blank query value (`min_price=`) the same as a missing one
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Query params for the listing endpoint
///
/// Missing categories mean "All". Missing range ends default to the full
/// slider range.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct BusFilterQuery {
    #[validate(length(max = 256, message = "bus_type must be at most 256 characters"))]
    pub bus_type: Option<String>,

    #[validate(length(max = 256, message = "route must be at most 256 characters"))]
    pub route: Option<String>,

    #[validate(range(min = 0, message = "min_price must be >= 0"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<i64>,

    #[validate(range(min = 0, message = "max_price must be >= 0"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<i64>,

    #[validate(range(min = 0.0, max = 5.0, message = "min_rating must be between 0 and 5"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_rating: Option<f64>,

    #[validate(range(min = 0.0, max = 5.0, message = "max_rating must be between 0 and 5"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_rating: Option<f64>,
}

impl BusFilterQuery {
    /// Build the validated selection for `dataset`
    pub fn into_selection(
        self,
        dataset: Dataset,
        filters: &FiltersConfig,
    ) -> Result<FilterSelection, ValidationError> {
        let price = PriceRange::new(
            self.min_price.unwrap_or(0),
            self.max_price.unwrap_or(filters.price_max),
        )?;
        let rating = RatingRange::new(
            self.min_rating.unwrap_or(0.0),
            self.max_rating.unwrap_or(RATING_MAX),
        )?;

        Ok(FilterSelection::new(
            dataset,
            Category::from_input(self.bus_type.as_deref()),
            Category::from_input(self.route.as_deref()),
            price,
            rating,
        ))
    }
}

/// Query params for the render-pass endpoint
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct ViewQuery {
    /// Run the filtered query; without it only catalogs are returned
    #[serde(default)]
    pub submit: bool,

    #[validate(length(max = 256, message = "bus_type must be at most 256 characters"))]
    pub bus_type: Option<String>,

    #[validate(length(max = 256, message = "route must be at most 256 characters"))]
    pub route: Option<String>,

    #[validate(range(min = 0, message = "min_price must be >= 0"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<i64>,

    #[validate(range(min = 0, message = "max_price must be >= 0"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<i64>,

    #[validate(range(min = 0.0, max = 5.0, message = "min_rating must be between 0 and 5"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_rating: Option<f64>,

    #[validate(range(min = 0.0, max = 5.0, message = "max_rating must be between 0 and 5"))]
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_rating: Option<f64>,
}

impl ViewQuery {
    /// The filters of a submission, `None` when nothing was submitted
    pub fn into_submission(self) -> Option<BusFilterQuery> {
        self.submit.then_some(BusFilterQuery {
            bus_type: self.bus_type,
            route: self.route,
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset {
            id: "rb_ksrtc".to_string(),
            table: "rb_ksrtc".to_string(),
            label: "Kerala".to_string(),
            route_link: true,
        }
    }

    fn filters() -> FiltersConfig {
        FiltersConfig {
            price_max: 6000,
            rating_step: 0.1,
        }
    }

    #[test]
    fn test_empty_query_is_full_range_wildcards() {
        let selection = BusFilterQuery::default()
            .into_selection(dataset(), &filters())
            .unwrap();

        assert_eq!(selection.bus_type(), &Category::All);
        assert_eq!(selection.route(), &Category::All);
        assert_eq!(selection.price().min(), 0);
        assert_eq!(selection.price().max(), 6000);
        assert_eq!(selection.rating(), RatingRange::full());
    }

    #[test]
    fn test_query_values_carried_over() {
        let query = BusFilterQuery {
            bus_type: Some("A/C Sleeper (2+1)".to_string()),
            route: Some("All".to_string()),
            min_price: Some(500),
            max_price: Some(1500),
            min_rating: Some(3.46),
            max_rating: None,
        };
        let selection = query.into_selection(dataset(), &filters()).unwrap();

        assert_eq!(
            selection.bus_type(),
            &Category::Value("A/C Sleeper (2+1)".to_string())
        );
        assert_eq!(selection.route(), &Category::All);
        assert_eq!(selection.price().min(), 500);
        assert_eq!(selection.rating().min(), 3.5);
        assert_eq!(selection.rating().max(), 5.0);
    }

    #[test]
    fn test_inverted_price_rejected() {
        let query = BusFilterQuery {
            min_price: Some(7000),
            ..Default::default()
        };
        assert_eq!(
            query.into_selection(dataset(), &filters()).unwrap_err(),
            ValidationError::InvertedPriceRange { min: 7000, max: 6000 }
        );
    }

    #[test]
    fn test_validator_rejects_out_of_scale_rating() {
        let query = BusFilterQuery {
            max_rating: Some(7.5),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_view_query_without_submit() {
        let query = ViewQuery {
            bus_type: Some("AC".to_string()),
            ..Default::default()
        };
        assert!(query.into_submission().is_none());
    }

    #[test]
    fn test_view_query_submission() {
        let query = ViewQuery {
            submit: true,
            route: Some("Kochi to Bangalore".to_string()),
            max_price: Some(900),
            ..Default::default()
        };
        let submission = query.into_submission().unwrap();
        assert_eq!(submission.route.as_deref(), Some("Kochi to Bangalore"));
        assert_eq!(submission.max_price, Some(900));
    }

    #[test]
    fn test_dataset_dto_omits_table() {
        let json = serde_json::to_value(DatasetDto::from(&dataset())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "rb_ksrtc", "label": "Kerala", "route_link": true})
        );
    }
}
