//! Filter selection
//!
//! Built once per submission from boundary input, validated on construction
//! and immutable afterwards.

use thiserror::Error;

use crate::core::constants::{FILTER_WILDCARD, RATING_MAX};
use crate::data::types::Dataset;

/// Rejected filter input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Price must not be negative (got {0})")]
    NegativePrice(i64),

    #[error("Minimum price {min} is greater than maximum price {max}")]
    InvertedPriceRange { min: i64, max: i64 },

    #[error("Rating must be a finite number")]
    NonFiniteRating,

    #[error("Rating {0} is outside 0.0..=5.0")]
    RatingOutOfBounds(f64),

    #[error("Minimum rating {min} is greater than maximum rating {max}")]
    InvertedRatingRange { min: f64, max: f64 },
}

/// One categorical filter dimension
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Category {
    /// No filter on this dimension
    #[default]
    All,
    /// Exact match on the stored value
    Value(String),
}

impl Category {
    /// Map boundary text to a category
    ///
    /// Missing input, blank input and the literal `"All"` are the wildcard.
    /// Other values are kept verbatim (stored values may carry spaces).
    pub fn from_input(raw: Option<&str>) -> Self {
        match raw {
            None => Self::All,
            Some(s) if s.trim().is_empty() || s == FILTER_WILDCARD => Self::All,
            Some(s) => Self::Value(s.to_string()),
        }
    }

    /// Text for display and echoing back to the page
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => FILTER_WILDCARD,
            Self::Value(v) => v,
        }
    }
}

/// Inclusive integer price range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: i64,
    max: i64,
}

impl PriceRange {
    pub fn new(min: i64, max: i64) -> Result<Self, ValidationError> {
        if min < 0 {
            return Err(ValidationError::NegativePrice(min));
        }
        if max < 0 {
            return Err(ValidationError::NegativePrice(max));
        }
        if min > max {
            return Err(ValidationError::InvertedPriceRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

/// Inclusive star rating range with one-decimal granularity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingRange {
    min: f64,
    max: f64,
}

impl RatingRange {
    /// Bounds are rounded to one decimal place before validation
    pub fn new(min: f64, max: f64) -> Result<Self, ValidationError> {
        let min = round_rating(min)?;
        let max = round_rating(max)?;
        for value in [min, max] {
            if !(0.0..=RATING_MAX).contains(&value) {
                return Err(ValidationError::RatingOutOfBounds(value));
            }
        }
        if min > max {
            return Err(ValidationError::InvertedRatingRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// The whole 0.0..=5.0 scale
    pub fn full() -> Self {
        Self {
            min: 0.0,
            max: RATING_MAX,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

fn round_rating(value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteRating);
    }
    // + 0.0 turns a rounded -0.0 into 0.0
    Ok((value * 10.0).round() / 10.0 + 0.0)
}

/// Everything a user chose for one submission
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    dataset: Dataset,
    bus_type: Category,
    route: Category,
    price: PriceRange,
    rating: RatingRange,
}

impl FilterSelection {
    pub fn new(
        dataset: Dataset,
        bus_type: Category,
        route: Category,
        price: PriceRange,
        rating: RatingRange,
    ) -> Self {
        Self {
            dataset,
            bus_type,
            route,
            price,
            rating,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn bus_type(&self) -> &Category {
        &self.bus_type
    }

    pub fn route(&self) -> &Category {
        &self.route
    }

    pub fn price(&self) -> PriceRange {
        self.price
    }

    pub fn rating(&self) -> RatingRange {
        self.rating
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_input() {
        assert_eq!(Category::from_input(None), Category::All);
        assert_eq!(Category::from_input(Some("All")), Category::All);
        assert_eq!(Category::from_input(Some("")), Category::All);
        assert_eq!(Category::from_input(Some("  ")), Category::All);
        assert_eq!(
            Category::from_input(Some("Non AC Seater ")),
            Category::Value("Non AC Seater ".to_string())
        );
        // Only the exact literal is the wildcard
        assert_eq!(
            Category::from_input(Some("all")),
            Category::Value("all".to_string())
        );
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(Category::All.as_str(), "All");
        assert_eq!(Category::Value("AC".into()).as_str(), "AC");
    }

    #[test]
    fn test_price_range_valid() {
        let range = PriceRange::new(0, 6000).unwrap();
        assert_eq!((range.min(), range.max()), (0, 6000));
        assert!(PriceRange::new(500, 500).is_ok());
    }

    #[test]
    fn test_price_range_rejected() {
        assert_eq!(
            PriceRange::new(-1, 100),
            Err(ValidationError::NegativePrice(-1))
        );
        assert_eq!(
            PriceRange::new(0, -5),
            Err(ValidationError::NegativePrice(-5))
        );
        assert_eq!(
            PriceRange::new(900, 100),
            Err(ValidationError::InvertedPriceRange { min: 900, max: 100 })
        );
    }

    #[test]
    fn test_rating_range_rounds_to_one_decimal() {
        let range = RatingRange::new(3.449, 4.96).unwrap();
        assert_eq!(range.min(), 3.4);
        assert_eq!(range.max(), 5.0);
    }

    #[test]
    fn test_rating_range_rejected() {
        assert_eq!(
            RatingRange::new(-0.5, 4.0),
            Err(ValidationError::RatingOutOfBounds(-0.5))
        );
        assert_eq!(
            RatingRange::new(1.0, 5.5),
            Err(ValidationError::RatingOutOfBounds(5.5))
        );
        assert_eq!(
            RatingRange::new(4.5, 2.0),
            Err(ValidationError::InvertedRatingRange { min: 4.5, max: 2.0 })
        );
        assert_eq!(
            RatingRange::new(f64::NAN, 2.0),
            Err(ValidationError::NonFiniteRating)
        );
    }

    #[test]
    fn test_rating_range_full() {
        let full = RatingRange::full();
        assert_eq!((full.min(), full.max()), (0.0, 5.0));
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::InvertedPriceRange { min: 10, max: 5 };
        assert_eq!(
            err.to_string(),
            "Minimum price 10 is greater than maximum price 5"
        );
    }
}
