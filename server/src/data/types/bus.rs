//! Bus listing rows
//!
//! `RawBusRow` is what a backend decodes from a result row; `BusRecord` is the
//! normalized form with interval columns rendered as `HH:MM:SS`.

use chrono::TimeDelta;
use serde::Serialize;

use crate::data::error::DataError;
use crate::data::filters::columns;
use crate::utils::time::{FormatError, interval_from_parts, interval_to_clock, parse_interval_text};

/// The categorical dimensions a catalog can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryColumn {
    BusType,
    Route,
}

impl CategoryColumn {
    /// Database column backing this dimension
    pub fn db_column(&self) -> &'static str {
        match self {
            Self::BusType => columns::BUS_TYPE,
            Self::Route => columns::ROUTE_NAME,
        }
    }

    /// Name used at the HTTP boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BusType => "bus_type",
            Self::Route => "route",
        }
    }
}

impl std::fmt::Display for CategoryColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An interval cell as the backend delivered it
#[derive(Debug, Clone, PartialEq)]
pub enum RawInterval {
    /// Text form (SQLite stores clock strings)
    Text(String),
    /// Native PostgreSQL interval
    Parts {
        months: i32,
        days: i32,
        microseconds: i64,
    },
}

impl RawInterval {
    fn to_delta(&self) -> Result<TimeDelta, FormatError> {
        match self {
            Self::Text(text) => parse_interval_text(text),
            Self::Parts {
                months,
                days,
                microseconds,
            } => interval_from_parts(*months, *days, *microseconds),
        }
    }
}

/// A decoded but not yet normalized result row
///
/// Text and seat cells are nullable in the listing tables and decode as `None`.
/// Price and rating are never NULL here since the range predicates exclude NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBusRow {
    pub route_name: Option<String>,
    pub route_link: Option<String>,
    pub bus_name: Option<String>,
    pub bus_type: Option<String>,
    pub departing_time: Option<RawInterval>,
    pub duration: Option<RawInterval>,
    pub reaching_time: Option<RawInterval>,
    pub star_rating: f64,
    pub price: f64,
    pub seats_available: Option<i64>,
}

/// One bus listing with interval columns rendered as `HH:MM:SS`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusRecord {
    pub route_name: Option<String>,
    pub route_link: Option<String>,
    pub bus_name: Option<String>,
    pub bus_type: Option<String>,
    pub departing_time: Option<String>,
    pub duration: Option<String>,
    pub reaching_time: Option<String>,
    pub star_rating: f64,
    pub price: f64,
    pub seats_available: Option<i64>,
}

impl RawBusRow {
    /// Normalize the interval columns of the row at `index`
    pub fn normalize(self, index: usize) -> Result<BusRecord, DataError> {
        let clock = |column: &'static str, value: Option<RawInterval>| {
            value
                .map(|v| v.to_delta())
                .transpose()
                .and_then(interval_to_clock)
                .map_err(|e| DataError::format(column, index, e))
        };

        Ok(BusRecord {
            departing_time: clock(columns::DEPARTING_TIME, self.departing_time)?,
            duration: clock(columns::DURATION, self.duration)?,
            reaching_time: clock(columns::REACHING_TIME, self.reaching_time)?,
            route_name: self.route_name,
            route_link: self.route_link,
            bus_name: self.bus_name,
            bus_type: self.bus_type,
            star_rating: self.star_rating,
            price: self.price,
            seats_available: self.seats_available,
        })
    }
}

/// Normalize a full result set; the first bad cell fails the whole batch
pub fn normalize_rows(rows: Vec<RawBusRow>) -> Result<Vec<BusRecord>, DataError> {
    rows.into_iter()
        .enumerate()
        .map(|(index, row)| row.normalize(index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_row(departing: Option<RawInterval>) -> RawBusRow {
        RawBusRow {
            route_name: Some("Kochi to Bangalore".to_string()),
            route_link: None,
            bus_name: Some("KSRTC Swift".to_string()),
            bus_type: Some("AC Sleeper".to_string()),
            departing_time: departing,
            duration: Some(RawInterval::Text("10:30:00".to_string())),
            reaching_time: None,
            star_rating: 4.2,
            price: 1250.0,
            seats_available: Some(12),
        }
    }

    #[test]
    fn test_normalize_text_intervals() {
        let record = raw_row(Some(RawInterval::Text("21:15:00".to_string())))
            .normalize(0)
            .unwrap();
        assert_eq!(record.departing_time.as_deref(), Some("21:15:00"));
        assert_eq!(record.duration.as_deref(), Some("10:30:00"));
        assert_eq!(record.reaching_time, None);
    }

    #[test]
    fn test_normalize_parts_interval() {
        let interval = RawInterval::Parts {
            months: 0,
            days: 1,
            microseconds: 5_000_000,
        };
        let record = raw_row(Some(interval)).normalize(0).unwrap();
        assert_eq!(record.departing_time.as_deref(), Some("24:00:05"));
    }

    #[test]
    fn test_normalize_null_stays_none() {
        let record = raw_row(None).normalize(0).unwrap();
        assert_eq!(record.departing_time, None);
    }

    #[test]
    fn test_normalize_rows_reports_column_and_row() {
        let rows = vec![
            raw_row(Some(RawInterval::Text("06:00:00".to_string()))),
            raw_row(Some(RawInterval::Text("late evening".to_string()))),
        ];
        let err = normalize_rows(rows).unwrap_err();
        match err {
            DataError::Format { column, row, source } => {
                assert_eq!(column, "departing_time");
                assert_eq!(row, 1);
                assert_eq!(source, FormatError::Malformed("late evening".to_string()));
            }
            other => panic!("expected format error, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_keeps_missing_text_and_seats_absent() {
        let mut row = raw_row(None);
        row.bus_type = None;
        row.seats_available = None;
        let record = row.normalize(0).unwrap();
        assert_eq!(record.bus_type, None);
        assert_eq!(record.seats_available, None);
        assert_eq!(record.bus_name.as_deref(), Some("KSRTC Swift"));
    }

    #[test]
    fn test_normalize_rows_empty() {
        assert!(normalize_rows(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_category_column_mapping() {
        assert_eq!(CategoryColumn::BusType.db_column(), "bustype");
        assert_eq!(CategoryColumn::Route.db_column(), "route_name");
        assert_eq!(CategoryColumn::Route.to_string(), "route");
    }
}
