//! SQL filter builder
//!
//! Builds the catalog and listing queries for a dataset.
//! Includes the column whitelist.

use super::types::{BuiltQuery, Predicate, SqlParams, SqlValue};
use crate::data::sql::SqlDialect;
use crate::data::types::{CategoryColumn, Dataset};
use crate::domain::buses::{Category, FilterSelection};

/// Column whitelist for bus listing tables
pub mod columns {
    pub const ROUTE_NAME: &str = "route_name";
    pub const ROUTE_LINK: &str = "route_link";
    pub const BUS_NAME: &str = "busname";
    pub const BUS_TYPE: &str = "bustype";
    pub const DEPARTING_TIME: &str = "departing_time";
    pub const DURATION: &str = "duration";
    pub const REACHING_TIME: &str = "reaching_time";
    pub const STAR_RATING: &str = "star_rating";
    pub const PRICE: &str = "price";
    pub const SEATS_AVAILABLE: &str = "seats_available";

    /// Columns holding day-relative intervals
    pub const INTERVALS: &[&str] = &[DEPARTING_TIME, DURATION, REACHING_TIME];
}

/// Build `SELECT DISTINCT <col> FROM <table>`
///
/// No ORDER BY: values come back in the order the store yields them.
pub fn build_distinct_query(
    dialect: &dyn SqlDialect,
    dataset: &Dataset,
    column: CategoryColumn,
) -> BuiltQuery {
    let sql = format!(
        "SELECT DISTINCT {} FROM {}",
        dialect.quote_ident(column.db_column()),
        dialect.quote_table(&dataset.table)
    );

    BuiltQuery {
        sql,
        params: SqlParams::default(),
        predicates: Vec::new(),
    }
}

/// Build the filtered listing query for a selection
///
/// Wildcard categories contribute no predicate. Price and rating ranges are
/// always applied, inclusive on both ends.
pub fn build_bus_query(dialect: &dyn SqlDialect, selection: &FilterSelection) -> BuiltQuery {
    let mut params = SqlParams::default();
    let mut predicates = Vec::new();
    let mut conditions = Vec::new();

    let categories = [
        (CategoryColumn::BusType, selection.bus_type()),
        (CategoryColumn::Route, selection.route()),
    ];
    for (column, category) in categories {
        if let Category::Value(value) = category {
            let idx = params.push(SqlValue::Text(value.clone()));
            conditions.push(format!(
                "{} = {}",
                dialect.quote_ident(column.db_column()),
                dialect.placeholder(idx)
            ));
            predicates.push(Predicate::Equals(column.db_column()));
        }
    }

    let price = selection.price();
    let lo = params.push(SqlValue::Integer(price.min()));
    let hi = params.push(SqlValue::Integer(price.max()));
    conditions.push(between(dialect, dialect.quote_ident(columns::PRICE), lo, hi));
    predicates.push(Predicate::Between(columns::PRICE));

    let rating = selection.rating();
    let lo = params.push(SqlValue::Real(rating.min()));
    let hi = params.push(SqlValue::Real(rating.max()));
    let rounded = dialect.round_rating(&dialect.quote_ident(columns::STAR_RATING));
    conditions.push(between(dialect, rounded, lo, hi));
    predicates.push(Predicate::Between(columns::STAR_RATING));

    let sql = format!(
        "SELECT {} FROM {} WHERE {}",
        projection(dialect, selection.dataset()),
        dialect.quote_table(&selection.dataset().table),
        conditions.join(" AND ")
    );

    BuiltQuery {
        sql,
        params,
        predicates,
    }
}

fn between(dialect: &dyn SqlDialect, expr: String, lo: usize, hi: usize) -> String {
    format!(
        "{} BETWEEN {} AND {}",
        expr,
        dialect.placeholder(lo),
        dialect.placeholder(hi)
    )
}

/// Fixed column list; cast columns are aliased back to their own names
fn projection(dialect: &dyn SqlDialect, dataset: &Dataset) -> String {
    let aliased = |expr: String, name: &str| format!("{} AS {}", expr, dialect.quote_ident(name));

    let mut cols = vec![dialect.quote_ident(columns::ROUTE_NAME)];
    if dataset.route_link {
        cols.push(dialect.quote_ident(columns::ROUTE_LINK));
    }
    cols.push(dialect.quote_ident(columns::BUS_NAME));
    cols.push(dialect.quote_ident(columns::BUS_TYPE));
    for col in columns::INTERVALS {
        cols.push(aliased(dialect.cast_interval(&dialect.quote_ident(col)), col));
    }
    cols.push(aliased(
        dialect.cast_real(&dialect.quote_ident(columns::STAR_RATING)),
        columns::STAR_RATING,
    ));
    cols.push(aliased(
        dialect.cast_real(&dialect.quote_ident(columns::PRICE)),
        columns::PRICE,
    ));
    cols.push(aliased(
        dialect.cast_integer(&dialect.quote_ident(columns::SEATS_AVAILABLE)),
        columns::SEATS_AVAILABLE,
    ));

    cols.join(", ")
}
