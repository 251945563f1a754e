//! Bus listing repository for SQLite operations
//!
//! Functions take a single connection so a render pass can run all of its
//! queries on one handle.

use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{Row, Sqlite, SqliteConnection};

use crate::data::filters::{SqlValue, build_bus_query, build_distinct_query, columns};
use crate::data::sql::{SqliteDialect, SqlDialect};
use crate::data::sqlite::SqliteError;
use crate::data::types::{CategoryColumn, Dataset, RawBusRow, RawInterval};
use crate::domain::buses::FilterSelection;

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// Distinct non-NULL values of a category column
pub async fn distinct_values(
    conn: &mut SqliteConnection,
    dataset: &Dataset,
    column: CategoryColumn,
) -> Result<Vec<String>, SqliteError> {
    let query = build_distinct_query(&SqliteDialect, dataset, column);
    let values: Vec<Option<String>> = sqlx::query_scalar(&query.sql)
        .fetch_all(&mut *conn)
        .await?;
    Ok(values.into_iter().flatten().collect())
}

/// Rows matching a selection, intervals still in stored form
pub async fn fetch_filtered(
    conn: &mut SqliteConnection,
    selection: &FilterSelection,
) -> Result<Vec<RawBusRow>, SqliteError> {
    let built = build_bus_query(&SqliteDialect, selection);
    tracing::trace!(
        dialect = SqliteDialect.name(),
        sql = %built.sql,
        params = built.params.values.len(),
        "Built bus query"
    );

    let mut query = sqlx::query(&built.sql);
    for value in &built.params.values {
        query = bind_value(query, value);
    }

    let rows = query.fetch_all(&mut *conn).await?;
    let with_link = selection.dataset().route_link;
    rows.iter()
        .map(|row| decode_row(row, with_link))
        .collect::<Result<_, _>>()
        .map_err(Into::into)
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: &SqlValue) -> SqliteQuery<'q> {
    match value {
        SqlValue::Text(s) => query.bind(s.clone()),
        SqlValue::Integer(i) => query.bind(*i),
        SqlValue::Real(f) => query.bind(*f),
    }
}

fn decode_row(row: &SqliteRow, with_link: bool) -> Result<RawBusRow, sqlx::Error> {
    let interval = |column: &str| -> Result<Option<RawInterval>, sqlx::Error> {
        Ok(row
            .try_get::<Option<String>, _>(column)?
            .map(RawInterval::Text))
    };

    Ok(RawBusRow {
        route_name: row.try_get::<Option<String>, _>(columns::ROUTE_NAME)?,
        route_link: if with_link {
            row.try_get(columns::ROUTE_LINK)?
        } else {
            None
        },
        bus_name: row.try_get::<Option<String>, _>(columns::BUS_NAME)?,
        bus_type: row.try_get::<Option<String>, _>(columns::BUS_TYPE)?,
        departing_time: interval(columns::DEPARTING_TIME)?,
        duration: interval(columns::DURATION)?,
        reaching_time: interval(columns::REACHING_TIME)?,
        star_rating: row.try_get(columns::STAR_RATING)?,
        price: row.try_get(columns::PRICE)?,
        seats_available: row.try_get::<Option<i64>, _>(columns::SEATS_AVAILABLE)?,
    })
}
