//! Bus listing repository for PostgreSQL operations

use sqlx::postgres::types::PgInterval;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{PgConnection, Postgres, Row};

use crate::data::filters::{SqlValue, build_bus_query, build_distinct_query, columns};
use crate::data::postgres::PostgresError;
use crate::data::sql::{PostgresDialect, SqlDialect};
use crate::data::types::{CategoryColumn, Dataset, RawBusRow, RawInterval};
use crate::domain::buses::FilterSelection;

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Distinct non-NULL values of a category column
pub async fn distinct_values(
    conn: &mut PgConnection,
    dataset: &Dataset,
    column: CategoryColumn,
) -> Result<Vec<String>, PostgresError> {
    let query = build_distinct_query(&PostgresDialect, dataset, column);
    let values: Vec<Option<String>> = sqlx::query_scalar(&query.sql)
        .fetch_all(&mut *conn)
        .await?;
    Ok(values.into_iter().flatten().collect())
}

/// Rows matching a selection, intervals as native parts
pub async fn fetch_filtered(
    conn: &mut PgConnection,
    selection: &FilterSelection,
) -> Result<Vec<RawBusRow>, PostgresError> {
    let built = build_bus_query(&PostgresDialect, selection);
    tracing::trace!(
        dialect = PostgresDialect.name(),
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

fn bind_value<'q>(query: PgQuery<'q>, value: &SqlValue) -> PgQuery<'q> {
    match value {
        SqlValue::Text(s) => query.bind(s.clone()),
        SqlValue::Integer(i) => query.bind(*i),
        SqlValue::Real(f) => query.bind(*f),
    }
}

fn decode_row(row: &PgRow, with_link: bool) -> Result<RawBusRow, sqlx::Error> {
    let interval = |column: &str| -> Result<Option<RawInterval>, sqlx::Error> {
        Ok(row
            .try_get::<Option<PgInterval>, _>(column)?
            .map(|v| RawInterval::Parts {
                months: v.months,
                days: v.days,
                microseconds: v.microseconds,
            }))
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
