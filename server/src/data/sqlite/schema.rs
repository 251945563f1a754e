//! Test fixtures for bus listing tables

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// DDL for a bus listing table shaped like the production tables
pub fn bus_table_ddl(table: &str) -> String {
    format!(
        r#"CREATE TABLE "{table}" (
    id INTEGER PRIMARY KEY,
    route_name TEXT,
    route_link TEXT,
    busname TEXT,
    bustype TEXT,
    departing_time TEXT,
    duration TEXT,
    reaching_time TEXT,
    star_rating REAL,
    price REAL,
    seats_available INTEGER
)"#
    )
}

/// A fixture row
pub struct FixtureBus<'a> {
    pub route_name: &'a str,
    pub bus_type: Option<&'a str>,
    pub departing_time: Option<&'a str>,
    pub duration: Option<&'a str>,
    pub star_rating: f64,
    pub price: f64,
    pub seats_available: Option<i64>,
}

impl<'a> FixtureBus<'a> {
    pub fn new(route_name: &'a str, bus_type: &'a str) -> Self {
        Self {
            route_name,
            bus_type: Some(bus_type),
            departing_time: Some("21:30:00"),
            duration: Some("08:15:00"),
            star_rating: 4.0,
            price: 750.0,
            seats_available: Some(10),
        }
    }
}

/// Single-connection in-memory pool (every checkout sees the same database)
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap()
}

/// Create `table` and insert the fixture rows in order
pub async fn seed(pool: &SqlitePool, table: &str, rows: &[FixtureBus<'_>]) {
    sqlx::query(&bus_table_ddl(table))
        .execute(pool)
        .await
        .unwrap();

    for (i, row) in rows.iter().enumerate() {
        let insert = format!(
            r#"INSERT INTO "{table}" (route_name, route_link, busname, bustype, departing_time,
                duration, reaching_time, star_rating, price, seats_available)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#
        );
        sqlx::query(&insert)
            .bind(row.route_name)
            .bind(format!("https://example.test/routes/{}", i))
            .bind(format!("Travels {}", i))
            .bind(row.bus_type)
            .bind(row.departing_time)
            .bind(row.duration)
            .bind(None::<String>)
            .bind(row.star_rating)
            .bind(row.price)
            .bind(row.seats_available)
            .execute(pool)
            .await
            .unwrap();
    }
}
