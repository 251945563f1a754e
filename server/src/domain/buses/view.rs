//! Render pass
//!
//! Everything the page needs for one refresh, gathered over a single
//! database session.

use crate::data::types::{BusRecord, CategoryColumn, Dataset};
use crate::data::{DataError, DatasetService};

use super::catalog::FilterCatalog;
use super::selection::FilterSelection;

/// Output of one render pass
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub title: String,
    pub bus_types: FilterCatalog,
    pub routes: FilterCatalog,
    /// `None` when the user has not submitted
    pub rows: Option<Vec<BusRecord>>,
}

/// Load both catalogs and, for a submission, the matching rows
///
/// Acquires one connection, runs the queries in order and releases the
/// connection before returning on every path. A submission must target
/// `dataset`.
pub async fn render_pass(
    service: &DatasetService,
    dataset: &Dataset,
    submission: Option<&FilterSelection>,
) -> Result<DashboardView, DataError> {
    if let Some(selection) = submission
        && selection.dataset().id != dataset.id
    {
        return Err(DataError::DatasetMismatch {
            dataset: dataset.id.clone(),
            selection: selection.dataset().id.clone(),
        });
    }

    let mut session = service.acquire().await?;

    let bus_types = FilterCatalog::load(&mut *session, dataset, CategoryColumn::BusType).await?;
    let routes = FilterCatalog::load(&mut *session, dataset, CategoryColumn::Route).await?;

    let rows = match submission {
        Some(selection) => {
            tracing::debug!(
                dataset = %dataset.id,
                bus_type = selection.bus_type().as_str(),
                route = selection.route().as_str(),
                min_price = selection.price().min(),
                max_price = selection.price().max(),
                min_rating = selection.rating().min(),
                max_rating = selection.rating().max(),
                "Running filtered query"
            );
            Some(session.fetch_filtered(selection).await?)
        }
        None => None,
    };
    drop(session);

    Ok(DashboardView {
        title: format!("Data for {}", dataset.label),
        bus_types,
        routes,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::schema::{FixtureBus, memory_pool, seed};
    use crate::domain::buses::{Category, PriceRange, RatingRange};

    fn dataset() -> Dataset {
        Dataset {
            id: "rb_hrtc".to_string(),
            table: "rb_hrtc".to_string(),
            label: "Himachal".to_string(),
            route_link: false,
        }
    }

    fn full_range(bus_type: Category) -> FilterSelection {
        FilterSelection::new(
            dataset(),
            bus_type,
            Category::All,
            PriceRange::new(0, 6000).unwrap(),
            RatingRange::full(),
        )
    }

    async fn service_with(rows: &[FixtureBus<'_>]) -> DatasetService {
        let pool = memory_pool().await;
        seed(&pool, "rb_hrtc", rows).await;
        DatasetService::from_sqlite_pool(pool)
    }

    fn five_buses() -> Vec<FixtureBus<'static>> {
        ["AC", "Non-AC", "AC", "Sleeper", "AC"]
            .into_iter()
            .map(|t| FixtureBus::new("Shimla to Delhi", t))
            .collect()
    }

    #[tokio::test]
    async fn test_render_without_submission() {
        let service = service_with(&five_buses()).await;
        let view = render_pass(&service, &dataset(), None).await.unwrap();

        assert_eq!(view.title, "Data for Himachal");
        assert!(view.rows.is_none());
        assert_eq!(view.bus_types.values()[0], "All");
        assert_eq!(view.bus_types.values().len(), 4);
        assert_eq!(view.routes.values(), ["All", "Shimla to Delhi"]);
    }

    #[tokio::test]
    async fn test_filter_by_bus_type_returns_matching_rows() {
        let service = service_with(&five_buses()).await;
        let selection = full_range(Category::Value("AC".into()));
        let view = render_pass(&service, &dataset(), Some(&selection))
            .await
            .unwrap();

        let rows = view.rows.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|r| r.bus_type.as_deref() == Some("AC")));
        assert!(rows.iter().all(|r| r.departing_time.as_deref() == Some("21:30:00")));
    }

    fn two_routes() -> Vec<FixtureBus<'static>> {
        vec![
            FixtureBus::new("Shimla to Delhi", "AC"),
            FixtureBus::new("Shimla to Delhi", "Sleeper"),
            FixtureBus::new("Manali to Chandigarh", "AC"),
            FixtureBus::new("Manali to Chandigarh", "AC"),
            FixtureBus::new("Manali to Chandigarh", "Non-AC"),
        ]
    }

    #[tokio::test]
    async fn test_filter_by_route_returns_only_that_route() {
        let service = service_with(&two_routes()).await;
        let selection = FilterSelection::new(
            dataset(),
            Category::All,
            Category::Value("Manali to Chandigarh".into()),
            PriceRange::new(0, 6000).unwrap(),
            RatingRange::full(),
        );

        let rows = render_pass(&service, &dataset(), Some(&selection))
            .await
            .unwrap()
            .rows
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert!(
            rows.iter()
                .all(|r| r.route_name.as_deref() == Some("Manali to Chandigarh"))
        );
    }

    #[tokio::test]
    async fn test_filter_by_route_and_bus_type() {
        let service = service_with(&two_routes()).await;
        let selection = FilterSelection::new(
            dataset(),
            Category::Value("AC".into()),
            Category::Value("Shimla to Delhi".into()),
            PriceRange::new(0, 6000).unwrap(),
            RatingRange::full(),
        );

        let rows = render_pass(&service, &dataset(), Some(&selection))
            .await
            .unwrap()
            .rows
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].route_name.as_deref(), Some("Shimla to Delhi"));
        assert_eq!(rows[0].bus_type.as_deref(), Some("AC"));
    }

    #[tokio::test]
    async fn test_null_type_and_seats_render_absent() {
        let mut rows = vec![FixtureBus::new("Shimla to Delhi", "AC")];
        let mut blank = FixtureBus::new("Shimla to Delhi", "AC");
        blank.bus_type = None;
        blank.seats_available = None;
        blank.price = 500.0;
        rows.push(blank);
        let service = service_with(&rows).await;

        let view = render_pass(&service, &dataset(), Some(&full_range(Category::All)))
            .await
            .unwrap();
        assert_eq!(view.bus_types.values(), ["All", "AC"]);

        let rows = view.rows.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].bus_type, None);
        assert_eq!(rows[1].seats_available, None);
        assert_eq!(rows[0].seats_available, Some(10));
    }

    #[tokio::test]
    async fn test_selection_for_other_dataset_is_rejected() {
        let service = service_with(&five_buses()).await;
        let other = Dataset {
            id: "rb_ksrtc".to_string(),
            table: "rb_ksrtc".to_string(),
            label: "Kerala".to_string(),
            route_link: true,
        };
        let selection = FilterSelection::new(
            other,
            Category::All,
            Category::All,
            PriceRange::new(0, 6000).unwrap(),
            RatingRange::full(),
        );

        let err = render_pass(&service, &dataset(), Some(&selection))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DataError::DatasetMismatch { ref dataset, ref selection }
                if dataset == "rb_hrtc" && selection == "rb_ksrtc"
        ));
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let service = service_with(&five_buses()).await;
        let selection = full_range(Category::Value("Volvo Multi-Axle".into()));
        let view = render_pass(&service, &dataset(), Some(&selection))
            .await
            .unwrap();
        assert_eq!(view.rows, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_rows_satisfy_ranges() {
        let mut rows = five_buses();
        for (i, row) in rows.iter_mut().enumerate() {
            row.price = 400.0 * (i as f64 + 1.0);
            row.star_rating = 1.0 + i as f64;
        }
        let service = service_with(&rows).await;
        let selection = FilterSelection::new(
            dataset(),
            Category::All,
            Category::All,
            PriceRange::new(800, 1600).unwrap(),
            RatingRange::new(2.0, 3.0).unwrap(),
        );

        let rows = render_pass(&service, &dataset(), Some(&selection))
            .await
            .unwrap()
            .rows
            .unwrap();
        assert_eq!(rows.len(), 2);
        for row in rows {
            assert!((800.0..=1600.0).contains(&row.price));
            assert!((2.0..=3.0).contains(&row.star_rating));
        }
    }

    #[tokio::test]
    async fn test_malformed_interval_fails_fetch() {
        let mut rows = five_buses();
        rows[3].duration = Some("about two hours");
        let service = service_with(&rows).await;

        let err = render_pass(&service, &dataset(), Some(&full_range(Category::All)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DataError::Format {
                column: "duration",
                row: 3,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_null_interval_stays_none() {
        let mut rows = five_buses();
        rows[0].departing_time = None;
        let service = service_with(&rows[..1]).await;

        let rows = render_pass(&service, &dataset(), Some(&full_range(Category::All)))
            .await
            .unwrap()
            .rows
            .unwrap();
        assert_eq!(rows[0].departing_time, None);
        assert_eq!(rows[0].duration.as_deref(), Some("08:15:00"));
    }

    #[tokio::test]
    async fn test_connection_released_after_error() {
        let service = service_with(&five_buses()).await;
        let missing = Dataset {
            table: "rb_missing".to_string(),
            ..dataset()
        };

        assert!(render_pass(&service, &missing, None).await.is_err());
        // Single-connection pool: this only succeeds if the handle was returned
        let view = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            render_pass(&service, &dataset(), None),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(view.routes.values().len(), 2);
    }
}
