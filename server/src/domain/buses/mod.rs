//! Bus listing domain
//!
//! A render pass loads the two filter catalogs for the active dataset and,
//! when the user submitted, the rows matching their `FilterSelection`.

mod catalog;
mod selection;
mod view;

pub use catalog::FilterCatalog;
pub use selection::{Category, FilterSelection, PriceRange, RatingRange, ValidationError};
pub use view::{DashboardView, render_pass};
