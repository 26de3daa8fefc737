//! Domain model of the catalog dashboard.
//!
//! Everything here is pure: entities decoded from the wire, the filter
//! selection, and the immutable [`DashboardState`] that changes only through
//! [`DashboardState::reduce`]. Fetching lives in the `compute` crate.

pub mod dataset;
pub mod effects;
pub mod entities;
pub mod error;
pub mod filters;
pub mod state;

pub use dataset::{Dataset, Generation, LoadStatus};
pub use effects::{effects_for, startup_effects, Effect};
pub use entities::aggregate::{CategoryAggregate, YearBreakdown};
pub use entities::catalog::{ChartImage, VisualizationSet, YearCatalog};
pub use entities::content::{ContentRow, ContentType};
pub use error::FetchError;
pub use filters::{FilterState, RefetchPolicy};
pub use state::{Action, DashboardState, DatasetKind, TableState, PAGE_SIZE_OPTIONS};

// Re-export tracing for use in this crate
pub use tracing;
