//! The dashboard's single source of truth.
//!
//! [`DashboardState`] is an immutable value. Hosts hold the current one and
//! replace it with `state.reduce(action)`; nothing mutates it in place.

use crate::dataset::{Dataset, Generation, LoadStatus};
use crate::entities::aggregate::{CategoryAggregate, YearBreakdown};
use crate::entities::catalog::{ChartImage, VisualizationSet, YearCatalog};
use crate::entities::content::ContentRow;
use crate::error::FetchError;
use crate::filters::{FilterState, RefetchPolicy};
use std::fmt;
use tracing::{debug, trace, warn};

/// Rows-per-page choices offered under the table.
pub const PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 100];

/// Every independently fetched slice of state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Years,
    Rows,
    YearCounts,
    Countries,
    Types,
    ChartImage,
    Visualizations,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 7] = [
        DatasetKind::Years,
        DatasetKind::Rows,
        DatasetKind::YearCounts,
        DatasetKind::Countries,
        DatasetKind::Types,
        DatasetKind::ChartImage,
        DatasetKind::Visualizations,
    ];

    pub fn index(&self) -> usize {
        match self {
            DatasetKind::Years => 0,
            DatasetKind::Rows => 1,
            DatasetKind::YearCounts => 2,
            DatasetKind::Countries => 3,
            DatasetKind::Types => 4,
            DatasetKind::ChartImage => 5,
            DatasetKind::Visualizations => 6,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatasetKind::Years => "years",
            DatasetKind::Rows => "rows",
            DatasetKind::YearCounts => "year counts",
            DatasetKind::Countries => "country breakdown",
            DatasetKind::Types => "type breakdown",
            DatasetKind::ChartImage => "chart image",
            DatasetKind::Visualizations => "visualizations",
        };
        f.write_str(name)
    }
}

/// State transitions. Filter and table actions come from the user, the
/// rest from the controller as requests are issued and answered.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetYear(Option<i32>),
    SetGenre(Option<String>),
    ToggleDarkMode,
    SetPage(usize),
    SetPageSize(usize),
    Requested {
        dataset: DatasetKind,
        generation: Generation,
    },
    Failed {
        dataset: DatasetKind,
        generation: Generation,
        error: FetchError,
    },
    YearsLoaded {
        generation: Generation,
        catalog: YearCatalog,
    },
    RowsLoaded {
        generation: Generation,
        rows: Vec<ContentRow>,
    },
    YearCountsLoaded {
        generation: Generation,
        breakdown: YearBreakdown,
    },
    CountriesLoaded {
        generation: Generation,
        aggregate: CategoryAggregate,
    },
    TypesLoaded {
        generation: Generation,
        aggregate: CategoryAggregate,
    },
    ChartImageLoaded {
        generation: Generation,
        image: ChartImage,
    },
    VisualizationsLoaded {
        generation: Generation,
        set: VisualizationSet,
    },
}

/// Position of the content table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableState {
    /// Zero-based page index.
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: PAGE_SIZE_OPTIONS[0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardState {
    pub filters: FilterState,
    pub policy: RefetchPolicy,
    pub dark_mode: bool,
    pub table: TableState,
    pub years: Dataset<YearCatalog>,
    pub rows: Dataset<Vec<ContentRow>>,
    pub year_counts: Dataset<YearBreakdown>,
    pub countries: Dataset<CategoryAggregate>,
    pub types: Dataset<CategoryAggregate>,
    pub chart_image: Dataset<ChartImage>,
    pub visualizations: Dataset<VisualizationSet>,
}

impl DashboardState {
    pub fn new(policy: RefetchPolicy, page_size: usize) -> Self {
        Self {
            policy,
            table: TableState {
                page: 0,
                page_size: page_size.max(1),
            },
            ..Self::default()
        }
    }

    /// Returns the state that follows `action`.
    pub fn reduce(&self, action: Action) -> Self {
        let mut next = self.clone();
        next.apply(action);
        next
    }

    /// Years for the year selector; empty until the catalog has loaded.
    pub fn year_options(&self) -> &[i32] {
        self.years.data().map(YearCatalog::years).unwrap_or(&[])
    }

    /// Filtered rows; empty until the first filter has been applied.
    pub fn content(&self) -> &[ContentRow] {
        self.rows.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn status(&self, dataset: DatasetKind) -> LoadStatus {
        match dataset {
            DatasetKind::Years => self.years.status(),
            DatasetKind::Rows => self.rows.status(),
            DatasetKind::YearCounts => self.year_counts.status(),
            DatasetKind::Countries => self.countries.status(),
            DatasetKind::Types => self.types.status(),
            DatasetKind::ChartImage => self.chart_image.status(),
            DatasetKind::Visualizations => self.visualizations.status(),
        }
    }

    pub fn last_error(&self, dataset: DatasetKind) -> Option<&FetchError> {
        match dataset {
            DatasetKind::Years => self.years.last_error(),
            DatasetKind::Rows => self.rows.last_error(),
            DatasetKind::YearCounts => self.year_counts.last_error(),
            DatasetKind::Countries => self.countries.last_error(),
            DatasetKind::Types => self.types.last_error(),
            DatasetKind::ChartImage => self.chart_image.last_error(),
            DatasetKind::Visualizations => self.visualizations.last_error(),
        }
    }

    fn apply(&mut self, action: Action) {
        trace!(?action, "Reducing dashboard action");
        match action {
            Action::SetYear(_) | Action::SetGenre(_) => self.filters = self.filters.edited(&action),
            Action::ToggleDarkMode => self.dark_mode = !self.dark_mode,
            Action::SetPage(page) => self.table.page = page,
            Action::SetPageSize(0) => warn!("Ignoring zero page size"),
            Action::SetPageSize(size) => {
                self.table.page_size = size;
                self.table.page = 0;
            }
            Action::Requested {
                dataset,
                generation,
            } => self.request(dataset, generation),
            Action::Failed {
                dataset,
                generation,
                error,
            } => self.fail(dataset, generation, error),
            Action::YearsLoaded {
                generation,
                catalog,
            } => {
                self.years.resolve(generation, Ok(catalog));
            }
            Action::RowsLoaded { generation, rows } => {
                if self.rows.resolve(generation, Ok(rows)) {
                    self.table.page = 0;
                }
            }
            Action::YearCountsLoaded {
                generation,
                breakdown,
            } => {
                self.year_counts.resolve(generation, Ok(breakdown));
            }
            Action::CountriesLoaded {
                generation,
                aggregate,
            } => {
                self.countries.resolve(generation, Ok(aggregate));
            }
            Action::TypesLoaded {
                generation,
                aggregate,
            } => {
                self.types.resolve(generation, Ok(aggregate));
            }
            Action::ChartImageLoaded { generation, image } => {
                self.chart_image.resolve(generation, Ok(image));
            }
            Action::VisualizationsLoaded { generation, set } => {
                self.visualizations.resolve(generation, Ok(set));
            }
        }
    }

    fn request(&mut self, dataset: DatasetKind, generation: Generation) {
        match dataset {
            DatasetKind::Years => self.years.request(generation),
            DatasetKind::Rows => self.rows.request(generation),
            DatasetKind::YearCounts => self.year_counts.request(generation),
            DatasetKind::Countries => self.countries.request(generation),
            DatasetKind::Types => self.types.request(generation),
            DatasetKind::ChartImage => self.chart_image.request(generation),
            DatasetKind::Visualizations => self.visualizations.request(generation),
        }
    }

    fn fail(&mut self, dataset: DatasetKind, generation: Generation, error: FetchError) {
        debug!(%dataset, %generation, %error, "Recording failed fetch");
        let applied = match dataset {
            DatasetKind::Years => self.years.resolve(generation, Err(error)),
            DatasetKind::Rows => self.rows.resolve(generation, Err(error)),
            DatasetKind::YearCounts => self.year_counts.resolve(generation, Err(error)),
            DatasetKind::Countries => self.countries.resolve(generation, Err(error)),
            DatasetKind::Types => self.types.resolve(generation, Err(error)),
            DatasetKind::ChartImage => self.chart_image.resolve(generation, Err(error)),
            DatasetKind::Visualizations => self.visualizations.resolve(generation, Err(error)),
        };
        if !applied {
            trace!(%dataset, %generation, "Failure belonged to a superseded request");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::content::ContentType;

    fn row(title: &str) -> ContentRow {
        ContentRow {
            title: title.to_string(),
            kind: ContentType::Movie,
            release_year: 2020,
            rating: None,
            genres: vec![],
        }
    }

    fn loaded_countries(state: &DashboardState, generation: u64, pairs: &[(&str, u64)]) -> DashboardState {
        state
            .reduce(Action::Requested {
                dataset: DatasetKind::Countries,
                generation: Generation(generation),
            })
            .reduce(Action::CountriesLoaded {
                generation: Generation(generation),
                aggregate: CategoryAggregate::from_pairs(pairs.iter().copied()),
            })
    }

    #[test]
    fn reduce_leaves_original_untouched() {
        let state = DashboardState::default();
        let next = state.reduce(Action::SetYear(Some(2020)));
        assert_eq!(state.filters.year, None);
        assert_eq!(next.filters.year, Some(2020));
    }

    #[test]
    fn filter_actions_do_not_touch_datasets() {
        let state = DashboardState::default()
            .reduce(Action::SetYear(Some(2021)))
            .reduce(Action::SetGenre(Some(" Dramas ".to_string())));
        assert_eq!(state.filters.genre.as_deref(), Some("Dramas"));
        for dataset in DatasetKind::ALL {
            assert_eq!(state.status(dataset), LoadStatus::Uninitialized);
        }
    }

    #[test]
    fn failed_country_fetch_keeps_last_chart_data() {
        let state = loaded_countries(&DashboardState::default(), 1, &[("US", 40), ("IN", 55)]);
        let state = state
            .reduce(Action::Requested {
                dataset: DatasetKind::Countries,
                generation: Generation(2),
            })
            .reduce(Action::Failed {
                dataset: DatasetKind::Countries,
                generation: Generation(2),
                error: FetchError::network("HTTP error: 500"),
            });

        let countries = state.countries.data().unwrap();
        assert_eq!(countries.labels(), ["US", "IN"]);
        assert_eq!(state.status(DatasetKind::Countries), LoadStatus::Failed);
        assert!(state.last_error(DatasetKind::Countries).is_some());
    }

    #[test]
    fn stale_rows_do_not_overwrite_newer_rows() {
        let state = DashboardState::default()
            .reduce(Action::Requested {
                dataset: DatasetKind::Rows,
                generation: Generation(1),
            })
            .reduce(Action::Requested {
                dataset: DatasetKind::Rows,
                generation: Generation(2),
            })
            .reduce(Action::RowsLoaded {
                generation: Generation(2),
                rows: vec![row("fresh")],
            })
            .reduce(Action::RowsLoaded {
                generation: Generation(1),
                rows: vec![row("stale")],
            });

        assert_eq!(state.content().len(), 1);
        assert_eq!(state.content()[0].title, "fresh");
    }

    #[test]
    fn new_rows_reset_table_page() {
        let state = DashboardState::default()
            .reduce(Action::SetPage(3))
            .reduce(Action::Requested {
                dataset: DatasetKind::Rows,
                generation: Generation(1),
            })
            .reduce(Action::RowsLoaded {
                generation: Generation(1),
                rows: vec![row("a")],
            });
        assert_eq!(state.table.page, 0);
    }

    #[test]
    fn page_size_change_resets_page_and_ignores_zero() {
        let state = DashboardState::new(RefetchPolicy::OnSubmit, 10)
            .reduce(Action::SetPage(2))
            .reduce(Action::SetPageSize(25));
        assert_eq!(state.table, TableState { page: 0, page_size: 25 });

        let unchanged = state.reduce(Action::SetPageSize(0));
        assert_eq!(unchanged.table.page_size, 25);
    }

    #[test]
    fn year_options_empty_until_loaded() {
        let state = DashboardState::default();
        assert!(state.year_options().is_empty());

        let state = state
            .reduce(Action::Requested {
                dataset: DatasetKind::Years,
                generation: Generation(1),
            })
            .reduce(Action::YearsLoaded {
                generation: Generation(1),
                catalog: YearCatalog::new([2019, 2020]),
            });
        assert_eq!(state.year_options(), [2019, 2020]);
    }

    #[test]
    fn dark_mode_toggles() {
        let state = DashboardState::default().reduce(Action::ToggleDarkMode);
        assert!(state.dark_mode);
        assert!(!state.reduce(Action::ToggleDarkMode).dark_mode);
    }
}
