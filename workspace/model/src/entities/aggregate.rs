use crate::error::FetchError;
use common::{AllDataResponse, BreakdownResponse, Label};
use serde::{Deserialize, Serialize};

/// Index-aligned labels and counts, used for the year, country and type
/// breakdowns.
///
/// The fields are private so `labels.len() == counts.len()` holds for every
/// value that exists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryAggregate {
    labels: Vec<String>,
    counts: Vec<u64>,
}

impl CategoryAggregate {
    pub fn new(labels: Vec<String>, counts: Vec<u64>) -> Result<Self, FetchError> {
        if labels.len() != counts.len() {
            return Err(FetchError::malformed(format!(
                "{} labels but {} counts",
                labels.len(),
                counts.len()
            )));
        }
        Ok(Self { labels, counts })
    }

    pub fn from_pairs<L: Into<String>>(pairs: impl IntoIterator<Item = (L, u64)>) -> Self {
        let (labels, counts) = pairs
            .into_iter()
            .map(|(label, count)| (label.into(), count))
            .unzip();
        Self { labels, counts }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Count for a label, if present.
    pub fn count_of(&self, label: &str) -> Option<u64> {
        self.iter().find(|(l, _)| *l == label).map(|(_, c)| c)
    }
}

fn label_strings(labels: Vec<Label>) -> Vec<String> {
    labels.into_iter().map(|label| label.to_string()).collect()
}

impl TryFrom<BreakdownResponse> for CategoryAggregate {
    type Error = FetchError;

    fn try_from(response: BreakdownResponse) -> Result<Self, Self::Error> {
        CategoryAggregate::new(label_strings(response.labels), response.data)
    }
}

/// Shows per release year for the current selection.
///
/// Some backends also send the unfiltered counts so the chart can overlay
/// the selection on the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearBreakdown {
    pub filtered: CategoryAggregate,
    pub baseline: Option<Vec<u64>>,
}

impl TryFrom<AllDataResponse> for YearBreakdown {
    type Error = FetchError;

    fn try_from(response: AllDataResponse) -> Result<Self, Self::Error> {
        let filtered = CategoryAggregate::new(label_strings(response.labels), response.data)?;
        if let Some(all) = &response.data_all {
            if all.len() != filtered.len() {
                return Err(FetchError::malformed(format!(
                    "baseline has {} counts for {} labels",
                    all.len(),
                    filtered.len()
                )));
            }
        }
        Ok(YearBreakdown {
            filtered,
            baseline: response.data_all,
        })
    }
}
