use crate::state::Action;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Current year/genre selection driving every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub year: Option<i32>,
    pub genre: Option<String>,
}

impl FilterState {
    pub fn new(year: Option<i32>, genre: Option<&str>) -> Self {
        Self {
            year,
            genre: genre.and_then(normalize_genre),
        }
    }

    /// Reads the year selector's raw value. The empty "Select Year" entry
    /// clears the filter, as does anything that is not a number.
    pub fn parse_year(raw: &str) -> Option<i32> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<i32>() {
            Ok(year) => Some(year),
            Err(_) => {
                warn!(value = %trimmed, "Ignoring non-numeric year filter");
                None
            }
        }
    }

    pub fn parse_genre(raw: &str) -> Option<String> {
        normalize_genre(raw)
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.genre.is_none()
    }

    /// The selection after a filter edit. Other actions leave it as is.
    pub fn edited(&self, action: &Action) -> Self {
        match action {
            Action::SetYear(year) => Self {
                year: *year,
                genre: self.genre.clone(),
            },
            Action::SetGenre(genre) => Self {
                year: self.year,
                genre: genre.as_deref().and_then(normalize_genre),
            },
            _ => self.clone(),
        }
    }
}

fn normalize_genre(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.year, &self.genre) {
            (None, None) => f.write_str("all content"),
            (Some(year), None) => write!(f, "year {}", year),
            (None, Some(genre)) => write!(f, "genre '{}'", genre),
            (Some(year), Some(genre)) => write!(f, "year {}, genre '{}'", year, genre),
        }
    }
}

/// When the filtered rows and year counts are refetched.
///
/// Country and type breakdowns follow the year filter under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefetchPolicy {
    /// Only when the user presses the filter button.
    #[default]
    OnSubmit,
    /// On every change of the filter selection.
    OnChange,
}

impl fmt::Display for RefetchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefetchPolicy::OnSubmit => f.write_str("on_submit"),
            RefetchPolicy::OnChange => f.write_str("on_change"),
        }
    }
}

impl FromStr for RefetchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "on_submit" | "submit" => Ok(RefetchPolicy::OnSubmit),
            "on_change" | "change" => Ok(RefetchPolicy::OnChange),
            other => Err(format!("unknown refetch policy '{}'", other)),
        }
    }
}
