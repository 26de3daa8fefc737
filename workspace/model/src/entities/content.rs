use crate::error::FetchError;
use common::ContentRowDto;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    #[serde(rename = "Movie")]
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
}

impl ContentType {
    /// Label as the backend spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "movie" => Ok(ContentType::Movie),
            "tvshow" => Ok(ContentType::TvShow),
            _ => Err(FetchError::malformed(format!("unknown content type '{}'", s))),
        }
    }
}

/// One title of the filtered result set. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRow {
    pub title: String,
    pub kind: ContentType,
    pub release_year: i32,
    /// Age rating (e.g. "TV-MA"); missing for some titles.
    pub rating: Option<String>,
    pub genres: Vec<String>,
}

impl ContentRow {
    /// Genres joined for a single table cell.
    pub fn genres_label(&self) -> String {
        self.genres.join(", ")
    }

    /// Rating for display, with a dash when the backend had none.
    pub fn rating_label(&self) -> &str {
        self.rating.as_deref().unwrap_or("-")
    }
}

impl TryFrom<ContentRowDto> for ContentRow {
    type Error = FetchError;

    fn try_from(dto: ContentRowDto) -> Result<Self, Self::Error> {
        let kind = dto.kind.parse::<ContentType>()?;
        Ok(ContentRow {
            title: dto.title,
            kind,
            release_year: dto.release_year,
            rating: dto.rating.filter(|r| !r.trim().is_empty()),
            genres: dto.genres.into_vec(),
        })
    }
}
