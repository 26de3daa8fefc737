//! Lenient wire representations for fields the backend variants disagree on.
//!
//! The stock backend sends release years as bare numbers in label arrays and
//! genres as one comma-joined string; newer ones send strings and arrays.
//! Both shapes decode into the same values here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A chart label that may arrive as a string or a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Label {
    Text(String),
    Integer(i64),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Text(text) => f.write_str(text),
            Label::Integer(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::Text(value.to_string())
    }
}

/// Genres as either a list or the backend's comma-joined `listed_in` column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GenreField {
    List(Vec<String>),
    Joined(String),
}

impl Default for GenreField {
    fn default() -> Self {
        GenreField::List(Vec::new())
    }
}

impl GenreField {
    /// Flattens to an ordered list of trimmed, non-empty genre names.
    pub fn into_vec(self) -> Vec<String> {
        let pieces: Vec<String> = match self {
            GenreField::List(list) => list,
            GenreField::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        };
        pieces
            .into_iter()
            .map(|piece| piece.trim().to_string())
            .filter(|piece| !piece.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joined_genres_are_split_and_trimmed() {
        let field = GenreField::Joined("Dramas,  Thrillers ,".to_string());
        assert_eq!(field.into_vec(), vec!["Dramas", "Thrillers"]);
    }

    #[test]
    fn listed_genres_keep_order() {
        let field: GenreField = serde_json::from_str(r#"["Comedies", "Action & Adventure"]"#).unwrap();
        assert_eq!(field.into_vec(), vec!["Comedies", "Action & Adventure"]);
    }

    #[test]
    fn integer_label_displays_as_number() {
        let label: Label = serde_json::from_str("2021").unwrap();
        assert_eq!(label, Label::Integer(2021));
        assert_eq!(label.to_string(), "2021");
    }
}
