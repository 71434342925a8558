// verificador - a static checker for a small teaching language.
// Copyright (C) 2026 The verificador authors.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! The token taxonomy: reserved words, operators, and punctuation.
//!
//! A [Taxonomy] is supplied once, before any source is analyzed, and is never
//! modified afterward, so a single instance may be shared by any number of
//! analysis runs.  Its three lists must be disjoint.  A taxonomy that violates
//! this is rejected at construction time with an [Error], which is distinct
//! from any finding about analyzed source.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    fs,
    io::Error as IoError,
    path::Path,
};

use indexmap::IndexSet;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Reserved words in the default taxonomy.
pub const DEFAULT_RESERVED_WORDS: &[&str] = &[
    "entero",
    "decimal",
    "cadena",
    "booleano",
    "caracter",
    "si",
    "sino",
    "mientras",
    "para",
    "func",
    "imprimir",
    "siguiente",
    "finaliza",
    "verdadero",
    "falso",
    "retorna",
];

/// Operators in the default taxonomy.
pub const DEFAULT_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "=", "==", "!=", "<=", ">=", "<", ">", "%", "++", "--",
];

/// Punctuation in the default taxonomy.
pub const DEFAULT_PUNCTUATION: &[&str] = &["(", ")", "{", "}", ";", ",", "[", "]"];

/// Keywords that the grammar validator and the block automaton give meaning
/// to.  A taxonomy may leave them out, but then they are classified as
/// identifiers.
const STRUCTURAL_KEYWORDS: &[&str] = &[
    "si",
    "sino",
    "mientras",
    "para",
    "func",
    "siguiente",
    "finaliza",
];

/// One of the three lists in a [Taxonomy].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Class {
    ReservedWords,
    Operators,
    Punctuation,
}

impl Class {
    pub fn as_str(&self) -> &'static str {
        match self {
            Class::ReservedWords => "reservedWords",
            Class::Operators => "operators",
            Class::Punctuation => "punctuation",
        }
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("{symbol:?} appears in both `{first}` and `{second}`.")]
    Overlap {
        symbol: String,
        first: Class,
        second: Class,
    },

    #[error("`{0}` contains an empty symbol.")]
    Empty(Class),

    #[error("{symbol:?} in `{class}` contains white space.")]
    Whitespace { symbol: String, class: Class },

    #[error("{path}: {source}")]
    Io { path: String, source: IoError },

    #[error("{path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("{path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("{0}: unknown taxonomy file format (expected `.json` or `.toml`).")]
    UnknownFormat(String),
}

/// The on-disk shape of a taxonomy.
///
/// The legacy list names `Preservada`, `operadores`, and `signos` are accepted
/// as aliases.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaxonomyFile {
    #[serde(default, alias = "Preservada")]
    reserved_words: Vec<String>,

    #[serde(default, alias = "operadores")]
    operators: Vec<String>,

    #[serde(default, alias = "signos")]
    punctuation: Vec<String>,
}

impl TryFrom<TaxonomyFile> for Taxonomy {
    type Error = Error;

    fn try_from(value: TaxonomyFile) -> Result<Self, Self::Error> {
        Taxonomy::new(value.reserved_words, value.operators, value.punctuation)
    }
}

/// The classification table for reserved words, operators, and punctuation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "TaxonomyFile")]
pub struct Taxonomy {
    reserved_words: IndexSet<String>,
    operators: IndexSet<String>,
    punctuation: IndexSet<String>,
}

impl Taxonomy {
    /// Creates a taxonomy from its three lists, checking that no symbol is
    /// empty or contains white space and that no symbol appears in more than
    /// one list.  Duplicates within a single list are merged.
    pub fn new<R, O, P>(reserved_words: R, operators: O, punctuation: P) -> Result<Self, Error>
    where
        R: IntoIterator,
        R::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let taxonomy = Self {
            reserved_words: reserved_words.into_iter().map(Into::into).collect(),
            operators: operators.into_iter().map(Into::into).collect(),
            punctuation: punctuation.into_iter().map(Into::into).collect(),
        };
        taxonomy.check()?;
        Ok(taxonomy)
    }

    fn lists(&self) -> [(Class, &IndexSet<String>); 3] {
        [
            (Class::ReservedWords, &self.reserved_words),
            (Class::Operators, &self.operators),
            (Class::Punctuation, &self.punctuation),
        ]
    }

    fn check(&self) -> Result<(), Error> {
        let lists = self.lists();
        for (class, list) in lists {
            for symbol in list {
                if symbol.is_empty() {
                    return Err(Error::Empty(class));
                }
                if symbol.chars().any(char::is_whitespace) {
                    return Err(Error::Whitespace {
                        symbol: symbol.clone(),
                        class,
                    });
                }
            }
        }
        for (i, (first, list)) in lists.iter().enumerate() {
            for (second, other) in &lists[i + 1..] {
                if let Some(symbol) = list.iter().find(|symbol| other.contains(*symbol)) {
                    return Err(Error::Overlap {
                        symbol: symbol.clone(),
                        first: *first,
                        second: *second,
                    });
                }
            }
        }
        Ok(())
    }

    /// Reads a taxonomy from `path`, which must be a JSON or TOML file as
    /// indicated by its extension.
    pub fn from_file<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let path_str = path.to_string_lossy().to_string();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path_str.clone(),
            source,
        })?;
        let extension = path
            .extension()
            .map(|extension| extension.to_string_lossy().to_ascii_lowercase());
        let taxonomy = match extension.as_deref() {
            Some("json") => Self::from_json_str(&text).map_err(|source| Error::Json {
                path: path_str.clone(),
                source,
            })?,
            Some("toml") => Self::from_toml_str(&text).map_err(|source| Error::Toml {
                path: path_str.clone(),
                source,
            })?,
            _ => return Err(Error::UnknownFormat(path_str)),
        };
        for keyword in taxonomy.missing_structural_keywords() {
            warn!("{path_str}: `{keyword}` is not a reserved word and will be classified as an identifier");
        }
        Ok(taxonomy)
    }

    /// Parses a taxonomy in JSON format.  Validation failures are reported as
    /// JSON errors.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Parses a taxonomy in TOML format.  Validation failures are reported as
    /// TOML errors.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn is_reserved(&self, s: &str) -> bool {
        self.reserved_words.contains(s)
    }

    pub fn is_operator(&self, s: &str) -> bool {
        self.operators.contains(s)
    }

    pub fn is_punctuation(&self, s: &str) -> bool {
        self.punctuation.contains(s)
    }

    /// Returns the list that contains `s`, if any.
    pub fn class_of(&self, s: &str) -> Option<Class> {
        self.lists()
            .into_iter()
            .find_map(|(class, list)| list.contains(s).then_some(class))
    }

    pub fn reserved_words(&self) -> impl Iterator<Item = &str> {
        self.reserved_words.iter().map(String::as_str)
    }

    pub fn operators(&self) -> impl Iterator<Item = &str> {
        self.operators.iter().map(String::as_str)
    }

    pub fn punctuation(&self) -> impl Iterator<Item = &str> {
        self.punctuation.iter().map(String::as_str)
    }

    /// Operators and punctuation longer than one character that contain no
    /// word characters, such as `==` or `->`.  The tokenizer must try these
    /// before splitting input into single characters.
    pub fn compound_symbols(&self) -> impl Iterator<Item = &str> {
        self.operators()
            .chain(self.punctuation())
            .filter(|symbol| {
                symbol.chars().count() > 1
                    && !symbol.chars().any(|c| c.is_alphanumeric() || c == '_')
            })
    }

    fn missing_structural_keywords(&self) -> impl Iterator<Item = &'static str> {
        STRUCTURAL_KEYWORDS
            .iter()
            .copied()
            .filter(|keyword| !self.is_reserved(keyword))
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self {
            reserved_words: DEFAULT_RESERVED_WORDS.iter().map(|s| s.to_string()).collect(),
            operators: DEFAULT_OPERATORS.iter().map(|s| s.to_string()).collect(),
            punctuation: DEFAULT_PUNCTUATION.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Class, Error, Taxonomy};

    #[test]
    fn default_is_disjoint() {
        let default = Taxonomy::default();
        let checked = Taxonomy::new(
            default.reserved_words(),
            default.operators(),
            default.punctuation(),
        )
        .unwrap();
        assert_eq!(default, checked);
    }

    #[test]
    fn overlap() {
        let error = Taxonomy::new(["si", "("], ["+"], ["(", ")"]).unwrap_err();
        assert!(matches!(
            error,
            Error::Overlap {
                ref symbol,
                first: Class::ReservedWords,
                second: Class::Punctuation,
            } if symbol == "("
        ));
        assert_eq!(
            error.to_string(),
            "\"(\" appears in both `reservedWords` and `punctuation`."
        );
    }

    #[test]
    fn bad_symbols() {
        assert!(matches!(
            Taxonomy::new(["si"], [""], [";"]),
            Err(Error::Empty(Class::Operators))
        ));
        assert!(matches!(
            Taxonomy::new(["sin fin"], ["+"], [";"]),
            Err(Error::Whitespace { class: Class::ReservedWords, .. })
        ));
    }

    #[test]
    fn classes() {
        let taxonomy = Taxonomy::default();
        assert_eq!(taxonomy.class_of("mientras"), Some(Class::ReservedWords));
        assert_eq!(taxonomy.class_of("<="), Some(Class::Operators));
        assert_eq!(taxonomy.class_of(";"), Some(Class::Punctuation));
        assert_eq!(taxonomy.class_of("x"), None);
    }

    #[test]
    fn compound_symbols() {
        let taxonomy = Taxonomy::new(["y"], ["+", "&&", "->", "=="], ["::", ";"]).unwrap();
        assert_eq!(
            taxonomy.compound_symbols().collect::<Vec<_>>(),
            ["&&", "->", "==", "::"]
        );
    }

    #[test]
    fn json_with_legacy_names() {
        let taxonomy = Taxonomy::from_json_str(
            r#"{"Preservada": ["si", "finaliza"], "operadores": ["="], "signos": [";"]}"#,
        )
        .unwrap();
        assert!(taxonomy.is_reserved("finaliza"));
        assert!(taxonomy.is_operator("="));
        assert!(taxonomy.is_punctuation(";"));
    }

    #[test]
    fn json_overlap_is_rejected() {
        let error = Taxonomy::from_json_str(
            r#"{"reservedWords": ["si"], "operators": ["si"], "punctuation": []}"#,
        )
        .unwrap_err();
        assert!(error.to_string().contains("appears in both"));
    }

    #[test]
    fn toml_round_trip() {
        let taxonomy = Taxonomy::default();
        let text = toml::to_string_pretty(&taxonomy).unwrap();
        assert!(text.contains("reservedWords"));
        assert_eq!(Taxonomy::from_toml_str(&text).unwrap(), taxonomy);
    }
}
