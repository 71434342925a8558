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

//! Configuration.
//!
//! Settings come from a TOML file, by default `verificador.toml` in the working
//! directory, for example:
//!
//! ```toml
//! taxonomy = "taxonomia.json"
//! max_errors = 20
//! max_warnings = 50
//! deny_warnings = true
//! ```
//!
//! Every key is optional.  Command-line options override the file.

use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use enum_map::{EnumMap, enum_map};
use serde::Deserialize;
use thiserror::Error as ThisError;

use crate::message::Severity;

/// The configuration file read when none is named explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "verificador.toml";

#[derive(ThisError, Debug)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    taxonomy: Option<PathBuf>,
    max_errors: usize,
    max_warnings: usize,
    deny_warnings: bool,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Settings::default().into()
    }
}

impl From<Settings> for SettingsFile {
    fn from(value: Settings) -> Self {
        Self {
            taxonomy: value.taxonomy,
            max_errors: value.max_messages[Severity::Error],
            max_warnings: value.max_messages[Severity::Warning],
            deny_warnings: value.deny_warnings,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "SettingsFile")]
pub struct Settings {
    /// Taxonomy file to use instead of the built-in taxonomy.
    pub taxonomy: Option<PathBuf>,

    /// Maximum number of findings of each severity to display.  Reports are
    /// never truncated, only their rendering.
    pub max_messages: EnumMap<Severity, usize>,

    /// Whether warnings alone make a check fail.
    pub deny_warnings: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            taxonomy: None,
            max_messages: EnumMap::from_fn(|_| 100),
            deny_warnings: false,
        }
    }
}

impl From<SettingsFile> for Settings {
    fn from(value: SettingsFile) -> Self {
        Self {
            taxonomy: value.taxonomy,
            max_messages: enum_map! {
                Severity::Error => value.max_errors,
                Severity::Warning => value.max_warnings,
            },
            deny_warnings: value.deny_warnings,
        }
    }
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_file<P>(path: P) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| Error::Toml {
            path: path.display().to_string(),
            source,
        })
    }

    /// Reads `path` if it is `Some`, otherwise [DEFAULT_CONFIG_FILE] if it
    /// exists, otherwise returns the default settings.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// Returns true if a report with `n_errors` errors and `n_warnings`
    /// warnings should count as a failure.
    pub fn fails(&self, n_errors: usize, n_warnings: usize) -> bool {
        n_errors > 0 || (self.deny_warnings && n_warnings > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::message::Severity;

    use super::{Error, Settings};

    #[test]
    fn defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.max_messages[Severity::Error], 100);
        assert_eq!(settings.max_messages[Severity::Warning], 100);
    }

    #[test]
    fn full() {
        let settings = Settings::from_toml_str(
            r#"
taxonomy = "taxonomia.json"
max_errors = 20
max_warnings = 5
deny_warnings = true
"#,
        )
        .unwrap();
        assert_eq!(settings.taxonomy, Some(PathBuf::from("taxonomia.json")));
        assert_eq!(settings.max_messages[Severity::Error], 20);
        assert_eq!(settings.max_messages[Severity::Warning], 5);
        assert!(settings.deny_warnings);
    }

    #[test]
    fn unknown_key() {
        assert!(Settings::from_toml_str("max_notes = 3").is_err());
    }

    #[test]
    fn missing_file() {
        let error = Settings::from_file("no/such/verificador.toml").unwrap_err();
        assert!(matches!(error, Error::Io { .. }));
        assert!(error.to_string().starts_with("no/such/verificador.toml: "));
    }

    #[test]
    fn fails() {
        let mut settings = Settings::default();
        assert!(settings.fails(1, 0));
        assert!(!settings.fails(0, 3));
        settings.deny_warnings = true;
        assert!(settings.fails(0, 3));
        assert!(!settings.fails(0, 0));
    }
}
