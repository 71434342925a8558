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

//! Rendering of analysis reports.
//!
//! Each output format has a [Driver] that writes whole reports to a byte
//! stream.

use std::{
    borrow::Cow,
    ffi::OsStr,
    fmt::{Display, Formatter, Result as FmtResult},
    io::{Result as IoResult, Write},
    path::Path,
};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::report::AnalysisReport;

pub mod csv;
pub mod json;
pub mod text;

use self::{
    csv::CsvDriver,
    json::JsonDriver,
    text::{TextDriver, TextOptions},
};

/// An output driver.
pub trait Driver {
    fn name(&self) -> Cow<'static, str>;

    /// Writes `report`, which was produced by analyzing `source`.
    fn write(&mut self, report: &AnalysisReport, source: &str) -> IoResult<()>;

    /// Ensures that anything written with [Self::write] has reached the
    /// underlying stream.
    fn flush(&mut self) -> IoResult<()>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Findings with source excerpts, a summary, and the token table.
    #[default]
    Text,

    /// The whole report as pretty-printed JSON.
    Json,

    /// One JSON object per finding, one per line.
    Ndjson,

    /// The token table as CSV.
    Csv,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Text => "text",
            Format::Json => "json",
            Format::Ndjson => "ndjson",
            Format::Csv => "csv",
        }
    }

    /// Infers a format from the extension of `path`.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(OsStr::to_str)? {
            "txt" | "text" => Some(Format::Text),
            "json" => Some(Format::Json),
            "ndjson" | "jsonl" => Some(Format::Ndjson),
            "csv" => Some(Format::Csv),
            _ => None,
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Driver configuration.
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub format: Format,

    /// Options that only the text driver uses.
    pub text: TextOptions,
}

impl dyn Driver {
    /// Creates a driver for `config` that writes to `writer`.
    pub fn new(config: &Config, writer: Box<dyn Write>) -> Box<dyn Driver> {
        match config.format {
            Format::Text => Box::new(TextDriver::new(writer, &config.text)),
            Format::Json => Box::new(JsonDriver::new(writer, true)),
            Format::Ndjson => Box::new(JsonDriver::new(writer, false)),
            Format::Csv => Box::new(CsvDriver::new(writer)),
        }
    }
}
