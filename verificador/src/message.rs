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

use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

use enum_map::Enum;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

/// A line number and optional column number within a source text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Point {
    /// 1-based line number.
    pub line: usize,

    /// 1-based column number, counted in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Point {
    pub fn new(line: usize) -> Self {
        Self { line, column: None }
    }

    pub fn with_column(line: usize, column: usize) -> Self {
        Self {
            line,
            column: Some(column),
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.column {
            Some(column) => write!(f, "{}.{column}", self.line),
            None => write!(f, "{}", self.line),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    pub fn as_title_str(&self) -> &'static str {
        match self {
            Severity::Error => "Errores",
            Severity::Warning => "Advertencias",
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// What part of the analysis produced a diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A token that matches no taxonomy entry and no literal shape.
    Lexical,

    /// A malformed declaration, assignment, control header, or function
    /// header.
    Syntax,

    /// Unbalanced brackets or blocks, found by the automaton.
    Structure,

    /// A literal whose shape does not fit the declared type.
    Type,

    /// A heuristically suspicious construct.
    Ambiguity,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Lexical => "lexical",
            Category::Syntax => "syntax",
            Category::Structure => "structure",
            Category::Type => "type",
            Category::Ambiguity => "ambiguity",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// One finding about the analyzed source.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: Category,

    #[serde(flatten)]
    pub location: Point,

    /// Width in characters of the offending text starting at
    /// `location.column`, used only for underlining.
    #[serde(skip)]
    pub width: usize,

    #[serde(rename = "message")]
    pub text: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        category: Category,
        location: Point,
        text: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            location,
            width: 0,
            text: text.into(),
        }
    }

    pub fn error(category: Category, location: Point, text: impl Into<String>) -> Self {
        Self::new(Severity::Error, category, location, text)
    }

    pub fn warning(category: Category, location: Point, text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, location, text)
    }

    pub fn with_width(self, width: usize) -> Self {
        Self { width, ..self }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    /// Returns an object that displays this diagnostic followed by
    /// `source_line`, the text of line `self.location.line`, with the
    /// offending columns underlined.
    pub fn with_source<'a>(&'a self, source_line: &'a str) -> WithSource<'a> {
        WithSource {
            diagnostic: self,
            source_line,
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}: {}: {}", self.location, self.severity, self.text)
    }
}

impl Debug for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self, f)
    }
}

pub struct WithSource<'a> {
    diagnostic: &'a Diagnostic,
    source_line: &'a str,
}

impl Display for WithSource<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let Diagnostic {
            location, width, ..
        } = self.diagnostic;
        write!(f, "{}", self.diagnostic)?;
        write!(f, "\n{:5} | {}", location.line, self.source_line)?;
        if let Some(column) = location.column {
            // Columns count characters, but the underline has to line up with
            // what a fixed-width terminal shows.
            let prefix: String = self.source_line.chars().take(column - 1).collect();
            let marked: String = self
                .source_line
                .chars()
                .skip(column - 1)
                .take((*width).max(1))
                .collect();
            write!(f, "\n      | ")?;
            for _ in 0..prefix.width() {
                f.write_str(" ")?;
            }
            f.write_str("^")?;
            for _ in 1..marked.width().max(1) {
                f.write_str("~")?;
            }
        }
        Ok(())
    }
}

/// An ordered collection of diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.0.iter().filter(|d| d.severity == severity).count()
    }

    /// Splits into errors and warnings, each keeping its original order.
    pub fn into_split(self) -> (Vec<Diagnostic>, Vec<Diagnostic>) {
        self.0
            .into_iter()
            .partition(|diagnostic| diagnostic.severity == Severity::Error)
    }
}
