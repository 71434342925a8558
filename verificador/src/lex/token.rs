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

use std::fmt::{Display, Formatter, Result as FmtResult};

use enum_map::Enum;
use serde::Serialize;

use crate::message::Point;

/// The category of a lexeme.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Enum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A member of the taxonomy's reserved words.
    Reserved,

    /// A member of the taxonomy's operators.
    Operator,

    /// A member of the taxonomy's punctuation.
    Punctuation,

    /// `123` or `1.5`.
    Number,

    /// `[A-Za-z_][A-Za-z0-9_]*` that is not reserved.
    Identifier,

    /// A double-quoted string, quotes included.
    StringLiteral,

    /// Anything else.  Unknown tokens are lexical errors.
    Unknown,
}

impl Category {
    /// Returns the name of this category.  Reports order tokens by this name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Reserved => "reserved",
            Category::Operator => "operator",
            Category::Punctuation => "punctuation",
            Category::Number => "number",
            Category::Identifier => "identifier",
            Category::StringLiteral => "string_literal",
            Category::Unknown => "unknown",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A classified lexeme and where it appeared.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The source text of the token, exactly as written.
    pub lexeme: String,

    /// The token's category.
    pub category: Category,

    /// 1-based line number.
    pub line: usize,

    /// 1-based column number, in characters.
    pub column: usize,
}

impl Token {
    /// Constructs a new token.
    pub fn new(lexeme: impl Into<String>, category: Category, line: usize, column: usize) -> Self {
        Self {
            lexeme: lexeme.into(),
            category,
            line,
            column,
        }
    }

    /// Returns true if this token's text is `lexeme`.
    pub fn is(&self, lexeme: &str) -> bool {
        self.lexeme == lexeme
    }

    /// Returns true if this token is an identifier.
    pub fn is_identifier(&self) -> bool {
        self.category == Category::Identifier
    }

    /// Returns the token's location.
    pub fn location(&self) -> Point {
        Point::with_column(self.line, self.column)
    }

    /// Returns the token's width in characters.
    pub fn width(&self) -> usize {
        self.lexeme.chars().count()
    }

    /// Returns the column just past the end of the token.
    pub fn end_column(&self) -> usize {
        self.column + self.width()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.lexeme)
    }
}
