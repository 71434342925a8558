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

//! Declared types and the literal shapes they accept.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::Serialize;

use crate::lex::{
    Category, Token,
    classify::{is_integer, is_number},
};

/// The two literal keywords of type `booleano`.
pub const BOOLEAN_LITERALS: [&str; 2] = ["verdadero", "falso"];

/// A variable's declared type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// `entero`: accepts integer literals.
    Entero,

    /// `decimal`: accepts integer and decimal literals.
    Decimal,

    /// `cadena`: accepts string literals.
    Cadena,

    /// `booleano`: accepts `verdadero` and `falso`.
    Booleano,

    /// `caracter`: accepts string literals that contain exactly one
    /// character.
    Caracter,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Entero => "entero",
            DataType::Decimal => "decimal",
            DataType::Cadena => "cadena",
            DataType::Booleano => "booleano",
            DataType::Caracter => "caracter",
        }
    }

    /// Returns the type named by `token`, if it is a type keyword.
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.category == Category::StringLiteral {
            None
        } else {
            token.lexeme.parse().ok()
        }
    }

    /// Returns true if a value of shape `literal` may be stored in a variable
    /// of this type.
    pub fn accepts(&self, literal: Literal) -> bool {
        match self {
            DataType::Entero => literal == Literal::Integer,
            DataType::Decimal => matches!(literal, Literal::Integer | Literal::Decimal),
            DataType::Cadena => matches!(literal, Literal::String { .. }),
            DataType::Booleano => literal == Literal::Boolean,
            DataType::Caracter => literal == Literal::String { chars: 1 },
        }
    }
}

impl FromStr for DataType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entero" => Ok(DataType::Entero),
            "decimal" => Ok(DataType::Decimal),
            "cadena" => Ok(DataType::Cadena),
            "booleano" => Ok(DataType::Booleano),
            "caracter" => Ok(DataType::Caracter),
            _ => Err(()),
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// The shape of a literal operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    /// `\d+`.
    Integer,

    /// `\d+\.\d+`.
    Decimal,

    /// A quoted string with `chars` characters between the quotes, counting
    /// each escape sequence as one.
    String { chars: usize },

    /// `verdadero` or `falso`.
    Boolean,
}

impl Literal {
    /// Returns the shape of `token`, or `None` if it is not a literal (for
    /// example, an identifier, whose type is only known at run time).
    pub fn of(token: &Token) -> Option<Self> {
        let s = token.lexeme.as_str();
        match token.category {
            Category::StringLiteral => Some(Literal::String {
                chars: unescaped_len(&s[1..s.len() - 1]),
            }),
            _ if is_integer(s) => Some(Literal::Integer),
            _ if is_number(s) => Some(Literal::Decimal),
            _ if BOOLEAN_LITERALS.contains(&s) => Some(Literal::Boolean),
            _ => None,
        }
    }
}

fn unescaped_len(s: &str) -> usize {
    let mut n = 0;
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next();
        }
        n += 1;
    }
    n
}
