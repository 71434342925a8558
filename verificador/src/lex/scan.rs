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

//! Line scanning.
//!
//! Scanning splits source text into numbered lines and turns each line into a
//! sequence of [ScanToken]s: one [Token] for each non-blank, non-comment
//! lexeme, followed by a single [ScanToken::EndOfLine].

use crate::taxonomy::Taxonomy;

use super::{
    Category, Token,
    classify::classify,
    segment::{Segment, Segmenter},
};

/// One line of source text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based line number.
    pub number: usize,

    /// The line's text, without its line terminator.
    pub text: &'a str,
}

/// Splits `source` into lines separated by `\n`, removing a `\r` that
/// precedes each `\n`.
pub fn lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    source
        .split('\n')
        .enumerate()
        .map(|(index, text)| SourceLine {
            number: index + 1,
            text: text.strip_suffix('\r').unwrap_or(text),
        })
}

/// The output of the line scanner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScanToken {
    Token(Token),
    EndOfLine,
}

impl ScanToken {
    pub fn token(self) -> Option<Token> {
        match self {
            ScanToken::Token(token) => Some(token),
            ScanToken::EndOfLine => None,
        }
    }
}

/// Scans one line of text.
///
/// If the input contains a new-line, scanning stops just after it.
pub struct LineScanner<'a> {
    input: &'a str,
    line: usize,
    column: usize,
    segmenter: &'a Segmenter,
    taxonomy: &'a Taxonomy,
    done: bool,
}

impl<'a> LineScanner<'a> {
    pub fn new(
        line: SourceLine<'a>,
        segmenter: &'a Segmenter,
        taxonomy: &'a Taxonomy,
    ) -> Self {
        Self {
            input: line.text,
            line: line.number,
            column: 1,
            segmenter,
            taxonomy,
            done: false,
        }
    }

    /// Returns just the tokens, without the end-of-line marker.
    pub fn tokens(self) -> impl Iterator<Item = Token> + use<'a> {
        self.filter_map(ScanToken::token)
    }
}

impl Iterator for LineScanner<'_> {
    type Item = ScanToken;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let Some((len, segment)) = self.segmenter.push(self.input) else {
                self.done = true;
                return Some(ScanToken::EndOfLine);
            };
            let (s, rest) = self.input.split_at(len);
            self.input = rest;
            let column = self.column;
            self.column += s.chars().count();

            match segment {
                Segment::EndOfLine => {
                    self.done = true;
                    return Some(ScanToken::EndOfLine);
                }
                Segment::Spaces | Segment::Comment => (),
                Segment::QuotedString | Segment::Word | Segment::Symbol => {
                    let category = if segment == Segment::QuotedString {
                        Category::StringLiteral
                    } else {
                        classify(self.taxonomy, s)
                    };
                    return Some(ScanToken::Token(Token::new(s, category, self.line, column)));
                }
            }
        }
    }
}

/// Scans `line` and returns its tokens.
pub fn scan_line(line: SourceLine<'_>, segmenter: &Segmenter, taxonomy: &Taxonomy) -> Vec<Token> {
    LineScanner::new(line, segmenter, taxonomy).tokens().collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        lex::{
            Category::{self, *},
            Token,
            segment::Segmenter,
        },
        taxonomy::Taxonomy,
    };

    use super::{LineScanner, ScanToken, SourceLine, lines, scan_line};

    fn scan(text: &str) -> Vec<Token> {
        let taxonomy = Taxonomy::default();
        let segmenter = Segmenter::for_taxonomy(&taxonomy);
        scan_line(SourceLine { number: 1, text }, &segmenter, &taxonomy)
    }

    fn summary(tokens: &[Token]) -> Vec<(&str, Category)> {
        tokens
            .iter()
            .map(|token| (token.lexeme.as_str(), token.category))
            .collect()
    }

    /// Removes comments and all white space outside string literals.
    fn collapse(text: &str) -> String {
        let mut output = String::new();
        let mut chars = text.chars().peekable();
        let mut in_string = false;
        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    in_string = !in_string;
                    output.push(c);
                }
                '\\' if in_string => {
                    output.push(c);
                    if let Some(next) = chars.next() {
                        output.push(next);
                    }
                }
                '/' if !in_string && chars.peek() == Some(&'/') => break,
                _ if !in_string && c.is_whitespace() => (),
                _ => output.push(c),
            }
        }
        output
    }

    #[test]
    fn declaration() {
        assert_eq!(
            summary(&scan("entero x = 5;")),
            [
                ("entero", Reserved),
                ("x", Identifier),
                ("=", Operator),
                ("5", Number),
                (";", Punctuation)
            ]
        );
    }

    #[test]
    fn control_header() {
        assert_eq!(
            summary(&scan("si (x >= 10) siguiente // comentario")),
            [
                ("si", Reserved),
                ("(", Punctuation),
                ("x", Identifier),
                (">=", Operator),
                ("10", Number),
                (")", Punctuation),
                ("siguiente", Reserved)
            ]
        );
    }

    #[test]
    fn unknown_tokens() {
        assert_eq!(
            summary(&scan("cadena s = \"hola\" @ 2x;")),
            [
                ("cadena", Reserved),
                ("s", Identifier),
                ("=", Operator),
                ("\"hola\"", StringLiteral),
                ("@", Unknown),
                ("2x", Unknown),
                (";", Punctuation)
            ]
        );
    }

    #[test]
    fn columns() {
        let tokens = scan("  año = 1;");
        assert_eq!(
            tokens
                .iter()
                .map(|token| (token.lexeme.as_str(), token.column))
                .collect::<Vec<_>>(),
            [("año", 3), ("=", 7), ("1", 9), (";", 10)]
        );
    }

    #[test]
    fn blank_lines_have_no_tokens() {
        assert!(scan("").is_empty());
        assert!(scan("   \t ").is_empty());
        assert!(scan("   // solo comentario").is_empty());
    }

    #[test]
    fn end_of_line_marker() {
        let taxonomy = Taxonomy::default();
        let segmenter = Segmenter::default();
        let scan_tokens: Vec<_> = LineScanner::new(
            SourceLine {
                number: 4,
                text: "x++",
            },
            &segmenter,
            &taxonomy,
        )
        .collect();
        assert_eq!(
            scan_tokens,
            [
                ScanToken::Token(Token::new("x", Identifier, 4, 1)),
                ScanToken::Token(Token::new("++", Operator, 4, 2)),
                ScanToken::EndOfLine,
            ]
        );
    }

    #[test]
    fn lexemes_reproduce_line() {
        for text in [
            "entero x = 5;",
            "si(x==1)siguiente",
            "  cadena   s = \"a  b // c\";   // nota",
            "para (i = 0; i < 10; i++) siguiente",
            "x = y @ 2x # \"abierta",
            "imprimir(\"dijo \\\"hola\\\"\");",
        ] {
            let concatenated: String = scan(text)
                .iter()
                .map(|token| token.lexeme.as_str())
                .collect();
            assert_eq!(concatenated, collapse(text), "{text:?}");
        }
    }

    #[test]
    fn line_numbers() {
        let lines: Vec<_> = lines("a\r\n\nb").collect();
        assert_eq!(
            lines,
            [
                SourceLine {
                    number: 1,
                    text: "a"
                },
                SourceLine {
                    number: 2,
                    text: ""
                },
                SourceLine {
                    number: 3,
                    text: "b"
                },
            ]
        );
    }
}
