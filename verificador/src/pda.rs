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

//! Block and bracket structure.
//!
//! The [Automaton] is a pushdown automaton that reads the tokens of a whole
//! program, line after line, and checks that:
//!
//! - Every `(` and `[` is closed by a matching `)` or `]`.
//!
//! - Every block keyword (`si`, `sino`, `mientras`, `para`, `func`) is
//!   followed by `siguiente`, which opens the block's body, and later by
//!   `finaliza`, which closes it.
//!
//! The stack is the authority on structure.  The automaton also tracks a
//! [State], but only to give context to some warnings.
//!
//! A `)` closes the nearest `(` on the stack, even if block keywords or `[`
//! were pushed after it, so that a header like `si (x > 0)` leaves the `si`
//! frame open underneath a balanced group.  A `]`, on the other hand, must
//! match the top of the stack exactly.
//!
//! A `sino` must come right after the `finaliza` that closes a `si`, as in
//! `finaliza sino siguiente`.

use std::fmt::{Display, Formatter, Result as FmtResult};

use log::trace;

use crate::{
    lex::Token,
    message::{Category, Diagnostic, Diagnostics, Point},
};

/// A keyword that opens a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlockKeyword {
    Si,
    Sino,
    Mientras,
    Para,
    Func,
}

impl BlockKeyword {
    pub fn from_lexeme(s: &str) -> Option<Self> {
        match s {
            "si" => Some(Self::Si),
            "sino" => Some(Self::Sino),
            "mientras" => Some(Self::Mientras),
            "para" => Some(Self::Para),
            "func" => Some(Self::Func),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Si => "si",
            Self::Sino => "sino",
            Self::Mientras => "mientras",
            Self::Para => "para",
            Self::Func => "func",
        }
    }

    /// Returns true if this keyword is followed by a parenthesized header.
    /// `sino` is the only one that is not.
    pub fn has_header(&self) -> bool {
        *self != Self::Sino
    }
}

impl Display for BlockKeyword {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Bracket {
    /// `(`.
    Paren,

    /// `[`.
    Square,
}

impl Bracket {
    pub fn open(&self) -> &'static str {
        match self {
            Self::Paren => "(",
            Self::Square => "[",
        }
    }

    pub fn close(&self) -> &'static str {
        match self {
            Self::Paren => ")",
            Self::Square => "]",
        }
    }
}

/// An element of the automaton's stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Bracket {
        kind: Bracket,
        location: Point,
    },
    Block {
        keyword: BlockKeyword,
        location: Point,

        /// Whether `siguiente` has been seen for this block.
        has_siguiente: bool,
    },
}

impl Frame {
    fn is_block(&self) -> bool {
        matches!(self, Frame::Block { .. })
    }

    /// Returns the diagnostic for this frame remaining open at the end of the
    /// program.
    fn unclosed(&self) -> Diagnostic {
        match self {
            Frame::Bracket { kind, location } => Diagnostic::error(
                Category::Structure,
                *location,
                format!("'{}' sin '{}' correspondiente", kind.open(), kind.close()),
            )
            .with_width(1),
            Frame::Block {
                keyword, location, ..
            } => Diagnostic::error(
                Category::Structure,
                *location,
                format!("'{keyword}' sin 'finaliza' correspondiente"),
            )
            .with_width(keyword.as_str().len()),
        }
    }
}

/// Where the automaton is relative to the innermost block.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// Outside any block.
    #[default]
    Start,

    /// Just read a block keyword that takes a header.
    AwaitingOpenParen,

    /// Inside a block keyword's header, `depth` parentheses deep.
    InsideHeaderParens { depth: usize },

    /// After a block's header, before `siguiente`.
    AwaitingBlockBody,

    /// Inside a block's body.
    InsideBlock,
}

#[derive(Clone, Debug, Default)]
pub struct Automaton {
    stack: Vec<Frame>,
    state: State,

    /// The block closed by the previous structural token, if that token was
    /// `finaliza`.
    just_closed: Option<BlockKeyword>,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.stack.clear();
        self.state = State::Start;
        self.just_closed = None;
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The stack, bottom first.
    pub fn stack(&self) -> &[Frame] {
        &self.stack
    }

    /// Reads each of `tokens` in turn.
    pub fn push_line(&mut self, tokens: &[Token], diagnostics: &mut Diagnostics) {
        for token in tokens {
            self.push(token, diagnostics);
        }
    }

    /// Reads `token`, appending any findings to `diagnostics`.
    pub fn push(&mut self, token: &Token, diagnostics: &mut Diagnostics) {
        if let Some(keyword) = BlockKeyword::from_lexeme(&token.lexeme) {
            self.open_block(keyword, token, diagnostics);
            return;
        }
        match token.lexeme.as_str() {
            "finaliza" => {
                self.finaliza(token, diagnostics);
                return;
            }
            "(" => self.open_paren(token),
            ")" => self.close_paren(token, diagnostics),
            "[" => self.stack.push(Frame::Bracket {
                kind: Bracket::Square,
                location: token.location(),
            }),
            "]" => self.close_square(token, diagnostics),
            "siguiente" => self.siguiente(token, diagnostics),
            _ => return,
        }
        self.just_closed = None;
    }

    /// Ends the program, reporting every frame still on the stack, bottom
    /// first, and resetting the automaton.
    pub fn finish(&mut self, diagnostics: &mut Diagnostics) {
        for frame in self.stack.drain(..) {
            trace!("unclosed {frame:?}");
            diagnostics.push(frame.unclosed());
        }
        self.state = State::Start;
        self.just_closed = None;
    }

    fn open_block(&mut self, keyword: BlockKeyword, token: &Token, diagnostics: &mut Diagnostics) {
        trace!("{}: open {keyword}", token.location());
        if keyword == BlockKeyword::Sino && self.just_closed != Some(BlockKeyword::Si) {
            diagnostics.push(
                Diagnostic::error(
                    Category::Structure,
                    token.location(),
                    "'sino' sin un 'si' previo",
                )
                .with_width(token.width()),
            );
        }
        self.just_closed = None;
        self.stack.push(Frame::Block {
            keyword,
            location: token.location(),
            has_siguiente: false,
        });
        self.state = if keyword.has_header() {
            State::AwaitingOpenParen
        } else {
            State::AwaitingBlockBody
        };
    }

    fn open_paren(&mut self, token: &Token) {
        self.stack.push(Frame::Bracket {
            kind: Bracket::Paren,
            location: token.location(),
        });
        self.state = match self.state {
            State::AwaitingOpenParen => State::InsideHeaderParens { depth: 1 },
            State::InsideHeaderParens { depth } => State::InsideHeaderParens { depth: depth + 1 },
            other => other,
        };
    }

    fn close_paren(&mut self, token: &Token, diagnostics: &mut Diagnostics) {
        match self.stack.iter().rposition(|frame| {
            matches!(
                frame,
                Frame::Bracket {
                    kind: Bracket::Paren,
                    ..
                }
            )
        }) {
            Some(index) => {
                self.stack.remove(index);
            }
            None => diagnostics.push(
                Diagnostic::error(
                    Category::Structure,
                    token.location(),
                    "')' sin '(' correspondiente",
                )
                .with_width(1),
            ),
        }
        if let State::InsideHeaderParens { depth } = self.state {
            self.state = match depth {
                0 | 1 => State::AwaitingBlockBody,
                _ => State::InsideHeaderParens { depth: depth - 1 },
            };
        }
    }

    fn close_square(&mut self, token: &Token, diagnostics: &mut Diagnostics) {
        match self.stack.last() {
            Some(Frame::Bracket {
                kind: Bracket::Square,
                ..
            }) => {
                self.stack.pop();
            }
            Some(top) => {
                let (open, line) = match top {
                    Frame::Bracket { kind, location } => (kind.open(), location.line),
                    Frame::Block {
                        keyword, location, ..
                    } => (keyword.as_str(), location.line),
                };
                diagnostics.push(
                    Diagnostic::error(
                        Category::Structure,
                        token.location(),
                        format!("']' no corresponde con '{open}' abierto en la línea {line}"),
                    )
                    .with_width(1),
                );
            }
            None => diagnostics.push(
                Diagnostic::error(
                    Category::Structure,
                    token.location(),
                    "']' sin '[' correspondiente",
                )
                .with_width(1),
            ),
        }
    }

    fn nearest_block(&self) -> Option<usize> {
        self.stack.iter().rposition(Frame::is_block)
    }

    fn siguiente(&mut self, token: &Token, diagnostics: &mut Diagnostics) {
        let warning = |text: String| {
            Diagnostic::warning(Category::Structure, token.location(), text)
                .with_width(token.width())
        };
        let Some(index) = self.nearest_block() else {
            diagnostics.push(warning(String::from("'siguiente' sin estructura abierta")));
            return;
        };
        let Frame::Block {
            keyword,
            has_siguiente,
            ..
        } = &mut self.stack[index]
        else {
            return;
        };
        if matches!(self.state, State::InsideHeaderParens { .. }) {
            diagnostics.push(warning(format!(
                "'siguiente' dentro de la cabecera de '{keyword}'"
            )));
        } else if *has_siguiente {
            diagnostics.push(warning(format!("'siguiente' repetido en '{keyword}'")));
        }
        trace!("{}: body of {keyword}", token.location());
        *has_siguiente = true;
        self.state = State::InsideBlock;
    }

    fn finaliza(&mut self, token: &Token, diagnostics: &mut Diagnostics) {
        self.just_closed = None;
        let Some(index) = self.nearest_block() else {
            diagnostics.push(
                Diagnostic::error(
                    Category::Structure,
                    token.location(),
                    "'finaliza' sin estructura abierta",
                )
                .with_width(token.width()),
            );
            return;
        };
        let Frame::Block {
            keyword,
            location,
            has_siguiente,
        } = self.stack.remove(index)
        else {
            return;
        };
        self.just_closed = Some(keyword);
        if !has_siguiente {
            diagnostics.push(
                Diagnostic::warning(
                    Category::Structure,
                    location,
                    format!("'{keyword}' cerrado con 'finaliza' sin 'siguiente'"),
                )
                .with_width(keyword.as_str().len()),
            );
        }
        trace!("{}: close block", token.location());
        self.state = if self.stack.iter().any(Frame::is_block) {
            State::InsideBlock
        } else {
            State::Start
        };
    }
}
