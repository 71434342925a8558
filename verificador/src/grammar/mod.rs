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

//! Line-level grammar validation.
//!
//! The [Validator] checks one tokenized line at a time against a set of
//! independent rules.  A line may trigger any number of them:
//!
//! - Declarations: `<type> <name> [= <value>];`
//! - Assignments: `<name> = <value>;`, where `<name>` must already be
//!   declared and literal operands must fit its type.
//! - Control headers: `si`, `mientras`, and `para` must be followed by `(`,
//!   and a `para` header must have two `;` separators.
//! - Function declarations: `func <name>(...)`.
//! - Function calls: any `<identifier>(` registers the identifier as a known
//!   function, so that calls before declarations are accepted.
//! - Ambiguity heuristics, which only ever produce warnings.
//!
//! The validator remembers declared variables and known functions from one
//! line to the next, but it knows nothing of blocks: block and bracket
//! structure spanning lines is the business of [crate::pda].

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::{
    lex::Token,
    message::{Category, Diagnostic, Diagnostics},
};

pub mod types;
pub use types::{DataType, Literal};

/// Keywords that introduce a control structure.
pub const CONTROL_KEYWORDS: &[&str] = &["si", "mientras", "para", "sino"];

/// Control keywords that take a parenthesized header.
const HEADER_KEYWORDS: &[&str] = &["si", "mientras", "para"];

/// Control keywords whose header is a condition, in which `=` is suspicious.
const CONDITION_KEYWORDS: &[&str] = &["si", "mientras"];

const ARITHMETIC_OPERATORS: &[&str] = &["+", "-", "*", "/", "%"];

/// Operators whose result is a `booleano`.
const COMPARISON_OPERATORS: &[&str] = &["==", "!=", "<", ">", "<=", ">="];

#[derive(Clone, Debug, Default)]
pub struct Validator {
    variables: IndexMap<String, DataType>,
    functions: IndexSet<String>,

    /// Functions declared with `func`, as opposed to only called.
    declared_functions: HashSet<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets all variables and functions.
    pub fn reset(&mut self) {
        self.variables.clear();
        self.functions.clear();
        self.declared_functions.clear();
    }

    /// Declared variables and their types, in declaration order.
    pub fn variables(&self) -> &IndexMap<String, DataType> {
        &self.variables
    }

    /// Known function names, in the order first seen.
    pub fn functions(&self) -> &IndexSet<String> {
        &self.functions
    }

    pub fn into_parts(self) -> (IndexMap<String, DataType>, IndexSet<String>) {
        (self.variables, self.functions)
    }

    /// Validates `tokens`, all of which are from one line, and appends any
    /// findings to `diagnostics`.
    pub fn validate_line(&mut self, tokens: &[Token], diagnostics: &mut Diagnostics) {
        let Some(first) = tokens.first() else {
            return;
        };
        let assignments = bare_assignments(tokens);

        if let Some(data_type) = DataType::from_token(first) {
            self.check_declaration(data_type, tokens, diagnostics);
        } else if let Some(&equals) = assignments.first() {
            self.check_assignment(tokens, equals, diagnostics);
        }
        if tokens.iter().any(|token| is_one_of(token, CONTROL_KEYWORDS)) {
            check_control_headers(tokens, diagnostics);
        }
        if tokens.iter().any(|token| token.is("func")) {
            self.check_function_declarations(tokens, diagnostics);
        }
        self.register_calls(tokens);
        check_ambiguity(tokens, &assignments, diagnostics);
    }

    fn declare(&mut self, name: &Token, data_type: DataType, diagnostics: &mut Diagnostics) {
        if self.variables.contains_key(&name.lexeme) {
            diagnostics.push(
                Diagnostic::warning(
                    Category::Syntax,
                    name.location(),
                    format!("Variable '{name}' redeclarada"),
                )
                .with_width(name.width()),
            );
        } else {
            self.variables.insert(name.lexeme.clone(), data_type);
        }
    }

    fn check_declaration(
        &mut self,
        data_type: DataType,
        tokens: &[Token],
        diagnostics: &mut Diagnostics,
    ) {
        let keyword = &tokens[0];
        let Some(name) = tokens.get(1) else {
            diagnostics.push(
                Diagnostic::error(
                    Category::Syntax,
                    keyword.location(),
                    format!("Declaración incompleta: falta el nombre después de '{keyword}'"),
                )
                .with_width(keyword.width()),
            );
            return;
        };
        if !name.is_identifier() {
            diagnostics.push(
                Diagnostic::error(
                    Category::Syntax,
                    name.location(),
                    format!("'{name}' no es un identificador válido"),
                )
                .with_width(name.width()),
            );
            return;
        }
        self.declare(name, data_type, diagnostics);

        let uninitialized = || {
            Diagnostic::warning(
                Category::Syntax,
                name.location(),
                format!("Variable '{name}' declarada pero no inicializada"),
            )
            .with_width(name.width())
        };
        match tokens.get(2) {
            None => diagnostics.push(uninitialized()),
            Some(token) if token.is(";") => diagnostics.push(uninitialized()),
            Some(token) if token.is("=") => {
                let value = operand_tokens(&tokens[3..]);
                if value.is_empty() {
                    diagnostics.push(uninitialized());
                } else {
                    check_operands(data_type, value, diagnostics);
                }
            }
            Some(token) => diagnostics.push(
                Diagnostic::error(
                    Category::Syntax,
                    token.location(),
                    format!("Se esperaba '=' o ';' después de '{name}', no '{token}'"),
                )
                .with_width(token.width()),
            ),
        }
    }

    fn check_assignment(&mut self, tokens: &[Token], equals: usize, diagnostics: &mut Diagnostics) {
        let equals_token = &tokens[equals];
        if let Some(operator) = equals
            .checked_sub(1)
            .map(|index| &tokens[index])
            .filter(|operator| {
                is_one_of(operator, ARITHMETIC_OPERATORS)
                    && operator.end_column() == equals_token.column
            })
        {
            diagnostics.push(
                Diagnostic::error(
                    Category::Syntax,
                    operator.location(),
                    format!(
                        "Asignación compuesta '{operator}=' no admitida: escribe la operación completa después de '='"
                    ),
                )
                .with_width(operator.width() + 1),
            );
            return;
        }
        let Some(target) = assignment_target(tokens, equals) else {
            diagnostics.push(
                Diagnostic::error(
                    Category::Syntax,
                    equals_token.location(),
                    "Asignación sin variable",
                )
                .with_width(1),
            );
            return;
        };
        let name = &tokens[target];
        if !name.is_identifier() {
            diagnostics.push(
                Diagnostic::error(
                    Category::Syntax,
                    name.location(),
                    format!("'{name}' no es un identificador válido"),
                )
                .with_width(name.width()),
            );
            return;
        }
        let value = operand_tokens(&tokens[equals + 1..]);

        // `para (entero i = 0; ...)` declares `i` in passing.
        if let Some(data_type) = target
            .checked_sub(1)
            .and_then(|index| DataType::from_token(&tokens[index]))
        {
            self.declare(name, data_type, diagnostics);
            check_operands(data_type, value, diagnostics);
            return;
        }

        match self.variables.get(&name.lexeme) {
            Some(&data_type) => check_operands(data_type, value, diagnostics),
            None => diagnostics.push(
                Diagnostic::error(
                    Category::Syntax,
                    name.location(),
                    format!("Variable '{name}' no declarada"),
                )
                .with_width(name.width()),
            ),
        }
    }

    fn check_function_declarations(&mut self, tokens: &[Token], diagnostics: &mut Diagnostics) {
        for (index, keyword) in tokens.iter().enumerate() {
            if !keyword.is("func") {
                continue;
            }
            let name = match tokens.get(index + 1) {
                Some(name) if name.is_identifier() => name,
                other => {
                    let at = other.unwrap_or(keyword);
                    diagnostics.push(
                        Diagnostic::error(
                            Category::Syntax,
                            at.location(),
                            "Se esperaba un nombre de función válido después de 'func'",
                        )
                        .with_width(at.width()),
                    );
                    continue;
                }
            };
            if !self.declared_functions.insert(name.lexeme.clone()) {
                diagnostics.push(
                    Diagnostic::warning(
                        Category::Syntax,
                        name.location(),
                        format!("Función '{name}' redeclarada"),
                    )
                    .with_width(name.width()),
                );
            }
            self.functions.insert(name.lexeme.clone());

            match tokens.get(index + 2) {
                Some(paren) if paren.is("(") => self.bind_parameters(&tokens[index + 3..]),
                other => {
                    let at = other.unwrap_or(name);
                    diagnostics.push(
                        Diagnostic::error(
                            Category::Syntax,
                            at.location(),
                            format!("Se esperaba '(' después de 'func {name}'"),
                        )
                        .with_width(at.width()),
                    );
                }
            }
        }
    }

    /// Binds `<type> <name>` pairs in a parameter list that starts just after
    /// its `(`.  Names that are already bound keep their binding.
    fn bind_parameters(&mut self, tokens: &[Token]) {
        let end = tokens
            .iter()
            .position(|token| token.is(")"))
            .unwrap_or(tokens.len());
        for pair in tokens[..end].windows(2) {
            if let Some(data_type) = DataType::from_token(&pair[0])
                && pair[1].is_identifier()
            {
                self.variables
                    .entry(pair[1].lexeme.clone())
                    .or_insert(data_type);
            }
        }
    }

    fn register_calls(&mut self, tokens: &[Token]) {
        for pair in tokens.windows(2) {
            if pair[0].is_identifier()
                && pair[1].is("(")
                && !is_one_of(&pair[0], CONTROL_KEYWORDS)
            {
                self.functions.insert(pair[0].lexeme.clone());
            }
        }
    }
}

fn is_one_of(token: &Token, lexemes: &[&str]) -> bool {
    lexemes.contains(&token.lexeme.as_str())
}

/// Returns the indexes of `=` tokens that are assignments.  A `=` directly
/// followed by another `=` token is a spaced-out `==` comparison, so neither
/// counts.
fn bare_assignments(tokens: &[Token]) -> Vec<usize> {
    let mut assignments = Vec::new();
    let mut index = 0;
    while index < tokens.len() {
        if tokens[index].is("=") {
            if tokens.get(index + 1).is_some_and(|next| next.is("=")) {
                index += 2;
                continue;
            }
            assignments.push(index);
        }
        index += 1;
    }
    assignments
}

/// Returns the index of the variable assigned by the `=` at `equals`.  For an
/// array element, as in `a[i + 1] = 0`, this is the array's name.
fn assignment_target(tokens: &[Token], equals: usize) -> Option<usize> {
    let before = equals.checked_sub(1)?;
    if !tokens[before].is("]") {
        return Some(before);
    }
    let mut depth = 0;
    for index in (0..=before).rev() {
        if tokens[index].is("]") {
            depth += 1;
        } else if tokens[index].is("[") {
            depth -= 1;
            if depth == 0 {
                return index.checked_sub(1);
            }
        }
    }
    None
}

/// Returns the tokens of the expression that begins `tokens`: everything up to
/// the first `;` or `,`, or the first `)` without a matching `(`.
fn operand_tokens(tokens: &[Token]) -> &[Token] {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate() {
        if token.is("(") {
            depth += 1;
        } else if token.is(")") {
            if depth == 0 {
                return &tokens[..index];
            }
            depth -= 1;
        } else if depth == 0 && (token.is(";") || token.is(",")) {
            return &tokens[..index];
        }
    }
    tokens
}

/// Returns the tokens of `value` outside any parentheses or brackets.
fn top_level(value: &[Token]) -> impl Iterator<Item = &Token> {
    let mut depth = 0usize;
    value.iter().filter(move |token| {
        if token.is("(") || token.is("[") {
            depth += 1;
            false
        } else if token.is(")") || token.is("]") {
            depth = depth.saturating_sub(1);
            false
        } else {
            depth == 0
        }
    })
}

/// Checks that the literal operands in `value` fit `data_type`.  Operands
/// inside parentheses, such as function arguments, are not checked.  A
/// top-level comparison makes the whole value a `booleano`, so then only the
/// comparison is checked.  At most one error is reported.
fn check_operands(data_type: DataType, value: &[Token], diagnostics: &mut Diagnostics) {
    if let Some(comparison) =
        top_level(value).find(|token| is_one_of(token, COMPARISON_OPERATORS))
    {
        if data_type != DataType::Booleano {
            diagnostics.push(
                Diagnostic::error(
                    Category::Type,
                    comparison.location(),
                    format!(
                        "Tipo incompatible: la comparación '{comparison}' da un valor 'booleano', no compatible con el tipo '{data_type}'"
                    ),
                )
                .with_width(comparison.width()),
            );
        }
        return;
    }
    for token in top_level(value) {
        if let Some(literal) = Literal::of(token)
            && !data_type.accepts(literal)
        {
            diagnostics.push(
                Diagnostic::error(
                    Category::Type,
                    token.location(),
                    format!(
                        "Tipo incompatible: el valor {token} no es compatible con el tipo '{data_type}'"
                    ),
                )
                .with_width(token.width()),
            );
            return;
        }
    }
}

/// Returns the index of the `)` that closes the `(` at `open`, or `None` if
/// the line ends first.
fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open) {
        if token.is("(") {
            depth += 1;
        } else if token.is(")") {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}

/// Returns the tokens strictly inside the header that starts with the `(` at
/// `open`, running to the end of the line if the header is not closed.
fn header(tokens: &[Token], open: usize) -> std::ops::Range<usize> {
    open + 1..matching_paren(tokens, open).unwrap_or(tokens.len())
}

fn check_control_headers(tokens: &[Token], diagnostics: &mut Diagnostics) {
    for (index, keyword) in tokens.iter().enumerate() {
        if !is_one_of(keyword, HEADER_KEYWORDS) {
            continue;
        }
        if !tokens.get(index + 1).is_some_and(|next| next.is("(")) {
            diagnostics.push(
                Diagnostic::error(
                    Category::Syntax,
                    keyword.location(),
                    format!("'{keyword}' debe ir seguido de '('"),
                )
                .with_width(keyword.width()),
            );
            continue;
        }
        if keyword.is("para") {
            let separators = tokens[header(tokens, index + 1)]
                .iter()
                .filter(|token| token.is(";"))
                .count();
            match separators {
                0 => diagnostics.push(
                    Diagnostic::error(
                        Category::Syntax,
                        keyword.location(),
                        "'para' requiere el formato para (inicio; condición; incremento)",
                    )
                    .with_width(keyword.width()),
                ),
                2 => (),
                1 => diagnostics.push(
                    Diagnostic::warning(
                        Category::Syntax,
                        keyword.location(),
                        "Cabecera de 'para' incompleta: se esperaban 2 ';' y hay 1",
                    )
                    .with_width(keyword.width()),
                ),
                n => diagnostics.push(
                    Diagnostic::warning(
                        Category::Syntax,
                        keyword.location(),
                        format!("Cabecera de 'para' con ';' de más: se esperaban 2 ';' y hay {n}"),
                    )
                    .with_width(keyword.width()),
                ),
            }
        }
    }
}

fn check_ambiguity(tokens: &[Token], assignments: &[usize], diagnostics: &mut Diagnostics) {
    let is_arithmetic = |token: &Token| is_one_of(token, ARITHMETIC_OPERATORS);
    let is_wordlike = |token: &Token| {
        token
            .lexeme
            .chars()
            .all(crate::lex::segment::is_word_char)
    };

    // Operator written flush against words on both sides, as in `a-b`.
    if let Some(operator) = tokens.windows(3).find_map(|window| {
        let (before, operator, after) = (&window[0], &window[1], &window[2]);
        (is_arithmetic(operator)
            && is_wordlike(before)
            && is_wordlike(after)
            && before.end_column() == operator.column
            && operator.end_column() == after.column)
            .then_some(operator)
    }) {
        diagnostics.push(
            Diagnostic::warning(
                Category::Ambiguity,
                operator.location(),
                format!("Operador '{operator}' sin espacios alrededor (ambigüedad)"),
            )
            .with_width(operator.width()),
        );
    }

    // `=` inside the condition of `si` or `mientras`.
    for (index, keyword) in tokens.iter().enumerate() {
        if is_one_of(keyword, CONDITION_KEYWORDS)
            && tokens.get(index + 1).is_some_and(|next| next.is("("))
        {
            let range = header(tokens, index + 1);
            if let Some(&equals) = assignments.iter().find(|&&index| range.contains(&index)) {
                diagnostics.push(
                    Diagnostic::warning(
                        Category::Ambiguity,
                        tokens[equals].location(),
                        format!("¿Asignación dentro de la condición de '{keyword}'? (ambigüedad)"),
                    )
                    .with_width(1),
                );
            }
        }
    }

    // Two arithmetic operators in a row, as in `a + * b`.
    for pair in tokens.windows(2) {
        if is_arithmetic(&pair[0]) && is_arithmetic(&pair[1]) {
            diagnostics.push(
                Diagnostic::warning(
                    Category::Ambiguity,
                    pair[0].location(),
                    format!("Operadores consecutivos '{}' '{}' (ambigüedad)", pair[0], pair[1]),
                )
                .with_width(pair[1].end_column() - pair[0].column),
            );
        }
    }

    if assignments.len() > 1 {
        let second = &tokens[assignments[1]];
        diagnostics.push(
            Diagnostic::warning(
                Category::Ambiguity,
                second.location(),
                "Asignaciones múltiples en una misma línea (ambigüedad)",
            )
            .with_width(1),
        );
    }
}

#[cfg(test)]
mod tests;
