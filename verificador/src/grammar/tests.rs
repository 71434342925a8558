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

use crate::{
    lex::{
        scan::{lines, scan_line},
        segment::Segmenter,
    },
    message::Diagnostics,
    taxonomy::Taxonomy,
};

use super::{DataType, Validator};

fn validate(source: &str) -> (Validator, Diagnostics) {
    let taxonomy = Taxonomy::default();
    let segmenter = Segmenter::for_taxonomy(&taxonomy);
    let mut validator = Validator::new();
    let mut diagnostics = Diagnostics::new();
    for line in lines(source) {
        let tokens = scan_line(line, &segmenter, &taxonomy);
        validator.validate_line(&tokens, &mut diagnostics);
    }
    (validator, diagnostics)
}

#[track_caller]
fn check(source: &str, expected: &[&str]) {
    let (_, diagnostics) = validate(source);
    let actual = diagnostics
        .iter()
        .map(|diagnostic| diagnostic.to_string())
        .collect::<Vec<_>>();
    let expected = expected
        .iter()
        .map(|s| String::from(*s))
        .collect::<Vec<_>>();
    if actual != expected {
        eprintln!("diagnostics differ from expected:");
        for result in diff::slice(&expected, &actual) {
            match result {
                diff::Result::Left(left) => eprintln!("-{left}"),
                diff::Result::Both(left, _right) => eprintln!(" {left}"),
                diff::Result::Right(right) => eprintln!("+{right}"),
            }
        }
        panic!();
    }
}

#[test]
fn declarations() {
    check(
        r#"entero x = 5;
decimal d = 3.14;
entero n = "hola";
booleano b = verdadero;
caracter c = "ab";
cadena s;
entero x = 2;
entero 5 = 2;
entero
decimal e = 2 + 3.5 * x;
entero k = suma(2.5, 1) + 1;
entero z x;
booleano p = x > 0;
entero q = x == 1;
booleano r = suma(x > 1);"#,
        &[
            r#"3.12: error: Tipo incompatible: el valor "hola" no es compatible con el tipo 'entero'"#,
            r#"5.14: error: Tipo incompatible: el valor "ab" no es compatible con el tipo 'caracter'"#,
            "6.8: warning: Variable 's' declarada pero no inicializada",
            "7.8: warning: Variable 'x' redeclarada",
            "8.8: error: '5' no es un identificador válido",
            "9.1: error: Declaración incompleta: falta el nombre después de 'entero'",
            "12.10: error: Se esperaba '=' o ';' después de 'z', no 'x'",
            "14.14: error: Tipo incompatible: la comparación '==' da un valor 'booleano', no compatible con el tipo 'entero'",
        ],
    );
}

#[test]
fn first_declaration_wins() {
    let (validator, _) = validate("entero x = 1;\ncadena x = \"a\";\nx = 2;");
    assert_eq!(validator.variables().get("x"), Some(&DataType::Entero));
}

#[test]
fn declared_variables() {
    let (validator, _) = validate(
        "entero a = 1;\ndecimal b = 2.5;\ncaracter c = \"z\";\nbooleano d;\ncadena e = \"\";",
    );
    assert_eq!(
        validator
            .variables()
            .iter()
            .map(|(name, data_type)| (name.as_str(), *data_type))
            .collect::<Vec<_>>(),
        [
            ("a", DataType::Entero),
            ("b", DataType::Decimal),
            ("c", DataType::Caracter),
            ("d", DataType::Booleano),
            ("e", DataType::Cadena),
        ]
    );
}

#[test]
fn assignments() {
    check(
        "entero x = 1;
x = 2;
y = 3;
x = 2.5;
= 4;
entero a = 0;
a[3] = 5;
b[i + 1] = 5;
x == 3;
5 = x;
x = y;
booleano c = falso;
c = x == 1;
c = x < 2.5;
x += 1;",
        &[
            "3.1: error: Variable 'y' no declarada",
            "4.5: error: Tipo incompatible: el valor 2.5 no es compatible con el tipo 'entero'",
            "5.1: error: Asignación sin variable",
            "8.1: error: Variable 'b' no declarada",
            "10.1: error: '5' no es un identificador válido",
            "15.3: error: Asignación compuesta '+=' no admitida: escribe la operación completa después de '='",
        ],
    );
}

#[test]
fn control_headers() {
    check(
        "si (x > 1) siguiente
si x > 1
mientras verdadero
sino siguiente
para (entero i = 0; i < 10; i++) siguiente
para (i)
para (i = 0; i < 3)
para (i = 0; i < 3; i++; j++) siguiente",
        &[
            "2.1: error: 'si' debe ir seguido de '('",
            "3.1: error: 'mientras' debe ir seguido de '('",
            "6.1: error: 'para' requiere el formato para (inicio; condición; incremento)",
            "7.1: warning: Cabecera de 'para' incompleta: se esperaban 2 ';' y hay 1",
            "8.1: warning: Cabecera de 'para' con ';' de más: se esperaban 2 ';' y hay 3",
        ],
    );
}

#[test]
fn loop_variable_is_declared() {
    let (validator, diagnostics) = validate("para (entero i = 0; i < 10; i++) siguiente");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(validator.variables().get("i"), Some(&DataType::Entero));
}

#[test]
fn functions() {
    check(
        "func suma(entero a, entero b) siguiente
a = 5;
func suma() siguiente
func 9x()
func resta siguiente
func
imprimir(doble(a));",
        &[
            "3.6: warning: Función 'suma' redeclarada",
            "4.6: error: Se esperaba un nombre de función válido después de 'func'",
            "5.12: error: Se esperaba '(' después de 'func resta'",
            "6.1: error: Se esperaba un nombre de función válido después de 'func'",
        ],
    );

    let (validator, _) =
        validate("func suma(entero a) siguiente\nfunc resta siguiente\nimprimir(doble(a));");
    assert_eq!(
        validator.functions().iter().collect::<Vec<_>>(),
        ["suma", "resta", "doble"]
    );
}

#[test]
fn call_before_declaration() {
    let source = "entero r = cuadrado(3);\nfunc cuadrado(entero n) siguiente";
    check(source, &[]);
    let (validator, _) = validate(source);
    assert_eq!(validator.functions().len(), 1);
    assert_eq!(validator.variables().get("n"), Some(&DataType::Entero));
}

#[test]
fn ambiguity() {
    check(
        "entero a = 1;
entero b = a-1;
si (a = 1) siguiente
b = a + * 2;
a = b = 3;
si (a = = 1) siguiente
a = 2*3;",
        &[
            "2.13: warning: Operador '-' sin espacios alrededor (ambigüedad)",
            "3.7: warning: ¿Asignación dentro de la condición de 'si'? (ambigüedad)",
            "4.7: warning: Operadores consecutivos '+' '*' (ambigüedad)",
            "5.7: warning: Asignaciones múltiples en una misma línea (ambigüedad)",
            "7.6: warning: Operador '*' sin espacios alrededor (ambigüedad)",
        ],
    );
}

#[test]
fn reset() {
    let (mut validator, _) = validate("entero a = 1;\nf(a);");
    assert!(!validator.variables().is_empty());
    validator.reset();
    assert!(validator.variables().is_empty());
    assert!(validator.functions().is_empty());
}
