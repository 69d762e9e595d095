//! End-to-end scenarios exercised through the public `parse`/`eval` API,
//! the way an embedder of this crate would use it.

use monkey_lang::environment::Environment;
use monkey_lang::{eval, parse};

fn run(input: &str) -> String {
    let (program, errors) = parse(input);
    assert!(errors.is_empty(), "unexpected parser errors: {errors:?}");
    let env = Environment::new();
    eval(&program, &env).inspect()
}

#[test]
fn arithmetic_precedence() {
    assert_eq!(run("5 + 5 * 2"), "15");
}

#[test]
fn let_chain() {
    assert_eq!(run("let a = 5; let b = a; let c = a + b + 5; c"), "15");
}

#[test]
fn nested_if_return_unwraps_at_program_boundary() {
    assert_eq!(
        run("if (10 > 1) { if (10 > 1) { return 10; } return 1; }"),
        "10"
    );
}

#[test]
fn curried_closures() {
    assert_eq!(
        run("let newAdder = fn(x) { fn(y) { x + y } }; let addTwo = newAdder(2); addTwo(2)"),
        "4"
    );
}

#[test]
fn type_mismatch_is_a_runtime_error() {
    assert_eq!(run("5 + true"), "Error: type mismatch: INTEGER + BOOLEAN");
}

#[test]
fn string_concatenation() {
    assert_eq!(run(r#""Hello" + " " + "World!""#), "Hello World!");
}

#[test]
fn builtin_len_over_strings_and_its_type_error() {
    assert_eq!(run(r#"len("hello world")"#), "11");
    assert_eq!(
        run("len(1)"),
        "Error: argument to 'len' not supported, got INTEGER"
    );
}

#[test]
fn zero_is_truthy() {
    assert_eq!(run("!0"), "false");
    assert_eq!(run("!!5"), "true");
}

#[test]
fn shadowing_a_parameter_does_not_leak_outward() {
    assert_eq!(run("let x = 1; let f = fn(x) { x }; f(2)"), "2");
    assert_eq!(run("let x = 1; let f = fn(x) { x }; f(2); x"), "1");
}

#[test]
fn empty_program_evaluates_to_null() {
    assert_eq!(run(""), "null");
}

#[test]
fn error_short_circuits_enclosing_expression() {
    // the right-hand side of `+` is never evaluated once the left errors.
    assert_eq!(
        run("let counter = fn() { true + 1 }; counter() + missing_identifier"),
        "Error: type mismatch: BOOLEAN + INTEGER"
    );
}

#[test]
fn recursive_function_via_self_referential_binding() {
    let input = "
        let fact = fn(n) {
            if (n == 0) { 1 } else { n * fact(n - 1) }
        };
        fact(5)
    ";
    assert_eq!(run(input), "120");
}

#[test]
fn function_value_inspects_with_body_source() {
    assert_eq!(run("fn(x) { x + 2; }"), "fn(x) {\n(x + 2)\n}");
}
