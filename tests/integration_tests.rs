//! End-to-end integration tests for complete program execution

use std::rc::Rc;

use bagl::core::Expr;
use bagl::interpreter::{EvalError, Reducer, ReducerConfig};
use bagl::{Error, compile, evaluate};

/// Compile and fully normalize a program
fn run_program(input: &str) -> Rc<Expr> {
    let expr = compile(input).unwrap_or_else(|err| panic!("compiling failed: {err}"));
    Reducer::new(ReducerConfig::default().with_max_steps(1_000_000))
        .normalize(&expr)
        .unwrap_or_else(|err| panic!("evaluation failed: {err}"))
}

const PRELUDE: &str = r"
    map f xs = if (null xs) Nil (Cons (f (head xs)) (map f (tail xs)));
    take n xs = if (== n 0) Nil (if (null xs) Nil (Cons (head xs) (take (- n 1) (tail xs))));
    from n = Cons n (from (+ n 1));
    length xs = if (null xs) 0 (+ 1 (length (tail xs)));
    foldr f z xs = if (null xs) z (f (head xs) (foldr f z (tail xs)));
";

fn with_prelude(main: &str) -> String {
    format!("{PRELUDE}\n{main}")
}

#[test]
fn e2e_return_number() {
    assert!(run_program("42").is_number(42.0));
}

#[test]
fn e2e_main_definition() {
    assert!(run_program("main = * 6 7;").is_number(42.0));
}

#[test]
fn e2e_take_from_infinite_map() {
    let result = run_program(&with_prelude("take 3 (map (* 2) (from 1))"));
    assert_eq!(result.to_string(), "(Cons 2 (Cons 4 (Cons 6 Nil)))");
}

#[test]
fn e2e_length() {
    let result = run_program(&with_prelude("length (Cons 1 (Cons 2 (Cons 3 Nil)))"));
    assert!(result.is_number(3.0));
}

#[test]
fn e2e_fold_sum() {
    let result = run_program(&with_prelude("foldr + 0 (take 10 (from 1))"));
    assert!(result.is_number(55.0));
}

#[test]
fn e2e_strings() {
    let source = r#"
        greet name = concat "hello, " name;
        greet "world"
    "#;
    assert_eq!(*run_program(source), Expr::String("hello, world".to_string()));
}

#[test]
fn e2e_unused_bottom_is_harmless() {
    let result = run_program(&with_prelude("length (Cons undefined (Cons undefined Nil))"));
    assert!(result.is_number(2.0));
}

#[test]
fn e2e_main_is_lazy_in_unused_definitions() {
    let source = "
        boom = undefined;
        main = 1;
    ";
    assert!(run_program(source).is_number(1.0));
}

#[test]
fn e2e_unbound_variable() {
    assert_eq!(
        evaluate("x", ReducerConfig::default()),
        Err(Error::Eval(EvalError::UnboundVariable {
            name: "x".to_string()
        }))
    );
}

#[test]
fn e2e_lex_error() {
    assert!(matches!(
        evaluate("@", ReducerConfig::default()),
        Err(Error::Lex(_))
    ));
}

#[test]
fn e2e_parse_error() {
    assert!(matches!(
        evaluate(r"\x x", ReducerConfig::default()),
        Err(Error::Parse(_))
    ));
}

#[test]
fn e2e_error_messages_are_readable() {
    let err = evaluate("head Nil", ReducerConfig::default()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("non-empty list"), "message was: {message}");
}
