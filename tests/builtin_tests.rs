use std::rc::Rc;

use bagl::core::{Builtin, Data, Expr};
use bagl::interpreter::EvalError;
use rstest::rstest;

fn list(items: &[f64]) -> Rc<Expr> {
    items.iter().rev().fold(
        Rc::new(Expr::Data(Data::nil().saturate(vec![]))),
        |tail, item| Rc::new(Expr::Data(Data::cons().saturate(vec![Expr::number(*item), tail]))),
    )
}

#[rstest]
#[case(Builtin::Add, 2.0, 3.0, 5.0)]
#[case(Builtin::Sub, 2.0, 3.0, -1.0)]
#[case(Builtin::Mul, 4.0, 2.5, 10.0)]
#[case(Builtin::Div, 9.0, 2.0, 4.5)]
fn arithmetic(#[case] builtin: Builtin, #[case] a: f64, #[case] b: f64, #[case] expected: f64) {
    let result = builtin.apply(&[Expr::number(a), Expr::number(b)]).unwrap();
    assert_eq!(*result, Expr::Number(expected));
}

#[rstest]
#[case(Builtin::Eq, 1.0, 1.0, true)]
#[case(Builtin::Eq, 1.0, 2.0, false)]
#[case(Builtin::NotEq, 1.0, 2.0, true)]
#[case(Builtin::NotEq, 3.0, 3.0, false)]
#[case(Builtin::Lt, 1.0, 2.0, true)]
#[case(Builtin::Lt, 2.0, 2.0, false)]
#[case(Builtin::Gt, 3.0, 2.0, true)]
#[case(Builtin::Gt, 2.0, 3.0, false)]
fn comparison(#[case] builtin: Builtin, #[case] a: f64, #[case] b: f64, #[case] expected: bool) {
    let result = builtin.apply(&[Expr::number(a), Expr::number(b)]).unwrap();
    assert_eq!(result, Expr::boolean(expected));
}

#[rstest]
#[case("+", Builtin::Add)]
#[case("-", Builtin::Sub)]
#[case("*", Builtin::Mul)]
#[case("/", Builtin::Div)]
#[case("==", Builtin::Eq)]
#[case("!=", Builtin::NotEq)]
#[case("<", Builtin::Lt)]
#[case(">", Builtin::Gt)]
#[case("head", Builtin::Head)]
#[case("tail", Builtin::Tail)]
#[case("null", Builtin::Null)]
#[case("concat", Builtin::Concat)]
fn symbols(#[case] symbol: &str, #[case] builtin: Builtin) {
    assert_eq!(Builtin::from_symbol(symbol), Some(builtin));
    assert_eq!(builtin.symbol(), symbol);
}

#[test]
fn unknown_symbol() {
    assert_eq!(Builtin::from_symbol("%"), None);
}

#[rstest]
#[case(Builtin::Head, 1)]
#[case(Builtin::Tail, 1)]
#[case(Builtin::Null, 1)]
#[case(Builtin::Add, 2)]
#[case(Builtin::Concat, 2)]
fn arities(#[case] builtin: Builtin, #[case] arity: usize) {
    assert_eq!(builtin.arity(), arity);
}

#[test]
fn division_by_zero() {
    let result = Builtin::Div.apply(&[Expr::number(1.0), Expr::number(0.0)]);
    assert_eq!(result, Err(EvalError::DivisionByZero));
}

#[test]
fn arithmetic_on_string_is_a_type_mismatch() {
    let result = Builtin::Add.apply(&[Expr::number(1.0), Expr::string("one")]);
    assert_eq!(
        result,
        Err(EvalError::TypeMismatch {
            expected: "number".to_string(),
            found: "string".to_string(),
        })
    );
}

#[test]
fn wrong_argument_count() {
    let result = Builtin::Add.apply(&[Expr::number(1.0)]);
    assert_eq!(
        result,
        Err(EvalError::ArityMismatch {
            builtin: "+",
            expected: 2,
            found: 1,
        })
    );
}

#[test]
fn head_and_tail_return_stored_fields() {
    let xs = list(&[1.0, 2.0]);

    let head = Builtin::Head.apply(&[Rc::clone(&xs)]).unwrap();
    assert_eq!(*head, Expr::Number(1.0));

    let tail = Builtin::Tail.apply(&[xs]).unwrap();
    assert_eq!(tail, list(&[2.0]));
}

#[test]
fn head_does_not_evaluate_the_field() {
    let cell = Rc::new(Expr::Data(
        Data::cons().saturate(vec![Rc::new(Expr::Bottom), list(&[])]),
    ));
    let head = Builtin::Head.apply(&[cell]).unwrap();
    assert_eq!(*head, Expr::Bottom);
}

#[test]
fn head_of_empty_list() {
    let result = Builtin::Head.apply(&[list(&[])]);
    assert_eq!(
        result,
        Err(EvalError::TypeMismatch {
            expected: "non-empty list".to_string(),
            found: "constructor Nil".to_string(),
        })
    );
}

#[test]
fn tail_of_number() {
    let result = Builtin::Tail.apply(&[Expr::number(3.0)]);
    assert!(matches!(
        result,
        Err(EvalError::TypeMismatch { ref expected, .. }) if expected == "list"
    ));
}

#[test]
fn null_distinguishes_empty_lists() {
    assert_eq!(
        Builtin::Null.apply(&[list(&[])]).unwrap(),
        Expr::boolean(true)
    );
    assert_eq!(
        Builtin::Null.apply(&[list(&[1.0])]).unwrap(),
        Expr::boolean(false)
    );
}

#[test]
fn null_of_string_is_a_type_mismatch() {
    let result = Builtin::Null.apply(&[Expr::string("")]);
    assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
}

#[test]
fn concat_joins_strings() {
    let result = Builtin::Concat
        .apply(&[Expr::string("foo"), Expr::string("bar")])
        .unwrap();
    assert_eq!(*result, Expr::String("foobar".to_string()));
}

#[test]
fn saturating_twice_keeps_the_first_fields() {
    let once = Data::cons().saturate(vec![Expr::number(1.0), list(&[])]);
    let twice = once.saturate(vec![Expr::number(2.0), list(&[])]);
    assert_eq!(once, twice);
    assert!(!Data::cons().is_initialized());
}
