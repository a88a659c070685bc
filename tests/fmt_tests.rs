use bagl::compile;
use bagl::core::Expr;
use bagl::fmt::pretty;

fn roundtrip(source: &str) -> String {
    compile(source)
        .unwrap_or_else(|err| panic!("compiling failed: {err}"))
        .to_string()
}

#[test]
fn lambdas_print_one_parameter_at_a_time() {
    assert_eq!(roundtrip(r"\x y. x"), r"\x. \y. x");
}

#[test]
fn nested_application_in_argument_is_parenthesized() {
    assert_eq!(roundtrip("f (g x) y"), "f (g x) y");
}

#[test]
fn lambda_in_function_position_is_parenthesized() {
    assert_eq!(roundtrip(r"(\x. x) 1"), r"(\x. x) 1");
}

#[test]
fn markers_and_builtins_print_their_names() {
    assert_eq!(roundtrip("if True undefined False"), "if True undefined False");
    assert_eq!(roundtrip("seq Nil (Cons 1)"), "seq Nil (Cons 1)");
    assert_eq!(roundtrip("== 1 2"), "== 1 2");
}

#[test]
fn numbers_print_without_trailing_zeros() {
    assert_eq!(roundtrip("120"), "120");
    assert_eq!(roundtrip("2.5"), "2.5");
}

#[test]
fn negative_argument_is_parenthesized() {
    let expr = Expr::apply(Expr::var("f"), Expr::number(-1.0));
    assert_eq!(expr.to_string(), "f (-1)");
}

#[test]
fn strings_are_quoted() {
    assert_eq!(roundtrip(r#"concat "a\"b""#), r#"concat "a\"b""#);
}

#[test]
fn let_prints_inline() {
    assert_eq!(roundtrip("let a = 1; b = a in b"), "let a = 1; b = a in b");
}

#[test]
fn let_as_argument_is_parenthesized() {
    assert_eq!(roundtrip("f (let a = 1 in a)"), "f (let a = 1 in a)");
}

#[test]
fn pretty_spreads_let_over_lines() {
    let expr = compile("let a = 1; b = a in b").unwrap();
    assert_eq!(pretty(&expr), "let\n  a = 1;\n  b = a\nin b");
}

#[test]
fn pretty_prints_definitions_as_a_group() {
    let expr = compile(r"double x = * 2 x; double 21").unwrap();
    assert_eq!(pretty(&expr), "let\n  double = \\x. * 2 x\nin double 21");
}

#[test]
fn evaluated_list_prints_as_constructor_applications() {
    let value = bagl::evaluate("Cons 1 Nil", Default::default()).unwrap();
    assert_eq!(value.to_string(), "(Cons 1 Nil)");
}
