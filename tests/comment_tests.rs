use bagl::lexer::{Token, strip_comments};

fn idents(source: &str) -> Vec<String> {
    let source = strip_comments(source);
    Token::lex(&source)
        .unwrap()
        .into_iter()
        .filter_map(|token| match token {
            Token::Ident(i) => Some(i.value),
            _ => None,
        })
        .collect()
}

#[test]
fn single_line_comment_ignored() {
    let source = r#"
        -- This is a comment
        main = 42;
    "#;

    assert_eq!(idents(source), vec!["main"]);
}

#[test]
fn inline_comments() {
    let source = r#"
        fact n = if (== n 0) 1 (* n (fact (- n 1))); -- recursive case
        fact 5 -- entry point
    "#;

    let names = idents(source);
    assert!(names.contains(&"fact".to_string()));
    assert!(!names.contains(&"recursive".to_string()));
    assert!(!names.contains(&"entry".to_string()));
}

#[test]
fn block_comment_ignored() {
    let source = r#"
        {- This is a
           multi-line comment -}
        main = 42;
    "#;

    assert_eq!(idents(source), vec!["main"]);
}

#[test]
fn nested_block_comments() {
    assert_eq!(idents("a {- outer {- inner -} still outer -} b"), vec!["a", "b"]);
}

#[test]
fn line_breaks_are_kept() {
    let stripped = strip_comments("x -- one\ny -- two\nz");
    assert_eq!(stripped, "x \ny \nz");
    assert_eq!(stripped.lines().count(), 3);
}

#[test]
fn comment_markers_inside_strings_are_kept() {
    let source = r#"concat "a -- b" "{- c -}""#;
    assert_eq!(strip_comments(source), source);
}

#[test]
fn minus_operator_is_not_a_comment() {
    let stripped = strip_comments("- 5 3");
    assert_eq!(stripped, "- 5 3");
}

#[test]
fn commented_program_still_runs() {
    let source = r#"
        -- doubles its argument
        double x = * 2 x; {- block -}
        double 21 -- answer
    "#;

    let result = bagl::evaluate(source, Default::default()).unwrap();
    assert!(result.is_number(42.0));
}
