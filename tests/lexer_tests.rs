use bagl::lexer::Token;
use rstest::rstest;

#[test]
fn lex_keywords() {
    let tokens = Token::lex("let in").unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(matches!(tokens[0], Token::Let(_)));
    assert!(matches!(tokens[1], Token::In(_)));
}

#[test]
fn lex_identifiers() {
    let tokens = Token::lex("foo bar_2 x'").unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[0], Token::Ident(i) if i.value == "foo"));
    assert!(matches!(&tokens[1], Token::Ident(i) if i.value == "bar_2"));
    assert!(matches!(&tokens[2], Token::Ident(i) if i.value == "x'"));
}

#[test]
fn lex_numbers() {
    let tokens = Token::lex("42 0 3.25").unwrap();
    assert_eq!(tokens.len(), 3);
    assert!(matches!(&tokens[0], Token::Number(n) if n.value == "42"));
    assert!(matches!(&tokens[1], Token::Number(n) if n.value == "0"));
    assert!(matches!(&tokens[2], Token::Number(n) if n.value == "3.25"));
}

#[test]
fn lex_string_literals() {
    let tokens = Token::lex(r#""hello" "say \"hi\"""#).unwrap();
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[0], Token::StringLiteral(s) if s.value == r#""hello""#));
    assert!(matches!(&tokens[1], Token::StringLiteral(_)));
}

#[rstest]
#[case("\\", "'\\'")]
#[case(".", "'.'")]
#[case(";", "';'")]
#[case("=", "'='")]
#[case("==", "'=='")]
#[case("!=", "'!='")]
#[case("+", "'+'")]
#[case("-", "'-'")]
#[case("*", "'*'")]
#[case("/", "'/'")]
#[case("<", "'<'")]
#[case(">", "'>'")]
#[case("(", "'('")]
#[case(")", "')'")]
fn lex_single_symbol(#[case] source: &str, #[case] description: &str) {
    let tokens = Token::lex(source).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].describe(), description);
}

#[rstest]
#[case("==", "==")]
#[case("!=", "!=")]
#[case("+", "+")]
#[case("-", "-")]
#[case("*", "*")]
#[case("/", "/")]
#[case("<", "<")]
#[case(">", ">")]
fn operator_symbols(#[case] source: &str, #[case] symbol: &str) {
    let tokens = Token::lex(source).unwrap();
    assert_eq!(tokens[0].operator(), Some(symbol));
}

#[test]
fn non_operators_have_no_symbol() {
    let tokens = Token::lex("= foo ( 1").unwrap();
    assert!(tokens.iter().all(|token| token.operator().is_none()));
}

#[test]
fn lex_definition() {
    let tokens = Token::lex(r"double x = * 2 x;").unwrap();
    assert_eq!(tokens.len(), 7);
    assert!(matches!(&tokens[0], Token::Ident(i) if i.value == "double"));
    assert!(matches!(&tokens[1], Token::Ident(i) if i.value == "x"));
    assert!(matches!(tokens[2], Token::Equals(_)));
    assert!(matches!(tokens[3], Token::Star(_)));
    assert!(matches!(&tokens[4], Token::Number(n) if n.value == "2"));
    assert!(matches!(&tokens[5], Token::Ident(i) if i.value == "x"));
    assert!(matches!(tokens[6], Token::Semicolon(_)));
}

#[test]
fn lex_lambda() {
    let tokens = Token::lex(r"\x y. x").unwrap();
    assert_eq!(tokens.len(), 5);
    assert!(matches!(tokens[0], Token::Backslash(_)));
    assert!(matches!(&tokens[1], Token::Ident(i) if i.value == "x"));
    assert!(matches!(&tokens[2], Token::Ident(i) if i.value == "y"));
    assert!(matches!(tokens[3], Token::Dot(_)));
    assert!(matches!(&tokens[4], Token::Ident(i) if i.value == "x"));
}
