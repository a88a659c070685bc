use lachs::Span;

#[lachs::token]
pub enum Token {
    #[terminal("let")]
    Let,
    #[terminal("in")]
    In,
    #[literal("[a-zA-Z_][a-zA-Z0-9_']*")]
    Ident,
    #[literal(r"[0-9]+(\.[0-9]+)?")]
    Number,
    #[literal(r#""([^"\\]|\\.)*""#)]
    StringLiteral,
    #[terminal("\\")]
    Backslash,
    #[terminal(".")]
    Dot,
    #[terminal(";")]
    Semicolon,
    #[terminal("=")]
    Equals,
    #[terminal("==")]
    DoubleEquals,
    #[terminal("!=")]
    NotEquals,
    #[terminal("+")]
    Plus,
    #[terminal("-")]
    Minus,
    #[terminal("*")]
    Star,
    #[terminal("/")]
    Slash,
    #[terminal("<")]
    LessThan,
    #[terminal(">")]
    GreaterThan,
    #[terminal("(")]
    LParen,
    #[terminal(")")]
    RParen,
}

impl Token {
    pub fn pos(&self) -> Span {
        match self {
            Token::Let(inner) => inner.position.clone(),
            Token::In(inner) => inner.position.clone(),
            Token::Ident(inner) => inner.position.clone(),
            Token::Number(inner) => inner.position.clone(),
            Token::StringLiteral(inner) => inner.position.clone(),
            Token::Backslash(inner) => inner.position.clone(),
            Token::Dot(inner) => inner.position.clone(),
            Token::Semicolon(inner) => inner.position.clone(),
            Token::Equals(inner) => inner.position.clone(),
            Token::DoubleEquals(inner) => inner.position.clone(),
            Token::NotEquals(inner) => inner.position.clone(),
            Token::Plus(inner) => inner.position.clone(),
            Token::Minus(inner) => inner.position.clone(),
            Token::Star(inner) => inner.position.clone(),
            Token::Slash(inner) => inner.position.clone(),
            Token::LessThan(inner) => inner.position.clone(),
            Token::GreaterThan(inner) => inner.position.clone(),
            Token::LParen(inner) => inner.position.clone(),
            Token::RParen(inner) => inner.position.clone(),
        }
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::Let(_) => "'let'".to_string(),
            Token::In(_) => "'in'".to_string(),
            Token::Ident(inner) => format!("identifier '{}'", inner.value),
            Token::Number(inner) => format!("number '{}'", inner.value),
            Token::StringLiteral(inner) => format!("string {}", inner.value),
            Token::Backslash(_) => "'\\'".to_string(),
            Token::Dot(_) => "'.'".to_string(),
            Token::Semicolon(_) => "';'".to_string(),
            Token::Equals(_) => "'='".to_string(),
            Token::DoubleEquals(_) => "'=='".to_string(),
            Token::NotEquals(_) => "'!='".to_string(),
            Token::Plus(_) => "'+'".to_string(),
            Token::Minus(_) => "'-'".to_string(),
            Token::Star(_) => "'*'".to_string(),
            Token::Slash(_) => "'/'".to_string(),
            Token::LessThan(_) => "'<'".to_string(),
            Token::GreaterThan(_) => "'>'".to_string(),
            Token::LParen(_) => "'('".to_string(),
            Token::RParen(_) => "')'".to_string(),
        }
    }

    /// Source symbol of an operator token
    pub fn operator(&self) -> Option<&'static str> {
        match self {
            Token::DoubleEquals(_) => Some("=="),
            Token::NotEquals(_) => Some("!="),
            Token::Plus(_) => Some("+"),
            Token::Minus(_) => Some("-"),
            Token::Star(_) => Some("*"),
            Token::Slash(_) => Some("/"),
            Token::LessThan(_) => Some("<"),
            Token::GreaterThan(_) => Some(">"),
            _ => None,
        }
    }
}

/// Remove `--` line comments and `{- -}` block comments.
///
/// Comment characters are dropped but line breaks are kept, so positions
/// reported by the lexer still point at the right line. Comment markers
/// inside string literals are left alone.
pub fn strip_comments(source: &str) -> String {
    let mut output = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut in_string = false;
    let mut block_depth = 0usize;

    while let Some(c) = chars.next() {
        if block_depth > 0 {
            match (c, chars.peek()) {
                ('{', Some('-')) => {
                    chars.next();
                    block_depth += 1;
                }
                ('-', Some('}')) => {
                    chars.next();
                    block_depth -= 1;
                    output.push(' ');
                }
                ('\n', _) => output.push('\n'),
                _ => {}
            }
            continue;
        }

        if in_string {
            output.push(c);
            match c {
                '\\' => output.extend(chars.next()),
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                output.push(c);
            }
            ('-', Some('-')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        output.push('\n');
                        break;
                    }
                }
            }
            ('{', Some('-')) => {
                chars.next();
                block_depth = 1;
            }
            _ => output.push(c),
        }
    }

    output
}
