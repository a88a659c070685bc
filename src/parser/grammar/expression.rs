//! Expression parsers

use crate::ast::Binding;
use crate::ast::expression::{Application, Expression, Lambda, Let};

use crate::parser::combinators::{BoxedParser, Expected, many, many1, token};
use crate::parser::state::{ParseState, Parser};

use super::literal::{ident, number, operator, string_literal};

/// expression := lambda | let | application
pub fn expression() -> BoxedParser<Expression> {
    BoxedParser::new(|state: &mut ParseState| {
        (lambda() | let_expression() | application()).parse(state)
    })
}

/// atom := ident | number | string | operator | "(" expression ")"
pub fn atom() -> BoxedParser<Expression> {
    let ident_expr = ident() >> Expression::Ident;
    let number_expr = number() >> Expression::Number;
    let string_expr = string_literal() >> Expression::String;
    let operator_expr = operator() >> Expression::Operator;

    (ident_expr | number_expr | string_expr | operator_expr | parenthesized())
        .expecting(Expected::Expression)
}

/// "(" expression ")"
fn parenthesized() -> BoxedParser<Expression> {
    BoxedParser::new(|state: &mut ParseState| {
        token(Expected::LParen).parse(state)?;
        let inner = expression().parse(state)?;
        token(Expected::RParen).parse(state)?;
        Ok(inner)
    })
}

/// application := atom atom*
///
/// A single atom is returned as is.
pub fn application() -> BoxedParser<Expression> {
    BoxedParser::new(|state: &mut ParseState| {
        let func = atom().parse(state)?;
        let args = many(atom()).parse(state)?;

        let Some(last) = args.last() else {
            return Ok(func);
        };
        let position = func.position().merge(&last.position());
        Ok(Expression::Application(Application {
            func: Box::new(func),
            args,
            position,
        }))
    })
}

/// lambda := "\" ident+ "." expression
pub fn lambda() -> BoxedParser<Expression> {
    BoxedParser::new(|state: &mut ParseState| {
        let start = token(Expected::Backslash).parse(state)?;
        let params = many1(ident()).parse(state)?;
        token(Expected::Dot).parse(state)?;
        let body = expression().parse(state)?;
        let position = start.pos().merge(&body.position());

        Ok(Expression::Lambda(Lambda {
            params,
            body: Box::new(body),
            position,
        }))
    })
}

/// binding := ident ident* "=" expression
pub fn binding() -> BoxedParser<Binding> {
    BoxedParser::new(|state: &mut ParseState| {
        let name = ident().expecting(Expected::BindingName).parse(state)?;
        let params = many(ident()).parse(state)?;
        token(Expected::Equals).parse(state)?;
        let value = expression().parse(state)?;
        let position = name.position.merge(&value.position());

        Ok(Binding {
            name,
            params,
            value,
            position,
        })
    })
}

/// let := "let" binding (";" binding)* "in" expression
pub fn let_expression() -> BoxedParser<Expression> {
    BoxedParser::new(|state: &mut ParseState| {
        let start = token(Expected::Let).parse(state)?;
        let mut bindings = vec![binding().parse(state)?];
        loop {
            let pos = state.position();
            if token(Expected::Semicolon).parse(state).is_err() {
                state.restore(pos);
                break;
            }
            bindings.push(binding().parse(state)?);
        }
        token(Expected::In).parse(state)?;
        let body = expression().parse(state)?;
        let position = start.pos().merge(&body.position());

        Ok(Expression::Let(Let {
            bindings,
            body: Box::new(body),
            position,
        }))
    })
}
