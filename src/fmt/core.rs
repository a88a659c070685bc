//! Pretty printer for core expressions
//!
//! Applications are left-nested and only parenthesized where reading them
//! back would otherwise change the meaning: an application in argument
//! position, or a lambda or `let` anywhere but at the top.

use std::fmt::{self, Display};

use crate::core::{Data, Expr, Lambda, Letrec};

const INDENT: &str = "  ";

/// Where an expression sits relative to the application around it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Position {
    Top,
    Function,
    Argument,
}

struct Formatter {
    buffer: String,
    indent_level: usize,
    multiline: bool,
}

impl Formatter {
    fn new(multiline: bool) -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            multiline,
        }
    }

    fn indent(&mut self) {
        self.indent_level += 1;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn finish(self) -> String {
        self.buffer
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new(false);
        format_expression(self, &mut formatter, Position::Top);
        write!(f, "{}", formatter.finish())
    }
}

/// Render `expr` with every `let` group spread over indented lines
pub fn pretty(expr: &Expr) -> String {
    let mut formatter = Formatter::new(true);
    format_expression(expr, &mut formatter, Position::Top);
    formatter.finish()
}

fn format_expression(expr: &Expr, fmt: &mut Formatter, position: Position) {
    match expr {
        Expr::Variable(name) => fmt.write_str(name),
        Expr::Lambda(lambda) => parenthesized(fmt, position > Position::Top, |fmt| {
            format_lambda(lambda, fmt)
        }),
        Expr::Apply(apply) => parenthesized(fmt, position == Position::Argument, |fmt| {
            format_expression(&apply.func, fmt, Position::Function);
            fmt.write_str(" ");
            format_expression(&apply.arg, fmt, Position::Argument);
        }),
        Expr::Letrec(letrec) => parenthesized(fmt, position > Position::Top, |fmt| {
            format_letrec(letrec, fmt)
        }),
        Expr::If => fmt.write_str("if"),
        Expr::Seq => fmt.write_str("seq"),
        Expr::Bottom => fmt.write_str("undefined"),
        Expr::True => fmt.write_str("True"),
        Expr::False => fmt.write_str("False"),
        Expr::Number(n) => {
            parenthesized(fmt, *n < 0.0 && position == Position::Argument, |fmt| {
                fmt.write_str(&n.to_string())
            })
        }
        Expr::String(s) => fmt.write_str(&format!("{s:?}")),
        Expr::Data(data) => format_data(data, fmt),
        Expr::Builtin(builtin) => fmt.write_str(builtin.symbol()),
        Expr::Closed(thunk) => format_expression(&thunk.current(), fmt, position),
    }
}

fn parenthesized(fmt: &mut Formatter, parens: bool, inner: impl FnOnce(&mut Formatter)) {
    if parens {
        fmt.write_str("(");
    }
    inner(fmt);
    if parens {
        fmt.write_str(")");
    }
}

fn format_lambda(lambda: &Lambda, fmt: &mut Formatter) {
    fmt.write_str("\\");
    fmt.write_str(&lambda.param);
    fmt.write_str(". ");
    format_expression(&lambda.body, fmt, Position::Top);
}

fn format_letrec(letrec: &Letrec, fmt: &mut Formatter) {
    if !fmt.multiline {
        fmt.write_str("let ");
        for (i, (name, value)) in letrec.bindings().enumerate() {
            if i > 0 {
                fmt.write_str("; ");
            }
            fmt.write_str(name);
            fmt.write_str(" = ");
            format_expression(value, fmt, Position::Top);
        }
        fmt.write_str(" in ");
        format_expression(&letrec.body, fmt, Position::Top);
        return;
    }

    fmt.write_str("let");
    fmt.indent();
    let count = letrec.names.len();
    for (i, (name, value)) in letrec.bindings().enumerate() {
        fmt.write_newline();
        fmt.write_indent();
        fmt.write_str(name);
        fmt.write_str(" = ");
        format_expression(value, fmt, Position::Top);
        if i + 1 < count {
            fmt.write_str(";");
        }
    }
    fmt.dedent();
    fmt.write_newline();
    fmt.write_indent();
    fmt.write_str("in ");
    format_expression(&letrec.body, fmt, Position::Top);
}

fn format_data(data: &Data, fmt: &mut Formatter) {
    match data.fields() {
        Some(fields) if !fields.is_empty() => {
            fmt.write_str("(");
            fmt.write_str(data.name());
            for field in fields {
                fmt.write_str(" ");
                format_expression(field, fmt, Position::Argument);
            }
            fmt.write_str(")");
        }
        _ => fmt.write_str(data.name()),
    }
}
