use std::rc::Rc;

use crate::core::{Data, Expr};

use super::error::EvalError;
use super::whnf::Reducer;

enum Task {
    /// Reduce an expression and, if it is a constructor, schedule its fields
    Visit(Rc<Expr>),
    /// Rebuild a constructor from the last `count` finished values
    Rebuild(Data, usize),
}

impl Reducer {
    /// Reduce `expr` and every constructor field reachable from it.
    ///
    /// Only data is forced: functions and partial applications stay as they
    /// are. An infinite structure never finishes; bound it with a step budget.
    pub fn normalize(&mut self, expr: &Rc<Expr>) -> Result<Rc<Expr>, EvalError> {
        let mut tasks = vec![Task::Visit(Rc::clone(expr))];
        let mut values: Vec<Rc<Expr>> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Visit(expr) => {
                    let value = self.whnf(&expr)?;
                    let nested = match value.as_ref() {
                        Expr::Data(data) => data
                            .fields()
                            .filter(|fields| !fields.is_empty())
                            .map(|fields| (data.clone(), fields.to_vec())),
                        _ => None,
                    };
                    match nested {
                        Some((data, fields)) => {
                            tasks.push(Task::Rebuild(data, fields.len()));
                            tasks.extend(fields.into_iter().rev().map(Task::Visit));
                        }
                        None => values.push(value),
                    }
                }
                Task::Rebuild(data, count) => {
                    let fields = values.split_off(values.len() - count);
                    values.push(Rc::new(Expr::Data(data.with_fields(fields))));
                }
            }
        }

        match values.pop() {
            Some(value) => Ok(value),
            None => unreachable!("normalizing always leaves one value"),
        }
    }
}
