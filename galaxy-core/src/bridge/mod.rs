//! Conversions between reduced expressions and host-side [`Value`]s.


use std::{fmt::Display, rc::Rc};

use serde::Serialize;

use crate::{
    environment::prelude::{SymbolTable, Value},
    eval::prelude::{eval, EvalResult},
    parser::prelude::Expr
};

pub mod prelude {
    pub use super::{
        from_record,
        from_value,
        render,
        to_value,
        Rendered
    };
}

/// Reads a reduced expression as a value.
///
/// Numbers, `nil` and `cons` structures convert; a `cons` chain ending in
/// `nil` becomes a list, any other chain nests pairs. Anything else
/// (other symbols, partial applications) gives `None`.
pub fn to_value(expr: &Expr) -> Option<Value> {
    let mut heads = vec![];
    let mut current = expr;

    while let Some((head, tail)) = current.as_pair() {
        heads.push(head);
        current = &**tail;
    }

    let tail = match current {
        Expr::Number(value) => Value::Integer(*value),
        Expr::Symbol(name) if name == "nil" => Value::Nil,
        _ => return None,
    };

    let heads = heads.into_iter()
        .map(|head| to_value(head))
        .collect::<Option<Vec<Value>>>()?;

    if tail.is_list() {
        return Some(Value::list(heads));
    }

    Some(heads.into_iter().rev().fold(tail, |tail, head| Value::pair(head, tail)))
}

/// Builds the expression for `value`. Lists become `nil`-terminated `cons`
/// chains, so `to_value(&from_value(v))` gives `v` back for numbers, lists
/// and pairs.
pub fn from_value(value: &Value) -> Rc<Expr> {
    match value {
        Value::Integer(value) => Expr::number(*value),
        Value::Symbol(name) => Expr::symbol(name.as_str()),
        Value::Nil => nil(),
        Value::Pair(left, right) => Expr::cons(from_value(left), from_value(right)),
        Value::List(items) => items.iter()
            .rev()
            .fold(nil(), |tail, item| Expr::cons(from_value(item), tail)),
    }
}

/// Encodes the fields of a record.
///
/// No fields is `nil` and a single field is the field itself. Two fields
/// are applied to each other as `ap a b`, not paired. Longer records nest
/// `cons` cells whose last tail is the last field, with no `nil`.
pub fn from_record(fields: &[Value]) -> Rc<Expr> {
    match fields {
        [] => nil(),
        [field] => from_value(field),
        [function, argument] => Expr::ap(from_value(function), from_value(argument)),
        [init @ .., last] => init.iter()
            .rev()
            .fold(from_value(last), |tail, field| Expr::cons(from_value(field), tail)),
    }
}

fn nil() -> Rc<Expr> {
    Expr::symbol("nil")
}

/// A reduced expression as it is shown to a user: a structured value when
/// it has that shape, its printed form otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Rendered {
    Value(Value),
    Text(String),
}

impl Rendered {
    pub fn from_expr(expr: &Expr) -> Self {
        match to_value(expr) {
            Some(value) => Rendered::Value(value),
            None => Rendered::Text(expr.to_string()),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Rendered::Value(value) => Some(value),
            Rendered::Text(_) => None,
        }
    }
}

impl Display for Rendered {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rendered::Value(value) => write!(f, "{value}"),
            Rendered::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Reduces `expr` against `table` and renders the result.
pub fn render(expr: &Rc<Expr>, table: &SymbolTable) -> EvalResult<Rendered> {
    let value = eval(expr, table)?;

    Ok(Rendered::from_expr(&value))
}
