use thiserror::Error;

use super::combinator::Combinator;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A partial application was demanded as a number.
    ///
    /// Example: `ap neg ap add 1`, where `add` still waits for its second
    /// argument.
    #[error("`{combinator}` takes {expected} argument(s) but only got {given}")]
    Arity {
        combinator: Combinator,
        expected: usize,
        given: usize,
    },
    /// A number sits in function position.
    ///
    /// Example: `ap 1 2`
    #[error("the number {value} was applied to {arguments} argument(s)")]
    NotAFunction {
        value: i64,
        arguments: usize,
    },
    /// An arithmetic combinator got something other than a number.
    ///
    /// Example: `ap ap add nil 1`
    #[error("`{combinator}` expects a number, found `{found}`")]
    NotANumber {
        combinator: Combinator,
        found: String,
    },
    #[error("division by zero (`div {numerator} 0`)")]
    DivisionByZero {
        numerator: i64,
    },
}

impl EvalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self {
            EvalError::Arity { combinator, expected, given } => (
                "Not enough arguments",
                vec![format!(
                    "`{combinator}` needs {expected} argument(s) to produce a value, it got {given}"
                )]
            ),
            EvalError::NotAFunction { value, arguments } => (
                "Type error",
                vec![format!("`{value}` is a number and cannot take {arguments} argument(s)")]
            ),
            EvalError::NotANumber { combinator, found } => (
                "Type error",
                vec![
                    format!("`{combinator}` works on numbers only"),
                    format!("Found: {found}"),
                ]
            ),
            EvalError::DivisionByZero { numerator } => (
                "Arithmetic error",
                vec![format!("`{numerator}` divided by zero")]
            ),
        }
    }
}
