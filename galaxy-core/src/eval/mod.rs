pub mod combinator;
pub mod error;

pub mod prelude {
    pub use super::{
        combinator::*,
        error::*,
        eval,
        EvalResult,
        Evaluator
    };
}

#[cfg(test)]
mod tests;

use std::{cell::Cell, rc::Rc};

use log::trace;

use crate::{
    environment::prelude::SymbolTable,
    parser::prelude::{Expr, Memo}
};

use self::{combinator::Combinator, error::EvalError};

pub type EvalResult<T> = Result<T, EvalError>;

/// Reduces `expr` against `table` with a fresh evaluator.
pub fn eval(expr: &Rc<Expr>, table: &SymbolTable) -> EvalResult<Rc<Expr>> {
    Evaluator::new(table).reduce(expr)
}

/// Lazy graph reducer.
///
/// Every application node that gets reduced remembers its normal form, so a
/// definition or a shared argument is reduced at most once no matter how many
/// times it is referenced.
pub struct Evaluator<'a> {
    table: &'a SymbolTable,
    steps: Cell<u64>,
}

enum Step {
    Normal,
    Rewrite(Rc<Expr>),
}

impl<'a> Evaluator<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self {
            table,
            steps: Cell::new(0),
        }
    }

    /// Rule applications performed so far. A memo hit performs none.
    pub fn steps(&self) -> u64 {
        self.steps.get()
    }

    /// Reduces `expr` to weak head normal form.
    pub fn reduce(&self, expr: &Rc<Expr>) -> EvalResult<Rc<Expr>> {
        // Application nodes passed through with no pending arguments. They all
        // denote the value the loop ends with.
        let mut visited: Vec<Rc<Expr>> = vec![];
        let mut current = Rc::clone(expr);

        let value = loop {
            if let Some(value) = memoized(&current) {
                break value;
            }

            // Nothing else can reach a node we hold the only handle to.
            if matches!(*current, Expr::Ap(_)) && Rc::strong_count(&current) > 1 {
                visited.push(Rc::clone(&current));
            }

            match self.step(&current)? {
                Step::Normal => break current,
                Step::Rewrite(next) => current = next,
            }
        };

        for node in visited.iter().chain(std::iter::once(&value)) {
            if let Expr::Ap(ap) = &**node {
                let memo = if Rc::ptr_eq(node, &value) {
                    Memo::Normal
                } else {
                    Memo::Reduced(Rc::clone(&value))
                };

                ap.memoize(memo);
            }
        }

        Ok(value)
    }

    // Walks the left spine of `expr` onto an argument stack (last pushed is
    // the first argument) and applies whatever sits at its head.
    fn step(&self, expr: &Rc<Expr>) -> EvalResult<Step> {
        let mut args: Vec<Rc<Expr>> = vec![];
        let mut head = Rc::clone(expr);
        let mut rewritten = false;

        loop {
            let next = match &*head {
                Expr::Ap(ap) => match ap.memo() {
                    Some(Memo::Reduced(value)) => {
                        rewritten = true;
                        Rc::clone(value)
                    },
                    _ => {
                        args.push(Rc::clone(&ap.right));
                        Rc::clone(&ap.left)
                    }
                },
                Expr::Number(value) => {
                    if !args.is_empty() {
                        return Err(EvalError::NotAFunction {
                            value: *value,
                            arguments: args.len()
                        });
                    }

                    return Ok(stuck(&head, args, rewritten));
                },
                Expr::Symbol(name) => return self.apply_symbol(name, &head, args, rewritten),
            };

            head = next;
        }
    }

    fn apply_symbol(
        &self,
        name: &str,
        head: &Rc<Expr>,
        mut args: Vec<Rc<Expr>>,
        rewritten: bool
    ) -> EvalResult<Step> {
        if let Some(definition) = self.table.get(name) {
            let value = self.reduce(definition)?;
            self.tick();
            trace!("unfolded `{name}` under {} argument(s)", args.len());

            return Ok(Step::Rewrite(rewrap(value, args)));
        }

        let combinator = match Combinator::from_name(name) {
            Some(combinator) => combinator,
            None => return Ok(stuck(head, args, rewritten)),
        };

        let consumed = match combinator.consumes(args.len()) {
            Some(consumed) => consumed,
            None => return Ok(stuck(head, args, rewritten)),
        };

        let mut taken = args.split_off(args.len() - consumed);
        taken.reverse();

        let reduced = self.apply(combinator, &taken)?;
        self.tick();
        trace!("`{combinator}` consumed {consumed} argument(s), {} left", args.len());

        Ok(Step::Rewrite(rewrap(reduced, args)))
    }

    // `x[0]` is the first (innermost) argument.
    fn apply(&self, combinator: Combinator, x: &[Rc<Expr>]) -> EvalResult<Rc<Expr>> {
        let reduced = match combinator {
            Combinator::Neg => Expr::number(self.number(combinator, &x[0])?.wrapping_neg()),
            Combinator::I => Rc::clone(&x[0]),
            Combinator::Nil => boolean(true),
            Combinator::IsNil => boolean(self.reduce(&x[0])?.is_atom("nil")),
            Combinator::Car => Expr::ap(Rc::clone(&x[0]), boolean(true)),
            Combinator::Cdr => Expr::ap(Rc::clone(&x[0]), boolean(false)),
            Combinator::Add => {
                let (a, b) = self.numbers(combinator, x)?;
                Expr::number(a.wrapping_add(b))
            },
            Combinator::Mul => {
                let (a, b) = self.numbers(combinator, x)?;
                Expr::number(a.wrapping_mul(b))
            },
            Combinator::Div => {
                let (numerator, denominator) = self.numbers(combinator, x)?;

                if denominator == 0 {
                    return Err(EvalError::DivisionByZero { numerator });
                }

                Expr::number(numerator.wrapping_div(denominator))
            },
            Combinator::Lt => {
                let (a, b) = self.numbers(combinator, x)?;
                boolean(a < b)
            },
            Combinator::Eq => {
                let (a, b) = self.numbers(combinator, x)?;
                boolean(a == b)
            },
            Combinator::T => Rc::clone(&x[0]),
            Combinator::F => Rc::clone(&x[1]),
            Combinator::Cons if x.len() == 3 => Expr::ap(
                Expr::ap(Rc::clone(&x[2]), Rc::clone(&x[0])),
                Rc::clone(&x[1])
            ),
            Combinator::Cons => Expr::pair(self.reduce(&x[0])?, self.reduce(&x[1])?),
            Combinator::S => Expr::ap(
                Expr::ap(Rc::clone(&x[0]), Rc::clone(&x[2])),
                Expr::ap(Rc::clone(&x[1]), Rc::clone(&x[2]))
            ),
            Combinator::C => Expr::ap(
                Expr::ap(Rc::clone(&x[0]), Rc::clone(&x[2])),
                Rc::clone(&x[1])
            ),
            Combinator::B => Expr::ap(
                Rc::clone(&x[0]),
                Expr::ap(Rc::clone(&x[1]), Rc::clone(&x[2]))
            ),
        };

        Ok(reduced)
    }

    fn numbers(&self, combinator: Combinator, x: &[Rc<Expr>]) -> EvalResult<(i64, i64)> {
        Ok((self.number(combinator, &x[0])?, self.number(combinator, &x[1])?))
    }

    fn number(&self, combinator: Combinator, arg: &Rc<Expr>) -> EvalResult<i64> {
        let value = self.reduce(arg)?;

        if let Some(number) = value.as_number() {
            return Ok(number);
        }

        Err(match self.partial_application(&value) {
            Some((partial, given)) => EvalError::Arity {
                combinator: partial,
                expected: partial.arity(),
                given,
            },
            None => EvalError::NotANumber {
                combinator,
                found: abbreviate(&value),
            },
        })
    }

    // A built-in applied to at least one but fewer than `arity` arguments.
    fn partial_application(&self, expr: &Expr) -> Option<(Combinator, usize)> {
        let mut given = 0;
        let mut head = expr;

        while let Expr::Ap(ap) = head {
            given += 1;
            head = &*ap.left;
        }

        let name = head.as_symbol()?;

        if given == 0 || self.table.contains(name) {
            return None;
        }

        let combinator = Combinator::from_name(name)?;

        combinator.consumes(given)
            .is_none()
            .then_some((combinator, given))
    }

    fn tick(&self) {
        self.steps.set(self.steps.get() + 1);
    }
}

fn memoized(expr: &Rc<Expr>) -> Option<Rc<Expr>> {
    match expr.as_ap()?.memo()? {
        Memo::Normal => Some(Rc::clone(expr)),
        Memo::Reduced(value) => Some(Rc::clone(value)),
    }
}

// Leftover arguments go back on as applications, first argument innermost.
fn rewrap(mut expr: Rc<Expr>, mut args: Vec<Rc<Expr>>) -> Rc<Expr> {
    while let Some(arg) = args.pop() {
        expr = Expr::ap(expr, arg);
    }

    expr
}

// Nothing applies at the head. If a memoized node was swapped in on the way
// down, hand back the rebuilt spine so the caller sees the cleaner form.
fn stuck(head: &Rc<Expr>, args: Vec<Rc<Expr>>, rewritten: bool) -> Step {
    if rewritten {
        Step::Rewrite(rewrap(Rc::clone(head), args))
    } else {
        Step::Normal
    }
}

fn boolean(value: bool) -> Rc<Expr> {
    Expr::symbol(if value { "t" } else { "f" })
}

fn abbreviate(expr: &Expr) -> String {
    const LIMIT: usize = 60;

    let text = expr.to_string();

    match text.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{} ...", &text[..idx]),
        None => text,
    }
}
