use std::{cell::OnceCell, fmt::Display, rc::Rc};

use crate::utils::prelude::SrcSpan;

/// An expression of the combinator language.
///
/// Nodes are shared through `Rc`: a definition referenced from many places,
/// or an argument duplicated by `s`, is one node, so reducing it once is
/// enough for every use.
#[derive(Debug)]
pub enum Expr {
    Number(i64),
    Symbol(String),
    Ap(Ap),
}

/// `ap left right`, plus the memoized normal form of this very node.
#[derive(Debug)]
pub struct Ap {
    pub left: Rc<Expr>,
    pub right: Rc<Expr>,
    memo: OnceCell<Memo>,
}

#[derive(Debug, Clone)]
pub enum Memo {
    /// The node is its own normal form.
    Normal,
    Reduced(Rc<Expr>),
}

impl Ap {
    pub fn memo(&self) -> Option<&Memo> {
        self.memo.get()
    }

    /// Stores `memo` unless the node already has one. Returns whichever is
    /// stored afterwards; an existing memo is never replaced.
    pub fn memoize(&self, memo: Memo) -> &Memo {
        self.memo.get_or_init(|| memo)
    }

    pub fn is_memoized(&self) -> bool {
        self.memo.get().is_some()
    }

    // Moves out every child that would be freed together with this node.
    fn detach(&mut self, pending: &mut Vec<Rc<Expr>>) {
        for slot in [&mut self.left, &mut self.right] {
            if Rc::strong_count(slot) == 1 && matches!(**slot, Expr::Ap(_)) {
                pending.push(std::mem::replace(slot, Rc::new(Expr::Number(0))));
            }
        }

        if let Some(Memo::Reduced(value)) = self.memo.take() {
            pending.push(value);
        }
    }
}

// Argument chains built during a long evaluation can be far deeper than the
// stack, so they are torn down with an explicit worklist.
impl Drop for Ap {
    fn drop(&mut self) {
        let mut pending = vec![];
        self.detach(&mut pending);

        while let Some(expr) = pending.pop() {
            if let Ok(Expr::Ap(mut ap)) = Rc::try_unwrap(expr) {
                ap.detach(&mut pending);
            }
        }
    }
}

impl Expr {
    pub fn number(value: i64) -> Rc<Expr> {
        Rc::new(Expr::Number(value))
    }

    pub fn symbol(name: impl Into<String>) -> Rc<Expr> {
        Rc::new(Expr::Symbol(name.into()))
    }

    pub fn ap(left: Rc<Expr>, right: Rc<Expr>) -> Rc<Expr> {
        Rc::new(Expr::Ap(Ap {
            left,
            right,
            memo: OnceCell::new(),
        }))
    }

    /// `ap ap cons head tail`, not yet reduced.
    pub fn cons(head: Rc<Expr>, tail: Rc<Expr>) -> Rc<Expr> {
        Expr::ap(Expr::ap(Expr::symbol("cons"), head), tail)
    }

    /// A realized pair. Both components must already be in normal form; the
    /// node is memoized as its own normal form.
    pub fn pair(head: Rc<Expr>, tail: Rc<Expr>) -> Rc<Expr> {
        let pair = Expr::cons(head, tail);

        if let Expr::Ap(ap) = &*pair {
            ap.memoize(Memo::Normal);
        }

        pair
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Expr::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_ap(&self) -> Option<&Ap> {
        match self {
            Expr::Ap(ap) => Some(ap),
            _ => None,
        }
    }

    pub fn is_atom(&self, name: &str) -> bool {
        self.as_symbol() == Some(name)
    }

    /// Splits `ap ap cons head tail` into `(head, tail)`.
    pub fn as_pair(&self) -> Option<(&Rc<Expr>, &Rc<Expr>)> {
        let outer = self.as_ap()?;
        let inner = outer.left.as_ap()?;

        if inner.left.is_atom("cons") {
            Some((&inner.right, &outer.right))
        } else {
            None
        }
    }
}

// Structural equality. Memo cells are an evaluation detail and do not take part.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some((left, right)) = pending.pop() {
            match (left, right) {
                (Expr::Number(a), Expr::Number(b)) if a == b => {},
                (Expr::Symbol(a), Expr::Symbol(b)) if a == b => {},
                (Expr::Ap(a), Expr::Ap(b)) => {
                    pending.push((&*a.right, &*b.right));
                    pending.push((&*a.left, &*b.left));
                },
                _ => return false,
            }
        }

        true
    }
}

impl Eq for Expr {}

// Prefix form, single spaces: exactly the token sequence the parser reads.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut pending = vec![self];
        let mut first = true;

        while let Some(expr) = pending.pop() {
            if !first {
                write!(f, " ")?;
            }
            first = false;

            match expr {
                Expr::Number(value) => write!(f, "{value}")?,
                Expr::Symbol(name) => write!(f, "{name}")?,
                Expr::Ap(ap) => {
                    write!(f, "ap")?;
                    pending.push(&*ap.right);
                    pending.push(&*ap.left);
                }
            }
        }

        Ok(())
    }
}

/// One `name = expression` line of a program.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub name: String,
    pub expr: Rc<Expr>,
    /// Span of the name.
    pub location: SrcSpan,
    /// Span of the whole line.
    pub line: SrcSpan,
}

impl Display for Definition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.name, self.expr)
    }
}
