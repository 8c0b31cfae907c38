use std::fmt::Display;

/// The closed set of built-in combinators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    Neg,
    I,
    Nil,
    IsNil,
    Car,
    Cdr,
    Add,
    Mul,
    Div,
    Lt,
    Eq,
    T,
    F,
    Cons,
    S,
    C,
    B,
}

impl Combinator {
    pub const ALL: [Combinator; 17] = [
        Combinator::Neg,
        Combinator::I,
        Combinator::Nil,
        Combinator::IsNil,
        Combinator::Car,
        Combinator::Cdr,
        Combinator::Add,
        Combinator::Mul,
        Combinator::Div,
        Combinator::Lt,
        Combinator::Eq,
        Combinator::T,
        Combinator::F,
        Combinator::Cons,
        Combinator::S,
        Combinator::C,
        Combinator::B,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "neg" => Combinator::Neg,
            "i" => Combinator::I,
            "nil" => Combinator::Nil,
            "isnil" => Combinator::IsNil,
            "car" => Combinator::Car,
            "cdr" => Combinator::Cdr,
            "add" => Combinator::Add,
            "mul" => Combinator::Mul,
            "div" => Combinator::Div,
            "lt" => Combinator::Lt,
            "eq" => Combinator::Eq,
            "t" => Combinator::T,
            "f" => Combinator::F,
            "cons" => Combinator::Cons,
            "s" => Combinator::S,
            "c" => Combinator::C,
            "b" => Combinator::B,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Combinator::Neg => "neg",
            Combinator::I => "i",
            Combinator::Nil => "nil",
            Combinator::IsNil => "isnil",
            Combinator::Car => "car",
            Combinator::Cdr => "cdr",
            Combinator::Add => "add",
            Combinator::Mul => "mul",
            Combinator::Div => "div",
            Combinator::Lt => "lt",
            Combinator::Eq => "eq",
            Combinator::T => "t",
            Combinator::F => "f",
            Combinator::Cons => "cons",
            Combinator::S => "s",
            Combinator::C => "c",
            Combinator::B => "b",
        }
    }

    /// Arguments needed before the combinator reduces.
    pub fn arity(self) -> usize {
        match self {
            Combinator::Neg
            | Combinator::I
            | Combinator::Nil
            | Combinator::IsNil
            | Combinator::Car
            | Combinator::Cdr => 1,
            Combinator::Add
            | Combinator::Mul
            | Combinator::Div
            | Combinator::Lt
            | Combinator::Eq
            | Combinator::T
            | Combinator::F
            | Combinator::Cons => 2,
            Combinator::S
            | Combinator::C
            | Combinator::B => 3,
        }
    }

    /// Arguments actually consumed when `available` are pending. Only `cons`
    /// differs from its arity: with a third argument it acts as a selector.
    pub fn consumes(self, available: usize) -> Option<usize> {
        match self {
            Combinator::Cons if available >= 3 => Some(3),
            _ if available >= self.arity() => Some(self.arity()),
            _ => None,
        }
    }
}

impl Display for Combinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
