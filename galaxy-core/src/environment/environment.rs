use std::collections::HashMap;
use std::rc::Rc;

use crate::parser::prelude::{Definition, Expr};

/// Name → definition. Evaluation only reads it; the memo cells inside the
/// definitions are what gets written.
#[derive(Default, Debug, Clone)]
pub struct SymbolTable {
    store: HashMap<String, Rc<Expr>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Rc<Expr>> {
        self.store.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    /// Binds `name`, returning the definition it replaces.
    pub fn define(&mut self, name: impl Into<String>, expr: Rc<Expr>) -> Option<Rc<Expr>> {
        self.store.insert(name.into(), expr)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.store.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Rc<Expr>)> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = (String, Rc<Expr>)>>(iter: I) -> Self {
        Self {
            store: HashMap::from_iter(iter),
        }
    }
}

impl<'a> FromIterator<&'a Definition> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = &'a Definition>>(iter: I) -> Self {
        iter.into_iter()
            .map(|definition| (definition.name.clone(), Rc::clone(&definition.expr)))
            .collect()
    }
}
