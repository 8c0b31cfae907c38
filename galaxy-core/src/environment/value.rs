use std::fmt::Display;

use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// Host-side view of a reduced expression.
///
/// `Nil` and an empty `List` are the same value and compare equal.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Nil,
    Pair(Box<Value>, Box<Value>),
    List(Vec<Value>),
    Symbol(String),
}

impl Value {
    pub fn pair(left: Value, right: Value) -> Self {
        Value::Pair(Box::new(left), Box::new(right))
    }

    pub fn list(items: Vec<Value>) -> Self {
        if items.is_empty() {
            Value::Nil
        } else {
            Value::List(items)
        }
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::Nil | Value::List(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Pair(a, b), Value::Pair(c, d)) => a == c && b == d,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Nil, Value::List(items)) | (Value::List(items), Value::Nil) => items.is_empty(),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

// Same prefix syntax the parser reads, so a printed value can be pasted back
// into a program.
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            Value::Symbol(name) => write!(f, "{name}"),
            Value::Nil => write!(f, "nil"),
            Value::Pair(left, right) => write!(f, "ap ap cons {left} {right}"),
            Value::List(items) => {
                for item in items {
                    write!(f, "ap ap cons {item} ")?;
                }

                write!(f, "nil")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Symbol(name) => serializer.serialize_str(name),
            Value::Nil => Vec::<Value>::new().serialize(serializer),
            Value::List(items) => items.serialize(serializer),
            Value::Pair(left, right) => {
                let mut pair = serializer.serialize_struct("Pair", 2)?;
                pair.serialize_field("left", left)?;
                pair.serialize_field("right", right)?;
                pair.end()
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    Integer(i64),
    Symbol(String),
    List(Vec<Value>),
    Pair { left: Box<Value>, right: Box<Value> },
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Integer(value) => Value::Integer(value),
            Repr::Symbol(name) => Value::Symbol(name),
            Repr::List(items) => Value::list(items),
            Repr::Pair { left, right } => Value::Pair(left, right),
        })
    }
}
