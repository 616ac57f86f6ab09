use core::fmt;

use serde::Serialize;

use crate::values::{Value, ValueType, format_double};

/// Element kind of a homogeneous list literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ItemKind {
    Int,
    Double,
    Str,
}

impl ItemKind {
    pub fn value_type(self) -> ValueType {
        match self {
            ItemKind::Int => ValueType::Int,
            ItemKind::Double => ValueType::Double,
            ItemKind::Str => ValueType::Str,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Int => write!(f, "Int"),
            ItemKind::Double => write!(f, "Double"),
            ItemKind::Str => write!(f, "Str"),
        }
    }
}

/// A homogeneous list of literals, as written in `[1, 2, 3]`.
///
/// The element kind is fixed by the first literal. An `Int` list becomes a
/// `Double` list as soon as a double literal is pushed into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypedList {
    Int(Vec<i64>),
    Double(Vec<f64>),
    Str(Vec<String>),
}

impl TypedList {
    pub fn item_kind(&self) -> ItemKind {
        match self {
            TypedList::Int(_) => ItemKind::Int,
            TypedList::Double(_) => ItemKind::Double,
            TypedList::Str(_) => ItemKind::Str,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedList::Int(items) => items.len(),
            TypedList::Double(items) => items.len(),
            TypedList::Str(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts an `Int` list into a `Double` list in place.
    pub fn promote_to_double(&mut self) {
        if let TypedList::Int(items) = self {
            let promoted = items.iter().map(|&item| item as f64).collect();
            *self = TypedList::Double(promoted);
        }
    }

    /// Linear containment check. Values of another kind are never contained.
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (TypedList::Int(items), Value::Int(needle)) => items.contains(needle),
            (TypedList::Double(items), Value::Double(needle)) => items.contains(needle),
            (TypedList::Str(items), Value::Str(needle)) => items.iter().any(|item| item == needle),
            _ => false,
        }
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            TypedList::Int(items) => items.get(index).map(|&item| Value::Int(item)),
            TypedList::Double(items) => items.get(index).map(|&item| Value::Double(item)),
            TypedList::Str(items) => items.get(index).map(|item| Value::Str(item.clone())),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).filter_map(|index| self.get(index))
    }
}

impl fmt::Display for TypedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (index, item) in self.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            match item {
                Value::Str(s) if s.contains('"') => write!(f, "'{s}'")?,
                Value::Str(s) => write!(f, "\"{s}\"")?,
                Value::Double(d) => f.write_str(&format_double(d))?,
                other => write!(f, "{other}")?,
            }
        }
        write!(f, "]")
    }
}

impl From<Vec<i64>> for TypedList {
    fn from(items: Vec<i64>) -> Self {
        TypedList::Int(items)
    }
}

impl From<Vec<f64>> for TypedList {
    fn from(items: Vec<f64>) -> Self {
        TypedList::Double(items)
    }
}

impl From<Vec<String>> for TypedList {
    fn from(items: Vec<String>) -> Self {
        TypedList::Str(items)
    }
}

impl From<Vec<&str>> for TypedList {
    fn from(items: Vec<&str>) -> Self {
        TypedList::Str(items.into_iter().map(String::from).collect())
    }
}
