use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::lexer::{Lit, LitKind};

/// Numeric kind of a value or expression node.
///
/// Ordered by width: combining two kinds yields the wider one ([`NumKind::widen`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumKind {
    Int,
    Float,
}

impl NumKind {
    /// Int with Int stays Int; anything involving Float is Float.
    pub fn widen(self, other: NumKind) -> NumKind {
        self.max(other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumKind::Int => "int",
            NumKind::Float => "float",
        }
    }
}

impl fmt::Display for NumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn kind(&self) -> NumKind {
        match self {
            Value::Int(_) => NumKind::Int,
            Value::Float(_) => NumKind::Float,
        }
    }

    /// Widened view of this value. Never narrows.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Value::Int(v) => v as f64,
            Value::Float(v) => v,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Value::Int(v) => Some(v),
            Value::Float(_) => None,
        }
    }

    /// Value of a literal token, or `None` if its text is not a valid number of its kind.
    pub fn from_lit(lit: &Lit) -> Option<Value> {
        match lit.kind {
            LitKind::Int => lit.symbol.text.parse().ok().map(Value::Int),
            LitKind::Float => lit.symbol.text.parse().ok().map(Value::Float),
        }
    }

    /// Identity comparison: floats compare by bit pattern, so `NaN` equals itself and
    /// `0.0` differs from `-0.0`.
    pub fn same_as(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                write!(f, "{v:.1}")
            }
            Value::Float(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub name: String,
    pub value: Value,
}

/// Insertion-ordered name → value bindings, read-only while an expression is checked or
/// evaluated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Environment {
    bindings: Vec<Binding>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a binding. Bindings are immutable: if `name` is already bound, the existing
    /// binding is kept and `false` is returned.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.bindings.push(Binding {
            name,
            value: value.into(),
        });
        true
    }

    /// Builder form of [`Environment::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.value)
    }

    pub fn kind_of(&self, name: &str) -> Option<NumKind> {
        self.lookup(name).map(|v| v.kind())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.iter().any(|b| b.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Reads a JSON-style array of bindings. Duplicate names keep their first binding, as with
/// [`Environment::insert`].
impl<'de> Deserialize<'de> for Environment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bindings = Vec::<Binding>::deserialize(deserializer)?;
        Ok(bindings.into_iter().collect())
    }
}

impl FromIterator<Binding> for Environment {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        iter.into_iter().map(|b| (b.name, b.value)).collect()
    }
}

impl<S: Into<String>, V: Into<Value>> FromIterator<(S, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        let mut env = Environment::new();
        for (name, value) in iter {
            env.insert(name, value);
        }
        env
    }
}
