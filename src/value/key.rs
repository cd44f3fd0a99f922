use super::{Snapshot, Value};
use im::Vector;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A snapshot key.
///
/// Any non-null value can be a key. Falsy-looking keys such as `0`, `""` and
/// `false` are ordinary keys. Keys are totally ordered: first by kind, then by
/// content, with floats compared by [`f64::total_cmp`] so `NaN` is a usable
/// key and `0.0` and `-0.0` are distinct.
#[derive(Clone, Debug)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(Vector<Value>),
    Map(Snapshot),
}

impl Key {
    /// Interpret a dynamic value as a key. Only `Null` is refused.
    pub fn from_value(value: &Value) -> Option<Key> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Key::Bool(*b)),
            Value::Int(n) => Some(Key::Int(*n)),
            Value::Float(x) => Some(Key::Float(*x)),
            Value::Str(s) => Some(Key::Str(Arc::clone(s))),
            Value::List(items) => Some(Key::List(items.clone())),
            Value::Map(map) => Some(Key::Map(map.clone())),
        }
    }

    /// Borrow the key as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(&**s),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Key::Bool(_) => 0,
            Key::Int(_) => 1,
            Key::Float(_) => 2,
            Key::Str(_) => 3,
            Key::List(_) => 4,
            Key::Map(_) => 5,
        }
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Key::Bool(a), Key::Bool(b)) => a.cmp(b),
            (Key::Int(a), Key::Int(b)) => a.cmp(b),
            (Key::Float(a), Key::Float(b)) => a.total_cmp(b),
            (Key::Str(a), Key::Str(b)) => a.cmp(b),
            (Key::List(a), Key::List(b)) => Value::cmp_lists(a, b),
            (Key::Map(a), Key::Map(b)) => Value::cmp_maps(a, b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{b}"),
            Key::Int(n) => write!(f, "{n}"),
            Key::Float(x) => write!(f, "{x}"),
            Key::Str(s) => write!(f, "{s:?}"),
            Key::List(items) => write!(f, "{items:?}"),
            Key::Map(map) => write!(f, "{map:?}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(Arc::from(s))
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(Arc::from(s))
    }
}

impl From<Arc<str>> for Key {
    fn from(s: Arc<str>) -> Self {
        Key::Str(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(i64::from(n))
    }
}

impl From<f64> for Key {
    fn from(x: f64) -> Self {
        Key::Float(x)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(b) => Value::Bool(b),
            Key::Int(n) => Value::Int(n),
            Key::Float(x) => Value::Float(x),
            Key::Str(s) => Value::Str(s),
            Key::List(items) => Value::List(items),
            Key::Map(map) => Value::Map(map),
        }
    }
}
