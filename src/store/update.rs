use super::MergePolicy;
use crate::error::{Result, StoreError};
use crate::host::{CommitCallback, Props, Transition};
use crate::value::{Key, Snapshot, Value};
use std::fmt;

/// A caller-supplied function computing the next snapshot.
pub type UpdateFn = Box<dyn FnOnce(&Snapshot, &Props) -> Snapshot + Send>;

/// A state update request.
pub enum Update {
    /// Overlay a mapping onto the current snapshot.
    Merge(Snapshot),
    /// Replace the snapshot with the function's result, verbatim.
    Apply(UpdateFn),
    /// Set one key, leaving every other entry untouched.
    Set(Key, Value),
}

impl Update {
    /// A mapping-shaped update.
    pub fn merge(mapping: Snapshot) -> Self {
        Update::Merge(mapping)
    }

    /// A function-shaped update.
    pub fn apply<F>(f: F) -> Self
    where
        F: FnOnce(&Snapshot, &Props) -> Snapshot + Send + 'static,
    {
        Update::Apply(Box::new(f))
    }

    /// A single key/value update.
    pub fn set(key: impl Into<Key>, value: impl Into<Value>) -> Self {
        Update::Set(key.into(), value.into())
    }

    /// Classify an untyped argument list.
    ///
    /// Shapes are tried in order: a mapping (plus optional callback), a
    /// function (plus optional callback), then a key and a value (plus
    /// optional callback). A key qualifies by being present and not `Null`, so
    /// `0`, `""`, `false`, floats and lists are all keys. A `Null` value is
    /// still a value.
    pub fn from_args(args: Vec<Arg>) -> Result<(Update, Option<CommitCallback>)> {
        let mut args = args.into_iter();
        let (first, second, third) = (args.next(), args.next(), args.next());
        if args.next().is_some() {
            return Err(invalid("too many arguments"));
        }

        match (first, second, third) {
            (None, _, _) => Err(invalid("no arguments")),
            (Some(Arg::Value(Value::Map(mapping))), callback, None) => {
                Ok((Update::Merge(mapping), commit_callback(callback)?))
            }
            (Some(Arg::Function(f)), callback, None) => {
                Ok((Update::Apply(f), commit_callback(callback)?))
            }
            (Some(Arg::Value(key)), Some(Arg::Value(value)), callback) => {
                let key = Key::from_value(&key)
                    .ok_or_else(|| invalid("key must not be null"))?;
                Ok((Update::Set(key, value), commit_callback(callback)?))
            }
            (Some(Arg::Value(_)), None, _) => Err(invalid("key given without a value")),
            _ => Err(invalid("unrecognized argument shape")),
        }
    }

    /// Name of the dispatch branch, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Update::Merge(_) => "merge",
            Update::Apply(_) => "apply",
            Update::Set(..) => "set",
        }
    }

    pub(crate) fn into_transition(self, policy: MergePolicy) -> Transition {
        match self {
            Update::Merge(mapping) => match policy {
                MergePolicy::Deep => Box::new(move |current: &Snapshot, _: &Props| {
                    current.merge_deep(&mapping)
                }),
                MergePolicy::Shallow => Box::new(move |current: &Snapshot, _: &Props| {
                    current.merge_shallow(&mapping)
                }),
            },
            Update::Apply(f) => f,
            Update::Set(key, value) => {
                Box::new(move |current: &Snapshot, _: &Props| current.update(key, value))
            }
        }
    }
}

impl fmt::Debug for Update {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Update::Merge(mapping) => f.debug_tuple("Merge").field(mapping).finish(),
            Update::Apply(_) => f.write_str("Apply(..)"),
            Update::Set(key, value) => f.debug_tuple("Set").field(key).field(value).finish(),
        }
    }
}

/// One argument of an untyped update call.
pub enum Arg {
    Value(Value),
    Function(UpdateFn),
    Callback(CommitCallback),
}

impl Arg {
    /// A plain value argument: a mapping, a key or a value.
    pub fn value(value: impl Into<Value>) -> Self {
        Arg::Value(value.into())
    }

    /// An update-function argument.
    pub fn function<F>(f: F) -> Self
    where
        F: FnOnce(&Snapshot, &Props) -> Snapshot + Send + 'static,
    {
        Arg::Function(Box::new(f))
    }

    /// A post-commit callback argument.
    pub fn callback<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Arg::Callback(Box::new(f))
    }
}

fn invalid(reason: &'static str) -> StoreError {
    StoreError::InvalidUpdateArguments { reason }
}

fn commit_callback(arg: Option<Arg>) -> Result<Option<CommitCallback>> {
    match arg {
        None => Ok(None),
        Some(Arg::Callback(callback)) => Ok(Some(callback)),
        Some(_) => Err(invalid("trailing argument must be a callback")),
    }
}
