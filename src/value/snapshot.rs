use super::{Key, Value};
use im::OrdMap;
use std::fmt;

/// An immutable keyed mapping from [`Key`] to [`Value`].
///
/// Backed by a persistent ordered map. `clone` is O(1), and the functional
/// operations (`update`, `without`, the merges) return new snapshots that share
/// every untouched entry with `self`. [`Snapshot::insert`] only ever changes
/// the snapshot it is called on; other clones keep their contents.
#[derive(Clone, Default, PartialEq)]
pub struct Snapshot {
    entries: OrdMap<Key, Value>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up a value by key.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Follow a path of keys through nested mappings.
    pub fn get_in(&self, path: &[Key]) -> Option<&Value> {
        let (last, parents) = path.split_last()?;
        let mut map = self;
        for key in parents {
            map = map.get(key)?.as_map()?;
        }
        map.get(last)
    }

    /// Insert into this snapshot, used while building one up.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Return a new snapshot with `key` set to `value`.
    pub fn update(&self, key: impl Into<Key>, value: impl Into<Value>) -> Snapshot {
        Snapshot {
            entries: self.entries.update(key.into(), value.into()),
        }
    }

    /// Return a new snapshot without `key`.
    pub fn without(&self, key: &Key) -> Snapshot {
        Snapshot {
            entries: self.entries.without(key),
        }
    }

    /// Overlay `other` one level deep: its values replace ours wholesale.
    pub fn merge_shallow(&self, other: &Snapshot) -> Snapshot {
        let mut merged = self.clone();
        for (key, value) in other.iter() {
            merged.entries.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Overlay `other` recursively.
    ///
    /// Where both sides hold a mapping under the same key the two mappings are
    /// merged; any other incoming value (lists included) replaces ours.
    pub fn merge_deep(&self, other: &Snapshot) -> Snapshot {
        let mut merged = self.clone();
        for (key, incoming) in other.iter() {
            let next = match (merged.entries.get(key), incoming) {
                (Some(Value::Map(current)), Value::Map(nested)) => {
                    Value::Map(current.merge_deep(nested))
                }
                _ => incoming.clone(),
            };
            merged.entries.insert(key.clone(), next);
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut snapshot = Snapshot::new();
        for (key, value) in iter {
            snapshot.insert(key, value);
        }
        snapshot
    }
}

/// Build a [`Snapshot`] literal.
///
/// ```
/// use snapstore::{snapshot, Key};
///
/// let state = snapshot! { "count" => 10, "user" => snapshot! { "name" => "ada" } };
/// assert_eq!(state.get(&Key::from("count")).and_then(|v| v.as_i64()), Some(10));
/// ```
#[macro_export]
macro_rules! snapshot {
    () => {
        $crate::Snapshot::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut snapshot = $crate::Snapshot::new();
        $( snapshot.insert($key, $value); )+
        snapshot
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot;

    #[test]
    fn update_leaves_original_untouched() {
        let before = snapshot! { "count" => 10 };
        let after = before.update("count", 11);

        assert_eq!(before.get(&Key::from("count")), Some(&Value::Int(10)));
        assert_eq!(after.get(&Key::from("count")), Some(&Value::Int(11)));
    }

    #[test]
    fn insert_does_not_leak_into_clones() {
        let mut original = snapshot! { "a" => 1 };
        let copy = original.clone();
        original.insert("b", 2);

        assert_eq!(copy.len(), 1);
        assert_eq!(original.len(), 2);
    }

    #[test]
    fn shallow_merge_replaces_nested_maps() {
        let base = snapshot! { "a" => snapshot! { "x" => 1 }, "keep" => true };
        let merged = base.merge_shallow(&snapshot! { "a" => snapshot! { "y" => 2 } });

        assert_eq!(
            merged.get(&Key::from("a")),
            Some(&Value::Map(snapshot! { "y" => 2 }))
        );
        assert_eq!(merged.get(&Key::from("keep")), Some(&Value::Bool(true)));
    }

    #[test]
    fn deep_merge_overlays_nested_maps() {
        let base = snapshot! { "a" => snapshot! { "x" => 1, "inner" => snapshot! { "p" => 1 } } };
        let merged = base.merge_deep(&snapshot! {
            "a" => snapshot! { "y" => 2, "inner" => snapshot! { "q" => 2 } },
        });

        assert_eq!(
            merged.get(&Key::from("a")),
            Some(&Value::Map(snapshot! {
                "x" => 1,
                "y" => 2,
                "inner" => snapshot! { "p" => 1, "q" => 2 },
            }))
        );
    }

    #[test]
    fn deep_merge_replaces_non_map_values() {
        let base = snapshot! { "a" => snapshot! { "x" => 1 }, "list" => vec![1, 2] };
        let merged = base.merge_deep(&snapshot! { "a" => 5, "list" => vec![3] });

        assert_eq!(merged.get(&Key::from("a")), Some(&Value::Int(5)));
        assert_eq!(merged.get(&Key::from("list")), Some(&Value::from(vec![3])));
    }

    #[test]
    fn get_in_follows_nested_maps() {
        let state = snapshot! { "user" => snapshot! { "name" => "ada" } };

        assert_eq!(
            state.get_in(&[Key::from("user"), Key::from("name")]),
            Some(&Value::from("ada"))
        );
        assert_eq!(state.get_in(&[Key::from("user"), Key::from("age")]), None);
        assert_eq!(state.get_in(&[]), None);
    }

    #[test]
    fn without_removes_one_key() {
        let state = snapshot! { "a" => 1, "b" => 2 };
        let trimmed = state.without(&Key::from("a"));

        assert!(!trimmed.contains_key(&Key::from("a")));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn collects_from_pairs() {
        let state: Snapshot = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(state.keys().count(), 2);
    }
}
