//! Tree-shaped data model.
//!
//! This module provides the data types the reshaping engines operate on.
//! [`Map`] is the entry point: a string-keyed mapping whose values are
//! [`Value`] nodes, which in turn may hold further maps and [`List`]s.
//! Nested values are addressed with dot-notation [`Path`]s.
//!
//! # Usage
//!
//! ```
//! use remold::tree::{Map, path};
//!
//! let mut map = Map::new();
//! map.set("name", "Arturo");
//! map.set("info.age", 30);
//!
//! assert_eq!(map.get_as::<&str>("name"), Some("Arturo"));
//! assert_eq!(map.get_as::<i64>(path!("info.age")), Some(30));
//! ```

use std::{collections::BTreeMap, fmt};

pub mod errors;
pub mod list;
pub mod path;
pub mod value;

pub use errors::TreeError;
pub use list::List;
pub use path::{Path, PathBuf, PathError};
pub use value::Value;

// The macro is exported at the crate root; mirror it here next to the
// path types it builds
pub use crate::path;

/// A string-keyed mapping of tree values.
///
/// `Map` is the mapping node kind and the root type for every operation in
/// this crate. Keys iterate in sorted order, so display and serialization
/// output are deterministic.
///
/// # Operations
///
/// - **Reads**: [`get`](Map::get), [`get_mut`](Map::get_mut),
///   [`get_as`](Map::get_as) accept dot-notation paths; an absent path is
///   `None`, never an error.
/// - **Writes**: [`set`](Map::set) and [`set_path`](Map::set_path) create
///   intermediate maps along the path and overwrite non-map intermediates.
/// - **Removal**: [`remove`](Map::remove) really removes, at any depth.
///
/// # Examples
///
/// ```
/// # use remold::tree::Map;
/// let mut map = Map::new();
/// map.set("grandparent.parent.child", "Ana");
///
/// assert_eq!(map.get_as::<&str>("grandparent.parent.child"), Some("Ana"));
/// assert!(map.get("grandparent.parent").unwrap().as_map().is_some());
/// assert_eq!(map.get("grandparent.missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Map {
    entries: BTreeMap<String, Value>,
}

impl Map {
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Returns the number of direct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if a value exists at the given key or path.
    pub fn contains_key(&self, key: impl AsRef<Path>) -> bool {
        self.get(key).is_some()
    }

    /// Gets a value by key or path (immutable reference).
    ///
    /// Dotted paths navigate through nested maps; a segment that parses as
    /// an index navigates into lists. Returns `None` when any step of the
    /// path is absent or not traversable.
    ///
    /// ```
    /// # use remold::tree::{Map, Value};
    /// let mut map = Map::new();
    /// map.set("secrets", vec!["blah", "more"]);
    ///
    /// assert_eq!(map.get("secrets.1"), Some(&Value::Text("more".into())));
    /// assert_eq!(map.get("secrets.9"), None);
    /// ```
    pub fn get(&self, key: impl AsRef<Path>) -> Option<&Value> {
        let path = key.as_ref();
        let mut segments = path.components();

        let first = segments.next()?;
        let mut current = self.entries.get(first)?;

        for segment in segments {
            current = match current {
                Value::Map(map) => map.entries.get(segment)?,
                Value::List(list) => {
                    let index: usize = segment.parse().ok()?;
                    list.get(index)?
                }
                _ => return None,
            };
        }

        Some(current)
    }

    /// Gets a mutable reference to a value by key or path.
    ///
    /// Mutable navigation goes through maps only.
    pub fn get_mut(&mut self, key: impl AsRef<Path>) -> Option<&mut Value> {
        let path = key.as_ref();
        let segments: Vec<_> = path.components().collect();
        let (last, parents) = segments.split_last()?;

        let mut current = self;
        for segment in parents {
            match current.entries.get_mut(*segment) {
                Some(Value::Map(map)) => current = map,
                _ => return None,
            }
        }

        current.entries.get_mut(*last)
    }

    /// Gets a value by key or path with automatic type conversion.
    ///
    /// Returns `None` if the path is absent or the value has a different
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use remold::tree::Map;
    /// let mut map = Map::new();
    /// map.set("name", "Arturo");
    /// map.set("age", 30);
    ///
    /// assert_eq!(map.get_as::<&str>("name"), Some("Arturo"));
    /// assert_eq!(map.get_as::<i64>("age"), Some(30));
    /// assert_eq!(map.get_as::<i64>("name"), None);
    /// assert_eq!(map.get_as::<String>("missing"), None);
    /// ```
    pub fn get_as<'a, T>(&'a self, key: impl AsRef<Path>) -> Option<T>
    where
        T: TryFrom<&'a Value, Error = TreeError>,
    {
        T::try_from(self.get(key)?).ok()
    }

    /// Sets a value at the given key or path, returning the old value if
    /// present.
    ///
    /// Intermediate maps are created along the path, and existing non-map
    /// values along the way are overwritten with maps. An empty path is a
    /// no-op returning `None`; use [`set_path`](Map::set_path) to observe
    /// the error.
    pub fn set(&mut self, key: impl AsRef<Path>, value: impl Into<Value>) -> Option<Value> {
        self.set_path(key, value).unwrap_or_default()
    }

    /// Sets a value at a path, creating intermediate maps as needed.
    ///
    /// Returns the value previously stored at the full path, if any.
    ///
    /// # Errors
    /// Returns [`TreeError::InvalidPath`] if the path has no components.
    pub fn set_path(
        &mut self,
        path: impl AsRef<Path>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, TreeError> {
        let path = path.as_ref();
        let segments: Vec<_> = path.components().collect();

        let Some((last, parents)) = segments.split_last() else {
            return Err(TreeError::InvalidPath {
                path: path.to_string(),
            });
        };

        let mut current = self;
        for segment in parents {
            let entry = current
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| Value::Map(Map::new()));
            if !matches!(entry, Value::Map(_)) {
                // Scalars and lists along the path are overwritten
                *entry = Value::Map(Map::new());
            }
            let Value::Map(next) = entry else {
                unreachable!()
            };
            current = next;
        }

        Ok(current.entries.insert(last.to_string(), value.into()))
    }

    /// Removes the value at a key or path, returning it if present.
    ///
    /// Dotted paths navigate through nested maps to the parent and remove
    /// the final key there. Absent paths return `None`.
    pub fn remove(&mut self, key: impl AsRef<Path>) -> Option<Value> {
        let path = key.as_ref();
        let segments: Vec<_> = path.components().collect();
        let (last, parents) = segments.split_last()?;

        let mut current = self;
        for segment in parents {
            match current.entries.get_mut(*segment) {
                Some(Value::Map(map)) => current = map,
                _ => return None,
            }
        }

        current.entries.remove(*last)
    }

    /// Returns an iterator over all key-value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Returns a mutable iterator over all key-value pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> {
        self.entries.iter_mut()
    }

    /// Returns an iterator over all keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Returns an iterator over all values.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Returns a mutable iterator over all values.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.values_mut()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get a reference to the underlying entries for advanced access.
    ///
    /// Keys here are raw, never interpreted as paths.
    pub fn as_btree_map(&self) -> &BTreeMap<String, Value> {
        &self.entries
    }

    /// Get a mutable reference to the underlying entries for advanced
    /// access.
    pub fn as_btree_map_mut(&mut self) -> &mut BTreeMap<String, Value> {
        &mut self.entries
    }

    /// Serializes this map to a JSON string.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a map from a JSON object string.
    ///
    /// ```
    /// # use remold::tree::Map;
    /// let map = Map::from_json(r#"{"info": {"name": "Juan"}}"#)?;
    /// assert_eq!(map.get_as::<&str>("info.name"), Some("Juan"));
    /// # Ok::<(), remold::Error>(())
    /// ```
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}

/// Entries are inserted under their keys verbatim; keys are not expanded as
/// paths. Use [`Map::set`] for path-aware insertion.
impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Map {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.entries.insert(key.into(), value.into());
        }
    }
}

impl From<BTreeMap<String, Value>> for Map {
    fn from(entries: BTreeMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// Chainable constructors for building fixtures and literals inline
impl Map {
    /// Sets a value and hands the map back for chaining.
    pub fn with(mut self, key: impl AsRef<Path>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Chainable [`with`](Map::with) taking a boolean.
    pub fn with_bool(self, key: impl AsRef<Path>, value: bool) -> Self {
        self.with(key, Value::Bool(value))
    }

    /// Chainable [`with`](Map::with) taking an integer.
    pub fn with_int(self, key: impl AsRef<Path>, value: i64) -> Self {
        self.with(key, Value::Int(value))
    }

    /// Chainable [`with`](Map::with) taking a float.
    pub fn with_float(self, key: impl AsRef<Path>, value: f64) -> Self {
        self.with(key, Value::Float(value))
    }

    /// Chainable [`with`](Map::with) taking text.
    pub fn with_text(self, key: impl AsRef<Path>, value: impl Into<String>) -> Self {
        self.with(key, Value::Text(value.into()))
    }

    /// Chainable [`with`](Map::with) taking a list.
    pub fn with_list(self, key: impl AsRef<Path>, value: impl Into<List>) -> Self {
        self.with(key, Value::List(value.into()))
    }

    /// Chainable [`with`](Map::with) taking a nested map.
    pub fn with_map(self, key: impl AsRef<Path>, value: impl Into<Map>) -> Self {
        self.with(key, Value::Map(value.into()))
    }
}

impl TryFrom<serde_json::Value> for Map {
    type Error = TreeError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match Value::from(value) {
            Value::Map(map) => Ok(map),
            other => Err(TreeError::InvalidValue {
                reason: format!("expected a JSON object, found {}", other.type_name()),
            }),
        }
    }
}

impl From<Map> for serde_json::Value {
    fn from(map: Map) -> Self {
        Value::Map(map).into()
    }
}
