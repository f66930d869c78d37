//! Recursive removal of properties matching a predicate.
//!
//! An [`Unset`] binds a predicate over [`Value`]s once and can then sweep
//! any number of maps. The sweep is depth first and bottom up: children of
//! a node are visited (and possibly removed) before the node itself is
//! tested, so removals cascade upward. A map emptied by the sweep is itself
//! removable in the same pass.
//!
//! The root map is never tested or removed, only its properties are.
//!
//! # Usage
//!
//! ```
//! use remold::unset::Unset;
//! use remold::tree::Map;
//!
//! let mut map = Map::from_json(r#"{
//!     "foo": 123,
//!     "bar": true,
//!     "quxx": {"deep": 123, "more": {"deeper": 123}}
//! }"#).unwrap();
//!
//! Unset::new(|v| *v == 123).apply(&mut map);
//!
//! assert_eq!(map.get("foo"), None);
//! assert_eq!(map.get_as::<bool>("bar"), Some(true));
//! // quxx.more emptied out but the predicate does not match empty maps
//! assert!(map.get("quxx.more").unwrap().as_map().unwrap().is_empty());
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::tree::{Map, Value};

/// Predicate deciding whether a property is removed.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// A bound property-removal sweep.
///
/// The predicate is shared through an `Arc`, so `Unset` is cheap to clone
/// and `Send + Sync`. Each [`apply`](Unset::apply) takes an exclusive
/// borrow of the root, which also rules out concurrent sweeps over the
/// same map.
#[derive(Clone)]
pub struct Unset {
    predicate: Predicate,
}

impl Unset {
    /// Binds a predicate for sweeping.
    pub fn new(predicate: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Binds the emptiness predicate: null values, empty maps, and empty
    /// lists.
    pub fn empty() -> Self {
        Self::new(|value| match value {
            Value::Null => true,
            Value::Map(map) => map.is_empty(),
            Value::List(list) => list.is_empty(),
            _ => false,
        })
    }

    /// Sweeps a map in place, removing every property the predicate
    /// matches.
    ///
    /// Mutates through the borrow and returns it back for chaining. Panics
    /// raised by the predicate propagate unchanged.
    pub fn apply<'a>(&self, root: &'a mut Map) -> &'a mut Map {
        debug!(entries = root.len(), "Sweeping properties");
        sweep_map(root, &*self.predicate);
        root
    }
}

impl std::fmt::Debug for Unset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Unset(..)")
    }
}

/// Removes null values, empty maps, and empty lists everywhere below the
/// root, cascading bottom up.
///
/// ```
/// use remold::unset::unset_empty_properties;
/// use remold::tree::Map;
///
/// let mut map = Map::from_json(r#"{"foo": null, "bar": {}, "baz": {"deep": null}}"#).unwrap();
/// unset_empty_properties(&mut map);
/// assert!(map.is_empty());
/// ```
pub fn unset_empty_properties(root: &mut Map) -> &mut Map {
    Unset::empty().apply(root)
}

fn sweep_value(value: &mut Value, predicate: &(dyn Fn(&Value) -> bool)) {
    match value {
        Value::Map(map) => sweep_map(map, predicate),
        Value::List(list) => {
            for item in list.iter_mut() {
                sweep_value(item, predicate);
            }
            list.retain(|item| !predicate(item));
        }
        _ => {}
    }
}

fn sweep_map(map: &mut Map, predicate: &(dyn Fn(&Value) -> bool)) {
    let entries = map.as_btree_map_mut();
    // Snapshot the keys so removals never disturb sibling iteration
    let keys: Vec<String> = entries.keys().cloned().collect();
    for key in &keys {
        if let Some(child) = entries.get_mut(key) {
            sweep_value(child, predicate);
            if predicate(child) {
                entries.remove(key);
            }
        }
    }
}
