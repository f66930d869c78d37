//! Declarative reshaping of tree-shaped data.
//!
//! A [`Smash`] binds an ordered set of rules, each pairing a destination
//! path in the result with a [`Rule`] describing where the value comes
//! from. Binding happens once; the bound smasher can then be applied to any
//! number of source maps.
//!
//! # Usage
//!
//! ```
//! use remold::smash::{Smash, Spec};
//! use remold::tree::{Map, Value};
//!
//! let smasher = Smash::new()
//!     .rule("gold", "stone")
//!     .rule("more_gist", "blah.more.wait.there")
//!     .rule("num", Spec::new("num").method("to_string"))
//!     .rule("salud", Spec::new("info.name").map(|name, _| match name {
//!         Some(name) => format!("Hola {name}").into(),
//!         None => Value::Null,
//!     }))
//!     .rule("grandparent.parent.child", "name");
//!
//! let source = Map::from_json(r#"{
//!     "stone": "yes!",
//!     "num": 123,
//!     "name": "Ana",
//!     "info": {"name": "Arturo"},
//!     "blah": {"more": {"wait": {"there": "got it"}}}
//! }"#).unwrap();
//!
//! let result = smasher.apply(&source);
//! assert_eq!(result.get_as::<&str>("gold"), Some("yes!"));
//! assert_eq!(result.get_as::<&str>("more_gist"), Some("got it"));
//! assert_eq!(result.get_as::<&str>("num"), Some("123"));
//! assert_eq!(result.get_as::<&str>("salud"), Some("Hola Arturo"));
//! assert_eq!(result.get_as::<&str>("grandparent.parent.child"), Some("Ana"));
//! ```

use tracing::{debug, trace};

use crate::tree::{Map, PathBuf, Value};

pub mod rule;

pub use rule::{Rule, SourceFn, Spec, Transformer, ValueFn};

/// A bound set of reshaping rules.
///
/// Rules are applied in insertion order, so when destination paths overlap
/// (one a prefix of another, or outright duplicates) the later rule wins.
/// Rule closures are shared through `Arc`s, so a bound `Smash` is `Send`
/// and `Sync` and may be applied concurrently from several threads.
#[derive(Debug, Clone, Default)]
pub struct Smash {
    rules: Vec<(PathBuf, Rule)>,
}

impl Smash {
    /// Creates a smasher with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a rule writing to the given destination path.
    ///
    /// The destination is normalized on entry. Anything convertible into a
    /// [`Rule`] is accepted: dotted strings and segment arrays become path
    /// rules, [`Spec`]s become spec rules.
    pub fn rule(mut self, dest: impl AsRef<str>, rule: impl Into<Rule>) -> Self {
        self.rules
            .push((PathBuf::normalize(dest.as_ref()), rule.into()));
        self
    }

    /// Returns the number of bound rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are bound.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Applies the bound rules to a source map, producing a new map.
    ///
    /// The result is always a freshly created map, never the source. Every
    /// rule writes its destination: a rule that resolves to nothing writes
    /// null, so the destination key exists either way. Rules whose
    /// destination normalized to the empty path are skipped. Panics raised
    /// inside caller-supplied rule closures propagate unchanged.
    pub fn apply(&self, source: &Map) -> Map {
        debug!(rules = self.rules.len(), "Applying reshape");

        let mut result = Map::new();
        for (dest, rule) in &self.rules {
            if dest.is_empty() {
                debug!("Skipping rule with empty destination path");
                continue;
            }

            let resolved = rule.resolve(source);
            trace!(dest = %dest, resolved = resolved.is_some(), "Resolved rule");

            result.set(dest, resolved.unwrap_or(Value::Null));
        }
        result
    }
}

impl<S: AsRef<str>, R: Into<Rule>> FromIterator<(S, R)> for Smash {
    fn from_iter<I: IntoIterator<Item = (S, R)>>(iter: I) -> Self {
        let mut smash = Smash::new();
        smash.extend(iter);
        smash
    }
}

impl<S: AsRef<str>, R: Into<Rule>> Extend<(S, R)> for Smash {
    fn extend<I: IntoIterator<Item = (S, R)>>(&mut self, iter: I) {
        for (dest, rule) in iter {
            self.rules
                .push((PathBuf::normalize(dest.as_ref()), rule.into()));
        }
    }
}
