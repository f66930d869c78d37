//! Method delegation between named-callable tables.
//!
//! A [`MethodTable`] maps method names to callables over [`Value`]
//! arguments. [`delegate`] copies named methods from a provider table onto a
//! consumer table; the copied method is the provider's own closure, so it
//! keeps executing against whatever state the provider captured, no matter
//! which table it is later invoked through. [`delegate_as`] does the same
//! for a single method under a new name.
//!
//! Delegating a name the provider does not define is a silent no-op; nothing
//! is defined on the consumer.
//!
//! # Usage
//!
//! ```
//! use remold::delegate::{MethodTable, delegate, delegate_as};
//! use remold::tree::Value;
//!
//! let mut provider = MethodTable::new();
//! provider.define("report", |_args| Value::from("ready"));
//!
//! let mut consumer = MethodTable::new();
//! delegate(&provider, "report", &mut consumer);
//! delegate_as(&provider, "report", &mut consumer, "status");
//!
//! assert_eq!(consumer.call("report", &[]), Some(Value::from("ready")));
//! assert_eq!(consumer.call("status", &[]), Some(Value::from("ready")));
//! assert_eq!(consumer.call("absent", &[]), None);
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::tree::Value;

/// A named callable held by a [`MethodTable`].
///
/// Shared through an `Arc` so delegation copies a handle to the same
/// closure rather than duplicating it.
pub type Method = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// One or many method names to delegate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodNames {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for MethodNames {
    fn from(name: &str) -> Self {
        Self::Single(name.to_string())
    }
}

impl From<String> for MethodNames {
    fn from(name: String) -> Self {
        Self::Single(name)
    }
}

impl From<&[&str]> for MethodNames {
    fn from(names: &[&str]) -> Self {
        Self::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for MethodNames {
    fn from(names: [&str; N]) -> Self {
        Self::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<&str>> for MethodNames {
    fn from(names: Vec<&str>) -> Self {
        Self::Many(names.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<String>> for MethodNames {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

/// A table of named methods.
///
/// Calling through the table dispatches by name; an unknown name yields
/// `None` rather than an error. Defining a name that already exists
/// replaces the previous method.
#[derive(Clone, Default)]
pub struct MethodTable {
    methods: BTreeMap<String, Method>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a method under the given name, replacing any previous one.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        method: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> &mut Self {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }

    /// Builder form of [`define`](Self::define).
    pub fn with_method(
        mut self,
        name: impl Into<String>,
        method: impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.define(name, method);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    /// Invokes the named method, or returns `None` if it is not defined.
    pub fn call(&self, name: &str, args: &[Value]) -> Option<Value> {
        self.methods.get(name).map(|method| method(args))
    }

    /// Makes the named method also callable under `alias` within this
    /// table. Returns `false` (defining nothing) if the name is missing.
    pub fn alias(&mut self, name: &str, alias: impl Into<String>) -> bool {
        match self.methods.get(name).cloned() {
            Some(method) => {
                self.methods.insert(alias.into(), method);
                true
            }
            None => false,
        }
    }

    /// Iterates defined method names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl std::fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MethodTable")
            .field(&self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Copies the named provider methods onto the consumer under the same
/// names.
///
/// Accepts a single name or a list of names. Names the provider does not
/// define are skipped silently. An existing consumer method of the same
/// name is replaced.
pub fn delegate(
    provider: &MethodTable,
    names: impl Into<MethodNames>,
    consumer: &mut MethodTable,
) {
    match names.into() {
        MethodNames::Single(name) => delegate_method(provider, &name, consumer, None),
        MethodNames::Many(names) => {
            for name in &names {
                delegate_method(provider, name, consumer, None);
            }
        }
    }
}

/// Copies one provider method onto the consumer under a different name.
///
/// Skipped silently if the provider does not define `name`.
pub fn delegate_as(provider: &MethodTable, name: &str, consumer: &mut MethodTable, alias: &str) {
    delegate_method(provider, name, consumer, Some(alias));
}

fn delegate_method(
    provider: &MethodTable,
    name: &str,
    consumer: &mut MethodTable,
    alias: Option<&str>,
) {
    let Some(method) = provider.get(name) else {
        debug!(method = name, "Skipping delegation of undefined method");
        return;
    };
    let target = alias.unwrap_or(name);
    consumer.methods.insert(target.to_string(), method.clone());
}
