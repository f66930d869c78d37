//! Ordered sequences for tree-shaped data.
//!
//! [`List`] is the sequence node kind: a plain ordered collection of
//! [`Value`]s addressed by position. Removal shifts later elements down;
//! there are no holes.

use std::fmt;

use super::value::Value;

/// An ordered collection of values.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct List {
    items: Vec<Value>,
}

impl List {
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Appends a value to the end of the list, returning its index.
    pub fn push(&mut self, value: impl Into<Value>) -> usize {
        self.items.push(value.into());
        self.items.len() - 1
    }

    /// Inserts a value at the given index, shifting later elements up.
    ///
    /// Indices past the end clamp to an append.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) {
        let index = index.min(self.items.len());
        self.items.insert(index, value.into());
    }

    /// Gets a value by index.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    /// Gets a mutable reference to a value by index.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.items.get_mut(index)
    }

    /// Replaces the value at an index, returning the old value.
    ///
    /// Returns `None` and leaves the list unchanged if the index is out of
    /// bounds.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Option<Value> {
        let slot = self.items.get_mut(index)?;
        Some(std::mem::replace(slot, value.into()))
    }

    /// Removes and returns the value at an index, shifting later elements
    /// down.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Keeps only the elements for which the predicate returns true.
    pub fn retain(&mut self, f: impl FnMut(&Value) -> bool) {
        self.items.retain(f);
    }

    /// Returns the first element, if any.
    pub fn first(&self) -> Option<&Value> {
        self.items.first()
    }

    /// Returns the last element, if any.
    pub fn last(&self) -> Option<&Value> {
        self.items.last()
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    /// Iterates mutably over the elements in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.items.iter_mut()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{item}")?;
        }
        write!(f, "]")
    }
}

impl<T: Into<Value>> From<Vec<T>> for List {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Into<Value>> FromIterator<T> for List {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl std::ops::Index<usize> for List {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}
