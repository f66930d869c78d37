//! The [`Value`] node type.
//!
//! Every node in a tree is a `Value`: either a scalar leaf (null, bool,
//! number, text) or one of the two container kinds, [`Map`] and [`List`].
//! Absence is modeled by not having a node at all; [`Value::Null`] is a
//! real node that happens to be null.

use std::fmt;

use crate::tree::{List, Map, TreeError};

/// A single node in a tree.
///
/// Scalars terminate a branch; `Map` and `List` nest further nodes. The
/// serde representation is untagged, so a `Value` serializes as the plain
/// JSON value it corresponds to.
///
/// # Direct Comparisons
///
/// `Value` compares directly against primitives, which keeps assertions
/// short:
///
/// ```
/// # use remold::tree::Value;
/// let text = Value::Text("stone".to_string());
/// let number = Value::Int(7);
///
/// assert!(text == "stone");
/// assert!(number == 7);
/// assert!("stone" == text);
///
/// // A mismatched kind is simply unequal
/// assert!(!(text == 7));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null. Present-and-null is distinct from absent.
    Null,
    /// True or false
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// UTF-8 text
    Text(String),
    /// Ordered sequence of child nodes
    List(List),
    /// String-keyed mapping of child nodes
    Map(Map),
}

impl Value {
    /// True for leaf nodes, i.e. anything that is not a container.
    pub fn is_scalar(&self) -> bool {
        !self.is_container()
    }

    /// True for [`Value::Map`] and [`Value::List`].
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Map(_) | Value::List(_))
    }

    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of this node's kind, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// The boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// The boolean, or `default` for any other kind.
    pub fn as_bool_or(&self, default: bool) -> bool {
        self.as_bool().unwrap_or(default)
    }

    /// The integer, if this is a [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The integer, or `default` for any other kind.
    pub fn as_int_or(&self, default: i64) -> i64 {
        self.as_int().unwrap_or(default)
    }

    /// The float. Integers widen, so both numeric kinds succeed here.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Borrows the text, if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrows the text, or `""` for any other kind.
    pub fn as_text_or_empty(&self) -> &str {
        self.as_text().unwrap_or("")
    }

    /// Borrows the inner map, if this is a [`Value::Map`].
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Mutably borrows the inner map, if this is a [`Value::Map`].
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Borrows the inner list, if this is a [`Value::List`].
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Mutably borrows the inner list, if this is a [`Value::List`].
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Serializes this value to a JSON string.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(flag) => write!(f, "{flag}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(text) => write!(f, "{text}"),
            Value::List(items) => write!(f, "{items}"),
            Value::Map(entries) => write!(f, "{entries}"),
        }
    }
}

// From impls so call sites can pass plain Rust values.
impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        // Wraps for values above i64::MAX
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x.into())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string())
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

// Interop with serde_json values, mainly for json! fixtures and import.
impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(n) => serde_json::Value::Number(n.into()),
            // Non-finite floats have no JSON form and become null
            Value::Float(x) => serde_json::Number::from_f64(x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s),
            Value::List(list) => {
                serde_json::Value::Array(list.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

fn mismatch(expected: &str, found: &Value) -> TreeError {
    TreeError::TypeMismatch {
        expected: expected.to_string(),
        actual: found.type_name().to_string(),
    }
}

// TryFrom impls for typed extraction with a structured error on mismatch.
impl TryFrom<&Value> for String {
    type Error = TreeError;

    fn try_from(node: &Value) -> Result<Self, Self::Error> {
        node.as_text()
            .map(str::to_string)
            .ok_or_else(|| mismatch("text", node))
    }
}

impl<'a> TryFrom<&'a Value> for &'a str {
    type Error = TreeError;

    fn try_from(node: &'a Value) -> Result<Self, Self::Error> {
        node.as_text().ok_or_else(|| mismatch("text", node))
    }
}

impl TryFrom<&Value> for i64 {
    type Error = TreeError;

    fn try_from(node: &Value) -> Result<Self, Self::Error> {
        node.as_int().ok_or_else(|| mismatch("int", node))
    }
}

impl TryFrom<&Value> for f64 {
    type Error = TreeError;

    fn try_from(node: &Value) -> Result<Self, Self::Error> {
        node.as_float().ok_or_else(|| mismatch("float", node))
    }
}

impl TryFrom<&Value> for bool {
    type Error = TreeError;

    fn try_from(node: &Value) -> Result<Self, Self::Error> {
        node.as_bool().ok_or_else(|| mismatch("bool", node))
    }
}

impl TryFrom<&Value> for Map {
    type Error = TreeError;

    fn try_from(node: &Value) -> Result<Self, Self::Error> {
        node.as_map().cloned().ok_or_else(|| mismatch("map", node))
    }
}

impl TryFrom<&Value> for List {
    type Error = TreeError;

    fn try_from(node: &Value) -> Result<Self, Self::Error> {
        node.as_list()
            .cloned()
            .ok_or_else(|| mismatch("list", node))
    }
}

// PartialEq against primitives, in both directions.
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_text() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self.as_text() == Some(other.as_str())
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_int() == Some(*other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        self.as_int() == Some((*other).into())
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Value::Float(x) if x == other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for f64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
