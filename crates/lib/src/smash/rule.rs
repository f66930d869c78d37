//! Reshaping rules and their resolution.
//!
//! A [`Rule`] describes how one destination of a reshape gets its value:
//! read a path from the source, call a function over the whole source, or
//! the full [`Spec`] form with an optional fallback and transformer.

use std::{fmt, sync::Arc};

use crate::tree::{Map, PathBuf, Value};

/// Closure deriving a value from the whole source map.
pub type SourceFn = Arc<dyn Fn(&Map) -> Value + Send + Sync>;

/// Closure transforming a read value, with access to the whole source map.
///
/// Receives the value read at a [`Spec`]'s `from` path after defaulting, so
/// an absent or null source with a fallback configured sees the fallback.
pub type ValueFn = Arc<dyn Fn(Option<Value>, &Map) -> Value + Send + Sync>;

/// A single reshaping rule.
///
/// Rules are cheap to clone; function rules share their closure through an
/// `Arc`. Rules hold closures and are deliberately not serializable.
///
/// # Examples
///
/// ```
/// use remold::smash::{Rule, Spec};
/// use remold::tree::Map;
///
/// let source = Map::new().with_text("info.name", "arturo");
///
/// // Path rule: read a source path
/// let rule = Rule::from("info.name");
/// assert_eq!(rule.resolve(&source).unwrap(), "arturo");
///
/// // Function rule: derive from the whole source
/// let rule = Rule::func(|src: &Map| src.len().to_string().into());
/// assert_eq!(rule.resolve(&source).unwrap(), "1");
///
/// // Spec rule: read, default, transform
/// let rule = Rule::from(Spec::new("info.name").method("to_uppercase"));
/// assert_eq!(rule.resolve(&source).unwrap(), "ARTURO");
/// ```
#[derive(Clone)]
pub enum Rule {
    /// Read the value at this source path
    Path(PathBuf),
    /// Derive the value from the whole source
    Func(SourceFn),
    /// Read with optional fallback and transformer
    Spec(Spec),
}

impl Rule {
    /// Creates a path rule from a dotted string.
    pub fn path(path: impl AsRef<str>) -> Self {
        Rule::Path(PathBuf::normalize(path.as_ref()))
    }

    /// Creates a path rule from a sequence of segments.
    pub fn segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Rule::Path(PathBuf::from_segments(segments))
    }

    /// Creates a function rule from a closure over the source map.
    pub fn func(f: impl Fn(&Map) -> Value + Send + Sync + 'static) -> Self {
        Rule::Func(Arc::new(f))
    }

    /// Resolves this rule against a source map.
    ///
    /// Returns `None` when the rule does not produce a value: a path rule
    /// whose path is absent, or a spec rule that misses without a fallback
    /// or whose named method does not apply. Function rules always produce
    /// a value. Panics raised inside caller closures propagate.
    pub fn resolve(&self, source: &Map) -> Option<Value> {
        match self {
            Rule::Path(path) => source.get(path).cloned(),
            Rule::Func(f) => Some(f(source)),
            Rule::Spec(spec) => spec.resolve(source),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Rule::Func(_) => f.write_str("Func(..)"),
            Rule::Spec(spec) => f.debug_tuple("Spec").field(spec).finish(),
        }
    }
}

impl From<&str> for Rule {
    fn from(path: &str) -> Self {
        Rule::path(path)
    }
}

impl From<String> for Rule {
    fn from(path: String) -> Self {
        Rule::path(path)
    }
}

impl From<PathBuf> for Rule {
    fn from(path: PathBuf) -> Self {
        Rule::Path(path)
    }
}

impl From<&crate::tree::Path> for Rule {
    fn from(path: &crate::tree::Path) -> Self {
        Rule::Path(path.to_path_buf())
    }
}

impl<const N: usize> From<[&str; N]> for Rule {
    fn from(segments: [&str; N]) -> Self {
        Rule::segments(segments)
    }
}

impl From<Vec<&str>> for Rule {
    fn from(segments: Vec<&str>) -> Self {
        Rule::segments(segments)
    }
}

impl From<Vec<String>> for Rule {
    fn from(segments: Vec<String>) -> Self {
        Rule::segments(segments)
    }
}

impl From<Spec> for Rule {
    fn from(spec: Spec) -> Self {
        Rule::Spec(spec)
    }
}

/// The full form of a reshaping rule: a source path with an optional
/// fallback value and an optional transformer.
///
/// Resolution order is fixed regardless of the order builder methods are
/// called: the `from` path is read first, the fallback replaces an absent
/// or null read, and the transformer runs last over the result.
///
/// # Examples
///
/// ```
/// use remold::smash::Spec;
/// use remold::tree::{Map, Value};
///
/// let source = Map::new().with_int("num", 123);
///
/// let spec = Spec::new("num").method("to_string");
/// assert_eq!(spec.resolve(&source).unwrap(), "123");
///
/// // Fallback applies before the transformer sees the value
/// let spec = Spec::new("missing")
///     .or("unknown")
///     .map(|value, _| value.unwrap_or(Value::Null));
/// assert_eq!(spec.resolve(&source).unwrap(), "unknown");
/// ```
#[derive(Clone)]
pub struct Spec {
    from: PathBuf,
    default: Option<Value>,
    transformer: Option<Transformer>,
}

impl Spec {
    /// Creates a spec reading the given source path.
    pub fn new(from: impl AsRef<str>) -> Self {
        Self {
            from: PathBuf::normalize(from.as_ref()),
            default: None,
            transformer: None,
        }
    }

    /// Creates a spec reading a path given as a sequence of segments.
    pub fn segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            from: PathBuf::from_segments(segments),
            default: None,
            transformer: None,
        }
    }

    /// Sets the fallback used when the source path is absent or null.
    pub fn or(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets a named built-in method as the transformer.
    ///
    /// Available methods: `to_string` (renders scalars as text),
    /// `to_uppercase`, `to_lowercase`, and `trim` (text only). A method
    /// that does not apply to the value's type resolves to nothing.
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.transformer = Some(Transformer::Method(name.into()));
        self
    }

    /// Sets a closure as the transformer.
    ///
    /// The closure receives the value read at `from` (after defaulting) and
    /// the whole source map for cross-field derivations.
    pub fn map(mut self, f: impl Fn(Option<Value>, &Map) -> Value + Send + Sync + 'static) -> Self {
        self.transformer = Some(Transformer::Func(Arc::new(f)));
        self
    }

    /// Returns the source path this spec reads.
    pub fn from(&self) -> &PathBuf {
        &self.from
    }

    /// Resolves this spec against a source map.
    pub fn resolve(&self, source: &Map) -> Option<Value> {
        let mut value = source.get(&self.from).cloned();

        // The fallback substitutes before any transformer runs, so a
        // function transformer sees the fallback rather than the miss
        if matches!(value, None | Some(Value::Null)) && self.default.is_some() {
            value = self.default.clone();
        }

        match &self.transformer {
            None => value,
            Some(Transformer::Func(f)) => Some(f(value, source)),
            Some(Transformer::Method(name)) => apply_method(name, &value?),
        }
    }
}

impl fmt::Debug for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spec")
            .field("from", &self.from)
            .field("default", &self.default)
            .field("transformer", &self.transformer)
            .finish()
    }
}

/// How a spec reworks the value it read.
#[derive(Clone)]
pub enum Transformer {
    /// Named built-in applied by value type
    Method(String),
    /// Caller closure over the (defaulted) value and the source
    Func(ValueFn),
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transformer::Method(name) => f.debug_tuple("Method").field(name).finish(),
            Transformer::Func(_) => f.write_str("Func(..)"),
        }
    }
}

/// Dispatches a named method over a value by type.
///
/// Unknown names and non-applicable types yield `None`. Dispatch is purely
/// type-driven: present-but-falsy scalars such as `0` or `""` dispatch
/// normally, only the null value never does.
fn apply_method(name: &str, value: &Value) -> Option<Value> {
    match (name, value) {
        ("to_string", Value::Int(n)) => Some(Value::Text(n.to_string())),
        ("to_string", Value::Float(x)) => Some(Value::Text(x.to_string())),
        ("to_string", Value::Bool(b)) => Some(Value::Text(b.to_string())),
        ("to_string", Value::Text(s)) => Some(Value::Text(s.clone())),
        ("to_uppercase", Value::Text(s)) => Some(Value::Text(s.to_uppercase())),
        ("to_lowercase", Value::Text(s)) => Some(Value::Text(s.to_lowercase())),
        ("trim", Value::Text(s)) => Some(Value::Text(s.trim().to_string())),
        _ => None,
    }
}
