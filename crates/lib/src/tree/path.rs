//! Dot-separated paths into nested trees.
//!
//! A path like `"info.name"` addresses a value inside nested
//! [`Map`](crate::tree::Map) layers. The module mirrors the std
//! `Path`/`PathBuf` split: [`PathBuf`] owns its storage and [`Path`] is the
//! unsized borrowed view, always used behind a reference.
//!
//! Construction normalizes the textual form by dropping empty segments, so
//! `"a..b"`, `".a.b"`, and `"a.b."` all mean `a.b`, and a string of only
//! dots means the empty path. Once normalized, splitting on `.` recovers
//! the exact component sequence.
//!
//! # Usage
//!
//! ```rust
//! use remold::tree::{Map, PathBuf};
//! use std::str::FromStr;
//!
//! // From a string, normalized on the way in
//! let path = PathBuf::from_str("info.name")?;
//!
//! // Or accumulated segment by segment
//! let path = PathBuf::new().push("info").push("name");
//!
//! let mut map = Map::new();
//! map.set(path, "Juan");
//! # Ok::<(), std::convert::Infallible>(())
//! ```

use std::{fmt, ops::Deref, str::FromStr};

use thiserror::Error;

/// Error type for path component validation.
///
/// String-based path construction never fails because normalization absorbs
/// every input; only building a [`Component`] directly can reject one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// The component text would change the path shape.
    #[error("Invalid path component '{component}': {reason}")]
    InvalidComponent { component: String, reason: String },
}

/// Normalizes a path string by filtering empty components.
///
/// - Empty string `""` → empty string (the whole-tree path)
/// - Leading dots `".info"` → `"info"`
/// - Trailing dots `"info."` → `"info"`
/// - Consecutive dots `"info..name"` → `"info.name"`
/// - Pure dots `"..."` → empty string
///
/// # Examples
///
/// ```rust
/// # use remold::tree::path::normalize_path;
/// assert_eq!(normalize_path(""), "");
/// assert_eq!(normalize_path(".info"), "info");
/// assert_eq!(normalize_path("info..name"), "info.name");
/// assert_eq!(normalize_path("..."), "");
/// ```
pub fn normalize_path(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    for segment in raw.split('.').filter(|segment| !segment.is_empty()) {
        if !normalized.is_empty() {
            normalized.push('.');
        }
        normalized.push_str(segment);
    }
    normalized
}

/// A validated single segment of a path.
///
/// Components sit between the dots, so a component can never contain a dot
/// itself. The empty component is accepted here; normalization filters it
/// out of any path it joins.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Component {
    inner: String,
}

impl Component {
    /// Validates a single path segment.
    ///
    /// # Errors
    /// Rejects the input only when it contains a dot.
    pub fn new(segment: impl Into<String>) -> Result<Self, PathError> {
        let segment = segment.into();

        if segment.contains('.') {
            return Err(PathError::InvalidComponent {
                component: segment,
                reason: "component text cannot contain '.'".to_string(),
            });
        }

        Ok(Component { inner: segment })
    }

    /// The component text.
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// A borrowed path, the unsized counterpart of [`PathBuf`].
///
/// `Path` relates to `PathBuf` the way `str` relates to `String`. Plain
/// `&str` coerces into `&Path` through [`AsRef`], so any dotted string can
/// be handed to path-taking APIs without an allocation.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Path {
    inner: str,
}

impl Path {
    /// Views a string as a path without normalizing it.
    ///
    /// # Safety
    /// The cast itself is always memory safe; `unsafe` marks the textual
    /// contract. Callers should pass a normalized string (no leading,
    /// trailing, or doubled dots). Component iteration skips empty
    /// segments, so a raw string still traverses correctly, but `as_str`
    /// and equality see the text as given.
    pub unsafe fn from_str_unchecked(s: &str) -> &Path {
        // SAFETY: Path has the same memory layout as str
        unsafe { &*(s as *const str as *const Path) }
    }

    /// Iterates the components as string slices, skipping empty ones.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.inner.split('.').filter(|segment| !segment.is_empty())
    }

    /// Number of components.
    ///
    /// Empty components never count, so the answer is right even for a
    /// path borrowed from a raw string.
    pub fn len(&self) -> usize {
        self.components().count()
    }

    /// True when the path has no components.
    pub fn is_empty(&self) -> bool {
        self.components().next().is_none()
    }

    /// The final component, or `None` for the empty path.
    pub fn last(&self) -> Option<&str> {
        self.components().last()
    }

    /// Everything but the final component, or `None` when fewer than two
    /// components remain.
    pub fn parent(&self) -> Option<PathBuf> {
        let mut segments: Vec<&str> = self.components().collect();
        segments.pop()?;
        if segments.is_empty() {
            None
        } else {
            Some(PathBuf::from_segments(segments))
        }
    }

    /// The raw text of the path.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Copies this path into an owned [`PathBuf`].
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf {
            inner: self.inner.to_string(),
        }
    }
}

/// An owned, always-normalized path.
///
/// # Examples
///
/// ```rust
/// # use remold::tree::PathBuf;
/// let path = PathBuf::normalize("blah.more.wait");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.last(), Some("wait"));
///
/// let same: Vec<&str> = path.components().collect();
/// assert_eq!(same, vec!["blah", "more", "wait"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathBuf {
    inner: String,
}

impl PathBuf {
    /// The empty path, addressing the tree root.
    pub fn new() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// A one-component path from a validated [`Component`].
    pub fn from_component(component: Component) -> Self {
        Self {
            inner: component.inner,
        }
    }

    /// Normalizes a string into an owned path. Never fails.
    pub fn normalize(raw: &str) -> Self {
        PathBuf {
            inner: normalize_path(raw),
        }
    }

    /// Appends a path fragment.
    ///
    /// The fragment is normalized first, so a dotted string appends several
    /// components in one call and an empty string changes nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use remold::tree::PathBuf;
    /// let path = PathBuf::new().push("info").push("name");
    /// assert_eq!(path.as_str(), "info.name");
    ///
    /// let path = PathBuf::new().push("blah").push("more.wait");
    /// assert_eq!(path.as_str(), "blah.more.wait");
    /// ```
    pub fn push(mut self, fragment: impl AsRef<str>) -> Self {
        let fragment = normalize_path(fragment.as_ref());
        if fragment.is_empty() {
            return self;
        }

        if !self.inner.is_empty() {
            self.inner.push('.');
        }
        self.inner.push_str(&fragment);
        self
    }

    /// Concatenates another path onto this one.
    pub fn join(self, suffix: impl AsRef<Path>) -> Self {
        self.push(suffix.as_ref().as_str())
    }

    /// Assembles a path from a sequence of segments.
    ///
    /// Each segment is pushed in turn, so dotted segments expand and empty
    /// segments disappear.
    ///
    /// ```rust
    /// # use remold::tree::PathBuf;
    /// let path = PathBuf::from_segments(["info", "name"]);
    /// assert_eq!(path.as_str(), "info.name");
    /// ```
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        segments
            .into_iter()
            .fold(PathBuf::new(), |path, segment| path.push(segment))
    }
}

impl Default for PathBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for PathBuf {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        // The buffer is kept normalized, so the borrowed view is too
        unsafe { Path::from_str_unchecked(self.inner.as_str()) }
    }
}

impl AsRef<Path> for PathBuf {
    fn as_ref(&self) -> &Path {
        self.deref()
    }
}

impl AsRef<Path> for Path {
    fn as_ref(&self) -> &Path {
        self
    }
}

/// Lets plain strings stand in wherever paths are taken.
///
/// The string is viewed as a path without copying or normalizing. Empty
/// components are skipped during traversal, so `"a..b"` reads the same as
/// `"a.b"`.
impl AsRef<Path> for str {
    fn as_ref(&self) -> &Path {
        // Traversal filters empty segments, so a raw borrow behaves like
        // its normalized form
        unsafe { Path::from_str_unchecked(self) }
    }
}

impl AsRef<Path> for String {
    fn as_ref(&self) -> &Path {
        self.as_str().as_ref()
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for PathBuf {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl FromStr for PathBuf {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

impl From<&str> for PathBuf {
    fn from(raw: &str) -> Self {
        Self::normalize(raw)
    }
}

impl From<String> for PathBuf {
    fn from(raw: String) -> Self {
        Self::normalize(&raw)
    }
}

impl From<&Path> for PathBuf {
    fn from(path: &Path) -> Self {
        path.to_path_buf()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.is_empty() {
            write!(f, "(empty path)")
        } else {
            write!(f, "{}", &self.inner)
        }
    }
}

impl fmt::Display for PathBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.deref(), f)
    }
}

/// Builds a path, taking an allocation-free route for a lone literal.
///
/// A single string literal yields `&'static Path`; any other argument
/// shape yields an owned `PathBuf`.
///
/// # Examples
///
/// ```rust
/// # use remold::tree::path;
/// // A lone literal stays borrowed (&'static Path)
/// let path = path!("info.name");
///
/// // Several arguments build a PathBuf
/// let path = path!("blah", "more", "wait");
///
/// // Runtime values mix in freely (PathBuf)
/// let base = "info";
/// let path = path!(base, "name");
/// ```
#[macro_export]
macro_rules! path {
    // No arguments: the empty PathBuf
    () => {
        $crate::tree::PathBuf::new()
    };

    // Lone literal: borrowed &'static Path, no allocation
    ($single:literal) => {{
        const NORMALIZED: &str = $crate::tree::path::normalize_const($single);
        // Layout-safe cast; traversal filters any empty components
        unsafe { $crate::tree::path::Path::from_str_unchecked(NORMALIZED) }
    }};

    // Anything else: accumulate into a PathBuf
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let mut path = $crate::tree::PathBuf::new();

        fn add_segment(path: &mut $crate::tree::PathBuf, segment: impl AsRef<str>) {
            let segment_str = segment.as_ref().trim();
            if !segment_str.is_empty() {
                *path = std::mem::take(path).push(segment_str);
            }
        }

        let first_str = $first.to_string();
        add_segment(&mut path, first_str);

        $(
            let rest_str = $rest.to_string();
            add_segment(&mut path, rest_str);
        )*

        path
    }};
}

/// Normalizes a path literal in const context.
///
/// Only the cases expressible in const code are handled here; the macro's
/// literal branch relies on the literal already being well formed. Full
/// normalization of arbitrary strings happens at runtime via
/// [`normalize_path`].
pub const fn normalize_const(path: &str) -> &str {
    if path.is_empty() {
        return "";
    }

    path
}
