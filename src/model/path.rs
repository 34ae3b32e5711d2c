//! Immutable segmented path values.
//!
//! An [`ObjectPath`] is the segment-wise form of a binary class name:
//! `java/util/Map` becomes `["java", "util", "Map"]`. Paths are immutable
//! value types, compare and hash by their segments, and are used as names and
//! map keys throughout the model.

use std::fmt;
use std::sync::Arc;

/// An immutable, segmented path value.
///
/// All structural operations (`join`, `append`, `tail`, `parent`) return new
/// paths; the original is never modified. Segments are shared, so cloning a
/// path is cheap.
///
/// # Example
///
/// ```rust
/// use classlink::model::ObjectPath;
///
/// let path = ObjectPath::from_binary_name("java/util/Map");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path.last(), Some("Map"));
/// assert_eq!(path.join_str("."), "java.util.Map");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ObjectPath {
    segments: Arc<[String]>,
}

impl ObjectPath {
    /// Creates a path from the given segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ObjectPath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an empty path.
    #[must_use]
    pub fn empty() -> Self {
        ObjectPath {
            segments: Arc::from([]),
        }
    }

    /// Creates a path by splitting a binary class name on `/`.
    #[must_use]
    pub fn from_binary_name(name: &str) -> Self {
        ObjectPath::from_string(name, '/')
    }

    /// Creates a path by splitting `value` on the given delimiter.
    #[must_use]
    pub fn from_string(value: &str, delimiter: char) -> Self {
        ObjectPath::new(value.split(delimiter))
    }

    /// Returns a new path that is the concatenation of `self` and `other`.
    #[must_use]
    pub fn join(&self, other: &ObjectPath) -> Self {
        ObjectPath {
            segments: self
                .segments
                .iter()
                .chain(other.segments.iter())
                .cloned()
                .collect(),
        }
    }

    /// Returns a new path with `segment` appended at the end.
    #[must_use]
    pub fn append(&self, segment: impl Into<String>) -> Self {
        ObjectPath {
            segments: self
                .segments
                .iter()
                .cloned()
                .chain(std::iter::once(segment.into()))
                .collect(),
        }
    }

    /// The first segment, or `None` for an empty path.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    /// The last segment, or `None` for an empty path.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// A new path with the first segment removed, or `None` for an empty path.
    #[must_use]
    pub fn tail(&self) -> Option<ObjectPath> {
        if self.is_empty() {
            return None;
        }
        Some(ObjectPath::new(self.segments[1..].iter().cloned()))
    }

    /// A new path with the last segment removed, or `None` for an empty path.
    #[must_use]
    pub fn parent(&self) -> Option<ObjectPath> {
        if self.is_empty() {
            return None;
        }
        Some(ObjectPath::new(
            self.segments[..self.segments.len() - 1].iter().cloned(),
        ))
    }

    /// Whether the path has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Iterates over the segments in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Renders the path with the given delimiter between segments.
    #[must_use]
    pub fn join_str(&self, delimiter: &str) -> String {
        self.segments.join(delimiter)
    }

    /// Renders the path as a binary class name (slash-joined).
    #[must_use]
    pub fn binary_name(&self) -> String {
        self.join_str("/")
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join_str("/"))
    }
}

impl<'a> IntoIterator for &'a ObjectPath {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_binary_name() {
        let path = ObjectPath::from_binary_name("java/lang/Object");
        assert_eq!(path.len(), 3);
        assert_eq!(path.first(), Some("java"));
        assert_eq!(path.last(), Some("Object"));
    }

    #[test]
    fn test_join_and_append() {
        let a = ObjectPath::from_binary_name("java/util");
        let b = ObjectPath::new(["Map"]);
        let joined = a.join(&b);
        assert_eq!(joined.binary_name(), "java/util/Map");
        assert_eq!(a.append("List").binary_name(), "java/util/List");
        // originals untouched
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_tail_and_parent() {
        let path = ObjectPath::from_binary_name("a/b/c");
        assert_eq!(path.tail().unwrap().binary_name(), "b/c");
        assert_eq!(path.parent().unwrap().binary_name(), "a/b");
        assert!(ObjectPath::empty().tail().is_none());
        assert!(ObjectPath::empty().parent().is_none());
    }

    #[test]
    fn test_equality_and_display() {
        let a = ObjectPath::from_binary_name("x/y");
        let b = ObjectPath::new(["x", "y"]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "x/y");
        assert_eq!(a.join_str("."), "x.y");
    }
}
