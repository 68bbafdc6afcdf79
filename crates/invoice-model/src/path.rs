//! Field paths inside JSON payloads.
//!
//! A [`FieldPath`] locates a value inside a submission, e.g.
//! `invoice_items[1].cost`. Paths have a total ordering so that validation
//! errors can be sorted reproducibly:
//!
//! - Paths compare segment by segment (lexicographic over the sequence)
//! - A path sorts before any of its extensions (the root sorts first)
//! - When two segments differ in kind, [`PathSegment::Index`] sorts before
//!   [`PathSegment::Key`]

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step into a JSON value: an array index or an object key.
///
/// Variant order matters: the derived `Ord` places indices before keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Position inside an array.
    Index(usize),
    /// Key inside an object.
    Key(String),
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

/// Location of a value inside a payload.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The empty path, pointing at the payload itself.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path extended by one segment.
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// Returns a new path with `prefix` prepended.
    #[must_use]
    pub fn prefixed(&self, prefix: &FieldPath) -> Self {
        let mut segments = Vec::with_capacity(prefix.0.len() + self.0.len());
        segments.extend(prefix.0.iter().cloned());
        segments.extend(self.0.iter().cloned());
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(segments: &[PathSegment]) -> FieldPath {
        segments.iter().cloned().collect()
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldPath::root().to_string(), "<root>");
        let p = FieldPath::root()
            .child("invoice_items")
            .child(1usize)
            .child("cost");
        assert_eq!(p.to_string(), "invoice_items[1].cost");
    }

    #[test]
    fn test_root_sorts_first() {
        let root = FieldPath::root();
        let client = FieldPath::root().child("client_id");
        assert!(root < client);
    }

    #[test]
    fn test_prefix_sorts_before_extension() {
        let items = FieldPath::root().child("invoice_items");
        let first = items.child(0usize);
        assert!(items < first);
    }

    #[test]
    fn test_lexicographic_keys() {
        let a = path(&["client_id".into()]);
        let b = path(&["due_date".into()]);
        let c = path(&["invoice_items".into(), 0usize.into()]);
        let mut paths = vec![c.clone(), b.clone(), a.clone()];
        paths.sort();
        assert_eq!(paths, vec![a, b, c]);
    }

    #[test]
    fn test_index_before_key() {
        assert!(PathSegment::Index(9) < PathSegment::Key("0".to_string()));
        let by_index = path(&["invoice_items".into(), 2usize.into()]);
        let by_key = path(&["invoice_items".into(), "length".into()]);
        assert!(by_index < by_key);
    }

    #[test]
    fn test_indices_compare_numerically() {
        let two = path(&[2usize.into()]);
        let ten = path(&[10usize.into()]);
        assert!(two < ten);
    }

    #[test]
    fn test_prefixed() {
        let inner = FieldPath::root().child("cost");
        let prefix = FieldPath::root().child("invoice_items").child(1usize);
        assert_eq!(inner.prefixed(&prefix).to_string(), "invoice_items[1].cost");
    }

    #[test]
    fn test_serializes_as_array() {
        let p = FieldPath::root().child("invoice_items").child(1usize);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json, serde_json::json!(["invoice_items", 1]));
        let back: FieldPath = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }
}
