use std::collections::BTreeMap;

use serde::Serialize;

/// A single decoded frontmatter value.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum MetaValue {
    String(String),
    Bool(bool),
    List(Vec<String>),
}

/// Key/value record decoded from a frontmatter block.
///
/// There is no schema: lookups for a missing key, or for a key holding a
/// different kind of value, give `None` rather than failing.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Metadata(BTreeMap<String, MetaValue>);

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MetaValue) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.0.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut MetaValue> {
        self.0.get_mut(key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(MetaValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// `false` unless the key holds a literal boolean `true`.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(MetaValue::Bool(true)))
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(MetaValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> &[String] {
        match self.0.get(key) {
            Some(MetaValue::List(items)) => items.as_slice(),
            _ => &[],
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MetaValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, MetaValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, MetaValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_mistyped_fields_are_none() {
        let meta: Metadata = [
            ("title", MetaValue::String("Hello".into())),
            ("featured", MetaValue::Bool(true)),
        ]
        .into_iter()
        .collect();

        assert_eq!(meta.str("title"), Some("Hello"));
        assert_eq!(meta.str("featured"), None);
        assert_eq!(meta.str("excerpt"), None);
        assert!(meta.list("tags").is_empty());
        assert!(meta.flag("featured"));
        assert!(!meta.flag("title"));
    }

    #[test]
    fn serializes_as_plain_json_values() {
        let meta: Metadata = [
            ("title", MetaValue::String("Hello".into())),
            ("draft", MetaValue::Bool(false)),
            ("tags", MetaValue::List(vec!["a".into(), "b".into()])),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": "Hello", "draft": false, "tags": ["a", "b"]})
        );
    }
}
