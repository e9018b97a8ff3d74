//! Free-form card properties.
//!
//! The typed fields on `CardDefinition` cover what the placement and summon
//! rules read. Everything else a card table carries (archetype, material
//! substitution marks, search tags) lives in this map, so card effects can
//! filter on it without the engine knowing every key.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Archetype name, matched by `CardFilter::Archetype`.
pub const ARCHETYPE: &str = "archetype";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeKey(pub String);

impl AttributeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AttributeKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A card table value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Int(i64),
    /// Marks such as `double_link_material`.
    Bool(bool),
    Text(String),
    /// Several archetypes or tags.
    TextList(Vec<String>),
}

impl AttributeValue {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True if this is `Text(text)` or a `TextList` containing it.
    ///
    /// A card belonging to two archetypes stores them as a list, and a
    /// filter on either name matches it.
    #[must_use]
    pub fn mentions(&self, text: &str) -> bool {
        match self {
            AttributeValue::Text(s) => s == text,
            AttributeValue::TextList(v) => v.iter().any(|s| s == text),
            AttributeValue::Int(_) | AttributeValue::Bool(_) => false,
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(v: Vec<String>) -> Self {
        AttributeValue::TextList(v)
    }
}

pub type Attributes = FxHashMap<AttributeKey, AttributeValue>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_str() {
        let key: AttributeKey = ARCHETYPE.into();
        assert_eq!(key, AttributeKey::new("archetype"));
        assert_eq!(key.as_str(), "archetype");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(AttributeValue::Bool(true).as_bool(), Some(true));
        assert_eq!(AttributeValue::Int(5).as_bool(), None);
        assert_eq!(AttributeValue::from("Vale").as_text(), Some("Vale"));
    }

    #[test]
    fn test_mentions() {
        let single: AttributeValue = "Vale".into();
        let list: AttributeValue = vec!["Vale".to_string(), "Ember".to_string()].into();

        assert!(single.mentions("Vale"));
        assert!(!single.mentions("Ember"));
        assert!(list.mentions("Ember"));
        assert!(!AttributeValue::Int(1).mentions("1"));
    }
}
