//! # Ordered Documents
//!
//! Compliance messages are JSON objects whose *field order is part of the
//! signed content*. A [`Document`] keeps its entries in an explicit vector,
//! so insertion order is a property of the container rather than of whichever
//! map type happens to back it.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ORDERED DOCUMENT                                   │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  entries: [ ("transfer_id", "b979…"), ("txid", "6f72…") ]              │
//! │                                                                         │
//! │  set("signature", "")     → appended:  [transfer_id, txid, signature]  │
//! │  set("txid", "…")         → in place:  [transfer_id, txid, signature]  │
//! │                                                                         │
//! │  to_json_string()         → {"transfer_id":"…","txid":"…",…}           │
//! │                             compact, insertion order, Go escaping      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two documents with the same pairs in a different order are *not* equal
//! and do not serialize identically.

mod canonical;
mod value;

pub use value::Value;

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};

/// An insertion-ordered JSON object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(String, Value)>,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the document has no fields
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    /// Whether a field exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    /// Look up a field mutably
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let i = self.position(key)?;
        Some(&mut self.entries[i].1)
    }

    /// Insert or overwrite a field
    ///
    /// A new key is appended at the end; an existing key keeps its
    /// position. Returns the previous value, if any.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Remove a field, keeping the order of the others
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let i = self.position(key)?;
        Some(self.entries.remove(i).1)
    }

    /// Parse a JSON object, keeping member order at every level
    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_json_slice(s.as_bytes())
    }

    /// Parse a JSON object from bytes
    ///
    /// Anything other than a single JSON object fails with `InvalidEncoding`.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::InvalidEncoding(format!("invalid JSON document: {}", e)))
    }

    /// Canonical compact serialization
    ///
    /// These are the exact bytes that signatures cover. Strings escape
    /// `<`, `>`, `&`, U+2028 and U+2029, and floats print the way Go's
    /// `encoding/json` prints them.
    pub fn to_json_vec(&self) -> Result<Vec<u8>> {
        canonical::to_vec(self)
    }

    /// Canonical compact serialization as a string
    pub fn to_json_string(&self) -> Result<String> {
        canonical::to_string(self)
    }
}

/// Serialize one document as an object, or several as a JSON array
pub fn documents_to_json(docs: &[Document]) -> Result<String> {
    match docs {
        [single] => single.to_json_string(),
        many => canonical::to_string(many),
    }
}

impl<K, V> FromIterator<(K, V)> for Document
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, v) in iter {
            doc.set(k, v);
        }
        doc
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ============================================================================
// SERDE
// ============================================================================

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Document, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut doc = Document::with_capacity(map.size_hint().unwrap_or(0));
        // Duplicate members: first position, last value.
        while let Some((k, v)) = map.next_entry::<String, Value>()? {
            doc.set(k, v);
        }
        Ok(doc)
    }
}

// ============================================================================
// TESTS
// ============================================================================
