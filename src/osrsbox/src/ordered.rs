//! Ordered key/value output of a record.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::RecordResult;
use crate::value::FieldValue;

/// One exported field
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Value(Option<FieldValue>),
    Nested(OrderedStructure),
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entry::Value(Some(value)) => value.serialize(serializer),
            Entry::Value(None) => serializer.serialize_none(),
            Entry::Nested(inner) => inner.serialize(serializer),
        }
    }
}

/// Key/value pairs whose iteration and serialization order is the field
/// manifest order of the record that produced them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderedStructure {
    entries: Vec<(&'static str, Entry)>,
}

impl OrderedStructure {
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedStructure {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, key: &'static str, entry: Entry) {
        self.entries.push((key, entry));
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, e)| e)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Entry)> {
        self.entries.iter().map(|(k, e)| (*k, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to a raw dictionary that `Record::load` accepts.
    ///
    /// The returned map does not keep key order; use the serializer for
    /// ordered text.
    pub fn to_value(&self) -> RecordResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for OrderedStructure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}
