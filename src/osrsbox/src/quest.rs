//! Quest definitions.
//!
//! Quests come in three kinds (normal quests, miniquests and subquests),
//! stored verbatim in `quest_type`. Only normal quests carry a quest
//! number, and that number names the exported file.

use serde::Serialize;
use serde_json::Value;

use crate::coerce::NullPolicy;
use crate::error::RecordResult;
use crate::record::Record;
use crate::schema::{Field, Schema};
use crate::value::{FieldType, FieldValue};

pub static QUEST_METADATA: Schema = Schema {
    name: "quest_metadata",
    id_field: None,
    fields: &[
        Field::value("number", FieldType::Integer),
        Field::value("series", FieldType::StringList),
    ],
};

pub static QUEST: Schema = Schema {
    name: "quest",
    id_field: Some("quest_metadata.number"),
    fields: &[
        Field::value("quest_name", FieldType::String),
        Field::value("quest_type", FieldType::String),
        Field::nested("quest_metadata", &QUEST_METADATA),
    ],
};

/// Typed view over a [`QUEST`] record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Quest {
    record: Record,
}

impl Default for Quest {
    fn default() -> Self {
        Self::new()
    }
}

impl Quest {
    pub fn new() -> Self {
        Quest {
            record: Record::new(&QUEST),
        }
    }

    pub fn from_value(raw: &Value, policy: NullPolicy) -> RecordResult<Self> {
        Ok(Quest {
            record: Record::from_value(&QUEST, raw, policy)?,
        })
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut Record {
        &mut self.record
    }

    pub fn into_record(self) -> Record {
        self.record
    }

    pub fn quest_name(&self) -> Option<&str> {
        self.value("quest_name").and_then(FieldValue::as_str)
    }

    pub fn quest_type(&self) -> Option<&str> {
        self.value("quest_type").and_then(FieldValue::as_str)
    }

    pub fn quest_metadata(&self) -> RecordResult<&Record> {
        self.record.nested("quest_metadata")
    }

    /// Quest number; miniquests and subquests have none
    pub fn number(&self) -> Option<i64> {
        self.record.id()
    }

    /// Quest series this quest belongs to, if any
    pub fn series(&self) -> RecordResult<Option<&[String]>> {
        Ok(self
            .quest_metadata()?
            .get("series")?
            .and_then(FieldValue::as_list))
    }

    fn value(&self, name: &str) -> Option<&FieldValue> {
        self.record.get(name).ok().flatten()
    }
}
