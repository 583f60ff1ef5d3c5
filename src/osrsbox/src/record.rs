//! Generic schema-driven records.
//!
//! A [`Record`] holds one slot per manifest field. Values only enter through
//! [`Record::set`] (or [`Record::load`], which calls it per field), so each
//! slot is either `None` or a value of the declared type.
//!
//! ## Example
//!
//! ```
//! use osrsbox::{Record, MONSTER_STATS};
//! use serde_json::json;
//!
//! let mut stats = Record::new(&MONSTER_STATS);
//! stats.set("attack_level", &json!("12")).unwrap();
//! assert_eq!(stats.get("attack_level").unwrap().and_then(|v| v.as_i64()), Some(12));
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::coerce::{coerce, NullPolicy};
use crate::error::{RecordError, RecordResult};
use crate::ordered::{Entry, OrderedStructure};
use crate::schema::{Field, FieldKind, Schema};
use crate::value::FieldValue;

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Value(Option<FieldValue>),
    Nested(Box<Record>),
}

/// A typed entity built from a static field manifest
#[derive(Clone)]
pub struct Record {
    schema: &'static Schema,
    policy: NullPolicy,
    slots: Vec<Slot>,
}

impl Record {
    /// Create a record with every field `None` and the default null policy
    pub fn new(schema: &'static Schema) -> Self {
        Self::with_policy(schema, NullPolicy::default())
    }

    /// Create an empty record; nested records share `policy`
    pub fn with_policy(schema: &'static Schema, policy: NullPolicy) -> Self {
        let slots = schema
            .fields
            .iter()
            .map(|field| match field.kind {
                FieldKind::Value(_) => Slot::Value(None),
                FieldKind::Nested(inner) => Slot::Nested(Box::new(Record::with_policy(inner, policy))),
            })
            .collect();

        Record {
            schema,
            policy,
            slots,
        }
    }

    /// Create and populate a record from a raw dictionary
    pub fn from_value(schema: &'static Schema, raw: &Value, policy: NullPolicy) -> RecordResult<Self> {
        let mut record = Self::with_policy(schema, policy);
        record.load(raw)?;
        Ok(record)
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn policy(&self) -> NullPolicy {
        self.policy
    }

    /// Coerce `raw` to the field's declared type and store it.
    ///
    /// Setting a nested field loads the sub-record from `raw`, which must be
    /// a dictionary.
    pub fn set(&mut self, name: &str, raw: &Value) -> RecordResult<()> {
        let (index, field) = self.lookup(name)?;
        let policy = self.policy;

        match (&mut self.slots[index], field.kind) {
            (Slot::Value(slot), FieldKind::Value(ty)) => {
                *slot = coerce(name, ty, raw, policy)?;
            }
            (Slot::Nested(child), FieldKind::Nested(_)) => {
                child.load(raw)?;
            }
            _ => unreachable!("slots are built from the schema"),
        }
        Ok(())
    }

    /// Current value of a value field
    pub fn get(&self, name: &str) -> RecordResult<Option<&FieldValue>> {
        let (index, _) = self.lookup(name)?;
        match &self.slots[index] {
            Slot::Value(value) => Ok(value.as_ref()),
            Slot::Nested(_) => Err(RecordError::NestedField {
                record: self.schema.name,
                field: name.to_string(),
            }),
        }
    }

    /// Sub-record stored under a nested field
    pub fn nested(&self, name: &str) -> RecordResult<&Record> {
        let (index, _) = self.lookup(name)?;
        match &self.slots[index] {
            Slot::Nested(child) => Ok(&**child),
            Slot::Value(_) => Err(self.not_nested(name)),
        }
    }

    pub fn nested_mut(&mut self, name: &str) -> RecordResult<&mut Record> {
        let (index, _) = self.lookup(name)?;
        let not_nested = self.not_nested(name);
        match &mut self.slots[index] {
            Slot::Nested(child) => Ok(&mut **child),
            Slot::Value(_) => Err(not_nested),
        }
    }

    /// Populate every manifest field from a raw dictionary.
    ///
    /// Every manifest key must be present, even when its value is `null`.
    /// On error the record is left partially populated and should be
    /// discarded.
    pub fn load(&mut self, raw: &Value) -> RecordResult<()> {
        let map = raw.as_object().ok_or(RecordError::NotAnObject {
            record: self.schema.name,
        })?;

        for field in self.schema.fields {
            let value = map.get(field.name).ok_or_else(|| RecordError::MissingKey {
                record: self.schema.name,
                field: field.name.to_string(),
            })?;
            self.set(field.name, value)?;
        }

        tracing::debug!(record = self.schema.name, id = ?self.id(), "loaded record");
        Ok(())
    }

    /// Populate from JSON text
    pub fn load_json_str(&mut self, text: &str) -> RecordResult<()> {
        let raw: Value = serde_json::from_str(text)?;
        self.load(&raw)
    }

    /// Populate from a JSON file, such as one previously exported
    pub fn load_json_file(&mut self, path: &Path) -> RecordResult<()> {
        let text = fs::read_to_string(path)?;
        self.load_json_str(&text)
    }

    /// Ordered key/value view of every field, nested records expanded
    pub fn to_ordered(&self) -> OrderedStructure {
        let mut out = OrderedStructure::with_capacity(self.slots.len());
        for (field, slot) in self.schema.fields.iter().zip(&self.slots) {
            let entry = match slot {
                Slot::Value(value) => Entry::Value(value.clone()),
                Slot::Nested(child) => Entry::Nested(child.to_ordered()),
            };
            out.push(field.name, entry);
        }
        out
    }

    /// Value of the schema's id field, if it has one and it is set.
    ///
    /// The id field may live in a sub-record, e.g. `"quest_metadata.number"`.
    pub fn id(&self) -> Option<i64> {
        let path = self.schema.id_field?;
        let (parents, name) = match path.rsplit_once('.') {
            Some((parents, name)) => (Some(parents), name),
            None => (None, path),
        };

        let mut current = self;
        for part in parents.into_iter().flat_map(|p| p.split('.')) {
            current = current.nested(part).ok()?;
        }
        current.get(name).ok().flatten().and_then(FieldValue::as_i64)
    }

    fn lookup(&self, name: &str) -> RecordResult<(usize, &'static Field)> {
        self.schema.field(name).ok_or_else(|| self.unknown(name))
    }

    fn not_nested(&self, name: &str) -> RecordError {
        RecordError::NotNested {
            record: self.schema.name,
            field: name.to_string(),
        }
    }

    fn unknown(&self, name: &str) -> RecordError {
        RecordError::UnknownField {
            record: self.schema.name,
            field: name.to_string(),
        }
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.slots == other.slots
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.schema.name);
        for (field, slot) in self.schema.fields.iter().zip(&self.slots) {
            match slot {
                Slot::Value(value) => s.field(field.name, value),
                Slot::Nested(child) => s.field(field.name, child),
            };
        }
        s.finish()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_ordered().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldType;
    use serde_json::json;

    static SKILLS: Schema = Schema {
        name: "skills",
        id_field: None,
        fields: &[
            Field::value("level", FieldType::Integer),
            Field::value("ratio", FieldType::Float),
        ],
    };

    static CREATURE: Schema = Schema {
        name: "creature",
        id_field: Some("id"),
        fields: &[
            Field::value("id", FieldType::Integer),
            Field::value("name", FieldType::String),
            Field::value("tame", FieldType::Boolean),
            Field::value("seen", FieldType::Date),
            Field::value("tags", FieldType::StringList),
            Field::nested("skills", &SKILLS),
        ],
    };

    fn raw_creature() -> Value {
        json!({
            "id": 7,
            "name": "Chicken",
            "tame": 0,
            "seen": "13 October 2019",
            "tags": ["bird"],
            "skills": {"level": "2", "ratio": 0.5}
        })
    }

    #[test]
    fn test_new_record_is_all_null() {
        let record = Record::new(&CREATURE);
        assert_eq!(record.get("name").unwrap(), None);
        assert_eq!(record.nested("skills").unwrap().get("level").unwrap(), None);
        assert_eq!(record.id(), None);
    }

    #[test]
    fn test_set_and_get() {
        let mut record = Record::new(&CREATURE);
        record.set("id", &json!("12")).unwrap();
        record.set("tame", &json!("yes")).unwrap();
        assert_eq!(record.get("id").unwrap(), Some(&FieldValue::Integer(12)));
        assert_eq!(record.get("tame").unwrap(), Some(&FieldValue::Boolean(true)));
        assert_eq!(record.id(), Some(12));
    }

    #[test]
    fn test_unknown_field() {
        let mut record = Record::new(&CREATURE);
        assert!(matches!(
            record.set("colour", &json!("red")),
            Err(RecordError::UnknownField { record: "creature", .. })
        ));
        assert!(matches!(
            record.get("colour"),
            Err(RecordError::UnknownField { .. })
        ));
        assert!(matches!(record.nested("colour"), Err(RecordError::UnknownField { .. })));
    }

    #[test]
    fn test_nested_on_value_field() {
        let mut record = Record::new(&CREATURE);
        assert!(matches!(
            record.nested("name"),
            Err(RecordError::NotNested { record: "creature", ref field }) if field == "name"
        ));
        assert!(matches!(record.nested_mut("tags"), Err(RecordError::NotNested { .. })));
    }

    #[test]
    fn test_set_through_nested_mut() {
        let mut record = Record::new(&CREATURE);
        record.nested_mut("skills").unwrap().set("ratio", &json!("0.75")).unwrap();
        assert_eq!(
            record.nested("skills").unwrap().get("ratio").unwrap(),
            Some(&FieldValue::Float(0.75))
        );
    }

    #[test]
    fn test_set_nested_field_loads_sub_record() {
        let mut record = Record::new(&CREATURE);
        record.set("skills", &json!({"level": 4, "ratio": null})).unwrap();
        assert_eq!(
            record.nested("skills").unwrap().get("level").unwrap(),
            Some(&FieldValue::Integer(4))
        );
    }

    #[test]
    fn test_get_on_nested_field() {
        let record = Record::new(&CREATURE);
        assert!(matches!(record.get("skills"), Err(RecordError::NestedField { .. })));
    }

    #[test]
    fn test_load() {
        let record = Record::from_value(&CREATURE, &raw_creature(), NullPolicy::Falsy).unwrap();
        assert_eq!(record.get("name").unwrap().and_then(|v| v.as_str()), Some("Chicken"));
        assert_eq!(record.get("tame").unwrap(), None);
        assert_eq!(
            record.nested("skills").unwrap().get("level").unwrap(),
            Some(&FieldValue::Integer(2))
        );
    }

    #[test]
    fn test_load_missing_key() {
        let mut raw = raw_creature();
        raw.as_object_mut().unwrap().remove("name");

        let err = Record::from_value(&CREATURE, &raw, NullPolicy::Falsy).unwrap_err();
        assert!(matches!(
            err,
            RecordError::MissingKey { record: "creature", ref field } if field == "name"
        ));
    }

    #[test]
    fn test_load_missing_nested_key() {
        let mut raw = raw_creature();
        raw["skills"].as_object_mut().unwrap().remove("ratio");

        let err = Record::from_value(&CREATURE, &raw, NullPolicy::Falsy).unwrap_err();
        assert!(matches!(err, RecordError::MissingKey { record: "skills", .. }));
    }

    #[test]
    fn test_load_nested_must_be_dictionary() {
        let mut raw = raw_creature();
        raw["skills"] = json!(null);

        let err = Record::from_value(&CREATURE, &raw, NullPolicy::Falsy).unwrap_err();
        assert!(matches!(err, RecordError::NotAnObject { record: "skills" }));
    }

    #[test]
    fn test_load_propagates_conversion_error() {
        let mut raw = raw_creature();
        raw["id"] = json!("seven");

        let err = Record::from_value(&CREATURE, &raw, NullPolicy::Falsy).unwrap_err();
        assert!(matches!(err, RecordError::TypeConversion { .. }));
    }

    #[test]
    fn test_order_ignores_assignment_order() {
        let mut record = Record::new(&CREATURE);
        record.set("tags", &json!(["a"])).unwrap();
        record.set("name", &json!("Cow")).unwrap();
        record.set("id", &json!(1)).unwrap();

        let keys: Vec<_> = record.to_ordered().keys().collect();
        assert_eq!(keys, vec!["id", "name", "tame", "seen", "tags", "skills"]);
    }

    #[test]
    fn test_reload_from_ordered_structure() {
        let record = Record::from_value(&CREATURE, &raw_creature(), NullPolicy::Falsy).unwrap();
        let raw = record.to_ordered().to_value().unwrap();

        let reloaded = Record::from_value(&CREATURE, &raw, NullPolicy::Falsy).unwrap();
        assert_eq!(reloaded, record);
    }

    #[test]
    fn test_policy_is_inherited_by_nested_records() {
        let mut raw = raw_creature();
        raw["skills"]["level"] = json!(0);

        let record = Record::from_value(&CREATURE, &raw, NullPolicy::Absent).unwrap();
        assert_eq!(record.get("tame").unwrap(), Some(&FieldValue::Boolean(false)));
        assert_eq!(record.nested("skills").unwrap().policy(), NullPolicy::Absent);
        assert_eq!(
            record.nested("skills").unwrap().get("level").unwrap(),
            Some(&FieldValue::Integer(0))
        );
    }

    #[test]
    fn test_load_json_str() {
        let mut record = Record::new(&CREATURE);
        record.load_json_str(&raw_creature().to_string()).unwrap();
        assert_eq!(record.id(), Some(7));

        assert!(matches!(
            Record::new(&CREATURE).load_json_str("{not json"),
            Err(RecordError::Json(_))
        ));
    }

    #[test]
    fn test_debug_uses_field_names() {
        let record = Record::from_value(&CREATURE, &raw_creature(), NullPolicy::Falsy).unwrap();
        let debug = format!("{:?}", record);
        assert!(debug.starts_with("creature {"));
        assert!(debug.contains("skills: skills {"));
    }
}
