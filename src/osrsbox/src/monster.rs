//! Monster definitions

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::coerce::NullPolicy;
use crate::error::RecordResult;
use crate::record::Record;
use crate::schema::{Field, Schema};
use crate::value::{FieldType, FieldValue};

/// Combat levels and equipment bonuses of a monster
pub static MONSTER_STATS: Schema = Schema {
    name: "monster_stats",
    id_field: None,
    fields: &[
        // Combat levels
        Field::value("attack_level", FieldType::Integer),
        Field::value("strength_level", FieldType::Integer),
        Field::value("defence_level", FieldType::Integer),
        Field::value("magic_level", FieldType::Integer),
        Field::value("ranged_level", FieldType::Integer),
        // Attack bonuses
        Field::value("attack_stab", FieldType::Integer),
        Field::value("attack_slash", FieldType::Integer),
        Field::value("attack_crush", FieldType::Integer),
        Field::value("attack_magic", FieldType::Integer),
        Field::value("attack_ranged", FieldType::Integer),
        // Defence bonuses
        Field::value("defence_stab", FieldType::Integer),
        Field::value("defence_slash", FieldType::Integer),
        Field::value("defence_crush", FieldType::Integer),
        Field::value("defence_magic", FieldType::Integer),
        Field::value("defence_ranged", FieldType::Integer),
        // Other bonuses
        Field::value("attack_accuracy", FieldType::Integer),
        Field::value("melee_strength", FieldType::Integer),
        Field::value("ranged_strength", FieldType::Integer),
        Field::value("magic_damage", FieldType::Integer),
    ],
};

/// An OSRS monster as exported to `<monster_id>.json`
pub static MONSTER: Schema = Schema {
    name: "monster",
    id_field: Some("monster_id"),
    fields: &[
        Field::value("monster_id", FieldType::Integer),
        Field::value("name", FieldType::String),
        Field::value("members", FieldType::Boolean),
        Field::value("release_date", FieldType::Date),
        Field::value("combat_level", FieldType::Integer),
        Field::value("examine", FieldType::String),
        Field::value("hit_points", FieldType::Integer),
        Field::value("max_hit", FieldType::Integer),
        Field::value("aggressive", FieldType::Boolean),
        Field::value("poison", FieldType::Boolean),
        Field::value("weakness", FieldType::StringList),
        Field::value("attack_type", FieldType::String),
        Field::value("attack_style", FieldType::String),
        Field::value("url", FieldType::String),
        Field::nested("stats", &MONSTER_STATS),
    ],
};

/// Typed view over a [`MONSTER`] record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Monster {
    record: Record,
}

impl Default for Monster {
    fn default() -> Self {
        Self::new()
    }
}

impl Monster {
    pub fn new() -> Self {
        Monster {
            record: Record::new(&MONSTER),
        }
    }

    /// Build a monster from a raw extracted dictionary, including its `stats`
    pub fn from_value(raw: &Value, policy: NullPolicy) -> RecordResult<Self> {
        Ok(Monster {
            record: Record::from_value(&MONSTER, raw, policy)?,
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

    pub fn monster_id(&self) -> Option<i64> {
        self.record.id()
    }

    pub fn name(&self) -> Option<&str> {
        self.value("name").and_then(FieldValue::as_str)
    }

    pub fn members(&self) -> Option<bool> {
        self.value("members").and_then(FieldValue::as_bool)
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.value("release_date").and_then(FieldValue::as_date)
    }

    pub fn combat_level(&self) -> Option<i64> {
        self.value("combat_level").and_then(FieldValue::as_i64)
    }

    pub fn hit_points(&self) -> Option<i64> {
        self.value("hit_points").and_then(FieldValue::as_i64)
    }

    pub fn max_hit(&self) -> Option<i64> {
        self.value("max_hit").and_then(FieldValue::as_i64)
    }

    pub fn aggressive(&self) -> Option<bool> {
        self.value("aggressive").and_then(FieldValue::as_bool)
    }

    pub fn poison(&self) -> Option<bool> {
        self.value("poison").and_then(FieldValue::as_bool)
    }

    pub fn weakness(&self) -> Option<&[String]> {
        self.value("weakness").and_then(FieldValue::as_list)
    }

    /// The nested stats record
    pub fn stats(&self) -> RecordResult<&Record> {
        self.record.nested("stats")
    }

    /// A single stat, e.g. `"attack_level"`
    pub fn stat(&self, name: &str) -> RecordResult<Option<i64>> {
        Ok(self.stats()?.get(name)?.and_then(FieldValue::as_i64))
    }

    fn value(&self, name: &str) -> Option<&FieldValue> {
        self.record.get(name).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use crate::ordered::Entry;
    use crate::serialize::to_text;
    use serde_json::json;

    fn zero_stats() -> Value {
        let stats: serde_json::Map<String, Value> = MONSTER_STATS
            .names()
            .map(|name| (name.to_string(), json!(0)))
            .collect();
        Value::Object(stats)
    }

    fn giant_rat() -> Value {
        json!({
            "monster_id": 415,
            "name": "Giant rat",
            "members": 0,
            "release_date": null,
            "combat_level": 3,
            "examine": "A large rodent.",
            "hit_points": 3,
            "max_hit": 1,
            "aggressive": 1,
            "poison": 0,
            "weakness": [],
            "attack_type": "melee",
            "attack_style": "crush",
            "url": "https://x",
            "stats": zero_stats()
        })
    }

    #[test]
    fn test_stats_manifest_has_nineteen_integer_fields() {
        assert_eq!(MONSTER_STATS.len(), 19);
        assert!(MONSTER_STATS
            .fields
            .iter()
            .all(|f| f.field_type() == Some(FieldType::Integer)));
    }

    #[test]
    fn test_load_giant_rat() {
        let monster = Monster::from_value(&giant_rat(), NullPolicy::Falsy).unwrap();

        assert_eq!(monster.monster_id(), Some(415));
        assert_eq!(monster.name(), Some("Giant rat"));
        assert_eq!(monster.members(), None);
        assert_eq!(monster.aggressive(), Some(true));
        assert_eq!(monster.poison(), None);
        assert_eq!(monster.weakness(), None);
        assert_eq!(monster.release_date(), None);
        assert_eq!(monster.stat("attack_level").unwrap(), None);
    }

    #[test]
    fn test_giant_rat_structure_starts_with_id() {
        let monster = Monster::from_value(&giant_rat(), NullPolicy::Falsy).unwrap();
        let structure = monster.record().to_ordered();

        let (first_key, first_entry) = structure.iter().next().unwrap();
        assert_eq!(first_key, "monster_id");
        assert_eq!(first_entry, &Entry::Value(Some(FieldValue::Integer(415))));

        let text = to_text(monster.record(), false).unwrap();
        assert!(text.starts_with(r#"{"monster_id":415,"name":"Giant rat","members":null"#));
        assert!(text.ends_with(r#""magic_damage":null}}"#));
    }

    #[test]
    fn test_absent_policy_keeps_zero_stats() {
        let monster = Monster::from_value(&giant_rat(), NullPolicy::Absent).unwrap();
        assert_eq!(monster.members(), Some(false));
        assert_eq!(monster.weakness(), Some(&[][..]));
        assert_eq!(monster.stat("magic_damage").unwrap(), Some(0));
    }

    #[test]
    fn test_release_date() {
        let mut raw = giant_rat();
        raw["release_date"] = json!("13 October 2019");
        let monster = Monster::from_value(&raw, NullPolicy::Falsy).unwrap();
        assert_eq!(monster.release_date(), NaiveDate::from_ymd_opt(2019, 10, 13));

        let text = to_text(monster.record(), false).unwrap();
        assert!(text.contains(r#""release_date":"13 October 2019""#));

        raw["release_date"] = json!("2019-10-13");
        assert!(matches!(
            Monster::from_value(&raw, NullPolicy::Falsy),
            Err(RecordError::Format { .. })
        ));
    }

    #[test]
    fn test_missing_name_fails() {
        let mut raw = giant_rat();
        raw.as_object_mut().unwrap().remove("name");
        assert!(matches!(
            Monster::from_value(&raw, NullPolicy::Falsy),
            Err(RecordError::MissingKey { ref field, .. }) if field == "name"
        ));
    }

    #[test]
    fn test_export_roundtrip() {
        let mut raw = giant_rat();
        raw["weakness"] = json!(["crush", "stab"]);
        raw["stats"]["defence_stab"] = json!(-5);
        let monster = Monster::from_value(&raw, NullPolicy::Falsy).unwrap();

        let exported = monster.record().to_ordered().to_value().unwrap();
        let reloaded = Monster::from_value(&exported, NullPolicy::Falsy).unwrap();
        assert_eq!(reloaded, monster);
        assert_eq!(reloaded.stat("defence_stab").unwrap(), Some(-5));
    }

    #[test]
    fn test_serialize_is_transparent() {
        let monster = Monster::from_value(&giant_rat(), NullPolicy::Falsy).unwrap();
        assert_eq!(
            serde_json::to_string(&monster).unwrap(),
            to_text(monster.record(), false).unwrap()
        );
    }

    #[test]
    fn test_new_monster_is_empty() {
        let monster = Monster::default();
        assert_eq!(monster.monster_id(), None);
        assert_eq!(monster.stats().unwrap().schema().name, "monster_stats");
        assert!(matches!(monster.stat("luck"), Err(RecordError::UnknownField { .. })));
    }
}
