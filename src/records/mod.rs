//! Typed records
//!
//! One explicit record type per resource kind. Response bodies decode into
//! these at the boundary; the table projection stays a display layer.
//! Every field defaults when the API leaves it out.

mod character;
mod common;
mod equipment;
mod monsters;
mod rules;
mod spells;

pub use character::{
    AbilityScore, Alignment, Background, Class, Feat, Feature, Language, Proficiency, Race,
    Skill, Subclass, Subrace, Trait,
};
pub use common::{ApiReference, Cost, Description, ResourceList};
pub use equipment::{EquipmentCategory, EquipmentItem, MagicItem, Rarity, WeaponProperty};
pub use monsters::Monster;
pub use rules::{Condition, DamageType, Rule, RuleSection};
pub use spells::{MagicSchool, Spell};

use crate::resource::{Endpoint, ResourceKind};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// A decoded response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    /// Collection name to path, from the API index
    Index(BTreeMap<String, String>),
    List(ResourceList),
    AbilityScore(AbilityScore),
    Alignment(Alignment),
    Background(Background),
    Class(Class),
    Condition(Condition),
    DamageType(DamageType),
    EquipmentItem(EquipmentItem),
    EquipmentCategory(EquipmentCategory),
    Feat(Feat),
    Feature(Feature),
    Language(Language),
    MagicItem(MagicItem),
    MagicSchool(MagicSchool),
    Monster(Monster),
    Proficiency(Proficiency),
    Race(Race),
    Rule(Rule),
    RuleSection(RuleSection),
    Skill(Skill),
    Spell(Spell),
    Subclass(Subclass),
    Subrace(Subrace),
    Trait(Trait),
    WeaponProperty(WeaponProperty),
    /// Bodies of paths no pattern covers
    Raw(Value),
}

fn decode<T: DeserializeOwned>(body: &Value, what: &str) -> Result<T> {
    T::deserialize(body).with_context(|| format!("Failed to decode {} record", what))
}

impl Record {
    /// Decode a body according to the kind of path it came from
    pub fn decode(kind: ResourceKind, body: &Value) -> Result<Record> {
        let endpoint = match kind {
            ResourceKind::Index => return Ok(Record::Index(decode(body, "index")?)),
            ResourceKind::Collection(endpoint) => {
                return Ok(Record::List(decode(body, endpoint.display_name())?));
            }
            ResourceKind::Generic => return Ok(Record::Raw(body.clone())),
            ResourceKind::Item(endpoint) => endpoint,
        };

        let what = endpoint.item_name();
        let record = match endpoint {
            Endpoint::AbilityScores => Record::AbilityScore(decode(body, what)?),
            Endpoint::Alignments => Record::Alignment(decode(body, what)?),
            Endpoint::Backgrounds => Record::Background(decode(body, what)?),
            Endpoint::Classes => Record::Class(decode(body, what)?),
            Endpoint::Conditions => Record::Condition(decode(body, what)?),
            Endpoint::DamageTypes => Record::DamageType(decode(body, what)?),
            Endpoint::Equipment => Record::EquipmentItem(decode(body, what)?),
            Endpoint::EquipmentCategories => Record::EquipmentCategory(decode(body, what)?),
            Endpoint::Feats => Record::Feat(decode(body, what)?),
            Endpoint::Features => Record::Feature(decode(body, what)?),
            Endpoint::Languages => Record::Language(decode(body, what)?),
            Endpoint::MagicItems => Record::MagicItem(decode(body, what)?),
            Endpoint::MagicSchools => Record::MagicSchool(decode(body, what)?),
            Endpoint::Monsters => Record::Monster(decode(body, what)?),
            Endpoint::Proficiencies => Record::Proficiency(decode(body, what)?),
            Endpoint::Races => Record::Race(decode(body, what)?),
            Endpoint::RuleSections => Record::RuleSection(decode(body, what)?),
            Endpoint::Rules => Record::Rule(decode(body, what)?),
            Endpoint::Skills => Record::Skill(decode(body, what)?),
            Endpoint::Spells => Record::Spell(decode(body, what)?),
            Endpoint::Subclasses => Record::Subclass(decode(body, what)?),
            Endpoint::Subraces => Record::Subrace(decode(body, what)?),
            Endpoint::Traits => Record::Trait(decode(body, what)?),
            Endpoint::WeaponProperties => Record::WeaponProperty(decode(body, what)?),
        };
        Ok(record)
    }

    /// Display name carried by the record, when it has one
    pub fn name(&self) -> Option<&str> {
        let name = match self {
            Record::Index(_) | Record::List(_) => return None,
            Record::Raw(value) => return value.get("name")?.as_str(),
            Record::AbilityScore(r) => &r.name,
            Record::Alignment(r) => &r.name,
            Record::Background(r) => &r.name,
            Record::Class(r) => &r.name,
            Record::Condition(r) => &r.name,
            Record::DamageType(r) => &r.name,
            Record::EquipmentItem(r) => &r.name,
            Record::EquipmentCategory(r) => &r.name,
            Record::Feat(r) => &r.name,
            Record::Feature(r) => &r.name,
            Record::Language(r) => &r.name,
            Record::MagicItem(r) => &r.name,
            Record::MagicSchool(r) => &r.name,
            Record::Monster(r) => &r.name,
            Record::Proficiency(r) => &r.name,
            Record::Race(r) => &r.name,
            Record::Rule(r) => &r.name,
            Record::RuleSection(r) => &r.name,
            Record::Skill(r) => &r.name,
            Record::Spell(r) => &r.name,
            Record::Subclass(r) => &r.name,
            Record::Subrace(r) => &r.name,
            Record::Trait(r) => &r.name,
            Record::WeaponProperty(r) => &r.name,
        };
        Some(name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_index() {
        let body = json!({"ability-scores": "/api/ability-scores"});
        let Record::Index(index) = Record::decode(ResourceKind::Index, &body).unwrap() else {
            panic!("expected index record");
        };
        assert_eq!(index["ability-scores"], "/api/ability-scores");
    }

    #[test]
    fn test_decode_collection() {
        let body = json!({
            "count": 1,
            "results": [{"index": "acolyte", "name": "Acolyte", "url": "/api/backgrounds/acolyte"}]
        });
        let record =
            Record::decode(ResourceKind::Collection(Endpoint::Backgrounds), &body).unwrap();
        let Record::List(list) = record else {
            panic!("expected list record");
        };
        assert_eq!(list.count, 1);
        assert_eq!(list.results[0].url, "/api/backgrounds/acolyte");
    }

    #[test]
    fn test_decode_ability_score() {
        let body = json!({
            "index": "cha",
            "name": "CHA",
            "full_name": "Charisma",
            "desc": ["Charisma measures your ability to interact effectively with others."],
            "skills": [
                {"index": "deception", "name": "Deception", "url": "/api/skills/deception"}
            ],
            "url": "/api/ability-scores/cha"
        });
        let record = Record::decode(ResourceKind::Item(Endpoint::AbilityScores), &body).unwrap();
        assert_eq!(record.name(), Some("CHA"));
        let Record::AbilityScore(score) = record else {
            panic!("expected ability score");
        };
        assert_eq!(score.full_name, "Charisma");
        assert_eq!(score.skills.len(), 1);
    }

    #[test]
    fn test_decode_spell() {
        let body = json!({
            "index": "acid-arrow",
            "name": "Acid Arrow",
            "level": 2,
            "school": {"index": "evocation", "name": "Evocation", "url": "/api/magic-schools/evocation"},
            "desc": ["A shimmering green arrow streaks toward a target."],
            "higher_level": ["The damage increases by 1d4."],
            "components": ["V", "S", "M"],
            "ritual": false,
            "concentration": false,
            "url": "/api/spells/acid-arrow"
        });
        let Record::Spell(spell) =
            Record::decode(ResourceKind::Item(Endpoint::Spells), &body).unwrap()
        else {
            panic!("expected spell");
        };
        assert_eq!(spell.level, 2);
        assert!(!spell.is_cantrip());
        assert_eq!(spell.school.name, "Evocation");
        assert_eq!(spell.components, ["V", "S", "M"]);
    }

    #[test]
    fn test_decode_rejects_wrong_shapes() {
        let body = json!({"name": "Aboleth", "hit_points": "lots"});
        let err = Record::decode(ResourceKind::Item(Endpoint::Monsters), &body).unwrap_err();
        assert!(err.to_string().contains("Monster"));
    }

    #[test]
    fn test_generic_is_raw() {
        let body = json!({"name": "Level 1"});
        let record = Record::decode(ResourceKind::Generic, &body).unwrap();
        assert_eq!(record.name(), Some("Level 1"));
    }
}
