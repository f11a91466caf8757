//! Character building records: scores, classes, races and what hangs off them

use super::common::{ApiReference, Description};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbilityScore {
    pub index: String,
    pub name: String,
    pub full_name: String,
    pub desc: Description,
    pub skills: Vec<ApiReference>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alignment {
    pub index: String,
    pub name: String,
    pub abbreviation: String,
    pub desc: Description,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub index: String,
    pub name: String,
    pub starting_proficiencies: Vec<ApiReference>,
    pub starting_equipment: Vec<Value>,
    pub feature: Value,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Class {
    pub index: String,
    pub name: String,
    pub hit_die: u32,
    pub proficiencies: Vec<ApiReference>,
    pub saving_throws: Vec<ApiReference>,
    pub subclasses: Vec<ApiReference>,
    pub class_levels: String,
    pub spells: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subclass {
    pub index: String,
    pub name: String,
    pub class: ApiReference,
    pub subclass_flavor: String,
    pub desc: Description,
    pub subclass_levels: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Race {
    pub index: String,
    pub name: String,
    pub speed: u32,
    pub ability_bonuses: Vec<Value>,
    pub alignment: String,
    pub age: String,
    pub size: String,
    pub size_description: String,
    pub languages: Vec<ApiReference>,
    pub traits: Vec<ApiReference>,
    pub subraces: Vec<ApiReference>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Subrace {
    pub index: String,
    pub name: String,
    pub race: ApiReference,
    pub desc: Description,
    pub ability_bonuses: Vec<Value>,
    pub racial_traits: Vec<ApiReference>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trait {
    pub index: String,
    pub name: String,
    pub desc: Description,
    pub races: Vec<ApiReference>,
    pub subraces: Vec<ApiReference>,
    pub proficiencies: Vec<ApiReference>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feat {
    pub index: String,
    pub name: String,
    pub prerequisites: Vec<Value>,
    pub desc: Description,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub index: String,
    pub name: String,
    pub level: Option<u32>,
    pub class: Option<ApiReference>,
    pub subclass: Option<ApiReference>,
    pub desc: Description,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Proficiency {
    pub index: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub classes: Vec<ApiReference>,
    pub races: Vec<ApiReference>,
    pub reference: Option<ApiReference>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    pub index: String,
    pub name: String,
    pub desc: Option<Description>,
    #[serde(rename = "type")]
    pub kind: String,
    pub typical_speakers: Vec<String>,
    pub script: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub index: String,
    pub name: String,
    pub desc: Description,
    pub ability_score: ApiReference,
    pub url: String,
}
