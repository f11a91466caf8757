//! Monster stat blocks

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Monster {
    pub index: String,
    pub name: String,
    pub size: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub subtype: Option<String>,
    pub alignment: String,
    /// A plain number on older API versions, a list of sources on newer ones
    pub armor_class: Value,
    pub hit_points: u32,
    pub hit_dice: String,
    pub strength: u32,
    pub dexterity: u32,
    pub constitution: u32,
    pub intelligence: u32,
    pub wisdom: u32,
    pub charisma: u32,
    pub challenge_rating: f64,
    pub xp: u64,
    pub languages: String,
    pub special_abilities: Vec<Value>,
    pub actions: Vec<Value>,
    pub legendary_actions: Vec<Value>,
    pub image: Option<String>,
    pub url: String,
}

impl Monster {
    /// Ability modifier for a score, rounded down
    pub fn modifier(score: u32) -> i32 {
        (score as i32 - 10).div_euclid(2)
    }
}
