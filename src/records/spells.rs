//! Spellcasting records

use super::common::{ApiReference, Description};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagicSchool {
    pub index: String,
    pub name: String,
    pub desc: Description,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spell {
    pub index: String,
    pub name: String,
    pub level: u32,
    pub school: ApiReference,
    pub desc: Description,
    pub higher_level: Description,
    pub range: String,
    pub components: Vec<String>,
    pub material: Option<String>,
    pub ritual: bool,
    pub duration: String,
    pub concentration: bool,
    pub casting_time: String,
    pub classes: Vec<ApiReference>,
    pub subclasses: Vec<ApiReference>,
    pub url: String,
}

impl Spell {
    /// Cantrips are level 0
    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }
}
