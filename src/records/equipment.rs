//! Gear records

use super::common::{ApiReference, Cost, Description};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentItem {
    pub index: String,
    pub name: String,
    pub equipment_category: ApiReference,
    pub cost: Option<Cost>,
    pub weight: Option<f64>,
    pub desc: Description,
    pub properties: Vec<ApiReference>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentCategory {
    pub index: String,
    pub name: String,
    pub equipment: Vec<ApiReference>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rarity {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagicItem {
    pub index: String,
    pub name: String,
    pub equipment_category: ApiReference,
    pub rarity: Option<Rarity>,
    pub variant: bool,
    pub variants: Vec<ApiReference>,
    pub desc: Description,
    pub image: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponProperty {
    pub index: String,
    pub name: String,
    pub desc: Description,
    pub url: String,
}
