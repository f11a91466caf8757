//! Rules text records

use super::common::{ApiReference, Description};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub index: String,
    pub name: String,
    pub desc: Description,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageType {
    pub index: String,
    pub name: String,
    pub desc: Description,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub index: String,
    pub name: String,
    pub desc: Description,
    pub subsections: Vec<ApiReference>,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSection {
    pub index: String,
    pub name: String,
    pub desc: Description,
    pub url: String,
}
