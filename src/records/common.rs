//! Shapes shared by many endpoints

use serde::{Deserialize, Serialize};

/// Link to another resource, as found in collections and nested lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiReference {
    pub index: String,
    pub name: String,
    pub url: String,
}

/// Body of a collection endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceList {
    pub count: usize,
    pub results: Vec<ApiReference>,
}

/// `desc` is a single string on some endpoints and a list of paragraphs on others
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Lines(Vec<String>),
}

impl Default for Description {
    fn default() -> Self {
        Description::Lines(Vec::new())
    }
}

impl Description {
    /// Paragraphs of the description
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Description::Text(text) => vec![text.as_str()],
            Description::Lines(lines) => lines.iter().map(String::as_str).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Description::Text(text) => text.is_empty(),
            Description::Lines(lines) => lines.is_empty(),
        }
    }
}

/// Price of an item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cost {
    pub quantity: u32,
    pub unit: String,
}
