//! Shared fixtures for the integration tests

#![allow(dead_code)]

use dnd5e::api::ApiClient;
use dnd5e::resource::{Endpoint, API_PREFIX};
use serde_json::{json, Map, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Body of the API index: every collection name mapped to its path
pub fn index_body() -> Value {
    let entries: Map<String, Value> = Endpoint::all()
        .map(|e| (e.segment().to_string(), Value::String(e.path())))
        .collect();
    Value::Object(entries)
}

pub fn ability_scores_body() -> Value {
    let results: Vec<Value> = [
        ("cha", "CHA"),
        ("con", "CON"),
        ("dex", "DEX"),
        ("int", "INT"),
        ("str", "STR"),
        ("wis", "WIS"),
    ]
    .iter()
    .map(|(index, name)| {
        json!({"index": index, "name": name, "url": format!("/api/ability-scores/{}", index)})
    })
    .collect();
    json!({"count": results.len(), "results": results})
}

pub fn charisma_body() -> Value {
    json!({
        "index": "cha",
        "name": "CHA",
        "full_name": "Charisma",
        "desc": [
            "Charisma measures your ability to interact effectively with others.",
            "A Charisma check might arise when you try to influence or entertain others."
        ],
        "skills": [
            {"index": "deception", "name": "Deception", "url": "/api/skills/deception"},
            {"index": "intimidation", "name": "Intimidation", "url": "/api/skills/intimidation"},
            {"index": "performance", "name": "Performance", "url": "/api/skills/performance"},
            {"index": "persuasion", "name": "Persuasion", "url": "/api/skills/persuasion"}
        ],
        "url": "/api/ability-scores/cha"
    })
}

/// Minimal item body for one ability score
pub fn score_body(index: &str) -> Value {
    json!({
        "index": index,
        "name": index.to_uppercase(),
        "full_name": index,
        "desc": [],
        "skills": [],
        "url": format!("/api/ability-scores/{}", index)
    })
}

pub async fn mount_json(server: &MockServer, at: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mock server answering the index, the ability score collection and
/// every ability score item
pub async fn mock_api() -> MockServer {
    let server = MockServer::start().await;
    mount_json(&server, API_PREFIX, index_body()).await;
    mount_json(&server, "/api/ability-scores", ability_scores_body()).await;
    mount_json(&server, "/api/ability-scores/cha", charisma_body()).await;
    for index in ["con", "dex", "int", "str", "wis"] {
        mount_json(&server, &format!("/api/ability-scores/{}", index), score_body(index)).await;
    }
    server
}

pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri()).expect("mock server uri is a valid root")
}
