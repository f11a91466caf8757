//! JSON to table projection
//!
//! Deterministic translation from a decoded response body to a [`Table`]:
//!
//! - a collection body (`count` plus `results`) gives one row per result
//! - the API index gives one row per listed endpoint with a `url` column
//! - anything else gives a single row
//!
//! Nested objects flatten into dotted column names. Rows are keyed by their
//! `index` field, a `name` column is derived from `url` when missing, and a
//! single-row table promotes its lists of objects into sub-tables.

use super::table::{Cell, Table, INDEX_COLUMN, NAME_COLUMN, STATUS_COLUMN, URL_COLUMN};
use serde_json::{json, Map, Value};

/// Body synthesized for any status other than 200
pub fn failure_body(path: &str, status: u16) -> Value {
    json!({
        NAME_COLUMN: path,
        STATUS_COLUMN: status,
        URL_COLUMN: path,
    })
}

/// Project a response body.
///
/// `transpose_index` is set when the body is a successful, unredirected
/// response from the API index.
pub fn project(body: &Value, transpose_index: bool) -> Table {
    let table = if let Some(results) = collection_results(body) {
        project_records(results)
    } else if let Some(entries) = index_entries(body).filter(|_| transpose_index) {
        let mut table = Table::from_records(
            entries
                .iter()
                .map(|(_, url)| vec![(URL_COLUMN.to_string(), Cell::from_json(url))])
                .collect(),
        );
        table.set_keys(entries.iter().map(|(key, _)| Some(key.to_string())).collect());
        table
    } else {
        project_records(std::slice::from_ref(body))
    };

    promote_nested(add_name_column(table))
}

/// Project a list of JSON records, keyed by `index` when present
pub fn project_records(items: &[Value]) -> Table {
    let mut table = Table::from_records(items.iter().map(normalize).collect());
    if let Some(index) = table.take_column(INDEX_COLUMN) {
        table.set_keys(index.iter().map(key_of).collect());
    }
    table
}

/// `results` of a collection body with a non-zero count and at least one result
fn collection_results(body: &Value) -> Option<&[Value]> {
    let count_truthy = match body.get("count")? {
        Value::Number(n) => n.as_f64().is_some_and(|c| c != 0.0),
        _ => false,
    };
    let results = body.get("results")?.as_array()?;
    (count_truthy && !results.is_empty()).then_some(results.as_slice())
}

/// Entries of an index body: an object mapping names to paths. Values
/// that are not paths are kept as they are.
fn index_entries(body: &Value) -> Option<Vec<(&str, &Value)>> {
    let object = body.as_object()?;
    if object.is_empty() {
        return None;
    }
    Some(object.iter().map(|(key, value)| (key.as_str(), value)).collect())
}

/// Flatten one record into named cells
fn normalize(value: &Value) -> Vec<(String, Cell)> {
    let mut out = Vec::new();
    match value {
        Value::Object(map) => flatten_into("", map, &mut out),
        other => out.push(("value".to_string(), Cell::from_json(other))),
    }
    out
}

fn flatten_into(prefix: &str, map: &Map<String, Value>, out: &mut Vec<(String, Cell)>) {
    for (key, value) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(inner) if !inner.is_empty() => flatten_into(&name, inner, out),
            other => out.push((name, Cell::from_json(other))),
        }
    }
}

fn key_of(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Null => None,
        Cell::Text(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Derive `name` from `url` when a table has urls but no names
fn add_name_column(mut table: Table) -> Table {
    if table.has_column(NAME_COLUMN) {
        return table;
    }
    let Some(urls) = table.column(URL_COLUMN) else {
        return table;
    };

    let names: Vec<Cell> = urls
        .map(|cell| match cell.as_text() {
            Some(url) => Cell::Text(name_from_url(url)),
            None => Cell::Null,
        })
        .collect();
    table.insert_column(0, NAME_COLUMN, names);
    table
}

/// Display name for a url: the last path segment, dashes as spaces, title-cased.
///
/// `/api/ability-scores` gives `Ability Scores`.
pub fn name_from_url(url: &str) -> String {
    let segment = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url);
    title_case(&segment.replace('-', " "))
}

/// Uppercase the first letter of every word, lowercase the rest. A word
/// starts after any character that is not a letter.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// In a single-row table with more than two columns, turn every non-empty
/// list of objects outside `url` and `name` into a sub-table
fn promote_nested(mut table: Table) -> Table {
    if table.len() != 1 || table.width() <= 2 {
        return table;
    }

    let candidates: Vec<String> = table
        .columns()
        .iter()
        .filter(|c| c.as_str() != URL_COLUMN && c.as_str() != NAME_COLUMN)
        .cloned()
        .collect();

    for column in candidates {
        let Some(cell) = table.get_mut(0, &column) else {
            continue;
        };
        let promoted = match cell.as_list() {
            Some(items) if items.first().is_some_and(Value::is_object) => {
                Some(Cell::Table(project_records(items)))
            }
            _ => None,
        };
        if let Some(promoted) = promoted {
            *cell = promoted;
        }
    }

    table
}
