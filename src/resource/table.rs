//! Tabular projection of API responses
//!
//! A [`Table`] is a list of rows sharing one ordered set of columns. Each
//! row may carry a key (the resource `index`). Cells hold scalars, raw JSON
//! lists, nested tables, or a materialized link to another resource.

use super::fetcher::Resource;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

pub const INDEX_COLUMN: &str = "index";
pub const NAME_COLUMN: &str = "name";
pub const URL_COLUMN: &str = "url";
pub const OBJ_COLUMN: &str = "obj";
pub const STATUS_COLUMN: &str = "status_code";

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Table(Table),
    Link(Box<Resource>),
}

impl Cell {
    /// Convert a scalar or list JSON value. Objects are flattened before
    /// they get here; an empty object becomes `Null`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Int(i),
                None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Null),
            },
            Value::String(s) => Cell::Text(s.clone()),
            Value::Array(items) => Cell::List(items.clone()),
            Value::Object(_) => Cell::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Cell::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Cell::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&Resource> {
        match self {
            Cell::Link(resource) => Some(resource),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "-"),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::List(items) => {
                if items.iter().all(Value::is_string) {
                    let joined: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                    write!(f, "{}", joined.join("; "))
                } else {
                    write!(f, "[{} items]", items.len())
                }
            }
            Cell::Table(table) => write!(f, "[{} rows]", table.len()),
            Cell::Link(resource) => write!(f, "<{} {}>", resource.kind(), resource.path()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Null => serializer.serialize_unit(),
            Cell::Bool(b) => serializer.serialize_bool(*b),
            Cell::Int(i) => serializer.serialize_i64(*i),
            Cell::Float(x) => serializer.serialize_f64(*x),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::List(items) => items.serialize(serializer),
            Cell::Table(table) => table.serialize(serializer),
            Cell::Link(resource) => resource.table().serialize(serializer),
        }
    }
}

/// Borrowed view of one row
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    pub key: Option<&'a str>,
    columns: &'a [String],
    cells: &'a [Cell],
}

impl<'a> RowRef<'a> {
    /// Cell in the named column
    pub fn get(&self, column: &str) -> Option<&'a Cell> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.cells[i])
    }

    /// Column name and cell pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Cell)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.cells.iter())
    }
}

/// Rows by columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    keys: Vec<Option<String>>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from rows of named cells. Columns are the union of names in
    /// first-seen order; missing cells are `Null`.
    pub fn from_records(records: Vec<Vec<(String, Cell)>>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for (name, _) in record {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|record| {
                let mut row = vec![Cell::Null; columns.len()];
                for (name, cell) in record {
                    if let Some(i) = columns.iter().position(|c| *c == name) {
                        row[i] = cell;
                    }
                }
                row
            })
            .collect::<Vec<_>>();

        Self {
            keys: vec![None; rows.len()],
            columns,
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of one column, top to bottom
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Cell>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[i]))
    }

    pub fn keys(&self) -> &[Option<String>] {
        &self.keys
    }

    pub fn key(&self, row: usize) -> Option<&str> {
        self.keys.get(row)?.as_deref()
    }

    /// Position of the row with the given key
    pub fn row_by_key(&self, key: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.as_deref() == Some(key))
    }

    pub fn row(&self, row: usize) -> Option<RowRef<'_>> {
        let cells = self.rows.get(row)?;
        Some(RowRef {
            key: self.key(row),
            columns: &self.columns,
            cells,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        (0..self.rows.len()).filter_map(move |i| self.row(i))
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let i = self.column_index(column)?;
        self.rows.get(row).map(|cells| &cells[i])
    }

    pub fn get_by_key(&self, key: &str, column: &str) -> Option<&Cell> {
        self.get(self.row_by_key(key)?, column)
    }

    pub fn get_mut(&mut self, row: usize, column: &str) -> Option<&mut Cell> {
        let i = self.column_index(column)?;
        self.rows.get_mut(row).map(|cells| &mut cells[i])
    }

    /// Replace a column, or append it when absent. The cells are padded with
    /// `Null` or truncated to the row count.
    pub fn set_column(&mut self, name: &str, cells: Vec<Cell>) {
        let i = match self.column_index(name) {
            Some(i) => i,
            None => {
                self.columns.push(name.to_string());
                for row in &mut self.rows {
                    row.push(Cell::Null);
                }
                self.columns.len() - 1
            }
        };

        let mut cells = cells.into_iter();
        for row in &mut self.rows {
            row[i] = cells.next().unwrap_or(Cell::Null);
        }
    }

    /// Insert a new column at a position, moving an existing one there
    pub fn insert_column(&mut self, position: usize, name: &str, cells: Vec<Cell>) {
        self.take_column(name);
        let position = position.min(self.columns.len());
        self.columns.insert(position, name.to_string());

        let mut cells = cells.into_iter();
        for row in &mut self.rows {
            row.insert(position, cells.next().unwrap_or(Cell::Null));
        }
    }

    /// Remove a column and return its cells
    pub fn take_column(&mut self, name: &str) -> Option<Vec<Cell>> {
        let i = self.column_index(name)?;
        self.columns.remove(i);
        Some(self.rows.iter_mut().map(|row| row.remove(i)).collect())
    }

    /// Set row keys; missing keys are `None`
    pub fn set_keys(&mut self, keys: Vec<Option<String>>) {
        let mut keys = keys.into_iter();
        self.keys = (0..self.rows.len())
            .map(|_| keys.next().flatten())
            .collect();
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for row in self.rows() {
            seq.serialize_element(&SerializedRow(row))?;
        }
        seq.end()
    }
}

struct SerializedRow<'a>(RowRef<'a>);

impl Serialize for SerializedRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let row = &self.0;
        let mut map = serializer.serialize_map(None)?;
        if let Some(key) = row.key {
            map.serialize_entry(INDEX_COLUMN, key)?;
        }
        for (name, cell) in row.iter() {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sample() -> Table {
        let mut table = Table::from_records(vec![
            vec![
                ("name".to_string(), text("CHA")),
                ("url".to_string(), text("/api/ability-scores/cha")),
            ],
            vec![
                ("name".to_string(), text("CON")),
                ("extra".to_string(), Cell::Int(3)),
            ],
        ]);
        table.set_keys(vec![Some("cha".to_string()), Some("con".to_string())]);
        table
    }

    #[test]
    fn test_from_records_unions_columns() {
        let table = sample();
        assert_eq!(table.columns(), ["name", "url", "extra"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(1, "url"), Some(&Cell::Null));
        assert_eq!(table.get(0, "extra"), Some(&Cell::Null));
    }

    #[test]
    fn test_lookup_by_key() {
        let table = sample();
        assert_eq!(table.row_by_key("con"), Some(1));
        assert_eq!(
            table.get_by_key("cha", "url").and_then(Cell::as_text),
            Some("/api/ability-scores/cha")
        );
        assert!(table.get_by_key("wis", "name").is_none());
    }

    #[test]
    fn test_set_column_appends_and_pads() {
        let mut table = sample();
        table.set_column("obj", vec![Cell::Bool(true)]);
        assert_eq!(table.width(), 4);
        assert_eq!(table.get(0, "obj"), Some(&Cell::Bool(true)));
        assert_eq!(table.get(1, "obj"), Some(&Cell::Null));
    }

    #[test]
    fn test_insert_column_moves_existing() {
        let mut table = sample();
        let urls = table.take_column("url").unwrap();
        table.insert_column(0, "url", urls);
        assert_eq!(table.columns(), ["url", "name", "extra"]);
        assert_eq!(
            table.get(0, "url").and_then(Cell::as_text),
            Some("/api/ability-scores/cha")
        );
    }

    #[test]
    fn test_row_view() {
        let table = sample();
        let row = table.row(0).unwrap();
        assert_eq!(row.key, Some("cha"));
        assert_eq!(row.get("name").and_then(Cell::as_text), Some("CHA"));
        assert_eq!(row.iter().count(), 3);
    }

    #[test]
    fn test_cell_from_json() {
        assert_eq!(Cell::from_json(&json!(4)), Cell::Int(4));
        assert_eq!(Cell::from_json(&json!(0.25)), Cell::Float(0.25));
        assert_eq!(Cell::from_json(&json!({})), Cell::Null);
        assert_eq!(
            Cell::from_json(&json!(["a", "b"])),
            Cell::List(vec![json!("a"), json!("b")])
        );
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Null.to_string(), "-");
        assert_eq!(Cell::List(vec![json!("a"), json!("b")]).to_string(), "a; b");
        assert_eq!(Cell::List(vec![json!({"x": 1})]).to_string(), "[1 items]");
        assert_eq!(Cell::Table(sample()).to_string(), "[2 rows]");
    }

    #[test]
    fn test_serialize_rows_with_index() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!([
                {"index": "cha", "name": "CHA", "url": "/api/ability-scores/cha", "extra": null},
                {"index": "con", "name": "CON", "url": null, "extra": 3}
            ])
        );
    }
}
