//! Output rendering for the command line

use crate::records::{Monster, Record};
use crate::resource::{Cell, Resource, Table};
use anyhow::{Context, Result};
use clap::ValueEnum;

/// Widest a text column gets before cells are cut
const MAX_COLUMN_WIDTH: usize = 40;

/// Header of the row key column
const KEY_HEADER: &str = "#";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Render a resource in the requested format
pub fn render(resource: &Resource, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(resource.table())),
        OutputFormat::Json => serde_json::to_string_pretty(resource.table())
            .context("Failed to serialize table as JSON"),
        OutputFormat::Yaml => {
            serde_yaml::to_string(resource.table()).context("Failed to serialize table as YAML")
        }
    }
}

/// Fixed-width text table with the row key first
pub fn render_table(table: &Table) -> String {
    let mut headers = vec![KEY_HEADER.to_string()];
    headers.extend(table.columns().iter().cloned());

    let rows: Vec<Vec<String>> = table
        .rows()
        .enumerate()
        .map(|(i, row)| {
            let key = row.key.map(str::to_string).unwrap_or_else(|| i.to_string());
            std::iter::once(key)
                .chain(row.iter().map(|(_, cell)| display_cell(cell)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

/// One-line digest of the records that have one
pub fn summary(record: &Record) -> Option<String> {
    match record {
        Record::Spell(spell) => {
            let level = if spell.is_cantrip() {
                "Cantrip".to_string()
            } else {
                format!("Level {}", spell.level)
            };
            let mut line = format!("{} {}", level, spell.school.name).trim_end().to_string();
            if spell.ritual {
                line.push_str(" (ritual)");
            }
            if spell.concentration {
                line.push_str(", concentration");
            }
            Some(line)
        }
        Record::Monster(monster) => {
            let scores = [
                ("STR", monster.strength),
                ("DEX", monster.dexterity),
                ("CON", monster.constitution),
                ("INT", monster.intelligence),
                ("WIS", monster.wisdom),
                ("CHA", monster.charisma),
            ];
            let abilities: Vec<String> = scores
                .iter()
                .map(|(name, score)| format!("{} {} ({:+})", name, score, Monster::modifier(*score)))
                .collect();
            Some(format!(
                "CR {} | HP {} | {}",
                monster.challenge_rating,
                monster.hit_points,
                abilities.join(" ")
            ))
        }
        _ => None,
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

fn display_cell(cell: &Cell) -> String {
    truncate(&cell.to_string().replace('\n', " "), MAX_COLUMN_WIDTH)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", head)
}
