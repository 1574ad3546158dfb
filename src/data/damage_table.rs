//! Damage sheet loading.
//!
//! The sheet is comma-delimited. The header names each column as
//! `"<part> - <class>"` after a leading `Name` column; every following
//! row is one actor's damage against each column's part, except the
//! final row, which carries each part's starting health. Values may be
//! double-quoted with comma thousands separators (`"60,295,650"`);
//! blank or `0` means no damage capability.
//!
//! Loading is best-effort: malformed columns, cells, and rows are
//! skipped with a warning on the result, never aborting the load.

use crate::model::Roster;
use crate::worth::{TargetClass, WorthTable};
use std::fs;
use std::io;
use std::path::Path;

/// A parsed column label: which part of which class this column prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub part: String,
    pub class: TargetClass,
}

/// The parsed sheet, aligned to its original columns.
#[derive(Debug, Clone)]
pub struct DamageTable {
    /// One entry per column past `Name`; None marks a skipped column.
    columns: Vec<Option<ColumnDef>>,
    /// (actor name, damage per column) in sheet order.
    rows: Vec<(String, Vec<u64>)>,
    /// Starting health per column; None drops the column's part.
    healths: Vec<Option<u64>>,
    /// Everything the loader skipped or patched up, for the caller to
    /// surface.
    pub warnings: Vec<String>,
}

impl DamageTable {
    pub fn load(path: impl AsRef<Path>) -> io::Result<DamageTable> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse sheet text. Fatal only when nothing usable remains: an
    /// empty sheet, no parseable column, or a missing health row.
    pub fn parse(text: &str) -> io::Result<DamageTable> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.trim().is_empty())
            .collect();
        if lines.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "damage sheet is empty",
            ));
        }

        let mut warnings = Vec::new();
        let columns = parse_header(lines[0], &mut warnings);
        if columns.iter().all(Option::is_none) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "damage sheet has no usable columns",
            ));
        }
        if lines.len() < 2 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "damage sheet has no health row",
            ));
        }

        let mut rows: Vec<(String, Vec<u64>)> = Vec::new();
        for (row_idx, line) in lines[1..lines.len() - 1].iter().enumerate() {
            let fields = split_fields(line);
            let name = fields.first().cloned().unwrap_or_default();
            if name.is_empty() {
                warnings.push(format!("actor row {}: blank name, row skipped", row_idx + 1));
                continue;
            }
            if rows.iter().any(|(existing, _)| *existing == name) {
                warnings.push(format!(
                    "actor row {}: duplicate actor '{}', row skipped",
                    row_idx + 1,
                    name
                ));
                continue;
            }
            if fields.len() != columns.len() + 1 {
                warnings.push(format!(
                    "actor '{}': {} fields, expected {}",
                    name,
                    fields.len(),
                    columns.len() + 1
                ));
            }
            let mut values = Vec::with_capacity(columns.len());
            for (col_idx, column) in columns.iter().enumerate() {
                let raw = fields.get(col_idx + 1).map(String::as_str).unwrap_or("");
                match parse_amount(raw) {
                    Some(value) => values.push(value),
                    None => {
                        if let Some(def) = column {
                            warnings.push(format!(
                                "actor '{}', column '{} - {}': unparseable '{}', treated as 0",
                                name, def.part, def.class, raw
                            ));
                        }
                        values.push(0);
                    }
                }
            }
            rows.push((name, values));
        }
        if rows.is_empty() {
            warnings.push("damage sheet has no actor rows".to_string());
        }

        let health_fields = split_fields(lines[lines.len() - 1]);
        let mut healths = Vec::with_capacity(columns.len());
        for (col_idx, column) in columns.iter().enumerate() {
            let Some(def) = column else {
                healths.push(None);
                continue;
            };
            let raw = health_fields
                .get(col_idx + 1)
                .map(String::as_str)
                .unwrap_or("");
            match parse_amount(raw) {
                Some(health) if health > 0 => healths.push(Some(health)),
                Some(_) => {
                    warnings.push(format!(
                        "column '{} - {}': zero start health, part dropped",
                        def.part, def.class
                    ));
                    healths.push(None);
                }
                None => {
                    warnings.push(format!(
                        "column '{} - {}': unparseable start health '{}', part dropped",
                        def.part, def.class, raw
                    ));
                    healths.push(None);
                }
            }
        }

        Ok(DamageTable {
            columns,
            rows,
            healths,
            warnings,
        })
    }

    pub fn num_actors(&self) -> usize {
        self.rows.len()
    }

    pub fn actor_names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|(name, _)| name.as_str())
    }

    /// Damage an actor deals to a part of a class; 0 when unknown.
    pub fn get_damage(&self, actor: &str, part: &str, class: TargetClass) -> u64 {
        let Some(col) = self.column_of(part, class) else {
            return 0;
        };
        self.rows
            .iter()
            .find(|(name, _)| name == actor)
            .and_then(|(_, values)| values.get(col).copied())
            .unwrap_or(0)
    }

    /// Starting health of a part of a class, when that column survived
    /// parsing.
    pub fn get_start_health(&self, part: &str, class: TargetClass) -> Option<u64> {
        self.healths.get(self.column_of(part, class)?).copied()?
    }

    fn column_of(&self, part: &str, class: TargetClass) -> Option<usize> {
        self.columns.iter().position(|column| {
            column
                .as_ref()
                .map(|def| def.part == part && def.class == class)
                .unwrap_or(false)
        })
    }

    /// Assemble the roster: one target per class present (named after
    /// the class), its parts in column order, and the dense damage
    /// matrix. Excluded classes are dropped entirely.
    pub fn build_roster(
        &self,
        worth_table: WorthTable,
        excluded: &[TargetClass],
    ) -> io::Result<Roster> {
        let mut builder = Roster::builder();
        builder.set_worth_table(worth_table);

        let mut target_of_class: Vec<(TargetClass, usize)> = Vec::new();
        let mut part_of_column: Vec<Option<usize>> = vec![None; self.columns.len()];
        for (col_idx, column) in self.columns.iter().enumerate() {
            let (Some(def), Some(health)) = (column, self.healths[col_idx]) else {
                continue;
            };
            if excluded.contains(&def.class) {
                continue;
            }
            let target = match target_of_class.iter().find(|(class, _)| *class == def.class) {
                Some(&(_, id)) => id,
                None => {
                    let id = builder.target(def.class.name(), def.class);
                    target_of_class.push((def.class, id));
                    id
                }
            };
            part_of_column[col_idx] = Some(builder.part(target, &def.part, health)?);
        }

        for (name, values) in &self.rows {
            let actor = builder.actor(name);
            for (col_idx, &value) in values.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                if let Some(part) = part_of_column[col_idx] {
                    builder.damage(actor, part, value);
                }
            }
        }

        builder.build()
    }
}

/// Split one sheet line into fields, honoring double quotes so that
/// quoted thousands separators survive. Fields are trimmed and
/// unquoted.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields.iter().map(|field| field.trim().to_string()).collect()
}

/// Parse a sheet amount: optional comma thousands separators, blank
/// meaning 0. None on anything else.
fn parse_amount(raw: &str) -> Option<u64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() {
        return Some(0);
    }
    cleaned.parse().ok()
}

fn parse_header(line: &str, warnings: &mut Vec<String>) -> Vec<Option<ColumnDef>> {
    let fields = split_fields(line);
    let mut columns: Vec<Option<ColumnDef>> = Vec::new();
    for (col_idx, label) in fields.iter().enumerate().skip(1) {
        let pieces: Vec<&str> = label.split('-').map(str::trim).collect();
        if pieces.len() != 2 || pieces[0].is_empty() {
            warnings.push(format!(
                "column {} '{}': not '<part> - <class>', column skipped",
                col_idx, label
            ));
            columns.push(None);
            continue;
        }
        let Some(class) = TargetClass::from_name(pieces[1]) else {
            warnings.push(format!(
                "column {} '{}': unknown class '{}', column skipped",
                col_idx, label, pieces[1]
            ));
            columns.push(None);
            continue;
        };
        let def = ColumnDef {
            part: pieces[0].to_string(),
            class,
        };
        if columns.iter().flatten().any(|existing| *existing == def) {
            warnings.push(format!(
                "column {} '{}': duplicate column, skipped",
                col_idx, label
            ));
            columns.push(None);
            continue;
        }
        columns.push(Some(def));
    }
    columns
}
