//! Append-only row tables and the export result

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Sheet names, in output order
pub const SURVEY: &str = "survey";
pub const CHOICES: &str = "choices";
pub const SETTINGS: &str = "settings";

/// One row: cells in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell. Re-setting a column keeps its original position.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some(cell) => cell.1 = value,
            None => self.cells.push((column, value)),
        }
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<C: Into<String>, V: Into<String>> Extend<(C, V)> for Row {
    fn extend<I: IntoIterator<Item = (C, V)>>(&mut self, iter: I) {
        for (column, value) in iter {
            self.insert(column, value);
        }
    }
}

impl<C: Into<String>, V: Into<String>> FromIterator<(C, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (C, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        row.extend(iter);
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// A named sequence of rows. Columns are not declared: the column set is the
/// union of every row's columns, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowTable {
    name: String,
    rows: Vec<Row>,
}

impl RowTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn push(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in first-seen order
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for row in &self.rows {
            for column in row.columns() {
                if !columns.contains(&column) {
                    columns.push(column);
                }
            }
        }
        columns
    }

    /// Rows laid out against `columns()`, missing cells as `None`
    pub fn records(&self) -> Vec<Vec<Option<&str>>> {
        let columns = self.columns();
        self.rows
            .iter()
            .map(|row| columns.iter().map(|column| row.get(column)).collect())
            .collect()
    }
}

/// Export warnings: deduplicated by text, first occurrence wins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Warnings {
    messages: Vec<String>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning; returns false if the same text was already recorded
    pub fn push(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        if self.messages.contains(&message) {
            return false;
        }
        self.messages.push(message);
        true
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// The three sheets of an exported form plus any warnings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportResult {
    pub survey: RowTable,
    pub choices: RowTable,
    pub settings: RowTable,
    pub warnings: Warnings,
}

impl ExportResult {
    pub fn new() -> Self {
        Self {
            survey: RowTable::new(SURVEY),
            choices: RowTable::new(CHOICES),
            settings: RowTable::new(SETTINGS),
            warnings: Warnings::new(),
        }
    }

    /// Tables in sheet order: survey, choices, settings
    pub fn tables(&self) -> [&RowTable; 3] {
        [&self.survey, &self.choices, &self.settings]
    }
}

impl Default for ExportResult {
    fn default() -> Self {
        Self::new()
    }
}
