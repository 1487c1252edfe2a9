//! Shared domain types.
//!
//! The ingest side produces [`Table`]s of [`Column`]s; the regression side
//! consumes columns and is configured with [`TrainConfig`]. [`FitConfig`] is the
//! resolved run configuration the binary derives from CLI flags.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A named, uniformly-typed sequence of values taken from one field position.
///
/// The variant is fixed by the first data value seen for the column and never
/// changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

/// Element type of a [`Column`], without the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Int,
    Float,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Int => "int",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
        };
        f.write_str(name)
    }
}

impl Column {
    /// An empty column of the given kind.
    pub fn empty(kind: ColumnKind) -> Self {
        match kind {
            ColumnKind::Int => Column::Int(Vec::new()),
            ColumnKind::Float => Column::Float(Vec::new()),
            ColumnKind::Text => Column::Text(Vec::new()),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Int(_) => ColumnKind::Int,
            Column::Float(_) => ColumnKind::Float,
            Column::Text(_) => ColumnKind::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Int(values) => values.len(),
            Column::Float(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render element `idx` for display, `None` when out of range.
    pub fn display_value(&self, idx: usize) -> Option<String> {
        match self {
            Column::Int(values) => values.get(idx).map(|v| v.to_string()),
            Column::Float(values) => values.get(idx).map(|v| v.to_string()),
            Column::Text(values) => values.get(idx).cloned(),
        }
    }
}

/// The set of selected columns produced by one ingest call.
///
/// Keys are the requested column names that were found in the header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: HashMap<String, Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, column: Column) -> Option<Column> {
        self.columns.insert(name.into(), column)
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in sorted order (the underlying map is unordered).
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Gradient-descent hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub epochs: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 1000,
        }
    }
}

/// A full `linfit fit` run as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_path: PathBuf,
    pub delimiter: char,
    pub features: Vec<String>,
    pub target: String,
    pub train: TrainConfig,
    /// Optional single sample to predict after training.
    pub predict: Option<Vec<f64>>,
    /// Per-row predictions CSV.
    pub export_predictions: Option<PathBuf>,
    /// Print the fit report as JSON instead of text.
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_kind_and_len() {
        let col = Column::Float(vec![1.5, 2.5]);
        assert_eq!(col.kind(), ColumnKind::Float);
        assert_eq!(col.len(), 2);
        assert_eq!(col.display_value(1).as_deref(), Some("2.5"));
        assert_eq!(col.display_value(2), None);
        assert!(Column::empty(ColumnKind::Text).is_empty());
    }

    #[test]
    fn table_names_are_sorted() {
        let mut table = Table::new();
        table.insert("b", Column::Int(vec![1]));
        table.insert("a", Column::Text(vec!["x".to_string()]));
        assert_eq!(table.names(), vec!["a", "b"]);
        assert!(table.contains("a"));
        assert!(!table.contains("c"));
    }
}
