//! Delimited-text import for user-supplied datasets.
//!
//! Format:
//! - UTF-8 text, one row per line, configurable single-character delimiter
//! - Optional header row, skipped when `has_header` is set
//! - Double-quoted fields may contain the delimiter; `""` is an escaped quote
//! - Blank lines are ignored
//!
//! Input cells that are missing, not numeric or not finite become `0.0` and produce a
//! `ParseWarning`. The label column is read as a raw string and must be
//! present and non-empty on every row.

use serde::{Serialize, Deserialize};
use std::collections::HashMap;

use crate::dataset::sample::{one_hot, Dataset, Sample};
use crate::error::{ParseWarning, PlaygroundError, Result};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimitedOptions {
    pub delimiter: char,
    pub has_header: bool,
    /// Columns read as input features, in output order.
    pub input_columns: Vec<usize>,
    /// Column holding the raw class label.
    pub label_column: usize,
}

impl Default for DelimitedOptions {
    fn default() -> Self {
        DelimitedOptions {
            delimiter: ',',
            has_header: true,
            input_columns: Vec::new(),
            label_column: 0,
        }
    }
}

/// Raw label strings mapped to class indices in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelVocabulary {
    labels: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl LabelVocabulary {
    /// Returns the class index for `label`, assigning the next one if unseen.
    pub fn intern(&mut self, label: &str) -> usize {
        if let Some(&i) = self.index.get(label) {
            return i;
        }
        let i = self.labels.len();
        self.labels.push(label.to_owned());
        self.index.insert(label.to_owned(), i);
        i
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Labels in class-index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Result of a delimited import.
#[derive(Debug, Clone)]
pub struct DelimitedImport {
    pub dataset: Dataset,
    pub vocabulary: LabelVocabulary,
    /// Input cells that were replaced by `0.0`.
    pub warnings: Vec<ParseWarning>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Comma-delimited import with explicit column selection.
pub fn load_from_delimited(
    text: &str,
    input_columns: &[usize],
    label_column: usize,
    has_header: bool,
) -> Result<DelimitedImport> {
    load_delimited_with(
        text,
        &DelimitedOptions {
            delimiter: ',',
            has_header,
            input_columns: input_columns.to_vec(),
            label_column,
        },
    )
}

/// Parses `text` into a one-hot dataset according to `options`.
pub fn load_delimited_with(text: &str, options: &DelimitedOptions) -> Result<DelimitedImport> {
    let mut rows = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .peekable();

    if options.has_header {
        rows.next();
    }
    if rows.peek().is_none() {
        return Err(PlaygroundError::invalid("delimited input has no data rows"));
    }

    let mut vocabulary = LabelVocabulary::default();
    let mut warnings = Vec::new();
    let mut features = Vec::new();
    let mut classes = Vec::new();

    for (row_num, line) in rows {
        let cells = parse_row(line, options.delimiter);

        let label = cells
            .get(options.label_column)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                PlaygroundError::invalid(format!(
                    "row {row_num}: label column {} is missing or empty",
                    options.label_column
                ))
            })?;
        classes.push(vocabulary.intern(label));

        let row: Vec<f64> = options
            .input_columns
            .iter()
            .map(|&col| read_feature(&cells, row_num, col, &mut warnings))
            .collect();
        features.push(row);
    }

    let class_count = vocabulary.len();
    let samples = features
        .into_iter()
        .zip(classes)
        .map(|(f, class)| Sample { features: f, label: one_hot(class, class_count) })
        .collect();
    let dataset = Dataset::new(samples)?;

    tracing::info!(
        rows = dataset.len(),
        classes = class_count,
        warnings = warnings.len(),
        "imported delimited dataset"
    );

    Ok(DelimitedImport { dataset, vocabulary, warnings })
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn read_feature(cells: &[String], row_num: usize, col: usize, warnings: &mut Vec<ParseWarning>) -> f64 {
    let raw = cells.get(col).map(|c| c.trim()).unwrap_or("");
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            let warning = ParseWarning { row: row_num, column: col, cell: raw.to_owned() };
            tracing::warn!("{warning}");
            warnings.push(warning);
            0.0
        }
    }
}

/// Splits one row on `delimiter`, honouring double-quoted fields.
fn parse_row(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == delimiter && !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}
