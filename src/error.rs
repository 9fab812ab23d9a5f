use std::fmt;

/// Errors surfaced by dataset generation, import, configuration and training.
///
/// Configuration problems fail fast: no partial dataset or model is returned
/// alongside an error.
#[derive(Debug, thiserror::Error)]
pub enum PlaygroundError {
    /// Malformed configuration or input: ratio out of range, empty text,
    /// zero sample count, unknown shape name, missing label cell.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Batch or input width disagrees with what the model was built for.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlaygroundError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        PlaygroundError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, PlaygroundError>;

/// A delimited-text input cell that could not be read as a number.
///
/// Not an error: the importer substitutes `0.0` and keeps going. Warnings are
/// collected on the import result so callers can surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// 1-based line number in the source text (header included).
    pub row: usize,
    /// 0-based column index.
    pub column: usize,
    /// Raw cell contents, or empty when the row was too short.
    pub cell: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.cell.is_empty() {
            write!(f, "row {}: column {} is missing, using 0.0", self.row, self.column)
        } else {
            write!(
                f,
                "row {}: column {} value '{}' is not a finite number, using 0.0",
                self.row, self.column, self.cell
            )
        }
    }
}
