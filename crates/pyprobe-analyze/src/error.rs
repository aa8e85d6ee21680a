//! Errors produced while analyzing a snippet.

/// Error that can occur when analyzing Python source.
///
/// Every variant is terminal for the call: there is no partial report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    #[error("invalid syntax (line {line}, column {column})")]
    Syntax { line: usize, column: usize },

    #[error("missing {token:?} (line {line}, column {column})")]
    Missing {
        token: String,
        line: usize,
        column: usize,
    },

    /// Accepted by the grammar but rejected by Python 3.
    #[error("invalid syntax: {construct} (line {line}, column {column})")]
    Invalid {
        construct: &'static str,
        line: usize,
        column: usize,
    },

    #[error("parse error: {0}")]
    Parse(String),
}
