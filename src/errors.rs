//! Error types for crossword generation.
//!
//! # Error Codes
//!
//! - E001: `InvalidDimensions` (zero rows or columns)
//! - E002: `EmptyWord` (dictionary key is empty after trimming)
//! - E003: `MalformedLine` (dictionary file line without a `;`)
//! - E004: `Io` (dictionary file could not be read)
//!
//! Failing to place a word is not an error: it shows up in
//! [`Puzzle::unplaced`](crate::Puzzle::unplaced) instead.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid board dimensions: {rows} rows x {cols} cols")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("dictionary word {original:?} is empty after trimming")]
    EmptyWord { original: String },

    #[error("line {line_number} is not of the form word;clue: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    #[error("could not read dictionary: {0}")]
    Io(#[from] io::Error),
}

impl GenerateError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            GenerateError::InvalidDimensions { .. } => "E001",
            GenerateError::EmptyWord { .. } => "E002",
            GenerateError::MalformedLine { .. } => "E003",
            GenerateError::Io(_) => "E004",
        }
    }

    /// Returns a hint for fixing the input, if there is one.
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            GenerateError::InvalidDimensions { .. } => Some("Both --rows and --cols must be at least 1"),
            GenerateError::EmptyWord { .. } => Some("Remove blank entries from the dictionary"),
            GenerateError::MalformedLine { .. } => Some("Separate each word from its clue with ';'"),
            GenerateError::Io(_) => None,
        }
    }

    /// Message with code and help text, for printing at the top level.
    pub fn display_detailed(&self) -> String {
        match self.help() {
            Some(help) => format!("{self} ({})\n  help: {help}", self.code()),
            None => format!("{self} ({})", self.code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let errors = [
            GenerateError::InvalidDimensions { rows: 0, cols: 3 },
            GenerateError::EmptyWord { original: "  ".to_string() },
            GenerateError::MalformedLine { line_number: 2, line: "cat".to_string() },
            GenerateError::Io(io::Error::new(io::ErrorKind::NotFound, "missing")),
        ];
        let mut codes: Vec<_> = errors.iter().map(GenerateError::code).collect();
        codes.dedup();
        assert_eq!(codes, vec!["E001", "E002", "E003", "E004"]);
    }

    #[test]
    fn test_display_detailed_includes_help() {
        let err = GenerateError::InvalidDimensions { rows: 0, cols: 3 };
        let detailed = err.display_detailed();
        assert!(detailed.contains("E001"));
        assert!(detailed.contains("help:"));
    }
}
