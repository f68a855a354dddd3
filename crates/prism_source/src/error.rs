//! Error types for source file access and normalization.

/// Errors raised by source file access and indentation normalization.
///
/// These are fatal for the rendering that triggered them; the renderer
/// aborts and propagates rather than producing partial output.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SourceError {
    /// A line number outside `1..=N` was requested.
    #[error("Line is out of bounds of the file.")]
    InvalidLineNumber {
        /// The requested line number.
        line: u32,
    },

    /// A line's leading whitespace uses a different character than the rest
    /// of the snippet being normalized.
    #[error("Mixed indentation found in file {name} at line {line}.")]
    MixedIndentation {
        /// The display name of the offending file.
        name: String,
        /// The 1-based line number where the mix was detected.
        line: u32,
    },

    /// A range factory call with bounds outside the file content.
    #[error("Range {start}..{end} is out of bounds of the file.")]
    InvalidRangeBounds {
        /// The requested start position.
        start: u32,
        /// The requested end position.
        end: u32,
    },
}
