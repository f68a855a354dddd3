//! Structured diagnostic messages and their builder surface.

use crate::color::Color;
use crate::label::Label;
use crate::severity::Severity;
use prism_source::FileRange;
use serde::{Deserialize, Serialize};

/// The optional header of a diagnostic: a code and a one-line message.
///
/// Rendered as `{severity}[{code}]: {message}` above the snippets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// The diagnostic code, e.g. `E0308`.
    pub code: String,
    /// The one-line summary message.
    pub message: String,
}

/// A structured diagnostic accumulating everything the renderer lays out.
///
/// Built with a severity, then extended through the chainable `with_*`
/// mutators. Ranges, labels, and colors may reference different files; the
/// renderer groups them per file. The diagnostic itself stays immutable
/// during rendering, so one instance can be rendered concurrently.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The optional `{severity}[{code}]: {message}` header.
    pub header: Option<Header>,
    /// Ranges rendered as plain context, without annotation.
    pub ranges: Vec<FileRange>,
    /// Annotated ranges with underlines or gutter brackets.
    pub labels: Vec<Label>,
    /// Trailing `= {note}` footer lines.
    pub notes: Vec<String>,
    /// Free-form colorizations merged under label colors.
    pub colors: Vec<Color>,
}

impl Diagnostic {
    /// Creates an empty diagnostic of the given severity.
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            header: None,
            ranges: Vec::new(),
            labels: Vec::new(),
            notes: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Creates an empty error diagnostic.
    pub fn error() -> Self {
        Self::new(Severity::Error)
    }

    /// Creates an empty bug diagnostic.
    pub fn bug() -> Self {
        Self::new(Severity::Bug)
    }

    /// Creates an empty warning diagnostic.
    pub fn warning() -> Self {
        Self::new(Severity::Warning)
    }

    /// Creates an empty note diagnostic.
    pub fn note() -> Self {
        Self::new(Severity::Note)
    }

    /// Creates an empty help diagnostic.
    pub fn help() -> Self {
        Self::new(Severity::Help)
    }

    /// Sets the header.
    pub fn with_header(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.header = Some(Header {
            code: code.into(),
            message: message.into(),
        });
        self
    }

    /// Adds a range rendered as plain context.
    pub fn with_range(mut self, range: FileRange) -> Self {
        self.ranges.push(range);
        self
    }

    /// Adds a label.
    ///
    /// A label whose `(file, start, end)` matches an already-added label is
    /// dropped, first-wins; the duplicate is reported through
    /// [`tracing::warn!`]. No other validation happens at insertion time.
    pub fn with_label(mut self, label: Label) -> Self {
        let duplicate = self.labels.iter().any(|existing| {
            existing.range.file == label.range.file
                && existing.range.range == label.range.range
        });
        if duplicate {
            tracing::warn!(
                start = label.range.start(),
                end = label.range.end(),
                "ignoring label with duplicate range"
            );
            return self;
        }
        self.labels.push(label);
        self
    }

    /// Adds a trailing note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a free-form colorization.
    pub fn with_color(mut self, color: Color) -> Self {
        self.colors.push(color);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabelStyle;
    use prism_source::{FileId, Range};

    fn make_range(start: u32, end: u32) -> FileRange {
        FileRange::new(FileId::from_raw(0), Range::new(start, end))
    }

    #[test]
    fn severity_shortcuts() {
        assert_eq!(Diagnostic::error().severity, Severity::Error);
        assert_eq!(Diagnostic::bug().severity, Severity::Bug);
        assert_eq!(Diagnostic::warning().severity, Severity::Warning);
        assert_eq!(Diagnostic::note().severity, Severity::Note);
        assert_eq!(Diagnostic::help().severity, Severity::Help);
    }

    #[test]
    fn builder_chains() {
        let diag = Diagnostic::error()
            .with_header("E0308", "mismatched types")
            .with_range(make_range(1, 10))
            .with_label(Label::primary(make_range(3, 5), "expected u32"))
            .with_note("types must match");
        assert_eq!(diag.header.as_ref().unwrap().code, "E0308");
        assert_eq!(diag.ranges.len(), 1);
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.notes.len(), 1);
    }

    #[test]
    fn duplicate_label_dropped_first_wins() {
        let diag = Diagnostic::error()
            .with_label(Label::primary(make_range(1, 3), "first"))
            .with_label(Label::secondary(make_range(1, 3), "second"));
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.labels[0].content, "first");
        assert_eq!(diag.labels[0].style, LabelStyle::Primary);
    }

    #[test]
    fn same_bounds_different_file_not_duplicate() {
        let other = FileRange::new(FileId::from_raw(1), Range::new(1, 3));
        let diag = Diagnostic::error()
            .with_label(Label::primary(make_range(1, 3), "first"))
            .with_label(Label::primary(other, "second"));
        assert_eq!(diag.labels.len(), 2);
    }

    #[test]
    fn trimmed_duplicate_still_dropped() {
        // Trim state is not part of label identity.
        let diag = Diagnostic::error()
            .with_label(Label::primary(make_range(2, 4), "kept"))
            .with_label(Label::primary(make_range(2, 4).trim(), "dropped"));
        assert_eq!(diag.labels.len(), 1);
        assert_eq!(diag.labels[0].content, "kept");
    }
}
