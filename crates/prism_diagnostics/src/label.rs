//! Labels that annotate source ranges within a diagnostic.

use prism_source::FileRange;
use serde::{Deserialize, Serialize};

/// The visual style of a diagnostic label.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LabelStyle {
    /// The main annotation: severity-colored, underlined with `^`.
    Primary,
    /// Additional context: cyan, underlined with `-`.
    Secondary,
}

/// An annotated source range within a diagnostic.
///
/// A label whose range stays within a single line is rendered as an
/// underline with its message beside or below it; a range crossing line
/// boundaries becomes a rounded bracket in the left gutter. `content` may
/// contain newlines; each piece is rendered on its own row.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Label {
    /// Whether this is a primary or secondary label.
    pub style: LabelStyle,
    /// The source range this label annotates.
    pub range: FileRange,
    /// The message displayed next to the underline or bracket.
    pub content: String,
}

impl Label {
    /// Creates a primary label (the main annotation).
    pub fn primary(range: FileRange, content: impl Into<String>) -> Self {
        Self {
            style: LabelStyle::Primary,
            range,
            content: content.into(),
        }
    }

    /// Creates a secondary label (additional context).
    pub fn secondary(range: FileRange, content: impl Into<String>) -> Self {
        Self {
            style: LabelStyle::Secondary,
            range,
            content: content.into(),
        }
    }
}
