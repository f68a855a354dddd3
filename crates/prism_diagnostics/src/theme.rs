//! The template/color layer: glyph alphabet, severity styles, and templates.

use crate::label::LabelStyle;
use crate::severity::Severity;
use owo_colors::{OwoColorize, Style};

/// The fixed box-drawing and marker alphabet used by rendered output.
///
/// These exact codepoints appear in the gutter and sub-lines; swapping any
/// of them changes the output format.
pub mod glyph {
    /// Vertical sidebar and connector.
    pub const VERTICAL: char = '│';
    /// Horizontal run for bracket arms and padding.
    pub const HORIZONTAL: char = '─';
    /// File-base corner for the first container.
    pub const TOP_LEFT: char = '┌';
    /// File-base tee for subsequent containers.
    pub const LEFT_TEE: char = '├';
    /// Rounded corner opening a multi-line bracket.
    pub const ROUND_TOP_LEFT: char = '╭';
    /// Rounded corner closing a multi-line bracket.
    pub const ROUND_BOTTOM_LEFT: char = '╰';
    /// Square corner variant of [`ROUND_BOTTOM_LEFT`].
    pub const BOTTOM_LEFT: char = '└';
    /// Downward tee.
    pub const TEE_DOWN: char = '┬';
    /// Upward tee.
    pub const TEE_UP: char = '┴';
    /// Four-way crossing.
    pub const CROSS: char = '┼';
    /// Ellipsis marker for non-consecutive line gaps.
    pub const GAP: char = '·';
    /// Note footer marker.
    pub const NOTE: char = '=';
    /// Primary underline and pointer character.
    pub const PRIMARY_MARK: char = '^';
    /// Secondary underline character.
    pub const SECONDARY_MARK: char = '-';
    /// Secondary multi-line pointer character.
    pub const SECONDARY_POINTER: char = '\'';
}

/// Maps severities and rendering roles to terminal styles.
///
/// With `enabled` false every [`paint`](Theme::paint) call is the identity,
/// which keeps test output and non-tty streams free of escape sequences.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    /// Whether styles are applied at all.
    pub enabled: bool,
}

impl Theme {
    /// Creates a theme; `enabled` controls whether any styling is emitted.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// The color of a severity's header tint and primary underlines.
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Error => Style::new().red(),
            Severity::Bug => Style::new().magenta(),
            Severity::Warning => Style::new().yellow(),
            Severity::Note => Style::new().green(),
            Severity::Help => Style::new().cyan(),
        }
    }

    /// The style of a label's underline and message.
    pub fn label_style(&self, style: LabelStyle, severity: Severity) -> Style {
        match style {
            LabelStyle::Primary => self.severity_style(severity),
            LabelStyle::Secondary => self.secondary_style(),
        }
    }

    /// The default (secondary) annotation color.
    pub fn secondary_style(&self) -> Style {
        Style::new().cyan()
    }

    /// The style of line numbers, sidebars, gaps, and note markers.
    pub fn border_style(&self) -> Style {
        Style::new().cyan()
    }

    /// The base style of unclaimed code characters.
    pub fn code_style(&self) -> Style {
        Style::new()
    }

    /// The bold header title style.
    pub fn header_style(&self) -> Style {
        Style::new().bold()
    }

    /// Applies `style` to `text`, or returns it unchanged when disabled.
    pub fn paint(&self, text: &str, style: Style) -> String {
        if !self.enabled || text.is_empty() {
            return text.to_string();
        }
        text.style(style).to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}
