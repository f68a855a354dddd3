//! Free-form colorizations and priority-merged per-character styling.

use owo_colors::{OwoColorize, Style};
use prism_source::{FileRange, Range};

/// Priority of user-supplied [`Color`] entries.
pub(crate) const PRIORITY_USER: u8 = 20;
/// Priority of secondary-label underline colors.
pub(crate) const PRIORITY_SECONDARY: u8 = 29;
/// Priority of primary-label underline colors.
pub(crate) const PRIORITY_PRIMARY: u8 = 30;

/// A free-form colorization of a source range.
///
/// Multiple colors may overlap; resolution is priority-based, with user
/// colors sitting below label underline colors. The styles compose by
/// left-fold: each is applied to the output of the previous one.
#[derive(Clone, Debug)]
pub struct Color {
    /// The source range to colorize.
    pub range: FileRange,
    /// The style functions applied to each covered character, in order.
    pub styles: Vec<Style>,
}

impl Color {
    /// Creates a colorization of `range` with the given styles.
    pub fn new(range: FileRange, styles: Vec<Style>) -> Self {
        Self { range, styles }
    }
}

/// A styling claim over a run of line-relative columns.
///
/// Accumulated per rendered line and resolved by
/// [`apply_color_modifications`]: higher priorities claim characters first,
/// ties go to the earliest-inserted modification.
#[derive(Clone, Debug)]
pub(crate) struct ColorModification {
    /// Line-relative column range (1-based, inclusive).
    pub range: Range,
    /// Style functions composed by left-fold.
    pub styles: Vec<Style>,
    /// Claim priority; see the `PRIORITY_*` constants.
    pub priority: u8,
}

impl ColorModification {
    pub(crate) fn new(range: Range, styles: Vec<Style>, priority: u8) -> Self {
        Self {
            range,
            styles,
            priority,
        }
    }
}

/// Wraps a single character with each style in order.
fn style_char(c: char, styles: &[Style]) -> String {
    let mut out = c.to_string();
    for style in styles {
        out = out.style(*style).to_string();
    }
    out
}

/// Resolves a line's accumulated modifications into styled text.
///
/// Modifications are visited by priority descending (stable, so ties are
/// first-inserted-wins). Each unclaimed character in a modification's range
/// is wrapped individually; characters left unclaimed at the end receive the
/// base styles. With styling disabled the body passes through unchanged.
pub(crate) fn apply_color_modifications(
    body: &str,
    mods: &[ColorModification],
    base: &[Style],
    enabled: bool,
) -> String {
    if !enabled {
        return body.to_string();
    }
    let chars: Vec<char> = body.chars().collect();
    let mut claimed: Vec<Option<String>> = vec![None; chars.len()];

    let mut ordered: Vec<&ColorModification> = mods.iter().collect();
    ordered.sort_by(|a, b| b.priority.cmp(&a.priority));

    for m in ordered {
        let lo = m.range.start().max(1) as usize;
        let hi = (m.range.end() as usize).min(chars.len());
        if lo > hi {
            continue;
        }
        for i in lo..=hi {
            let slot = &mut claimed[i - 1];
            if slot.is_none() {
                *slot = Some(style_char(chars[i - 1], &m.styles));
            }
        }
    }

    chars
        .iter()
        .zip(claimed)
        .map(|(c, slot)| slot.unwrap_or_else(|| style_char(*c, base)))
        .collect()
}
