//! Row and cell primitives for laid-out snippet lines.

use crate::color::ColorModification;
use owo_colors::Style;

/// One styled character slot in a row's gutter prefix or body.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Cell {
    /// The character occupying this slot.
    pub ch: char,
    /// The style applied to it, if any.
    pub style: Option<Style>,
}

impl Cell {
    pub(crate) fn new(ch: char, style: Option<Style>) -> Self {
        Self { ch, style }
    }

    pub(crate) fn blank() -> Self {
        Self::new(' ', None)
    }
}

/// Characters a later gutter or connector write may overwrite.
///
/// Corners (`╭`, `╰`) and content characters are never upgraded.
pub(crate) fn is_replaceable(ch: char) -> bool {
    matches!(ch, ' ' | '-' | '─' | '│')
}

/// Characters a horizontal `─` padding run may cross.
///
/// Excludes `│` so vertical connectors survive crossing horizontal bars.
pub(crate) fn is_pad_replaceable(ch: char) -> bool {
    matches!(ch, ' ' | '-' | '─')
}

/// The body payload of a row.
#[derive(Clone, Debug)]
pub(crate) enum RowBody {
    /// A source code line: immutable text plus accumulated color claims,
    /// resolved at assembly time by priority.
    Code {
        /// The de-indented line text, newline stripped.
        text: String,
        /// Styling claims over line-relative columns.
        mods: Vec<ColorModification>,
    },
    /// A constructed sub-line (underlines, connectors, label content),
    /// mutated cell-by-cell under the replaceable rules.
    Cells(Vec<Cell>),
}

/// One output row of a line group: an optional line number, the bracket
/// gutter prefix, and a body.
#[derive(Clone, Debug)]
pub(crate) struct Row {
    /// The 1-based source line number, for code rows.
    pub number: Option<u32>,
    /// Bracket gutter cells; index `i` is depth column `i + 1`.
    pub prefix: Vec<Cell>,
    /// The row body.
    pub body: RowBody,
    /// Replaces the sidebar `│` glyph (`·` gap rows, `┌─`/`├─` file bases).
    pub overwrite: Option<String>,
    /// Fill used for unset prefix columns and the gutter/body separator,
    /// letting bracket arms run horizontally through the padding.
    pub pad_overwrite: Option<Cell>,
}

impl Row {
    pub(crate) fn code(number: u32, text: String) -> Self {
        Self {
            number: Some(number),
            prefix: Vec::new(),
            body: RowBody::Code {
                text,
                mods: Vec::new(),
            },
            overwrite: None,
            pad_overwrite: None,
        }
    }

    pub(crate) fn sub() -> Self {
        Self {
            number: None,
            prefix: Vec::new(),
            body: RowBody::Cells(Vec::new()),
            overwrite: None,
            pad_overwrite: None,
        }
    }

    pub(crate) fn gap() -> Self {
        let mut row = Self::sub();
        row.overwrite = Some(crate::theme::glyph::GAP.to_string());
        row
    }

    /// Adds a color claim to a code body. No-op on sub rows.
    pub(crate) fn push_mod(&mut self, m: ColorModification) {
        if let RowBody::Code { mods, .. } = &mut self.body {
            mods.push(m);
        }
    }

    /// Writes a prefix cell at 1-based `col`, upgrading only replaceable
    /// characters. Grows the prefix with blanks as needed.
    pub(crate) fn set_prefix(&mut self, col: u32, cell: Cell) {
        let idx = col as usize - 1;
        while self.prefix.len() <= idx {
            self.prefix.push(Cell::blank());
        }
        if is_replaceable(self.prefix[idx].ch) {
            self.prefix[idx] = cell;
        }
    }

    /// Runs `─` padding through prefix columns `from..=to`, skipping
    /// vertical connectors and corners.
    pub(crate) fn pad_prefix(&mut self, from: u32, to: u32, cell: Cell) {
        for col in from..=to {
            let idx = col as usize - 1;
            while self.prefix.len() <= idx {
                self.prefix.push(Cell::blank());
            }
            if is_pad_replaceable(self.prefix[idx].ch) {
                self.prefix[idx] = cell;
            }
        }
    }

    /// Returns `true` if the prefix slot at `col` holds a replaceable
    /// character (or nothing yet).
    pub(crate) fn prefix_replaceable(&self, col: u32) -> bool {
        self.prefix
            .get(col as usize - 1)
            .map_or(true, |cell| is_replaceable(cell.ch))
    }

    /// Writes a body cell at 1-based `col` on a sub row, honoring the
    /// replaceable rules. No-op on code rows.
    pub(crate) fn set_body_cell(&mut self, col: u32, cell: Cell) {
        if let RowBody::Cells(cells) = &mut self.body {
            let idx = col as usize - 1;
            while cells.len() <= idx {
                cells.push(Cell::blank());
            }
            if is_replaceable(cells[idx].ch) {
                cells[idx] = cell;
            }
        }
    }

    /// Appends `text` to a sub row starting at 1-based `col`, one styled
    /// cell per codepoint. Existing non-replaceable cells are preserved.
    pub(crate) fn write_body_text(&mut self, col: u32, text: &str, style: Option<Style>) {
        for (i, ch) in text.chars().enumerate() {
            self.set_body_cell(col + i as u32, Cell::new(ch, style));
        }
    }

    /// Returns `true` if the body carries no visible content.
    pub(crate) fn body_is_empty(&self) -> bool {
        match &self.body {
            RowBody::Code { text, .. } => text.is_empty(),
            RowBody::Cells(cells) => cells.iter().all(|c| c.ch == ' '),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::glyph;

    #[test]
    fn replaceable_set() {
        assert!(is_replaceable(' '));
        assert!(is_replaceable('-'));
        assert!(is_replaceable('─'));
        assert!(is_replaceable('│'));
        assert!(!is_replaceable('╭'));
        assert!(!is_replaceable('╰'));
        assert!(!is_replaceable('x'));
        assert!(!is_replaceable('^'));
    }

    #[test]
    fn pad_spares_verticals() {
        assert!(is_pad_replaceable('─'));
        assert!(!is_pad_replaceable('│'));
    }

    #[test]
    fn prefix_grows_with_blanks() {
        let mut row = Row::sub();
        row.set_prefix(4, Cell::new(glyph::ROUND_TOP_LEFT, None));
        assert_eq!(row.prefix.len(), 4);
        assert_eq!(row.prefix[0].ch, ' ');
        assert_eq!(row.prefix[3].ch, glyph::ROUND_TOP_LEFT);
    }

    #[test]
    fn corner_not_overwritten() {
        let mut row = Row::sub();
        row.set_prefix(2, Cell::new(glyph::ROUND_BOTTOM_LEFT, None));
        row.set_prefix(2, Cell::new(glyph::VERTICAL, None));
        assert_eq!(row.prefix[1].ch, glyph::ROUND_BOTTOM_LEFT);
    }

    #[test]
    fn vertical_upgraded_to_corner() {
        let mut row = Row::sub();
        row.set_prefix(2, Cell::new(glyph::VERTICAL, None));
        row.set_prefix(2, Cell::new(glyph::ROUND_BOTTOM_LEFT, None));
        assert_eq!(row.prefix[1].ch, glyph::ROUND_BOTTOM_LEFT);
    }

    #[test]
    fn pad_crosses_horizontal_not_vertical() {
        let mut row = Row::sub();
        row.set_prefix(3, Cell::new(glyph::VERTICAL, None));
        row.pad_prefix(2, 4, Cell::new(glyph::HORIZONTAL, None));
        assert_eq!(row.prefix[1].ch, glyph::HORIZONTAL);
        assert_eq!(row.prefix[2].ch, glyph::VERTICAL);
        assert_eq!(row.prefix[3].ch, glyph::HORIZONTAL);
    }

    #[test]
    fn body_text_preserves_content() {
        let mut row = Row::sub();
        row.write_body_text(1, "third", None);
        row.set_body_cell(1, Cell::new(glyph::VERTICAL, None));
        if let RowBody::Cells(cells) = &row.body {
            assert_eq!(cells[0].ch, 't');
        } else {
            panic!("expected cells body");
        }
    }

    #[test]
    fn empty_detection() {
        let mut row = Row::sub();
        assert!(row.body_is_empty());
        row.write_body_text(3, "x", None);
        assert!(!row.body_is_empty());
        assert!(Row::code(1, String::new()).body_is_empty());
        assert!(!Row::code(1, "text".to_string()).body_is_empty());
    }
}
