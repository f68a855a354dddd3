//! Placement of labels that stay within a single source line.

use crate::color::{ColorModification, PRIORITY_PRIMARY};
use crate::label::LabelStyle;
use crate::render::group::GroupRenderer;
use crate::render::row::Cell;
use crate::render::RenderError;
use crate::theme::glyph;

impl GroupRenderer<'_> {
    /// Lays out a single-line label under the current code row.
    ///
    /// `fitting` is the number of labels on this line that fit entirely
    /// within it, this one included. A lone label gets an inline
    /// underline-plus-message sub row; with two or more, underlines share
    /// the first sub row and each message hangs from a `│` connector.
    pub(crate) fn place_single_line(
        &mut self,
        idx: usize,
        fitting: usize,
    ) -> Result<(), RenderError> {
        let label = &self.diag.labels[idx];
        let Some(rel) = self.relative(&label.range)? else {
            return Ok(());
        };
        let style = self.theme.label_style(label.style, self.diag.severity);
        let mark = match label.style {
            LabelStyle::Primary => glyph::PRIMARY_MARK,
            LabelStyle::Secondary => glyph::SECONDARY_MARK,
        };
        let content = label.content.clone();
        let mut pieces = content.split('\n');
        let first = pieces.next().unwrap_or("");

        if fitting <= 1 {
            let mut row = self.new_sub_row();
            for col in rel.start..=rel.end {
                row.set_body_cell(col, Cell::new(mark, Some(style)));
            }
            if !first.is_empty() {
                row.write_body_text(rel.end + 2, first, Some(style));
            }
            self.rows.push(row);
            // Continuation lines align under the first message character.
            for piece in pieces {
                let mut row = self.new_sub_row();
                row.write_body_text(rel.end + 2, piece, Some(style));
                self.rows.push(row);
            }
        } else {
            let underline_row = match self.underline_row {
                Some(i) => i,
                None => {
                    let row = self.new_sub_row();
                    self.rows.push(row);
                    let i = self.rows.len() - 1;
                    self.underline_row = Some(i);
                    i
                }
            };
            for col in rel.start..=rel.end {
                self.rows[underline_row].set_body_cell(col, Cell::new(mark, Some(style)));
            }

            let spacer = self.new_sub_row();
            self.rows.push(spacer);

            // Anchor a connector column through every row below the
            // underlines, down to where this label's message will sit.
            for i in (underline_row + 1)..self.rows.len() {
                self.rows[i].set_body_cell(rel.start, Cell::new(glyph::VERTICAL, Some(style)));
            }

            let mut row = self.new_sub_row();
            row.write_body_text(rel.start, first, Some(style));
            self.rows.push(row);
            for piece in pieces {
                let mut row = self.new_sub_row();
                row.write_body_text(rel.start, piece, Some(style));
                self.rows.push(row);
            }
        }

        if self.diag.labels[idx].style == LabelStyle::Primary {
            let severity_style = self.theme.severity_style(self.diag.severity);
            self.rows[self.code_row].push_mod(ColorModification::new(
                rel.as_range(),
                vec![severity_style],
                PRIORITY_PRIMARY,
            ));
        }
        Ok(())
    }
}
