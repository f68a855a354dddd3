//! Placement of labels whose ranges cross line boundaries.
//!
//! Each multi-line label draws a rounded bracket in the left gutter: `╭` on
//! its first line, `│` down the middle lines, and `╰` with a horizontal arm
//! pointing at its end column. Overlapping labels are assigned distinct
//! gutter columns (depths) up front, by connected component.

use crate::color::{ColorModification, PRIORITY_PRIMARY, PRIORITY_SECONDARY};
use crate::diagnostic::Diagnostic;
use crate::label::LabelStyle;
use crate::render::group::{GroupRenderer, OpenLabel};
use crate::render::row::Cell;
use crate::render::RenderError;
use crate::theme::glyph;
use owo_colors::Style;
use prism_source::{FileId, SourceDb};
use std::collections::HashMap;

/// The line span and gutter column of one multi-line label.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MultiSpan {
    /// File the label annotates.
    pub file: FileId,
    /// First covered line.
    pub start_line: u32,
    /// Last covered line.
    pub end_line: u32,
    /// Assigned gutter column (always even; odd columns are spacing).
    pub depth: u32,
}

/// Depths and line spans of every multi-line label in a diagnostic.
///
/// Computed once per render pass and kept off the diagnostic itself, so the
/// input stays immutable and concurrently renderable.
pub(crate) struct LabelGeometry {
    /// Label index → span, for labels crossing line boundaries.
    pub multi: HashMap<usize, MultiSpan>,
}

impl LabelGeometry {
    /// Resolves line spans and assigns depths for all multi-line labels.
    ///
    /// Labels sharing a file whose line spans touch form one component;
    /// each component is ordered by range start ascending (ties: greater
    /// `start + end` first) and its members take depths 2, 4, 6, …
    pub(crate) fn compute(diag: &Diagnostic, db: &SourceDb) -> Result<Self, RenderError> {
        struct Span {
            label_idx: usize,
            file: FileId,
            start_line: u32,
            end_line: u32,
            start: u32,
            end: u32,
        }

        let mut spans: Vec<Span> = Vec::new();
        for (i, label) in diag.labels.iter().enumerate() {
            let file = db
                .try_get_file(label.range.file)
                .ok_or(RenderError::UnknownFile)?;
            let (start_line, _) = file.position_to_line(label.range.start())?;
            let (end_line, _) = file.position_to_line(label.range.end())?;
            if start_line != end_line {
                spans.push(Span {
                    label_idx: i,
                    file: label.range.file,
                    start_line,
                    end_line,
                    start: label.range.start(),
                    end: label.range.end(),
                });
            }
        }

        let mut multi = HashMap::new();
        let mut claimed = vec![false; spans.len()];
        for seed in 0..spans.len() {
            if claimed[seed] {
                continue;
            }
            // Transitive closure over "overlaps or shares a line".
            let mut component = vec![seed];
            claimed[seed] = true;
            let mut cursor = 0;
            while cursor < component.len() {
                let member = component[cursor];
                cursor += 1;
                for (j, span) in spans.iter().enumerate() {
                    if claimed[j] || span.file != spans[member].file {
                        continue;
                    }
                    if span.start_line <= spans[member].end_line
                        && span.end_line >= spans[member].start_line
                    {
                        claimed[j] = true;
                        component.push(j);
                    }
                }
            }
            component.sort_by(|&a, &b| {
                spans[a]
                    .start
                    .cmp(&spans[b].start)
                    .then((spans[b].start + spans[b].end).cmp(&(spans[a].start + spans[a].end)))
            });
            for (pos, &k) in component.iter().enumerate() {
                multi.insert(
                    spans[k].label_idx,
                    MultiSpan {
                        file: spans[k].file,
                        start_line: spans[k].start_line,
                        end_line: spans[k].end_line,
                        depth: 2 * (pos as u32 + 1),
                    },
                );
            }
        }
        Ok(Self { multi })
    }

    /// The gutter width needed by a group covering `first..=last` of `file`.
    pub(crate) fn max_depth_for(&self, file: FileId, first: u32, last: u32) -> u32 {
        self.multi
            .values()
            .filter(|s| s.file == file && s.start_line <= last && s.end_line >= first)
            .map(|s| s.depth)
            .max()
            .unwrap_or(0)
    }
}

impl GroupRenderer<'_> {
    /// Processes a multi-line label's contribution to the current line.
    pub(crate) fn place_multi_line(&mut self, idx: usize) -> Result<(), RenderError> {
        let span = self.geometry.multi[&idx];
        let range = self.diag.labels[idx].range;
        let label_style = self.diag.labels[idx].style;
        let style = self.theme.label_style(label_style, self.diag.severity);

        if !self.open.iter().any(|o| o.label_idx == idx) {
            self.open.push(OpenLabel {
                label_idx: idx,
                depth: span.depth,
                started: false,
                ended: false,
                end_line: span.end_line,
                style,
            });
        }

        // The covered stretch of this line is recolored under the label.
        if let Some(rel) = self.relative(&range)? {
            let priority = match label_style {
                LabelStyle::Primary => PRIORITY_PRIMARY,
                LabelStyle::Secondary => PRIORITY_SECONDARY,
            };
            self.rows[self.code_row].push_mod(ColorModification::new(
                rel.as_range(),
                vec![style],
                priority,
            ));
        }

        if self.line_number == span.start_line {
            self.render_bracket_start(idx, span, style)?;
        }
        if self.line_number == span.end_line {
            self.render_bracket_end(idx, span, style)?;
        }
        Ok(())
    }

    fn render_bracket_start(
        &mut self,
        idx: usize,
        span: MultiSpan,
        style: Style,
    ) -> Result<(), RenderError> {
        let range = self.diag.labels[idx].range;
        let label_style = self.diag.labels[idx].style;
        let line_range = self.file.range_for_line(self.line_number)?;

        let at_line_start = range.start() == line_range.start();
        let sole_starter = at_line_start
            && !self.geometry.multi.iter().any(|(&j, other)| {
                j != idx
                    && other.file == self.file.id
                    && other.start_line == self.line_number
                    && self.diag.labels[j].range.start() == range.start()
            });

        if sole_starter {
            self.rows[self.code_row]
                .set_prefix(span.depth, Cell::new(glyph::ROUND_TOP_LEFT, Some(style)));
        } else {
            let pointer = match label_style {
                LabelStyle::Primary => glyph::PRIMARY_MARK,
                LabelStyle::Secondary => glyph::SECONDARY_POINTER,
            };
            let start_col = self.relative(&range)?.map_or(1, |rel| rel.start);
            let mut row = self.new_sub_row();
            row.set_prefix(span.depth, Cell::new(glyph::ROUND_TOP_LEFT, Some(style)));
            if span.depth < self.max_depth {
                row.pad_prefix(
                    span.depth + 1,
                    self.max_depth,
                    Cell::new(glyph::HORIZONTAL, Some(style)),
                );
            }
            for col in 1..start_col {
                row.set_body_cell(col, Cell::new(glyph::HORIZONTAL, Some(style)));
            }
            row.set_body_cell(start_col, Cell::new(pointer, Some(style)));
            row.pad_overwrite = Some(Cell::new(glyph::HORIZONTAL, Some(style)));
            self.rows.push(row);
        }

        if let Some(open) = self.open.iter_mut().find(|o| o.label_idx == idx) {
            open.started = true;
        }
        Ok(())
    }

    fn render_bracket_end(
        &mut self,
        idx: usize,
        span: MultiSpan,
        style: Style,
    ) -> Result<(), RenderError> {
        let range = self.diag.labels[idx].range;
        let label_style = self.diag.labels[idx].style;
        let content = self.diag.labels[idx].content.clone();
        let pointer = match label_style {
            LabelStyle::Primary => glyph::PRIMARY_MARK,
            LabelStyle::Secondary => glyph::SECONDARY_POINTER,
        };

        let reuse_last = self.rows.last().is_some_and(|last| {
            last.number.is_none() && last.body_is_empty() && last.prefix_replaceable(span.depth)
        });
        if !reuse_last {
            let row = self.new_sub_row();
            self.rows.push(row);
        }
        let end_col = self.relative(&range)?.map_or(1, |rel| rel.end);
        let last = self.rows.len() - 1;
        {
            let row = &mut self.rows[last];
            row.set_prefix(span.depth, Cell::new(glyph::ROUND_BOTTOM_LEFT, Some(style)));
            if span.depth < self.max_depth {
                row.pad_prefix(
                    span.depth + 1,
                    self.max_depth,
                    Cell::new(glyph::HORIZONTAL, Some(style)),
                );
            }
            row.pad_overwrite = Some(Cell::new(glyph::HORIZONTAL, Some(style)));
            for col in 1..end_col {
                row.set_body_cell(col, Cell::new(glyph::HORIZONTAL, Some(style)));
            }
            row.set_body_cell(end_col, Cell::new(pointer, Some(style)));
        }

        let mut pieces = content.split('\n');
        if let Some(first) = pieces.next() {
            if !first.is_empty() {
                self.rows[last].write_body_text(end_col + 2, first, Some(style));
            }
        }

        // Ended before continuation rows so they stop seeding this column.
        if let Some(open) = self.open.iter_mut().find(|o| o.label_idx == idx) {
            open.ended = true;
        }
        for piece in pieces {
            let mut row = self.new_sub_row();
            row.write_body_text(end_col + 2, piece, Some(style));
            self.rows.push(row);
        }
        Ok(())
    }
}
