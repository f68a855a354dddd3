//! Per-line-group layout state.
//!
//! A [`GroupRenderer`] walks one run of consecutive line numbers, emitting a
//! code row per line plus whatever sub rows its labels require. All open
//! multi-line bracket state lives here, scoped to the group.

use crate::color::{ColorModification, PRIORITY_USER};
use crate::diagnostic::Diagnostic;
use crate::render::convert::{convert_range_to_relative, RelativeRange};
use crate::render::multi::LabelGeometry;
use crate::render::row::{Cell, Row};
use crate::render::RenderError;
use crate::theme::{glyph, Theme};
use owo_colors::Style;
use prism_source::{text, File, FileRange};
use std::collections::HashMap;

/// A multi-line label currently being drawn in the gutter.
pub(crate) struct OpenLabel {
    /// Index of the label in the diagnostic's label list.
    pub label_idx: usize,
    /// The gutter column of this label's bracket.
    pub depth: u32,
    /// Set once the `╭` row has been drawn.
    pub started: bool,
    /// Set once the `╰` row has been drawn.
    pub ended: bool,
    /// Last line covered by the label.
    pub end_line: u32,
    /// The label's resolved color.
    pub style: Style,
}

/// Layout state for one line group.
pub(crate) struct GroupRenderer<'a> {
    pub(crate) file: &'a File,
    pub(crate) theme: &'a Theme,
    pub(crate) diag: &'a Diagnostic,
    pub(crate) geometry: &'a LabelGeometry,
    pub(crate) max_depth: u32,
    pub(crate) indents: HashMap<u32, u32>,
    pub(crate) min_indent: u32,
    pub(crate) rows: Vec<Row>,
    pub(crate) open: Vec<OpenLabel>,
    /// Index of the current line's code row within `rows`.
    pub(crate) code_row: usize,
    /// Index of the current line's shared underline row, once one exists.
    pub(crate) underline_row: Option<usize>,
    /// Rendered (de-indented) length of the current line.
    pub(crate) line_len: u32,
    /// The current 1-based source line number.
    pub(crate) line_number: u32,
}

/// A label or color overlapping one rendered line, in processing order.
enum LineItem {
    Label(usize),
    Color(usize),
}

impl<'a> GroupRenderer<'a> {
    pub(crate) fn new(
        file: &'a File,
        theme: &'a Theme,
        diag: &'a Diagnostic,
        geometry: &'a LabelGeometry,
        max_depth: u32,
        indents: HashMap<u32, u32>,
        min_indent: u32,
    ) -> Self {
        Self {
            file,
            theme,
            diag,
            geometry,
            max_depth,
            indents,
            min_indent,
            rows: Vec::new(),
            open: Vec::new(),
            code_row: 0,
            underline_row: None,
            line_len: 0,
            line_number: 0,
        }
    }

    /// Lays out every line of the group and returns the finished rows.
    pub(crate) fn run(mut self, lines: &[u32]) -> Result<Vec<Row>, RenderError> {
        for &n in lines {
            self.render_line(n)?;
        }
        Ok(self.rows)
    }

    fn render_line(&mut self, n: u32) -> Result<(), RenderError> {
        // Labels that ended on an earlier line are dropped only now, so
        // their final row still saw them as open.
        self.open.retain(|l| l.end_line >= n);

        let full = self.file.line_body(n)?;
        let strip = self.min_indent.min(text::leading_whitespace(&full));
        let body = text::char_slice(&full, strip + 1, text::char_len(&full));
        self.line_len = text::char_len(&body);
        self.line_number = n;

        let mut row = Row::code(n, body);
        self.prefill(&mut row);
        self.code_row = self.rows.len();
        self.rows.push(row);
        self.underline_row = None;

        let line_range = self.file.range_for_line(n)?;

        let mut labels: Vec<usize> = (0..self.diag.labels.len())
            .filter(|&i| {
                let r = &self.diag.labels[i].range;
                r.file == self.file.id && r.range.loosely_fits_in(&line_range).is_some()
            })
            .collect();
        labels.sort_by(|&a, &b| {
            let ra = &self.diag.labels[a].range;
            let rb = &self.diag.labels[b].range;
            rb.start()
                .cmp(&ra.start())
                .then(ra.end().cmp(&rb.end()))
        });

        let mut colors: Vec<usize> = (0..self.diag.colors.len())
            .filter(|&i| {
                let r = &self.diag.colors[i].range;
                r.file == self.file.id && r.range.loosely_fits_in(&line_range).is_some()
            })
            .collect();
        colors.sort_by(|&a, &b| {
            self.diag.colors[b]
                .range
                .end()
                .cmp(&self.diag.colors[a].range.end())
        });

        let fitting = labels
            .iter()
            .filter(|&&i| !self.geometry.multi.contains_key(&i))
            .count();

        let items: Vec<LineItem> = labels
            .into_iter()
            .map(LineItem::Label)
            .chain(colors.into_iter().map(LineItem::Color))
            .collect();

        for item in items {
            match item {
                LineItem::Label(i) => {
                    if self.geometry.multi.contains_key(&i) {
                        self.place_multi_line(i)?;
                    } else {
                        self.place_single_line(i, fitting)?;
                    }
                }
                LineItem::Color(i) => self.place_color(i)?,
            }
        }
        Ok(())
    }

    fn place_color(&mut self, idx: usize) -> Result<(), RenderError> {
        let color = &self.diag.colors[idx];
        if let Some(rel) = self.relative(&color.range)? {
            self.rows[self.code_row].push_mod(ColorModification::new(
                rel.as_range(),
                color.styles.clone(),
                PRIORITY_USER,
            ));
        }
        Ok(())
    }

    /// Converts a file range to columns of the current rendered line.
    pub(crate) fn relative(
        &self,
        range: &FileRange,
    ) -> Result<Option<RelativeRange>, RenderError> {
        let indent = *self.indents.get(&self.line_number).unwrap_or(&0);
        Ok(convert_range_to_relative(
            self.file,
            range,
            self.line_number,
            indent,
            self.min_indent,
            self.line_len,
        )?)
    }

    /// Seeds a row's gutter with `│` for every open bracket.
    pub(crate) fn prefill(&self, row: &mut Row) {
        for l in &self.open {
            if l.started && !l.ended {
                row.set_prefix(l.depth, Cell::new(glyph::VERTICAL, Some(l.style)));
            }
        }
    }

    /// Creates a sub row pre-seeded with the open bracket columns.
    pub(crate) fn new_sub_row(&self) -> Row {
        let mut row = Row::sub();
        self.prefill(&mut row);
        row
    }
}
