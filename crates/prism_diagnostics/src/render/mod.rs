//! The layout engine: turns a [`Diagnostic`] into rendered terminal text.
//!
//! Rendering walks the diagnostic's referenced lines file by file, lays each
//! run of consecutive lines out as a group (code rows plus label sub rows),
//! and assembles the result with the header, file-base rows, gap markers,
//! and the note footer.

mod convert;
mod group;
mod multi;
mod row;
mod single;

use crate::color::apply_color_modifications;
use crate::diagnostic::Diagnostic;
use crate::theme::{glyph, Theme};
use group::GroupRenderer;
use multi::LabelGeometry;
use prism_source::{text, FileId, SourceDb, SourceError};
use row::{Cell, Row, RowBody};
use std::collections::{BTreeSet, HashMap};

/// Errors that abort a rendering.
///
/// There is no partial-output policy: any fatal condition fails the whole
/// render. Recoverable conditions (duplicate labels, empty color ranges,
/// out-of-line slices) never surface here; they are skipped during layout.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A source-level failure: bad line number, bad range bounds, or mixed
    /// indentation during normalization.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A range referenced a [`FileId`] not registered in the [`SourceDb`].
    #[error("diagnostic references a file that is not in the source database")]
    UnknownFile,
}

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic against the files in `db`.
    fn render(&self, diag: &Diagnostic, db: &SourceDb) -> Result<String, RenderError>;
}

/// Renders diagnostics as colorized, multi-line terminal snippets.
///
/// Produces output like:
/// ```text
/// error[E0308]: mismatched types
///   ┌─ src/main.pr:2:4
/// 2 │ let x: u32 = "one";
///   │              ^^^^^ expected u32
///   ·
/// 4 │ let y = x + 1;
///    = note: arithmetic requires numeric operands
/// ```
pub struct TerminalRenderer {
    /// Whether to embed ANSI color sequences in the output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, db: &SourceDb) -> Result<String, RenderError> {
        let theme = Theme::new(self.color);
        let border = theme.border_style();

        // Every line referenced by a range, label, or color is rendered.
        // Files keep their first-occurrence order; lines sort per file.
        let mut file_order: Vec<FileId> = Vec::new();
        let mut lines_by_file: HashMap<FileId, BTreeSet<u32>> = HashMap::new();
        let referenced = diag
            .ranges
            .iter()
            .chain(diag.labels.iter().map(|l| &l.range))
            .chain(diag.colors.iter().map(|c| &c.range));
        for fr in referenced {
            let file = db.try_get_file(fr.file).ok_or(RenderError::UnknownFile)?;
            if !file_order.contains(&fr.file) {
                file_order.push(fr.file);
            }
            let set = lines_by_file.entry(fr.file).or_default();
            for (n, _) in file.lines_in_range(&fr.range) {
                set.insert(n);
            }
        }

        let geometry = LabelGeometry::compute(diag, db)?;
        let width = lines_by_file
            .values()
            .flat_map(|s| s.iter())
            .max()
            .map_or(0, |n| n.to_string().len());

        let mut out: Vec<String> = Vec::new();

        if let Some(header) = &diag.header {
            let title = format!("{}[{}]", diag.severity, header.code);
            let tinted = theme.paint(&title, theme.severity_style(diag.severity).bold());
            let rest = theme.paint(&format!(": {}", header.message), theme.header_style());
            out.push(format!("{tinted}{rest}"));
        }

        for (container_idx, file_id) in file_order.iter().enumerate() {
            let file = db.get_file(*file_id);
            let lines: Vec<u32> = lines_by_file[file_id].iter().copied().collect();
            let (Some(&first), Some(&last)) = (lines.first(), lines.last()) else {
                continue;
            };

            let corner = if container_idx == 0 {
                format!("{}{}", glyph::TOP_LEFT, glyph::HORIZONTAL)
            } else {
                format!("{}{}", glyph::LEFT_TEE, glyph::HORIZONTAL)
            };
            out.push(format!(
                "{}{} {}:{first}:{last}",
                text::repeat(" ", width as u32 + 1),
                theme.paint(&corner, border),
                file.name,
            ));

            let mut emitted_group = false;
            for group in consecutive_groups(&lines) {
                if emitted_group {
                    out.push(render_row(&Row::gap(), width, 0, &theme));
                }
                emitted_group = true;

                let group_first = group[0];
                let group_last = *group.last().unwrap();
                let group_range = file.line_range(group_first, group_last)?;
                let snippet = file.normalized_content_for_range(&group_range)?;
                let max_depth = geometry.max_depth_for(*file_id, group_first, group_last);

                let renderer = GroupRenderer::new(
                    file,
                    &theme,
                    diag,
                    &geometry,
                    max_depth,
                    snippet.indents,
                    snippet.min_indent,
                );
                for r in renderer.run(&group)? {
                    out.push(render_row(&r, width, max_depth, &theme));
                }
            }
        }

        for note in &diag.notes {
            out.push(format!(
                "{}{} {note}",
                text::repeat(" ", width as u32 + 1),
                theme.paint(&glyph::NOTE.to_string(), border),
            ));
        }

        Ok(out.join("\n"))
    }
}

/// Splits sorted line numbers into runs of consecutive values.
fn consecutive_groups(lines: &[u32]) -> Vec<Vec<u32>> {
    let mut groups: Vec<Vec<u32>> = Vec::new();
    for &n in lines {
        match groups.last_mut() {
            Some(g) if *g.last().unwrap() + 1 == n => g.push(n),
            _ => groups.push(vec![n]),
        }
    }
    groups
}

fn paint_cell(cell: &Cell, theme: &Theme) -> String {
    match cell.style {
        Some(style) if cell.ch != ' ' => theme.paint(&cell.ch.to_string(), style),
        _ => cell.ch.to_string(),
    }
}

fn pad_slot(row: &Row, theme: &Theme) -> String {
    match &row.pad_overwrite {
        Some(cell) => paint_cell(cell, theme),
        None => " ".to_string(),
    }
}

/// Renders one laid-out row: line number, sidebar, gutter prefix, body.
///
/// The gutter prefix is padded to `max_depth` columns plus one separator
/// slot, so every body in a group starts at the same column.
fn render_row(row: &Row, width: usize, max_depth: u32, theme: &Theme) -> String {
    let border = theme.border_style();
    let mut out = String::new();

    match row.number {
        Some(n) => {
            let num = n.to_string();
            out.push_str(&theme.paint(&num, border));
            out.push_str(&text::repeat(" ", width.saturating_sub(num.len()) as u32));
        }
        None => out.push_str(&text::repeat(" ", width as u32)),
    }
    out.push(' ');
    match &row.overwrite {
        Some(glyphs) => out.push_str(&theme.paint(glyphs, border)),
        None => out.push_str(&theme.paint(&glyph::VERTICAL.to_string(), border)),
    }
    out.push(' ');

    if max_depth > 0 {
        for col in 1..=max_depth {
            match row.prefix.get(col as usize - 1) {
                Some(cell) => out.push_str(&paint_cell(cell, theme)),
                None => out.push_str(&pad_slot(row, theme)),
            }
        }
        out.push_str(&pad_slot(row, theme));
    }

    match &row.body {
        RowBody::Code { text, mods } => {
            out.push_str(&apply_color_modifications(
                text,
                mods,
                &[theme.code_style()],
                theme.enabled,
            ));
        }
        RowBody::Cells(cells) => {
            for cell in cells {
                out.push_str(&paint_cell(cell, theme));
            }
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;

    fn plain() -> TerminalRenderer {
        TerminalRenderer::new(false)
    }

    #[test]
    fn render_header_only() {
        let db = SourceDb::new();
        let diag = Diagnostic::error().with_header("E101", "unexpected token");
        let output = plain().render(&diag, &db).unwrap();
        assert_eq!(output, "error[E101]: unexpected token");
    }

    #[test]
    fn render_notes_without_snippets() {
        let db = SourceDb::new();
        let diag = Diagnostic::warning()
            .with_header("W201", "unused binding")
            .with_note("prefix it with '_' to silence");
        let output = plain().render(&diag, &db).unwrap();
        assert!(output.starts_with("warning[W201]: unused binding"));
        assert!(output.ends_with(" = prefix it with '_' to silence"));
    }

    #[test]
    fn render_primary_label() {
        let mut db = SourceDb::new();
        let id = db.add_source("test.pr", "signal foo : bit\n");
        let range = db.get_file(id).range(14, 16).unwrap();
        let diag = Diagnostic::error().with_label(Label::primary(range, "expected ';'"));
        let output = plain().render(&diag, &db).unwrap();
        assert!(output.contains("┌─ test.pr:1:1"));
        assert!(output.contains("1 │ signal foo : bit"));
        assert!(output.contains("^^^ expected ';'"));
    }

    #[test]
    fn unknown_file_is_fatal() {
        let db = SourceDb::new();
        let range =
            prism_source::FileRange::new(FileId::from_raw(9), prism_source::Range::new(1, 2));
        let diag = Diagnostic::error().with_range(range);
        assert!(matches!(
            plain().render(&diag, &db),
            Err(RenderError::UnknownFile)
        ));
    }

    #[test]
    fn colored_output_embeds_escapes() {
        let mut db = SourceDb::new();
        let id = db.add_source("test.pr", "let x = 1;\n");
        let range = db.get_file(id).range(5, 5).unwrap();
        let diag = Diagnostic::error().with_label(Label::primary(range, "binding"));
        let colored = TerminalRenderer::new(true).render(&diag, &db).unwrap();
        let uncolored = plain().render(&diag, &db).unwrap();
        assert!(colored.contains('\u{1b}'));
        assert!(!uncolored.contains('\u{1b}'));
    }

    #[test]
    fn consecutive_grouping() {
        assert_eq!(
            consecutive_groups(&[1, 2, 3, 7, 8, 12]),
            vec![vec![1, 2, 3], vec![7, 8], vec![12]]
        );
        assert!(consecutive_groups(&[]).is_empty());
    }
}
