//! Source files decomposed into per-line character ranges.

use crate::error::SourceError;
use crate::file_id::FileId;
use crate::file_range::FileRange;
use crate::range::Range;
use crate::text;
use std::collections::HashMap;

/// A source file registered in the [`SourceDb`](crate::SourceDb).
///
/// The text is decomposed into per-line [`Range`]s of 1-based character
/// positions, each spanning from the line's first character through its
/// trailing newline (the final line may lack one). The
/// [`SourceDb`](crate::SourceDb) expands tabs to four spaces before
/// construction; a `File` built directly receives its content verbatim.
pub struct File {
    /// The unique identifier of this file within its [`SourceDb`](crate::SourceDb).
    pub id: FileId,
    /// The display name used in rendered diagnostics.
    pub name: String,
    /// The tab-expanded text content.
    pub content: String,
    lines: Vec<Range>,
}

/// The result of de-indenting a snippet of covered lines.
///
/// Produced by [`File::normalized_content_for_range`]. The `indents` map and
/// `min_indent` feed the relative-column conversion during rendering.
#[derive(Debug)]
pub struct NormalizedSnippet {
    /// The covered lines with `min_indent` characters stripped from each
    /// leading run. Lines keep their own newlines.
    pub text: String,
    /// Original leading-whitespace length per covered line number.
    pub indents: HashMap<u32, u32>,
    /// The minimum indentation across covered non-blank lines.
    pub min_indent: u32,
}

impl File {
    /// Creates a new `File` and indexes its line ranges.
    pub fn new(id: FileId, name: impl Into<String>, content: String) -> Self {
        let lines = compute_line_ranges(&content);
        Self {
            id,
            name: name.into(),
            content,
            lines,
        }
    }

    /// Returns the content length in characters.
    pub fn char_len(&self) -> u32 {
        text::char_len(&self.content)
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Resolves a character position to its `(line_number, line_range)`.
    pub fn position_to_line(&self, pos: u32) -> Result<(u32, Range), SourceError> {
        if pos == 0 || pos > self.char_len() {
            return Err(SourceError::InvalidRangeBounds {
                start: pos,
                end: pos,
            });
        }
        let idx = self
            .lines
            .partition_point(|line| line.start() <= pos)
            .saturating_sub(1);
        Ok((idx as u32 + 1, self.lines[idx]))
    }

    /// Returns the range of line `n` (1-based).
    pub fn range_for_line(&self, n: u32) -> Result<Range, SourceError> {
        if n == 0 || n > self.line_count() {
            return Err(SourceError::InvalidLineNumber { line: n });
        }
        Ok(self.lines[n as usize - 1])
    }

    /// Returns the merged range of lines `a..=b`.
    pub fn line_range(&self, a: u32, b: u32) -> Result<Range, SourceError> {
        let first = self.range_for_line(a)?;
        let last = self.range_for_line(b)?;
        Ok(first.merge(&last))
    }

    /// Creates a [`FileRange`] over `[start, end]` of this file's content.
    ///
    /// Fails with [`SourceError::InvalidRangeBounds`] when `start < 1`,
    /// `end` exceeds the content length, or the pair is inverted.
    pub fn range(&self, start: u32, end: u32) -> Result<FileRange, SourceError> {
        if start < 1 || end > self.char_len() || start > end {
            return Err(SourceError::InvalidRangeBounds { start, end });
        }
        Ok(FileRange::new(self.id, Range::new(start, end)))
    }

    /// Returns the content slice covered by `r`.
    pub fn content_for_range(&self, r: &Range) -> String {
        text::char_slice(&self.content, r.start(), r.end())
    }

    /// Returns every `(line_number, line_range)` loosely overlapping `r`.
    pub fn lines_in_range(&self, r: &Range) -> Vec<(u32, Range)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| r.loosely_fits_in(line).is_some())
            .map(|(i, line)| (i as u32 + 1, *line))
            .collect()
    }

    /// De-indents the lines covered by `r`.
    ///
    /// The range is first expanded to whole lines at both ends. Each covered
    /// line's leading-whitespace run is measured; the indent character is
    /// established from the first indented line, and a line indenting with a
    /// different character fails with [`SourceError::MixedIndentation`].
    /// Fully-blank lines do not participate in the minimum.
    pub fn normalized_content_for_range(
        &self,
        r: &Range,
    ) -> Result<NormalizedSnippet, SourceError> {
        let (first_line, _) = self.position_to_line(r.start())?;
        let (last_line, _) = self.position_to_line(r.end())?;

        let mut indents = HashMap::new();
        let mut min_indent: Option<u32> = None;
        let mut indent_char: Option<char> = None;

        for n in first_line..=last_line {
            let line = self.line_body(n)?;
            let run: String = line
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect();

            if let Some(first) = run.chars().next() {
                let established = *indent_char.get_or_insert(first);
                if run.chars().any(|c| c != established) {
                    return Err(SourceError::MixedIndentation {
                        name: self.name.clone(),
                        line: n,
                    });
                }
            }

            let indent = text::char_len(&run);
            indents.insert(n, indent);
            if !text::is_blank(&line) {
                min_indent = Some(min_indent.map_or(indent, |m| m.min(indent)));
            }
        }

        let min_indent = min_indent.unwrap_or(0);
        let mut out = String::new();
        for n in first_line..=last_line {
            let range = self.range_for_line(n)?;
            let line = self.content_for_range(&range);
            let strip = min_indent.min(text::leading_whitespace(&line));
            out.push_str(&text::char_slice(
                &line,
                strip + 1,
                text::char_len(&line),
            ));
        }

        Ok(NormalizedSnippet {
            text: out,
            indents,
            min_indent,
        })
    }

    /// Returns line `n` without its trailing newline.
    pub fn line_body(&self, n: u32) -> Result<String, SourceError> {
        let range = self.range_for_line(n)?;
        let line = self.content_for_range(&range);
        Ok(line.strip_suffix('\n').unwrap_or(&line).to_string())
    }
}

/// Splits `content` into per-line character ranges, newlines included.
fn compute_line_ranges(content: &str) -> Vec<Range> {
    let mut lines = Vec::new();
    let mut start = 1u32;
    let mut pos = 0u32;
    for c in content.chars() {
        pos += 1;
        if c == '\n' {
            lines.push(Range::new(start, pos));
            start = pos + 1;
        }
    }
    if start <= pos {
        lines.push(Range::new(start, pos));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_file(content: &str) -> File {
        File::new(FileId::from_raw(0), "test.pr", content.to_string())
    }

    #[test]
    fn line_ranges_include_newlines() {
        let f = make_file("abc\ndef\nghi");
        assert_eq!(f.range_for_line(1).unwrap(), Range::new(1, 4));
        assert_eq!(f.range_for_line(2).unwrap(), Range::new(5, 8));
        assert_eq!(f.range_for_line(3).unwrap(), Range::new(9, 11));
        assert_eq!(f.line_count(), 3);
    }

    #[test]
    fn trailing_newline_no_phantom_line() {
        let f = make_file("abc\n");
        assert_eq!(f.line_count(), 1);
        assert_eq!(f.range_for_line(1).unwrap(), Range::new(1, 4));
    }

    #[test]
    fn position_to_line_resolution() {
        let f = make_file("abc\ndef\nghi");
        assert_eq!(f.position_to_line(1).unwrap().0, 1);
        assert_eq!(f.position_to_line(4).unwrap().0, 1); // the newline
        assert_eq!(f.position_to_line(5).unwrap().0, 2);
        assert_eq!(f.position_to_line(11).unwrap().0, 3);
    }

    #[test]
    fn position_out_of_bounds() {
        let f = make_file("abc");
        assert!(f.position_to_line(0).is_err());
        assert!(f.position_to_line(4).is_err());
    }

    #[test]
    fn line_out_of_bounds() {
        let f = make_file("abc\ndef");
        assert_eq!(
            f.range_for_line(3),
            Err(SourceError::InvalidLineNumber { line: 3 })
        );
        assert_eq!(
            f.range_for_line(0),
            Err(SourceError::InvalidLineNumber { line: 0 })
        );
    }

    #[test]
    fn line_range_merges() {
        let f = make_file("abc\ndef\nghi");
        assert_eq!(f.line_range(1, 2).unwrap(), Range::new(1, 8));
        assert_eq!(f.line_range(1, 3).unwrap(), Range::new(1, 11));
    }

    #[test]
    fn range_factory_bounds() {
        let f = make_file("abcdef");
        assert!(f.range(1, 6).is_ok());
        assert!(f.range(0, 3).is_err());
        assert!(f.range(2, 7).is_err());
        assert!(f.range(5, 3).is_err());
    }

    #[test]
    fn content_for_range_slices_codepoints() {
        let f = make_file("héllo\nwörld");
        assert_eq!(f.content_for_range(&Range::new(2, 3)), "él");
        assert_eq!(f.content_for_range(&Range::new(7, 11)), "wörld");
    }

    #[test]
    fn lines_in_range_loose_overlap() {
        let f = make_file("abc\ndef\nghi\njkl");
        let hits = f.lines_in_range(&Range::new(6, 9));
        let numbers: Vec<u32> = hits.iter().map(|(n, _)| *n).collect();
        assert_eq!(numbers, vec![2, 3]);
    }

    #[test]
    fn normalization_strips_common_indent() {
        let f = make_file("    a\n      b\n    c\n");
        let snippet = f
            .normalized_content_for_range(&Range::new(1, f.char_len()))
            .unwrap();
        assert_eq!(snippet.min_indent, 4);
        assert_eq!(snippet.text, "a\n  b\nc\n");
        assert_eq!(snippet.indents[&1], 4);
        assert_eq!(snippet.indents[&2], 6);
    }

    #[test]
    fn normalization_ignores_blank_lines() {
        let f = make_file("    a\n\n    b\n");
        let snippet = f
            .normalized_content_for_range(&Range::new(1, f.char_len()))
            .unwrap();
        assert_eq!(snippet.min_indent, 4);
        assert_eq!(snippet.text, "a\n\nb\n");
    }

    #[test]
    fn normalization_expands_to_whole_lines() {
        let f = make_file("  abc\n  def\n");
        // Range covering only the 'c'..'d' region still normalizes both lines.
        let snippet = f.normalized_content_for_range(&Range::new(5, 9)).unwrap();
        assert_eq!(snippet.text, "abc\ndef\n");
    }

    #[test]
    fn mixed_indentation_fails() {
        let f = File::new(FileId::from_raw(0), "mix.pr", "  a\n\tb\n".to_string());
        let err = f
            .normalized_content_for_range(&Range::new(1, f.char_len()))
            .unwrap_err();
        assert_eq!(
            err,
            SourceError::MixedIndentation {
                name: "mix.pr".to_string(),
                line: 2,
            }
        );
    }

    #[test]
    fn mixed_indentation_within_one_line_fails() {
        let f = File::new(FileId::from_raw(0), "mix.pr", " \ta\n".to_string());
        assert!(f
            .normalized_content_for_range(&Range::new(1, f.char_len()))
            .is_err());
    }

    #[test]
    fn unindented_snippet_has_zero_min() {
        let f = make_file("a\n  b\n");
        let snippet = f
            .normalized_content_for_range(&Range::new(1, f.char_len()))
            .unwrap();
        assert_eq!(snippet.min_indent, 0);
        assert_eq!(snippet.text, "a\n  b\n");
    }

    #[test]
    fn line_body_drops_newline() {
        let f = make_file("abc\ndef\n");
        assert_eq!(f.line_body(1).unwrap(), "abc");
        assert_eq!(f.line_body(2).unwrap(), "def");
    }
}
