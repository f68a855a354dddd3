//! Conversion from file-global character positions to line-local columns.

use prism_source::{File, FileRange, Range, SourceError};

/// A range translated to 1-based columns of one rendered (de-indented) line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RelativeRange {
    /// First covered column.
    pub start: u32,
    /// Last covered column.
    pub end: u32,
}

impl RelativeRange {
    pub(crate) fn as_range(&self) -> Range {
        Range::new(self.start, self.end)
    }
}

/// Translates `range` to columns of rendered line `line_number`.
///
/// The rendered line has `min_indent` characters stripped; a trimmed range's
/// coordinates are measured in de-indented snippet space, so the line's own
/// `indent` is added back for it. `min_indent` is subtracted exactly once.
/// Returns `None` when the translated range ends at or before column zero or
/// starts past `line_len`; surviving bounds are clipped to the line.
pub(crate) fn convert_range_to_relative(
    file: &File,
    range: &FileRange,
    line_number: u32,
    indent: u32,
    min_indent: u32,
    line_len: u32,
) -> Result<Option<RelativeRange>, SourceError> {
    let line_start = file.range_for_line(line_number)?.start() as i64;
    let effective_indent = if range.should_be_trimmed {
        indent as i64
    } else {
        0
    };

    let rel_start = range.start() as i64 - line_start + 1 + effective_indent - min_indent as i64;
    let rel_end = range.end() as i64 - line_start + 1 - min_indent as i64;

    if rel_end <= 0 || line_len == 0 {
        return Ok(None);
    }
    let start = rel_start.max(1) as u32;
    let end = (rel_end as u32).min(line_len);
    if start > end {
        return Ok(None);
    }
    Ok(Some(RelativeRange { start, end }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_source::FileId;

    fn make_file(content: &str) -> File {
        File::new(FileId::from_raw(0), "test.pr", content.to_string())
    }

    fn fr(file: &File, start: u32, end: u32) -> FileRange {
        file.range(start, end).unwrap()
    }

    #[test]
    fn first_line_identity() {
        let f = make_file("let x = 1;\n");
        let r = fr(&f, 5, 5);
        let rel = convert_range_to_relative(&f, &r, 1, 0, 0, 10)
            .unwrap()
            .unwrap();
        assert_eq!((rel.start, rel.end), (5, 5));
    }

    #[test]
    fn second_line_offsets() {
        let f = make_file("abc\ndef\n");
        // 'e' is position 6, column 2 of line 2.
        let r = fr(&f, 6, 7);
        let rel = convert_range_to_relative(&f, &r, 2, 0, 0, 3)
            .unwrap()
            .unwrap();
        assert_eq!((rel.start, rel.end), (2, 3));
    }

    #[test]
    fn min_indent_subtracted_once() {
        let f = make_file("    code\n");
        // 'c' is position 5; with min_indent 4 it renders at column 1.
        let r = fr(&f, 5, 8);
        let rel = convert_range_to_relative(&f, &r, 1, 4, 4, 4)
            .unwrap()
            .unwrap();
        assert_eq!((rel.start, rel.end), (1, 4));
    }

    #[test]
    fn trimmed_start_shifts_by_line_indent() {
        let f = make_file("  aa\n    bb\n");
        // Line 2 is indented 4 against a snippet minimum of 2; a trimmed
        // range has only its start pushed right by the line's own indent.
        let r = fr(&f, 6, 11).trim();
        let rel = convert_range_to_relative(&f, &r, 2, 4, 2, 4)
            .unwrap()
            .unwrap();
        assert_eq!((rel.start, rel.end), (3, 4));

        let untrimmed = fr(&f, 6, 11);
        let rel = convert_range_to_relative(&f, &untrimmed, 2, 4, 2, 4)
            .unwrap()
            .unwrap();
        assert_eq!((rel.start, rel.end), (1, 4));
    }

    #[test]
    fn end_before_line_is_none() {
        let f = make_file("abc\ndef\n");
        let r = fr(&f, 1, 3);
        assert_eq!(
            convert_range_to_relative(&f, &r, 2, 0, 0, 3).unwrap(),
            None
        );
    }

    #[test]
    fn start_past_line_is_none() {
        let f = make_file("abc\ndef\n");
        let r = fr(&f, 6, 7);
        assert_eq!(
            convert_range_to_relative(&f, &r, 1, 0, 0, 3).unwrap(),
            None
        );
    }

    #[test]
    fn spanning_range_clips_to_line() {
        let f = make_file("abc\ndef\nghi\n");
        let r = fr(&f, 2, 10);
        let rel = convert_range_to_relative(&f, &r, 2, 0, 0, 3)
            .unwrap()
            .unwrap();
        assert_eq!((rel.start, rel.end), (1, 3));
    }

    #[test]
    fn unknown_line_errors() {
        let f = make_file("abc\n");
        let r = fr(&f, 1, 3);
        assert!(convert_range_to_relative(&f, &r, 9, 0, 0, 3).is_err());
    }
}
