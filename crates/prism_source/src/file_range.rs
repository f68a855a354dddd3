//! Ranges bound to a specific source file.

use crate::file_id::FileId;
use crate::range::Range;
use serde::{Deserialize, Serialize};

/// A [`Range`] tied to the [`File`](crate::File) it indexes into.
///
/// The file is referenced by [`FileId`] rather than owned, so a `FileRange`
/// is `Copy` and never keeps a file alive by itself. Produced by
/// [`File::range`](crate::File::range).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileRange {
    /// The file this range indexes into.
    pub file: FileId,
    /// The character range within the file's normalized content.
    pub range: Range,
    /// Whether the range's coordinates are measured in de-indented snippet
    /// space. Affects only relative-column conversion during rendering.
    pub should_be_trimmed: bool,
}

impl FileRange {
    /// Creates an untrimmed range into the given file.
    pub fn new(file: FileId, range: Range) -> Self {
        Self {
            file,
            range,
            should_be_trimmed: false,
        }
    }

    /// Marks this range as trimmed and returns it.
    pub fn trim(mut self) -> Self {
        self.should_be_trimmed = true;
        self
    }

    /// Returns the inclusive start position.
    pub fn start(&self) -> u32 {
        self.range.start()
    }

    /// Returns the inclusive end position.
    pub fn end(&self) -> u32 {
        self.range.end()
    }

    /// Merges with another range over the same file.
    ///
    /// # Panics
    ///
    /// Panics if the two ranges reference different files.
    pub fn merge(&self, other: &FileRange) -> FileRange {
        assert_eq!(
            self.file, other.file,
            "cannot merge ranges from different files"
        );
        FileRange {
            file: self.file,
            range: self.range.merge(&other.range),
            should_be_trimmed: self.should_be_trimmed,
        }
    }
}
