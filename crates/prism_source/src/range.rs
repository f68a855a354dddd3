//! Closed character ranges within a source file's normalized content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed interval `[start, end]` of 1-based character positions.
///
/// Ranges index codepoints of a [`File`](crate::File)'s tab-expanded content,
/// never bytes. Both endpoints are inclusive.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Range {
    start: u32,
    end: u32,
}

impl Range {
    /// Creates a new range.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `start > end`.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "range start {start} exceeds end {end}");
        Self { start, end }
    }

    /// Returns both endpoints as a pair.
    pub fn get(&self) -> (u32, u32) {
        (self.start, self.end)
    }

    /// Returns the inclusive start position.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Returns the inclusive end position.
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Mutates both endpoints in place.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `start > end`.
    pub fn set(&mut self, start: u32, end: u32) {
        debug_assert!(start <= end, "range start {start} exceeds end {end}");
        self.start = start;
        self.end = end;
    }

    /// Returns the number of characters covered.
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Returns `true` if the range covers a single character.
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Returns the intersection if `self` lies entirely within `other`.
    pub fn fits_in(&self, other: &Range) -> Option<Range> {
        if self.start >= other.start && self.end <= other.end {
            Some(*self)
        } else {
            None
        }
    }

    /// Returns the intersection if the two ranges overlap at all.
    pub fn loosely_fits_in(&self, other: &Range) -> Option<Range> {
        if self.start <= other.end && self.end >= other.start {
            Some(Range::new(
                self.start.max(other.start),
                self.end.min(other.end),
            ))
        } else {
            None
        }
    }

    /// Returns the range spanning both `self` and `other`.
    pub fn merge(&self, other: &Range) -> Range {
        Range::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
