//! Source file management, character ranges, and indentation normalization.
//!
//! This crate provides the [`SourceDb`] for registering source files, the
//! [`Range`] and [`FileRange`] types for tracking 1-based character positions
//! within a [`File`]'s tab-expanded content, and the indentation
//! normalization used by diagnostic rendering.

#![warn(missing_docs)]

pub mod error;
pub mod file;
pub mod file_id;
pub mod file_range;
pub mod range;
pub mod source_db;
pub mod text;

pub use error::SourceError;
pub use file::{File, NormalizedSnippet};
pub use file_id::FileId;
pub use file_range::FileRange;
pub use range::Range;
pub use source_db::SourceDb;
