//! Central registry of all source files known to a rendering session.

use crate::file::File;
use crate::file_id::FileId;
use std::io;
use std::path::Path;

/// The source database, owning all registered source text.
///
/// Files are registered once and never mutated afterwards, so a `&SourceDb`
/// can be shared freely across concurrent renderings. Tab expansion (four
/// spaces per tab) happens here, on ingestion.
pub struct SourceDb {
    files: Vec<File>,
}

impl SourceDb {
    /// Creates an empty source database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Registers a source file from an in-memory string.
    ///
    /// The `name` is used as the file's display name in rendered output.
    pub fn add_source(&mut self, name: impl Into<String>, content: &str) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        let file = File::new(id, name, content.replace('\t', "    "));
        self.files.push(file);
        id
    }

    /// Loads a source file from the filesystem and registers it.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path.display().to_string(), &content))
    }

    /// Returns the [`File`] for the given [`FileId`].
    ///
    /// # Panics
    ///
    /// Panics if the `FileId` was not issued by this database.
    pub fn get_file(&self, id: FileId) -> &File {
        &self.files[id.as_raw() as usize]
    }

    /// Returns the [`File`] for the given [`FileId`], if registered here.
    pub fn try_get_file(&self, id: FileId) -> Option<&File> {
        self.files.get(id.as_raw() as usize)
    }

    /// Looks a file up by display name.
    pub fn file_by_name(&self, name: &str) -> Option<&File> {
        self.files.iter().find(|f| f.name == name)
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}
