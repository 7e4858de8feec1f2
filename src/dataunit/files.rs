use std::fs;
use std::path::{Path, PathBuf};

use crate::component::DataUnit;
use crate::error::DataUnitError;
use crate::paths::guarded_join;

/// A channel of files stored under one root directory.
pub struct FilesDataUnit {
    iri: String,
    binding: String,
    root: PathBuf,
}

impl FilesDataUnit {
    pub fn new(
        iri: impl Into<String>,
        binding: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            iri: iri.into(),
            binding: binding.into(),
            root: root.into(),
        }
    }

    pub fn root_directory(&self) -> &Path {
        &self.root
    }

    /// Create an empty file `name` (which may contain sub directories) and
    /// return its path. Existing files are not overwritten.
    pub fn create_file(&self, name: &str) -> Result<PathBuf, DataUnitError> {
        let path = guarded_join(&self.root, name)
            .filter(|path| path != &self.root)
            .ok_or_else(|| DataUnitError::PathEscape(name.to_string()))?;
        if path.exists() {
            return Err(DataUnitError::AlreadyExists(name.to_string()));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::File::create(&path)?;
        tracing::debug!(unit = %self.iri, file = %path.display(), "File created");
        Ok(path)
    }

    /// Every regular file under the root, as paths relative to it, sorted.
    pub fn files(&self) -> Result<Vec<PathBuf>, DataUnitError> {
        let mut files = Vec::new();
        if self.root.is_dir() {
            collect(&self.root, &self.root, &mut files)?;
        }
        files.sort();
        Ok(files)
    }
}

fn collect(root: &Path, directory: &Path, files: &mut Vec<PathBuf>) -> Result<(), DataUnitError> {
    for entry in fs::read_dir(directory)? {
        let path = entry?.path();
        if path.is_dir() {
            collect(root, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(root) {
            files.push(relative.to_path_buf());
        }
    }
    Ok(())
}

impl DataUnit for FilesDataUnit {
    fn iri(&self) -> &str {
        &self.iri
    }

    fn binding(&self) -> &str {
        &self.binding
    }

    fn kind(&self) -> &'static str {
        "files"
    }
}
