use crate::config::Config;
use crate::error::{StorageError, StorageResult};
use crate::model::Snippet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirStatus {
    Created,
    AlreadyExists,
}

/// Snippets live at `<root>/<Language>/<name>`.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(config: &Config) -> Self {
        Self {
            root: config.root_dir.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ensure_root(&self) -> StorageResult<DirStatus> {
        ensure_dir(&self.root)
    }

    pub fn ensure_language_dir(&self, language: &str) -> StorageResult<DirStatus> {
        ensure_dir(&self.language_dir(language)?)
    }

    pub fn language_dir(&self, language: &str) -> StorageResult<PathBuf> {
        validate_name(language)?;
        Ok(self.root.join(language))
    }

    pub fn snippet_path(&self, language: &str, name: &str) -> StorageResult<PathBuf> {
        validate_name(name)?;
        Ok(self.language_dir(language)?.join(name))
    }

    pub fn list_languages(&self) -> StorageResult<Vec<String>> {
        list_subdirectories(&self.root)
    }

    pub fn list_snippets(&self, language: &str) -> StorageResult<Vec<String>> {
        list_files(&self.language_dir(language)?)
    }

    /// Overwrites any snippet already stored under the same name.
    pub fn write_snippet(&self, snippet: &Snippet) -> StorageResult<PathBuf> {
        let path = self.snippet_path(&snippet.language, &snippet.name)?;
        write_file(&path, &snippet.content)?;
        Ok(path)
    }

    pub fn read_snippet(&self, language: &str, name: &str) -> StorageResult<Vec<u8>> {
        read_file(&self.snippet_path(language, name)?)
    }

    pub fn delete_snippet(&self, language: &str, name: &str) -> StorageResult<()> {
        delete_file(&self.snippet_path(language, name)?)
    }
}

/// Creates `path` (and parents) unless it is already a directory.
pub fn ensure_dir(path: &Path) -> StorageResult<DirStatus> {
    if path.is_dir() {
        return Ok(DirStatus::AlreadyExists);
    }
    fs::create_dir_all(path).map_err(|source| StorageError::DirectoryAccess {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(?path, "created directory");
    Ok(DirStatus::Created)
}

/// Names of sub-directories, in the order the filesystem yields them.
pub fn list_subdirectories(path: &Path) -> StorageResult<Vec<String>> {
    list_entries(path, true)
}

/// Names of non-directory entries, in the order the filesystem yields them.
pub fn list_files(path: &Path) -> StorageResult<Vec<String>> {
    list_entries(path, false)
}

fn list_entries(path: &Path, want_dirs: bool) -> StorageResult<Vec<String>> {
    let dir_err = |source: io::Error| StorageError::DirectoryAccess {
        path: path.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(path).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        let is_dir = entry.file_type().map_err(dir_err)?.is_dir();
        if is_dir != want_dirs {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => tracing::warn!(name = ?raw, "skipping entry with non UTF-8 name"),
        }
    }
    Ok(names)
}

/// Creates or truncates the file. Not atomic: a failed write may leave a partial file.
pub fn write_file(path: &Path, content: &[u8]) -> StorageResult<()> {
    fs::write(path, content).map_err(|source| StorageError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(?path, bytes = content.len(), "wrote file");
    Ok(())
}

pub fn read_file(path: &Path) -> StorageResult<Vec<u8>> {
    fs::read(path).map_err(|source| StorageError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}

pub fn delete_file(path: &Path) -> StorageResult<()> {
    fs::remove_file(path).map_err(|source| StorageError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(?path, "deleted file");
    Ok(())
}

/// A name must be exactly one plain path component.
pub fn validate_name(name: &str) -> StorageResult<()> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if part == name => Ok(()),
        _ => Err(StorageError::InvalidName(name.to_string())),
    }
}
