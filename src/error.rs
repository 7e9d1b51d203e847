use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to access directory {path:?}: {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to access file {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid name: {0:?}")]
    InvalidName(String),
}

/// A single bad answer to a numbered menu. Always recovered by asking again.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Not a number, try again: {0:?}")]
    NotANumber(String),

    #[error("Option does not exist, try again (choose 1-{max}, got {choice})")]
    OutOfRange { choice: i64, max: usize },
}

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("input stream closed")]
    Closed,

    #[error("nothing to select")]
    NoOptions,

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown highlighting theme: {0}")]
    UnknownTheme(String),

    #[error("Highlighting failed: {0}")]
    Highlight(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
