pub mod delete;
pub mod read;
pub mod write;

use std::path::PathBuf;

/// How a finished session left the snippet store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved(PathBuf),
    Displayed(PathBuf),
    Deleted(PathBuf),
    NothingToSelect,
    Failed,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed)
    }
}
