use super::Outcome;
use crate::present::Presenter;
use crate::storage::Storage;
use anyhow::Result;
use std::io::Write;

pub fn delete_snippet<W: Write>(
    storage: &Storage,
    presenter: &mut Presenter<W>,
    language: &str,
    name: &str,
) -> Result<Outcome> {
    match storage.delete_snippet(language, name) {
        Ok(()) => {
            presenter.success("Successfully deleted the snippet")?;
            Ok(Outcome::Deleted(storage.snippet_path(language, name)?))
        }
        Err(e) => {
            tracing::warn!(error = %e, language, name, "delete failed");
            presenter.error(&format!("Failed to delete the file: {}", e))?;
            Ok(Outcome::Failed)
        }
    }
}
