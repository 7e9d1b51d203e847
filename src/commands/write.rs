use super::Outcome;
use crate::model::Snippet;
use crate::present::Presenter;
use crate::storage::Storage;
use anyhow::Result;
use std::io::Write;

pub fn write_snippet<W: Write>(
    storage: &Storage,
    presenter: &mut Presenter<W>,
    snippet: &Snippet,
) -> Result<Outcome> {
    // Save to the language directory, replacing any same-named snippet
    match storage.write_snippet(snippet) {
        Ok(path) => {
            presenter.success(&format!("Saved at {}", path.display()))?;
            Ok(Outcome::Saved(path))
        }
        Err(e) => {
            tracing::warn!(error = %e, name = %snippet.name, "write failed");
            presenter.error(&format!("Error creating file: {}", e))?;
            Ok(Outcome::Failed)
        }
    }
}
