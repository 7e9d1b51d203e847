use super::Outcome;
use crate::highlight::Highlighter;
use crate::present::Presenter;
use crate::storage::Storage;
use anyhow::Result;
use std::io::Write;

/// Prints a stored snippet, highlighted for its language when styling is on.
///
/// A highlighting failure still prints the raw text: the snippet was read fine.
pub fn read_snippet<W: Write>(
    storage: &Storage,
    presenter: &mut Presenter<W>,
    theme: &str,
    language: &str,
    name: &str,
) -> Result<Outcome> {
    // Read the snippet
    let bytes = match storage.read_snippet(language, name) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, language, name, "read failed");
            presenter.error(&e.to_string())?;
            return Ok(Outcome::Failed);
        }
    };
    let text = String::from_utf8_lossy(&bytes);

    // Plain output skips the highlighter entirely
    if !presenter.is_styled() {
        presenter.content(&text)?;
    } else {
        match Highlighter::new(theme).highlight(&text, language) {
            Ok(highlighted) => presenter.content(&highlighted)?,
            Err(e) => {
                tracing::warn!(error = %e, "rendering raw snippet");
                presenter.content(&text)?;
                presenter.error(&format!("Error has occurred: {}", e))?;
            }
        }
    }

    Ok(Outcome::Displayed(storage.snippet_path(language, name)?))
}
