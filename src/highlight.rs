use crate::error::RenderError;
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

const RESET: &str = "\x1b[0m";

/// Terminal syntax highlighting keyed by language directory name.
pub struct Highlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
    theme: String,
}

impl Highlighter {
    pub fn new(theme: &str) -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
            theme: theme.to_string(),
        }
    }

    /// Unknown languages are rendered with the plain text syntax.
    pub fn highlight(&self, content: &str, language: &str) -> Result<String, RenderError> {
        let theme = self
            .themes
            .themes
            .get(&self.theme)
            .ok_or_else(|| RenderError::UnknownTheme(self.theme.clone()))?;
        let syntax = self
            .syntaxes
            .find_syntax_by_token(language)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text());
        tracing::debug!(language, syntax = %syntax.name, theme = %self.theme, "highlighting");

        let mut lines = HighlightLines::new(syntax, theme);
        let mut out = String::with_capacity(content.len() * 2);
        for line in LinesWithEndings::from(content) {
            let ranges = lines
                .highlight_line(line, &self.syntaxes)
                .map_err(|e| RenderError::Highlight(e.to_string()))?;
            out.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        out.push_str(RESET);
        Ok(out)
    }
}
