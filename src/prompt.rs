use crate::error::PromptError;
use crate::menu::{Menu, MenuOption};
use crate::model::truncate_chars;
use crate::present::Presenter;
use std::io::{self, BufRead, Write};

/// Consecutive read failures tolerated before a selection prompt gives up.
const MAX_READ_FAILURES: usize = 3;

/// Line-oriented reader for menu numbers, names and pasted snippets.
pub struct Prompter<R: BufRead> {
    input: R,
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Asks until a listed number is entered. Fails only on closed or broken input.
    pub fn prompt_number<'m, T, W: Write>(
        &mut self,
        menu: &'m Menu<T>,
        presenter: &mut Presenter<W>,
        prompt: &str,
    ) -> Result<&'m MenuOption<T>, PromptError> {
        if menu.is_empty() {
            return Err(PromptError::NoOptions);
        }

        let mut failures = 0;
        loop {
            presenter.prompt(prompt)?;
            match self.read_line() {
                Ok(None) => return Err(PromptError::Closed),
                Ok(Some(line)) => {
                    failures = 0;
                    match menu.resolve(&line) {
                        Ok(option) => return Ok(option),
                        Err(e) => {
                            tracing::debug!(input = %line, error = %e, "rejected selection");
                            presenter.warning(&e.to_string())?;
                        }
                    }
                }
                Err(e) => {
                    failures += 1;
                    tracing::warn!(error = %e, failures, "failed to read selection");
                    presenter.error(&format!("Error reading input: {}", e))?;
                    if failures >= MAX_READ_FAILURES {
                        return Err(PromptError::Io(e));
                    }
                }
            }
        }
    }

    /// One trimmed line, cut to `max_chars` characters.
    ///
    /// An unreadable line is reported and comes back empty, so callers that
    /// reject empty names simply ask again.
    pub fn prompt_free_text<W: Write>(
        &mut self,
        max_chars: usize,
        presenter: &mut Presenter<W>,
    ) -> Result<String, PromptError> {
        let line = match self.read_line() {
            Ok(Some(line)) => line,
            Ok(None) => return Err(PromptError::Closed),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read text");
                presenter.error(&format!("Error reading input: {}", e))?;
                return Ok(String::new());
            }
        };
        Ok(truncate_chars(line.trim(), max_chars).to_string())
    }

    /// Collects lines until one equals `sentinel` or input ends.
    ///
    /// Each kept line is terminated with `\n`; the sentinel is dropped. A read
    /// error is reported and whatever was collected so far is returned.
    pub fn prompt_multiline_until<W: Write>(
        &mut self,
        sentinel: &str,
        presenter: &mut Presenter<W>,
    ) -> Result<Vec<u8>, PromptError> {
        let mut content = Vec::new();
        loop {
            match self.read_raw_line() {
                Ok(None) => break,
                Ok(Some(line)) if line == sentinel.as_bytes() => break,
                Ok(Some(line)) => {
                    content.extend_from_slice(&line);
                    content.push(b'\n');
                }
                Err(e) => {
                    tracing::warn!(error = %e, kept = content.len(), "snippet capture interrupted");
                    presenter.error(&format!("reading standard input: {}", e))?;
                    break;
                }
            }
        }
        Ok(content)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        match self.read_raw_line()? {
            Some(raw) => String::from_utf8(raw)
                .map(Some)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            None => Ok(None),
        }
    }

    /// Next line without its `\n` or `\r\n`; `None` at end of input.
    fn read_raw_line(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(Some(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{build_menu, MenuChoice};
    use std::io::{Cursor, Read};

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()))
    }

    fn quiet() -> Presenter<Vec<u8>> {
        Presenter::new(Vec::new(), false)
    }

    fn langs() -> Menu<MenuChoice> {
        build_menu(vec!["English".into(), "Spanish".into(), "French".into()], false)
    }

    #[test]
    fn returns_the_option_at_the_entered_position() {
        let menu = langs();
        for (input, expected) in [("1\n", "English"), ("2\n", "Spanish"), ("3\n", "French")] {
            let mut p = prompter(input);
            let option = p.prompt_number(&menu, &mut quiet(), "> ").unwrap();
            assert_eq!(option.value, MenuChoice::Existing(expected.into()));
        }
    }

    #[test]
    fn reprompts_until_a_listed_number_arrives() {
        let menu = langs();
        let mut p = prompter("abc\n0\n4\n  2  \n3\n");
        let mut presenter = quiet();

        let option = p.prompt_number(&menu, &mut presenter, "> ").unwrap();

        assert_eq!(option.number, 2);
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(out.matches("> ").count(), 4);
        assert!(out.contains("Not a number"));
        assert_eq!(out.matches("Option does not exist").count(), 2);
        let mut rest = String::new();
        p.input.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "3\n");
    }

    #[test]
    fn closed_input_ends_the_prompt() {
        let menu = langs();
        let mut p = prompter("nope\n");
        let err = p.prompt_number(&menu, &mut quiet(), "> ").unwrap_err();
        assert!(matches!(err, PromptError::Closed));
    }

    #[test]
    fn empty_menu_is_not_prompted() {
        let menu = build_menu(Vec::new(), false);
        let mut p = prompter("1\n");
        let err = p.prompt_number(&menu, &mut quiet(), "> ").unwrap_err();
        assert!(matches!(err, PromptError::NoOptions));
    }

    #[test]
    fn invalid_utf8_is_reported_and_retried() {
        let menu = langs();
        let mut input = vec![0xff, 0xfe, b'\n'];
        input.extend_from_slice(b"1\n");
        let mut p = Prompter::new(Cursor::new(input));
        let mut presenter = quiet();

        let option = p.prompt_number(&menu, &mut presenter, "> ").unwrap();

        assert_eq!(option.number, 1);
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(out.contains("Error reading input"));
    }

    #[test]
    fn free_text_is_trimmed_and_truncated() {
        let long = format!("  {}  \n", "x".repeat(60));
        assert_eq!(
            prompter(&long).prompt_free_text(50, &mut quiet()).unwrap(),
            "x".repeat(50)
        );
        assert_eq!(
            prompter("  hello  \n").prompt_free_text(50, &mut quiet()).unwrap(),
            "hello"
        );
        assert!(matches!(
            prompter("").prompt_free_text(50, &mut quiet()),
            Err(PromptError::Closed)
        ));
    }

    #[test]
    fn unreadable_free_text_is_reported_as_empty() {
        let mut input = vec![0xff, b'a', b'\n'];
        input.extend_from_slice(b"ok\n");
        let mut p = Prompter::new(Cursor::new(input));
        let mut presenter = quiet();

        assert_eq!(p.prompt_free_text(50, &mut presenter).unwrap(), "");
        assert_eq!(p.prompt_free_text(50, &mut presenter).unwrap(), "ok");
        let out = String::from_utf8(presenter.into_inner()).unwrap();
        assert!(out.contains("Error reading input"));
    }

    #[test]
    fn multiline_stops_at_sentinel_and_drops_it() {
        let mut p = prompter("fn main() {}\ndone\nleftover\n");
        let content = p.prompt_multiline_until("done", &mut quiet()).unwrap();
        assert_eq!(content, b"fn main() {}\n".to_vec());
    }

    #[test]
    fn multiline_keeps_partial_content_at_end_of_input() {
        let mut p = prompter("a\r\n\nb");
        let content = p.prompt_multiline_until("done", &mut quiet()).unwrap();
        assert_eq!(content, b"a\n\nb\n".to_vec());
    }

    #[test]
    fn multiline_sentinel_must_match_exactly() {
        let mut p = prompter(" done\nDone\ndone\r\n");
        let content = p.prompt_multiline_until("done", &mut quiet()).unwrap();
        assert_eq!(content, b" done\nDone\n".to_vec());
    }
}
