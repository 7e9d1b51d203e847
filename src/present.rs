use crate::menu::Menu;
use colored::Colorize;
use std::fmt::Display;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Prompt,
    Info,
    Progress,
    Success,
    Warning,
    Error,
}

/// Writes menus, prompts and status lines. Holds no session state.
pub struct Presenter<W: Write> {
    out: W,
    styled: bool,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self { out, styled }
    }

    pub fn is_styled(&self) -> bool {
        self.styled
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn menu<T: Display>(&mut self, menu: &Menu<T>) -> io::Result<()> {
        for option in menu.options() {
            writeln!(self.out, "{}. {}", option.number, option.value)?;
        }
        Ok(())
    }

    /// Prompt text stays on the input line.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        let text = self.paint(MessageLevel::Prompt, text);
        write!(self.out, "{}", text)?;
        self.out.flush()
    }

    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        self.line(MessageLevel::Prompt, text)
    }

    pub fn info(&mut self, text: &str) -> io::Result<()> {
        self.line(MessageLevel::Info, text)
    }

    pub fn progress(&mut self, text: &str) -> io::Result<()> {
        self.line(MessageLevel::Progress, text)
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        self.line(MessageLevel::Success, text)
    }

    pub fn warning(&mut self, text: &str) -> io::Result<()> {
        self.line(MessageLevel::Warning, text)
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        self.line(MessageLevel::Error, text)
    }

    /// Writes snippet text as-is, ending on a fresh line.
    pub fn content(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out)?;
        write!(self.out, "{}", text)?;
        if !text.is_empty() && !text.ends_with('\n') {
            writeln!(self.out)?;
        }
        self.out.flush()
    }

    fn line(&mut self, level: MessageLevel, text: &str) -> io::Result<()> {
        let text = self.paint(level, text);
        writeln!(self.out, "{}", text)
    }

    fn paint(&self, level: MessageLevel, text: &str) -> String {
        if !self.styled {
            return text.to_string();
        }
        match level {
            MessageLevel::Prompt => text.blue().to_string(),
            MessageLevel::Info => text.to_string(),
            MessageLevel::Progress | MessageLevel::Warning => text.yellow().to_string(),
            MessageLevel::Success => text.green().to_string(),
            MessageLevel::Error => text.red().to_string(),
        }
    }
}
