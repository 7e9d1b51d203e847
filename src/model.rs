use std::fmt;

/// Longest snippet title kept, in characters.
pub const TITLE_MAX_CHARS: usize = 50;

/// Line that ends multi-line snippet capture.
pub const DONE_MARKER: &str = "done";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrudAction {
    Read,
    Write,
    Delete,
}

impl CrudAction {
    pub const ALL: [CrudAction; 3] = [CrudAction::Read, CrudAction::Write, CrudAction::Delete];

    /// Only writes may create a new language directory.
    pub fn offers_new_language(self) -> bool {
        self == CrudAction::Write
    }
}

impl fmt::Display for CrudAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CrudAction::Read => "Read",
            CrudAction::Write => "Write",
            CrudAction::Delete => "Delete",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub name: String,
    pub language: String,
    pub content: Vec<u8>,
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize_first(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Keeps at most `max` characters of `input`.
pub fn truncate_chars(input: &str, max: usize) -> &str {
    match input.char_indices().nth(max) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}
