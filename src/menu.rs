use crate::error::SelectionError;
use std::fmt;

pub const ADD_NEW_LANGUAGE: &str = "Add a new language";

/// A language or snippet entry, or the synthetic "add new" entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    Existing(String),
    CreateNew,
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuChoice::Existing(name) => f.write_str(name),
            MenuChoice::CreateNew => f.write_str(ADD_NEW_LANGUAGE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption<T> {
    pub number: usize,
    pub value: T,
}

/// Options numbered from 1 in the order they were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu<T> {
    options: Vec<MenuOption<T>>,
}

impl<T> Menu<T> {
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let options = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| MenuOption {
                number: i + 1,
                value,
            })
            .collect();
        Self { options }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn options(&self) -> &[MenuOption<T>] {
        &self.options
    }

    /// Resolves one line of user input to an option.
    pub fn resolve(&self, input: &str) -> Result<&MenuOption<T>, SelectionError> {
        let input = input.trim();
        let choice: i64 = input
            .parse()
            .map_err(|_| SelectionError::NotANumber(input.to_string()))?;
        if choice < 1 || choice as u64 > self.len() as u64 {
            return Err(SelectionError::OutOfRange {
                choice,
                max: self.len(),
            });
        }
        Ok(&self.options[(choice - 1) as usize])
    }
}

/// Numbers `names` in discovery order, optionally ending with the "add new" entry.
pub fn build_menu(names: Vec<String>, include_add_new: bool) -> Menu<MenuChoice> {
    let mut choices: Vec<MenuChoice> = names.into_iter().map(MenuChoice::Existing).collect();
    if include_add_new {
        choices.push(MenuChoice::CreateNew);
    }
    Menu::from_values(choices)
}
