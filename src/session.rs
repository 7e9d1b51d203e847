use crate::commands::{self, Outcome};
use crate::config::Config;
use crate::error::{PromptError, StorageError};
use crate::menu::{build_menu, Menu, MenuChoice};
use crate::model::{capitalize_first, CrudAction, Snippet, DONE_MARKER, TITLE_MAX_CHARS};
use crate::present::Presenter;
use crate::prompt::Prompter;
use crate::storage::fs::validate_name;
use crate::storage::{DirStatus, Storage};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pick {
    Read,
    Delete,
}

#[derive(Debug)]
enum State {
    SelectAction,
    SelectLanguage(CrudAction),
    CreateLanguage,
    CollectTitle { language: String },
    CollectContent { language: String, title: String },
    Persist(Snippet),
    SelectSnippet { pick: Pick, language: String },
    Display { language: String, name: String },
    Remove { language: String, name: String },
    Done(Outcome),
}

/// One interactive run: pick an action, a language, a snippet, then act once.
pub struct Session<R: BufRead, W: Write> {
    storage: Storage,
    theme: String,
    prompter: Prompter<R>,
    presenter: Presenter<W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: &Config, input: R, presenter: Presenter<W>) -> Self {
        Self {
            storage: Storage::new(config),
            theme: config.theme.clone(),
            prompter: Prompter::new(input),
            presenter,
        }
    }

    #[cfg(test)]
    pub fn into_presenter(self) -> Presenter<W> {
        self.presenter
    }

    /// Runs to completion. A preselected action skips the action menu.
    pub fn run(&mut self, action: Option<CrudAction>) -> Result<Outcome> {
        self.check_root()?;

        let mut state = match action {
            Some(action) => State::SelectLanguage(action),
            None => State::SelectAction,
        };
        loop {
            tracing::debug!(?state, "session step");
            state = match state {
                State::Done(outcome) => return Ok(outcome),
                state => self.step(state)?,
            };
        }
    }

    fn step(&mut self, state: State) -> Result<State> {
        let next = match state {
            State::SelectAction => State::SelectLanguage(self.select_action()?),
            State::SelectLanguage(action) => self.select_language(action)?,
            State::CreateLanguage => self.create_language()?,
            State::CollectTitle { language } => self.collect_title(language)?,
            State::CollectContent { language, title } => {
                self.presenter.info(&format!(
                    "Paste code snippet (type '{}' on a new line and then hit enter to save):",
                    DONE_MARKER
                ))?;
                let content = self
                    .prompter
                    .prompt_multiline_until(DONE_MARKER, &mut self.presenter)
                    .context("Failed to read the snippet content")?;
                State::Persist(Snippet {
                    name: title,
                    language,
                    content,
                })
            }
            State::Persist(snippet) => State::Done(commands::write::write_snippet(
                &self.storage,
                &mut self.presenter,
                &snippet,
            )?),
            State::SelectSnippet { pick, language } => self.select_snippet(pick, language)?,
            State::Display { language, name } => State::Done(commands::read::read_snippet(
                &self.storage,
                &mut self.presenter,
                &self.theme,
                &language,
                &name,
            )?),
            State::Remove { language, name } => State::Done(commands::delete::delete_snippet(
                &self.storage,
                &mut self.presenter,
                &language,
                &name,
            )?),
            State::Done(outcome) => State::Done(outcome),
        };
        Ok(next)
    }

    /// Root creation failures are reported; later listings then come back empty.
    fn check_root(&mut self) -> Result<()> {
        tracing::debug!(root = ?self.storage.root(), "checking root directory");
        self.presenter
            .progress("Checking if codepad directory exists...")?;
        // Create the root on first use
        match self.storage.ensure_root() {
            Ok(DirStatus::Created) => self.presenter.info("Directory created successfully.")?,
            Ok(DirStatus::AlreadyExists) => self.presenter.success("Directory already exists")?,
            Err(e) => {
                tracing::warn!(error = %e, "root directory unavailable");
                self.presenter
                    .error(&format!("Error creating directory: {}", e))?;
            }
        }
        Ok(())
    }

    fn select_action(&mut self) -> Result<CrudAction> {
        let menu = Menu::from_values(CrudAction::ALL);
        self.presenter.menu(&menu)?;
        let option = self
            .prompter
            .prompt_number(
                &menu,
                &mut self.presenter,
                "What would you like to do? (Input number): ",
            )
            .context("Failed to read the action selection")?;
        Ok(option.value)
    }

    fn select_language(&mut self, action: CrudAction) -> Result<State> {
        self.presenter.heading("Select language: ")?;
        let languages = self.listed(self.storage.list_languages())?;
        let menu = build_menu(languages, action.offers_new_language());
        self.presenter.menu(&menu)?;

        let choice = match self.prompter.prompt_number(
            &menu,
            &mut self.presenter,
            "Enter the selected language number: ",
        ) {
            Ok(option) => option.value.clone(),
            Err(PromptError::NoOptions) => return self.nothing_to_select(),
            Err(e) => return Err(e).context("Failed to read the language selection"),
        };

        // Only the write menu carries the "add new" entry
        Ok(match (choice, action) {
            (MenuChoice::CreateNew, _) => State::CreateLanguage,
            (MenuChoice::Existing(language), CrudAction::Write) => State::CollectTitle { language },
            (MenuChoice::Existing(language), CrudAction::Read) => State::SelectSnippet {
                pick: Pick::Read,
                language,
            },
            (MenuChoice::Existing(language), CrudAction::Delete) => State::SelectSnippet {
                pick: Pick::Delete,
                language,
            },
        })
    }

    fn create_language(&mut self) -> Result<State> {
        self.presenter.info("What language would you like to add?")?;
        let input = self
            .prompter
            .prompt_free_text(usize::MAX, &mut self.presenter)
            .context("Failed to read the new language name")?;
        let language = capitalize_first(&input);

        // Create the directory, or ask again if the name is unusable
        match self.storage.ensure_language_dir(&language) {
            Ok(DirStatus::Created) => self
                .presenter
                .success("Language directory created successfully")?,
            Ok(DirStatus::AlreadyExists) => self.presenter.info("Language directory already exists.")?,
            Err(StorageError::InvalidName(name)) => {
                self.presenter
                    .warning(&format!("Invalid language name {:?}, try again:", name))?;
                return Ok(State::CreateLanguage);
            }
            Err(e) => {
                // Carry on; the write will report its own failure
                tracing::warn!(error = %e, %language, "language directory unavailable");
                self.presenter
                    .error(&format!("Error creating language directory: {}", e))?;
            }
        }
        Ok(State::CollectTitle { language })
    }

    fn collect_title(&mut self, language: String) -> Result<State> {
        self.presenter.info(&format!(
            "Enter a title for the snippet (maximum {} characters):",
            TITLE_MAX_CHARS
        ))?;
        let title = self
            .prompter
            .prompt_free_text(TITLE_MAX_CHARS, &mut self.presenter)
            .context("Failed to read the snippet title")?;
        if validate_name(&title).is_err() {
            self.presenter
                .warning(&format!("Invalid snippet title {:?}, try again:", title))?;
            return Ok(State::CollectTitle { language });
        }
        Ok(State::CollectContent { language, title })
    }

    fn select_snippet(&mut self, pick: Pick, language: String) -> Result<State> {
        let snippets = self.listed(self.storage.list_snippets(&language))?;
        self.presenter.heading(match pick {
            Pick::Read => "Choose a snippet to read:",
            Pick::Delete => "Choose a snippet to delete:",
        })?;
        let menu = Menu::from_values(snippets);
        self.presenter.menu(&menu)?;

        let name = match self.prompter.prompt_number(
            &menu,
            &mut self.presenter,
            "Input snippet selection number: ",
        ) {
            Ok(option) => option.value.clone(),
            Err(PromptError::NoOptions) => return self.nothing_to_select(),
            Err(e) => return Err(e).context("Failed to read the snippet selection"),
        };

        Ok(match pick {
            Pick::Read => State::Display { language, name },
            Pick::Delete => State::Remove { language, name },
        })
    }

    /// A listing failure is reported and treated as an empty listing.
    fn listed(&mut self, listing: Result<Vec<String>, StorageError>) -> Result<Vec<String>> {
        match listing {
            Ok(names) => Ok(names),
            Err(e) => {
                tracing::warn!(error = %e, "listing failed");
                self.presenter.error(&e.to_string())?;
                Ok(Vec::new())
            }
        }
    }

    fn nothing_to_select(&mut self) -> Result<State> {
        self.presenter.warning("Nothing to select")?;
        Ok(State::Done(Outcome::NothingToSelect))
    }
}
