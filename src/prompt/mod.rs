use std::fmt;

use console::style;
use inquire::validator::{ErrorMessage, Validation};
use inquire::InquireError;

use crate::config::{Auth, Database};
use crate::error::{BledError, Result};

/// A value that was settled without asking, or after validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled<'a> {
    ProjectName(&'a str),
    Database(Database),
}

/// Source of interactive answers.
///
/// Every question returns [`BledError::PromptCancelled`] when the user backs out.
pub trait Prompter {
    fn project_name(&mut self) -> Result<String>;
    fn database(&mut self) -> Result<Database>;
    fn auth(&mut self) -> Result<Auth>;

    /// Acknowledge a settled value. Silent by default.
    fn settled(&mut self, _value: Settled<'_>) {}
}

/// Terminal prompts backed by `inquire`.
#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn project_name(&mut self) -> Result<String> {
        inquire::Text::new("Please specify a project name:")
            .with_validator(|input: &str| {
                if input.trim().is_empty() {
                    Ok(Validation::Invalid(ErrorMessage::Custom(
                        "Project name must not be empty".to_string(),
                    )))
                } else {
                    Ok(Validation::Valid)
                }
            })
            .prompt()
            .map_err(prompt_error)
    }

    fn database(&mut self) -> Result<Database> {
        let options = Database::ALL
            .into_iter()
            .map(|db| Choice::new(db, db.label(), db.hint()))
            .collect();
        inquire::Select::new("Choose your favorite database:", options)
            .prompt()
            .map(|choice| choice.value)
            .map_err(prompt_error)
    }

    fn auth(&mut self) -> Result<Auth> {
        let options = Auth::ALL
            .into_iter()
            .map(|auth| Choice::new(auth, auth.label(), auth.hint()))
            .collect();
        inquire::Select::new("Choose a template:", options)
            .prompt()
            .map(|choice| choice.value)
            .map_err(prompt_error)
    }

    fn settled(&mut self, value: Settled<'_>) {
        eprintln!("{} {}", style("✔").green().bold(), settled_line(value));
    }
}

fn settled_line(value: Settled<'_>) -> String {
    match value {
        Settled::ProjectName(name) => format!("Project name: {name}"),
        Settled::Database(database) => format!("Database: {}", capitalize(database.as_str())),
    }
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A select option rendered as `label (hint)`.
struct Choice<T> {
    value: T,
    label: &'static str,
    hint: &'static str,
}

impl<T> Choice<T> {
    fn new(value: T, label: &'static str, hint: &'static str) -> Self {
        Self { value, label, hint }
    }
}

impl<T> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.label, style(format!("({})", self.hint)).dim())
    }
}

fn prompt_error(e: InquireError) -> BledError {
    match e {
        InquireError::OperationCanceled | InquireError::OperationInterrupted => {
            BledError::PromptCancelled
        }
        other => BledError::Prompt { source: other },
    }
}
