//! Commands typed at the interactive prompt.

use shared::{domain::DraftField, error::DraftError};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  set <field> <value>   edit the draft (title, description, year, tmdbId)
  submit                save the draft to the backend
  refresh               re-fetch the movie list
  draft                 show the current draft
  show                  show the movie list
  help                  show this help
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    Set { field: DraftField, value: String },
    Submit,
    Refresh,
    Draft,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("usage: set <field> <value>")]
    MissingField,
    #[error(transparent)]
    Field(#[from] DraftError),
}

/// Blank lines parse to `None`. Everything after the field name is the value,
/// so descriptions may contain spaces.
pub fn parse_command(line: &str) -> Result<Option<PromptCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let command = match verb.to_ascii_lowercase().as_str() {
        "set" => {
            let rest = rest.trim_start();
            let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if name.is_empty() {
                return Err(CommandError::MissingField);
            }
            PromptCommand::Set {
                field: name.parse()?,
                value: value.trim().to_string(),
            }
        }
        "submit" | "save" => PromptCommand::Submit,
        "refresh" | "reload" => PromptCommand::Refresh,
        "draft" => PromptCommand::Draft,
        "show" | "list" | "ls" => PromptCommand::Show,
        "help" | "?" => PromptCommand::Help,
        "quit" | "exit" | "q" => PromptCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
