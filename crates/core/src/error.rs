use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The sub process exited with a non-success code{}.", .0.map(|c| format!(" ({c})")).unwrap_or_default())]
    SubProcessExit(Option<i32>),

    #[error("Error with sub process: {}", _0)]
    SubProcess(#[from] std::io::Error),

    #[error("Cannot execute an empty command.")]
    EmptyCommand,

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing argument template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering argument template: {}", .0)]
    Render(#[from] RenderError),

    #[error("In {}: template references unknown argument `{}`", .location, .key)]
    UnknownArgument { location: String, key: String },

    #[error("In {}: key `{}` is defined more than once", .location, .key)]
    DuplicateKey { location: String, key: String },

    #[error("In {}: keys may not be empty", .location)]
    EmptyKey { location: String },

    #[error("In {}: choice argument `{}` has no choices", .location, .key)]
    EmptyChoices { location: String, key: String },

    #[error("In {}: `{}` is not one of the choices of argument `{}`", .location, .value, .key)]
    UnknownChoice {
        location: String,
        key: String,
        value: String,
    },

    #[error("In {}: password argument `{}` cannot take multiple values", .location, .key)]
    MultiPassword { location: String, key: String },

    #[error("In {}: `{}` is not a valid include pattern", .location, .pattern)]
    InvalidIncludePattern { location: String, pattern: String },

    #[error("In {}: argument `{}` template uses unknown placeholder `{}`", .location, .key, .placeholder)]
    InvalidTemplateKey {
        location: String,
        key: String,
        placeholder: String,
    },

    #[error("Invalid multi style `{}`: expected `repeat` or a single joining character", .0)]
    InvalidMultiStyle(String),

    #[error("Cannot resolve argument `{}` for command `{}`", .key, .command)]
    Resolution { command: String, key: String },

    #[error("Suggestion command `{}` failed: {}", .command, .reason)]
    Suggestion { command: String, reason: String },

    #[error("No menu found at `{}`", .0)]
    MenuNotFound(String),
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn suggestion_error(command: &str, reason: impl ToString) -> Self {
        Self::Suggestion {
            command: command.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Errors found while building the menu tree. These abort before any
    /// interactive session starts.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownArgument { .. }
                | Self::DuplicateKey { .. }
                | Self::EmptyKey { .. }
                | Self::EmptyChoices { .. }
                | Self::UnknownChoice { .. }
                | Self::MultiPassword { .. }
                | Self::InvalidIncludePattern { .. }
                | Self::InvalidTemplateKey { .. }
                | Self::InvalidMultiStyle(_)
                | Self::Parse(_)
        )
    }

    /// Errors that abort a single command or prompt but leave the
    /// navigation loop running.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Resolution { .. } | Self::Suggestion { .. } | Self::Render(_)
        )
    }
}
