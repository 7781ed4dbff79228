//! Type definitions for the menu screen and the value editor.

use rust_menus_core::resolver::ResolvedCommand;

/// How a menu session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Execute(ResolvedCommand),
    Cancelled,
}

/// Key events the value editor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Char(char),
    Backspace,
    Up,
    Down,
    /// Completes text from the highlighted candidate, or toggles the
    /// highlighted choice of a multi-choice argument.
    Tab,
    Enter,
    Cancel,
}

/// What the editor wants after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    Continue,
    Submit(rust_menus_core::arguments::ArgumentValue),
    Cancel,
}

/// Which flavour of editor an argument gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    /// One free-form value, optionally masked.
    Text { masked: bool },
    /// Any number of free-form values.
    Tags,
    /// A selection among fixed choices.
    Choice { multi: bool },
}

/// Message shown in the status line of the menu screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Status {
    pub message: Option<String>,
    pub is_error: bool,
}

impl Status {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            is_error: false,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            is_error: true,
        }
    }
}
