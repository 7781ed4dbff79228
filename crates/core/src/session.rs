//! Mutable session state and the value-editing seam.

use indexmap::IndexSet;
use log::debug;

use crate::arguments::{Argument, ArgumentSpec, ArgumentStore, ArgumentValue, Kind};
use crate::error::Result;
use crate::history::HistoryStore;
use crate::suggestions::SuggestionProvider;

/// What a [`ValueEditor`] is asked to edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRequest<'a> {
    pub argument: &'a Argument,
    pub current: &'a ArgumentValue,
    /// Choices for choice arguments; history then suggestions otherwise.
    pub candidates: Vec<String>,
}

/// Interactive entry of one argument value.
///
/// Implementations block until the user submits or cancels. `Ok(None)`
/// means cancelled; the argument is left untouched.
pub trait ValueEditor {
    /// # Errors
    ///
    /// Returns an error if the underlying terminal fails.
    fn edit(&mut self, request: ValueRequest<'_>) -> Result<Option<ArgumentValue>>;
}

/// Everything that changes while a menu is being used: argument values,
/// entered-value history and the suggestion runner.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub values: ArgumentStore,
    pub history: HistoryStore,
    pub suggestions: SuggestionProvider,
}

impl SessionState {
    #[must_use]
    pub fn new(values: ArgumentStore, history: HistoryStore, suggestions: SuggestionProvider) -> Self {
        Self {
            values,
            history,
            suggestions,
        }
    }

    /// Candidate values offered when editing `argument`.
    #[must_use]
    pub fn candidates(&self, argument: &Argument) -> Vec<String> {
        if let ArgumentSpec::Choice { choices, .. } = &argument.spec {
            return choices.clone();
        }

        let mut candidates: IndexSet<String> = IndexSet::new();
        if argument.kind() != Kind::Password {
            candidates.extend(self.history.recent(argument.name()));
        }
        if let Some(source) = argument.suggestions() {
            candidates.extend(self.suggestions.candidates(source));
        }
        candidates.into_iter().collect()
    }

    /// Opens `editor` for `argument` and stores the submitted value.
    ///
    /// Returns `false` when the user cancelled.
    ///
    /// # Errors
    ///
    /// Propagates editor failures.
    pub fn edit(&mut self, argument: &Argument, editor: &mut dyn ValueEditor) -> Result<bool> {
        let request = ValueRequest {
            argument,
            current: self.values.get(argument.id),
            candidates: self.candidates(argument),
        };

        let Some(value) = editor.edit(request)? else {
            debug!("Editing of `{}` cancelled", argument.key);
            return Ok(false);
        };

        let value = conform(argument, value);
        if argument.kind() != Kind::Password {
            self.history.record(argument.name(), &value.values());
        }
        self.values.set(argument.id, value);

        Ok(true)
    }
}

/// Shapes an edited value to what the argument can hold.
fn conform(argument: &Argument, value: ArgumentValue) -> ArgumentValue {
    let values = match value {
        ArgumentValue::Flag(on) => return ArgumentValue::Flag(on),
        other => other.values(),
    };

    match &argument.spec {
        ArgumentSpec::Flag { .. } => ArgumentValue::Flag(!values.is_empty()),
        ArgumentSpec::Value { multi: false, .. } => ArgumentValue::Single(values.into_iter().next()),
        ArgumentSpec::Value { multi: true, .. } => ArgumentValue::Many(values.into_iter().collect()),
        ArgumentSpec::Choice { choices, multi, .. } => {
            let limit = if *multi { usize::MAX } else { 1 };
            ArgumentValue::Many(
                values
                    .into_iter()
                    .filter(|v| choices.contains(v))
                    .take(limit)
                    .collect(),
            )
        }
    }
}
