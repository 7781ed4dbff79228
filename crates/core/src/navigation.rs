//! Keyboard-driven navigation through a menu tree.
//!
//! The [`Navigator`] owns the tree and the session state. Each key event
//! either extends the input buffer or activates the entry whose key the
//! buffer now spells out.

use log::debug;

use crate::arguments::Kind;
use crate::error::Result;
use crate::menu::{key_matches, menu_chain, EntryKind, MatchPartition, Menu};
use crate::resolver::{ResolvedCommand, Resolver};
use crate::session::{SessionState, ValueEditor};

/// How selecting a value argument behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Selecting a set argument unsets it; an unset one opens the editor.
    #[default]
    Normal,
    /// Selecting an argument always opens the editor.
    Edit,
}

impl Mode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Mode::Normal => Mode::Edit,
            Mode::Edit => Mode::Normal,
        }
    }
}

/// Key events the navigator understands, independent of any terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Tab,
    ToggleMode,
    ShowResults,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Execute(ResolvedCommand),
    ShowResults,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Navigator {
    root: Menu,
    /// Sub-menu keys from the root to the current menu.
    path: Vec<String>,
    buffer: String,
    mode: Mode,
    state: SessionState,
}

impl Navigator {
    #[must_use]
    pub fn new(root: Menu, state: SessionState) -> Self {
        Self {
            root,
            path: Vec::new(),
            buffer: String::new(),
            mode: Mode::Normal,
            state,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Menu {
        &self.root
    }

    #[must_use]
    pub fn current_menu(&self) -> &Menu {
        self.root.descendant(&self.path).unwrap_or(&self.root)
    }

    /// Root first, current menu last.
    #[must_use]
    pub fn menu_chain(&self) -> Vec<&Menu> {
        menu_chain(&self.root, &self.path)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn partition(&self) -> MatchPartition<'_> {
        self.current_menu().partition(&self.buffer)
    }

    /// Applies one key event.
    ///
    /// # Errors
    ///
    /// Returns recoverable resolution errors from commands as well as
    /// editor failures. The navigator stays usable after either.
    pub fn handle_key(&mut self, key: Key, editor: &mut dyn ValueEditor) -> Result<Outcome> {
        match key {
            Key::Char(c) => self.type_char(c, editor),
            Key::Backspace => {
                self.backspace();
                Ok(Outcome::Continue)
            }
            Key::Tab => self.complete(editor),
            Key::ToggleMode => {
                self.mode = self.mode.toggled();
                debug!("Switched to {:?} mode", self.mode);
                Ok(Outcome::Continue)
            }
            Key::ShowResults => Ok(Outcome::ShowResults),
            Key::Cancel => Ok(Outcome::Cancelled),
        }
    }

    fn type_char(&mut self, c: char, editor: &mut dyn ValueEditor) -> Result<Outcome> {
        let candidate = format!("{}{c}", self.buffer);
        let menu = self.current_menu();
        let exact = menu.entry(&candidate).is_some();
        let partial = menu
            .entries()
            .iter()
            .any(|entry| key_matches(entry.key(), &candidate));

        if exact {
            return self.activate(&candidate, editor);
        }

        if partial {
            self.buffer = candidate;
        } else {
            debug!("No entry matches `{candidate}`");
            self.buffer.clear();
        }
        Ok(Outcome::Continue)
    }

    fn backspace(&mut self) {
        if self.buffer.pop().is_none() && self.path.pop().is_some() {
            debug!("Back to menu `{}`", self.current_menu().name);
        }
    }

    fn complete(&mut self, editor: &mut dyn ValueEditor) -> Result<Outcome> {
        let matching: Vec<String> = self
            .partition()
            .matching
            .iter()
            .map(|entry| entry.key().to_string())
            .collect();

        match matching.as_slice() {
            [only] => {
                let key = only.clone();
                self.activate(&key, editor)
            }
            _ => Ok(Outcome::Continue),
        }
    }

    /// Acts on the entry under `key` in the current menu.
    fn activate(&mut self, key: &str, editor: &mut dyn ValueEditor) -> Result<Outcome> {
        let Some(kind) = self.current_menu().entry(key).map(|entry| entry.kind()) else {
            return Ok(Outcome::Continue);
        };
        self.buffer.clear();

        match kind {
            EntryKind::Menu => {
                self.path.push(key.to_string());
                debug!("Entered menu `{}`", self.current_menu().name);
                Ok(Outcome::Continue)
            }
            EntryKind::Argument => {
                self.select_argument(key, editor)?;
                Ok(Outcome::Continue)
            }
            EntryKind::Command => Ok(match self.resolve_command(key, editor)? {
                Some(resolved) => Outcome::Execute(resolved),
                None => Outcome::Continue,
            }),
        }
    }

    fn select_argument(&mut self, key: &str, editor: &mut dyn ValueEditor) -> Result<()> {
        let menu = self.root.descendant(&self.path).unwrap_or(&self.root);
        let Some(argument) = menu.arguments.get(key) else {
            return Ok(());
        };

        match (argument.kind(), self.mode) {
            (Kind::Flag, _) => self.state.values.toggle_flag(argument.id),
            (_, Mode::Normal) if self.state.values.is_active(argument.id) => {
                debug!("Unset {argument}");
                self.state.values.clear(argument);
            }
            _ => {
                if !self.state.edit(argument, editor)? {
                    self.mode = Mode::Normal;
                }
            }
        }

        Ok(())
    }

    /// Resolves the command under `key` in the current menu. `Ok(None)`
    /// means the user cancelled a prompt.
    ///
    /// # Errors
    ///
    /// See [`Resolver::resolve`].
    pub fn resolve_command(
        &mut self,
        key: &str,
        editor: &mut dyn ValueEditor,
    ) -> Result<Option<ResolvedCommand>> {
        let chain = menu_chain(&self.root, &self.path);
        let Some(command) = chain.last().and_then(|menu| menu.commands.get(key)) else {
            return Ok(None);
        };

        let resolved = Resolver::new(command, &chain).resolve(&mut self.state, editor)?;
        if resolved.is_none() {
            self.mode = Mode::Normal;
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arguments::ArgumentValue;
    use crate::menu::build_menu_tree;
    use crate::menu_definitions::MenuDefinition;
    use crate::session::ValueRequest;

    /// Returns queued answers and records what it was asked for.
    #[derive(Default)]
    struct Scripted {
        answers: Vec<Option<ArgumentValue>>,
        asked: Vec<String>,
    }

    impl ValueEditor for Scripted {
        fn edit(&mut self, request: ValueRequest<'_>) -> Result<Option<ArgumentValue>> {
            self.asked.push(request.argument.key.clone());
            Ok(if self.answers.is_empty() {
                None
            } else {
                self.answers.remove(0)
            })
        }
    }

    fn single(value: &str) -> Option<ArgumentValue> {
        Some(ArgumentValue::Single(Some(value.to_string())))
    }

    const GIT: &str = r#"
name: git
arguments:
  "-v": "--verbose"
menus:
  b:
    name: branch ops
    arguments:
      "-f": "--force"
      "-n": { name: "--name" }
    commands:
      d: { name: delete, template: [git, branch, {include: "*"}, "-d", {name: "branch_name"}] }
      l: { name: list, template: [git, branch] }
      lo: { name: list others, template: [git, branch, "-a"] }
"#;

    fn navigator() -> Navigator {
        let definition: MenuDefinition = serde_yaml::from_str(GIT).unwrap();
        let (root, values) = build_menu_tree(&definition).unwrap();
        Navigator::new(
            root,
            SessionState {
                values,
                ..SessionState::default()
            },
        )
    }

    fn type_keys(navigator: &mut Navigator, keys: &str, editor: &mut Scripted) -> Outcome {
        let mut outcome = Outcome::Continue;
        for c in keys.chars() {
            outcome = navigator.handle_key(Key::Char(c), editor).unwrap();
        }
        outcome
    }

    fn is_set(navigator: &Navigator, key: &str) -> bool {
        let argument = &navigator.current_menu().arguments[key];
        navigator.state().values.is_active(argument.id)
    }

    #[test]
    fn test_exact_match_enters_menu() {
        let mut navigator = navigator();
        let mut editor = Scripted::default();

        type_keys(&mut navigator, "b", &mut editor);
        assert_eq!(navigator.depth(), 1);
        assert_eq!(navigator.current_menu().name, "branch ops");
        assert_eq!(navigator.buffer(), "");
    }

    #[test]
    fn test_partial_and_unmatched_input() {
        let mut navigator = navigator();
        let mut editor = Scripted::default();

        type_keys(&mut navigator, "-", &mut editor);
        assert_eq!(navigator.buffer(), "-");

        type_keys(&mut navigator, "x", &mut editor);
        assert_eq!(navigator.buffer(), "");
    }

    #[test]
    fn test_flag_toggles_in_both_modes() {
        let mut navigator = navigator();
        let mut editor = Scripted::default();

        type_keys(&mut navigator, "b-f", &mut editor);
        assert!(is_set(&navigator, "-f"));

        navigator.handle_key(Key::ToggleMode, &mut editor).unwrap();
        type_keys(&mut navigator, "-f", &mut editor);
        assert!(!is_set(&navigator, "-f"));
        assert!(editor.asked.is_empty());
    }

    #[test]
    fn test_value_argument_modes() {
        let mut navigator = navigator();
        let mut editor = Scripted {
            answers: vec![single("old"), single("new")],
            ..Scripted::default()
        };

        type_keys(&mut navigator, "b-n", &mut editor);
        assert!(is_set(&navigator, "-n"));

        // Normal mode unsets a set value without asking.
        type_keys(&mut navigator, "-n", &mut editor);
        assert!(!is_set(&navigator, "-n"));
        assert_eq!(editor.asked.len(), 1);

        type_keys(&mut navigator, "-n", &mut editor);
        navigator.handle_key(Key::ToggleMode, &mut editor).unwrap();
        assert_eq!(navigator.mode(), Mode::Edit);

        // Edit mode asks even though the value is set; the editor has no
        // answer left, so this is a cancel.
        type_keys(&mut navigator, "-n", &mut editor);
        assert_eq!(editor.asked.len(), 3);
        assert_eq!(navigator.mode(), Mode::Normal);
        let argument = &navigator.current_menu().arguments["-n"];
        assert_eq!(
            navigator.state().values.get(argument.id),
            &ArgumentValue::Single(Some("new".to_string()))
        );
    }

    #[test]
    fn test_backspace_pops_buffer_then_menu() {
        let mut navigator = navigator();
        let mut editor = Scripted::default();

        type_keys(&mut navigator, "b-", &mut editor);
        navigator.handle_key(Key::Backspace, &mut editor).unwrap();
        assert_eq!(navigator.buffer(), "");
        assert_eq!(navigator.depth(), 1);

        navigator.handle_key(Key::Backspace, &mut editor).unwrap();
        assert_eq!(navigator.depth(), 0);

        navigator.handle_key(Key::Backspace, &mut editor).unwrap();
        assert_eq!(navigator.depth(), 0);
    }

    #[test]
    fn test_empty_menu_is_navigable() {
        let definition: MenuDefinition =
            serde_yaml::from_str("name: root\nmenus:\n  e: { name: empty }\n").unwrap();
        let (root, values) = build_menu_tree(&definition).unwrap();
        let mut navigator = Navigator::new(
            root,
            SessionState {
                values,
                ..SessionState::default()
            },
        );
        let mut editor = Scripted::default();

        type_keys(&mut navigator, "e", &mut editor);
        assert_eq!(navigator.depth(), 1);
        assert!(navigator.current_menu().is_empty());

        assert_eq!(type_keys(&mut navigator, "x", &mut editor), Outcome::Continue);
        assert_eq!(navigator.buffer(), "");
        assert!(navigator.partition().matching.is_empty());
        assert_eq!(
            navigator.handle_key(Key::Tab, &mut editor).unwrap(),
            Outcome::Continue
        );
        assert_eq!(navigator.depth(), 1);

        navigator.handle_key(Key::Backspace, &mut editor).unwrap();
        assert_eq!(navigator.depth(), 0);
        assert!(editor.asked.is_empty());
    }

    #[test]
    fn test_tab_completes_unique_match() {
        let mut navigator = navigator();
        let mut editor = Scripted::default();

        type_keys(&mut navigator, "-", &mut editor);
        navigator.handle_key(Key::Tab, &mut editor).unwrap();
        assert_eq!(navigator.buffer(), "");
        assert!(is_set(&navigator, "-v"));

        type_keys(&mut navigator, "b", &mut editor);
        assert_eq!(navigator.depth(), 1);

        // `l` matches both `l` and `lo` exactly and by prefix; the exact
        // key wins as soon as it is typed.
        let outcome = type_keys(&mut navigator, "l", &mut editor);
        assert!(matches!(outcome, Outcome::Execute(ref r) if r.name == "list"));

        type_keys(&mut navigator, "-", &mut editor);
        assert_eq!(
            navigator.handle_key(Key::Tab, &mut editor).unwrap(),
            Outcome::Continue
        );
        assert_eq!(navigator.buffer(), "-");
    }

    #[test]
    fn test_command_resolution_scenario() {
        let mut navigator = navigator();
        let mut editor = Scripted {
            answers: vec![single("demo")],
            ..Scripted::default()
        };

        type_keys(&mut navigator, "-v", &mut editor);
        type_keys(&mut navigator, "b-f", &mut editor);
        let outcome = type_keys(&mut navigator, "d", &mut editor);

        let Outcome::Execute(resolved) = outcome else {
            panic!("expected a command, got {outcome:?}");
        };
        assert_eq!(
            resolved.tokens,
            vec!["git", "branch", "--verbose", "--force", "-d", "demo"]
        );
        assert_eq!(editor.asked, vec!["branch_name"]);
        assert_eq!(navigator.depth(), 1);
    }

    #[test]
    fn test_cancelled_prompt_returns_to_menu() {
        let mut navigator = navigator();
        let mut editor = Scripted::default();

        let outcome = type_keys(&mut navigator, "bd", &mut editor);
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(navigator.depth(), 1);
        assert_eq!(navigator.mode(), Mode::Normal);
    }

    #[test]
    fn test_control_keys() {
        let mut navigator = navigator();
        let mut editor = Scripted::default();

        assert_eq!(
            navigator.handle_key(Key::ShowResults, &mut editor).unwrap(),
            Outcome::ShowResults
        );
        assert_eq!(
            navigator.handle_key(Key::Cancel, &mut editor).unwrap(),
            Outcome::Cancelled
        );
    }
}
