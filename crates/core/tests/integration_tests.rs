//! Integration tests for rust-menus-core
//!
//! These tests verify that the core functionality works together correctly
//! by testing complete workflows end-to-end: YAML file to menu tree, key
//! events through the navigator, and resolution of the selected command.

use std::io::Write;

use rust_menus_core::{
    arguments::ArgumentValue,
    error::{Error, Result},
    file_handling::{get_history, load_menu, write_history},
    history::HistoryStore,
    navigation::{Key, Mode, Navigator, Outcome},
    resolver::ResolvedCommand,
    session::{SessionState, ValueEditor, ValueRequest},
    suggestions::SuggestionProvider,
};
use tempfile::{NamedTempFile, TempDir};

/// Answers prompts from a queue and remembers every request it saw.
#[derive(Default)]
struct ScriptedEditor {
    answers: Vec<Option<ArgumentValue>>,
    requests: Vec<(String, Vec<String>)>,
}

impl ScriptedEditor {
    fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|a| Some(ArgumentValue::Single(Some((*a).to_string()))))
                .collect(),
            requests: Vec::new(),
        }
    }
}

impl ValueEditor for ScriptedEditor {
    fn edit(&mut self, request: ValueRequest<'_>) -> Result<Option<ArgumentValue>> {
        self.requests
            .push((request.argument.key.clone(), request.candidates.clone()));
        Ok(if self.answers.is_empty() {
            None
        } else {
            self.answers.remove(0)
        })
    }
}

const GIT_MENU: &str = r#"
name: git
arguments:
  "-v": "--verbose"
menus:
  b:
    name: branch ops
    arguments:
      "-f": "--force"
    commands:
      d:
        name: delete
        template: ["git", "branch", {include: "*", scope: menu}, "-d", {name: "branch_name"}]
    menus:
      r:
        name: remote
        commands:
          p: { name: prune, template: [git, remote, prune, origin] }
  l:
    name: log
    commands:
      branch: { name: branch, template: [git, log, --graph] }
      bisect: { name: bisect, template: [git, bisect, start] }
"#;

fn write_menu(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{contents}").unwrap();
    temp_file
}

fn navigator_for(contents: &str) -> Navigator {
    let temp_file = write_menu(contents);
    let (menu, values) = load_menu(temp_file.path().to_str().unwrap()).unwrap();
    Navigator::new(
        menu,
        SessionState::new(values, HistoryStore::default(), SuggestionProvider::new("sh")),
    )
}

fn press(navigator: &mut Navigator, keys: &str, editor: &mut ScriptedEditor) -> Outcome {
    let mut outcome = Outcome::Continue;
    for c in keys.chars() {
        outcome = navigator.handle_key(Key::Char(c), editor).unwrap();
    }
    outcome
}

fn executed(outcome: Outcome) -> ResolvedCommand {
    match outcome {
        Outcome::Execute(resolved) => resolved,
        other => panic!("expected a command to execute, got {other:?}"),
    }
}

#[test]
fn test_delete_branch_without_force() {
    let mut navigator = navigator_for(GIT_MENU);
    let mut editor = ScriptedEditor::answering(&["demo"]);

    let resolved = executed(press(&mut navigator, "bd", &mut editor));
    assert_eq!(resolved.tokens, vec!["git", "branch", "-d", "demo"]);
    assert_eq!(resolved.name, "delete");
}

#[test]
fn test_delete_branch_with_force() {
    let mut navigator = navigator_for(GIT_MENU);
    let mut editor = ScriptedEditor::answering(&["demo"]);

    press(&mut navigator, "b-f", &mut editor);
    let resolved = executed(press(&mut navigator, "d", &mut editor));
    assert_eq!(
        resolved.tokens,
        vec!["git", "branch", "--force", "-d", "demo"]
    );

    // The entered value is kept, so resolving again gives the same command.
    let again = executed(press(&mut navigator, "d", &mut editor));
    assert_eq!(again, resolved);
    assert_eq!(editor.requests.len(), 1);
}

#[test]
fn test_ambiguous_prefix_then_unique_completion() {
    let mut navigator = navigator_for(GIT_MENU);
    let mut editor = ScriptedEditor::default();

    press(&mut navigator, "l", &mut editor);
    assert_eq!(navigator.current_menu().name, "log");

    press(&mut navigator, "br", &mut editor);
    assert_eq!(navigator.buffer(), "br");
    assert_eq!(navigator.current_menu().name, "log");
    assert_eq!(navigator.partition().matching.len(), 1);

    let resolved = executed(press(&mut navigator, "anch", &mut editor));
    assert_eq!(resolved.tokens, vec!["git", "log", "--graph"]);
    assert_eq!(navigator.buffer(), "");
}

#[test]
fn test_backspace_navigation() {
    let mut navigator = navigator_for(GIT_MENU);
    let mut editor = ScriptedEditor::default();

    navigator.handle_key(Key::Backspace, &mut editor).unwrap();
    assert_eq!(navigator.depth(), 0);
    assert_eq!(navigator.buffer(), "");

    press(&mut navigator, "br", &mut editor);
    assert_eq!(navigator.depth(), 2);

    navigator.handle_key(Key::Backspace, &mut editor).unwrap();
    assert_eq!(navigator.depth(), 1);
    assert_eq!(navigator.current_menu().name, "branch ops");
}

#[test]
fn test_failing_suggestion_command_allows_free_entry() {
    let menu = r#"
name: deploy
arguments:
  "-e":
    name: "--env"
    suggestions: { command: "echo staging; exit 1" }
commands:
  go: { name: go, template: [deploy, {include: "*"}] }
"#;
    let mut navigator = navigator_for(menu);
    let mut editor = ScriptedEditor::answering(&["prod"]);

    press(&mut navigator, "-e", &mut editor);
    assert_eq!(editor.requests, vec![("-e".to_string(), Vec::new())]);

    let resolved = executed(press(&mut navigator, "go", &mut editor));
    assert_eq!(resolved.tokens, vec!["deploy", "--env=prod"]);
}

#[test]
fn test_suggestion_command_candidates_follow_history() {
    let menu = r#"
name: deploy
arguments:
  "-e":
    name: "--env"
    suggestions: { command: "printf 'staging\nprod\n'" }
"#;
    let mut navigator = navigator_for(menu);
    let mut editor = ScriptedEditor::answering(&["canary", "prod"]);

    press(&mut navigator, "-e", &mut editor);
    navigator.handle_key(Key::ToggleMode, &mut editor).unwrap();
    assert_eq!(navigator.mode(), Mode::Edit);
    press(&mut navigator, "-e", &mut editor);

    assert_eq!(editor.requests[0].1, vec!["staging", "prod"]);
    assert_eq!(editor.requests[1].1, vec!["canary", "staging", "prod"]);
}

#[test]
fn test_password_and_choices_workflow() {
    let menu = r#"
name: db
configuration:
  named_arguments_style: { separator: space }
arguments:
  "-p": { name: "--password", password: true }
  "-m": { name: "--mode", choices: [read, write], multi: true }
commands:
  c: { name: connect, template: [psql, {include: "*"}] }
"#;
    let mut navigator = navigator_for(menu);
    let mut editor = ScriptedEditor {
        answers: vec![
            Some(ArgumentValue::Single(Some("hunter2".to_string()))),
            Some(ArgumentValue::Many(
                ["write", "read"].iter().map(ToString::to_string).collect(),
            )),
        ],
        requests: Vec::new(),
    };

    press(&mut navigator, "-p-m", &mut editor);
    assert_eq!(editor.requests[1].1, vec!["read", "write"]);

    let resolved = executed(press(&mut navigator, "c", &mut editor));
    assert_eq!(
        resolved.tokens,
        vec!["psql", "--password", "hunter2", "--mode", "write", "--mode", "read"]
    );
    assert_eq!(
        resolved.display,
        vec!["psql", "--password", "*******", "--mode", "write", "--mode", "read"]
    );
    assert!(navigator.state().history.get("--password").is_none());
    assert!(navigator.state().history.get("--mode").is_some());
}

#[test]
fn test_history_survives_sessions() {
    let dir = TempDir::new().unwrap();
    let history_path = dir.path().join("history.yml");
    let history_path = history_path.to_str().unwrap();

    let mut navigator = navigator_for(GIT_MENU);
    let mut editor = ScriptedEditor::answering(&["demo"]);
    executed(press(&mut navigator, "bd", &mut editor));
    write_history(history_path, &navigator.into_state().history).unwrap();

    let temp_file = write_menu(GIT_MENU);
    let (menu, values) = load_menu(temp_file.path().to_str().unwrap()).unwrap();
    let history = get_history(history_path).unwrap();
    let mut navigator = Navigator::new(
        menu,
        SessionState::new(values, history, SuggestionProvider::new("sh")),
    );

    // A fresh session starts unset, so it prompts again but offers the
    // previous value first.
    let mut editor = ScriptedEditor::default();
    assert_eq!(press(&mut navigator, "bd", &mut editor), Outcome::Continue);
    assert_eq!(
        editor.requests,
        vec![("branch_name".to_string(), vec!["demo".to_string()])]
    );
}

#[test]
fn test_configuration_errors_abort_loading() {
    let temp_file = write_menu(
        r#"
name: git
arguments:
  "-f": "--force"
commands:
  "-f": { name: force, template: [git] }
"#,
    );
    let error = load_menu(temp_file.path().to_str().unwrap()).unwrap_err();
    assert!(error.is_configuration());
    assert!(matches!(error, Error::DuplicateKey { .. }));
}
