//! Value editor: text entry with fuzzy-filtered candidates, tag entry for
//! multi-value arguments and selection lists for choices.
//!
//! [`EditorState`] holds all editing logic and is driven by [`EditorKey`]s;
//! [`TerminalEditor`] only reads events and draws it.

use std::io::{stdout, Write};

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, Event};
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use indexmap::IndexSet;
use itertools::Itertools;
use log::debug;
use rust_menus_core::arguments::{Argument, ArgumentValue, Kind};
use rust_menus_core::error::Result;
use rust_menus_core::session::{ValueEditor, ValueRequest};

use super::input::editor_key;
use super::types::{EditorAction, EditorKey, EditorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub kind: EditorKind,
    pub title: String,
    pub input: String,
    candidates: Vec<String>,
    /// Entered tags or selected choices.
    selected: IndexSet<String>,
    /// Position in the filtered candidate list.
    highlighted: Option<usize>,
}

impl EditorState {
    #[must_use]
    pub fn new(argument: &Argument, current: &ArgumentValue, candidates: Vec<String>) -> Self {
        let kind = match argument.kind() {
            Kind::Choice => EditorKind::Choice {
                multi: argument.accepts_many(),
            },
            Kind::Multi => EditorKind::Tags,
            Kind::Password => EditorKind::Text { masked: true },
            Kind::Single | Kind::Flag => EditorKind::Text { masked: false },
        };

        let (input, selected) = match kind {
            EditorKind::Text { .. } => (current.values().into_iter().next().unwrap_or_default(), IndexSet::new()),
            EditorKind::Tags | EditorKind::Choice { .. } => (String::new(), current.values().into_iter().collect()),
        };

        let highlighted = match kind {
            EditorKind::Choice { .. } => Some(
                selected
                    .first()
                    .and_then(|s| candidates.iter().position(|c| c == s))
                    .unwrap_or(0),
            ),
            _ => None,
        };

        Self {
            kind,
            title: argument.to_string(),
            input,
            candidates,
            selected,
            highlighted,
        }
    }

    #[must_use]
    pub fn from_request(request: &ValueRequest<'_>) -> Self {
        Self::new(request.argument, request.current, request.candidates.clone())
    }

    /// Candidates matching the current input, best fuzzy match first.
    /// Choices keep their declared order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&str> {
        if self.input.is_empty() {
            return self.candidates.iter().map(String::as_str).collect();
        }

        let matcher = SkimMatcherV2::default();
        let scored = self
            .candidates
            .iter()
            .filter_map(|c| matcher.fuzzy_match(c, &self.input).map(|score| (score, c.as_str())));

        match self.kind {
            EditorKind::Choice { .. } => scored.map(|(_, c)| c).collect(),
            _ => scored
                .sorted_by(|a, b| b.0.cmp(&a.0))
                .map(|(_, c)| c)
                .collect(),
        }
    }

    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted
            .and_then(|index| self.filtered().get(index).copied())
    }

    #[must_use]
    pub fn selected(&self) -> &IndexSet<String> {
        &self.selected
    }

    /// Text shown in the input line.
    #[must_use]
    pub fn visible_input(&self) -> String {
        match self.kind {
            EditorKind::Text { masked: true } => "*".repeat(self.input.chars().count()),
            _ => self.input.clone(),
        }
    }

    pub fn handle(&mut self, key: EditorKey) -> EditorAction {
        match key {
            EditorKey::Cancel => return EditorAction::Cancel,
            EditorKey::Enter => return self.enter(),
            EditorKey::Char(c) => {
                self.input.push(c);
                self.reset_highlight();
            }
            EditorKey::Backspace => {
                if self.input.pop().is_none() && self.kind == EditorKind::Tags {
                    self.selected.pop();
                }
                self.reset_highlight();
            }
            EditorKey::Up => self.move_highlight(false),
            EditorKey::Down => self.move_highlight(true),
            EditorKey::Tab => self.tab(),
        }
        EditorAction::Continue
    }

    fn reset_highlight(&mut self) {
        self.highlighted = match self.kind {
            EditorKind::Choice { .. } if !self.filtered().is_empty() => Some(0),
            _ => None,
        };
    }

    fn move_highlight(&mut self, down: bool) {
        let count = self.filtered().len();
        if count == 0 {
            self.highlighted = None;
            return;
        }

        self.highlighted = Some(match (self.highlighted, down) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(index), true) => (index + 1) % count,
            (Some(index), false) => (index + count - 1) % count,
        });
    }

    fn tab(&mut self) {
        let Some(candidate) = self.highlighted().or_else(|| self.single_match()).map(ToString::to_string) else {
            return;
        };

        match self.kind {
            EditorKind::Choice { multi: true } => {
                if !self.selected.shift_remove(&candidate) {
                    self.selected.insert(candidate);
                }
            }
            EditorKind::Choice { multi: false } => {}
            EditorKind::Text { .. } | EditorKind::Tags => {
                self.input = candidate;
                self.highlighted = None;
            }
        }
    }

    fn single_match(&self) -> Option<&str> {
        match self.filtered().as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    fn enter(&mut self) -> EditorAction {
        match self.kind {
            EditorKind::Text { .. } => {
                let value = self
                    .highlighted()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| self.input.clone());
                EditorAction::Submit(ArgumentValue::Single(Some(value)))
            }
            EditorKind::Tags => {
                let entered = self
                    .highlighted()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| self.input.clone());
                if entered.is_empty() {
                    return EditorAction::Submit(ArgumentValue::Many(self.selected.clone()));
                }
                self.selected.insert(entered);
                self.input.clear();
                self.highlighted = None;
                EditorAction::Continue
            }
            EditorKind::Choice { multi: false } => match self.highlighted() {
                Some(choice) => EditorAction::Submit(ArgumentValue::Many(
                    std::iter::once(choice.to_string()).collect(),
                )),
                None => EditorAction::Continue,
            },
            EditorKind::Choice { multi: true } => {
                EditorAction::Submit(ArgumentValue::Many(self.selected.clone()))
            }
        }
    }

    fn help(&self) -> &'static str {
        match self.kind {
            EditorKind::Text { .. } => "enter: submit  |  up/down: pick  |  tab: complete  |  esc: cancel",
            EditorKind::Tags => "enter: add value, or submit when empty  |  backspace: remove last  |  esc: cancel",
            EditorKind::Choice { multi: false } => "enter: select  |  up/down: move  |  esc: cancel",
            EditorKind::Choice { multi: true } => "tab: toggle  |  enter: submit  |  up/down: move  |  esc: cancel",
        }
    }
}

/// [`ValueEditor`] drawing on the terminal the menu screen already owns.
#[derive(Debug, Default)]
pub struct TerminalEditor;

impl ValueEditor for TerminalEditor {
    fn edit(&mut self, request: ValueRequest<'_>) -> Result<Option<ArgumentValue>> {
        let mut state = EditorState::from_request(&request);
        debug!(
            "Editing {} {} with {} candidates",
            request.argument.kind(),
            state.title,
            request.candidates.len()
        );

        loop {
            draw(&state)?;

            let Event::Key(key_event) = event::read()? else {
                continue;
            };
            let Some(key) = editor_key(&key_event) else {
                continue;
            };

            match state.handle(key) {
                EditorAction::Continue => {}
                EditorAction::Submit(value) => return Ok(Some(value)),
                EditorAction::Cancel => return Ok(None),
            }
        }
    }
}

fn draw(state: &EditorState) -> Result<()> {
    let mut stdout = stdout();
    let (_, height) = terminal::size()?;

    queue!(
        stdout,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        Print(&state.title),
        SetAttribute(Attribute::Reset),
        cursor::MoveToNextLine(1),
        SetForegroundColor(Color::DarkGrey),
        Print(state.help()),
        SetForegroundColor(Color::Reset),
        cursor::MoveToNextLine(2),
    )?;

    if state.kind == EditorKind::Tags && !state.selected.is_empty() {
        queue!(
            stdout,
            Print(format!("[{}]", state.selected.iter().join("] ["))),
            cursor::MoveToNextLine(1)
        )?;
    }

    queue!(stdout, Print(format!("> {}", state.visible_input())), cursor::MoveToNextLine(1))?;

    let highlighted = state.highlighted;
    let rows = usize::from(height.saturating_sub(6));
    for (index, candidate) in state.filtered().into_iter().enumerate().take(rows) {
        let marker = match state.kind {
            EditorKind::Choice { .. } if state.selected.contains(candidate) => "[x] ",
            EditorKind::Choice { .. } => "[ ] ",
            _ => "  ",
        };

        if highlighted == Some(index) {
            queue!(stdout, SetAttribute(Attribute::Reverse))?;
        }
        queue!(
            stdout,
            Print(marker),
            Print(candidate),
            SetAttribute(Attribute::Reset),
            cursor::MoveToNextLine(1)
        )?;
    }

    stdout.flush()?;
    Ok(())
}
