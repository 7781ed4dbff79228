use std::io::{stdout, Write};

use crossterm::cursor::{self, MoveTo};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use itertools::Itertools;
use rust_menus_core::display::{describe_argument, split_key};
use rust_menus_core::error::Result;
use rust_menus_core::menu::{Entry, EntryKind};
use rust_menus_core::navigation::{Mode, Navigator};

use super::colors::{AsTermColor, ACTIVE, DIMMED};
use super::types::Status;

/// One entry line of the menu screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub kind: EntryKind,
    /// Part of the key already typed; empty when the entry does not match.
    pub typed: String,
    pub rest: String,
    pub matching: bool,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub rows: Vec<Row>,
}

fn row(entry: &Entry<'_>, navigator: &Navigator) -> Row {
    let key = entry.key();
    let (typed, rest, matching) = match split_key(key, navigator.buffer()) {
        Some((typed, rest)) => (typed.to_string(), rest.to_string(), true),
        None => (String::new(), key.to_string(), false),
    };

    let (label, description, active) = match entry {
        Entry::Menu(_, menu) => (menu.name.clone(), menu.description.as_str(), false),
        Entry::Argument(_, argument) => {
            let value = navigator.state().values.get(argument.id);
            (
                describe_argument(argument, value),
                argument.description.as_str(),
                value.is_active(),
            )
        }
        Entry::Command(_, command) => (command.name.clone(), command.description.as_str(), false),
    };

    let label = if description.is_empty() {
        label
    } else {
        format!("{label}  {description}")
    };

    Row {
        kind: entry.kind(),
        typed,
        rest,
        matching,
        label,
        active,
    }
}

/// Entries of the current menu in display order, arguments split by group.
#[must_use]
pub fn build_sections(navigator: &Navigator) -> Vec<Section> {
    let entries = navigator.current_menu().entries();
    let title = |entry: &Entry<'_>| match entry {
        Entry::Menu(..) => "Menus".to_string(),
        Entry::Argument(_, argument) => argument
            .group
            .clone()
            .unwrap_or_else(|| "Arguments".to_string()),
        Entry::Command(..) => "Commands".to_string(),
    };

    let mut sections: Vec<Section> = Vec::new();
    for entry in &entries {
        let section_title = title(entry);
        let index = match sections.iter().position(|s| s.title == section_title) {
            Some(index) => index,
            None => {
                sections.push(Section {
                    title: section_title,
                    rows: Vec::new(),
                });
                sections.len() - 1
            }
        };
        sections[index].rows.push(row(entry, navigator));
    }
    sections
}

/// Menu names from the root to the current menu.
#[must_use]
pub fn breadcrumb(navigator: &Navigator) -> String {
    navigator.menu_chain().iter().map(|menu| &menu.name).join(" > ")
}

fn print_header(navigator: &Navigator) -> Result<()> {
    let mut stdout = stdout();
    let (width, _) = terminal::size()?;

    let mode = match navigator.mode() {
        Mode::Normal => "normal",
        Mode::Edit => "edit",
    };
    let content = format!(
        "  {}   |   mode: {mode}   |   ctrl+e: toggle mode   ctrl+r: results   esc: quit",
        breadcrumb(navigator)
    );
    let padding = " ".repeat((width as usize).saturating_sub(content.chars().count()));

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(navigator.mode().as_crossterm_color()),
        Print(content),
        Print(padding),
        SetBackgroundColor(Color::Reset),
        SetForegroundColor(Color::Reset),
        cursor::MoveToNextLine(2),
    )?;

    Ok(())
}

fn print_row(row: &Row, key_width: usize) -> Result<()> {
    let mut stdout = stdout();
    let padding = " ".repeat(key_width.saturating_sub(row.typed.chars().count() + row.rest.chars().count()));

    if row.matching {
        queue!(
            stdout,
            Print("  "),
            SetAttribute(Attribute::Bold),
            SetAttribute(Attribute::Underlined),
            SetForegroundColor(row.kind.as_crossterm_color()),
            Print(&row.typed),
            SetAttribute(Attribute::NoUnderline),
            Print(&row.rest),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(if row.active { ACTIVE } else { Color::Reset }),
        )?;
    } else {
        queue!(stdout, Print("  "), SetForegroundColor(DIMMED), Print(&row.rest))?;
    }

    queue!(
        stdout,
        Print(padding),
        Print("  "),
        Print(&row.label),
        SetAttribute(Attribute::Reset),
        SetForegroundColor(Color::Reset),
        cursor::MoveToNextLine(1),
    )?;

    Ok(())
}

fn print_status(navigator: &Navigator, status: &Status) -> Result<()> {
    let mut stdout = stdout();
    let (_, height) = terminal::size()?;

    queue!(stdout, MoveTo(0, height.saturating_sub(1)), Clear(ClearType::CurrentLine))?;

    match &status.message {
        Some(message) => queue!(
            stdout,
            SetForegroundColor(if status.is_error { Color::Red } else { Color::Reset }),
            Print(message),
            SetForegroundColor(Color::Reset),
        )?,
        None => queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            Print(format!("> {}", navigator.buffer())),
            SetAttribute(Attribute::Reset),
        )?,
    }

    Ok(())
}

/// Redraws the whole menu screen.
pub fn redraw(navigator: &Navigator, status: &Status) -> Result<()> {
    let mut stdout = stdout();
    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(navigator)?;

    let sections = build_sections(navigator);
    let key_width = sections
        .iter()
        .flat_map(|section| &section.rows)
        .map(|row| row.typed.chars().count() + row.rest.chars().count())
        .max()
        .unwrap_or(0);

    if sections.is_empty() {
        queue!(
            stdout,
            SetForegroundColor(DIMMED),
            Print("This menu is empty."),
            SetForegroundColor(Color::Reset),
            cursor::MoveToNextLine(1)
        )?;
    }

    for section in &sections {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            Print(&section.title),
            SetAttribute(Attribute::Reset),
            cursor::MoveToNextLine(1)
        )?;
        for row in &section.rows {
            print_row(row, key_width)?;
        }
        queue!(stdout, cursor::MoveToNextLine(1))?;
    }

    print_status(navigator, status)?;

    stdout.flush()?;
    Ok(())
}
