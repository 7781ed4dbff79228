use crossterm::style::Color;
use rust_menus_core::menu::EntryKind;
use rust_menus_core::navigation::Mode;

/// Trait for picking the terminal color of a menu element
pub trait AsTermColor {
    fn as_crossterm_color(&self) -> Color;
}

impl AsTermColor for EntryKind {
    fn as_crossterm_color(&self) -> Color {
        match self {
            EntryKind::Menu => Color::Blue,
            EntryKind::Argument => Color::Magenta,
            EntryKind::Command => Color::Green,
        }
    }
}

impl AsTermColor for Mode {
    fn as_crossterm_color(&self) -> Color {
        match self {
            Mode::Normal => Color::DarkGreen,
            Mode::Edit => Color::DarkYellow,
        }
    }
}

/// Color of entries whose key does not match the typed input
pub const DIMMED: Color = Color::DarkGrey;
/// Color of set argument values
pub const ACTIVE: Color = Color::Yellow;
