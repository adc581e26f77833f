//! Color constants and style helpers for consistent TUI theming.

use ratatui::style::{Color, Modifier, Style};

use crate::coordinator::alert::AlertType;

/// Style for column headers and titles.
pub const HEADER: Style = Style::new()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

/// Style for the active sort column header.
pub const HEADER_SORTED: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Style for the focused row.
pub const SELECTED: Style = Style::new()
    .bg(Color::DarkGray)
    .add_modifier(Modifier::BOLD);

/// Border style for whichever surface holds keyboard focus.
pub const FOCUSED_BORDER: Style = Style::new().fg(Color::Yellow);

pub const BORDER: Style = Style::new().fg(Color::White);

pub const MUTED: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::DIM);

pub const LOCKED: Style = Style::new().fg(Color::Magenta);

pub const BUSY: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::ITALIC);

pub const SUCCESS: Style = Style::new().fg(Color::Green);

pub const DANGER: Style = Style::new().fg(Color::Red);

pub const INFO: Style = Style::new().fg(Color::Cyan);

/// Style for an alert of the given type.
pub fn alert(alert_type: AlertType) -> Style {
    match alert_type {
        AlertType::Info => INFO,
        AlertType::Success => SUCCESS,
        AlertType::Danger => DANGER,
    }
}
