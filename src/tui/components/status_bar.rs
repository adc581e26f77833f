//! Bottom status bar showing key binding hints and transient messages.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::Component;
use crate::tui::theme;

/// Which surface currently receives keys; decides the hints shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintMode {
    Table,
    Modal,
    Alert,
}

/// Status bar widget displayed at the bottom of the TUI.
pub struct StatusBar {
    /// Key binding hints as (key, description) pairs.
    pub hints: Vec<(&'static str, &'static str)>,
    /// Transient message shown after the hints.
    message: Option<String>,
    /// Ticks left before the message is cleared.
    message_ttl: u8,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            hints: Self::hints_for(HintMode::Table),
            message: None,
            message_ttl: 0,
        }
    }

    /// Show `msg` for a few seconds.
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_ttl = 20;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hints_for(mode: HintMode) -> Vec<(&'static str, &'static str)> {
        match mode {
            HintMode::Table => vec![
                ("j/k", "Navigate"),
                ("n/t/d", "Sort"),
                ("x", "Delete"),
                ("l", "Lock"),
                ("1-6", "Filter"),
                ("0", "All types"),
                ("r", "Reload"),
                ("q", "Quit"),
            ],
            HintMode::Modal => vec![("y/Enter", "Delete"), ("n/Esc", "Cancel")],
            HintMode::Alert => vec![
                ("Enter/Esc", "Close alert"),
                ("j/k", "Navigate"),
                ("q", "Quit"),
            ],
        }
    }
}

impl Component for StatusBar {
    fn update(&mut self) {
        if self.message_ttl > 0 {
            self.message_ttl -= 1;
            if self.message_ttl == 0 {
                self.message = None;
            }
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let key_style = Style::default()
            .fg(Color::Black)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(Color::Gray);
        let sep_style = Style::default().fg(Color::DarkGray);

        let mut spans = Vec::new();
        for (i, (key, desc)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", sep_style));
            }
            spans.push(Span::styled(format!(" {} ", key), key_style));
            spans.push(Span::styled(format!(" {}", desc), desc_style));
        }
        if let Some(msg) = &self.message {
            spans.push(Span::styled("  ", sep_style));
            spans.push(Span::styled(msg.clone(), theme::DANGER));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
