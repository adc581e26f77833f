//! Non-modal status alert shown above the table while a delete result or
//! lock failure is being reported.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::Component;
use crate::coordinator::alert::AlertView;
use crate::tui::action::Action;
use crate::tui::theme;

#[derive(Default)]
pub struct StatusAlertComponent {
    view: Option<AlertView>,
    focused: bool,
}

impl StatusAlertComponent {
    pub fn set_view(&mut self, view: Option<AlertView>) {
        if view.is_none() {
            self.focused = false;
        }
        self.view = view;
    }

    pub fn is_open(&self) -> bool {
        self.view.is_some()
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn message(&self) -> Option<&str> {
        self.view.as_ref().map(|v| v.message.as_str())
    }
}

impl Component for StatusAlertComponent {
    /// Enter or Esc close the alert. Anything else falls through to the table.
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        if self.view.is_none() {
            return Action::Noop;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Esc => Action::DismissAlert,
            _ => Action::Noop,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(view) = &self.view else {
            return;
        };
        let style = theme::alert(view.alert_type);
        let border = if self.focused {
            theme::FOCUSED_BORDER
        } else {
            style
        };
        let line = Line::from(vec![
            Span::styled(view.message.as_str(), style),
            Span::styled("  (Enter to close)", theme::MUTED),
        ]);
        let alert = Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(format!(" {} ", view.alert_type)),
        );
        frame.render_widget(alert, area);
    }
}
