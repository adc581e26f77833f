//! Delete confirmation dialog, drawn centered over the table.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::Component;
use crate::coordinator::view::ModalView;
use crate::tui::action::Action;
use crate::tui::theme;

#[derive(Default)]
pub struct ConfirmModal {
    view: Option<ModalView>,
}

impl ConfirmModal {
    pub fn set_view(&mut self, view: Option<ModalView>) {
        self.view = view;
    }

    pub fn is_open(&self) -> bool {
        self.view.is_some()
    }
}

impl Component for ConfirmModal {
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        if self.view.is_none() {
            return Action::Noop;
        }
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => Action::ConfirmDelete,
            KeyCode::Char('n') | KeyCode::Esc => Action::CancelDelete,
            _ => Action::Noop,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(view) = &self.view else {
            return;
        };

        let [popup] = Layout::horizontal([Constraint::Percentage(60)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::vertical([Constraint::Length(9)])
            .flex(Flex::Center)
            .areas(popup);

        let lines = vec![
            Line::from(view.body.as_str()),
            Line::from(""),
            Line::styled(view.warning, theme::DANGER),
            Line::from(""),
            Line::from(vec![
                Span::styled(" y ", theme::SELECTED),
                Span::raw(format!(" {}   ", view.confirm_label)),
                Span::styled(" Esc ", theme::SELECTED),
                Span::raw(format!(" {}", view.close_label)),
            ]),
        ];

        let dialog = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::FOCUSED_BORDER)
                .title(format!(" {} ", view.title)),
        );

        frame.render_widget(Clear, popup);
        frame.render_widget(dialog, popup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn test_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn closed_modal_ignores_keys() {
        let mut modal = ConfirmModal::default();
        assert!(!modal.is_open());
        assert_eq!(modal.handle_key_event(test_key(KeyCode::Enter)), Action::Noop);
    }

    #[test]
    fn open_modal_confirms_and_cancels() {
        let mut modal = ConfirmModal::default();
        modal.set_view(Some(ModalView::for_asset("notes.pdf")));

        assert_eq!(
            modal.handle_key_event(test_key(KeyCode::Char('y'))),
            Action::ConfirmDelete
        );
        assert_eq!(
            modal.handle_key_event(test_key(KeyCode::Esc)),
            Action::CancelDelete
        );
        assert_eq!(
            modal.handle_key_event(test_key(KeyCode::Char('q'))),
            Action::Noop
        );
    }
}
