//! Component trait and TUI view modules.
//!
//! Each surface of the asset panel implements the `Component` trait,
//! providing key event handling and rendering. Components hold only the
//! render descriptions the coordinator hands them.

pub mod asset_table;
pub mod confirm_modal;
pub mod status_alert;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::crossterm::event::KeyEvent;

use super::action::Action;

/// Trait for TUI view components.
pub trait Component {
    /// Handle a key press event. Returns an `Action` to be processed
    /// by the App's main loop.
    ///
    /// Default: ignore the key event and return `Action::Noop`.
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        let _ = key;
        Action::Noop
    }

    /// Periodic state update, called on each tick event.
    fn update(&mut self) {}

    /// Render the component into the given area of the frame.
    fn render(&self, frame: &mut Frame, area: Rect);
}
