//! Asset table component.
//!
//! Renders the coordinator's `TableView` in a scrollable table. Row
//! selection doubles as keyboard focus on a row's delete control; with no
//! row selected, focus sits on the table itself.

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use super::Component;
use crate::coordinator::focus::ControlHandle;
use crate::coordinator::view::{Column, ColumnView, LockControl, Preview, RowView, TableView};
use crate::library::asset::{AssetKind, Direction};
use crate::tui::action::Action;
use crate::tui::theme;

pub struct AssetTableComponent {
    columns: Vec<ColumnView>,
    rows: Vec<RowView>,
    table_state: TableState,
    /// True while keyboard focus belongs to the table (not the alert).
    focused: bool,
    /// Type filter summary for the title.
    filter: String,
}

impl AssetTableComponent {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            table_state: TableState::default(),
            focused: true,
            filter: String::new(),
        }
    }

    /// Replace the table contents, keeping the selection on the same asset
    /// where it still exists.
    pub fn set_view(&mut self, view: TableView) {
        let selected_id = self.selected_row().map(|r| r.id.clone());
        self.columns = view.columns;
        self.rows = view.rows;

        let Some(id) = selected_id else {
            return;
        };
        match self.rows.iter().position(|r| r.id == id) {
            Some(pos) => self.table_state.select(Some(pos)),
            None if self.rows.is_empty() => self.table_state.select(None),
            None => {
                let last = self.rows.len() - 1;
                let sel = self.table_state.selected().unwrap_or(0).min(last);
                self.table_state.select(Some(sel));
            }
        }
    }

    pub fn set_filter(&mut self, types: impl IntoIterator<Item = AssetKind>) {
        self.filter = types
            .into_iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(", ");
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Move focus to the delete control behind `handle`.
    ///
    /// Returns false when the handle's asset is no longer listed.
    pub fn focus_control(&mut self, handle: &ControlHandle) -> bool {
        self.focused = true;
        match self.rows.iter().position(|r| &r.delete.handle == handle) {
            Some(pos) => {
                self.table_state.select(Some(pos));
                true
            }
            None => false,
        }
    }

    /// Focus the table as a whole, with no row selected.
    pub fn focus_container(&mut self) {
        self.focused = true;
        self.table_state.select(None);
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    fn selected_row(&self) -> Option<&RowView> {
        self.table_state.selected().and_then(|i| self.rows.get(i))
    }

    fn header_cell(column: &ColumnView) -> Cell<'static> {
        if column.hide_header {
            return Cell::from("");
        }
        match column.sorted {
            Some(direction) => {
                let arrow = match direction {
                    Direction::Asc => "▲",
                    Direction::Desc => "▼",
                };
                Cell::from(format!("{} {}", column.label, arrow)).style(theme::HEADER_SORTED)
            }
            None if column.sortable => Cell::from(column.label).style(theme::HEADER),
            None => Cell::from(column.label).style(theme::MUTED),
        }
    }

    fn row_cells(row: &RowView) -> Row<'static> {
        let preview = match &row.preview {
            Preview::Image { url, .. } => Span::raw(url.clone()),
            Preview::Unavailable => Span::styled(row.preview.text().to_string(), theme::MUTED),
        };
        let lock = match &row.lock {
            LockControl::Toggle { locked: true, .. } => Span::styled("[locked]", theme::LOCKED),
            LockControl::Toggle { locked: false, .. } => Span::raw("[unlocked]"),
            LockControl::Busy { .. } => Span::styled("[updating]", theme::BUSY),
        };
        Row::new(vec![
            Cell::from(preview),
            Cell::from(row.display_name.clone()),
            Cell::from(row.content_type.clone()),
            Cell::from(row.date_added.clone()),
            Cell::from(Span::styled("[delete]", theme::DANGER)),
            Cell::from(lock),
        ])
    }
}

impl Component for AssetTableComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.rows.is_empty() {
                    let current = self.table_state.selected().unwrap_or(0);
                    let prev = if current == 0 {
                        self.rows.len() - 1
                    } else {
                        current - 1
                    };
                    self.table_state.select(Some(prev));
                }
                Action::Noop
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.rows.is_empty() {
                    let next = match self.table_state.selected() {
                        Some(current) => (current + 1) % self.rows.len(),
                        None => 0,
                    };
                    self.table_state.select(Some(next));
                }
                Action::Noop
            }
            KeyCode::Char('n') => Action::Sort(Column::DisplayName),
            KeyCode::Char('t') => Action::Sort(Column::ContentType),
            KeyCode::Char('d') => Action::Sort(Column::DateAdded),
            KeyCode::Char('x') | KeyCode::Delete => match self.table_state.selected() {
                Some(index) => Action::RequestDelete(index),
                None => Action::Noop,
            },
            KeyCode::Char('l') => match self.selected_row() {
                Some(row) => Action::ToggleLock(row.id.clone()),
                None => Action::Noop,
            },
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                AssetKind::ALL
                    .get(index)
                    .map_or(Action::Noop, |&kind| Action::ToggleFilter(kind))
            }
            KeyCode::Char('0') => Action::ClearFilters,
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::Noop,
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            theme::FOCUSED_BORDER
        } else {
            theme::BORDER
        };
        let mut title = format!(" Assets ({}) ", self.rows.len());
        if !self.filter.is_empty() {
            title = format!(" Assets ({}) [{}] ", self.rows.len(), self.filter);
        }
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title);
        if let Some(row) = self.selected_row() {
            block = block.title_bottom(format!(" {} | {} ", row.delete.label, row.lock.label()));
        }

        if self.rows.is_empty() {
            let text = if self.filter.is_empty() {
                "No assets in this course"
            } else {
                "No assets match the type filter"
            };
            let empty = Paragraph::new(Line::styled(text, theme::MUTED)).block(block);
            frame.render_widget(empty, area);
            return;
        }

        let header = Row::new(self.columns.iter().map(Self::header_cell)).height(1);
        let rows: Vec<Row> = self.rows.iter().map(Self::row_cells).collect();

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Length(18),
                Constraint::Length(16),
                Constraint::Length(8),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(theme::SELECTED);

        let mut table_state = self.table_state.clone();
        frame.render_stateful_widget(table, area, &mut table_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CourseContext;
    use crate::coordinator::view::PanelView;
    use crate::coordinator::ListCoordinator;
    use crate::library::store::tests::asset;
    use crate::library::store::AssetStore;
    use ratatui::crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};

    fn test_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    fn table_for(names: &[&str]) -> (AssetTableComponent, ListCoordinator, AssetStore) {
        let store = AssetStore::new(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| asset(n, "image/png", i as i64))
                .collect(),
        );
        let mut coordinator = ListCoordinator::new(CourseContext::default());
        let mut table = AssetTableComponent::new();
        if let PanelView::Ready { table: view, .. } = coordinator.view(&store) {
            table.set_view(view);
        }
        (table, coordinator, store)
    }

    #[test]
    fn starts_without_selection() {
        let (table, _, _) = table_for(&["a.png", "b.png"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.selected(), None);
    }

    #[test]
    fn j_k_navigation_wraps() {
        let (mut table, _, _) = table_for(&["a.png", "b.png"]);

        table.handle_key_event(test_key(KeyCode::Char('j')));
        assert_eq!(table.selected(), Some(0));
        table.handle_key_event(test_key(KeyCode::Char('j')));
        assert_eq!(table.selected(), Some(1));
        table.handle_key_event(test_key(KeyCode::Char('j')));
        assert_eq!(table.selected(), Some(0));
        table.handle_key_event(test_key(KeyCode::Char('k')));
        assert_eq!(table.selected(), Some(1));
    }

    #[test]
    fn delete_key_needs_a_selection() {
        let (mut table, _, _) = table_for(&["a.png", "b.png"]);
        assert_eq!(
            table.handle_key_event(test_key(KeyCode::Char('x'))),
            Action::Noop
        );

        table.handle_key_event(test_key(KeyCode::Down));
        table.handle_key_event(test_key(KeyCode::Down));
        assert_eq!(
            table.handle_key_event(test_key(KeyCode::Delete)),
            Action::RequestDelete(1)
        );
    }

    #[test]
    fn sort_and_filter_keys() {
        let (mut table, _, _) = table_for(&["a.png"]);
        assert_eq!(
            table.handle_key_event(test_key(KeyCode::Char('n'))),
            Action::Sort(Column::DisplayName)
        );
        assert_eq!(
            table.handle_key_event(test_key(KeyCode::Char('1'))),
            Action::ToggleFilter(AssetKind::Images)
        );
        assert_eq!(
            table.handle_key_event(test_key(KeyCode::Char('0'))),
            Action::ClearFilters
        );
    }

    #[test]
    fn focus_control_selects_matching_row() {
        let (mut table, coordinator, store) = table_for(&["a.png", "b.png", "c.png"]);
        let id = store.assets()[2].id.clone();
        let handle = coordinator.registry().get(&id).cloned().unwrap();

        assert!(table.focus_control(&handle));
        assert_eq!(table.selected(), Some(2));

        table.focus_container();
        assert_eq!(table.selected(), None);
    }

    #[test]
    fn selection_follows_asset_across_updates() {
        let (mut table, mut coordinator, mut store) = table_for(&["a.png", "b.png", "c.png"]);
        table.handle_key_event(test_key(KeyCode::Down));
        table.handle_key_event(test_key(KeyCode::Down));
        let selected = store.assets()[1].id.clone();

        store.update_sort(crate::library::asset::SortParams {
            key: crate::library::asset::SortKey::DateAdded,
            direction: Direction::Asc,
        });
        if let PanelView::Ready { table: view, .. } = coordinator.view(&store) {
            table.set_view(view);
        }

        let pos = store.assets().iter().position(|a| a.id == selected);
        assert_eq!(table.selected(), pos);
    }
}
