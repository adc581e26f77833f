use std::path::PathBuf;

use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use tokio::sync::mpsc;

use super::action::Action;
use super::components::Component;
use super::components::asset_table::AssetTableComponent;
use super::components::confirm_modal::ConfirmModal;
use super::components::status_alert::StatusAlertComponent;
use super::components::status_bar::{HintMode, StatusBar};
use super::event::{Event, EventHandler};
use super::terminal;
use super::theme;
use crate::config::types::{AppConfig, CourseContext};
use crate::coordinator::focus::FocusTarget;
use crate::coordinator::view::PanelView;
use crate::coordinator::{Effect, ListCoordinator};
use crate::dispatch::{Command, Completion, Dispatcher};
use crate::error::AssetError;
use crate::library::store::AssetStore;
use crate::service::{AssetService, LibraryService};

/// Root application state for the TUI.
///
/// The App owns the store and executes whatever the coordinator asks for:
/// dispatching commands and moving focus between the table and the alert.
pub struct App<S> {
    store: AssetStore,
    coordinator: ListCoordinator,
    dispatcher: Dispatcher<S>,
    completions: mpsc::UnboundedReceiver<Completion>,
    course: CourseContext,
    /// True until the first asset fetch resolves.
    loading: bool,
    /// Focus requested by the last batch of effects, applied after the
    /// components have the latest view.
    pending_focus: Option<FocusTarget>,
    focus: Option<FocusTarget>,
    table: AssetTableComponent,
    modal: ConfirmModal,
    alert: StatusAlertComponent,
    status_bar: StatusBar,
}

impl<S: AssetService> App<S> {
    pub fn new(service: S, config: &AppConfig) -> Self {
        let (dispatcher, completions) = Dispatcher::new(service, config.dispatch_timeout());
        Self {
            store: AssetStore::default(),
            coordinator: ListCoordinator::new(config.course.clone()),
            dispatcher,
            completions,
            course: config.course.clone(),
            loading: true,
            pending_focus: None,
            focus: None,
            table: AssetTableComponent::new(),
            modal: ConfirmModal::default(),
            alert: StatusAlertComponent::default(),
            status_bar: StatusBar::new(),
        }
    }

    /// Kick off the initial asset fetch.
    pub fn start(&mut self) {
        self.dispatcher.dispatch(
            Command::LoadAssets {
                course: self.course.clone(),
            },
            &mut self.store,
        );
    }

    /// Route a key to whichever surface holds it.
    ///
    /// The modal traps every key while open. Otherwise `q` quits, the alert
    /// gets first look at Enter/Esc, and the table handles the rest.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Action {
        let action = if self.modal.is_open() {
            self.modal.handle_key_event(key)
        } else if key.code == KeyCode::Char('q') {
            return Action::Quit;
        } else {
            match self.alert.handle_key_event(key) {
                Action::Noop => {
                    if self.alert.is_focused() {
                        self.alert.set_focused(false);
                        self.table.set_focused(true);
                    }
                    self.table.handle_key_event(key)
                }
                action => action,
            }
        };
        self.perform(action.clone());
        action
    }

    /// Turn an action into a coordinator call and execute its effects.
    fn perform(&mut self, action: Action) {
        let store = &self.store;
        let result = match action {
            Action::Noop | Action::Quit => return,
            Action::Sort(column) => Ok(self.coordinator.request_sort(column, store)),
            Action::RequestDelete(index) => self.coordinator.request_delete(index, store),
            Action::ConfirmDelete => self.coordinator.confirm_delete(store),
            Action::CancelDelete => self.coordinator.cancel_delete(store),
            Action::ToggleLock(id) => self.coordinator.request_lock_toggle(&id, store),
            Action::DismissAlert => self.coordinator.dismiss_alert(store),
            Action::ToggleFilter(kind) => Ok(self.coordinator.toggle_type_filter(kind, store)),
            Action::ClearFilters => Ok(self.coordinator.clear_filters(store)),
            Action::Refresh => Ok(vec![Effect::Dispatch(Command::LoadAssets {
                course: self.course.clone(),
            })]),
        };
        match result {
            Ok(effects) => self.run_effects(effects),
            Err(e) => self.report(e),
        }
        self.sync();
    }

    fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Dispatch(command) => self.dispatcher.dispatch(command, &mut self.store),
                Effect::Focus(target) => self.pending_focus = Some(target),
            }
        }
    }

    fn report(&mut self, err: AssetError) {
        tracing::warn!("{}", err);
        self.status_bar.set_message(err.to_string());
    }

    /// Apply a finished remote operation and bring the panel up to date.
    pub fn on_completion(&mut self, completion: Completion) {
        let fetch = matches!(completion, Completion::Loaded { .. });
        completion.apply(&mut self.store);
        if let (true, Some(reason)) = (fetch, self.store.load_error()) {
            let msg = format!("Could not load assets: {}", reason);
            self.status_bar.set_message(msg);
        }
        self.sync();
    }

    pub fn on_tick(&mut self) {
        self.status_bar.update();
    }

    /// Let the coordinator see the latest status, then push fresh views
    /// into the components and apply any pending focus move.
    fn sync(&mut self) {
        match self.coordinator.observe(&self.store) {
            Ok(effects) => self.run_effects(effects),
            Err(e) => self.report(e),
        }

        match self.coordinator.view(&self.store) {
            PanelView::Loading => self.loading = true,
            PanelView::Ready {
                table,
                modal,
                alert,
            } => {
                self.loading = false;
                self.table.set_view(table);
                self.table.set_filter(self.store.params().types.iter().copied());
                self.modal.set_view(modal);
                self.alert.set_view(alert);
            }
        }

        if let Some(target) = self.pending_focus.take() {
            self.apply_focus(target);
        }

        let mode = if self.modal.is_open() {
            HintMode::Modal
        } else if self.alert.is_open() {
            HintMode::Alert
        } else {
            HintMode::Table
        };
        self.status_bar.hints = StatusBar::hints_for(mode);
    }

    fn apply_focus(&mut self, target: FocusTarget) {
        match &target {
            FocusTarget::Control(handle) => {
                self.alert.set_focused(false);
                if !self.table.focus_control(handle) {
                    self.table.focus_container();
                }
            }
            FocusTarget::StatusAlert => {
                self.table.set_focused(false);
                self.alert.set_focused(true);
            }
            FocusTarget::Container => {
                self.alert.set_focused(false);
                self.table.focus_container();
            }
        }
        tracing::debug!(?target, "Focus moved");
        self.focus = Some(target);
    }

    /// Render the entire application UI.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let alert_height = if self.alert.is_open() { 3 } else { 0 };

        let [title, alert, content, status] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(alert_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let heading = Paragraph::new(Line::styled(self.course.name.as_str(), theme::HEADER))
            .block(Block::default().borders(Borders::ALL).title(" assetdesk "));
        frame.render_widget(heading, title);

        if self.alert.is_open() {
            self.alert.render(frame, alert);
        }

        if self.loading {
            let placeholder = Paragraph::new(Line::styled("Loading....", theme::MUTED))
                .block(Block::default().borders(Borders::ALL).title(" Assets "));
            frame.render_widget(placeholder, content);
        } else {
            self.table.render(frame, content);
        }

        self.status_bar.render(frame, status);

        if self.modal.is_open() {
            self.modal.render(frame, content);
        }
    }
}

/// Run the main TUI event loop.
///
/// Initializes the terminal, starts the asset fetch, then loops over
/// terminal events and operation completions until the user quits.
/// Terminal is restored on exit.
pub async fn run_app(config: AppConfig, data_dir: PathBuf) -> Result<(), AssetError> {
    let mut terminal = terminal::init();
    let mut events = EventHandler::new(config.tick_rate(), config.render_rate());
    let mut app = App::new(LibraryService::new(data_dir), &config);
    app.start();

    let result = loop {
        tokio::select! {
            event = events.next() => match event {
                Event::Render => {
                    if let Err(e) = terminal.draw(|frame| app.render(frame)) {
                        break Err(AssetError::from(e));
                    }
                }
                Event::Tick => app.on_tick(),
                Event::Key(key) => {
                    if app.handle_key_event(key) == Action::Quit {
                        break Ok(());
                    }
                }
                Event::Resize(_, _) => {
                    // ratatui handles resize automatically on next draw
                }
                Event::Closed => break Ok(()),
            },
            Some(completion) = app.completions.recv() => app.on_completion(completion),
        }
    };

    terminal::restore();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinator::workflow::Workflow;
    use crate::dispatch::tests::FakeService;
    use crate::library::asset::{SortKey, SortParams, Direction};
    use crate::library::store::tests::asset;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    /// App with `names` loaded and sorted by name ascending.
    fn app_with(service: FakeService, names: &[&str]) -> App<FakeService> {
        let mut app = App::new(service, &AppConfig::default());
        app.store.load(
            names
                .iter()
                .enumerate()
                .map(|(i, n)| asset(n, "image/png", i as i64))
                .collect(),
        );
        app.store.update_sort(SortParams {
            key: SortKey::DisplayName,
            direction: Direction::Asc,
        });
        app.sync();
        app
    }

    async fn settle(app: &mut App<FakeService>) {
        let completion = app.completions.recv().await.unwrap();
        app.on_completion(completion);
    }

    fn focused_row(app: &App<FakeService>) -> Option<String> {
        match &app.focus {
            Some(FocusTarget::Control(handle)) => Some(handle.asset().to_string()),
            _ => None,
        }
    }

    #[tokio::test]
    async fn starts_loading_until_fetch_resolves() {
        let mut app = App::new(FakeService::Ok, &AppConfig::default());
        app.start();
        app.sync();
        assert!(app.loading);

        settle(&mut app).await;
        assert!(!app.loading);
        assert_eq!(app.store.assets().len(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_shows_message() {
        let mut app = App::new(FakeService::Fail, &AppConfig::default());
        app.start();
        settle(&mut app).await;
        assert!(!app.loading);
        assert!(app.status_bar.message().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn quit_action() {
        let mut app = app_with(FakeService::Ok, &["a.png"]);
        let action = app.handle_key_event(key_event(KeyCode::Char('q')));
        assert_eq!(action, Action::Quit);
    }

    #[tokio::test]
    async fn cancel_returns_focus_to_row() {
        let mut app = app_with(FakeService::Ok, &["a.png", "b.png", "c.png"]);
        app.handle_key_event(key_event(KeyCode::Down));
        app.handle_key_event(key_event(KeyCode::Down));
        app.handle_key_event(key_event(KeyCode::Char('x')));
        assert!(app.modal.is_open());

        // 'q' does not escape the modal
        assert_eq!(app.handle_key_event(key_event(KeyCode::Char('q'))), Action::Noop);

        app.handle_key_event(key_event(KeyCode::Esc));
        assert!(!app.modal.is_open());
        assert_eq!(focused_row(&app).as_deref(), Some(app.store.assets()[1].id.as_str()));
        assert_eq!(app.table.selected(), Some(1));
    }

    #[tokio::test]
    async fn confirmed_delete_reports_and_refocuses_previous_row() {
        let mut app = app_with(FakeService::Ok, &["a.png", "b.png", "c.png"]);
        app.handle_key_event(key_event(KeyCode::Down));
        app.handle_key_event(key_event(KeyCode::Down));
        app.handle_key_event(key_event(KeyCode::Char('x')));
        app.handle_key_event(key_event(KeyCode::Char('y')));

        assert!(matches!(app.coordinator.workflow(), Workflow::Deleting { .. }));
        assert_eq!(app.focus, Some(FocusTarget::StatusAlert));
        assert_eq!(app.alert.message(), Some("Processing"));

        settle(&mut app).await;
        assert_eq!(app.alert.message(), Some("b.png has been deleted."));
        assert_eq!(app.store.assets().len(), 2);

        app.handle_key_event(key_event(KeyCode::Enter));
        assert!(!app.alert.is_open());
        assert!(app.store.status().is_none());
        assert_eq!(focused_row(&app).as_deref(), Some(app.store.assets()[0].id.as_str()));
        assert_eq!(app.table.selected(), Some(0));
    }

    #[tokio::test]
    async fn deleting_last_asset_focuses_container() {
        let mut app = app_with(FakeService::Ok, &["a.png"]);
        app.handle_key_event(key_event(KeyCode::Down));
        app.handle_key_event(key_event(KeyCode::Char('x')));
        app.handle_key_event(key_event(KeyCode::Enter));
        settle(&mut app).await;

        app.handle_key_event(key_event(KeyCode::Esc));
        assert_eq!(app.focus, Some(FocusTarget::Container));
        assert_eq!(app.table.selected(), None);
        assert!(!app.loading);
    }

    #[tokio::test]
    async fn failed_delete_keeps_row() {
        let mut app = app_with(FakeService::Fail, &["a.png", "b.png"]);
        app.handle_key_event(key_event(KeyCode::Down));
        app.handle_key_event(key_event(KeyCode::Char('x')));
        app.handle_key_event(key_event(KeyCode::Char('y')));
        settle(&mut app).await;

        assert_eq!(app.alert.message(), Some("Unable to delete a.png."));
        assert_eq!(app.store.assets().len(), 2);
    }

    #[tokio::test]
    async fn lock_failure_opens_alert() {
        let mut app = app_with(FakeService::Fail, &["a.png", "b.png"]);
        app.handle_key_event(key_event(KeyCode::Down));
        app.handle_key_event(key_event(KeyCode::Char('l')));
        assert!(app.store.assets()[0].is_loading(crate::library::asset::Loading::Lock));

        // second toggle while pending is refused
        app.handle_key_event(key_event(KeyCode::Char('l')));
        assert!(app.status_bar.message().is_some());

        settle(&mut app).await;
        assert_eq!(app.alert.message(), Some("Failed to toggle lock for a.png"));
        assert_eq!(app.focus, Some(FocusTarget::StatusAlert));
    }

    #[tokio::test]
    async fn sort_key_flips_direction() {
        let mut app = app_with(FakeService::Ok, &["a.png", "b.png"]);
        app.handle_key_event(key_event(KeyCode::Char('n')));
        assert_eq!(app.store.params().sort.direction, Direction::Desc);
        assert_eq!(app.store.assets()[0].display_name, "b.png");

        app.handle_key_event(key_event(KeyCode::Char('d')));
        assert_eq!(app.store.params().sort.key, SortKey::DateAdded);
        assert_eq!(app.store.params().sort.direction, Direction::Desc);
    }

    #[tokio::test]
    async fn delete_without_selection_is_ignored() {
        let mut app = app_with(FakeService::Ok, &["a.png"]);
        let action = app.handle_key_event(key_event(KeyCode::Char('x')));
        assert_eq!(action, Action::Noop);
        assert!(!app.modal.is_open());
    }
}
