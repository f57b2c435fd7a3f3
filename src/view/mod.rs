//! Terminal front end: event loop, input routing, drawing (impure shell).

pub mod constants;
mod help;
pub mod layout;
pub mod pagination_bar;
pub mod post_detail;
pub mod post_form;
pub mod post_list;
pub mod search_bar;
pub mod styles;

pub use help::render_help_overlay;
pub use layout::{render_layout, FrameLayout};
pub use pagination_bar::{hit_test, PlacedControl};
pub use search_bar::SearchBar;
pub use styles::{ColorConfig, Palette};

use crate::config::KeyBindings;
use crate::dispatch::{Dispatcher, EventReceiver};
use crate::model::KeyAction;
use crate::state::{AppState, Command};
use constants::EVENT_TICK;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, info, warn};

/// Terminal failures.
#[derive(Debug, Error)]
pub enum TuiError {
    /// Reading input or writing the frame failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// How long to wait for terminal input before the next loop turn.
///
/// Never longer than [`EVENT_TICK`], so service events are drained
/// promptly, and never past a pending search deadline.
pub fn poll_timeout(until_tick: Option<Duration>) -> Duration {
    until_tick.map_or(EVENT_TICK, |remaining| remaining.min(EVENT_TICK))
}

/// Event loop state around an [`AppState`].
///
/// `B` is crossterm in production and `TestBackend` in tests.
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    dispatcher: Dispatcher,
    events: EventReceiver,
    key_bindings: KeyBindings,
    palette: Palette,
    /// Geometry of the last drawn frame (for mouse click detection)
    last_layout: FrameLayout,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Take over stdout: raw mode, alternate screen, mouse capture.
    pub fn new(
        app_state: AppState,
        dispatcher: Dispatcher,
        events: EventReceiver,
        palette: Palette,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::with_terminal(
            terminal, app_state, dispatcher, events, palette,
        ))
    }

    /// Loop until quit.
    ///
    /// Returns when the user quits (q or Ctrl+C). Redraws only after
    /// input, a service event, or a change of the search debounce.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.start();
        self.draw()?;

        loop {
            let mut dirty = false;
            let timeout = poll_timeout(self.app_state.time_until_tick(Instant::now()));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        dirty = true;
                    }
                    Event::Mouse(mouse) => dirty = self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                        dirty = true;
                    }
                    _ => {}
                }
            }

            dirty |= self.pump(Instant::now());
            if self.app_state.should_quit() {
                return Ok(());
            }
            if dirty {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Wrap an existing terminal. Does not touch terminal modes.
    pub fn with_terminal(
        terminal: Terminal<B>,
        app_state: AppState,
        dispatcher: Dispatcher,
        events: EventReceiver,
        palette: Palette,
    ) -> Self {
        Self {
            terminal,
            app_state,
            dispatcher,
            events,
            key_bindings: KeyBindings::default(),
            palette,
            last_layout: FrameLayout::default(),
        }
    }

    /// Application state.
    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Underlying terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Build the first screen and issue its fetches.
    pub fn start(&mut self) {
        let commands = self.app_state.start();
        self.dispatch(commands);
    }

    fn dispatch(&self, commands: Vec<Command>) {
        self.dispatcher.dispatch_all(commands);
    }

    /// Settle due deadlines and apply finished commands.
    ///
    /// Returns whether anything visible may have changed.
    pub fn pump(&mut self, now: Instant) -> bool {
        let was_pending = self.app_state.time_until_tick(now).is_some();
        let commands = self.app_state.tick(now);
        let mut changed = !commands.is_empty();
        self.dispatch(commands);
        changed |= was_pending != self.app_state.time_until_tick(now).is_some();

        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    let follow_up = self.app_state.apply(event);
                    self.dispatch(follow_up);
                    changed = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("Service event channel closed");
                    break;
                }
            }
        }
        changed
    }

    /// Handle one keyboard event. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let commands = self.route_key(key, Instant::now());
        self.dispatch(commands);
        self.app_state.should_quit()
    }

    fn route_key(&mut self, key: KeyEvent, now: Instant) -> Vec<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.app_state.handle_action(KeyAction::Quit);
        }

        if !self.app_state.help_visible && self.app_state.pending_delete().is_some() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return self.app_state.confirm_delete(true),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    return self.app_state.confirm_delete(false)
                }
                _ => {}
            }
        }

        if self.app_state.is_search_focused() {
            self.search_key(key, now);
            return Vec::new();
        }

        if !self.app_state.help_visible {
            if let Some(commands) = self.form_key(key) {
                return commands;
            }
        }

        match self.key_bindings.get(key) {
            Some(action) => self.app_state.handle_action(action),
            None => Vec::new(),
        }
    }

    /// Keys while the search bar has focus. Edits settle on a later tick.
    fn search_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Tab | KeyCode::Down) {
            self.app_state.blur_search();
            return;
        }
        let Some(search) = self.app_state.search_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char('u') if ctrl => {
                search.clear(now);
            }
            KeyCode::Char(ch) if !ctrl => {
                search.insert_char(ch, now);
            }
            KeyCode::Backspace => {
                search.backspace(now);
            }
            KeyCode::Delete => {
                search.delete(now);
            }
            KeyCode::Left => search.cursor_left(),
            KeyCode::Right => search.cursor_right(),
            KeyCode::Home => search.home(),
            KeyCode::End => search.end(),
            _ => {}
        }
    }

    /// Keys on a form screen. `None` when no form is shown or the key
    /// falls through to the bindings.
    fn form_key(&mut self, key: KeyEvent) -> Option<Vec<Command>> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if key.code == KeyCode::Char('s') && ctrl {
            self.app_state.form_mut()?;
            return Some(self.app_state.submit_form());
        }

        let form = self.app_state.form_mut()?;
        match key.code {
            KeyCode::Esc => return None,
            KeyCode::Tab => form.focus_next(),
            KeyCode::BackTab => form.focus_prev(),
            KeyCode::Enter => form.newline(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(ch) if !ctrl => form.insert_char(ch),
            _ => return None,
        }
        Some(Vec::new())
    }

    /// Handle one mouse event. Returns whether state may have changed.
    ///
    /// Ignored while the help overlay or a delete confirmation is up.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if self.app_state.help_visible || self.app_state.pending_delete().is_some() {
            return false;
        }
        let commands = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match hit_test(&self.last_layout.page_controls, mouse.column, mouse.row) {
                    Some(control) => {
                        debug!(?control, "Page control clicked");
                        self.app_state.select_page_control(control)
                    }
                    None => return false,
                }
            }
            MouseEventKind::ScrollDown => self.app_state.handle_action(KeyAction::SelectNext),
            MouseEventKind::ScrollUp => self.app_state.handle_action(KeyAction::SelectPrev),
            _ => return false,
        };
        self.dispatch(commands);
        true
    }

    /// Render the current frame and remember its geometry.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let palette = &self.palette;
        let mut layout = FrameLayout::default();
        self.terminal.draw(|frame| {
            layout = render_layout(frame, state, palette);
        })?;
        self.last_layout = layout;
        Ok(())
    }
}

/// Initialize and run the TUI application.
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// on exit, including after an error.
///
/// Expects tracing to be initialized already.
pub fn run(
    app_state: AppState,
    dispatcher: Dispatcher,
    events: EventReceiver,
    palette: Palette,
) -> Result<(), TuiError> {
    let mut app = TuiApp::new(app_state, dispatcher, events, palette)?;
    info!(location = %app.app_state().navigation().current(), "TUI started");

    let result = app.run();
    restore_terminal()?;
    result
}

/// Hand the terminal back to the shell.
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryPostService;
    use crate::model::{Post, PostId};
    use crate::navigation::{Location, Route};
    use crate::state::{LoadStatus, Screen};
    use ratatui::backend::TestBackend;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    /// Whether a command issued by `state` is still outstanding.
    fn is_busy(state: &AppState) -> bool {
        let deleting = state
            .posts()
            .posts()
            .iter()
            .any(|post| state.posts().is_deleting(post.id));
        let screen_busy = match state.screen() {
            Screen::Detail(detail) | Screen::Edit { detail, form: None } => {
                matches!(detail.status(), LoadStatus::Loading)
            }
            Screen::New(form) | Screen::Edit { form: Some(form), .. } => form.is_submitting(),
            Screen::List(_) | Screen::NotFound => false,
        };
        state.posts().is_loading() || deleting || screen_busy
    }

    struct Harness {
        app: TuiApp<TestBackend>,
        runtime: tokio::runtime::Runtime,
    }

    impl Harness {
        fn at(location: &str) -> Self {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let posts = (1..=25)
                .map(|n| Post::new(PostId::new(n), format!("Post {n}"), "Body"))
                .collect();
            let service = Arc::new(MemoryPostService::with_posts(posts, 10));
            let (dispatcher, events) = Dispatcher::new(service, runtime.handle().clone());
            let state = AppState::new(Location::parse(location), Duration::from_millis(500));
            let terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
            let mut app =
                TuiApp::with_terminal(terminal, state, dispatcher, events, Palette::default());
            app.start();
            let mut harness = Self { app, runtime };
            harness.settle();
            harness
        }

        /// Pump until outstanding commands have reported back.
        fn settle(&mut self) {
            for _ in 0..200 {
                self.app.pump(Instant::now());
                if !is_busy(self.app.app_state()) {
                    return;
                }
                self.runtime
                    .block_on(async { tokio::time::sleep(Duration::from_millis(5)).await });
            }
            panic!("commands did not complete");
        }

        fn press(&mut self, event: KeyEvent) -> bool {
            let quit = self.app.handle_key(event);
            self.settle();
            quit
        }
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn poll_timeout_never_exceeds_tick() {
        assert_eq!(poll_timeout(None), EVENT_TICK);
        assert_eq!(poll_timeout(Some(Duration::from_secs(3))), EVENT_TICK);
        assert_eq!(
            poll_timeout(Some(Duration::from_millis(7))),
            Duration::from_millis(7)
        );
    }

    #[test]
    fn start_loads_first_page() {
        let harness = Harness::at("/posts");
        let posts = harness.app.app_state().posts();
        assert_eq!(posts.posts().len(), 10);
        assert_eq!(posts.total_posts(), 25);
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut harness = Harness::at("/posts");
        assert!(harness.press(key(KeyCode::Char('q'))));

        let mut harness = Harness::at("/posts");
        assert!(harness.press(ctrl('c')));
    }

    #[test]
    fn l_moves_to_next_page() {
        let mut harness = Harness::at("/posts");
        harness.press(key(KeyCode::Char('l')));

        let state = harness.app.app_state();
        assert_eq!(state.current_page().get(), 2);
        assert_eq!(state.posts().posts()[0].title, "Post 15");
    }

    #[test]
    fn typing_in_search_bar_does_not_trigger_bindings() {
        let mut harness = Harness::at("/posts");
        harness.press(key(KeyCode::Char('/')));
        harness.press(key(KeyCode::Char('q')));

        let state = harness.app.app_state();
        assert!(!state.should_quit());
        assert!(state.is_search_focused());
        assert_eq!(state.search_term(), "", "edit has not settled yet");
    }

    #[test]
    fn settled_search_fetches_matches() {
        let mut harness = Harness::at("/posts");
        harness.press(key(KeyCode::Char('/')));
        for ch in "post 2".chars() {
            harness.app.handle_key(key(KeyCode::Char(ch)));
        }
        harness.app.handle_key(key(KeyCode::Enter));

        harness.app.pump(Instant::now() + Duration::from_secs(1));
        harness.settle();

        let state = harness.app.app_state();
        assert_eq!(state.search_term(), "post 2");
        assert!(!state.is_search_focused());
        // "Post 2" and "Post 20".."Post 25"
        assert_eq!(state.posts().total_posts(), 7);
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut harness = Harness::at("/posts");
        harness.press(key(KeyCode::Char('d')));
        assert!(harness.app.app_state().pending_delete().is_some());

        harness.press(key(KeyCode::Char('y')));

        let posts = harness.app.app_state().posts();
        assert_eq!(posts.total_posts(), 24);
        assert!(posts.posts().iter().all(|p| p.id != PostId::new(25)));
    }

    #[test]
    fn declining_delete_keeps_post() {
        let mut harness = Harness::at("/posts");
        harness.press(key(KeyCode::Char('d')));
        harness.press(key(KeyCode::Char('n')));

        let state = harness.app.app_state();
        assert_eq!(state.pending_delete(), None);
        assert_eq!(state.posts().total_posts(), 25);
    }

    #[test]
    fn form_captures_text_and_saves_with_ctrl_s() {
        let mut harness = Harness::at("/posts/new");
        for ch in "Fresh".chars() {
            harness.press(key(KeyCode::Char(ch)));
        }
        harness.press(key(KeyCode::Tab));
        harness.press(key(KeyCode::Char('q')));
        harness.press(ctrl('s'));

        let state = harness.app.app_state();
        assert!(!state.should_quit());
        assert_eq!(state.route(), Route::Detail(PostId::new(26)));
        match state.screen() {
            Screen::Detail(detail) => {
                let post = detail.post().unwrap();
                assert_eq!(post.title, "Fresh");
                assert_eq!(post.body, "q");
            }
            other => panic!("expected detail, got {other:?}"),
        }
    }

    #[test]
    fn escape_leaves_form() {
        let mut harness = Harness::at("/posts");
        harness.press(key(KeyCode::Char('n')));
        assert_eq!(harness.app.app_state().route(), Route::New);

        harness.press(key(KeyCode::Esc));
        assert_eq!(harness.app.app_state().route(), Route::List);
    }

    fn click_page(harness: &mut Harness, number: u32) -> bool {
        harness.app.draw().unwrap();
        let target = harness
            .app
            .last_layout
            .page_controls
            .iter()
            .find(|p| matches!(p.control, crate::state::PageControl::Page { number: n, .. } if n == number))
            .copied()
            .unwrap();

        let changed = harness.app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: target.area.x,
            row: target.area.y,
            modifiers: KeyModifiers::NONE,
        });
        harness.settle();
        changed
    }

    #[test]
    fn clicking_page_button_changes_page() {
        let mut harness = Harness::at("/posts");

        assert!(click_page(&mut harness, 3));
        assert_eq!(harness.app.app_state().current_page().get(), 3);
    }

    #[test]
    fn clicks_are_ignored_while_confirming_delete() {
        let mut harness = Harness::at("/posts");
        harness.press(key(KeyCode::Char('d')));

        assert!(!click_page(&mut harness, 3));

        let state = harness.app.app_state();
        assert_eq!(state.current_page().get(), 1);
        assert!(state.pending_delete().is_some());
    }

    #[test]
    fn clicks_are_ignored_under_help_overlay() {
        let mut harness = Harness::at("/posts");
        harness.press(key(KeyCode::Char('?')));

        assert!(!click_page(&mut harness, 3));
        assert_eq!(harness.app.app_state().current_page().get(), 1);
    }
}
