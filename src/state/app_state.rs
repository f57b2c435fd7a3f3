//! Application state and transitions.
//!
//! `AppState` is the root state type. It owns the navigation state, the
//! posts coordinator and the active screen. Transitions are synchronous:
//! effects leave as [`Command`]s and their outcomes come back through
//! [`AppState::apply`] as [`ServiceEvent`]s.
//!
//! The active screen is derived from the current location. Every
//! transition that may change the location ends in
//! [`AppState::sync_route`], which tears down the old screen, builds the
//! new one, and keeps the list's retrieval in step with the `page` and
//! `search` query parameters.

use super::command::{Command, ServiceEvent};
use super::detail::PostDetail;
use super::pagination::{PageControl, Pagination};
use super::post_form::{FormMode, PostForm};
use super::posts::{FetchOutcome, PostsCoordinator};
use super::search_input::SearchInput;
use crate::model::{KeyAction, PageNumber, PageRequest, Post, PostId};
use crate::navigation::{Location, Navigation, PageParam, Route, UrlParam};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

// ===== Screens =====

/// Which list widget receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFocus {
    /// Keys are actions on the selected post.
    #[default]
    Posts,
    /// Keys edit the search bar.
    Search,
}

/// State of the list screen that lives only while it is shown.
#[derive(Debug, Clone)]
pub struct ListScreen {
    search: SearchInput,
    selected: usize,
    focus: ListFocus,
}

impl ListScreen {
    /// The search bar.
    pub fn search(&self) -> &SearchInput {
        &self.search
    }

    /// Index of the selected post on the current page.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Focused widget.
    pub fn focus(&self) -> ListFocus {
        self.focus
    }
}

/// The active screen.
#[derive(Debug, Clone)]
pub enum Screen {
    /// Post list with search and pagination.
    List(ListScreen),
    /// A single post.
    Detail(PostDetail),
    /// New post form.
    New(PostForm),
    /// Edit form. The form exists once the post has loaded.
    Edit {
        /// Load state of the edited post.
        detail: PostDetail,
        /// Form preloaded from the post.
        form: Option<PostForm>,
    },
    /// The location matches no screen.
    NotFound,
}

// ===== AppState =====

/// Application state. No I/O happens here.
#[derive(Debug)]
pub struct AppState {
    nav: Navigation,
    /// Route the current screen was built for; `None` before the first sync.
    route: Option<Route>,
    screen: Screen,
    posts: PostsCoordinator,
    page_param: PageParam,
    search_param: UrlParam,
    debounce: Duration,
    /// Post awaiting a y/n delete confirmation.
    confirm_delete: Option<PostId>,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    should_quit: bool,
}

impl AppState {
    /// State positioned at `initial`. Call [`start`](Self::start) to build
    /// the first screen.
    pub fn new(initial: Location, debounce: Duration) -> Self {
        let mut nav = Navigation::new(initial);
        nav.subscribe(|location| debug!(%location, "Location changed"));

        Self {
            nav,
            route: None,
            screen: Screen::NotFound,
            posts: PostsCoordinator::new(),
            page_param: PageParam::new(),
            search_param: UrlParam::search(),
            debounce,
            confirm_delete: None,
            help_visible: false,
            should_quit: false,
        }
    }

    /// Build the screen for the initial location.
    pub fn start(&mut self) -> Vec<Command> {
        self.sync_route()
    }

    // ===== Accessors =====

    /// Navigation state.
    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    /// Route of the active screen.
    pub fn route(&self) -> Route {
        self.route.unwrap_or(Route::NotFound)
    }

    /// Active screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Posts of the list.
    pub fn posts(&self) -> &PostsCoordinator {
        &self.posts
    }

    /// Page from the URL.
    pub fn current_page(&self) -> PageNumber {
        self.page_param.read(&self.nav)
    }

    /// Settled search term from the URL.
    pub fn search_term(&self) -> String {
        self.search_param.read(&self.nav)
    }

    /// Pagination controls for the current list state.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            self.posts.total_posts(),
            self.posts.per_page(),
            self.current_page(),
        )
    }

    /// Post selected on the list screen.
    pub fn selected_post(&self) -> Option<&Post> {
        match &self.screen {
            Screen::List(list) => self.posts.posts().get(list.selected),
            _ => None,
        }
    }

    /// Post awaiting delete confirmation.
    pub fn pending_delete(&self) -> Option<PostId> {
        self.confirm_delete
    }

    /// Whether the user asked to exit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Whether typed characters go to the search bar.
    pub fn is_search_focused(&self) -> bool {
        matches!(&self.screen, Screen::List(list) if list.focus == ListFocus::Search)
    }

    /// Editable search bar, when the list is shown.
    ///
    /// Edits take effect on the URL only once they settle in
    /// [`tick`](Self::tick).
    pub fn search_mut(&mut self) -> Option<&mut SearchInput> {
        match &mut self.screen {
            Screen::List(list) => Some(&mut list.search),
            _ => None,
        }
    }

    /// Return keyboard focus from the search bar to the posts.
    pub fn blur_search(&mut self) {
        if let Screen::List(list) = &mut self.screen {
            list.focus = ListFocus::Posts;
        }
    }

    /// Form of the new or edit screen.
    pub fn form_mut(&mut self) -> Option<&mut PostForm> {
        match &mut self.screen {
            Screen::New(form) => Some(form),
            Screen::Edit {
                form: Some(form), ..
            } => Some(form),
            _ => None,
        }
    }

    // ===== Routing =====

    /// Bring the screen and the list retrieval in line with the location.
    ///
    /// A route change tears the old screen down and builds the new one; the
    /// list refetches every time it is entered. On an unchanged list route
    /// only changed `page`/`search` values issue a fetch.
    pub fn sync_route(&mut self) -> Vec<Command> {
        let route = Route::parse(self.nav.current().path());

        if self.route == Some(route) {
            if route == Route::List {
                let request = self.list_request();
                return self.posts.sync(request).map(Command::FetchPosts).into_iter().collect();
            }
            return Vec::new();
        }

        self.leave_screen();
        self.route = Some(route);
        self.enter(route)
    }

    fn list_request(&self) -> PageRequest {
        PageRequest::new(self.current_page(), self.search_term())
    }

    fn leave_screen(&mut self) {
        if let Screen::List(list) = &mut self.screen {
            list.search.cancel();
        }
        self.confirm_delete = None;
        self.posts.dismiss_delete_error();
    }

    fn enter(&mut self, route: Route) -> Vec<Command> {
        debug!(?route, "Entering screen");
        match route {
            Route::List => {
                let search = SearchInput::new(self.search_term(), self.debounce);
                self.screen = Screen::List(ListScreen {
                    search,
                    selected: 0,
                    focus: ListFocus::Posts,
                });
                let request = self.list_request();
                let ticket = match self.posts.sync(request) {
                    Some(ticket) => Some(ticket),
                    None => self.posts.refresh(),
                };
                ticket.map(Command::FetchPosts).into_iter().collect()
            }
            Route::Detail(id) => {
                let (detail, ticket) = PostDetail::load(id);
                self.screen = Screen::Detail(detail);
                vec![Command::LoadPost(ticket)]
            }
            Route::Edit(id) => {
                let (detail, ticket) = PostDetail::load(id);
                self.screen = Screen::Edit { detail, form: None };
                vec![Command::LoadPost(ticket)]
            }
            Route::New => {
                self.screen = Screen::New(PostForm::new_create());
                Vec::new()
            }
            Route::NotFound => {
                warn!(path = self.nav.current().path(), "No screen for path");
                self.screen = Screen::NotFound;
                Vec::new()
            }
        }
    }

    /// Navigate to `route`, adding a history entry.
    pub fn open(&mut self, route: Route) -> Vec<Command> {
        self.nav.push(Location::new(route.path()));
        self.sync_route()
    }

    /// Return to the previous location, or the list when there is none.
    pub fn go_back(&mut self) -> Vec<Command> {
        if !self.nav.back() && self.route() != Route::List {
            self.nav.replace(Location::new(Route::List.path()));
        }
        self.sync_route()
    }

    fn previous_route(&self) -> Option<Route> {
        self.nav.previous().map(|location| Route::parse(location.path()))
    }

    // ===== Actions =====

    /// Apply a key action.
    pub fn handle_action(&mut self, action: KeyAction) -> Vec<Command> {
        match action {
            KeyAction::Quit => {
                self.should_quit = true;
                return Vec::new();
            }
            KeyAction::Help => {
                self.help_visible = !self.help_visible;
                return Vec::new();
            }
            _ => {}
        }

        if self.help_visible {
            if action == KeyAction::Back {
                self.help_visible = false;
            }
            return Vec::new();
        }

        if self.confirm_delete.take().is_some() {
            debug!(?action, "Delete confirmation dismissed");
            return Vec::new();
        }

        match self.route() {
            Route::List => self.handle_list_action(action),
            Route::Detail(id) => self.handle_detail_action(id, action),
            Route::Edit(_) => match action {
                KeyAction::Back => self.go_back(),
                KeyAction::Refresh => self.retry_load(),
                _ => Vec::new(),
            },
            Route::New | Route::NotFound => match action {
                KeyAction::Back => self.go_back(),
                _ => Vec::new(),
            },
        }
    }

    fn handle_list_action(&mut self, action: KeyAction) -> Vec<Command> {
        let selected = self.selected_post().map(|post| post.id);

        match action {
            KeyAction::SelectNext => self.move_selection(1),
            KeyAction::SelectPrev => self.move_selection(-1),
            KeyAction::NextPage
            | KeyAction::PrevPage
            | KeyAction::FirstPage
            | KeyAction::LastPage => {
                let pagination = self.pagination();
                let target = match action {
                    KeyAction::NextPage => pagination.next(),
                    KeyAction::PrevPage => pagination.previous(),
                    KeyAction::FirstPage => pagination.first(),
                    _ => pagination.last(),
                };
                if let Some(page) = target {
                    return self.go_to_page(page);
                }
            }
            KeyAction::FocusSearch => {
                if let Screen::List(list) = &mut self.screen {
                    list.focus = ListFocus::Search;
                }
            }
            KeyAction::OpenPost => {
                if let Some(id) = selected {
                    return self.open(Route::Detail(id));
                }
            }
            KeyAction::EditPost => {
                if let Some(id) = selected {
                    return self.open(Route::Edit(id));
                }
            }
            KeyAction::NewPost => return self.open(Route::New),
            KeyAction::DeletePost => {
                if let Some(id) = selected.filter(|id| !self.posts.is_deleting(*id)) {
                    self.confirm_delete = Some(id);
                }
            }
            KeyAction::Refresh => {
                return self.posts.refresh().map(Command::FetchPosts).into_iter().collect();
            }
            KeyAction::Back | KeyAction::Help | KeyAction::Quit => {}
        }
        Vec::new()
    }

    fn handle_detail_action(&mut self, id: PostId, action: KeyAction) -> Vec<Command> {
        match action {
            KeyAction::Back => self.go_back(),
            KeyAction::EditPost => self.open(Route::Edit(id)),
            KeyAction::DeletePost => {
                if !self.posts.is_deleting(id) {
                    self.confirm_delete = Some(id);
                }
                Vec::new()
            }
            KeyAction::Refresh => match &mut self.screen {
                Screen::Detail(detail) => vec![Command::LoadPost(detail.reload())],
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    fn retry_load(&mut self) -> Vec<Command> {
        match &mut self.screen {
            Screen::Detail(detail) | Screen::Edit { detail, .. } => {
                detail.retry().map(Command::LoadPost).into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.posts.posts().len();
        if let Screen::List(list) = &mut self.screen {
            let max = len.saturating_sub(1);
            list.selected = list.selected.saturating_add_signed(delta).min(max);
        }
    }

    fn clamp_selection(&mut self) {
        self.move_selection(0);
    }

    /// Show `page` of the list.
    ///
    /// A pending delete confirmation is dropped with the page it was
    /// asked on.
    pub fn go_to_page(&mut self, page: PageNumber) -> Vec<Command> {
        if self.route() != Route::List {
            return Vec::new();
        }
        if self.page_param.read(&self.nav) != page {
            self.confirm_delete = None;
        }
        self.page_param.write(&mut self.nav, page);
        self.sync_route()
    }

    /// Activate a pagination control (mouse click).
    pub fn select_page_control(&mut self, control: PageControl) -> Vec<Command> {
        match self.pagination().select(control) {
            Some(page) => self.go_to_page(page),
            None => Vec::new(),
        }
    }

    /// Answer the pending delete confirmation.
    pub fn confirm_delete(&mut self, confirmed: bool) -> Vec<Command> {
        let Some(id) = self.confirm_delete.take() else {
            return Vec::new();
        };
        if !confirmed || !self.posts.begin_delete(id) {
            return Vec::new();
        }
        info!(%id, "Deleting post");
        vec![Command::DeletePost(id)]
    }

    /// Submit the form of the new or edit screen.
    pub fn submit_form(&mut self) -> Vec<Command> {
        let Some(form) = self.form_mut() else {
            return Vec::new();
        };
        let Some(submission) = form.submit() else {
            return Vec::new();
        };
        match form.mode() {
            FormMode::Create => vec![Command::CreatePost(submission)],
            FormMode::Edit(id) => vec![Command::UpdatePost(id, submission)],
        }
    }

    // ===== Time =====

    /// Settle the search bar once its debounce window has passed.
    ///
    /// A settled term that differs from the URL is written to `search` and
    /// resets `page`, which triggers exactly one retrieval.
    pub fn tick(&mut self, now: Instant) -> Vec<Command> {
        let Screen::List(list) = &mut self.screen else {
            return Vec::new();
        };
        let Some(term) = list.search.poll(now) else {
            return Vec::new();
        };

        if term != self.search_term() {
            debug!(term = %term, "Search term settled");
            self.search_param.write(&mut self.nav, Some(&term));
            self.page_param.reset(&mut self.nav);
        }
        self.sync_route()
    }

    /// How long the event loop may sleep before [`tick`](Self::tick) has
    /// work to do.
    pub fn time_until_tick(&self, now: Instant) -> Option<Duration> {
        match &self.screen {
            Screen::List(list) => list.search.time_until_settle(now),
            _ => None,
        }
    }

    // ===== Service events =====

    /// Apply the outcome of an executed command.
    pub fn apply(&mut self, event: ServiceEvent) -> Vec<Command> {
        match event {
            ServiceEvent::PostsFetched { ticket, result } => {
                if self.posts.complete(&ticket, result) == FetchOutcome::Applied {
                    self.clamp_selection();
                }
                Vec::new()
            }
            ServiceEvent::PostDeleted { id, result } => {
                let deleted = result.is_ok();
                self.posts.complete_delete(id, result);
                self.clamp_selection();
                if deleted && self.route() == Route::Detail(id) {
                    return self.leave_deleted_post();
                }
                Vec::new()
            }
            ServiceEvent::PostLoaded { ticket, result } => {
                match &mut self.screen {
                    Screen::Detail(detail) => {
                        detail.complete(ticket, result);
                    }
                    Screen::Edit { detail, form } => {
                        let outcome = detail.complete(ticket, result);
                        if outcome == FetchOutcome::Applied && form.is_none() {
                            *form = detail.post().map(PostForm::from_post);
                        }
                    }
                    _ => debug!(id = %ticket.id(), "Dropping post load for a closed screen"),
                }
                Vec::new()
            }
            ServiceEvent::PostSaved { mode, result } => {
                let saved = match self.form_mut() {
                    Some(form) if form.mode() == mode => form.complete_submit(result),
                    _ => {
                        debug!(?mode, "Dropping save result for a closed form");
                        None
                    }
                };
                match saved {
                    Some(post) => {
                        info!(id = %post.id, "Post saved");
                        self.show_saved(mode, post.id)
                    }
                    None => Vec::new(),
                }
            }
        }
    }

    fn show_saved(&mut self, mode: FormMode, id: PostId) -> Vec<Command> {
        let back_to_detail =
            matches!(mode, FormMode::Edit(_)) && self.previous_route() == Some(Route::Detail(id));
        if back_to_detail {
            self.nav.back();
        } else {
            self.nav.replace(Location::new(Route::Detail(id).path()));
        }
        self.sync_route()
    }

    fn leave_deleted_post(&mut self) -> Vec<Command> {
        if self.previous_route() == Some(Route::List) {
            self.nav.back();
        } else {
            self.nav.replace(Location::new(Route::List.path()));
        }
        self.sync_route()
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "app_state_tests.rs"]
mod tests;
