//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without a terminal or
//! a network. Effects are described by [`Command`] and executed by the
//! shell.

pub mod app_state;
pub mod command;
pub mod detail;
pub mod pagination;
pub mod post_form;
pub mod posts;
pub mod search_input;

// Re-export for convenience
pub use app_state::{AppState, ListFocus, ListScreen, Screen};
pub use command::{Command, ServiceEvent};
pub use detail::{DetailTicket, LoadStatus, PostDetail};
pub use pagination::{page_range, PageControl, PageEntry, Pagination};
pub use post_form::{FormField, FormMode, FormSubmission, PostForm, SubmitStatus};
pub use posts::{FetchOutcome, FetchTicket, PostsCoordinator, RequestSeq};
pub use search_input::{DebouncePhase, SearchInput, DEFAULT_DEBOUNCE};
