//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // List selection
    /// Move selection to the next post. Default: j/↓
    SelectNext,
    /// Move selection to the previous post. Default: k/↑
    SelectPrev,

    // Pagination
    /// Go to the next page. Default: l/→/Page Down
    NextPage,
    /// Go to the previous page. Default: h/←/Page Up
    PrevPage,
    /// Jump to page 1. Default: g/Home
    FirstPage,
    /// Jump to the last page. Default: G/End
    LastPage,

    // Search
    /// Focus the search bar. Default: //Ctrl+f
    FocusSearch,

    // Post actions
    /// Open the selected post. Default: Enter
    OpenPost,
    /// Create a new post. Default: n
    NewPost,
    /// Edit the selected or displayed post. Default: e
    EditPost,
    /// Delete the selected post (asks for confirmation). Default: d
    DeletePost,

    // Navigation
    /// Return to the previous screen. Default: Esc/Backspace
    Back,

    // Application
    /// Re-fetch the current screen, or retry a failed load. Default: r
    Refresh,
    /// Show help overlay with keyboard shortcuts. Default: ?
    Help,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether this action moves between pages.
    pub fn is_pagination(self) -> bool {
        matches!(
            self,
            KeyAction::NextPage | KeyAction::PrevPage | KeyAction::FirstPage | KeyAction::LastPage
        )
    }
}
