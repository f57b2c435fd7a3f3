//! Layout dimension constants for TUI rendering.

use std::time::Duration;

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for status text and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of the search bar in lines (border + content).
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Height of the pagination bar in lines.
pub const PAGINATION_BAR_HEIGHT: u16 = 1;

/// Height of the single-line form inputs (border + content).
pub const FORM_INPUT_HEIGHT: u16 = 3;

/// Columns between two pagination buttons.
pub const PAGE_BUTTON_GAP: u16 = 1;

/// Width percentage for help overlay popup.
pub const HELP_POPUP_WIDTH_PERCENT: u16 = 70;

/// Height percentage for help overlay popup.
pub const HELP_POPUP_HEIGHT_PERCENT: u16 = 80;

/// Longest the event loop sleeps before draining service events.
pub const EVENT_TICK: Duration = Duration::from_millis(50);

/// Shown before a post's title when it has no image.
pub const NO_IMAGE_GLYPH: &str = "▢";
