//! Search bar widget.

use super::styles::Palette;
use crate::state::SearchInput;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Shown in an empty, unfocused search bar.
pub const SEARCH_PLACEHOLDER: &str = "Search posts... (/)";

/// Renders the list's search input.
///
/// The cursor is drawn only while the bar has focus. A pending edit is
/// flagged in the title until it settles.
pub struct SearchBar<'a> {
    input: &'a SearchInput,
    focused: bool,
    palette: &'a Palette,
}

impl<'a> SearchBar<'a> {
    /// Create new SearchBar widget.
    pub fn new(input: &'a SearchInput, focused: bool, palette: &'a Palette) -> Self {
        Self {
            input,
            focused,
            palette,
        }
    }

    fn line(&self) -> Line<'static> {
        let text = self.input.text();
        if !self.focused {
            if text.is_empty() {
                return Line::from(Span::styled(SEARCH_PLACEHOLDER, self.palette.muted));
            }
            return Line::from(text.to_string());
        }

        let cursor = self.input.cursor();
        let before: String = text.chars().take(cursor).collect();
        let mut rest = text.chars().skip(cursor);
        let under = rest.next().map_or_else(|| " ".to_string(), String::from);
        let after: String = rest.collect();

        Line::from(vec![
            Span::raw(before),
            Span::styled(under, self.palette.cursor),
            Span::raw(after),
        ])
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = if self.input.is_pending() {
            " Search (typing...) "
        } else {
            " Search "
        };
        let border = if self.focused {
            self.palette.focused
        } else {
            self.palette.unfocused
        };

        Paragraph::new(self.line())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border),
            )
            .render(area, buf);
    }
}
