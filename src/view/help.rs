//! Keyboard shortcut reference, drawn over whatever screen is showing.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::Palette;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Shortcut groups: (category, [(keys, description)]).
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Posts",
        &[
            ("j/↓", "Select next post"),
            ("k/↑", "Select previous post"),
            ("Enter", "Open selected post"),
            ("n", "New post"),
            ("e", "Edit post"),
            ("d", "Delete post (confirm with y/n)"),
        ],
    ),
    (
        "Pages",
        &[
            ("l/→/PgDn", "Next page"),
            ("h/←/PgUp", "Previous page"),
            ("g/Home", "First page"),
            ("G/End", "Last page"),
            ("Click", "Go to page"),
        ],
    ),
    (
        "Search",
        &[
            ("/ or Ctrl+f", "Focus search bar"),
            ("Esc/Enter", "Leave search bar"),
            ("Ctrl+u", "Clear search"),
        ],
    ),
    (
        "Forms",
        &[
            ("Tab/Shift+Tab", "Next/previous field"),
            ("Enter", "New line in body"),
            ("Ctrl+s", "Save post"),
            ("Esc", "Cancel"),
        ],
    ),
    (
        "Application",
        &[
            ("Esc/Backspace", "Back"),
            ("r", "Refresh / retry"),
            ("?", "Toggle this help"),
            ("q/Ctrl+c", "Quit"),
        ],
    ),
];

const KEY_COLUMN_WIDTH: usize = 16;

/// Draw the shortcut popup over the frame.
pub fn render_help_overlay(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);

    let shortcuts = Paragraph::new(build_help_content(palette))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(palette.focused),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(shortcuts, popup_area);

    // Dismissal hint overlays the bottom border.
    let [_, bottom_border] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(popup_area);
    let dismiss = Paragraph::new(Span::styled(
        " Press Esc or ? to close ",
        palette.muted.add_modifier(Modifier::DIM),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(dismiss, bottom_border);
}

/// `percent_x` by `percent_y` of `area`, centered in it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [column] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(column);
    popup
}

/// One title line per category, one padded line per shortcut.
fn build_help_content(palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(SECTIONS.len() * 6);
    for (index, (category, shortcuts)) in SECTIONS.iter().enumerate() {
        if index > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*category, palette.title)));
        for (keys, description) in shortcuts.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {keys:<KEY_COLUMN_WIDTH$}"), palette.key),
                Span::raw(*description),
            ]));
        }
    }
    lines
}

// ===== Tests =====

#[cfg(test)]
#[path = "help_tests.rs"]
mod tests;
