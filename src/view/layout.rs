//! Screen layout: header, screen body, status bar, overlays.
//!
//! Pure with respect to state: reads [`AppState`] and draws. Returns the
//! geometry the event loop needs for mouse hit-testing.

use super::constants::{HEADER_HEIGHT, PAGINATION_BAR_HEIGHT, SEARCH_BAR_HEIGHT, STATUS_BAR_HEIGHT};
use super::help::render_help_overlay;
use super::pagination_bar::{render_pagination, PlacedControl};
use super::post_detail::{render_post_detail, status_lines};
use super::post_form::{form_title, render_post_form};
use super::post_list::render_post_list;
use super::search_bar::SearchBar;
use super::styles::Palette;
use crate::model::PostId;
use crate::navigation::Route;
use crate::state::{AppState, FormMode, ListFocus, ListScreen, Screen};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Geometry of the last drawn frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameLayout {
    /// Pagination controls, when the list is shown.
    pub page_controls: Vec<PlacedControl>,
}

/// Render the whole frame for `state`.
pub fn render_layout(frame: &mut Frame, state: &AppState, palette: &Palette) -> FrameLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], state, palette);

    let mut layout = FrameLayout::default();
    match state.screen() {
        Screen::List(list) => {
            layout.page_controls = render_list_screen(frame, chunks[1], state, list, palette);
        }
        Screen::Detail(detail) => {
            let posts = state.posts();
            let deleting = posts.is_deleting(detail.id());
            let delete_failed = posts.delete_error().is_some();
            render_post_detail(frame, chunks[1], detail, deleting, delete_failed, palette);
        }
        Screen::New(form) => render_post_form(frame, chunks[1], form, palette),
        Screen::Edit {
            form: Some(form), ..
        } => render_post_form(frame, chunks[1], form, palette),
        Screen::Edit { detail, form: None } => {
            let title = form_title(FormMode::Edit(detail.id()));
            let lines = status_lines(detail, palette).unwrap_or_default();
            let body = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(body, chunks[1]);
        }
        Screen::NotFound => {
            let message = format!(
                "Nothing at {}. Press Esc to return to the posts.",
                state.navigation().current().path()
            );
            let body = Paragraph::new(Span::styled(message, palette.error))
                .block(Block::default().borders(Borders::ALL).title(" Not Found "));
            frame.render_widget(body, chunks[1]);
        }
    }

    render_status_bar(frame, chunks[2], state, palette);

    if state.help_visible {
        render_help_overlay(frame, palette);
    }
    layout
}

fn render_list_screen(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    list: &ListScreen,
    palette: &Palette,
) -> Vec<PlacedControl> {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SEARCH_BAR_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(PAGINATION_BAR_HEIGHT),
        ])
        .split(area);

    let focused = list.focus() == ListFocus::Search;
    frame.render_widget(SearchBar::new(list.search(), focused, palette), chunks[0]);
    render_post_list(frame, chunks[1], state.posts(), list.selected(), palette);

    let pagination = state.pagination();
    render_pagination(frame, chunks[2], &pagination, palette)
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let mut text = String::from("postboard");
    match state.route() {
        Route::List => {
            let pagination = state.pagination();
            text.push_str(&format!(
                " | Posts | page {} of {}",
                pagination.current(),
                pagination.total_pages().max(1)
            ));
            let term = state.search_term();
            if !term.is_empty() {
                text.push_str(&format!(" | search: \"{term}\""));
            }
        }
        Route::Detail(id) => text.push_str(&format!(" | Post {id}")),
        Route::Edit(id) => text.push_str(&format!(" | Edit Post {id}")),
        Route::New => text.push_str(" | New Post"),
        Route::NotFound => text.push_str(" | Not Found"),
    }

    frame.render_widget(Paragraph::new(Line::from(text)).style(palette.header), area);
}

/// Hints shown in the status bar for the current screen.
pub fn status_hints(state: &AppState) -> &'static str {
    if state.help_visible {
        return "Esc/?: close help";
    }
    if state.is_search_focused() {
        return "type to search | Esc/Enter: done | Ctrl+u: clear";
    }
    match state.screen() {
        Screen::List(_) => {
            "j/k: select | Enter: open | n: new | e: edit | d: delete | h/l: page | /: search | ?: help | q: quit"
        }
        Screen::Detail(_) => "e: edit | d: delete | r: refresh | Esc: back | q: quit",
        Screen::New(_) | Screen::Edit { form: Some(_), .. } => {
            "Tab: next field | Ctrl+s: save | Esc: cancel"
        }
        Screen::Edit { form: None, .. } => "r: retry | Esc: back",
        Screen::NotFound => "Esc: back | q: quit",
    }
}

fn confirm_title(state: &AppState, id: PostId) -> String {
    let listed = state.posts().posts().iter().find(|post| post.id == id);
    let shown = match state.screen() {
        Screen::Detail(detail) => detail.post(),
        _ => None,
    };
    listed
        .or(shown)
        .map(|post| post.title.clone())
        .unwrap_or_else(|| format!("post {id}"))
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let line = match state.pending_delete() {
        Some(id) => {
            let title = confirm_title(state, id);
            Line::from(vec![
                Span::styled(format!("Delete \"{title}\"? "), palette.error),
                Span::styled("(y/n)", palette.key),
            ])
        }
        None => Line::from(Span::styled(status_hints(state), palette.muted)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ===== Tests =====

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
