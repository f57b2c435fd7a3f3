//! Post list screen body.

use super::constants::NO_IMAGE_GLYPH;
use super::styles::Palette;
use crate::state::PostsCoordinator;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Shown while the latest fetch is outstanding.
pub const LOADING_MESSAGE: &str = "Loading posts...";
/// Shown when the latest fetch failed.
pub const LOAD_ERROR_MESSAGE: &str = "Error loading posts.";
/// Shown when the most recent delete failed.
pub const DELETE_ERROR_MESSAGE: &str = "Failed to delete post.";
/// Shown for a page without posts.
pub const EMPTY_MESSAGE: &str = "No posts found.";

/// Render the current page of posts with `selected` highlighted.
pub fn render_post_list(
    frame: &mut Frame,
    area: Rect,
    posts: &PostsCoordinator,
    selected: usize,
    palette: &Palette,
) {
    let block = Block::default().borders(Borders::ALL).title(" Posts ");

    let (notice_area, list_area) = if posts.delete_error().is_some() {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(block.inner(area));
        (Some(chunks[0]), chunks[1])
    } else {
        (None, block.inner(area))
    };
    frame.render_widget(block, area);

    if let Some(notice_area) = notice_area {
        let notice = Paragraph::new(Span::styled(DELETE_ERROR_MESSAGE, palette.error));
        frame.render_widget(notice, notice_area);
    }

    if posts.is_loading() {
        frame.render_widget(Paragraph::new(LOADING_MESSAGE), list_area);
        return;
    }
    if posts.error().is_some() {
        let message = Paragraph::new(Span::styled(LOAD_ERROR_MESSAGE, palette.error));
        frame.render_widget(message, list_area);
        return;
    }
    if posts.posts().is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(EMPTY_MESSAGE, palette.muted)),
            list_area,
        );
        return;
    }

    let items: Vec<ListItem> = posts
        .posts()
        .iter()
        .map(|post| {
            let mut title = vec![Span::styled(post.title.clone(), palette.title)];
            if posts.is_deleting(post.id) {
                title.push(Span::styled("  (deleting...)", palette.muted));
            }
            let image = match &post.image_url {
                Some(url) => Span::styled(format!("  {url}"), palette.muted),
                None => Span::styled(format!("  {NO_IMAGE_GLYPH}"), palette.muted),
            };
            ListItem::new(vec![Line::from(title), Line::from(image)])
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(selected));
    let list = List::new(items).highlight_style(palette.selected);
    frame.render_stateful_widget(list, list_area, &mut state);
}
