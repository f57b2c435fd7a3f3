//! Single post screen.

use super::post_list::DELETE_ERROR_MESSAGE;
use super::styles::Palette;
use crate::model::{ApiError, Post};
use crate::state::{LoadStatus, PostDetail};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Shown while the post is being fetched.
pub const LOADING_POST_MESSAGE: &str = "Loading...";

/// Message for a failed single-post fetch.
///
/// Only failures that could clear up on their own suggest a retry.
pub fn load_failure_message(error: &ApiError) -> &'static str {
    match error {
        ApiError::NotFound { .. } => "Post not found.",
        err if err.is_transient() => "Failed to load post. Press r to retry.",
        _ => "Failed to load post.",
    }
}

fn post_lines(post: &Post, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(post.title.clone(), palette.title)),
        Line::from(""),
    ];
    if let Some(url) = &post.image_url {
        lines.push(Line::from(vec![
            Span::styled("Image: ", palette.muted),
            Span::raw(url.clone()),
        ]));
        lines.push(Line::from(""));
    }
    lines.extend(post.body.lines().map(|l| Line::from(l.to_string())));

    let stamps: Vec<String> = [("Created", post.created_at), ("Updated", post.updated_at)]
        .into_iter()
        .filter_map(|(label, at)| at.map(|at| format!("{label} {}", at.format("%Y-%m-%d %H:%M"))))
        .collect();
    if !stamps.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(stamps.join(" · "), palette.muted)));
    }
    lines
}

/// Body of a load that has not produced a post, or `None` once loaded.
pub fn status_lines(detail: &PostDetail, palette: &Palette) -> Option<Vec<Line<'static>>> {
    match detail.status() {
        LoadStatus::Loading => Some(vec![Line::from(LOADING_POST_MESSAGE)]),
        LoadStatus::Failed(error) => Some(vec![Line::from(Span::styled(
            load_failure_message(error),
            palette.error,
        ))]),
        LoadStatus::Loaded(_) => None,
    }
}

/// Render the detail screen.
///
/// `delete_failed` puts the delete failure notice above the post.
pub fn render_post_detail(
    frame: &mut Frame,
    area: Rect,
    detail: &PostDetail,
    deleting: bool,
    delete_failed: bool,
    palette: &Palette,
) {
    let title = if deleting {
        format!(" Post {} (deleting...) ", detail.id())
    } else {
        format!(" Post {} ", detail.id())
    };

    let mut lines = Vec::new();
    if delete_failed {
        lines.push(Line::from(Span::styled(DELETE_ERROR_MESSAGE, palette.error)));
        lines.push(Line::default());
    }
    lines.extend(match (status_lines(detail, palette), detail.post()) {
        (Some(lines), _) => lines,
        (None, Some(post)) => post_lines(post, palette),
        (None, None) => Vec::new(),
    });

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
