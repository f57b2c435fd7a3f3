//! Pagination bar: Previous, page numbers with gaps, Next.
//!
//! Layout is computed separately from drawing so mouse clicks can be
//! hit-tested against the same rectangles that were drawn.

use super::constants::PAGE_BUTTON_GAP;
use super::styles::Palette;
use crate::state::{PageControl, Pagination};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// A control and the cells it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedControl {
    /// Occupied cells.
    pub area: Rect,
    /// The control.
    pub control: PageControl,
}

fn button_text(control: PageControl) -> String {
    match control {
        PageControl::Ellipsis => control.label(),
        _ => format!("[{}]", control.label()),
    }
}

fn button_width(control: PageControl) -> u16 {
    u16::try_from(button_text(control).width()).unwrap_or(u16::MAX)
}

/// Place `controls` left to right on the first row of `area`.
///
/// Controls that do not fit are dropped, except a trailing Next which
/// always keeps its place at the end of the row.
pub fn place_controls(controls: &[PageControl], area: Rect) -> Vec<PlacedControl> {
    let (leading, next) = match controls.split_last() {
        Some((&(last @ PageControl::Next { .. }), rest)) => (rest, Some(last)),
        _ => (controls, None),
    };

    let right = area.x.saturating_add(area.width);
    let limit = match next {
        Some(next) => right.saturating_sub(button_width(next).saturating_add(PAGE_BUTTON_GAP)),
        None => right,
    };

    let mut placed = Vec::with_capacity(controls.len());
    let mut x = area.x;
    for &control in leading {
        let width = button_width(control);
        if x.saturating_add(width) > limit {
            break;
        }
        placed.push(PlacedControl {
            area: Rect::new(x, area.y, width, 1),
            control,
        });
        x = x.saturating_add(width).saturating_add(PAGE_BUTTON_GAP);
    }

    if let Some(next) = next {
        let width = button_width(next);
        if x.saturating_add(width) <= right {
            placed.push(PlacedControl {
                area: Rect::new(x, area.y, width, 1),
                control: next,
            });
        }
    }
    placed
}

/// Control under the cell at (`column`, `row`).
///
/// Only enabled buttons are hit; the ellipsis and disabled controls are
/// inert.
pub fn hit_test(placed: &[PlacedControl], column: u16, row: u16) -> Option<PageControl> {
    placed
        .iter()
        .find(|p| {
            p.area.y == row && column >= p.area.x && column < p.area.x + p.area.width
        })
        .map(|p| p.control)
        .filter(|control| control.is_button() && !control.is_disabled())
}

/// Draw the bar and return where each control landed.
pub fn render_pagination(
    frame: &mut Frame,
    area: Rect,
    pagination: &Pagination,
    palette: &Palette,
) -> Vec<PlacedControl> {
    let placed = place_controls(&pagination.controls(), area);

    let mut spans = Vec::with_capacity(placed.len() * 2);
    let mut cursor = area.x;
    for p in &placed {
        if p.area.x > cursor {
            spans.push(Span::raw(" ".repeat(usize::from(p.area.x - cursor))));
        }
        let style = match p.control {
            PageControl::Page { current: true, .. } => palette.current_page,
            PageControl::Ellipsis => palette.muted,
            control if control.is_disabled() => palette.disabled,
            _ => palette.button,
        };
        spans.push(Span::styled(button_text(p.control), style));
        cursor = p.area.x + p.area.width;
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
    placed
}
