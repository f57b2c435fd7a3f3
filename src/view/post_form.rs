//! New and edit post forms.

use super::constants::FORM_INPUT_HEIGHT;
use super::styles::Palette;
use crate::state::{FormField, FormMode, PostForm, SubmitStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn field_lines(form: &PostForm, field: FormField, palette: &Palette) -> Vec<Line<'static>> {
    let text = form.field(field);
    let mut lines: Vec<Line<'static>> = text.split('\n').map(|l| Line::from(l.to_string())).collect();

    if form.focus() == field && !form.is_submitting() {
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(" ", palette.cursor));
        }
    }
    if text.is_empty() && field == FormField::ImagePath && form.focus() != field {
        let hint = match form.mode() {
            FormMode::Create => "optional path to an image file",
            FormMode::Edit(_) => "leave empty to keep the current image",
        };
        lines = vec![Line::from(Span::styled(hint, palette.muted))];
    }
    lines
}

fn input(form: &PostForm, field: FormField, palette: &Palette) -> Paragraph<'static> {
    let border = if form.focus() == field {
        palette.focused
    } else {
        palette.unfocused
    };
    Paragraph::new(field_lines(form, field, palette))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", field.label()))
                .border_style(border),
        )
}

/// Heading of the form screen.
pub fn form_title(mode: FormMode) -> String {
    match mode {
        FormMode::Create => " New Post ".to_string(),
        FormMode::Edit(id) => format!(" Edit Post {id} "),
    }
}

/// Render `form` into `area`.
pub fn render_post_form(frame: &mut Frame, area: Rect, form: &PostForm, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(form_title(form.mode()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FORM_INPUT_HEIGHT),
            Constraint::Min(FORM_INPUT_HEIGHT),
            Constraint::Length(FORM_INPUT_HEIGHT),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(input(form, FormField::Title, palette), chunks[0]);
    frame.render_widget(input(form, FormField::Body, palette), chunks[1]);
    frame.render_widget(input(form, FormField::ImagePath, palette), chunks[2]);

    let status = match form.status() {
        SubmitStatus::Submitting => Span::styled("Saving...", palette.muted),
        _ => match form.status_message() {
            Some(message) => Span::styled(message, palette.error),
            None => Span::raw(""),
        },
    };
    frame.render_widget(Paragraph::new(Line::from(status)), chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PostId;

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn focused_field_shows_cursor_cell() {
        let mut form = PostForm::new_create();
        form.insert_char('H');
        let lines = field_lines(&form, FormField::Title, &Palette::default());
        assert_eq!(text(&lines), vec!["H "]);
    }

    #[test]
    fn body_keeps_line_breaks() {
        let mut form = PostForm::new_create();
        form.focus_next();
        for ch in "a\nb".chars() {
            form.insert_char(ch);
        }
        let lines = field_lines(&form, FormField::Body, &Palette::default());
        assert_eq!(text(&lines), vec!["a", "b "]);
    }

    #[test]
    fn empty_image_field_hints_by_mode() {
        let form = PostForm::new_create();
        let lines = field_lines(&form, FormField::ImagePath, &Palette::default());
        assert_eq!(text(&lines), vec!["optional path to an image file"]);
    }

    #[test]
    fn titles_name_the_mode() {
        assert_eq!(form_title(FormMode::Create), " New Post ");
        assert_eq!(form_title(FormMode::Edit(PostId::new(4))), " Edit Post 4 ");
    }
}
