//! Tests for the post form.

use super::*;

fn type_text(form: &mut PostForm, text: &str) {
    for ch in text.chars() {
        form.insert_char(ch);
    }
}

fn existing() -> Post {
    Post::new(PostId::new(1), "Original Post Title", "Original Post Body.")
}

// ===== Input =====

#[test]
fn typing_goes_to_focused_field() {
    let mut form = PostForm::new_create();
    type_text(&mut form, "Hello");
    form.focus_next();
    type_text(&mut form, "World");

    assert_eq!(form.field(FormField::Title), "Hello");
    assert_eq!(form.field(FormField::Body), "World");
    assert_eq!(form.field(FormField::ImagePath), "");
}

#[test]
fn focus_wraps_both_ways() {
    let mut form = PostForm::new_create();
    form.focus_prev();
    assert_eq!(form.focus(), FormField::ImagePath);
    form.focus_next();
    assert_eq!(form.focus(), FormField::Title);
}

#[test]
fn newline_only_breaks_lines_in_body() {
    let mut form = PostForm::new_create();
    form.newline();
    assert_eq!(form.focus(), FormField::Body);
    assert_eq!(form.field(FormField::Title), "");

    type_text(&mut form, "a");
    form.newline();
    type_text(&mut form, "b");
    assert_eq!(form.field(FormField::Body), "a\nb");
}

#[test]
fn backspace_removes_last_character() {
    let mut form = PostForm::from_post(&existing());
    form.backspace();
    assert_eq!(form.field(FormField::Title), "Original Post Titl");
}

// ===== Edit mode =====

#[test]
fn edit_form_is_preloaded() {
    let form = PostForm::from_post(&existing());
    assert_eq!(form.mode(), FormMode::Edit(PostId::new(1)));
    assert_eq!(form.field(FormField::Title), "Original Post Title");
    assert_eq!(form.field(FormField::Body), "Original Post Body.");
}

// ===== Submit =====

#[test]
fn submit_builds_submission() {
    let mut form = PostForm::new_create();
    type_text(&mut form, "Title");
    form.focus_next();
    type_text(&mut form, "Body");
    form.focus_next();
    type_text(&mut form, " /tmp/cat.png ");

    let submission = form.submit().unwrap();

    assert_eq!(submission.title, "Title");
    assert_eq!(submission.body, "Body");
    assert_eq!(submission.image_path, Some(PathBuf::from("/tmp/cat.png")));
    assert!(form.is_submitting());
}

#[test]
fn empty_image_path_means_no_image() {
    let mut form = PostForm::from_post(&existing());
    assert_eq!(form.submit().unwrap().image_path, None);
}

#[test]
fn blank_title_is_rejected_locally() {
    let mut form = PostForm::new_create();
    form.focus_next();
    type_text(&mut form, "body only");

    assert!(form.submit().is_none());
    assert_eq!(form.status(), &SubmitStatus::Invalid(BLANK_TITLE_MESSAGE));
    assert_eq!(form.focus(), FormField::Title);

    form.insert_char('T');
    assert_eq!(form.status(), &SubmitStatus::Editing);
}

#[test]
fn double_submit_is_ignored() {
    let mut form = PostForm::from_post(&existing());
    assert!(form.submit().is_some());
    assert!(form.submit().is_none());
}

#[test]
fn input_is_ignored_while_submitting() {
    let mut form = PostForm::from_post(&existing());
    form.submit();
    form.insert_char('!');
    assert_eq!(form.field(FormField::Title), "Original Post Title");
}

#[test]
fn failed_submit_keeps_contents() {
    let mut form = PostForm::from_post(&existing());
    form.submit();

    let saved = form.complete_submit(Err(ApiError::Status {
        status: 422,
        reason: "Unprocessable Entity".to_string(),
    }));

    assert!(saved.is_none());
    assert_eq!(form.status_message(), Some(SAVE_FAILED_MESSAGE));
    assert_eq!(form.field(FormField::Title), "Original Post Title");
    assert!(form.submit().is_some(), "can resubmit after failure");
}

#[test]
fn successful_submit_returns_saved_post() {
    let mut form = PostForm::from_post(&existing());
    form.submit();
    let saved = form.complete_submit(Ok(existing()));
    assert_eq!(saved, Some(existing()));
    assert_eq!(form.status_message(), None);
}
