//! Create/edit form state (pure).

use crate::model::{ApiError, Post, PostDraft, PostId};
use std::path::PathBuf;
use tracing::error;

/// Message shown when a submit comes back with an error.
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save post.";

/// Message shown when submit is attempted with an empty title.
pub const BLANK_TITLE_MESSAGE: &str = "Title can't be blank.";

/// Focusable form inputs, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// Single-line title.
    #[default]
    Title,
    /// Multi-line body.
    Body,
    /// Path of an image file to upload.
    ImagePath,
}

impl FormField {
    const ORDER: [FormField; 3] = [FormField::Title, FormField::Body, FormField::ImagePath];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Label rendered next to the input.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Body => "Body",
            FormField::ImagePath => "Image file",
        }
    }
}

/// Whether the form creates a post or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// `POST /posts`.
    Create,
    /// `PUT /posts/{id}`.
    Edit(PostId),
}

/// Submit progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    /// Accepting input.
    #[default]
    Editing,
    /// Request in flight; input is ignored.
    Submitting,
    /// Rejected locally before any request.
    Invalid(&'static str),
    /// The server or transport rejected the submit.
    Failed(ApiError),
}

/// Validated form contents handed to the dispatcher.
///
/// The image is still a path here; reading the file happens off the UI
/// thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Image file to attach.
    pub image_path: Option<PathBuf>,
}

impl FormSubmission {
    /// Text-only draft. The caller attaches the image once it is read.
    pub fn to_draft(&self) -> PostDraft {
        PostDraft::new(self.title.clone(), self.body.clone())
    }
}

/// Editable post form.
#[derive(Debug, Clone)]
pub struct PostForm {
    mode: FormMode,
    title: String,
    body: String,
    image_path: String,
    focus: FormField,
    status: SubmitStatus,
}

impl PostForm {
    /// Empty form for a new post.
    pub fn new_create() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            body: String::new(),
            image_path: String::new(),
            focus: FormField::Title,
            status: SubmitStatus::Editing,
        }
    }

    /// Form preloaded with an existing post.
    ///
    /// The image path starts empty; leaving it empty keeps the current image.
    pub fn from_post(post: &Post) -> Self {
        Self {
            mode: FormMode::Edit(post.id),
            title: post.title.clone(),
            body: post.body.clone(),
            ..Self::new_create()
        }
    }

    /// Create or edit.
    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Focused input.
    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Submit progress.
    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    /// Whether a submit is in flight.
    pub fn is_submitting(&self) -> bool {
        self.status == SubmitStatus::Submitting
    }

    /// Current text of `field`.
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Body => &self.body,
            FormField::ImagePath => &self.image_path,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Title => &mut self.title,
            FormField::Body => &mut self.body,
            FormField::ImagePath => &mut self.image_path,
        }
    }

    /// Move focus to the next input, wrapping.
    pub fn focus_next(&mut self) {
        let next = (self.focus.position() + 1) % FormField::ORDER.len();
        self.focus = FormField::ORDER[next];
    }

    /// Move focus to the previous input, wrapping.
    pub fn focus_prev(&mut self) {
        let len = FormField::ORDER.len();
        let prev = (self.focus.position() + len - 1) % len;
        self.focus = FormField::ORDER[prev];
    }

    /// Append a character to the focused input.
    pub fn insert_char(&mut self, ch: char) {
        if self.is_submitting() {
            return;
        }
        let focus = self.focus;
        self.field_mut(focus).push(ch);
        self.clear_invalid();
    }

    /// Remove the last character of the focused input.
    pub fn backspace(&mut self) {
        if self.is_submitting() {
            return;
        }
        let focus = self.focus;
        self.field_mut(focus).pop();
        self.clear_invalid();
    }

    /// Insert a line break. Only the body is multi-line; elsewhere this
    /// moves focus forward.
    pub fn newline(&mut self) {
        if self.focus == FormField::Body {
            self.insert_char('\n');
        } else {
            self.focus_next();
        }
    }

    fn clear_invalid(&mut self) {
        if matches!(self.status, SubmitStatus::Invalid(_)) {
            self.status = SubmitStatus::Editing;
        }
    }

    /// Validate and start a submit.
    ///
    /// Returns `None` while a submit is already in flight or when the title
    /// is blank (the form then reports [`SubmitStatus::Invalid`]).
    pub fn submit(&mut self) -> Option<FormSubmission> {
        if self.is_submitting() {
            return None;
        }
        if self.title.trim().is_empty() {
            self.status = SubmitStatus::Invalid(BLANK_TITLE_MESSAGE);
            self.focus = FormField::Title;
            return None;
        }

        let image_path = self.image_path.trim();
        let submission = FormSubmission {
            title: self.title.clone(),
            body: self.body.clone(),
            image_path: (!image_path.is_empty()).then(|| PathBuf::from(image_path)),
        };
        self.status = SubmitStatus::Submitting;
        Some(submission)
    }

    /// Apply the submit result. Returns the saved post on success; on
    /// failure the form keeps its contents and reports the error.
    pub fn complete_submit(&mut self, result: Result<Post, ApiError>) -> Option<Post> {
        match result {
            Ok(post) => {
                self.status = SubmitStatus::Editing;
                Some(post)
            }
            Err(err) => {
                error!(mode = ?self.mode, error = %err, "Failed to save post");
                self.status = SubmitStatus::Failed(err);
                None
            }
        }
    }

    /// User-facing message for the current status, if any.
    pub fn status_message(&self) -> Option<&'static str> {
        match &self.status {
            SubmitStatus::Invalid(message) => Some(message),
            SubmitStatus::Failed(_) => Some(SAVE_FAILED_MESSAGE),
            SubmitStatus::Editing | SubmitStatus::Submitting => None,
        }
    }
}

#[cfg(test)]
#[path = "post_form_tests.rs"]
mod tests;
