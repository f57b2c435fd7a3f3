//! Namespaced multipart form encoding.
//!
//! Fields are keyed `namespace[name]` (`post[title]`), the layout Rails-style
//! backends expect for nested params. Absent values are skipped entirely,
//! timestamps are sent as RFC 3339 strings and files become file parts.

use crate::model::{ApiError, ImageUpload, PostDraft};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::multipart::{Form, Part};
use std::path::PathBuf;

/// Namespace of post fields.
pub const POST_NAMESPACE: &str = "post";

/// One encoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Plain text part.
    Text(String),
    /// Timestamp, encoded as RFC 3339 text.
    Timestamp(DateTime<Utc>),
    /// File part.
    File(ImageUpload),
}

/// Ordered set of form fields under an optional namespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormFields {
    namespace: Option<String>,
    fields: Vec<(String, FormValue)>,
}

impl FormFields {
    /// Fields keyed by their bare names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields keyed `namespace[name]`.
    pub fn namespaced(namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            fields: Vec::new(),
        }
    }

    /// Post fields for a create or update.
    pub fn from_draft(draft: &PostDraft) -> Self {
        Self::namespaced(POST_NAMESPACE)
            .text("title", draft.title.clone())
            .text("body", draft.body.clone())
            .optional(
                "image",
                draft.image.clone().map(FormValue::File),
            )
    }

    fn key(&self, name: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}[{name}]"),
            None => name.to_string(),
        }
    }

    /// Add a text field.
    pub fn text(self, name: &str, value: impl Into<String>) -> Self {
        self.optional(name, Some(FormValue::Text(value.into())))
    }

    /// Add a timestamp field.
    pub fn timestamp(self, name: &str, value: DateTime<Utc>) -> Self {
        self.optional(name, Some(FormValue::Timestamp(value)))
    }

    /// Add a field when `value` is present; `None` adds nothing.
    pub fn optional(mut self, name: &str, value: Option<FormValue>) -> Self {
        if let Some(value) = value {
            let key = self.key(name);
            self.fields.push((key, value));
        }
        self
    }

    /// Encoded keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    /// Value stored under an encoded key.
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// One line per field: `key = value`, files as `key = <file name (type, n bytes)>`.
    pub fn describe(&self) -> String {
        self.fields
            .iter()
            .map(|(key, value)| match value {
                FormValue::Text(text) => format!("{key} = {text}"),
                FormValue::Timestamp(ts) => format!("{key} = {}", encode_timestamp(ts)),
                FormValue::File(file) => format!(
                    "{key} = <{} ({}, {} bytes)>",
                    file.file_name,
                    file.content_type,
                    file.bytes.len()
                ),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the multipart body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Attachment`] when a file part carries an invalid
    /// content type.
    pub fn into_multipart(self) -> Result<Form, ApiError> {
        let mut form = Form::new();
        for (key, value) in self.fields {
            form = match value {
                FormValue::Text(text) => form.text(key, text),
                FormValue::Timestamp(ts) => form.text(key, encode_timestamp(&ts)),
                FormValue::File(file) => {
                    let part = Part::bytes(file.bytes)
                        .file_name(file.file_name.clone())
                        .mime_str(&file.content_type)
                        .map_err(|e| ApiError::Attachment {
                            path: PathBuf::from(&file.file_name),
                            reason: e.to_string(),
                        })?;
                    form.part(key, part)
                }
            };
        }
        Ok(form)
    }
}

fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}
