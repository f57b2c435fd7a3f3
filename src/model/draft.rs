//! Post drafts submitted to create and update operations.

use super::error::ApiError;
use std::path::{Path, PathBuf};

/// A post as submitted by the user, before the server assigns identity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostDraft {
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Image to attach, if one was chosen.
    pub image: Option<ImageUpload>,
}

impl PostDraft {
    /// Draft with text only.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            image: None,
        }
    }

    /// Attach an image.
    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }
}

/// Image file contents ready for a multipart upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name sent in the part's content disposition.
    pub file_name: String,
    /// MIME type of the part.
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    /// Build an upload from in-memory bytes, guessing the type from the name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(Path::new(&file_name)).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read an image from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Attachment`] if the file cannot be read or the
    /// path has no file name.
    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::Attachment {
                path: path.to_path_buf(),
                reason: "path has no file name".to_string(),
            })?
            .to_string();

        let bytes = std::fs::read(path).map_err(|e| ApiError::Attachment {
            path: PathBuf::from(path),
            reason: e.to_string(),
        })?;

        Ok(Self::new(file_name, bytes))
    }
}

/// MIME type guessed from a file extension.
fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
