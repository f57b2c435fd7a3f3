//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod draft;
pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod post;

// Re-export for convenience
pub use draft::{ImageUpload, PostDraft};
pub use error::{ApiError, AppError};
pub use identifiers::{InvalidPostId, PostId};
pub use key_action::KeyAction;
pub use post::{total_pages, PageNumber, PageRequest, Post, PostCollection, Retrieval};
