//! Blog API access (impure shell).
//!
//! [`PostService`] is the seam between the state machine's commands and a
//! concrete backend. [`HttpPostService`] talks to the REST API;
//! [`MemoryPostService`] honors the same contract in-process.

pub mod form;
pub mod http;
pub mod memory;

pub use form::{FormFields, FormValue};
pub use http::HttpPostService;
pub use memory::MemoryPostService;

use crate::model::{ApiError, PageNumber, Post, PostCollection, PostDraft, PostId, Retrieval};
use async_trait::async_trait;

/// Operations of the blog API.
#[async_trait]
pub trait PostService: Send + Sync {
    /// One page of all posts, most recent first.
    async fn list_posts(&self, page: PageNumber) -> Result<PostCollection, ApiError>;

    /// One page of posts whose title or body contains `query`.
    async fn search_posts(&self, query: &str, page: PageNumber)
        -> Result<PostCollection, ApiError>;

    /// A single post.
    async fn get_post(&self, id: PostId) -> Result<Post, ApiError>;

    /// Create a post and return it as stored.
    async fn create_post(&self, draft: PostDraft) -> Result<Post, ApiError>;

    /// Replace a post's title, body and (when given) image.
    async fn update_post(&self, id: PostId, draft: PostDraft) -> Result<Post, ApiError>;

    /// Delete a post.
    async fn delete_post(&self, id: PostId) -> Result<(), ApiError>;

    /// Run whichever retrieval a list request resolved to.
    async fn retrieve(&self, retrieval: Retrieval) -> Result<PostCollection, ApiError> {
        match retrieval {
            Retrieval::List { page } => self.list_posts(page).await,
            Retrieval::Search { query, page } => self.search_posts(&query, page).await,
        }
    }
}
