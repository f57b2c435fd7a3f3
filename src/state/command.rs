//! Effects requested by state transitions and the results they produce.
//!
//! State never performs I/O. Transitions return [`Command`]s; the shell
//! executes them and feeds each outcome back as a [`ServiceEvent`].

use super::detail::DetailTicket;
use super::post_form::{FormMode, FormSubmission};
use super::posts::FetchTicket;
use crate::model::{ApiError, Post, PostCollection, PostId};

/// Work for the shell to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run a list or search retrieval.
    FetchPosts(FetchTicket),
    /// Delete a post.
    DeletePost(PostId),
    /// Load one post for the detail or edit screen.
    LoadPost(DetailTicket),
    /// Create a post from a submitted form.
    CreatePost(FormSubmission),
    /// Update a post from a submitted form.
    UpdatePost(PostId, FormSubmission),
}

/// Result of an executed [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceEvent {
    /// A list or search retrieval finished.
    PostsFetched {
        /// Ticket the retrieval was issued with.
        ticket: FetchTicket,
        /// Retrieved page.
        result: Result<PostCollection, ApiError>,
    },
    /// A delete finished.
    PostDeleted {
        /// Deleted post.
        id: PostId,
        /// Outcome.
        result: Result<(), ApiError>,
    },
    /// A single-post load finished.
    PostLoaded {
        /// Ticket the load was issued with.
        ticket: DetailTicket,
        /// Loaded post.
        result: Result<Post, ApiError>,
    },
    /// A create or update finished.
    PostSaved {
        /// Which form submitted.
        mode: FormMode,
        /// Saved post as returned by the server.
        result: Result<Post, ApiError>,
    },
}
