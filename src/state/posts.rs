//! Posts data coordinator (pure state transitions).
//!
//! Owns the posts of the current list render and decides which retrieval
//! serves a given page + settled search term. Retrievals are not executed
//! here: [`PostsCoordinator::sync`] hands out a [`FetchTicket`] and the
//! shell reports back through [`PostsCoordinator::complete`].
//!
//! Every ticket carries a monotonically increasing sequence number. Only the
//! latest issued ticket may update state, so a slow response to a superseded
//! request can never overwrite the result of a newer one.

use crate::model::{ApiError, PageRequest, Post, PostCollection, PostId, Retrieval};
use tracing::{debug, error, warn};

/// Sequence number of an issued retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestSeq(u64);

impl RequestSeq {
    /// Raw sequence value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Permission to run one retrieval and report its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: RequestSeq,
    request: PageRequest,
}

impl FetchTicket {
    /// Sequence number of this fetch.
    pub fn seq(&self) -> RequestSeq {
        self.seq
    }

    /// Inputs the fetch was issued for.
    pub fn request(&self) -> &PageRequest {
        &self.request
    }

    /// Retrieval operation to execute.
    pub fn retrieval(&self) -> Retrieval {
        self.request.retrieval()
    }
}

/// What [`PostsCoordinator::complete`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response belonged to the latest request and was applied.
    Applied,
    /// A newer request was issued since; the response was discarded.
    Stale,
}

/// State of the post list.
#[derive(Debug, Clone, Default)]
pub struct PostsCoordinator {
    posts: Vec<Post>,
    total_posts: u64,
    per_page: u32,
    loading: bool,
    error: Option<ApiError>,
    delete_error: Option<ApiError>,
    pending_deletes: Vec<PostId>,
    /// Inputs of the latest issued fetch.
    last_request: Option<PageRequest>,
    latest_seq: u64,
}

impl PostsCoordinator {
    /// Empty coordinator. Nothing is fetched until the first [`sync`](Self::sync).
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Accessors =====

    /// Posts of the last successful fetch, minus optimistic deletions.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Total matching posts reported by the last successful fetch.
    pub fn total_posts(&self) -> u64 {
        self.total_posts
    }

    /// Page size reported by the last successful fetch (0 before any).
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// `ceil(total_posts / per_page)`.
    pub fn total_pages(&self) -> u32 {
        crate::model::total_pages(self.total_posts, self.per_page)
    }

    /// Whether the latest fetch is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Failure of the latest fetch, if it failed.
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    /// Failure of the most recent delete, if it failed.
    pub fn delete_error(&self) -> Option<&ApiError> {
        self.delete_error.as_ref()
    }

    /// Inputs of the latest issued fetch.
    pub fn current_request(&self) -> Option<&PageRequest> {
        self.last_request.as_ref()
    }

    /// Whether a delete of `id` is in flight.
    pub fn is_deleting(&self, id: PostId) -> bool {
        self.pending_deletes.contains(&id)
    }

    // ===== Fetching =====

    /// Issue a fetch if `request` differs from the last issued one.
    ///
    /// The first call always issues. Repeated calls with the same inputs
    /// issue nothing, so this can run on every render.
    pub fn sync(&mut self, request: PageRequest) -> Option<FetchTicket> {
        if self.last_request.as_ref() == Some(&request) {
            return None;
        }
        Some(self.issue(request))
    }

    /// Issue a fetch for the current inputs regardless of change.
    ///
    /// Returns `None` before the first [`sync`](Self::sync).
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        let request = self.last_request.clone()?;
        Some(self.issue(request))
    }

    fn issue(&mut self, request: PageRequest) -> FetchTicket {
        self.latest_seq += 1;
        self.loading = true;
        self.last_request = Some(request.clone());
        debug!(seq = self.latest_seq, ?request, "Issuing posts fetch");
        FetchTicket {
            seq: RequestSeq(self.latest_seq),
            request,
        }
    }

    /// Apply the result of a fetch.
    ///
    /// On success the posts are replaced wholesale and the error cleared. On
    /// failure the error is recorded and the last known posts are kept.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        result: Result<PostCollection, ApiError>,
    ) -> FetchOutcome {
        if ticket.seq.0 != self.latest_seq {
            debug!(
                seq = ticket.seq.0,
                latest = self.latest_seq,
                "Discarding stale posts response"
            );
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(collection) => {
                self.total_posts = collection.total_count();
                self.per_page = collection.per_page();
                self.posts = collection.into_items();
                self.error = None;
            }
            Err(err) => {
                error!(error = %err, "Failed to fetch posts");
                self.error = Some(err);
            }
        }
        FetchOutcome::Applied
    }

    // ===== Deleting =====

    /// Mark a delete of `id` as started.
    ///
    /// Returns `false` if a delete of the same post is already in flight.
    pub fn begin_delete(&mut self, id: PostId) -> bool {
        if self.pending_deletes.contains(&id) {
            return false;
        }
        self.pending_deletes.push(id);
        true
    }

    /// Apply the result of a delete.
    ///
    /// On success the post is removed locally without a re-fetch. On
    /// failure the list is left untouched and the error recorded.
    pub fn complete_delete(&mut self, id: PostId, result: Result<(), ApiError>) {
        self.pending_deletes.retain(|pending| *pending != id);

        match result {
            Ok(()) => {
                let before = self.posts.len();
                self.posts.retain(|post| post.id != id);
                if self.posts.len() < before {
                    self.total_posts = self.total_posts.saturating_sub(1);
                } else {
                    warn!(%id, "Deleted post was not in the current page");
                }
                self.delete_error = None;
            }
            Err(err) => {
                error!(%id, error = %err, "Failed to delete post");
                self.delete_error = Some(err);
            }
        }
    }

    /// Forget the last delete failure (after it has been shown).
    pub fn dismiss_delete_error(&mut self) {
        self.delete_error = None;
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
