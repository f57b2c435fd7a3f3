//! Single-post loading state for the detail and edit screens.

use super::posts::FetchOutcome;
use crate::model::{ApiError, Post, PostId};
use tracing::error;

/// Permission to load one post and report its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailTicket {
    id: PostId,
    seq: u64,
}

impl DetailTicket {
    /// Post to load.
    pub fn id(&self) -> PostId {
        self.id
    }
}

/// Load status of a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// Request outstanding.
    Loading,
    /// Post available.
    Loaded(Post),
    /// Load failed. Shown with a retry hint instead of loading forever.
    Failed(ApiError),
}

/// A post being shown or edited, keyed by id.
#[derive(Debug, Clone)]
pub struct PostDetail {
    id: PostId,
    latest_seq: u64,
    status: LoadStatus,
}

impl PostDetail {
    /// Start loading `id`. Returns the state and the ticket to execute.
    pub fn load(id: PostId) -> (Self, DetailTicket) {
        let detail = Self {
            id,
            latest_seq: 1,
            status: LoadStatus::Loading,
        };
        let ticket = DetailTicket { id, seq: 1 };
        (detail, ticket)
    }

    /// Post identifier.
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Current load status.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// The loaded post, if any.
    pub fn post(&self) -> Option<&Post> {
        match &self.status {
            LoadStatus::Loaded(post) => Some(post),
            _ => None,
        }
    }

    /// Reload after a failure. Returns `None` unless the last load failed.
    pub fn retry(&mut self) -> Option<DetailTicket> {
        if !matches!(self.status, LoadStatus::Failed(_)) {
            return None;
        }
        Some(self.reload())
    }

    /// Reload unconditionally.
    pub fn reload(&mut self) -> DetailTicket {
        self.latest_seq += 1;
        self.status = LoadStatus::Loading;
        DetailTicket {
            id: self.id,
            seq: self.latest_seq,
        }
    }

    /// Apply a load result. Results for other posts or older tickets are
    /// discarded.
    pub fn complete(
        &mut self,
        ticket: DetailTicket,
        result: Result<Post, ApiError>,
    ) -> FetchOutcome {
        if ticket.id != self.id || ticket.seq != self.latest_seq {
            return FetchOutcome::Stale;
        }

        self.status = match result {
            Ok(post) => LoadStatus::Loaded(post),
            Err(err) => {
                error!(id = %self.id, error = %err, "Failed to fetch the post");
                LoadStatus::Failed(err)
            }
        };
        FetchOutcome::Applied
    }
}
