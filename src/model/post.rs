//! Post and page types as exchanged with the blog API.

use super::identifiers::PostId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

// ===== Post =====

/// A single blog post as transported by the API.
///
/// `image_url` is `None` when no image is attached, else an absolute
/// fetchable URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned identifier. Never changes.
    pub id: PostId,
    /// Post title.
    pub title: String,
    /// Post body text.
    pub body: String,
    /// URL of the attached image, if any.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Creation timestamp, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Build a post without timestamps.
    pub fn new(id: PostId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            image_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Attach an image URL.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

// ===== PostCollection =====

/// One page of posts plus the totals needed for pagination.
///
/// Invariant: `items.len() <= per_page` and `per_page >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CollectionWire")]
pub struct PostCollection {
    #[serde(rename = "posts")]
    items: Vec<Post>,
    total_count: u64,
    per_page: u32,
}

impl PostCollection {
    /// Build a collection, normalizing `per_page` to at least 1 and
    /// truncating `items` to `per_page`.
    pub fn new(mut items: Vec<Post>, total_count: u64, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        items.truncate(per_page as usize);
        Self {
            items,
            total_count,
            per_page,
        }
    }

    /// Posts on this page, in server order.
    pub fn items(&self) -> &[Post] {
        &self.items
    }

    /// Consume the collection, yielding the posts.
    pub fn into_items(self) -> Vec<Post> {
        self.items
    }

    /// Total number of matching posts across all pages.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Page size used by the server.
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// `ceil(total_count / per_page)`.
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count, self.per_page)
    }
}

/// `ceil(total_posts / per_page)`, saturating at `u32::MAX`.
///
/// A `per_page` of zero yields zero pages.
pub fn total_pages(total_posts: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    let pages = total_posts.div_ceil(u64::from(per_page));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Wire shapes accepted for a collection.
///
/// The paginated endpoints send an envelope; the legacy search endpoint
/// sends a bare array holding every match.
#[derive(Deserialize)]
#[serde(untagged)]
enum CollectionWire {
    Envelope {
        posts: Vec<Post>,
        total_count: u64,
        per_page: u32,
    },
    Bare(Vec<Post>),
}

impl From<CollectionWire> for PostCollection {
    fn from(wire: CollectionWire) -> Self {
        match wire {
            CollectionWire::Envelope {
                posts,
                total_count,
                per_page,
            } => Self::new(posts, total_count, per_page),
            CollectionWire::Bare(posts) => {
                let count = posts.len();
                let per_page = u32::try_from(count).unwrap_or(u32::MAX);
                Self::new(posts, count as u64, per_page)
            }
        }
    }
}

// ===== PageNumber =====

/// A 1-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(NonZeroU32);

impl PageNumber {
    /// The first page.
    pub const FIRST: PageNumber = PageNumber(NonZeroU32::MIN);

    /// Smart constructor: returns `None` for 0.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The raw page number (always >= 1).
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ===== PageRequest =====

/// Inputs of one list render: which page, filtered by which settled term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PageRequest {
    /// Requested page.
    pub page: PageNumber,
    /// Settled search term; empty means "no search".
    pub query: String,
}

impl PageRequest {
    /// Build a request.
    pub fn new(page: PageNumber, query: impl Into<String>) -> Self {
        Self {
            page,
            query: query.into(),
        }
    }

    /// Which retrieval operation serves this request.
    pub fn retrieval(&self) -> Retrieval {
        if self.query.is_empty() {
            Retrieval::List { page: self.page }
        } else {
            Retrieval::Search {
                query: self.query.clone(),
                page: self.page,
            }
        }
    }
}

/// The retrieval operation chosen for a [`PageRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retrieval {
    /// List every post, one page.
    List {
        /// Requested page.
        page: PageNumber,
    },
    /// Search title/body for `query`, one page.
    Search {
        /// Non-empty search term.
        query: String,
        /// Requested page.
        page: PageNumber,
    },
}
