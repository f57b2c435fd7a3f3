//! In-process [`PostService`] with the same contract as the REST API.
//!
//! Posts are ordered by recency (creation time, then id, descending) and
//! paged with a fixed page size. Search is a case-insensitive substring
//! match on title OR body.

use super::PostService;
use crate::model::{ApiError, PageNumber, Post, PostCollection, PostDraft, PostId};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Page size of the demo backend.
pub const DEFAULT_PER_PAGE: u32 = 10;

#[derive(Debug, Default)]
struct Store {
    posts: Vec<Post>,
    next_id: u64,
}

/// Post store held in memory.
#[derive(Debug)]
pub struct MemoryPostService {
    store: Mutex<Store>,
    per_page: u32,
}

impl MemoryPostService {
    /// Empty store with `per_page` posts per page (at least 1).
    pub fn new(per_page: u32) -> Self {
        Self::with_posts(Vec::new(), per_page)
    }

    /// Store seeded with `posts`. New ids continue after the highest one.
    pub fn with_posts(posts: Vec<Post>, per_page: u32) -> Self {
        let next_id = posts.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1;
        Self {
            store: Mutex::new(Store { posts, next_id }),
            per_page: per_page.max(1),
        }
    }

    /// Store with `count` generated posts, newest first, for `--demo`.
    pub fn demo(count: u64) -> Self {
        let now = Utc::now();
        let posts = (1..=count)
            .map(|n| {
                let topic = DEMO_TOPICS[(n as usize) % DEMO_TOPICS.len()];
                let mut post = Post::new(
                    PostId::new(n),
                    format!("{topic} notes #{n}"),
                    format!("Field notes about {} (entry {n}).", topic.to_lowercase()),
                );
                if n % 3 == 0 {
                    post = post.with_image_url(format!("https://picsum.photos/seed/{n}/200"));
                }
                let created = now - ChronoDuration::minutes((count - n) as i64);
                post.created_at = Some(created);
                post.updated_at = Some(created);
                post
            })
            .collect();
        Self::with_posts(posts, DEFAULT_PER_PAGE)
    }

    /// Number of stored posts.
    pub fn len(&self) -> usize {
        self.lock().posts.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn page_of(&self, mut matching: Vec<Post>, page: PageNumber) -> PostCollection {
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        let total = matching.len() as u64;
        let start = (page.get() as usize - 1).saturating_mul(self.per_page as usize);
        let items = matching
            .into_iter()
            .skip(start)
            .take(self.per_page as usize)
            .collect();
        PostCollection::new(items, total, self.per_page)
    }
}

const DEMO_TOPICS: [&str; 6] = ["Rust", "Gardening", "Coffee", "Trains", "Music", "Climbing"];

fn contains_needle(post: &Post, needle: &str) -> bool {
    post.title.to_lowercase().contains(needle) || post.body.to_lowercase().contains(needle)
}

fn image_url(id: PostId, draft: &PostDraft) -> Option<String> {
    draft
        .image
        .as_ref()
        .map(|image| format!("memory://posts/{id}/{}", image.file_name))
}

fn not_found(id: PostId) -> ApiError {
    ApiError::NotFound {
        resource: format!("post {id}"),
    }
}

#[async_trait]
impl PostService for MemoryPostService {
    async fn list_posts(&self, page: PageNumber) -> Result<PostCollection, ApiError> {
        let posts = self.lock().posts.clone();
        Ok(self.page_of(posts, page))
    }

    async fn search_posts(
        &self,
        query: &str,
        page: PageNumber,
    ) -> Result<PostCollection, ApiError> {
        let needle = query.to_lowercase();
        let matching = self
            .lock()
            .posts
            .iter()
            .filter(|post| contains_needle(post, &needle))
            .cloned()
            .collect();
        Ok(self.page_of(matching, page))
    }

    async fn get_post(&self, id: PostId) -> Result<Post, ApiError> {
        self.lock()
            .posts
            .iter()
            .find(|post| post.id == id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn create_post(&self, draft: PostDraft) -> Result<Post, ApiError> {
        let mut store = self.lock();
        let id = PostId::new(store.next_id);
        store.next_id += 1;

        let now = Utc::now();
        let mut post = Post::new(id, draft.title.clone(), draft.body.clone());
        post.image_url = image_url(id, &draft);
        post.created_at = Some(now);
        post.updated_at = Some(now);

        debug!(%id, "Created post in memory");
        store.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: PostId, draft: PostDraft) -> Result<Post, ApiError> {
        let mut store = self.lock();
        let post = store
            .posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or_else(|| not_found(id))?;

        post.title = draft.title.clone();
        post.body = draft.body.clone();
        if let Some(url) = image_url(id, &draft) {
            post.image_url = Some(url);
        }
        post.updated_at = Some(Utc::now());
        Ok(post.clone())
    }

    async fn delete_post(&self, id: PostId) -> Result<(), ApiError> {
        let mut store = self.lock();
        let before = store.posts.len();
        store.posts.retain(|post| post.id != id);
        if store.posts.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }
}
