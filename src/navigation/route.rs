//! Screens addressed by location paths.

use crate::model::PostId;

/// A screen of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Paginated, searchable list of posts (`/` or `/posts`).
    List,
    /// Form for a new post (`/posts/new`).
    New,
    /// A single post (`/posts/{id}`).
    Detail(PostId),
    /// Form editing an existing post (`/posts/{id}/edit`).
    Edit(PostId),
    /// Any path that matches no screen.
    NotFound,
}

impl Route {
    /// Resolve a path. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] | ["posts"] => Route::List,
            ["posts", "new"] => Route::New,
            ["posts", id] => id.parse().map(Route::Detail).unwrap_or(Route::NotFound),
            ["posts", id, "edit"] => id.parse().map(Route::Edit).unwrap_or(Route::NotFound),
            _ => Route::NotFound,
        }
    }

    /// Canonical path of this route.
    pub fn path(self) -> String {
        match self {
            Route::List | Route::NotFound => "/posts".to_string(),
            Route::New => "/posts/new".to_string(),
            Route::Detail(id) => format!("/posts/{id}"),
            Route::Edit(id) => format!("/posts/{id}/edit"),
        }
    }
}
