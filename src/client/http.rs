//! REST implementation of [`PostService`] on `reqwest`.

use super::form::FormFields;
use super::PostService;
use crate::model::{ApiError, PageNumber, Post, PostCollection, PostDraft, PostId};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Client for an API rooted at e.g. `http://localhost:3000/api/v1`.
#[derive(Debug, Clone)]
pub struct HttpPostService {
    client: Client,
    base: Url,
}

impl HttpPostService {
    /// Build a client for `api_url`.
    ///
    /// Without `timeout` requests are bounded only by the transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the URL is not an absolute base URL
    /// or the HTTP client cannot be constructed.
    pub fn new(api_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let base = Url::parse(api_url).map_err(|e| ApiError::Network {
            reason: format!("invalid API URL {api_url:?}: {e}"),
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Network {
                reason: format!("API URL {api_url:?} cannot have paths"),
            });
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ApiError::Network {
            reason: format!("failed to create HTTP client: {e}"),
        })?;

        Ok(Self { client, base })
    }

    /// API root all endpoints are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn page_endpoint(&self, segments: &[&str], page: PageNumber, query: Option<&str>) -> Url {
        let mut url = self.endpoint(segments);
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(query) = query {
                pairs.append_pair("q", query);
            }
            pairs.append_pair("page", &page.to_string());
        }
        url
    }

    async fn send_draft(
        &self,
        request: reqwest::RequestBuilder,
        draft: PostDraft,
        resource: String,
    ) -> Result<Post, ApiError> {
        let form = FormFields::from_draft(&draft).into_multipart()?;
        let response = request.multipart(form).send().await.map_err(network)?;
        decode(ensure_success(response, resource)?).await
    }
}

fn network(err: reqwest::Error) -> ApiError {
    ApiError::Network {
        reason: err.to_string(),
    }
}

fn status_error(status: StatusCode) -> ApiError {
    ApiError::Status {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
    }
}

fn ensure_success(response: Response, resource: String) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound { resource });
    }
    if !status.is_success() {
        return Err(status_error(status));
    }
    Ok(response)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body = response.bytes().await.map_err(network)?;
    serde_json::from_slice(&body).map_err(|e| ApiError::Decode {
        reason: e.to_string(),
    })
}

#[async_trait]
impl PostService for HttpPostService {
    #[instrument(skip(self, page), fields(page = page.get()))]
    async fn list_posts(&self, page: PageNumber) -> Result<PostCollection, ApiError> {
        let url = self.page_endpoint(&["posts"], page, None);
        debug!(%url, "Listing posts");
        let response = self.client.get(url).send().await.map_err(network)?;
        decode(ensure_success(response, format!("posts page {page}"))?).await
    }

    #[instrument(skip(self, page), fields(page = page.get()))]
    async fn search_posts(
        &self,
        query: &str,
        page: PageNumber,
    ) -> Result<PostCollection, ApiError> {
        let url = self.page_endpoint(&["search", "posts"], page, Some(query));
        debug!(%url, "Searching posts");
        let response = self.client.get(url).send().await.map_err(network)?;
        decode(ensure_success(response, format!("search page {page}"))?).await
    }

    #[instrument(skip(self))]
    async fn get_post(&self, id: PostId) -> Result<Post, ApiError> {
        let url = self.endpoint(&["posts", &id.to_string()]);
        let response = self.client.get(url).send().await.map_err(network)?;
        decode(ensure_success(response, format!("post {id}"))?).await
    }

    #[instrument(skip_all)]
    async fn create_post(&self, draft: PostDraft) -> Result<Post, ApiError> {
        let request = self.client.post(self.endpoint(&["posts"]));
        self.send_draft(request, draft, "posts".to_string()).await
    }

    #[instrument(skip(self, draft))]
    async fn update_post(&self, id: PostId, draft: PostDraft) -> Result<Post, ApiError> {
        let request = self.client.put(self.endpoint(&["posts", &id.to_string()]));
        self.send_draft(request, draft, format!("post {id}")).await
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, id: PostId) -> Result<(), ApiError> {
        let url = self.endpoint(&["posts", &id.to_string()]);
        let response = self.client.delete(url).send().await.map_err(network)?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound {
                resource: format!("post {id}"),
            }),
            status => Err(status_error(status)),
        }
    }
}
