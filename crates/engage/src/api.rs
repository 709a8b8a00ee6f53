//! REST client for the public engagement endpoints.
//!
//! Wraps the view/like endpoints under `/api/blogs/{slug}` using
//! [`reqwest`]. All counts returned here are server-authoritative; the
//! caller replaces local state with them rather than adjusting
//! optimistically.

use serde::Deserialize;

/// Authoritative view counter for one blog post.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewCount {
    pub views: i64,
}

/// Like counter plus whether the calling guest currently likes the post.
#[derive(Debug, Clone, Deserialize)]
pub struct LikeState {
    pub likes: i64,
    pub is_liked: bool,
}

/// Combined counters for display, produced by
/// [`EngagementApi::fetch_counts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngagementSnapshot {
    pub views: i64,
    pub likes: i64,
    pub is_liked: bool,
}

/// Errors from the engagement REST layer.
#[derive(Debug, thiserror::Error)]
pub enum EngagementApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Engagement API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for one API server.
pub struct EngagementApi {
    client: reqwest::Client,
    base_url: String,
}

impl EngagementApi {
    /// Create a new client for the server at `base_url`
    /// (e.g. `http://localhost:3000`; a trailing slash is tolerated).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`] (useful
    /// for connection pooling when the embedder already has one).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET /api/blogs/{slug}/views` — read the current view count.
    pub async fn fetch_views(&self, slug: &str) -> Result<ViewCount, EngagementApiError> {
        let response = self
            .client
            .get(format!("{}/api/blogs/{slug}/views", self.base_url))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /api/blogs/{slug}/like` — read the like count, and whether
    /// `guest_id` (when given) currently likes the post.
    pub async fn fetch_like_state(
        &self,
        slug: &str,
        guest_id: Option<&str>,
    ) -> Result<LikeState, EngagementApiError> {
        let mut request = self
            .client
            .get(format!("{}/api/blogs/{slug}/like", self.base_url));
        if let Some(guest_id) = guest_id {
            request = request.query(&[("guest_id", guest_id)]);
        }
        Self::parse_response(request.send().await?).await
    }

    /// `POST /api/blogs/{slug}/views` — record one view and return the
    /// updated count. With a `guest_id` the server dedups repeat views
    /// inside its configured window; without one every call increments.
    pub async fn track_view(
        &self,
        slug: &str,
        guest_id: Option<&str>,
    ) -> Result<ViewCount, EngagementApiError> {
        let mut request = self
            .client
            .post(format!("{}/api/blogs/{slug}/views", self.base_url));
        if let Some(guest_id) = guest_id {
            request = request.json(&serde_json::json!({ "guest_id": guest_id }));
        }
        Self::parse_response(request.send().await?).await
    }

    /// `POST /api/blogs/{slug}/like` — toggle this guest's like and
    /// return the resulting state.
    pub async fn toggle_like(
        &self,
        slug: &str,
        guest_id: &str,
    ) -> Result<LikeState, EngagementApiError> {
        let response = self
            .client
            .post(format!("{}/api/blogs/{slug}/like", self.base_url))
            .json(&serde_json::json!({ "guest_id": guest_id }))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Fetch views and like state together. This is the natural poll
    /// operation for a detail page.
    pub async fn fetch_counts(
        &self,
        slug: &str,
        guest_id: Option<&str>,
    ) -> Result<EngagementSnapshot, EngagementApiError> {
        let views = self.fetch_views(slug).await?;
        let like = self.fetch_like_state(slug, guest_id).await?;
        Ok(EngagementSnapshot {
            views: views.views,
            likes: like.likes,
            is_liked: like.is_liked,
        })
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`EngagementApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, EngagementApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(EngagementApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, EngagementApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
