//! Engagement counter shapes returned by the public endpoints.

use serde::Serialize;

/// Current like state of a post for one guest.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeState {
    pub likes: i64,
    pub is_liked: bool,
}

/// Authoritative view count of a post.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ViewCount {
    pub views: i64,
}
