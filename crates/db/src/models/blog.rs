//! Blog post model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use meridian_core::types::{DbId, Timestamp};

/// A row from the `blog_posts` table. `view_count` is the authoritative
/// engagement counter for the post.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub author_name: String,
    pub category_id: Option<DbId>,
    pub hero_image_url: Option<String>,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub view_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a blog post.
#[derive(Debug, Deserialize)]
pub struct CreateBlogPost {
    pub title: String,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub author_name: Option<String>,
    pub category_id: Option<DbId>,
    pub hero_image_url: Option<String>,
    pub is_published: Option<bool>,
    /// Tag ids to link; replaces nothing on create, sets the initial set.
    pub tag_ids: Option<Vec<DbId>>,
}

/// DTO for updating a blog post. All fields are optional; when `tag_ids`
/// is present the link set is replaced wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateBlogPost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub body: Option<String>,
    pub author_name: Option<String>,
    pub category_id: Option<DbId>,
    pub hero_image_url: Option<String>,
    pub is_published: Option<bool>,
    pub tag_ids: Option<Vec<DbId>>,
}

/// Optional filters for the public blog listing.
#[derive(Debug, Default, Deserialize)]
pub struct BlogListParams {
    pub category: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
