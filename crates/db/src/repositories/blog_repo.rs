//! Repository for the `blog_posts` and `blog_post_tags` tables.

use sqlx::PgPool;

use meridian_core::types::DbId;

use crate::models::blog::{BlogListParams, BlogPost, CreateBlogPost, UpdateBlogPost};
use crate::models::taxonomy::Tag;

/// Single source of truth for the column set every query returns.
const COLUMNS: &str = "id, title, slug, excerpt, body, author_name, category_id, \
                        hero_image_url, is_published, published_at, view_count, \
                        created_at, updated_at";

/// `COLUMNS` with the `p.` alias used by the filtered listing.
const P_COLUMNS: &str = "p.id, p.title, p.slug, p.excerpt, p.body, p.author_name, \
                          p.category_id, p.hero_image_url, p.is_published, \
                          p.published_at, p.view_count, p.created_at, p.updated_at";

/// Default page size for the public listing.
const DEFAULT_LIMIT: i64 = 20;

/// Maximum page size for the public listing.
const MAX_LIMIT: i64 = 100;

/// Provides CRUD operations for blog posts and their tag links.
pub struct BlogRepo;

impl BlogRepo {
    /// Insert a new blog post, returning the created row. `published_at`
    /// is stamped when the post is created already published.
    pub async fn create(
        pool: &PgPool,
        slug: &str,
        input: &CreateBlogPost,
    ) -> Result<BlogPost, sqlx::Error> {
        let is_published = input.is_published.unwrap_or(false);
        let query = format!(
            "INSERT INTO blog_posts
                 (title, slug, excerpt, body, author_name, category_id, hero_image_url,
                  is_published, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                     CASE WHEN $8 THEN NOW() ELSE NULL END)
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.excerpt)
            .bind(input.body.as_deref().unwrap_or(""))
            .bind(input.author_name.as_deref().unwrap_or(""))
            .bind(input.category_id)
            .bind(&input.hero_image_url)
            .bind(is_published)
            .fetch_one(pool)
            .await?;

        if let Some(tag_ids) = &input.tag_ids {
            Self::replace_tags(pool, post.id, tag_ids).await?;
        }
        Ok(post)
    }

    /// Find a blog post by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a blog post by slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let published_clause = if published_only {
            " AND is_published = true"
        } else {
            ""
        };
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1{published_clause}");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List published posts newest-first with optional category and tag
    /// slug filters.
    pub async fn list_published(
        pool: &PgPool,
        params: &BlogListParams,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        let mut conditions = vec!["p.is_published = true".to_string()];
        let mut param_idx: usize = 1;

        if params.category.is_some() {
            conditions.push(format!(
                "p.category_id = (SELECT id FROM categories WHERE slug = ${param_idx})"
            ));
            param_idx += 1;
        }
        if params.tag.is_some() {
            conditions.push(format!(
                "p.id IN (SELECT pt.post_id FROM blog_post_tags pt
                          JOIN tags t ON t.id = pt.tag_id
                          WHERE t.slug = ${param_idx})"
            ));
            param_idx += 1;
        }

        let query = format!(
            "SELECT {P_COLUMNS} FROM blog_posts p
             WHERE {}
             ORDER BY p.published_at DESC NULLS LAST, p.id DESC
             LIMIT ${param_idx} OFFSET ${}",
            conditions.join(" AND "),
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, BlogPost>(&query);
        if let Some(category) = &params.category {
            q = q.bind(category);
        }
        if let Some(tag) = &params.tag {
            q = q.bind(tag);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// List all posts for the back office, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts ORDER BY created_at DESC");
        sqlx::query_as::<_, BlogPost>(&query).fetch_all(pool).await
    }

    /// Update a blog post. Only non-`None` fields in `input` are applied.
    /// Publishing for the first time stamps `published_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                body = COALESCE($5, body),
                author_name = COALESCE($6, author_name),
                category_id = COALESCE($7, category_id),
                hero_image_url = COALESCE($8, hero_image_url),
                is_published = COALESCE($9, is_published),
                published_at = CASE
                    WHEN $9 = true AND published_at IS NULL THEN NOW()
                    ELSE published_at
                END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let post = sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.excerpt)
            .bind(&input.body)
            .bind(&input.author_name)
            .bind(input.category_id)
            .bind(&input.hero_image_url)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await?;

        if let (Some(post), Some(tag_ids)) = (&post, &input.tag_ids) {
            Self::replace_tags(pool, post.id, tag_ids).await?;
        }
        Ok(post)
    }

    /// Delete a blog post. Cascade deletes tag links, comments, likes,
    /// and view marks.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace a post's tag link set wholesale.
    pub async fn replace_tags(
        pool: &PgPool,
        post_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM blog_post_tags WHERE post_id = $1")
            .bind(post_id)
            .execute(pool)
            .await?;
        if !tag_ids.is_empty() {
            sqlx::query(
                "INSERT INTO blog_post_tags (post_id, tag_id)
                 SELECT $1, tag_id FROM UNNEST($2::bigint[]) AS tag_id
                 ON CONFLICT (post_id, tag_id) DO NOTHING",
            )
            .bind(post_id)
            .bind(tag_ids)
            .execute(pool)
            .await?;
        }
        Ok(())
    }

    /// List the tags linked to a post, alphabetically.
    pub async fn tags_for_post(pool: &PgPool, post_id: DbId) -> Result<Vec<Tag>, sqlx::Error> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.id, t.name, t.slug, t.created_at, t.updated_at
             FROM blog_post_tags pt
             JOIN tags t ON t.id = pt.tag_id
             WHERE pt.post_id = $1
             ORDER BY t.name",
        )
        .bind(post_id)
        .fetch_all(pool)
        .await
    }
}
