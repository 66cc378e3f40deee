//! Blog post business logic and the publish workflow.
//!
//! `is_published` and `published_at` always move together: publishing sets
//! both, unpublishing clears both. A post is never live with a missing
//! timestamp or vice versa.

use crate::{
    entities::{BlogPost, blog_post},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Fields accepted by blog post create and update operations.
#[derive(Debug, Clone)]
pub struct BlogPostInput {
    /// Post title
    pub title: String,
    /// URL-safe identifier; derived from the title when empty
    pub slug: Option<String>,
    /// Optional short summary
    pub excerpt: Option<String>,
    /// Post body
    pub content: String,
    /// Optional cover image URL
    pub image_url: Option<String>,
}

/// Lowercases, keeps alphanumerics, and collapses everything else into
/// single hyphens (e.g., "Summer Sale: 20% Off!" -> "summer-sale-20-off").
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

async fn resolve_slug(
    db: &DatabaseConnection,
    input: &BlogPostInput,
    existing_id: Option<i64>,
) -> Result<String> {
    let slug = match &input.slug {
        Some(slug) if !slug.trim().is_empty() => slug.trim().to_string(),
        _ => slugify(&input.title),
    };
    if slug.is_empty() {
        return Err(Error::Validation {
            message: "Blog post slug cannot be empty".to_string(),
        });
    }

    let collision = BlogPost::find()
        .filter(blog_post::Column::Slug.eq(slug.clone()))
        .one(db)
        .await?;
    if let Some(other) = collision {
        if existing_id != Some(other.id) {
            return Err(Error::Validation {
                message: format!("Slug \"{slug}\" is already in use"),
            });
        }
    }
    Ok(slug)
}

fn validate_post_input(input: &BlogPostInput) -> Result<()> {
    if input.title.trim().is_empty() {
        return Err(Error::Validation {
            message: "Blog post title cannot be empty".to_string(),
        });
    }
    if input.content.trim().is_empty() {
        return Err(Error::Validation {
            message: "Blog post content cannot be empty".to_string(),
        });
    }
    Ok(())
}

/// Retrieves all posts in display order.
pub async fn list_posts(db: &DatabaseConnection) -> Result<Vec<blog_post::Model>> {
    BlogPost::find()
        .order_by_asc(blog_post::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves live posts in display order.
pub async fn list_published_posts(db: &DatabaseConnection) -> Result<Vec<blog_post::Model>> {
    BlogPost::find()
        .filter(blog_post::Column::IsPublished.eq(true))
        .order_by_asc(blog_post::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a post by its slug.
pub async fn get_post_by_slug(
    db: &DatabaseConnection,
    slug: &str,
) -> Result<Option<blog_post::Model>> {
    BlogPost::find()
        .filter(blog_post::Column::Slug.eq(slug))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a draft post, appended at the end of the listing.
pub async fn create_post(db: &DatabaseConnection, input: BlogPostInput) -> Result<blog_post::Model> {
    validate_post_input(&input)?;
    let slug = resolve_slug(db, &input, None).await?;

    let last = BlogPost::find()
        .order_by_desc(blog_post::Column::SortOrder)
        .one(db)
        .await?;
    let sort_order = last.map_or(0, |post| post.sort_order + 1);
    let now = chrono::Utc::now().naive_utc();

    let created = blog_post::ActiveModel {
        title: Set(input.title.trim().to_string()),
        slug: Set(slug),
        excerpt: Set(input.excerpt),
        content: Set(input.content),
        image_url: Set(input.image_url),
        sort_order: Set(sort_order),
        is_published: Set(false),
        published_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(post_id = created.id, slug = %created.slug, "created blog post");
    Ok(created)
}

/// Updates a post's content fields. The publish state is untouched; use
/// [`publish_post`] / [`unpublish_post`] for that.
pub async fn update_post(
    db: &DatabaseConnection,
    post_id: i64,
    input: BlogPostInput,
) -> Result<blog_post::Model> {
    validate_post_input(&input)?;
    let slug = resolve_slug(db, &input, Some(post_id)).await?;

    let existing = BlogPost::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::BlogPostNotFound {
            id: post_id.to_string(),
        })?;

    let mut active: blog_post::ActiveModel = existing.into();
    active.title = Set(input.title.trim().to_string());
    active.slug = Set(slug);
    active.excerpt = Set(input.excerpt);
    active.content = Set(input.content);
    active.image_url = Set(input.image_url);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Publishes a post: sets the flag and the timestamp together.
pub async fn publish_post(db: &DatabaseConnection, post_id: i64) -> Result<blog_post::Model> {
    let existing = BlogPost::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::BlogPostNotFound {
            id: post_id.to_string(),
        })?;

    let now = chrono::Utc::now().naive_utc();
    let mut active: blog_post::ActiveModel = existing.into();
    active.is_published = Set(true);
    active.published_at = Set(Some(now));
    active.updated_at = Set(now);

    let published = active.update(db).await?;
    info!(post_id, "published blog post");
    Ok(published)
}

/// Unpublishes a post: clears the flag and the timestamp together.
pub async fn unpublish_post(db: &DatabaseConnection, post_id: i64) -> Result<blog_post::Model> {
    let existing = BlogPost::find_by_id(post_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::BlogPostNotFound {
            id: post_id.to_string(),
        })?;

    let mut active: blog_post::ActiveModel = existing.into();
    active.is_published = Set(false);
    active.published_at = Set(None);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Deletes a post.
pub async fn delete_post(db: &DatabaseConnection, post_id: i64) -> Result<()> {
    let result = BlogPost::delete_by_id(post_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::BlogPostNotFound {
            id: post_id.to_string(),
        });
    }
    Ok(())
}
