//! Blog post entity with a publish workflow.
//!
//! `is_published` and `published_at` move together: publishing sets both,
//! unpublishing clears both.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Blog post database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    /// Unique identifier for the post
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Post title
    pub title: String,
    /// URL-safe identifier, unique across posts
    #[sea_orm(unique)]
    pub slug: String,
    /// Optional short summary shown in listings
    pub excerpt: Option<String>,
    /// Post body
    pub content: String,
    /// Optional cover image URL on the CDN
    pub image_url: Option<String>,
    /// Display position in listings
    pub sort_order: i32,
    /// Whether the post is live
    pub is_published: bool,
    /// When the post went live; `None` while unpublished
    pub published_at: Option<DateTime>,
    /// When the post was created
    pub created_at: DateTime,
    /// When the post was last modified
    pub updated_at: DateTime,
}

/// Defines relationships between `BlogPost` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
