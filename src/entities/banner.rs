//! Banner entity - Promotional banner with a display position.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Banner database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "banners")]
pub struct Model {
    /// Unique identifier for the banner
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Headline text
    pub title: String,
    /// Optional supporting text
    pub subtitle: Option<String>,
    /// Banner image URL on the CDN
    pub image_url: String,
    /// Optional click-through target
    pub link_url: Option<String>,
    /// Display position among banners
    pub position: i32,
    /// Whether the banner is currently shown
    pub is_active: bool,
}

/// Defines relationships between Banner and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
