//! Category entity - An ordered tab of products within a menu.
//!
//! `sort_order` is a dense integer sequence per menu. The reorder coordinator
//! rewrites every row's position after a drag gesture, so gaps only appear
//! transiently after deletes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Menu this category belongs to
    pub menu_id: i64,
    /// Display name of the category
    pub name: String,
    /// Optional short tagline shown under the name
    pub subtitle: Option<String>,
    /// Header image URL on the CDN
    pub image_url: Option<String>,
    /// Display position within the menu
    pub sort_order: i32,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each category belongs to one menu
    #[sea_orm(
        belongs_to = "super::menu::Entity",
        from = "Column::MenuId",
        to = "super::menu::Column::Id"
    )]
    Menu,
    /// One category has many products
    #[sea_orm(has_many = "super::product::Entity")]
    Products,
}

impl Related<super::menu::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Menu.def()
    }
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
