//! Menu entity - Top-level grouping for categories (e.g., "Dine In",
//! "Eyewear Collection").

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menus")]
pub struct Model {
    /// Unique identifier for the menu
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the menu
    pub name: String,
    /// Display position among menus
    pub sort_order: i32,
    /// Whether the menu is shown at all
    pub is_active: bool,
}

/// Defines relationships between Menu and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One menu has many categories
    #[sea_orm(has_many = "super::category::Entity")]
    Categories,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
