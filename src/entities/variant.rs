//! Variant entity - A purchasable variation of a product (size, color, pack).
//!
//! Variant identity drives save-time reconciliation: submitted rows carrying a
//! persisted id are updates, rows without one are inserts, and persisted rows
//! missing from a submission are deletes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Variant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "variants")]
pub struct Model {
    /// Unique identifier for the variant
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product this variant belongs to
    pub product_id: i64,
    /// Display name (e.g., "Large", "Matte Black")
    pub name: String,
    /// Price of this variant
    pub price: f64,
    /// Optional stock-keeping unit
    pub sku: Option<String>,
    /// Units in stock
    pub stock_quantity: i32,
    /// Display position within the product, rewritten on every save
    pub sort_order: i32,
}

/// Defines relationships between Variant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each variant belongs to one product
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
