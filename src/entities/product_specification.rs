//! Product specification line (label/value), ordered for display.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product specification database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_specifications")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product this specification belongs to
    pub product_id: i64,
    /// Specification label (e.g., "Lens Width")
    pub label: String,
    /// Specification value (e.g., "52 mm")
    pub value: String,
    /// Display position
    pub sort_order: i32,
}

/// Defines relationships between `ProductSpecification` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each specification belongs to one product
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
