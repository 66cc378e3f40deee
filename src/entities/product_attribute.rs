//! Free-form product attribute (name/value pair, unordered).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product attribute database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_attributes")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product this attribute belongs to
    pub product_id: i64,
    /// Attribute name (e.g., "Material")
    pub name: String,
    /// Attribute value (e.g., "Acetate")
    pub value: String,
}

/// Defines relationships between `ProductAttribute` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each attribute belongs to one product
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
