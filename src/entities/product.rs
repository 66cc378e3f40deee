//! Product entity - Represents a sellable item within a category.
//!
//! The marketing badge is a single enum column; the legacy five-boolean wire
//! encoding only exists as a conversion at the edge (see `core::product`).
//! Child rows (variants, images, attributes, specifications) live in their
//! own tables.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Category this product is listed under
    pub category_id: i64,
    /// Display name of the product
    pub name: String,
    /// Optional long-form description
    pub description: Option<String>,
    /// Primary image URL on the CDN
    pub image_url: Option<String>,
    /// Base price before any product-level discount
    pub base_price: f64,
    /// Product-level discount percentage (0-100)
    pub discount_percentage: i32,
    /// The single marketing badge attached to this product
    pub badge: ProductBadge,
    /// Optional eyewear attribute: frame material
    pub frame_material: Option<String>,
    /// Optional eyewear attribute: lens type
    pub lens_type: Option<String>,
    /// Display position within the category
    pub sort_order: i32,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// A single marketing label attached to a product.
///
/// At most one badge is ever shown; the enum makes the exclusivity
/// structural instead of relying on form-level checks.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ProductBadge {
    /// No marketing label
    #[default]
    #[sea_orm(string_value = "none")]
    NoBadge,
    /// "Hot Item"
    #[sea_orm(string_value = "hot_item")]
    HotItem,
    /// "New Arrival"
    #[sea_orm(string_value = "new_arrival")]
    NewArrival,
    /// "Best Seller"
    #[sea_orm(string_value = "best_seller")]
    BestSeller,
    /// "Featured"
    #[sea_orm(string_value = "featured")]
    Featured,
    /// "On Sale"
    #[sea_orm(string_value = "on_sale")]
    OnSale,
}

/// Defines relationships between Product and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each product belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One product has many variants
    #[sea_orm(has_many = "super::variant::Entity")]
    Variants,
    /// One product has many additional images
    #[sea_orm(has_many = "super::product_image::Entity")]
    Images,
    /// One product has many attributes
    #[sea_orm(has_many = "super::product_attribute::Entity")]
    Attributes,
    /// One product has many specifications
    #[sea_orm(has_many = "super::product_specification::Entity")]
    Specifications,
    /// One product can be discounted by many deals over time
    #[sea_orm(has_many = "super::deal::Entity")]
    Deals,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::variant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Variants.def()
    }
}

impl Related<super::deal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Deals.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
