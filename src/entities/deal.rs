//! Deal entity - Represents a time-boxed discounted offer on one product.
//!
//! A deal carries its own price pair and time window plus a finite quantity.
//! `discount_percentage` is written by the deal service at save time and is
//! read-only afterwards; the remaining quantity is never stored, it is derived
//! from `total_quantity - sold_quantity`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Deal database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "deals")]
pub struct Model {
    /// Unique identifier for the deal
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Product this deal discounts
    pub product_id: i64,
    /// Display title (e.g., "Weekend Flash Sale")
    pub title: String,
    /// Optional marketing copy shown with the deal
    pub description: Option<String>,
    /// Price before the discount
    pub original_price: f64,
    /// Discounted price, strictly below `original_price`
    pub deal_price: f64,
    /// Whole-number discount, written at save time by the service
    pub discount_percentage: i32,
    /// When the deal opens
    pub start_time: DateTime,
    /// When the deal closes, strictly after `start_time`
    pub end_time: DateTime,
    /// Units available over the deal's lifetime
    pub total_quantity: i32,
    /// Units sold so far
    pub sold_quantity: i32,
    /// Kill switch - an inactive deal reports `Inactive` regardless of time
    pub is_active: bool,
    /// Whether the deal is surfaced in featured placements
    pub is_featured: bool,
    /// Optional badge label (e.g., "HOT")
    pub badge_text: Option<String>,
    /// Optional badge color as a CSS value
    pub badge_color: Option<String>,
    /// When the deal was created
    pub created_at: DateTime,
    /// When the deal was last modified
    pub updated_at: DateTime,
}

impl Model {
    /// Units still available. Derived, never stored.
    #[must_use]
    pub const fn remaining_quantity(&self) -> i32 {
        self.total_quantity - self.sold_quantity
    }
}

/// Defines relationships between Deal and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each deal discounts one product
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
