//! Expense category with a display color for breakdown charts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expense_categories")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name (e.g., "Food", "Travel")
    pub name: String,
    /// Display color as a CSS value, defaulted in the aggregator when absent
    pub color: Option<String>,
}

/// Defines relationships between `ExpenseCategory` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One category has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    /// One category has many subcategories
    #[sea_orm(has_many = "super::expense_subcategory::Entity")]
    Subcategories,
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::expense_subcategory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subcategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
