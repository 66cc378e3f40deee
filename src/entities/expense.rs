//! Expense entity - A single spend record with write-time tax derivation.
//!
//! `tax_amount` and `total_amount` are computed when the row is written
//! (`total = amount + amount * tax_rate / 100`) and never re-derived on read.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User who recorded the expense
    pub user_id: i64,
    /// Optional expense category
    pub category_id: Option<i64>,
    /// Optional subcategory within the category
    pub subcategory_id: Option<i64>,
    /// Pre-tax amount
    pub amount: f64,
    /// Tax rate as a percentage
    pub tax_rate: f64,
    /// Tax portion, computed at write time
    pub tax_amount: f64,
    /// Amount including tax, computed at write time
    pub total_amount: f64,
    /// How the expense was paid
    pub payment_method: PaymentMethod,
    /// Calendar date of the expense
    pub expense_date: Date,
    /// Time of day of the expense
    pub expense_time: Time,
    /// Optional free-text note
    pub description: Option<String>,
    /// When the record was created
    pub created_at: DateTime,
}

/// Payment method for an expense.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PaymentMethod {
    /// Paid in cash
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Paid via EasyPaisa mobile wallet
    #[sea_orm(string_value = "easypaisa")]
    EasyPaisa,
    /// Paid via JazzCash mobile wallet
    #[sea_orm(string_value = "jazzcash")]
    JazzCash,
    /// Paid by bank transfer
    #[sea_orm(string_value = "bank")]
    Bank,
    /// Not paid yet
    #[sea_orm(string_value = "unpaid")]
    Unpaid,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Each expense may belong to one category
    #[sea_orm(
        belongs_to = "super::expense_category::Entity",
        from = "Column::CategoryId",
        to = "super::expense_category::Column::Id"
    )]
    Category,
    /// Each expense may belong to one subcategory
    #[sea_orm(
        belongs_to = "super::expense_subcategory::Entity",
        from = "Column::SubcategoryId",
        to = "super::expense_subcategory::Column::Id"
    )]
    Subcategory,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::expense_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
