//! Supplier entity - Flat contact/financial record with a 0-5 rating.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Supplier database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "suppliers")]
pub struct Model {
    /// Unique identifier for the supplier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Company or person name
    pub name: String,
    /// Optional contact person
    pub contact_person: Option<String>,
    /// Optional phone number
    pub phone: Option<String>,
    /// Optional email address
    pub email: Option<String>,
    /// Optional postal address
    pub address: Option<String>,
    /// Outstanding balance owed to the supplier
    pub balance: f64,
    /// Rating on a 0-5 integer scale
    pub rating: i32,
    /// Whether the supplier is currently used
    pub is_active: bool,
    /// Optional free-text notes
    pub notes: Option<String>,
}

/// Defines relationships between Supplier and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
