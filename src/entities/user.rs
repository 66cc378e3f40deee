//! User entity - An admin account.
//!
//! Only the argon2 hash of the password is ever stored; plaintext never
//! reaches the database.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login email, unique across users
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC-format password hash
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Name shown in the admin UI
    pub display_name: String,
    /// Deactivated users cannot log in or keep sessions
    pub is_active: bool,
    /// When the account was created
    pub created_at: DateTime,
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many sessions
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
    /// One user has many expenses
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
