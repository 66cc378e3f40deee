//! Session entity - A server-issued login session.
//!
//! The token is an opaque random string; expiry is enforced server-side on
//! every authentication, so logout and deactivation take effect immediately.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Session database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    /// Unique identifier for the session
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Opaque random token handed to the client
    #[sea_orm(unique)]
    pub token: String,
    /// User this session belongs to
    pub user_id: i64,
    /// When the session was minted
    pub created_at: DateTime,
    /// When the session stops being accepted
    pub expires_at: DateTime,
}

/// Defines relationships between Session and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each session belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
