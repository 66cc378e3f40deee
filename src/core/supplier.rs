//! Supplier business logic.

use crate::{
    entities::{Supplier, supplier},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Fields accepted by supplier create and update operations.
#[derive(Debug, Clone)]
pub struct SupplierInput {
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
    /// Outstanding balance owed
    pub balance: f64,
    /// Rating on the 0-5 integer scale
    pub rating: i32,
    /// Optional free-text notes
    pub notes: Option<String>,
}

fn validate_supplier_input(input: &SupplierInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Supplier name cannot be empty".to_string(),
        });
    }
    if !(0..=5).contains(&input.rating) {
        return Err(Error::InvalidRating {
            rating: input.rating,
        });
    }
    if !input.balance.is_finite() {
        return Err(Error::InvalidAmount {
            amount: input.balance,
        });
    }
    Ok(())
}

/// Retrieves all suppliers, alphabetically.
pub async fn list_suppliers(db: &DatabaseConnection) -> Result<Vec<supplier::Model>> {
    Supplier::find()
        .order_by_asc(supplier::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a supplier.
pub async fn create_supplier(
    db: &DatabaseConnection,
    input: SupplierInput,
) -> Result<supplier::Model> {
    validate_supplier_input(&input)?;

    let created = supplier::ActiveModel {
        name: Set(input.name.trim().to_string()),
        contact_person: Set(input.contact_person),
        phone: Set(input.phone),
        email: Set(input.email),
        address: Set(input.address),
        balance: Set(input.balance),
        rating: Set(input.rating),
        is_active: Set(true),
        notes: Set(input.notes),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(supplier_id = created.id, "created supplier \"{}\"", created.name);
    Ok(created)
}

/// Updates a supplier's fields.
pub async fn update_supplier(
    db: &DatabaseConnection,
    supplier_id: i64,
    input: SupplierInput,
) -> Result<supplier::Model> {
    validate_supplier_input(&input)?;

    let existing = Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or(Error::SupplierNotFound { id: supplier_id })?;

    let mut active: supplier::ActiveModel = existing.into();
    active.name = Set(input.name.trim().to_string());
    active.contact_person = Set(input.contact_person);
    active.phone = Set(input.phone);
    active.email = Set(input.email);
    active.address = Set(input.address);
    active.balance = Set(input.balance);
    active.rating = Set(input.rating);
    active.notes = Set(input.notes);
    active.update(db).await.map_err(Into::into)
}

/// Sets a supplier's active flag.
pub async fn set_active(
    db: &DatabaseConnection,
    supplier_id: i64,
    is_active: bool,
) -> Result<supplier::Model> {
    let existing = Supplier::find_by_id(supplier_id)
        .one(db)
        .await?
        .ok_or(Error::SupplierNotFound { id: supplier_id })?;

    let mut active: supplier::ActiveModel = existing.into();
    active.is_active = Set(is_active);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a supplier.
pub async fn delete_supplier(db: &DatabaseConnection, supplier_id: i64) -> Result<()> {
    let result = Supplier::delete_by_id(supplier_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::SupplierNotFound { id: supplier_id });
    }
    Ok(())
}
