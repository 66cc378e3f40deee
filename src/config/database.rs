//! Database configuration module.
//!
//! Handles `SQLite` connection and table creation using `SeaORM`. Tables are
//! generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema matches the
//! Rust struct definitions without manual SQL.

use crate::entities::{
    Banner, BlogPost, Category, Deal, Expense, ExpenseCategory, ExpenseSubcategory, Menu, Product,
    ProductAttribute, ProductImage, ProductSpecification, Session, Supplier, User, Variant,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    db.execute(builder.build(&schema.create_table_from_entity(User)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Session)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Menu)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Category)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Product)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Variant)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ProductImage)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ProductAttribute)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ProductSpecification)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Deal)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ExpenseCategory)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(ExpenseSubcategory)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Expense)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Supplier)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Banner)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(BlogPost)))
        .await?;

    Ok(())
}
