//! Shared test utilities.
//!
//! Common helpers for setting up in-memory test databases and creating test
//! entities with sensible defaults.

use crate::{
    config::database::create_tables,
    core::{
        blog::BlogPostInput,
        category, deal,
        deal::DealInput,
        expense,
        expense::ExpenseInput,
        menu, product,
        product::ProductInput,
        supplier::SupplierInput,
    },
    entities::{self, PaymentMethod, ProductBadge},
    errors::Result,
};
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Initializes tracing output for a test run when `RUST_LOG` is set.
/// Safe to call from multiple tests; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Creates a test menu.
pub async fn create_test_menu(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::menu::Model> {
    menu::create_menu(db, name.to_string()).await
}

/// Creates a test category under `menu_id`.
pub async fn create_test_category(
    db: &DatabaseConnection,
    menu_id: i64,
    name: &str,
) -> Result<entities::category::Model> {
    category::create_category(db, menu_id, name.to_string(), None, None).await
}

/// A valid product input with sensible defaults.
///
/// # Defaults
/// * `base_price`: 100.0
/// * `discount_percentage`: 0
/// * `badge`: `NoBadge`
#[must_use]
pub fn test_product_input(category_id: i64, name: &str) -> ProductInput {
    ProductInput {
        category_id,
        name: name.to_string(),
        description: None,
        image_url: None,
        base_price: 100.0,
        discount_percentage: 0,
        badge: ProductBadge::NoBadge,
        frame_material: None,
        lens_type: None,
    }
}

/// Creates a test product under `category_id`.
pub async fn create_test_product(
    db: &DatabaseConnection,
    category_id: i64,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(db, test_product_input(category_id, name)).await
}

/// Sets up a database with one menu, category, and product.
/// Returns (db, menu, category, product) for catalog tests.
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    entities::menu::Model,
    entities::category::Model,
    entities::product::Model,
)> {
    let db = setup_test_db().await?;
    let menu = create_test_menu(&db, "Test Menu").await?;
    let category = create_test_category(&db, menu.id, "Test Category").await?;
    let product = create_test_product(&db, category.id, "Test Product").await?;
    Ok((db, menu, category, product))
}

/// A valid deal input: 100 -> 60, live for the surrounding two hours.
#[must_use]
pub fn test_deal_input(product_id: i64) -> DealInput {
    let now = Utc::now().naive_utc();
    DealInput {
        product_id,
        title: "Test Deal".to_string(),
        description: None,
        original_price: 100.0,
        deal_price: 60.0,
        start_time: now - ChronoDuration::hours(1),
        end_time: now + ChronoDuration::hours(1),
        total_quantity: 10,
        is_featured: false,
        badge_text: None,
        badge_color: None,
    }
}

/// Creates a live test deal for `product_id` via the deal service.
pub async fn create_test_deal(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<entities::deal::Model> {
    deal::create_deal(db, test_deal_input(product_id)).await
}

/// Inserts a deal row directly, bypassing the service, so tests can shape
/// the sold quantity and active flag (which the authoring path never sets).
pub async fn create_custom_deal(
    db: &DatabaseConnection,
    product_id: i64,
    start_offset_hours: i64,
    end_offset_hours: i64,
    total_quantity: i32,
    sold_quantity: i32,
    is_active: bool,
) -> Result<entities::deal::Model> {
    let now = Utc::now().naive_utc();
    entities::deal::ActiveModel {
        product_id: Set(product_id),
        title: Set("Custom Deal".to_string()),
        description: Set(None),
        original_price: Set(100.0),
        deal_price: Set(60.0),
        discount_percentage: Set(40),
        start_time: Set(now + ChronoDuration::hours(start_offset_hours)),
        end_time: Set(now + ChronoDuration::hours(end_offset_hours)),
        total_quantity: Set(total_quantity),
        sold_quantity: Set(sold_quantity),
        is_active: Set(is_active),
        is_featured: Set(false),
        badge_text: Set(None),
        badge_color: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts a user row directly with a placeholder hash. Tests that exercise
/// real credential verification go through `core::auth::register_user`
/// instead.
pub async fn create_test_user(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user::Model> {
    entities::user::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set("$argon2id$v=19$m=19456,t=2,p=1$placeholder$placeholder".to_string()),
        display_name: Set("Test User".to_string()),
        is_active: Set(true),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Sets up a database with one user.
/// Returns (db, user) for expense tests.
pub async fn setup_with_user() -> Result<(DatabaseConnection, entities::user::Model)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db, "test@example.com").await?;
    Ok((db, user))
}

/// A valid expense input with sensible defaults.
///
/// # Defaults
/// * `tax_rate`: 0.0
/// * `payment_method`: Cash
/// * no category or subcategory
#[must_use]
pub fn test_expense_input(user_id: i64, amount: f64, date: NaiveDate) -> ExpenseInput {
    ExpenseInput {
        user_id,
        category_id: None,
        subcategory_id: None,
        amount,
        tax_rate: 0.0,
        payment_method: PaymentMethod::Cash,
        expense_date: date,
        expense_time: chrono::NaiveTime::from_hms_opt(12, 0, 0)
            .unwrap_or_else(|| chrono::NaiveTime::MIN),
        description: None,
    }
}

/// Creates an expense with custom parameters via the expense service.
pub async fn create_custom_expense(
    db: &DatabaseConnection,
    user_id: i64,
    amount: f64,
    tax_rate: f64,
    category_id: Option<i64>,
    payment_method: PaymentMethod,
    date: NaiveDate,
) -> Result<entities::expense::Model> {
    let mut input = test_expense_input(user_id, amount, date);
    input.tax_rate = tax_rate;
    input.category_id = category_id;
    input.payment_method = payment_method;
    expense::create_expense(db, input).await
}

/// Creates a test banner via the banner service.
pub async fn create_test_banner(
    db: &DatabaseConnection,
    title: &str,
) -> Result<entities::banner::Model> {
    crate::core::banner::create_banner(
        db,
        title.to_string(),
        None,
        "https://cdn.example/banner.jpg".to_string(),
        None,
    )
    .await
}

/// A valid supplier input with rating 4.
#[must_use]
pub fn test_supplier_input(name: &str) -> SupplierInput {
    SupplierInput {
        name: name.to_string(),
        contact_person: None,
        phone: None,
        email: None,
        address: None,
        balance: 0.0,
        rating: 4,
        notes: None,
    }
}

/// A valid blog post input.
#[must_use]
pub fn test_post_input(title: &str, slug: Option<&str>) -> BlogPostInput {
    BlogPostInput {
        title: title.to_string(),
        slug: slug.map(ToString::to_string),
        excerpt: None,
        content: "Body text.".to_string(),
        image_url: None,
    }
}
