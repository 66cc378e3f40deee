//! Category business logic.
//!
//! New categories are appended at the end of their menu's ordering; drag
//! reordering is handled by [`crate::core::reorder`], which rewrites every
//! row's `sort_order`.

use crate::{
    entities::{Category, Menu, Product, category, product},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves the categories of a menu in display order.
pub async fn list_categories(
    db: &DatabaseConnection,
    menu_id: i64,
) -> Result<Vec<category::Model>> {
    Category::find()
        .filter(category::Column::MenuId.eq(menu_id))
        .order_by_asc(category::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a category by id.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new category at the end of its menu.
pub async fn create_category(
    db: &DatabaseConnection,
    menu_id: i64,
    name: String,
    subtitle: Option<String>,
    image_url: Option<String>,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Category name cannot be empty".to_string(),
        });
    }

    Menu::find_by_id(menu_id)
        .one(db)
        .await?
        .ok_or(Error::MenuNotFound { id: menu_id })?;

    let last = Category::find()
        .filter(category::Column::MenuId.eq(menu_id))
        .order_by_desc(category::Column::SortOrder)
        .one(db)
        .await?;
    let sort_order = last.map_or(0, |cat| cat.sort_order + 1);

    let created = category::ActiveModel {
        menu_id: Set(menu_id),
        name: Set(name.trim().to_string()),
        subtitle: Set(subtitle),
        image_url: Set(image_url),
        sort_order: Set(sort_order),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        category_id = created.id,
        "created category \"{}\"", created.name
    );
    Ok(created)
}

/// Updates a category's display fields. Ordering is left to the reorder
/// coordinator.
pub async fn update_category(
    db: &DatabaseConnection,
    category_id: i64,
    name: String,
    subtitle: Option<String>,
    image_url: Option<String>,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Category name cannot be empty".to_string(),
        });
    }

    let existing = Category::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or(Error::CategoryNotFound { id: category_id })?;

    let mut active: category::ActiveModel = existing.into();
    active.name = Set(name.trim().to_string());
    active.subtitle = Set(subtitle);
    active.image_url = Set(image_url);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a category. Refused while products still reference it.
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    let product_count = Product::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .count(db)
        .await?;
    if product_count > 0 {
        return Err(Error::Validation {
            message: format!("Category still has {product_count} products; delete them first"),
        });
    }

    let result = Category::delete_by_id(category_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::CategoryNotFound { id: category_id });
    }
    info!(category_id, "deleted category");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_category_appends_dense_ordering() -> Result<()> {
        let db = setup_test_db().await?;
        let menu = create_test_menu(&db, "Menu").await?;

        let a = create_test_category(&db, menu.id, "A").await?;
        let b = create_test_category(&db, menu.id, "B").await?;
        let c = create_test_category(&db, menu.id, "C").await?;
        assert_eq!((a.sort_order, b.sort_order, c.sort_order), (0, 1, 2));

        // Ordering is per menu.
        let other = create_test_menu(&db, "Other").await?;
        let first_in_other = create_test_category(&db, other.id, "X").await?;
        assert_eq!(first_in_other.sort_order, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_unknown_menu() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_category(&db, 404, "Tab".to_string(), None, None).await;
        assert!(matches!(result, Err(Error::MenuNotFound { id: 404 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_category_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let menu = create_test_menu(&db, "Menu").await?;
        let category = create_test_category(&db, menu.id, "Old").await?;

        let updated = update_category(
            &db,
            category.id,
            "New".to_string(),
            Some("Fresh daily".to_string()),
            None,
        )
        .await?;
        assert_eq!(updated.name, "New");
        assert_eq!(updated.subtitle.as_deref(), Some("Fresh daily"));
        // Position untouched by an edit.
        assert_eq!(updated.sort_order, category.sort_order);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_refused_with_products() -> Result<()> {
        let (db, _menu, category, _product) = setup_with_product().await?;
        let result = delete_category(&db, category.id).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_empty_category() -> Result<()> {
        let db = setup_test_db().await?;
        let menu = create_test_menu(&db, "Menu").await?;
        let category = create_test_category(&db, menu.id, "Empty").await?;

        delete_category(&db, category.id).await?;
        assert!(get_category_by_id(&db, category.id).await?.is_none());

        Ok(())
    }
}
