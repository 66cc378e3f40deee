//! Menu business logic.

use crate::{
    entities::{Category, Menu, category, menu},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all menus in display order.
pub async fn list_menus(db: &DatabaseConnection) -> Result<Vec<menu::Model>> {
    Menu::find()
        .order_by_asc(menu::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves active menus in display order.
pub async fn list_active_menus(db: &DatabaseConnection) -> Result<Vec<menu::Model>> {
    Menu::find()
        .filter(menu::Column::IsActive.eq(true))
        .order_by_asc(menu::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a new menu, appended at the end.
pub async fn create_menu(db: &DatabaseConnection, name: String) -> Result<menu::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Menu name cannot be empty".to_string(),
        });
    }

    let last = Menu::find()
        .order_by_desc(menu::Column::SortOrder)
        .one(db)
        .await?;
    let sort_order = last.map_or(0, |m| m.sort_order + 1);

    let created = menu::ActiveModel {
        name: Set(name.trim().to_string()),
        sort_order: Set(sort_order),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(menu_id = created.id, "created menu \"{}\"", created.name);
    Ok(created)
}

/// Renames a menu and/or toggles its visibility.
pub async fn update_menu(
    db: &DatabaseConnection,
    menu_id: i64,
    name: String,
    is_active: bool,
) -> Result<menu::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Menu name cannot be empty".to_string(),
        });
    }

    let existing = Menu::find_by_id(menu_id)
        .one(db)
        .await?
        .ok_or(Error::MenuNotFound { id: menu_id })?;

    let mut active: menu::ActiveModel = existing.into();
    active.name = Set(name.trim().to_string());
    active.is_active = Set(is_active);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a menu. Refused while categories still reference it.
pub async fn delete_menu(db: &DatabaseConnection, menu_id: i64) -> Result<()> {
    let category_count = Category::find()
        .filter(category::Column::MenuId.eq(menu_id))
        .count(db)
        .await?;
    if category_count > 0 {
        return Err(Error::Validation {
            message: format!("Menu still has {category_count} categories; delete them first"),
        });
    }

    let result = Menu::delete_by_id(menu_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::MenuNotFound { id: menu_id });
    }
    info!(menu_id, "deleted menu");
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_menu_appends_sort_order() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_menu(&db, "Breakfast".to_string()).await?;
        let second = create_menu(&db, "Dinner".to_string()).await?;
        assert_eq!(first.sort_order, 0);
        assert_eq!(second.sort_order, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_menu_rejects_empty_name() -> Result<()> {
        let db = setup_test_db().await?;
        let result = create_menu(&db, "   ".to_string()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_active_menus_filters() -> Result<()> {
        let db = setup_test_db().await?;
        let visible = create_menu(&db, "Visible".to_string()).await?;
        let hidden = create_menu(&db, "Hidden".to_string()).await?;
        update_menu(&db, hidden.id, "Hidden".to_string(), false).await?;

        let active = list_active_menus(&db).await?;
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, visible.id);

        let all = list_menus(&db).await?;
        assert_eq!(all.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_menu_refused_with_categories() -> Result<()> {
        let db = setup_test_db().await?;
        let menu = create_test_menu(&db, "Menu").await?;
        create_test_category(&db, menu.id, "Category").await?;

        let result = delete_menu(&db, menu.id).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_menu_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_menu(&db, 7).await;
        assert!(matches!(result, Err(Error::MenuNotFound { id: 7 })));
        Ok(())
    }
}
