//! Seed data loading from a TOML file.
//!
//! Initial menus and expense categories can be declared in `seed.toml` and
//! applied on first run. Seeding is idempotent: rows are inserted only when
//! no row with the same name exists yet.

use crate::{
    entities::{ExpenseCategory, Menu, expense_category, menu},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// The entire seed file.
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// Menus to create when missing
    #[serde(default)]
    pub menus: Vec<MenuSeed>,
    /// Expense categories to create when missing
    #[serde(default)]
    pub expense_categories: Vec<ExpenseCategorySeed>,
}

/// One seeded menu.
#[derive(Debug, Deserialize, Clone)]
pub struct MenuSeed {
    /// Menu name
    pub name: String,
}

/// One seeded expense category.
#[derive(Debug, Deserialize, Clone)]
pub struct ExpenseCategorySeed {
    /// Category name
    pub name: String,
    /// Optional display color
    pub color: Option<String>,
}

/// Parses seed configuration from TOML text.
///
/// # Errors
/// Returns a configuration error for invalid TOML or missing fields.
pub fn parse_seed_config(contents: &str) -> Result<SeedConfig> {
    toml::from_str(contents).map_err(|err| Error::Config {
        message: format!("Failed to parse seed file: {err}"),
    })
}

/// Loads seed configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_seed_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|err| Error::Config {
        message: format!("Failed to read seed file: {err}"),
    })?;
    parse_seed_config(&contents)
}

/// Applies the seed: inserts each declared menu and expense category unless
/// a row with the same name already exists.
pub async fn apply_seed(db: &DatabaseConnection, config: &SeedConfig) -> Result<()> {
    for seed in &config.menus {
        let exists = Menu::find()
            .filter(menu::Column::Name.eq(seed.name.clone()))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let last = Menu::find()
            .order_by_desc(menu::Column::SortOrder)
            .one(db)
            .await?;
        let sort_order = last.map_or(0, |m| m.sort_order + 1);

        menu::ActiveModel {
            name: Set(seed.name.clone()),
            sort_order: Set(sort_order),
            is_active: Set(true),
            ..Default::default()
        }
        .insert(db)
        .await?;
        info!("seeded menu \"{}\"", seed.name);
    }

    for seed in &config.expense_categories {
        let exists = ExpenseCategory::find()
            .filter(expense_category::Column::Name.eq(seed.name.clone()))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        expense_category::ActiveModel {
            name: Set(seed.name.clone()),
            color: Set(seed.color.clone()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        info!("seeded expense category \"{}\"", seed.name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    const SEED: &str = r##"
        [[menus]]
        name = "Dine In"

        [[menus]]
        name = "Takeaway"

        [[expense_categories]]
        name = "Food"
        color = "#ef4444"

        [[expense_categories]]
        name = "Travel"
    "##;

    #[test]
    fn test_parse_seed_config() {
        let config = parse_seed_config(SEED).unwrap();
        assert_eq!(config.menus.len(), 2);
        assert_eq!(config.expense_categories.len(), 2);
        assert_eq!(config.expense_categories[0].color.as_deref(), Some("#ef4444"));
        assert!(config.expense_categories[1].color.is_none());
    }

    #[test]
    fn test_parse_seed_config_empty_sections() {
        let config = parse_seed_config("").unwrap();
        assert!(config.menus.is_empty());
        assert!(config.expense_categories.is_empty());
    }

    #[test]
    fn test_parse_seed_config_invalid() {
        assert!(parse_seed_config("menus = 3").is_err());
    }

    #[tokio::test]
    async fn test_apply_seed_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_seed_config(SEED).unwrap();

        apply_seed(&db, &config).await?;
        apply_seed(&db, &config).await?;

        let menus = Menu::find().all(&db).await?;
        assert_eq!(menus.len(), 2);
        // Positions are dense even across repeated seeding.
        let orders: Vec<i32> = menus.iter().map(|m| m.sort_order).collect();
        assert!(orders.contains(&0) && orders.contains(&1));

        let categories = ExpenseCategory::find().all(&db).await?;
        assert_eq!(categories.len(), 2);

        Ok(())
    }
}
