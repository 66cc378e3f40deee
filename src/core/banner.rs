//! Promotional banner business logic.

use crate::{
    entities::{Banner, banner},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Retrieves all banners in display order.
pub async fn list_banners(db: &DatabaseConnection) -> Result<Vec<banner::Model>> {
    Banner::find()
        .order_by_asc(banner::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves banners that are currently shown, in display order.
pub async fn list_active_banners(db: &DatabaseConnection) -> Result<Vec<banner::Model>> {
    Banner::find()
        .filter(banner::Column::IsActive.eq(true))
        .order_by_asc(banner::Column::Position)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a banner, appended at the end.
pub async fn create_banner(
    db: &DatabaseConnection,
    title: String,
    subtitle: Option<String>,
    image_url: String,
    link_url: Option<String>,
) -> Result<banner::Model> {
    if title.trim().is_empty() {
        return Err(Error::Validation {
            message: "Banner title cannot be empty".to_string(),
        });
    }
    if image_url.trim().is_empty() {
        return Err(Error::Validation {
            message: "Banner image is required".to_string(),
        });
    }

    let last = Banner::find()
        .order_by_desc(banner::Column::Position)
        .one(db)
        .await?;
    let position = last.map_or(0, |b| b.position + 1);

    let created = banner::ActiveModel {
        title: Set(title.trim().to_string()),
        subtitle: Set(subtitle),
        image_url: Set(image_url),
        link_url: Set(link_url),
        position: Set(position),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(banner_id = created.id, "created banner");
    Ok(created)
}

/// Updates a banner's content fields.
pub async fn update_banner(
    db: &DatabaseConnection,
    banner_id: i64,
    title: String,
    subtitle: Option<String>,
    image_url: String,
    link_url: Option<String>,
) -> Result<banner::Model> {
    if title.trim().is_empty() {
        return Err(Error::Validation {
            message: "Banner title cannot be empty".to_string(),
        });
    }

    let existing = Banner::find_by_id(banner_id)
        .one(db)
        .await?
        .ok_or(Error::BannerNotFound { id: banner_id })?;

    let mut active: banner::ActiveModel = existing.into();
    active.title = Set(title.trim().to_string());
    active.subtitle = Set(subtitle);
    active.image_url = Set(image_url);
    active.link_url = Set(link_url);
    active.update(db).await.map_err(Into::into)
}

/// Flips a banner's visibility.
pub async fn toggle_visibility(db: &DatabaseConnection, banner_id: i64) -> Result<banner::Model> {
    let existing = Banner::find_by_id(banner_id)
        .one(db)
        .await?
        .ok_or(Error::BannerNotFound { id: banner_id })?;

    let was_active = existing.is_active;
    let mut active: banner::ActiveModel = existing.into();
    active.is_active = Set(!was_active);
    active.update(db).await.map_err(Into::into)
}

/// Deletes a banner.
pub async fn delete_banner(db: &DatabaseConnection, banner_id: i64) -> Result<()> {
    let result = Banner::delete_by_id(banner_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::BannerNotFound { id: banner_id });
    }
    Ok(())
}
