//! Product business logic - CRUD, save-time variant reconciliation, and the
//! marketing-badge conversion.
//!
//! Saving an edited product is the one multi-write operation in the catalog:
//! the product row is updated, the submitted variant list is diffed against
//! the persisted rows (update / insert / delete), and the simpler child
//! collections (images, attributes, specifications) are replaced wholesale.
//! The whole save runs in one transaction and aborts on the first error, so
//! the caller reports a single failure rather than per-row outcomes.

use crate::{
    entities::{
        Category, Product, ProductAttribute, ProductBadge, ProductImage, ProductSpecification,
        Variant, category, product, product_attribute, product_image, product_specification,
        variant,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::{HashMap, HashSet};
use tracing::info;

/// The legacy five-boolean wire encoding of the marketing badge.
///
/// Only exists at the edge: persisted rows store [`ProductBadge`], and the
/// conversion rejects flag sets with more than one bit set instead of
/// trusting form-level exclusivity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BadgeFlags {
    /// "Hot Item" flag
    pub is_hot_item: bool,
    /// "New Arrival" flag
    pub is_new_arrival: bool,
    /// "Best Seller" flag
    pub is_best_seller: bool,
    /// "Featured" flag
    pub is_featured: bool,
    /// "On Sale" flag
    pub is_on_sale: bool,
}

impl From<ProductBadge> for BadgeFlags {
    fn from(badge: ProductBadge) -> Self {
        let mut flags = Self::default();
        match badge {
            ProductBadge::NoBadge => {}
            ProductBadge::HotItem => flags.is_hot_item = true,
            ProductBadge::NewArrival => flags.is_new_arrival = true,
            ProductBadge::BestSeller => flags.is_best_seller = true,
            ProductBadge::Featured => flags.is_featured = true,
            ProductBadge::OnSale => flags.is_on_sale = true,
        }
        flags
    }
}

impl TryFrom<BadgeFlags> for ProductBadge {
    type Error = Error;

    fn try_from(flags: BadgeFlags) -> Result<Self> {
        let set_count = [
            flags.is_hot_item,
            flags.is_new_arrival,
            flags.is_best_seller,
            flags.is_featured,
            flags.is_on_sale,
        ]
        .iter()
        .filter(|flag| **flag)
        .count();

        if set_count > 1 {
            return Err(Error::Validation {
                message: "At most one marketing badge may be set".to_string(),
            });
        }

        Ok(if flags.is_hot_item {
            Self::HotItem
        } else if flags.is_new_arrival {
            Self::NewArrival
        } else if flags.is_best_seller {
            Self::BestSeller
        } else if flags.is_featured {
            Self::Featured
        } else if flags.is_on_sale {
            Self::OnSale
        } else {
            Self::NoBadge
        })
    }
}

/// Fields accepted by product create and update operations.
#[derive(Debug, Clone)]
pub struct ProductInput {
    /// Category the product is listed under
    pub category_id: i64,
    /// Display name
    pub name: String,
    /// Optional long-form description
    pub description: Option<String>,
    /// Primary image URL
    pub image_url: Option<String>,
    /// Base price
    pub base_price: f64,
    /// Product-level discount percentage (0-100)
    pub discount_percentage: i32,
    /// Marketing badge
    pub badge: ProductBadge,
    /// Optional eyewear attribute: frame material
    pub frame_material: Option<String>,
    /// Optional eyewear attribute: lens type
    pub lens_type: Option<String>,
}

/// One submitted variant row. `id` is `Some` for rows that already exist and
/// `None` for rows created in the form; position in the submitted list is
/// the row's new sort order either way.
#[derive(Debug, Clone)]
pub struct VariantInput {
    /// Persisted id, or `None` for a new row
    pub id: Option<i64>,
    /// Display name
    pub name: String,
    /// Price of this variant
    pub price: f64,
    /// Optional stock-keeping unit
    pub sku: Option<String>,
    /// Units in stock
    pub stock_quantity: i32,
}

/// One submitted attribute (name/value pair).
#[derive(Debug, Clone)]
pub struct AttributeInput {
    /// Attribute name
    pub name: String,
    /// Attribute value
    pub value: String,
}

/// One submitted specification line.
#[derive(Debug, Clone)]
pub struct SpecificationInput {
    /// Specification label
    pub label: String,
    /// Specification value
    pub value: String,
}

/// The full edited-product form as submitted by the side panel.
#[derive(Debug, Clone)]
pub struct ProductForm {
    /// Product-level fields
    pub product: ProductInput,
    /// Ordered variant list to reconcile
    pub variants: Vec<VariantInput>,
    /// Ordered gallery image URLs, replaced wholesale
    pub images: Vec<String>,
    /// Attributes, replaced wholesale
    pub attributes: Vec<AttributeInput>,
    /// Ordered specification lines, replaced wholesale
    pub specifications: Vec<SpecificationInput>,
}

/// What the variant reconciler did for one save.
#[derive(Debug, Clone)]
pub struct VariantReconciliation {
    /// Rows whose id matched a persisted variant
    pub updated: usize,
    /// Rows inserted for submissions without an id
    pub inserted: usize,
    /// Persisted rows deleted because they were absent from the submission
    pub deleted: usize,
    /// The saved variants in submitted order, new ids included
    pub variants: Vec<variant::Model>,
}

/// A product together with its child collections.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    /// The product row
    pub product: product::Model,
    /// Variants in display order
    pub variants: Vec<variant::Model>,
    /// Gallery images in display order
    pub images: Vec<product_image::Model>,
    /// Attributes (unordered)
    pub attributes: Vec<product_attribute::Model>,
    /// Specification lines in display order
    pub specifications: Vec<product_specification::Model>,
}

fn validate_product_input(input: &ProductInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product name cannot be empty".to_string(),
        });
    }
    if input.base_price < 0.0 || !input.base_price.is_finite() {
        return Err(Error::InvalidAmount {
            amount: input.base_price,
        });
    }
    if !(0..=100).contains(&input.discount_percentage) {
        return Err(Error::Validation {
            message: format!(
                "Product discount must be between 0 and 100, got {}",
                input.discount_percentage
            ),
        });
    }
    Ok(())
}

fn validate_variant_input(input: &VariantInput) -> Result<()> {
    if input.name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Variant name cannot be empty".to_string(),
        });
    }
    if input.price < 0.0 || !input.price.is_finite() {
        return Err(Error::InvalidAmount {
            amount: input.price,
        });
    }
    if input.stock_quantity < 0 {
        return Err(Error::Validation {
            message: format!(
                "Variant stock cannot be negative: {}",
                input.stock_quantity
            ),
        });
    }
    Ok(())
}

/// Retrieves the products of a category in display order.
pub async fn list_products_in_category(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Vec<product::Model>> {
    Product::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .order_by_asc(product::Column::SortOrder)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product by id.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a product together with all of its child collections.
pub async fn get_product_details(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<ProductDetails> {
    let product = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let variants = Variant::find()
        .filter(variant::Column::ProductId.eq(product_id))
        .order_by_asc(variant::Column::SortOrder)
        .all(db)
        .await?;
    let images = ProductImage::find()
        .filter(product_image::Column::ProductId.eq(product_id))
        .order_by_asc(product_image::Column::SortOrder)
        .all(db)
        .await?;
    let attributes = ProductAttribute::find()
        .filter(product_attribute::Column::ProductId.eq(product_id))
        .all(db)
        .await?;
    let specifications = ProductSpecification::find()
        .filter(product_specification::Column::ProductId.eq(product_id))
        .order_by_asc(product_specification::Column::SortOrder)
        .all(db)
        .await?;

    Ok(ProductDetails {
        product,
        variants,
        images,
        attributes,
        specifications,
    })
}

async fn next_sort_order<C>(db: &C, category_id: i64) -> Result<i32>
where
    C: ConnectionTrait,
{
    let last = Product::find()
        .filter(product::Column::CategoryId.eq(category_id))
        .order_by_desc(product::Column::SortOrder)
        .one(db)
        .await?;
    Ok(last.map_or(0, |prod| prod.sort_order + 1))
}

/// Creates a new product, appended at the end of its category.
pub async fn create_product(db: &DatabaseConnection, input: ProductInput) -> Result<product::Model> {
    validate_product_input(&input)?;

    Category::find_by_id(input.category_id)
        .one(db)
        .await?
        .ok_or(Error::CategoryNotFound {
            id: input.category_id,
        })?;

    let sort_order = next_sort_order(db, input.category_id).await?;
    let now = chrono::Utc::now().naive_utc();

    let created = product::ActiveModel {
        category_id: Set(input.category_id),
        name: Set(input.name.trim().to_string()),
        description: Set(input.description),
        image_url: Set(input.image_url),
        base_price: Set(input.base_price),
        discount_percentage: Set(input.discount_percentage),
        badge: Set(input.badge),
        frame_material: Set(input.frame_material),
        lens_type: Set(input.lens_type),
        sort_order: Set(sort_order),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(product_id = created.id, "created product \"{}\"", created.name);
    Ok(created)
}

/// Reconciles the submitted variant list against the persisted rows of a
/// product.
///
/// Submitted rows with a matching persisted id are updated, rows without an
/// id are inserted, and persisted rows missing from the submission are
/// deleted. Every row's `sort_order` is rewritten to its submitted position.
/// Operations run sequentially and abort on the first error.
///
/// # Errors
/// Returns [`Error::VariantNotFound`] if a submitted id has no persisted
/// counterpart (a stale form editing rows deleted elsewhere), a validation
/// error for bad row fields, or the first failed store operation.
pub async fn reconcile_variants<C>(
    db: &C,
    product_id: i64,
    submitted: Vec<VariantInput>,
) -> Result<VariantReconciliation>
where
    C: ConnectionTrait,
{
    let persisted = Variant::find()
        .filter(variant::Column::ProductId.eq(product_id))
        .order_by_asc(variant::Column::SortOrder)
        .all(db)
        .await?;

    let persisted_by_id: HashMap<i64, variant::Model> =
        persisted.iter().map(|row| (row.id, row.clone())).collect();
    let submitted_ids: HashSet<i64> = submitted.iter().filter_map(|row| row.id).collect();

    let mut updated = 0;
    let mut inserted = 0;
    let mut saved = Vec::with_capacity(submitted.len());

    for (position, input) in submitted.into_iter().enumerate() {
        validate_variant_input(&input)?;
        #[allow(clippy::cast_possible_truncation)]
        let sort_order = position as i32;

        match input.id {
            Some(id) => {
                let existing = persisted_by_id
                    .get(&id)
                    .ok_or(Error::VariantNotFound { id })?;

                let mut active: variant::ActiveModel = existing.clone().into();
                active.name = Set(input.name.trim().to_string());
                active.price = Set(input.price);
                active.sku = Set(input.sku);
                active.stock_quantity = Set(input.stock_quantity);
                active.sort_order = Set(sort_order);
                saved.push(active.update(db).await?);
                updated += 1;
            }
            None => {
                let created = variant::ActiveModel {
                    product_id: Set(product_id),
                    name: Set(input.name.trim().to_string()),
                    price: Set(input.price),
                    sku: Set(input.sku),
                    stock_quantity: Set(input.stock_quantity),
                    sort_order: Set(sort_order),
                    ..Default::default()
                }
                .insert(db)
                .await?;
                saved.push(created);
                inserted += 1;
            }
        }
    }

    let mut deleted = 0;
    for stale in persisted.iter().filter(|row| !submitted_ids.contains(&row.id)) {
        Variant::delete_by_id(stale.id).exec(db).await?;
        deleted += 1;
    }

    Ok(VariantReconciliation {
        updated,
        inserted,
        deleted,
        variants: saved,
    })
}

async fn replace_images<C>(db: &C, product_id: i64, images: Vec<String>) -> Result<()>
where
    C: ConnectionTrait,
{
    ProductImage::delete_many()
        .filter(product_image::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;
    for (position, image_url) in images.into_iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let sort_order = position as i32;
        product_image::ActiveModel {
            product_id: Set(product_id),
            image_url: Set(image_url),
            sort_order: Set(sort_order),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

async fn replace_attributes<C>(
    db: &C,
    product_id: i64,
    attributes: Vec<AttributeInput>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    ProductAttribute::delete_many()
        .filter(product_attribute::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;
    for attribute in attributes {
        product_attribute::ActiveModel {
            product_id: Set(product_id),
            name: Set(attribute.name),
            value: Set(attribute.value),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

async fn replace_specifications<C>(
    db: &C,
    product_id: i64,
    specifications: Vec<SpecificationInput>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    ProductSpecification::delete_many()
        .filter(product_specification::Column::ProductId.eq(product_id))
        .exec(db)
        .await?;
    for (position, spec) in specifications.into_iter().enumerate() {
        #[allow(clippy::cast_possible_truncation)]
        let sort_order = position as i32;
        product_specification::ActiveModel {
            product_id: Set(product_id),
            label: Set(spec.label),
            value: Set(spec.value),
            sort_order: Set(sort_order),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// Saves an edited product: updates the row, reconciles variants, and
/// replaces the remaining child collections, all in one transaction.
///
/// The first error aborts the save; the caller reports that single failure.
pub async fn save_product(
    db: &DatabaseConnection,
    product_id: i64,
    form: ProductForm,
) -> Result<ProductDetails> {
    validate_product_input(&form.product)?;

    let txn = db.begin().await?;

    let existing = Product::find_by_id(product_id)
        .one(&txn)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let mut active: product::ActiveModel = existing.into();
    active.category_id = Set(form.product.category_id);
    active.name = Set(form.product.name.trim().to_string());
    active.description = Set(form.product.description);
    active.image_url = Set(form.product.image_url);
    active.base_price = Set(form.product.base_price);
    active.discount_percentage = Set(form.product.discount_percentage);
    active.badge = Set(form.product.badge);
    active.frame_material = Set(form.product.frame_material);
    active.lens_type = Set(form.product.lens_type);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(&txn).await?;

    reconcile_variants(&txn, product_id, form.variants).await?;
    replace_images(&txn, product_id, form.images).await?;
    replace_attributes(&txn, product_id, form.attributes).await?;
    replace_specifications(&txn, product_id, form.specifications).await?;

    txn.commit().await?;
    info!(product_id, "saved product");

    get_product_details(db, product_id).await
}

/// Deletes a product and its child rows. Children first, then the product -
/// the causally dependent write is sequenced after them.
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    Variant::delete_many()
        .filter(variant::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    ProductImage::delete_many()
        .filter(product_image::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    ProductAttribute::delete_many()
        .filter(product_attribute::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;
    ProductSpecification::delete_many()
        .filter(product_specification::Column::ProductId.eq(product_id))
        .exec(&txn)
        .await?;

    let result = Product::delete_by_id(product_id).exec(&txn).await?;
    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound { id: product_id });
    }

    txn.commit().await?;
    info!(product_id, "deleted product and children");
    Ok(())
}
