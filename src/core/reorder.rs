//! Drag-and-drop reorder coordination with optimistic persistence.
//!
//! A gesture becomes an array move applied to the in-memory list first, then
//! a batch of independent per-row `sort_order` updates dispatched
//! concurrently and awaited together. If any update fails the local list is
//! discarded and reloaded from the store - a visible flicker traded for
//! guaranteed consistency. Only one gesture may be in flight at a time;
//! later gestures are ignored until the pending persistence settles.

use crate::{
    entities::{Category, Product, category, product},
    errors::{Error, Result},
};
use async_trait::async_trait;
use futures::future::join_all;
use sea_orm::{QueryOrder, prelude::*, sea_query::Expr};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{error, warn};

/// Removes the item at `from` and reinserts it at `to` (array-move
/// semantics: everything between the two positions shifts by one).
///
/// `from == to` is a no-op. Pure; the persistence half lives in
/// [`ReorderCoordinator`].
///
/// # Errors
/// Returns [`Error::ReorderOutOfRange`] if either index is outside the list.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(Error::ReorderOutOfRange { from, to, len });
    }
    if from == to {
        return Ok(());
    }

    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

/// What became of a gesture handed to [`ReorderCoordinator::move_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderOutcome {
    /// The move was applied locally and persisted
    Applied,
    /// Another gesture was still settling; this one was dropped
    Ignored,
}

/// Storage seam for one ordered list.
///
/// The coordinator only needs to load the list in display order and rewrite
/// every row's `sort_order`; keeping that behind a trait is what lets the
/// failure path be exercised with an injected failing store.
#[async_trait]
pub trait ReorderStore: Send + Sync {
    /// Row type held in the ordered list
    type Item: Clone + Send + Sync;

    /// The persisted id of an item
    fn id_of(item: &Self::Item) -> i64;

    /// Loads the full list in display order
    async fn load(&self) -> Result<Vec<Self::Item>>;

    /// Rewrites every listed row's `sort_order` to its index in
    /// `ordered_ids`, dispatching the updates concurrently
    async fn persist_order(&self, ordered_ids: &[i64]) -> Result<()>;
}

/// Owns one view's in-memory ordered list and turns drag gestures into
/// persisted orderings.
pub struct ReorderCoordinator<S: ReorderStore> {
    store: S,
    items: RwLock<Vec<S::Item>>,
    in_flight: AtomicBool,
}

impl<S: ReorderStore> ReorderCoordinator<S> {
    /// Builds a coordinator with the list loaded from `store`.
    pub async fn new(store: S) -> Result<Self> {
        let items = store.load().await?;
        Ok(Self {
            store,
            items: RwLock::new(items),
            in_flight: AtomicBool::new(false),
        })
    }

    /// A snapshot of the current in-memory list.
    pub async fn items(&self) -> Vec<S::Item> {
        self.items.read().await.clone()
    }

    /// Replaces the in-memory list with a fresh load from the store.
    pub async fn refresh(&self) -> Result<()> {
        let fresh = self.store.load().await?;
        *self.items.write().await = fresh;
        Ok(())
    }

    /// Applies a drag gesture: optimistic local move, then concurrent
    /// persistence of every item's new position.
    ///
    /// Returns [`ReorderOutcome::Ignored`] without touching anything if a
    /// previous gesture is still settling.
    ///
    /// # Errors
    /// On a persistence failure the local list has already been discarded
    /// and reloaded from the store; the original error is returned.
    pub async fn move_item(&self, from: usize, to: usize) -> Result<ReorderOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(ReorderOutcome::Ignored);
        }

        let result = self.apply_move(from, to).await;
        self.in_flight.store(false, Ordering::Release);
        result.map(|()| ReorderOutcome::Applied)
    }

    async fn apply_move(&self, from: usize, to: usize) -> Result<()> {
        let ordered_ids = {
            let mut items = self.items.write().await;
            move_item(&mut items, from, to)?;
            if from == to {
                // No-op gesture; nothing to persist.
                return Ok(());
            }
            items.iter().map(S::id_of).collect::<Vec<_>>()
        };

        if let Err(err) = self.store.persist_order(&ordered_ids).await {
            warn!("reorder persistence failed, reloading list: {err}");
            match self.store.load().await {
                Ok(fresh) => *self.items.write().await = fresh,
                Err(reload_err) => {
                    error!("reload after failed reorder also failed: {reload_err}");
                }
            }
            return Err(err);
        }
        Ok(())
    }
}

// Dispatches one sort_order update per row concurrently, then surfaces the
// first failure if any.
macro_rules! persist_order_impl {
    ($db:expr, $entity:ty, $id_column:expr, $order_column:expr, $ordered_ids:expr) => {{
        #[allow(clippy::cast_possible_truncation)]
        let updates = $ordered_ids.iter().enumerate().map(|(position, id)| {
            <$entity>::update_many()
                .col_expr($order_column, Expr::value(position as i32))
                .filter($id_column.eq(*id))
                .exec($db)
        });
        for result in join_all(updates).await {
            result?;
        }
        Ok(())
    }};
}

/// Ordered category tabs of one menu.
pub struct CategoryOrderStore {
    db: DatabaseConnection,
    menu_id: i64,
}

impl CategoryOrderStore {
    /// Store for the categories of `menu_id`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, menu_id: i64) -> Self {
        Self { db, menu_id }
    }
}

#[async_trait]
impl ReorderStore for CategoryOrderStore {
    type Item = category::Model;

    fn id_of(item: &Self::Item) -> i64 {
        item.id
    }

    async fn load(&self) -> Result<Vec<category::Model>> {
        Category::find()
            .filter(category::Column::MenuId.eq(self.menu_id))
            .order_by_asc(category::Column::SortOrder)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn persist_order(&self, ordered_ids: &[i64]) -> Result<()> {
        persist_order_impl!(
            &self.db,
            Category,
            category::Column::Id,
            category::Column::SortOrder,
            ordered_ids
        )
    }
}

/// Ordered product grid of one category.
pub struct ProductOrderStore {
    db: DatabaseConnection,
    category_id: i64,
}

impl ProductOrderStore {
    /// Store for the products of `category_id`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, category_id: i64) -> Self {
        Self { db, category_id }
    }
}

#[async_trait]
impl ReorderStore for ProductOrderStore {
    type Item = product::Model;

    fn id_of(item: &Self::Item) -> i64 {
        item.id
    }

    async fn load(&self) -> Result<Vec<product::Model>> {
        Product::find()
            .filter(product::Column::CategoryId.eq(self.category_id))
            .order_by_asc(product::Column::SortOrder)
            .all(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn persist_order(&self, ordered_ids: &[i64]) -> Result<()> {
        persist_order_impl!(
            &self.db,
            Product,
            product::Column::Id,
            product::Column::SortOrder,
            ordered_ids
        )
    }
}
