//! Flash-deal business logic - lifecycle evaluation, pricing, and CRUD.
//!
//! A deal's status is a pure function of the record and the clock, so the
//! evaluator can be re-run on every render tick without side effects. The
//! discount percentage is derived from the price pair once, at save time;
//! reads trust the stored value.

use crate::{
    entities::{Deal, deal},
    errors::{Error, Result},
};
use chrono::NaiveDateTime;
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use std::time::Duration;
use tokio::{sync::watch, task::JoinHandle};
use tracing::info;

/// Lifecycle state of a deal at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealStatus {
    /// The kill switch is off; dominates every other signal
    Inactive,
    /// The window has not opened yet
    Upcoming,
    /// The window has closed
    Expired,
    /// No units remain within an open window
    SoldOut,
    /// Live and purchasable
    Active,
}

/// Evaluates a deal's lifecycle state at `now`. Pure and idempotent.
///
/// First match wins, in this order: inactive, upcoming, expired, sold out,
/// active. An inactive-but-expired deal therefore reports `Inactive` -
/// inactivity is the dominant signal.
#[must_use]
pub fn evaluate_status(deal: &deal::Model, now: NaiveDateTime) -> DealStatus {
    if !deal.is_active {
        return DealStatus::Inactive;
    }
    if now < deal.start_time {
        return DealStatus::Upcoming;
    }
    if now > deal.end_time {
        return DealStatus::Expired;
    }
    if deal.remaining_quantity() <= 0 {
        return DealStatus::SoldOut;
    }
    DealStatus::Active
}

/// Renders the time left until `end_time` as the largest two non-zero units
/// among days, hours, and minutes (e.g., "2d 5h", "45m").
///
/// A non-positive difference renders the literal `"Expired"`; exactly zero
/// counts as expired. A positive sub-minute remainder renders `"0m"`.
#[must_use]
pub fn format_time_remaining(end_time: NaiveDateTime, now: NaiveDateTime) -> String {
    let remaining = end_time - now;
    if remaining <= chrono::Duration::zero() {
        return "Expired".to_string();
    }

    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m")]
        .iter()
        .filter(|(value, _)| *value > 0)
        .take(2)
        .map(|(value, unit)| format!("{value}{unit}"))
        .collect();

    if parts.is_empty() {
        return "0m".to_string();
    }
    parts.join(" ")
}

/// Computes the whole-number discount percentage for a price pair.
///
/// # Errors
/// Returns an error if either price is non-positive or the deal price is not
/// strictly below the original price. Callers must treat this as a validation
/// failure, never as a zero discount.
pub fn discount_percentage(original_price: f64, deal_price: f64) -> Result<i32> {
    if original_price <= 0.0 || !original_price.is_finite() {
        return Err(Error::InvalidAmount {
            amount: original_price,
        });
    }
    if deal_price <= 0.0 || !deal_price.is_finite() {
        return Err(Error::InvalidAmount { amount: deal_price });
    }
    if deal_price >= original_price {
        return Err(Error::InvalidPricing {
            original: original_price,
            deal: deal_price,
        });
    }

    // Bounded in (0, 100) by the guards above, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation)]
    Ok((((original_price - deal_price) / original_price) * 100.0).round() as i32)
}

/// Savings in currency units for a valid price pair.
///
/// # Errors
/// Same guards as [`discount_percentage`].
pub fn savings(original_price: f64, deal_price: f64) -> Result<f64> {
    discount_percentage(original_price, deal_price)?;
    Ok(original_price - deal_price)
}

/// Fields accepted by deal create and update operations.
///
/// `sold_quantity` is deliberately absent: sales are recorded by the store,
/// not editable through the authoring form.
#[derive(Debug, Clone)]
pub struct DealInput {
    /// Product the deal discounts
    pub product_id: i64,
    /// Display title
    pub title: String,
    /// Optional marketing copy
    pub description: Option<String>,
    /// Price before the discount
    pub original_price: f64,
    /// Discounted price
    pub deal_price: f64,
    /// When the deal opens
    pub start_time: NaiveDateTime,
    /// When the deal closes
    pub end_time: NaiveDateTime,
    /// Units available over the deal's lifetime
    pub total_quantity: i32,
    /// Whether the deal is surfaced in featured placements
    pub is_featured: bool,
    /// Optional badge label
    pub badge_text: Option<String>,
    /// Optional badge color
    pub badge_color: Option<String>,
}

fn validate_deal_input(input: &DealInput) -> Result<i32> {
    if input.title.trim().is_empty() {
        return Err(Error::Validation {
            message: "Deal title cannot be empty".to_string(),
        });
    }
    if input.end_time <= input.start_time {
        return Err(Error::Validation {
            message: "Deal end time must be after start time".to_string(),
        });
    }
    if input.total_quantity < 0 {
        return Err(Error::Validation {
            message: format!("Deal quantity cannot be negative: {}", input.total_quantity),
        });
    }
    discount_percentage(input.original_price, input.deal_price)
}

/// Creates a new deal, deriving and storing the discount percentage.
///
/// # Errors
/// Returns an error if validation fails (see [`discount_percentage`] and the
/// time-window and quantity guards) or the insert fails.
pub async fn create_deal(db: &DatabaseConnection, input: DealInput) -> Result<deal::Model> {
    let discount = validate_deal_input(&input)?;
    let now = chrono::Utc::now().naive_utc();

    let deal = deal::ActiveModel {
        product_id: Set(input.product_id),
        title: Set(input.title.trim().to_string()),
        description: Set(input.description),
        original_price: Set(input.original_price),
        deal_price: Set(input.deal_price),
        discount_percentage: Set(discount),
        start_time: Set(input.start_time),
        end_time: Set(input.end_time),
        total_quantity: Set(input.total_quantity),
        sold_quantity: Set(0),
        is_active: Set(true),
        is_featured: Set(input.is_featured),
        badge_text: Set(input.badge_text),
        badge_color: Set(input.badge_color),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = deal.insert(db).await?;
    info!(deal_id = created.id, "created deal \"{}\"", created.title);
    Ok(created)
}

/// Updates an existing deal, re-deriving the stored discount percentage.
/// The sold quantity is left untouched.
pub async fn update_deal(
    db: &DatabaseConnection,
    deal_id: i64,
    input: DealInput,
) -> Result<deal::Model> {
    let discount = validate_deal_input(&input)?;

    let existing = Deal::find_by_id(deal_id)
        .one(db)
        .await?
        .ok_or(Error::DealNotFound { id: deal_id })?;

    let mut active: deal::ActiveModel = existing.into();
    active.product_id = Set(input.product_id);
    active.title = Set(input.title.trim().to_string());
    active.description = Set(input.description);
    active.original_price = Set(input.original_price);
    active.deal_price = Set(input.deal_price);
    active.discount_percentage = Set(discount);
    active.start_time = Set(input.start_time);
    active.end_time = Set(input.end_time);
    active.total_quantity = Set(input.total_quantity);
    active.is_featured = Set(input.is_featured);
    active.badge_text = Set(input.badge_text);
    active.badge_color = Set(input.badge_color);
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    active.update(db).await.map_err(Into::into)
}

/// Flips a deal's active flag and returns the updated row.
pub async fn toggle_active(db: &DatabaseConnection, deal_id: i64) -> Result<deal::Model> {
    let existing = Deal::find_by_id(deal_id)
        .one(db)
        .await?
        .ok_or(Error::DealNotFound { id: deal_id })?;

    let was_active = existing.is_active;
    let mut active: deal::ActiveModel = existing.into();
    active.is_active = Set(!was_active);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Sets a deal's featured flag.
pub async fn set_featured(
    db: &DatabaseConnection,
    deal_id: i64,
    featured: bool,
) -> Result<deal::Model> {
    let existing = Deal::find_by_id(deal_id)
        .one(db)
        .await?
        .ok_or(Error::DealNotFound { id: deal_id })?;

    let mut active: deal::ActiveModel = existing.into();
    active.is_featured = Set(featured);
    active.updated_at = Set(chrono::Utc::now().naive_utc());
    active.update(db).await.map_err(Into::into)
}

/// Deletes a deal.
pub async fn delete_deal(db: &DatabaseConnection, deal_id: i64) -> Result<()> {
    let result = Deal::delete_by_id(deal_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::DealNotFound { id: deal_id });
    }
    info!(deal_id, "deleted deal");
    Ok(())
}

/// Retrieves a deal by id.
pub async fn get_deal_by_id(db: &DatabaseConnection, deal_id: i64) -> Result<Option<deal::Model>> {
    Deal::find_by_id(deal_id).one(db).await.map_err(Into::into)
}

/// Retrieves all deals, newest first.
pub async fn list_deals(db: &DatabaseConnection) -> Result<Vec<deal::Model>> {
    Deal::find()
        .order_by_desc(deal::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves deals that are live at `now`: active, inside their window, with
/// units remaining.
pub async fn list_running_deals(
    db: &DatabaseConnection,
    now: NaiveDateTime,
) -> Result<Vec<deal::Model>> {
    Deal::find()
        .filter(deal::Column::IsActive.eq(true))
        .filter(deal::Column::StartTime.lte(now))
        .filter(deal::Column::EndTime.gte(now))
        .filter(Expr::col(deal::Column::SoldQuantity).lt(Expr::col(deal::Column::TotalQuantity)))
        .order_by_asc(deal::Column::EndTime)
        .all(db)
        .await
        .map_err(Into::into)
}

/// One update from a running [`DealCountdown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownTick {
    /// Status at the tick instant
    pub status: DealStatus,
    /// Formatted time remaining (or `"Expired"`)
    pub time_remaining: String,
}

fn countdown_tick(deal: &deal::Model, now: NaiveDateTime) -> CountdownTick {
    CountdownTick {
        status: evaluate_status(deal, now),
        time_remaining: format_time_remaining(deal.end_time, now),
    }
}

/// A live countdown for one deal.
///
/// Re-evaluates status and remaining time on a fixed interval and publishes
/// over a watch channel. Dropping the handle aborts the ticker task, so the
/// recurring callback cannot outlive the view that owns it.
#[derive(Debug)]
pub struct DealCountdown {
    rx: watch::Receiver<CountdownTick>,
    handle: JoinHandle<()>,
}

impl DealCountdown {
    /// Starts a ticker for `deal`, re-evaluating every `period`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(deal: deal::Model, period: Duration) -> Self {
        let initial = countdown_tick(&deal, chrono::Utc::now().naive_utc());
        let (tx, rx) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let tick = countdown_tick(&deal, chrono::Utc::now().naive_utc());
                if tx.send(tick).is_err() {
                    // Every receiver is gone; stop ticking.
                    break;
                }
            }
        });

        Self { rx, handle }
    }

    /// A receiver for subsequent ticks.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CountdownTick> {
        self.rx.clone()
    }

    /// The most recent tick.
    #[must_use]
    pub fn latest(&self) -> CountdownTick {
        self.rx.borrow().clone()
    }
}

impl Drop for DealCountdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::{Duration as ChronoDuration, Utc};

    fn sample_deal(
        is_active: bool,
        start_offset_hours: i64,
        end_offset_hours: i64,
        total: i32,
        sold: i32,
    ) -> deal::Model {
        let now = Utc::now().naive_utc();
        deal::Model {
            id: 1,
            product_id: 1,
            title: "Sample".to_string(),
            description: None,
            original_price: 100.0,
            deal_price: 60.0,
            discount_percentage: 40,
            start_time: now + ChronoDuration::hours(start_offset_hours),
            end_time: now + ChronoDuration::hours(end_offset_hours),
            total_quantity: total,
            sold_quantity: sold,
            is_active,
            is_featured: false,
            badge_text: None,
            badge_color: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_inactive_dominates_time_window() {
        // Inactive and already expired still reports Inactive.
        let deal = sample_deal(false, -4, -2, 10, 0);
        let now = Utc::now().naive_utc();
        assert_eq!(evaluate_status(&deal, now), DealStatus::Inactive);
    }

    #[test]
    fn test_status_upcoming_before_window() {
        let deal = sample_deal(true, 1, 3, 10, 0);
        let now = Utc::now().naive_utc();
        assert_eq!(evaluate_status(&deal, now), DealStatus::Upcoming);
    }

    #[test]
    fn test_status_expired_after_window() {
        let deal = sample_deal(true, -3, -1, 10, 0);
        let now = Utc::now().naive_utc();
        assert_eq!(evaluate_status(&deal, now), DealStatus::Expired);
    }

    #[test]
    fn test_status_sold_out_inside_window() {
        let deal = sample_deal(true, -1, 1, 10, 10);
        let now = Utc::now().naive_utc();
        assert_eq!(evaluate_status(&deal, now), DealStatus::SoldOut);
    }

    #[test]
    fn test_status_active_inside_window_with_stock() {
        let deal = sample_deal(true, -1, 1, 10, 3);
        let now = Utc::now().naive_utc();
        assert_eq!(evaluate_status(&deal, now), DealStatus::Active);
    }

    #[test]
    fn test_status_is_pure() {
        let deal = sample_deal(true, -1, 1, 10, 3);
        let now = Utc::now().naive_utc();
        assert_eq!(evaluate_status(&deal, now), evaluate_status(&deal, now));
    }

    #[test]
    fn test_format_time_remaining_expired_at_boundary() {
        let now = Utc::now().naive_utc();
        assert_eq!(format_time_remaining(now, now), "Expired");
        assert_eq!(
            format_time_remaining(now - ChronoDuration::minutes(5), now),
            "Expired"
        );
    }

    #[test]
    fn test_format_time_remaining_two_largest_units() {
        let now = Utc::now().naive_utc();
        let end = now + ChronoDuration::days(2) + ChronoDuration::hours(5);
        assert_eq!(format_time_remaining(end, now), "2d 5h");

        // Minutes are dropped once days and hours are both present.
        let end = now
            + ChronoDuration::days(1)
            + ChronoDuration::hours(2)
            + ChronoDuration::minutes(30);
        assert_eq!(format_time_remaining(end, now), "1d 2h");
    }

    #[test]
    fn test_format_time_remaining_skips_zero_units() {
        let now = Utc::now().naive_utc();
        let end = now + ChronoDuration::days(1) + ChronoDuration::minutes(15);
        assert_eq!(format_time_remaining(end, now), "1d 15m");

        let end = now + ChronoDuration::minutes(45);
        assert_eq!(format_time_remaining(end, now), "45m");
    }

    #[test]
    fn test_format_time_remaining_sub_minute() {
        let now = Utc::now().naive_utc();
        let end = now + ChronoDuration::seconds(30);
        assert_eq!(format_time_remaining(end, now), "0m");
    }

    #[test]
    fn test_discount_percentage_valid_pairs() {
        assert_eq!(discount_percentage(100.0, 50.0).unwrap(), 50);
        assert_eq!(discount_percentage(100.0, 99.0).unwrap(), 1);
        assert_eq!(discount_percentage(100.0, 60.0).unwrap(), 40);
        // Rounds to nearest whole number.
        assert_eq!(discount_percentage(3.0, 2.0).unwrap(), 33);
    }

    #[test]
    fn test_discount_percentage_rejects_deal_at_or_above_original() {
        let result = discount_percentage(100.0, 100.01);
        assert!(matches!(result, Err(Error::InvalidPricing { .. })));

        let result = discount_percentage(100.0, 100.0);
        assert!(matches!(result, Err(Error::InvalidPricing { .. })));
    }

    #[test]
    fn test_discount_percentage_rejects_non_positive_prices() {
        assert!(matches!(
            discount_percentage(0.0, 0.0),
            Err(Error::InvalidAmount { .. })
        ));
        assert!(matches!(
            discount_percentage(100.0, -5.0),
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_savings() {
        assert!((savings(100.0, 60.0).unwrap() - 40.0).abs() < f64::EPSILON);
        assert!(savings(100.0, 100.0).is_err());
    }

    #[tokio::test]
    async fn test_create_deal_end_to_end_scenario() -> Result<()> {
        let (db, _menu, _category, product) = setup_with_product().await?;
        let now = Utc::now().naive_utc();

        let deal = create_deal(
            &db,
            DealInput {
                product_id: product.id,
                title: "Flash Sale".to_string(),
                description: None,
                original_price: 100.0,
                deal_price: 60.0,
                start_time: now - ChronoDuration::hours(1),
                end_time: now + ChronoDuration::hours(1),
                total_quantity: 10,
                is_featured: false,
                badge_text: None,
                badge_color: None,
            },
        )
        .await?;

        assert_eq!(deal.discount_percentage, 40);
        assert_eq!(deal.sold_quantity, 0);
        assert_eq!(deal.remaining_quantity(), 10);
        assert!(deal.is_active);
        assert_eq!(evaluate_status(&deal, now), DealStatus::Active);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_deal_validation_needs_no_store() {
        use sea_orm::{DatabaseBackend, MockDatabase};

        // Validation rejects before any query is issued, so a mock
        // connection with no expectations suffices.
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let mut input = test_deal_input(1);
        input.title = "   ".to_string();
        let result = create_deal(&db, input).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let mut input = test_deal_input(1);
        input.total_quantity = -1;
        let result = create_deal(&db, input).await;
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_deal_rejects_invalid_pricing() -> Result<()> {
        let (db, _menu, _category, product) = setup_with_product().await?;
        let now = Utc::now().naive_utc();

        let result = create_deal(
            &db,
            DealInput {
                product_id: product.id,
                title: "Bad Pricing".to_string(),
                description: None,
                original_price: 50.0,
                deal_price: 50.0,
                start_time: now,
                end_time: now + ChronoDuration::hours(1),
                total_quantity: 5,
                is_featured: false,
                badge_text: None,
                badge_color: None,
            },
        )
        .await;
        assert!(matches!(result, Err(Error::InvalidPricing { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_deal_rejects_inverted_window() -> Result<()> {
        let (db, _menu, _category, product) = setup_with_product().await?;
        let now = Utc::now().naive_utc();

        let result = create_deal(
            &db,
            DealInput {
                product_id: product.id,
                title: "Backwards".to_string(),
                description: None,
                original_price: 100.0,
                deal_price: 60.0,
                start_time: now + ChronoDuration::hours(2),
                end_time: now + ChronoDuration::hours(1),
                total_quantity: 5,
                is_featured: false,
                badge_text: None,
                badge_color: None,
            },
        )
        .await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_deal_rederives_discount() -> Result<()> {
        let (db, _menu, _category, product) = setup_with_product().await?;
        let deal = create_test_deal(&db, product.id).await?;
        assert_eq!(deal.discount_percentage, 40);

        let mut input = test_deal_input(product.id);
        input.deal_price = 75.0;
        let updated = update_deal(&db, deal.id, input).await?;
        assert_eq!(updated.discount_percentage, 25);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_active_flips_flag() -> Result<()> {
        let (db, _menu, _category, product) = setup_with_product().await?;
        let deal = create_test_deal(&db, product.id).await?;
        assert!(deal.is_active);

        let toggled = toggle_active(&db, deal.id).await?;
        assert!(!toggled.is_active);

        let now = Utc::now().naive_utc();
        assert_eq!(evaluate_status(&toggled, now), DealStatus::Inactive);

        let toggled_back = toggle_active(&db, deal.id).await?;
        assert!(toggled_back.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_deal_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let result = delete_deal(&db, 999).await;
        assert!(matches!(result, Err(Error::DealNotFound { id: 999 })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_running_deals_filters_by_window_and_stock() -> Result<()> {
        let (db, _menu, _category, product) = setup_with_product().await?;
        let now = Utc::now().naive_utc();

        // Live deal.
        let live = create_test_deal(&db, product.id).await?;
        // Upcoming deal.
        create_custom_deal(&db, product.id, 1, 3, 10, 0, true).await?;
        // Sold-out deal.
        create_custom_deal(&db, product.id, -1, 1, 10, 10, true).await?;
        // Inactive deal.
        create_custom_deal(&db, product.id, -1, 1, 10, 0, false).await?;

        let running = list_running_deals(&db, now).await?;
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].id, live.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_countdown_publishes_and_stops_on_drop() -> Result<()> {
        // An already-expired deal: every tick reports Expired.
        let deal = sample_deal(true, -3, -1, 10, 0);
        let countdown = DealCountdown::start(deal, Duration::from_millis(10));

        let mut rx = countdown.subscribe();
        rx.changed().await.expect("ticker should publish");
        let tick = rx.borrow().clone();
        assert_eq!(tick.status, DealStatus::Expired);
        assert_eq!(tick.time_remaining, "Expired");

        // Dropping the handle aborts the ticker task, which drops the sender.
        drop(countdown);
        tokio::time::sleep(Duration::from_millis(50)).await;
        rx.mark_unchanged();
        assert!(rx.has_changed().is_err());

        Ok(())
    }
}
