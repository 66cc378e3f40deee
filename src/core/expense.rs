//! Expense business logic - recording with write-time tax derivation and
//! filtered listing.
//!
//! `tax_amount` and `total_amount` are derived once, when the row is
//! written; reads trust the stored values. The filtered listing feeds the
//! aggregator in [`crate::core::analytics`].

use crate::{
    entities::{
        Expense, ExpenseCategory, ExpenseSubcategory, PaymentMethod, expense, expense_category,
        expense_subcategory,
    },
    errors::{Error, Result},
};
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::info;

/// Fields accepted by expense create and update operations.
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    /// User recording the expense
    pub user_id: i64,
    /// Optional category
    pub category_id: Option<i64>,
    /// Optional subcategory
    pub subcategory_id: Option<i64>,
    /// Pre-tax amount
    pub amount: f64,
    /// Tax rate as a percentage
    pub tax_rate: f64,
    /// Payment method
    pub payment_method: PaymentMethod,
    /// Calendar date of the expense
    pub expense_date: NaiveDate,
    /// Time of day of the expense
    pub expense_time: NaiveTime,
    /// Optional free-text note
    pub description: Option<String>,
}

/// Upstream filter for the expense listing. All clauses are optional and
/// combine conjunctively.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Earliest date, inclusive
    pub from: Option<NaiveDate>,
    /// Latest date, inclusive
    pub to: Option<NaiveDate>,
    /// Restrict to one category
    pub category_id: Option<i64>,
    /// Restrict to one payment method
    pub payment_method: Option<PaymentMethod>,
    /// Substring match against the description
    pub search: Option<String>,
}

fn validate_expense_input(input: &ExpenseInput) -> Result<(f64, f64)> {
    if input.amount <= 0.0 || !input.amount.is_finite() {
        return Err(Error::InvalidAmount {
            amount: input.amount,
        });
    }
    if input.tax_rate < 0.0 || !input.tax_rate.is_finite() {
        return Err(Error::Validation {
            message: format!("Tax rate cannot be negative: {}", input.tax_rate),
        });
    }

    let tax_amount = input.amount * input.tax_rate / 100.0;
    Ok((tax_amount, input.amount + tax_amount))
}

/// Records a new expense, deriving tax and total at write time.
pub async fn create_expense(db: &DatabaseConnection, input: ExpenseInput) -> Result<expense::Model> {
    let (tax_amount, total_amount) = validate_expense_input(&input)?;

    let created = expense::ActiveModel {
        user_id: Set(input.user_id),
        category_id: Set(input.category_id),
        subcategory_id: Set(input.subcategory_id),
        amount: Set(input.amount),
        tax_rate: Set(input.tax_rate),
        tax_amount: Set(tax_amount),
        total_amount: Set(total_amount),
        payment_method: Set(input.payment_method),
        expense_date: Set(input.expense_date),
        expense_time: Set(input.expense_time),
        description: Set(input.description),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        expense_id = created.id,
        total = created.total_amount,
        "recorded expense"
    );
    Ok(created)
}

/// Updates an expense, re-deriving tax and total from the new inputs.
pub async fn update_expense(
    db: &DatabaseConnection,
    expense_id: i64,
    input: ExpenseInput,
) -> Result<expense::Model> {
    let (tax_amount, total_amount) = validate_expense_input(&input)?;

    let existing = Expense::find_by_id(expense_id)
        .one(db)
        .await?
        .ok_or(Error::ExpenseNotFound { id: expense_id })?;

    let mut active: expense::ActiveModel = existing.into();
    active.category_id = Set(input.category_id);
    active.subcategory_id = Set(input.subcategory_id);
    active.amount = Set(input.amount);
    active.tax_rate = Set(input.tax_rate);
    active.tax_amount = Set(tax_amount);
    active.total_amount = Set(total_amount);
    active.payment_method = Set(input.payment_method);
    active.expense_date = Set(input.expense_date);
    active.expense_time = Set(input.expense_time);
    active.description = Set(input.description);
    active.update(db).await.map_err(Into::into)
}

/// Deletes an expense.
pub async fn delete_expense(db: &DatabaseConnection, expense_id: i64) -> Result<()> {
    let result = Expense::delete_by_id(expense_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ExpenseNotFound { id: expense_id });
    }
    Ok(())
}

/// Retrieves a user's expenses matching `filter`, newest first.
pub async fn list_expenses(
    db: &DatabaseConnection,
    user_id: i64,
    filter: &ExpenseFilter,
) -> Result<Vec<expense::Model>> {
    let mut query = Expense::find().filter(expense::Column::UserId.eq(user_id));

    if let Some(from) = filter.from {
        query = query.filter(expense::Column::ExpenseDate.gte(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(expense::Column::ExpenseDate.lte(to));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(expense::Column::CategoryId.eq(category_id));
    }
    if let Some(payment_method) = filter.payment_method {
        query = query.filter(expense::Column::PaymentMethod.eq(payment_method));
    }
    if let Some(search) = &filter.search {
        query = query.filter(expense::Column::Description.contains(search));
    }

    query
        .order_by_desc(expense::Column::ExpenseDate)
        .order_by_desc(expense::Column::ExpenseTime)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all expense categories, alphabetically.
pub async fn list_expense_categories(
    db: &DatabaseConnection,
) -> Result<Vec<expense_category::Model>> {
    ExpenseCategory::find()
        .order_by_asc(expense_category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates an expense category with an optional display color.
pub async fn create_expense_category(
    db: &DatabaseConnection,
    name: String,
    color: Option<String>,
) -> Result<expense_category::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Expense category name cannot be empty".to_string(),
        });
    }

    expense_category::ActiveModel {
        name: Set(name.trim().to_string()),
        color: Set(color),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves the subcategories of an expense category, alphabetically.
pub async fn list_subcategories(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Vec<expense_subcategory::Model>> {
    ExpenseSubcategory::find()
        .filter(expense_subcategory::Column::CategoryId.eq(category_id))
        .order_by_asc(expense_subcategory::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a subcategory under an existing expense category.
pub async fn create_expense_subcategory(
    db: &DatabaseConnection,
    category_id: i64,
    name: String,
) -> Result<expense_subcategory::Model> {
    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Subcategory name cannot be empty".to_string(),
        });
    }
    ExpenseCategory::find_by_id(category_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::Validation {
            message: format!("Expense category {category_id} does not exist"),
        })?;

    expense_subcategory::ActiveModel {
        category_id: Set(category_id),
        name: Set(name.trim().to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}
