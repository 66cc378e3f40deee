//! Expense analytics - breakdowns and aggregate stats for display.
//!
//! Every function here is pure and recomputes from scratch over the expense
//! slice it is given (already filtered upstream by date range, category,
//! payment method, and text search). There is no incremental maintenance:
//! the collections involved are small enough that a full pass per data
//! change is the simpler contract.

use crate::entities::{PaymentMethod, expense, expense_category};
use std::collections::{HashMap, HashSet};

/// Fallback color when an expense category carries none.
pub const DEFAULT_CATEGORY_COLOR: &str = "#9ca3af";

/// Display label for expenses with no linked category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Sum, count, and display color for one category's expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    /// Sum of `total_amount` over the category's expenses
    pub total: f64,
    /// Number of expenses in the category
    pub count: usize,
    /// The category's display color, or [`DEFAULT_CATEGORY_COLOR`]
    pub color: String,
}

/// Aggregate stats over a filtered expense collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseStats {
    /// Grand total of `total_amount`
    pub total: f64,
    /// Mean `total_amount`, 0 when empty
    pub average: f64,
    /// Smallest single `total_amount`, 0 when empty
    pub min: f64,
    /// Largest single `total_amount`, 0 when empty
    pub max: f64,
    /// Grand total divided by the number of distinct expense dates
    /// (denominator floored at 1)
    pub average_per_day: f64,
    /// Number of expenses
    pub count: usize,
}

/// Groups expenses by category display name.
///
/// Expenses with no linked category (or a dangling reference) land under
/// [`UNCATEGORIZED_LABEL`].
#[must_use]
pub fn breakdown_by_category(
    expenses: &[expense::Model],
    categories: &[expense_category::Model],
) -> HashMap<String, CategoryBreakdown> {
    let by_id: HashMap<i64, &expense_category::Model> =
        categories.iter().map(|cat| (cat.id, cat)).collect();

    let mut breakdown: HashMap<String, CategoryBreakdown> = HashMap::new();
    for exp in expenses {
        let (label, color) = match exp.category_id.and_then(|id| by_id.get(&id)) {
            Some(cat) => (
                cat.name.clone(),
                cat.color
                    .clone()
                    .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string()),
            ),
            None => (
                UNCATEGORIZED_LABEL.to_string(),
                DEFAULT_CATEGORY_COLOR.to_string(),
            ),
        };

        let entry = breakdown.entry(label).or_insert(CategoryBreakdown {
            total: 0.0,
            count: 0,
            color,
        });
        entry.total += exp.total_amount;
        entry.count += 1;
    }
    breakdown
}

/// Sums `total_amount` per payment method.
#[must_use]
pub fn breakdown_by_payment_method(expenses: &[expense::Model]) -> HashMap<PaymentMethod, f64> {
    let mut breakdown: HashMap<PaymentMethod, f64> = HashMap::new();
    for exp in expenses {
        *breakdown.entry(exp.payment_method).or_insert(0.0) += exp.total_amount;
    }
    breakdown
}

/// Computes aggregate stats over the expense slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_stats(expenses: &[expense::Model]) -> ExpenseStats {
    if expenses.is_empty() {
        return ExpenseStats {
            total: 0.0,
            average: 0.0,
            min: 0.0,
            max: 0.0,
            average_per_day: 0.0,
            count: 0,
        };
    }

    let count = expenses.len();
    let total: f64 = expenses.iter().map(|exp| exp.total_amount).sum();
    let min = expenses
        .iter()
        .map(|exp| exp.total_amount)
        .fold(f64::INFINITY, f64::min);
    let max = expenses
        .iter()
        .map(|exp| exp.total_amount)
        .fold(f64::NEG_INFINITY, f64::max);

    let distinct_days = expenses
        .iter()
        .map(|exp| exp.expense_date)
        .collect::<HashSet<_>>()
        .len()
        .max(1);

    ExpenseStats {
        total,
        average: total / count as f64,
        min,
        max,
        average_per_day: total / distinct_days as f64,
        count,
    }
}

/// Share of `part` in `grand_total` as a percentage.
///
/// Returns `None` when the grand total is zero or negative so callers render
/// nothing instead of dividing by zero.
#[must_use]
pub fn percentage_of(part: f64, grand_total: f64) -> Option<f64> {
    if grand_total <= 0.0 {
        return None;
    }
    Some(part / grand_total * 100.0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;
    use chrono::NaiveDate;

    fn make_expense(total: f64, category_id: Option<i64>, date: NaiveDate) -> expense::Model {
        expense::Model {
            id: 0,
            user_id: 1,
            category_id,
            subcategory_id: None,
            amount: total,
            tax_rate: 0.0,
            tax_amount: 0.0,
            total_amount: total,
            payment_method: PaymentMethod::Cash,
            expense_date: date,
            expense_time: chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            description: None,
            created_at: date.and_hms_opt(12, 0, 0).unwrap(),
        }
    }

    fn make_category(id: i64, name: &str, color: Option<&str>) -> expense_category::Model {
        expense_category::Model {
            id,
            name: name.to_string(),
            color: color.map(ToString::to_string),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn test_breakdown_by_category_sums_and_counts() {
        let categories = vec![
            make_category(1, "Food", Some("#ef4444")),
            make_category(2, "Travel", None),
        ];
        let expenses = vec![
            make_expense(100.0, Some(1), day(1)),
            make_expense(50.0, Some(1), day(2)),
            make_expense(25.0, Some(2), day(3)),
        ];

        let breakdown = breakdown_by_category(&expenses, &categories);
        assert_eq!(breakdown.len(), 2);

        let food = &breakdown["Food"];
        assert_eq!(food.total, 150.0);
        assert_eq!(food.count, 2);
        assert_eq!(food.color, "#ef4444");

        let travel = &breakdown["Travel"];
        assert_eq!(travel.total, 25.0);
        assert_eq!(travel.count, 1);
        assert_eq!(travel.color, DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn test_breakdown_uncategorized_fallback() {
        let categories = vec![make_category(1, "Food", None)];
        let expenses = vec![
            // No category linked.
            make_expense(10.0, None, day(1)),
            // Dangling reference to a deleted category.
            make_expense(20.0, Some(99), day(1)),
        ];

        let breakdown = breakdown_by_category(&expenses, &categories);
        assert_eq!(breakdown.len(), 1);

        let uncategorized = &breakdown[UNCATEGORIZED_LABEL];
        assert_eq!(uncategorized.total, 30.0);
        assert_eq!(uncategorized.count, 2);
        assert_eq!(uncategorized.color, DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn test_breakdown_by_payment_method() {
        let mut cash = make_expense(100.0, None, day(1));
        cash.payment_method = PaymentMethod::Cash;
        let mut bank = make_expense(40.0, None, day(1));
        bank.payment_method = PaymentMethod::Bank;
        let mut cash2 = make_expense(60.0, None, day(2));
        cash2.payment_method = PaymentMethod::Cash;

        let breakdown = breakdown_by_payment_method(&[cash, bank, cash2]);
        assert_eq!(breakdown[&PaymentMethod::Cash], 160.0);
        assert_eq!(breakdown[&PaymentMethod::Bank], 40.0);
        assert!(!breakdown.contains_key(&PaymentMethod::Unpaid));
    }

    #[test]
    fn test_compute_stats_over_mixed_days() {
        let expenses = vec![
            make_expense(100.0, Some(1), day(1)),
            make_expense(50.0, Some(1), day(1)),
            make_expense(25.0, Some(2), day(2)),
        ];

        let stats = compute_stats(&expenses);
        assert_eq!(stats.total, 175.0);
        assert!((stats.average - 58.333_333).abs() < 0.001);
        assert_eq!(stats.min, 25.0);
        assert_eq!(stats.max, 100.0);
        assert_eq!(stats.count, 3);
        // Two distinct dates.
        assert_eq!(stats.average_per_day, 87.5);
    }

    #[test]
    fn test_compute_stats_empty_collection() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.total, 0.0);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 0.0);
        assert_eq!(stats.average_per_day, 0.0);
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn test_compute_stats_single_day_denominator() {
        let expenses = vec![
            make_expense(30.0, None, day(5)),
            make_expense(70.0, None, day(5)),
        ];
        let stats = compute_stats(&expenses);
        // One distinct date; denominator stays at 1.
        assert_eq!(stats.average_per_day, 100.0);
    }

    #[test]
    fn test_percentage_of_guards_zero_total() {
        assert_eq!(percentage_of(50.0, 0.0), None);
        assert_eq!(percentage_of(50.0, -10.0), None);
        assert_eq!(percentage_of(50.0, 200.0), Some(25.0));
    }

    #[test]
    fn test_aggregation_is_pure() {
        let expenses = vec![make_expense(10.0, None, day(1))];
        let categories = vec![];
        assert_eq!(
            breakdown_by_category(&expenses, &categories),
            breakdown_by_category(&expenses, &categories)
        );
        assert_eq!(compute_stats(&expenses), compute_stats(&expenses));
    }
}
