//! Aggregation functions over transaction and budget snapshots
//!
//! Everything here is pure: the same inputs always produce the same output and
//! nothing is read from the clock or the database.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::types::{BudgetStatus, BudgetTier, CategoryTotals, MonthKey, MonthlyTotal};
use crate::error::{Error, Result};
use crate::models::{Budget, Category, Transaction};

/// How many months the monthly series keeps
pub const MONTHLY_WINDOW: usize = 6;

/// A category's share of a transaction set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: Category,
    pub amount: f64,
    /// Percent of the set's total
    pub percentage: f64,
}

/// Budget versus actual, as plotted side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub category: Category,
    pub budgeted: f64,
    pub spent: f64,
    pub remaining: f64,
}

/// Sum of every transaction amount
pub fn total_amount(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(|t| t.amount).sum()
}

/// Sum amounts per category, in first-encountered order
pub fn group_by_category(transactions: &[Transaction]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for tx in transactions {
        totals.add(tx.category, tx.amount);
    }
    totals
}

/// Monthly spending, oldest first, limited to the most recent months
pub fn group_by_month(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut series = group_by_month_all(transactions);
    if series.len() > MONTHLY_WINDOW {
        series.drain(..series.len() - MONTHLY_WINDOW);
    }
    series
}

/// Monthly spending over the full history, oldest first
pub fn group_by_month_all(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    let mut by_month: BTreeMap<MonthKey, f64> = BTreeMap::new();
    for tx in transactions {
        *by_month.entry(MonthKey::from_date(tx.date)).or_insert(0.0) += tx.amount;
    }

    by_month
        .into_iter()
        .map(|(month, amount)| MonthlyTotal {
            month,
            label: month.label(),
            amount,
        })
        .collect()
}

/// Compare each budget with what was spent in its category
///
/// Returns one entry per budget, in budget order. Callers pass the
/// transactions for the period the budgets cover (normally one month).
pub fn compute_budget_status(transactions: &[Transaction], budgets: &[Budget]) -> Vec<BudgetStatus> {
    let spent_by_category = group_by_category(transactions);

    budgets
        .iter()
        .map(|budget| {
            let spent = spent_by_category.get(budget.category).unwrap_or(0.0);

            if !budget.amount.is_finite() || budget.amount <= 0.0 {
                warn!(
                    budget_id = budget.id,
                    category = %budget.category,
                    amount = budget.amount,
                    "Budget has a non-positive amount; skipping usage calculation"
                );
                return BudgetStatus {
                    budget_id: budget.id,
                    category: budget.category,
                    budgeted: budget.amount,
                    spent,
                    remaining: 0.0,
                    percent_used: 0.0,
                    tier: BudgetTier::Invalid,
                };
            }

            let percent_used = spent / budget.amount * 100.0;
            BudgetStatus {
                budget_id: budget.id,
                category: budget.category,
                budgeted: budget.amount,
                spent,
                remaining: (budget.amount - spent).max(0.0),
                percent_used,
                tier: BudgetTier::from_percent(percent_used),
            }
        })
        .collect()
}

/// Transactions dated inside `month`
pub fn filter_by_month(transactions: &[Transaction], month: MonthKey) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .cloned()
        .collect()
}

/// Average spend per elapsed day of the month
///
/// `day_of_month` is 1-based (the 1st counts as one elapsed day).
pub fn daily_average(month_transactions: &[Transaction], day_of_month: u32) -> Result<f64> {
    if day_of_month == 0 {
        return Err(Error::InvalidData(
            "Day of month must be at least 1".to_string(),
        ));
    }
    Ok(total_amount(month_transactions) / f64::from(day_of_month))
}

/// Naive linear extrapolation of the daily average over the whole month
pub fn projected_monthly_total(daily_average: f64, days_in_month: u32) -> f64 {
    daily_average * f64::from(days_in_month)
}

/// Each category's amount and share of the total, in first-encountered order
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let totals = group_by_category(transactions);
    let total = totals.total();

    totals
        .iter()
        .map(|entry| CategoryShare {
            category: entry.category,
            amount: entry.amount,
            percentage: if total > 0.0 {
                entry.amount / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Budgeted, spent and remaining per budget
pub fn budget_comparison(statuses: &[BudgetStatus]) -> Vec<BudgetComparison> {
    statuses
        .iter()
        .map(|s| BudgetComparison {
            category: s.category,
            budgeted: s.budgeted,
            spent: s.spent,
            remaining: s.remaining,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    const EPSILON: f64 = 0.01;

    fn tx(id: i64, amount: f64, date: &str, category: Category) -> Transaction {
        Transaction {
            id,
            amount,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: format!("tx {}", id),
            category,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn budget(id: i64, category: Category, amount: f64) -> Budget {
        Budget {
            id,
            category,
            amount,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_group_by_category_first_encountered_order() {
        let txs = vec![
            tx(1, 50.0, "2024-03-01", Category::FoodDining),
            tx(2, 30.0, "2024-03-02", Category::FoodDining),
            tx(3, 20.0, "2024-03-03", Category::Travel),
        ];
        let totals = group_by_category(&txs);

        assert_eq!(totals.len(), 2);
        assert!((totals.get(Category::FoodDining).unwrap() - 80.0).abs() < EPSILON);
        assert!((totals.get(Category::Travel).unwrap() - 20.0).abs() < EPSILON);
        assert!(totals.get(Category::Shopping).is_none());

        let top: Vec<_> = totals.top(3).into_iter().map(|e| e.category).collect();
        assert_eq!(top, vec![Category::FoodDining, Category::Travel]);
    }

    #[test]
    fn test_group_by_category_conserves_total() {
        let txs = vec![
            tx(1, 12.34, "2024-01-05", Category::Shopping),
            tx(2, 99.99, "2024-02-11", Category::Healthcare),
            tx(3, 0.01, "2024-02-12", Category::Shopping),
            tx(4, 45.5, "2023-12-31", Category::Other),
        ];
        let totals = group_by_category(&txs);
        assert!((totals.total() - total_amount(&txs)).abs() < EPSILON);
    }

    #[test]
    fn test_top_categories_ties_keep_encounter_order() {
        let txs = vec![
            tx(1, 10.0, "2024-03-01", Category::Education),
            tx(2, 40.0, "2024-03-01", Category::Travel),
            tx(3, 10.0, "2024-03-01", Category::Shopping),
            tx(4, 10.0, "2024-03-01", Category::Other),
        ];
        let top: Vec<_> = group_by_category(&txs)
            .top(3)
            .into_iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(
            top,
            vec![Category::Travel, Category::Education, Category::Shopping]
        );
    }

    #[test]
    fn test_group_by_month_sorted_and_windowed() {
        let txs = vec![
            tx(1, 10.0, "2024-08-15", Category::Other),
            tx(2, 10.0, "2024-01-15", Category::Other),
            tx(3, 10.0, "2024-03-15", Category::Other),
            tx(4, 5.0, "2024-03-20", Category::Other),
            tx(5, 10.0, "2024-02-15", Category::Other),
            tx(6, 10.0, "2024-05-15", Category::Other),
            tx(7, 10.0, "2024-06-15", Category::Other),
            tx(8, 10.0, "2024-07-15", Category::Other),
        ];

        let all = group_by_month_all(&txs);
        assert_eq!(all.len(), 7);

        let series = group_by_month(&txs);
        assert_eq!(series.len(), MONTHLY_WINDOW);
        assert!(series.windows(2).all(|w| w[0].month < w[1].month));
        assert_eq!(series[0].month.to_string(), "2024-02");
        assert_eq!(series[0].label, "Feb 2024");
        assert_eq!(series[5].month.to_string(), "2024-08");

        let march = series.iter().find(|m| m.label == "Mar 2024").unwrap();
        assert!((march.amount - 15.0).abs() < EPSILON);
    }

    #[test]
    fn test_group_by_month_empty() {
        assert!(group_by_month(&[]).is_empty());
    }

    #[test]
    fn test_budget_status_tiers() {
        let budgets = vec![budget(1, Category::FoodDining, 100.0)];

        for (spent, percent, tier) in [
            (150.0, 150.0, BudgetTier::Over),
            (85.0, 85.0, BudgetTier::Warning),
            (50.0, 50.0, BudgetTier::Good),
        ] {
            let txs = vec![tx(1, spent, "2024-03-01", Category::FoodDining)];
            let status = &compute_budget_status(&txs, &budgets)[0];
            assert!((status.percent_used - percent).abs() < EPSILON);
            assert_eq!(status.tier, tier);
        }
    }

    #[test]
    fn test_budget_status_over_budget_remaining_is_zero() {
        let budgets = vec![budget(1, Category::FoodDining, 100.0)];
        let txs = vec![tx(1, 120.0, "2024-03-01", Category::FoodDining)];

        let status = &compute_budget_status(&txs, &budgets)[0];
        assert!((status.spent - 120.0).abs() < EPSILON);
        assert_eq!(status.remaining, 0.0);
        assert!((status.percent_used - 120.0).abs() < EPSILON);
        assert_eq!(status.tier, BudgetTier::Over);
    }

    #[test]
    fn test_budget_status_one_entry_per_budget() {
        let budgets = vec![
            budget(1, Category::FoodDining, 100.0),
            budget(2, Category::Travel, 500.0),
            budget(3, Category::Healthcare, 50.0),
        ];
        let txs = vec![
            tx(1, 30.0, "2024-03-01", Category::FoodDining),
            tx(2, 99.0, "2024-03-02", Category::Shopping),
        ];
        let statuses = compute_budget_status(&txs, &budgets);

        assert_eq!(statuses.len(), budgets.len());
        for (status, budget) in statuses.iter().zip(&budgets) {
            assert_eq!(status.category, budget.category);
            assert_eq!(status.budget_id, budget.id);
        }
        let travel = &statuses[1];
        assert_eq!(travel.spent, 0.0);
        assert_eq!(travel.remaining, 500.0);
        assert_eq!(travel.tier, BudgetTier::Good);
    }

    #[test]
    fn test_budget_status_invalid_amount_never_nan() {
        let budgets = vec![budget(1, Category::Other, 0.0), budget(2, Category::Travel, -5.0)];
        let txs = vec![tx(1, 10.0, "2024-03-01", Category::Other)];

        for status in compute_budget_status(&txs, &budgets) {
            assert_eq!(status.tier, BudgetTier::Invalid);
            assert_eq!(status.percent_used, 0.0);
            assert!(!status.percent_used.is_nan());
        }
    }

    #[test]
    fn test_filter_by_month() {
        let txs = vec![
            tx(1, 10.0, "2024-02-29", Category::Other),
            tx(2, 10.0, "2024-03-01", Category::Other),
            tx(3, 10.0, "2024-03-31", Category::Other),
            tx(4, 10.0, "2023-03-15", Category::Other),
        ];
        let march = filter_by_month(&txs, MonthKey::new(2024, 3).unwrap());
        let ids: Vec<_> = march.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_daily_average_and_projection() {
        let txs = vec![
            tx(1, 60.0, "2024-04-01", Category::Other),
            tx(2, 40.0, "2024-04-08", Category::Other),
        ];
        let avg = daily_average(&txs, 10).unwrap();
        assert!((avg - 10.0).abs() < EPSILON);
        assert!((projected_monthly_total(avg, 30) - 300.0).abs() < EPSILON);

        assert!(matches!(daily_average(&txs, 0), Err(Error::InvalidData(_))));
        assert_eq!(daily_average(&[], 5).unwrap(), 0.0);
    }

    #[test]
    fn test_category_breakdown_percentages() {
        let txs = vec![
            tx(1, 75.0, "2024-03-01", Category::BillsUtilities),
            tx(2, 25.0, "2024-03-02", Category::Entertainment),
        ];
        let shares = category_breakdown(&txs);
        assert_eq!(shares.len(), 2);
        assert!((shares[0].percentage - 75.0).abs() < EPSILON);
        assert!((shares[1].percentage - 25.0).abs() < EPSILON);
        assert!(category_breakdown(&[]).is_empty());
    }

    #[test]
    fn test_budget_comparison_mirrors_status() {
        let budgets = vec![budget(1, Category::Shopping, 200.0)];
        let txs = vec![tx(1, 250.0, "2024-03-01", Category::Shopping)];
        let comparison = budget_comparison(&compute_budget_status(&txs, &budgets));
        assert_eq!(
            comparison,
            vec![BudgetComparison {
                category: Category::Shopping,
                budgeted: 200.0,
                spent: 250.0,
                remaining: 0.0,
            }]
        );
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let txs = vec![
            tx(1, 10.0, "2024-03-01", Category::Travel),
            tx(2, 20.0, "2024-02-01", Category::FoodDining),
        ];
        let budgets = vec![budget(1, Category::Travel, 15.0)];
        assert_eq!(group_by_category(&txs), group_by_category(&txs));
        assert_eq!(group_by_month(&txs), group_by_month(&txs));
        assert_eq!(
            compute_budget_status(&txs, &budgets),
            compute_budget_status(&txs, &budgets)
        );
    }
}
