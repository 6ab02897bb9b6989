//! Rule-based spending insights
//!
//! Each rule looks at the same [`InsightInputs`] and either produces one
//! [`Insight`] or nothing. Every rule runs; the output keeps rule order.

use serde_json::json;

use super::types::{BudgetStatus, BudgetTier, CategoryTotals, Insight, InsightKind, Severity};

/// How many categories the top-spending insight names
const TOP_CATEGORY_COUNT: usize = 3;

/// Projection must exceed current spending by this factor to warn
const PROJECTION_WARNING_FACTOR: f64 = 1.2;

/// Everything the rules look at, already aggregated for one reference month
#[derive(Debug, Clone, Copy)]
pub struct InsightInputs<'a> {
    pub current_month_total: f64,
    pub previous_month_total: f64,
    /// Current month only
    pub category_totals: &'a CategoryTotals,
    /// Current month only
    pub budget_statuses: &'a [BudgetStatus],
    pub projected_total: f64,
}

type Rule = fn(&InsightInputs) -> Option<Insight>;

const RULES: [Rule; 6] = [
    month_over_month,
    over_budget,
    near_budget_limit,
    top_categories,
    projected_overspending,
    good_budget_management,
];

/// Evaluate every rule in order and collect what fired
///
/// An empty result means there is not enough data to say anything.
pub fn generate_insights(inputs: &InsightInputs) -> Vec<Insight> {
    RULES.iter().filter_map(|rule| rule(inputs)).collect()
}

fn pluralize_category(count: usize) -> &'static str {
    if count == 1 {
        "category"
    } else {
        "categories"
    }
}

fn category_names(statuses: &[&BudgetStatus]) -> String {
    statuses
        .iter()
        .map(|s| s.category.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn month_over_month(inputs: &InsightInputs) -> Option<Insight> {
    let change = inputs.current_month_total - inputs.previous_month_total;
    if change == 0.0 {
        return None;
    }

    // No prior spending reads as 0% rather than infinite growth
    let percent = if inputs.previous_month_total > 0.0 {
        change / inputs.previous_month_total * 100.0
    } else {
        0.0
    };

    let increased = change > 0.0;
    let (severity, title, direction) = if increased {
        (Severity::Warning, "Increased spending", "more")
    } else {
        (Severity::Positive, "Decreased spending", "less")
    };

    Some(
        Insight::new(
            InsightKind::MonthOverMonth,
            severity,
            title,
            format!(
                "You've spent {:.1}% {} this month compared to last month (${:.2}).",
                percent.abs(),
                direction,
                change.abs()
            ),
        )
        .with_data(json!({
            "current": inputs.current_month_total,
            "previous": inputs.previous_month_total,
            "change": change,
            "percent_change": percent,
        })),
    )
}

fn over_budget(inputs: &InsightInputs) -> Option<Insight> {
    let over: Vec<_> = inputs
        .budget_statuses
        .iter()
        .filter(|s| s.tier == BudgetTier::Over)
        .collect();
    if over.is_empty() {
        return None;
    }

    Some(
        Insight::new(
            InsightKind::OverBudget,
            Severity::Danger,
            "Over budget",
            format!(
                "You're over budget in {} {}: {}.",
                over.len(),
                pluralize_category(over.len()),
                category_names(&over)
            ),
        )
        .with_data(json!({ "categories": over.iter().map(|s| s.category).collect::<Vec<_>>() })),
    )
}

fn near_budget_limit(inputs: &InsightInputs) -> Option<Insight> {
    let near: Vec<_> = inputs
        .budget_statuses
        .iter()
        .filter(|s| s.tier == BudgetTier::Warning)
        .collect();
    if near.is_empty() {
        return None;
    }

    Some(
        Insight::new(
            InsightKind::NearBudgetLimit,
            Severity::Warning,
            "Budget warning",
            format!(
                "You've used over 80% of your budget in: {}.",
                category_names(&near)
            ),
        )
        .with_data(json!({ "categories": near.iter().map(|s| s.category).collect::<Vec<_>>() })),
    )
}

fn top_categories(inputs: &InsightInputs) -> Option<Insight> {
    if inputs.category_totals.is_empty() {
        return None;
    }

    let top = inputs.category_totals.top(TOP_CATEGORY_COUNT);
    let listed = top
        .iter()
        .map(|e| format!("{} (${:.2})", e.category, e.amount))
        .collect::<Vec<_>>()
        .join(", ");

    Some(
        Insight::new(
            InsightKind::TopCategories,
            Severity::Info,
            "Top spending categories",
            format!("Your highest expenses this month: {}.", listed),
        )
        .with_data(json!({ "categories": top })),
    )
}

fn projected_overspending(inputs: &InsightInputs) -> Option<Insight> {
    if inputs.projected_total <= inputs.current_month_total * PROJECTION_WARNING_FACTOR {
        return None;
    }

    Some(
        Insight::new(
            InsightKind::ProjectedOverspending,
            Severity::Warning,
            "Projected overspending",
            format!(
                "Based on your current spending pattern, you're projected to spend ${:.2} this month.",
                inputs.projected_total
            ),
        )
        .with_data(json!({
            "current": inputs.current_month_total,
            "projected": inputs.projected_total,
        })),
    )
}

fn good_budget_management(inputs: &InsightInputs) -> Option<Insight> {
    let good = inputs
        .budget_statuses
        .iter()
        .filter(|s| s.tier == BudgetTier::Good && s.spent > 0.0)
        .count();
    if good == 0 {
        return None;
    }

    Some(
        Insight::new(
            InsightKind::GoodBudgetManagement,
            Severity::Positive,
            "Good budget management",
            format!(
                "You're staying within budget in {} {}. Keep it up!",
                good,
                pluralize_category(good)
            ),
        )
        .with_data(json!({ "count": good })),
    )
}
