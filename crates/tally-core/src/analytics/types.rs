//! Core types for the analytics engine

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::models::Category;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month, ordered chronologically
///
/// Serialized as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a key; `month` is 1-based
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month a date falls in
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar month before this one
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// First day of the month
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Number of days in the month (28-31)
    pub fn days_in_month(&self) -> u32 {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        match (self.first_day(), next) {
            (Some(start), Some(end)) => (end - start).num_days() as u32,
            _ => 30,
        }
    }

    /// Whether a date falls inside this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Short chart label, e.g. "Jan 2024"
    pub fn label(&self) -> String {
        let name = MONTH_ABBREVIATIONS[(self.month - 1) as usize];
        format!("{} {}", name, self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("Invalid month (expected YYYY-MM): {}", s);
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Summed spending for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: Category,
    pub amount: f64,
}

/// Spending per category, in first-encountered order
///
/// Categories with no transactions have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals(Vec<CategoryAmount>);

impl CategoryTotals {
    /// Add an amount, appending the category if it is new
    pub fn add(&mut self, category: Category, amount: f64) {
        match self.0.iter_mut().find(|e| e.category == category) {
            Some(entry) => entry.amount += amount,
            None => self.0.push(CategoryAmount { category, amount }),
        }
    }

    pub fn get(&self, category: Category) -> Option<f64> {
        self.0
            .iter()
            .find(|e| e.category == category)
            .map(|e| e.amount)
    }

    /// Sum over every category
    pub fn total(&self) -> f64 {
        self.0.iter().map(|e| e.amount).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryAmount> {
        self.0.iter()
    }

    /// The `n` largest categories by amount; ties keep first-encountered order
    pub fn top(&self, n: usize) -> Vec<CategoryAmount> {
        let mut sorted = self.0.clone();
        // sort_by is stable
        sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        sorted.truncate(n);
        sorted
    }
}

impl<'a> IntoIterator for &'a CategoryTotals {
    type Item = &'a CategoryAmount;
    type IntoIter = std::slice::Iter<'a, CategoryAmount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One point of the monthly spending series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    pub month: MonthKey,
    /// e.g. "Jan 2024"
    pub label: String,
    pub amount: f64,
}

/// How much of a budget has been used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    /// At or under 80%
    Good,
    /// Over 80%, at or under 100%
    Warning,
    /// Over 100%
    Over,
    /// The stored budget amount is not a positive number
    Invalid,
}

impl BudgetTier {
    /// Classify a usage percentage
    pub fn from_percent(percent_used: f64) -> Self {
        if percent_used > 100.0 {
            BudgetTier::Over
        } else if percent_used > 80.0 {
            BudgetTier::Warning
        } else {
            BudgetTier::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Good => "good",
            BudgetTier::Warning => "warning",
            BudgetTier::Over => "over",
            BudgetTier::Invalid => "invalid",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BudgetTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "good" => Ok(BudgetTier::Good),
            "warning" => Ok(BudgetTier::Warning),
            "over" => Ok(BudgetTier::Over),
            "invalid" => Ok(BudgetTier::Invalid),
            _ => Err(format!("Unknown budget tier: {}", s)),
        }
    }
}

/// Budget versus actual spending for one budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub budget_id: i64,
    pub category: Category,
    pub budgeted: f64,
    pub spent: f64,
    /// Never negative
    pub remaining: f64,
    /// Not clamped; 150.0 means half again over
    pub percent_used: f64,
    pub tier: BudgetTier,
}

/// Kinds of insight the generator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    MonthOverMonth,
    OverBudget,
    NearBudgetLimit,
    TopCategories,
    ProjectedOverspending,
    GoodBudgetManagement,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::MonthOverMonth => "month_over_month",
            InsightKind::OverBudget => "over_budget",
            InsightKind::NearBudgetLimit => "near_budget_limit",
            InsightKind::TopCategories => "top_categories",
            InsightKind::ProjectedOverspending => "projected_overspending",
            InsightKind::GoodBudgetManagement => "good_budget_management",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month_over_month" => Ok(InsightKind::MonthOverMonth),
            "over_budget" => Ok(InsightKind::OverBudget),
            "near_budget_limit" => Ok(InsightKind::NearBudgetLimit),
            "top_categories" => Ok(InsightKind::TopCategories),
            "projected_overspending" => Ok(InsightKind::ProjectedOverspending),
            "good_budget_management" => Ok(InsightKind::GoodBudgetManagement),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// Tone of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Neutral observation
    Info,
    /// Something going well
    Positive,
    /// Worth attention
    Warning,
    /// Already a problem
    Danger,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Positive => "positive",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "positive" => Ok(Severity::Positive),
            "warning" => Ok(Severity::Warning),
            "danger" => Ok(Severity::Danger),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A single observation about the user's spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub severity: Severity,
    /// Short title (e.g., "Over budget")
    pub title: String,
    /// One-sentence explanation shown to the user
    pub description: String,
    /// Kind-specific structured data
    pub data: serde_json::Value,
}

impl Insight {
    pub fn new(
        kind: InsightKind,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            title: title.into(),
            description: description.into(),
            data: serde_json::Value::Null,
        }
    }

    /// Add structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}
