//! Domain models for Tally

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Spending category shared by transactions and budgets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsUtilities,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Education")]
    Education,
    #[serde(rename = "Travel")]
    Travel,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 9] = [
        Self::FoodDining,
        Self::Transportation,
        Self::Shopping,
        Self::Entertainment,
        Self::BillsUtilities,
        Self::Healthcare,
        Self::Education,
        Self::Travel,
        Self::Other,
    ];

    /// Display name, also the stored and serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::BillsUtilities => "Bills & Utilities",
            Self::Healthcare => "Healthcare",
            Self::Education => "Education",
            Self::Travel => "Travel",
            Self::Other => "Other",
        }
    }

    /// Short identifier for command-line use
    pub fn slug(&self) -> &'static str {
        match self {
            Self::FoodDining => "food",
            Self::Transportation => "transportation",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::BillsUtilities => "bills",
            Self::Healthcare => "healthcare",
            Self::Education => "education",
            Self::Travel => "travel",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle) || c.slug().eq_ignore_ascii_case(needle))
            .copied()
            .or_else(|| match needle.to_lowercase().as_str() {
                "food-dining" | "food_dining" | "dining" => Some(Self::FoodDining),
                "bills-utilities" | "bills_utilities" | "utilities" => Some(Self::BillsUtilities),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Always positive; every transaction is an expense
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    /// Set on full-record update
    pub updated_at: Option<DateTime<Utc>>,
}

/// A transaction to be created or written over an existing one
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category: Category,
}

impl NewTransaction {
    /// Check the write-time invariants and normalize the description
    pub fn validate(self) -> Result<Self> {
        validate_amount(self.amount)?;
        let description = self.description.trim().to_string();
        if description.is_empty() {
            return Err(Error::InvalidData("Description is required".to_string()));
        }
        Ok(Self {
            description,
            ..self
        })
    }
}

/// Monthly spending cap for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: Category,
    /// Monthly cap
    pub amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A budget to be created
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    pub category: Category,
    pub amount: f64,
}

impl NewBudget {
    pub fn validate(self) -> Result<Self> {
        validate_amount(self.amount)?;
        Ok(self)
    }
}

/// Amounts must be finite and strictly positive
pub fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidData(
            "Amount must be greater than 0".to_string(),
        ));
    }
    Ok(())
}
