//! Financial profile records used to fill in purchase inputs.

mod repository;

pub use repository::{ProfileRecord, ProfileStore, ProfileStoreError, ProfileView};

use serde::{Deserialize, Serialize};

use crate::decision::{loose_number, loose_text};

/// Identifier wrapper for profile owners.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Self-reported finances. Every field is optional; form values arrive as text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialProfile {
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub monthly_expenses: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub emergency_fund: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub high_interest_debt: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub low_interest_debt: Option<f64>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub monthly_savings: Option<f64>,
    #[serde(deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub financial_goal: Option<String>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub disposable_income: Option<f64>,
}

/// Fields counted towards profile completion.
const COMPLETION_FIELDS: usize = 7;

impl FinancialProfile {
    pub fn metrics(&self) -> ProfileMetrics {
        let disposable_income = self.disposable_income.or_else(|| {
            match (self.monthly_income, self.monthly_expenses) {
                (Some(income), Some(expenses)) => Some(income - expenses),
                _ => None,
            }
        });

        let total_debt = match (self.high_interest_debt, self.low_interest_debt) {
            (None, None) => None,
            (high, low) => Some(high.unwrap_or(0.0) + low.unwrap_or(0.0)),
        };

        let emergency_fund_months = match (self.emergency_fund, self.monthly_expenses) {
            (Some(fund), Some(expenses)) if expenses > 0.0 => Some(fund / expenses),
            _ => None,
        };

        ProfileMetrics {
            disposable_income,
            total_debt,
            emergency_fund_months,
        }
    }

    pub fn carries_high_interest_debt(&self) -> bool {
        self.high_interest_debt.map(|debt| debt > 0.0).unwrap_or(false)
    }

    /// Share of the core fields filled in, as a rounded percentage.
    pub fn completion_percentage(&self) -> u8 {
        let filled = [
            self.monthly_income.is_some(),
            self.monthly_expenses.is_some(),
            self.emergency_fund.is_some(),
            self.high_interest_debt.is_some(),
            self.low_interest_debt.is_some(),
            self.monthly_savings.is_some(),
            self.financial_goal.is_some(),
        ]
        .into_iter()
        .filter(|filled| *filled)
        .count();

        ((filled as f64 / COMPLETION_FIELDS as f64) * 100.0).round() as u8
    }

    pub fn completion_band(&self) -> CompletionBand {
        CompletionBand::from_percentage(self.completion_percentage())
    }
}

/// Convenience figures derived from a profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileMetrics {
    pub disposable_income: Option<f64>,
    pub total_debt: Option<f64>,
    pub emergency_fund_months: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionBand {
    Low,
    Partial,
    Complete,
}

impl CompletionBand {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage < 30 {
            Self::Low
        } else if percentage < 70 {
            Self::Partial
        } else {
            Self::Complete
        }
    }
}
