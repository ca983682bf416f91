use serde::{Deserialize, Serialize};

use crate::decision::{
    loose_debt_flag, loose_number, loose_text, loose_urgency, DebtFlag, PurchaseInput,
    PurchaseUrgency, DEFAULT_LEFTOVER_INCOME,
};
use crate::profile::FinancialProfile;

/// Goal used when neither the form nor the profile names one.
pub const DEFAULT_GOAL: &str = "Save for emergencies";

/// Raw purchase form as submitted by a client. Every field may be blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseRequest {
    #[serde(deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub item_name: Option<String>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub item_cost: Option<f64>,
    #[serde(deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(deserialize_with = "loose_number", skip_serializing_if = "Option::is_none")]
    pub leftover_income: Option<f64>,
    #[serde(deserialize_with = "loose_debt_flag", skip_serializing_if = "Option::is_none")]
    pub has_high_interest_debt: Option<DebtFlag>,
    #[serde(deserialize_with = "loose_text", skip_serializing_if = "Option::is_none")]
    pub main_financial_goal: Option<String>,
    #[serde(deserialize_with = "loose_urgency", skip_serializing_if = "Option::is_none")]
    pub purchase_urgency: Option<PurchaseUrgency>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub find_alternatives: bool,
}

impl PurchaseRequest {
    pub fn for_item(name: impl Into<String>, cost: f64) -> Self {
        Self {
            item_name: Some(name.into()),
            item_cost: Some(cost),
            ..Self::default()
        }
    }

    /// Cost the user actually entered; zero counts as not entered.
    pub fn entered_cost(&self) -> Option<f64> {
        self.item_cost.filter(|cost| *cost > 0.0)
    }
}

/// Build the scoring input from the form, then the profile, then fixed defaults.
pub fn assemble_input(
    request: &PurchaseRequest,
    profile: Option<&FinancialProfile>,
    item_name: &str,
    item_cost: f64,
) -> PurchaseInput {
    let leftover_income = request
        .leftover_income
        .or_else(|| profile.and_then(|profile| profile.metrics().disposable_income))
        .unwrap_or_else(|| DEFAULT_LEFTOVER_INCOME.max(item_cost * 2.0));

    let debt = request.has_high_interest_debt.unwrap_or_else(|| {
        DebtFlag::from(profile.map(FinancialProfile::carries_high_interest_debt) == Some(true))
    });

    let goal = request
        .main_financial_goal
        .clone()
        .or_else(|| profile.and_then(|profile| profile.financial_goal.clone()))
        .unwrap_or_else(|| DEFAULT_GOAL.to_string());

    let urgency = request.purchase_urgency.unwrap_or(PurchaseUrgency::Mixed);

    let mut input = PurchaseInput::new(item_name, item_cost, leftover_income)
        .with_debt(debt)
        .with_goal(goal)
        .with_urgency(urgency);

    if let Some(profile) = profile {
        if let Some(income) = profile.monthly_income {
            input.monthly_income = income;
        }
        if let Some(expenses) = profile.monthly_expenses {
            input.monthly_expenses = expenses;
        }
        if let Some(fund) = profile.emergency_fund {
            input.emergency_fund = fund;
        }
        if let Some(debt) = profile.high_interest_debt {
            input.high_interest_debt = debt;
        }
        if let Some(debt) = profile.low_interest_debt {
            input.low_interest_debt = debt;
        }
        if let Some(savings) = profile.monthly_savings {
            input.monthly_savings = savings;
        }
    }

    input
}
