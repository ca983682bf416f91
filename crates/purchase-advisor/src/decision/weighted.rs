use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{StrategyKind, WeightedConfig};
use super::explain::{narrate, Concern, Narrative};
use super::input::{FinancialSnapshot, PurchaseInput};
use super::keywords::GoalCategory;
use super::policy::recommend_weighted;
use super::{Decision, DecisionComponent, ScoringStrategy};

/// Multipliers feeding the weighted composite. Values above 1 reward strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedFactors {
    pub debt: f64,
    pub savings: f64,
    pub income: f64,
    pub necessity: f64,
}

impl WeightedFactors {
    /// Weighted sum clamped to [0, 1].
    pub fn composite(&self, config: &WeightedConfig) -> f64 {
        let weights = &config.weights;
        let raw = self.debt * weights.debt
            + self.savings * weights.savings
            + self.income * weights.income
            + self.necessity * weights.necessity;
        raw.clamp(0.0, 1.0)
    }
}

/// Snapshot as the weighted model reads it: with no disposable income the item takes the whole budget.
pub fn weighted_snapshot(input: &PurchaseInput) -> FinancialSnapshot {
    let mut snapshot = input.snapshot();
    if input.leftover_income <= 0.0 {
        snapshot.cost_ratio = 1.0;
    }
    snapshot
}

pub fn compute_weighted_factors(
    input: &PurchaseInput,
    snapshot: &FinancialSnapshot,
    config: &WeightedConfig,
) -> WeightedFactors {
    let mut debt = if input.has_high_interest_debt.is_yes() || input.high_interest_debt > 0.0 {
        0.2
    } else if snapshot.debt_to_income > config.debt_to_income_max {
        0.4
    } else if snapshot.total_debt > 0.0 {
        0.8
    } else {
        1.0
    };

    let months = snapshot.emergency_fund_months;
    let mut savings = if months < 1.0 {
        0.2
    } else if months < config.emergency_fund_months_min {
        0.5
    } else if months >= config.emergency_fund_months_min * 2.0 {
        1.2
    } else {
        1.0
    };

    let threshold = if snapshot.is_necessity {
        config.necessities_spending_max
    } else {
        config.discretionary_spending_max
    };
    let ratio = snapshot.cost_ratio;
    let income = if ratio > threshold * 2.0 {
        0.1
    } else if ratio > threshold {
        0.4
    } else if ratio > threshold * 0.5 {
        0.8
    } else {
        1.2
    };

    let necessity = if snapshot.is_necessity { 1.3 } else { 0.8 };

    match input.goal_theme() {
        GoalCategory::PayOffDebt if snapshot.total_debt > 0.0 => {
            debt *= 0.7;
            savings *= 0.9;
        }
        GoalCategory::EmergencyFund if months < config.emergency_fund_months_min => {
            savings *= 0.7;
        }
        _ => {}
    }

    WeightedFactors {
        debt,
        savings,
        income,
        necessity,
    }
}

/// Weighted composite model with a single buy cutoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedModel {
    config: WeightedConfig,
}

impl WeightedModel {
    pub fn new(config: WeightedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WeightedConfig {
        &self.config
    }
}

impl ScoringStrategy for WeightedModel {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Weighted
    }

    fn score(&self, input: &PurchaseInput) -> Decision {
        let snapshot = weighted_snapshot(input);
        let factors = compute_weighted_factors(input, &snapshot, &self.config);
        let composite = factors.composite(&self.config);
        let recommendation = recommend_weighted(composite, self.config.buy_threshold);
        debug!(?factors, composite, item = %input.item_name, "weighted model scored purchase");

        let explanation = narrate(&Narrative {
            input,
            snapshot,
            recommendation,
            concerns: vec![
                (Concern::Debt, factors.debt),
                (Concern::EmergencyFund, factors.savings),
                (Concern::Affordability, factors.income),
            ],
        });

        let components = vec![
            DecisionComponent {
                code: "debt".to_string(),
                label: "Debt Situation".to_string(),
                value: factors.debt,
                note: format!(
                    "total debt {:.0}, debt-to-income {:.2}",
                    snapshot.total_debt,
                    finite_or_max(snapshot.debt_to_income)
                ),
            },
            DecisionComponent {
                code: "savings".to_string(),
                label: "Emergency Fund".to_string(),
                value: factors.savings,
                note: format!(
                    "{:.1} months of expenses saved",
                    snapshot.emergency_fund_months
                ),
            },
            DecisionComponent {
                code: "income".to_string(),
                label: "Affordability".to_string(),
                value: factors.income,
                note: format!(
                    "costs {}% of monthly disposable income",
                    snapshot.percent_of_income()
                ),
            },
            DecisionComponent {
                code: "necessity".to_string(),
                label: "Necessity".to_string(),
                value: factors.necessity,
                note: if snapshot.is_necessity {
                    "reads as a necessity".to_string()
                } else {
                    "reads as discretionary".to_string()
                },
            },
        ];

        Decision::new(
            StrategyKind::Weighted,
            round_cents(composite),
            recommendation,
            explanation,
            components,
        )
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn finite_or_max(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::MAX
    }
}
