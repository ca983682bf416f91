use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::StrategyKind;
use super::explain::explain;
use super::input::{PurchaseInput, PurchaseUrgency};
use super::keywords::{self, GoalCategory, GROWTH_ITEM_KEYWORDS, LONG_TERM_TIERS};
use super::policy::recommend;
use super::{Decision, DecisionComponent, ScoringStrategy};

pub const FACTOR_MIN: i8 = -2;
pub const FACTOR_MAX: i8 = 2;

/// The five heuristic sub-scores of the factor model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FactorCode {
    D,
    O,
    G,
    L,
    B,
}

impl FactorCode {
    pub const ALL: [FactorCode; 5] = [
        FactorCode::D,
        FactorCode::O,
        FactorCode::G,
        FactorCode::L,
        FactorCode::B,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            FactorCode::D => "D",
            FactorCode::O => "O",
            FactorCode::G => "G",
            FactorCode::L => "L",
            FactorCode::B => "B",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FactorCode::D => "Discretionary Income",
            FactorCode::O => "Opportunity Cost",
            FactorCode::G => "Goal Alignment",
            FactorCode::L => "Long-term Impact",
            FactorCode::B => "Behavioral",
        }
    }
}

/// Factor scores, each held within [`FACTOR_MIN`, `FACTOR_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FactorScores {
    #[serde(rename = "D")]
    pub discretionary: i8,
    #[serde(rename = "O")]
    pub opportunity_cost: i8,
    #[serde(rename = "G")]
    pub goal_alignment: i8,
    #[serde(rename = "L")]
    pub long_term: i8,
    #[serde(rename = "B")]
    pub behavioral: i8,
}

impl FactorScores {
    pub fn new(
        discretionary: i8,
        opportunity_cost: i8,
        goal_alignment: i8,
        long_term: i8,
        behavioral: i8,
    ) -> Self {
        Self {
            discretionary: bound(discretionary),
            opportunity_cost: bound(opportunity_cost),
            goal_alignment: bound(goal_alignment),
            long_term: bound(long_term),
            behavioral: bound(behavioral),
        }
    }

    pub fn get(&self, code: FactorCode) -> i8 {
        match code {
            FactorCode::D => self.discretionary,
            FactorCode::O => self.opportunity_cost,
            FactorCode::G => self.goal_alignment,
            FactorCode::L => self.long_term,
            FactorCode::B => self.behavioral,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FactorCode, i8)> + '_ {
        FactorCode::ALL.into_iter().map(|code| (code, self.get(code)))
    }

    pub fn total(&self) -> i8 {
        aggregate(self)
    }
}

fn bound(value: i8) -> i8 {
    value.clamp(FACTOR_MIN, FACTOR_MAX)
}

/// Score every factor for the input.
pub fn compute_factors(input: &PurchaseInput) -> FactorScores {
    let ratio = input.cost_ratio();
    FactorScores::new(
        discretionary_fit(ratio),
        opportunity_cost(input, ratio),
        goal_alignment(input),
        long_term_impact(&input.item_name),
        behavioral(input.purchase_urgency, ratio),
    )
}

/// Plain sum of the five factors, in [-10, 10].
pub fn aggregate(factors: &FactorScores) -> i8 {
    factors
        .iter()
        .fold(0i8, |total, (_, value)| total.saturating_add(value))
}

fn discretionary_fit(ratio: f64) -> i8 {
    if ratio < 0.1 {
        2
    } else if ratio < 0.25 {
        1
    } else if ratio < 0.5 {
        0
    } else if ratio < 1.0 {
        -1
    } else {
        -2
    }
}

fn opportunity_cost(input: &PurchaseInput, ratio: f64) -> i8 {
    if input.has_high_interest_debt.is_yes() {
        return FACTOR_MIN;
    }
    let penalty = (ratio * 2.0).floor();
    (1.0 - penalty).clamp(f64::from(FACTOR_MIN), f64::from(FACTOR_MAX)) as i8
}

fn goal_alignment(input: &PurchaseInput) -> i8 {
    let category = input.goal_category();
    if category.is_protective() {
        if keywords::relates_to_goal(&input.main_financial_goal, &input.item_name) {
            1
        } else {
            -1
        }
    } else if category == GoalCategory::Growth {
        if keywords::contains_any(&input.item_name, GROWTH_ITEM_KEYWORDS) {
            1
        } else {
            -1
        }
    } else {
        0
    }
}

fn long_term_impact(item_name: &str) -> i8 {
    keywords::first_tier(item_name, LONG_TERM_TIERS)
        .map(|tier| tier.score)
        .unwrap_or(0)
}

fn behavioral(urgency: PurchaseUrgency, ratio: f64) -> i8 {
    match urgency {
        PurchaseUrgency::UrgentNeeds => 2,
        PurchaseUrgency::Mixed => 0,
        PurchaseUrgency::MostlyWants if ratio > 0.5 => -2,
        PurchaseUrgency::MostlyWants => -1,
        PurchaseUrgency::Unspecified => 0,
    }
}

fn factor_note(code: FactorCode, value: i8, input: &PurchaseInput) -> String {
    let pct = input.snapshot().percent_of_income();
    match code {
        FactorCode::D => format!("costs {pct}% of monthly disposable income"),
        FactorCode::O if input.has_high_interest_debt.is_yes() => {
            "high-interest debt outranks new spending".to_string()
        }
        FactorCode::O => format!("{pct}% of disposable income could be put to other uses"),
        FactorCode::G if input.main_financial_goal.is_empty() => "no goal provided".to_string(),
        FactorCode::G if value > 0 => {
            format!("supports the goal '{}'", input.main_financial_goal)
        }
        FactorCode::G if value < 0 => {
            format!("competes with the goal '{}'", input.main_financial_goal)
        }
        FactorCode::G => format!("neutral to the goal '{}'", input.main_financial_goal),
        FactorCode::L if value > 0 => "likely to pay off over the long term".to_string(),
        FactorCode::L if value < 0 => "value fades quickly after purchase".to_string(),
        FactorCode::L => "no long-term signal in the item name".to_string(),
        FactorCode::B => format!("urgency: {}", input.purchase_urgency.label()),
    }
}

/// Integer factor model: five factors summed into the decision score.
#[derive(Debug, Clone, Copy, Default)]
pub struct FactorModel;

impl ScoringStrategy for FactorModel {
    fn kind(&self) -> StrategyKind {
        StrategyKind::FactorSum
    }

    fn score(&self, input: &PurchaseInput) -> Decision {
        let factors = compute_factors(input);
        let score = aggregate(&factors);
        let recommendation = recommend(score);
        debug!(?factors, score, item = %input.item_name, "factor model scored purchase");

        let components = factors
            .iter()
            .map(|(code, value)| DecisionComponent {
                code: code.code().to_string(),
                label: code.label().to_string(),
                value: f64::from(value),
                note: factor_note(code, value, input),
            })
            .collect();

        Decision::new(
            StrategyKind::FactorSum,
            f64::from(score),
            recommendation,
            explain(&factors, score, input),
            components,
        )
    }
}
