use super::factors::FactorScores;
use super::input::{FinancialSnapshot, PurchaseInput};
use super::keywords::GoalCategory;
use super::policy::{recommend, Recommendation};

/// Factor values under this mark on either scale dominate the explanation.
pub(crate) const CONCERN_THRESHOLD: f64 = 0.5;

/// Financial weak spots an explanation can single out, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Concern {
    Debt,
    EmergencyFund,
    Affordability,
}

/// Everything the template selection needs, independent of the scoring scale.
pub(crate) struct Narrative<'a> {
    pub input: &'a PurchaseInput,
    pub snapshot: FinancialSnapshot,
    pub recommendation: Recommendation,
    pub concerns: Vec<(Concern, f64)>,
}

/// Explain a factor-model decision.
pub fn explain(factors: &FactorScores, score: i8, input: &PurchaseInput) -> String {
    narrate(&Narrative {
        input,
        snapshot: input.snapshot(),
        recommendation: recommend(score),
        concerns: factor_concerns(factors, input),
    })
}

fn factor_concerns(factors: &FactorScores, input: &PurchaseInput) -> Vec<(Concern, f64)> {
    let mut concerns = Vec::with_capacity(3);
    if input.has_high_interest_debt.is_yes() {
        concerns.push((Concern::Debt, f64::from(factors.opportunity_cost)));
    }
    if matches!(
        input.goal_category(),
        GoalCategory::EmergencyFund | GoalCategory::Savings
    ) {
        concerns.push((Concern::EmergencyFund, f64::from(factors.goal_alignment)));
    }
    concerns.push((Concern::Affordability, f64::from(factors.discretionary)));
    concerns
}

pub(crate) fn dominant_concern(concerns: &[(Concern, f64)]) -> Option<Concern> {
    let lowest = concerns
        .iter()
        .map(|(_, value)| *value)
        .fold(f64::INFINITY, f64::min);
    if lowest >= CONCERN_THRESHOLD {
        return None;
    }
    concerns
        .iter()
        .find(|(_, value)| *value == lowest)
        .map(|(concern, _)| *concern)
}

pub(crate) fn narrate(narrative: &Narrative<'_>) -> String {
    let item = &narrative.input.item_name;
    let pct = narrative.snapshot.percent_of_income();

    let mut explanation = match dominant_concern(&narrative.concerns) {
        Some(Concern::Debt) => {
            if narrative.input.has_high_interest_debt.is_yes() {
                format!("It's best to pay off your high-interest debt before purchasing this {item}.")
            } else {
                "Your overall debt level suggests focusing on debt reduction before this purchase."
                    .to_string()
            }
        }
        Some(Concern::EmergencyFund) => {
            if narrative.snapshot.emergency_fund_months < 1.0 {
                format!(
                    "Building at least a 1-month emergency fund should take priority over buying this {item}."
                )
            } else {
                "Consider building your emergency fund to 3 months before this purchase."
                    .to_string()
            }
        }
        Some(Concern::Affordability) => format!(
            "This {item} costs {pct}% of your monthly disposable income, which is more than recommended."
        ),
        None => settled_template(narrative, pct),
    };

    if narrative.recommendation.is_negative() {
        match narrative.input.goal_theme() {
            GoalCategory::PayOffDebt => {
                explanation.push_str(" Your goal of paying off debt should take priority.")
            }
            GoalCategory::EmergencyFund => {
                explanation.push_str(" Building your emergency fund remains your stated priority.")
            }
            _ => {}
        }
    }

    explanation
}

fn settled_template(narrative: &Narrative<'_>, pct: i64) -> String {
    let item = &narrative.input.item_name;
    let necessity = narrative.snapshot.is_necessity;
    match narrative.recommendation {
        Recommendation::Buy if necessity => format!(
            "This {item} appears to be a necessity and is financially reasonable at {pct}% of your disposable income."
        ),
        Recommendation::Buy => format!(
            "This {item} fits comfortably within your budget at {pct}% of your disposable income."
        ),
        Recommendation::ConsiderCarefully if necessity => format!(
            "This {item} looks like a necessity, but at {pct}% of your disposable income it is worth weighing against your other priorities."
        ),
        Recommendation::ConsiderCarefully => format!(
            "This {item} is within reach at {pct}% of your disposable income, but weigh it against your other priorities."
        ),
        Recommendation::DontBuy => format!(
            "Based on your overall financial situation, this {item} purchase may not be the best use of funds right now."
        ),
    }
}
