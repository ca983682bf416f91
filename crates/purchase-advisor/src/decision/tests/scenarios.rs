use super::common::*;
use crate::decision::{
    compute_factors, explain, FactorScores, PurchaseInput, Recommendation, StrategyKind,
};

#[test]
fn book_on_a_comfortable_budget_is_a_consider() {
    let input = book_purchase();

    let factors = compute_factors(&input);
    assert_eq!(factors, FactorScores::new(2, 1, 0, 1, 0));

    let decision = factor_engine().score(&input);
    assert_eq!(decision.strategy, StrategyKind::FactorSum);
    assert_eq!(decision.score, 4.0);
    assert_eq!(decision.recommendation, Recommendation::ConsiderCarefully);
    assert_eq!(decision.headline, "Consider carefully.");
    assert_eq!(
        decision.explanation,
        "This Book is within reach at 5% of your disposable income, but weigh it against your other priorities."
    );
}

#[test]
fn indebted_vacation_is_a_firm_no() {
    let input = vacation_purchase();

    let factors = compute_factors(&input);
    assert_eq!(factors, FactorScores::new(-2, -2, 0, -1, -2));

    let decision = factor_engine().score(&input);
    assert_eq!(decision.score, -7.0);
    assert_eq!(decision.recommendation, Recommendation::DontBuy);
    assert_eq!(decision.headline, "Don't buy it.");
    assert_eq!(decision.explanation, explain(&factors, -7, &input));
}

#[test]
fn urgent_education_on_a_budget_is_a_buy() {
    let input = PurchaseInput::new("Online education course", 80.0, 2500.0)
        .with_urgency(crate::decision::PurchaseUrgency::UrgentNeeds)
        .with_goal("invest in my skills");

    let decision = factor_engine().score(&input);
    assert_eq!(decision.recommendation, Recommendation::Buy);
    // D=2, O=1, G=-1 (no invest/business keyword in the item), L=2, B=2
    assert_eq!(decision.score, 6.0);
    assert_eq!(
        decision.explanation,
        "This Online education course fits comfortably within your budget at 3% of your disposable income."
    );
}

#[test]
fn debt_payoff_goal_closes_negative_explanations() {
    let input = PurchaseInput::new("Luxury watch", 900.0, 1200.0)
        .with_goal("pay-off-debt")
        .with_urgency(crate::decision::PurchaseUrgency::MostlyWants);

    let decision = factor_engine().score(&input);
    assert_eq!(decision.recommendation, Recommendation::DontBuy);
    assert!(decision
        .explanation
        .ends_with(" Your goal of paying off debt should take priority."));
}

#[test]
fn weighted_strategy_reports_a_unit_interval_score() {
    let decision = weighted_engine().score(&vacation_purchase());

    assert_eq!(decision.strategy, StrategyKind::Weighted);
    assert!((0.0..=1.0).contains(&decision.score));
    assert_eq!(decision.recommendation, Recommendation::DontBuy);
    assert!(decision.component("debt").is_some());
    assert!(decision.component("D").is_none());
}
