use crate::decision::{
    DebtFlag, DecisionConfig, DecisionEngine, PurchaseInput, PurchaseUrgency, StrategyKind,
};

pub(super) fn book_purchase() -> PurchaseInput {
    PurchaseInput::new("Book", 100.0, 2000.0)
        .with_debt(DebtFlag::No)
        .with_goal("")
        .with_urgency(PurchaseUrgency::Mixed)
}

pub(super) fn vacation_purchase() -> PurchaseInput {
    PurchaseInput::new("Vacation Package", 1000.0, 1000.0)
        .with_debt(DebtFlag::Yes)
        .with_urgency(PurchaseUrgency::MostlyWants)
}

pub(super) fn factor_engine() -> DecisionEngine {
    DecisionEngine::new(DecisionConfig::with_strategy(StrategyKind::FactorSum))
}

pub(super) fn weighted_engine() -> DecisionEngine {
    DecisionEngine::new(DecisionConfig::with_strategy(StrategyKind::Weighted))
}

/// A spread of inputs covering every urgency, debt flag, goal family and long-term tier.
pub(super) fn input_grid() -> Vec<PurchaseInput> {
    let names = [
        "Book",
        "Vacation Package",
        "Health insurance",
        "Luxury watch",
        "Streaming subscription",
        "Refrigerator",
        "Unnamed Item",
    ];
    let goals = ["", "pay-off-debt", "emergency-fund", "invest", "Travel"];
    let urgencies = [
        PurchaseUrgency::UrgentNeeds,
        PurchaseUrgency::Mixed,
        PurchaseUrgency::MostlyWants,
        PurchaseUrgency::Unspecified,
    ];
    let costs = [0.0, 45.0, 250.0, 999.0, 5_000.0];
    let incomes = [-100.0, 0.0, 500.0, 2_000.0];

    let mut inputs = Vec::new();
    for name in names {
        for goal in goals {
            for urgency in urgencies {
                for cost in costs {
                    for income in incomes {
                        for debt in [DebtFlag::Yes, DebtFlag::No] {
                            inputs.push(
                                PurchaseInput::new(name, cost, income)
                                    .with_goal(goal)
                                    .with_urgency(urgency)
                                    .with_debt(debt),
                            );
                        }
                    }
                }
            }
        }
    }
    inputs
}
