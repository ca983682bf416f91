use std::io::Write;

use purchase_advisor::decision::{
    BatchImportError, BatchScorer, BatchSummary, DecisionConfig, DecisionEngine, Recommendation,
    StrategyKind,
};

const PURCHASES: &str = "itemName,itemCost,leftoverIncome,hasHighInterestDebt,mainFinancialGoal,purchaseUrgency\n\
Book,100,2000,No,,Mixed\n\
Vacation Package,1000,1000,Yes,,Mostly Wants\n\
Online education course,80,2500,No,invest in my skills,Urgent Needs\n";

#[test]
fn scores_every_row_from_a_file() {
    let path = std::env::temp_dir().join(format!(
        "purchase-advisor-batch-{}.csv",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).expect("create temp csv");
    file.write_all(PURCHASES.as_bytes()).expect("write csv");
    drop(file);

    let outcomes = BatchScorer::from_path(&path, &DecisionEngine::default()).expect("batch scores");
    std::fs::remove_file(&path).ok();

    let recommendations: Vec<_> = outcomes
        .iter()
        .map(|outcome| outcome.decision.recommendation)
        .collect();
    assert_eq!(
        recommendations,
        vec![
            Recommendation::ConsiderCarefully,
            Recommendation::DontBuy,
            Recommendation::Buy,
        ]
    );
    assert_eq!(outcomes[1].input.item_name, "Vacation Package");
    assert_eq!(BatchSummary::tally(&outcomes).total(), 3);
}

#[test]
fn weighted_batches_stay_in_the_unit_interval() {
    let engine = DecisionEngine::new(DecisionConfig::with_strategy(StrategyKind::Weighted));
    let outcomes = BatchScorer::from_reader(PURCHASES.as_bytes(), &engine).expect("batch scores");

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes
        .iter()
        .all(|outcome| (0.0..=1.0).contains(&outcome.decision.score)));
}

#[test]
fn missing_files_surface_as_io_errors() {
    let error = BatchScorer::from_path("/nonexistent/purchases.csv", &DecisionEngine::default())
        .expect_err("file is missing");
    assert!(matches!(error, BatchImportError::Io(_)));
}
