use crate::infra::{parse_strategy, parse_urgency, InMemoryProfileStore, UnconfiguredRecognizer};
use clap::Args;
use purchase_advisor::advisor::{assemble_input, PurchaseAdvisor, PurchaseRequest};
use purchase_advisor::config::AppConfig;
use purchase_advisor::decision::{
    BatchScorer, BatchSummary, DebtFlag, Decision, DecisionConfig, DecisionEngine,
    PurchaseInput, PurchaseUrgency, StrategyKind,
};
use purchase_advisor::error::AppError;
use purchase_advisor::profile::{FinancialProfile, UserId};
use purchase_advisor::telemetry;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DecideArgs {
    /// Name of the item being considered
    #[arg(long)]
    pub(crate) item_name: String,
    /// Price of the item
    #[arg(long)]
    pub(crate) item_cost: f64,
    /// Monthly income left after expenses (defaults to max(1000, 2 x cost))
    #[arg(long)]
    pub(crate) leftover_income: Option<f64>,
    /// Flag the buyer as carrying high-interest debt
    #[arg(long)]
    pub(crate) high_interest_debt: bool,
    /// Main financial goal, e.g. "pay-off-debt" or "invest"
    #[arg(long)]
    pub(crate) goal: Option<String>,
    /// Urgent needs, mixed or mostly wants
    #[arg(long, value_parser = parse_urgency)]
    pub(crate) urgency: Option<PurchaseUrgency>,
    /// Scoring strategy (defaults to APP_DECISION_STRATEGY)
    #[arg(long, value_parser = parse_strategy)]
    pub(crate) strategy: Option<StrategyKind>,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV export with camelCase purchase headers (itemName, itemCost, ...)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Scoring strategy (defaults to APP_DECISION_STRATEGY)
    #[arg(long, value_parser = parse_strategy)]
    pub(crate) strategy: Option<StrategyKind>,
    /// Print each outcome as a JSON line instead of a summary row
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Include the per-factor breakdown for every sample.
    #[arg(long)]
    pub(crate) show_components: bool,
}

/// Loads config and installs logging for the one-shot commands.
fn decision_config(strategy: Option<StrategyKind>) -> Result<DecisionConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_stderr(&config.telemetry)?;
    let mut decision = config.decision.decision_config();
    if let Some(strategy) = strategy {
        decision.strategy = strategy;
    }
    Ok(decision)
}

pub(crate) fn run_decide(args: DecideArgs) -> Result<(), AppError> {
    let engine = DecisionEngine::new(decision_config(args.strategy)?);
    let input = decide_input(&args);
    let decision = engine.score(&input);

    println!("{}", input.item_name);
    render_decision(&decision, true);
    Ok(())
}

fn decide_input(args: &DecideArgs) -> PurchaseInput {
    let request = PurchaseRequest {
        leftover_income: args.leftover_income,
        has_high_interest_debt: Some(DebtFlag::from(args.high_interest_debt)),
        main_financial_goal: args.goal.clone(),
        purchase_urgency: args.urgency,
        ..PurchaseRequest::for_item(args.item_name.clone(), args.item_cost)
    };
    assemble_input(&request, None, &args.item_name, args.item_cost)
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = DecisionEngine::new(decision_config(args.strategy)?);
    let outcomes = BatchScorer::from_path(&args.csv, &engine)?;

    for outcome in &outcomes {
        if args.json {
            let line = serde_json::to_string(outcome)
                .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
            println!("{line}");
        } else {
            println!(
                "row {:>3}  {:<28} {:>9.2}  {:<18} score {}",
                outcome.row,
                outcome.input.item_name,
                outcome.input.item_cost,
                outcome.decision.recommendation.label(),
                format_score(&outcome.decision),
            );
        }
    }

    let summary = BatchSummary::tally(&outcomes);
    println!(
        "\n{} purchases scored with {}: {} buy, {} don't buy, {} consider carefully",
        summary.total(),
        engine.strategy().label(),
        summary.buy,
        summary.dont_buy,
        summary.consider
    );
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let advisor_config = decision_config(None)?;
    println!("Purchase advisor demo");

    let engines = [
        DecisionEngine::new(DecisionConfig::with_strategy(StrategyKind::FactorSum)),
        DecisionEngine::new(DecisionConfig::with_strategy(StrategyKind::Weighted)),
    ];

    for input in sample_purchases() {
        println!(
            "\n{} ({:.2} against {:.2} disposable income)",
            input.item_name, input.item_cost, input.leftover_income
        );
        for engine in &engines {
            let decision = engine.score(&input);
            print!("  [{}] ", engine.strategy().label());
            render_decision(&decision, args.show_components);
        }
    }

    let advisor = PurchaseAdvisor::new(
        Arc::new(InMemoryProfileStore::default()),
        Arc::new(UnconfiguredRecognizer),
        advisor_config,
    );
    let view = advisor.save_profile(UserId::new("demo-user"), demo_profile())?;
    println!(
        "\nProfile for {} is {}% complete",
        view.user_id.as_str(),
        view.completion_percentage
    );

    let advice = advisor.advise(PurchaseRequest {
        user_id: Some("demo-user".to_string()),
        ..PurchaseRequest::for_item("Noise-cancelling headphones", 350.0)
    });
    println!(
        "{} with the stored profile ({:.2} disposable income):",
        advice.item_name, advice.input.leftover_income
    );
    render_decision(&advice.decision, args.show_components);

    Ok(())
}

fn sample_purchases() -> Vec<PurchaseInput> {
    vec![
        PurchaseInput::new("Book", 100.0, 2000.0).with_urgency(PurchaseUrgency::Mixed),
        PurchaseInput::new("Vacation Package", 1000.0, 1000.0)
            .with_debt(DebtFlag::Yes)
            .with_urgency(PurchaseUrgency::MostlyWants),
        PurchaseInput::new("Online education course", 80.0, 2500.0)
            .with_goal("invest in my skills")
            .with_urgency(PurchaseUrgency::UrgentNeeds),
        PurchaseInput::new("Refrigerator", 900.0, 1500.0)
            .with_goal("emergency-fund")
            .with_urgency(PurchaseUrgency::UrgentNeeds),
    ]
}

fn demo_profile() -> FinancialProfile {
    FinancialProfile {
        monthly_income: Some(4800.0),
        monthly_expenses: Some(3300.0),
        emergency_fund: Some(9900.0),
        high_interest_debt: Some(0.0),
        low_interest_debt: Some(8000.0),
        monthly_savings: Some(400.0),
        financial_goal: Some("save for a house".to_string()),
        disposable_income: None,
    }
}

fn format_score(decision: &Decision) -> String {
    match decision.strategy {
        StrategyKind::FactorSum => format!("{:+}", decision.score),
        StrategyKind::Weighted => format!("{:.2}", decision.score),
    }
}

fn render_decision(decision: &Decision, show_components: bool) {
    println!(
        "{} (score {}) {}",
        decision.headline,
        format_score(decision),
        decision.explanation
    );
    if show_components {
        for component in &decision.components {
            println!(
                "      {:<10} {:<22} {:>6}  {}",
                component.code, component.label, component.value, component.note
            );
        }
    }
}
