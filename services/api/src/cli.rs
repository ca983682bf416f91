use crate::demo::{run_batch, run_decide, run_demo, BatchArgs, DecideArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use purchase_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Purchase Advisor",
    about = "Score purchase decisions from the command line or serve the advisor API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single purchase and print the decision
    Decide(DecideArgs),
    /// Score every row of a purchase CSV export
    Batch(BatchArgs),
    /// Run sample purchases through both scoring strategies
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Decide(args) => run_decide(args),
        Command::Batch(args) => run_batch(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use purchase_advisor::decision::{PurchaseUrgency, StrategyKind};

    #[test]
    fn decide_arguments_parse() {
        let cli = Cli::try_parse_from([
            "purchase-advisor-api",
            "decide",
            "--item-name",
            "Book",
            "--item-cost",
            "100",
            "--urgency",
            "mostly wants",
            "--strategy",
            "weighted",
            "--high-interest-debt",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Decide(args)) => {
                assert_eq!(args.item_name, "Book");
                assert_eq!(args.item_cost, 100.0);
                assert_eq!(args.urgency, Some(PurchaseUrgency::MostlyWants));
                assert_eq!(args.strategy, Some(StrategyKind::Weighted));
                assert!(args.high_interest_debt);
                assert!(args.leftover_income.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_strategies_are_rejected() {
        let result = Cli::try_parse_from([
            "purchase-advisor-api",
            "batch",
            "--csv",
            "purchases.csv",
            "--strategy",
            "coin-flip",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::try_parse_from(["purchase-advisor-api"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
