use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::{Decision, DecisionEngine, PurchaseInput, Recommendation};

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read purchase batch: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid purchase CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// A scored CSV row. `row` is 1-based and excludes the header.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub row: usize,
    pub input: PurchaseInput,
    pub decision: Decision,
}

/// Recommendation tally across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub buy: usize,
    pub dont_buy: usize,
    pub consider: usize,
}

impl BatchSummary {
    pub fn tally(outcomes: &[BatchOutcome]) -> Self {
        outcomes
            .iter()
            .fold(Self::default(), |mut summary, outcome| {
                match outcome.decision.recommendation {
                    Recommendation::Buy => summary.buy += 1,
                    Recommendation::DontBuy => summary.dont_buy += 1,
                    Recommendation::ConsiderCarefully => summary.consider += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.buy + self.dont_buy + self.consider
    }
}

/// Scores purchase rows from CSV exports whose headers use the JSON field names
/// (`itemName`, `itemCost`, `leftoverIncome`, ...). Missing columns take input defaults.
pub struct BatchScorer;

impl BatchScorer {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        engine: &DecisionEngine,
    ) -> Result<Vec<BatchOutcome>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, engine)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        engine: &DecisionEngine,
    ) -> Result<Vec<BatchOutcome>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let mut outcomes = Vec::new();
        for (index, record) in csv_reader.deserialize::<PurchaseInput>().enumerate() {
            let input = record?;
            let decision = engine.score(&input);
            outcomes.push(BatchOutcome {
                row: index + 1,
                input,
                decision,
            });
        }

        info!(
            rows = outcomes.len(),
            strategy = engine.strategy().label(),
            "scored purchase batch"
        );
        Ok(outcomes)
    }
}
