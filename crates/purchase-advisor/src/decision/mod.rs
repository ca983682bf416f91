//! Purchase decision scoring.
//!
//! Two strategies implement [`ScoringStrategy`]: the integer [`FactorModel`] (D/O/G/L/B factors
//! summed into a score in [-10, 10]) and the [`WeightedModel`] (a [0, 1] composite with a single
//! buy cutoff). [`DecisionEngine`] picks one from [`DecisionConfig`]; it holds no mutable state
//! and can be shared freely.

pub mod batch;
mod config;
mod explain;
pub mod factors;
mod input;
pub mod keywords;
mod policy;
pub mod weighted;

#[cfg(test)]
mod tests;

pub use batch::{BatchImportError, BatchOutcome, BatchScorer, BatchSummary};
pub use config::{DecisionConfig, FactorWeights, StrategyKind, WeightedConfig};
pub use explain::explain;
pub use factors::{aggregate, compute_factors, FactorCode, FactorModel, FactorScores};
pub use input::{
    DebtFlag, FinancialSnapshot, PurchaseInput, PurchaseUrgency, DEFAULT_LEFTOVER_INCOME,
    UNNAMED_ITEM,
};
pub use keywords::GoalCategory;
pub use policy::{recommend, recommend_weighted, DecisionTone, Recommendation, BUY_SCORE};
pub use weighted::{WeightedFactors, WeightedModel};

pub(crate) use input::{
    loose_debt_flag, loose_number, loose_text, loose_urgency, normalize_item_name,
    number_from_value,
};

use serde::{Deserialize, Serialize};

/// A scoring model that turns a purchase into a decision.
pub trait ScoringStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;
    fn score(&self, input: &PurchaseInput) -> Decision;
}

/// One factor's contribution, kept for audits and charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionComponent {
    pub code: String,
    pub label: String,
    pub value: f64,
    pub note: String,
}

/// Scoring output, safe to serialize straight to a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub strategy: StrategyKind,
    pub score: f64,
    pub recommendation: Recommendation,
    pub headline: String,
    pub tone: DecisionTone,
    pub explanation: String,
    pub components: Vec<DecisionComponent>,
}

impl Decision {
    pub fn new(
        strategy: StrategyKind,
        score: f64,
        recommendation: Recommendation,
        explanation: String,
        components: Vec<DecisionComponent>,
    ) -> Self {
        Self {
            strategy,
            score,
            recommendation,
            headline: recommendation.headline().to_string(),
            tone: recommendation.tone(),
            explanation,
            components,
        }
    }

    pub fn component(&self, code: &str) -> Option<&DecisionComponent> {
        self.components.iter().find(|component| component.code == code)
    }
}

/// Stateless engine dispatching to the configured strategy.
pub struct DecisionEngine {
    config: DecisionConfig,
    strategy: Box<dyn ScoringStrategy>,
}

impl DecisionEngine {
    pub fn new(config: DecisionConfig) -> Self {
        let strategy: Box<dyn ScoringStrategy> = match config.strategy {
            StrategyKind::FactorSum => Box::new(FactorModel),
            StrategyKind::Weighted => Box::new(WeightedModel::new(config.weighted)),
        };
        Self { config, strategy }
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn score(&self, input: &PurchaseInput) -> Decision {
        self.strategy.score(input)
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(DecisionConfig::default())
    }
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("config", &self.config)
            .finish()
    }
}
