use serde::{Deserialize, Serialize};

/// Selects which scoring strategy a [`super::DecisionEngine`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Five integer factors summed into a decision score in [-10, 10].
    #[default]
    FactorSum,
    /// Four weighted multipliers blended into a [0, 1] composite.
    Weighted,
}

impl StrategyKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "factor" | "factor-sum" | "factor_sum" | "pds" => Some(Self::FactorSum),
            "weighted" | "probability" => Some(Self::Weighted),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FactorSum => "factor_sum",
            Self::Weighted => "weighted",
        }
    }
}

/// Relative weight of each multiplier in the weighted composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    pub debt: f64,
    pub savings: f64,
    pub income: f64,
    pub necessity: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            debt: 0.30,
            savings: 0.25,
            income: 0.25,
            necessity: 0.20,
        }
    }
}

/// Thresholds for the weighted strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedConfig {
    pub debt_to_income_max: f64,
    pub emergency_fund_months_min: f64,
    pub discretionary_spending_max: f64,
    pub necessities_spending_max: f64,
    pub weights: FactorWeights,
    pub buy_threshold: f64,
}

impl Default for WeightedConfig {
    fn default() -> Self {
        Self {
            debt_to_income_max: 0.36,
            emergency_fund_months_min: 3.0,
            discretionary_spending_max: 0.30,
            necessities_spending_max: 0.15,
            weights: FactorWeights::default(),
            buy_threshold: 0.65,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DecisionConfig {
    pub strategy: StrategyKind,
    pub weighted: WeightedConfig,
}

impl DecisionConfig {
    pub fn with_strategy(strategy: StrategyKind) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }
}
