use serde::{Deserialize, Serialize};

/// Decision score at or above which the factor model recommends buying.
pub const BUY_SCORE: i8 = 5;

/// Final verdict for a purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Don't Buy")]
    DontBuy,
    #[serde(rename = "Consider carefully")]
    ConsiderCarefully,
}

impl Recommendation {
    pub const fn label(self) -> &'static str {
        match self {
            Recommendation::Buy => "Buy",
            Recommendation::DontBuy => "Don't Buy",
            Recommendation::ConsiderCarefully => "Consider carefully",
        }
    }

    /// Sentence shown in the decision box.
    pub const fn headline(self) -> &'static str {
        match self {
            Recommendation::Buy => "Buy it.",
            Recommendation::DontBuy => "Don't buy it.",
            Recommendation::ConsiderCarefully => "Consider carefully.",
        }
    }

    pub const fn tone(self) -> DecisionTone {
        match self {
            Recommendation::Buy => DecisionTone::Buy,
            Recommendation::DontBuy => DecisionTone::DontBuy,
            Recommendation::ConsiderCarefully => DecisionTone::Consider,
        }
    }

    pub const fn is_negative(self) -> bool {
        matches!(self, Recommendation::DontBuy)
    }
}

/// Styling hint for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionTone {
    Buy,
    DontBuy,
    Consider,
}

/// Map an aggregated factor score onto a recommendation.
pub fn recommend(score: i8) -> Recommendation {
    if score >= BUY_SCORE {
        Recommendation::Buy
    } else if score < 0 {
        Recommendation::DontBuy
    } else {
        Recommendation::ConsiderCarefully
    }
}

/// Binary cutoff used by the weighted composite.
pub fn recommend_weighted(score: f64, threshold: f64) -> Recommendation {
    if score >= threshold {
        Recommendation::Buy
    } else {
        Recommendation::DontBuy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_thresholds() {
        assert_eq!(recommend(10), Recommendation::Buy);
        assert_eq!(recommend(5), Recommendation::Buy);
        assert_eq!(recommend(4), Recommendation::ConsiderCarefully);
        assert_eq!(recommend(0), Recommendation::ConsiderCarefully);
        assert_eq!(recommend(-1), Recommendation::DontBuy);
        assert_eq!(recommend(-10), Recommendation::DontBuy);
    }

    #[test]
    fn weighted_cutoff_is_inclusive() {
        assert_eq!(recommend_weighted(0.65, 0.65), Recommendation::Buy);
        assert_eq!(recommend_weighted(0.649, 0.65), Recommendation::DontBuy);
    }

    #[test]
    fn serializes_with_display_labels() {
        let json = serde_json::to_string(&Recommendation::DontBuy).expect("serializes");
        assert_eq!(json, "\"Don't Buy\"");
        let tone = serde_json::to_string(&Recommendation::DontBuy.tone()).expect("serializes");
        assert_eq!(tone, "\"dont-buy\"");
        assert_eq!(Recommendation::ConsiderCarefully.headline(), "Consider carefully.");
    }
}
