//! Keyword tables behind the item and goal heuristics.
//!
//! Matching is case-insensitive substring containment. Tables are ordered: the first matching
//! tier wins, so a name that hits two tiers takes the earlier one.

use serde::{Deserialize, Serialize};

/// A scored group of item-name keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordTier {
    pub keywords: &'static [&'static str],
    pub score: i8,
}

pub const LONG_TERM_TIERS: &[KeywordTier] = &[
    KeywordTier {
        keywords: &["invest", "education", "health", "skill"],
        score: 2,
    },
    KeywordTier {
        keywords: &["computer", "tool", "equipment", "book"],
        score: 1,
    },
    KeywordTier {
        keywords: &["subscription", "service", "vacation"],
        score: -1,
    },
    KeywordTier {
        keywords: &["luxury", "entertainment"],
        score: -2,
    },
];

/// Item names that read as essentials rather than discretionary spending.
pub const NECESSITY_KEYWORDS: &[&str] = &[
    "refrigerator",
    "stove",
    "oven",
    "microwave",
    "heating",
    "cooling",
    "laptop",
    "computer",
    "medicine",
    "phone",
    "mattress",
    "bed",
    "chair",
    "desk",
    "glasses",
    "contacts",
    "shoes",
    "coat",
    "jacket",
    "winter",
    "washer",
    "dryer",
    "cookware",
    "pan",
    "pot",
];

/// Goal categories in match order, with the exact goal-text keywords that drive the G factor.
pub const GOAL_CATEGORIES: &[(GoalCategory, &[&str])] = &[
    (GoalCategory::EmergencyFund, &["emergency"]),
    (GoalCategory::PayOffDebt, &["debt"]),
    (GoalCategory::Savings, &["save"]),
    (GoalCategory::Growth, &["invest", "business"]),
];

/// Looser stems for wording choices only: explanation clauses and weighted goal adjustments.
pub const GOAL_THEMES: &[(GoalCategory, &[&str])] = &[
    (GoalCategory::EmergencyFund, &["emergenc"]),
    (GoalCategory::PayOffDebt, &["debt"]),
    (GoalCategory::Savings, &["save", "saving"]),
    (GoalCategory::Growth, &["invest", "business"]),
];

/// Keywords that tie an item to a protective goal when both texts mention them.
pub const GOAL_RELATION_KEYWORDS: &[&str] =
    &["emergency", "health", "medical", "safety", "debt", "save"];

/// Keywords an item needs to line up with a growth goal.
pub const GROWTH_ITEM_KEYWORDS: &[&str] = &["invest", "business"];

/// Broad intent behind the buyer's stated financial goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    EmergencyFund,
    PayOffDebt,
    Savings,
    Growth,
    Unspecified,
}

impl GoalCategory {
    /// Category used for scoring.
    pub fn classify(goal: &str) -> Self {
        Self::first_match(goal, GOAL_CATEGORIES)
    }

    /// Category used for wording, tolerant of plurals like "emergencies" or "savings".
    pub fn theme(goal: &str) -> Self {
        Self::first_match(goal, GOAL_THEMES)
    }

    fn first_match(goal: &str, table: &[(GoalCategory, &[&str])]) -> Self {
        table
            .iter()
            .find(|(_, keywords)| contains_any(goal, keywords))
            .map(|(category, _)| *category)
            .unwrap_or(GoalCategory::Unspecified)
    }

    /// Goals that favor keeping cash over spending it.
    pub const fn is_protective(self) -> bool {
        matches!(
            self,
            GoalCategory::EmergencyFund | GoalCategory::PayOffDebt | GoalCategory::Savings
        )
    }
}

pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

pub fn first_tier<'a>(text: &str, tiers: &'a [KeywordTier]) -> Option<&'a KeywordTier> {
    let lowered = text.to_lowercase();
    tiers
        .iter()
        .find(|tier| tier.keywords.iter().any(|keyword| lowered.contains(keyword)))
}

pub fn is_necessity(item_name: &str) -> bool {
    contains_any(item_name, NECESSITY_KEYWORDS)
}

/// True when goal and item share any relation keyword.
pub fn relates_to_goal(goal: &str, item_name: &str) -> bool {
    let goal = goal.to_lowercase();
    let item = item_name.to_lowercase();
    GOAL_RELATION_KEYWORDS
        .iter()
        .any(|keyword| goal.contains(keyword) && item.contains(keyword))
}
