use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use super::keywords::{self, GoalCategory};

pub const UNNAMED_ITEM: &str = "Unnamed Item";
pub const DEFAULT_LEFTOVER_INCOME: f64 = 1000.0;
pub const DEFAULT_MONTHLY_INCOME: f64 = 4000.0;
pub const DEFAULT_MONTHLY_EXPENSES: f64 = 3000.0;

/// Normalized purchase record consumed by every scoring strategy.
///
/// Deserialization is total: missing or malformed values fall back to the defaults in
/// [`PurchaseInput::default`], so even `{}` yields a scoreable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PurchaseInput {
    #[serde(deserialize_with = "item_name")]
    pub item_name: String,
    #[serde(deserialize_with = "item_cost")]
    pub item_cost: f64,
    #[serde(deserialize_with = "leftover_income")]
    pub leftover_income: f64,
    #[serde(deserialize_with = "debt_flag")]
    pub has_high_interest_debt: DebtFlag,
    #[serde(deserialize_with = "free_text")]
    pub main_financial_goal: String,
    #[serde(deserialize_with = "urgency")]
    pub purchase_urgency: PurchaseUrgency,
    #[serde(deserialize_with = "monthly_income")]
    pub monthly_income: f64,
    #[serde(deserialize_with = "monthly_expenses")]
    pub monthly_expenses: f64,
    #[serde(deserialize_with = "zero_default")]
    pub emergency_fund: f64,
    #[serde(deserialize_with = "zero_default")]
    pub high_interest_debt: f64,
    #[serde(deserialize_with = "zero_default")]
    pub low_interest_debt: f64,
    #[serde(deserialize_with = "zero_default")]
    pub monthly_savings: f64,
}

impl Default for PurchaseInput {
    fn default() -> Self {
        Self {
            item_name: UNNAMED_ITEM.to_string(),
            item_cost: 0.0,
            leftover_income: DEFAULT_LEFTOVER_INCOME,
            has_high_interest_debt: DebtFlag::No,
            main_financial_goal: String::new(),
            purchase_urgency: PurchaseUrgency::Unspecified,
            monthly_income: DEFAULT_MONTHLY_INCOME,
            monthly_expenses: DEFAULT_MONTHLY_EXPENSES,
            emergency_fund: 0.0,
            high_interest_debt: 0.0,
            low_interest_debt: 0.0,
            monthly_savings: 0.0,
        }
    }
}

impl PurchaseInput {
    pub fn new(item_name: impl Into<String>, item_cost: f64, leftover_income: f64) -> Self {
        let item_name = item_name.into();
        Self {
            item_name: normalize_item_name(&item_name),
            item_cost: sanitize_cost(item_cost),
            leftover_income: sanitize_number(leftover_income).unwrap_or(DEFAULT_LEFTOVER_INCOME),
            ..Self::default()
        }
    }

    pub fn with_debt(mut self, flag: DebtFlag) -> Self {
        self.has_high_interest_debt = flag;
        self
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.main_financial_goal = goal.into();
        self
    }

    pub fn with_urgency(mut self, urgency: PurchaseUrgency) -> Self {
        self.purchase_urgency = urgency;
        self
    }

    /// Item cost over disposable income. Non-positive income divides by one.
    pub fn cost_ratio(&self) -> f64 {
        let income = if self.leftover_income <= 0.0 {
            1.0
        } else {
            self.leftover_income
        };
        self.item_cost / income
    }

    pub fn goal_category(&self) -> GoalCategory {
        GoalCategory::classify(&self.main_financial_goal)
    }

    pub fn goal_theme(&self) -> GoalCategory {
        GoalCategory::theme(&self.main_financial_goal)
    }

    pub fn snapshot(&self) -> FinancialSnapshot {
        FinancialSnapshot::of(self)
    }
}

/// Metrics derived from the extended profile fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialSnapshot {
    pub cost_ratio: f64,
    pub total_debt: f64,
    pub debt_to_income: f64,
    pub emergency_fund_months: f64,
    pub is_necessity: bool,
}

impl FinancialSnapshot {
    pub fn of(input: &PurchaseInput) -> Self {
        let total_debt = input.high_interest_debt + input.low_interest_debt;
        let annual_income = input.monthly_income * 12.0;
        let debt_to_income = if total_debt <= 0.0 {
            0.0
        } else if annual_income <= 0.0 {
            f64::INFINITY
        } else {
            total_debt / annual_income
        };
        let emergency_fund_months = if input.monthly_expenses > 0.0 {
            input.emergency_fund / input.monthly_expenses
        } else {
            0.0
        };

        Self {
            cost_ratio: input.cost_ratio(),
            total_debt,
            debt_to_income,
            emergency_fund_months,
            is_necessity: keywords::is_necessity(&input.item_name),
        }
    }

    /// Cost ratio as a whole percentage for explanations.
    pub fn percent_of_income(&self) -> i64 {
        (self.cost_ratio * 100.0).round() as i64
    }
}

/// Whether the buyer carries high-interest debt, as answered on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DebtFlag {
    Yes,
    #[default]
    No,
}

impl DebtFlag {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "true" | "1" => Self::Yes,
            _ => Self::No,
        }
    }

    pub const fn is_yes(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for DebtFlag {
    fn from(value: bool) -> Self {
        if value {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// How pressing the purchase is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PurchaseUrgency {
    #[serde(rename = "Urgent Needs")]
    UrgentNeeds,
    Mixed,
    #[serde(rename = "Mostly Wants")]
    MostlyWants,
    #[default]
    Unspecified,
}

impl PurchaseUrgency {
    /// Lenient parse; unknown text is `None` so callers pick their own fallback.
    pub fn parse(raw: &str) -> Option<Self> {
        let compact: String = raw
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match compact.as_str() {
            "urgentneeds" | "urgent" | "needs" => Some(Self::UrgentNeeds),
            "mixed" => Some(Self::Mixed),
            "mostlywants" | "wants" => Some(Self::MostlyWants),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UrgentNeeds => "Urgent Needs",
            Self::Mixed => "Mixed",
            Self::MostlyWants => "Mostly Wants",
            Self::Unspecified => "Unspecified",
        }
    }
}

pub(crate) fn normalize_item_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNNAMED_ITEM.to_string()
    } else {
        trimmed.to_string()
    }
}

fn sanitize_number(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

fn sanitize_cost(value: f64) -> f64 {
    match sanitize_number(value) {
        Some(cost) if cost >= 0.0 => cost,
        _ => 0.0,
    }
}

/// Loosely typed form value: JSON numbers, numeric strings, booleans, or anything else.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LooseValue {
    Flag(bool),
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl LooseValue {
    pub(crate) fn into_number(self) -> Option<f64> {
        match self {
            LooseValue::Number(value) => sanitize_number(value),
            LooseValue::Text(text) => parse_number(&text),
            LooseValue::Flag(_) | LooseValue::Other(_) => None,
        }
    }

    pub(crate) fn into_text(self) -> Option<String> {
        match self {
            LooseValue::Text(text) => Some(text),
            LooseValue::Number(value) => Some(value.to_string()),
            LooseValue::Flag(_) | LooseValue::Other(_) => None,
        }
    }

    pub(crate) fn into_debt_flag(self) -> Option<DebtFlag> {
        match self {
            LooseValue::Flag(value) => Some(DebtFlag::from(value)),
            LooseValue::Text(text) if text.trim().is_empty() => None,
            LooseValue::Text(text) => Some(DebtFlag::parse(&text)),
            LooseValue::Number(value) => Some(DebtFlag::from(value > 0.0)),
            LooseValue::Other(_) => None,
        }
    }
}

/// Parse "1,200", "$45.50" or " 30 " style form input.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '$' | ',' | '_'))
        .collect();
    cleaned.parse::<f64>().ok().and_then(sanitize_number)
}

/// Same coercion as form input, for already-parsed JSON values.
pub(crate) fn number_from_value(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64().and_then(sanitize_number),
        serde_json::Value::String(text) => parse_number(text),
        _ => None,
    }
}

pub(crate) fn loose<'de, D>(deserializer: D) -> Result<Option<LooseValue>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LooseValue>::deserialize(deserializer)
}

pub(crate) fn loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose(deserializer)?.and_then(LooseValue::into_number))
}

pub(crate) fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose(deserializer)?
        .and_then(LooseValue::into_text)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty()))
}

pub(crate) fn loose_debt_flag<'de, D>(deserializer: D) -> Result<Option<DebtFlag>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose(deserializer)?.and_then(LooseValue::into_debt_flag))
}

pub(crate) fn loose_urgency<'de, D>(deserializer: D) -> Result<Option<PurchaseUrgency>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose(deserializer)?
        .and_then(LooseValue::into_text)
        .and_then(|text| PurchaseUrgency::parse(&text)))
}

fn item_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_text(deserializer)?.unwrap_or_else(|| UNNAMED_ITEM.to_string()))
}

fn item_cost<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_number(deserializer)?.map(sanitize_cost).unwrap_or(0.0))
}

fn leftover_income<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_number(deserializer)?.unwrap_or(DEFAULT_LEFTOVER_INCOME))
}

fn monthly_income<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_number(deserializer)?.unwrap_or(DEFAULT_MONTHLY_INCOME))
}

fn monthly_expenses<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_number(deserializer)?.unwrap_or(DEFAULT_MONTHLY_EXPENSES))
}

fn zero_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_number(deserializer)?.unwrap_or(0.0))
}

fn debt_flag<'de, D>(deserializer: D) -> Result<DebtFlag, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_debt_flag(deserializer)?.unwrap_or_default())
}

fn free_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_text(deserializer)?.unwrap_or_default())
}

fn urgency<'de, D>(deserializer: D) -> Result<PurchaseUrgency, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_urgency(deserializer)?.unwrap_or_default())
}
