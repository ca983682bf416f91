use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CompletionBand, FinancialProfile, ProfileMetrics, UserId};

/// Stored profile plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: UserId,
    pub profile: FinancialProfile,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRecord {
    pub fn new(user_id: UserId, profile: FinancialProfile) -> Self {
        Self {
            user_id,
            profile,
            updated_at: Utc::now(),
        }
    }

    pub fn view(&self) -> ProfileView {
        ProfileView {
            user_id: self.user_id.clone(),
            profile: self.profile.clone(),
            metrics: self.profile.metrics(),
            completion_percentage: self.profile.completion_percentage(),
            completion_band: self.profile.completion_band(),
            updated_at: self.updated_at,
        }
    }
}

/// Profile representation returned to API clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub user_id: UserId,
    pub profile: FinancialProfile,
    pub metrics: ProfileMetrics,
    pub completion_percentage: u8,
    pub completion_band: CompletionBand,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction so the advisor can be exercised without a backing store.
pub trait ProfileStore: Send + Sync {
    fn fetch(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, ProfileStoreError>;
    fn save(&self, record: ProfileRecord) -> Result<ProfileRecord, ProfileStoreError>;
}

/// Error enumeration for profile store failures.
#[derive(Debug, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("profile not found")]
    NotFound,
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}
