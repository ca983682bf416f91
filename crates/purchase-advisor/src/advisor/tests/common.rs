use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::advisor::{advisor_router, PurchaseAdvisor};
use crate::alternatives::{AlternativeCandidate, AlternativeError, AlternativeFinder};
use crate::decision::DecisionConfig;
use crate::profile::{
    FinancialProfile, ProfileRecord, ProfileStore, ProfileStoreError, UserId,
};
use crate::recognition::{ItemRecognizer, RecognitionError, RecognizedItem};

pub(super) fn indebted_profile() -> FinancialProfile {
    FinancialProfile {
        monthly_income: Some(5200.0),
        monthly_expenses: Some(3200.0),
        emergency_fund: Some(6400.0),
        high_interest_debt: Some(1500.0),
        financial_goal: Some("pay-off-debt".to_string()),
        ..FinancialProfile::default()
    }
}

pub(super) fn build_advisor<R>(recognizer: R) -> (
    PurchaseAdvisor<MemoryProfiles, R>,
    Arc<MemoryProfiles>,
    Arc<R>,
)
where
    R: ItemRecognizer + 'static,
{
    let profiles = Arc::new(MemoryProfiles::default());
    let recognizer = Arc::new(recognizer);
    let advisor =
        PurchaseAdvisor::new(profiles.clone(), recognizer.clone(), DecisionConfig::default());
    (advisor, profiles, recognizer)
}

pub(super) fn advisor_router_with(
    advisor: PurchaseAdvisor<MemoryProfiles, FixedRecognizer>,
) -> axum::Router {
    advisor_router(Arc::new(advisor))
}

#[derive(Default, Clone)]
pub(super) struct MemoryProfiles {
    records: Arc<Mutex<HashMap<UserId, ProfileRecord>>>,
}

impl ProfileStore for MemoryProfiles {
    fn fetch(&self, user_id: &UserId) -> Result<Option<ProfileRecord>, ProfileStoreError> {
        let guard = self.records.lock().expect("profile mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    fn save(&self, record: ProfileRecord) -> Result<ProfileRecord, ProfileStoreError> {
        let mut guard = self.records.lock().expect("profile mutex poisoned");
        guard.insert(record.user_id.clone(), record.clone());
        Ok(record)
    }
}

pub(super) struct OfflineProfiles;

impl ProfileStore for OfflineProfiles {
    fn fetch(&self, _user_id: &UserId) -> Result<Option<ProfileRecord>, ProfileStoreError> {
        Err(ProfileStoreError::Unavailable("database offline".to_string()))
    }

    fn save(&self, _record: ProfileRecord) -> Result<ProfileRecord, ProfileStoreError> {
        Err(ProfileStoreError::Unavailable("database offline".to_string()))
    }
}

/// Recognizer answering with one item and remembering every image it was shown.
#[derive(Default)]
pub(super) struct FixedRecognizer {
    item: Option<RecognizedItem>,
    seen: Mutex<Vec<String>>,
}

impl FixedRecognizer {
    pub(super) fn answering(name: &str, cost: f64) -> Self {
        Self {
            item: Some(RecognizedItem {
                name: name.to_string(),
                cost,
            }),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn seen(&self) -> Vec<String> {
        self.seen.lock().expect("recognizer mutex poisoned").clone()
    }
}

impl ItemRecognizer for FixedRecognizer {
    fn recognize(&self, image_base64: &str) -> Result<RecognizedItem, RecognitionError> {
        self.seen
            .lock()
            .expect("recognizer mutex poisoned")
            .push(image_base64.to_string());
        self.item
            .clone()
            .ok_or_else(|| RecognitionError::Unavailable("no answer configured".to_string()))
    }
}

pub(super) struct FailingRecognizer;

impl ItemRecognizer for FailingRecognizer {
    fn recognize(&self, _image_base64: &str) -> Result<RecognizedItem, RecognitionError> {
        Err(RecognitionError::Unparseable("I am not sure".to_string()))
    }
}

/// Finder proposing one canned product and recording each lookup.
#[derive(Default)]
pub(super) struct CatalogFinder {
    candidate: Option<AlternativeCandidate>,
    lookups: Mutex<Vec<(String, f64)>>,
}

impl CatalogFinder {
    pub(super) fn offering(name: &str, price: Option<f64>, url: &str) -> Self {
        Self {
            candidate: Some(AlternativeCandidate {
                name: name.to_string(),
                price,
                url: url.to_string(),
                ..AlternativeCandidate::default()
            }),
            lookups: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn lookups(&self) -> Vec<(String, f64)> {
        self.lookups.lock().expect("finder mutex poisoned").clone()
    }
}

impl AlternativeFinder for CatalogFinder {
    fn find_cheaper(
        &self,
        item_name: &str,
        item_cost: f64,
    ) -> Result<Option<AlternativeCandidate>, AlternativeError> {
        self.lookups
            .lock()
            .expect("finder mutex poisoned")
            .push((item_name.to_string(), item_cost));
        Ok(self.candidate.clone())
    }
}

pub(super) struct OfflineFinder;

impl AlternativeFinder for OfflineFinder {
    fn find_cheaper(
        &self,
        _item_name: &str,
        _item_cost: f64,
    ) -> Result<Option<AlternativeCandidate>, AlternativeError> {
        Err(AlternativeError::Unavailable("search quota exhausted".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
