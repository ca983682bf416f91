use metrics_exporter_prometheus::PrometheusHandle;
use purchase_advisor::alternatives::{AlternativeCandidate, AlternativeError, AlternativeFinder};
use purchase_advisor::decision::{PurchaseUrgency, StrategyKind};
use purchase_advisor::profile::{ProfileRecord, ProfileStore, ProfileStoreError, UserId};
use purchase_advisor::recognition::{ItemRecognizer, RecognitionError, RecognizedItem};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileStore {
    records: Arc<Mutex<HashMap<UserId, ProfileRecord>>>,
}

impl ProfileStore for InMemoryProfileStore {
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

/// Stand-in used until a vision backend is wired up; every image falls back to form values.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct UnconfiguredRecognizer;

impl ItemRecognizer for UnconfiguredRecognizer {
    fn recognize(&self, image_base64: &str) -> Result<RecognizedItem, RecognitionError> {
        if image_base64.trim().is_empty() {
            return Err(RecognitionError::MissingImage);
        }
        Err(RecognitionError::Unavailable(
            "no recognition backend configured".to_string(),
        ))
    }
}

/// Stand-in until a product search backend is wired up; requests get advice without alternatives.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct UnconfiguredFinder;

impl AlternativeFinder for UnconfiguredFinder {
    fn find_cheaper(
        &self,
        _item_name: &str,
        _item_cost: f64,
    ) -> Result<Option<AlternativeCandidate>, AlternativeError> {
        Err(AlternativeError::Unavailable(
            "no product search backend configured".to_string(),
        ))
    }
}

pub(crate) fn parse_strategy(raw: &str) -> Result<StrategyKind, String> {
    StrategyKind::parse(raw).ok_or_else(|| {
        format!("unknown strategy '{raw}' (expected factor, factor-sum, pds, weighted or probability)")
    })
}

pub(crate) fn parse_urgency(raw: &str) -> Result<PurchaseUrgency, String> {
    PurchaseUrgency::parse(raw).ok_or_else(|| {
        format!("unknown urgency '{raw}' (expected urgent needs, mixed or mostly wants)")
    })
}
