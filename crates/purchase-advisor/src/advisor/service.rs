use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::request::{assemble_input, PurchaseRequest};
use crate::alternatives::{Alternative, AlternativeFinder};
use crate::decision::{normalize_item_name, Decision, DecisionConfig, DecisionEngine, PurchaseInput};
use crate::profile::{
    FinancialProfile, ProfileRecord, ProfileStore, ProfileStoreError, ProfileView, UserId,
};
use crate::recognition::{strip_data_url, ItemRecognizer, RecognizedItem};

/// Service resolving purchase requests against profiles and the recognizer, then scoring them.
pub struct PurchaseAdvisor<P, R> {
    profiles: Arc<P>,
    recognizer: Arc<R>,
    alternatives: Option<Arc<dyn AlternativeFinder>>,
    engine: Arc<DecisionEngine>,
}

/// Full answer for one purchase request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Advice {
    pub item_name: String,
    pub item_cost: f64,
    pub recognized_image: bool,
    pub input: PurchaseInput,
    pub decision: Decision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative: Option<Alternative>,
}

impl<P, R> PurchaseAdvisor<P, R>
where
    P: ProfileStore + 'static,
    R: ItemRecognizer + 'static,
{
    pub fn new(profiles: Arc<P>, recognizer: Arc<R>, config: DecisionConfig) -> Self {
        Self {
            profiles,
            recognizer,
            alternatives: None,
            engine: Arc::new(DecisionEngine::new(config)),
        }
    }

    /// Enable cheaper-alternative lookups for requests that ask for them.
    pub fn with_alternative_finder<F>(mut self, finder: Arc<F>) -> Self
    where
        F: AlternativeFinder + 'static,
    {
        let finder: Arc<dyn AlternativeFinder> = finder;
        self.alternatives = Some(finder);
        self
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    /// Resolve, assemble and score a purchase request.
    ///
    /// Recognizer and profile store failures degrade to the user's own answers.
    pub fn advise(&self, request: PurchaseRequest) -> Advice {
        let recognized = self.recognize(&request);

        let item_name = match (&request.item_name, &recognized) {
            (Some(name), _) => normalize_item_name(name),
            (None, Some(item)) => normalize_item_name(&item.name),
            (None, None) => normalize_item_name(""),
        };
        let item_cost = request
            .entered_cost()
            .or_else(|| recognized.as_ref().map(|item| item.cost))
            .or(request.item_cost)
            .unwrap_or(0.0);

        let profile = request
            .user_id
            .as_deref()
            .and_then(|user_id| self.lookup_profile(&UserId::new(user_id)));

        let input = assemble_input(&request, profile.as_ref(), &item_name, item_cost);
        let mut decision = self.engine.score(&input);

        let recognized_image = recognized.is_some();
        if recognized_image {
            decision.explanation = format!(
                "AI recognized this as a {}. {}",
                input.item_name, decision.explanation
            );
        }

        let alternative = if request.find_alternatives {
            self.find_alternative(&input.item_name, input.item_cost)
        } else {
            None
        };

        Advice {
            item_name: input.item_name.clone(),
            item_cost: input.item_cost,
            recognized_image,
            input,
            decision,
            alternative,
        }
    }

    /// Score an already assembled input.
    pub fn score_input(&self, input: &PurchaseInput) -> Decision {
        self.engine.score(input)
    }

    pub fn profile(&self, user_id: &UserId) -> Result<ProfileView, AdvisorError> {
        let record = self
            .profiles
            .fetch(user_id)?
            .ok_or(ProfileStoreError::NotFound)?;
        Ok(record.view())
    }

    pub fn save_profile(
        &self,
        user_id: UserId,
        profile: FinancialProfile,
    ) -> Result<ProfileView, AdvisorError> {
        if user_id.as_str().trim().is_empty() {
            return Err(AdvisorError::MissingUserId);
        }
        let stored = self.profiles.save(ProfileRecord::new(user_id, profile))?;
        info!(
            user_id = stored.user_id.as_str(),
            completion = stored.profile.completion_percentage(),
            "profile saved"
        );
        Ok(stored.view())
    }

    fn recognize(&self, request: &PurchaseRequest) -> Option<RecognizedItem> {
        let image = strip_data_url(request.image_base64.as_deref()?);
        if image.is_empty() {
            return None;
        }

        match self.recognizer.recognize(image) {
            Ok(item) if item.is_unknown() => {
                warn!("recognizer could not name the item; using form values");
                None
            }
            Ok(item) => {
                info!(item = %item.name, cost = item.cost, "image recognized");
                Some(item)
            }
            Err(error) => {
                warn!(%error, "image recognition failed; using form values");
                None
            }
        }
    }

    fn find_alternative(&self, item_name: &str, item_cost: f64) -> Option<Alternative> {
        let Some(finder) = self.alternatives.as_ref() else {
            debug!("alternatives requested but no finder is configured");
            return None;
        };
        if item_cost <= 0.0 {
            return None;
        }

        match finder.find_cheaper(item_name, item_cost) {
            Ok(Some(candidate)) => {
                let alternative = candidate.resolve(item_cost);
                match &alternative {
                    Some(found) => info!(
                        item = item_name,
                        alternative = %found.name,
                        price = found.price,
                        retailer = %found.retailer,
                        "cheaper alternative found"
                    ),
                    None => info!(item = item_name, "no suitable alternative"),
                }
                alternative
            }
            Ok(None) => {
                info!(item = item_name, "no cheaper alternative found");
                None
            }
            Err(error) => {
                warn!(%error, "alternative search failed; answering without one");
                None
            }
        }
    }

    fn lookup_profile(&self, user_id: &UserId) -> Option<FinancialProfile> {
        match self.profiles.fetch(user_id) {
            Ok(Some(record)) => Some(record.profile),
            Ok(None) => None,
            Err(error) => {
                warn!(user_id = user_id.as_str(), %error, "profile lookup failed; scoring without it");
                None
            }
        }
    }
}

/// Error raised by the advisor's profile operations.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("user id must not be empty")]
    MissingUserId,
    #[error(transparent)]
    Profile(#[from] ProfileStoreError),
}
