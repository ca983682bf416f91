//! Seam for the image recognition backend.
//!
//! Recognition itself happens elsewhere; this module defines the contract and normalizes the
//! loosely formatted answers such backends tend to return.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::decision::number_from_value;

pub const UNKNOWN_ITEM: &str = "Unknown";

/// Item name and estimated price recovered from a photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedItem {
    pub name: String,
    pub cost: f64,
}

impl RecognizedItem {
    /// Pull the first `{ ... }` block out of a free-text model answer.
    ///
    /// Missing or unusable fields become `"Unknown"` and `0`, and so does an answer with no
    /// readable JSON object. Adapters call this on the raw model text.
    pub fn from_model_text(text: &str) -> Self {
        let start = text.find('{');
        let end = text.rfind('}');
        let block = match (start, end) {
            (Some(start), Some(end)) if end > start => &text[start..=end],
            _ => {
                debug!(answer = %preview(text), "model answer has no json block");
                return Self::unknown();
            }
        };

        let value: Value = match serde_json::from_str(block) {
            Ok(value) => value,
            Err(err) => {
                debug!(block = %preview(block), error = %err, "model answer json is malformed");
                return Self::unknown();
            }
        };

        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_ITEM)
            .to_string();

        let cost = value
            .get("cost")
            .and_then(number_from_value)
            .filter(|cost| *cost >= 0.0)
            .unwrap_or(0.0);

        Self { name, cost }
    }

    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN_ITEM.to_string(),
            cost: 0.0,
        }
    }

    /// True when the backend could not name the item.
    pub fn is_unknown(&self) -> bool {
        self.name.eq_ignore_ascii_case(UNKNOWN_ITEM)
    }
}

fn preview(text: &str) -> String {
    text.chars().take(80).collect()
}

/// Drop a `data:<mime>;base64,` prefix left by browser file readers.
pub fn strip_data_url(image: &str) -> &str {
    let trimmed = image.trim();
    if trimmed.starts_with("data:") {
        if let Some((_, payload)) = trimmed.split_once(";base64,") {
            return payload;
        }
    }
    trimmed
}

/// Resolves a base64 image into an item name and price estimate.
pub trait ItemRecognizer: Send + Sync {
    fn recognize(&self, image_base64: &str) -> Result<RecognizedItem, RecognitionError>;
}

/// Error raised by recognizer adapters.
#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("no image data supplied")]
    MissingImage,
    #[error("recognizer returned an unreadable answer: {0}")]
    Unparseable(String),
    #[error("recognizer unavailable: {0}")]
    Unavailable(String),
}
