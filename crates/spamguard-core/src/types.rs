//! Request and response contracts shared by the classifier and the HTTP layer

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shortest accepted message, counted in characters after trimming
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Longest accepted message, counted in characters after trimming
pub const MAX_MESSAGE_CHARS: usize = 5000;

/// Spam probability cutoff used when the caller does not supply one
pub const DEFAULT_THRESHOLD: f64 = 0.5;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Binary label produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Spam,
    Ham,
}

impl Prediction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "spam",
            Self::Ham => "ham",
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of a prediction request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// Email message text to classify
    pub message: String,

    /// Probability at or above which the message is labeled spam.
    /// Higher values (0.7-0.8) reduce false positives.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl ClassificationRequest {
    /// Create a request with the default threshold
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Override the spam threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Trim the message and check the length and threshold bounds
    pub fn validate(mut self) -> Result<Self> {
        let trimmed = self.message.trim();
        let chars = trimmed.chars().count();

        if chars < MIN_MESSAGE_CHARS {
            return Err(Error::validation(format!(
                "message must contain at least {MIN_MESSAGE_CHARS} characters, got {chars}"
            )));
        }
        if chars > MAX_MESSAGE_CHARS {
            return Err(Error::validation(format!(
                "message must contain at most {MAX_MESSAGE_CHARS} characters, got {chars}"
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::validation(format!(
                "threshold must be between 0.0 and 1.0, got {}",
                self.threshold
            )));
        }

        if trimmed.len() != self.message.len() {
            self.message = trimmed.to_string();
        }
        Ok(self)
    }
}

/// Model identification echoed in every classification result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultModelInfo {
    #[serde(rename = "type")]
    pub model_type: String,
    pub vectorizer: String,
}

/// Outcome of classifying one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub prediction: Prediction,
    pub is_spam: bool,

    /// Probability of the predicted label (0.0-1.0)
    pub confidence: f64,
    pub probability_spam: f64,
    pub probability_ham: f64,
    pub model_info: ResultModelInfo,
}

/// Snapshot returned by the model info endpoint
///
/// Serializes as `{"loaded": false}` when no model is loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub loaded: bool,

    #[serde(flatten)]
    pub details: Option<ModelDetails>,
}

impl ModelInfo {
    pub fn unloaded() -> Self {
        Self {
            loaded: false,
            details: None,
        }
    }

    pub fn loaded(details: ModelDetails) -> Self {
        Self {
            loaded: true,
            details: Some(details),
        }
    }
}

/// Metadata-derived description of a loaded model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    pub model_type: String,
    pub vectorizer_type: String,
    pub training_samples: Option<u64>,
    pub accuracy: Option<f64>,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1_score: Option<f64>,
    pub trained_date: Option<String>,
    pub cv_f1_mean: Option<f64>,
    pub cv_f1_std: Option<f64>,
}

/// Service health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub model_loaded: bool,
    pub version: String,
}

impl HealthStatus {
    pub fn healthy(model_loaded: bool, version: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            model_loaded,
            version: version.into(),
        }
    }
}

/// JSON body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
    pub error_type: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
            error_type: error_type.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_default_threshold() {
        let req: ClassificationRequest =
            serde_json::from_value(json!({ "message": "Hello there, friend" })).unwrap();
        assert_eq!(req.threshold, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_validate_trims_message() {
        let req = ClassificationRequest::new("   Meeting moved to Friday   ")
            .validate()
            .unwrap();
        assert_eq!(req.message, "Meeting moved to Friday");
    }

    #[test]
    fn test_validate_length_counts_trimmed_chars() {
        // 9 visible characters padded with whitespace
        let err = ClassificationRequest::new("    too short    ")
            .validate()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let long = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(ClassificationRequest::new(long).validate().is_err());

        let exact = "é".repeat(MAX_MESSAGE_CHARS);
        assert!(ClassificationRequest::new(exact).validate().is_ok());
    }

    #[test]
    fn test_validate_threshold_bounds() {
        let msg = "A perfectly normal message";
        assert!(ClassificationRequest::new(msg).with_threshold(0.0).validate().is_ok());
        assert!(ClassificationRequest::new(msg).with_threshold(1.0).validate().is_ok());
        assert!(ClassificationRequest::new(msg).with_threshold(1.01).validate().is_err());
        assert!(ClassificationRequest::new(msg).with_threshold(-0.1).validate().is_err());
        assert!(ClassificationRequest::new(msg).with_threshold(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_unloaded_model_info_serializes_minimal() {
        let value = serde_json::to_value(ModelInfo::unloaded()).unwrap();
        assert_eq!(value, json!({ "loaded": false }));
    }

    #[test]
    fn test_loaded_model_info_flattens_details() {
        let info = ModelInfo::loaded(ModelDetails {
            model_type: "LinearSVC".to_string(),
            vectorizer_type: "TfidfVectorizer".to_string(),
            accuracy: Some(0.98),
            ..Default::default()
        });
        let value = serde_json::to_value(info).unwrap();
        assert_eq!(value["loaded"], json!(true));
        assert_eq!(value["model_type"], json!("LinearSVC"));
        assert_eq!(value["accuracy"], json!(0.98));
        assert!(value["recall"].is_null());
    }

    #[test]
    fn test_result_model_info_uses_type_key() {
        let info = ResultModelInfo {
            model_type: "MultinomialNB".to_string(),
            vectorizer: "TfidfVectorizer".to_string(),
        };
        let value = serde_json::to_value(info).unwrap();
        assert_eq!(value, json!({ "type": "MultinomialNB", "vectorizer": "TfidfVectorizer" }));
    }

    #[test]
    fn test_prediction_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Prediction::Spam).unwrap(), json!("spam"));
        assert_eq!(Prediction::Ham.to_string(), "ham");
    }
}
