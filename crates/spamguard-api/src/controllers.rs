//! Controller functions between the HTTP handlers and the classifier

use spamguard_classifiers::SpamClassifier;
use spamguard_core::{
    ClassificationRequest, ClassificationResult, Error, HealthStatus, ModelInfo, Result,
};

/// Service version reported by the health endpoints
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn get_health_status(classifier: &SpamClassifier) -> HealthStatus {
    HealthStatus::healthy(classifier.is_loaded(), VERSION)
}

pub fn get_model_info(classifier: &SpamClassifier) -> ModelInfo {
    classifier.model_info()
}

/// Classify one email.
///
/// The loaded check runs before request validation, so an unloaded service
/// answers every prediction with `NotLoaded` regardless of the payload.
pub fn classify_email(
    classifier: &SpamClassifier,
    request: ClassificationRequest,
) -> Result<ClassificationResult> {
    if !classifier.is_loaded() {
        return Err(Error::NotLoaded);
    }

    let request = request.validate()?;
    classifier.classify_request(&request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spamguard_classifiers::ArtifactConfig;

    fn unloaded() -> SpamClassifier {
        SpamClassifier::new(ArtifactConfig::in_dir("/nonexistent"))
    }

    #[test]
    fn test_health_reports_unloaded_model() {
        let health = get_health_status(&unloaded());
        assert_eq!(health.status, "healthy");
        assert!(!health.model_loaded);
        assert_eq!(health.version, VERSION);
    }

    #[test]
    fn test_model_info_unloaded() {
        let info = get_model_info(&unloaded());
        assert!(!info.loaded);
        assert!(info.details.is_none());
    }

    #[test]
    fn test_unloaded_wins_over_invalid_request() {
        let request = ClassificationRequest::new("short").with_threshold(7.0);
        assert!(matches!(
            classify_email(&unloaded(), request),
            Err(Error::NotLoaded)
        ));
    }
}
