//! Spam/ham classification adapter
//!
//! Wraps a [`LoadedModel`] and turns whatever the scorer emits into the
//! probability/confidence contract served over HTTP.

use crate::config::ArtifactConfig;
use crate::model_loader::LoadedModel;
use spamguard_core::{
    ClassificationRequest, ClassificationResult, Error, ModelDetails, ModelInfo, Prediction,
    Result, ResultModelInfo,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Round to four decimal places for output
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Binary spam classifier, unloaded until [`SpamClassifier::load`] succeeds
pub struct SpamClassifier {
    config: ArtifactConfig,
    model: Option<LoadedModel>,
}

impl SpamClassifier {
    /// Create an unloaded classifier reading from the configured directory
    pub fn new(config: ArtifactConfig) -> Self {
        Self {
            config,
            model: None,
        }
    }

    /// Create a classifier around an already-built model
    pub fn with_model(model: LoadedModel) -> Self {
        Self {
            config: ArtifactConfig::default(),
            model: Some(model),
        }
    }

    pub fn config(&self) -> &ArtifactConfig {
        &self.config
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Read the artifacts; the classifier stays unloaded if anything fails
    pub fn load(&mut self) -> Result<()> {
        if self.is_loaded() {
            warn!("Model already loaded, ignoring repeated load");
            return Ok(());
        }

        let start = Instant::now();
        let model = LoadedModel::load(&self.config)?;
        info!(
            "Loaded {} ({} output) in {}ms",
            model.model_type(),
            model.scorer().kind().name(),
            start.elapsed().as_millis()
        );
        self.model = Some(model);
        Ok(())
    }

    /// Classify a validated request
    pub fn classify_request(&self, request: &ClassificationRequest) -> Result<ClassificationResult> {
        self.classify(&request.message, request.threshold)
    }

    /// Classify one message; it is spam when `probability_spam >= threshold`
    pub fn classify(&self, message: &str, threshold: f64) -> Result<ClassificationResult> {
        let model = self.model.as_ref().ok_or(Error::NotLoaded)?;

        if message.trim().is_empty() {
            return Err(Error::validation("message cannot be empty"));
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::validation(format!(
                "threshold must be between 0.0 and 1.0, got {threshold}"
            )));
        }

        let features = model.vectorizer().transform(message)?;
        let probabilities = model.scorer().class_probabilities(&features)?;

        let indices = model.indices();
        let probability_spam = probabilities[indices.spam];
        let probability_ham = probabilities[indices.ham];

        let is_spam = probability_spam >= threshold;
        let confidence = if is_spam {
            probability_spam
        } else {
            probability_ham
        };

        debug!(
            features = features.nnz(),
            probability_spam, threshold, is_spam, "Classified message"
        );

        Ok(ClassificationResult {
            prediction: if is_spam {
                Prediction::Spam
            } else {
                Prediction::Ham
            },
            is_spam,
            confidence: round4(confidence),
            probability_spam: round4(probability_spam),
            probability_ham: round4(probability_ham),
            model_info: ResultModelInfo {
                model_type: model.model_type().to_string(),
                vectorizer: model.vectorizer().name().to_string(),
            },
        })
    }

    /// Load status plus metadata-derived model description
    pub fn model_info(&self) -> ModelInfo {
        let Some(model) = &self.model else {
            return ModelInfo::unloaded();
        };
        let metadata = model.metadata();

        ModelInfo::loaded(ModelDetails {
            model_type: model.model_type().to_string(),
            vectorizer_type: model.vectorizer().name().to_string(),
            training_samples: metadata.get_u64("training_samples"),
            accuracy: metadata.get_f64("optimization_accuracy"),
            precision: metadata.get_f64("optimization_precision"),
            recall: metadata.get_f64("optimization_recall"),
            f1_score: metadata
                .get_f64("optimization_f1")
                .or_else(|| metadata.get_f64("cv_f1_mean")),
            trained_date: metadata.get_text("trained_date"),
            cv_f1_mean: metadata.get_f64("cv_f1_mean"),
            cv_f1_std: metadata.get_f64("cv_f1_std"),
        })
    }
}
