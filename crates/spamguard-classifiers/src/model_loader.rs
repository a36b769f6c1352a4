//! Loading trained artifacts from the model directory

use crate::classifier::TextVectorizer;
use crate::config::ArtifactConfig;
use crate::labels::{ClassIndices, LabelEncoder};
use crate::metadata::ModelMetadata;
use crate::scorer::{ModelArtifact, Scorer};
use crate::vectorizer::{TfidfSpec, TfidfVectorizer};
use serde::de::DeserializeOwned;
use spamguard_core::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Everything needed to classify, read once from the artifact directory
pub struct LoadedModel {
    scorer: Scorer,
    vectorizer: Box<dyn TextVectorizer>,
    label_encoder: Option<LabelEncoder>,
    metadata: ModelMetadata,
    indices: ClassIndices,
}

impl LoadedModel {
    /// Assemble a model from already-built parts, resolving the spam/ham columns
    pub fn new(
        scorer: Scorer,
        vectorizer: Box<dyn TextVectorizer>,
        label_encoder: Option<LabelEncoder>,
        metadata: ModelMetadata,
    ) -> Result<Self> {
        let indices = ClassIndices::resolve(scorer.classes(), label_encoder.as_ref())?;
        Ok(Self {
            scorer,
            vectorizer,
            label_encoder,
            metadata,
            indices,
        })
    }

    /// Read all artifacts named by the configuration
    ///
    /// The scorer and vectorizer are required. The label encoder and metadata
    /// are optional, but a present file that cannot be parsed still fails.
    pub fn load(config: &ArtifactConfig) -> Result<Self> {
        info!("Loading model artifacts from {:?}", config.models_dir());

        let spec: TfidfSpec = read_artifact(&config.vectorizer_path())?;
        let vectorizer = TfidfVectorizer::from_spec(spec)?;
        debug!("Vectorizer vocabulary size: {}", vectorizer.vocabulary_size());

        let artifact: ModelArtifact = read_artifact(&config.model_path())?;
        let scorer = Scorer::from_artifact(artifact, vectorizer.dimension())?;
        debug!(
            "Scorer {} exposes {} output",
            scorer.model_type(),
            scorer.kind().name()
        );

        let label_encoder: Option<LabelEncoder> =
            read_optional_artifact(&config.label_encoder_path())?;
        let metadata: ModelMetadata =
            read_optional_artifact(&config.metadata_path())?.unwrap_or_default();

        Self::new(scorer, Box::new(vectorizer), label_encoder, metadata)
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn vectorizer(&self) -> &dyn TextVectorizer {
        self.vectorizer.as_ref()
    }

    pub fn label_encoder(&self) -> Option<&LabelEncoder> {
        self.label_encoder.as_ref()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn indices(&self) -> ClassIndices {
        self.indices
    }

    /// Model name from metadata, falling back to the scorer's own
    pub fn model_type(&self) -> &str {
        self.metadata
            .get_str("model_type")
            .unwrap_or_else(|| self.scorer.model_type())
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::load(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::load(format!("cannot parse {}: {e}", path.display())))
}

fn read_optional_artifact<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        debug!("Optional artifact {} not present", path.display());
        return Ok(None);
    }
    read_artifact(path).map(Some)
}
