//! Configuration for the model artifact directory

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_FILE: &str = "best_model.json";
pub const DEFAULT_VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
pub const DEFAULT_LABEL_ENCODER_FILE: &str = "label_encoder.json";
pub const DEFAULT_METADATA_FILE: &str = "metadata.json";

/// Where the trained artifacts live and what they are called
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Directory holding the artifact files
    #[serde(default = "default_models_dir")]
    pub models_dir: PathBuf,

    /// Serialized scorer (required)
    #[serde(default = "default_model_file")]
    pub model_file: String,

    /// Serialized vectorizer (required)
    #[serde(default = "default_vectorizer_file")]
    pub vectorizer_file: String,

    /// Label encoder (optional)
    #[serde(default = "default_label_encoder_file")]
    pub label_encoder_file: String,

    /// Training metadata (optional)
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            models_dir: default_models_dir(),
            model_file: default_model_file(),
            vectorizer_file: default_vectorizer_file(),
            label_encoder_file: default_label_encoder_file(),
            metadata_file: default_metadata_file(),
        }
    }
}

impl ArtifactConfig {
    /// Default file names inside the given directory
    pub fn in_dir(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
            ..Default::default()
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.models_dir.join(&self.model_file)
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.models_dir.join(&self.vectorizer_file)
    }

    pub fn label_encoder_path(&self) -> PathBuf {
        self.models_dir.join(&self.label_encoder_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.models_dir.join(&self.metadata_file)
    }

    /// All artifact file names, required ones first
    pub fn file_names(&self) -> [&str; 4] {
        [
            &self.model_file,
            &self.vectorizer_file,
            &self.label_encoder_file,
            &self.metadata_file,
        ]
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("models")
}

fn default_model_file() -> String {
    DEFAULT_MODEL_FILE.to_string()
}

fn default_vectorizer_file() -> String {
    DEFAULT_VECTORIZER_FILE.to_string()
}

fn default_label_encoder_file() -> String {
    DEFAULT_LABEL_ENCODER_FILE.to_string()
}

fn default_metadata_file() -> String {
    DEFAULT_METADATA_FILE.to_string()
}
