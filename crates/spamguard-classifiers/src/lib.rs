//! SpamGuard Classifiers
//!
//! Serving-side half of a spam/ham text classifier trained offline.
//!
//! The pieces, leaf-first:
//! - [`vectorizer`]: TF-IDF transform from raw text to a sparse feature vector
//! - [`scorer`]: probability-based and margin-based estimators, tagged by capability
//! - [`labels`]: mapping model classes onto the spam and ham columns
//! - [`model_loader`]: reading the artifact directory
//! - [`spam`]: the adapter exposing `classify` and `model_info`
//!
//! Everything is synchronous and read-only after loading.

pub mod classifier;
pub mod config;
pub mod deploy;
pub mod labels;
pub mod metadata;
pub mod model_loader;
pub mod scorer;
pub mod spam;
pub mod vectorizer;

pub use classifier::{MarginEstimator, ProbabilityEstimator, TextVectorizer};
pub use config::ArtifactConfig;
pub use deploy::{deploy_artifacts, DeployReport};
pub use labels::{ClassIndices, ClassLabel, LabelEncoder};
pub use metadata::ModelMetadata;
pub use model_loader::LoadedModel;
pub use scorer::{margin_to_probabilities, sigmoid, ModelArtifact, Scorer, ScorerKind};
pub use spam::SpamClassifier;
pub use vectorizer::{SparseVector, TfidfSpec, TfidfVectorizer};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{MarginEstimator, ProbabilityEstimator, TextVectorizer};
    pub use crate::config::ArtifactConfig;
    pub use crate::model_loader::LoadedModel;
    pub use crate::scorer::{Scorer, ScorerKind};
    pub use crate::spam::SpamClassifier;
    pub use crate::vectorizer::SparseVector;
}
