//! Trait seams between the adapter and the trained artifacts

use crate::vectorizer::SparseVector;
use spamguard_core::Result;

/// Text to feature-vector transform
pub trait TextVectorizer: Send + Sync {
    /// Transform one document into a sparse feature vector
    fn transform(&self, text: &str) -> Result<SparseVector>;

    /// Number of features produced
    fn dimension(&self) -> usize;

    /// Vectorizer name reported in model info
    fn name(&self) -> &str;
}

/// Scorer that produces class probability estimates
pub trait ProbabilityEstimator: Send + Sync {
    /// Probabilities in class order, one entry per class
    fn predict_proba(&self, features: &SparseVector) -> Result<Vec<f64>>;
}

/// Scorer that only produces an unbounded decision margin
///
/// Positive margins favor the second class.
pub trait MarginEstimator: Send + Sync {
    fn decision_function(&self, features: &SparseVector) -> Result<f64>;
}
