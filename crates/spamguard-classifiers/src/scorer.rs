//! Scorer variants and the estimators behind them
//!
//! The capability of a trained model is decided once, when its artifact is
//! loaded, and recorded in [`ScorerKind`]:
//! - [`ScorerKind::Probability`]: the model emits class probabilities
//!   (multinomial naive Bayes, logistic regression)
//! - [`ScorerKind::Margin`]: the model only emits a signed decision margin
//!   (linear support vector classifier)
//! - [`ScorerKind::Unsupported`]: neither, classification fails

use crate::classifier::{MarginEstimator, ProbabilityEstimator};
use crate::labels::ClassLabel;
use crate::vectorizer::SparseVector;
use serde::{Deserialize, Serialize};
use spamguard_core::{Error, Result};

/// Serialized model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Human-readable model name, e.g. "LinearSVC"
    pub model_type: String,

    /// Class list in output column order
    #[serde(default)]
    pub classes: Vec<ClassLabel>,

    pub estimator: EstimatorSpec,
}

/// Fitted parameters, tagged by estimator kind
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorSpec {
    MultinomialNb {
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    },
    LogisticRegression {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    LinearSvc {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    /// Any estimator kind this service cannot score
    #[serde(other)]
    Other,
}

/// Output capability of a loaded model
pub enum ScorerKind {
    Probability(Box<dyn ProbabilityEstimator>),
    Margin(Box<dyn MarginEstimator>),
    Unsupported,
}

impl ScorerKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Probability(_) => "probability",
            Self::Margin(_) => "margin",
            Self::Unsupported => "unsupported",
        }
    }
}

/// A loaded model together with its class list
pub struct Scorer {
    model_type: String,
    classes: Vec<ClassLabel>,
    kind: ScorerKind,
}

impl Scorer {
    pub fn new(model_type: impl Into<String>, classes: Vec<ClassLabel>, kind: ScorerKind) -> Self {
        Self {
            model_type: model_type.into(),
            classes,
            kind,
        }
    }

    pub fn probability(
        model_type: impl Into<String>,
        classes: Vec<ClassLabel>,
        estimator: impl ProbabilityEstimator + 'static,
    ) -> Self {
        Self::new(model_type, classes, ScorerKind::Probability(Box::new(estimator)))
    }

    pub fn margin(
        model_type: impl Into<String>,
        classes: Vec<ClassLabel>,
        estimator: impl MarginEstimator + 'static,
    ) -> Self {
        Self::new(model_type, classes, ScorerKind::Margin(Box::new(estimator)))
    }

    /// Build a scorer from its artifact, checking shapes against the feature count
    pub fn from_artifact(artifact: ModelArtifact, n_features: usize) -> Result<Self> {
        let kind = match artifact.estimator {
            EstimatorSpec::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => ScorerKind::Probability(Box::new(MultinomialNb::new(
                class_log_prior,
                feature_log_prob,
                n_features,
            )?)),
            EstimatorSpec::LogisticRegression { coef, intercept } => ScorerKind::Probability(
                Box::new(LogisticRegression::new(coef, intercept, n_features)?),
            ),
            EstimatorSpec::LinearSvc { coef, intercept } => {
                ScorerKind::Margin(Box::new(LinearSvc::new(coef, intercept, n_features)?))
            }
            EstimatorSpec::Other => ScorerKind::Unsupported,
        };

        Ok(Self::new(artifact.model_type, artifact.classes, kind))
    }

    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    pub fn classes(&self) -> &[ClassLabel] {
        &self.classes
    }

    pub fn kind(&self) -> &ScorerKind {
        &self.kind
    }

    /// Two-column class probabilities in class order
    pub fn class_probabilities(&self, features: &SparseVector) -> Result<[f64; 2]> {
        match &self.kind {
            ScorerKind::Probability(estimator) => {
                let probabilities = estimator.predict_proba(features)?;
                match probabilities.as_slice() {
                    [first, second] if first.is_finite() && second.is_finite() => {
                        Ok([*first, *second])
                    }
                    other => Err(Error::internal(format!(
                        "{} returned malformed probabilities {other:?}",
                        self.model_type
                    ))),
                }
            }
            ScorerKind::Margin(estimator) => {
                let margin = estimator.decision_function(features)?;
                if margin.is_nan() {
                    return Err(Error::internal(format!(
                        "{} returned a NaN decision margin",
                        self.model_type
                    )));
                }
                Ok(margin_to_probabilities(margin))
            }
            ScorerKind::Unsupported => Err(Error::unsupported_model(format!(
                "{} provides neither probability estimates nor a decision function",
                self.model_type
            ))),
        }
    }
}

/// Logistic function, stable for large negative inputs
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Map a margin to `[negative, positive]` probabilities summing to one
pub fn margin_to_probabilities(margin: f64) -> [f64; 2] {
    let positive = sigmoid(margin);
    let negative = 1.0 - positive;
    let total = positive + negative;
    [negative / total, positive / total]
}

fn softmax(values: &[f64]) -> Vec<f64> {
    let max_value = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exp: Vec<f64> = values.iter().map(|&x| (x - max_value).exp()).collect();
    let sum: f64 = exp.iter().sum();
    exp.into_iter().map(|x| x / sum).collect()
}

fn check_rows(rows: &[Vec<f64>], expected_rows: usize, n_features: usize, what: &str) -> Result<()> {
    if rows.len() != expected_rows {
        return Err(Error::load(format!(
            "{what} has {} rows, expected {expected_rows}",
            rows.len()
        )));
    }
    if let Some(row) = rows.iter().find(|row| row.len() != n_features) {
        return Err(Error::load(format!(
            "{what} row has {} weights but the vectorizer produces {n_features} features",
            row.len()
        )));
    }
    Ok(())
}

/// Binary linear model parameters: one weight row and one intercept
fn binary_linear(
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    n_features: usize,
    what: &str,
) -> Result<(Vec<f64>, f64)> {
    check_rows(&coef, 1, n_features, what)?;
    let [bias] = intercept.as_slice() else {
        return Err(Error::load(format!(
            "{what} has {} intercepts, expected 1",
            intercept.len()
        )));
    };
    let bias = *bias;
    let weights = coef.into_iter().next().unwrap_or_default();
    Ok((weights, bias))
}

/// Multinomial naive Bayes over two classes
pub struct MultinomialNb {
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    pub fn new(
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
        n_features: usize,
    ) -> Result<Self> {
        if class_log_prior.len() != 2 {
            return Err(Error::load(format!(
                "naive Bayes has {} class priors, expected 2",
                class_log_prior.len()
            )));
        }
        check_rows(&feature_log_prob, 2, n_features, "naive Bayes feature_log_prob")?;
        Ok(Self {
            class_log_prior,
            feature_log_prob,
        })
    }
}

impl ProbabilityEstimator for MultinomialNb {
    fn predict_proba(&self, features: &SparseVector) -> Result<Vec<f64>> {
        let joint: Vec<f64> = self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, log_prob)| prior + features.dot(log_prob))
            .collect();
        Ok(softmax(&joint))
    }
}

/// Binary logistic regression
pub struct LogisticRegression {
    weights: Vec<f64>,
    intercept: f64,
}

impl LogisticRegression {
    pub fn new(coef: Vec<Vec<f64>>, intercept: Vec<f64>, n_features: usize) -> Result<Self> {
        let (weights, intercept) =
            binary_linear(coef, intercept, n_features, "logistic regression coef")?;
        Ok(Self { weights, intercept })
    }
}

impl ProbabilityEstimator for LogisticRegression {
    fn predict_proba(&self, features: &SparseVector) -> Result<Vec<f64>> {
        let positive = sigmoid(features.dot(&self.weights) + self.intercept);
        Ok(vec![1.0 - positive, positive])
    }
}

/// Binary linear support vector classifier
pub struct LinearSvc {
    weights: Vec<f64>,
    intercept: f64,
}

impl LinearSvc {
    pub fn new(coef: Vec<Vec<f64>>, intercept: Vec<f64>, n_features: usize) -> Result<Self> {
        let (weights, intercept) = binary_linear(coef, intercept, n_features, "linear SVC coef")?;
        Ok(Self { weights, intercept })
    }
}

impl MarginEstimator for LinearSvc {
    fn decision_function(&self, features: &SparseVector) -> Result<f64> {
        Ok(features.dot(&self.weights) + self.intercept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unit_vector(dim: usize, idx: usize) -> SparseVector {
        SparseVector::new(dim, vec![(idx, 1.0)]).unwrap()
    }

    #[test]
    fn test_sigmoid_values() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!((sigmoid(2.5) - 0.924_141_8).abs() < 1e-6);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!(sigmoid(800.0) <= 1.0);
    }

    #[test]
    fn test_margin_to_probabilities_sums_to_one() {
        for margin in [-40.0, -2.5, 0.0, 0.3, 2.5, 40.0] {
            let [ham, spam] = margin_to_probabilities(margin);
            assert!((ham + spam - 1.0).abs() < 1e-12);
            assert_eq!(spam > 0.5, margin > 0.0);
        }
    }

    #[test]
    fn test_estimator_kind_from_json() {
        let artifact: ModelArtifact = serde_json::from_value(json!({
            "model_type": "LinearSVC",
            "classes": [0, 1],
            "estimator": { "kind": "linear_svc", "coef": [[1.0, -1.0]], "intercept": [0.0] }
        }))
        .unwrap();
        let scorer = Scorer::from_artifact(artifact, 2).unwrap();
        assert_eq!(scorer.kind().name(), "margin");
        assert_eq!(scorer.model_type(), "LinearSVC");
    }

    #[test]
    fn test_unknown_kind_is_unsupported() {
        let artifact: ModelArtifact = serde_json::from_value(json!({
            "model_type": "RandomForestClassifier",
            "estimator": { "kind": "random_forest", "n_estimators": 100 }
        }))
        .unwrap();
        let scorer = Scorer::from_artifact(artifact, 4).unwrap();
        assert_eq!(scorer.kind().name(), "unsupported");

        let err = scorer.class_probabilities(&SparseVector::zeros(4)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedModel(_)));
    }

    #[test]
    fn test_multinomial_nb_probabilities() {
        let nb = MultinomialNb::new(
            vec![0.5f64.ln(), 0.5f64.ln()],
            vec![vec![0.9f64.ln(), 0.1f64.ln()], vec![0.1f64.ln(), 0.9f64.ln()]],
            2,
        )
        .unwrap();

        let probs = nb.predict_proba(&unit_vector(2, 1)).unwrap();
        assert!((probs[0] + probs[1] - 1.0).abs() < 1e-12);
        assert!((probs[1] - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_multinomial_nb_shape_checks() {
        assert!(MultinomialNb::new(vec![0.0], vec![vec![0.0, 0.0]], 2).is_err());
        assert!(MultinomialNb::new(vec![0.0, 0.0], vec![vec![0.0], vec![0.0]], 2).is_err());
    }

    #[test]
    fn test_logistic_regression_probabilities() {
        let lr = LogisticRegression::new(vec![vec![3.0, -3.0]], vec![0.0], 2).unwrap();
        let probs = lr.predict_proba(&unit_vector(2, 0)).unwrap();
        assert!((probs[1] - sigmoid(3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_linear_shape_checks() {
        assert!(LinearSvc::new(vec![vec![1.0, 1.0]], vec![], 2).is_err());
        assert!(LinearSvc::new(vec![vec![1.0]], vec![0.0], 2).is_err());
        assert!(LogisticRegression::new(vec![vec![1.0], vec![1.0]], vec![0.0, 0.0], 1).is_err());
    }

    #[test]
    fn test_linear_svc_margin() {
        let svc = LinearSvc::new(vec![vec![2.0, -1.0]], vec![0.5], 2).unwrap();
        assert_eq!(svc.decision_function(&unit_vector(2, 0)).unwrap(), 2.5);
    }
}
