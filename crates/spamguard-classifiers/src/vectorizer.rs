//! TF-IDF text vectorizer
//!
//! Reproduces the transform side of a term-frequency/inverse-document-frequency
//! pipeline fitted offline: the vocabulary and IDF weights come from the
//! artifact, nothing is learned here.

use crate::classifier::TextVectorizer;
use regex::Regex;
use serde::{Deserialize, Serialize};
use spamguard_core::{Error, Result};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Word pattern matching runs of two or more word characters
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Sparse feature vector with entries sorted by index
#[derive(Debug, Clone, PartialEq)]
pub struct SparseVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build a vector from unsorted entries; out-of-range indices are rejected
    pub fn new(dim: usize, mut entries: Vec<(usize, f64)>) -> Result<Self> {
        if let Some((idx, _)) = entries.iter().find(|(idx, _)| *idx >= dim) {
            return Err(Error::internal(format!(
                "feature index {idx} out of range for dimension {dim}"
            )));
        }
        entries.sort_unstable_by_key(|(idx, _)| *idx);
        Ok(Self { dim, entries })
    }

    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Dot product against a dense weight row of the same dimension
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(idx, value)| weights.get(*idx).map(|w| w * value))
            .sum()
    }
}

/// Row normalization applied after IDF weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    #[default]
    L2,
    None,
}

/// Serialized vectorizer artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfSpec {
    /// Term to feature index
    pub vocabulary: HashMap<String, usize>,

    /// IDF weight per feature index
    pub idf: Vec<f64>,

    #[serde(default = "default_true")]
    pub lowercase: bool,

    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Inclusive word n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Replace raw counts with `1 + ln(count)`
    #[serde(default)]
    pub sublinear_tf: bool,

    #[serde(default)]
    pub norm: Norm,

    #[serde(default)]
    pub stop_words: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// TF-IDF vectorizer built from a [`TfidfSpec`]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    token_regex: Regex,
    ngram_range: (usize, usize),
    sublinear_tf: bool,
    norm: Norm,
    stop_words: HashSet<String>,
}

impl std::fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("vocabulary_size", &self.vocabulary.len())
            .field("ngram_range", &self.ngram_range)
            .field("sublinear_tf", &self.sublinear_tf)
            .field("norm", &self.norm)
            .finish()
    }
}

impl TfidfVectorizer {
    /// Validate the artifact and compile the token pattern
    pub fn from_spec(spec: TfidfSpec) -> Result<Self> {
        if spec.idf.len() != spec.vocabulary.len() {
            return Err(Error::load(format!(
                "vectorizer has {} idf weights for {} vocabulary terms",
                spec.idf.len(),
                spec.vocabulary.len()
            )));
        }
        if let Some((term, idx)) = spec
            .vocabulary
            .iter()
            .find(|(_, idx)| **idx >= spec.idf.len())
        {
            return Err(Error::load(format!(
                "vocabulary term '{term}' maps to index {idx} beyond {} features",
                spec.idf.len()
            )));
        }
        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::load(format!(
                "invalid ngram range ({min_n}, {max_n})"
            )));
        }
        let token_regex = Regex::new(&spec.token_pattern).map_err(|e| {
            Error::load(format!("invalid token pattern '{}': {e}", spec.token_pattern))
        })?;

        let stop_words = spec
            .stop_words
            .into_iter()
            .map(|w| if spec.lowercase { w.to_lowercase() } else { w })
            .collect();

        Ok(Self {
            vocabulary: spec.vocabulary,
            idf: spec.idf,
            lowercase: spec.lowercase,
            token_regex,
            ngram_range: spec.ngram_range,
            sublinear_tf: spec.sublinear_tf,
            norm: spec.norm,
            stop_words,
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Split a document into the terms looked up in the vocabulary
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_regex
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            if n == 1 {
                terms.extend(tokens.iter().map(|t| t.to_string()));
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        terms
    }
}

impl TextVectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<SparseVector> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (idx, tf * self.idf[idx])
            })
            .collect();

        let norm = match self.norm {
            Norm::L1 => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            Norm::L2 => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Norm::None => 1.0,
        };
        if norm > 0.0 {
            for (_, value) in &mut entries {
                *value /= norm;
            }
        }

        SparseVector::new(self.idf.len(), entries)
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn name(&self) -> &str {
        "TfidfVectorizer"
    }
}
