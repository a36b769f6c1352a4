//! Class label resolution
//!
//! Trained models store their classes either as label strings or as integer
//! codes produced by a label encoder. The adapter only needs to know which
//! probability column is spam and which is ham.

use serde::{Deserialize, Serialize};
use spamguard_core::{Error, Result};
use std::fmt;

pub const SPAM_LABEL: &str = "spam";
pub const HAM_LABEL: &str = "ham";

/// One entry of a model's class list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    /// Encoded class, decoded through a [`LabelEncoder`]
    Index(usize),
    Name(String),
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for ClassLabel {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// Serialized label encoder artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn decode(&self, code: usize) -> Option<&str> {
        self.classes.get(code).map(String::as_str)
    }
}

/// Probability columns holding the spam and ham estimates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassIndices {
    pub spam: usize,
    pub ham: usize,
}

impl Default for ClassIndices {
    fn default() -> Self {
        Self { spam: 1, ham: 0 }
    }
}

impl ClassIndices {
    /// Locate spam and ham in a binary model's class list
    ///
    /// A label that cannot be found takes the column the other one does not
    /// use; with neither present, spam is column 1 and ham column 0.
    pub fn resolve(classes: &[ClassLabel], encoder: Option<&LabelEncoder>) -> Result<Self> {
        if classes.is_empty() {
            return Ok(Self::default());
        }
        if classes.len() != 2 {
            return Err(Error::load(format!(
                "expected a binary classifier, model declares {} classes",
                classes.len()
            )));
        }

        let names: Vec<Option<&str>> = classes
            .iter()
            .map(|class| match class {
                ClassLabel::Name(name) => Some(name.as_str()),
                ClassLabel::Index(code) => encoder.and_then(|e| e.decode(*code)),
            })
            .collect();
        if let (Some(a), Some(b)) = (names[0], names[1]) {
            if a.eq_ignore_ascii_case(b) {
                return Err(Error::load(format!("duplicate class label '{a}'")));
            }
        }
        let find = |label: &str| {
            names
                .iter()
                .position(|name| name.is_some_and(|n| n.eq_ignore_ascii_case(label)))
        };

        let indices = match (find(SPAM_LABEL), find(HAM_LABEL)) {
            (Some(spam), Some(ham)) => Self { spam, ham },
            (Some(spam), None) => Self { spam, ham: 1 - spam },
            (None, Some(ham)) => Self { spam: 1 - ham, ham },
            (None, None) => Self::default(),
        };

        if indices.spam == indices.ham {
            return Err(Error::load(format!(
                "classes {} and {} resolve to the same column",
                classes[0], classes[1]
            )));
        }
        Ok(indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_named_classes() {
        let classes = vec![ClassLabel::from("ham"), ClassLabel::from("spam")];
        assert_eq!(
            ClassIndices::resolve(&classes, None).unwrap(),
            ClassIndices { spam: 1, ham: 0 }
        );

        let reversed = vec![ClassLabel::from("SPAM"), ClassLabel::from("ham")];
        assert_eq!(
            ClassIndices::resolve(&reversed, None).unwrap(),
            ClassIndices { spam: 0, ham: 1 }
        );
    }

    #[test]
    fn test_resolve_encoded_classes() {
        let encoder = LabelEncoder::new(["spam", "ham"]);
        let classes = vec![ClassLabel::Index(0), ClassLabel::Index(1)];
        assert_eq!(
            ClassIndices::resolve(&classes, Some(&encoder)).unwrap(),
            ClassIndices { spam: 0, ham: 1 }
        );
    }

    #[test]
    fn test_resolve_defaults_without_labels() {
        let classes = vec![ClassLabel::Index(0), ClassLabel::Index(1)];
        assert_eq!(ClassIndices::resolve(&classes, None).unwrap(), ClassIndices::default());
        assert_eq!(ClassIndices::resolve(&[], None).unwrap(), ClassIndices::default());
    }

    #[test]
    fn test_resolve_single_known_label() {
        let classes = vec![ClassLabel::from("spam"), ClassLabel::from("legit")];
        assert_eq!(
            ClassIndices::resolve(&classes, None).unwrap(),
            ClassIndices { spam: 0, ham: 1 }
        );
    }

    #[test]
    fn test_resolve_rejects_non_binary() {
        let classes = vec![
            ClassLabel::from("ham"),
            ClassLabel::from("spam"),
            ClassLabel::from("promo"),
        ];
        assert!(ClassIndices::resolve(&classes, None).is_err());
    }

    #[test]
    fn test_resolve_rejects_duplicate_labels() {
        let classes = vec![ClassLabel::from("spam"), ClassLabel::from("spam")];
        assert!(ClassIndices::resolve(&classes, None).is_err());
    }

    #[test]
    fn test_class_label_deserializes_untagged() {
        let classes: Vec<ClassLabel> = serde_json::from_str(r#"[0, "spam"]"#).unwrap();
        assert_eq!(classes, vec![ClassLabel::Index(0), ClassLabel::from("spam")]);
    }
}
