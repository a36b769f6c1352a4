//! Training metadata written alongside the model artifacts

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form metadata mapping with typed accessors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelMetadata(Map<String, Value>);

impl ModelMetadata {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Integer value; whole floats such as `5572.0` are accepted
    pub fn get_u64(&self, key: &str) -> Option<u64> {
        let value = self.get(key)?;
        value.as_u64().or_else(|| {
            value
                .as_f64()
                .filter(|f| *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        })
    }

    /// Value rendered as text, used for dates stored as strings or numbers
    pub fn get_text(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl From<Map<String, Value>> for ModelMetadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata(value: Value) -> ModelMetadata {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_typed_accessors() {
        let meta = metadata(json!({
            "model_type": "LinearSVC",
            "training_samples": 4457.0,
            "cv_f1_mean": 0.93,
            "trained_date": "2025-01-06",
            "optimization_recall": null
        }));
        assert_eq!(meta.get_str("model_type"), Some("LinearSVC"));
        assert_eq!(meta.get_u64("training_samples"), Some(4457));
        assert_eq!(meta.get_f64("cv_f1_mean"), Some(0.93));
        assert_eq!(meta.get_text("trained_date").as_deref(), Some("2025-01-06"));
        assert_eq!(meta.get_f64("optimization_recall"), None);
        assert_eq!(meta.len(), 5);
    }

    #[test]
    fn test_fractional_sample_count_rejected() {
        let meta = metadata(json!({ "training_samples": 10.5 }));
        assert_eq!(meta.get_u64("training_samples"), None);
    }
}
