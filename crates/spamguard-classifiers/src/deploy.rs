//! Copy trained artifacts from a training output directory into the serving directory

use crate::config::ArtifactConfig;
use spamguard_core::{Error, Result};
use std::path::Path;
use tracing::{info, warn};

/// Outcome of a deployment run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployReport {
    /// Copied file names with their size in bytes
    pub copied: Vec<(String, u64)>,

    /// File names absent from the source directory
    pub missing: Vec<String>,
}

impl DeployReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.copied.iter().map(|(_, size)| size).sum()
    }
}

/// Copy every artifact named by `config` from `source` into `config.models_dir`
///
/// Missing source files are reported, not treated as errors; the serving side
/// decides at load time whether what arrived is enough.
pub fn deploy_artifacts(source: &Path, config: &ArtifactConfig) -> Result<DeployReport> {
    if !source.is_dir() {
        return Err(Error::config(format!(
            "source directory {} does not exist",
            source.display()
        )));
    }
    let target = config.models_dir();
    std::fs::create_dir_all(target)?;

    info!("Deploying artifacts from {:?} to {:?}", source, target);

    let mut report = DeployReport::default();
    for name in config.file_names() {
        let from = source.join(name);
        if !from.is_file() {
            warn!("Artifact not found: {}", name);
            report.missing.push(name.to_string());
            continue;
        }

        let size = std::fs::copy(&from, target.join(name))?;
        info!("Copied {} ({} bytes)", name, size);
        report.copied.push((name.to_string(), size));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_METADATA_FILE, DEFAULT_MODEL_FILE, DEFAULT_VECTORIZER_FILE};

    #[test]
    fn test_deploy_copies_present_and_reports_missing() {
        let source = tempfile::tempdir().unwrap();
        let serving = tempfile::tempdir().unwrap();
        std::fs::write(source.path().join(DEFAULT_MODEL_FILE), "{}").unwrap();
        std::fs::write(source.path().join(DEFAULT_VECTORIZER_FILE), "{\"a\":1}").unwrap();
        std::fs::write(source.path().join(DEFAULT_METADATA_FILE), "{}").unwrap();

        let config = ArtifactConfig::in_dir(serving.path().join("models"));
        let report = deploy_artifacts(source.path(), &config).unwrap();

        assert_eq!(report.copied.len(), 3);
        assert_eq!(report.missing, vec!["label_encoder.json".to_string()]);
        assert!(!report.is_complete());
        assert_eq!(report.total_bytes(), 2 + 7 + 2);
        assert!(config.model_path().exists());
    }

    #[test]
    fn test_deploy_missing_source_dir() {
        let serving = tempfile::tempdir().unwrap();
        let config = ArtifactConfig::in_dir(serving.path());
        let err = deploy_artifacts(Path::new("/nonexistent/training/output"), &config).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
