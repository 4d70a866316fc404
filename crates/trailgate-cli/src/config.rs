//! # Gate Configuration
//!
//! Optional YAML file holding defaults for the `check` command, so a
//! pipeline can commit its gate settings next to its workflow:
//!
//! ```yaml
//! trail_file: trail.json
//! status_to_find: MISSING
//! format: github
//! ```
//!
//! Every key is optional. Values here are the lowest-precedence source:
//! command-line flags and environment inputs override them.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::report::OutputFormat;

/// Defaults loaded from `--config`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Trail document to scan.
    #[serde(default)]
    pub trail_file: Option<PathBuf>,

    /// Status token that fails the gate.
    #[serde(default)]
    pub status_to_find: Option<String>,

    /// Report format.
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl GateConfig {
    /// Load the configuration file, or the empty default when `path` is
    /// `None`.
    ///
    /// A relative `trail_file` is resolved against the config file's
    /// directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;

        if let Some(trail_file) = config.trail_file.take() {
            config.trail_file = Some(resolve_path(&trail_file, path.parent()));
        }

        tracing::debug!(path = %path.display(), ?config, "loaded gate configuration");
        Ok(config)
    }
}

/// Resolve `path` against `base` unless it is already absolute.
fn resolve_path(path: &Path, base: Option<&Path>) -> PathBuf {
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_gives_default() {
        assert_eq!(GateConfig::load(None).unwrap(), GateConfig::default());
    }

    #[test]
    fn loads_all_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trailgate.yaml");
        std::fs::write(
            &path,
            "trail_file: trail.json\nstatus_to_find: MISSING\nformat: json\n",
        )
        .unwrap();

        let config = GateConfig::load(Some(&path)).unwrap();
        assert_eq!(config.trail_file, Some(dir.path().join("trail.json")));
        assert_eq!(config.status_to_find.as_deref(), Some("MISSING"));
        assert_eq!(config.format, Some(OutputFormat::Json));
    }

    #[test]
    fn absolute_trail_file_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trailgate.yaml");
        std::fs::write(&path, "trail_file: /var/run/trail.json\n").unwrap();

        let config = GateConfig::load(Some(&path)).unwrap();
        assert_eq!(config.trail_file, Some(PathBuf::from("/var/run/trail.json")));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trailgate.yaml");
        std::fs::write(&path, "{}\n").unwrap();
        assert_eq!(GateConfig::load(Some(&path)).unwrap(), GateConfig::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trailgate.yaml");
        std::fs::write(&path, "status: MISSING\n").unwrap();

        let err = GateConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config file"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let err = GateConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err}").contains("failed to read config file"));
    }
}
