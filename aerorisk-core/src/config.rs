//! Configuration file support
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.aeroriskrc.json` in the working directory
//! 3. `aerorisk.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file
//! values.

use crate::demographics::CvpMode;
use crate::risk::RiskThresholds;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names probed in order when no explicit path is given.
const CONFIG_FILENAMES: &[&str] = &[".aeroriskrc.json", "aerorisk.config.json"];

/// Reference year of the historical annual means shipped with the
/// default dataset.
pub const DEFAULT_REFERENCE_YEAR: &str = "2019";

/// Aerorisk configuration loaded from a JSON config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AeroriskConfig {
    /// Custom risk tier thresholds on the weighted hazard.
    #[serde(default)]
    pub thresholds: Option<ThresholdConfig>,

    /// Which CVP indicator to compute (default: ratio_to_total).
    #[serde(default)]
    pub cvp_mode: Option<CvpMode>,

    /// Label of the reference year backing historical fallbacks.
    #[serde(default)]
    pub reference_year: Option<String>,

    /// Minimum risk tier to report (default: report all).
    #[serde(default)]
    pub min_tier: Option<u8>,

    /// Maximum number of results to show.
    #[serde(default)]
    pub top: Option<usize>,
}

/// Custom risk tier thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Weighted hazard for the medium tier (default: 30.0).
    pub medium: Option<f64>,
    /// Weighted hazard for the high tier (default: 40.0).
    pub high: Option<f64>,
}

impl AeroriskConfig {
    /// Validate the configuration for logical errors.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref t) = self.thresholds {
            let medium = t.medium.unwrap_or(30.0);
            let high = t.high.unwrap_or(40.0);

            if medium <= 0.0 {
                anyhow::bail!("thresholds.medium must be positive (got {})", medium);
            }
            if high <= 0.0 {
                anyhow::bail!("thresholds.high must be positive (got {})", high);
            }
            if medium >= high {
                anyhow::bail!(
                    "thresholds.medium ({}) must be less than thresholds.high ({})",
                    medium,
                    high
                );
            }
        }

        if let Some(tier) = self.min_tier {
            if tier > 3 {
                anyhow::bail!("min_tier must be between 0 and 3 (got {})", tier);
            }
        }

        if let Some(ref year) = self.reference_year {
            if year.is_empty() {
                anyhow::bail!("reference_year must not be empty");
            }
        }

        Ok(())
    }
}

/// Resolved configuration with defaults filled in.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub thresholds: RiskThresholds,
    pub cvp_mode: CvpMode,
    pub reference_year: String,
    pub min_tier: Option<u8>,
    pub top: Option<usize>,
    /// Path the config was loaded from (None if defaults).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(AeroriskConfig::default(), None)
    }
}

/// Merge a validated config with defaults.
pub fn resolve(config: AeroriskConfig, config_path: Option<PathBuf>) -> ResolvedConfig {
    let defaults = RiskThresholds::default();
    let thresholds = match &config.thresholds {
        Some(t) => RiskThresholds {
            medium: t.medium.unwrap_or(defaults.medium),
            high: t.high.unwrap_or(defaults.high),
        },
        None => defaults,
    };
    ResolvedConfig {
        thresholds,
        cvp_mode: config.cvp_mode.unwrap_or_default(),
        reference_year: config
            .reference_year
            .unwrap_or_else(|| DEFAULT_REFERENCE_YEAR.to_string()),
        min_tier: config.min_tier,
        top: config.top,
        config_path,
    }
}

/// Read and validate a config file.
pub fn load_file(path: &Path) -> Result<AeroriskConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config: AeroriskConfig = serde_json::from_str(&json)
        .with_context(|| format!("invalid config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config file: {}", path.display()))?;
    Ok(config)
}

/// Load configuration: the explicit path if given, else the first
/// auto-discovered config file under `root`, else defaults.
pub fn load_and_resolve(root: &Path, explicit: Option<&Path>) -> Result<ResolvedConfig> {
    if let Some(path) = explicit {
        let config = load_file(path)?;
        return Ok(resolve(config, Some(path.to_path_buf())));
    }

    for filename in CONFIG_FILENAMES {
        let candidate = root.join(filename);
        if candidate.is_file() {
            let config = load_file(&candidate)?;
            return Ok(resolve(config, Some(candidate)));
        }
    }

    Ok(ResolvedConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_defaults() {
        let resolved = ResolvedConfig::default();
        assert_eq!(resolved.thresholds.medium, 30.0);
        assert_eq!(resolved.thresholds.high, 40.0);
        assert_eq!(resolved.cvp_mode, CvpMode::RatioToTotal);
        assert_eq!(resolved.reference_year, "2019");
        assert!(resolved.config_path.is_none());
    }

    #[test]
    fn test_partial_thresholds_keep_defaults() {
        let config: AeroriskConfig =
            serde_json::from_str(r#"{"thresholds": {"medium": 25.0}}"#).unwrap();
        config.validate().unwrap();
        let resolved = resolve(config, None);
        assert_eq!(resolved.thresholds.medium, 25.0);
        assert_eq!(resolved.thresholds.high, 40.0);
    }

    #[test]
    fn test_validate_rejects_unordered_thresholds() {
        let config: AeroriskConfig =
            serde_json::from_str(r#"{"thresholds": {"medium": 50.0, "high": 40.0}}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_min_tier() {
        let config: AeroriskConfig = serde_json::from_str(r#"{"min_tier": 7}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: Result<AeroriskConfig, _> = serde_json::from_str(r#"{"treshold": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_and_resolve_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"cvp_mode": "ratio_to_youth", "reference_year": "2020"}"#)
            .unwrap();

        let resolved = load_and_resolve(Path::new("."), Some(file.path())).unwrap();
        assert_eq!(resolved.cvp_mode, CvpMode::RatioToYouth);
        assert_eq!(resolved.reference_year, "2020");
        assert_eq!(resolved.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_auto_discovery() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".aeroriskrc.json"),
            r#"{"thresholds": {"medium": 20.0, "high": 35.0}, "top": 5}"#,
        )
        .unwrap();

        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert_eq!(resolved.thresholds.medium, 20.0);
        assert_eq!(resolved.thresholds.high, 35.0);
        assert_eq!(resolved.top, Some(5));
    }

    #[test]
    fn test_missing_explicit_file_errors() {
        let result = load_and_resolve(Path::new("."), Some(Path::new("/nonexistent.json")));
        assert!(result.is_err());
    }
}
