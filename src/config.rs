use chrono::Utc;
use serde::Deserialize;
use std::path::Path;

use crate::scoring::models::DemoModel;
use crate::synth::transactions::{GenerationParams, DEFAULT_ACCOUNT_COUNT};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

// ============================================================
// Generation Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    #[serde(default = "default_transaction_count")]
    pub transaction_count: usize,
    #[serde(default = "default_pattern_percent")]
    pub smurfing_percent: f64,
    #[serde(default = "default_pattern_percent")]
    pub layering_percent: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_account_count")]
    pub account_count: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            transaction_count: default_transaction_count(),
            smurfing_percent: default_pattern_percent(),
            layering_percent: default_pattern_percent(),
            seed: default_seed(),
            account_count: default_account_count(),
        }
    }
}

fn default_transaction_count() -> usize {
    2000
}

fn default_pattern_percent() -> f64 {
    0.1
}

fn default_seed() -> u64 {
    42
}

fn default_account_count() -> usize {
    DEFAULT_ACCOUNT_COUNT
}

impl GenerationConfig {
    /// Generation parameters anchored at the current time.
    pub fn params(&self) -> GenerationParams {
        GenerationParams::new(
            self.transaction_count,
            self.smurfing_percent,
            self.layering_percent,
            self.seed,
        )
        .with_account_count(self.account_count)
        .with_as_of(Utc::now())
    }
}

// ============================================================
// Scoring Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ScoringConfig {
    #[serde(default = "default_risk_model")]
    pub risk_model: String,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_threshold_sweep")]
    pub threshold_sweep: Vec<f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            risk_model: default_risk_model(),
            threshold: default_threshold(),
            threshold_sweep: default_threshold_sweep(),
        }
    }
}

fn default_risk_model() -> String {
    DemoModel::XGBoost.as_str().to_string()
}

fn default_threshold() -> f64 {
    0.5
}

fn default_threshold_sweep() -> Vec<f64> {
    vec![0.3, 0.5, 0.7, 0.9]
}

// ============================================================
// Export Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    #[serde(default = "default_sar_csv_path")]
    pub sar_csv_path: String,
    pub summary_json_path: Option<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sar_csv_path: default_sar_csv_path(),
            summary_json_path: None,
        }
    }
}

fn default_sar_csv_path() -> String {
    "suspicious_activity_report.csv".to_string()
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read config file '{}': {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> eyre::Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            tracing::info!(path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    fn validate(&self) -> eyre::Result<()> {
        let generation = &self.generation;
        if generation.transaction_count == 0 {
            return Err(eyre::eyre!("generation.transaction_count must be positive"));
        }
        for (name, value) in [
            ("smurfing_percent", generation.smurfing_percent),
            ("layering_percent", generation.layering_percent),
        ] {
            if !(0.0..=0.5).contains(&value) {
                return Err(eyre::eyre!(
                    "generation.{} must be in [0, 0.5], got {}",
                    name,
                    value
                ));
            }
        }
        if generation.account_count < 2 {
            return Err(eyre::eyre!(
                "generation.account_count must be at least 2, got {}",
                generation.account_count
            ));
        }

        self.scoring
            .risk_model
            .parse::<DemoModel>()
            .map_err(|e| eyre::eyre!("Invalid scoring.risk_model: {}", e))?;

        let thresholds =
            std::iter::once(&self.scoring.threshold).chain(&self.scoring.threshold_sweep);
        for &threshold in thresholds {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(eyre::eyre!("Threshold {} must be in [0, 1]", threshold));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml_str = r#"
[generation]
transaction_count = 500
smurfing_percent = 0.2
seed = 7

[scoring]
risk_model = "SVM"

[export]
sar_csv_path = "out/sars.csv"
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.generation.transaction_count, 500);
        assert_eq!(config.generation.smurfing_percent, 0.2);
        assert_eq!(config.generation.layering_percent, 0.1); // default
        assert_eq!(config.generation.account_count, 50); // default
        assert_eq!(config.generation.seed, 7);
        assert_eq!(config.scoring.risk_model, "SVM");
        assert_eq!(config.scoring.threshold, 0.5); // default
        assert_eq!(config.export.sar_csv_path, "out/sars.csv");
        assert!(config.export.summary_json_path.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        let params = config.generation.params();
        assert_eq!(params.count, 2000);
        assert_eq!(params.seed, 42);
        assert_eq!(params.account_count, 50);
    }

    #[test]
    fn test_validate_percent_out_of_range() {
        let mut config = Config::default();
        config.generation.layering_percent = 0.7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_model() {
        let mut config = Config::default();
        config.scoring.risk_model = "LogisticRegression".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_threshold() {
        let mut config = Config::default();
        config.scoring.threshold_sweep = vec![0.5, 1.5];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let config = Config::load_or_default(path.to_str().unwrap()).unwrap();
        assert_eq!(config.generation.transaction_count, 2000);
        assert!(Config::load(path.to_str().unwrap()).is_err());
    }
}
