use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::synth::types::Transaction;

/// Named demo scorers shown in the model comparison.
///
/// These read the ground-truth laundering flag they are supposed to predict.
/// They only exist to give each named variant a distinct, plausible metric
/// profile and are not trained models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemoModel {
    RandomForest,
    XGBoost,
    #[serde(rename = "SVM")]
    Svm,
    HuggingFace,
}

/// Per-model constants for the demo score.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ScoreProfile {
    amount_cutoff: f64,
    low_base: f64,
    high_base: f64,
    transfer_bonus: f64,
    laundering_scale: f64,
    clean_scale: f64,
}

// Fallback for names outside the catalog
const UNKNOWN_LAUNDERING_SCORE: f64 = 0.7;
const UNKNOWN_CLEAN_SCORE: f64 = 0.3;

impl DemoModel {
    pub const ALL: [DemoModel; 4] = [
        Self::RandomForest,
        Self::XGBoost,
        Self::Svm,
        Self::HuggingFace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RandomForest => "RandomForest",
            Self::XGBoost => "XGBoost",
            Self::Svm => "SVM",
            Self::HuggingFace => "HuggingFace",
        }
    }

    fn profile(&self) -> ScoreProfile {
        match self {
            Self::RandomForest => ScoreProfile {
                amount_cutoff: 1000.0,
                low_base: 0.3,
                high_base: 0.7,
                transfer_bonus: 0.2,
                laundering_scale: 1.5,
                clean_scale: 0.6,
            },
            Self::XGBoost => ScoreProfile {
                amount_cutoff: 1500.0,
                low_base: 0.25,
                high_base: 0.75,
                transfer_bonus: 0.25,
                laundering_scale: 1.6,
                clean_scale: 0.5,
            },
            Self::Svm => ScoreProfile {
                amount_cutoff: 800.0,
                low_base: 0.4,
                high_base: 0.6,
                transfer_bonus: 0.15,
                laundering_scale: 1.4,
                clean_scale: 0.7,
            },
            Self::HuggingFace => ScoreProfile {
                amount_cutoff: 1200.0,
                low_base: 0.2,
                high_base: 0.8,
                transfer_bonus: 0.15,
                laundering_scale: 1.7,
                clean_scale: 0.4,
            },
        }
    }

    /// Demo risk score in [0, 1].
    pub fn score(&self, transaction: &Transaction) -> f64 {
        let p = self.profile();
        let mut base = if transaction.amount > p.amount_cutoff {
            p.high_base
        } else {
            p.low_base
        };
        if transaction.is_transfer() {
            base += p.transfer_bonus;
        }
        let scale = if transaction.is_laundering {
            p.laundering_scale
        } else {
            p.clean_scale
        };
        (base * scale).clamp(0.0, 1.0)
    }
}

impl fmt::Display for DemoModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown model '{0}'")]
pub struct UnknownModel(pub String);

impl FromStr for DemoModel {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DemoModel::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownModel(s.to_string()))
    }
}

/// Score a transaction with a model looked up by name.
/// Names outside the catalog get a score that depends only on the label.
pub fn score_model(transaction: &Transaction, model_name: &str) -> f64 {
    match model_name.parse::<DemoModel>() {
        Ok(model) => model.score(transaction),
        Err(_) => {
            if transaction.is_laundering {
                UNKNOWN_LAUNDERING_SCORE
            } else {
                UNKNOWN_CLEAN_SCORE
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::types::{MerchantType, Purpose};
    use approx::assert_abs_diff_eq;
    use chrono::Utc;

    fn tx(merchant_type: MerchantType, amount: f64, is_laundering: bool) -> Transaction {
        Transaction {
            id: "TX1".to_string(),
            amount,
            timestamp: Utc::now(),
            merchant_type,
            account_id: "A1000".to_string(),
            source: "Account 1000".to_string(),
            destination: "Account 1001".to_string(),
            purpose: Purpose::Other,
            is_laundering,
            laundering_type: None,
        }
    }

    #[test]
    fn test_xgboost_constants() {
        // (0.75 + 0.25) * 1.6 clamps to 1
        assert_abs_diff_eq!(
            score_model(&tx(MerchantType::Transfer, 2000.0, true), "XGBoost"),
            1.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            score_model(&tx(MerchantType::Retail, 100.0, false), "XGBoost"),
            0.125,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            score_model(&tx(MerchantType::Transfer, 100.0, false), "XGBoost"),
            0.25,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_random_forest_and_svm() {
        assert_abs_diff_eq!(
            DemoModel::RandomForest.score(&tx(MerchantType::Retail, 1200.0, false)),
            0.42,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            DemoModel::Svm.score(&tx(MerchantType::Retail, 500.0, true)),
            0.56,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            DemoModel::HuggingFace.score(&tx(MerchantType::Retail, 500.0, false)),
            0.08,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_unknown_model_uses_label_only() {
        assert_abs_diff_eq!(
            score_model(&tx(MerchantType::Transfer, 9000.0, true), "Perceptron"),
            0.7,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            score_model(&tx(MerchantType::Transfer, 9000.0, false), "Perceptron"),
            0.3,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_scores_monotonic_and_bounded() {
        for model in DemoModel::ALL {
            for merchant in [MerchantType::Retail, MerchantType::Transfer] {
                let small_clean = model.score(&tx(merchant, 10.0, false));
                let large_clean = model.score(&tx(merchant, 5000.0, false));
                let small_dirty = model.score(&tx(merchant, 10.0, true));
                let large_dirty = model.score(&tx(merchant, 5000.0, true));
                assert!(large_clean >= small_clean);
                assert!(large_dirty >= small_dirty);
                assert!(small_dirty >= small_clean);
                assert!(large_dirty >= large_clean);
                for s in [small_clean, large_clean, small_dirty, large_dirty] {
                    assert!((0.0..=1.0).contains(&s));
                }
            }
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("SVM".parse::<DemoModel>(), Ok(DemoModel::Svm));
        assert_eq!("XGBoost".parse::<DemoModel>(), Ok(DemoModel::XGBoost));
        assert!("xgboost".parse::<DemoModel>().is_err());
        for model in DemoModel::ALL {
            assert_eq!(model.to_string().parse::<DemoModel>(), Ok(model));
        }
    }
}
