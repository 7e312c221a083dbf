use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};
use crate::synth::types::Transaction;

use super::models::DemoModel;
use super::rules::rule_based_score;

/// Label used for the rule-based detector in comparisons.
pub const RULE_BASED_NAME: &str = "Rule-Based";

/// Classification metrics at one decision threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub false_positive_rate: f64,
}

/// 2x2 confusion matrix tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfusionMatrix {
    pub true_positives: u64,
    pub false_positives: u64,
    pub true_negatives: u64,
    pub false_negatives: u64,
}

impl ConfusionMatrix {
    pub fn tally(predictions: &[f64], actuals: &[bool], threshold: f64) -> Self {
        let mut m = Self::default();
        for (&score, &actual) in predictions.iter().zip(actuals) {
            match (score >= threshold, actual) {
                (true, true) => m.true_positives += 1,
                (true, false) => m.false_positives += 1,
                (false, false) => m.true_negatives += 1,
                (false, true) => m.false_negatives += 1,
            }
        }
        m
    }

    pub fn total(&self) -> u64 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    pub fn metrics(&self) -> ModelMetrics {
        let tp = self.true_positives as f64;
        let fp = self.false_positives as f64;
        let tn = self.true_negatives as f64;
        let fn_ = self.false_negatives as f64;

        let accuracy = ratio(tp + tn, self.total() as f64);
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1_score = ratio(2.0 * precision * recall, precision + recall);
        let false_positive_rate = ratio(fp, fp + tn);

        ModelMetrics {
            accuracy,
            precision,
            recall,
            f1_score,
            false_positive_rate,
        }
    }
}

/// Division with 0 for a zero denominator.
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Compute metrics for each threshold, in threshold order.
///
/// Empty inputs yield all-zero metrics. Predictions and actuals of different
/// lengths are rejected.
pub fn compute_metrics(
    predictions: &[f64],
    thresholds: &[f64],
    actuals: &[bool],
) -> Result<Vec<ModelMetrics>> {
    if predictions.len() != actuals.len() {
        return Err(SimulationError::ShapeMismatch {
            predictions: predictions.len(),
            actuals: actuals.len(),
        });
    }
    if actuals.is_empty() {
        tracing::debug!("Computing metrics over an empty sample, all values default to 0");
    }

    Ok(thresholds
        .iter()
        .map(|&threshold| ConfusionMatrix::tally(predictions, actuals, threshold).metrics())
        .collect())
}

/// Metrics for one named detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub model: String,
    pub metrics: ModelMetrics,
}

/// Metrics for a detector at one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMetrics {
    pub threshold: f64,
    pub metrics: ModelMetrics,
}

fn actual_labels(transactions: &[Transaction]) -> Vec<bool> {
    transactions.iter().map(|tx| tx.is_laundering).collect()
}

/// Compare every demo model plus the rule-based detector at one threshold.
pub fn compare_models(
    transactions: &[Transaction],
    threshold: f64,
) -> Result<Vec<ModelComparison>> {
    let actuals = actual_labels(transactions);
    let mut results = Vec::with_capacity(DemoModel::ALL.len() + 1);

    for model in DemoModel::ALL {
        let predictions: Vec<f64> = transactions.iter().map(|tx| model.score(tx)).collect();
        let metrics = compute_metrics(&predictions, &[threshold], &actuals)?;
        results.push(ModelComparison {
            model: model.to_string(),
            metrics: metrics.into_iter().next().unwrap_or_default(),
        });
    }

    let rule_predictions: Vec<f64> = transactions.iter().map(rule_based_score).collect();
    let metrics = compute_metrics(&rule_predictions, &[threshold], &actuals)?;
    results.push(ModelComparison {
        model: RULE_BASED_NAME.to_string(),
        metrics: metrics.into_iter().next().unwrap_or_default(),
    });

    Ok(results)
}

/// Metrics for one model across several thresholds.
pub fn threshold_sweep(
    transactions: &[Transaction],
    model: DemoModel,
    thresholds: &[f64],
) -> Result<Vec<ThresholdMetrics>> {
    let actuals = actual_labels(transactions);
    let predictions: Vec<f64> = transactions.iter().map(|tx| model.score(tx)).collect();
    let metrics = compute_metrics(&predictions, thresholds, &actuals)?;

    Ok(thresholds
        .iter()
        .zip(metrics)
        .map(|(&threshold, metrics)| ThresholdMetrics { threshold, metrics })
        .collect())
}
