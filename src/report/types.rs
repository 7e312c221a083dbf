use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::synth::types::LaunderingPattern;

/// Label used when no flagged transaction carries a pattern.
pub const UNKNOWN_PATTERN: &str = "Unknown";

/// Synthetic Suspicious Activity Report, one per implicated account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuspiciousActivityReport {
    pub id: String,
    pub account_id: String,
    pub account_name: String,
    pub risk_score: f64,
    pub flagged_transactions: usize,
    pub date_generated: DateTime<Utc>,
    pub dominant_pattern: Option<LaunderingPattern>,
    pub description: String,
}

impl SuspiciousActivityReport {
    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score)
    }

    pub fn pattern_label(&self) -> &'static str {
        self.dominant_pattern
            .map(|p| p.as_str())
            .unwrap_or(UNKNOWN_PATTERN)
    }
}

/// Risk band for a score in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const HIGH_THRESHOLD: f64 = 0.8;
    pub const MEDIUM_THRESHOLD: f64 = 0.6;

    pub fn from_score(score: f64) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            Self::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
