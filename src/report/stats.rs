use serde::{Deserialize, Serialize};

use crate::synth::types::Transaction;

use super::types::{RiskLevel, SuspiciousActivityReport};

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_transactions: usize,
    pub flagged_transactions: usize,
    pub flagged_percent: f64,
    pub average_risk_score: f64,
    pub high_risk_accounts: usize,
}

impl DashboardStats {
    pub fn compute(transactions: &[Transaction], sars: &[SuspiciousActivityReport]) -> Self {
        let total_transactions = transactions.len();
        let flagged_transactions = transactions.iter().filter(|tx| tx.is_laundering).count();
        let flagged_percent = if total_transactions > 0 {
            flagged_transactions as f64 / total_transactions as f64 * 100.0
        } else {
            0.0
        };

        let average_risk_score = if sars.is_empty() {
            0.0
        } else {
            sars.iter().map(|s| s.risk_score).sum::<f64>() / sars.len() as f64
        };

        let high_risk_accounts = sars
            .iter()
            .filter(|s| s.risk_level() == RiskLevel::High)
            .count();

        Self {
            total_transactions,
            flagged_transactions,
            flagged_percent,
            average_risk_score,
            high_risk_accounts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    All,
    Suspicious,
    Normal,
}

/// Status filter plus case-insensitive search over id, account and merchant type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(default)]
    pub status: TransactionStatus,
    pub search: Option<String>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        let status_ok = match self.status {
            TransactionStatus::All => true,
            TransactionStatus::Suspicious => tx.is_laundering,
            TransactionStatus::Normal => !tx.is_laundering,
        };
        if !status_ok {
            return false;
        }

        match search_term(&self.search) {
            Some(term) => [tx.id.as_str(), tx.account_id.as_str(), tx.merchant_type.as_str()]
                .iter()
                .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|tx| self.matches(tx)).collect()
    }
}

/// Risk band filter plus case-insensitive search over account and description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SarFilter {
    /// `None` keeps every band.
    pub risk_level: Option<RiskLevel>,
    pub search: Option<String>,
}

impl SarFilter {
    pub fn matches(&self, sar: &SuspiciousActivityReport) -> bool {
        if let Some(level) = self.risk_level {
            if sar.risk_level() != level {
                return false;
            }
        }

        match search_term(&self.search) {
            Some(term) => [
                sar.account_id.as_str(),
                sar.account_name.as_str(),
                sar.description.as_str(),
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term)),
            None => true,
        }
    }

    pub fn apply<'a>(
        &self,
        sars: &'a [SuspiciousActivityReport],
    ) -> Vec<&'a SuspiciousActivityReport> {
        sars.iter().filter(|sar| self.matches(sar)).collect()
    }
}

fn search_term(search: &Option<String>) -> Option<String> {
    search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}
