use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::synth::types::{Account, Transaction};

use super::models::DemoModel;

/// Per-account row for the accounts view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: String,
    pub name: String,
    pub balance: Option<f64>,
    pub risk_score: f64,
    pub transaction_count: usize,
}

/// Mean model score per originating account. Accounts with no transactions are absent.
pub fn account_risk_scores(
    transactions: &[Transaction],
    accounts: &[Account],
    model: DemoModel,
) -> HashMap<String, f64> {
    let mut totals: HashMap<&str, (f64, usize)> = HashMap::new();
    for tx in transactions {
        let entry = totals.entry(tx.account_id.as_str()).or_default();
        entry.0 += model.score(tx);
        entry.1 += 1;
    }

    accounts
        .iter()
        .filter_map(|account| {
            totals
                .get(account.id.as_str())
                .map(|&(sum, n)| (account.id.clone(), sum / n as f64))
        })
        .collect()
}

/// Summaries for every account in roster order; accounts without activity score 0.
pub fn account_summaries(
    transactions: &[Transaction],
    accounts: &[Account],
    model: DemoModel,
) -> Vec<AccountSummary> {
    let scores = account_risk_scores(transactions, accounts, model);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tx in transactions {
        *counts.entry(tx.account_id.as_str()).or_default() += 1;
    }

    accounts
        .iter()
        .map(|account| AccountSummary {
            id: account.id.clone(),
            name: account.name.clone(),
            balance: account.balance,
            risk_score: scores.get(&account.id).copied().unwrap_or(0.0),
            transaction_count: counts.get(account.id.as_str()).copied().unwrap_or(0),
        })
        .collect()
}
