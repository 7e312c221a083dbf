use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::synth::random::SeededRandom;
use crate::synth::types::{Account, LaunderingPattern, Transaction};

use super::types::{SuspiciousActivityReport, UNKNOWN_PATTERN};

const UNKNOWN_ACCOUNT_NAME: &str = "Unknown Account";

// Fallback risk for accounts without a precomputed score: [0.5, 1.0)
const FALLBACK_RISK_LOW: f64 = 0.5;
const FALLBACK_RISK_HIGH: f64 = 1.0;

/// Build one SAR per account with at least one laundering-flagged transaction.
///
/// Reports are numbered `SAR1..` in order of each account's first flagged
/// transaction in the batch. Accounts missing from `risk_scores` get a risk
/// drawn from `rng`, so the result stays reproducible under a fixed seed.
pub fn build_sars(
    transactions: &[Transaction],
    accounts: &[Account],
    risk_scores: &HashMap<String, f64>,
    rng: &mut SeededRandom,
    as_of: DateTime<Utc>,
) -> Vec<SuspiciousActivityReport> {
    // Group flagged transactions by account, preserving first-seen order
    let mut order: Vec<&str> = Vec::new();
    let mut by_account: HashMap<&str, Vec<&Transaction>> = HashMap::new();
    for tx in transactions.iter().filter(|tx| tx.is_laundering) {
        let group = by_account.entry(tx.account_id.as_str()).or_insert_with(|| {
            order.push(tx.account_id.as_str());
            Vec::new()
        });
        group.push(tx);
    }

    let names: HashMap<&str, &str> = accounts
        .iter()
        .map(|a| (a.id.as_str(), a.name.as_str()))
        .collect();

    let mut sars = Vec::with_capacity(order.len());
    for (i, account_id) in order.into_iter().enumerate() {
        let flagged = &by_account[account_id];

        let risk_score = match risk_scores.get(account_id) {
            Some(&score) => score,
            None => rng.range_f64(FALLBACK_RISK_LOW, FALLBACK_RISK_HIGH),
        };

        let pattern = dominant_pattern(flagged);
        let pattern_label = pattern
            .map(|p| p.as_str())
            .unwrap_or(UNKNOWN_PATTERN);

        let oldest = flagged
            .iter()
            .map(|tx| tx.timestamp)
            .min()
            .unwrap_or(as_of);

        let description = format!(
            "Suspicious {} pattern detected: {} flagged transactions over {}.",
            pattern_label,
            flagged.len(),
            format_distance(oldest, as_of)
        );

        sars.push(SuspiciousActivityReport {
            id: format!("SAR{}", i + 1),
            account_id: account_id.to_string(),
            account_name: names
                .get(account_id)
                .copied()
                .unwrap_or(UNKNOWN_ACCOUNT_NAME)
                .to_string(),
            risk_score,
            flagged_transactions: flagged.len(),
            date_generated: as_of,
            dominant_pattern: pattern,
            description,
        });
    }

    tracing::debug!(reports = sars.len(), "Built suspicious activity reports");
    sars
}

/// Most frequent pattern label among `transactions`.
///
/// Ties go to the earlier entry of Smurfing, Layering, Large Amount. `None`
/// when no transaction carries a label.
pub fn dominant_pattern(transactions: &[&Transaction]) -> Option<LaunderingPattern> {
    let mut best: Option<(LaunderingPattern, usize)> = None;
    for pattern in LaunderingPattern::PRIORITY {
        let count = transactions
            .iter()
            .filter(|tx| tx.laundering_type == Some(pattern))
            .count();
        if count == 0 {
            continue;
        }
        match best {
            Some((_, best_count)) if best_count >= count => {}
            _ => best = Some((pattern, count)),
        }
    }
    best.map(|(pattern, _)| pattern)
}

const MINUTES_IN_HOUR: i64 = 60;
const MINUTES_IN_DAY: i64 = 1440;
const MINUTES_IN_ALMOST_TWO_DAYS: i64 = 2520;
const MINUTES_IN_MONTH: i64 = 43200;
const MINUTES_IN_TWO_MONTHS: i64 = 86400;
const MINUTES_IN_YEAR: i64 = 525_600;

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}

/// Integer division rounded half up, for non-negative values.
fn round_div(value: i64, divisor: i64) -> i64 {
    (value * 2 + divisor) / (divisor * 2)
}

/// Human-readable span between two instants, e.g. "about 3 hours" or "4 days".
pub fn format_distance(from: DateTime<Utc>, to: DateTime<Utc>) -> String {
    let seconds = (to - from).num_seconds().max(0);
    let minutes = round_div(seconds, 60);

    if minutes == 0 {
        "less than a minute".to_string()
    } else if minutes < 45 {
        plural(minutes, "minute")
    } else if minutes < 90 {
        "about 1 hour".to_string()
    } else if minutes < MINUTES_IN_DAY {
        format!("about {}", plural(round_div(minutes, MINUTES_IN_HOUR), "hour"))
    } else if minutes < MINUTES_IN_ALMOST_TWO_DAYS {
        "1 day".to_string()
    } else if minutes < MINUTES_IN_MONTH {
        plural(round_div(minutes, MINUTES_IN_DAY), "day")
    } else if minutes < MINUTES_IN_TWO_MONTHS {
        format!("about {}", plural(round_div(minutes, MINUTES_IN_MONTH), "month"))
    } else if minutes < MINUTES_IN_YEAR {
        plural(round_div(minutes, MINUTES_IN_MONTH), "month")
    } else {
        format!("about {}", plural(minutes / MINUTES_IN_YEAR, "year"))
    }
}
