use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::synth::types::Transaction;

/// One feature's signed contribution to a transaction's risk, for display.
///
/// Values come from fixed threshold rules, not from an attribution method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapValue {
    pub feature: String,
    pub value: f64,
}

impl ShapValue {
    fn new(feature: &str, value: f64) -> Self {
        Self {
            feature: feature.to_string(),
            value,
        }
    }
}

const LARGE_AMOUNT_CUTOFF: f64 = 1000.0;

/// Five feature contributions, largest magnitude first.
pub fn explain(transaction: &Transaction) -> Vec<ShapValue> {
    let hour = transaction.timestamp.hour();
    let off_hours = hour > 18 || hour < 6;

    let mut values = vec![
        ShapValue::new(
            "Amount",
            if transaction.amount > LARGE_AMOUNT_CUTOFF { 0.4 } else { -0.2 },
        ),
        ShapValue::new(
            "Merchant Type",
            if transaction.is_transfer() { 0.3 } else { -0.1 },
        ),
        ShapValue::new("Time of Day", if off_hours { 0.2 } else { -0.1 }),
        ShapValue::new(
            "Transaction Frequency",
            if transaction.is_laundering { 0.3 } else { -0.15 },
        ),
        ShapValue::new(
            "Account History",
            if transaction.is_laundering { 0.25 } else { -0.15 },
        ),
    ];

    // Stable, so equal magnitudes keep the order above
    values.sort_by(|a, b| b.value.abs().total_cmp(&a.value.abs()));
    values
}
