use crate::synth::types::Transaction;

/// Transfers above this are flagged as large-transfer activity.
pub const LARGE_TRANSFER_THRESHOLD: f64 = 1000.0;

/// Transfers below this are flagged as possible structuring.
pub const STRUCTURING_THRESHOLD: f64 = 50.0;

/// Rule-based detector: flags unusually large or unusually small transfers.
pub fn check_rule_based(transaction: &Transaction) -> bool {
    if !transaction.is_transfer() {
        return false;
    }
    transaction.amount > LARGE_TRANSFER_THRESHOLD || transaction.amount < STRUCTURING_THRESHOLD
}

/// Rule-based detector expressed as a score so it can share the metrics path.
pub fn rule_based_score(transaction: &Transaction) -> f64 {
    if check_rule_based(transaction) {
        1.0
    } else {
        0.0
    }
}
