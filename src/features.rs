use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use crate::synth::types::{MerchantType, Transaction};

/// Model input features derived from one transaction.
///
/// Time features use the UTC clock. `day_of_week` counts from Sunday = 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFeatures {
    pub amount: f64,
    pub amount_log: f64,
    pub hour: u32,
    pub day_of_week: u32,
    pub weekend: bool,
    pub is_merchant_transfer: bool,
    pub is_merchant_salary: bool,
    pub is_merchant_atm: bool,
    pub is_laundering: bool,
}

impl TransactionFeatures {
    pub const LEN: usize = 8;

    pub fn from_transaction(tx: &Transaction) -> Self {
        let day_of_week = tx.timestamp.weekday().num_days_from_sunday();
        Self {
            amount: tx.amount,
            amount_log: tx.amount.ln_1p(),
            hour: tx.timestamp.hour(),
            day_of_week,
            weekend: day_of_week == 0 || day_of_week == 6,
            is_merchant_transfer: tx.merchant_type == MerchantType::Transfer,
            is_merchant_salary: tx.merchant_type == MerchantType::Salary,
            is_merchant_atm: tx.merchant_type == MerchantType::Atm,
            is_laundering: tx.is_laundering,
        }
    }

    /// Numeric input vector, flags as 0/1. The label is not included.
    pub fn to_vector(&self) -> [f64; Self::LEN] {
        [
            self.amount,
            self.amount_log,
            f64::from(self.hour),
            f64::from(self.day_of_week),
            flag(self.weekend),
            flag(self.is_merchant_transfer),
            flag(self.is_merchant_salary),
            flag(self.is_merchant_atm),
        ]
    }

    pub fn label(&self) -> f64 {
        flag(self.is_laundering)
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

/// Feature rows for a batch, in input order.
pub fn preprocess(transactions: &[Transaction]) -> Vec<TransactionFeatures> {
    transactions
        .iter()
        .map(TransactionFeatures::from_transaction)
        .collect()
}
