use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Amounts strictly above this are always treated as laundering.
pub const REPORTING_THRESHOLD: f64 = 8500.0;

/// Closed set of laundering pattern labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaunderingPattern {
    Smurfing,
    Layering,
    #[serde(rename = "Large Amount")]
    LargeAmount,
}

impl LaunderingPattern {
    /// Tie-break order used when picking a dominant pattern.
    pub const PRIORITY: [LaunderingPattern; 3] =
        [Self::Smurfing, Self::Layering, Self::LargeAmount];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smurfing => "Smurfing",
            Self::Layering => "Layering",
            Self::LargeAmount => "Large Amount",
        }
    }
}

impl fmt::Display for LaunderingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MerchantType {
    Retail,
    Grocery,
    Restaurant,
    Travel,
    Utility,
    Entertainment,
    Transfer,
    Salary,
    #[serde(rename = "ATM")]
    Atm,
    Online,
}

impl MerchantType {
    pub const ALL: [MerchantType; 10] = [
        Self::Retail,
        Self::Grocery,
        Self::Restaurant,
        Self::Travel,
        Self::Utility,
        Self::Entertainment,
        Self::Transfer,
        Self::Salary,
        Self::Atm,
        Self::Online,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Retail => "Retail",
            Self::Grocery => "Grocery",
            Self::Restaurant => "Restaurant",
            Self::Travel => "Travel",
            Self::Utility => "Utility",
            Self::Entertainment => "Entertainment",
            Self::Transfer => "Transfer",
            Self::Salary => "Salary",
            Self::Atm => "ATM",
            Self::Online => "Online",
        }
    }
}

impl fmt::Display for MerchantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    Purchase,
    #[serde(rename = "Bill Payment")]
    BillPayment,
    Salary,
    Investment,
    #[serde(rename = "Loan Payment")]
    LoanPayment,
    Rent,
    Gift,
    Services,
    Subscription,
    Other,
    /// Only used by structuring transfers, never drawn for normal activity.
    Transfer,
}

impl Purpose {
    /// Purposes drawn uniformly for normal transactions.
    pub const NORMAL: [Purpose; 10] = [
        Self::Purchase,
        Self::BillPayment,
        Self::Salary,
        Self::Investment,
        Self::LoanPayment,
        Self::Rent,
        Self::Gift,
        Self::Services,
        Self::Subscription,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Purchase => "Purchase",
            Self::BillPayment => "Bill Payment",
            Self::Salary => "Salary",
            Self::Investment => "Investment",
            Self::LoanPayment => "Loan Payment",
            Self::Rent => "Rent",
            Self::Gift => "Gift",
            Self::Services => "Services",
            Self::Subscription => "Subscription",
            Self::Other => "Other",
            Self::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A synthetic account from the account pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    pub balance: Option<f64>,
    pub risk_score: Option<f64>,
}

/// A synthetic transaction. `account_id` is the originating account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    pub merchant_type: MerchantType,
    pub account_id: String,
    pub source: String,
    pub destination: String,
    pub purpose: Purpose,
    pub is_laundering: bool,
    pub laundering_type: Option<LaunderingPattern>,
}

impl Transaction {
    pub fn is_transfer(&self) -> bool {
        self.merchant_type == MerchantType::Transfer
    }

    /// Apply the reporting-threshold rule. An existing pattern label is kept.
    pub fn flag_large_amount(&mut self) {
        if self.amount > REPORTING_THRESHOLD {
            self.is_laundering = true;
            self.laundering_type.get_or_insert(LaunderingPattern::LargeAmount);
        }
    }
}
