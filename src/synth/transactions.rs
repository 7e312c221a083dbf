use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

use super::accounts::generate_accounts;
use super::random::SeededRandom;
use super::types::{Account, LaunderingPattern, MerchantType, Purpose, Transaction};

const MINUTES_PER_DAY: u32 = 60 * 24;

const NORMAL_WINDOW_DAYS: u32 = 7;
const SMURFING_WINDOW_DAYS: u32 = 3;
const LAYERING_WINDOW_DAYS: u32 = 5;

// (low, width): amounts are drawn from [low, low + width)
const NORMAL_AMOUNT: (u32, u32) = (50, 500);
const SMURFING_AMOUNT: (u32, u32) = (5, 45);
const LAYERING_AMOUNT: (u32, u32) = (1000, 2000);

pub const DEFAULT_ACCOUNT_COUNT: usize = 50;

/// Default reference instant, 2024-01-01T00:00:00Z.
const REFERENCE_EPOCH_SECS: i64 = 1_704_067_200;

/// Fixed instant used as `as_of` unless the caller supplies one.
pub fn reference_as_of() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + Duration::seconds(REFERENCE_EPOCH_SECS)
}

/// Parameters for one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub count: usize,
    pub smurfing_percent: f64,
    pub layering_percent: f64,
    pub seed: u64,
    pub account_count: usize,
    /// Reference instant; every timestamp is this minus a whole number of minutes.
    pub as_of: DateTime<Utc>,
}

impl GenerationParams {
    pub fn new(count: usize, smurfing_percent: f64, layering_percent: f64, seed: u64) -> Self {
        Self {
            count,
            smurfing_percent,
            layering_percent,
            seed,
            account_count: DEFAULT_ACCOUNT_COUNT,
            as_of: reference_as_of(),
        }
    }

    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = as_of;
        self
    }

    pub fn with_account_count(mut self, account_count: usize) -> Self {
        self.account_count = account_count;
        self
    }

    /// Validate the parameters and split `count` into per-category counts.
    pub fn pattern_counts(&self) -> Result<PatternCounts> {
        if self.count == 0 {
            return Err(SimulationError::InvalidCount);
        }
        check_percent("smurfing_percent", self.smurfing_percent)?;
        check_percent("layering_percent", self.layering_percent)?;
        if self.account_count < 2 {
            return Err(SimulationError::TooFewAccounts(self.account_count));
        }

        let smurfing = (self.count as f64 * self.smurfing_percent).floor() as usize;
        let layering = (self.count as f64 * self.layering_percent).floor() as usize;
        let normal = self
            .count
            .checked_sub(smurfing + layering)
            .ok_or(SimulationError::PatternOverflow {
                count: self.count,
                smurfing,
                layering,
            })?;

        Ok(PatternCounts {
            normal,
            smurfing,
            layering,
        })
    }
}

fn check_percent(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && (0.0..=0.5).contains(&value) {
        Ok(())
    } else {
        Err(SimulationError::InvalidPercent { name, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternCounts {
    pub normal: usize,
    pub smurfing: usize,
    pub layering: usize,
}

impl PatternCounts {
    pub fn total(&self) -> usize {
        self.normal + self.smurfing + self.layering
    }
}

/// Generate accounts and transactions using a fresh random source for `params.seed`.
pub fn generate(params: &GenerationParams) -> Result<(Vec<Account>, Vec<Transaction>)> {
    let mut rng = SeededRandom::from_seed(params.seed);
    generate_with(params, &mut rng)
}

/// Generate accounts and transactions drawing from a caller-owned random source.
///
/// Validation happens before any draw, so a rejected configuration leaves `rng` untouched.
pub fn generate_with(
    params: &GenerationParams,
    rng: &mut SeededRandom,
) -> Result<(Vec<Account>, Vec<Transaction>)> {
    let counts = params.pattern_counts()?;
    let accounts = generate_accounts(params.account_count);
    let mut transactions = Vec::with_capacity(counts.total());

    for i in 0..counts.normal {
        transactions.push(normal_transaction(i, &accounts, params.as_of, rng));
    }

    let smurfing_offset = counts.normal;
    for i in 0..counts.smurfing {
        transactions.push(smurfing_transaction(
            smurfing_offset + i,
            &accounts,
            params.as_of,
            rng,
        ));
    }

    let layering_offset = counts.normal + counts.smurfing;
    for i in 0..counts.layering {
        transactions.push(layering_transaction(
            layering_offset,
            i,
            &accounts,
            params.as_of,
            rng,
        ));
    }

    for tx in transactions.iter_mut() {
        tx.flag_large_amount();
    }

    // Newest first; stable so equal timestamps keep generation order.
    transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    tracing::debug!(
        seed = params.seed,
        normal = counts.normal,
        smurfing = counts.smurfing,
        layering = counts.layering,
        accounts = accounts.len(),
        "Generated synthetic transactions"
    );

    Ok((accounts, transactions))
}

fn timestamp_within(as_of: DateTime<Utc>, days: u32, rng: &mut SeededRandom) -> DateTime<Utc> {
    let minutes = rng.index((days * MINUTES_PER_DAY) as usize);
    as_of - Duration::minutes(minutes as i64)
}

fn normal_transaction(
    n: usize,
    accounts: &[Account],
    as_of: DateTime<Utc>,
    rng: &mut SeededRandom,
) -> Transaction {
    let timestamp = timestamp_within(as_of, NORMAL_WINDOW_DAYS, rng);
    let source_idx = rng.index(accounts.len());
    let dest_idx = rng.index_excluding(accounts.len(), source_idx);
    let amount = rng.amount(NORMAL_AMOUNT.0, NORMAL_AMOUNT.1);
    let merchant_type = *rng.choose(&MerchantType::ALL);
    let purpose = *rng.choose(&Purpose::NORMAL);

    let source = &accounts[source_idx];
    let destination = if merchant_type == MerchantType::Transfer {
        accounts[dest_idx].name.clone()
    } else {
        merchant_type.as_str().to_string()
    };

    Transaction {
        id: format!("TX{}", n),
        amount,
        timestamp,
        merchant_type,
        account_id: source.id.clone(),
        source: source.name.clone(),
        destination,
        purpose,
        is_laundering: false,
        laundering_type: None,
    }
}

fn smurfing_transaction(
    n: usize,
    accounts: &[Account],
    as_of: DateTime<Utc>,
    rng: &mut SeededRandom,
) -> Transaction {
    let timestamp = timestamp_within(as_of, SMURFING_WINDOW_DAYS, rng);
    let source_idx = rng.index(accounts.len());
    let dest_idx = rng.index_excluding(accounts.len(), source_idx);
    let amount = rng.amount(SMURFING_AMOUNT.0, SMURFING_AMOUNT.1);

    Transaction {
        id: format!("TX{}", n),
        amount,
        timestamp,
        merchant_type: MerchantType::Transfer,
        account_id: accounts[source_idx].id.clone(),
        source: accounts[source_idx].name.clone(),
        destination: accounts[dest_idx].name.clone(),
        purpose: Purpose::Transfer,
        is_laundering: true,
        laundering_type: Some(LaunderingPattern::Smurfing),
    }
}

/// Layering bounces funds between the lower and upper halves of the pool,
/// switching direction on every other transaction.
fn layering_transaction(
    offset: usize,
    i: usize,
    accounts: &[Account],
    as_of: DateTime<Utc>,
    rng: &mut SeededRandom,
) -> Transaction {
    let timestamp = timestamp_within(as_of, LAYERING_WINDOW_DAYS, rng);
    let half = accounts.len() / 2;
    let lower_idx = rng.index(half);
    let upper_idx = half + rng.index(accounts.len() - half);
    let amount = rng.amount(LAYERING_AMOUNT.0, LAYERING_AMOUNT.1);

    let (from_idx, to_idx) = if i % 2 == 0 {
        (lower_idx, upper_idx)
    } else {
        (upper_idx, lower_idx)
    };

    Transaction {
        id: format!("TX{}", offset + i),
        amount,
        timestamp,
        merchant_type: MerchantType::Transfer,
        account_id: accounts[from_idx].id.clone(),
        source: accounts[from_idx].name.clone(),
        destination: accounts[to_idx].name.clone(),
        purpose: Purpose::Investment,
        is_laundering: true,
        laundering_type: Some(LaunderingPattern::Layering),
    }
}
