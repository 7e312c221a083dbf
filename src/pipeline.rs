use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::report::sar::build_sars;
use crate::report::stats::DashboardStats;
use crate::report::types::SuspiciousActivityReport;
use crate::scoring::accounts::{account_risk_scores, account_summaries, AccountSummary};
use crate::scoring::models::DemoModel;
use crate::synth::random::SeededRandom;
use crate::synth::transactions::{generate_with, GenerationParams};
use crate::synth::types::{Account, Transaction};

/// A complete, self-consistent generation result.
///
/// Accounts, transactions and SARs always come from the same parameters and
/// seed; callers replace the whole value, never parts of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub params: GenerationParams,
    pub risk_model: DemoModel,
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub sars: Vec<SuspiciousActivityReport>,
}

impl Dataset {
    pub fn stats(&self) -> DashboardStats {
        DashboardStats::compute(&self.transactions, &self.sars)
    }

    pub fn account_summaries(&self) -> Vec<AccountSummary> {
        account_summaries(&self.transactions, &self.accounts, self.risk_model)
    }
}

/// Orchestrates a full regeneration:
/// 1. Parameter validation
/// 2. Account pool and transaction synthesis
/// 3. Per-account risk scoring
/// 4. SAR aggregation
pub struct Simulator {
    risk_model: DemoModel,
}

impl Simulator {
    pub fn new(risk_model: DemoModel) -> Self {
        Self { risk_model }
    }

    /// Build a simulator from the `[scoring]` section of the config.
    pub fn from_config(config: &Config) -> eyre::Result<Self> {
        let risk_model = config
            .scoring
            .risk_model
            .parse::<DemoModel>()
            .map_err(|e| eyre::eyre!("Invalid scoring.risk_model: {}", e))?;
        Ok(Self::new(risk_model))
    }

    pub fn risk_model(&self) -> DemoModel {
        self.risk_model
    }

    /// Run every stage with one random source seeded from `params.seed`.
    /// Returns the full dataset or an error, never a partial result.
    pub fn regenerate(&self, params: &GenerationParams) -> Result<Dataset> {
        let mut rng = SeededRandom::from_seed(params.seed);

        let (mut accounts, transactions) = generate_with(params, &mut rng)?;

        let risk_scores = account_risk_scores(&transactions, &accounts, self.risk_model);
        for account in accounts.iter_mut() {
            account.risk_score = risk_scores.get(&account.id).copied();
        }

        let sars = build_sars(
            &transactions,
            &accounts,
            &risk_scores,
            &mut rng,
            params.as_of,
        );

        tracing::info!(
            seed = params.seed,
            transactions = transactions.len(),
            accounts = accounts.len(),
            reports = sars.len(),
            risk_model = self.risk_model.as_str(),
            "Dataset regenerated"
        );

        Ok(Dataset {
            params: params.clone(),
            risk_model: self.risk_model,
            accounts,
            transactions,
            sars,
        })
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(DemoModel::XGBoost)
    }
}
