pub mod config;
pub mod error;
pub mod explain;
pub mod features;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod synth;

pub use error::{Result, SimulationError};
pub use explain::{explain, ShapValue};
pub use features::{preprocess, TransactionFeatures};
pub use pipeline::{Dataset, Simulator};
pub use report::export::{export_sars_csv, write_sars_csv};
pub use report::sar::build_sars;
pub use report::types::SuspiciousActivityReport;
pub use scoring::metrics::{compute_metrics, ModelMetrics};
pub use scoring::models::{score_model, DemoModel};
pub use scoring::rules::check_rule_based;
pub use synth::random::SeededRandom;
pub use synth::transactions::GenerationParams;
pub use synth::types::{Account, LaunderingPattern, Transaction};

/// Generate accounts and transactions anchored at [`synth::transactions::reference_as_of`].
///
/// Equal arguments always produce equal output.
pub fn generate(
    count: usize,
    smurfing_percent: f64,
    layering_percent: f64,
    seed: u64,
) -> Result<(Vec<Account>, Vec<Transaction>)> {
    synth::transactions::generate(&GenerationParams::new(
        count,
        smurfing_percent,
        layering_percent,
        seed,
    ))
}
