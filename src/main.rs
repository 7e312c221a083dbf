use serde::Serialize;
use tracing_subscriber::EnvFilter;

use aml_simulator::config::Config;
use aml_simulator::report::export::write_sars_csv;
use aml_simulator::report::stats::DashboardStats;
use aml_simulator::scoring::metrics::{
    compare_models, threshold_sweep, ModelComparison, ThresholdMetrics,
};
use aml_simulator::Simulator;

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    risk_model: String,
    stats: DashboardStats,
    model_comparison: Vec<ModelComparison>,
    threshold_sweep: Vec<ThresholdMetrics>,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    // Initialize structured logging (set RUST_LOG=debug for per-stage output)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    tracing::info!("AML simulator starting");

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());
    let config = Config::load_or_default(&config_path)?;

    let simulator = Simulator::from_config(&config)?;
    let params = config.generation.params();
    let dataset = simulator
        .regenerate(&params)
        .map_err(|e| eyre::eyre!("Failed to generate dataset: {}", e))?;

    let stats = dataset.stats();
    tracing::info!(
        transactions = stats.total_transactions,
        flagged = stats.flagged_transactions,
        flagged_percent = %format!("{:.1}", stats.flagged_percent),
        average_risk = %format!("{:.1}%", stats.average_risk_score * 100.0),
        high_risk_accounts = stats.high_risk_accounts,
        "Dashboard stats"
    );

    let comparison = compare_models(&dataset.transactions, config.scoring.threshold)?;
    for entry in &comparison {
        tracing::info!(
            model = %entry.model,
            accuracy = %format!("{:.1}%", entry.metrics.accuracy * 100.0),
            precision = %format!("{:.1}%", entry.metrics.precision * 100.0),
            recall = %format!("{:.1}%", entry.metrics.recall * 100.0),
            f1 = %format!("{:.1}%", entry.metrics.f1_score * 100.0),
            fpr = %format!("{:.1}%", entry.metrics.false_positive_rate * 100.0),
            "Model performance"
        );
    }

    write_sars_csv(&config.export.sar_csv_path, &dataset.sars)?;

    if let Some(ref path) = config.export.summary_json_path {
        let summary = RunSummary {
            seed: params.seed,
            risk_model: simulator.risk_model().to_string(),
            stats,
            model_comparison: comparison,
            threshold_sweep: threshold_sweep(
                &dataset.transactions,
                simulator.risk_model(),
                &config.scoring.threshold_sweep,
            )?,
        };
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json)
            .map_err(|e| eyre::eyre!("Failed to write summary '{}': {}", path, e))?;
        tracing::info!(path = %path, "Run summary written");
    }

    tracing::info!(reports = dataset.sars.len(), "AML simulator finished");
    Ok(())
}
