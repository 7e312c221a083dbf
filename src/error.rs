use thiserror::Error;

/// Errors raised by the generation, scoring and export core.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("transaction count must be positive")]
    InvalidCount,

    #[error("{name} must be a finite value in [0, 0.5], got {value}")]
    InvalidPercent { name: &'static str, value: f64 },

    #[error("pattern counts ({smurfing} + {layering}) exceed {count} transactions")]
    PatternOverflow {
        count: usize,
        smurfing: usize,
        layering: usize,
    },

    #[error("account pool needs at least 2 accounts, got {0}")]
    TooFewAccounts(usize),

    #[error("predictions ({predictions}) and actuals ({actuals}) differ in length")]
    ShapeMismatch { predictions: usize, actuals: usize },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
