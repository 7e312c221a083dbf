pub mod export;
pub mod sar;
pub mod stats;
pub mod types;
