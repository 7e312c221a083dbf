pub mod accounts;
pub mod metrics;
pub mod models;
pub mod rules;
