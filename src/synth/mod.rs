pub mod accounts;
pub mod random;
pub mod transactions;
pub mod types;
