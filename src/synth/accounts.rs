use super::types::Account;

/// First numeric suffix handed out by the account pool.
pub const ACCOUNT_ID_OFFSET: usize = 1000;

/// Build the account roster. Consumes no randomness.
pub fn generate_accounts(count: usize) -> Vec<Account> {
    (0..count)
        .map(|i| {
            let n = ACCOUNT_ID_OFFSET + i;
            Account {
                id: format!("A{}", n),
                name: format!("Account {}", n),
                balance: None,
                risk_score: None,
            }
        })
        .collect()
}
