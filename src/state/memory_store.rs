// In-memory account store for tests and single-process deployments

use crate::core::errors::SecurityError;
use crate::core::models::{Account, AccountField, AccountId};
use crate::state::AccountStore;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Map-backed account store
///
/// Writes are serialized behind a single RwLock, which gives each record
/// the read-modify-write atomicity the AccountStore contract asks for.
/// Field updates copy only the named fields onto the stored row, so a
/// concurrent change to an unrelated field is never clobbered.
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Seed an account record (registration is an external concern)
    pub async fn insert(&self, account: Account) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.id, account);
    }

    /// Snapshot a stored record, bypassing the port
    pub async fn get(&self, id: &AccountId) -> Option<Account> {
        let accounts = self.accounts.read().await;
        accounts.get(id).cloned()
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn load(&self, id: &AccountId) -> Result<Option<Account>, SecurityError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(id).cloned())
    }

    async fn update_fields(
        &self,
        account: &Account,
        fields: &[AccountField],
    ) -> Result<(), SecurityError> {
        let mut accounts = self.accounts.write().await;
        let stored = accounts
            .get_mut(&account.id)
            .ok_or(SecurityError::AccountNotFound)?;

        for field in fields {
            match field {
                AccountField::OtpCode => stored.otp_code = account.otp_code.clone(),
                AccountField::OtpExpiry => stored.otp_expiry = account.otp_expiry,
                AccountField::FailedLoginAttempts => {
                    stored.failed_login_attempts = account.failed_login_attempts
                }
                AccountField::LastFailedLogin => {
                    stored.last_failed_login = account.last_failed_login
                }
                AccountField::AccountStatus => stored.account_status = account.account_status,
            }
        }
        Ok(())
    }
}
