// Account persistence port

use crate::core::errors::SecurityError;
use crate::core::models::{Account, AccountField, AccountId};
use async_trait::async_trait;

pub mod memory_store;

pub use memory_store::InMemoryAccountStore;

/// Storage port for account records
///
/// Implementations must provide at-least read-modify-write atomicity per
/// account record: two concurrent failed-login recordings on the same
/// account must both be counted. In practice that means a per-account
/// lock, an atomic increment primitive, or optimistic-concurrency retry
/// at the storage layer.
///
/// `update_fields` persists only the named fields; either all of them
/// commit or none do.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Load an account by identifier
    async fn load(&self, id: &AccountId) -> Result<Option<Account>, SecurityError>;

    /// Persist the named fields of `account`, leaving all others untouched
    async fn update_fields(
        &self,
        account: &Account,
        fields: &[AccountField],
    ) -> Result<(), SecurityError>;
}
