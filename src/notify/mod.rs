// Outbound notification port

use crate::core::errors::NotifyError;
use async_trait::async_trait;
use tracing::info;

pub mod dispatcher;

pub use dispatcher::NotificationDispatcher;

/// Channel that tells an account holder their account was locked
///
/// Best-effort: implementations may fail, and failures are contained by
/// the dispatcher rather than surfaced into the lock transition.
#[async_trait]
pub trait LockoutNotifier: Send + Sync {
    async fn notify_account_locked(
        &self,
        email: &str,
        display_name: &str,
    ) -> Result<(), NotifyError>;
}

/// Notifier that only emits a structured log line
///
/// Used when no mail or SMS channel is wired up, so lock events still
/// leave an operator-visible trace.
pub struct TracingNotifier;

#[async_trait]
impl LockoutNotifier for TracingNotifier {
    async fn notify_account_locked(
        &self,
        email: &str,
        display_name: &str,
    ) -> Result<(), NotifyError> {
        info!(
            email = %email,
            display_name = %display_name,
            "Account locked notification"
        );
        Ok(())
    }
}
