// Fire-and-forget notification dispatch

use crate::notify::LockoutNotifier;
use std::sync::Arc;
use tracing::warn;

/// Decouples notification delivery from the lock transition
///
/// Dispatch spawns an async task and returns immediately: a slow or
/// failing channel cannot block or fail the state write that has already
/// committed. Channel errors are logged and dropped; a locked account
/// with a failed notification is still locked.
pub struct NotificationDispatcher {
    notifier: Arc<dyn LockoutNotifier>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn LockoutNotifier>) -> Self {
        Self { notifier }
    }

    /// Send the account-locked notice in the background
    pub fn dispatch_account_locked(&self, email: &str, display_name: &str) {
        let notifier = Arc::clone(&self.notifier);
        let email = email.to_string();
        let display_name = display_name.to_string();

        tokio::spawn(async move {
            if let Err(e) = notifier.notify_account_locked(&email, &display_name).await {
                warn!(
                    email = %email,
                    error = %e,
                    "Failed to deliver account-locked notification"
                );
            }
        });
    }
}
