// Account security operations - policy composed with the store and notifier ports

use crate::config::Config;
use crate::core::errors::SecurityError;
use crate::core::models::{Account, AccountField, AccountId};
use crate::engine::lockout::{LockoutCheck, LockoutPolicy};
use crate::engine::otp::OtpPolicy;
use crate::notify::{LockoutNotifier, NotificationDispatcher};
use crate::state::AccountStore;
use crate::utils::time::{Clock, SystemClock};
use chrono::Duration;
use std::sync::Arc;
use tracing::{info, warn};

/// The state-transition surface an admin UI or API layer calls
///
/// Every operation is one record read, a pure policy mutation, and one
/// partial-field write. Notifications go out only after the write commits,
/// so the lock stands regardless of what the channel does.
pub struct AccountSecurity {
    store: Arc<dyn AccountStore>,
    dispatcher: NotificationDispatcher,
    lockout: LockoutPolicy,
    otp: OtpPolicy,
    default_otp_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl AccountSecurity {
    /// Build the service against the wall clock
    pub fn new(
        store: Arc<dyn AccountStore>,
        notifier: Arc<dyn LockoutNotifier>,
        config: &Config,
    ) -> Self {
        Self::with_clock(store, notifier, config, Arc::new(SystemClock))
    }

    /// Build the service with an explicit time source
    ///
    /// Tests use this with a ManualClock to drive expiry and lockout
    /// windows deterministically.
    pub fn with_clock(
        store: Arc<dyn AccountStore>,
        notifier: Arc<dyn LockoutNotifier>,
        config: &Config,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            dispatcher: NotificationDispatcher::new(notifier),
            lockout: LockoutPolicy::new(
                config.login_attempt_threshold,
                config.lockout_duration(),
            ),
            otp: OtpPolicy::new(config.otp_code_length),
            default_otp_ttl: config.otp_expiration(),
            clock,
        }
    }

    /// Generate a code of the configured length
    ///
    /// Convenience for callers that don't bring their own random source.
    pub fn generate_otp_code(&self) -> String {
        self.otp.generate_code()
    }

    /// Place an OTP on the account, valid for `ttl` from now
    ///
    /// Persists only the two OTP fields; concurrent unrelated changes on
    /// the same account are not clobbered.
    pub async fn issue_otp(
        &self,
        id: &AccountId,
        code: &str,
        ttl: Duration,
    ) -> Result<(), SecurityError> {
        let mut account = self.load(id).await?;
        self.otp.issue(&mut account, code, ttl, self.clock.now());
        self.store
            .update_fields(&account, &[AccountField::OtpCode, AccountField::OtpExpiry])
            .await?;

        info!(account_id = %id, "Issued OTP");
        Ok(())
    }

    /// Place an OTP on the account using the configured default expiration
    pub async fn issue_otp_default(&self, id: &AccountId, code: &str) -> Result<(), SecurityError> {
        self.issue_otp(id, code, self.default_otp_ttl).await
    }

    /// Verify a submitted OTP
    ///
    /// A consumed code is cleared and persisted before this returns true.
    /// Expired and mismatched codes both come back as `Ok(false)` with the
    /// account untouched.
    pub async fn verify_otp(&self, id: &AccountId, submitted: &str) -> Result<bool, SecurityError> {
        let mut account = self.load(id).await?;
        if !self.otp.verify(&mut account, submitted, self.clock.now()) {
            return Ok(false);
        }

        self.store
            .update_fields(&account, &[AccountField::OtpCode, AccountField::OtpExpiry])
            .await?;

        info!(account_id = %id, "OTP verified and consumed");
        Ok(true)
    }

    /// Record one failed login attempt, locking the account at the threshold
    ///
    /// The store write commits before the notification is dispatched, and
    /// the dispatch is fire-and-forget: a dead channel leaves the account
    /// locked all the same.
    pub async fn record_failed_login(&self, id: &AccountId) -> Result<(), SecurityError> {
        let mut account = self.load(id).await?;
        let locked = self.lockout.register_failure(&mut account, self.clock.now());

        self.store
            .update_fields(
                &account,
                &[
                    AccountField::FailedLoginAttempts,
                    AccountField::LastFailedLogin,
                    AccountField::AccountStatus,
                ],
            )
            .await?;

        if locked {
            warn!(
                account_id = %id,
                email = %account.email,
                attempts = account.failed_login_attempts,
                "Account locked after repeated failed logins"
            );
            self.dispatcher
                .dispatch_account_locked(&account.email, &account.full_name());
        } else {
            info!(
                account_id = %id,
                attempts = account.failed_login_attempts,
                "Recorded failed login attempt"
            );
        }
        Ok(())
    }

    /// Clear the failure state after a successful authentication
    pub async fn reset_failed_login_attempts(&self, id: &AccountId) -> Result<(), SecurityError> {
        let mut account = self.load(id).await?;
        self.lockout.reset(&mut account);

        self.store
            .update_fields(
                &account,
                &[
                    AccountField::FailedLoginAttempts,
                    AccountField::LastFailedLogin,
                    AccountField::AccountStatus,
                ],
            )
            .await
    }

    /// Unlock a locked account
    ///
    /// No-op (no write) when the account is already Active.
    pub async fn unlock_account(&self, id: &AccountId) -> Result<(), SecurityError> {
        let mut account = self.load(id).await?;
        if !self.lockout.unlock(&mut account) {
            return Ok(());
        }

        self.store
            .update_fields(
                &account,
                &[
                    AccountField::AccountStatus,
                    AccountField::FailedLoginAttempts,
                    AccountField::LastFailedLogin,
                ],
            )
            .await?;

        info!(account_id = %id, "Account unlocked");
        Ok(())
    }

    /// Is the account currently locked out?
    ///
    /// Lockout is time-boxed and self-healing: when the window has elapsed
    /// this check unlocks the account before answering, so no background
    /// job is needed. The pure decision without the healing write is
    /// available on `LockoutPolicy::check`.
    pub async fn is_locked_out(&self, id: &AccountId) -> Result<bool, SecurityError> {
        let mut account = self.load(id).await?;
        match self.lockout.check(&account, self.clock.now()) {
            LockoutCheck::Clear => Ok(false),
            LockoutCheck::LockedOut => Ok(true),
            LockoutCheck::LockExpired => {
                self.lockout.unlock(&mut account);
                self.store
                    .update_fields(
                        &account,
                        &[
                            AccountField::AccountStatus,
                            AccountField::FailedLoginAttempts,
                            AccountField::LastFailedLogin,
                        ],
                    )
                    .await?;

                info!(account_id = %id, "Lockout window elapsed; account auto-unlocked");
                Ok(false)
            }
        }
    }

    async fn load(&self, id: &AccountId) -> Result<Account, SecurityError> {
        self.store
            .load(id)
            .await?
            .ok_or(SecurityError::AccountNotFound)
    }
}
