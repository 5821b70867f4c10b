// Failed-login tracking and lockout policy

use crate::core::models::{Account, AccountStatus};
use chrono::{DateTime, Duration, Utc};

/// Outcome of checking a possibly locked account against the clock
///
/// The check itself never writes. `LockExpired` is a command to the caller:
/// the lock window has elapsed and the account should be unlocked before
/// access decisions are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutCheck {
    /// Account is not locked
    Clear,
    /// Account is locked and the lockout window has not elapsed
    LockedOut,
    /// Account is locked but the lockout window has elapsed
    LockExpired,
}

/// Threshold and time-window decisions for account lockout
///
/// Operates directly on account state; persistence of the touched fields is
/// the caller's responsibility.
pub struct LockoutPolicy {
    login_attempt_threshold: u32,
    lockout_duration: Duration,
}

impl LockoutPolicy {
    /// Create a policy from configured constants
    ///
    /// # Parameters
    /// * `login_attempt_threshold` - failed attempts at which the account locks
    /// * `lockout_duration` - how long a lock holds before it lazily expires
    pub fn new(login_attempt_threshold: u32, lockout_duration: Duration) -> Self {
        Self {
            login_attempt_threshold,
            lockout_duration,
        }
    }

    /// Record one failed login attempt
    ///
    /// Increments the counter and stamps `last_failed_login`. Once the
    /// counter reaches the threshold the account is marked Locked.
    /// Touches [FailedLoginAttempts, LastFailedLogin, AccountStatus].
    ///
    /// Returns true when this attempt left the account locked, which is the
    /// caller's cue to notify the account holder.
    pub fn register_failure(&self, account: &mut Account, now: DateTime<Utc>) -> bool {
        account.failed_login_attempts += 1;
        account.last_failed_login = Some(now);

        if account.failed_login_attempts >= self.login_attempt_threshold {
            account.account_status = AccountStatus::Locked;
            return true;
        }
        false
    }

    /// Clear the failure state after a successful authentication
    ///
    /// Touches [FailedLoginAttempts, LastFailedLogin, AccountStatus].
    pub fn reset(&self, account: &mut Account) {
        account.failed_login_attempts = 0;
        account.last_failed_login = None;
        account.account_status = AccountStatus::Active;
    }

    /// Unlock a locked account
    ///
    /// Counter and timestamp are cleared in the same transition as the
    /// status change. Returns false without touching anything when the
    /// account is already Active, so callers can skip the redundant write.
    pub fn unlock(&self, account: &mut Account) -> bool {
        if account.account_status != AccountStatus::Locked {
            return false;
        }
        account.account_status = AccountStatus::Active;
        account.failed_login_attempts = 0;
        account.last_failed_login = None;
        true
    }

    /// Decide whether a lock is still in force
    ///
    /// A locked account with no recorded failure timestamp never expires;
    /// only an explicit unlock releases it.
    pub fn check(&self, account: &Account, now: DateTime<Utc>) -> LockoutCheck {
        if account.account_status != AccountStatus::Locked {
            return LockoutCheck::Clear;
        }
        match account.last_failed_login {
            Some(last) if now - last > self.lockout_duration => LockoutCheck::LockExpired,
            _ => LockoutCheck::LockedOut,
        }
    }
}
