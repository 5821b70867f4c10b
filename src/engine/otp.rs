// One-time passcode issuance and verification

use crate::core::models::Account;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use subtle::ConstantTimeEq;

/// OTP issuance and verification rules
///
/// Codes are short numeric secrets held on the account record. An issued
/// code is valid until its expiry instant and is consumed by the first
/// successful verification.
pub struct OtpPolicy {
    code_length: usize,
}

impl OtpPolicy {
    pub fn new(code_length: usize) -> Self {
        Self { code_length }
    }

    /// Generate a random numeric code of the configured length
    pub fn generate_code(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.code_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    /// Place a code on the account, valid for `ttl` from `now`
    ///
    /// Touches [OtpCode, OtpExpiry] and nothing else. The caller-supplied
    /// ttl is honored as given.
    pub fn issue(&self, account: &mut Account, code: &str, ttl: Duration, now: DateTime<Utc>) {
        account.otp_code = code.to_string();
        account.otp_expiry = Some(now + ttl);
    }

    /// Check a submitted code against the account
    ///
    /// Succeeds only when the code matches and the expiry instant is still
    /// in the future. On success both OTP fields are cleared so the code
    /// cannot be replayed; on failure the account is untouched. A mismatch
    /// and an expired code are indistinguishable to the caller.
    ///
    /// The code comparison is constant-time.
    pub fn verify(&self, account: &mut Account, submitted: &str, now: DateTime<Utc>) -> bool {
        let unexpired = matches!(account.otp_expiry, Some(expiry) if expiry > now);
        let matches = !account.otp_code.is_empty()
            && bool::from(account.otp_code.as_bytes().ct_eq(submitted.as_bytes()));

        if matches && unexpired {
            account.otp_code.clear();
            account.otp_expiry = None;
            return true;
        }
        false
    }
}
