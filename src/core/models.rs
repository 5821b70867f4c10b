// Domain models - Pure Rust account state with zero I/O dependencies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Newtype wrapper around Uuid for type-safe account identification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(Uuid);

impl AccountId {
    /// Create a new AccountId from a Uuid
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the underlying Uuid
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Generate a new random AccountId
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(AccountId)
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0.to_string()
    }
}

impl TryFrom<String> for AccountId {
    type Error = uuid::Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Uuid::parse_str(&s).map(AccountId)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account status
///
/// Serialized as "active" / "locked", the strings stored by the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account can authenticate normally
    Active,
    /// Account is locked after repeated failed logins
    Locked,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Locked => "locked",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(AccountStatus::Active),
            "locked" => Some(AccountStatus::Locked),
            _ => None,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named mutable security fields of an account
///
/// Every state-transition operation persists exactly the fields it touched,
/// so concurrent unrelated changes on the same record are never clobbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountField {
    OtpCode,
    OtpExpiry,
    FailedLoginAttempts,
    LastFailedLogin,
    AccountStatus,
}

impl AccountField {
    /// Column name used by store implementations
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountField::OtpCode => "otp_code",
            AccountField::OtpExpiry => "otp_expiry",
            AccountField::FailedLoginAttempts => "failed_login_attempts",
            AccountField::LastFailedLogin => "last_failed_login",
            AccountField::AccountStatus => "account_status",
        }
    }
}

/// A user account and its security state
///
/// Invariants maintained by the policy layer:
/// - `otp_code` is non-empty exactly while `otp_expiry` is set; the pair is
///   cleared together on consumption or expiry.
/// - `failed_login_attempts` is 0 whenever the status transitions to Active.
/// - `last_failed_login` is set only by a failed attempt and cleared only by
///   a reset or unlock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub account_status: AccountStatus,
    pub failed_login_attempts: u32,
    pub last_failed_login: Option<DateTime<Utc>>,
    pub otp_code: String,
    pub otp_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new active account with a generated id
    ///
    /// Account creation happens alongside user registration; the security
    /// fields all start in their cleared state.
    pub fn new(email: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            id: AccountId::generate(),
            email: email.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            account_status: AccountStatus::Active,
            failed_login_attempts: 0,
            last_failed_login: None,
            otp_code: String::new(),
            otp_expiry: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.account_status == AccountStatus::Active
    }

    /// Title-cased display name used when addressing the user
    pub fn full_name(&self) -> String {
        let joined = format!("{} {}", self.first_name, self.last_name);
        joined
            .split_whitespace()
            .map(title_case_word)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> ({})", self.full_name(), self.email, self.account_status)
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
