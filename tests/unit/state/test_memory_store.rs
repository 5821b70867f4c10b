// Unit tests for the in-memory account store

use crate::common::test_account;
use account_sentinel::core::errors::SecurityError;
use account_sentinel::core::models::{AccountField, AccountId, AccountStatus};
use account_sentinel::state::{AccountStore, InMemoryAccountStore};
use chrono::Utc;

#[tokio::test]
async fn test_load_returns_inserted_account() {
    let store = InMemoryAccountStore::new();
    let account = test_account();
    let id = account.id;
    store.insert(account).await;

    let loaded = store.load(&id).await.unwrap();
    assert_eq!(loaded.unwrap().email, "jane.doe@bank.example");
}

#[tokio::test]
async fn test_load_unknown_id_is_none() {
    let store = InMemoryAccountStore::new();
    assert!(store.load(&AccountId::generate()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_unknown_account_errors() {
    let store = InMemoryAccountStore::new();
    let account = test_account();

    let result = store
        .update_fields(&account, &[AccountField::OtpCode])
        .await;
    assert!(matches!(result, Err(SecurityError::AccountNotFound)));
}

/// Test that an update writes only the fields it names
#[tokio::test]
async fn test_partial_update_does_not_clobber() {
    let store = InMemoryAccountStore::new();
    let account = test_account();
    let id = account.id;
    store.insert(account.clone()).await;

    // One writer locks the account
    let mut locker = account.clone();
    locker.account_status = AccountStatus::Locked;
    locker.failed_login_attempts = 3;
    locker.last_failed_login = Some(Utc::now());
    store
        .update_fields(
            &locker,
            &[
                AccountField::AccountStatus,
                AccountField::FailedLoginAttempts,
                AccountField::LastFailedLogin,
            ],
        )
        .await
        .unwrap();

    // Another writer, holding a pre-lock snapshot, saves only OTP fields
    let mut otp_writer = account;
    otp_writer.otp_code = "555123".to_string();
    otp_writer.otp_expiry = Some(Utc::now());
    store
        .update_fields(
            &otp_writer,
            &[AccountField::OtpCode, AccountField::OtpExpiry],
        )
        .await
        .unwrap();

    // The lock placed by the first writer is intact
    let stored = store.get(&id).await.unwrap();
    assert_eq!(stored.account_status, AccountStatus::Locked);
    assert_eq!(stored.failed_login_attempts, 3);
    assert_eq!(stored.otp_code, "555123");
}
