// Full lockout lifecycle against the in-memory store

use crate::common::{
    init_tracing, settle_notifications, test_account, wait_for_notifications, CapturingNotifier,
};
use account_sentinel::config::Config;
use account_sentinel::core::models::AccountStatus;
use account_sentinel::service::AccountSecurity;
use account_sentinel::state::InMemoryAccountStore;
use account_sentinel::utils::time::ManualClock;
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

/// Three failures a minute apart lock the account; twenty minutes later the
/// lock has lazily healed and the counters are reset.
#[tokio::test]
async fn test_lock_then_lazy_auto_unlock() {
    init_tracing();

    let store = Arc::new(InMemoryAccountStore::new());
    let notifier = Arc::new(CapturingNotifier::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 8, 4, 14, 0, 0).unwrap(),
    ));
    let mut config = Config::test_config();
    config.login_attempt_threshold = 3;
    config.lockout_duration_secs = 15 * 60;

    let service =
        AccountSecurity::with_clock(store.clone(), notifier.clone(), &config, clock.clone());

    let account = test_account();
    let id = account.id;
    store.insert(account).await;

    // Failed logins at t=0, t=1min, t=2min
    service.record_failed_login(&id).await.unwrap();
    clock.advance(Duration::minutes(1));
    service.record_failed_login(&id).await.unwrap();
    clock.advance(Duration::minutes(1));
    service.record_failed_login(&id).await.unwrap();

    // Locked after the third failure, with exactly one notification
    assert_eq!(
        store.get(&id).await.unwrap().account_status,
        AccountStatus::Locked
    );
    wait_for_notifications(&notifier, 1).await;
    settle_notifications().await;
    assert_eq!(notifier.calls().len(), 1);

    // Still locked at t=10min
    clock.advance(Duration::minutes(8));
    assert!(service.is_locked_out(&id).await.unwrap());

    // At t=20min the window (measured from the last failure at t=2min) has
    // elapsed; the check heals the account
    clock.advance(Duration::minutes(10));
    assert!(!service.is_locked_out(&id).await.unwrap());

    let healed = store.get(&id).await.unwrap();
    assert_eq!(healed.account_status, AccountStatus::Active);
    assert_eq!(healed.failed_login_attempts, 0);
    assert!(healed.last_failed_login.is_none());

    // And the account can fail again from a clean slate
    service.record_failed_login(&id).await.unwrap();
    assert_eq!(store.get(&id).await.unwrap().failed_login_attempts, 1);
}

/// A successful authentication between failures resets the count, so the
/// threshold is never reached.
#[tokio::test]
async fn test_successful_auth_interrupts_the_count() {
    init_tracing();

    let store = Arc::new(InMemoryAccountStore::new());
    let notifier = Arc::new(CapturingNotifier::new());
    let service = AccountSecurity::new(store.clone(), notifier.clone(), &Config::test_config());

    let account = test_account();
    let id = account.id;
    store.insert(account).await;

    service.record_failed_login(&id).await.unwrap();
    service.record_failed_login(&id).await.unwrap();
    service.reset_failed_login_attempts(&id).await.unwrap();
    service.record_failed_login(&id).await.unwrap();
    service.record_failed_login(&id).await.unwrap();

    let stored = store.get(&id).await.unwrap();
    assert_eq!(stored.account_status, AccountStatus::Active);
    assert_eq!(stored.failed_login_attempts, 2);

    settle_notifications().await;
    assert!(notifier.calls().is_empty());
}

/// An operator unlock releases the account before the window elapses.
#[tokio::test]
async fn test_explicit_unlock_beats_the_window() {
    init_tracing();

    let store = Arc::new(InMemoryAccountStore::new());
    let notifier = Arc::new(CapturingNotifier::new());
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 8, 4, 14, 0, 0).unwrap(),
    ));
    let service = AccountSecurity::with_clock(
        store.clone(),
        notifier.clone(),
        &Config::test_config(),
        clock.clone(),
    );

    let account = test_account();
    let id = account.id;
    store.insert(account).await;
    for _ in 0..3 {
        service.record_failed_login(&id).await.unwrap();
    }
    assert!(service.is_locked_out(&id).await.unwrap());

    service.unlock_account(&id).await.unwrap();

    assert!(!service.is_locked_out(&id).await.unwrap());
    let stored = store.get(&id).await.unwrap();
    assert_eq!(stored.account_status, AccountStatus::Active);
    assert_eq!(stored.failed_login_attempts, 0);
}
