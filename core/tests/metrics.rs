//! Aggregation tests against the sample dataset.
//!
//! Covers the concrete selections the dashboard is built around, the
//! absence rules (no selection, no account, no records) and the
//! order-independence of the totals.

use rand::{seq::SliceRandom, SeedableRng};
use rand_pcg::Pcg64Mcg;
use usermetrics_core::{
    compute_metrics,
    model::{CallRecord, EmailRecord, User},
    Dataset,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn john_doe_metrics() {
    init_logging();
    let ds = Dataset::sample();
    let m = ds.metrics_for(Some(1)).expect("selection present");

    assert_eq!(m.user.as_ref().map(|u| u.name.as_str()), Some("John Doe"));
    assert_eq!(m.balance, Some(1000.0));
    assert_eq!(m.total_call_duration, 120.0);
    assert_eq!(m.total_email_count, 20.0);
}

#[test]
fn alice_brown_metrics() {
    let ds = Dataset::sample();
    let m = ds.metrics_for(Some(4)).expect("selection present");

    assert_eq!(m.user.as_ref().map(|u| u.name.as_str()), Some("Alice Brown"));
    assert_eq!(m.balance, Some(2000.0));
    assert_eq!(m.total_call_duration, 150.0);
    assert_eq!(m.total_email_count, 30.0);
}

/// Every user in the dataset comes back attached to its own record.
#[test]
fn every_known_user_is_matched() {
    let ds = Dataset::sample();
    for user in &ds.users {
        let m = ds.metrics_for(Some(user.id)).expect("selection present");
        assert_eq!(
            m.user.as_ref(),
            Some(user),
            "metrics for id {} attached to the wrong user",
            user.id
        );
        assert!(!m.is_ghost());
    }
}

#[test]
fn no_selection_is_always_absent() {
    let sample = Dataset::sample();
    let empty = Dataset::default();
    assert_eq!(sample.metrics_for(None), None);
    assert_eq!(empty.metrics_for(None), None);
}

/// A user with no account shows N/A, not a zero balance.
#[test]
fn user_without_account_has_absent_balance() {
    let mut ds = Dataset::sample();
    ds.users.push(User::new(6, "Dana Grey"));

    let m = ds.metrics_for(Some(6)).expect("selection present");
    assert_eq!(m.user.as_ref().map(|u| u.name.as_str()), Some("Dana Grey"));
    assert_eq!(m.balance, None, "missing account must not read as 0");
    assert_eq!(m.total_call_duration, 0.0);
    assert_eq!(m.total_email_count, 0.0);
}

#[test]
fn injected_records_are_summed_for_new_user() {
    let mut ds = Dataset::sample();
    ds.users.push(User::new(6, "Dana Grey"));
    ds.calls.push(CallRecord { user_id: 6, duration: 40.0 });
    ds.calls.push(CallRecord { user_id: 6, duration: 5.0 });
    ds.emails.push(EmailRecord { user_id: 6, count: 3.0 });

    let m = ds.metrics_for(Some(6)).expect("selection present");
    assert_eq!(m.balance, None);
    assert_eq!(m.total_call_duration, 45.0);
    assert_eq!(m.total_email_count, 3.0);
}

/// An id with no user record still resolves, it just has no user.
#[test]
fn unknown_id_degrades_instead_of_failing() {
    let ds = Dataset::sample();
    let m = ds.metrics_for(Some(404)).expect("selection present");
    assert!(m.is_ghost());
    assert_eq!(m.user_id, 404);
    assert_eq!(m.balance, None);
    assert_eq!(m.total_call_duration, 0.0);
    assert_eq!(m.total_email_count, 0.0);
}

#[test]
fn identical_arguments_give_identical_results() {
    let ds = Dataset::sample();
    for id in [None, Some(1), Some(3), Some(99)] {
        let a = ds.metrics_for(id);
        let b = ds.metrics_for(id);
        assert_eq!(a, b, "repeat call diverged for selection {id:?}");
    }
}

/// Shuffling the record order never changes a total. Inputs are whole
/// numbers so every partial sum is exact.
#[test]
fn totals_ignore_record_order() {
    let mut ds = Dataset::sample();
    for i in 0..20u32 {
        ds.calls.push(CallRecord { user_id: i64::from(i % 5) + 1, duration: f64::from(i * 7) });
        ds.emails.push(EmailRecord { user_id: i64::from(i % 3) + 1, count: f64::from(i) });
    }
    let baseline: Vec<_> = (1..=5).map(|id| ds.metrics_for(Some(id))).collect();

    for seed in [1u64, 42, 0xDEAD_BEEF] {
        let mut rng = Pcg64Mcg::seed_from_u64(seed);
        let mut calls = ds.calls.clone();
        let mut emails = ds.emails.clone();
        calls.shuffle(&mut rng);
        emails.shuffle(&mut rng);

        for (idx, id) in (1..=5).enumerate() {
            let shuffled = compute_metrics(Some(id), &ds.users, &ds.accounts, &calls, &emails);
            assert_eq!(
                shuffled, baseline[idx],
                "totals for user {id} changed after shuffle with seed {seed}"
            );
        }
    }
}
