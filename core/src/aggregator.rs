//! Metrics aggregation: the only real computation in the dashboard.
//!
//! RULE: Everything here is a pure function over immutable slices.
//! No I/O, no shared state, no error paths. An unknown id, a missing
//! account or an empty call list all resolve to absence or zero.

use crate::{
    model::{Account, CallRecord, EmailRecord, User},
    types::{Balance, Minutes, UserId},
};
use serde::{Deserialize, Serialize};

/// Everything the summary table and chart show for one selected user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMetrics {
    pub user_id:             UserId,
    /// `None` only when the selected id has no user record.
    pub user:                Option<User>,
    /// `None` means "no account", which renders as N/A rather than 0.
    pub balance:             Option<Balance>,
    pub total_call_duration: Minutes,
    pub total_email_count:   f64,
}

impl UserMetrics {
    /// True when the selected id matched no user record.
    pub fn is_ghost(&self) -> bool {
        self.user.is_none()
    }
}

/// Derive the metrics for `selected`.
///
/// Returns `None` when nothing is selected. A selected id that matches
/// no user still yields metrics, computed against whatever records
/// happen to carry that id.
pub fn compute_metrics(
    selected: Option<UserId>,
    users:    &[User],
    accounts: &[Account],
    calls:    &[CallRecord],
    emails:   &[EmailRecord],
) -> Option<UserMetrics> {
    let user_id = selected?;

    let metrics = UserMetrics {
        user_id,
        user:                find_user(users, user_id).cloned(),
        balance:             find_balance(accounts, user_id),
        total_call_duration: total_call_duration(calls, user_id),
        total_email_count:   total_email_count(emails, user_id),
    };

    log::debug!(
        "Metrics for user {user_id}: balance={:?} calls={} emails={} ghost={}",
        metrics.balance,
        metrics.total_call_duration,
        metrics.total_email_count,
        metrics.is_ghost(),
    );
    Some(metrics)
}

pub fn find_user(users: &[User], user_id: UserId) -> Option<&User> {
    users.iter().find(|u| u.id == user_id)
}

/// Balance of the first account owned by `user_id`.
pub fn find_balance(accounts: &[Account], user_id: UserId) -> Option<Balance> {
    accounts
        .iter()
        .find(|a| a.user_id == user_id)
        .map(|a| a.balance)
}

pub fn total_call_duration(calls: &[CallRecord], user_id: UserId) -> Minutes {
    calls
        .iter()
        .filter(|c| c.user_id == user_id)
        .map(|c| c.duration)
        .sum()
}

pub fn total_email_count(emails: &[EmailRecord], user_id: UserId) -> f64 {
    emails
        .iter()
        .filter(|e| e.user_id == user_id)
        .map(|e| e.count)
        .sum()
}
