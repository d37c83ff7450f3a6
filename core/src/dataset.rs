//! The four source relations, held together as one immutable value.
//!
//! A dataset is built once at startup (sample, JSON fixture or SQLite
//! fixture) and only ever read afterwards.

use crate::{
    aggregator::{compute_metrics, UserMetrics},
    error::{DashError, DashResult},
    model::{Account, CallRecord, EmailRecord, User},
    types::UserId,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub users:    Vec<User>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub calls:    Vec<CallRecord>,
    #[serde(default)]
    pub emails:   Vec<EmailRecord>,
}

impl Dataset {
    /// The five-user sample the dashboard ships with.
    pub fn sample() -> Self {
        let rows: [(UserId, &str, f64, f64, f64); 5] = [
            (1, "John Doe",      1000.0, 120.0, 20.0),
            (2, "Jane Smith",     500.0,  75.0, 15.0),
            (3, "Sam Johnson",   1500.0,  90.0, 25.0),
            (4, "Alice Brown",   2000.0, 150.0, 30.0),
            (5, "Charlie White",  750.0,  60.0, 10.0),
        ];

        let mut ds = Self::default();
        for (id, name, balance, duration, count) in rows {
            ds.users.push(User::new(id, name));
            ds.accounts.push(Account { user_id: id, balance });
            ds.calls.push(CallRecord { user_id: id, duration });
            ds.emails.push(EmailRecord { user_id: id, count });
        }
        ds
    }

    /// Load a JSON fixture: `{ "users": [..], "accounts": [..], "calls": [..], "emails": [..] }`.
    /// Missing arrays are treated as empty.
    pub fn load_json(path: impl AsRef<Path>) -> DashResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DashError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ds: Dataset = serde_json::from_str(&content)?;
        log::info!(
            "Loaded dataset from {}: {} users, {} accounts, {} calls, {} emails",
            path.display(),
            ds.users.len(),
            ds.accounts.len(),
            ds.calls.len(),
            ds.emails.len(),
        );
        ds.warn_orphans();
        Ok(ds)
    }

    /// Aggregate for the given selection against this dataset.
    pub fn metrics_for(&self, selected: Option<UserId>) -> Option<UserMetrics> {
        compute_metrics(selected, &self.users, &self.accounts, &self.calls, &self.emails)
    }

    /// Record user ids that reference no user. Orphans are legal; they
    /// only surface in the log.
    pub fn orphaned_user_ids(&self) -> Vec<UserId> {
        let known: HashSet<UserId> = self.users.iter().map(|u| u.id).collect();
        let mut orphans: Vec<UserId> = self
            .accounts
            .iter()
            .map(|a| a.user_id)
            .chain(self.calls.iter().map(|c| c.user_id))
            .chain(self.emails.iter().map(|e| e.user_id))
            .filter(|id| !known.contains(id))
            .collect();
        orphans.sort_unstable();
        orphans.dedup();
        orphans
    }

    pub(crate) fn warn_orphans(&self) {
        let orphans = self.orphaned_user_ids();
        if !orphans.is_empty() {
            log::warn!("Records reference unknown user ids: {orphans:?}");
        }
    }
}
