//! Selection store: the one mutable cell in the dashboard.
//!
//! RULE: The store is passed explicitly. The picker holds `&mut`, the
//! table and chart hold `&`. There is no global selection.

use crate::types::UserId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStore {
    selected: Option<UserId>,
    version:  u64,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<UserId> {
        self.selected
    }

    /// Bumped on every change of value. Re-selecting the current id is
    /// a no-op and leaves it untouched.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn select(&mut self, user_id: UserId) {
        self.set(Some(user_id));
    }

    pub fn clear(&mut self) {
        self.set(None);
    }

    /// Apply a raw picker value. The empty option clears the selection,
    /// anything that parses as an id selects it (known or not), and
    /// anything else clears.
    pub fn select_from_input(&mut self, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.clear();
            return;
        }
        match value.parse::<UserId>() {
            Ok(id) => self.select(id),
            Err(_) => {
                log::warn!("Ignoring unparseable selection {value:?}");
                self.clear();
            }
        }
    }

    fn set(&mut self, next: Option<UserId>) {
        if self.selected == next {
            return;
        }
        log::debug!("Selection changed: {:?} -> {:?}", self.selected, next);
        self.selected = next;
        self.version += 1;
    }
}
