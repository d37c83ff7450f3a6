//! Source entities. All of them are static reference data: loaded once,
//! never created, mutated or deleted afterwards.

use crate::types::{Balance, Minutes, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id:   UserId,
    pub name: String,
}

/// At most one account per user in the shipped fixtures. When a fixture
/// carries more, the first one wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub user_id: UserId,
    pub balance: Balance,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    pub user_id:  UserId,
    pub duration: Minutes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub user_id: UserId,
    pub count:   f64,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}
