//! Shared primitive types used across the dashboard core.

/// A stable, unique identifier for a user record.
pub type UserId = i64;

/// Call duration in minutes. Fractional minutes are allowed.
pub type Minutes = f64;

/// Currency units. Balances are displayed, never computed on.
pub type Balance = f64;
