//! SQLite fixture source.
//!
//! RULE: Only store.rs talks to the database.
//! The aggregator never sees a connection; it gets a loaded Dataset.

use crate::{
    dataset::Dataset,
    error::DashResult,
    model::{Account, CallRecord, EmailRecord, User},
    types::UserId,
};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

pub struct FixtureStore {
    conn: Connection,
}

impl FixtureStore {
    /// Open (or create) the fixture database at `path`.
    pub fn open(path: &str) -> DashResult<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an existing fixture database for reading. Fails instead of
    /// creating an empty file when `path` does not exist.
    pub fn open_read_only(path: &str) -> DashResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DashResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply the schema. Safe to call on an already-migrated database.
    pub fn migrate(&self) -> DashResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_dataset.sql"))?;
        Ok(())
    }

    // ── Inserts ────────────────────────────────────────────────

    pub fn insert_user(&self, user: &User) -> DashResult<()> {
        self.conn.execute(
            "INSERT INTO app_user (id, name) VALUES (?1, ?2)",
            params![user.id, user.name],
        )?;
        Ok(())
    }

    pub fn insert_account(&self, account: &Account) -> DashResult<()> {
        self.conn.execute(
            "INSERT INTO account (user_id, balance) VALUES (?1, ?2)",
            params![account.user_id, account.balance],
        )?;
        Ok(())
    }

    pub fn insert_call(&self, call: &CallRecord) -> DashResult<()> {
        self.conn.execute(
            "INSERT INTO call_record (user_id, duration) VALUES (?1, ?2)",
            params![call.user_id, call.duration],
        )?;
        Ok(())
    }

    pub fn insert_email(&self, email: &EmailRecord) -> DashResult<()> {
        self.conn.execute(
            "INSERT INTO email_record (user_id, count) VALUES (?1, ?2)",
            params![email.user_id, email.count],
        )?;
        Ok(())
    }

    /// Write every record of `dataset` in a single transaction.
    pub fn seed(&self, dataset: &Dataset) -> DashResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for u in &dataset.users {
            self.insert_user(u)?;
        }
        for a in &dataset.accounts {
            self.insert_account(a)?;
        }
        for c in &dataset.calls {
            self.insert_call(c)?;
        }
        for e in &dataset.emails {
            self.insert_email(e)?;
        }
        tx.commit()?;
        log::debug!("Seeded fixture store with {} users", dataset.users.len());
        Ok(())
    }

    // ── Reads ──────────────────────────────────────────────────

    /// Load all four relations. Rows come back in insertion order so
    /// "first account" means the same thing as in the source fixture.
    pub fn load_dataset(&self) -> DashResult<Dataset> {
        let users = {
            let mut stmt = self.conn.prepare("SELECT id, name FROM app_user ORDER BY rowid ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(User { id: row.get(0)?, name: row.get(1)? })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        let accounts = {
            let mut stmt =
                self.conn.prepare("SELECT user_id, balance FROM account ORDER BY rowid ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(Account { user_id: row.get(0)?, balance: row.get(1)? })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        let calls = {
            let mut stmt =
                self.conn.prepare("SELECT user_id, duration FROM call_record ORDER BY rowid ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(CallRecord { user_id: row.get(0)?, duration: row.get(1)? })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        let emails = {
            let mut stmt =
                self.conn.prepare("SELECT user_id, count FROM email_record ORDER BY rowid ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok(EmailRecord { user_id: row.get(0)?, count: row.get(1)? })
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let dataset = Dataset { users, accounts, calls, emails };
        log::info!("Loaded {} users from fixture store", dataset.users.len());
        dataset.warn_orphans();
        Ok(dataset)
    }

    pub fn user_count(&self) -> DashResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM app_user",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn user_name(&self, user_id: UserId) -> DashResult<Option<String>> {
        let name = self
            .conn
            .query_row(
                "SELECT name FROM app_user WHERE id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(name)
    }
}
