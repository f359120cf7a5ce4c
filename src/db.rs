use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::error::StoreError;
use crate::models::Bill;

/// The three blobs the app keeps between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Products,
    History,
    Archive,
}

impl StoreKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::History => "history",
            Self::Archive => "archive",
        }
    }
}

/// Durable string-keyed store. Values are JSON text.
pub trait KeyValueStore {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError>;

    /// Writes every entry or none of them.
    fn set_many(&self, entries: &[(StoreKey, String)]) -> Result<(), StoreError>;

    fn set(&self, key: StoreKey, value: String) -> Result<(), StoreError> {
        self.set_many(&[(key, value)])
    }
}

/// Reads a JSON array stored under `key`. A missing key is an empty list.
pub fn read_list<S, T>(store: &S, key: StoreKey) -> Result<Vec<T>, StoreError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match store.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}

/// Reads the bill list under `key`. Bills dated in anything other than
/// `YYYY-MM-DD` fail with [`StoreError::LegacyDate`] instead of a bare
/// decode error.
pub fn read_bills<S>(store: &S, key: StoreKey) -> Result<Vec<Bill>, StoreError>
where
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };

    serde_json::from_str(&raw).map_err(|err| legacy_date(key, &raw).unwrap_or(StoreError::Json(err)))
}

fn legacy_date(key: StoreKey, raw: &str) -> Option<StoreError> {
    let bills: Vec<serde_json::Value> = serde_json::from_str(raw).ok()?;

    bills
        .iter()
        .filter_map(|bill| bill.get("date")?.as_str())
        .find(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err())
        .map(|date| StoreError::LegacyDate {
            key: key.as_str(),
            date: date.to_string(),
        })
}

pub fn write_list<S, T>(store: &S, key: StoreKey, items: &[T]) -> Result<(), StoreError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    store.set(key, serde_json::to_string(items)?)
}

pub struct Database {
    pub conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let conn = Connection::open(path)?;

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;

        Ok(Database {
            conn: Mutex::new(conn),
        })
    }

    pub fn initialize(&self) -> Result<(), StoreError> {
        let conn = self.lock()?;

        conn.execute_batch(
            "
            -- One row per persisted collection
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT
            );
            ",
        )?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        let conn = self.lock()?;

        let value = conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [key.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set_many(&self, entries: &[(StoreKey, String)]) -> Result<(), StoreError> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        for (key, value) in entries {
            tx.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key.as_str(), value],
            )?;
        }

        tx.commit()?;

        Ok(())
    }
}
