use crate::error::Result;
use crate::models::issue::Issue;
use crate::models::user::CitizenUser;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

const DB_SCHEMA_VERSION: i64 = 1;

pub const ISSUES_KEY: &str = "issues";
pub const CITIZEN_USERS_KEY: &str = "citizenUsers";

pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;

    let mut version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        apply_migration_1(conn)?;
        version = 1;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version > DB_SCHEMA_VERSION {
        log::warn!("state.db has newer schema version {version}; continuing");
    }

    Ok(())
}

fn apply_migration_1(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS local_storage (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        ",
    )
}

pub fn get_db_connection(data_dir: &str) -> Result<Connection> {
    let dir = crate::commands::settings::ensure_fixity_dir(data_dir)
        .map_err(std::io::Error::other)?;
    let conn = Connection::open(dir.join("state.db"))?;
    initialize_schema(&conn)?;
    Ok(conn)
}

/// Flat key/value storage with the semantics of browser local storage: whole
/// values, last writer wins.
pub struct IssueStore {
    conn: Connection,
}

impl IssueStore {
    pub fn open(data_dir: &str) -> Result<Self> {
        Ok(IssueStore {
            conn: get_db_connection(data_dir)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(IssueStore { conn })
    }

    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp();
        self.conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Parses the list under `key`. Absent, unreadable or malformed values all
    /// read as an empty list.
    pub fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::warn!("could not read `{key}` from storage: {e}");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("discarding malformed `{key}` value: {e}");
            Vec::new()
        })
    }

    pub fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let raw = serde_json::to_string(items)?;
        self.set_item(key, &raw).inspect_err(|e| {
            log::error!("failed to write `{key}` to storage: {e}");
        })
    }

    pub fn load_issues(&self) -> Vec<Issue> {
        self.load_list(ISSUES_KEY)
    }

    pub fn save_issues(&self, issues: &[Issue]) -> Result<()> {
        self.save_list(ISSUES_KEY, issues)
    }

    /// Load, mutate and write back the full issue list. The list is only saved
    /// when `apply` succeeds.
    pub fn update_issues<T, F>(&self, apply: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Issue>) -> Result<T>,
    {
        let mut issues = self.load_issues();
        let outcome = apply(&mut issues)?;
        self.save_issues(&issues)?;
        Ok(outcome)
    }

    pub fn load_users(&self) -> Vec<CitizenUser> {
        self.load_list(CITIZEN_USERS_KEY)
    }

    pub fn save_users(&self, users: &[CitizenUser]) -> Result<()> {
        self.save_list(CITIZEN_USERS_KEY, users)
    }
}
