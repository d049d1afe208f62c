//! Module for database connection setup and common utilities.
//!
//! This module is responsible for opening the SQLite database, applying the
//! schema and handing out the shared connection to the query functions in
//! `queries`.

pub mod models;
pub mod queries;

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

const SCHEMA: &str = "
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS wallets (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        wallet_id   TEXT NOT NULL UNIQUE,
        name        TEXT NOT NULL,
        password    TEXT NOT NULL,
        created     TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS accounts (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        address     TEXT NOT NULL UNIQUE,
        private_key TEXT,
        wallet      INTEGER REFERENCES wallets(id) ON DELETE CASCADE,
        created     TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS assets (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        asset_id    INTEGER NOT NULL,
        creator     TEXT NOT NULL,
        name        TEXT NOT NULL,
        unit        TEXT NOT NULL,
        total       INTEGER NOT NULL,
        decimals    INTEGER NOT NULL,
        frozen      INTEGER NOT NULL DEFAULT 0,
        url         TEXT NOT NULL,
        metadata    TEXT NOT NULL,
        manager     TEXT NOT NULL DEFAULT '',
        reserve     TEXT NOT NULL DEFAULT '',
        freeze      TEXT NOT NULL DEFAULT '',
        clawback    TEXT NOT NULL DEFAULT '',
        created     TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_accounts_wallet ON accounts(wallet);
";

/// Shared handle to the application's SQLite database.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        tracing::info!(path = %path.display(), "opening database");
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> rusqlite::Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> rusqlite::Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` with exclusive access to the connection.
    pub async fn call<F, T>(&self, f: F) -> rusqlite::Result<T>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T>,
    {
        let conn = self.conn.lock().await;
        f(&conn)
    }
}
