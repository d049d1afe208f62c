//! Database query functions (Data Access Objects).
//!
//! This module centralizes all direct database operations, providing reusable
//! functions for interacting with the database and abstracting the query logic
//! from higher-level services and API handlers.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{AccountRow, AssetRow, NewAsset, WalletRow};

const ACCOUNT_COLUMNS: &str = "id, address, private_key, wallet, created";
const WALLET_COLUMNS: &str = "id, wallet_id, name, password, created";
const ASSET_COLUMNS: &str = "id, asset_id, creator, name, unit, total, decimals, frozen, url, \
                             metadata, manager, reserve, freeze, clawback, created";

/// Current time at the precision timestamps are stored with.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn account_from_row(row: &Row<'_>) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        id: row.get(0)?,
        address: row.get(1)?,
        private_key: row.get(2)?,
        wallet: row.get(3)?,
        created: parse_timestamp(row, 4)?,
    })
}

fn wallet_from_row(row: &Row<'_>) -> rusqlite::Result<WalletRow> {
    Ok(WalletRow {
        id: row.get(0)?,
        wallet_id: row.get(1)?,
        name: row.get(2)?,
        password: row.get(3)?,
        created: parse_timestamp(row, 4)?,
    })
}

fn asset_from_row(row: &Row<'_>) -> rusqlite::Result<AssetRow> {
    let asset_id: i64 = row.get(1)?;
    let total: i64 = row.get(5)?;
    Ok(AssetRow {
        id: row.get(0)?,
        asset: NewAsset {
            asset_id: asset_id as u64,
            creator: row.get(2)?,
            name: row.get(3)?,
            unit: row.get(4)?,
            total: total as u64,
            decimals: row.get(6)?,
            frozen: row.get(7)?,
            url: row.get(8)?,
            metadata: row.get(9)?,
            manager: row.get(10)?,
            reserve: row.get(11)?,
            freeze: row.get(12)?,
            clawback: row.get(13)?,
        },
        created: parse_timestamp(row, 14)?,
    })
}

/// Inserts an account. `wallet` is the owning wallet's row id for wallet accounts.
pub fn insert_account(
    conn: &Connection,
    address: &str,
    private_key: Option<&str>,
    wallet: Option<i64>,
) -> rusqlite::Result<AccountRow> {
    let created = now();
    conn.execute(
        "INSERT INTO accounts (address, private_key, wallet, created) VALUES (?1, ?2, ?3, ?4)",
        params![address, private_key, wallet, timestamp(&created)],
    )?;
    Ok(AccountRow {
        id: conn.last_insert_rowid(),
        address: address.to_string(),
        private_key: private_key.map(str::to_string),
        wallet,
        created,
    })
}

/// Accounts not owned by any wallet, newest first.
pub fn list_standalone_accounts(conn: &Connection) -> rusqlite::Result<Vec<AccountRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE wallet IS NULL ORDER BY created DESC, id DESC"
    ))?;
    let rows = stmt.query_map([], account_from_row)?;
    rows.collect()
}

pub fn get_account(conn: &Connection, address: &str) -> rusqlite::Result<Option<AccountRow>> {
    conn.query_row(
        &format!("SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE address = ?1"),
        params![address],
        account_from_row,
    )
    .optional()
}

pub fn list_wallet_accounts(conn: &Connection, wallet: i64) -> rusqlite::Result<Vec<AccountRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ACCOUNT_COLUMNS} FROM accounts WHERE wallet = ?1 ORDER BY created DESC, id DESC"
    ))?;
    let rows = stmt.query_map(params![wallet], account_from_row)?;
    rows.collect()
}

pub fn insert_wallet(
    conn: &Connection,
    wallet_id: &str,
    name: &str,
    password: &str,
) -> rusqlite::Result<WalletRow> {
    let created = now();
    conn.execute(
        "INSERT INTO wallets (wallet_id, name, password, created) VALUES (?1, ?2, ?3, ?4)",
        params![wallet_id, name, password, timestamp(&created)],
    )?;
    Ok(WalletRow {
        id: conn.last_insert_rowid(),
        wallet_id: wallet_id.to_string(),
        name: name.to_string(),
        password: password.to_string(),
        created,
    })
}

/// All wallets ordered by name.
pub fn list_wallets(conn: &Connection) -> rusqlite::Result<Vec<WalletRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {WALLET_COLUMNS} FROM wallets ORDER BY name, id"
    ))?;
    let rows = stmt.query_map([], wallet_from_row)?;
    rows.collect()
}

/// Looks a wallet up by its kmd wallet id.
pub fn get_wallet(conn: &Connection, wallet_id: &str) -> rusqlite::Result<Option<WalletRow>> {
    conn.query_row(
        &format!("SELECT {WALLET_COLUMNS} FROM wallets WHERE wallet_id = ?1"),
        params![wallet_id],
        wallet_from_row,
    )
    .optional()
}

pub fn get_wallet_by_row_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<WalletRow>> {
    conn.query_row(
        &format!("SELECT {WALLET_COLUMNS} FROM wallets WHERE id = ?1"),
        params![id],
        wallet_from_row,
    )
    .optional()
}

pub fn insert_asset(conn: &Connection, asset: &NewAsset) -> rusqlite::Result<AssetRow> {
    let created = now();
    conn.execute(
        "INSERT INTO assets (asset_id, creator, name, unit, total, decimals, frozen, url, metadata,
                             manager, reserve, freeze, clawback, created)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            asset.asset_id as i64,
            asset.creator,
            asset.name,
            asset.unit,
            asset.total as i64,
            asset.decimals,
            asset.frozen,
            asset.url,
            asset.metadata,
            asset.manager,
            asset.reserve,
            asset.freeze,
            asset.clawback,
            timestamp(&created),
        ],
    )?;
    Ok(AssetRow {
        id: conn.last_insert_rowid(),
        asset: asset.clone(),
        created,
    })
}

/// All recorded assets, newest first.
pub fn list_assets(conn: &Connection) -> rusqlite::Result<Vec<AssetRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ASSET_COLUMNS} FROM assets ORDER BY created DESC, id DESC"
    ))?;
    let rows = stmt.query_map([], asset_from_row)?;
    rows.collect()
}
