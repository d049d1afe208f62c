//! Wallet lifecycle and recovery phrase lookup.
//!
//! Wallets live in kmd; the database only mirrors their id, name and password
//! so the backend can reopen them. Standalone accounts keep their key in the
//! database instead.

use adapters::Account;

use crate::database::models::{AccountRow, WalletRow};
use crate::database::{queries, Database};
use crate::errors::{AppError, AppResult};
use crate::forms::{ValidationErrors, WalletRequest};
use crate::services::node_manager::NodeManager;

pub async fn find_wallet(db: &Database, wallet_id: &str) -> AppResult<WalletRow> {
    db.call(|conn| queries::get_wallet(conn, wallet_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Wallet {wallet_id}")))
}

pub async fn find_account(db: &Database, address: &str) -> AppResult<AccountRow> {
    db.call(|conn| queries::get_account(conn, address))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Account {address}")))
}

/// Creates a standalone account and stores its key.
pub async fn create_standalone(db: &Database) -> AppResult<(AccountRow, String)> {
    let account = Account::generate();
    let address = account.address().to_string();
    let key = account.private_key_base64();
    let row = db
        .call(|conn| queries::insert_account(conn, &address, Some(&key), None))
        .await?;
    tracing::info!(address = %row.address, "created standalone account");
    Ok((row, account.mnemonic()))
}

pub async fn create_wallet(
    db: &Database,
    nodes: &NodeManager,
    request: &WalletRequest,
) -> AppResult<WalletRow> {
    let wallet_id = match nodes.kmd.create_wallet(&request.name, &request.password).await {
        Ok(id) if !id.is_empty() => id,
        Ok(_) => return Err(ValidationErrors::non_field("Wallet is not created!").into()),
        Err(err) => {
            tracing::warn!(name = %request.name, error = %err, "kmd refused wallet");
            return Err(ValidationErrors::non_field("Wallet is not created!").into());
        }
    };
    let row = db
        .call(|conn| queries::insert_wallet(conn, &wallet_id, &request.name, &request.password))
        .await?;
    tracing::info!(wallet_id = %row.wallet_id, name = %row.name, "created wallet");
    Ok(row)
}

/// Generates a new key inside the wallet and records it.
pub async fn create_wallet_account(
    db: &Database,
    nodes: &NodeManager,
    wallet_id: &str,
) -> AppResult<AccountRow> {
    let wallet = find_wallet(db, wallet_id).await?;
    let handle = nodes.kmd.wallet_handle(&wallet.name, &wallet.password).await?;
    let address = nodes.kmd.generate_key(&handle).await?.to_string();
    let row = db
        .call(|conn| queries::insert_account(conn, &address, None, Some(wallet.id)))
        .await?;
    tracing::info!(wallet_id, address = %row.address, "created wallet account");
    Ok(row)
}

pub async fn wallet_accounts(db: &Database, wallet: &WalletRow) -> AppResult<Vec<AccountRow>> {
    let id = wallet.id;
    Ok(db
        .call(move |conn| queries::list_wallet_accounts(conn, id))
        .await?)
}

/// Recovery phrase of a stored account, from its stored key or from kmd.
pub async fn account_passphrase(
    db: &Database,
    nodes: &NodeManager,
    account: &AccountRow,
) -> AppResult<String> {
    if let Some(key) = &account.private_key {
        return Ok(Account::from_private_key_base64(key)?.mnemonic());
    }

    let wallet_row = account
        .wallet
        .ok_or_else(|| AppError::NotFound(format!("Key for account {}", account.address)))?;
    let wallet = db
        .call(move |conn| queries::get_wallet_by_row_id(conn, wallet_row))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Wallet of account {}", account.address)))?;
    let handle = nodes.kmd.wallet_handle(&wallet.name, &wallet.password).await?;
    let exported = nodes
        .kmd
        .export_key(&handle, &wallet.password, &account.address)
        .await?;
    Ok(exported.mnemonic())
}
