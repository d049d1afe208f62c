//! Handler functions for the standalone account API.
//!
//! These functions parse path parameters and request bodies, validate forms,
//! call into `services::wallets`, `services::ledger` and
//! `services::data_aggregator`, and format the responses.

use adapters::Address;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::api::{Created, FormBody};
use crate::database::models::AccountRow;
use crate::database::queries;
use crate::errors::{AppError, AppResult};
use crate::forms::TransferFundsForm;
use crate::services::data_aggregator::{self, AccountOverview};
use crate::services::{ledger, wallets};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct Passphrase {
    pub address: String,
    pub passphrase: String,
}

#[derive(Debug, Serialize)]
pub struct Transfer {
    pub txid: String,
    pub sender: String,
    pub receiver: String,
    pub amount: u64,
}

pub async fn list_accounts(State(state): State<AppState>) -> AppResult<Json<Vec<AccountRow>>> {
    let accounts = state.db.call(queries::list_standalone_accounts).await?;
    Ok(Json(accounts))
}

pub async fn create_account(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<Created<Passphrase>>)> {
    let (row, passphrase) = wallets::create_standalone(&state.db).await?;
    let message = format!("Account {} has been created.", row.address);
    Ok((
        StatusCode::CREATED,
        Json(Created::new(
            message,
            Passphrase {
                address: row.address,
                passphrase,
            },
        )),
    ))
}

pub async fn get_account(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> AppResult<Json<AccountOverview>> {
    let account = wallets::find_account(&state.db, &address).await?;
    let overview = data_aggregator::account_overview(&state.nodes, account).await?;
    Ok(Json(overview))
}

/// Recovery phrase of a stored account, used to prefill transfer and asset forms.
pub async fn account_passphrase(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> AppResult<Json<Passphrase>> {
    let account = wallets::find_account(&state.db, &address).await?;
    let passphrase = wallets::account_passphrase(&state.db, &state.nodes, &account).await?;
    Ok(Json(Passphrase {
        address: account.address,
        passphrase,
    }))
}

pub async fn initial_funds(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> AppResult<Json<Created<Transfer>>> {
    let account = wallets::find_account(&state.db, &address).await?;
    let receiver: Address = account
        .address
        .parse()
        .map_err(|_| AppError::NotFound(format!("Account {address}")))?;
    let amount = state.config.initial_funds;

    let (sender, txid) = ledger::initial_funds(
        &state.nodes,
        &receiver,
        amount,
        state.config.confirmation_rounds,
    )
    .await
    .map_err(|err| {
        tracing::warn!(%receiver, error = %err, "initial funding failed");
        AppError::Upstream("Initial funds weren't transferred!".to_string())
    })?
    .ok_or_else(|| AppError::Upstream("Initial funds weren't transferred!".to_string()))?;

    let message = format!(
        "Amount of {} microAlgos has been successfully transferred to account {}",
        amount, receiver
    );
    Ok(Json(Created::new(
        message,
        Transfer {
            txid,
            sender: sender.to_string(),
            receiver: receiver.to_string(),
            amount,
        },
    )))
}

pub async fn transfer_funds(
    State(state): State<AppState>,
    Path(address): Path<String>,
    FormBody(form): FormBody<TransferFundsForm>,
) -> AppResult<Json<Created<Transfer>>> {
    let account = wallets::find_account(&state.db, &address).await?;
    let sender: Address = account
        .address
        .parse()
        .map_err(|_| AppError::NotFound(format!("Account {address}")))?;
    let request = form.validate()?;

    let txid = ledger::add_transaction(
        state.nodes.node.as_ref(),
        &sender,
        &request.receiver,
        &request.passphrase,
        request.amount,
        &request.note,
        state.config.confirmation_rounds,
    )
    .await?;

    let message = format!(
        "Amount of {} microAlgos has been successfully transferred to account {}",
        request.amount, request.receiver
    );
    Ok(Json(Created::new(
        message,
        Transfer {
            txid,
            sender: sender.to_string(),
            receiver: request.receiver.to_string(),
            amount: request.amount,
        },
    )))
}
