//! Handler functions for the wallet API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::api::{Created, FormBody};
use crate::database::models::{AccountRow, WalletRow};
use crate::database::queries;
use crate::errors::{AppError, AppResult};
use crate::forms::CreateWalletForm;
use crate::services::data_aggregator::{self, AccountOverview, WalletOverview};
use crate::services::wallets;
use crate::AppState;

pub async fn list_wallets(State(state): State<AppState>) -> AppResult<Json<Vec<WalletRow>>> {
    Ok(Json(state.db.call(queries::list_wallets).await?))
}

pub async fn create_wallet(
    State(state): State<AppState>,
    FormBody(form): FormBody<CreateWalletForm>,
) -> AppResult<(StatusCode, Json<Created<WalletRow>>)> {
    let request = form.validate()?;
    let wallet = wallets::create_wallet(&state.db, &state.nodes, &request).await?;
    let message = format!(
        "Wallet with name '{}' and ID '{}' has been created.",
        wallet.name, wallet.wallet_id
    );
    Ok((StatusCode::CREATED, Json(Created::new(message, wallet))))
}

pub async fn get_wallet(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
) -> AppResult<Json<WalletOverview>> {
    let wallet = wallets::find_wallet(&state.db, &wallet_id).await?;
    let accounts = wallets::wallet_accounts(&state.db, &wallet).await?;
    Ok(Json(data_aggregator::wallet_overview(wallet, accounts)))
}

pub async fn create_wallet_account(
    State(state): State<AppState>,
    Path(wallet_id): Path<String>,
) -> AppResult<(StatusCode, Json<Created<AccountRow>>)> {
    let account = wallets::create_wallet_account(&state.db, &state.nodes, &wallet_id).await?;
    let message = format!("Address '{}' has been created in the wallet.", account.address);
    Ok((StatusCode::CREATED, Json(Created::new(message, account))))
}

pub async fn get_wallet_account(
    State(state): State<AppState>,
    Path((wallet_id, address)): Path<(String, String)>,
) -> AppResult<Json<AccountOverview>> {
    let wallet = wallets::find_wallet(&state.db, &wallet_id).await?;
    let account = wallets::find_account(&state.db, &address).await?;
    if account.wallet != Some(wallet.id) {
        return Err(AppError::NotFound(format!(
            "Account {address} in wallet {wallet_id}"
        )));
    }
    let overview = data_aggregator::account_overview(&state.nodes, account).await?;
    Ok(Json(overview))
}
