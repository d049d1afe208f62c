//! Defines the HTTP routes for wallets and their accounts.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_wallet, create_wallet_account, get_wallet, get_wallet_account, list_wallets,
};
use crate::AppState;

pub fn wallets_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wallets).post(create_wallet))
        .route("/:wallet_id", get(get_wallet))
        .route("/:wallet_id/accounts", post(create_wallet_account))
        .route("/:wallet_id/accounts/:address", get(get_wallet_account))
}
