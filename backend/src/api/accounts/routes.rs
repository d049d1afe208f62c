//! Defines the HTTP routes for standalone accounts.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    account_passphrase, create_account, get_account, initial_funds, list_accounts,
    transfer_funds,
};
use crate::AppState;

pub fn accounts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route("/:address", get(get_account))
        .route("/:address/passphrase", get(account_passphrase))
        .route("/:address/initial-funds", post(initial_funds))
        .route("/:address/transfer", post(transfer_funds))
}
