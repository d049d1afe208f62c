use axum::{routing::post, Router};

use super::handlers::search_transactions;
use crate::AppState;

pub fn search_router() -> Router<AppState> {
    Router::new().route("/", post(search_transactions))
}
