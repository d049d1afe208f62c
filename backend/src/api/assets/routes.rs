use axum::{routing::get, Router};

use super::handlers::{create_asset, list_assets};
use crate::AppState;

pub fn assets_router() -> Router<AppState> {
    Router::new().route("/", get(list_assets).post(create_asset))
}
