//! Central module for organizing the application's main API endpoints.
//!
//! This module acts as a top-level container for the API domains (accounts,
//! wallets, assets, transaction search) and assembles them into the router
//! served by the binary.

pub mod accounts;
pub mod assets;
pub mod search;
pub mod wallets;

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::{middleware::from_fn, routing::get, Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::AppError;
use crate::middleware::log_requests;
use crate::AppState;

/// JSON form body whose rejections are reported as form-level validation errors.
#[derive(Debug)]
pub struct FormBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(form) = Json::<T>::from_request(req, state).await?;
        Ok(FormBody(form))
    }
}

/// Body returned by mutating endpoints: the affected record plus a status message.
#[derive(Debug, Serialize)]
pub struct Created<T: Serialize> {
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> Created<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/api/accounts", accounts::routes::accounts_router())
        .nest("/api/wallets", wallets::routes::wallets_router())
        .nest("/api/assets", assets::routes::assets_router())
        .nest("/api/search", search::routes::search_router())
        .layer(from_fn(log_requests))
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Welcome to AlgoDesk!"
}
