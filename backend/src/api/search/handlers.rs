//! Handler functions for transaction search.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::FormBody;
use crate::errors::AppResult;
use crate::forms::SearchTransactionsForm;
use crate::services::data_aggregator::TransactionView;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub transactions: Vec<TransactionView>,
}

pub async fn search_transactions(
    State(state): State<AppState>,
    FormBody(form): FormBody<SearchTransactionsForm>,
) -> AppResult<Json<SearchResults>> {
    let query = form.validate()?;
    let transactions = state
        .nodes
        .indexer
        .search_transactions(&query)
        .await?
        .into_iter()
        .map(TransactionView::from)
        .collect();
    Ok(Json(SearchResults { transactions }))
}
