//! Handler functions for the asset API.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::api::{Created, FormBody};
use crate::database::models::{AssetRow, NewAsset};
use crate::database::queries;
use crate::errors::AppResult;
use crate::forms::CreateAssetForm;
use crate::services::ledger;
use crate::AppState;

fn address_or_empty(address: Option<adapters::Address>) -> String {
    address.map(|a| a.to_string()).unwrap_or_default()
}

pub async fn list_assets(State(state): State<AppState>) -> AppResult<Json<Vec<AssetRow>>> {
    Ok(Json(state.db.call(queries::list_assets).await?))
}

pub async fn create_asset(
    State(state): State<AppState>,
    FormBody(form): FormBody<CreateAssetForm>,
) -> AppResult<(StatusCode, Json<Created<AssetRow>>)> {
    let request = form.validate()?;
    let asset_id = ledger::add_asset(
        state.nodes.node.as_ref(),
        &request,
        state.config.confirmation_rounds,
    )
    .await?;

    let asset = NewAsset {
        asset_id,
        creator: request.creator.to_string(),
        name: request.name.clone(),
        unit: request.unit.clone(),
        total: request.total,
        decimals: request.decimals,
        frozen: request.frozen,
        url: request.url.clone(),
        metadata: request.metadata.clone(),
        manager: address_or_empty(request.manager),
        reserve: address_or_empty(request.reserve),
        freeze: address_or_empty(request.freeze),
        clawback: address_or_empty(request.clawback),
    };
    let row = state
        .db
        .call(|conn| queries::insert_asset(conn, &asset))
        .await?;
    tracing::info!(asset_id, name = %row.asset.name, "recorded asset");

    let message = format!("Asset {} has been successfully created!", row.asset.name);
    Ok((StatusCode::CREATED, Json(Created::new(message, row))))
}
