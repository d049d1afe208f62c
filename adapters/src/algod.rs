//! algod-specific adapter implementation.
//!
//! This file contains the concrete implementation of the `NodeAdapter` trait for
//! an algod node's v2 REST API, including request construction and the
//! conversion of node responses into the crate's models.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::Deserialize;

use crate::errors::AdapterResult;
use crate::http::RestClient;
use crate::models::{
    NodeStatus, PendingTransaction, SuggestedParams, TransactionParamsResponse,
};
use crate::transaction::SignedTransaction;
use crate::NodeAdapter;

pub const TOKEN_HEADER: &str = "X-Algo-API-Token";

#[derive(Debug, Deserialize)]
struct AccountResponse {
    amount: u64,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(rename = "txId")]
    tx_id: String,
}

#[derive(Debug, Clone)]
pub struct AlgodClient {
    rest: RestClient,
}

impl AlgodClient {
    pub fn new(address: &str, token: &str) -> AdapterResult<Self> {
        Ok(Self {
            rest: RestClient::new("algod", address, TOKEN_HEADER, token)?,
        })
    }
}

#[async_trait]
impl NodeAdapter for AlgodClient {
    async fn account_balance(&self, address: &str) -> AdapterResult<u64> {
        let account: AccountResponse = self
            .rest
            .get_json(&format!("/v2/accounts/{address}?exclude=all"))
            .await?;
        Ok(account.amount)
    }

    async fn suggested_params(&self) -> AdapterResult<SuggestedParams> {
        let resp: TransactionParamsResponse =
            self.rest.get_json("/v2/transactions/params").await?;
        SuggestedParams::try_from(resp)
    }

    async fn send_transaction(&self, signed: &SignedTransaction) -> AdapterResult<String> {
        let body = signed.to_bytes()?;
        log::debug!(
            "submitting {} byte transaction signed {}",
            body.len(),
            signed.signature_hex()
        );
        let request = self
            .rest
            .request(Method::POST, "/v2/transactions")
            .header(CONTENT_TYPE, "application/x-binary")
            .body(body);
        let resp: SubmitResponse = self.rest.send_json(request).await?;
        log::info!("{} accepted transaction {}", self.rest.service(), resp.tx_id);
        Ok(resp.tx_id)
    }

    async fn pending_transaction(&self, txid: &str) -> AdapterResult<PendingTransaction> {
        self.rest
            .get_json(&format!("/v2/transactions/pending/{txid}?format=json"))
            .await
    }

    async fn status(&self) -> AdapterResult<NodeStatus> {
        self.rest.get_json("/v2/status").await
    }

    async fn status_after_block(&self, round: u64) -> AdapterResult<NodeStatus> {
        self.rest
            .get_json(&format!("/v2/status/wait-for-block-after/{round}"))
            .await
    }
}
