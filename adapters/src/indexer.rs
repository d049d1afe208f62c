//! Indexer adapter: historical transaction search over the v2 REST API.

use async_trait::async_trait;
use reqwest::Method;

use crate::errors::AdapterResult;
use crate::http::RestClient;
use crate::models::{SearchQuery, TransactionRecord, TransactionsResponse};
use crate::IndexerAdapter;

pub const TOKEN_HEADER: &str = "X-Indexer-API-Token";

#[derive(Debug, Clone)]
pub struct IndexerClient {
    rest: RestClient,
}

impl IndexerClient {
    pub fn new(address: &str, token: &str) -> AdapterResult<Self> {
        Ok(Self {
            rest: RestClient::new("indexer", address, TOKEN_HEADER, token)?,
        })
    }
}

#[async_trait]
impl IndexerAdapter for IndexerClient {
    async fn search_transactions(
        &self,
        query: &SearchQuery,
    ) -> AdapterResult<Vec<TransactionRecord>> {
        let request = self
            .rest
            .request(Method::GET, "/v2/transactions")
            .query(&query.to_query_pairs());
        let resp: TransactionsResponse = self.rest.send_json(request).await?;
        log::debug!("indexer returned {} transactions", resp.transactions.len());
        Ok(resp.transactions)
    }
}
