//! Shared JSON-over-HTTP plumbing for the algod, indexer and kmd clients.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::{AdapterError, AdapterResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// A REST endpoint authenticated by a static API token header.
#[derive(Debug, Clone)]
pub(crate) struct RestClient {
    service: &'static str,
    base_url: String,
    token_header: &'static str,
    token: String,
    client: Client,
}

impl RestClient {
    pub(crate) fn new(
        service: &'static str,
        base_url: &str,
        token_header: &'static str,
        token: &str,
    ) -> AdapterResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| AdapterError::ConnectionError(err.to_string()))?;
        Ok(Self {
            service,
            base_url: base_url.trim_end_matches('/').to_string(),
            token_header,
            token: token.to_string(),
            client,
        })
    }

    pub(crate) fn service(&self) -> &'static str {
        self.service
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("{} {} {}", self.service, method, url);
        self.client
            .request(method, url)
            .header(self.token_header, &self.token)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AdapterResult<T> {
        self.send_json(self.request(Method::GET, path)).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AdapterResult<T> {
        self.send_json(self.request(Method::POST, path).json(body))
            .await
    }

    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> AdapterResult<T> {
        let response = request
            .send()
            .await
            .map_err(|err| AdapterError::ConnectionError(format!("{}: {}", self.service, err)))?;
        let response = self.check_status(response).await?;
        response.json::<T>().await.map_err(|err| AdapterError::Decode {
            service: self.service,
            reason: err.to_string(),
        })
    }

    /// Turns non-2xx responses into `AdapterError::Rpc` carrying the service's message.
    async fn check_status(&self, response: Response) -> AdapterResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .ok()
            .filter(|message| !message.is_empty())
            .unwrap_or(text);
        log::warn!("{} request failed with {}: {}", self.service, status, message);
        Err(AdapterError::Rpc {
            service: self.service,
            status: status.as_u16(),
            message,
        })
    }
}
