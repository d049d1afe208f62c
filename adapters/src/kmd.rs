//! kmd-specific adapter implementation for wallet management.
//!
//! This file contains the concrete implementation of the `KmdAdapter` trait for
//! the key management daemon's v1 REST API: wallet creation, handle
//! initialisation, key generation and key export.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::address::Address;
use crate::errors::{AdapterError, AdapterResult};
use crate::http::RestClient;
use crate::KmdAdapter;

pub const TOKEN_HEADER: &str = "X-KMD-API-Token";
const WALLET_DRIVER: &str = "sqlite";

#[derive(Debug, Serialize)]
struct CreateWalletRequest<'a> {
    wallet_name: &'a str,
    wallet_password: &'a str,
    wallet_driver_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct WalletEntry {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CreateWalletResponse {
    wallet: WalletEntry,
}

#[derive(Debug, Deserialize)]
struct ListWalletsResponse {
    #[serde(default)]
    wallets: Option<Vec<WalletEntry>>,
}

#[derive(Debug, Serialize)]
struct InitHandleRequest<'a> {
    wallet_id: &'a str,
    wallet_password: &'a str,
}

#[derive(Debug, Deserialize)]
struct InitHandleResponse {
    wallet_handle_token: String,
}

#[derive(Debug, Serialize)]
struct GenerateKeyRequest<'a> {
    wallet_handle_token: &'a str,
    display_mnemonic: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateKeyResponse {
    address: Address,
}

#[derive(Debug, Serialize)]
struct ExportKeyRequest<'a> {
    address: &'a str,
    wallet_handle_token: &'a str,
    wallet_password: &'a str,
}

#[derive(Debug, Deserialize)]
struct ExportKeyResponse {
    private_key: String,
}

#[derive(Debug, Clone)]
pub struct KmdClient {
    rest: RestClient,
}

impl KmdClient {
    pub fn new(address: &str, token: &str) -> AdapterResult<Self> {
        Ok(Self {
            rest: RestClient::new("kmd", address, TOKEN_HEADER, token)?,
        })
    }

    async fn wallet_id(&self, name: &str) -> AdapterResult<String> {
        let resp: ListWalletsResponse = self.rest.get_json("/v1/wallets").await?;
        resp.wallets
            .unwrap_or_default()
            .into_iter()
            .find(|wallet| wallet.name == name)
            .map(|wallet| wallet.id)
            .ok_or_else(|| AdapterError::WalletNotFound(name.to_string()))
    }
}

#[async_trait]
impl KmdAdapter for KmdClient {
    async fn create_wallet(&self, name: &str, password: &str) -> AdapterResult<String> {
        let resp: CreateWalletResponse = self
            .rest
            .post_json(
                "/v1/wallet",
                &CreateWalletRequest {
                    wallet_name: name,
                    wallet_password: password,
                    wallet_driver_name: WALLET_DRIVER,
                },
            )
            .await?;
        log::info!("kmd created wallet {} ({})", resp.wallet.name, resp.wallet.id);
        Ok(resp.wallet.id)
    }

    async fn wallet_handle(&self, name: &str, password: &str) -> AdapterResult<String> {
        let wallet_id = self.wallet_id(name).await?;
        let resp: InitHandleResponse = self
            .rest
            .post_json(
                "/v1/wallet/init",
                &InitHandleRequest {
                    wallet_id: &wallet_id,
                    wallet_password: password,
                },
            )
            .await?;
        Ok(resp.wallet_handle_token)
    }

    async fn generate_key(&self, handle: &str) -> AdapterResult<Address> {
        let resp: GenerateKeyResponse = self
            .rest
            .post_json(
                "/v1/key",
                &GenerateKeyRequest {
                    wallet_handle_token: handle,
                    display_mnemonic: false,
                },
            )
            .await?;
        Ok(resp.address)
    }

    async fn export_key(
        &self,
        handle: &str,
        password: &str,
        address: &str,
    ) -> AdapterResult<Account> {
        let resp: ExportKeyResponse = self
            .rest
            .post_json(
                "/v1/key/export",
                &ExportKeyRequest {
                    address,
                    wallet_handle_token: handle,
                    wallet_password: password,
                },
            )
            .await?;
        Account::from_private_key_base64(&resp.private_key)
    }
}
