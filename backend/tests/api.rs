use std::sync::{Arc, Mutex};

use adapters::{
    Account, AdapterError, AdapterResult, Address, IndexerAdapter, KmdAdapter, NodeAdapter,
    NodeStatus, PendingTransaction, SandboxAccount, SandboxAdapter, SearchQuery,
    SignedTransaction, SuggestedParams, TransactionRecord, TxType,
};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use backend::config::Config;
use backend::database::Database;
use backend::services::node_manager::NodeManager;
use backend::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Node that answers every pending-transaction poll with the same status.
struct FakeNode {
    pending: PendingTransaction,
    submitted: Mutex<Vec<SignedTransaction>>,
}

impl FakeNode {
    fn answering(pending: PendingTransaction) -> Self {
        Self {
            pending,
            submitted: Mutex::new(Vec::new()),
        }
    }

    fn confirming() -> Self {
        Self::answering(PendingTransaction {
            confirmed_round: Some(101),
            asset_index: Some(42),
            ..Default::default()
        })
    }
}

#[async_trait]
impl NodeAdapter for FakeNode {
    async fn account_balance(&self, _address: &str) -> AdapterResult<u64> {
        Ok(5_000_000)
    }

    async fn suggested_params(&self) -> AdapterResult<SuggestedParams> {
        Ok(SuggestedParams {
            fee: 0,
            min_fee: 1000,
            first_valid: 100,
            last_valid: 1100,
            genesis_id: "sandnet-v1".into(),
            genesis_hash: vec![7u8; 32],
        })
    }

    async fn send_transaction(&self, signed: &SignedTransaction) -> AdapterResult<String> {
        self.submitted.lock().unwrap().push(signed.clone());
        signed.transaction.id()
    }

    async fn pending_transaction(&self, _txid: &str) -> AdapterResult<PendingTransaction> {
        Ok(self.pending.clone())
    }

    async fn status(&self) -> AdapterResult<NodeStatus> {
        Ok(NodeStatus { last_round: 100 })
    }

    async fn status_after_block(&self, round: u64) -> AdapterResult<NodeStatus> {
        Ok(NodeStatus {
            last_round: round + 1,
        })
    }
}

#[derive(Default)]
struct FakeIndexer {
    queries: Mutex<Vec<SearchQuery>>,
}

#[async_trait]
impl IndexerAdapter for FakeIndexer {
    async fn search_transactions(
        &self,
        query: &SearchQuery,
    ) -> AdapterResult<Vec<TransactionRecord>> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(vec![TransactionRecord {
            id: "TXID".into(),
            sender: query.address.clone().unwrap_or_default(),
            tx_type: "pay".into(),
            confirmed_round: Some(99),
            round_time: Some(1_700_000_000),
            fee: 1000,
            note: Some("SW5pdGlhbCBmdW5kcw==".into()),
            payment: None,
            created_asset_index: None,
        }])
    }
}

#[derive(Default)]
struct FakeKmd {
    keys: Mutex<Vec<Account>>,
}

#[async_trait]
impl KmdAdapter for FakeKmd {
    async fn create_wallet(&self, name: &str, _password: &str) -> AdapterResult<String> {
        if name == "broken" {
            return Err(AdapterError::Rpc {
                service: "kmd",
                status: 400,
                message: "wallet already exists".into(),
            });
        }
        Ok(format!("{name}-id"))
    }

    async fn wallet_handle(&self, name: &str, _password: &str) -> AdapterResult<String> {
        Ok(format!("{name}-handle"))
    }

    async fn generate_key(&self, _handle: &str) -> AdapterResult<Address> {
        let account = Account::generate();
        let address = account.address();
        self.keys.lock().unwrap().push(account);
        Ok(address)
    }

    async fn export_key(
        &self,
        _handle: &str,
        _password: &str,
        address: &str,
    ) -> AdapterResult<Account> {
        let keys = self.keys.lock().unwrap();
        let account = keys
            .iter()
            .find(|account| account.address().to_string() == address)
            .ok_or_else(|| AdapterError::InvalidKey(address.to_string()))?;
        Account::from_private_key_base64(&account.private_key_base64())
    }
}

struct FakeSandbox {
    funded: Account,
    balance: u64,
}

#[async_trait]
impl SandboxAdapter for FakeSandbox {
    async fn account_list(&self) -> AdapterResult<Vec<SandboxAccount>> {
        Ok(vec![
            SandboxAccount {
                address: Address::new([9u8; 32]).to_string(),
                balance: 10,
            },
            SandboxAccount {
                address: self.funded.address().to_string(),
                balance: self.balance,
            },
        ])
    }

    async fn export_passphrase(&self, address: &str) -> AdapterResult<String> {
        if address == self.funded.address().to_string() {
            Ok(self.funded.mnemonic())
        } else {
            Err(AdapterError::Sandbox(format!("unknown account {address}")))
        }
    }
}

struct Harness {
    router: Router,
    node: Arc<FakeNode>,
    indexer: Arc<FakeIndexer>,
    funded: Address,
}

const FUNDED_BALANCE: u64 = 4_000_000_000_000;

fn harness() -> Harness {
    harness_with(FakeNode::confirming(), FUNDED_BALANCE)
}

fn harness_with(node: FakeNode, funded_balance: u64) -> Harness {
    let node = Arc::new(node);
    let indexer = Arc::new(FakeIndexer::default());
    let funded = Account::generate();
    let funded_address = funded.address();
    let nodes = NodeManager::new(
        node.clone(),
        indexer.clone(),
        Arc::new(FakeKmd::default()),
        Arc::new(FakeSandbox {
            funded,
            balance: funded_balance,
        }),
    );
    let db = Database::open_in_memory().unwrap();
    let router = app(AppState::new(db, nodes, Config::default()));
    Harness {
        router,
        node,
        indexer,
        funded: funded_address,
    }
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

async fn create_account(router: &Router) -> (String, String) {
    let (status, body) = send(router, Method::POST, "/api/accounts", None).await;
    assert_eq!(status, StatusCode::CREATED);
    (
        body["address"].as_str().unwrap().to_string(),
        body["passphrase"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn root_greets() {
    let h = harness();
    let (status, body) = send(&h.router, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Welcome to AlgoDesk!");
}

#[tokio::test]
async fn created_accounts_are_listed_without_keys() {
    let h = harness();
    let (address, passphrase) = create_account(&h.router).await;
    assert_eq!(passphrase.split_whitespace().count(), 25);
    assert_eq!(
        Account::from_mnemonic(&passphrase).unwrap().address().to_string(),
        address
    );

    let (status, body) = send(&h.router, Method::GET, "/api/accounts", None).await;
    assert_eq!(status, StatusCode::OK);
    let accounts = body.as_array().unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0]["address"], address);
    assert!(accounts[0].get("private_key").is_none());
}

#[tokio::test]
async fn account_detail_combines_balance_and_history() {
    let h = harness();
    let (address, _) = create_account(&h.router).await;

    let uri = format!("/api/accounts/{address}");
    let (status, body) = send(&h.router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], address);
    assert_eq!(body["balance"], 5_000_000);
    assert_eq!(body["transactions"][0]["note_text"], "Initial funds");

    let queries = h.indexer.queries.lock().unwrap();
    assert_eq!(queries[0].address.as_deref(), Some(address.as_str()));
}

#[tokio::test]
async fn unknown_account_is_not_found() {
    let h = harness();
    let uri = format!("/api/accounts/{}", Address::new([3u8; 32]));
    let (status, body) = send(&h.router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn stored_account_passphrase_is_returned() {
    let h = harness();
    let (address, passphrase) = create_account(&h.router).await;
    let uri = format!("/api/accounts/{address}/passphrase");
    let (status, body) = send(&h.router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passphrase"], passphrase);
}

#[tokio::test]
async fn empty_transfer_form_is_rejected() {
    let h = harness();
    let (address, _) = create_account(&h.router).await;
    let uri = format!("/api/accounts/{address}/transfer");
    let (status, body) = send(&h.router, Method::POST, &uri, Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["passphrase"].is_array());
    assert!(body["errors"]["receiver"].is_array());
    assert!(body["errors"]["amount"].is_array());
    assert!(h.node.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn transfer_is_signed_and_confirmed() {
    let h = harness();
    let (address, passphrase) = create_account(&h.router).await;
    let receiver = Address::new([4u8; 32]).to_string();

    let uri = format!("/api/accounts/{address}/transfer");
    let form = json!({
        "passphrase": passphrase,
        "receiver": receiver,
        "amount": 2500,
        "note": "rent",
    });
    let (status, body) = send(&h.router, Method::POST, &uri, Some(form)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["amount"], 2500);
    assert_eq!(body["receiver"], receiver);
    assert_eq!(
        body["message"],
        format!("Amount of 2500 microAlgos has been successfully transferred to account {receiver}")
    );

    let submitted = h.node.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].transaction.sender.to_string(), address);
    assert_eq!(submitted[0].transaction.note, b"rent");
    assert_eq!(body["txid"], submitted[0].transaction.id().unwrap());
}

#[tokio::test]
async fn transfer_with_foreign_passphrase_is_a_field_error() {
    let h = harness();
    let (address, _) = create_account(&h.router).await;
    let uri = format!("/api/accounts/{address}/transfer");
    let form = json!({
        "passphrase": Account::generate().mnemonic(),
        "receiver": Address::new([4u8; 32]).to_string(),
        "amount": 1,
    });
    let (status, body) = send(&h.router, Method::POST, &uri, Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["passphrase"].is_array());
    assert!(h.node.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn initial_funds_come_from_a_funded_sandbox_account() {
    let h = harness();
    let (address, _) = create_account(&h.router).await;
    let uri = format!("/api/accounts/{address}/initial-funds");
    let (status, body) = send(&h.router, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["sender"], h.funded.to_string());
    assert_eq!(body["receiver"], address);
    assert_eq!(body["amount"], 1_000_000_000u64);

    let submitted = h.node.submitted.lock().unwrap();
    assert_eq!(submitted[0].transaction.sender, h.funded);
    assert_eq!(submitted[0].transaction.note, b"Initial funds");
}

#[tokio::test]
async fn wallet_lifecycle() {
    let h = harness();
    let form = json!({ "name": "savings", "password": "hunter22" });
    let (status, body) = send(&h.router, Method::POST, "/api/wallets", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["wallet_id"], "savings-id");
    assert!(body.get("password").is_none());

    let (status, body) = send(
        &h.router,
        Method::POST,
        "/api/wallets/savings-id/accounts",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let address = body["address"].as_str().unwrap().to_string();

    let (status, body) = send(&h.router, Method::GET, "/api/wallets/savings-id", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "savings");
    assert_eq!(body["accounts"][0]["address"], address);

    let uri = format!("/api/wallets/savings-id/accounts/{address}");
    let (status, body) = send(&h.router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], 5_000_000);

    let uri = format!("/api/accounts/{address}/passphrase");
    let (status, body) = send(&h.router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let phrase = body["passphrase"].as_str().unwrap();
    assert_eq!(
        Account::from_mnemonic(phrase).unwrap().address().to_string(),
        address
    );

    // Wallet accounts stay out of the standalone list.
    let (_, body) = send(&h.router, Method::GET, "/api/accounts", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn standalone_account_is_not_part_of_a_wallet() {
    let h = harness();
    let form = json!({ "name": "savings", "password": "hunter22" });
    send(&h.router, Method::POST, "/api/wallets", Some(form)).await;
    let (address, _) = create_account(&h.router).await;

    let uri = format!("/api/wallets/savings-id/accounts/{address}");
    let (status, _) = send(&h.router, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn kmd_refusal_is_a_form_error() {
    let h = harness();
    let form = json!({ "name": "broken", "password": "hunter22" });
    let (status, body) = send(&h.router, Method::POST, "/api/wallets", Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["__all__"][0], "Wallet is not created!");

    let (_, body) = send(&h.router, Method::GET, "/api/wallets", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn weak_wallet_password_is_rejected() {
    let h = harness();
    let form = json!({ "name": "savings", "password": "123456" });
    let (status, body) = send(&h.router, Method::POST, "/api/wallets", Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["password"].is_array());
}

#[tokio::test]
async fn asset_creation_records_the_asset() {
    let h = harness();
    let (creator, passphrase) = create_account(&h.router).await;
    let form = json!({
        "creator": creator,
        "passphrase": passphrase,
        "name": "Gold",
        "unit": "GLD",
        "total": 1000,
        "decimals": 2,
        "manager": creator,
    });
    let (status, body) = send(&h.router, Method::POST, "/api/assets", Some(form)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["asset_id"], 42);
    assert_eq!(body["message"], "Asset Gold has been successfully created!");

    let (status, body) = send(&h.router, Method::GET, "/api/assets", None).await;
    assert_eq!(status, StatusCode::OK);
    let assets = body.as_array().unwrap();
    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0]["unit"], "GLD");
    assert_eq!(assets[0]["manager"], creator);
    assert_eq!(assets[0]["reserve"], "");
}

#[tokio::test]
async fn search_needs_at_least_one_field() {
    let h = harness();
    let (status, body) = send(&h.router, Method::POST, "/api/search", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"]["__all__"][0],
        "You must fill at least one field!"
    );
    assert!(h.indexer.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn search_forwards_filters_to_the_indexer() {
    let h = harness();
    let form = json!({ "note_prefix": "Initial", "txn_type": "pay", "block": "99" });
    let (status, body) = send(&h.router, Method::POST, "/api/search", Some(form)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["transactions"][0]["id"], "TXID");

    let queries = h.indexer.queries.lock().unwrap();
    assert_eq!(queries[0].note_prefix, b"Initial");
    assert_eq!(queries[0].tx_type, Some(TxType::Pay));
    assert_eq!(queries[0].round, Some(99));
}

#[tokio::test]
async fn initial_funds_fail_when_no_sandbox_account_has_enough() {
    // The richest account holds exactly the initial amount, which is not enough.
    let h = harness_with(FakeNode::confirming(), Config::default().initial_funds);
    let (address, _) = create_account(&h.router).await;
    let uri = format!("/api/accounts/{address}/initial-funds");
    let (status, body) = send(&h.router, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Initial funds weren't transferred!");
    assert!(h.node.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn pool_error_on_transfer_is_a_form_error() {
    let h = harness_with(
        FakeNode::answering(PendingTransaction {
            pool_error: "overspend".into(),
            ..Default::default()
        }),
        FUNDED_BALANCE,
    );
    let (address, passphrase) = create_account(&h.router).await;
    let uri = format!("/api/accounts/{address}/transfer");
    let form = json!({
        "passphrase": passphrase,
        "receiver": Address::new([4u8; 32]).to_string(),
        "amount": 10,
    });
    let (status, body) = send(&h.router, Method::POST, &uri, Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["__all__"][0], "Pool error: overspend");
    assert_eq!(h.node.submitted.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn unconfirmed_transfer_times_out_as_a_form_error() {
    let h = harness_with(FakeNode::answering(PendingTransaction::default()), FUNDED_BALANCE);
    let (address, passphrase) = create_account(&h.router).await;
    let uri = format!("/api/accounts/{address}/transfer");
    let form = json!({
        "passphrase": passphrase,
        "receiver": Address::new([4u8; 32]).to_string(),
        "amount": "10",
    });
    let (status, body) = send(&h.router, Method::POST, &uri, Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"]["__all__"][0],
        "Transaction not confirmed after 4 rounds"
    );
}

#[tokio::test]
async fn pool_error_on_asset_creation_records_nothing() {
    let h = harness_with(
        FakeNode::answering(PendingTransaction {
            pool_error: "asset name too long".into(),
            ..Default::default()
        }),
        FUNDED_BALANCE,
    );
    let (creator, passphrase) = create_account(&h.router).await;
    let form = json!({
        "creator": creator,
        "passphrase": passphrase,
        "name": "Gold",
        "unit": "GLD",
        "total": "1000",
        "decimals": 0,
    });
    let (status, body) = send(&h.router, Method::POST, "/api/assets", Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["__all__"][0], "Pool error: asset name too long");

    let (_, body) = send(&h.router, Method::GET, "/api/assets", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn asset_confirmed_without_index_is_an_upstream_failure() {
    let h = harness_with(
        FakeNode::answering(PendingTransaction {
            confirmed_round: Some(101),
            ..Default::default()
        }),
        FUNDED_BALANCE,
    );
    let (creator, passphrase) = create_account(&h.router).await;
    let form = json!({
        "creator": creator,
        "passphrase": passphrase,
        "name": "Gold",
        "unit": "GLD",
        "total": 1000,
        "decimals": 0,
    });
    let (status, body) = send(&h.router, Method::POST, "/api/assets", Some(form)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("asset index"));
}

#[tokio::test]
async fn malformed_amount_is_a_field_error() {
    let h = harness();
    let (address, passphrase) = create_account(&h.router).await;
    let uri = format!("/api/accounts/{address}/transfer");
    let form = json!({
        "passphrase": passphrase,
        "receiver": Address::new([4u8; 32]).to_string(),
        "amount": "abc",
    });
    let (status, body) = send(&h.router, Method::POST, &uri, Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"]["amount"][0], "Enter a whole number.");
    assert!(h.node.submitted.lock().unwrap().is_empty());
}

#[tokio::test]
async fn numeric_block_filter_is_accepted() {
    let h = harness();
    let (status, body) =
        send(&h.router, Method::POST, "/api/search", Some(json!({ "block": 99 }))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(h.indexer.queries.lock().unwrap()[0].round, Some(99));
}

#[tokio::test]
async fn missing_body_is_reported_as_form_error() {
    let h = harness();
    let (status, body) = send(&h.router, Method::POST, "/api/wallets", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["__all__"][0].is_string());
}

#[tokio::test]
async fn malformed_json_is_reported_as_form_error() {
    let h = harness();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/search")
        .header("content-type", "application/json")
        .body(Body::from("{\"address\": "))
        .unwrap();
    let response = h.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["errors"]["__all__"][0].is_string());
}

#[tokio::test]
async fn wrongly_typed_text_field_is_reported_as_form_error() {
    let h = harness();
    let form = json!({ "name": 5, "password": "hunter22" });
    let (status, body) = send(&h.router, Method::POST, "/api/wallets", Some(form)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["errors"]["__all__"][0]
        .as_str()
        .unwrap()
        .contains("name"));
}
