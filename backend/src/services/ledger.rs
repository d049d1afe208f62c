//! Submitting transactions and waiting for the node to confirm them.
//!
//! Signing happens locally from the recovery phrase the user supplied; the
//! node only sees the signed bytes. Confirmation is a bounded poll: the node is
//! asked for the pending transaction once per round for at most `timeout`
//! rounds, with no retry of the submission itself.

use adapters::{
    Account, AdapterError, Address, MnemonicError, NodeAdapter, PendingTransaction,
    SandboxAdapter, Transaction, MNEMONIC_LEN,
};
use thiserror::Error;

use crate::errors::AppError;
use crate::forms::{AssetRequest, ValidationErrors};
use crate::services::node_manager::NodeManager;

pub const INITIAL_FUNDS_NOTE: &str = "Initial funds";

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The recovery phrase cannot be used to sign for the sender.
    #[error("{0}")]
    Passphrase(String),
    /// The node rejected or never confirmed the transaction.
    #[error("{0}")]
    Submission(String),
    /// The node accepted the transaction but answered in an unexpected shape.
    #[error("{0}")]
    Upstream(String),
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl From<MnemonicError> for LedgerError {
    fn from(err: MnemonicError) -> Self {
        let message = match err {
            MnemonicError::WrongChecksum | MnemonicError::WrongKeyLength => {
                "Checksum failed to validate".to_string()
            }
            MnemonicError::UnknownWord(_) => "Unknown word in passphrase".to_string(),
            MnemonicError::WrongLength { .. } => {
                format!("Passphrase must have exactly {MNEMONIC_LEN} words!")
            }
        };
        LedgerError::Passphrase(message)
    }
}

/// Passphrase problems are reported on the form's `passphrase` field, node
/// failures as form-level errors.
impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Passphrase(message) => {
                AppError::Validation(ValidationErrors::field("passphrase", message))
            }
            LedgerError::Submission(message) => {
                AppError::Validation(ValidationErrors::non_field(message))
            }
            LedgerError::Upstream(message) => AppError::Upstream(message),
            LedgerError::Adapter(err) => AppError::Adapter(err),
        }
    }
}

fn submission(err: AdapterError) -> LedgerError {
    match err {
        AdapterError::Rpc { message, .. } => LedgerError::Submission(message),
        other => LedgerError::Submission(other.to_string()),
    }
}

/// Decodes `passphrase` and checks it controls `sender`.
fn signer_for(sender: &Address, passphrase: &str) -> Result<Account, LedgerError> {
    let account = Account::from_mnemonic(passphrase)?;
    if account.address() != *sender {
        return Err(LedgerError::Passphrase(
            "Passphrase does not belong to the sender account".to_string(),
        ));
    }
    Ok(account)
}

/// Polls the node until `txid` is confirmed, its pool reports an error, or
/// `timeout` rounds pass.
pub async fn wait_for_confirmation(
    node: &dyn NodeAdapter,
    txid: &str,
    timeout: u64,
) -> Result<PendingTransaction, LedgerError> {
    let start_round = node.status().await.map_err(submission)?.last_round + 1;
    let mut current_round = start_round;

    while current_round < start_round + timeout {
        let pending = node.pending_transaction(txid).await.map_err(submission)?;
        if pending.is_confirmed() {
            tracing::info!(
                txid,
                round = pending.confirmed_round.unwrap_or_default(),
                "transaction confirmed"
            );
            return Ok(pending);
        }
        if !pending.pool_error.is_empty() {
            return Err(LedgerError::Submission(format!(
                "Pool error: {}",
                pending.pool_error
            )));
        }
        tracing::debug!(txid, round = current_round, "waiting for confirmation");
        node.status_after_block(current_round)
            .await
            .map_err(submission)?;
        current_round += 1;
    }

    tracing::warn!(txid, timeout, "transaction not confirmed in time");
    Err(LedgerError::Submission(format!(
        "Transaction not confirmed after {timeout} rounds"
    )))
}

/// Transfers `amount` microAlgos from `sender` to `receiver`, signing with
/// `passphrase`, and waits for confirmation. Returns the transaction id.
pub async fn add_transaction(
    node: &dyn NodeAdapter,
    sender: &Address,
    receiver: &Address,
    passphrase: &str,
    amount: u64,
    note: &str,
    timeout: u64,
) -> Result<String, LedgerError> {
    let signer = signer_for(sender, passphrase)?;
    let params = node.suggested_params().await.map_err(submission)?;
    let txn = Transaction::payment(*sender, *receiver, amount, note.as_bytes().to_vec(), &params)?;
    let signed = signer.sign(&txn)?;
    let txid = node.send_transaction(&signed).await.map_err(submission)?;
    tracing::info!(%sender, %receiver, amount, txid = %txid, "payment submitted");
    wait_for_confirmation(node, &txid, timeout).await?;
    Ok(txid)
}

/// Creates the asset described by `request` and returns its asset index.
pub async fn add_asset(
    node: &dyn NodeAdapter,
    request: &AssetRequest,
    timeout: u64,
) -> Result<u64, LedgerError> {
    let signer = signer_for(&request.creator, &request.passphrase)?;
    let params = node.suggested_params().await.map_err(submission)?;
    let txn = Transaction::asset_config(request.creator, request.params(), &params)?;
    let signed = signer.sign(&txn)?;
    let txid = node.send_transaction(&signed).await.map_err(submission)?;
    tracing::info!(creator = %request.creator, name = %request.name, txid = %txid, "asset creation submitted");

    let pending = wait_for_confirmation(node, &txid, timeout).await?;
    pending.asset_index.ok_or_else(|| {
        tracing::error!(txid = %txid, "confirmed asset creation without an asset index");
        LedgerError::Upstream(format!(
            "Transaction {txid} was confirmed but the node did not report the created asset index"
        ))
    })
}

/// First sandbox account holding more than `amount` microAlgos.
pub async fn initial_funds_sender(
    sandbox: &dyn SandboxAdapter,
    amount: u64,
) -> Result<Option<String>, AdapterError> {
    let accounts = sandbox.account_list().await?;
    Ok(accounts
        .into_iter()
        .find(|account| account.balance > amount)
        .map(|account| account.address))
}

/// Funds `receiver` from a sandbox developer account and returns the sender
/// and transaction id. `Ok(None)` means no sandbox account could cover `amount`.
pub async fn initial_funds(
    nodes: &NodeManager,
    receiver: &Address,
    amount: u64,
    timeout: u64,
) -> Result<Option<(Address, String)>, LedgerError> {
    let Some(sender) = initial_funds_sender(nodes.sandbox.as_ref(), amount).await? else {
        tracing::warn!(%receiver, amount, "no sandbox account can provide initial funds");
        return Ok(None);
    };
    let sender: Address = sender
        .parse()
        .map_err(|err| LedgerError::Adapter(AdapterError::Address(err)))?;
    let passphrase = nodes.sandbox.export_passphrase(&sender.to_string()).await?;
    let txid = add_transaction(
        nodes.node.as_ref(),
        &sender,
        receiver,
        &passphrase,
        amount,
        INITIAL_FUNDS_NOTE,
        timeout,
    )
    .await?;
    Ok(Some((sender, txid)))
}
