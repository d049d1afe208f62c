//! Sandbox adapter: runs `goal` through the sandbox wrapper script.
//!
//! The sandbox's developer accounts only exist inside the node container, so
//! listing them and exporting their recovery phrases goes through the command
//! line tool rather than a REST API.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;

use crate::errors::{AdapterError, AdapterResult};
use crate::models::SandboxAccount;
use crate::SandboxAdapter;

#[derive(Debug, Clone)]
pub struct SandboxCli {
    executable: PathBuf,
}

impl SandboxCli {
    /// `sandbox_dir` is the checkout holding the `sandbox` script.
    pub fn new(sandbox_dir: impl AsRef<Path>) -> Self {
        Self {
            executable: sandbox_dir.as_ref().join("sandbox"),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    async fn run(&self, args: &[&str]) -> AdapterResult<String> {
        log::debug!("running {} {}", self.executable.display(), args.join(" "));
        let output = Command::new(&self.executable)
            .args(args)
            .output()
            .await
            .map_err(|err| {
                AdapterError::Sandbox(format!(
                    "cannot run {}: {}",
                    self.executable.display(),
                    err
                ))
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AdapterError::Sandbox(format!(
                "`{}` exited with {}: {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parses `goal account list` output; lines that do not fit the
/// `[status] address address balance microAlgos` layout are skipped.
pub fn parse_account_list(output: &str) -> Vec<SandboxAccount> {
    output
        .lines()
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            let address = columns.get(1)?;
            let balance = columns.get(3)?.parse::<u64>().ok()?;
            Some(SandboxAccount {
                address: (*address).to_string(),
                balance,
            })
        })
        .collect()
}

/// Extracts the quoted phrase from `goal account export` output.
pub fn parse_exported_passphrase(output: &str) -> Option<String> {
    let start = output.find('"')?;
    let end = output.rfind('"')?;
    if end <= start + 1 {
        return None;
    }
    Some(output[start + 1..end].trim().to_string())
}

#[async_trait]
impl SandboxAdapter for SandboxCli {
    async fn account_list(&self) -> AdapterResult<Vec<SandboxAccount>> {
        let output = self.run(&["goal", "account", "list"]).await?;
        Ok(parse_account_list(&output))
    }

    async fn export_passphrase(&self, address: &str) -> AdapterResult<String> {
        let output = self
            .run(&["goal", "account", "export", "-a", address])
            .await?;
        parse_exported_passphrase(&output).ok_or_else(|| {
            AdapterError::Sandbox(format!("no recovery phrase in export of {address}"))
        })
    }
}
