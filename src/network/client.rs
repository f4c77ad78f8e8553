//! Ledger node client - typed request/response bindings over reqwest
//!
//! One method per remote operation. Every call is single-shot and fails
//! closed: transport errors, non-2xx statuses and undecodable bodies all
//! collapse into a `NetworkError` carrying the operation's identity.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{
    Block, ChainStatus, DraftTransaction, NetworkError, Operation, Transaction, Wallet,
};

/// Wire wrapper for the wallets listing
#[derive(Debug, Deserialize)]
struct WalletList {
    wallets: Vec<Wallet>,
}

#[derive(Debug, Serialize)]
struct MineRequest<'a> {
    address: &'a str,
}

/// Typed client for the ledger node's REST API
#[derive(Clone)]
pub struct LedgerClient {
    client: reqwest::Client,
    config: Config,
}

impl LedgerClient {
    pub fn new(config: Config) -> Self {
        LedgerClient {
            client: create_client(),
            config,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_url
    }

    pub async fn status(&self) -> Result<ChainStatus, NetworkError> {
        self.get(Operation::Status, "/blockchain/status").await
    }

    pub async fn pending_transactions(&self) -> Result<Vec<Transaction>, NetworkError> {
        self.get(Operation::PendingTransactions, "/pending-transactions")
            .await
    }

    /// Blocks in chain order, oldest first. Never reordered client-side.
    pub async fn blocks(&self) -> Result<Vec<Block>, NetworkError> {
        self.get(Operation::Blocks, "/blocks").await
    }

    pub async fn wallets(&self) -> Result<Vec<Wallet>, NetworkError> {
        let list: WalletList = self.get(Operation::Wallets, "/wallets").await?;
        Ok(list.wallets)
    }

    /// The node generates the address/key pair; no request body.
    pub async fn create_wallet(&self) -> Result<Wallet, NetworkError> {
        let operation = Operation::CreateWallet;
        let response = self
            .client
            .post(self.config.endpoint("/wallet/create"))
            .send()
            .await
            .map_err(|e| request_error(operation, &e))?;
        decode(operation, response).await
    }

    /// Signature and balance checks happen on the node; failure reasons are
    /// opaque here. The acknowledgement body is not consumed.
    pub async fn submit_transaction(&self, draft: &DraftTransaction) -> Result<(), NetworkError> {
        self.post_ack(Operation::SubmitTransaction, "/transaction", draft)
            .await
    }

    pub async fn mine_block(&self, miner_address: &str) -> Result<(), NetworkError> {
        self.post_ack(
            Operation::MineBlock,
            "/mine",
            &MineRequest {
                address: miner_address,
            },
        )
        .await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
    ) -> Result<T, NetworkError> {
        let response = self
            .client
            .get(self.config.endpoint(path))
            .send()
            .await
            .map_err(|e| request_error(operation, &e))?;
        decode(operation, response).await
    }

    async fn post_ack<B: Serialize>(
        &self,
        operation: Operation,
        path: &str,
        body: &B,
    ) -> Result<(), NetworkError> {
        let response = self
            .client
            .post(self.config.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(|e| request_error(operation, &e))?;
        check_status(operation, &response)?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(
    operation: Operation,
    response: reqwest::Response,
) -> Result<T, NetworkError> {
    check_status(operation, &response)?;
    response
        .json::<T>()
        .await
        .map_err(|e| NetworkError::new(operation, format!("Invalid response body: {}", e)))
}

fn check_status(operation: Operation, response: &reqwest::Response) -> Result<(), NetworkError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        // The server error body is deliberately not parsed
        Err(NetworkError::new(
            operation,
            format!("Server returned {}", status),
        ))
    }
}

fn request_error(operation: Operation, e: &reqwest::Error) -> NetworkError {
    let cause = if e.is_timeout() {
        String::from("Request timed out (30s)")
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    };
    NetworkError::new(operation, cause)
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_list_unwraps_envelope() {
        let json = r#"{"wallets":[{"address":"a","private_key":"k","balance":100.0}]}"#;
        let list: WalletList = serde_json::from_str(json).unwrap();
        assert_eq!(list.wallets.len(), 1);
        assert_eq!(list.wallets[0].address, "a");
    }

    #[test]
    fn test_mine_request_wire_format() {
        let body = MineRequest { address: "miner" };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"address":"miner"}"#
        );
    }
}
