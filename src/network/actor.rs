//! Network actor - runs ledger node calls in the Tokio async runtime
//!
//! Each command spawns an independent task, so concurrent fetches from a
//! refresh-all proceed in parallel. There is no cancellation: once issued, a
//! call runs to completion or failure and reports exactly once.

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse, ResourcePayload};
use crate::models::Resource;
use crate::network::client::LedgerClient;

/// Network actor that processes fetch and workflow commands
pub struct NetworkActor {
    client: LedgerClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: LedgerClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Fetch { id, resource }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, resource = resource.as_str(), "Fetching resource");
                                let response = fetch_resource(&client, id, resource).await;
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::CreateWallet { id }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, "Creating wallet");
                                let response = match client.create_wallet().await {
                                    Ok(wallet) => NetworkResponse::WalletCreated { id, wallet },
                                    Err(error) => NetworkResponse::WalletCreateFailed { id, error },
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::SubmitTransaction { id, draft }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, from = %draft.from_address, to = %draft.to_address, "Submitting transaction");
                                // The draft is dropped at the end of this task
                                // regardless of outcome
                                let response = match client.submit_transaction(&draft).await {
                                    Ok(()) => NetworkResponse::TransactionAccepted { id },
                                    Err(error) => NetworkResponse::TransactionRejected { id, error },
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::MineBlock { id, miner_address }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, miner = %miner_address, "Mining block");
                                let response = match client.mine_block(&miner_address).await {
                                    Ok(()) => NetworkResponse::BlockMined { id },
                                    Err(error) => NetworkResponse::MiningFailed { id, error },
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {
                    // Task completed - responses were already sent
                }
            }
        }
    }
}

async fn fetch_resource(client: &LedgerClient, id: u64, resource: Resource) -> NetworkResponse {
    let result = match resource {
        Resource::Status => client.status().await.map(ResourcePayload::Status),
        Resource::PendingTransactions => client
            .pending_transactions()
            .await
            .map(ResourcePayload::PendingTransactions),
        Resource::Blocks => client.blocks().await.map(ResourcePayload::Blocks),
        Resource::Wallets => client.wallets().await.map(ResourcePayload::Wallets),
    };

    match result {
        Ok(payload) => {
            tracing::info!(id, resource = resource.as_str(), "Resource fetched");
            NetworkResponse::Fetched { id, payload }
        }
        Err(error) => {
            tracing::warn!(id, resource = resource.as_str(), %error, "Fetch failed");
            NetworkResponse::FetchFailed {
                id,
                resource,
                error,
            }
        }
    }
}
