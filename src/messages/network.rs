//! Network messages - communication between App and Network layers

use crate::models::{
    Block, ChainStatus, DraftTransaction, NetworkError, Resource, Transaction, Wallet,
};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch one resource from the node
    Fetch { id: u64, resource: Resource },
    /// Ask the node to generate a new wallet
    CreateWallet { id: u64 },
    /// Submit a signed transaction draft
    SubmitTransaction { id: u64, draft: DraftTransaction },
    /// Ask the node to mine the pending transactions
    MineBlock { id: u64, miner_address: String },
    /// Shutdown the network actor
    Shutdown,
}

/// One whole resource payload. A fetch either yields a complete value or
/// nothing; partial results never cross this boundary.
#[derive(Debug, Clone)]
pub enum ResourcePayload {
    Status(ChainStatus),
    PendingTransactions(Vec<Transaction>),
    Blocks(Vec<Block>),
    Wallets(Vec<Wallet>),
}

impl ResourcePayload {
    pub fn resource(&self) -> Resource {
        match self {
            ResourcePayload::Status(_) => Resource::Status,
            ResourcePayload::PendingTransactions(_) => Resource::PendingTransactions,
            ResourcePayload::Blocks(_) => Resource::Blocks,
            ResourcePayload::Wallets(_) => Resource::Wallets,
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A resource fetch completed with a full payload
    Fetched { id: u64, payload: ResourcePayload },
    /// A resource fetch failed; the store keeps its prior value
    FetchFailed {
        id: u64,
        resource: Resource,
        error: NetworkError,
    },
    /// Wallet creation succeeded; the wallet carries its one-time private key
    WalletCreated { id: u64, wallet: Wallet },
    /// Wallet creation failed
    WalletCreateFailed { id: u64, error: NetworkError },
    /// The node accepted a submitted transaction
    TransactionAccepted { id: u64 },
    /// The node rejected a submitted transaction (or the call failed)
    TransactionRejected { id: u64, error: NetworkError },
    /// A block was mined from the pending transactions
    BlockMined { id: u64 },
    /// Mining failed
    MiningFailed { id: u64, error: NetworkError },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Fetched { id, .. } => *id,
            NetworkResponse::FetchFailed { id, .. } => *id,
            NetworkResponse::WalletCreated { id, .. } => *id,
            NetworkResponse::WalletCreateFailed { id, .. } => *id,
            NetworkResponse::TransactionAccepted { id } => *id,
            NetworkResponse::TransactionRejected { id, .. } => *id,
            NetworkResponse::BlockMined { id } => *id,
            NetworkResponse::MiningFailed { id, .. } => *id,
        }
    }
}
