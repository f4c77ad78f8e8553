use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot of the remote chain's headline numbers.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChainStatus {
    pub chain_length: u64,
    pub pending_transactions: u64,
    pub difficulty: u64,
    pub mining_reward: f64,
    pub is_valid: bool,
}

/// A transaction as reported by the node.
///
/// An empty `from_address` marks a mining reward (no sender). Transactions
/// carry no id, so lists are rendered by position and never keyed.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub from_address: String,
    pub to_address: String,
    pub amount: f64,
    /// Unix seconds. The node reports fractional seconds.
    pub timestamp: f64,
    #[serde(default)]
    pub signature: String,
}

impl Transaction {
    pub fn is_mining_reward(&self) -> bool {
        self.from_address.is_empty()
    }
}

/// A mined block. Blocks arrive in chain order, oldest first.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Block {
    pub hash: String,
    pub previous_hash: String,
    pub timestamp: f64,
    pub transactions: Vec<Transaction>,
    pub nonce: u64,
    pub difficulty: u64,
}

/// A wallet known to the node. The private key is only meaningful on the
/// create-wallet path; the wallets listing is not relied on to carry it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Wallet {
    pub address: String,
    #[serde(default)]
    pub private_key: String,
    pub balance: f64,
}

/// Client-constructed transaction payload. Lives only for the duration of a
/// submit workflow and is discarded after submission regardless of outcome.
#[derive(Clone, Debug, Serialize)]
pub struct DraftTransaction {
    pub from_address: String,
    pub to_address: String,
    pub amount: f64,
    pub private_key: String,
}

/// The four independently refreshable data sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Resource {
    Status,
    PendingTransactions,
    Blocks,
    Wallets,
}

impl Resource {
    pub const ALL: [Resource; 4] = [
        Resource::Status,
        Resource::PendingTransactions,
        Resource::Blocks,
        Resource::Wallets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Status => "status",
            Resource::PendingTransactions => "pending-transactions",
            Resource::Blocks => "blocks",
            Resource::Wallets => "wallets",
        }
    }
}

/// Identity of a remote call, carried on every failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Status,
    PendingTransactions,
    Blocks,
    Wallets,
    CreateWallet,
    SubmitTransaction,
    MineBlock,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Status => "status",
            Operation::PendingTransactions => "pending-transactions",
            Operation::Blocks => "blocks",
            Operation::Wallets => "wallets",
            Operation::CreateWallet => "create-wallet",
            Operation::SubmitTransaction => "submit-transaction",
            Operation::MineBlock => "mine-block",
        }
    }
}

/// The only error the dashboard distinguishes: a remote call that did not
/// succeed. Carries which operation failed and a display-ready cause; the
/// server's error body is never parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkError {
    pub operation: Operation,
    pub cause: String,
}

impl NetworkError {
    pub fn new(operation: Operation, cause: impl Into<String>) -> Self {
        NetworkError {
            operation,
            cause: cause.into(),
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.operation.as_str(), self.cause)
    }
}

impl std::error::Error for NetworkError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_status() {
        let json = r#"{"chain_length":1,"pending_transactions":0,"difficulty":2,"mining_reward":100,"is_valid":true}"#;
        let status: ChainStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.chain_length, 1);
        assert_eq!(status.pending_transactions, 0);
        assert_eq!(status.difficulty, 2);
        assert_eq!(status.mining_reward, 100.0);
        assert!(status.is_valid);
    }

    #[test]
    fn test_decode_transaction_with_fractional_timestamp() {
        let json = r#"{"from_address":"alice","to_address":"bob","amount":10.5,"timestamp":1700000000.25,"signature":"sig"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.from_address, "alice");
        assert_eq!(tx.amount, 10.5);
        assert!(!tx.is_mining_reward());
    }

    #[test]
    fn test_mining_reward_has_empty_sender() {
        let json = r#"{"from_address":"","to_address":"miner","amount":100,"timestamp":1700000000,"signature":""}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert!(tx.is_mining_reward());
    }

    #[test]
    fn test_decode_block_with_nested_transactions() {
        let json = r#"{
            "hash": "00abc",
            "previous_hash": "0",
            "timestamp": 1700000000.0,
            "transactions": [
                {"from_address":"","to_address":"miner","amount":100,"timestamp":1700000000,"signature":""}
            ],
            "nonce": 42,
            "difficulty": 2
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert_eq!(block.hash, "00abc");
        assert_eq!(block.transactions.len(), 1);
        assert_eq!(block.nonce, 42);
    }

    #[test]
    fn test_draft_transaction_wire_format() {
        let draft = DraftTransaction {
            from_address: "alice".into(),
            to_address: "bob".into(),
            amount: 10.0,
            private_key: "key".into(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["from_address"], "alice");
        assert_eq!(json["to_address"], "bob");
        assert_eq!(json["amount"], 10.0);
        assert_eq!(json["private_key"], "key");
    }

    #[test]
    fn test_network_error_display_names_operation() {
        let err = NetworkError::new(Operation::MineBlock, "connection refused");
        assert_eq!(err.to_string(), "mine-block: connection refused");
    }
}
