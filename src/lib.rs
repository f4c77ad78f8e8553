//! # chainboard
//!
//! A terminal dashboard for a remote blockchain ledger node.
//!
//! ## Features
//! - Chain status at a glance: length, pending count, difficulty, reward, validity
//! - Pending transactions, blocks and wallets views
//! - Wallet creation with one-time private key display
//! - Transaction submission and block mining
//! - Manual refresh only; the displayed state is re-fetched around every mutation
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (view model store + workflow orchestration)
//! - Network Layer (Tokio + reqwest)

pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState, ViewModelStore};
pub use config::Config;
pub use messages::{NetworkCommand, NetworkResponse, RenderState, ResourcePayload, UiEvent};
pub use models::{
    Block, ChainStatus, DraftTransaction, NetworkError, Operation, Resource, Transaction, Wallet,
};
pub use network::{LedgerClient, NetworkActor};
