//! Network layer - ledger node API calls
//!
//! The Network actor receives fetch/workflow commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::LedgerClient;
