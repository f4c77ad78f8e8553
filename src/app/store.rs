//! View model store - last-known value of each remote resource
//!
//! Each resource moves through Unloaded -> Loading -> Loaded | Failed
//! independently. Values are replaced wholesale on success; failures keep the
//! prior value and record the error for the UI to surface.

use crate::messages::network::ResourcePayload;
use crate::models::{Block, ChainStatus, NetworkError, Resource, Transaction, Wallet};

/// One resource's slot in the store.
///
/// A second refresh may start while one is in flight; whichever completes
/// last wins, wholesale. There is no versioning in the remote contract, so
/// out-of-order completion is accepted rather than engineered around.
#[derive(Clone, Debug)]
pub struct ResourceSlot<T> {
    value: Option<T>,
    error: Option<NetworkError>,
    in_flight: usize,
    settled: bool,
}

impl<T> Default for ResourceSlot<T> {
    fn default() -> Self {
        ResourceSlot {
            value: None,
            error: None,
            in_flight: 0,
            settled: false,
        }
    }
}

impl<T> ResourceSlot<T> {
    pub fn begin(&mut self) {
        self.in_flight += 1;
    }

    pub fn complete_ok(&mut self, value: T) {
        self.value = Some(value);
        self.error = None;
        self.in_flight = self.in_flight.saturating_sub(1);
        self.settled = true;
    }

    pub fn complete_err(&mut self, error: NetworkError) {
        // Prior Loaded value is retained on failure
        self.error = Some(error);
        self.in_flight = self.in_flight.saturating_sub(1);
        self.settled = true;
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&NetworkError> {
        self.error.as_ref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.in_flight > 0
    }

    /// True once the slot has reached Loaded or Failed at least once.
    pub fn has_settled(&self) -> bool {
        self.settled
    }
}

/// Holds the four resource slots that make up the dashboard view model.
#[derive(Clone, Debug, Default)]
pub struct ViewModelStore {
    pub status: ResourceSlot<ChainStatus>,
    pub pending_transactions: ResourceSlot<Vec<Transaction>>,
    pub blocks: ResourceSlot<Vec<Block>>,
    pub wallets: ResourceSlot<Vec<Wallet>>,
}

impl ViewModelStore {
    pub fn begin_refresh(&mut self, resource: Resource) {
        match resource {
            Resource::Status => self.status.begin(),
            Resource::PendingTransactions => self.pending_transactions.begin(),
            Resource::Blocks => self.blocks.begin(),
            Resource::Wallets => self.wallets.begin(),
        }
    }

    /// Replace a resource atomically with a freshly fetched payload.
    pub fn apply_payload(&mut self, payload: ResourcePayload) {
        match payload {
            ResourcePayload::Status(status) => self.status.complete_ok(status),
            ResourcePayload::PendingTransactions(txs) => {
                self.pending_transactions.complete_ok(txs)
            }
            ResourcePayload::Blocks(blocks) => self.blocks.complete_ok(blocks),
            ResourcePayload::Wallets(wallets) => self.wallets.complete_ok(wallets),
        }
    }

    pub fn apply_failure(&mut self, resource: Resource, error: NetworkError) {
        match resource {
            Resource::Status => self.status.complete_err(error),
            Resource::PendingTransactions => self.pending_transactions.complete_err(error),
            Resource::Blocks => self.blocks.complete_err(error),
            Resource::Wallets => self.wallets.complete_err(error),
        }
    }

    /// True until the first full refresh has settled: every resource must
    /// reach Loaded or Failed at least once, whichever subset succeeded.
    pub fn loading(&self) -> bool {
        !(self.status.has_settled()
            && self.pending_transactions.has_settled()
            && self.blocks.has_settled()
            && self.wallets.has_settled())
    }

    /// First error recorded across the slots, for the status line.
    pub fn first_error(&self) -> Option<&NetworkError> {
        self.status
            .error()
            .or_else(|| self.pending_transactions.error())
            .or_else(|| self.blocks.error())
            .or_else(|| self.wallets.error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Operation;

    fn status(chain_length: u64) -> ChainStatus {
        ChainStatus {
            chain_length,
            pending_transactions: 0,
            difficulty: 2,
            mining_reward: 100.0,
            is_valid: true,
        }
    }

    fn net_err(operation: Operation) -> NetworkError {
        NetworkError::new(operation, "connection refused")
    }

    #[test]
    fn test_loaded_value_replaced_wholesale() {
        let mut store = ViewModelStore::default();
        store.begin_refresh(Resource::Status);
        store.apply_payload(ResourcePayload::Status(status(1)));
        assert_eq!(store.status.value().unwrap().chain_length, 1);

        store.begin_refresh(Resource::Status);
        store.apply_payload(ResourcePayload::Status(status(5)));
        assert_eq!(store.status.value().unwrap().chain_length, 5);
        assert!(store.status.error().is_none());
    }

    #[test]
    fn test_failure_retains_prior_value_and_records_error() {
        let mut store = ViewModelStore::default();
        store.begin_refresh(Resource::Status);
        store.apply_payload(ResourcePayload::Status(status(3)));

        store.begin_refresh(Resource::Status);
        store.apply_failure(Resource::Status, net_err(Operation::Status));

        assert_eq!(store.status.value().unwrap().chain_length, 3);
        assert!(store.status.error().is_some());
        assert!(store.status.has_settled());
    }

    #[test]
    fn test_success_after_failure_clears_error() {
        let mut store = ViewModelStore::default();
        store.begin_refresh(Resource::Blocks);
        store.apply_failure(Resource::Blocks, net_err(Operation::Blocks));
        assert!(store.blocks.error().is_some());
        assert!(store.blocks.value().is_none());

        store.begin_refresh(Resource::Blocks);
        store.apply_payload(ResourcePayload::Blocks(Vec::new()));
        assert!(store.blocks.error().is_none());
        assert!(store.blocks.value().is_some());
    }

    #[test]
    fn test_loading_until_all_four_settle() {
        let mut store = ViewModelStore::default();
        for resource in Resource::ALL {
            store.begin_refresh(resource);
        }
        assert!(store.loading());

        store.apply_payload(ResourcePayload::Status(status(1)));
        store.apply_payload(ResourcePayload::PendingTransactions(Vec::new()));
        store.apply_payload(ResourcePayload::Blocks(Vec::new()));
        assert!(store.loading());

        // A failed fetch still settles its slot
        store.apply_failure(Resource::Wallets, net_err(Operation::Wallets));
        assert!(!store.loading());
    }

    #[test]
    fn test_later_completion_wins_over_earlier_issue() {
        let mut store = ViewModelStore::default();
        // Two refreshes in flight for the same resource
        store.begin_refresh(Resource::Status);
        store.begin_refresh(Resource::Status);
        assert!(store.status.is_refreshing());

        // First issued completes second: its payload is the terminal state
        store.apply_payload(ResourcePayload::Status(status(9)));
        assert!(store.status.is_refreshing());
        store.apply_payload(ResourcePayload::Status(status(7)));
        assert!(!store.status.is_refreshing());
        assert_eq!(store.status.value().unwrap().chain_length, 7);
    }

    #[test]
    fn test_unloaded_slot_exposes_nothing() {
        let store = ViewModelStore::default();
        assert!(store.status.value().is_none());
        assert!(store.status.error().is_none());
        assert!(!store.status.has_settled());
        assert!(store.loading());
    }
}
