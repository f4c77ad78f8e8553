//! Command handlers - UI event processing and workflow orchestration
//!
//! The three mutating workflows live here: create wallet, submit transaction,
//! mine block. Each issues one network call and, on success, the refreshes
//! for exactly the resources that call can have changed.

use crate::app::state::{AppState, Notice, TransactionForm};
use crate::messages::ui_events::AppTab;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{DraftTransaction, Resource};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn switch_tab(&mut self, tab: AppTab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.scroll = 0;
        }
    }

    pub fn next_tab(&mut self) {
        self.active_tab = self.active_tab.next();
        self.scroll = 0;
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Resource refreshes
    // ========================

    /// Start a refresh of one resource and return the fetch command.
    pub fn refresh(&mut self, resource: Resource) -> NetworkCommand {
        let id = self.next_id();
        self.store.begin_refresh(resource);
        NetworkCommand::Fetch { id, resource }
    }

    /// Start a refresh of all four resources. The fetches are independent;
    /// no ordering holds between them.
    pub fn refresh_all(&mut self) -> Vec<NetworkCommand> {
        Resource::ALL
            .into_iter()
            .map(|resource| self.refresh(resource))
            .collect()
    }

    // ========================
    // Create-wallet workflow
    // ========================

    pub fn create_wallet(&mut self) -> Option<NetworkCommand> {
        if self.workflow_in_flight {
            return None;
        }
        let id = self.next_id();
        self.workflow_in_flight = true;
        self.show_wallet_modal = true;
        self.created_wallet = None;
        Some(NetworkCommand::CreateWallet { id })
    }

    /// Drop the one-time private key. After this, no read path shows it.
    pub fn dismiss_wallet_modal(&mut self) {
        self.show_wallet_modal = false;
        self.created_wallet = None;
    }

    // ========================
    // Submit-transaction workflow
    // ========================

    pub fn open_transaction_form(&mut self) {
        self.tx_form = TransactionForm::default();
        self.show_tx_form = true;
    }

    pub fn tx_form_char(&mut self, c: char) {
        self.tx_form_input_mut().push(c);
    }

    pub fn tx_form_backspace(&mut self) {
        self.tx_form_input_mut().pop();
    }

    pub fn tx_form_next_field(&mut self) {
        self.tx_form.active_field = self.tx_form.active_field.next();
    }

    pub fn cancel_transaction_form(&mut self) {
        // The typed private key goes with the form
        self.tx_form = TransactionForm::default();
        self.show_tx_form = false;
    }

    fn tx_form_input_mut(&mut self) -> &mut String {
        use crate::messages::ui_events::TxField;
        match self.tx_form.active_field {
            TxField::From => &mut self.tx_form.from_address,
            TxField::To => &mut self.tx_form.to_address,
            TxField::Amount => &mut self.tx_form.amount,
            TxField::PrivateKey => &mut self.tx_form.private_key,
        }
    }

    /// Validate the form and hand the draft to the network layer. Required
    /// fields and a positive amount are the only checks; everything else is
    /// the node's call.
    pub fn submit_transaction_form(&mut self) -> Option<NetworkCommand> {
        if self.workflow_in_flight {
            return None;
        }

        if self.tx_form.from_address.is_empty()
            || self.tx_form.to_address.is_empty()
            || self.tx_form.private_key.is_empty()
        {
            self.notice = Some(Notice::error("All fields are required"));
            return None;
        }
        let amount = match self.tx_form.amount.trim().parse::<f64>() {
            Ok(a) if a > 0.0 => a,
            _ => {
                self.notice = Some(Notice::error("Amount must be a positive number"));
                return None;
            }
        };

        let form = std::mem::take(&mut self.tx_form);
        let draft = DraftTransaction {
            from_address: form.from_address,
            to_address: form.to_address,
            amount,
            private_key: form.private_key,
        };

        let id = self.next_id();
        self.workflow_in_flight = true;
        self.show_tx_form = false;
        Some(NetworkCommand::SubmitTransaction { id, draft })
    }

    // ========================
    // Mine-block workflow
    // ========================

    pub fn open_mine_form(&mut self) {
        if !self.can_mine() {
            self.notice = Some(Notice::error("No transactions to mine"));
            return;
        }
        self.miner_address.clear();
        self.show_mine_form = true;
    }

    pub fn mine_form_char(&mut self, c: char) {
        self.miner_address.push(c);
    }

    pub fn mine_form_backspace(&mut self) {
        self.miner_address.pop();
    }

    pub fn cancel_mine_form(&mut self) {
        self.miner_address.clear();
        self.show_mine_form = false;
    }

    pub fn confirm_mine(&mut self) -> Option<NetworkCommand> {
        if self.workflow_in_flight || self.miner_address.is_empty() || !self.can_mine() {
            return None;
        }
        let id = self.next_id();
        let miner_address = std::mem::take(&mut self.miner_address);
        self.workflow_in_flight = true;
        self.show_mine_form = false;
        Some(NetworkCommand::MineBlock { id, miner_address })
    }

    // ========================
    // Network responses
    // ========================

    /// Apply a network response and return the follow-up refreshes the
    /// completed workflow requires. Fetch outcomes only touch the store;
    /// workflow outcomes also raise a notice.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        match response {
            NetworkResponse::Fetched { id, payload } => {
                tracing::debug!(id, resource = payload.resource().as_str(), "Resource loaded");
                self.store.apply_payload(payload);
                Vec::new()
            }
            NetworkResponse::FetchFailed {
                id,
                resource,
                error,
            } => {
                tracing::warn!(id, resource = resource.as_str(), %error, "Resource fetch failed");
                self.store.apply_failure(resource, error);
                Vec::new()
            }

            NetworkResponse::WalletCreated { id, wallet } => {
                tracing::info!(id, address = %wallet.address, "Wallet created");
                self.workflow_in_flight = false;
                // The modal may have been dismissed while the request was in
                // flight; re-open it so the one-time key is displayed, and
                // dropped, through the normal dismissal path
                self.created_wallet = Some(wallet);
                self.show_wallet_modal = true;
                self.notice = Some(Notice::success("Wallet created"));
                vec![self.refresh(Resource::Wallets)]
            }
            NetworkResponse::WalletCreateFailed { id, error } => {
                tracing::warn!(id, %error, "Wallet creation failed");
                self.workflow_in_flight = false;
                self.show_wallet_modal = false;
                self.notice = Some(Notice::error("Failed to create wallet"));
                Vec::new()
            }

            NetworkResponse::TransactionAccepted { id } => {
                tracing::info!(id, "Transaction accepted");
                self.workflow_in_flight = false;
                self.notice = Some(Notice::success("Transaction created successfully!"));
                // Pending list, status counters and balances change; blocks do not
                vec![
                    self.refresh(Resource::PendingTransactions),
                    self.refresh(Resource::Status),
                    self.refresh(Resource::Wallets),
                ]
            }
            NetworkResponse::TransactionRejected { id, error } => {
                tracing::warn!(id, %error, "Transaction rejected");
                self.workflow_in_flight = false;
                self.notice = Some(Notice::error("Failed to create transaction"));
                Vec::new()
            }

            NetworkResponse::BlockMined { id } => {
                tracing::info!(id, "Block mined");
                self.workflow_in_flight = false;
                self.notice = Some(Notice::success("Block mined successfully!"));
                // Mining touches everything: chain, pending set, difficulty,
                // reward balances
                self.refresh_all()
            }
            NetworkResponse::MiningFailed { id, error } => {
                tracing::warn!(id, %error, "Mining failed");
                self.workflow_in_flight = false;
                self.notice = Some(Notice::error("Failed to mine block"));
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::NoticeKind;
    use crate::messages::network::ResourcePayload;
    use crate::models::{ChainStatus, NetworkError, Operation, Transaction, Wallet};

    fn sample_status() -> ChainStatus {
        ChainStatus {
            chain_length: 1,
            pending_transactions: 0,
            difficulty: 2,
            mining_reward: 100.0,
            is_valid: true,
        }
    }

    fn sample_tx() -> Transaction {
        Transaction {
            from_address: String::from("alice"),
            to_address: String::from("bob"),
            amount: 10.0,
            timestamp: 1_700_000_000.0,
            signature: String::from("sig"),
        }
    }

    fn sample_wallet() -> Wallet {
        Wallet {
            address: String::from("addr-1"),
            private_key: String::from("secret-key"),
            balance: 100.0,
        }
    }

    fn fetched_resources(commands: &[NetworkCommand]) -> Vec<Resource> {
        commands
            .iter()
            .map(|cmd| match cmd {
                NetworkCommand::Fetch { resource, .. } => *resource,
                other => panic!("expected fetch command, got {:?}", other),
            })
            .collect()
    }

    fn state_with_pending() -> AppState {
        let mut state = AppState::new();
        state
            .store
            .apply_payload(ResourcePayload::PendingTransactions(vec![sample_tx()]));
        state
    }

    #[test]
    fn test_submit_success_refreshes_pending_status_wallets_in_order() {
        let mut state = AppState::new();
        let followups = state.handle_response(NetworkResponse::TransactionAccepted { id: 1 });
        assert_eq!(
            fetched_resources(&followups),
            vec![
                Resource::PendingTransactions,
                Resource::Status,
                Resource::Wallets
            ]
        );
        assert!(!state.workflow_in_flight);
    }

    #[test]
    fn test_submit_failure_refreshes_nothing_and_keeps_values() {
        let mut state = AppState::new();
        state
            .store
            .apply_payload(ResourcePayload::Status(sample_status()));
        state
            .store
            .apply_payload(ResourcePayload::PendingTransactions(vec![sample_tx()]));

        let followups = state.handle_response(NetworkResponse::TransactionRejected {
            id: 2,
            error: NetworkError::new(Operation::SubmitTransaction, "400 Bad Request"),
        });

        assert!(followups.is_empty());
        assert_eq!(state.notice.as_ref().unwrap().kind, NoticeKind::Error);
        // Prior Loaded values untouched
        assert_eq!(state.store.status.value().unwrap().chain_length, 1);
        assert_eq!(state.store.pending_transactions.value().unwrap().len(), 1);
    }

    #[test]
    fn test_mine_success_refreshes_all_four() {
        let mut state = AppState::new();
        let followups = state.handle_response(NetworkResponse::BlockMined { id: 3 });
        let resources = fetched_resources(&followups);
        assert_eq!(resources.len(), 4);
        for resource in Resource::ALL {
            assert!(resources.contains(&resource));
        }
    }

    #[test]
    fn test_mine_failure_refreshes_nothing() {
        let mut state = AppState::new();
        let followups = state.handle_response(NetworkResponse::MiningFailed {
            id: 4,
            error: NetworkError::new(Operation::MineBlock, "connection refused"),
        });
        assert!(followups.is_empty());
        assert_eq!(state.notice.as_ref().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_created_wallet_key_shown_once_then_dropped() {
        let mut state = AppState::new();
        let cmd = state.create_wallet();
        assert!(matches!(cmd, Some(NetworkCommand::CreateWallet { .. })));
        assert!(state.show_wallet_modal);

        let followups = state.handle_response(NetworkResponse::WalletCreated {
            id: 5,
            wallet: sample_wallet(),
        });
        assert_eq!(fetched_resources(&followups), vec![Resource::Wallets]);
        assert_eq!(
            state.created_wallet.as_ref().unwrap().private_key,
            "secret-key"
        );

        state.dismiss_wallet_modal();
        assert!(state.created_wallet.is_none());
        assert!(!state.show_wallet_modal);
    }

    #[test]
    fn test_dismissal_during_flight_still_surfaces_key_once() {
        let mut state = AppState::new();
        state.create_wallet();
        // User closes the "Creating wallet..." modal before the node replies
        state.dismiss_wallet_modal();
        assert!(!state.show_wallet_modal);

        let followups = state.handle_response(NetworkResponse::WalletCreated {
            id: 7,
            wallet: sample_wallet(),
        });
        assert_eq!(fetched_resources(&followups), vec![Resource::Wallets]);
        // The key must never sit in state without a display path: the modal
        // re-opens, and dismissal drops it
        assert!(state.show_wallet_modal);
        assert!(state.created_wallet.is_some());

        state.dismiss_wallet_modal();
        assert!(state.created_wallet.is_none());
    }

    #[test]
    fn test_wallet_create_failure_holds_no_wallet() {
        let mut state = AppState::new();
        state.create_wallet();
        let followups = state.handle_response(NetworkResponse::WalletCreateFailed {
            id: 6,
            error: NetworkError::new(Operation::CreateWallet, "500 Internal Server Error"),
        });
        assert!(followups.is_empty());
        assert!(state.created_wallet.is_none());
        assert!(!state.show_wallet_modal);
    }

    #[test]
    fn test_mine_disabled_without_pending_transactions() {
        let mut state = AppState::new();
        state
            .store
            .apply_payload(ResourcePayload::Status(sample_status()));
        assert!(!state.can_mine());

        state.open_mine_form();
        assert!(!state.show_mine_form);
        assert_eq!(state.notice.as_ref().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_mine_enabled_with_pending_transactions() {
        let mut state = state_with_pending();
        assert!(state.can_mine());

        state.open_mine_form();
        assert!(state.show_mine_form);
        for c in "miner".chars() {
            state.mine_form_char(c);
        }
        let cmd = state.confirm_mine();
        match cmd {
            Some(NetworkCommand::MineBlock { miner_address, .. }) => {
                assert_eq!(miner_address, "miner");
            }
            other => panic!("expected mine command, got {:?}", other),
        }
        assert!(state.workflow_in_flight);
        assert!(!state.show_mine_form);
    }

    #[test]
    fn test_confirm_mine_requires_address() {
        let mut state = state_with_pending();
        state.open_mine_form();
        assert!(state.confirm_mine().is_none());
    }

    #[test]
    fn test_submit_form_validation() {
        let mut state = AppState::new();
        state.open_transaction_form();
        assert!(state.submit_transaction_form().is_none());

        state.tx_form.from_address = String::from("alice");
        state.tx_form.to_address = String::from("bob");
        state.tx_form.private_key = String::from("key");
        state.tx_form.amount = String::from("-5");
        assert!(state.submit_transaction_form().is_none());

        state.tx_form.amount = String::from("12.5");
        let cmd = state.submit_transaction_form();
        match cmd {
            Some(NetworkCommand::SubmitTransaction { draft, .. }) => {
                assert_eq!(draft.from_address, "alice");
                assert_eq!(draft.amount, 12.5);
            }
            other => panic!("expected submit command, got {:?}", other),
        }
        // The draft (private key included) leaves the form on submission
        assert!(state.tx_form.private_key.is_empty());
        assert!(!state.show_tx_form);
    }

    #[test]
    fn test_second_workflow_blocked_while_in_flight() {
        let mut state = state_with_pending();
        assert!(state.create_wallet().is_some());
        assert!(state.create_wallet().is_none());

        state.open_mine_form();
        state.mine_form_char('a');
        assert!(state.confirm_mine().is_none());
    }

    #[test]
    fn test_refresh_all_covers_every_resource() {
        let mut state = AppState::new();
        let commands = state.refresh_all();
        assert_eq!(fetched_resources(&commands).len(), 4);
        assert!(state.store.loading());
    }
}
