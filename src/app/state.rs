//! App state - pure data structure with no I/O logic

use crate::app::store::ViewModelStore;
use crate::messages::ui_events::{AppTab, TxField};
use crate::messages::RenderState;
use crate::models::Wallet;

/// Outcome banner kind (the toast equivalent)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A one-line outcome message for the status bar
#[derive(Clone, Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Input buffers for the submit-transaction form. Discarded wholesale once
/// the draft is handed to the network layer.
#[derive(Clone, Debug, Default)]
pub struct TransactionForm {
    pub from_address: String,
    pub to_address: String,
    pub amount: String,
    pub private_key: String,
    pub active_field: TxField,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Tab navigation
    pub active_tab: AppTab,

    // Resource view model
    pub store: ViewModelStore,
    pub next_request_id: u64,

    // Workflow state
    /// True while a mutating call is in flight; blocks a second submission
    pub workflow_in_flight: bool,
    /// One-shot display slot for a freshly created wallet and its private
    /// key. Cleared on dismissal; the key is never shown again.
    pub created_wallet: Option<Wallet>,
    pub show_wallet_modal: bool,

    // Forms
    pub tx_form: TransactionForm,
    pub show_tx_form: bool,
    pub miner_address: String,
    pub show_mine_form: bool,

    // Outcome banner
    pub notice: Option<Notice>,

    // UI state
    pub scroll: u16,
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            active_tab: AppTab::Pending,
            store: ViewModelStore::default(),
            next_request_id: 1,
            workflow_in_flight: false,
            created_wallet: None,
            show_wallet_modal: false,
            tx_form: TransactionForm::default(),
            show_tx_form: false,
            miner_address: String::new(),
            show_mine_form: false,
            notice: None,
            scroll: 0,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Mining is offered only when pending transactions exist.
    pub fn can_mine(&self) -> bool {
        self.store
            .pending_transactions
            .value()
            .map(|txs| !txs.is_empty())
            .unwrap_or(false)
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            active_tab: self.active_tab,
            loading: self.store.loading(),
            status: self.store.status.value().cloned(),
            pending_transactions: self
                .store
                .pending_transactions
                .value()
                .cloned()
                .unwrap_or_default(),
            blocks: self.store.blocks.value().cloned().unwrap_or_default(),
            wallets: self.store.wallets.value().cloned().unwrap_or_default(),
            refreshing: self.store.status.is_refreshing()
                || self.store.pending_transactions.is_refreshing()
                || self.store.blocks.is_refreshing()
                || self.store.wallets.is_refreshing(),
            resource_error: self.store.first_error().map(|e| e.to_string()),
            can_mine: self.can_mine(),
            workflow_in_flight: self.workflow_in_flight,
            created_wallet: self.created_wallet.clone(),
            show_wallet_modal: self.show_wallet_modal,
            tx_form: self.tx_form.clone(),
            show_tx_form: self.show_tx_form,
            miner_address: self.miner_address.clone(),
            show_mine_form: self.show_mine_form,
            notice: self.notice.clone(),
            scroll: self.scroll,
            show_help: self.show_help,
        }
    }
}
