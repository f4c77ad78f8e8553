//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::{Notice, TransactionForm};
use crate::messages::ui_events::AppTab;
use crate::models::{Block, ChainStatus, Transaction, Wallet};

/// Complete state needed by the UI to render
#[derive(Clone, Debug)]
pub struct RenderState {
    // Tab
    pub active_tab: AppTab,

    // Resources (last-known values; empty until first load)
    /// True until the first full refresh has settled
    pub loading: bool,
    pub status: Option<ChainStatus>,
    pub pending_transactions: Vec<Transaction>,
    pub blocks: Vec<Block>,
    pub wallets: Vec<Wallet>,
    /// Any refresh currently in flight (spinner indicator)
    pub refreshing: bool,
    /// First recorded fetch error, display-ready
    pub resource_error: Option<String>,

    // Workflow state
    pub can_mine: bool,
    pub workflow_in_flight: bool,
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

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            active_tab: AppTab::Pending,
            loading: true,
            status: None,
            pending_transactions: Vec::new(),
            blocks: Vec::new(),
            wallets: Vec::new(),
            refreshing: false,
            resource_error: None,
            can_mine: false,
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
}
