//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Initial full refresh; `loading` stays true until all four settle
        for cmd in self.state.refresh_all() {
            let _ = self.network_tx.send(cmd);
        }
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    for cmd in self.state.handle_response(response) {
                        let _ = self.network_tx.send(cmd);
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Tab navigation
            UiEvent::SwitchTab(tab) => self.state.switch_tab(tab),
            UiEvent::NextTab => self.state.next_tab(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Refreshes
            UiEvent::RefreshAll => {
                for cmd in self.state.refresh_all() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Create wallet
            UiEvent::CreateWallet => {
                if let Some(cmd) = self.state.create_wallet() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::DismissWalletModal => self.state.dismiss_wallet_modal(),

            // Submit transaction
            UiEvent::OpenTransactionForm => self.state.open_transaction_form(),
            UiEvent::TxFormChar(c) => self.state.tx_form_char(c),
            UiEvent::TxFormBackspace => self.state.tx_form_backspace(),
            UiEvent::TxFormNextField => self.state.tx_form_next_field(),
            UiEvent::SubmitTransactionForm => {
                if let Some(cmd) = self.state.submit_transaction_form() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::CancelTransactionForm => self.state.cancel_transaction_form(),

            // Mine block
            UiEvent::OpenMineForm => self.state.open_mine_form(),
            UiEvent::MineFormChar(c) => self.state.mine_form_char(c),
            UiEvent::MineFormBackspace => self.state.mine_form_backspace(),
            UiEvent::ConfirmMine => {
                if let Some(cmd) = self.state.confirm_mine() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::CancelMineForm => self.state.cancel_mine_form(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}
