//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Content tabs below the stats row
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum AppTab {
    #[default]
    Pending,
    Blocks,
    Wallets,
}

impl AppTab {
    pub fn next(&self) -> AppTab {
        match self {
            AppTab::Pending => AppTab::Blocks,
            AppTab::Blocks => AppTab::Wallets,
            AppTab::Wallets => AppTab::Pending,
        }
    }
}

/// Fields of the transaction form, in tab order
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum TxField {
    #[default]
    From,
    To,
    Amount,
    PrivateKey,
}

impl TxField {
    pub fn next(&self) -> TxField {
        match self {
            TxField::From => TxField::To,
            TxField::To => TxField::Amount,
            TxField::Amount => TxField::PrivateKey,
            TxField::PrivateKey => TxField::From,
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Tab navigation
    SwitchTab(AppTab),
    NextTab,
    ScrollUp,
    ScrollDown,

    // Resource refreshes
    RefreshAll,

    // Create-wallet workflow
    CreateWallet,
    DismissWalletModal,

    // Submit-transaction workflow
    OpenTransactionForm,
    TxFormChar(char),
    TxFormBackspace,
    TxFormNextField,
    SubmitTransactionForm,
    CancelTransactionForm,

    // Mine-block workflow
    OpenMineForm,
    MineFormChar(char),
    MineFormBackspace,
    ConfirmMine,
    CancelMineForm,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on which popup (if any) is open
pub fn key_to_ui_event(
    key: KeyEvent,
    show_help: bool,
    show_wallet_modal: bool,
    show_tx_form: bool,
    show_mine_form: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    // The created-wallet modal blocks everything until dismissed; the
    // private key is dropped on dismissal and never shown again.
    if show_wallet_modal {
        return match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                Some(UiEvent::DismissWalletModal)
            }
            _ => None,
        };
    }

    if show_tx_form {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelTransactionForm),
            KeyCode::Enter => Some(UiEvent::SubmitTransactionForm),
            KeyCode::Tab => Some(UiEvent::TxFormNextField),
            KeyCode::Backspace => Some(UiEvent::TxFormBackspace),
            KeyCode::Char(c) => Some(UiEvent::TxFormChar(c)),
            _ => None,
        };
    }

    if show_mine_form {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::CancelMineForm),
            KeyCode::Enter => Some(UiEvent::ConfirmMine),
            KeyCode::Backspace => Some(UiEvent::MineFormBackspace),
            KeyCode::Char(c) => Some(UiEvent::MineFormChar(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('r') => Some(UiEvent::RefreshAll),
        KeyCode::Char('1') => Some(UiEvent::SwitchTab(AppTab::Pending)),
        KeyCode::Char('2') => Some(UiEvent::SwitchTab(AppTab::Blocks)),
        KeyCode::Char('3') => Some(UiEvent::SwitchTab(AppTab::Wallets)),
        KeyCode::Tab => Some(UiEvent::NextTab),
        KeyCode::Char('w') => Some(UiEvent::CreateWallet),
        KeyCode::Char('t') => Some(UiEvent::OpenTransactionForm),
        KeyCode::Char('m') => Some(UiEvent::OpenMineForm),
        KeyCode::Up => Some(UiEvent::ScrollUp),
        KeyCode::Down => Some(UiEvent::ScrollDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_normal_mode_shortcuts() {
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Char('r')), false, false, false, false),
            Some(UiEvent::RefreshAll)
        ));
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Char('m')), false, false, false, false),
            Some(UiEvent::OpenMineForm)
        ));
    }

    #[test]
    fn test_wallet_modal_swallows_typing() {
        // 'm' must not open the mine form while the private key is on screen
        assert!(key_to_ui_event(press(KeyCode::Char('m')), false, true, false, false).is_none());
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Esc), false, true, false, false),
            Some(UiEvent::DismissWalletModal)
        ));
    }

    #[test]
    fn test_tx_form_captures_chars() {
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Char('q')), false, false, true, false),
            Some(UiEvent::TxFormChar('q'))
        ));
        assert!(matches!(
            key_to_ui_event(press(KeyCode::Enter), false, false, true, false),
            Some(UiEvent::SubmitTransactionForm)
        ));
    }
}
