//! chainboard - Actor-based terminal dashboard for a blockchain ledger node
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - view model store and workflow orchestration
//! - Network Layer (Tokio) - async ledger node calls

mod app;
mod config;
mod constants;
mod messages;
mod models;
mod network;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use app::state::NoticeKind;
use app::AppActor;
use config::Config;
use messages::ui_events::{key_to_ui_event, AppTab, TxField};
use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use network::{LedgerClient, NetworkActor};
use ui::{format_amount, format_timestamp, render_tabs, sender_label, truncate_middle};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", "chainboard.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config = Config::load();
    tracing::info!(api_url = %config.api_url, "Starting chainboard");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(LedgerClient::new(config), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.show_help,
                    current_state.show_wallet_modal,
                    current_state.show_tx_form,
                    current_state.show_mine_form,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    if state.loading {
        draw_loading_screen(f, area);
        return;
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Stats row
            Constraint::Length(1), // Content tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_stats(f, state, main_chunks[0]);
    draw_tab_bar(f, state, main_chunks[1]);

    match state.active_tab {
        AppTab::Pending => draw_pending_tab(f, state, main_chunks[2]),
        AppTab::Blocks => draw_blocks_tab(f, state, main_chunks[2]),
        AppTab::Wallets => draw_wallets_tab(f, state, main_chunks[2]),
    }

    draw_status_bar(f, state, main_chunks[3]);

    // Popups
    if state.show_help {
        draw_help_popup(f, area);
    }
    if state.show_tx_form {
        draw_tx_form_popup(f, state, area);
    }
    if state.show_mine_form {
        draw_mine_form_popup(f, state, area);
    }
    if state.show_wallet_modal {
        draw_wallet_modal(f, state, area);
    }
}

fn draw_loading_screen(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(30, 20, area);
    let text = Paragraph::new("Loading chain state...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" chainboard "));
    f.render_widget(text, popup_area);
}

fn draw_stats(f: &mut Frame, state: &RenderState, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
        ])
        .split(area);

    let refreshing = if state.refreshing { " [...]" } else { "" };

    match &state.status {
        Some(status) => {
            draw_stat_card(f, cards[0], " Chain Length ", &status.chain_length.to_string());
            draw_stat_card(
                f,
                cards[1],
                " Pending Tx ",
                &status.pending_transactions.to_string(),
            );
            draw_stat_card(f, cards[2], " Difficulty ", &status.difficulty.to_string());
            draw_stat_card(
                f,
                cards[3],
                " Mining Reward ",
                &format_amount(status.mining_reward),
            );

            let (label, color) = if status.is_valid {
                ("VALID", Color::Green)
            } else {
                ("INVALID", Color::Red)
            };
            let chip = Paragraph::new(Span::styled(label, Style::default().fg(color).bold()))
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" Chain{} ", refreshing)),
                );
            f.render_widget(chip, cards[4]);
        }
        None => {
            // Status fetch failed before ever loading; keep the layout
            let placeholder = Paragraph::new("status unavailable")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Stats "));
            f.render_widget(placeholder, area);
        }
    }
}

fn draw_stat_card(f: &mut Frame, area: Rect, title: &str, value: &str) {
    let card = Paragraph::new(Span::styled(value, Style::default().bold()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(card, area);
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let titles = vec![
        " 1:Pending Transactions ",
        " 2:Blocks ",
        " 3:Wallets ",
    ];
    let selected = match state.active_tab {
        AppTab::Pending => 0,
        AppTab::Blocks => 1,
        AppTab::Wallets => 2,
    };
    f.render_widget(render_tabs(&titles, selected), area);
}

fn draw_pending_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Pending Transactions (↑/↓ scroll) ");

    if state.pending_transactions.is_empty() {
        let empty = Paragraph::new("No pending transactions")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for tx in &state.pending_transactions {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>10} ", format_amount(tx.amount)),
                Style::default().fg(Color::Yellow).bold(),
            ),
            Span::styled(
                format!("{} ", sender_label(tx)),
                if tx.is_mining_reward() {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                },
            ),
            Span::styled("-> ", Style::default().fg(Color::DarkGray)),
            Span::raw(tx.to_address.clone()),
            Span::styled(
                format!("  {}", format_timestamp(tx.timestamp)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    let list = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    f.render_widget(list, area);
}

fn draw_blocks_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Blocks (oldest first, ↑/↓ scroll) ");

    let mut lines: Vec<Line> = Vec::new();
    for (index, b) in state.blocks.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("Block #{} ", index),
                Style::default().fg(Color::Cyan).bold(),
            ),
            Span::styled(
                format_timestamp(b.timestamp),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw(format!("  nonce {}  difficulty {}", b.nonce, b.difficulty)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("  hash ", Style::default().fg(Color::DarkGray)),
            Span::raw(truncate_middle(&b.hash, 40)),
            Span::styled("  prev ", Style::default().fg(Color::DarkGray)),
            Span::raw(truncate_middle(&b.previous_hash, 40)),
        ]));
        for tx in &b.transactions {
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(
                    format!("{:>10} ", format_amount(tx.amount)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format!("{} ", sender_label(tx)),
                    if tx.is_mining_reward() {
                        Style::default().fg(Color::Green)
                    } else {
                        Style::default()
                    },
                ),
                Span::styled("-> ", Style::default().fg(Color::DarkGray)),
                Span::raw(truncate_middle(&tx.to_address, 32)),
            ]));
        }
        lines.push(Line::default());
    }

    let list = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    f.render_widget(list, area);
}

fn draw_wallets_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Wallets (↑/↓ scroll) ");

    if state.wallets.is_empty() {
        let empty = Paragraph::new("No wallets found")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        format!("{:<44} {:>12}", "Address", "Balance"),
        Style::default().fg(Color::DarkGray),
    ))];
    for wallet in &state.wallets {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<44} ", truncate_middle(&wallet.address, 44))),
            Span::styled(
                format!("{:>12}", format_amount(wallet.balance)),
                Style::default().fg(Color::Yellow),
            ),
        ]));
    }

    let list = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll, 0));
    f.render_widget(list, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    // Workflow outcome first, then fetch errors, then the key hints
    let (text, style) = if let Some(notice) = &state.notice {
        let color = match notice.kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Error => Color::Red,
        };
        (format!(" {} ", notice.message), Style::default().fg(color))
    } else if let Some(error) = &state.resource_error {
        (format!(" {} ", error), Style::default().fg(Color::Red))
    } else {
        let mine_hint = if state.can_mine {
            "m:mine"
        } else {
            "m:mine (disabled)"
        };
        (
            format!(" Tab:switch | r:refresh | w:new wallet | t:new transaction | {} | ?:help | q:quit ", mine_hint),
            Style::default().fg(Color::DarkGray),
        )
    };

    f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    let help_text = r#"
 CHAINBOARD - Keyboard Shortcuts

 NAVIGATION
   1 / 2 / 3          Pending / Blocks / Wallets tab
   Tab                Next tab
   ↑ / ↓              Scroll

 CHAIN
   r                  Refresh everything
   w                  Create a new wallet
   t                  Create a transaction
   m                  Mine pending transactions

 FORMS
   Tab                Next field
   Enter              Submit
   Esc                Cancel

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_wallet_modal(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(70, 40, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New Wallet (Esc to close) ")
        .style(Style::default().bg(Color::Black));

    let lines: Vec<Line> = match &state.created_wallet {
        Some(wallet) => vec![
            Line::from(Span::styled("Address", Style::default().fg(Color::DarkGray))),
            Line::from(wallet.address.clone()),
            Line::default(),
            Line::from(Span::styled(
                "Private Key (shown only once - save it now)",
                Style::default().fg(Color::Red).bold(),
            )),
            Line::from(wallet.private_key.clone()),
            Line::default(),
            Line::from(Span::styled("Balance", Style::default().fg(Color::DarkGray))),
            Line::from(format_amount(wallet.balance)),
        ],
        None => vec![Line::from(Span::styled(
            "Creating wallet...",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let content = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(content, popup_area);
}

fn draw_tx_form_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(70, 50, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New Transaction (Tab:next field, Enter:submit, Esc:cancel) ")
        .style(Style::default().bg(Color::Black));

    let form = &state.tx_form;
    let field_line = |label: &str, value: &str, active: bool, mask: bool| {
        let marker = if active { "> " } else { "  " };
        let shown = if mask && !value.is_empty() {
            "*".repeat(value.len())
        } else {
            value.to_string()
        };
        let style = if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{}{:<14}", marker, label), style),
            Span::raw(shown),
        ])
    };

    let lines = vec![
        field_line(
            "From",
            &form.from_address,
            form.active_field == TxField::From,
            false,
        ),
        field_line("To", &form.to_address, form.active_field == TxField::To, false),
        field_line(
            "Amount",
            &form.amount,
            form.active_field == TxField::Amount,
            false,
        ),
        field_line(
            "Private Key",
            &form.private_key,
            form.active_field == TxField::PrivateKey,
            true,
        ),
    ];

    let content = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(content, popup_area);
}

fn draw_mine_form_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(60, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Mine Block (Enter:mine, Esc:cancel) ")
        .style(Style::default().bg(Color::Black));

    let content = if state.miner_address.is_empty() {
        Paragraph::new("Enter the miner address to receive the reward...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
    } else {
        Paragraph::new(state.miner_address.as_str()).block(block)
    };

    f.render_widget(Clear, popup_area);
    f.render_widget(content, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
