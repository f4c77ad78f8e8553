use chrono::{Local, TimeZone};
use ratatui::{prelude::*, widgets::*};

use crate::models::Transaction;

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Format a unix-seconds timestamp (possibly fractional) as local time
pub fn format_timestamp(unix_seconds: f64) -> String {
    match Local.timestamp_opt(unix_seconds as i64, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => String::from("-"),
    }
}

/// Sender label for a transaction; mining rewards have no sender
pub fn sender_label(tx: &Transaction) -> &str {
    if tx.is_mining_reward() {
        "Mining Reward"
    } else {
        &tx.from_address
    }
}

/// Truncate long hashes and addresses for table cells. Counts chars, not
/// bytes, so multi-byte content never splits mid-character.
pub fn truncate_middle(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max || max < 8 {
        return s.to_string();
    }
    let keep = (max - 2) / 2;
    let head: String = s.chars().take(keep).collect();
    let tail: String = s.chars().skip(len - keep).collect();
    format!("{}..{}", head, tail)
}

/// Trim trailing zeros from amounts ("100" rather than "100.00")
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}
