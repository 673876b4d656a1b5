//! Plain-text summaries printed after each command.

use std::fmt::Write as _;

use adclick_core::{ClickOutcome, LedgerState, Progress};
use adclick_types::SessionRecord;

pub fn status(state: &LedgerState, progress: &Progress, session: &SessionRecord) -> String {
    let mut out = String::new();

    match session.username() {
        Some(name) => {
            let _ = writeln!(out, "Signed in as {name}");
        }
        None => out.push_str("Not signed in\n"),
    }
    let _ = writeln!(out, "Last reset: {}", state.last_daily_reset_key());
    out.push('\n');

    for item in state.items() {
        let mark = if item.is_clicked() { 'x' } else { ' ' };
        let _ = writeln!(
            out,
            "[{mark}] {:<8} {:<40} {}",
            item.id().as_str(),
            item.title(),
            item.price()
        );
    }
    if !state.is_empty() {
        out.push('\n');
    }

    out.push_str(&summary(progress));
    out
}

pub fn summary(progress: &Progress) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Progress: {}/{} clicked ({}%)",
        progress.clicked,
        progress.total,
        progress.percent()
    );
    let _ = writeln!(
        out,
        "Today: {}/{} clicks, {} remaining",
        progress.clicks_today,
        progress.daily_cap,
        progress.remaining_today()
    );
    let _ = writeln!(
        out,
        "Balance: {} ({}/{} rewards this cycle)",
        progress.balance, progress.cycle_rewards, progress.cycle_length
    );
    if progress.goal_reached {
        out.push_str("Goal reached for today\n");
    }
    out
}

pub fn outcome(id: &str, outcome: &ClickOutcome) -> String {
    match outcome {
        ClickOutcome::Applied {
            reward_granted: true,
            ..
        } => format!("Clicked {id}. Daily cap reached, reward credited."),
        ClickOutcome::Applied { .. } => format!("Clicked {id}."),
        ClickOutcome::Rejected(reason) => format!("Click on {id} not counted: {reason}."),
    }
}

pub fn health() -> String {
    serde_json::json!({ "status": "ok" }).to_string()
}
