// crates/sigil-match/src/explain.rs
//
// Human-readable match explanations. Renders the strongest breakdown
// dimensions as short bullet lines with concrete shared-item evidence.

use crate::engine::MatchReport;

const MAX_LISTED_ITEMS: usize = 5;

fn listed(items: &[String]) -> String {
    let shown: Vec<&str> = items
        .iter()
        .take(MAX_LISTED_ITEMS)
        .map(String::as_str)
        .collect();
    let mut out = shown.join(", ");
    if items.len() > MAX_LISTED_ITEMS {
        out.push_str(&format!(" (+{} more)", items.len() - MAX_LISTED_ITEMS));
    }
    out
}

/// Render bullet lines for a match report, strongest evidence first.
///
/// Only dimensions above their signal thresholds produce a line; a report
/// with nothing above threshold gets a single fallback sentence.
pub fn explain_match(report: &MatchReport) -> Vec<String> {
    let b = &report.breakdown;
    let e = &report.evidence;
    let mut lines = Vec::new();

    if b.creators > 0.25 && !e.creators.is_empty() {
        lines.push(format!(
            "Both collect from {} shared creator{}: {}",
            e.creators.len(),
            if e.creators.len() == 1 { "" } else { "s" },
            listed(&e.creators)
        ));
    }
    if b.creators > 0.25 && !e.collections.is_empty() {
        lines.push(format!(
            "Both hold {} shared collection{}: {}",
            e.collections.len(),
            if e.collections.len() == 1 { "" } else { "s" },
            listed(&e.collections)
        ));
    }
    if b.onchain > 0.2 && !e.contracts.is_empty() {
        lines.push(format!(
            "Shared on-chain activity across {} contract{}: {}",
            e.contracts.len(),
            if e.contracts.len() == 1 { "" } else { "s" },
            listed(&e.contracts)
        ));
    }
    if b.followers > 0.2 {
        lines.push("Overlapping social circles".to_string());
    }
    if b.farcaster > 0.15 && !e.farcaster_wallets.is_empty() {
        lines.push(format!(
            "Linked through Farcaster wallet{}: {}",
            if e.farcaster_wallets.len() == 1 { "" } else { "s" },
            listed(&e.farcaster_wallets)
        ));
    }
    if b.identity > 0.5 {
        lines.push("Similar legitimacy profiles".to_string());
    }

    if lines.is_empty() {
        lines.push(format!(
            "No strong overlap between {} and {}",
            report.left, report.right
        ));
    }
    lines
}
