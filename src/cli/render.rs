use chrono::NaiveDateTime;
use crate::modules::action::ArchivedBriefing;
use crate::modules::perception::NewsItem;
use crate::modules::pipeline::MarketSummary;

const ANSI_RESET: &str = "\x1b[0m";
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub fn summary(market: &MarketSummary) -> String {
    format!(
        "\n📊 Market Mood: {}\n   Fear & Greed: {}/100 ({})\n   → {}\n",
        market.signal.headline(),
        market.reading.value,
        market.reading.classification,
        market.signal.advice
    )
}

/// 终端面板：清屏后整屏重绘
pub fn dashboard(
    market: &MarketSummary,
    ai: &[NewsItem],
    tech: &[NewsItem],
    updated_at: NaiveDateTime,
) -> String {
    let mut out = String::from(CLEAR_SCREEN);
    out.push_str(&format!("📊 Daily Market Intelligence  •  {}\n\n", updated_at.format("%b %d, %Y • %H:%M")));
    out.push_str(&format!(
        "Fear & Greed Index: {}/100 ({})\n",
        market.reading.value, market.reading.classification
    ));
    out.push_str(&format!(
        "Signal: {}{} {}{}\n\n",
        market.signal.severity.ansi(),
        market.signal.category.icon(),
        market.signal.signal_label,
        ANSI_RESET
    ));

    out.push_str("🧠 TOP AI/TECH INTELLIGENCE\n");
    out.push_str(&"=".repeat(40));
    out.push_str("\n\n");
    for item in ai.iter().chain(tech) {
        out.push_str(&format!("• [{}]\n  {}\n\n", item.source, item.title));
    }
    out.push_str("Last updated: Just now  (Ctrl-C to quit)\n");
    out
}

pub fn history(entries: &[ArchivedBriefing]) -> String {
    if entries.is_empty() {
        return "No history yet. Run a briefing first!\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("\n📅 {}  ({})\n", entry.date.format("%Y-%m-%d"), entry.path.display()));
        out.push_str(&"-".repeat(40));
        out.push('\n');
        out.push_str(&entry.preview);
        out.push_str("...\n");
    }
    out
}
