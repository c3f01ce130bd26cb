use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::sync::Arc;
use crate::modules::brain::{MoodCategory, SentimentSignal};
use crate::modules::perception::{NewsItem, SentimentReading};
use crate::utils::clock::Clock;

pub const BOX_WIDTH: usize = 62;
pub const TITLE_MAX_CHARS: usize = 50;
pub const DEFAULT_MAX_AI_ITEMS: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct Briefing {
    pub date: NaiveDate,
    pub generated_at: NaiveDateTime,
    pub reading: SentimentReading,
    pub signal: SentimentSignal,
    /// Only the items that made it into the report.
    pub ai_news: Vec<NewsItem>,
    pub tech_news: Vec<NewsItem>,
    pub advisory_text: String,
    pub rendered_text: String,
}

/// Renders the daily report.
///
/// At most `max_ai_items` AI items are shown, in supplier order. Every tech
/// item is shown. Titles are cut to their first 50 characters.
pub struct BriefingComposer {
    max_ai_items: usize,
    watchlist: Vec<String>,
    clock: Arc<dyn Clock>,
}

impl BriefingComposer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            max_ai_items: DEFAULT_MAX_AI_ITEMS,
            watchlist: Vec::new(),
            clock,
        }
    }

    pub fn with_max_ai_items(mut self, max: usize) -> Self {
        self.max_ai_items = max;
        self
    }

    pub fn with_watchlist(mut self, tickers: Vec<String>) -> Self {
        self.watchlist = tickers;
        self
    }

    pub fn compose(
        &self,
        reading: SentimentReading,
        signal: SentimentSignal,
        ai_news: Vec<NewsItem>,
        tech_news: Vec<NewsItem>,
    ) -> Briefing {
        let generated_at = self.clock.now();
        let ai_news: Vec<NewsItem> = ai_news.into_iter().take(self.max_ai_items).collect();

        let mut out = String::new();
        out.push('\n');
        out.push_str(&border('╔', '╗'));
        out.push_str(&format!(
            "║        📊 DAILY MARKET INTELLIGENCE — {:<28}║\n",
            generated_at.format("%b %d, %Y").to_string()
        ));
        out.push_str(&border('╠', '╣'));

        section(&mut out, "🧠 AI/TECH INTELLIGENCE");
        for item in &ai_news {
            out.push_str(&news_row(item));
        }
        out.push_str(&border('╠', '╣'));

        section(&mut out, "📰 TECH SECTOR NEWS");
        for item in &tech_news {
            out.push_str(&news_row(item));
        }
        out.push_str(&border('╠', '╣'));

        out.push_str(&row("  📈 MARKET MOOD"));
        out.push_str(&row(&format!(
            "  Fear & Greed: {}/100 ({})",
            reading.value, reading.classification
        )));
        out.push_str(&row(&format!("  Sentiment: {}", signal.headline())));
        out.push_str(&row(&format!("  → {}", signal.advice)));
        out.push_str(&border('╠', '╣'));

        out.push_str(&row("  🎯 TODAY'S WATCH"));
        for line in self.watch_lines(&signal) {
            out.push_str(&row(&format!("  • {}", line)));
        }
        out.push_str(&border('╚', '╝'));
        out.push_str(&format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")));

        Briefing {
            date: generated_at.date(),
            generated_at,
            advisory_text: signal.advice.clone(),
            reading,
            signal,
            ai_news,
            tech_news,
            rendered_text: out,
        }
    }

    fn watch_lines(&self, signal: &SentimentSignal) -> Vec<String> {
        let mut lines = Vec::new();
        if self.watchlist.is_empty() {
            lines.push("No watchlist configured".to_string());
        } else {
            lines.push(format!("Watchlist: {}", self.watchlist.join(", ")));
        }
        match signal.category {
            MoodCategory::ExtremeFear | MoodCategory::ExtremeGreed => {
                lines.push("Sentiment extremes — contrarian plays".to_string());
            }
            _ => {}
        }
        lines
    }
}

pub fn truncate_title(title: &str) -> String {
    title.chars().take(TITLE_MAX_CHARS).collect()
}

fn border(left: char, right: char) -> String {
    format!("{}{}{}\n", left, "═".repeat(BOX_WIDTH), right)
}

fn section(out: &mut String, heading: &str) {
    out.push_str(&row(&format!("  {}", heading)));
    out.push_str(&border('╠', '╣'));
}

/// Pads to the box width; longer content runs past the right edge.
fn row(content: &str) -> String {
    let len = content.chars().count();
    let pad = BOX_WIDTH.saturating_sub(len);
    format!("║{}{}║\n", content, " ".repeat(pad))
}

fn news_row(item: &NewsItem) -> String {
    let source = if item.source.trim().is_empty() { "unknown" } else { item.source.trim() };
    row(&format!("  • [{}] {}", source, truncate_title(item.title.trim())))
}
