use clap::{ArgGroup, Parser};
use std::path::PathBuf;

pub mod commands;
pub mod render;

#[derive(Parser, Debug)]
#[command(
    name = "daily_intel",
    about = "Daily Market Intelligence Dashboard",
    version
)]
#[command(group(
    ArgGroup::new("mode")
        .args(["today", "full", "daemon", "history", "dashboard", "watchlist"])
        .multiple(false)
))]
pub struct Cli {
    /// Generate today's briefing
    #[arg(long)]
    pub today: bool,

    /// Generate full report
    #[arg(long)]
    pub full: bool,

    /// Run in daemon mode
    #[arg(long)]
    pub daemon: bool,

    /// Show the most recent archived briefings
    #[arg(long)]
    pub history: bool,

    /// Live terminal dashboard (plain summary when not on a terminal)
    #[arg(long)]
    pub dashboard: bool,

    /// Replace the watchlist tickers, e.g. "TSLA,NVDA,BTC"
    #[arg(long, value_name = "TICKERS")]
    pub watchlist: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = crate::config::settings::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Summary,
    Generate,
    Daemon,
    History,
    Dashboard,
    Watchlist(String),
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.daemon {
            Mode::Daemon
        } else if self.today || self.full {
            Mode::Generate
        } else if self.history {
            Mode::History
        } else if self.dashboard {
            Mode::Dashboard
        } else if let Some(csv) = &self.watchlist {
            Mode::Watchlist(csv.clone())
        } else {
            Mode::Summary
        }
    }
}
