mod cli;
mod config;
mod modules;
mod utils;

use clap::Parser;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{commands, Cli, Mode};
use crate::config::Settings;
use crate::modules::perception::{KeywordRanked, NewsSupplier, StaticNewsSupplier};
use crate::modules::pipeline::BriefingService;
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::http_client::HttpClientFactory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(&cli.config)?;

    // 1. 基础设施初始化
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::from_name(&settings.timezone));
    let client = HttpClientFactory::create()?;

    // 2. 模块初始化
    let news: Box<dyn NewsSupplier> = Box::new(KeywordRanked::new(
        StaticNewsSupplier::placeholder(),
        &settings.keywords,
    ));
    let service = BriefingService::from_settings(&settings, client, news, clock.clone());

    info!("📊 Daily Market Intelligence v{}", env!("CARGO_PKG_VERSION"));

    match cli.mode() {
        Mode::Summary => commands::summary(&service).await,
        Mode::Generate => commands::generate(&service).await,
        Mode::Daemon => commands::daemon(service, &settings).await,
        Mode::History => commands::history(&service),
        Mode::Dashboard => commands::dashboard(&service, &settings, clock).await,
        Mode::Watchlist(csv) => commands::update_watchlist(&mut settings, &cli.config, &csv),
    }
}
