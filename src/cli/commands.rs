use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

use super::render;
use crate::config::Settings;
use crate::modules::pipeline::{self, BriefingService};
use crate::utils::clock::Clock;

const HISTORY_LIMIT: usize = 10;

/// 默认模式：只打印情绪行，不写文件
pub async fn summary(service: &BriefingService) -> Result<()> {
    let market = service.market_summary().await;
    println!("{}", render::summary(&market));
    Ok(())
}

/// Prints the report first so it survives a failed save.
pub async fn generate(service: &BriefingService) -> Result<()> {
    let outcome = service.generate().await;
    println!("{}", outcome.briefing.rendered_text);
    let path = outcome.saved.context("Briefing was not archived")?;
    info!("✅ Done: {}", path.display());
    Ok(())
}

pub async fn daemon(service: BriefingService, settings: &Settings) -> Result<()> {
    let interval = settings.refresh_interval();
    let shutdown = shutdown_on_ctrl_c();
    pipeline::run_daemon(Arc::new(service), interval, shutdown, |outcome| {
        println!("{}", outcome.briefing.rendered_text);
    })
    .await;
    Ok(())
}

pub fn history(service: &BriefingService) -> Result<()> {
    let entries = service.store().history(HISTORY_LIMIT)?;
    print!("{}", render::history(&entries));
    Ok(())
}

/// Live panel on a terminal. Without one we fall back to the plain summary
/// once, the same text a pipe or cron log can hold.
pub async fn dashboard(service: &BriefingService, settings: &Settings, clock: Arc<dyn Clock>) -> Result<()> {
    if !std::io::stdout().is_terminal() {
        warn!("stdout is not a terminal, showing plain summary instead of the dashboard");
        return summary(service).await;
    }

    let refresh = settings.dashboard_refresh();
    let mut shutdown = shutdown_on_ctrl_c();
    loop {
        let market = service.market_summary().await;
        let (ai, tech) = service.fetch_news().await;
        print!("{}", render::dashboard(&market, &ai, &tech, clock.now()));

        tokio::select! {
            _ = sleep(refresh) => {}
            _ = shutdown.changed() => break,
        }
    }
    println!();
    Ok(())
}

pub fn update_watchlist(settings: &mut Settings, config_path: &Path, csv: &str) -> Result<()> {
    settings.set_watchlist(csv);
    settings.save(config_path)?;
    println!("Watchlist: {}", settings.portfolio_tickers.join(", "));
    Ok(())
}

/// Flips to `true` on Ctrl-C. Consumers only look at it between cycles.
fn shutdown_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("🛑 Interrupt received, finishing up...");
                let _ = tx.send(true);
            }
            Err(e) => {
                error!("Cannot listen for Ctrl-C: {}", e);
                // keep the sender alive so the loop is not stopped by a closed channel
                std::future::pending::<()>().await;
                drop(tx);
            }
        }
    });
    rx
}
