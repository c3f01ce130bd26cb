use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::config::settings::Settings;
use crate::modules::action::{Briefing, BriefingComposer, BriefingStore, StoreError};
use crate::modules::brain::{classify, SentimentSignal};
use crate::modules::perception::{FearGreedFetcher, NewsItem, NewsSupplier, SentimentReading};
use crate::utils::clock::Clock;
use crate::utils::notifier::DiscordNotifier;

#[derive(Debug, Clone)]
pub struct MarketSummary {
    pub reading: SentimentReading,
    pub signal: SentimentSignal,
}

/// A generated briefing plus what happened when archiving it. The briefing is
/// valid either way.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub briefing: Briefing,
    pub saved: Result<PathBuf, StoreError>,
}

/// fetch → classify → compose → store, strictly one stage after another.
pub struct BriefingService {
    fetcher: FearGreedFetcher,
    news: Box<dyn NewsSupplier>,
    composer: BriefingComposer,
    store: BriefingStore,
    notifier: Option<DiscordNotifier>,
}

impl BriefingService {
    pub fn new(
        fetcher: FearGreedFetcher,
        news: Box<dyn NewsSupplier>,
        composer: BriefingComposer,
        store: BriefingStore,
    ) -> Self {
        Self { fetcher, news, composer, store, notifier: None }
    }

    pub fn with_notifier(mut self, notifier: Option<DiscordNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Wires every component from loaded settings.
    pub fn from_settings(
        settings: &Settings,
        client: reqwest::Client,
        news: Box<dyn NewsSupplier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let fetcher = FearGreedFetcher::new(client.clone(), settings.fear_greed_url.clone());
        let composer = BriefingComposer::new(clock)
            .with_max_ai_items(settings.max_ai_items)
            .with_watchlist(settings.portfolio_tickers.clone());
        let store = BriefingStore::new(settings.briefings_dir.clone());
        let notifier = settings
            .discord_webhook()
            .and_then(|hook| DiscordNotifier::new(client, hook));

        Self::new(fetcher, news, composer, store).with_notifier(notifier)
    }

    pub fn store(&self) -> &BriefingStore {
        &self.store
    }

    pub async fn market_summary(&self) -> MarketSummary {
        let reading = self.fetcher.fetch_index().await;
        let signal = classify(reading.value);
        MarketSummary { reading, signal }
    }

    pub async fn fetch_news(&self) -> (Vec<NewsItem>, Vec<NewsItem>) {
        let ai = self.news.fetch_ai_news().await;
        let tech = self.news.fetch_tech_news().await;
        (ai, tech)
    }

    pub async fn compose(&self) -> Briefing {
        info!("Generating morning briefing...");
        let MarketSummary { reading, signal } = self.market_summary().await;
        let (ai, tech) = self.fetch_news().await;
        self.composer.compose(reading, signal, ai, tech)
    }

    /// 生成、归档并（可选）推送。归档失败通过 `saved` 返回，不丢弃已生成的简报
    pub async fn generate(&self) -> GenerateOutcome {
        let briefing = self.compose().await;

        let saved = self.store.save(&briefing);
        if let Err(e) = &saved {
            error!("💾 Failed to archive briefing: {}", e);
        }

        if let Some(notifier) = &self.notifier {
            notifier.send_briefing(&briefing).await;
        }

        GenerateOutcome { briefing, saved }
    }
}

/// Regenerates every `interval` until `shutdown` flips to true.
///
/// Shutdown is only observed between cycles. Each cycle runs on its own task
/// so a panic inside it is logged and the schedule carries on. Cycles missed
/// while the machine slept are not caught up. Returns how many cycles ran.
pub async fn run_daemon<F>(
    service: Arc<BriefingService>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
    on_briefing: F,
) -> usize
where
    F: Fn(&GenerateOutcome) + Send,
{
    info!("Starting daemon mode...");
    let mut cycles = 0;

    loop {
        if *shutdown.borrow() {
            break;
        }

        let svc = service.clone();
        match tokio::spawn(async move { svc.generate().await }).await {
            Ok(outcome) => on_briefing(&outcome),
            Err(e) => error!("🔥 Briefing cycle aborted: {}", e),
        }
        cycles += 1;

        info!("💤 Sleeping {}s...", interval.as_secs());
        tokio::select! {
            _ = sleep(interval) => {}
            changed = shutdown.changed() => {
                if changed.is_err() {
                    warn!("Shutdown channel closed, stopping daemon");
                    break;
                }
            }
        }
    }

    info!("Daemon stopped after {} cycle(s)", cycles);
    cycles
}
