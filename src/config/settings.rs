use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use config::{Config, Environment};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use crate::modules::perception::fetcher::DEFAULT_FNG_URL;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub news_sources: BTreeMap<String, Vec<String>>,
    pub keywords: Vec<String>,
    pub timezone: String,
    pub notify_discord: bool,
    /// Discord webhook URL
    pub discord_channel: String,
    pub portfolio_tickers: Vec<String>,
    pub briefings_dir: PathBuf,
    pub fear_greed_url: String,
    pub max_ai_items: usize,
    pub refresh_interval_hours: u64,
    pub dashboard_refresh_minutes: u64,
    /// 未识别的键原样保留，写回时不丢失
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// 文件里的原始内容，保存时只写回它（不含默认值和环境变量）
    #[serde(skip)]
    file_values: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut news_sources = BTreeMap::new();
        news_sources.insert("reddit_ai".to_string(), list(&["Artificial", "AI_Agents", "MachineLearning"]));
        news_sources.insert("reddit_crypto".to_string(), list(&["Bitcoin", "CryptoCurrency"]));
        news_sources.insert("tech_blogs".to_string(), list(&["techcrunch", "verge", "ars_technica"]));

        Self {
            news_sources,
            keywords: list(&["AI", "NVIDIA", "GPT", "OpenAI", "Tesla", "Bitcoin", "cloud"]),
            timezone: "America/New_York".to_string(),
            notify_discord: false,
            discord_channel: String::new(),
            portfolio_tickers: list(&["TSLA", "NVDA", "CRWD", "BTC"]),
            briefings_dir: PathBuf::from("briefings"),
            fear_greed_url: DEFAULT_FNG_URL.to_string(),
            max_ai_items: 3,
            refresh_interval_hours: 6,
            dashboard_refresh_minutes: 15,
            extra: Map::new(),
            file_values: Map::new(),
        }
    }
}

/// Documented defaults, as the raw map the config file is merged over.
pub fn default_values() -> Map<String, Value> {
    match serde_json::to_value(Settings::default()) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Fills in every default key the user map lacks. Keys already present,
/// including ones we do not recognise, are left untouched.
pub fn merge_with_defaults(mut user: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in default_values() {
        user.entry(key).or_insert(value);
    }
    user
}

impl Settings {
    pub fn from_map(raw: Map<String, Value>) -> Result<Self> {
        let mut settings: Self = serde_json::from_value(Value::Object(merge_with_defaults(raw.clone())))
            .context("Invalid settings")?;
        settings.file_values = raw;
        Ok(settings)
    }

    /// Layers `env` over `file`. Only keys we recognise are taken from the
    /// environment; `file` alone is what `save` writes back.
    pub fn from_sources(file: Map<String, Value>, env: Map<String, Value>) -> Result<Self> {
        let known = default_values();
        let mut effective = file.clone();
        for (key, value) in env {
            if known.contains_key(&key) {
                effective.insert(key, value);
            } else {
                warn!("Ignoring unknown override INTEL_{}", key.to_uppercase());
            }
        }
        let mut settings = Self::from_map(effective)?;
        settings.file_values = file;
        Ok(settings)
    }

    /// 读取 JSON 配置文件（可选）并叠加 `INTEL_*` 环境变量
    pub fn load(path: &Path) -> Result<Self> {
        let file = read_file(path)?;
        let env = env_overrides()?;
        Self::from_sources(file, env)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&self.file_values)?;
        fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Parses `"TSLA, nvda,,BTC"` style input; entries are trimmed and blanks dropped.
    pub fn set_watchlist(&mut self, csv: &str) {
        self.portfolio_tickers = csv
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self.file_values
            .insert("portfolio_tickers".to_string(), Value::from(self.portfolio_tickers.clone()));
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_hours.max(1).saturating_mul(3600))
    }

    pub fn dashboard_refresh(&self) -> Duration {
        Duration::from_secs(self.dashboard_refresh_minutes.max(1).saturating_mul(60))
    }

    pub fn discord_webhook(&self) -> Option<&str> {
        let channel = self.discord_channel.trim();
        (self.notify_discord && !channel.is_empty()).then_some(channel)
    }
}

/// Keys are kept exactly as written; a missing file is an empty map.
fn read_file(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        info!("⚙️ No {} found, using defaults", path.display());
        return Ok(Map::new());
    }
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
    let raw = serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))?;
    info!("⚙️ Loaded settings from {}", path.display());
    Ok(raw)
}

/// `INTEL_NOTIFY_DISCORD=true` → `{"notify_discord": true}`
fn env_overrides() -> Result<Map<String, Value>> {
    let source = Config::builder()
        .add_source(Environment::with_prefix("INTEL").try_parsing(true))
        .build()
        .context("Failed to read INTEL_* environment")?;
    Ok(source.try_deserialize()?)
}
