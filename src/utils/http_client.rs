use reqwest::Client;
use std::time::Duration;
use anyhow::Result;
use tracing::info;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// 通用 HTTP Client，行情接口和 Discord webhook 共用
    pub fn create() -> Result<Client> {
        let builder = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("daily_intel/", env!("CARGO_PKG_VERSION")));

        info!("🌐 [Http Client] Ready (timeout 10s)");

        let client = builder.build()?;
        Ok(client)
    }
}
