use reqwest::Client;
use anyhow::{Result, Context, anyhow};
use serde_json::Value;
use std::time::Duration;
use tracing::{info, warn};
use super::structs::SentimentReading;

pub const DEFAULT_FNG_URL: &str = "https://api.alternative.me/fng/";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

pub struct FearGreedFetcher {
    client: Client,
    url: String,
}

impl FearGreedFetcher {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self { client, url: url.into() }
    }

    /// 单次请求，任何失败都降级为中性读数 (50 / Neutral)，不向上抛出
    pub async fn fetch_index(&self) -> SentimentReading {
        match self.try_fetch().await {
            Ok(reading) => {
                info!("📈 Fear & Greed: {}/100 ({})", reading.value, reading.classification);
                reading
            }
            Err(e) => {
                warn!("Fear/Greed fetch error: {:#}. Using neutral default.", e);
                SentimentReading::neutral()
            }
        }
    }

    pub async fn try_fetch(&self) -> Result<SentimentReading> {
        let resp = self.client.get(&self.url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(anyhow!("Status: {}", resp.status()));
        }

        let body: Value = resp.json().await.context("Response is not valid JSON")?;
        parse_reading(&body)
    }
}

/// `{"data": [{"value": "25", "value_classification": "Extreme Fear"}, ...]}`
pub fn parse_reading(body: &Value) -> Result<SentimentReading> {
    let latest = body["data"]
        .as_array()
        .context("No data array in response")?
        .first()
        .context("Empty data array")?;

    // 上游把数值编码为字符串，也兼容纯数字
    let value = match &latest["value"] {
        Value::String(s) => s.trim().parse::<i64>().with_context(|| format!("Non-numeric value: {:?}", s))?,
        Value::Number(n) => n.as_i64().with_context(|| format!("Non-integer value: {}", n))?,
        Value::Null => return Err(anyhow!("Missing value")),
        other => return Err(anyhow!("Unexpected value type: {}", other)),
    };

    let classification = latest["value_classification"]
        .as_str()
        .context("Missing value_classification")?
        .to_string();

    Ok(SentimentReading { value, classification })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one canned HTTP response and returns the URL to hit.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}/fng/", addr)
    }

    /// An address nothing is listening on.
    async fn dead_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}/fng/", addr)
    }

    #[test]
    fn parses_string_encoded_value() {
        let body = json!({"data": [{"value": "18", "value_classification": "Extreme Fear"}]});
        assert_eq!(parse_reading(&body).unwrap(), SentimentReading::new(18, "Extreme Fear"));
    }

    #[test]
    fn parses_numeric_value_and_takes_first_element() {
        let body = json!({"data": [
            {"value": 82, "value_classification": "Extreme Greed"},
            {"value": 10, "value_classification": "Extreme Fear"}
        ]});
        assert_eq!(parse_reading(&body).unwrap(), SentimentReading::new(82, "Extreme Greed"));
    }

    #[test]
    fn rejects_malformed_payloads() {
        let cases = [
            json!({}),
            json!({"data": []}),
            json!({"data": [{"value_classification": "Fear"}]}),
            json!({"data": [{"value": "abc", "value_classification": "Fear"}]}),
            json!({"data": [{"value": "30"}]}),
            json!({"data": [{"value": 30.5, "value_classification": "Fear"}]}),
        ];
        for body in cases {
            assert!(parse_reading(&body).is_err(), "expected error for {}", body);
        }
    }

    #[tokio::test]
    async fn network_error_falls_back_to_neutral() {
        let fetcher = FearGreedFetcher::new(Client::new(), dead_url().await);
        assert!(fetcher.try_fetch().await.is_err());
        assert_eq!(fetcher.fetch_index().await, SentimentReading::new(50, "Neutral"));
    }

    #[tokio::test]
    async fn malformed_json_falls_back_to_neutral() {
        let url = serve_once("HTTP/1.1 200 OK", "{not json").await;
        let fetcher = FearGreedFetcher::new(Client::new(), url);
        assert_eq!(fetcher.fetch_index().await, SentimentReading::new(50, "Neutral"));
    }

    #[tokio::test]
    async fn server_error_falls_back_to_neutral() {
        let url = serve_once("HTTP/1.1 503 Service Unavailable", "{}").await;
        let fetcher = FearGreedFetcher::new(Client::new(), url);
        assert_eq!(fetcher.fetch_index().await, SentimentReading::neutral());
    }

    #[tokio::test]
    async fn reads_live_shaped_payload() {
        let url = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"name":"Fear and Greed Index","data":[{"value":"73","value_classification":"Greed","timestamp":"1700000000"}]}"#,
        ).await;
        let fetcher = FearGreedFetcher::new(Client::new(), url);
        assert_eq!(fetcher.fetch_index().await, SentimentReading::new(73, "Greed"));
    }
}
