use reqwest::Client;
use serde_json::json;
use tracing::{error, info};
use url::Url;
use crate::modules::action::Briefing;

/// Discord 单条消息上限
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;
const FENCE_OPEN: &str = "```\n";
const FENCE_CLOSE: &str = "\n```";
const ELLIPSIS: &str = "\n…";

pub struct DiscordNotifier {
    client: Client,
    webhook_url: Url,
}

impl DiscordNotifier {
    /// `None` when the webhook is not a usable http(s) URL.
    pub fn new(client: Client, webhook_url: &str) -> Option<Self> {
        match Url::parse(webhook_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Some(Self { client, webhook_url: url }),
            Ok(url) => {
                error!("❌ Discord webhook must be http(s), got scheme {:?}", url.scheme());
                None
            }
            Err(e) => {
                error!("❌ Invalid Discord webhook URL: {}", e);
                None
            }
        }
    }

    /// 失败只记日志，不影响简报生成
    pub async fn send_briefing(&self, briefing: &Briefing) {
        let body = json!({ "content": discord_content(&briefing.rendered_text) });
        match self.client.post(self.webhook_url.clone()).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("📨 Briefing for {} posted to Discord", briefing.date);
            }
            Ok(resp) => {
                let status = resp.status();
                let text = resp.text().await.unwrap_or_default();
                error!("❌ Discord Error: {} {}", status, text);
            }
            Err(e) => error!("❌ Discord Network Error: {}", e),
        }
    }
}

/// Wraps the report in a code block so the box drawing stays aligned,
/// cutting it short when it would exceed the message limit.
pub fn discord_content(text: &str) -> String {
    let text = text.trim_matches('\n');
    let budget = DISCORD_MESSAGE_LIMIT - FENCE_OPEN.len() - FENCE_CLOSE.len();
    if text.chars().count() <= budget {
        return format!("{}{}{}", FENCE_OPEN, text, FENCE_CLOSE);
    }
    let kept: String = text.chars().take(budget - ELLIPSIS.chars().count()).collect();
    format!("{}{}{}{}", FENCE_OPEN, kept, ELLIPSIS, FENCE_CLOSE)
}
