use serde::{Serialize, Deserialize};

/// Latest Fear & Greed reading as reported upstream.
/// `value` is nominally 0..=100 but is never clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub value: i64,
    pub classification: String,
}

impl SentimentReading {
    pub fn new(value: i64, classification: impl Into<String>) -> Self {
        Self { value, classification: classification.into() }
    }

    /// 获取失败时的中性默认值
    pub fn neutral() -> Self {
        Self::new(50, "Neutral")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewsItem {
    pub source: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<i64>,
}

impl NewsItem {
    pub fn new(source: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_engagement(mut self, score: i64, comment_count: i64) -> Self {
        self.score = Some(score);
        self.comment_count = Some(comment_count);
        self
    }
}
