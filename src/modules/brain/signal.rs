use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoodCategory {
    ExtremeFear,
    Fear,
    Neutral,
    Greed,
    ExtremeGreed,
}

impl MoodCategory {
    /// 阈值为闭区间上界，超出 0..=100 的值按同样的比较落入两端
    pub fn from_value(value: i64) -> Self {
        if value <= 25 {
            MoodCategory::ExtremeFear
        } else if value <= 40 {
            MoodCategory::Fear
        } else if value <= 60 {
            MoodCategory::Neutral
        } else if value <= 75 {
            MoodCategory::Greed
        } else {
            MoodCategory::ExtremeGreed
        }
    }

    pub fn classification(&self) -> &'static str {
        match self {
            MoodCategory::ExtremeFear => "Extreme Fear",
            MoodCategory::Fear => "Fear",
            MoodCategory::Neutral => "Neutral",
            MoodCategory::Greed => "Greed",
            MoodCategory::ExtremeGreed => "Extreme Greed",
        }
    }

    pub fn signal_label(&self) -> &'static str {
        match self {
            MoodCategory::ExtremeFear => "BUY OPPORTUNITY",
            MoodCategory::Fear => "CAUTIOUS",
            MoodCategory::Neutral => "NEUTRAL",
            MoodCategory::Greed => "CAUTION",
            MoodCategory::ExtremeGreed => "TAKE PROFITS",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            MoodCategory::ExtremeFear => "Contrarian signal. High fear often precedes rallies.",
            MoodCategory::Fear => "Building positions on dips.",
            MoodCategory::Neutral => "No strong directional signal.",
            MoodCategory::Greed => "Momentum slowing. Watch for exhaustion.",
            MoodCategory::ExtremeGreed => "Market likely overextended.",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            MoodCategory::ExtremeFear => Severity::Success,
            MoodCategory::Fear | MoodCategory::Greed => Severity::Warning,
            MoodCategory::Neutral => Severity::Muted,
            MoodCategory::ExtremeGreed => Severity::Danger,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            MoodCategory::ExtremeFear => "🟢",
            MoodCategory::Fear => "🟡",
            MoodCategory::Neutral => "⚪",
            MoodCategory::Greed => "🟠",
            MoodCategory::ExtremeGreed => "🔴",
        }
    }
}

/// Symbolic colour token; renderers map it to whatever palette they have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Muted,
    Danger,
}

impl Severity {
    /// ANSI 前景色
    pub fn ansi(&self) -> &'static str {
        match self {
            Severity::Success => "\x1b[32m",
            Severity::Warning => "\x1b[33m",
            Severity::Muted => "\x1b[37m",
            Severity::Danger => "\x1b[31m",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentSignal {
    pub category: MoodCategory,
    pub signal_label: String,
    pub classification: String,
    pub severity: Severity,
    pub advice: String,
}

impl SentimentSignal {
    /// e.g. `🟢 BUY OPPORTUNITY — Extreme Fear`
    pub fn headline(&self) -> String {
        match self.category {
            MoodCategory::Neutral => format!("{} {}", self.category.icon(), self.signal_label),
            _ => format!("{} {} — {}", self.category.icon(), self.signal_label, self.classification),
        }
    }
}

pub fn classify(value: i64) -> SentimentSignal {
    let category = MoodCategory::from_value(value);
    SentimentSignal {
        category,
        signal_label: category.signal_label().to_string(),
        classification: category.classification().to_string(),
        severity: category.severity(),
        advice: category.advice().to_string(),
    }
}
