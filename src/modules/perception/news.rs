// 文件名: news.rs

use async_trait::async_trait;
use tracing::info;
use super::structs::NewsItem;

/// 新闻来源接口
///
/// Implementations return items most relevant first. An empty list is a valid
/// answer; a supplier that cannot reach its source returns empty rather than
/// an error.
#[async_trait]
pub trait NewsSupplier: Send + Sync {
    async fn fetch_ai_news(&self) -> Vec<NewsItem>;
    async fn fetch_tech_news(&self) -> Vec<NewsItem>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticNewsSupplier {
    ai: Vec<NewsItem>,
    tech: Vec<NewsItem>,
}

impl StaticNewsSupplier {
    pub fn new(ai: Vec<NewsItem>, tech: Vec<NewsItem>) -> Self {
        Self { ai, tech }
    }

    /// 占位新闻，直到接入真实数据源
    pub fn placeholder() -> Self {
        let ai = vec![
            NewsItem::new("r/Artificial", "OpenAI announces GPT-5 preview capabilities")
                .with_url("#")
                .with_engagement(1500, 200),
            NewsItem::new("r/AI_Agents", "New autonomous agent framework shows 40% efficiency gains")
                .with_url("#")
                .with_engagement(800, 120),
            NewsItem::new("r/MachineLearning", "Research breakthrough in reasoning models")
                .with_url("#")
                .with_engagement(2200, 350),
        ];
        let tech = vec![
            NewsItem::new("TechCrunch", "Sam Altman's Frontier platform aims to unify AI development").with_url("#"),
            NewsItem::new("The Verge", "NVIDIA maintains AI chip dominance with new architecture").with_url("#"),
            NewsItem::new("Ars Technica", "Enterprise AI adoption accelerates in Q4").with_url("#"),
        ];
        Self { ai, tech }
    }
}

#[async_trait]
impl NewsSupplier for StaticNewsSupplier {
    async fn fetch_ai_news(&self) -> Vec<NewsItem> {
        info!("Scanning AI subreddits...");
        self.ai.clone()
    }

    async fn fetch_tech_news(&self) -> Vec<NewsItem> {
        info!("Scraping tech blogs...");
        self.tech.clone()
    }
}

/// Reorders another supplier's items by keyword hits in the title.
/// The sort is stable, so equally relevant items keep supplier order.
pub struct KeywordRanked<S> {
    inner: S,
    /// 每个关键词拆成小写单词序列，"machine learning" → ["machine", "learning"]
    keywords: Vec<Vec<String>>,
}

/// Lowercased alphanumeric runs: "GPT-5 gains" → ["gpt", "5", "gains"].
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl<S: NewsSupplier> KeywordRanked<S> {
    pub fn new(inner: S, keywords: &[String]) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| words(k))
            .filter(|k| !k.is_empty())
            .collect();
        Self { inner, keywords }
    }

    /// Keywords that appear in the title as whole words.
    fn hits(&self, title: &str) -> usize {
        let title = words(title);
        self.keywords
            .iter()
            .filter(|k| title.windows(k.len()).any(|w| w == k.as_slice()))
            .count()
    }

    fn rank(&self, mut items: Vec<NewsItem>) -> Vec<NewsItem> {
        if self.keywords.is_empty() {
            return items;
        }
        items.sort_by_cached_key(|item| std::cmp::Reverse(self.hits(&item.title)));
        items
    }
}

#[async_trait]
impl<S: NewsSupplier> NewsSupplier for KeywordRanked<S> {
    async fn fetch_ai_news(&self) -> Vec<NewsItem> {
        let items = self.inner.fetch_ai_news().await;
        self.rank(items)
    }

    async fn fetch_tech_news(&self) -> Vec<NewsItem> {
        let items = self.inner.fetch_tech_news().await;
        self.rank(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(items: &[NewsItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[tokio::test]
    async fn static_supplier_returns_items_in_order() {
        let supplier = StaticNewsSupplier::new(
            vec![NewsItem::new("a", "first"), NewsItem::new("b", "second")],
            vec![],
        );
        assert_eq!(titles(&supplier.fetch_ai_news().await), vec!["first", "second"]);
        assert!(supplier.fetch_tech_news().await.is_empty());
    }

    #[tokio::test]
    async fn placeholder_has_both_sections() {
        let supplier = StaticNewsSupplier::placeholder();
        assert_eq!(supplier.fetch_ai_news().await.len(), 3);
        assert_eq!(supplier.fetch_tech_news().await.len(), 3);
    }

    #[tokio::test]
    async fn keyword_ranking_is_stable_and_case_insensitive() {
        let inner = StaticNewsSupplier::new(
            vec![
                NewsItem::new("s", "Weather report"),
                NewsItem::new("s", "nvidia ships new gpu"),
                NewsItem::new("s", "Sports roundup"),
                NewsItem::new("s", "NVIDIA and OpenAI partner on AI chips"),
            ],
            vec![],
        );
        let keywords = vec!["NVIDIA".to_string(), "OpenAI".to_string(), "  ".to_string()];
        let ranked = KeywordRanked::new(inner, &keywords);

        assert_eq!(
            titles(&ranked.fetch_ai_news().await),
            vec![
                "NVIDIA and OpenAI partner on AI chips",
                "nvidia ships new gpu",
                "Weather report",
                "Sports roundup",
            ]
        );
    }

    #[tokio::test]
    async fn keywords_match_whole_words_only() {
        let inner = StaticNewsSupplier::new(
            vec![
                NewsItem::new("s", "Weather report"),
                NewsItem::new("s", "Rust gains traction, maintains lead"),
                NewsItem::new("s", "GPT-5 tops machine-learning charts"),
            ],
            vec![],
        );
        let keywords = vec!["AI".to_string(), "GPT".to_string(), "Machine Learning".to_string()];
        let ranked = KeywordRanked::new(inner, &keywords);

        assert_eq!(ranked.hits("Rust gains traction, maintains lead"), 0);
        assert_eq!(ranked.hits("GPT-5 tops machine-learning charts"), 2);
        assert_eq!(
            titles(&ranked.fetch_ai_news().await),
            vec![
                "GPT-5 tops machine-learning charts",
                "Weather report",
                "Rust gains traction, maintains lead",
            ]
        );
    }

    #[tokio::test]
    async fn no_keywords_keeps_supplier_order() {
        let inner = StaticNewsSupplier::new(
            vec![],
            vec![NewsItem::new("x", "b"), NewsItem::new("y", "a")],
        );
        let ranked = KeywordRanked::new(inner, &[]);
        assert_eq!(titles(&ranked.fetch_tech_news().await), vec!["b", "a"]);
    }
}
