pub mod structs;
pub mod fetcher;
pub mod news;

pub use structs::{NewsItem, SentimentReading};
pub use fetcher::FearGreedFetcher;
pub use news::{KeywordRanked, NewsSupplier, StaticNewsSupplier};
