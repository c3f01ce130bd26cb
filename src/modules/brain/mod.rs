pub mod signal;

pub use signal::{classify, MoodCategory, SentimentSignal, Severity};
