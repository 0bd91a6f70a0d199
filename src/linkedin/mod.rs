//! LinkedIn 求人検索スクレイパーモジュール
//!
//! 検索結果ページから求人レコードを抽出してCSVに保存する

mod scraper;
mod types;

pub use scraper::LinkedinScraper;
pub use types::{JobListing, JobsResult, SkippedListing};
