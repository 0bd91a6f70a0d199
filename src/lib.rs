//! LinkedIn 求人スクレイパーライブラリ
//!
//! - 求人検索結果ページを無限スクロールで全件読み込み
//! - 求人カードごとに4フィールドを抽出（1件でも欠けたカードは破棄）
//! - 抽出レコードをCSVに保存
//!
//! # 使用例
//!
//! ```rust,ignore
//! use jobs_scraper_service::{ScraperService, ScrapeRequest};
//! use tower::Service;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut service = ScraperService::new();
//!
//!     let request = ScrapeRequest::new("rust developer", "Madrid")
//!         .with_output_dir("./output");
//!
//!     let result = service.call(request).await.unwrap();
//!     println!("CSV saved: {:?}", result.csv_path);
//! }
//! ```
//!
//! # キャンセル例
//!
//! ```rust,ignore
//! use jobs_scraper_service::{LinkedinScraper, ScraperConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ScraperConfig::new("rust developer", "Madrid");
//!     let mut scraper = LinkedinScraper::new(config);
//!
//!     let cancel = scraper.cancellation_token();
//!     tokio::spawn(async move {
//!         tokio::time::sleep(std::time::Duration::from_secs(60)).await;
//!         cancel.cancel();
//!     });
//!
//!     let result = scraper.scrape().await;
//!     println!("{:?}", result);
//! }
//! ```

pub mod browser;
pub mod config;
pub mod error;
pub mod linkedin;
pub mod service;
pub mod traits;
pub mod writer;

// 主要な型をリエクスポート
pub use browser::ChromeSession;
pub use config::ScraperConfig;
pub use error::ScraperError;
pub use linkedin::{JobListing, JobsResult, LinkedinScraper, SkippedListing};
pub use service::{ScrapeRequest, ScrapeResult, ScraperService};
pub use traits::{DocumentQuery, ListingNode};
