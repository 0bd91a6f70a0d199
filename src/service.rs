use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::task::{Context, Poll};

use tower::Service;
use tracing::info;

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::linkedin::{JobsResult, LinkedinScraper};

/// スクレイピングリクエスト
#[derive(Debug, Clone)]
pub struct ScrapeRequest {
    pub keywords: String,
    pub location: String,
    pub output_dir: PathBuf,
    pub headless: bool,
    pub debug: bool,
}

impl ScrapeRequest {
    pub fn new(keywords: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
            output_dir: PathBuf::from("./output"),
            headless: true,
            debug: false,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl From<ScrapeRequest> for ScraperConfig {
    fn from(req: ScrapeRequest) -> Self {
        ScraperConfig {
            keywords: req.keywords,
            location: req.location,
            output_dir: req.output_dir,
            headless: req.headless,
            debug: req.debug,
            ..Default::default()
        }
    }
}

/// スクレイピング結果
#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub csv_path: PathBuf,
    pub record_count: usize,
    pub skipped_count: usize,
}

impl From<JobsResult> for ScrapeResult {
    fn from(result: JobsResult) -> Self {
        Self {
            csv_path: result.csv_path,
            record_count: result.listings.len(),
            skipped_count: result.skipped.len(),
        }
    }
}

/// tower::Serviceを実装したスクレイパーサービス
#[derive(Debug, Clone, Default)]
pub struct ScraperService {
    // 将来的な拡張用（レートリミット、キャッシュなど）
}

impl ScraperService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Service<ScrapeRequest> for ScraperService {
    type Response = ScrapeResult;
    type Error = ScraperError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: ScrapeRequest) -> Self::Future {
        info!(
            "スクレイピングリクエスト受信: keywords={}, location={}",
            req.keywords, req.location
        );

        Box::pin(async move {
            let config: ScraperConfig = req.into();
            let mut scraper = LinkedinScraper::new(config);

            // スクレイピング実行
            let result = scraper.scrape().await?;

            info!(
                "スクレイピング完了: path={:?}, records={}, skipped={}",
                result.csv_path,
                result.listings.len(),
                result.skipped.len()
            );

            Ok(ScrapeResult::from(result))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use url::Url;

    use crate::linkedin::JobListing;

    #[test]
    fn test_scrape_request_builder() {
        let req = ScrapeRequest::new("rust developer", "Madrid")
            .with_output_dir("/tmp/out")
            .with_headless(false)
            .with_debug(true);

        assert_eq!(req.keywords, "rust developer");
        assert_eq!(req.location, "Madrid");
        assert_eq!(req.output_dir, PathBuf::from("/tmp/out"));
        assert!(!req.headless);
        assert!(req.debug);
    }

    #[test]
    fn test_scrape_request_to_config() {
        let req = ScrapeRequest::new("rust developer", "Madrid").with_headless(false);
        let config: ScraperConfig = req.into();

        assert_eq!(config.keywords, "rust developer");
        assert_eq!(config.location, "Madrid");
        assert!(!config.headless);
        // タイミング系はデフォルト値を引き継ぐ
        assert_eq!(config.max_scroll_steps, 200);
    }

    #[test]
    fn test_scrape_result_counts() {
        let jobs = JobsResult {
            csv_path: PathBuf::from("/tmp/out/linkedin_jobs_rust.csv"),
            listings: vec![JobListing {
                title: "Rust Developer".to_string(),
                company: "Acme Corp".to_string(),
                location: "Madrid".to_string(),
                link: Url::parse("https://example.com/jobs/1").unwrap(),
            }],
            skipped: vec![],
        };

        let result = ScrapeResult::from(jobs);
        assert_eq!(result.record_count, 1);
        assert_eq!(result.skipped_count, 0);
        assert_eq!(
            result.csv_path,
            PathBuf::from("/tmp/out/linkedin_jobs_rust.csv")
        );
    }
}
