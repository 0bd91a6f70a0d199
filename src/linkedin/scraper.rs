//! LinkedIn 求人検索スクレイパー実装
//!
//! 検索結果ページを無限スクロールで全件読み込み、求人カードごとに
//! 4フィールドを抽出してCSVに書き出す

use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use crate::browser::ChromeSession;
use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::{DocumentQuery, ListingNode};
use crate::writer;

use super::types::{JobListing, JobsResult, SkippedListing};

const JOBS_SEARCH_URL: &str = "https://www.linkedin.com/jobs/search";

/// 検索結果リストのセレクタ
const RESULTS_LIST_SELECTOR: &str = "ul.jobs-search__results-list li";

/// 求人カード内のサブセレクタ
const TITLE_SELECTOR: &str = "h3.base-search-card__title";
const COMPANY_SELECTOR: &str = "h4.base-search-card__subtitle";
const LOCATION_SELECTOR: &str = "span.job-search-card__location";
const LINK_SELECTOR: &str = "a.base-card__full-link";

/// LinkedIn 求人スクレイパー
pub struct LinkedinScraper {
    config: ScraperConfig,
    session: Option<Box<dyn DocumentQuery>>,
    cancel: CancellationToken,
}

impl LinkedinScraper {
    /// 新しいスクレイパーを作成
    pub fn new(config: ScraperConfig) -> Self {
        Self {
            config,
            session: None,
            cancel: CancellationToken::new(),
        }
    }

    /// 任意の DocumentQuery 実装をセッションとして注入して作成
    pub fn with_session(config: ScraperConfig, session: Box<dyn DocumentQuery>) -> Self {
        Self {
            config,
            session: Some(session),
            cancel: CancellationToken::new(),
        }
    }

    /// キャンセルトークンを取得
    ///
    /// cancel() を呼ぶと各待機ポイントで `ScraperError::Cancelled` として
    /// 中断される。
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// ブラウザセッションを初期化（注入済みの場合は何もしない）
    pub async fn initialize(&mut self) -> Result<(), ScraperError> {
        if self.session.is_none() {
            let session = ChromeSession::launch(&self.config).await?;
            self.session = Some(Box::new(session));
        }
        Ok(())
    }

    /// スクレイピングを実行
    ///
    /// 成否に関わらずセッションはベストエフォートで解放される。
    pub async fn scrape(&mut self) -> Result<JobsResult, ScraperError> {
        info!(
            "Starting LinkedIn jobs scrape: keywords='{}', location='{}'",
            self.config.keywords, self.config.location
        );

        let result = self.run().await;

        if let Err(e) = self.close().await {
            debug!("Failed to close session: {}", e);
        }

        result
    }

    /// セッションを解放（冪等）
    pub async fn close(&mut self) -> Result<(), ScraperError> {
        if let Some(session) = self.session.as_mut() {
            session.close().await?;
        }
        self.session = None;
        Ok(())
    }

    async fn run(&mut self) -> Result<JobsResult, ScraperError> {
        self.initialize().await?;

        let url = self.search_url();
        let base = Url::parse(&url).map_err(|e| ScraperError::Navigation(e.to_string()))?;

        info!("Opening search URL: {}", url);
        self.get_session()?.open(&url).await?;

        self.scroll_to_end().await?;

        // 結果リストの出現を待機
        let timeout = self.config.selector_timeout;
        let cancel = self.cancel.clone();
        let session = self.get_session()?;
        let nodes = tokio::select! {
            _ = cancel.cancelled() => return Err(ScraperError::Cancelled),
            result = session.wait_for_selector(RESULTS_LIST_SELECTOR, timeout) => result?,
        };
        info!("Found {} job listings", nodes.len());

        let (listings, skipped) = extract_all(&self.cancel, &nodes, &base).await?;

        let csv_path = writer::output_path(&self.config.output_dir, &self.config.keywords);
        writer::write_listings(&listings, &csv_path)?;
        info!(
            "Wrote {} records to {:?} ({} skipped)",
            listings.len(),
            csv_path,
            skipped.len()
        );

        Ok(JobsResult {
            csv_path,
            listings,
            skipped,
        })
    }

    /// 検索URLを構築（キーワードと勤務地はURLエンコードする）
    fn search_url(&self) -> String {
        format!(
            "{}?keywords={}&location={}&geoId=&position=1&pageNum=0",
            JOBS_SEARCH_URL,
            urlencoding::encode(&self.config.keywords),
            urlencoding::encode(&self.config.location)
        )
    }

    /// ページ高さが安定するまでスクロールを繰り返す
    ///
    /// 2回連続で同じ高さを計測したら収束とみなす。高さが伸び続ける
    /// ページでも `max_scroll_steps` 回で打ち切って先へ進む。
    async fn scroll_to_end(&mut self) -> Result<(), ScraperError> {
        let pause = self.config.scroll_pause;
        let max_steps = self.config.max_scroll_steps;
        let cancel = self.cancel.clone();
        let session = self.get_session()?;

        info!("Scrolling until page height stabilizes...");
        let mut height = session.document_height().await?;
        let mut steps: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(ScraperError::Cancelled);
            }

            let prev = height;
            session.scroll_to(prev).await?;

            tokio::select! {
                _ = cancel.cancelled() => return Err(ScraperError::Cancelled),
                _ = sleep(pause) => {}
            }

            height = session.document_height().await?;

            if height == prev {
                info!(
                    "Page height stable at {}px after {} scroll steps",
                    height,
                    steps + 1
                );
                break;
            }

            steps += 1;
            if steps >= max_steps {
                warn!(
                    "Page height still growing after {} scroll steps ({}px), proceeding anyway",
                    steps, height
                );
                break;
            }

            debug!("Page height grew: {} -> {}", prev, height);
        }

        Ok(())
    }

    fn get_session(&mut self) -> Result<&mut Box<dyn DocumentQuery>, ScraperError> {
        self.session
            .as_mut()
            .ok_or_else(|| ScraperError::BrowserInit("セッションが初期化されていません".into()))
    }
}

/// 列挙済みノードから1件ずつ抽出する
///
/// 抽出失敗はそのレコードのスキップとして記録し、処理は継続する。
async fn extract_all(
    cancel: &CancellationToken,
    nodes: &[Box<dyn ListingNode>],
    base: &Url,
) -> Result<(Vec<JobListing>, Vec<SkippedListing>), ScraperError> {
    let mut listings = Vec::new();
    let mut skipped = Vec::new();

    for (index, node) in nodes.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(ScraperError::Cancelled);
        }

        match extract_listing(node.as_ref(), base).await {
            Ok(listing) => {
                debug!(
                    "Listing {} extracted: {} @ {}",
                    index + 1,
                    listing.title,
                    listing.location
                );
                listings.push(listing);
            }
            Err(e) => {
                warn!("Listing {} skipped: {}", index + 1, e);
                skipped.push(SkippedListing {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok((listings, skipped))
}

/// 求人カード1件から4フィールドを抽出する
///
/// いずれか1つでも解決できなければレコード全体を破棄する
/// （部分的なプレースホルダー行は書き出さない）。
async fn extract_listing(node: &dyn ListingNode, base: &Url) -> Result<JobListing, ScraperError> {
    let title = non_empty(node.query_text(TITLE_SELECTOR).await?, TITLE_SELECTOR)?;
    let company = non_empty(node.query_text(COMPANY_SELECTOR).await?, COMPANY_SELECTOR)?;
    let location = non_empty(node.query_text(LOCATION_SELECTOR).await?, LOCATION_SELECTOR)?;

    let href = node.query_attr(LINK_SELECTOR, "href").await?;
    let link = resolve_link(&href, base)?;

    Ok(JobListing {
        title,
        company,
        location,
        link,
    })
}

/// 前後の空白を除去し、空文字列は欠損として扱う
fn non_empty(raw: String, selector: &str) -> Result<String, ScraperError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScraperError::ElementNotFound(format!(
            "{}: テキストが空です",
            selector
        )));
    }
    Ok(trimmed.to_string())
}

/// hrefを絶対URLとして解決する
fn resolve_link(href: &str, base: &Url) -> Result<Url, ScraperError> {
    match Url::parse(href) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base
            .join(href)
            .map_err(|e| ScraperError::Extraction(format!("リンクURLが不正です: {}", e))),
        Err(e) => Err(ScraperError::Extraction(format!(
            "リンクURLが不正です: {}",
            e
        ))),
    }
}
