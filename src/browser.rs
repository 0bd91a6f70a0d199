//! chromiumoxide による DocumentQuery 実装

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Element, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::traits::{DocumentQuery, ListingNode};

/// セレクタ出現待機のポーリング間隔（ミリ秒）
const SELECTOR_POLL_INTERVAL_MS: u64 = 500;

/// ヘッドレスChromiumセッション
///
/// ブラウザプロセスと派生ノードハンドルを独占所有する。
/// 1セッション = 1リクエスト。
pub struct ChromeSession {
    debug: bool,
    browser: Option<Browser>,
    page: Option<Page>,
}

impl ChromeSession {
    /// ブラウザを起動してセッションを確立
    pub async fn launch(config: &ScraperConfig) -> Result<Self, ScraperError> {
        info!("Initializing browser...");

        // ユニークなユーザーデータディレクトリを生成
        let unique_id = format!(
            "{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );
        let user_data_dir = std::env::temp_dir().join(format!("jobs-scraper-{}", unique_id));

        // Chrome パスを取得
        let chrome_path = std::env::var("CHROME_PATH")
            .or_else(|_| std::env::var("CHROMIUM_PATH"))
            .unwrap_or_else(|_| "chromium".to_string());

        // ブラウザ設定を構築
        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .user_data_dir(&user_data_dir)
            .window_size(1280, 800);

        if !config.headless {
            builder = builder.with_head();
        }

        builder = builder
            .no_sandbox()
            .request_timeout(Duration::from_secs(60))
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu");

        if config.debug {
            builder = builder.arg("--enable-logging=stderr").arg("--v=1");
        }

        let browser_config = builder
            .build()
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ブラウザを起動
        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        // ハンドラータスクを起動
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!("Browser event: {:?}", event);
            }
        });

        // 新しいページを作成
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| ScraperError::BrowserInit(e.to_string()))?;

        info!("Browser initialized successfully");

        Ok(Self {
            debug: config.debug,
            browser: Some(browser),
            page: Some(page),
        })
    }

    fn get_page(&self) -> Result<&Page, ScraperError> {
        self.page
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserInit("ブラウザが初期化されていません".into()))
    }

    /// デバッグ用スクリーンショットをログに出力
    async fn debug_screenshot(&self, page: &Page) {
        if let Ok(screenshot) = page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
        {
            use base64::Engine;
            let encoded = base64::engine::general_purpose::STANDARD.encode(&screenshot);
            debug!("Page screenshot: data:image/png;base64,{}", encoded);
        }
    }
}

#[async_trait]
impl DocumentQuery for ChromeSession {
    async fn open(&mut self, url: &str) -> Result<(), ScraperError> {
        let page = self.get_page()?;

        page.goto(url)
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| ScraperError::Navigation(e.to_string()))?;
        debug!("Navigation complete: {}", url);

        if self.debug {
            self.debug_screenshot(page).await;
        }

        Ok(())
    }

    async fn document_height(&mut self) -> Result<i64, ScraperError> {
        let page = self.get_page()?;

        let result = page
            .evaluate("document.body.scrollHeight")
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        result
            .into_value::<i64>()
            .map_err(|e| ScraperError::JavaScript(e.to_string()))
    }

    async fn scroll_to(&mut self, y: i64) -> Result<(), ScraperError> {
        let page = self.get_page()?;

        let script = format!("window.scrollTo(0, {});", y);
        page.evaluate(script.as_str())
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?;

        Ok(())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<Box<dyn ListingNode>>, ScraperError> {
        let page = self.get_page()?;
        let start = std::time::Instant::now();

        loop {
            // 出現前のエラーは「まだ無い」と同義に扱う
            let elements = page.find_elements(selector).await.unwrap_or_default();

            if !elements.is_empty() {
                debug!(
                    "Selector '{}' matched {} nodes after {:?}",
                    selector,
                    elements.len(),
                    start.elapsed()
                );
                return Ok(elements
                    .into_iter()
                    .map(|element| Box::new(ChromeNode { element }) as Box<dyn ListingNode>)
                    .collect());
            }

            if start.elapsed() > timeout {
                warn!("Selector '{}' not found after {:?}", selector, timeout);
                return Err(ScraperError::Timeout(format!(
                    "セレクタ {} が{}秒以内に出現しませんでした",
                    selector,
                    timeout.as_secs()
                )));
            }

            sleep(Duration::from_millis(SELECTOR_POLL_INTERVAL_MS)).await;
        }
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        // ページとブラウザの参照を解放
        self.page = None;
        self.browser = None;

        debug!("Browser session closed");
        Ok(())
    }
}

/// chromiumoxide Element のラッパー
struct ChromeNode {
    element: Element,
}

#[async_trait]
impl ListingNode for ChromeNode {
    async fn query_text(&self, selector: &str) -> Result<String, ScraperError> {
        let found = self
            .element
            .find_element(selector)
            .await
            .map_err(|e| ScraperError::ElementNotFound(format!("{}: {}", selector, e)))?;

        let text = found
            .inner_text()
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?
            .ok_or_else(|| {
                ScraperError::ElementNotFound(format!("{}: テキストがありません", selector))
            })?;

        Ok(text)
    }

    async fn query_attr(&self, selector: &str, attr: &str) -> Result<String, ScraperError> {
        let found = self
            .element
            .find_element(selector)
            .await
            .map_err(|e| ScraperError::ElementNotFound(format!("{}: {}", selector, e)))?;

        let value = found
            .attribute(attr)
            .await
            .map_err(|e| ScraperError::JavaScript(e.to_string()))?
            .ok_or_else(|| {
                ScraperError::ElementNotFound(format!("{}[{}]: 属性がありません", selector, attr))
            })?;

        Ok(value)
    }
}
