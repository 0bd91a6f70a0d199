use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// 検索キーワード
    pub keywords: String,
    /// 勤務地
    pub location: String,
    /// CSV出力先ディレクトリ
    pub output_dir: PathBuf,
    /// ヘッドレスモード
    pub headless: bool,
    /// デバッグモード（スクリーンショットをログ出力）
    pub debug: bool,
    /// スクロール後の読み込み待機時間
    pub scroll_pause: Duration,
    /// 検索結果リストの出現待機タイムアウト
    pub selector_timeout: Duration,
    /// スクロール収束ループの上限回数
    pub max_scroll_steps: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            keywords: String::new(),
            location: String::new(),
            output_dir: PathBuf::from("./output"),
            headless: true,
            debug: false,
            scroll_pause: Duration::from_secs(2),
            selector_timeout: Duration::from_secs(30),
            max_scroll_steps: 200,
        }
    }
}

impl ScraperConfig {
    pub fn new(keywords: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            keywords: keywords.into(),
            location: location.into(),
            ..Default::default()
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

    pub fn with_scroll_pause(mut self, pause: Duration) -> Self {
        self.scroll_pause = pause;
        self
    }

    pub fn with_selector_timeout(mut self, timeout: Duration) -> Self {
        self.selector_timeout = timeout;
        self
    }

    pub fn with_max_scroll_steps(mut self, steps: u32) -> Self {
        self.max_scroll_steps = steps;
        self
    }
}
