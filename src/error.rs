use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("ブラウザ初期化エラー: {0}")]
    BrowserInit(String),

    #[error("ナビゲーションエラー: {0}")]
    Navigation(String),

    #[error("JavaScript実行エラー: {0}")]
    JavaScript(String),

    #[error("タイムアウト: {0}")]
    Timeout(String),

    #[error("要素が見つかりません: {0}")]
    ElementNotFound(String),

    #[error("抽出エラー: {0}")]
    Extraction(String),

    #[error("ファイル操作エラー: {0}")]
    FileIO(#[from] std::io::Error),

    #[error("CSV書き込みエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("キャンセルされました")]
    Cancelled,
}
