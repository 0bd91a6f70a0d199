use async_trait::async_trait;
use std::time::Duration;

use crate::error::ScraperError;

/// 読み込み済みドキュメント内の検索結果1件を指すハンドル。
/// セッションが閉じられた後は無効。
#[async_trait]
pub trait ListingNode: Send + Sync {
    /// サブセレクタに一致する要素のテキストを取得
    async fn query_text(&self, selector: &str) -> Result<String, ScraperError>;

    /// サブセレクタに一致する要素の属性値を取得
    async fn query_attr(&self, selector: &str, attr: &str) -> Result<String, ScraperError>;
}

/// ブラウザ自動化バックエンドの抽象化。
/// エンジンはこのトレイト経由でのみドキュメントを操作する。
#[async_trait]
pub trait DocumentQuery: Send {
    /// URLを開いて読み込み完了を待つ
    async fn open(&mut self, url: &str) -> Result<(), ScraperError>;

    /// ドキュメント全体の高さを取得
    async fn document_height(&mut self) -> Result<i64, ScraperError>;

    /// 指定位置までスクロール
    async fn scroll_to(&mut self, y: i64) -> Result<(), ScraperError>;

    /// セレクタに一致するノード群の出現を待つ
    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<Box<dyn ListingNode>>, ScraperError>;

    /// リソース解放（冪等）
    async fn close(&mut self) -> Result<(), ScraperError>;
}
