//! LinkedIn 求人検索関連の型定義

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

/// 求人1件分の抽出レコード
///
/// 4フィールドすべて解決できた場合のみ生成される（all-or-nothing）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListing {
    /// 職種名
    pub title: String,
    /// 会社名（抽出はするがCSVには出力しない）
    pub company: String,
    /// 勤務地
    pub location: String,
    /// 求人詳細への絶対URL
    pub link: Url,
}

/// 抽出に失敗してスキップされたレコード
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedListing {
    /// 列挙時のインデックス（0始まり）
    pub index: usize,
    /// スキップ原因
    pub reason: String,
}

/// LinkedIn スクレイプ結果
#[derive(Debug, Clone)]
pub struct JobsResult {
    /// 出力したCSVファイルのパス
    pub csv_path: PathBuf,
    /// 抽出に成功したレコード
    pub listings: Vec<JobListing>,
    /// スキップしたレコード
    pub skipped: Vec<SkippedListing>,
}
