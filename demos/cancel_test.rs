use std::time::Duration;

use jobs_scraper_service::{LinkedinScraper, ScraperConfig};

#[tokio::main]
async fn main() {
    // ログ設定
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let keywords = std::env::var("JOB_KEYWORDS").unwrap_or_else(|_| "rust".to_string());
    let location = std::env::var("JOB_LOCATION").unwrap_or_else(|_| "Madrid".to_string());
    let output_dir = std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "./output".to_string());

    std::fs::create_dir_all(&output_dir).expect("Failed to create output directory");

    let config = ScraperConfig::new(&keywords, &location).with_output_dir(&output_dir);

    let mut scraper = LinkedinScraper::new(config);
    let cancel = scraper.cancellation_token();

    // 10秒後にキャンセル
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(10)).await;
        println!("10秒経過、キャンセルします...");
        cancel.cancel();
    });

    println!("=== Cancellation Test ===");

    match scraper.scrape().await {
        Ok(result) => {
            println!("成功! CSV保存先: {:?}", result.csv_path);
        }
        Err(e) => {
            eprintln!("エラー: {}", e);
        }
    }
}
