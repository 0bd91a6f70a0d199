//! 抽出レコードのCSV出力

use std::path::{Path, PathBuf};

use crate::error::ScraperError;
use crate::linkedin::JobListing;

/// CSVの固定ヘッダー（3列）
const CSV_HEADER: [&str; 3] = [
    "Título del trabajo",
    "Ubicación del trabajo",
    "Enlace del trabajo",
];

/// 出力ファイルパスを構築する
///
/// 同一リクエストからは常に同じパスが得られる。キーワードは
/// ファイル名にそのまま使われる。
pub fn output_path(output_dir: &Path, keywords: &str) -> PathBuf {
    output_dir.join(format!("linkedin_jobs_{}.csv", keywords))
}

/// レコード列をCSVファイルに書き出す
///
/// 既存ファイルは上書きされる（追記ではない）。会社名は
/// レコードにあるが出力列には含まれない。
pub fn write_listings(listings: &[JobListing], path: &Path) -> Result<(), ScraperError> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(CSV_HEADER)?;

    for listing in listings {
        writer.write_record([
            listing.title.as_str(),
            listing.location.as_str(),
            listing.link.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use url::Url;

    fn listing(title: &str, location: &str, link: &str) -> JobListing {
        JobListing {
            title: title.to_string(),
            company: "Acme Corp".to_string(),
            location: location.to_string(),
            link: Url::parse(link).unwrap(),
        }
    }

    #[test]
    fn test_output_path_is_deterministic() {
        let path = output_path(Path::new("/tmp/out"), "rust developer");
        assert_eq!(
            path,
            PathBuf::from("/tmp/out/linkedin_jobs_rust developer.csv")
        );
        assert_eq!(path, output_path(Path::new("/tmp/out"), "rust developer"));
    }

    #[test]
    fn test_header_only_for_zero_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), "rust");

        write_listings(&[], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.trim_end(),
            "Título del trabajo,Ubicación del trabajo,Enlace del trabajo"
        );
    }

    #[test]
    fn test_rows_follow_header_without_company() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), "rust");

        let listings = vec![
            listing("Rust Developer", "Madrid", "https://example.com/jobs/1"),
            listing("SRE", "Barcelona", "https://example.com/jobs/2"),
        ];
        write_listings(&listings, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Rust Developer,Madrid,https://example.com/jobs/1");
        assert!(!content.contains("Acme Corp"));
    }

    #[test]
    fn test_embedded_delimiter_is_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), "rust");

        let listings = vec![listing(
            "Developer, Senior",
            "Madrid, Spain",
            "https://example.com/jobs/1",
        )];
        write_listings(&listings, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Developer, Senior\",\"Madrid, Spain\""));
    }

    #[test]
    fn test_rerun_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), "rust");

        let first = vec![
            listing("Rust Developer", "Madrid", "https://example.com/jobs/1"),
            listing("SRE", "Barcelona", "https://example.com/jobs/2"),
        ];
        write_listings(&first, &path).unwrap();

        let second = vec![listing("SRE", "Barcelona", "https://example.com/jobs/2")];
        write_listings(&second, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(!content.contains("Rust Developer"));
    }

    #[test]
    fn test_same_input_writes_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(dir.path(), "rust");

        let listings = vec![listing(
            "Rust Developer",
            "Madrid",
            "https://example.com/jobs/1",
        )];

        write_listings(&listings, &path).unwrap();
        let first = std::fs::read(&path).unwrap();

        write_listings(&listings, &path).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_unwritable_directory_surfaces_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = output_path(&dir.path().join("missing"), "rust");

        let err = write_listings(&[], &path).unwrap_err();
        assert!(matches!(err, ScraperError::Csv(_)));
    }
}
