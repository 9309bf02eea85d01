use async_trait::async_trait;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{catalog, http_status, timeouts};
use crate::core::error::{BookCheckError, Result};
use crate::core::types::Entry;

/// Where a catalog lives, as recognized from the configured `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Anything starting with `http`
    Remote(String),
    /// An existing local `.json` file
    JsonFile(PathBuf),
    /// A missing path or a file of another type; loads as an empty catalog
    Unsupported(String),
}

impl CatalogSource {
    pub fn recognize(path: &str) -> Self {
        let path = path.trim();
        if path.starts_with(catalog::REMOTE_PREFIX) {
            return Self::Remote(path.to_string());
        }

        let local = Path::new(path);
        let is_json = local
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(catalog::JSON_EXTENSION));

        if local.is_file() && is_json {
            Self::JsonFile(local.to_path_buf())
        } else {
            Self::Unsupported(path.to_string())
        }
    }
}

#[async_trait]
pub trait LoadCatalog {
    async fn load_catalog(&self, path: &str) -> Result<Vec<Entry>>;
}

/// Loads book source catalogs from disk or over HTTP.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    fetch_timeout: Duration,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(Duration::from_secs(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }
}

#[async_trait]
impl LoadCatalog for CatalogLoader {
    async fn load_catalog(&self, path: &str) -> Result<Vec<Entry>> {
        match CatalogSource::recognize(path) {
            CatalogSource::Remote(url) => self.fetch(&url).await,
            CatalogSource::JsonFile(file) => Self::read_file(&file),
            CatalogSource::Unsupported(path) => {
                warn!("Unsupported catalog '{path}': expected an existing .json file or an http(s) URL");
                Ok(Vec::new())
            }
        }
    }
}

impl CatalogLoader {
    /// Create a loader whose remote downloads get a multiple of the probe timeout.
    pub fn new(probe_timeout: Duration) -> Self {
        Self {
            fetch_timeout: probe_timeout * timeouts::CATALOG_FETCH_MULTIPLIER as u32,
        }
    }

    fn read_file(path: &Path) -> Result<Vec<Entry>> {
        let content = fs::read_to_string(path).map_err(|e| {
            BookCheckError::Catalog(format!(
                "Could not read catalog '{}': {}",
                path.display(),
                e
            ))
        })?;
        parse_catalog(&content, &path.display().to_string())
    }

    async fn fetch(&self, url: &str) -> Result<Vec<Entry>> {
        debug!("Fetching catalog from {url}");
        let client = reqwest::Client::builder()
            .timeout(self.fetch_timeout)
            .build()?;

        let response = client.get(url).send().await.map_err(|e| {
            BookCheckError::Catalog(format!("Could not fetch catalog '{url}': {e}"))
        })?;

        let status = response.status().as_u16();
        if status != http_status::OK {
            return Err(BookCheckError::Catalog(format!(
                "Could not fetch catalog '{url}': server answered {status}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            BookCheckError::Catalog(format!("Could not read catalog '{url}': {e}"))
        })?;
        parse_catalog(&body, url)
    }
}

/// Parse a catalog document: a JSON array of book source objects.
pub fn parse_catalog(content: &str, origin: &str) -> Result<Vec<Entry>> {
    // Catalogs exported on Windows often start with a byte order mark
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let entries: Vec<Entry> = serde_json::from_str(content).map_err(|e| {
        BookCheckError::Catalog(format!(
            "Could not parse catalog '{origin}': {e}. Expected a JSON array of objects."
        ))
    })?;

    let without_url = entries.iter().filter(|entry| entry.url().is_none()).count();
    if without_url > 0 {
        warn!(
            "{without_url} of {} entries in '{origin}' have no {}; they will be reported as errors",
            entries.len(),
            catalog::URL_FIELD
        );
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::io::Write;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    const CATALOG: &str = r#"[
        {"bookSourceName": "甲", "bookSourceUrl": "https://a.test"},
        {"bookSourceName": "乙", "bookSourceUrl": "https://b.test", "enabled": false}
    ]"#;

    fn json_file(content: &str) -> std::io::Result<tempfile::NamedTempFile> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        file.write_all(content.as_bytes())?;
        Ok(file)
    }

    #[test]
    fn test_recognize_remote() {
        assert_eq!(
            CatalogSource::recognize("https://example.com/books.json"),
            CatalogSource::Remote("https://example.com/books.json".to_string())
        );
        assert_eq!(
            CatalogSource::recognize(" http://example.com/books "),
            CatalogSource::Remote("http://example.com/books".to_string())
        );
    }

    #[test]
    fn test_recognize_local() -> TestResult {
        let file = json_file("[]")?;
        let path = file.path().display().to_string();
        assert_eq!(
            CatalogSource::recognize(&path),
            CatalogSource::JsonFile(file.path().to_path_buf())
        );

        let txt = tempfile::Builder::new().suffix(".txt").tempfile()?;
        let txt_path = txt.path().display().to_string();
        assert_eq!(
            CatalogSource::recognize(&txt_path),
            CatalogSource::Unsupported(txt_path.clone())
        );

        assert_eq!(
            CatalogSource::recognize("/definitely/not/here.json"),
            CatalogSource::Unsupported("/definitely/not/here.json".to_string())
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_load_catalog_from_file() -> TestResult {
        let file = json_file(CATALOG)?;

        let entries = CatalogLoader::default()
            .load_catalog(&file.path().display().to_string())
            .await?;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url(), Some("https://a.test"));
        assert_eq!(entries[1].fields()["enabled"], serde_json::Value::Bool(false));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_catalog_unsupported_is_empty() -> TestResult {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile()?;
        file.write_all(CATALOG.as_bytes())?;

        let loader = CatalogLoader::default();
        assert!(
            loader
                .load_catalog(&file.path().display().to_string())
                .await?
                .is_empty()
        );
        assert!(loader.load_catalog("no-such-catalog.json").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_load_catalog_malformed_file() -> TestResult {
        let file = json_file(r#"{"bookSourceUrl": "https://a.test"}"#)?;

        let err = CatalogLoader::default()
            .load_catalog(&file.path().display().to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, BookCheckError::Catalog(_)));
        assert!(err.to_string().contains("Expected a JSON array"));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_catalog_from_url() -> TestResult {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/books.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(CATALOG)
            .create();

        let entries = CatalogLoader::default()
            .load_catalog(&(server.url() + "/books.json"))
            .await?;

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].url(), Some("https://b.test"));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_catalog_from_url_not_found() -> TestResult {
        let mut server = Server::new_async().await;
        let _m = server.mock("GET", "/missing.json").with_status(404).create();

        let err = CatalogLoader::default()
            .load_catalog(&(server.url() + "/missing.json"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("server answered 404"));
        Ok(())
    }

    #[test]
    fn test_parse_catalog_with_bom() -> TestResult {
        let entries = parse_catalog("\u{feff}[{\"bookSourceUrl\": \"https://a.test\"}]", "bom")?;
        assert_eq!(entries.len(), 1);
        Ok(())
    }

    #[test]
    fn test_parse_catalog_keeps_entries_without_url() -> TestResult {
        let entries = parse_catalog(r#"[{"bookSourceName": "orphan"}, {"bookSourceUrl": ""}]"#, "t")?;
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.url().is_none()));
        Ok(())
    }

    #[test]
    fn test_parse_catalog_keeps_duplicates() -> TestResult {
        let entries = parse_catalog(
            r#"[{"bookSourceUrl": "https://a.test"}, {"bookSourceUrl": "https://a.test"}]"#,
            "dup",
        )?;
        assert_eq!(entries.len(), 2);
        Ok(())
    }
}
