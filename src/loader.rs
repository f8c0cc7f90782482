//! カタログ読み込みモジュール
//!
//! 取得元（HTTP / ローカルCSV）からテキストを取得し、共通ライブラリで取り込む。
//! 取得に失敗してもエラーは返さず、フォールバックカタログを返す。

use crate::error::{ConfiguratorError, Result};
use configurator_common::{ingest, Catalog, Classifier};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Url;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

/// カタログのCSVテキストを提供する取得元
pub trait CatalogSource {
    /// ログ表示用の説明
    fn describe(&self) -> String;

    fn fetch(&self) -> impl Future<Output = Result<String>> + Send;
}

/// HTTP取得元（毎回キャッシュを回避する）
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(url, client))
    }

    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// キャッシュ回避パラメータ付きのURL
    pub fn request_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| ConfiguratorError::SourceUnavailable(format!("{}: {}", self.url, e)))?;
        url.query_pairs_mut()
            .append_pair("nocache", &chrono::Utc::now().timestamp_millis().to_string());
        Ok(url)
    }
}

impl CatalogSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<String> {
        let url = self.request_url()?;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

/// ローカルCSVファイル
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        if !self.path.exists() {
            return Err(ConfiguratorError::SourceUnavailable(self.describe()));
        }
        Ok(tokio::fs::read_to_string(&self.path).await?)
    }
}

/// カタログを読み込む（失敗時はフォールバックカタログ）
pub async fn load<S: CatalogSource>(source: &S, classifier: &Classifier) -> Catalog {
    log::info!("カタログ読み込み: {}", source.describe());

    match source.fetch().await {
        Ok(content) => {
            let catalog = ingest(&content, classifier);
            log::info!("カタログ読み込み完了: {}件", catalog.len());
            catalog
        }
        Err(e) => {
            log::warn!("カタログ取得失敗、フォールバックカタログを使用: {}", e);
            Catalog::fallback(e.to_string())
        }
    }
}
