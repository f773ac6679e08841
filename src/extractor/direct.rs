use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

use crate::error::{ExtractionError, Result};
use crate::metadata::Metadata;
use crate::model::DownloadOptions;

use super::Extractor;

const MEDIA_EXTENSIONS: &[&str] = &["mp4", "webm", "mkv", "mov", "m4v", "avi", "flv"];

// fetch plain media links without going through yt-dlp.
pub struct DirectHttp {
    client: Client,
}

impl DirectHttp {
    pub fn new() -> Self {
        DirectHttp::with_client(Client::new())
    }

    pub fn with_client(client: Client) -> Self {
        DirectHttp { client }
    }

    pub fn suitable(url: &str) -> bool {
        Url::parse(url)
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .and_then(|url| media_name(&url))
            .is_some()
    }

    fn describe(url: &Url) -> Result<Metadata> {
        let (stem, ext) =
            media_name(url).ok_or_else(|| ExtractionError::Unsupported(url.to_string()))?;

        let mut metadata = Metadata::new();
        metadata.insert("id".to_string(), json!(stem));
        metadata.insert("ext".to_string(), json!(ext));
        metadata.insert("title".to_string(), json!(stem));
        metadata.insert("webpage_url".to_string(), json!(url.as_str()));
        metadata.insert("extractor".to_string(), json!("direct"));
        Ok(metadata)
    }
}

impl Default for DirectHttp {
    fn default() -> Self {
        DirectHttp::new()
    }
}

#[async_trait]
impl Extractor for DirectHttp {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn extract_and_download(&self, url: &str, options: &DownloadOptions) -> Result<Metadata> {
        let url = Url::parse(url)?;
        let mut metadata = DirectHttp::describe(&url)?;

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            metadata.insert("http_content_type".to_string(), json!(content_type));
        }

        let file_path = self.prepare_filename(&metadata, options);
        let written = write_body(response, &file_path).await?;
        debug!(path = %file_path.display(), bytes = written, "wrote media");

        metadata.insert("filesize".to_string(), Value::from(written));
        Ok(metadata)
    }
}

async fn write_body(response: reqwest::Response, path: &Path) -> Result<u64> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}

fn media_name(url: &Url) -> Option<(String, String)> {
    let filename = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())?;
    let (stem, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();

    if stem.is_empty() || !MEDIA_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }

    Some((stem.to_string(), ext))
}
