use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tokio::fs;
use tracing::{info, warn};

use crate::error::{ExtractionError, Result};
use crate::extractor::Extractor;
use crate::model::{DownloadOptions, DownloadRequest, DownloadResult, DEFAULT_FORMAT};
use crate::template::OutputTemplate;

pub struct Downloader<E> {
    extractor: E,
    format: String,
    template: OutputTemplate,
    quiet: bool,
}

impl<E: Extractor> Downloader<E> {
    pub fn new(extractor: E) -> Self {
        Downloader {
            extractor,
            format: DEFAULT_FORMAT.to_string(),
            template: OutputTemplate::default(),
            quiet: true,
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn options_for(&self, request: &DownloadRequest) -> DownloadOptions {
        DownloadOptions {
            output_directory: request.output_directory.clone(),
            format: self.format.clone(),
            output_template: self.template.clone(),
            no_playlist: true,
            quiet: self.quiet,
        }
    }

    /// Downloads one item. Errors never escape; they come back as
    /// [`DownloadResult::Failure`].
    pub async fn download(&self, request: &DownloadRequest) -> DownloadResult {
        let spinner = self.spinner(&request.url);

        let result = match self.try_download(request).await {
            Ok(result) => result,
            Err(e) => {
                warn!(url = %request.url, error = %e, "download failed");
                DownloadResult::failure(e.to_string())
            }
        };

        if let Some(pb) = spinner {
            match &result {
                DownloadResult::Success { file_path, .. } => {
                    pb.finish_with_message(format!("✓ Saved {}", file_path.display()))
                }
                DownloadResult::Failure { .. } => pb.abandon_with_message("✗ Download failed"),
            }
        }

        result
    }

    async fn try_download(&self, request: &DownloadRequest) -> Result<DownloadResult> {
        let options = self.options_for(request);

        fs::create_dir_all(&options.output_directory)
            .await
            .map_err(|source| ExtractionError::CreateDir {
                path: options.output_directory.clone(),
                source,
            })?;

        let url = request.url.trim();
        if url.is_empty() {
            return Err(ExtractionError::MissingUrl);
        }

        let mut metadata = self.extractor.extract_and_download(url, &options).await?;
        let file_path = self.extractor.prepare_filename(&metadata, &options);
        info!(extractor = self.extractor.name(), path = %file_path.display(), "download finished");

        metadata.insert(
            "filepath".to_string(),
            Value::String(file_path.to_string_lossy().into_owned()),
        );

        Ok(DownloadResult::Success { metadata, file_path })
    }

    fn spinner(&self, url: &str) -> Option<ProgressBar> {
        if self.quiet {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()));
        pb.set_message(format!("Downloading: {}", url));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}
