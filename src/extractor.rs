mod direct;
mod ytdlp;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::metadata::Metadata;
use crate::model::DownloadOptions;

pub use direct::DirectHttp;
pub use ytdlp::YtDlp;

#[async_trait]
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Resolves `url`, writes the media under `options.output_directory` and
    /// returns the item's metadata.
    async fn extract_and_download(&self, url: &str, options: &DownloadOptions) -> Result<Metadata>;

    fn prepare_filename(&self, metadata: &Metadata, options: &DownloadOptions) -> PathBuf {
        options
            .output_directory
            .join(options.output_template.render(metadata))
    }
}

#[async_trait]
impl<T: Extractor + ?Sized> Extractor for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn extract_and_download(&self, url: &str, options: &DownloadOptions) -> Result<Metadata> {
        (**self).extract_and_download(url, options).await
    }

    fn prepare_filename(&self, metadata: &Metadata, options: &DownloadOptions) -> PathBuf {
        (**self).prepare_filename(metadata, options)
    }
}

/// Direct media links go over plain HTTP, everything else through yt-dlp.
pub struct Auto {
    direct: DirectHttp,
    ytdlp: YtDlp,
}

impl Auto {
    pub fn new(direct: DirectHttp, ytdlp: YtDlp) -> Self {
        Auto { direct, ytdlp }
    }

    fn pick(&self, url: &str) -> &dyn Extractor {
        if DirectHttp::suitable(url) {
            &self.direct
        } else {
            &self.ytdlp
        }
    }
}

#[async_trait]
impl Extractor for Auto {
    fn name(&self) -> &'static str {
        "auto"
    }

    async fn extract_and_download(&self, url: &str, options: &DownloadOptions) -> Result<Metadata> {
        let extractor = self.pick(url);
        tracing::debug!(extractor = extractor.name(), url, "selected extractor");
        extractor.extract_and_download(url, options).await
    }

    // direct downloads carry no reported filename, so yt-dlp's lookup falls
    // back to the template for them
    fn prepare_filename(&self, metadata: &Metadata, options: &DownloadOptions) -> PathBuf {
        self.ytdlp.prepare_filename(metadata, options)
    }
}
