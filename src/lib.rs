pub mod cli;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod metadata;
pub mod model;
pub mod template;

pub use cli::Args;
pub use downloader::Downloader;
pub use error::ExtractionError;
pub use extractor::Extractor;
pub use metadata::Metadata;
pub use model::{DownloadOptions, DownloadRequest, DownloadResult};
pub use template::OutputTemplate;

/// Downloads `url` into `output_directory` with yt-dlp and the default settings.
pub async fn download(url: &str, output_directory: impl Into<std::path::PathBuf>) -> DownloadResult {
    let request = DownloadRequest::new(url).with_output_directory(output_directory);
    Downloader::new(extractor::YtDlp::default()).download(&request).await
}
