use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::metadata::Metadata;
use crate::template::OutputTemplate;

pub const DEFAULT_OUTPUT_DIR: &str = "files/videos";
pub const DEFAULT_FORMAT: &str = "best";

#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub output_directory: PathBuf,
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        DownloadRequest {
            url: url.into(),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    pub fn with_output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_directory = dir.into();
        self
    }
}

/// Fixed configuration handed to an extractor for a single download.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub output_directory: PathBuf,
    pub format: String,
    pub output_template: OutputTemplate,
    pub no_playlist: bool,
    pub quiet: bool,
}

impl DownloadOptions {
    pub fn new(output_directory: impl Into<PathBuf>) -> Self {
        DownloadOptions {
            output_directory: output_directory.into(),
            format: DEFAULT_FORMAT.to_string(),
            output_template: OutputTemplate::default(),
            no_playlist: true,
            quiet: true,
        }
    }

    /// Output path with the template left unrendered, as passed to yt-dlp.
    pub fn output_pattern(&self) -> PathBuf {
        self.output_directory.join(self.output_template.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DownloadResult {
    Success {
        metadata: Metadata,
        #[serde(serialize_with = "serialize_lossy")]
        file_path: PathBuf,
    },
    #[serde(rename = "error")]
    Failure { message: String },
}

impl DownloadResult {
    pub fn failure(message: impl Into<String>) -> Self {
        DownloadResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DownloadResult::Success { .. })
    }

    pub fn file_path(&self) -> Option<&Path> {
        match self {
            DownloadResult::Success { file_path, .. } => Some(file_path),
            DownloadResult::Failure { .. } => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            DownloadResult::Success { .. } => None,
            DownloadResult::Failure { message } => Some(message),
        }
    }
}

// non UTF-8 paths must not keep the result from being printed
fn serialize_lossy<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}
