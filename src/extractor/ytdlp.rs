use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{ExtractionError, Result};
use crate::metadata::{parse_info_json, Metadata};
use crate::model::DownloadOptions;

use super::Extractor;

pub const DEFAULT_PROGRAM: &str = "yt-dlp";

static ERROR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^ERROR:\s*(.+?)\s*$").unwrap());

// run the yt-dlp command line to download a single item and print its info json.
// the program may carry leading arguments, e.g. `python3 -m yt_dlp`.
#[derive(Debug, Clone)]
pub struct YtDlp {
    program: String,
    leading_args: Vec<String>,
}

impl YtDlp {
    pub fn new(program: impl Into<String>) -> Self {
        YtDlp {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn from_command_line(command: &str) -> Self {
        let mut parts = command.split_whitespace();
        match parts.next() {
            Some(program) => YtDlp::new(program).with_args(parts),
            None => YtDlp::default(),
        }
    }

    fn build_args(&self, url: &str, options: &DownloadOptions) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.leading_args.iter().map(OsString::from).collect();

        args.push("-f".into());
        args.push(options.format.clone().into());
        args.push("-o".into());
        args.push(options.output_pattern().into_os_string());

        if options.no_playlist {
            args.push("--no-playlist".into());
            args.push("--playlist-items".into());
            args.push("1".into());
        }

        if options.quiet {
            args.push("--quiet".into());
            args.push("--no-progress".into());
            args.push("--no-warnings".into());
        }

        for flag in ["--no-simulate", "--dump-json", "--no-colors", "--"] {
            args.push(flag.into());
        }
        args.push(url.into());

        args
    }
}

impl Default for YtDlp {
    fn default() -> Self {
        YtDlp::new(DEFAULT_PROGRAM)
    }
}

#[async_trait]
impl Extractor for YtDlp {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract_and_download(&self, url: &str, options: &DownloadOptions) -> Result<Metadata> {
        let args = self.build_args(url, options);
        debug!(program = %self.program, ?args, "running yt-dlp");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ExtractionError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            let message = error_message(&stderr)
                .unwrap_or_else(|| format!("yt-dlp exited with {}", output.status));
            warn!(url, %message, "yt-dlp failed");
            return Err(ExtractionError::Process(message));
        }

        parse_info_json(&String::from_utf8_lossy(&output.stdout))
    }

    // yt-dlp sanitizes names its own way, so trust the path it reports.
    fn prepare_filename(&self, metadata: &Metadata, options: &DownloadOptions) -> PathBuf {
        match reported_filename(metadata) {
            Some(path) => path,
            None => options
                .output_directory
                .join(options.output_template.render(metadata)),
        }
    }
}

fn reported_filename(metadata: &Metadata) -> Option<PathBuf> {
    ["_filename", "filename"]
        .iter()
        .filter_map(|key| metadata.get(*key).and_then(|value| value.as_str()))
        .find(|name| !name.is_empty())
        .map(PathBuf::from)
}

fn error_message(stderr: &str) -> Option<String> {
    if let Some(caps) = ERROR_LINE.captures(stderr) {
        return Some(caps[1].to_string());
    }

    let trimmed = stderr.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
