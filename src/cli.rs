use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::extractor::{Auto, DirectHttp, Extractor, YtDlp};
use crate::model::{DownloadRequest, DEFAULT_FORMAT, DEFAULT_OUTPUT_DIR};

#[derive(Parser, Debug)]
#[command(name = "vidgrab")]
#[command(about = "Download a single video and print a JSON description of the result")]
pub struct Args {
    #[arg(help = "Video URL")]
    pub url: Option<String>,

    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR, help = "Directory to save the video in")]
    pub output_dir: PathBuf,

    #[arg(short, long, default_value = DEFAULT_FORMAT, help = "yt-dlp format selector")]
    pub format: String,

    #[arg(long, value_enum, default_value_t = ExtractorKind::Auto, help = "Extraction backend")]
    pub extractor: ExtractorKind,

    #[arg(long, env = "VIDGRAB_YTDLP", default_value = "yt-dlp", help = "yt-dlp command, e.g. \"python3 -m yt_dlp\"")]
    pub ytdlp: String,

    #[arg(long, help = "Show a progress spinner and info logs on stderr; yt-dlp's own output stays captured")]
    pub progress: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExtractorKind {
    Auto,
    #[value(name = "yt-dlp")]
    YtDlp,
    Direct,
}

impl Args {
    pub fn request(&self) -> DownloadRequest {
        DownloadRequest::new(self.url.clone().unwrap_or_default())
            .with_output_directory(&self.output_dir)
    }

    pub fn build_extractor(&self) -> Box<dyn Extractor> {
        let ytdlp = YtDlp::from_command_line(&self.ytdlp);
        match self.extractor {
            ExtractorKind::Auto => Box::new(Auto::new(DirectHttp::new(), ytdlp)),
            ExtractorKind::YtDlp => Box::new(ytdlp),
            ExtractorKind::Direct => Box::new(DirectHttp::new()),
        }
    }
}
