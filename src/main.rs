use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use vidgrab::logging::init_tracing;
use vidgrab::{Args, Downloader};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.progress);

    let downloader = Downloader::new(args.build_extractor())
        .format(&args.format)
        .quiet(!args.progress);
    let result = downloader.download(&args.request()).await;

    let json = serde_json::to_string(&result).context("Failed to serialize result")?;
    println!("{}", json);

    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
