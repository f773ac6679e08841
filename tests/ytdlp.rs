#![cfg(unix)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use vidgrab::extractor::YtDlp;
use vidgrab::{DownloadRequest, DownloadResult, Downloader};

// stands in for yt-dlp: honours -o and the single-item flags, fails on urls without a scheme
const FAKE_YTDLP: &str = r#"
out=""
prev=""
single=no
for arg in "$@"; do
  if [ "$prev" = "-o" ]; then out="$arg"; fi
  if [ "$prev" = "--playlist-items" ] && [ "$arg" = "1" ]; then single=yes; fi
  prev="$arg"
done
url="$prev"
case "$url" in
  http*) ;;
  *) echo "ERROR: [generic] '$url' is not a valid URL" >&2; exit 1 ;;
esac
dir=$(dirname "$out")
case "$url" in
  *colon*)
    printf 'clip' > "$dir/a：b.mp4"
    printf '{"id": "a:b", "ext": "mp4", "_filename": "%s"}\n' "$dir/a：b.mp4"
    exit 0
    ;;
esac
printf 'first' > "$dir/abc.mp4"
case "$url" in
  *list=*)
    if [ "$single" = no ]; then
      printf 'second' > "$dir/def.mp4"
      echo '{"id": "def", "ext": "mp4", "title": "Second"}'
    fi
    ;;
esac
echo '{"id": "abc", "ext": "mp4", "title": "T", "description": "D"}'
"#;

fn fake_ytdlp(dir: &TempDir) -> YtDlp {
    let script = dir.path().join("fake-yt-dlp.sh");
    std::fs::write(&script, FAKE_YTDLP).unwrap();
    YtDlp::new("sh").with_args([script.to_string_lossy().into_owned()])
}

fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    files.sort();
    files
}

#[tokio::test]
async fn downloads_into_id_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("files/videos");
    let request = DownloadRequest::new("https://www.youtube.com/watch?v=abc").with_output_directory(&out);

    let result = Downloader::new(fake_ytdlp(&dir)).download(&request).await;

    let (metadata, file_path) = match result {
        DownloadResult::Success { metadata, file_path } => (metadata, file_path),
        DownloadResult::Failure { message } => panic!("expected success, got {message}"),
    };
    assert_eq!(file_path, out.join("abc.mp4"));
    assert!(std::fs::metadata(&file_path).unwrap().len() > 0);
    assert_eq!(metadata["title"], "T");
    assert_eq!(metadata["description"], "D");
    assert_eq!(metadata["filepath"].as_str(), file_path.to_str());
}

#[tokio::test]
async fn file_path_is_the_name_ytdlp_wrote() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let request = DownloadRequest::new("https://example.com/colon").with_output_directory(&out);

    let result = Downloader::new(fake_ytdlp(&dir)).download(&request).await;

    let file_path = result.file_path().expect("download should succeed").to_path_buf();
    assert_eq!(file_path, out.join("a\u{ff1a}b.mp4"));
    assert!(file_path.is_file());
    assert_eq!(files_in(&out), vec![file_path]);
}

#[tokio::test]
async fn invalid_url_is_reported_not_raised() {
    let dir = tempfile::tempdir().unwrap();
    let request = DownloadRequest::new("not-a-url").with_output_directory(dir.path().join("out"));

    let result = Downloader::new(fake_ytdlp(&dir)).download(&request).await;

    assert_eq!(
        result.message(),
        Some("[generic] 'not-a-url' is not a valid URL")
    );
}

#[tokio::test]
async fn playlist_url_downloads_one_item() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let request = DownloadRequest::new("https://www.youtube.com/playlist?list=PL123").with_output_directory(&out);
    let downloader = Downloader::new(fake_ytdlp(&dir));

    assert!(downloader.download(&request).await.is_success());
    assert!(downloader.download(&request).await.is_success());
    assert_eq!(files_in(&out), vec![out.join("abc.mp4")]);
}

#[tokio::test]
async fn missing_program_is_a_failure() {
    let dir = tempfile::tempdir().unwrap();
    let request = DownloadRequest::new("https://example.com/v").with_output_directory(dir.path());

    let result = Downloader::new(YtDlp::new("/nonexistent/yt-dlp")).download(&request).await;

    let message = result.message().unwrap();
    assert!(message.starts_with("Failed to launch /nonexistent/yt-dlp"), "{message}");
}
