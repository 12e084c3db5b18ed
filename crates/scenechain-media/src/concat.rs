//! Stream-copy concatenation of ordered video lists.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Name of the manifest file written into the work directory.
const MANIFEST_NAME: &str = "concat-list.txt";

/// Concatenate an ordered list of videos into one output file.
///
/// Uses the concat demuxer in stream-copy mode, so the inputs are never
/// re-encoded and runtime scales with input size. All inputs must share
/// compatible codec and container parameters; FFmpeg rejects the job
/// otherwise and the failure surfaces as `FfmpegFailed`.
pub async fn concat_videos(
    video_paths: &[PathBuf],
    output_path: impl AsRef<Path>,
    work_dir: impl AsRef<Path>,
) -> MediaResult<()> {
    let output_path = output_path.as_ref();
    let manifest_path = work_dir.as_ref().join(MANIFEST_NAME);

    let manifest = build_manifest(video_paths);
    fs::write(&manifest_path, manifest).await?;

    debug!(
        inputs = video_paths.len(),
        output = %output_path.display(),
        "Concatenating scene videos"
    );

    let cmd = FfmpegCommand::new(&manifest_path, output_path)
        .input_args(["-f", "concat", "-safe", "0"])
        .codec_copy();

    FfmpegRunner::new().run(&cmd).await
}

/// Build the concat demuxer manifest, one `file '<path>'` line per input.
///
/// Single quotes inside paths are escaped as `'\''` so a quoted path can
/// never break out of the manifest entry.
fn build_manifest(video_paths: &[PathBuf]) -> String {
    video_paths
        .iter()
        .map(|p| {
            let escaped = p.to_string_lossy().replace('\'', "'\\''");
            format!("file '{}'", escaped)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_preserves_order() {
        let paths = vec![
            PathBuf::from("/tmp/run/scene-0.mp4"),
            PathBuf::from("/tmp/run/scene-1.mp4"),
        ];
        let manifest = build_manifest(&paths);
        assert_eq!(
            manifest,
            "file '/tmp/run/scene-0.mp4'\nfile '/tmp/run/scene-1.mp4'"
        );
    }

    #[test]
    fn test_manifest_escapes_quotes() {
        let paths = vec![PathBuf::from("/tmp/it's here/scene-0.mp4")];
        let manifest = build_manifest(&paths);
        assert_eq!(manifest, "file '/tmp/it'\\''s here/scene-0.mp4'");
    }

    #[test]
    fn test_manifest_is_deterministic() {
        let paths = vec![
            PathBuf::from("/a/scene-0.mp4"),
            PathBuf::from("/a/scene-1.mp4"),
        ];
        assert_eq!(build_manifest(&paths), build_manifest(&paths));
    }

    #[test]
    fn test_concat_command_args() {
        let cmd = FfmpegCommand::new("list.txt", "movie.mp4")
            .input_args(["-f", "concat", "-safe", "0"])
            .codec_copy();
        let args = cmd.build_args();

        let f = args.iter().position(|a| a == "-f").unwrap();
        assert_eq!(args[f + 1], "concat");
        let safe = args.iter().position(|a| a == "-safe").unwrap();
        assert_eq!(args[safe + 1], "0");
        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(safe < input);
    }
}
