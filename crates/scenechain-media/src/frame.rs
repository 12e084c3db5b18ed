//! Last-frame extraction for scene chaining.

use std::path::Path;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::{MediaError, MediaResult};

/// Seek offset back from end-of-stream, in seconds. Seeking exactly to the
/// end can land past the last decodable frame.
const LAST_FRAME_SEEK_OFFSET: f64 = 0.1;

/// Extract the last frame of a video into an image file.
///
/// Overwrites any existing file at `output_path`.
pub async fn extract_last_frame(
    video_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> MediaResult<()> {
    let video_path = video_path.as_ref();
    let output_path = output_path.as_ref();

    if !video_path.exists() {
        return Err(MediaError::FileNotFound(video_path.to_path_buf()));
    }

    let cmd = FfmpegCommand::new(video_path, output_path)
        .input_arg("-sseof")
        .input_arg(format!("-{}", LAST_FRAME_SEEK_OFFSET))
        .output_args(["-update", "1", "-q:v", "2"]);

    FfmpegRunner::new().run(&cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_frame_args() {
        let cmd = FfmpegCommand::new("scene-0.mp4", "scene-0-last-frame.jpg")
            .input_arg("-sseof")
            .input_arg(format!("-{}", LAST_FRAME_SEEK_OFFSET))
            .output_args(["-update", "1", "-q:v", "2"]);

        let args = cmd.build_args();
        let sseof = args.iter().position(|a| a == "-sseof").unwrap();
        assert_eq!(args[sseof + 1], "-0.1");

        let input = args.iter().position(|a| a == "-i").unwrap();
        assert!(sseof < input, "-sseof must be an input option");

        let update = args.iter().position(|a| a == "-update").unwrap();
        assert_eq!(args[update + 1], "1");
        assert!(args.contains(&"-q:v".to_string()));
    }
}
