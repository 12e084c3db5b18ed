//! Media tooling seam for the orchestrator.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use scenechain_media::MediaResult;

/// Local media operations the orchestrator needs.
///
/// The production implementation shells out to FFmpeg; pipeline tests
/// substitute deterministic fakes.
#[async_trait]
pub trait MediaTools: Send + Sync {
    /// Download a remote artifact to a local path.
    async fn download(&self, url: &str, dest: &Path) -> MediaResult<()>;

    /// Extract the last frame of a video into an image file.
    async fn extract_last_frame(&self, video: &Path, image: &Path) -> MediaResult<()>;

    /// Concatenate an ordered list of videos into one output file.
    async fn concat(&self, inputs: &[PathBuf], output: &Path, work_dir: &Path) -> MediaResult<()>;
}

/// FFmpeg-backed media tools.
#[derive(Debug, Clone, Default)]
pub struct FfmpegMediaTools {
    http: reqwest::Client,
}

impl FfmpegMediaTools {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaTools for FfmpegMediaTools {
    async fn download(&self, url: &str, dest: &Path) -> MediaResult<()> {
        scenechain_media::download_file(&self.http, url, dest).await
    }

    async fn extract_last_frame(&self, video: &Path, image: &Path) -> MediaResult<()> {
        scenechain_media::extract_last_frame(video, image).await
    }

    async fn concat(&self, inputs: &[PathBuf], output: &Path, work_dir: &Path) -> MediaResult<()> {
        scenechain_media::concat_videos(inputs, output, work_dir).await
    }
}
