//! Scene orchestrator.
//!
//! Drives the strict per-scene chain: caption the current frame, build the
//! prompt, generate the video, materialize it, then seed the next scene
//! from the last frame. Scenes never overlap; stage `i + 1` starts only
//! after stage `i`'s artifact is fully on disk.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;
use tokio::fs;
use tracing::{info, warn};

use scenechain_models::{AspectRatio, InlineImage, MovieRequest, RunId, Scene};
use scenechain_predict::PredictionRunner;

use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::media::MediaTools;
use crate::prompt::{build_scene_prompt, ScenePromptParams, DEFAULT_FRAME_DESCRIPTION};
use crate::workspace::Workspace;

/// Creation path for caption jobs (versioned model in the body).
const CAPTION_PATH: &str = "/predictions";

/// Continuity state threaded between consecutive scenes.
///
/// Advanced exactly once per non-final scene; for scene `i > 0` the current
/// frame is derived solely from scene `i - 1`'s video, never from the
/// original upload.
#[derive(Debug, Clone)]
pub struct ContinuityState {
    /// Seed image for the next scene, as an inline payload
    pub current_frame: InlineImage,
    /// Prompt of the previous scene, absent before scene 0 completes
    pub previous_prompt: Option<String>,
}

impl ContinuityState {
    /// Start a chain from the uploaded seed image.
    pub fn new(seed: InlineImage) -> Self {
        Self {
            current_frame: seed,
            previous_prompt: None,
        }
    }

    /// Advance past a completed scene.
    pub fn advance(&mut self, frame: InlineImage, prompt: String) {
        self.current_frame = frame;
        self.previous_prompt = Some(prompt);
    }
}

/// Bookkeeping for one run, created at run start.
#[derive(Debug)]
pub struct PipelineRun {
    pub run_id: RunId,
    pub scenario: String,
    pub total_scenes: usize,
    pub aspect_ratio: AspectRatio,
    pub scenes: Vec<Scene>,
    pub started_at: DateTime<Utc>,
}

impl PipelineRun {
    fn new(run_id: RunId, request: &MovieRequest) -> Self {
        Self {
            run_id,
            scenario: request.scenario.clone(),
            total_scenes: request.scenes,
            aspect_ratio: request.aspect_ratio,
            scenes: Vec::with_capacity(request.scenes),
            started_at: Utc::now(),
        }
    }
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct MovieArtifact {
    pub run_id: RunId,
    /// Durable path of the concatenated movie
    pub movie_path: PathBuf,
    /// File name under the output directory (`movie-<run_id>.mp4`)
    pub file_name: String,
    /// Prompt used for each scene, in order
    pub prompts: Vec<String>,
}

/// The scene-chaining pipeline.
///
/// Each call to [`generate`](Self::generate) is one independent run with
/// its own workspace and continuity state; concurrent runs share nothing
/// but network egress and the output directory.
pub struct MoviePipeline {
    predictions: Arc<dyn PredictionRunner>,
    media: Arc<dyn MediaTools>,
    config: PipelineConfig,
}

impl MoviePipeline {
    pub fn new(
        predictions: Arc<dyn PredictionRunner>,
        media: Arc<dyn MediaTools>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            predictions,
            media,
            config,
        }
    }

    /// Generate a movie from a seed image and a sanitized request.
    ///
    /// On any failure the workspace is reclaimed before the error
    /// propagates and no final output is written.
    pub async fn generate(
        &self,
        request: &MovieRequest,
        seed: InlineImage,
    ) -> PipelineResult<MovieArtifact> {
        let run_id = RunId::new();
        let mut run = PipelineRun::new(run_id.clone(), request);

        info!(
            run_id = %run_id,
            scenes = request.scenes,
            aspect_ratio = %request.aspect_ratio,
            "Starting pipeline run"
        );

        // Scoped acquisition: the workspace directory is removed when this
        // binding drops, on success and on every error path alike.
        let workspace = Workspace::acquire(&self.config.work_root, &run_id).await?;

        let mut continuity = ContinuityState::new(seed);

        for index in 0..run.total_scenes {
            let scene = self
                .generate_scene(&mut run, &mut continuity, &workspace, index)
                .await?;
            run.scenes.push(scene);
        }

        fs::create_dir_all(&self.config.output_dir).await?;
        let file_name = run_id.movie_file_name();
        let movie_path = self.config.output_dir.join(&file_name);
        let scene_paths: Vec<PathBuf> = run.scenes.iter().map(|s| s.video_path.clone()).collect();

        self.media
            .concat(&scene_paths, &movie_path, workspace.path())
            .await?;

        let elapsed = Utc::now() - run.started_at;
        info!(
            run_id = %run_id,
            movie = %movie_path.display(),
            elapsed_secs = elapsed.num_seconds(),
            "Pipeline run complete"
        );

        Ok(MovieArtifact {
            run_id,
            movie_path,
            file_name,
            prompts: run.scenes.into_iter().map(|s| s.prompt).collect(),
        })
    }

    /// Run one scene: caption, prompt, generate, materialize, re-seed.
    async fn generate_scene(
        &self,
        run: &mut PipelineRun,
        continuity: &mut ContinuityState,
        workspace: &Workspace,
        index: usize,
    ) -> PipelineResult<Scene> {
        let frame_description = self.caption_frame(run, continuity, index).await?;

        let prompt = build_scene_prompt(&ScenePromptParams {
            scenario: &run.scenario,
            frame_description: &frame_description,
            scene_index: index,
            total_scenes: run.total_scenes,
            previous_prompt: continuity.previous_prompt.as_deref(),
        });

        let video_url = self.generate_video(run, continuity, &prompt, index).await?;

        let video_path = workspace.join(format!("scene-{index}.mp4"));
        self.media.download(&video_url, &video_path).await?;
        info!(run_id = %run.run_id, scene = index, path = %video_path.display(), "Scene materialized");

        // Seed the next scene from this scene's last frame. The final scene
        // has no successor, so its frame is never extracted.
        if index + 1 < run.total_scenes {
            let frame_path = workspace.join(format!("scene-{index}-last-frame.jpg"));
            self.media
                .extract_last_frame(&video_path, &frame_path)
                .await?;
            let frame_bytes = fs::read(&frame_path).await?;
            continuity.advance(InlineImage::jpeg(&frame_bytes), prompt.clone());
        }

        Ok(Scene {
            index,
            prompt,
            frame_description,
            video_path,
        })
    }

    /// Submit a caption job for the current frame and decode it leniently.
    ///
    /// This is the one place a malformed output is tolerated: anything
    /// unrecognizable becomes a fixed default description instead of
    /// failing the run.
    async fn caption_frame(
        &self,
        run: &PipelineRun,
        continuity: &ContinuityState,
        index: usize,
    ) -> PipelineResult<String> {
        let input = json!({
            "version": self.config.caption_model,
            "input": {
                "image": continuity.current_frame.as_str(),
                "caption": false,
                "question": "describe this image",
                "temperature": 1,
                "use_nucleus_sampling": false,
            },
        });

        let prediction = self.predictions.run_prediction(CAPTION_PATH, input).await?;

        Ok(prediction.output_shape().into_text().unwrap_or_else(|| {
            warn!(
                run_id = %run.run_id,
                scene = index,
                "Caption output had an unexpected shape, using default description"
            );
            DEFAULT_FRAME_DESCRIPTION.to_string()
        }))
    }

    /// Submit a video generation job and decode its output strictly.
    async fn generate_video(
        &self,
        run: &PipelineRun,
        continuity: &ContinuityState,
        prompt: &str,
        index: usize,
    ) -> PipelineResult<String> {
        let input = json!({
            "input": {
                "prompt": prompt,
                "image": continuity.current_frame.as_str(),
                "duration": self.config.scene_duration_secs,
                "resolution": self.config.resolution,
                "aspect_ratio": run.aspect_ratio.as_str(),
                "generate_audio": self.config.generate_audio,
            },
        });

        let prediction = self
            .predictions
            .run_prediction(&self.config.video_model_path, input)
            .await?;

        prediction.output_shape().into_text().ok_or_else(|| {
            PipelineError::unexpected_output(format!(
                "scene {index} video job {} returned neither a string nor an array of strings",
                prediction.id
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuity_state_advance() {
        let seed = InlineImage::from_bytes("image/png", b"seed");
        let mut state = ContinuityState::new(seed.clone());
        assert_eq!(state.current_frame, seed);
        assert!(state.previous_prompt.is_none());

        let frame = InlineImage::jpeg(b"frame-0");
        state.advance(frame.clone(), "prompt-0".into());
        assert_eq!(state.current_frame, frame);
        assert_eq!(state.previous_prompt.as_deref(), Some("prompt-0"));
    }
}
