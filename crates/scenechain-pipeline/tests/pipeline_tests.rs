//! End-to-end pipeline tests with scripted predictions and fake media
//! tooling. No network, no FFmpeg: downloads write the artifact URL into
//! the destination file and frame extraction copies video bytes, so every
//! payload's provenance is observable.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::fs;

use scenechain_media::MediaResult;
use scenechain_models::{AspectRatio, InlineImage, MovieRequest, Prediction, PredictionStatus};
use scenechain_pipeline::{
    MediaTools, MoviePipeline, PipelineConfig, PipelineError, DEFAULT_FRAME_DESCRIPTION,
};
use scenechain_predict::{PredictError, PredictResult, PredictionRunner};

const CAPTION_PATH: &str = "/predictions";

/// What scripted video jobs should return.
enum VideoBehavior {
    /// Succeed with a distinct `fake://scene-<n>` URL per video job
    UrlPerScene,
    /// Succeed with a fixed raw output payload
    Fixed(Value),
    /// Fail the prediction with a message
    Fail(String),
}

/// Prediction runner that records every submission and answers from a script.
struct ScriptedRunner {
    calls: Mutex<Vec<(String, Value)>>,
    caption_output: Value,
    video_behavior: VideoBehavior,
}

impl ScriptedRunner {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            caption_output: json!("a sunlit junkyard"),
            video_behavior: VideoBehavior::UrlPerScene,
        }
    }

    fn with_caption_output(mut self, output: Value) -> Self {
        self.caption_output = output;
        self
    }

    fn with_video_behavior(mut self, behavior: VideoBehavior) -> Self {
        self.video_behavior = behavior;
        self
    }

    fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PredictionRunner for ScriptedRunner {
    async fn run_prediction(&self, path: &str, input: Value) -> PredictResult<Prediction> {
        let mut calls = self.calls.lock().unwrap();
        calls.push((path.to_string(), input));

        let succeeded = |id: String, output: Value| {
            Ok(Prediction {
                id,
                status: PredictionStatus::Succeeded,
                output: Some(output),
                error: None,
            })
        };

        if path == CAPTION_PATH {
            let n = calls.iter().filter(|(p, _)| p == CAPTION_PATH).count() - 1;
            return succeeded(format!("caption-{n}"), self.caption_output.clone());
        }

        let n = calls.iter().filter(|(p, _)| p != CAPTION_PATH).count() - 1;
        match &self.video_behavior {
            VideoBehavior::UrlPerScene => {
                succeeded(format!("video-{n}"), json!(format!("fake://scene-{n}")))
            }
            VideoBehavior::Fixed(output) => succeeded(format!("video-{n}"), output.clone()),
            VideoBehavior::Fail(msg) => Err(PredictError::job_failed(msg.clone())),
        }
    }
}

/// Media tools that move bytes around without touching FFmpeg.
struct FakeMedia;

#[async_trait]
impl MediaTools for FakeMedia {
    async fn download(&self, url: &str, dest: &Path) -> MediaResult<()> {
        fs::write(dest, url.as_bytes()).await?;
        Ok(())
    }

    async fn extract_last_frame(&self, video: &Path, image: &Path) -> MediaResult<()> {
        let bytes = fs::read(video).await?;
        fs::write(image, bytes).await?;
        Ok(())
    }

    async fn concat(&self, inputs: &[PathBuf], output: &Path, _work_dir: &Path) -> MediaResult<()> {
        let mut combined = Vec::new();
        for input in inputs {
            combined.extend(fs::read(input).await?);
        }
        fs::write(output, combined).await?;
        Ok(())
    }
}

struct Harness {
    pipeline: MoviePipeline,
    runner: Arc<ScriptedRunner>,
    work_root: PathBuf,
    output_dir: PathBuf,
    _root: TempDir,
}

fn harness(runner: ScriptedRunner) -> Harness {
    let root = TempDir::new().unwrap();
    let work_root = root.path().join("work");
    let output_dir = root.path().join("generated");

    let config = PipelineConfig {
        output_dir: output_dir.clone(),
        work_root: work_root.clone(),
        ..PipelineConfig::default()
    };

    let runner = Arc::new(runner);
    let pipeline = MoviePipeline::new(runner.clone(), Arc::new(FakeMedia), config);

    Harness {
        pipeline,
        runner,
        work_root,
        output_dir,
        _root: root,
    }
}

fn seed() -> InlineImage {
    InlineImage::from_bytes("image/png", b"original-upload")
}

fn request(scenes: usize) -> MovieRequest {
    MovieRequest::sanitized("A robot wakes in a junkyard", scenes, AspectRatio::default())
}

/// The temporary root must hold no run directories once a run has ended.
fn assert_no_workspaces(work_root: &Path) {
    if work_root.exists() {
        let entries: Vec<_> = std::fs::read_dir(work_root).unwrap().collect();
        assert!(entries.is_empty(), "leftover workspaces: {entries:?}");
    }
}

fn image_input(call: &(String, Value)) -> &str {
    call.1["input"]["image"].as_str().unwrap()
}

#[tokio::test]
async fn single_scene_run_submits_two_jobs_and_writes_one_movie() {
    let h = harness(ScriptedRunner::new());

    let artifact = h.pipeline.generate(&request(1), seed()).await.unwrap();

    let calls = h.runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, CAPTION_PATH);
    assert_eq!(calls[1].0, "/models/google/veo-3.1/predictions");

    assert_eq!(artifact.prompts.len(), 1);
    assert_eq!(artifact.file_name, format!("movie-{}.mp4", artifact.run_id));
    assert_eq!(
        fs::read(&artifact.movie_path).await.unwrap(),
        b"fake://scene-0"
    );
    assert_no_workspaces(&h.work_root);
}

#[tokio::test]
async fn eight_scene_chain_submits_sixteen_jobs_with_prompt_continuity() {
    let h = harness(ScriptedRunner::new());

    let artifact = h.pipeline.generate(&request(8), seed()).await.unwrap();

    assert_eq!(h.runner.calls().len(), 16);
    assert_eq!(artifact.prompts.len(), 8);
    for i in 1..8 {
        assert!(
            artifact.prompts[i].contains(&artifact.prompts[i - 1]),
            "prompt {i} must embed prompt {} verbatim",
            i - 1
        );
    }

    // One concatenated movie holding all eight scenes in order.
    let movie = fs::read(&artifact.movie_path).await.unwrap();
    let expected: Vec<u8> = (0..8)
        .flat_map(|n| format!("fake://scene-{n}").into_bytes())
        .collect();
    assert_eq!(movie, expected);
    assert_no_workspaces(&h.work_root);
}

#[tokio::test]
async fn continuity_frame_derives_from_previous_scene_video() {
    let h = harness(ScriptedRunner::new());

    h.pipeline.generate(&request(3), seed()).await.unwrap();

    let calls = h.runner.calls();
    // Call order: caption0, video0, caption1, video1, caption2, video2.
    assert_eq!(calls.len(), 6);

    // Scene 0 jobs consume the original upload.
    assert_eq!(image_input(&calls[0]), seed().as_str());
    assert_eq!(image_input(&calls[1]), seed().as_str());

    // Scene i > 0 jobs consume the frame extracted from scene i-1's video,
    // which the fake media layer makes byte-observable.
    for i in 1..3usize {
        let expected = InlineImage::jpeg(format!("fake://scene-{}", i - 1).as_bytes());
        assert_eq!(image_input(&calls[2 * i]), expected.as_str());
        assert_eq!(image_input(&calls[2 * i + 1]), expected.as_str());
    }
}

#[tokio::test]
async fn video_job_carries_generation_parameters() {
    let h = harness(ScriptedRunner::new());
    let request = MovieRequest::sanitized("underwater chase", 1, AspectRatio::Portrait);

    h.pipeline.generate(&request, seed()).await.unwrap();

    let calls = h.runner.calls();
    let input = &calls[1].1["input"];
    assert_eq!(input["duration"], json!(4));
    assert_eq!(input["resolution"], json!("720p"));
    assert_eq!(input["aspect_ratio"], json!("9:16"));
    assert_eq!(input["generate_audio"], json!(true));
    assert!(input["prompt"]
        .as_str()
        .unwrap()
        .contains("Global scenario: underwater chase"));
}

#[tokio::test]
async fn malformed_video_output_aborts_run_before_next_scene() {
    let h = harness(
        ScriptedRunner::new().with_video_behavior(VideoBehavior::Fixed(json!({"oops": true}))),
    );

    let err = h.pipeline.generate(&request(4), seed()).await.unwrap_err();
    assert!(matches!(err, PipelineError::UnexpectedOutput(_)));

    // Scene 0's two jobs ran; no scene-1 job was ever submitted.
    assert_eq!(h.runner.calls().len(), 2);

    // No final output and no leftover workspace.
    assert!(
        !h.output_dir.exists()
            || std::fs::read_dir(&h.output_dir).unwrap().next().is_none()
    );
    assert_no_workspaces(&h.work_root);
}

#[tokio::test]
async fn failed_video_job_propagates_message_and_cleans_up() {
    let h = harness(
        ScriptedRunner::new().with_video_behavior(VideoBehavior::Fail("model crashed".into())),
    );

    let err = h.pipeline.generate(&request(2), seed()).await.unwrap_err();
    match err {
        PipelineError::Predict(PredictError::JobFailed(msg)) => {
            assert_eq!(msg, "model crashed")
        }
        other => panic!("expected JobFailed, got {other}"),
    }
    assert_no_workspaces(&h.work_root);
}

#[tokio::test]
async fn malformed_caption_output_falls_back_to_default_description() {
    let h = harness(ScriptedRunner::new().with_caption_output(json!(42)));

    let artifact = h.pipeline.generate(&request(1), seed()).await.unwrap();

    assert!(artifact.prompts[0].contains(DEFAULT_FRAME_DESCRIPTION));
    assert_no_workspaces(&h.work_root);
}

#[tokio::test]
async fn caption_output_array_uses_first_element() {
    let h = harness(
        ScriptedRunner::new().with_caption_output(json!(["a dog on a beach", "ignored"])),
    );

    let artifact = h.pipeline.generate(&request(1), seed()).await.unwrap();

    assert!(artifact.prompts[0].contains("a dog on a beach"));
    assert!(!artifact.prompts[0].contains(DEFAULT_FRAME_DESCRIPTION));
}

#[tokio::test]
async fn video_output_array_uses_first_element() {
    let h = harness(ScriptedRunner::new().with_video_behavior(VideoBehavior::Fixed(json!([
        "fake://only-scene",
        "ignored"
    ]))));

    let artifact = h.pipeline.generate(&request(1), seed()).await.unwrap();

    assert_eq!(
        fs::read(&artifact.movie_path).await.unwrap(),
        b"fake://only-scene"
    );
}
