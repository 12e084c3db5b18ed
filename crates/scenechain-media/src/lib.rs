//! FFmpeg CLI wrapper for video processing.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building and execution
//! - Last-frame extraction for scene chaining
//! - Stream-copy concatenation of ordered video lists
//! - Artifact download over HTTP

pub mod command;
pub mod concat;
pub mod download;
pub mod error;
pub mod frame;

pub use command::{check_ffmpeg, FfmpegCommand, FfmpegRunner};
pub use concat::concat_videos;
pub use download::download_file;
pub use error::{MediaError, MediaResult};
pub use frame::extract_last_frame;
