#![deny(unreachable_patterns)]
//! FFmpeg CLI wrapper for the sound effect pipeline.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with multiple inputs
//! - Progress parsing from `-progress pipe:2`
//! - Per-invocation timeouts for FFmpeg and FFprobe
//! - The media primitives the pipeline needs (probe, trim, frame, strip, mux)
//! - The `MediaToolkit` capability trait and its FFmpeg implementation

pub mod audio;
pub mod clip;
pub mod command;
pub mod error;
pub mod frame;
pub mod fs_utils;
pub mod mux;
pub mod probe;
pub mod progress;
pub mod toolkit;

pub use audio::strip_audio;
pub use clip::trim_clip;
pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use frame::sample_frame;
pub use fs_utils::move_file;
pub use mux::mux_audio;
pub use probe::{
    get_duration, has_audio_stream, probe_media, probe_media_with_timeout, MediaInfo, StreamInfo,
};
pub use progress::FfmpegProgress;
pub use toolkit::{FfmpegToolkit, MediaToolkit};
