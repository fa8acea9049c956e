//! Media constants shared by the toolkit and the orchestrator.

/// Instruction sent to the scene captioner along with the midpoint frame.
pub const CAPTION_PROMPT: &str = "describe what you might hear in this video in detail.";

/// Audio codec of the final video. Video is always stream-copied.
pub const FINAL_AUDIO_CODEC: &str = "aac";

/// Trimmed clip inside the run workspace.
pub const TRIMMED_CLIP_FILE: &str = "cut_video.mp4";
/// Midpoint frame inside the run workspace.
pub const MIDPOINT_FRAME_FILE: &str = "frame.png";
/// Audio-stripped clip inside the run workspace.
pub const STRIPPED_CLIP_FILE: &str = "mute.mp4";
/// Muxed result inside the run workspace, before it is moved to the output path.
pub const MUXED_FILE: &str = "final_video.mp4";

/// Default caller-visible output path.
pub const DEFAULT_OUTPUT_PATH: &str = "final_video.mp4";
