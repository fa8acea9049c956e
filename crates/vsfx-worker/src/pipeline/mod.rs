//! End-to-end sound effect pipeline.
//!
//! `Validating → Probing → Trimming → Sampling → Captioning → Synthesizing →
//! AudioCheck → [Stripping] → Muxing → Done`, strictly sequential. The first
//! failure ends the run; nothing is retried.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::Instrument;

use vsfx_media::{move_file, FfmpegToolkit, MediaToolkit};
use vsfx_ml_client::{
    AudioSynthesizer, HttpAudioSynthesizer, HttpSceneCaptioner, MlClientError, SceneCaptioner,
    ServiceEndpoint,
};
use vsfx_models::media::{MIDPOINT_FRAME_FILE, MUXED_FILE, STRIPPED_CLIP_FILE, TRIMMED_CLIP_FILE};
use vsfx_models::{
    EffectDuration, PipelineStage, RunId, SoundEffectOutput, SoundEffectRequest,
    DEFAULT_EFFECT_DURATION_SECS,
};

use crate::config::WorkerConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::logging::RunLogger;
use crate::workspace::Workspace;

mod state;

pub use state::PipelineState;

/// Paths and prompt used by every run.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Parent directory for per-run workspaces
    pub work_dir: PathBuf,
    /// Caller-visible location of the final video
    pub output_path: PathBuf,
    /// Instruction sent to the captioner
    pub caption_prompt: String,
}

impl From<&WorkerConfig> for PipelineSettings {
    fn from(config: &WorkerConfig) -> Self {
        Self {
            work_dir: config.work_dir.clone(),
            output_path: config.output_path.clone(),
            caption_prompt: config.caption_prompt.clone(),
        }
    }
}

/// What the workspace phase hands back to the run.
struct Assembled {
    description: String,
    stripped_source_audio: bool,
}

/// Adds a generated, scene-matched sound effect to a video.
///
/// Holds no per-run state, so one instance can serve concurrent runs as long
/// as each run gets its own output path.
pub struct SoundEffectPipeline {
    toolkit: Arc<dyn MediaToolkit>,
    captioner: Arc<dyn SceneCaptioner>,
    synthesizer: Arc<dyn AudioSynthesizer>,
    settings: PipelineSettings,
}

impl SoundEffectPipeline {
    pub fn new(
        toolkit: Arc<dyn MediaToolkit>,
        captioner: Arc<dyn SceneCaptioner>,
        synthesizer: Arc<dyn AudioSynthesizer>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            toolkit,
            captioner,
            synthesizer,
            settings,
        }
    }

    /// Production wiring: FFmpeg toolkit and HTTP model clients.
    pub fn from_config(config: &WorkerConfig) -> Result<Self, MlClientError> {
        let toolkit = FfmpegToolkit::new().with_timeout(config.ffmpeg_timeout_secs);

        let captioner = HttpSceneCaptioner::new(
            ServiceEndpoint::new(&config.caption_url)
                .with_api_key(config.ml_api_key.clone())
                .with_timeout(config.caption_timeout),
        )?;
        let synthesizer = HttpAudioSynthesizer::new(
            ServiceEndpoint::new(&config.synth_url)
                .with_api_key(config.ml_api_key.clone())
                .with_timeout(config.synth_timeout),
        )?;

        Ok(Self::new(
            Arc::new(toolkit),
            Arc::new(captioner),
            Arc::new(synthesizer),
            PipelineSettings::from(config),
        ))
    }

    /// Run with the default 5 second effect.
    pub async fn generate_default(&self, video: &Path) -> PipelineResult<SoundEffectOutput> {
        self.generate_sound_effect(video, DEFAULT_EFFECT_DURATION_SECS).await
    }

    /// Run a deserialized request.
    pub async fn generate(&self, request: &SoundEffectRequest) -> PipelineResult<SoundEffectOutput> {
        self.generate_sound_effect(&request.video, request.duration.as_secs())
            .await
    }

    /// Produce a copy of `video`, cut to `duration` seconds, whose audio is a
    /// sound effect synthesized from a description of its midpoint frame.
    pub async fn generate_sound_effect(
        &self,
        video: &Path,
        duration: f64,
    ) -> PipelineResult<SoundEffectOutput> {
        let run_id = RunId::new();
        let logger = RunLogger::new(&run_id, "sound_effect");
        let span = logger.create_span();

        let started_at = Utc::now();
        let timer = Instant::now();
        let mut state = PipelineState::new();

        logger.log_start(&format!("{} ({}s)", video.display(), duration));

        let result = self
            .run(&mut state, &logger, video, duration)
            .instrument(span)
            .await;

        let elapsed = timer.elapsed();
        match result {
            Ok((effect_duration, source_duration, assembled)) => {
                state.advance(PipelineStage::Done)?;
                record_outcome("success", elapsed);
                logger.log_completion(&format!(
                    "{} in {:.2}s",
                    self.settings.output_path.display(),
                    elapsed.as_secs_f64()
                ));

                Ok(SoundEffectOutput {
                    run_id,
                    output_path: self.settings.output_path.clone(),
                    description: assembled.description,
                    effect_duration,
                    source_duration,
                    stripped_source_audio: assembled.stripped_source_audio,
                    stages: state.trail().to_vec(),
                    started_at,
                    finished_at: Utc::now(),
                })
            }
            Err(e) => {
                state.fail();
                let stage = state.failed_at().unwrap_or_else(|| e.stage());
                record_outcome("failure", elapsed);
                metrics::counter!("vsfx_pipeline_stage_failures_total", "stage" => stage.as_str())
                    .increment(1);
                logger.log_error(stage, &e.to_string());
                Err(e)
            }
        }
    }

    /// Validate and probe, then do the file work inside a scoped workspace.
    async fn run(
        &self,
        state: &mut PipelineState,
        logger: &RunLogger,
        video: &Path,
        duration: f64,
    ) -> PipelineResult<(EffectDuration, f64, Assembled)> {
        let duration = EffectDuration::new(duration)?;

        state.advance(PipelineStage::Probing)?;
        logger.log_stage(PipelineStage::Probing, "Getting video length");
        let source_secs = self
            .toolkit
            .duration(video)
            .await
            .map_err(|e| PipelineError::probe(PipelineStage::Probing, e))?;

        if source_secs < duration.as_secs() {
            return Err(PipelineError::SourceTooShort {
                source_secs,
                requested_secs: duration.as_secs(),
            });
        }

        state.advance(PipelineStage::Trimming)?;
        let workspace = Workspace::create(&self.settings.work_dir)?;
        let outcome = self
            .assemble(state, logger, &workspace, video, duration)
            .await;
        workspace.close();

        Ok((duration, source_secs, outcome?))
    }

    /// Everything that writes intermediate files. Runs with the workspace
    /// alive; the caller removes it whatever the outcome.
    async fn assemble(
        &self,
        state: &mut PipelineState,
        logger: &RunLogger,
        workspace: &Workspace,
        video: &Path,
        duration: EffectDuration,
    ) -> PipelineResult<Assembled> {
        logger.log_stage(PipelineStage::Trimming, "Cutting video to match duration");
        let trimmed = workspace.file(TRIMMED_CLIP_FILE);
        self.toolkit
            .trim(video, duration.as_secs(), &trimmed)
            .await
            .map_err(PipelineError::Trim)?;

        state.advance(PipelineStage::Sampling)?;
        logger.log_stage(PipelineStage::Sampling, "Getting middle frame of video");
        let frame = workspace.file(MIDPOINT_FRAME_FILE);
        self.toolkit
            .sample_frame(&trimmed, duration.midpoint(), &frame)
            .await
            .map_err(PipelineError::Sample)?;

        state.advance(PipelineStage::Captioning)?;
        logger.log_stage(
            PipelineStage::Captioning,
            &format!("Asking {} to describe the scene", self.captioner.name()),
        );
        let description = self
            .captioner
            .describe(&frame, &self.settings.caption_prompt)
            .await
            .map_err(PipelineError::CaptionService)?;

        state.advance(PipelineStage::Synthesizing)?;
        logger.log_stage(
            PipelineStage::Synthesizing,
            &format!("Generating sound effect with {}", self.synthesizer.name()),
        );
        let audio = self
            .synthesizer
            .synthesize(&description, duration, workspace.path())
            .await
            .map_err(PipelineError::SynthesisService)?;

        state.advance(PipelineStage::AudioCheck)?;
        logger.log_stage(PipelineStage::AudioCheck, "Checking if video has sound");
        let has_audio = self
            .toolkit
            .has_audio_stream(&trimmed)
            .await
            .map_err(|e| PipelineError::probe(PipelineStage::AudioCheck, e))?;

        let mut working_video = trimmed;
        if has_audio {
            state.advance(PipelineStage::Stripping)?;
            logger.log_stage(PipelineStage::Stripping, "Removing sound from video");
            let muted = workspace.file(STRIPPED_CLIP_FILE);
            self.toolkit
                .strip_audio(&working_video, &muted)
                .await
                .map_err(PipelineError::Strip)?;
            working_video = muted;
        }

        state.advance(PipelineStage::Muxing)?;
        logger.log_stage(PipelineStage::Muxing, "Adding sound to video");
        let muxed = workspace.file(MUXED_FILE);
        self.toolkit
            .mux(&working_video, &audio, &muxed)
            .await
            .map_err(PipelineError::Mux)?;

        move_file(&muxed, &self.settings.output_path)
            .await
            .map_err(PipelineError::Output)?;

        Ok(Assembled {
            description,
            stripped_source_audio: has_audio,
        })
    }
}

fn record_outcome(outcome: &'static str, elapsed: Duration) {
    metrics::counter!("vsfx_pipeline_runs_total", "outcome" => outcome).increment(1);
    metrics::histogram!("vsfx_pipeline_duration_seconds").record(elapsed.as_secs_f64());
}
