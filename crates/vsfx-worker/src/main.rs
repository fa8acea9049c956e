//! Sound effect pipeline binary.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vsfx_models::DEFAULT_EFFECT_DURATION_SECS;
use vsfx_worker::{SoundEffectPipeline, WorkerConfig};

/// Add an AI-generated sound effect to a short video clip.
#[derive(Parser, Debug)]
#[command(name = "vsfx", version, about)]
struct Args {
    /// Source video file
    video: PathBuf,

    /// Length of the effect and of the output clip, in seconds (0 < d <= 20)
    #[arg(short, long, default_value_t = DEFAULT_EFFECT_DURATION_SECS)]
    duration: f64,

    /// Where to write the final video (overrides VSFX_OUTPUT_PATH)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the run record as JSON instead of the output path
    #[arg(long)]
    json: bool,
}

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let mut env_filter = EnvFilter::from_default_env();
    for directive in ["vsfx=info", "vsfx_worker=info", "vsfx_media=info", "vsfx_ml_client=info"] {
        if let Ok(d) = directive.parse() {
            env_filter = env_filter.add_directive(d);
        }
    }

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    // Model endpoints may be HTTPS
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        warn!("rustls crypto provider already installed");
    }

    let args = Args::parse();

    let mut config = WorkerConfig::from_env();
    if let Some(output) = args.output.clone() {
        config.output_path = output;
    }
    info!("Starting vsfx");
    info!("Worker config: {:?}", config);

    let pipeline = match SoundEffectPipeline::from_config(&config)
        .context("Failed to set up model service clients")
    {
        Ok(p) => p,
        Err(e) => {
            error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match pipeline.generate_sound_effect(&args.video, args.duration).await {
        Ok(output) => {
            info!("Finished in {:.2}s", output.elapsed_secs());
            if args.json {
                match serde_json::to_string_pretty(&output) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        error!("Failed to serialize run record: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{}", output.output_path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("vsfx: failed at {}: {}", e.stage(), e);
            if e.is_input_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
