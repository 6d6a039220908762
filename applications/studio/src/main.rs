/// Museq Studio - headless harness for the studio libraries
use clap::{Parser, Subcommand};
use museq_audio::RealtimePipeline;
use museq_audio_desktop::CpalCaptureBackend;
use museq_studio::{cli::parse_band, run_demo, AppConfig, DemoOptions};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "museq-studio")]
#[command(about = "Museq multi-track studio harness", long_about = None)]
struct Cli {
    /// Configuration file path (default: museq.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Monitor the microphone through the realtime EQ graph
    Realtime {
        /// Seconds to run before stopping
        #[arg(short, long, default_value_t = 10)]
        seconds: u64,
        /// Band gain as INDEX=DB (repeatable, index 7 is output volume)
        #[arg(short, long, value_parser = parse_band_arg)]
        band: Vec<(usize, f32)>,
    },
    /// Load audio files and play them on a simulated clock
    Demo {
        /// Audio files to load
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Simulated seconds to play
        #[arg(short, long, default_value_t = 30.0)]
        seconds: f64,
        /// Simulated clock step in milliseconds
        #[arg(long, default_value_t = 250)]
        step_ms: u64,
        /// Band gain as INDEX=DB applied to the last file (repeatable)
        #[arg(short, long, value_parser = parse_band_arg)]
        band: Vec<(usize, f32)>,
    },
}

fn parse_band_arg(text: &str) -> Result<(usize, f32), String> {
    parse_band(text).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "museq=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    config.validate()?;

    match cli.command {
        Commands::Realtime { seconds, band } => realtime(&config, seconds, &band),
        Commands::Demo {
            files,
            seconds,
            step_ms,
            band,
        } => {
            let report = run_demo(
                &config,
                &DemoOptions {
                    files,
                    seconds,
                    step: Duration::from_millis(step_ms),
                    bands: band,
                },
            )?;
            tracing::info!(
                tracks = report.tracks.len(),
                finished = report.finished.len(),
                simulated = ?report.simulated,
                export = %report.export.file_name,
                "Demo complete"
            );
            Ok(())
        }
    }
}

fn realtime(config: &AppConfig, seconds: u64, bands: &[(usize, f32)]) -> anyhow::Result<()> {
    let mut pipeline = RealtimePipeline::new(CpalCaptureBackend::new(), config.realtime.clone())?;
    for (index, db) in bands {
        pipeline.set_band(*index, *db)?;
    }

    pipeline.enable()?;
    tracing::info!(
        sample_rate = ?pipeline.sample_rate(),
        seconds,
        "Monitoring microphone"
    );

    std::thread::sleep(Duration::from_secs(seconds));
    pipeline.disable();

    let bars = pipeline.processed_waveform(config.realtime.bar_count);
    tracing::info!(bars = bars.len(), eq = ?pipeline.eq(), "Monitor stopped");
    Ok(())
}
