//! pdf-narrate - Convert a PDF into a narrated MP3 via the VoiceRSS API.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use pdf_narrate::audio;
use pdf_narrate::config::NarrateConfig;
use pdf_narrate::pdf;
use pdf_narrate::runner;
use pdf_narrate::text;
use pdf_narrate::tts::{SpeechSynthesizer, VoiceSettings};
use pdf_narrate::tts::voicerss::VoiceRssSynthesizer;

#[derive(Parser, Debug)]
#[command(name = "pdf-narrate")]
#[command(about = "Convert a PDF into a narrated MP3 using the VoiceRSS text-to-speech API", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the PDF file (defaults to the configured input)
    pdf_file: Option<PathBuf>,

    /// Output directory for per-batch clips and the combined file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sentences per synthesis request
    #[arg(long)]
    batch_size: Option<usize>,

    /// VoiceRSS language code (e.g. "en-gb")
    #[arg(long)]
    language: Option<String>,

    /// VoiceRSS voice name (e.g. "Harry")
    #[arg(long)]
    voice: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Re-combine the artifacts already present in an output directory
    Combine {
        /// Directory holding speech_<n>.mp3 clips (defaults to the
        /// configured output directory)
        dir: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the default input PDF
    SetInput {
        /// Path to the PDF file
        path: PathBuf,
    },
    /// Set the default voice name
    SetVoice {
        /// VoiceRSS voice name (e.g. "Harry")
        name: String,
    },
    /// Set the default language code
    SetLanguage {
        /// VoiceRSS language code (e.g. "en-gb")
        code: String,
    },
    /// Set the default batch size
    SetBatchSize {
        /// Sentences per synthesis request (minimum 1)
        value: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = NarrateConfig::load().context("Failed to load configuration")?;

    match &args.command {
        Some(Commands::Config { action }) => {
            return handle_config_command(action);
        }
        Some(Commands::Combine { dir }) => {
            let dir = dir.clone().unwrap_or_else(|| config.output_dir.clone());
            return combine_existing(&dir);
        }
        None => {}
    }

    let pdf_path = args
        .pdf_file
        .clone()
        .or_else(|| config.input_pdf.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("PDF file path is required. Run 'pdf-narrate --help' for usage.")
        })?;

    if !pdf_path.exists() {
        anyhow::bail!("PDF file not found: {}", pdf_path.display());
    }

    if !audio::is_ffmpeg_available() {
        anyhow::bail!("ffmpeg not found on PATH; it is required to combine audio");
    }

    // Resolved before any network activity; a missing key fails the run here.
    let api_key = NarrateConfig::api_key()?;

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.output_dir.clone());
    let batch_size = args.batch_size.unwrap_or(config.batch_size).max(1);

    let settings = VoiceSettings {
        language: args.language.clone().unwrap_or_else(|| config.language.clone()),
        voice: args.voice.clone().unwrap_or_else(|| config.voice.clone()),
        ..VoiceSettings::default()
    };
    let synthesizer = VoiceRssSynthesizer::new(api_key, settings.clone())?;

    // Artifacts never accumulate across runs.
    reset_output_dir(&output_dir)?;

    info!("Extracting text from {}", pdf_path.display());
    let extracted = pdf::extract_pdf(&pdf_path)?;
    info!(
        "Pages: {}, Words: ~{}",
        extracted.page_count,
        extracted.word_count()
    );

    let batches = text::segment(&extracted.content, batch_size);
    if batches.is_empty() {
        warn!("No text extracted from the document");
    } else {
        info!("Batches: {} (batch size {})", batches.len(), batch_size);
    }

    info!(
        "Synthesizing with {} (language {}, voice {})",
        synthesizer.name(),
        settings.language,
        settings.voice
    );
    let reports = runner::run_batches(&synthesizer, &batches, &output_dir).await;

    let failed = reports.iter().filter(|r| r.outcome.is_err()).count();
    let completed = reports.len() - failed;
    info!("Completed: {}, Failed: {}", completed, failed);

    let manifest = runner::artifact_manifest(&reports);
    let combined_path = output_dir.join(audio::COMBINED_FILE_NAME);
    match audio::combine_artifacts(&manifest, &combined_path) {
        Ok(()) => {
            let size_mb = fs::metadata(&combined_path)?.len() as f64 / (1024.0 * 1024.0);
            info!("Output: {} ({:.1} MB)", combined_path.display(), size_mb);
        }
        Err(audio::AssemblyError::NoArtifacts) => {
            warn!("No batches were synthesized; no combined file produced");
        }
        Err(e) => return Err(e).context("Failed to combine artifacts"),
    }

    Ok(())
}

/// Remove and recreate the output directory.
fn reset_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to clear output directory {}", dir.display()))?;
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    Ok(())
}

/// Re-assemble a directory of artifacts produced by an earlier run.
fn combine_existing(dir: &Path) -> Result<()> {
    if !dir.exists() {
        anyhow::bail!("Output directory not found: {}", dir.display());
    }
    if !audio::is_ffmpeg_available() {
        anyhow::bail!("ffmpeg not found on PATH; it is required to combine audio");
    }

    let artifacts = audio::discover_artifacts(dir)
        .with_context(|| format!("Failed to list artifacts in {}", dir.display()))?;

    let combined_path = dir.join(audio::COMBINED_FILE_NAME);
    match audio::combine_artifacts(&artifacts, &combined_path) {
        Ok(()) => {
            info!("Output: {}", combined_path.display());
            Ok(())
        }
        Err(audio::AssemblyError::NoArtifacts) => {
            warn!("No artifacts in {}; nothing to combine", dir.display());
            Ok(())
        }
        Err(e) => Err(e).context("Failed to combine artifacts"),
    }
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = NarrateConfig::load()?;
            println!("Configuration file: {:?}", NarrateConfig::config_path()?);
            println!();
            if let Some(input) = &config.input_pdf {
                println!("input_pdf = \"{}\"", input.display());
            } else {
                println!("input_pdf = (none)");
            }
            println!("output_dir = \"{}\"", config.output_dir.display());
            println!("batch_size = {}", config.batch_size);
            println!("language = \"{}\"", config.language);
            println!("voice = \"{}\"", config.voice);
        }
        ConfigAction::SetInput { path } => {
            let mut config = NarrateConfig::load()?;
            config.input_pdf = Some(path.clone());
            config.save()?;
            println!("Default input PDF set to: {}", path.display());
        }
        ConfigAction::SetVoice { name } => {
            let mut config = NarrateConfig::load()?;
            config.voice = name.clone();
            config.save()?;
            println!("Default voice set to: {}", config.voice);
        }
        ConfigAction::SetLanguage { code } => {
            let mut config = NarrateConfig::load()?;
            config.language = code.clone();
            config.save()?;
            println!("Default language set to: {}", config.language);
        }
        ConfigAction::SetBatchSize { value } => {
            let mut config = NarrateConfig::load()?;
            config.batch_size = (*value).max(1);
            config.save()?;
            println!("Default batch size set to: {}", config.batch_size);
        }
    }
    Ok(())
}
