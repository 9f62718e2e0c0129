//! pdf-narrate configuration management.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::text::segmenter::DEFAULT_BATCH_SIZE;

/// Environment variable holding the VoiceRSS API key.
pub const API_KEY_ENV: &str = "VOICERSS_API_KEY";

const DEFAULT_OUTPUT_DIR: &str = "./output";
const DEFAULT_LANGUAGE: &str = "en-gb";
const DEFAULT_VOICE: &str = "Harry";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrateConfig {
    /// Default PDF to convert when none is given on the command line
    #[serde(default)]
    pub input_pdf: Option<PathBuf>,

    /// Directory receiving per-batch clips and the combined file
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Sentences per synthesis request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// VoiceRSS language code
    #[serde(default = "default_language")]
    pub language: String,

    /// VoiceRSS voice name
    #[serde(default = "default_voice")]
    pub voice: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

impl Default for NarrateConfig {
    fn default() -> Self {
        Self {
            input_pdf: None,
            output_dir: default_output_dir(),
            batch_size: default_batch_size(),
            language: default_language(),
            voice: default_voice(),
        }
    }
}

impl NarrateConfig {
    /// Get the config file path: ~/.config/cli-programs/pdf-narrate.toml
    pub fn config_path() -> Result<PathBuf> {
        let home = std::env::var("HOME").or_else(|_| std::env::var("USERPROFILE"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("cli-programs")
            .join("pdf-narrate.toml"))
    }

    /// Load config from file, returning default if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: NarrateConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Read the VoiceRSS API key from the environment.
    ///
    /// The key is never persisted in the config file.
    pub fn api_key() -> Result<String> {
        std::env::var(API_KEY_ENV).map_err(|_| {
            anyhow::anyhow!(
                "API key not found. Set the {} environment variable.",
                API_KEY_ENV
            )
        })
    }
}
