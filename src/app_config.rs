use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::glossary::ParserDefaults;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Glossary loading settings
    #[serde(default)]
    pub glossary: GlossaryConfig,

    /// Document extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Settings applied when glossaries are loaded
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GlossaryConfig {
    /// Name used when a load request does not give one
    #[serde(default = "default_glossary_name")]
    pub default_name: String,

    /// Provenance label stamped on parsed entries
    #[serde(default = "default_entry_source")]
    pub default_source: String,

    /// Historical period stamped on parsed entries
    #[serde(default = "default_entry_period")]
    pub default_period: String,
}

impl Default for GlossaryConfig {
    fn default() -> Self {
        Self {
            default_name: default_glossary_name(),
            default_source: default_entry_source(),
            default_period: default_entry_period(),
        }
    }
}

impl GlossaryConfig {
    // @returns: Parser stamps derived from this config
    pub fn parser_defaults(&self) -> ParserDefaults {
        ParserDefaults {
            context: String::new(),
            source: self.default_source.clone(),
            period: self.default_period.clone(),
        }
    }
}

/// External tools used to pull plain text out of documents
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractionConfig {
    // @field: PDF to text converter (poppler)
    #[serde(default = "default_pdf_command")]
    pub pdf_command: String,

    // @field: Word processor document converter
    #[serde(default = "default_document_command")]
    pub document_command: String,

    // @field: OCR engine for scanned facsimiles
    #[serde(default = "default_ocr_command")]
    pub ocr_command: String,

    // @field: OCR language pack(s), tesseract syntax (e.g. "eng+lat")
    #[serde(default = "default_ocr_language")]
    pub ocr_language: String,

    /// Whether OCR output is cleaned of historical typesetting artifacts
    #[serde(default = "default_true")]
    pub normalize_ocr: bool,

    /// Time limit for a single tool run in seconds.
    ///
    /// OCR of a large facsimile can take a long time, so there is no limit
    /// unless one is set here.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            pdf_command: default_pdf_command(),
            document_command: default_document_command(),
            ocr_command: default_ocr_command(),
            ocr_language: default_ocr_language(),
            normalize_ocr: true,
            timeout_secs: None,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_glossary_name() -> String {
    "default".to_string()
}

fn default_entry_source() -> String {
    "imported".to_string()
}

fn default_entry_period() -> String {
    "17th century".to_string()
}

fn default_pdf_command() -> String {
    "pdftotext".to_string()
}

fn default_document_command() -> String {
    "pandoc".to_string()
}

fn default_ocr_command() -> String {
    "tesseract".to_string()
}

fn default_ocr_language() -> String {
    "eng".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load the configuration file, or write a default one if it is missing
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<(Self, bool)> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            return Ok((config, false));
        }

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;

        Ok((config, true))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let tools = [
            ("pdf_command", &self.extraction.pdf_command),
            ("document_command", &self.extraction.document_command),
            ("ocr_command", &self.extraction.ocr_command),
        ];
        for (field, command) in tools {
            if command.trim().is_empty() {
                return Err(anyhow!("extraction.{} must not be empty", field));
            }
        }

        if self.extraction.ocr_language.trim().is_empty() {
            return Err(anyhow!("extraction.ocr_language must not be empty"));
        }

        if self.extraction.timeout_secs == Some(0) {
            return Err(anyhow!("extraction.timeout_secs must be positive when set"));
        }

        Ok(())
    }
}
