/*!
 * Extraction through external command-line converters.
 *
 * Each converter writes the document's text to stdout. Arguments are a
 * template in which `{input}` is replaced by the document path.
 */

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use tokio::process::Command;

use crate::app_config::ExtractionConfig;
use crate::errors::ExtractionError;

use super::TextExtractor;

/// Placeholder for the document path in argument templates
const INPUT_PLACEHOLDER: &str = "{input}";

/// Page separator emitted by pdftotext
const FORM_FEED: char = '\u{000C}';

// Progress chatter tools print on stderr even when they succeed
const STDERR_NOISE_PREFIXES: &[&str] = &[
    "Tesseract Open Source OCR Engine",
    "Estimating resolution",
    "Detected ",
    "Warning: Invalid resolution",
    "Page ",
];

/// Runs a converter and captures its stdout
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandExtractor {
    /// Create an extractor from a program and argument template.
    pub fn new(program: &str, args: &[&str], timeout_secs: Option<u64>) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            timeout: timeout_secs.map(Duration::from_secs),
        }
    }

    // @creates: pdftotext extractor, pages joined with newlines
    pub fn pdf(config: &ExtractionConfig) -> Self {
        Self::new(
            &config.pdf_command,
            &["-enc", "UTF-8", INPUT_PLACEHOLDER, "-"],
            config.timeout_secs,
        )
    }

    // @creates: pandoc extractor producing unwrapped plain text
    pub fn document(config: &ExtractionConfig) -> Self {
        Self::new(
            &config.document_command,
            &[INPUT_PLACEHOLDER, "-t", "plain", "--wrap=none"],
            config.timeout_secs,
        )
    }

    // @creates: tesseract extractor writing recognized text to stdout
    pub fn ocr(config: &ExtractionConfig) -> Self {
        Self::new(
            &config.ocr_command,
            &[INPUT_PLACEHOLDER, "stdout", "-l", &config.ocr_language],
            config.timeout_secs,
        )
    }

    /// Arguments with the placeholder filled in.
    pub fn arguments(&self, path: &Path) -> Vec<String> {
        let input = path.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace(INPUT_PLACEHOLDER, &input))
            .collect()
    }

    /// Keep only the stderr lines that explain a failure.
    pub fn filter_stderr(stderr: &str) -> String {
        let meaningful: Vec<&str> = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| !STDERR_NOISE_PREFIXES.iter().any(|prefix| line.starts_with(prefix)))
            .collect();

        if meaningful.is_empty() {
            "no error output".to_string()
        } else {
            meaningful.join("\n")
        }
    }
}

#[async_trait]
impl TextExtractor for CommandExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let args = self.arguments(path);
        debug!("Running {} {}", self.program, args.join(" "));

        let output_future = Command::new(&self.program)
            .args(&args)
            .kill_on_drop(true)
            .output();

        let spawned = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, output_future)
                .await
                .map_err(|_| ExtractionError::Timeout {
                    tool: self.program.clone(),
                    seconds: limit.as_secs(),
                })?,
            None => output_future.await,
        };

        let output = spawned.map_err(|e| ExtractionError::ToolUnavailable {
            tool: self.program.clone(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            let filtered = Self::filter_stderr(&String::from_utf8_lossy(&output.stderr));
            error!("{} failed on {}: {}", self.program, path.display(), filtered);
            return Err(ExtractionError::ToolFailed {
                tool: self.program.clone(),
                message: filtered,
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).replace(FORM_FEED, "\n");
        Ok(text)
    }
}
