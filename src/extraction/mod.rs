/*!
 * Plain-text extraction from glossary documents and facsimiles.
 *
 * Document formats are never parsed in-process. Plain text files are read
 * directly; everything else is handed to an external converter:
 * - `plain_text`: `.txt`, `.md`, `.csv`, `.tsv`
 * - `command`: PDF (`pdftotext`), word processor documents (`pandoc`) and
 *   scanned images (`tesseract`)
 *
 * OCR output is run through the text normalizer before it is returned.
 */

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::app_config::ExtractionConfig;
use crate::errors::ExtractionError;
use crate::text_normalizer;

pub mod command;
pub mod plain_text;

pub use command::CommandExtractor;
pub use plain_text::PlainTextExtractor;

/// Document families the dispatcher knows how to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentFormat {
    /// Plain or lightly structured text
    PlainText,
    /// PDF with a text layer
    Pdf,
    /// Word processor document
    WordProcessor,
    /// Scanned page image, needs OCR
    Image,
}

const PLAIN_TEXT_EXTENSIONS: &[&str] = &["txt", "text", "md", "csv", "tsv"];
const PDF_EXTENSIONS: &[&str] = &["pdf"];
const WORD_PROCESSOR_EXTENSIONS: &[&str] = &["docx", "odt", "rtf"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff", "bmp", "gif", "webp"];

impl DocumentFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let format = if PLAIN_TEXT_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::PlainText)
        } else if PDF_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::Pdf)
        } else if WORD_PROCESSOR_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::WordProcessor)
        } else if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::Image)
        } else {
            None
        };

        format.ok_or_else(|| ExtractionError::UnsupportedFormat {
            extension: if extension.is_empty() { "none".to_string() } else { format!(".{}", extension) },
            supported: Self::supported_extensions().join(", "),
        })
    }

    /// Every recognized extension, dot-prefixed.
    pub fn supported_extensions() -> Vec<String> {
        PLAIN_TEXT_EXTENSIONS
            .iter()
            .chain(PDF_EXTENSIONS)
            .chain(WORD_PROCESSOR_EXTENSIONS)
            .chain(IMAGE_EXTENSIONS)
            .map(|ext| format!(".{}", ext))
            .collect()
    }

    /// Whether text of this format comes out of an OCR engine.
    pub fn is_ocr(&self) -> bool {
        matches!(self, Self::Image)
    }
}

/// Text pulled out of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedText {
    pub text: String,
    pub format: DocumentFormat,
    /// Whether the normalizer was applied
    pub normalized: bool,
}

/// Something that turns a document into plain text
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the raw text of the document at `path`.
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Routes documents to the extractor for their format
pub struct DocumentExtractor {
    extractors: HashMap<DocumentFormat, Box<dyn TextExtractor>>,
    normalize_ocr: bool,
}

impl DocumentExtractor {
    /// Build the standard extractors from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        let mut extractors: HashMap<DocumentFormat, Box<dyn TextExtractor>> = HashMap::new();
        extractors.insert(DocumentFormat::PlainText, Box::new(PlainTextExtractor));
        extractors.insert(DocumentFormat::Pdf, Box::new(CommandExtractor::pdf(config)));
        extractors.insert(DocumentFormat::WordProcessor, Box::new(CommandExtractor::document(config)));
        extractors.insert(DocumentFormat::Image, Box::new(CommandExtractor::ocr(config)));

        Self {
            extractors,
            normalize_ocr: config.normalize_ocr,
        }
    }

    /// Replace the extractor used for one format.
    pub fn with_extractor(mut self, format: DocumentFormat, extractor: Box<dyn TextExtractor>) -> Self {
        self.extractors.insert(format, extractor);
        self
    }

    /// Extract the text of a document, normalizing OCR output.
    pub async fn extract<P: AsRef<Path>>(&self, path: P) -> Result<ExtractedText, ExtractionError> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(ExtractionError::FileNotFound(path.to_path_buf()));
        }

        let format = DocumentFormat::from_path(path)?;
        let extractor = self.extractors.get(&format).ok_or_else(|| ExtractionError::UnsupportedFormat {
            extension: format!("{:?}", format),
            supported: DocumentFormat::supported_extensions().join(", "),
        })?;

        debug!("Extracting {:?} as {:?}", path, format);
        let raw = extractor.extract(path).await?;

        let normalized = format.is_ocr() && self.normalize_ocr;
        let text = if normalized {
            text_normalizer::normalize(&raw)
        } else {
            raw
        };

        info!("Extracted {} characters from {}", text.chars().count(), path.display());

        Ok(ExtractedText { text, format, normalized })
    }
}
