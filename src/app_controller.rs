use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::ExtractionError;
use crate::extraction::{DocumentExtractor, DocumentFormat, ExtractedText};
use crate::file_utils::FileManager;
use crate::glossary::{GlossaryParser, GlossaryStore, GlossarySummary};
use crate::terminology::{self, ProgressSink, TerminologyMatch};
use crate::translation::{StatsTracker, TranslationResult, TranslationStats};

// @module: Session controller owning the glossary store and counters

/// Parameters of a translate request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    /// Text submitted by the translator
    pub text: String,

    /// Optional domain hint, echoed in the notes
    #[serde(default)]
    pub context: Option<String>,

    /// Glossaries to match against, in precedence order
    #[serde(default)]
    pub use_glossaries: Vec<String>,
}

impl TranslateRequest {
    /// Request matching `text` against the given glossaries.
    pub fn new(text: &str, use_glossaries: &[&str]) -> Self {
        Self {
            text: text.to_string(),
            context: None,
            use_glossaries: use_glossaries.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Attach a domain hint.
    pub fn with_context(mut self, context: &str) -> Self {
        self.context = Some(context.to_string());
        self
    }
}

/// Outcome of loading one glossary document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub glossary_name: String,
    pub entries_processed: usize,
    pub format: DocumentFormat,
    /// Whether OCR cleanup ran before parsing
    pub normalized: bool,
}

/// Outcome of loading a directory of glossary documents
#[derive(Debug, Default)]
pub struct DirectoryLoadReport {
    pub loaded: Vec<LoadReport>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Session context: one per hosting session, never a global
pub struct Controller {
    // @field: App configuration
    config: Config,
    store: GlossaryStore,
    stats: StatsTracker,
    extractor: DocumentExtractor,
    parser: GlossaryParser,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Self {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Self {
        let extractor = DocumentExtractor::from_config(&config.extraction);
        let parser = GlossaryParser::with_defaults(config.glossary.parser_defaults());

        Self {
            config,
            store: GlossaryStore::new(),
            stats: StatsTracker::new(),
            extractor,
            parser,
        }
    }

    /// Swap the document extractor (used to plug in test doubles)
    pub fn with_extractor(mut self, extractor: DocumentExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The session's glossary store
    pub fn store(&self) -> &GlossaryStore {
        &self.store
    }

    /// Extract a glossary document, parse it and store it under `glossary_name`
    /// (the configured default name when absent). Replaces any glossary of that name.
    pub async fn load_glossary<P: AsRef<Path>>(
        &self,
        file_path: P,
        glossary_name: Option<&str>,
    ) -> Result<LoadReport, ExtractionError> {
        let file_path = file_path.as_ref();
        let name = glossary_name.unwrap_or(&self.config.glossary.default_name);

        let extracted = self.extractor.extract(file_path).await?;
        let entries_processed = self.load_glossary_text(name, &extracted.text);

        info!(
            "Loaded glossary '{}' from {} ({} entries)",
            name,
            file_path.display(),
            entries_processed
        );

        Ok(LoadReport {
            glossary_name: name.to_string(),
            entries_processed,
            format: extracted.format,
            normalized: extracted.normalized,
        })
    }

    /// Parse already extracted glossary text and store it; returns the entry count
    pub fn load_glossary_text(&self, glossary_name: &str, raw_text: &str) -> usize {
        let entries = self.parser.parse(raw_text);
        let count = entries.len();
        if count == 0 {
            warn!("Glossary '{}' contains no term lines", glossary_name);
        }
        self.store.load(glossary_name, entries);
        count
    }

    /// Load every readable document under `dir`, one glossary per file stem.
    /// Failures are collected instead of aborting the whole directory.
    pub async fn load_glossary_dir<P: AsRef<Path>>(&self, dir: P) -> Result<DirectoryLoadReport> {
        let dir = dir.as_ref();
        if !FileManager::dir_exists(dir) {
            return Err(anyhow!("Glossary directory does not exist: {:?}", dir));
        }

        let mut report = DirectoryLoadReport::default();
        for path in FileManager::find_documents(dir)? {
            let name = FileManager::glossary_name_for(&path);
            match self.load_glossary(&path, Some(&name)).await {
                Ok(loaded) => report.loaded.push(loaded),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    report.failed.push((path, e.to_string()));
                }
            }
        }

        info!(
            "Loaded {} glossaries from {:?} ({} failed)",
            report.loaded.len(),
            dir,
            report.failed.len()
        );
        Ok(report)
    }

    /// Run a translate pass: match terminology and return the text unchanged
    pub fn translate_text(&self, request: &TranslateRequest, progress: &dyn ProgressSink) -> TranslationResult {
        let terminology = terminology::match_terms(
            &self.store,
            &request.text,
            &request.use_glossaries,
            progress,
        );

        let mut result = TranslationResult::pass_through(&request.text, terminology);

        if let Some(context) = request.context.as_deref().filter(|c| !c.trim().is_empty()) {
            result.add_note(format!("Requested context: {}", context.trim()));
        }

        if !result.terminology.is_empty() {
            result.add_note(format!(
                "Found {} glossary term(s); review them before finalizing the translation.",
                result.terminology.len()
            ));
        }

        let served = self.stats.record_translation();
        debug!(
            "Translate request #{}: {} characters, {} terms",
            served,
            request.text.chars().count(),
            result.terminology.len()
        );

        result
    }

    /// Search all loaded glossaries for a term
    pub fn search_terminology(&self, term: &str, context_filter: Option<&str>) -> Vec<TerminologyMatch> {
        let matches = terminology::search(&self.store, term, context_filter);
        debug!("Search '{}' found {} matches", term, matches.len());
        matches
    }

    /// Extract a document's text without loading it as a glossary
    pub async fn extract_text<P: AsRef<Path>>(&self, file_path: P) -> Result<ExtractedText, ExtractionError> {
        self.extractor.extract(file_path).await
    }

    /// Reporting view of the loaded glossaries
    pub fn glossaries(&self) -> Vec<GlossarySummary> {
        self.store.summaries()
    }

    /// Reporting view of the session counters
    pub fn stats(&self) -> TranslationStats {
        self.stats.snapshot(self.store.size())
    }
}
