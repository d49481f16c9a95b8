/*!
 * # Scriptorium
 *
 * A Rust library assisting scholars who translate early-modern texts.
 *
 * ## Features
 *
 * - Extract text from glossary documents and scanned facsimiles:
 *   - plain text files read directly
 *   - PDF, word processor documents and page images through external
 *     converters (pdftotext, pandoc, tesseract)
 * - Clean OCR output of historical typesetting artifacts (long s, ligatures,
 *   merged words)
 * - Keep any number of named glossaries of historical terms in memory
 * - Match glossary terminology against submitted text, with progress reporting
 * - Search a term across every loaded glossary, optionally by context
 *
 * Machine translation is not part of the library: a translate pass returns the
 * text unchanged together with the terminology it contains.
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `text_normalizer`: OCR text cleanup
 * - `glossary`: glossary model, parser and store
 * - `terminology`: matcher, search and progress reporting
 * - `translation`: translate results and session statistics
 * - `extraction`: format detection and text extractors
 * - `app_controller`: the session context owning store and counters
 * - `server`: line-delimited JSON request loop
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod extraction;
pub mod file_utils;
pub mod glossary;
pub mod server;
pub mod terminology;
pub mod text_normalizer;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, LoadReport, TranslateRequest};
pub use errors::{AppError, ExtractionError, ProtocolError};
pub use glossary::{Glossary, GlossaryEntry, GlossaryStore};
pub use terminology::{ProgressSink, TerminologyMatch};
pub use text_normalizer::normalize;
pub use translation::{Confidence, TranslationResult, TranslationStats};
