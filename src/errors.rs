/*!
 * Error types for the scriptorium application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * The glossary and terminology layers never fail: unknown glossaries, malformed
 * glossary lines and empty matches are normal outcomes. Only the document
 * extraction collaborators and the request protocol produce errors.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting text from a document
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The file extension is not handled by any extractor
    #[error("Unsupported file format: {extension} (supported: {supported})")]
    UnsupportedFormat {
        /// Extension found on the file, or "none"
        extension: String,
        /// Comma separated list of supported extensions
        supported: String,
    },

    /// The input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The external tool could not be started
    #[error("Could not run '{tool}': {message}")]
    ToolUnavailable {
        /// Command name
        tool: String,
        /// Reason reported by the OS
        message: String,
    },

    /// The external tool ran but reported a failure
    #[error("'{tool}' failed: {message}")]
    ToolFailed {
        /// Command name
        tool: String,
        /// Filtered stderr of the tool
        message: String,
    },

    /// The external tool exceeded the configured time limit
    #[error("'{tool}' timed out after {seconds} seconds")]
    Timeout {
        /// Command name
        tool: String,
        /// Configured limit
        seconds: u64,
    },

    /// Reading the file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Hard errors at the request protocol boundary
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The request line was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The method is not part of the protocol
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// `tools/call` named a tool that does not exist
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// `resources/read` named a resource that does not exist
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Parameters were missing or had the wrong shape
    #[error("Invalid params: {0}")]
    InvalidParams(String),
}

impl ProtocolError {
    /// JSON-RPC style error code for the response payload
    pub fn code(&self) -> i64 {
        match self {
            Self::ParseError(_) => -32700,
            Self::MethodNotFound(_) => -32601,
            Self::UnknownTool(_) | Self::UnknownResource(_) | Self::InvalidParams(_) => -32602,
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from document extraction
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Error at the protocol boundary
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
