/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use scriptorium::errors::{AppError, ExtractionError, ProtocolError};

#[test]
fn test_extractionError_unsupportedFormat_shouldDisplayExtension() {
    let error = ExtractionError::UnsupportedFormat {
        extension: ".xyz".to_string(),
        supported: ".txt, .pdf".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("Unsupported file format"));
    assert!(display.contains(".xyz"));
    assert!(display.contains(".txt, .pdf"));
}

#[test]
fn test_extractionError_toolFailed_shouldNameTool() {
    let error = ExtractionError::ToolFailed {
        tool: "tesseract".to_string(),
        message: "cannot read image".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("tesseract"));
    assert!(display.contains("cannot read image"));
}

#[test]
fn test_extractionError_fileNotFound_shouldShowPath() {
    let error = ExtractionError::FileNotFound(PathBuf::from("/missing/glossary.txt"));
    assert!(error.to_string().contains("/missing/glossary.txt"));
}

#[test]
fn test_protocolError_codes_shouldFollowJsonRpc() {
    assert_eq!(ProtocolError::ParseError("x".to_string()).code(), -32700);
    assert_eq!(ProtocolError::MethodNotFound("x".to_string()).code(), -32601);
    assert_eq!(ProtocolError::UnknownTool("x".to_string()).code(), -32602);
    assert_eq!(ProtocolError::InvalidParams("x".to_string()).code(), -32602);
}

#[test]
fn test_appError_fromExtractionError_shouldWrapCorrectly() {
    let app_error: AppError = ExtractionError::FileNotFound(PathBuf::from("a.txt")).into();
    let display = format!("{}", app_error);
    assert!(display.contains("Extraction error"));
    assert!(display.contains("a.txt"));
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhow_shouldBeUnknown() {
    let app_error: AppError = anyhow::anyhow!("something odd").into();
    assert!(matches!(app_error, AppError::Unknown(ref message) if message == "something odd"));
}
