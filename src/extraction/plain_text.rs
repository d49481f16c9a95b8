use std::path::Path;

use async_trait::async_trait;

use crate::errors::ExtractionError;

use super::TextExtractor;

// @struct: Reads text files as they are, tolerating invalid UTF-8
pub struct PlainTextExtractor;

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
