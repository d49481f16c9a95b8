/*!
 * Result of a translate request.
 *
 * Automatic translation is not implemented: the translated text is the input
 * text unchanged, the confidence is always low and a note says so. The value
 * of a translate pass is the terminology it surfaces for the human translator.
 */

use serde::{Deserialize, Serialize};

use crate::terminology::TerminologyMatch;

/// Note attached to every pass-through result
pub const PASS_THROUGH_NOTE: &str =
    "Automatic translation is not available; the text is returned unchanged. Use the terminology matches as a reference.";

/// Confidence in a translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    #[default]
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        };
        write!(f, "{}", label)
    }
}

/// Output of one translate request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub confidence: Confidence,
    pub notes: Vec<String>,
    pub terminology: Vec<TerminologyMatch>,
}

impl TranslationResult {
    /// Build a pass-through result for `text` with the terminology found in it.
    pub fn pass_through(text: &str, terminology: Vec<TerminologyMatch>) -> Self {
        Self {
            original_text: text.to_string(),
            translated_text: text.to_string(),
            confidence: Confidence::Low,
            notes: vec![PASS_THROUGH_NOTE.to_string()],
            terminology,
        }
    }

    /// Append an advisory note.
    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }
}
