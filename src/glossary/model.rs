/*!
 * Glossary data model.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One historical term and its modern rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGlossaryEntry")]
pub struct GlossaryEntry {
    /// Source-language term; never empty, matched case-insensitively
    pub original: String,

    /// Target-language rendering, empty when unknown
    pub translation: String,

    /// Domain tag such as "theological"; empty means unset
    pub context: String,

    /// Provenance label of the entry itself
    pub source: String,

    /// Historical period tag
    pub period: String,
}

/// Entry as read from serialized data, before the term is checked
#[derive(Deserialize)]
struct RawGlossaryEntry {
    original: String,
    #[serde(default)]
    translation: String,
    #[serde(default)]
    context: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    period: String,
}

impl TryFrom<RawGlossaryEntry> for GlossaryEntry {
    type Error = String;

    fn try_from(raw: RawGlossaryEntry) -> Result<Self, Self::Error> {
        let entry = GlossaryEntry::new(&raw.original, &raw.translation)
            .ok_or_else(|| "glossary entry term must not be empty".to_string())?;
        Ok(entry
            .with_context(&raw.context)
            .with_source(&raw.source)
            .with_period(&raw.period))
    }
}

impl GlossaryEntry {
    /// Create an entry with empty metadata.
    ///
    /// Returns `None` when the original term is empty after trimming.
    pub fn new(original: &str, translation: &str) -> Option<Self> {
        let original = original.trim();
        if original.is_empty() {
            return None;
        }

        Some(Self {
            original: original.to_string(),
            translation: translation.trim().to_string(),
            context: String::new(),
            source: String::new(),
            period: String::new(),
        })
    }

    /// Set the domain tag.
    pub fn with_context(mut self, context: &str) -> Self {
        self.context = context.to_string();
        self
    }

    /// Set the provenance label.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    /// Set the historical period.
    pub fn with_period(mut self, period: &str) -> Self {
        self.period = period.to_string();
        self
    }
}

/// A named, ordered sequence of entries.
///
/// Entry order is insertion order and decides match precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glossary {
    /// Unique name within the store
    pub name: String,

    /// Entries in insertion order
    pub entries: Vec<GlossaryEntry>,

    /// When this entry list was loaded
    pub last_modified: DateTime<Utc>,
}

impl Glossary {
    /// Create a glossary stamped with the current time.
    pub fn new(name: &str, entries: Vec<GlossaryEntry>) -> Self {
        Self {
            name: name.to_string(),
            entries,
            last_modified: Utc::now(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the glossary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reporting view of this glossary.
    pub fn summary(&self) -> GlossarySummary {
        GlossarySummary {
            name: self.name.clone(),
            entry_count: self.entries.len(),
            last_modified: self.last_modified,
        }
    }
}

/// Name, size and load time of a glossary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossarySummary {
    pub name: String,
    pub entry_count: usize,
    pub last_modified: DateTime<Utc>,
}
