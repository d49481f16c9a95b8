/*!
 * Parsing of extracted glossary documents.
 *
 * Glossary documents are written by hand and are inconsistent: headers,
 * blank lines and commentary sit between the term lines. A term line looks
 * like `<term>:<translation>` or `<term> - <translation>`; every other line
 * is skipped without complaint.
 */

use log::debug;

use super::model::GlossaryEntry;

/// Metadata stamped on every parsed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserDefaults {
    /// Domain tag; empty means unset
    pub context: String,
    /// Provenance label
    pub source: String,
    /// Historical period
    pub period: String,
}

impl Default for ParserDefaults {
    fn default() -> Self {
        Self {
            context: String::new(),
            source: "imported".to_string(),
            period: "17th century".to_string(),
        }
    }
}

/// Line-oriented glossary parser.
#[derive(Debug, Clone, Default)]
pub struct GlossaryParser {
    defaults: ParserDefaults,
}

impl GlossaryParser {
    /// Create a parser with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser stamping entries with the given defaults.
    pub fn with_defaults(defaults: ParserDefaults) -> Self {
        Self { defaults }
    }

    /// Parse a block of text into glossary entries, in line order.
    pub fn parse(&self, raw_text: &str) -> Vec<GlossaryEntry> {
        let text = raw_text.strip_prefix('\u{feff}').unwrap_or(raw_text);

        let mut entries = Vec::new();
        let mut skipped = 0usize;

        for line in text.lines() {
            match self.parse_line(line) {
                Some(entry) => entries.push(entry),
                None => skipped += 1,
            }
        }

        debug!("Parsed {} glossary entries, skipped {} lines", entries.len(), skipped);
        entries
    }

    /// Split one line at its first separator.
    fn parse_line(&self, line: &str) -> Option<GlossaryEntry> {
        let split_at = line.find([':', '-'])?;
        let (term, rest) = line.split_at(split_at);
        // Separators are single-byte, skip exactly one
        let translation = &rest[1..];

        let entry = GlossaryEntry::new(term, translation)?;
        Some(
            entry
                .with_context(&self.defaults.context)
                .with_source(&self.defaults.source)
                .with_period(&self.defaults.period),
        )
    }
}

/// Parse with the built-in defaults.
pub fn parse(raw_text: &str) -> Vec<GlossaryEntry> {
    GlossaryParser::new().parse(raw_text)
}
