/*!
 * Terminology lookup over loaded glossaries.
 *
 * - `matcher`: glossary terms occurring in a submitted text
 * - `search`: a query term across every loaded glossary
 * - `progress`: optional progress side channel for matcher runs
 *
 * Both lookups use case-insensitive substring matching, so a short term can
 * match inside a longer word ("art" inside "heart").
 */

use serde::{Deserialize, Serialize};

use crate::glossary::GlossaryEntry;

pub mod matcher;
pub mod progress;
pub mod search;

pub use matcher::match_terms;
pub use progress::{NoProgress, ProgressSink};
pub use search::search;

/// A glossary entry found relevant to a text or query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminologyMatch {
    /// The entry's original term
    pub term: String,

    /// The entry's translation
    pub translation: String,

    /// The entry's domain tag
    pub context: String,

    /// Name of the glossary the entry came from
    pub source: String,
}

impl TerminologyMatch {
    /// Build a match for an entry found in the named glossary.
    pub fn from_entry(entry: &GlossaryEntry, glossary_name: &str) -> Self {
        Self {
            term: entry.original.clone(),
            translation: entry.translation.clone(),
            context: entry.context.clone(),
            source: glossary_name.to_string(),
        }
    }
}
