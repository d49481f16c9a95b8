/*!
 * Matching of glossary terminology against submitted text.
 */

use log::debug;

use crate::glossary::GlossaryStore;

use super::progress::{scaled_progress, ProgressSink, PROGRESS_TOTAL};
use super::TerminologyMatch;

/// Find every entry of the requested glossaries whose term occurs in `text`.
///
/// Glossaries are visited in the order given and entries in their stored
/// order; each entry is reported at most once however often it occurs.
/// Unknown glossary names are skipped. The same term found in two glossaries
/// is reported twice, once per glossary.
///
/// Progress goes to `progress` as the glossaries are processed; nothing is
/// reported when `glossary_names` is empty.
pub fn match_terms(
    store: &GlossaryStore,
    text: &str,
    glossary_names: &[String],
    progress: &dyn ProgressSink,
) -> Vec<TerminologyMatch> {
    let mut matches = Vec::new();
    if glossary_names.is_empty() {
        return matches;
    }

    let haystack = text.to_lowercase();
    let count = glossary_names.len();
    progress.report(scaled_progress(0, count), PROGRESS_TOTAL);

    for (index, name) in glossary_names.iter().enumerate() {
        match store.get(name) {
            Some(glossary) => {
                let before = matches.len();
                for entry in &glossary.entries {
                    if haystack.contains(&entry.original.to_lowercase()) {
                        matches.push(TerminologyMatch::from_entry(entry, &glossary.name));
                    }
                }
                debug!("Glossary '{}': {} matching terms", name, matches.len() - before);
            }
            None => debug!("Skipping unknown glossary '{}'", name),
        }

        progress.report(scaled_progress(index + 1, count), PROGRESS_TOTAL);
    }

    matches
}
