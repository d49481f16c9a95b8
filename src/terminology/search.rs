/*!
 * Search for a term across every loaded glossary.
 */

use crate::glossary::GlossaryStore;

use super::TerminologyMatch;

/// Find entries whose original or translation contains `term`.
///
/// Matching is case-insensitive. A non-empty `context_filter` must also occur
/// in the entry's context, so entries without a context never pass it; an
/// empty filter is the same as no filter. Every glossary is scanned, in load
/// order.
pub fn search(
    store: &GlossaryStore,
    term: &str,
    context_filter: Option<&str>,
) -> Vec<TerminologyMatch> {
    let needle = term.to_lowercase();
    let context_needle = context_filter
        .filter(|filter| !filter.is_empty())
        .map(str::to_lowercase);

    let mut matches = Vec::new();
    for glossary in store.snapshot() {
        for entry in &glossary.entries {
            let term_hit = entry.original.to_lowercase().contains(&needle)
                || entry.translation.to_lowercase().contains(&needle);
            if !term_hit {
                continue;
            }

            if let Some(context_needle) = &context_needle {
                if !entry.context.to_lowercase().contains(context_needle.as_str()) {
                    continue;
                }
            }

            matches.push(TerminologyMatch::from_entry(entry, &glossary.name));
        }
    }

    matches
}
