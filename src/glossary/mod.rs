/*!
 * Named glossaries of historical terms.
 *
 * This module is split into:
 * - `model`: glossary entries and glossaries
 * - `parser`: line-oriented parsing of extracted glossary documents
 * - `store`: the in-memory registry of loaded glossaries
 */

pub mod model;
pub mod parser;
pub mod store;

// Re-export main types for easier usage
pub use model::{Glossary, GlossaryEntry, GlossarySummary};
pub use parser::{parse, GlossaryParser, ParserDefaults};
pub use store::GlossaryStore;
