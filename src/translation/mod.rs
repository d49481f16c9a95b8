/*!
 * Translate requests.
 *
 * This module contains the types produced by a translate pass:
 *
 * - `result`: the pass-through translation result and its confidence
 * - `stats`: session counters exposed as a reporting view
 */

// Re-export main types for easier usage
pub use self::result::{Confidence, TranslationResult, PASS_THROUGH_NOTE};
pub use self::stats::{StatsTracker, TranslationStats};

// Submodules
pub mod result;
pub mod stats;
