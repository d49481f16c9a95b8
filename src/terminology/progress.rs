/*!
 * Progress reporting for matcher runs.
 *
 * Progress is observational only. A sink must not fail and must not block,
 * and callers have to cope with receiving no events at all.
 */

use indicatif::ProgressBar;

/// Scale every progress value is expressed in
pub const PROGRESS_TOTAL: u64 = 100;

/// Value reported once setup is complete, before the first glossary
pub const PROGRESS_BASELINE: u64 = 10;

/// Receiver of `(current, total)` progress pairs
pub trait ProgressSink: Send + Sync {
    /// Record progress; implementations swallow their own failures.
    fn report(&self, current: u64, total: u64);
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _current: u64, _total: u64) {}
}

impl<F> ProgressSink for F
where
    F: Fn(u64, u64) + Send + Sync,
{
    fn report(&self, current: u64, total: u64) {
        self(current, total)
    }
}

impl ProgressSink for ProgressBar {
    fn report(&self, current: u64, total: u64) {
        self.set_length(total);
        self.set_position(current);
    }
}

/// Progress value after `done` of `count` glossaries have been processed.
///
/// The range above the baseline is split evenly across the glossaries.
pub fn scaled_progress(done: usize, count: usize) -> u64 {
    if count == 0 {
        return PROGRESS_BASELINE;
    }
    let span = PROGRESS_TOTAL - PROGRESS_BASELINE;
    PROGRESS_BASELINE + span * done as u64 / count as u64
}
