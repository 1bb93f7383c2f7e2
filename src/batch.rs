//! Batch run configuration and per-URL outcomes.

use std::path::PathBuf;

/// Process-wide state for one invocation.
///
/// Built once from parsed arguments and passed by reference into each
/// pipeline stage; nothing reads flags from ambient scope.
#[derive(Debug, Clone)]
pub struct BatchRun {
    /// URL list file.
    pub input: PathBuf,
    /// Directory downloaded files land in.
    pub output_dir: PathBuf,
    /// Process only the first eligible URL.
    pub dry_run: bool,
    /// Verbose engine logging plus the pre-download format listing.
    pub verbose: bool,
}

/// Why a URL was skipped instead of downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The source offers no format with an audio stream.
    NoAudio,
    /// The format query failed; absence of audio was assumed, not confirmed.
    InspectionFailed,
}

/// Terminal outcome for one URL, immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Success,
    SkippedNoAudio(SkipReason),
    Failed(String),
}

/// Running tally of outcomes across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Tally {
    /// Record one URL's terminal outcome.
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Success => self.succeeded += 1,
            DownloadOutcome::SkippedNoAudio(_) => self.skipped += 1,
            DownloadOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Number of URLs processed so far.
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }
}
