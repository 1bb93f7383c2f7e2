//! Batch orchestration.
//!
//! Drives each URL through inspect → classify → fetch → verify, records
//! one outcome per URL, and never lets one item's failure stop the batch.
//!
//! Per-URL states: Pending → Inspecting → {Skipped | Fetching →
//! {Verified | WarnedUnverified} → Succeeded | FetchFailed}. Each URL is
//! attempted exactly once per run; the only repeated call is the
//! classifier re-check on the fetch-failure path.

use crate::batch::{BatchRun, DownloadOutcome, SkipReason, Tally};
use crate::{classify, input, inspect, strategy, verify};
use anyhow::{Context, Result};
use audiogate_av::engine::{self, DownloadRequest};
use colored::Colorize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Run the whole batch described by `run`.
///
/// Only startup problems are fatal: an unreadable URL list, an
/// uncreatable output directory, or a dry run with nothing to select.
/// Every per-URL error is caught, classified, and tallied.
pub fn run_batch(run: &BatchRun) -> Result<Tally> {
    std::fs::create_dir_all(&run.output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", run.output_dir))?;

    let urls = input::read_url_list(&run.input)?;
    info!("Loaded {} URL(s) from {:?}", urls.len(), run.input);

    let mut tally = Tally::default();

    if run.dry_run {
        let first = urls
            .first()
            .with_context(|| format!("Dry run: no eligible URLs in {:?}", run.input))?;
        let outcome = process_url(first, run);
        print_status(first, &outcome);
        tally.record(&outcome);
        println!("{}", "Dry run complete.".bold());
        return Ok(tally);
    }

    for url in &urls {
        let outcome = process_url(url, run);
        print_status(url, &outcome);
        tally.record(&outcome);
    }

    Ok(tally)
}

/// Drive one URL through the pipeline to a terminal outcome.
fn process_url(url: &str, run: &BatchRun) -> DownloadOutcome {
    info!("Processing {}", url);

    let inspection = inspect::inspect(url, run.verbose);
    if !classify::has_audio(&inspection.formats) {
        let reason = if inspection.degraded {
            SkipReason::InspectionFailed
        } else {
            SkipReason::NoAudio
        };
        debug!("Skipping {}: {:?}", url, reason);
        return DownloadOutcome::SkippedNoAudio(reason);
    }

    let strategy = strategy::select();
    let format_expr = strategy.format_expr();

    // Resolved before the download so the verifier knows what file to
    // probe; failure here only disables verification.
    let expected_path =
        match engine::resolve_output_path(url, &format_expr, strategy::CONTAINER, &run.output_dir) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Could not resolve output path for {}: {}", url, e);
                None
            }
        };

    let request = DownloadRequest {
        url,
        format_expr: &format_expr,
        container: strategy::CONTAINER,
        output_dir: &run.output_dir,
        verbose: run.verbose,
    };

    match engine::download(&request) {
        Ok(()) => {
            match expected_path {
                Some(path) => verify_download(&path),
                None => warn!("Skipping audio verification for {}: output path unknown", url),
            }
            DownloadOutcome::Success
        }
        Err(fetch_err) => {
            // Skip detection and failure diagnosis are separate passes: ask
            // the source again whether audio exists before blaming the
            // fetch, so a format list that changed underneath us still
            // lands in the skip bucket.
            let recheck = inspect::inspect(url, false);
            if !recheck.degraded && !classify::has_audio(&recheck.formats) {
                debug!("Fetch failure for {} attributed to missing audio", url);
                return DownloadOutcome::SkippedNoAudio(SkipReason::NoAudio);
            }
            DownloadOutcome::Failed(fetch_err.to_string())
        }
    }
}

/// Best-effort audio check on the downloaded file; warnings only.
fn verify_download(path: &Path) {
    // The engine may rewrite the predicted extension when it merges
    // streams; fall back to the merge container before giving up.
    let target = if path.exists() {
        path.to_path_buf()
    } else {
        path.with_extension(strategy::CONTAINER)
    };

    match verify::verify(&target) {
        verify::Verification::Confirmed { codec } => {
            debug!("Audio stream confirmed in {:?} ({})", target, codec);
        }
        verify::Verification::Inconclusive { reason } => {
            warn!("Could not confirm audio stream in {:?}: {}", target, reason);
        }
    }
}

fn print_status(url: &str, outcome: &DownloadOutcome) {
    match outcome {
        DownloadOutcome::Success => {
            println!("{} {}", "ok".green().bold(), url);
        }
        DownloadOutcome::SkippedNoAudio(SkipReason::NoAudio) => {
            println!("{} {} (no audio track)", "skip".yellow().bold(), url);
        }
        DownloadOutcome::SkippedNoAudio(SkipReason::InspectionFailed) => {
            println!(
                "{} {} (inspection failed; assumed no audio)",
                "skip".yellow().bold(),
                url
            );
        }
        DownloadOutcome::Failed(cause) => {
            println!("{} {} ({})", "fail".red().bold(), url, cause);
        }
    }
}
